//! Configuration management for PowerWatch
//!
//! Settings come from environment variables, read once at startup into a
//! single [`Config`] value that is passed to every component constructor.
//!
//! | Variable | Required | Default |
//! |----------|----------|---------|
//! | `DESCO_ACCOUNT_NO` | Yes | |
//! | `DESCO_METER_NO` | Yes | |
//! | `EMAIL_TO` | Yes | |
//! | `EMAIL_FROM` | Yes | |
//! | `SMTP_HOST` | Yes | |
//! | `SMTP_PORT` | No | `587` |
//! | `SMTP_USER` | Yes | |
//! | `SMTP_PASS` | Yes | |
//! | `LOW_THRESHOLD` | No | `150` |
//! | `CRITICAL_THRESHOLD` | No | `100` |
//! | `LOG_LEVEL` | No | `info` |
//! | `LOG_FORMAT` | No | `pretty` |

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use config::{Environment, Map};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Keys that must be present and non-empty, in reporting order
pub const REQUIRED_KEYS: [&str; 7] = [
    "DESCO_ACCOUNT_NO",
    "DESCO_METER_NO",
    "EMAIL_TO",
    "EMAIL_FROM",
    "SMTP_HOST",
    "SMTP_USER",
    "SMTP_PASS",
];

/// Default SMTP submission port
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Default warning threshold
pub const DEFAULT_LOW_THRESHOLD: f64 = 150.0;

/// Default critical threshold
pub const DEFAULT_CRITICAL_THRESHOLD: f64 = 100.0;

/// Main configuration struct
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Prepaid account identifiers
    pub account: AccountConfig,

    /// Notification addresses
    pub email: EmailConfig,

    /// SMTP connection settings
    pub smtp: SmtpConfig,

    /// Alert thresholds
    pub thresholds: Thresholds,
}

/// Prepaid account identifiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountConfig {
    /// Account number
    pub account_no: String,
    /// Meter number
    pub meter_no: String,
}

/// Notification addresses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Recipient address
    pub to: String,
    /// Sender address
    pub from: String,
}

/// SMTP connection settings
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmtpConfig {
    /// Server hostname
    pub host: String,
    /// Server port
    pub port: u16,
    /// Login user
    pub user: String,
    /// Login password
    #[serde(skip_serializing)]
    pub password: String,
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"********")
            .finish()
    }
}

/// Balance levels below which alerts fire
///
/// `low > critical` is expected but not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Warning tier fires below this balance
    pub low: f64,
    /// Critical tier fires below this balance
    pub critical: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            low: DEFAULT_LOW_THRESHOLD,
            critical: DEFAULT_CRITICAL_THRESHOLD,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Log format (json or pretty)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Read `LOG_LEVEL` and `LOG_FORMAT`, falling back to defaults
    ///
    /// Never fails so that logging is available before the main config is
    /// validated.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            level: non_empty(std::env::var("LOG_LEVEL").ok()).unwrap_or(defaults.level),
            format: non_empty(std::env::var("LOG_FORMAT").ok()).unwrap_or(defaults.format),
        }
    }
}

/// Raw environment view; `config` lowercases variable names
#[derive(Debug, Default, Deserialize)]
struct RawEnv {
    desco_account_no: Option<String>,
    desco_meter_no: Option<String>,
    email_to: Option<String>,
    email_from: Option<String>,
    smtp_host: Option<String>,
    smtp_port: Option<String>,
    smtp_user: Option<String>,
    smtp_pass: Option<String>,
    low_threshold: Option<String>,
    critical_threshold: Option<String>,
}

impl Config {
    /// Load configuration from the process environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_environment(Environment::default())
    }

    /// Load configuration from an explicit set of variables
    pub fn from_vars<K, V, I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map: Map<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        Self::from_environment(Environment::default().source(Some(map)))
    }

    fn from_environment(source: Environment) -> Result<Self, ConfigError> {
        let raw: RawEnv = config::Config::builder()
            .add_source(source.ignore_empty(true))
            .build()?
            .try_deserialize()?;

        Self::from_raw(raw)
    }

    fn from_raw(raw: RawEnv) -> Result<Self, ConfigError> {
        let mut missing = Vec::new();
        let mut require = |value: Option<String>, key: &'static str| {
            non_empty(value).unwrap_or_else(|| {
                missing.push(key);
                String::new()
            })
        };

        let account_no = require(raw.desco_account_no, "DESCO_ACCOUNT_NO");
        let meter_no = require(raw.desco_meter_no, "DESCO_METER_NO");
        let to = require(raw.email_to, "EMAIL_TO");
        let from = require(raw.email_from, "EMAIL_FROM");
        let host = require(raw.smtp_host, "SMTP_HOST");
        let user = require(raw.smtp_user, "SMTP_USER");
        let password = require(raw.smtp_pass, "SMTP_PASS");

        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let port = parse_or(raw.smtp_port, "SMTP_PORT", DEFAULT_SMTP_PORT)?;
        let low = parse_or(raw.low_threshold, "LOW_THRESHOLD", DEFAULT_LOW_THRESHOLD)?;
        let critical = parse_or(
            raw.critical_threshold,
            "CRITICAL_THRESHOLD",
            DEFAULT_CRITICAL_THRESHOLD,
        )?;

        Ok(Self {
            account: AccountConfig {
                account_no,
                meter_no,
            },
            email: EmailConfig { to, from },
            smtp: SmtpConfig {
                host,
                port,
                user,
                password,
            },
            thresholds: Thresholds { low, critical },
        })
    }
}

/// Load a dotenv file into the process environment
///
/// Variables that are already set win over the file. With no explicit path a
/// missing `./.env` is not an error; an explicit path must exist.
pub fn load_env_file(path: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    match path {
        Some(path) => dotenvy::from_path(path)
            .map(|()| Some(path.to_path_buf()))
            .map_err(|e| ConfigError::EnvFile {
                path: path.display().to_string(),
                reason: e.to_string(),
            }),
        None => match dotenvy::dotenv() {
            Ok(path) => Ok(Some(path)),
            Err(e) if e.not_found() => Ok(None),
            Err(e) => Err(ConfigError::EnvFile {
                path: ".env".to_string(),
                reason: e.to_string(),
            }),
        },
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_or<T: FromStr>(
    value: Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match non_empty(value) {
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| ConfigError::invalid(key, v)),
        None => Ok(default),
    }
}
