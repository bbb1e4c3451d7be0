//! Error types for PowerWatch

use thiserror::Error;

/// Result type alias using PowerWatch's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal error for a balance check run
///
/// Send failures never abort a run; they are recorded on the run report as
/// [`SendError`] text.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Balance lookup error
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Errors raised while reading settings from the environment
#[derive(Error, Debug)]
pub enum ConfigError {
    /// One or more required keys are absent or empty
    #[error("Missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    /// A key is present but its value cannot be used
    #[error("Invalid value for {key}: {value:?}")]
    Invalid {
        /// Environment variable name
        key: &'static str,
        /// Value as found in the environment
        value: String,
    },

    /// An explicitly requested dotenv file could not be loaded
    #[error("Failed to load environment file {path}: {reason}")]
    EnvFile {
        /// Path that was requested
        path: String,
        /// Loader error text
        reason: String,
    },

    /// The environment source itself could not be read
    #[error("Configuration source error: {0}")]
    Source(#[from] config::ConfigError),
}

impl ConfigError {
    /// Create an invalid value error
    pub fn invalid(key: &'static str, value: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            value: value.into(),
        }
    }

    /// Names of the missing keys, empty for other variants
    pub fn missing_keys(&self) -> &[&'static str] {
        match self {
            Self::Missing(keys) => keys,
            _ => &[],
        }
    }
}

/// Errors raised while fetching the balance
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Network failure, timeout, or a body that is not JSON
    #[error("{0}")]
    Transport(String),

    /// The body parsed but the envelope did not validate
    #[error("Invalid API response: missing or invalid data")]
    InvalidResponse,
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Errors raised while delivering a single notification
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SendError {
    /// Sender or recipient could not be parsed as a mailbox
    #[error("Invalid email address {address:?}: {reason}")]
    Address {
        /// The rejected address
        address: String,
        /// Parser error text
        reason: String,
    },

    /// The MIME message could not be assembled
    #[error("Failed to build message: {0}")]
    Build(String),

    /// The SMTP transport rejected or failed the delivery
    #[error("SMTP error: {0}")]
    Smtp(String),
}

impl From<lettre::transport::smtp::Error> for SendError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        Self::Smtp(err.to_string())
    }
}

impl From<lettre::error::Error> for SendError {
    fn from(err: lettre::error::Error) -> Self {
        Self::Build(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_lists_every_key() {
        let err = ConfigError::Missing(vec!["DESCO_ACCOUNT_NO", "EMAIL_TO"]);

        assert_eq!(
            err.to_string(),
            "Missing required environment variables: DESCO_ACCOUNT_NO, EMAIL_TO"
        );
        assert_eq!(err.missing_keys(), &["DESCO_ACCOUNT_NO", "EMAIL_TO"]);
    }

    #[test]
    fn test_fetch_messages_are_distinguishable() {
        let transport = FetchError::Transport("Network error".to_string());
        let invalid = FetchError::InvalidResponse;

        assert_eq!(transport.to_string(), "Network error");
        assert!(invalid.to_string().starts_with("Invalid API response"));
    }

    #[test]
    fn test_top_level_error_is_transparent() {
        let err: Error = FetchError::InvalidResponse.into();
        assert_eq!(err.to_string(), FetchError::InvalidResponse.to_string());

        let err: Error = ConfigError::invalid("SMTP_PORT", "abc").into();
        assert_eq!(err.to_string(), "Invalid value for SMTP_PORT: \"abc\"");
    }
}
