//! # PowerWatch
//!
//! Prepaid electricity balance watcher.
//!
//! A single run fetches the current balance of a DESCO prepaid account,
//! compares it against two thresholds, and emails a warning and/or a critical
//! notification when the balance is low. It is meant to be triggered by an
//! external scheduler such as cron.
//!
//! ## Architecture
//!
//! - **Config**: environment variables read once into [`Config`]
//! - **Fetcher**: [`desco::DescoClient`] queries the balance API
//! - **Templates**: pure renderers for the two notification tiers
//! - **Alerting**: threshold evaluation and SMTP delivery
//! - **Monitor**: [`monitor::BalanceMonitor`] sequences a run
//!
//! ## Quick Start
//!
//! ```bash
//! # Check once and send whatever is due
//! powerwatch
//!
//! # Evaluate without sending
//! powerwatch --dry-run
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod alerting;
pub mod config;
pub mod desco;
pub mod error;
pub mod models;
pub mod monitor;
pub mod telemetry;
pub mod templates;

pub use config::Config;
pub use error::{Error, Result};

/// Re-exports for convenience
pub mod prelude {
    pub use crate::alerting::{AlertEvaluator, DryRunMailer, Mailer, SmtpNotifier};
    pub use crate::config::Config;
    pub use crate::desco::{BalanceSource, DescoClient};
    pub use crate::error::{Error, Result};
    pub use crate::models::*;
    pub use crate::monitor::{BalanceMonitor, RunReport, RunState};
}
