//! Alerting for PowerWatch
//!
//! Provides threshold evaluation and notification delivery.

mod evaluator;
mod notifier;

pub use evaluator::AlertEvaluator;
pub use notifier::{
    DryRunMailer, Mailer, NotificationResult, SmtpNotifier, TransportSecurity, IMPLICIT_TLS_PORT,
};
