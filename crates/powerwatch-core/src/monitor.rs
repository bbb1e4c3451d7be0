//! Balance check orchestration
//!
//! A run moves through [`RunState`] strictly forward. The caller loads the
//! config and records that step with [`transition`]; a [`BalanceMonitor`]
//! then fetches the balance once, evaluates the thresholds and dispatches
//! every triggered tier in order. [`exit_status`] maps the outcome to the
//! process exit code.

use std::fmt;

use serde::Serialize;
use tracing::{debug, error, info};

use crate::alerting::{AlertEvaluator, Mailer, NotificationResult};
use crate::config::Config;
use crate::desco::BalanceSource;
use crate::error::{Error, Result};
use crate::models::{BalanceRecord, Severity};
use crate::templates;

/// Stage of a balance check run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    /// Nothing has happened yet
    Idle,
    /// Configuration is loaded
    ConfigLoaded,
    /// The balance record is in hand
    BalanceFetched,
    /// Thresholds are evaluated
    Decided,
    /// Notifications are dispatched
    Done,
    /// Configuration or fetch failed
    Failed,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::Idle => "idle",
            RunState::ConfigLoaded => "config_loaded",
            RunState::BalanceFetched => "balance_fetched",
            RunState::Decided => "decided",
            RunState::Done => "done",
            RunState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Balance as returned by the API
    pub record: BalanceRecord,
    /// Tiers that fired, in dispatch order
    pub triggered: Vec<Severity>,
    /// One entry per dispatch attempt
    pub notifications: Vec<NotificationResult>,
    /// Final state, always [`RunState::Done`]
    pub state: RunState,
}

impl RunReport {
    /// Number of notifications that were delivered
    pub fn delivered(&self) -> usize {
        self.notifications.iter().filter(|n| n.success).count()
    }

    /// Number of notifications that failed to send
    pub fn failed(&self) -> usize {
        self.notifications.len() - self.delivered()
    }
}

/// Runs one balance check against a source and a mailer
pub struct BalanceMonitor<S, M> {
    config: Config,
    source: S,
    mailer: M,
    evaluator: AlertEvaluator,
}

impl<S: BalanceSource, M: Mailer> BalanceMonitor<S, M> {
    /// Create a new monitor
    pub fn new(config: Config, source: S, mailer: M) -> Self {
        let evaluator = AlertEvaluator::new(config.thresholds);

        Self {
            config,
            source,
            mailer,
            evaluator,
        }
    }

    /// Mailer used for dispatch
    pub fn mailer(&self) -> &M {
        &self.mailer
    }

    /// Perform the check
    ///
    /// Fails only when the balance cannot be fetched. Send failures are logged
    /// and recorded in the report.
    pub async fn run(&self) -> Result<RunReport> {
        let account = &self.config.account;
        let thresholds = self.evaluator.thresholds();

        info!(account_no = %account.account_no, "Checking balance for account");

        let record = match self.source.fetch(&account.account_no, &account.meter_no).await {
            Ok(record) => record,
            Err(e) => {
                transition(RunState::ConfigLoaded, RunState::Failed);
                return Err(e.into());
            }
        };
        transition(RunState::ConfigLoaded, RunState::BalanceFetched);

        info!(balance = record.balance, "Current balance: {:.2} BDT", record.balance);
        info!(threshold = thresholds.critical, "Critical threshold: {} BDT", thresholds.critical);
        info!(threshold = thresholds.low, "Low threshold: {} BDT", thresholds.low);

        let triggered = self.evaluator.evaluate(record.balance);
        transition(RunState::BalanceFetched, RunState::Decided);

        let mut notifications = Vec::with_capacity(triggered.len());
        for &severity in &triggered {
            notifications.push(self.dispatch(severity, &record).await);
        }
        transition(RunState::Decided, RunState::Done);

        Ok(RunReport {
            record,
            triggered,
            notifications,
            state: RunState::Done,
        })
    }

    async fn dispatch(&self, severity: Severity, record: &BalanceRecord) -> NotificationResult {
        let account = &self.config.account;
        let threshold = match severity {
            Severity::Critical => self.evaluator.thresholds().critical,
            Severity::Warning => self.evaluator.thresholds().low,
        };

        info!(
            %severity,
            threshold,
            "Balance below {}, sending {} notification...",
            threshold,
            severity
        );

        let content = templates::render(
            severity,
            record.balance,
            &account.account_no,
            &account.meter_no,
        );
        let result = self.mailer.send(&content).await;

        match &result {
            Ok(()) => info!(%severity, "Sent {} notification", severity),
            Err(e) => error!(
                %severity,
                error = %e,
                "Failed to send {} notification email",
                severity
            ),
        }

        NotificationResult::new(severity, &content, result)
    }
}

/// Exit code for a completed run
pub const EXIT_SUCCESS: u8 = 0;

/// Exit code for a configuration or fetch failure
pub const EXIT_FAILURE: u8 = 1;

/// Log a run state change
pub fn transition(from: RunState, to: RunState) {
    debug!(%from, %to, "Run state changed");
}

/// Log the final outcome of a run and pick the process exit code
///
/// Send failures inside a report do not affect the code.
pub fn exit_status(result: &Result<RunReport>) -> u8 {
    match result {
        Ok(report) => {
            info!(
                balance = report.record.balance,
                triggered = report.triggered.len(),
                delivered = report.delivered(),
                failed = report.failed(),
                "Balance check completed successfully"
            );
            EXIT_SUCCESS
        }
        Err(e) => {
            let stage = match e {
                Error::Config(_) => "config",
                Error::Fetch(_) => "fetch",
            };
            error!(error = %e, stage, state = %RunState::Failed, "Error checking balance");
            EXIT_FAILURE
        }
    }
}
