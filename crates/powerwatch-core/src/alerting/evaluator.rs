//! Threshold evaluation

use tracing::debug;

use crate::config::Thresholds;
use crate::models::Severity;

/// Decides which notification tiers a balance triggers
///
/// The two thresholds are checked independently. A balance below the critical
/// threshold is normally also below the low one, so it fires both tiers,
/// critical first.
#[derive(Debug, Clone, Copy)]
pub struct AlertEvaluator {
    thresholds: Thresholds,
}

impl AlertEvaluator {
    /// Create a new evaluator
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// Thresholds in use
    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Whether a single tier fires for this balance
    pub fn is_breached(&self, severity: Severity, balance: f64) -> bool {
        match severity {
            Severity::Critical => balance < self.thresholds.critical,
            Severity::Warning => balance < self.thresholds.low,
        }
    }

    /// Tiers that fire for this balance, in dispatch order
    pub fn evaluate(&self, balance: f64) -> Vec<Severity> {
        let triggered: Vec<Severity> = Severity::ALL
            .into_iter()
            .filter(|severity| self.is_breached(*severity, balance))
            .collect();

        debug!(
            balance,
            low = self.thresholds.low,
            critical = self.thresholds.critical,
            triggered = ?triggered,
            "Evaluated thresholds"
        );

        triggered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn default_evaluator() -> AlertEvaluator {
        AlertEvaluator::new(Thresholds::default())
    }

    #[rstest]
    #[case(878.88)]
    #[case(150.0)]
    #[case(150.01)]
    fn test_no_alert_at_or_above_low(#[case] balance: f64) {
        assert!(default_evaluator().evaluate(balance).is_empty());
    }

    #[rstest]
    #[case(149.99)]
    #[case(120.5)]
    #[case(100.0)]
    fn test_warning_only_between_thresholds(#[case] balance: f64) {
        assert_eq!(default_evaluator().evaluate(balance), vec![Severity::Warning]);
    }

    #[rstest]
    #[case(99.99)]
    #[case(50.0)]
    #[case(0.0)]
    #[case(-12.5)]
    fn test_both_tiers_below_critical(#[case] balance: f64) {
        assert_eq!(
            default_evaluator().evaluate(balance),
            vec![Severity::Critical, Severity::Warning]
        );
    }

    #[test]
    fn test_custom_thresholds() {
        let evaluator = AlertEvaluator::new(Thresholds {
            low: 200.0,
            critical: 50.0,
        });

        assert_eq!(evaluator.evaluate(120.0), vec![Severity::Warning]);
        assert_eq!(
            evaluator.evaluate(49.0),
            vec![Severity::Critical, Severity::Warning]
        );
        assert!(evaluator.evaluate(200.0).is_empty());
    }

    #[test]
    fn test_inverted_thresholds_evaluate_independently() {
        // critical above low: only critical fires in between
        let evaluator = AlertEvaluator::new(Thresholds {
            low: 100.0,
            critical: 150.0,
        });

        assert_eq!(evaluator.evaluate(120.0), vec![Severity::Critical]);
        assert_eq!(
            evaluator.evaluate(90.0),
            vec![Severity::Critical, Severity::Warning]
        );
    }
}
