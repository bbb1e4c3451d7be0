//! Alert data models

use std::fmt;

use serde::{Deserialize, Serialize};

/// Alert severity level
///
/// Ordered so that the more urgent tier sorts first, which is also the
/// order notifications are dispatched in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Balance is below the critical threshold
    Critical,
    /// Balance is below the low threshold
    Warning,
}

impl Severity {
    /// All tiers in dispatch order
    pub const ALL: [Severity; 2] = [Severity::Critical, Severity::Warning];

    /// Lowercase name used in logs
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_critical_sorts_first() {
        let mut tiers = vec![Severity::Warning, Severity::Critical];
        tiers.sort();
        assert_eq!(tiers, Severity::ALL);
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Severity::Critical).unwrap(), "\"critical\"");
        assert_eq!(Severity::Warning.to_string(), "warning");
    }
}
