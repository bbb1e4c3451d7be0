//! Email templates for balance notifications
//!
//! Each tier is a pure function from the balance and account identifiers to
//! an [`EmailContent`]. Choosing the tier is the caller's job.

mod critical;
mod layout;
mod warning;

pub use critical::{critical_email, CRITICAL_SUBJECT};
pub use warning::{warning_email, WARNING_SUBJECT};

use crate::models::{EmailContent, Severity};

/// Where the reader can top up their account
pub const RECHARGE_URL: &str = "https://prepaid.desco.org.bd/";

/// Currency glyph prefixed to every rendered amount
pub const CURRENCY_SYMBOL: &str = "৳";

/// Format a balance with the currency glyph and exactly two decimals
pub fn format_amount(balance: f64) -> String {
    format!("{CURRENCY_SYMBOL}{balance:.2}")
}

/// Render the template for a tier
pub fn render(severity: Severity, balance: f64, account_no: &str, meter_no: &str) -> EmailContent {
    match severity {
        Severity::Critical => critical_email(balance, account_no, meter_no),
        Severity::Warning => warning_email(balance, account_no, meter_no),
    }
}
