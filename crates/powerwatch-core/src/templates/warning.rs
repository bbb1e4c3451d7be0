//! Warning tier: the balance is getting low

use super::layout::{self, Theme};
use super::{format_amount, RECHARGE_URL};
use crate::models::EmailContent;

/// Subject line of the warning notification
pub const WARNING_SUBJECT: &str = "🚨 Yo, Your Electricity About to Ghost You!";

const THEME: Theme = Theme {
    page_background: "#0a0a0a",
    card_background: "linear-gradient(135deg, #0c0a15 0%, #1a1625 100%)",
    card_shadow: "rgba(251, 191, 36, 0.2)",
    header_background: "linear-gradient(90deg, #f59e0b 0%, #d97706 100%)",
    banner: "🚨⚡🚨",
    title: "Balance Running Low",
    title_style: "color: #0c0a0a; font-size: 26px;",
    panel_background: "linear-gradient(135deg, #1c1917 0%, #292524 100%)",
    accent: "#f59e0b",
    label_color: "#fcd34d",
    amount_color: "#fffbeb",
    status: "Getting Low...",
    status_style: "color: #fbbf24; font-size: 16px;",
    headline: "Bruh, wake up!",
    lead: "Your DESCO balance is looking kinda sad right now.",
    lead_color: "#fef3c7",
    aside: "You really gonna let your lights go dark like your future? Don't be that person sitting in the dark contemplating poor life choices.",
    aside_color: "#fcd34d",
    divider: "#78716c",
    button_background: "linear-gradient(90deg, #f59e0b 0%, #d97706 100%)",
    button_color: "#0c0a0a",
    button_shadow: "rgba(245, 158, 11, 0.4)",
    footer: "Get your act together. Seriously. 💪",
};

/// Build the warning notification
pub fn warning_email(balance: f64, account_no: &str, meter_no: &str) -> EmailContent {
    EmailContent {
        subject: WARNING_SUBJECT.to_string(),
        text: text_body(balance, account_no, meter_no),
        html: layout::render(&THEME, balance, account_no, meter_no),
    }
}

fn text_body(balance: f64, account_no: &str, meter_no: &str) -> String {
    let amount = format_amount(balance);
    format!(
        "🚨 BALANCE RUNNING LOW 🚨

Bruh, wake up!

Current Balance: {amount}

Your DESCO balance is looking kinda sad right now. That's BROKE energy right there.

Account: {account_no}
Meter: {meter_no}

You really gonna let your lights go dark like your future? Recharge NOW before you're sitting in the dark like a caveman contemplating your poor life choices.

RECHARGE NOW → {RECHARGE_URL}

Get your act together. Seriously."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject() {
        let email = warning_email(120.0, "123", "456");
        assert!(email.subject.contains("Ghost You"));
    }

    #[test]
    fn test_balance_in_both_bodies() {
        let email = warning_email(120.75, "123", "456");
        assert!(email.text.contains("৳120.75"));
        assert!(email.html.contains("৳120.75"));
    }

    #[test]
    fn test_subjects_differ_between_tiers() {
        assert_ne!(WARNING_SUBJECT, super::super::CRITICAL_SUBJECT);
    }
}
