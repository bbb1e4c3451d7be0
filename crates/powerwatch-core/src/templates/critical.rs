//! Critical tier: the balance is about to run out

use super::layout::{self, Theme};
use super::{format_amount, RECHARGE_URL};
use crate::models::EmailContent;

/// Subject line of the critical notification
pub const CRITICAL_SUBJECT: &str = "💀 EMERGENCY: You're About to Live in the Stone Age";

const THEME: Theme = Theme {
    page_background: "#0d0d0d",
    card_background: "linear-gradient(135deg, #1a0a0a 0%, #2d0a0a 100%)",
    card_shadow: "rgba(255, 0, 0, 0.3)",
    header_background: "linear-gradient(90deg, #dc2626 0%, #991b1b 100%)",
    banner: "💀⚡💀",
    title: "POWER EMERGENCY",
    title_style: "color: #ffffff; font-size: 28px; text-shadow: 2px 2px 4px rgba(0,0,0,0.5);",
    panel_background: "linear-gradient(135deg, #450a0a 0%, #7f1d1d 100%)",
    accent: "#dc2626",
    label_color: "#fca5a5",
    amount_color: "#fef2f2",
    status: "⚠️ CRITICALLY LOW ⚠️",
    status_style: "color: #f87171; font-size: 18px;",
    headline: "THIS IS NOT A DRILL!",
    lead: "Your balance is in the danger zone. DESCO will cut your power any moment now.",
    lead_color: "#fecaca",
    aside: "You'll be charging your phone at McDonald's like it's 2005. Is that the life you want? Living off their WiFi, pretending to order fries?",
    aside_color: "#f87171",
    divider: "#7f1d1d",
    button_background: "linear-gradient(90deg, #dc2626 0%, #b91c1c 100%)",
    button_color: "#ffffff",
    button_shadow: "rgba(220, 38, 38, 0.5)",
    footer: "P.S. - Your neighbors are judging you. Just saying. 👀",
};

/// Build the critical notification
pub fn critical_email(balance: f64, account_no: &str, meter_no: &str) -> EmailContent {
    EmailContent {
        subject: CRITICAL_SUBJECT.to_string(),
        text: text_body(balance, account_no, meter_no),
        html: layout::render(&THEME, balance, account_no, meter_no),
    }
}

fn text_body(balance: f64, account_no: &str, meter_no: &str) -> String {
    let amount = format_amount(balance);
    format!(
        "💀 POWER EMERGENCY 💀

THIS IS NOT A DRILL!

Current Balance: {amount} (CRITICALLY LOW)

Your balance is in the danger zone. That's like, TWO digits. Do you even know how numbers work?

Account: {account_no}
Meter: {meter_no}

DESCO is about to cut your power and you'll be out here charging your phone at McDonald's like it's 2005. Is that the life you want? Living off their WiFi, pretending to order fries?

RECHARGE RIGHT NOW → {RECHARGE_URL}

Or accept your fate as someone who literally can't keep the lights on. Your call, but make it quick before you can't even read this email.

P.S. - Your neighbors are judging you. Just saying."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject() {
        let email = critical_email(50.0, "123", "456");
        assert!(email.subject.contains("Stone Age"));
    }

    #[test]
    fn test_balance_in_both_bodies() {
        let email = critical_email(50.5, "123", "456");
        assert!(email.text.contains("৳50.50"));
        assert!(email.html.contains("৳50.50"));
    }

    #[test]
    fn test_marks_balance_critical() {
        let email = critical_email(50.0, "123", "456");
        assert!(email.text.contains("CRITICALLY LOW"));
        assert!(email.html.contains("CRITICALLY LOW"));
    }
}
