//! Shared HTML layout for notification emails
//!
//! Both tiers render the same table-based document; only the palette and the
//! copy differ. Everything is inlined so that clients which strip `<style>`
//! blocks or block remote assets still show the email as intended.

use super::{format_amount, RECHARGE_URL};

/// Palette and copy for one notification tier
pub(crate) struct Theme {
    pub page_background: &'static str,
    pub card_background: &'static str,
    pub card_shadow: &'static str,
    pub header_background: &'static str,
    pub banner: &'static str,
    pub title: &'static str,
    pub title_style: &'static str,
    pub panel_background: &'static str,
    pub accent: &'static str,
    pub label_color: &'static str,
    pub amount_color: &'static str,
    pub status: &'static str,
    pub status_style: &'static str,
    pub headline: &'static str,
    pub lead: &'static str,
    pub lead_color: &'static str,
    pub aside: &'static str,
    pub aside_color: &'static str,
    pub divider: &'static str,
    pub button_background: &'static str,
    pub button_color: &'static str,
    pub button_shadow: &'static str,
    pub footer: &'static str,
}

/// Render a complete `<!DOCTYPE html>` document for one tier
pub(crate) fn render(theme: &Theme, balance: f64, account_no: &str, meter_no: &str) -> String {
    let amount = format_amount(balance);
    let Theme {
        page_background,
        card_background,
        card_shadow,
        header_background,
        banner,
        title,
        title_style,
        panel_background,
        accent,
        label_color,
        amount_color,
        status,
        status_style,
        headline,
        lead,
        lead_color,
        aside,
        aside_color,
        divider,
        button_background,
        button_color,
        button_shadow,
        footer,
    } = theme;

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
</head>
<body style="margin: 0; padding: 0; font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; background-color: {page_background};">
    <table role="presentation" width="100%" cellspacing="0" cellpadding="0" style="background-color: {page_background};">
        <tr>
            <td align="center" style="padding: 40px 20px;">
                <table role="presentation" width="600" cellspacing="0" cellpadding="0" style="background: {card_background}; border-radius: 16px; overflow: hidden; box-shadow: 0 25px 50px {card_shadow};">

                    <!-- Header -->
                    <tr>
                        <td style="background: {header_background}; padding: 30px; text-align: center;">
                            <div style="font-size: 64px; margin-bottom: 10px;">{banner}</div>
                            <h1 style="margin: 0; {title_style} font-weight: 800; text-transform: uppercase; letter-spacing: 2px;">
                                {title}
                            </h1>
                        </td>
                    </tr>

                    <!-- Balance -->
                    <tr>
                        <td style="padding: 40px 30px; text-align: center;">
                            <div style="background: {panel_background}; border-radius: 12px; padding: 30px; margin-bottom: 30px; border: 2px solid {accent};">
                                <p style="margin: 0 0 10px 0; color: {label_color}; font-size: 14px; text-transform: uppercase; letter-spacing: 3px;">Current Balance</p>
                                <p style="margin: 0; color: {amount_color}; font-size: 56px; font-weight: 900;">
                                    {amount}
                                </p>
                                <p style="margin: 10px 0 0 0; {status_style} font-weight: 600;">{status}</p>
                            </div>

                            <p style="color: {lead_color}; font-size: 20px; line-height: 1.6; margin: 0 0 25px 0;">
                                <strong>{headline}</strong><br>
                                {lead}
                            </p>

                            <p style="color: {aside_color}; font-size: 16px; line-height: 1.8; margin: 0 0 30px 0; font-style: italic;">
                                {aside}
                            </p>
                        </td>
                    </tr>

                    <!-- Account details -->
                    <tr>
                        <td style="padding: 0 30px 30px 30px;">
                            <table role="presentation" width="100%" cellspacing="0" cellpadding="0" style="background-color: rgba(0,0,0,0.4); border-radius: 8px; overflow: hidden;">
                                <tr>
                                    <td style="padding: 15px 20px; border-bottom: 1px solid {divider};">
                                        <span style="color: {label_color}; font-size: 12px; text-transform: uppercase; letter-spacing: 1px;">Account No</span>
                                        <p style="margin: 5px 0 0 0; color: #ffffff; font-size: 18px; font-weight: 600; font-family: 'Courier New', monospace;">{account_no}</p>
                                    </td>
                                </tr>
                                <tr>
                                    <td style="padding: 15px 20px;">
                                        <span style="color: {label_color}; font-size: 12px; text-transform: uppercase; letter-spacing: 1px;">Meter No</span>
                                        <p style="margin: 5px 0 0 0; color: #ffffff; font-size: 18px; font-weight: 600; font-family: 'Courier New', monospace;">{meter_no}</p>
                                    </td>
                                </tr>
                            </table>
                        </td>
                    </tr>

                    <!-- Call to action -->
                    <tr>
                        <td style="padding: 0 30px 40px 30px; text-align: center;">
                            <a href="{RECHARGE_URL}" style="display: inline-block; background: {button_background}; color: {button_color}; text-decoration: none; padding: 18px 50px; border-radius: 50px; font-size: 18px; font-weight: 700; text-transform: uppercase; letter-spacing: 2px; box-shadow: 0 10px 30px {button_shadow};">
                                ⚡ RECHARGE NOW ⚡
                            </a>
                        </td>
                    </tr>

                    <!-- Footer -->
                    <tr>
                        <td style="background-color: rgba(0,0,0,0.5); padding: 20px; text-align: center;">
                            <p style="margin: 0; color: #a1a1aa; font-size: 12px;">
                                {footer}
                            </p>
                        </td>
                    </tr>

                </table>
            </td>
        </tr>
    </table>
</body>
</html>"#
    )
}
