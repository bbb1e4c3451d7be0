//! Email content model

use serde::{Deserialize, Serialize};

/// A rendered notification, handed to the mailer unmodified
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailContent {
    /// Subject line
    pub subject: String,
    /// Plain-text body
    pub text: String,
    /// Complete HTML document
    pub html: String,
}
