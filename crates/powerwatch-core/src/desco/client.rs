//! HTTP client for the DESCO prepaid balance API

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use super::BalanceSource;
use crate::error::FetchError;
use crate::models::{ApiEnvelope, BalanceRecord};

/// Production base URL of the balance API
pub const DEFAULT_BASE_URL: &str = "https://prepaid.desco.org.bd/api/tkdes/customer";

/// Path of the balance lookup under the base URL
pub const BALANCE_PATH: &str = "/getBalance";

/// Balance API client
///
/// The provider serves an invalid certificate chain, so certificate
/// verification is switched off on this client only. Build a separate client
/// for any other endpoint.
#[derive(Clone)]
pub struct DescoClient {
    client: Client,
    base_url: String,
}

impl DescoClient {
    /// Create a client for the production endpoint
    pub fn new() -> Result<Self, FetchError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client for an alternative base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let client = Client::builder()
            .danger_accept_invalid_certs(true)
            .build()?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    /// Full URL of the balance lookup, without query parameters
    pub fn balance_url(&self) -> String {
        format!("{}{}", self.base_url, BALANCE_PATH)
    }
}

#[async_trait]
impl BalanceSource for DescoClient {
    async fn fetch(&self, account_no: &str, meter_no: &str) -> Result<BalanceRecord, FetchError> {
        let url = self.balance_url();
        debug!(url = %url, account_no, meter_no, "Requesting balance");

        let response = self
            .client
            .get(&url)
            .query(&[("accountNo", account_no), ("meterNo", meter_no)])
            .send()
            .await?;

        let status = response.status();
        let body: Value = response.json().await?;

        debug!(status = %status, body = %body, "Balance API responded");

        let envelope = ApiEnvelope::from_json(body)?;
        if !envelope.is_valid() {
            warn!(
                status = %status,
                code = %envelope.code,
                desc = %envelope.desc,
                "Balance API returned an unusable envelope"
            );
        }

        envelope.into_record()
    }
}
