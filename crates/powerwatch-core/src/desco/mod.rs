//! Prepaid balance lookup
//!
//! [`BalanceSource`] is the seam the monitor depends on; [`DescoClient`] is
//! the HTTP implementation against the provider's public API.

mod client;

pub use client::{DescoClient, BALANCE_PATH, DEFAULT_BASE_URL};

use async_trait::async_trait;

use crate::error::FetchError;
use crate::models::BalanceRecord;

/// Anything that can report the current balance of a prepaid account
#[async_trait]
pub trait BalanceSource: Send + Sync {
    /// Fetch the balance once, without retrying
    async fn fetch(&self, account_no: &str, meter_no: &str) -> Result<BalanceRecord, FetchError>;
}
