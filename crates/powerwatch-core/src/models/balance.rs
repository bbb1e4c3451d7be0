//! Balance data models

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FetchError;

/// Envelope code the balance API uses for success
pub const SUCCESS_CODE: f64 = 200.0;

/// Balance reading for one prepaid account, valid for a single run
///
/// Only `balance` is validated. The other fields are informational and fall
/// back to empty or zero when the API sends `null` or an unexpected type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceRecord {
    /// Account number as echoed by the API
    pub account_no: String,

    /// Meter number as echoed by the API
    pub meter_no: String,

    /// Remaining credit in the provider's currency
    pub balance: f64,

    /// Consumption so far this month
    pub current_month_consumption: f64,

    /// When the meter was last read, passed through as-is
    pub reading_time: String,
}

impl BalanceRecord {
    fn from_data(data: &Value, balance: f64) -> Self {
        Self {
            account_no: lenient_text(&data["accountNo"]),
            meter_no: lenient_text(&data["meterNo"]),
            balance,
            current_month_consumption: lenient_number(&data["currentMonthConsumption"]),
            reading_time: lenient_text(&data["readingTime"]),
        }
    }
}

/// Strings pass through, numbers are printed, anything else is empty
fn lenient_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

/// Numbers and numeric strings are read, anything else is zero
fn lenient_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or_default(),
        Value::String(s) => s.trim().parse().unwrap_or_default(),
        _ => 0.0,
    }
}

/// Raw `{code, desc, data}` wrapper returned by the balance API
///
/// Every field is optional at the JSON level so that any object can be
/// inspected; [`ApiEnvelope::into_record`] decides whether it is usable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiEnvelope {
    /// Status code, 200 on success
    #[serde(default)]
    pub code: Value,

    /// Human readable status
    #[serde(default)]
    pub desc: Value,

    /// Balance payload
    #[serde(default)]
    pub data: Value,
}

impl ApiEnvelope {
    /// Parse an envelope from an already decoded JSON body
    ///
    /// A body that is valid JSON but not an object is an invalid response,
    /// not a transport failure.
    pub fn from_json(body: Value) -> Result<Self, FetchError> {
        // Derived struct impls also accept arrays by position
        if !body.is_object() {
            return Err(FetchError::InvalidResponse);
        }
        serde_json::from_value(body).map_err(|_| FetchError::InvalidResponse)
    }

    /// Whether the envelope carries a usable balance
    pub fn is_valid(&self) -> bool {
        self.balance().is_some()
    }

    fn balance(&self) -> Option<f64> {
        if self.code.as_f64() != Some(SUCCESS_CODE) || !self.data.is_object() {
            return None;
        }
        self.data.get("balance").and_then(Value::as_f64)
    }

    /// Validate the envelope and extract the balance record
    pub fn into_record(self) -> Result<BalanceRecord, FetchError> {
        let balance = self.balance().ok_or(FetchError::InvalidResponse)?;
        Ok(BalanceRecord::from_data(&self.data, balance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ok_body(balance: Value) -> Value {
        json!({
            "code": 200,
            "desc": "OK",
            "data": {
                "accountNo": "13151091",
                "meterNo": "661120227647",
                "balance": balance,
                "currentMonthConsumption": 43.1,
                "readingTime": "2025-12-03 00:00:00"
            }
        })
    }

    #[test]
    fn test_valid_envelope_yields_record() {
        let record = ApiEnvelope::from_json(ok_body(json!(878.88)))
            .and_then(ApiEnvelope::into_record)
            .unwrap();

        assert_eq!(record.balance, 878.88);
        assert_eq!(record.account_no, "13151091");
        assert_eq!(record.meter_no, "661120227647");
        assert_eq!(record.current_month_consumption, 43.1);
        assert_eq!(record.reading_time, "2025-12-03 00:00:00");
    }

    #[test]
    fn test_integer_balance_is_numeric() {
        let record = ApiEnvelope::from_json(ok_body(json!(120)))
            .and_then(ApiEnvelope::into_record)
            .unwrap();
        assert_eq!(record.balance, 120.0);
    }

    #[test]
    fn test_non_200_code_is_invalid() {
        let envelope = ApiEnvelope::from_json(json!({
            "code": 500,
            "desc": "Internal Server Error",
            "data": null
        }))
        .unwrap();

        assert!(!envelope.is_valid());
        assert_eq!(envelope.into_record(), Err(FetchError::InvalidResponse));
    }

    #[test]
    fn test_string_balance_is_invalid() {
        let envelope = ApiEnvelope::from_json(ok_body(json!("878.88"))).unwrap();
        assert_eq!(envelope.into_record(), Err(FetchError::InvalidResponse));
    }

    #[test]
    fn test_missing_data_is_invalid() {
        let envelope = ApiEnvelope::from_json(json!({ "invalid": "response" })).unwrap();
        assert_eq!(envelope.into_record(), Err(FetchError::InvalidResponse));
    }

    #[test]
    fn test_string_code_is_invalid() {
        let mut body = ok_body(json!(50.0));
        body["code"] = json!("200");

        let envelope = ApiEnvelope::from_json(body).unwrap();
        assert!(!envelope.is_valid());
    }

    #[test]
    fn test_non_object_body_is_invalid() {
        let err = ApiEnvelope::from_json(json!([1, 2, 3])).unwrap_err();
        assert_eq!(err, FetchError::InvalidResponse);
    }

    #[test]
    fn test_positional_array_is_not_an_envelope() {
        let result = ApiEnvelope::from_json(json!([200, "OK", { "balance": 5.0 }]))
            .and_then(ApiEnvelope::into_record);

        assert_eq!(result, Err(FetchError::InvalidResponse));
    }

    #[test]
    fn test_null_informational_fields_are_tolerated() {
        let record = ApiEnvelope::from_json(json!({
            "code": 200,
            "data": {
                "balance": 50.0,
                "currentMonthConsumption": null,
                "readingTime": null
            }
        }))
        .and_then(ApiEnvelope::into_record)
        .unwrap();

        assert_eq!(record.balance, 50.0);
        assert_eq!(record.current_month_consumption, 0.0);
        assert_eq!(record.reading_time, "");
    }

    #[test]
    fn test_numeric_identifiers_are_stringified() {
        let record = ApiEnvelope::from_json(json!({
            "code": 200,
            "data": { "accountNo": 13151091, "meterNo": "2", "balance": 50.0 }
        }))
        .and_then(ApiEnvelope::into_record)
        .unwrap();

        assert_eq!(record.account_no, "13151091");
        assert_eq!(record.meter_no, "2");
        assert_eq!(record.balance, 50.0);
    }

    #[test]
    fn test_string_consumption_is_parsed() {
        let record = ApiEnvelope::from_json(json!({
            "code": 200,
            "data": { "balance": 50.0, "currentMonthConsumption": "43.1" }
        }))
        .and_then(ApiEnvelope::into_record)
        .unwrap();

        assert_eq!(record.current_month_consumption, 43.1);
    }
}
