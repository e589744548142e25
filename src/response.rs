//! Response parsing for the SMS-Activate API.
//!
//! Every action answers with HTTP 200. Text actions return a token optionally
//! followed by `:`-separated fields; `getNumbersStatus` returns JSON. Error
//! tokens can come back from any action.

use crate::errors::{SmsActivateServiceError, parse_sms_activate_error};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;

/// Unified response type for JSON actions.
#[derive(Debug)]
pub enum SmsActivateResponse<T> {
    Success(T),
    Error(SmsActivateServiceError),
}

impl<T> SmsActivateResponse<T> {
    pub fn into_result(self) -> Result<T, SmsActivateServiceError> {
        match self {
            Self::Success(data) => Ok(data),
            Self::Error(e) => Err(e),
        }
    }
}

impl<T: DeserializeOwned> SmsActivateResponse<T> {
    /// Parse a JSON action body, recognising plain-text error tokens first.
    pub fn from_text(text: &str) -> Result<Self, serde_json::Error> {
        if let Some(error) = parse_sms_activate_error(text) {
            return Ok(Self::Error(error));
        }

        let data = serde_json::from_str::<T>(text)?;
        Ok(Self::Success(data))
    }
}

/// Response for the text actions.
#[derive(Debug)]
pub enum SmsActivateTextResponse {
    /// Body carries the expected token; holds the `:`-separated fields after it.
    Matched(Vec<String>),
    /// Body is a recognised error token.
    Error(SmsActivateServiceError),
    /// Anything else, kept verbatim.
    Other(String),
}

impl SmsActivateTextResponse {
    /// Classify `text` against the success `token` of an action.
    ///
    /// A body matches when it contains `token`; the returned fields are the
    /// pieces after the first `:`.
    pub fn from_text(text: &str, token: &str) -> Self {
        if text.contains(token) {
            let fields = text.trim().split(':').skip(1).map(str::to_string).collect();
            return Self::Matched(fields);
        }

        match parse_sms_activate_error(text) {
            Some(error) => Self::Error(error),
            None => Self::Other(text.to_string()),
        }
    }
}

/// Availability counts keyed by `<service>_<0|1>`.
///
/// Values stay untyped so an odd entry for one service does not break the
/// lookup of another.
pub type NumbersStatus = HashMap<String, Value>;

/// Interpret one `getNumbersStatus` entry as a count.
///
/// The provider sends integers, floats with no fractional part, or numeric
/// strings. Anything else, including negative values, is `None`.
pub fn available_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
