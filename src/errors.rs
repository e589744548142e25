//! Error types for the SMS-Activate client.

use crate::countries::Country;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::{self, Display, Formatter};
use std::time::Duration;
use thiserror::Error;

#[cfg(feature = "tracing")]
use tracing::warn;

/// Error codes returned in-band by the SMS-Activate API.
///
/// The provider always answers with HTTP 200 and reports failures as bare
/// tokens in the body, so these have to be recognised from the text.
#[derive(Debug, Clone, PartialEq)]
pub enum SmsActivateErrorCode {
    /// No numbers available for the requested country/service.
    NoNumbers,
    /// Account balance is too low for the operation.
    NoBalance,
    /// Internal SQL error on service side.
    ErrorSql,
    /// Account blocked by channel limits.
    ChannelsLimit,
    /// Activation with this id does not exist.
    NoActivation,
    /// Invalid API key.
    BadKey,
    /// Incorrect action.
    BadAction,
    /// Incorrect service code.
    BadService,
    /// Incorrect status.
    BadStatus,
    /// Invalid activation ID or ID is not a number.
    WrongActivationId,
    /// Not allowed to cancel within first 2 minutes.
    EarlyCancelDenied,
    /// Account banned until specified datetime.
    Banned { until: String },
    /// Maximum price is less than allowed minimum.
    WrongMaxPrice { min: Option<f64> },
    /// Error-shaped token we have no dedicated variant for.
    Unknown { raw: String },
}

impl SmsActivateErrorCode {
    /// Returns the wire token for this code.
    pub fn code_name(&self) -> &str {
        match self {
            Self::NoNumbers => "NO_NUMBERS",
            Self::NoBalance => "NO_BALANCE",
            Self::ErrorSql => "ERROR_SQL",
            Self::ChannelsLimit => "CHANNELS_LIMIT",
            Self::NoActivation => "NO_ACTIVATION",
            Self::BadKey => "BAD_KEY",
            Self::BadAction => "BAD_ACTION",
            Self::BadService => "BAD_SERVICE",
            Self::BadStatus => "BAD_STATUS",
            Self::WrongActivationId => "WRONG_ACTIVATION_ID",
            Self::EarlyCancelDenied => "EARLY_CANCEL_DENIED",
            Self::Banned { .. } => "BANNED",
            Self::WrongMaxPrice { .. } => "WRONG_MAX_PRICE",
            Self::Unknown { raw } => raw.as_str(),
        }
    }

    /// Returns human-readable description.
    pub fn description(&self) -> String {
        match self {
            Self::NoNumbers => "No numbers available".to_string(),
            Self::NoBalance => "Insufficient account balance".to_string(),
            Self::ErrorSql => "Internal SQL error on service side".to_string(),
            Self::ChannelsLimit => "Account blocked by channel limits".to_string(),
            Self::NoActivation => "Activation does not exist".to_string(),
            Self::BadKey => "Invalid API key".to_string(),
            Self::BadAction => "Incorrect action".to_string(),
            Self::BadService => "Incorrect service code".to_string(),
            Self::BadStatus => "Incorrect status".to_string(),
            Self::WrongActivationId => "Invalid activation ID".to_string(),
            Self::EarlyCancelDenied => "Not allowed to cancel within first 2 minutes".to_string(),
            Self::Banned { until } => format!("Account banned until {}", until),
            Self::WrongMaxPrice { min } => match min {
                Some(v) => format!("Maximum price is less than allowed minimum: {}", v),
                None => "Maximum price is less than allowed minimum".to_string(),
            },
            Self::Unknown { raw } => format!("Unknown error: {}", raw),
        }
    }

    /// Parse an error code from a raw response body.
    ///
    /// Returns `None` when the body is not error-shaped, which includes every
    /// `ACCESS_*` and `STATUS_*` token.
    pub fn from_raw(raw: &str) -> Option<Self> {
        let s = raw.trim();

        let code = match s {
            "NO_NUMBERS" => Self::NoNumbers,
            "NO_BALANCE" => Self::NoBalance,
            "ERROR_SQL" => Self::ErrorSql,
            "CHANNELS_LIMIT" => Self::ChannelsLimit,
            "NO_ACTIVATION" => Self::NoActivation,
            "BAD_KEY" => Self::BadKey,
            "BAD_ACTION" => Self::BadAction,
            "BAD_SERVICE" => Self::BadService,
            "BAD_STATUS" => Self::BadStatus,
            "WRONG_ACTIVATION_ID" => Self::WrongActivationId,
            "EARLY_CANCEL_DENIED" => Self::EarlyCancelDenied,
            _ => return Self::parse_parametrized_error(s),
        };

        Some(code)
    }

    fn parse_parametrized_error(s: &str) -> Option<Self> {
        // BANNED:'YYYY-m-d H-i-s'
        static RE_BANNED: Lazy<Regex> =
            Lazy::new(|| Regex::new(r#"^BANNED\s*:\s*['"]?([^'"]+)['"]?$"#).unwrap());
        if let Some(cap) = RE_BANNED.captures(s) {
            let until = cap.get(1).unwrap().as_str().to_string();
            return Some(Self::Banned { until });
        }

        // WRONG_MAX_PRICE:<num>
        static RE_WRONG_MAX_PRICE: Lazy<Regex> =
            Lazy::new(|| Regex::new(r#"^WRONG_MAX_PRICE\s*:\s*([0-9]+(?:\.[0-9]+)?)$"#).unwrap());
        if let Some(cap) = RE_WRONG_MAX_PRICE.captures(s) {
            let min = cap.get(1).and_then(|m| m.as_str().parse::<f64>().ok());
            return Some(Self::WrongMaxPrice { min });
        }

        if Self::looks_like_error_code(s) {
            return Some(Self::Unknown { raw: s.to_string() });
        }

        None
    }

    fn looks_like_error_code(s: &str) -> bool {
        if s.is_empty() || s.starts_with("ACCESS_") || s.starts_with("STATUS_") {
            return false;
        }

        const ERROR_PREFIXES: [&str; 8] = [
            "NO_", "ERROR_", "BAD_", "WRONG_", "EARLY_", "BANNED", "CHANNELS_", "ORDER_",
        ];

        ERROR_PREFIXES.iter().any(|prefix| s.starts_with(prefix))
    }
}

impl Display for SmsActivateErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code_name())
    }
}

/// Error token returned by the SMS-Activate service.
#[derive(Debug, Clone, Error)]
#[error("SMS-Activate service error: code={code}, description={description}")]
pub struct SmsActivateServiceError {
    /// Parsed error code.
    pub code: SmsActivateErrorCode,
    /// Human-readable description.
    pub description: String,
    /// Original response body.
    pub raw: String,
}

impl SmsActivateServiceError {
    pub fn new(code: SmsActivateErrorCode, raw: String) -> Self {
        let description = code.description();
        Self {
            code,
            description,
            raw,
        }
    }
}

/// Parse an SMS-Activate error from a response body.
pub(crate) fn parse_sms_activate_error(raw: &str) -> Option<SmsActivateServiceError> {
    let code = SmsActivateErrorCode::from_raw(raw)?;
    let error = SmsActivateServiceError::new(code, raw.to_string());

    #[cfg(feature = "tracing")]
    warn!(
        code = %error.code,
        description = %error.description,
        raw = %raw,
        "SMS-Activate service returned error"
    );

    Some(error)
}

/// Main error type for client operations.
#[derive(Debug, Error)]
pub enum SmsActivateError {
    /// The API key was empty.
    #[error("API key must be a non-empty string")]
    InvalidCredential,

    /// The availability response has no entry for this service key.
    #[error("Service '{service}' does not exist in the availability response")]
    UnknownService { service: String },

    /// The provider declined to issue a number.
    #[error("No numbers available for service '{service}' in {country}")]
    NoNumbersAvailable { service: String, country: Country },

    /// Provider returned an error token.
    #[error("SMS-Activate service error: {0}")]
    Service(#[source] SmsActivateServiceError),

    /// The endpoint passed to the client is not a valid URL.
    #[error("Invalid API endpoint: {0}")]
    InvalidEndpoint(#[source] url::ParseError),

    /// Failed to build HTTP client.
    #[error("Failed to build HTTP client: {0}")]
    BuildHttpClient(#[source] reqwest::Error),

    /// Error building request URL.
    #[error("Error building SMS-Activate request URL: {0}")]
    BuildRequestUrl(#[source] serde_urlencoded::ser::Error),

    /// Failed to send HTTP request.
    #[error("Failed to send HTTP request: {0}")]
    HttpRequest(#[from] reqwest_middleware::Error),

    /// Server answered with a non-success HTTP status.
    #[error("Unexpected HTTP status {status}")]
    HttpStatus { status: u16 },

    /// Failed to read the response body.
    #[error("Failed to read response body: {0}")]
    ReadBody(#[source] reqwest::Error),

    /// Request did not complete within the configured timeout.
    #[error("Request timed out after {:.1}s", timeout.as_secs_f64())]
    Timeout { timeout: Duration },

    /// Request was aborted through the client's cancellation token.
    #[error("Request cancelled")]
    Cancelled,

    /// Failed to deserialize JSON response.
    #[error("Failed to deserialize JSON response: {0}")]
    DeserializeJson(#[source] serde_json::Error),

    /// Success token with missing or unparseable fields.
    #[error("Malformed '{action}' response: {raw}")]
    MalformedResponse { action: &'static str, raw: String },
}

impl SmsActivateError {
    /// Returns the provider error code if this is a [`SmsActivateError::Service`] error.
    pub fn service_code(&self) -> Option<&SmsActivateErrorCode> {
        match self {
            Self::Service(error) => Some(&error.code),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SmsActivateError>;
