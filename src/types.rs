//! Value types returned by and sent to the SMS-Activate API.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

// =============================================================================
// ActivationId
// =============================================================================

/// Server-assigned identifier of an activation.
///
/// Returned when a number is acquired and used by every later status or code
/// request for that number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActivationId(String);

impl ActivationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl Display for ActivationId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ActivationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for ActivationId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ActivationId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

// =============================================================================
// ActivationCode
// =============================================================================

/// Code delivered by SMS to a rented number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationCode(String);

impl ActivationCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ActivationCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ActivationCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// PhoneNumber
// =============================================================================

/// Rented number together with the activation that owns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneNumber {
    pub id: ActivationId,
    /// Dialable number exactly as the provider returned it.
    pub phone_number: String,
}

// =============================================================================
// ActivationStatus
// =============================================================================

/// Signals accepted by the `setStatus` action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ActivationStatus {
    /// Number is ready; must be sent before an SMS is requested.
    Activate = 1,
    /// Request another code on the same number.
    RequestNewCode = 3,
    /// Finish the activation; sent after each received SMS.
    CompleteActivation = 6,
    /// Report the number as bad and cancel the activation.
    ReportNumber = 8,
}

impl ActivationStatus {
    /// Numeric status code for the API.
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl Display for ActivationStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Activate => write!(f, "Activate(1)"),
            Self::RequestNewCode => write!(f, "RequestNewCode(3)"),
            Self::CompleteActivation => write!(f, "CompleteActivation(6)"),
            Self::ReportNumber => write!(f, "ReportNumber(8)"),
        }
    }
}

// =============================================================================
// SetStatusResponse
// =============================================================================

/// Typed view of a `setStatus` acknowledgement token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetStatusResponse {
    /// Numbers readiness confirmed.
    Ready,
    /// Waiting for new SMS.
    RetryGet,
    /// Service successfully activated.
    Activation,
    /// Activation canceled.
    Cancel,
}

impl SetStatusResponse {
    /// Parse an acknowledgement returned by
    /// [`set_activation_status`](crate::SmsActivateClient::set_activation_status).
    pub fn from_raw(raw: &str) -> Option<Self> {
        match raw.trim() {
            "ACCESS_READY" => Some(Self::Ready),
            "ACCESS_RETRY_GET" => Some(Self::RetryGet),
            "ACCESS_ACTIVATION" => Some(Self::Activation),
            "ACCESS_CANCEL" => Some(Self::Cancel),
            _ => None,
        }
    }
}

impl Display for SetStatusResponse {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready => write!(f, "ACCESS_READY"),
            Self::RetryGet => write!(f, "ACCESS_RETRY_GET"),
            Self::Activation => write!(f, "ACCESS_ACTIVATION"),
            Self::Cancel => write!(f, "ACCESS_CANCEL"),
        }
    }
}
