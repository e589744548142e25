//! # SMS Activate
//!
//! Typed async client for the SMS-Activate virtual number API.
//!
//! The client rents phone numbers for a service, polls for the activation
//! code delivered by SMS and reports the activation status back to the
//! provider. All state lives on the provider's side and is referenced by the
//! [`ActivationId`] returned when a number is acquired.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sms_activate::{ActivationStatus, Country, Service, SmsActivateClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SmsActivateClient::with_api_key("your_api_key")?;
//!
//!     println!("Balance: {}", client.get_balance().await?);
//!
//!     let number = client
//!         .get_phone_number(&Service::Discord, Country::Russia)
//!         .await?;
//!     client
//!         .set_activation_status(&number.id, ActivationStatus::Activate)
//!         .await?;
//!
//!     if let Some(code) = client.get_activation_code(&number.id).await? {
//!         println!("Got code: {}", code);
//!         client
//!             .set_activation_status(&number.id, ActivationStatus::CompleteActivation)
//!             .await?;
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! SmsActivateClient<T>   (request building + response parsing)
//!         │
//!         ▼
//!    Transport           (trait: HttpTransport, or a stub in tests)
//! ```
//!
//! ## Features
//!
//! - `tracing` - OpenTelemetry tracing instrumentation (enabled by default)

pub mod client;
pub mod countries;
pub mod errors;
pub mod response;
pub mod services;
pub mod transport;
pub mod types;

pub use client::{DEFAULT_API_URL, SmsActivateClient, SmsActivateClientBuilder};
pub use countries::{Country, UnknownCountryId};
pub use errors::{Result, SmsActivateError, SmsActivateErrorCode, SmsActivateServiceError};
pub use services::{NumberKind, Service};
pub use transport::{HttpTransport, Transport};
pub use types::{ActivationCode, ActivationId, ActivationStatus, PhoneNumber, SetStatusResponse};

// Re-export so callers can configure cancellation without a direct dependency
pub use tokio_util::sync::CancellationToken;
