//! SMS-Activate HTTP client.

use crate::countries::Country;
use crate::errors::{Result, SmsActivateError, SmsActivateErrorCode, parse_sms_activate_error};
use crate::response::{
    NumbersStatus, SmsActivateResponse, SmsActivateTextResponse, available_count,
};
use crate::services::{NumberKind, Service};
use crate::transport::{HttpTransport, Transport};
use crate::types::{ActivationCode, ActivationId, ActivationStatus, PhoneNumber};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

#[cfg(feature = "tracing")]
use opentelemetry::trace::Status;
#[cfg(feature = "tracing")]
use tracing::{Span, debug};
#[cfg(feature = "tracing")]
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// Default SMS-Activate API URL.
pub const DEFAULT_API_URL: &str = "https://sms-activate.ru/stubs/handler_api.php";

/// SMS-Activate API client.
///
/// Every operation is one POST to the API endpoint with its parameters in the
/// query string. The client holds no state besides its configuration, so it
/// is cheap to clone and safe to share between tasks.
///
/// # Example
///
/// ```rust,ignore
/// use sms_activate::{ActivationStatus, Country, Service, SmsActivateClient};
///
/// let client = SmsActivateClient::with_api_key("your_api_key")?;
///
/// let balance = client.get_balance().await?;
/// let number = client.get_phone_number(&Service::Discord, Country::Russia).await?;
/// client.set_activation_status(&number.id, ActivationStatus::Activate).await?;
///
/// if let Some(code) = client.get_activation_code(&number.id).await? {
///     println!("Got code {}", code);
/// }
/// ```
#[derive(Clone)]
pub struct SmsActivateClient<T = HttpTransport> {
    transport: T,
    api_key: SecretString,
    endpoint: Url,
    request_timeout: Option<Duration>,
    cancellation: Option<CancellationToken>,
}

impl<T> std::fmt::Debug for SmsActivateClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmsActivateClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"[REDACTED]")
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

fn validate_api_key(api_key: String) -> Result<SecretString> {
    if api_key.trim().is_empty() {
        return Err(SmsActivateError::InvalidCredential);
    }
    Ok(SecretString::from(api_key))
}

fn default_endpoint() -> Url {
    Url::parse(DEFAULT_API_URL).expect("Invalid default URL")
}

/// Builder for configuring a [`SmsActivateClient`].
pub struct SmsActivateClientBuilder {
    api_key: String,
    endpoint: Option<Url>,
    http_client: Option<ClientWithMiddleware>,
    request_timeout: Option<Duration>,
    cancellation: Option<CancellationToken>,
}

impl SmsActivateClientBuilder {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: None,
            http_client: None,
            request_timeout: None,
            cancellation: None,
        }
    }

    /// Set a custom API endpoint.
    pub fn endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Set a custom HTTP client with middleware.
    pub fn http_client(mut self, client: ClientWithMiddleware) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Fail any single request that takes longer than `timeout`.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Abort in-flight and future requests once `token` is cancelled.
    ///
    /// Clones of the built client share the token.
    pub fn cancellation_token(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Build the [`SmsActivateClient`].
    pub fn build(self) -> Result<SmsActivateClient> {
        let api_key = validate_api_key(self.api_key)?;
        let endpoint = self.endpoint.unwrap_or_else(default_endpoint);

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let client = reqwest::Client::builder()
                    .build()
                    .map_err(SmsActivateError::BuildHttpClient)?;
                ClientBuilder::new(client).build()
            }
        };

        Ok(SmsActivateClient {
            transport: HttpTransport::new(http_client),
            api_key,
            endpoint,
            request_timeout: self.request_timeout,
            cancellation: self.cancellation,
        })
    }
}

impl SmsActivateClient {
    /// Create a client for a custom endpoint.
    pub fn new(endpoint: impl AsRef<str>, api_key: impl Into<String>) -> Result<Self> {
        let url = Url::parse(endpoint.as_ref()).map_err(SmsActivateError::InvalidEndpoint)?;
        Self::builder(api_key).endpoint(url).build()
    }

    /// Create a client with the default API URL.
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self> {
        Self::builder(api_key).build()
    }

    pub fn builder(api_key: impl Into<String>) -> SmsActivateClientBuilder {
        SmsActivateClientBuilder::new(api_key)
    }
}

impl<T: Transport> SmsActivateClient<T> {
    /// Create a client that sends requests through `transport`.
    pub fn with_transport(api_key: impl Into<String>, transport: T) -> Result<Self> {
        Ok(Self {
            transport,
            api_key: validate_api_key(api_key.into())?,
            endpoint: default_endpoint(),
            request_timeout: None,
            cancellation: None,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Build request URL with action and parameters, in that order.
    fn build_request_url(&self, action: &str, additional: Vec<(&str, String)>) -> Result<Url> {
        let mut params = vec![
            ("api_key", self.api_key.expose_secret().to_string()),
            ("action", action.to_string()),
        ];
        params.extend(additional);

        let mut endpoint = self.endpoint.clone();
        endpoint.set_query(Some(
            &serde_urlencoded::to_string(&params).map_err(SmsActivateError::BuildRequestUrl)?,
        ));

        Ok(endpoint)
    }

    /// Send one request, honouring the configured timeout and cancellation.
    async fn send_request(&self, url: Url) -> Result<String> {
        let request = async {
            match self.request_timeout {
                Some(timeout) => tokio::time::timeout(timeout, self.transport.post(url))
                    .await
                    .unwrap_or_else(|_| Err(SmsActivateError::Timeout { timeout })),
                None => self.transport.post(url).await,
            }
        };

        match &self.cancellation {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => Err(SmsActivateError::Cancelled),
                result = request => result,
            },
            None => request.await,
        }
    }

    /// Get the account balance.
    ///
    /// Returns `0` when the body carries no balance and is not an error token.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "SmsActivateClient::get_balance", skip_all)
    )]
    pub async fn get_balance(&self) -> Result<f64> {
        let url = self.build_request_url("getBalance", Vec::new())?;
        let text = self.send_request(url).await?;

        let balance = match SmsActivateTextResponse::from_text(&text, "ACCESS_BALANCE") {
            SmsActivateTextResponse::Matched(fields) => fields
                .first()
                .and_then(|value| value.trim().parse::<f64>().ok())
                .ok_or_else(|| SmsActivateError::MalformedResponse {
                    action: "getBalance",
                    raw: text.clone(),
                })?,
            SmsActivateTextResponse::Error(error) => return Err(SmsActivateError::Service(error)),
            SmsActivateTextResponse::Other(_) => 0.0,
        };

        #[cfg(feature = "tracing")]
        Span::current().set_status(Status::Ok);

        Ok(balance)
    }

    /// Get the number of available numbers for an availability key.
    ///
    /// `service_key` is the suffixed form reported by `getNumbersStatus`,
    /// e.g. `ds_0`; see [`Service::availability_key`].
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "SmsActivateClient::get_available_numbers",
            skip_all,
            fields(service = %service_key, country = %country)
        )
    )]
    pub async fn get_available_numbers(&self, service_key: &str, country: Country) -> Result<u64> {
        let url = self.build_request_url(
            "getNumbersStatus",
            vec![("country", country.code().to_string())],
        )?;

        let text = self.send_request(url).await?;

        let status = SmsActivateResponse::<NumbersStatus>::from_text(&text)
            .map_err(SmsActivateError::DeserializeJson)?
            .into_result()
            .map_err(SmsActivateError::Service)?;

        let value = status
            .get(service_key)
            .ok_or_else(|| SmsActivateError::UnknownService {
                service: service_key.to_string(),
            })?;
        let count =
            available_count(value).ok_or_else(|| SmsActivateError::MalformedResponse {
                action: "getNumbersStatus",
                raw: text.clone(),
            })?;

        #[cfg(feature = "tracing")]
        Span::current().set_status(Status::Ok);

        Ok(count)
    }

    /// Acquire a phone number.
    ///
    /// `service` is sent as its bare code, without the availability suffix.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "SmsActivateClient::get_phone_number",
            skip_all,
            fields(
                service = %service.code(),
                country = %country,
                activation_id = tracing::field::Empty
            )
        )
    )]
    pub async fn get_phone_number(
        &self,
        service: &Service,
        country: Country,
    ) -> Result<PhoneNumber> {
        let url = self.build_request_url(
            "getNumber",
            vec![
                ("service", service.code().to_string()),
                ("country", country.code().to_string()),
            ],
        )?;

        let text = self.send_request(url).await?;

        let number = match SmsActivateTextResponse::from_text(&text, "ACCESS_NUMBER") {
            SmsActivateTextResponse::Matched(fields) => match fields.as_slice() {
                [id, phone_number, ..] if !id.is_empty() && !phone_number.is_empty() => {
                    PhoneNumber {
                        id: ActivationId::new(id.as_str()),
                        phone_number: phone_number.clone(),
                    }
                }
                _ => {
                    return Err(SmsActivateError::MalformedResponse {
                        action: "getNumber",
                        raw: text,
                    });
                }
            },
            SmsActivateTextResponse::Error(error)
                if error.code != SmsActivateErrorCode::NoNumbers =>
            {
                return Err(SmsActivateError::Service(error));
            }
            _ => {
                return Err(SmsActivateError::NoNumbersAvailable {
                    service: service.code().to_string(),
                    country,
                });
            }
        };

        #[cfg(feature = "tracing")]
        {
            Span::current()
                .record("activation_id", number.id.as_ref())
                .set_status(Status::Ok);
        }

        Ok(number)
    }

    /// Get the activation code if the SMS has arrived.
    ///
    /// Returns `None` while the provider reports anything other than
    /// `STATUS_OK`, such as `STATUS_WAIT_CODE`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "SmsActivateClient::get_activation_code",
            skip_all,
            fields(activation_id = %id)
        )
    )]
    pub async fn get_activation_code(
        &self,
        id: &ActivationId,
    ) -> Result<Option<ActivationCode>> {
        let url = self.build_request_url("getStatus", vec![("id", id.to_string())])?;

        let text = self.send_request(url).await?;

        let code = match SmsActivateTextResponse::from_text(&text, "STATUS_OK") {
            SmsActivateTextResponse::Matched(fields) => match fields.first() {
                Some(code) if !code.trim().is_empty() => {
                    Some(ActivationCode::new(code.as_str()))
                }
                _ => {
                    return Err(SmsActivateError::MalformedResponse {
                        action: "getStatus",
                        raw: text,
                    });
                }
            },
            SmsActivateTextResponse::Error(error) => return Err(SmsActivateError::Service(error)),
            SmsActivateTextResponse::Other(_) => None,
        };

        #[cfg(feature = "tracing")]
        Span::current().set_status(Status::Ok);

        Ok(code)
    }

    /// Send a status signal for an activation.
    ///
    /// Returns the provider's acknowledgement verbatim; use
    /// [`SetStatusResponse::from_raw`](crate::SetStatusResponse::from_raw) for
    /// a typed view.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "SmsActivateClient::set_activation_status",
            skip_all,
            fields(activation_id = %id, status = %status)
        )
    )]
    pub async fn set_activation_status(
        &self,
        id: &ActivationId,
        status: ActivationStatus,
    ) -> Result<String> {
        let url = self.build_request_url(
            "setStatus",
            vec![
                ("id", id.to_string()),
                ("status", status.code().to_string()),
            ],
        )?;

        let text = self.send_request(url).await?;

        if let Some(error) = parse_sms_activate_error(&text) {
            return Err(SmsActivateError::Service(error));
        }

        #[cfg(feature = "tracing")]
        Span::current().set_status(Status::Ok);

        Ok(text)
    }

    /// Acquire a number from the first country that has one available.
    ///
    /// Countries are probed one after another in [`Country::ALL`] order and
    /// the search stops at the first with a non-zero count. No prices are
    /// compared. Returns `None` without acquiring anything when every count
    /// is zero.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "SmsActivateClient::find_cheap_available_number",
            skip_all,
            fields(service = %service.code())
        )
    )]
    pub async fn find_cheap_available_number(
        &self,
        service: &Service,
    ) -> Result<Option<PhoneNumber>> {
        let key = service.availability_key(NumberKind::Regular);

        for country in Country::ALL {
            let available = self.get_available_numbers(&key, country).await?;

            #[cfg(feature = "tracing")]
            debug!(country = %country, available, "Probed availability");

            if available > 0 {
                let number = self.get_phone_number(service, country).await?;

                #[cfg(feature = "tracing")]
                Span::current().set_status(Status::Ok);

                return Ok(Some(number));
            }
        }

        Ok(None)
    }
}
