//! HTTP transport seam between the client and the network.

use crate::errors::{Result, SmsActivateError};
use reqwest_middleware::ClientWithMiddleware;
use std::future::Future;
use url::Url;

/// Sends one request and hands back the raw response body.
///
/// The URL already carries every query parameter. Implementations only move
/// bytes; all response interpretation happens in the client, which makes the
/// parsing testable against recorded bodies.
pub trait Transport: Send + Sync {
    fn post(&self, url: Url) -> impl Future<Output = Result<String>> + Send;
}

/// [`Transport`] backed by a `reqwest` client with middleware.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http_client: ClientWithMiddleware,
}

impl HttpTransport {
    pub fn new(http_client: ClientWithMiddleware) -> Self {
        Self { http_client }
    }
}

impl Transport for HttpTransport {
    async fn post(&self, url: Url) -> Result<String> {
        let response = self
            .http_client
            .post(url)
            .send()
            .await
            .map_err(SmsActivateError::HttpRequest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SmsActivateError::HttpStatus {
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(SmsActivateError::ReadBody)
    }
}
