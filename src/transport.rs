//! The network seam between the race and the outside world.
//!
//! The coordinator only ever sees [`Transport`]. Production code uses
//! [`HttpTransport`]; tests plug in scripted implementations.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{header, Client};
use tokio_util::sync::CancellationToken;

use crate::{config::ProviderId, errors::TransportError};

const USER_AGENT: &str = concat!("hedged-cep-client/", env!("CARGO_PKG_VERSION"));
pub(crate) const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A fully built provider request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    /// Provider the request belongs to.
    pub provider: ProviderId,
    /// Absolute URL to `GET`.
    pub url: String,
}

/// Status and body of a provider answer. Any status is passed through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Bytes,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs provider requests.
///
/// Non-2xx answers are not errors at this level; adapters interpret the
/// status. Implementations should return [`TransportError::Cancelled`] once
/// `cancel` fires, but callers never rely on them doing so promptly.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        request: &RequestSpec,
        cancel: &CancellationToken,
    ) -> Result<RawResponse, TransportError>;
}

/// [`Transport`] over a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    /// Builds a transport with a 10 second per-request timeout.
    pub fn new() -> Result<Self, TransportError> {
        Self::with_request_timeout(DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_request_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;

        Ok(Self { http })
    }

    /// Wraps an already configured client.
    pub fn from_client(http: Client) -> Self {
        Self { http }
    }

    async fn fetch(&self, request: &RequestSpec) -> Result<RawResponse, TransportError> {
        let resp = self
            .http
            .get(&request.url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = resp.status().as_u16();
        let body = resp
            .bytes()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        Ok(RawResponse { status, body })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        request: &RequestSpec,
        cancel: &CancellationToken,
    ) -> Result<RawResponse, TransportError> {
        tracing::trace!(provider = %request.provider, url = %request.url, "sending request");

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(TransportError::Cancelled),
            res = self.fetch(request) => res,
        }
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Connection(err.to_string())
    }
}
