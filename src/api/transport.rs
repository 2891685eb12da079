//! HTTP transport seam.
//!
//! The client never talks to `reqwest` directly; it goes through the
//! [`Transport`] trait so the same code drives a real server or a scripted
//! fake. The trait returns boxed futures to stay object-safe.

use std::time::Duration;

use futures_util::future::BoxFuture;
use reqwest::Url;

use super::request::{Method, RequestDescriptor};
use crate::domain::error::{AtlasError, Result};

/// A response reduced to what the client inspects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    /// Reason phrase for the status, e.g. `"Internal Server Error"`.
    pub status_text: String,
    pub body: Vec<u8>,
}

impl RawResponse {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Whether the body has any non-whitespace content.
    #[must_use]
    pub fn has_body(&self) -> bool {
        self.body.iter().any(|b| !b.is_ascii_whitespace())
    }
}

/// Executes a resolved request.
///
/// Implementations must be `Send + Sync` so a single instance can be shared
/// across spawned tasks. A non-success HTTP status is not an error at this
/// layer; only failing to obtain a response at all is.
pub trait Transport: Send + Sync {
    fn execute(&self, url: Url, request: RequestDescriptor) -> BoxFuture<'_, Result<RawResponse>>;
}

/// [`Transport`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Builds a client with the given per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`AtlasError::Config`] if the TLS backend cannot be initialized.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("green-atlas/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AtlasError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn execute(&self, url: Url, request: RequestDescriptor) -> BoxFuture<'_, Result<RawResponse>> {
        Box::pin(async move {
            let builder = match request.method {
                Method::Get => self.client.get(url),
                Method::Post => {
                    let builder = self.client.post(url);
                    match &request.body {
                        Some(body) => builder.json(body),
                        None => builder,
                    }
                }
            };

            let resp = builder.send().await.map_err(transport_error)?;
            let status = resp.status();
            let body = resp.bytes().await.map_err(transport_error)?;

            Ok(RawResponse {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                body: body.to_vec(),
            })
        })
    }
}

fn transport_error(e: reqwest::Error) -> AtlasError {
    if e.is_timeout() {
        AtlasError::Transport("Request timed out".to_string())
    } else if e.is_connect() {
        AtlasError::Transport("Failed to connect to the server".to_string())
    } else {
        AtlasError::Transport(e.to_string())
    }
}
