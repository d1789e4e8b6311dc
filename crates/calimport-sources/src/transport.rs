//! Request/response transport used to reach external sources.
//!
//! The [`Transport`] trait is the seam between acquisition logic and the
//! network: the plugin uses [`ReqwestTransport`], tests substitute a stub.

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;

use reqwest::{Client, Method};
use tracing::trace;

use crate::error::{SourceError, SourceResult};

/// A boxed future for async trait methods.
///
/// Boxed futures keep [`Transport`] and [`crate::EventSource`] object-safe.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// An outbound read request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: String,
    pub url: String,
    pub headers: BTreeMap<String, String>,
}

impl HttpRequest {
    /// Creates a GET request with no headers.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: "GET".to_string(),
            url: url.into(),
            headers: BTreeMap::new(),
        }
    }

    /// Builder method to add a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// A response from an external source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns true for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a single request and returns the full response.
///
/// Implementations must not retry; a transport-level failure is reported
/// once and ends the fetch. Non-2xx statuses are returned as responses, not
/// errors.
pub trait Transport: Send + Sync {
    fn send<'a>(&'a self, request: &'a HttpRequest) -> BoxFuture<'a, SourceResult<HttpResponse>>;
}

/// [`Transport`] backed by a `reqwest` client.
///
/// No timeout is configured here; the host sandbox bounds the invocation.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> SourceResult<Self> {
        let client = Client::builder().build().map_err(|e| {
            SourceError::configuration(format!("failed to create HTTP client: {}", e))
                .with_source(e)
        })?;

        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    fn send<'a>(&'a self, request: &'a HttpRequest) -> BoxFuture<'a, SourceResult<HttpResponse>> {
        Box::pin(async move {
            let method = Method::from_bytes(request.method.as_bytes()).map_err(|e| {
                SourceError::configuration(format!("invalid HTTP method '{}'", request.method))
                    .with_source(e)
            })?;

            let mut builder = self.client.request(method, request.url.as_str());
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }

            let response = builder.send().await.map_err(|e| {
                if e.is_builder() {
                    SourceError::configuration(format!("invalid request: {}", e)).with_source(e)
                } else if e.is_connect() {
                    SourceError::network(format!("connection failed: {}", e)).with_source(e)
                } else {
                    SourceError::network(format!("request failed: {}", e)).with_source(e)
                }
            })?;

            let status = response.status().as_u16();
            let body = response.bytes().await.map_err(|e| {
                SourceError::network(format!("failed to read response: {}", e)).with_source(e)
            })?;

            trace!(status, bytes = body.len(), "received response");
            Ok(HttpResponse::new(status, body.to_vec()))
        })
    }
}
