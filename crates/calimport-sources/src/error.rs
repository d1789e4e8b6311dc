//! Error types for event source operations.

use std::fmt;
use thiserror::Error;

/// The category of a source error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceErrorCode {
    /// Transport failure - connection refused, DNS, TLS, reset.
    NetworkError,
    /// The source answered with a non-success HTTP status.
    HttpStatus,
    /// The response body does not match the expected record schema.
    InvalidResponse,
    /// The request could not be built from the configuration.
    ConfigurationError,
}

impl SourceErrorCode {
    /// Returns true if the source was never reached or refused the request,
    /// as opposed to answering with something unreadable.
    pub fn is_fetch_failure(&self) -> bool {
        !matches!(self, Self::InvalidResponse)
    }

    /// Returns a machine-readable name for this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NetworkError => "network_error",
            Self::HttpStatus => "http_status",
            Self::InvalidResponse => "invalid_response",
            Self::ConfigurationError => "configuration_error",
        }
    }
}

impl fmt::Display for SourceErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error that occurred while acquiring events from an external source.
#[derive(Debug, Error)]
pub struct SourceError {
    code: SourceErrorCode,
    message: String,
    /// HTTP status, for `HttpStatus` errors.
    status: Option<u16>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl SourceError {
    /// Creates a new source error with the given code and message.
    pub fn new(code: SourceErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            status: None,
            source: None,
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(SourceErrorCode::NetworkError, message)
    }

    /// Creates an HTTP status error.
    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        let mut err = Self::new(SourceErrorCode::HttpStatus, message);
        err.status = Some(status);
        err
    }

    /// Creates an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(SourceErrorCode::InvalidResponse, message)
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(SourceErrorCode::ConfigurationError, message)
    }

    /// Sets the source error for this error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub fn code(&self) -> SourceErrorCode {
        self.code
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Returns true if this is a transport or HTTP-level failure.
    pub fn is_fetch_failure(&self) -> bool {
        self.code.is_fetch_failure()
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// A specialized Result type for source operations.
pub type SourceResult<T> = Result<T, SourceError>;
