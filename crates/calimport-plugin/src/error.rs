//! Import error types.

use calimport_protocol::ProtocolError;
use calimport_sources::SourceError;
use thiserror::Error;

/// Status returned when an import completes.
pub const STATUS_SUCCESS: i32 = 0;

/// Status returned for every import failure.
pub const STATUS_FAILURE: i32 = 1;

/// Result type for import operations.
pub type ImportResult<T> = Result<T, ImportError>;

/// Errors that end an import.
///
/// None of these are retried; each one is logged and the invocation returns
/// [`STATUS_FAILURE`].
#[derive(Debug, Error)]
pub enum ImportError {
    /// The import job could not be decoded.
    #[error("invalid import job: {0}")]
    InputDecode(#[source] serde_json::Error),

    /// The import job frame could not be read from the host.
    #[error("invalid import job frame: {0}")]
    InputFrame(#[source] ProtocolError),

    /// The external source could not be reached or refused the request.
    #[error("failed to fetch events: {0}")]
    Fetch(#[source] SourceError),

    /// The external source answered with an unreadable body.
    #[error("failed to decode source response: {0}")]
    ResponseDecode(#[source] SourceError),

    /// The host exchange failed or its reply could not be decoded.
    #[error("host protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The host rejected the events.
    #[error("calendar import failed: {message}")]
    CalendarImport { message: String },

    /// Configuration could not be loaded.
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl ImportError {
    /// Creates a calendar import error.
    pub fn calendar_import(message: impl Into<String>) -> Self {
        Self::CalendarImport {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Returns a machine-readable name for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InputDecode(_) | Self::InputFrame(_) => "input_decode",
            Self::Fetch(_) => "fetch",
            Self::ResponseDecode(_) => "response_decode",
            Self::Protocol(_) => "protocol",
            Self::CalendarImport { .. } => "calendar_import",
            Self::Config { .. } => "config",
        }
    }

    /// Returns the status reported to the host.
    pub fn status(&self) -> i32 {
        STATUS_FAILURE
    }
}

impl From<SourceError> for ImportError {
    fn from(err: SourceError) -> Self {
        if err.is_fetch_failure() {
            Self::Fetch(err)
        } else {
            Self::ResponseDecode(err)
        }
    }
}
