//! Event acquisition for calimport.
//!
//! This crate fetches raw records from an external source and maps them into
//! [`calimport_core::ImportEvent`]s:
//!
//! - [`Transport`] sends one request and returns the full response.
//! - [`parse_records`] decodes the body into [`RawRecord`]s.
//! - [`map_records`] anchors each record on the job window.
//! - [`EventSource`] ties the three together behind one call.

pub mod config;
pub mod error;
pub mod mapping;
pub mod record;
pub mod source;
pub mod transport;

pub use config::{DEFAULT_SOURCE_URL, MappingConfig, SourceConfig, WindowParams};
pub use error::{SourceError, SourceErrorCode, SourceResult};
pub use mapping::{MAX_EVENTS_PER_IMPORT, map_record, map_records};
pub use record::{RawRecord, parse_records};
pub use source::{EventSource, HttpEventSource};
pub use transport::{BoxFuture, HttpRequest, HttpResponse, ReqwestTransport, Transport};
