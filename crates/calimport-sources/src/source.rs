//! EventSource trait definition and the HTTP-backed source.
//!
//! An [`EventSource`] turns an [`ImportJob`] into an ordered list of
//! [`ImportEvent`]s. It performs exactly one outbound request per call and
//! never retries; any failure is returned to the caller, which decides how
//! the import ends.

use calimport_core::{ImportEvent, ImportJob};
use tracing::debug;

use crate::config::SourceConfig;
use crate::error::{SourceError, SourceResult};
use crate::mapping::map_records;
use crate::record::{RawRecord, parse_records};
use crate::transport::{BoxFuture, ReqwestTransport, Transport};

/// A source of calendar events for an import.
pub trait EventSource: Send + Sync {
    /// Returns the source name used in logs.
    fn name(&self) -> &str;

    /// Fetches and maps the events for the given job.
    fn fetch_events<'a>(&'a self, job: &'a ImportJob) -> BoxFuture<'a, SourceResult<Vec<ImportEvent>>>;
}

/// [`EventSource`] that fetches raw records over HTTP and maps them.
pub struct HttpEventSource<T: Transport = ReqwestTransport> {
    config: SourceConfig,
    transport: T,
}

impl HttpEventSource<ReqwestTransport> {
    /// Creates a source using a `reqwest` transport.
    pub fn from_config(config: SourceConfig) -> SourceResult<Self> {
        Ok(Self::new(config, ReqwestTransport::new()?))
    }
}

impl<T: Transport> HttpEventSource<T> {
    /// Creates a source with an explicit transport.
    pub fn new(config: SourceConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// Performs the single request and parses the response into raw records.
    pub async fn fetch_records(&self, job: &ImportJob) -> SourceResult<Vec<RawRecord>> {
        let request = self.config.build_request(job)?;
        debug!(method = %request.method, url = %request.url, "fetching records");

        let response = self.transport.send(&request).await?;
        if !response.is_success() {
            return Err(SourceError::http_status(
                response.status,
                format!("source returned HTTP {}", response.status),
            ));
        }

        let records = parse_records(&response.body)?;
        debug!(count = records.len(), "parsed records");
        Ok(records)
    }
}

impl<T: Transport> EventSource for HttpEventSource<T> {
    fn name(&self) -> &str {
        &self.config.url
    }

    fn fetch_events<'a>(&'a self, job: &'a ImportJob) -> BoxFuture<'a, SourceResult<Vec<ImportEvent>>> {
        Box::pin(async move {
            let records = self.fetch_records(job).await?;
            Ok(map_records(job, &records, &self.config.mapping))
        })
    }
}
