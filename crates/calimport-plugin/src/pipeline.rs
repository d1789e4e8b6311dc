//! The import pipeline.
//!
//! One invocation runs `Intake -> Fetch/Map -> Deliver`. Any failure ends the
//! run immediately; nothing is retried and nothing is rolled back. Only the
//! returned status is visible to the host, so every failure is logged with
//! its context before returning.

use calimport_core::{ImportData, ImportEvent, ImportJob, ImportResult as HostVerdict};
use calimport_protocol::HostCalendar;
use calimport_sources::EventSource;
use tracing::{error, info, warn};

use crate::error::{ImportError, ImportResult, STATUS_SUCCESS};

/// Runs one import and returns the status for the host.
///
/// `input` is the serialized [`ImportJob`]. Events are fetched from `source`
/// and handed to `host` in a single call.
pub async fn import_events(
    input: &[u8],
    source: &dyn EventSource,
    host: &mut dyn HostCalendar,
) -> i32 {
    let job = match decode_job(input) {
        Ok(job) => job,
        Err(err) => {
            error!(
                kind = err.kind(),
                error = %err,
                input_bytes = input.len(),
                "failed to decode import job"
            );
            return err.status();
        }
    };

    info!(from = %job.from, to = %job.to, source = source.name(), "starting import");
    if !job.is_ordered() {
        warn!(from = %job.from, to = %job.to, "import window ends before it starts");
    }

    match run(&job, source, host).await {
        Ok(count) => {
            info!(count, "imported events");
            STATUS_SUCCESS
        }
        Err(err) => {
            error!(
                kind = err.kind(),
                error = %err,
                from = %job.from,
                to = %job.to,
                "import failed"
            );
            err.status()
        }
    }
}

/// Decodes the serialized import job.
pub fn decode_job(input: &[u8]) -> ImportResult<ImportJob> {
    serde_json::from_slice(input).map_err(ImportError::InputDecode)
}

async fn run(
    job: &ImportJob,
    source: &dyn EventSource,
    host: &mut dyn HostCalendar,
) -> ImportResult<usize> {
    let events = source.fetch_events(job).await?;
    deliver(events, host)
}

/// Submits the events to the host and interprets its verdict.
///
/// Returns the number of events the host accepted.
pub fn deliver(events: Vec<ImportEvent>, host: &mut dyn HostCalendar) -> ImportResult<usize> {
    let data = ImportData::new(events);
    let payload = serde_json::to_vec(&data).map_err(calimport_protocol::ProtocolError::from)?;

    let reply = host.calendar_import(&payload)?;
    let verdict: HostVerdict =
        serde_json::from_slice(&reply).map_err(calimport_protocol::ProtocolError::from)?;

    if verdict.success {
        Ok(data.len())
    } else {
        Err(ImportError::calendar_import(verdict.failure_message()))
    }
}
