//! The plugin exports, driven over a framed host channel.

use std::io::{Read, Write};

use calimport_protocol::HostChannel;
use calimport_sources::EventSource;
use tracing::{debug, error, warn};

use crate::error::{ImportError, ImportResult as JobResult, STATUS_FAILURE, STATUS_SUCCESS};
use crate::meta::plugin_meta;
use crate::pipeline::import_events;

/// Runs the `import_events` export.
///
/// Reads the job frame, runs the pipeline, and answers the host's single
/// `calendar_import` exchange on the same channel. A host that sends no job
/// at all is treated as an empty (undecodable) job.
pub async fn import<R: Read, W: Write>(
    channel: &mut HostChannel<R, W>,
    source: &dyn EventSource,
) -> i32 {
    let input = match read_job(channel) {
        Ok(input) => input,
        Err(err) => {
            error!(kind = err.kind(), error = %err, "failed to read import job");
            return err.status();
        }
    };

    import_events(&input, source, channel).await
}

/// Reads the raw job frame. A closed stream yields an empty job.
fn read_job<R: Read, W: Write>(channel: &mut HostChannel<R, W>) -> JobResult<Vec<u8>> {
    match channel.read_frame().map_err(ImportError::InputFrame)? {
        Some(frame) => Ok(frame),
        None => {
            debug!("host sent no import job");
            Ok(Vec::new())
        }
    }
}

/// Runs the `meta` export.
pub fn meta<R: Read, W: Write>(channel: &mut HostChannel<R, W>) -> i32 {
    match channel.send(&plugin_meta()) {
        Ok(()) => STATUS_SUCCESS,
        Err(err) => {
            error!(error = %err, "failed to write plugin descriptor");
            STATUS_FAILURE
        }
    }
}

/// Logs a warning when `url` is outside the descriptor's network allow-list.
///
/// The host enforces the allow-list; the import still runs.
pub fn check_allow_list(url: &str) -> bool {
    let meta = plugin_meta();
    let permitted = meta.permits(url);
    if !permitted {
        warn!(
            url,
            plugin_id = %meta.plugin_id,
            "source url is not covered by the network allow-list"
        );
    }
    permitted
}
