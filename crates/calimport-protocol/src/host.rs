//! The host capabilities a plugin drives.

use std::io::{Read, Write};

use tracing::debug;

use crate::error::{ProtocolError, ProtocolResult};
use crate::framing::HostChannel;
use crate::types::{HostCall, HostFunction};

/// The host's calendar import capability.
///
/// One request/response exchange: the plugin submits serialized
/// `ImportData` and receives the host's serialized `ImportResult`. The bytes
/// are opaque at this seam; decoding the result is the caller's job.
pub trait HostCalendar {
    /// Submits serialized import data and returns the serialized result.
    fn calendar_import(&mut self, data: &[u8]) -> ProtocolResult<Vec<u8>>;
}

impl<R: Read, W: Write> HostCalendar for HostChannel<R, W> {
    fn calendar_import(&mut self, data: &[u8]) -> ProtocolResult<Vec<u8>> {
        let function = HostFunction::CalendarImport;
        let payload: serde_json::Value = serde_json::from_slice(data)?;
        let call = HostCall::new(function, payload);

        debug!(call_id = %call.call_id, function = function.as_str(), "calling host");
        self.send(&call)?;

        self.read_frame()?.ok_or(ProtocolError::HostClosed {
            function: function.as_str(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framing::{decode_message, encode_message};
    use calimport_core::{ImportData, ImportResult};
    use std::io::Cursor;

    #[test]
    fn sends_call_and_returns_raw_reply() {
        let reply = encode_message(&ImportResult::accepted()).unwrap();
        let mut channel = HostChannel::new(Cursor::new(reply), Vec::new());

        let data = serde_json::to_vec(&ImportData::default()).unwrap();
        let result = channel.calendar_import(&data).unwrap();
        assert_eq!(result, br#"{"success":true}"#);

        let (_, written) = channel.into_inner();
        let call: HostCall<ImportData> = decode_message(&written).unwrap();
        assert_eq!(call.function, HostFunction::CalendarImport);
        assert!(call.payload.is_empty());
    }

    #[test]
    fn closed_host_is_an_error() {
        let mut channel = HostChannel::new(Cursor::new(Vec::new()), Vec::new());

        let result = channel.calendar_import(br#"{"events":[]}"#);
        assert!(matches!(
            result,
            Err(ProtocolError::HostClosed {
                function: "calendar_import"
            })
        ));
    }

    #[test]
    fn rejects_non_json_payload() {
        let mut channel = HostChannel::new(Cursor::new(Vec::new()), Vec::new());

        let result = channel.calendar_import(b"not json");
        assert!(matches!(result, Err(ProtocolError::Serialization(_))));

        let (_, written) = channel.into_inner();
        assert!(written.is_empty());
    }
}
