//! Messages the plugin sends to the host.

use serde::{Deserialize, Serialize};

use crate::PROTOCOL_VERSION;

/// Host functions a plugin may call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostFunction {
    /// Adds events to the planner calendar.
    CalendarImport,
}

impl HostFunction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CalendarImport => "calendar_import",
        }
    }
}

/// A call from the plugin into a host function.
///
/// The host answers every call with exactly one frame containing the
/// function's result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostCall<T = serde_json::Value> {
    /// Protocol version (always "1" for v1).
    pub protocol_version: String,
    /// Unique call ID, for correlating host-side logs.
    pub call_id: String,
    /// The host function being invoked.
    pub function: HostFunction,
    /// The function's argument.
    pub payload: T,
}

impl<T> HostCall<T> {
    /// Creates a call with a fresh call ID.
    pub fn new(function: HostFunction, payload: T) -> Self {
        Self {
            protocol_version: PROTOCOL_VERSION.to_string(),
            call_id: uuid::Uuid::new_v4().to_string(),
            function,
            payload,
        }
    }

    /// Checks if this call uses a compatible protocol version.
    pub fn is_compatible(&self) -> bool {
        self.protocol_version == PROTOCOL_VERSION
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calimport_core::ImportData;

    #[test]
    fn function_names() {
        assert_eq!(HostFunction::CalendarImport.as_str(), "calendar_import");
        assert_eq!(
            serde_json::to_string(&HostFunction::CalendarImport).unwrap(),
            r#""calendar_import""#
        );
    }

    #[test]
    fn call_ids_are_unique() {
        let a = HostCall::new(HostFunction::CalendarImport, ());
        let b = HostCall::new(HostFunction::CalendarImport, ());
        assert_ne!(a.call_id, b.call_id);
        assert!(a.is_compatible());
    }

    #[test]
    fn call_wire_shape() {
        let call = HostCall::new(HostFunction::CalendarImport, ImportData::default());

        insta::assert_json_snapshot!(call, {".call_id" => "[call_id]"}, @r###"
        {
          "protocol_version": "1",
          "call_id": "[call_id]",
          "function": "calendar_import",
          "payload": {
            "events": []
          }
        }
        "###);
    }
}
