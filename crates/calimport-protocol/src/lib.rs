//! Host boundary for calimport plugins.
//!
//! The planner host spawns the plugin once per invocation and talks to it
//! over the plugin's stdin/stdout. This crate defines that exchange.
//!
//! # Protocol Overview
//!
//! Every message is a frame:
//! - 4 bytes: payload length (u32, big-endian)
//! - N bytes: JSON payload
//!
//! An `import` invocation is three frames:
//!
//! ```text
//!  host                         plugin
//!   │ ── ImportJob ────────────▶ │
//!   │ ◀─────────── HostCall ──── │   function = calendar_import, payload = ImportData
//!   │ ── ImportResult ─────────▶ │
//! ```
//!
//! after which the plugin exits with status 0 or 1.
//!
//! # Example
//!
//! ```rust
//! use calimport_protocol::{HostCall, HostFunction, encode_message, decode_message};
//!
//! let call = HostCall::new(HostFunction::CalendarImport, serde_json::json!({"events": []}));
//! let bytes = encode_message(&call).unwrap();
//! let decoded: HostCall = decode_message(&bytes).unwrap();
//! assert_eq!(decoded.function, HostFunction::CalendarImport);
//! ```

mod error;
mod framing;
mod host;
mod types;

pub use error::{ProtocolError, ProtocolResult};
pub use framing::{HostChannel, decode_message, encode_frame, encode_message};
pub use host::HostCalendar;
pub use types::{HostCall, HostFunction};

/// Protocol version constant.
pub const PROTOCOL_VERSION: &str = "1";

/// Maximum frame payload size (1 MB).
pub const MAX_MESSAGE_SIZE: u32 = 1024 * 1024;
