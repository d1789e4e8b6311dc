//! Core types: import job, events, truncation, plugin metadata, tracing

pub mod event;
pub mod meta;
pub mod text;
pub mod tracing;

pub use event::{DEFAULT_TIMEZONE, ImportData, ImportEvent, ImportJob, ImportResult};
pub use meta::{AuthorContact, NetworkTargetRule, PluginMeta, ResourceAccess};
pub use text::{TRUNCATION_MARKER, truncate};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
