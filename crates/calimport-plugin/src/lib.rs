//! calimport plugin: error taxonomy, import pipeline, host exports,
//! configuration and CLI.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod meta;
pub mod pipeline;

pub use error::{ImportError, STATUS_FAILURE, STATUS_SUCCESS};
pub use pipeline::import_events;
