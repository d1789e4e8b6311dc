//! Command-line interface definition.

use std::path::PathBuf;

use calimport_core::TracingOutputFormat;
use clap::{Parser, Subcommand};

/// calimport - calendar import plugin for the PlusEV planner
///
/// Spawned by the host once per invocation. Messages are exchanged as
/// length-prefixed JSON frames on stdin/stdout; logs go to stderr.
#[derive(Debug, Parser)]
#[command(name = "calimport-plugin")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, global = true, env = "CALIMPORT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    /// Log output format (pretty, compact, json)
    #[arg(long, global = true)]
    pub log_format: Option<TracingOutputFormat>,

    #[command(subcommand)]
    pub command: Command,
}

/// Plugin exports.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Read an import job from stdin and import its events
    Import,

    /// Write the plugin descriptor to stdout
    Meta,
}
