//! calimport-plugin entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use calimport_core::{TracingConfig, init_tracing};
use calimport_plugin::cli::{Cli, Command};
use calimport_plugin::commands;
use calimport_plugin::config::PluginConfig;
use calimport_plugin::error::ImportError;
use calimport_protocol::HostChannel;
use calimport_sources::HttpEventSource;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.config {
        Some(ref path) => PluginConfig::load_from(path),
        None => PluginConfig::load(),
    };

    // Initialize tracing, falling back to defaults if the file is unusable
    let tracing_config = config
        .as_ref()
        .map(|config| config.logging.clone())
        .unwrap_or_default()
        .to_tracing_config(cli.debug, cli.log_format)
        .unwrap_or_else(|e| {
            eprintln!("warning: {}", e);
            TracingConfig::default()
        });
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("warning: failed to initialize logging: {}", e);
    }

    let config = match config {
        Ok(config) => config,
        Err(err) => {
            error!(kind = err.kind(), error = %err, "failed to load configuration");
            return status(err.status());
        }
    };

    let mut channel = HostChannel::stdio();
    let code = match cli.command {
        Command::Import => match HttpEventSource::from_config(config.source) {
            Ok(source) => {
                commands::check_allow_list(&source.config().url);
                commands::import(&mut channel, &source).await
            }
            Err(err) => {
                let err = ImportError::from(err);
                error!(kind = err.kind(), error = %err, "failed to create event source");
                err.status()
            }
        },
        Command::Meta => commands::meta(&mut channel),
    };

    status(code)
}

fn status(code: i32) -> ExitCode {
    u8::try_from(code).map_or(ExitCode::FAILURE, ExitCode::from)
}
