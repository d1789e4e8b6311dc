//! Plugin configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/calimport/config.toml` by default. Every field is optional;
//! an absent file means built-in defaults (the demo source).

use std::path::{Path, PathBuf};

use calimport_core::{TracingConfig, TracingOutputFormat};
use calimport_sources::SourceConfig;
use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::error::{ImportError, ImportResult};

/// Configuration for the calimport plugin.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// External source settings.
    pub source: SourceConfig,

    /// Logging settings.
    pub logging: LoggingSettings,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default level for calimport crates ("error" through "trace").
    pub level: String,

    /// Output format: "pretty", "compact" or "json".
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl LoggingSettings {
    /// Builds the tracing configuration, letting CLI flags take precedence.
    pub fn to_tracing_config(
        &self,
        debug: bool,
        format: Option<TracingOutputFormat>,
    ) -> Result<TracingConfig, String> {
        let format = match format {
            Some(format) => format,
            None => self.format.parse()?,
        };

        let config = if debug {
            TracingConfig::debug()
        } else {
            let level: Level = self
                .level
                .parse()
                .map_err(|_| format!("invalid log level '{}'", self.level))?;
            TracingConfig::default().with_level(level)
        };

        Ok(config.with_format(format))
    }
}

impl PluginConfig {
    /// Loads configuration from the default path, falling back to defaults
    /// when no file exists.
    pub fn load() -> ImportResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> ImportResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ImportError::config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| {
            ImportError::config(format!("failed to parse {}: {}", path.display(), e))
        })?;
        config.source.validate().map_err(ImportError::config)?;
        Ok(config)
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("calimport")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_target_demo_source() {
        let config = PluginConfig::default();
        assert_eq!(config.source.url, "https://jsonplaceholder.typicode.com/posts");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "compact");
    }

    #[test]
    fn loads_partial_file() {
        let file = write_config(
            r#"
[source]
url = "https://api.example.com/events"
tags = ["imported"]

[source.headers]
Authorization = "Bearer token"

[logging]
format = "json"
"#,
        );

        let config = PluginConfig::load_from(file.path()).unwrap();
        assert_eq!(config.source.url, "https://api.example.com/events");
        assert_eq!(config.source.method, "GET");
        assert_eq!(config.source.mapping.tags, vec!["imported"]);
        assert_eq!(config.source.mapping.title_label, "Demo Event: ");
        assert_eq!(config.source.headers["Authorization"], "Bearer token");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let file = write_config("");
        let config = PluginConfig::load_from(file.path()).unwrap();
        assert_eq!(config.source, SourceConfig::default());
    }

    #[test]
    fn missing_explicit_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = PluginConfig::load_from(&dir.path().join("absent.toml")).unwrap_err();
        assert_eq!(err.kind(), "config");
    }

    #[test]
    fn malformed_file_is_config_error() {
        let file = write_config("[source\nurl = ");
        let err = PluginConfig::load_from(file.path()).unwrap_err();
        assert_eq!(err.kind(), "config");
    }

    #[test]
    fn invalid_source_url_is_config_error() {
        let file = write_config("[source]\nurl = \"not a url\"\n");
        let err = PluginConfig::load_from(file.path()).unwrap_err();
        assert!(err.to_string().contains("invalid source url"));
    }

    #[test]
    fn default_path_ends_with_config_toml() {
        let path = PluginConfig::default_path();
        assert!(path.ends_with("calimport/config.toml"));
    }

    #[test]
    fn tracing_config_from_settings() {
        let settings = LoggingSettings {
            level: "warn".to_string(),
            format: "json".to_string(),
        };

        let config = settings.to_tracing_config(false, None).unwrap();
        assert_eq!(config.default_level, Level::WARN);
        assert_eq!(config.output_format, TracingOutputFormat::Json);

        let config = settings
            .to_tracing_config(true, Some(TracingOutputFormat::Pretty))
            .unwrap();
        assert_eq!(config.default_level, Level::DEBUG);
        assert_eq!(config.output_format, TracingOutputFormat::Pretty);
    }

    #[test]
    fn tracing_config_rejects_bad_values() {
        let bad_level = LoggingSettings {
            level: "loud".to_string(),
            ..Default::default()
        };
        assert!(bad_level.to_tracing_config(false, None).is_err());

        let bad_format = LoggingSettings {
            format: "xml".to_string(),
            ..Default::default()
        };
        assert!(bad_format.to_tracing_config(false, None).is_err());
    }
}
