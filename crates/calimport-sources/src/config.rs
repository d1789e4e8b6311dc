//! External source configuration.
//!
//! The endpoint, method and headers are injected configuration rather than
//! code, so a deployment can point the plugin at another source and tests
//! can point it at a stub.

use std::collections::BTreeMap;

use calimport_core::ImportJob;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{SourceError, SourceResult};
use crate::transport::HttpRequest;

/// Default endpoint (the JSONPlaceholder demo API).
pub const DEFAULT_SOURCE_URL: &str = "https://jsonplaceholder.typicode.com/posts";

/// Default `User-Agent` header.
pub const DEFAULT_USER_AGENT: &str = "PlusEV-Plugin/1.0";

/// Query parameter names used to pass the job window to the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowParams {
    /// Parameter carrying the job's `from` date.
    pub from: String,
    /// Parameter carrying the job's `to` date.
    pub to: String,
}

/// How raw records are turned into events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    /// Prefix placed before each record title.
    pub title_label: String,
    /// Tags attached to every event.
    pub tags: Vec<String>,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            title_label: "Demo Event: ".to_string(),
            tags: vec!["demo".to_string(), "example".to_string()],
        }
    }
}

/// Configuration for an HTTP event source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// HTTP method.
    pub method: String,
    /// Endpoint URL.
    pub url: String,
    /// Request headers.
    pub headers: BTreeMap<String, String>,
    /// When set, the job window is appended to the URL as query parameters.
    pub window_params: Option<WindowParams>,
    /// Record to event mapping.
    #[serde(flatten)]
    pub mapping: MappingConfig,
}

impl Default for SourceConfig {
    fn default() -> Self {
        let headers = BTreeMap::from([
            ("Accept".to_string(), "application/json".to_string()),
            ("User-Agent".to_string(), DEFAULT_USER_AGENT.to_string()),
        ]);

        Self {
            method: "GET".to_string(),
            url: DEFAULT_SOURCE_URL.to_string(),
            headers,
            window_params: None,
            mapping: MappingConfig::default(),
        }
    }
}

impl SourceConfig {
    /// Creates a config for the given endpoint with default headers and mapping.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Builder method to set the HTTP method.
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// Builder method to add or replace a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Builder method to pass the job window as query parameters.
    pub fn with_window_params(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.window_params = Some(WindowParams {
            from: from.into(),
            to: to.into(),
        });
        self
    }

    /// Builder method to set the title label.
    pub fn with_title_label(mut self, label: impl Into<String>) -> Self {
        self.mapping.title_label = label.into();
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.method.trim().is_empty() {
            return Err("source method must not be empty".to_string());
        }

        let url = Url::parse(&self.url).map_err(|e| format!("invalid source url '{}': {}", self.url, e))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!(
                "source url must use http or https, got '{}'",
                url.scheme()
            ));
        }

        Ok(())
    }

    /// Builds the single outbound request for a job.
    pub fn build_request(&self, job: &ImportJob) -> SourceResult<HttpRequest> {
        let url = match self.window_params {
            Some(ref params) => {
                let mut url = Url::parse(&self.url).map_err(|e| {
                    SourceError::configuration(format!("invalid source url '{}'", self.url))
                        .with_source(e)
                })?;
                url.query_pairs_mut()
                    .append_pair(&params.from, &job.from_date())
                    .append_pair(&params.to, &job.to_date());
                url.to_string()
            }
            None => self.url.clone(),
        };

        Ok(HttpRequest {
            method: self.method.clone(),
            url,
            headers: self.headers.clone(),
        })
    }
}
