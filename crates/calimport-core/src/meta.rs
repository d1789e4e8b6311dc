//! Plugin metadata descriptor.
//!
//! The host reads this descriptor through the `meta` export before it ever
//! runs an import. It declares who the plugin is and which resources it may
//! touch; the network allow-list must cover every URL the plugin fetches.

use serde::{Deserialize, Serialize};

/// Application identifier of the planner host.
pub const PLANNER_APP_ID: &str = "plusev_planner";

/// A network target the plugin is allowed to contact.
///
/// A pattern ending in `*` matches any URL starting with the text before the
/// `*`; any other pattern must match the URL exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkTargetRule {
    pub pattern: String,
}

impl NetworkTargetRule {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    /// Returns true if `url` is covered by this rule.
    pub fn matches(&self, url: &str) -> bool {
        match self.pattern.strip_suffix('*') {
            Some(prefix) => url.starts_with(prefix),
            None => url == self.pattern,
        }
    }
}

/// Resources the plugin asks the host for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceAccess {
    pub allowed_network_targets: Vec<NetworkTargetRule>,
    /// Directories the plugin may write to; `None` means no file writes.
    pub fs_write_access: Option<Vec<String>>,
    pub stdout_access: bool,
    pub stderr_access: bool,
}

impl Default for ResourceAccess {
    fn default() -> Self {
        Self {
            allowed_network_targets: Vec::new(),
            fs_write_access: None,
            stdout_access: true,
            stderr_access: true,
        }
    }
}

/// A way to reach the plugin author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorContact {
    /// Contact kind, e.g. "email".
    pub kind: String,
    pub value: String,
}

/// The descriptor returned by the `meta` export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginMeta {
    pub plugin_id: String,
    pub name: String,
    pub app_id: String,
    /// Marketplace category ("Import", "Export", "Utility").
    pub category: String,
    pub description: String,
    pub author: String,
    /// Semantic version.
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub contacts: Vec<AuthorContact>,
    pub resources: ResourceAccess,
}

impl PluginMeta {
    /// Creates an import-category descriptor for the planner host.
    pub fn new(plugin_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            plugin_id: plugin_id.into(),
            name: name.into(),
            app_id: PLANNER_APP_ID.to_string(),
            category: "Import".to_string(),
            description: String::new(),
            author: String::new(),
            version: "0.1.0".to_string(),
            repository: None,
            tags: Vec::new(),
            contacts: Vec::new(),
            resources: ResourceAccess::default(),
        }
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder method to set the author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Builder method to set the version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Builder method to set the repository URL.
    pub fn with_repository(mut self, repository: impl Into<String>) -> Self {
        self.repository = Some(repository.into());
        self
    }

    /// Builder method to add a discovery tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Builder method to add a contact.
    pub fn with_contact(mut self, kind: impl Into<String>, value: impl Into<String>) -> Self {
        self.contacts.push(AuthorContact {
            kind: kind.into(),
            value: value.into(),
        });
        self
    }

    /// Builder method to allow a network target pattern.
    pub fn with_network_target(mut self, pattern: impl Into<String>) -> Self {
        self.resources
            .allowed_network_targets
            .push(NetworkTargetRule::new(pattern));
        self
    }

    /// Returns true if the allow-list covers `url`.
    pub fn permits(&self, url: &str) -> bool {
        self.resources
            .allowed_network_targets
            .iter()
            .any(|rule| rule.matches(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_rule_matches_prefix() {
        let rule = NetworkTargetRule::new("https://jsonplaceholder.typicode.com/*");

        assert!(rule.matches("https://jsonplaceholder.typicode.com/posts"));
        assert!(rule.matches("https://jsonplaceholder.typicode.com/"));
        assert!(!rule.matches("https://jsonplaceholder.typicode.com"));
        assert!(!rule.matches("https://evil.example.com/jsonplaceholder.typicode.com/"));
    }

    #[test]
    fn exact_rule_matches_only_itself() {
        let rule = NetworkTargetRule::new("https://api.example.com/events");

        assert!(rule.matches("https://api.example.com/events"));
        assert!(!rule.matches("https://api.example.com/events?page=2"));
    }

    #[test]
    fn descriptor_defaults() {
        let meta = PluginMeta::new("my-plugin", "My Plugin");

        assert_eq!(meta.app_id, "plusev_planner");
        assert_eq!(meta.category, "Import");
        assert!(meta.resources.stdout_access);
        assert!(meta.resources.stderr_access);
        assert!(meta.resources.fs_write_access.is_none());
        assert!(!meta.permits("https://example.com/"));
    }

    #[test]
    fn permits_any_matching_rule() {
        let meta = PluginMeta::new("my-plugin", "My Plugin")
            .with_network_target("https://a.example.com/*")
            .with_network_target("https://b.example.com/feed");

        assert!(meta.permits("https://a.example.com/x"));
        assert!(meta.permits("https://b.example.com/feed"));
        assert!(!meta.permits("https://c.example.com/"));
    }

    #[test]
    fn serializes_camel_case() {
        let meta = PluginMeta::new("my-plugin", "My Plugin")
            .with_contact("email", "me@example.com")
            .with_network_target("https://a.example.com/*");
        let json = serde_json::to_value(&meta).unwrap();

        assert_eq!(json["pluginId"], "my-plugin");
        assert_eq!(json["appId"], "plusev_planner");
        assert_eq!(
            json["resources"]["allowedNetworkTargets"][0]["pattern"],
            "https://a.example.com/*"
        );
        assert_eq!(json["resources"]["fsWriteAccess"], serde_json::Value::Null);
        assert_eq!(json["resources"]["stdoutAccess"], true);
        assert_eq!(json["contacts"][0]["kind"], "email");
        assert!(json.get("repository").is_none());
    }
}
