//! The `meta` export.

use calimport_core::PluginMeta;

/// Identifier the host registers this plugin under.
pub const PLUGIN_ID: &str = "example-planner-plugin";

/// Returns the static descriptor of this plugin.
///
/// The network allow-list must cover every source the plugin is configured
/// to reach; the host refuses anything else.
pub fn plugin_meta() -> PluginMeta {
    PluginMeta::new(PLUGIN_ID, "Example Planner Plugin")
        .with_description(
            "An example plugin that demonstrates how to import events into the PlusEV planner",
        )
        .with_author("PlusEV")
        .with_version(env!("CARGO_PKG_VERSION"))
        .with_repository("https://github.com/plusev-terminal/calimport")
        .with_tag("example")
        .with_tag("demo")
        .with_tag("template")
        .with_contact("email", "plugins@plusev.app")
        .with_network_target("https://jsonplaceholder.typicode.com/*")
}
