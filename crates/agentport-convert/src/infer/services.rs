//! MCP integration-service inference.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use aho_corasick::AhoCorasick;
use serde_json::{Map, Value};

use crate::types::IntegrationBinding;

/// Known services and the npm package that serves them over MCP.
static SERVICE_REGISTRY: &[(&str, &str)] = &[
    ("github", "@modelcontextprotocol/server-github"),
    ("gitlab", "@modelcontextprotocol/server-gitlab"),
    ("aws", "@aws/mcp-server"),
    ("kubernetes", "@kubernetes/mcp-server"),
    ("postgres", "@modelcontextprotocol/server-postgres"),
    ("slack", "@modelcontextprotocol/server-slack"),
];

static SERVICE_MATCHER: LazyLock<AhoCorasick> = LazyLock::new(|| {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(SERVICE_REGISTRY.iter().map(|(name, _)| name))
        .expect("service automaton")
});

/// The canned invocation descriptor for a registry service.
pub fn binding_for(service: &str) -> Option<IntegrationBinding> {
    SERVICE_REGISTRY
        .iter()
        .find(|(name, _)| *name == service)
        .map(|(_, package)| IntegrationBinding {
            command: "npx".into(),
            args: vec!["-y".into(), (*package).to_owned()],
        })
}

/// Bind every registry service mentioned in `text` that `declared` does
/// not already configure.
pub fn infer_mcp_servers(
    text: &str,
    declared: Option<&Map<String, Value>>,
) -> BTreeMap<String, IntegrationBinding> {
    let mut servers = BTreeMap::new();

    for m in SERVICE_MATCHER.find_overlapping_iter(text) {
        let (name, _) = SERVICE_REGISTRY[m.pattern().as_usize()];
        if declared.is_some_and(|d| d.contains_key(name)) || servers.contains_key(name) {
            continue;
        }
        if let Some(binding) = binding_for(name) {
            tracing::debug!(service = %name, "integration service inferred");
            servers.insert(name.to_owned(), binding);
        }
    }

    servers
}
