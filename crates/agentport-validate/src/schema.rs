//! The Kiro agent schema's closed field set.

use serde_json::Value;

/// JSON type expected for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
}

impl FieldType {
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::String => "string",
        }
    }
}

/// Fields every agent must carry, with their types.
pub const REQUIRED_FIELDS: &[(&str, FieldType)] =
    &[("name", FieldType::String), ("prompt", FieldType::String)];

/// Every field an agent may carry.
pub const ALLOWED_FIELDS: &[&str] = &[
    "$schema",
    "name",
    "description",
    "prompt",
    "mcpServers",
    "tools",
    "toolAliases",
    "allowedTools",
    "resources",
    "hooks",
    "toolsSettings",
    "includeMcpJson",
    "useLegacyMcpJson",
    "model",
    "temperature",
];

pub fn is_allowed(field: &str) -> bool {
    ALLOWED_FIELDS.contains(&field)
}
