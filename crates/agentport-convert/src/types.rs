//! Data model for the conversion pipeline.
//!
//! A [`RawDocument`] is split by the header parser into [`Metadata`] and a
//! body, the inferencer derives [`InferredCapabilities`] from both, and the
//! mapper produces either an [`AgentArtifact`] (Kiro agent JSON) or a
//! [`PowerDocument`] (Kiro power markdown).

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ConvertError, Result};

/// An input document as handed over by file discovery.
#[derive(Debug, Clone)]
pub struct RawDocument {
    /// Identifying name derived from the source location.
    pub name: String,

    /// Where the document was read from.
    pub path: PathBuf,

    /// Full text content, header included.
    pub content: String,
}

impl RawDocument {
    /// Build a document from already-loaded text.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            content: content.into(),
        }
    }

    /// Read a document from disk, naming it after the file stem.
    pub fn read(path: &Path) -> Result<Self> {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ConvertError::UnnamedDocument {
                path: path.to_path_buf(),
            })?;
        let content = std::fs::read_to_string(path).map_err(|e| ConvertError::io(path, e))?;
        Ok(Self::new(name, path, content))
    }
}

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

/// Key/value pairs decoded from a document's header block.
///
/// Values are JSON-like so that nested mappings (`mcpServers`) and lists
/// survive decoding unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(Map<String, Value>);

impl Metadata {
    /// Create empty metadata.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Look up a string value.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Look up a numeric value.
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.0.get(key).and_then(Value::as_f64)
    }

    /// Look up a nested mapping.
    pub fn get_object(&self, key: &str) -> Option<&Map<String, Value>> {
        self.0.get(key).and_then(Value::as_object)
    }

    /// Look up a list of strings.
    ///
    /// Accepts a sequence of strings or a single comma-separated string
    /// (`tools: Read, Grep, Glob`). Returns `None` for any other shape.
    pub fn get_string_list(&self, key: &str) -> Option<Vec<String>> {
        match self.0.get(key)? {
            Value::Array(items) => items
                .iter()
                .map(|item| item.as_str().map(str::to_owned))
                .collect(),
            Value::String(s) => Some(
                s.split(',')
                    .map(str::trim)
                    .filter(|part| !part.is_empty())
                    .map(str::to_owned)
                    .collect(),
            ),
            _ => None,
        }
    }
}

impl From<Map<String, Value>> for Metadata {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

// ---------------------------------------------------------------------------
// Inference results
// ---------------------------------------------------------------------------

/// Invocation descriptor for an MCP integration service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationBinding {
    pub command: String,
    pub args: Vec<String>,
}

/// Everything the capability inferencer derives for an agent document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InferredCapabilities {
    /// Free-text tool references found in the body.
    pub tool_mentions: BTreeSet<String>,

    /// Capabilities auto-approved by the category heuristic.
    pub allowed_tools: Vec<String>,

    /// Services mentioned in the body and not declared in the header.
    pub mcp_servers: BTreeMap<String, IntegrationBinding>,
}

// ---------------------------------------------------------------------------
// Output artifacts
// ---------------------------------------------------------------------------

/// A Kiro agent definition, serialised as the agent JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentArtifact {
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    pub name: String,

    #[serde(default)]
    pub description: String,

    pub prompt: String,

    #[serde(default)]
    pub tools: Vec<String>,

    #[serde(default)]
    pub allowed_tools: Vec<String>,

    #[serde(default)]
    pub mcp_servers: BTreeMap<String, Value>,

    #[serde(default)]
    pub resources: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_aliases: Option<Map<String, Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hooks: Option<Map<String, Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools_settings: Option<Map<String, Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_mcp_json: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_legacy_mcp_json: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

/// A Kiro power: a `POWER.md` header plus the original skill body.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerDocument {
    /// Normalised identifier (`my-skill`), also the directory suffix.
    pub identifier: String,

    /// The skill name as authored.
    pub display_name: String,

    pub description: String,

    /// At most four search tags.
    pub keywords: Vec<String>,

    /// Skill instructions, copied unchanged.
    pub body: String,
}

impl PowerDocument {
    /// Directory name of the power inside the output root.
    pub fn dir_name(&self) -> String {
        format!("power-{}", self.identifier)
    }

    /// Render the `POWER.md` text.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.body.len() + 256);
        out.push_str("---\n");
        push_yaml_scalar(&mut out, "name", &self.identifier);
        push_yaml_scalar(&mut out, "displayName", &self.display_name);
        push_yaml_scalar(&mut out, "description", &self.description);
        out.push_str("keywords:\n");
        for keyword in &self.keywords {
            out.push_str("  - ");
            out.push_str(&quote(keyword));
            out.push('\n');
        }
        out.push_str("---\n\n");
        out.push_str(&self.body);
        out
    }
}

fn push_yaml_scalar(out: &mut String, key: &str, value: &str) {
    out.push_str(key);
    out.push_str(": ");
    out.push_str(&quote(value));
    out.push('\n');
}

/// Double-quote a header value, escaping backslashes, quotes and newlines.
fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

// ---------------------------------------------------------------------------
// Batch accounting
// ---------------------------------------------------------------------------

/// A document that could not be converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Running totals for one batch run, owned by the processing loop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionStats {
    pub total: usize,
    pub converted: usize,
    pub failed: usize,

    /// Names of the artifacts produced, in processing order.
    pub converted_names: Vec<String>,

    pub failures: Vec<DocumentFailure>,
}

impl ConversionStats {
    /// Start a run over `total` discovered documents.
    pub fn with_total(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn record_success(&mut self, name: impl Into<String>) {
        self.converted += 1;
        self.converted_names.push(name.into());
    }

    pub fn record_failure(&mut self, path: impl Into<PathBuf>, reason: impl Into<String>) {
        self.failed += 1;
        self.failures.push(DocumentFailure {
            path: path.into(),
            reason: reason.into(),
        });
    }

    /// Whether every discovered document was converted.
    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.converted == self.total
    }
}
