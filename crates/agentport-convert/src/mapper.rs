//! Schema mapping: header metadata plus inferred capabilities to Kiro
//! artifacts.
//!
//! Override rule: an optional target field present in the header with a
//! value of the right type replaces the seed for that field wholesale and
//! disables inference for it. `mcpServers` merges by key, header entries
//! winning. `name` and `prompt` always come from the document itself.
//! Header values of the wrong type are dropped so the artifact stays valid.

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::{Map, Value, json};

use crate::frontmatter::ParsedDocument;
use crate::infer::extract_keywords;
use crate::types::{AgentArtifact, InferredCapabilities, Metadata, PowerDocument};

/// Paragraphs at least this many characters long are not used as a
/// fallback description.
pub const DESCRIPTION_LIMIT: usize = 200;

/// Tool entry granting access to every tool.
pub const ALL_TOOLS: &str = "*";

/// Build the Kiro agent artifact for one document.
pub fn map_agent(
    name: &str,
    parsed: &ParsedDocument,
    caps: &InferredCapabilities,
    schema: Option<&str>,
) -> AgentArtifact {
    let meta = &parsed.metadata;
    let prompt = parsed.body.trim().to_owned();

    let description = match explicit_string(meta, "description", name) {
        Some(d) if !d.is_empty() => d,
        _ => derive_description(&prompt),
    };

    let tools = explicit_list(meta, "tools", name).unwrap_or_else(|| {
        let mut tools = vec![ALL_TOOLS.to_owned()];
        tools.extend(caps.tool_mentions.iter().map(|t| format!("@{t}")));
        tools.dedup();
        tools
    });

    let allowed_tools =
        explicit_list(meta, "allowedTools", name).unwrap_or_else(|| caps.allowed_tools.clone());

    let mut mcp_servers: BTreeMap<String, Value> = caps
        .mcp_servers
        .iter()
        .map(|(service, binding)| {
            (
                service.clone(),
                json!({ "command": binding.command, "args": binding.args }),
            )
        })
        .collect();
    if let Some(declared) = explicit_object(meta, "mcpServers", name) {
        mcp_servers.extend(declared);
    }

    AgentArtifact {
        schema: schema.map(str::to_owned),
        name: name.to_owned(),
        description,
        prompt,
        tools,
        allowed_tools,
        mcp_servers,
        resources: explicit_list(meta, "resources", name).unwrap_or_default(),
        tool_aliases: explicit_object(meta, "toolAliases", name),
        hooks: explicit_object(meta, "hooks", name),
        tools_settings: explicit_object(meta, "toolsSettings", name),
        include_mcp_json: explicit_bool(meta, "includeMcpJson", name),
        use_legacy_mcp_json: explicit_bool(meta, "useLegacyMcpJson", name),
        model: explicit_string(meta, "model", name),
        temperature: explicit_number(meta, "temperature", name),
    }
}

/// Use the body's first paragraph as a description when it is short.
///
/// Long paragraphs give an empty description rather than a truncated one.
pub fn derive_description(body: &str) -> String {
    let paragraph = body
        .trim()
        .lines()
        .take_while(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    if paragraph.chars().count() < DESCRIPTION_LIMIT {
        paragraph.trim_matches('#').trim().to_owned()
    } else {
        String::new()
    }
}

/// Identifier used when a name normalises to nothing.
const FALLBACK_IDENTIFIER: &str = "skill";

/// Normalise a skill name into a power identifier (`My Skill_x` ->
/// `my-skill-x`).
///
/// Only `[a-z0-9-]` survives; every other character, path separators and
/// dots included, becomes a single hyphen. The result is always a plain
/// directory name component.
pub fn power_identifier(name: &str) -> String {
    let mut id = String::with_capacity(name.len());
    for c in name.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            id.push(c);
        } else if !id.is_empty() && !id.ends_with('-') {
            id.push('-');
        }
    }
    let trimmed = id.trim_end_matches('-');
    if trimmed.is_empty() {
        FALLBACK_IDENTIFIER.to_owned()
    } else {
        trimmed.to_owned()
    }
}

/// Build the power document for one skill.
///
/// `dir_name` names the skill when the header has no `name`; `rel_path`
/// is the skill directory relative to the source root.
pub fn map_power(dir_name: &str, parsed: &ParsedDocument, rel_path: Option<&Path>) -> PowerDocument {
    let meta = &parsed.metadata;

    let name = meta
        .get_str("name")
        .filter(|n| !n.trim().is_empty())
        .unwrap_or(dir_name)
        .to_owned();

    let description = match meta.get_str("description").filter(|d| !d.is_empty()) {
        Some(d) => d.to_owned(),
        None => {
            tracing::warn!(skill = %name, "no description found, using placeholder");
            format!("Converted from {name} skill")
        }
    };

    let keywords = extract_keywords(&name, &description, rel_path);

    PowerDocument {
        identifier: power_identifier(&name),
        display_name: name,
        description,
        keywords,
        body: parsed.body.clone(),
    }
}

// ---------------------------------------------------------------------------
// Typed header lookups
// ---------------------------------------------------------------------------

fn wrong_type(agent: &str, key: &str, expected: &str) {
    tracing::warn!(
        agent = %agent,
        field = %key,
        expected = %expected,
        "ignoring header field with wrong type"
    );
}

/// Fetch a header value, treating `null` like an absent key.
fn present<'a>(meta: &'a Metadata, key: &str) -> Option<&'a Value> {
    meta.get(key).filter(|v| !v.is_null())
}

fn explicit_string(meta: &Metadata, key: &str, agent: &str) -> Option<String> {
    let value = present(meta, key)?;
    match value.as_str() {
        Some(s) => Some(s.to_owned()),
        None => {
            wrong_type(agent, key, "string");
            None
        }
    }
}

fn explicit_number(meta: &Metadata, key: &str, agent: &str) -> Option<f64> {
    let value = present(meta, key)?;
    let number = value.as_f64();
    if number.is_none() {
        wrong_type(agent, key, "number");
    }
    number
}

fn explicit_bool(meta: &Metadata, key: &str, agent: &str) -> Option<bool> {
    let value = present(meta, key)?;
    let flag = value.as_bool();
    if flag.is_none() {
        wrong_type(agent, key, "boolean");
    }
    flag
}

fn explicit_list(meta: &Metadata, key: &str, agent: &str) -> Option<Vec<String>> {
    present(meta, key)?;
    let list = meta.get_string_list(key);
    if list.is_none() {
        wrong_type(agent, key, "list of strings");
    }
    list
}

fn explicit_object(meta: &Metadata, key: &str, agent: &str) -> Option<Map<String, Value>> {
    let value = present(meta, key)?;
    match value.as_object() {
        Some(map) => Some(map.clone()),
        None => {
            wrong_type(agent, key, "mapping");
            None
        }
    }
}
