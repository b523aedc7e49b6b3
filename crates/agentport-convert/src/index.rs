//! `agents_index.md` generation over a directory of converted agents.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::agents::sorted_entries;
use crate::error::{ConvertError, Result};

/// File name of the generated index.
pub const INDEX_FILE: &str = "agents_index.md";

const DEFAULT_CATEGORY: &str = "General";

/// Index headings by name terms, first match wins.
static INDEX_CATEGORIES: &[(&str, &[&str])] = &[
    ("Architecture", &["architect", "design"]),
    ("Development", &["dev", "engineer"]),
    ("Infrastructure", &["devops", "infra"]),
    ("Security", &["security", "audit"]),
    ("Quality Assurance", &["review"]),
];

/// Heading an agent is listed under.
pub fn index_category(name: &str) -> &'static str {
    let name = name.to_lowercase();
    INDEX_CATEGORIES
        .iter()
        .find(|(_, terms)| terms.iter().any(|t| name.contains(t)))
        .map_or(DEFAULT_CATEGORY, |(category, _)| *category)
}

/// One line of the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub name: String,
    /// First line of the description.
    pub summary: String,
}

/// Read the agent artifacts in `dir` and group them by category.
///
/// Files that cannot be read or parsed are skipped.
pub fn collect_index(dir: &Path) -> Result<BTreeMap<&'static str, Vec<IndexEntry>>> {
    let mut categories: BTreeMap<&'static str, Vec<IndexEntry>> = BTreeMap::new();

    for path in sorted_entries(dir)? {
        if !path.is_file() || path.extension().is_none_or(|e| e != "json") {
            continue;
        }
        let data = match read_json(&path) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable agent");
                continue;
            }
        };

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = data
            .get("name")
            .and_then(Value::as_str)
            .map_or(stem, str::to_owned);
        let summary = data
            .get("description")
            .and_then(Value::as_str)
            .map(str::trim)
            .and_then(|d| d.lines().next())
            .unwrap_or_default()
            .to_owned();

        categories
            .entry(index_category(&name))
            .or_default()
            .push(IndexEntry { name, summary });
    }

    Ok(categories)
}

/// Render the index markdown.
pub fn render_index(categories: &BTreeMap<&'static str, Vec<IndexEntry>>) -> String {
    let total: usize = categories.values().map(Vec::len).sum();
    let mut out = String::from("# Available Kiro Agents\n\n");
    let _ = writeln!(out, "Total agents: {total}\n");
    for (category, entries) in categories {
        let _ = writeln!(out, "## {category}\n");
        for entry in entries {
            let _ = writeln!(out, "- **{}**: {}", entry.name, entry.summary);
        }
        out.push('\n');
    }
    out
}

/// Write `agents_index.md` into `dir` and return its path.
pub fn write_agent_index(dir: &Path) -> Result<PathBuf> {
    let categories = collect_index(dir)?;
    let path = dir.join(INDEX_FILE);
    std::fs::write(&path, render_index(&categories)).map_err(|e| ConvertError::io(&path, e))?;
    tracing::info!(path = %path.display(), categories = categories.len(), "agent index written");
    Ok(path)
}

fn read_json(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path).map_err(|e| ConvertError::io(path, e))?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_follow_table_order() {
        assert_eq!(index_category("cloud-architect"), "Architecture");
        assert_eq!(index_category("devops-troubleshooter"), "Development");
        assert_eq!(index_category("infra-monitor"), "Infrastructure");
        assert_eq!(index_category("backend-developer"), "Development");
        assert_eq!(index_category("security-auditor"), "Security");
        assert_eq!(index_category("code-reviewer"), "Quality Assurance");
        assert_eq!(index_category("copywriter"), "General");
    }

    #[test]
    fn index_groups_and_summarises() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join("code-reviewer.json"),
            r#"{"name": "code-reviewer", "prompt": "p", "description": "Reviews code\nin depth"}"#,
        )
        .unwrap();
        std::fs::write(tmp.path().join("writer.json"), r#"{"prompt": "p"}"#).unwrap();
        std::fs::write(tmp.path().join("broken.json"), "{").unwrap();
        std::fs::write(tmp.path().join("notes.txt"), "ignored").unwrap();

        let path = write_agent_index(tmp.path()).unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.contains("Total agents: 2\n"));
        assert!(text.contains("## General\n\n- **writer**: \n"));
        assert!(text.contains("## Quality Assurance\n\n- **code-reviewer**: Reviews code\n"));
        assert!(text.find("## General").unwrap() < text.find("## Quality Assurance").unwrap());
    }
}
