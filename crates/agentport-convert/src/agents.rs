//! Claude Code agent conversion: discovery, per-document pipeline, batch.
//!
//! Agents live in `<source>/plugins/<plugin>/agents/<name>.md`. Each one
//! becomes `<output>/<name>.json`.

use std::path::{Path, PathBuf};

use crate::error::{ConvertError, Result};
use crate::frontmatter::{HeaderFlavor, parse_document};
use crate::infer::infer_capabilities;
use crate::mapper::map_agent;
use crate::types::{AgentArtifact, ConversionStats, RawDocument};

/// Settings for one agent conversion run.
#[derive(Debug, Clone)]
pub struct AgentConvertOptions {
    pub source: PathBuf,
    pub output: PathBuf,
    /// Compute everything but write nothing.
    pub dry_run: bool,
    /// Value for the `$schema` field, if any.
    pub schema: Option<String>,
}

/// Find agent markdown files below `source`, sorted by path.
pub fn discover_agent_files(source: &Path) -> Result<Vec<PathBuf>> {
    let plugins = source.join("plugins");
    if !plugins.is_dir() {
        tracing::debug!(path = %plugins.display(), "no plugins directory");
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for plugin in sorted_entries(&plugins)? {
        let agents = plugin.join("agents");
        if !agents.is_dir() {
            tracing::trace!(path = %plugin.display(), "no agents directory, skipping");
            continue;
        }
        files.extend(
            sorted_entries(&agents)?
                .into_iter()
                .filter(|p| p.is_file() && p.extension().is_some_and(|e| e == "md")),
        );
    }
    Ok(files)
}

/// Run the pipeline on a loaded document.
pub fn convert_agent_document(doc: &RawDocument, schema: Option<&str>) -> AgentArtifact {
    let parsed = parse_document(&doc.content, HeaderFlavor::Rich);
    if let Some(reason) = &parsed.header_error {
        tracing::warn!(
            path = %doc.path.display(),
            reason = %reason,
            "malformed header, treating whole document as body"
        );
    }
    let caps = infer_capabilities(&doc.name, &parsed.body, &parsed.metadata);
    map_agent(&doc.name, &parsed, &caps, schema)
}

/// Read and convert one agent file.
pub fn convert_agent_file(path: &Path, schema: Option<&str>) -> Result<AgentArtifact> {
    let doc = RawDocument::read(path)?;
    Ok(convert_agent_document(&doc, schema))
}

/// Where an artifact named `name` is written.
pub fn agent_output_path(output: &Path, name: &str) -> PathBuf {
    output.join(format!("{name}.json"))
}

/// Serialise an artifact into `output` as pretty JSON.
pub fn write_agent(artifact: &AgentArtifact, output: &Path) -> Result<PathBuf> {
    let path = agent_output_path(output, &artifact.name);
    let mut json = serde_json::to_string_pretty(artifact)?;
    json.push('\n');
    std::fs::write(&path, json).map_err(|e| ConvertError::io(&path, e))?;
    Ok(path)
}

/// Convert every agent found below `opts.source`.
///
/// A missing source or an empty discovery result fails the run. Failures of
/// individual documents are recorded in the returned stats.
pub fn convert_agents(opts: &AgentConvertOptions) -> Result<ConversionStats> {
    if !opts.source.exists() {
        return Err(ConvertError::SourceNotFound {
            path: opts.source.clone(),
        });
    }

    let files = discover_agent_files(&opts.source)?;
    if files.is_empty() {
        return Err(ConvertError::NoDocuments {
            path: opts.source.clone(),
        });
    }
    tracing::info!(count = files.len(), source = %opts.source.display(), "agent files found");

    if !opts.dry_run {
        std::fs::create_dir_all(&opts.output).map_err(|e| ConvertError::io(&opts.output, e))?;
    }

    let mut stats = ConversionStats::with_total(files.len());
    for path in &files {
        let outcome = convert_agent_file(path, opts.schema.as_deref()).and_then(|artifact| {
            if !opts.dry_run {
                write_agent(&artifact, &opts.output)?;
            }
            Ok(artifact)
        });

        match outcome {
            Ok(artifact) => {
                tracing::info!(
                    name = %artifact.name,
                    tools = artifact.tools.len(),
                    allowed = artifact.allowed_tools.len(),
                    mcp_servers = artifact.mcp_servers.len(),
                    "agent converted"
                );
                stats.record_success(artifact.name);
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to convert agent");
                stats.record_failure(path, e.to_string());
            }
        }
    }

    tracing::info!(
        total = stats.total,
        converted = stats.converted,
        failed = stats.failed,
        "agent conversion finished"
    );
    Ok(stats)
}

/// Directory entries of `dir`, sorted by path.
pub(crate) fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| ConvertError::io(dir, e))?;
    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ConvertError::io(dir, e))?;
        paths.push(entry.path());
    }
    paths.sort();
    Ok(paths)
}
