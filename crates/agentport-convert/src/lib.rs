//! Conversion of Claude Code agents and skills into Kiro artifacts.
//!
//! This crate provides:
//!
//! - **Header parser**: splits a markdown document into `---`-delimited
//!   metadata and a body, degrading to empty metadata when the header is
//!   missing or malformed.
//!
//! - **Capability inferencer**: rule tables that derive tool mentions,
//!   auto-approved tools, MCP service bindings and search keywords from
//!   free text.
//!
//! - **Schema mapper**: merges explicit metadata with inferred values
//!   into a Kiro agent JSON artifact or a Kiro power document.
//!
//! - **Batch conversion**: discovers agents and skills below a source
//!   directory, converts them one by one and returns a
//!   [`ConversionStats`] accumulator. One bad document never aborts a run.
//!
//! # Example
//!
//! ```rust
//! use agentport_convert::{RawDocument, convert_agent_document};
//!
//! let doc = RawDocument::new(
//!     "code-reviewer",
//!     "plugins/review/agents/code-reviewer.md",
//!     "---\ndescription: Reviews code\n---\nUse the read tool.",
//! );
//! let artifact = convert_agent_document(&doc, None);
//! assert_eq!(artifact.description, "Reviews code");
//! assert!(artifact.tools.contains(&"@read".to_owned()));
//! ```

pub mod agents;
pub mod error;
pub mod frontmatter;
pub mod index;
pub mod infer;
pub mod mapper;
pub mod skills;
pub mod types;

pub use agents::{
    AgentConvertOptions, agent_output_path, convert_agent_document, convert_agent_file,
    convert_agents, discover_agent_files, write_agent,
};
pub use error::{ConvertError, Result};
pub use frontmatter::{HeaderFlavor, ParsedDocument, parse_document};
pub use index::{INDEX_FILE, write_agent_index};
pub use infer::{extract_keywords, infer_capabilities};
pub use mapper::{map_agent, map_power, power_identifier};
pub use skills::{PowerOutput, SkillConvertOptions, convert_skill, convert_skills, discover_skill_dirs};
pub use types::{
    AgentArtifact, ConversionStats, DocumentFailure, InferredCapabilities, IntegrationBinding,
    Metadata, PowerDocument, RawDocument,
};
