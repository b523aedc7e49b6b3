//! Heuristic capability inference.
//!
//! Everything here is advisory: rules are plain substring and regex tables,
//! so false positives ("already" mentions `read`) and false negatives are
//! expected. Explicit header values always take precedence downstream.

pub mod approval;
pub mod keywords;
pub mod services;
pub mod tools;

pub use approval::{AgentCategory, classify, infer_allowed_tools};
pub use keywords::{MAX_KEYWORDS, extract_keywords};
pub use services::infer_mcp_servers;
pub use tools::extract_tool_mentions;

use crate::types::{InferredCapabilities, Metadata};

/// Run all agent-oriented derivations over one document.
pub fn infer_capabilities(name: &str, body: &str, metadata: &Metadata) -> InferredCapabilities {
    InferredCapabilities {
        tool_mentions: extract_tool_mentions(body),
        allowed_tools: infer_allowed_tools(name, body),
        mcp_servers: infer_mcp_servers(body, metadata.get_object("mcpServers")),
    }
}
