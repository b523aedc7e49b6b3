//! Tool-mention extraction from free text.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use aho_corasick::AhoCorasick;
use regex::Regex;

/// Surface phrasings that name a tool, each capturing the tool name.
const MENTION_PATTERNS: &[&str] = &[
    r"(?i)use.*?`(\w+)`.*?tool",
    r"(?i)tool.*?`(\w+)`",
    r"(?i)@(\w+)",
    r"(?i)mcp.*?(\w+)",
];

/// Kiro built-in tools, detected as plain substrings.
pub const BUILTIN_TOOLS: &[&str] = &["read", "write", "shell", "grep", "list_dir"];

static MENTION_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    MENTION_PATTERNS
        .iter()
        .map(|p| Regex::new(p).expect("tool mention regex"))
        .collect()
});

static BUILTIN_MATCHER: LazyLock<AhoCorasick> = LazyLock::new(|| {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(BUILTIN_TOOLS)
        .expect("builtin tool automaton")
});

/// Collect the tools a document refers to.
///
/// Results are lower-cased; tokens of two characters or fewer are dropped.
/// This is a heuristic: prose such as "already" yields `read`.
pub fn extract_tool_mentions(text: &str) -> BTreeSet<String> {
    let mut tools = BTreeSet::new();

    for re in MENTION_RES.iter() {
        for caps in re.captures_iter(text) {
            if let Some(m) = caps.get(1) {
                insert_token(&mut tools, m.as_str());
            }
        }
    }

    for m in BUILTIN_MATCHER.find_overlapping_iter(text) {
        insert_token(&mut tools, BUILTIN_TOOLS[m.pattern().as_usize()]);
    }

    tools
}

fn insert_token(tools: &mut BTreeSet<String>, token: &str) {
    let token = token.to_lowercase();
    if token.chars().count() > 2 {
        tools.insert(token);
    }
}
