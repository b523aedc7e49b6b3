//! Search keyword extraction for skills.
//!
//! The keyword list is short, so its order matters: the skill's own name
//! comes first, then recognised technologies, then path-derived terms.

use std::path::{Component, Path};
use std::sync::LazyLock;

use regex::Regex;

/// Upper bound on the number of keywords attached to a power.
pub const MAX_KEYWORDS: usize = 4;

/// Path segments naming container directories rather than the skill.
const CONTAINER_SEGMENTS: &[&str] = &["plugins", "skills", "wshobson-agents"];

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-_\s]+").expect("separator regex"));

static TECH_TERMS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\b(stripe|paypal|pci|gdpr|fastapi|nextjs|react|vue|angular|typescript|",
        r"javascript|python|rust|go|java|aws|azure|gcp|docker|kubernetes|terraform|",
        r"helm|istio|linkerd|prometheus|grafana|postgres|mysql|mongodb|redis|graphql|",
        r"rest|grpc|oauth|jwt|webpack|tailwind|jest|cypress|playwright|gitlab|github|",
        r"unity|godot|solidity|ethereum)\b",
    ))
    .expect("technology regex")
});

/// Derive up to [`MAX_KEYWORDS`] lower-cased, unique keywords.
///
/// `path` should be relative to the source root; absolute prefixes would
/// contribute noise such as `home`.
pub fn extract_keywords(name: &str, description: &str, path: Option<&Path>) -> Vec<String> {
    let name_lower = name.to_lowercase();
    let name_parts: Vec<&str> = SEPARATORS.split(&name_lower).collect();

    let combined = format!("{name_lower} {}", description.to_lowercase());
    let tech_terms: Vec<&str> = TECH_TERMS
        .captures_iter(&combined)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect();

    let path_parts: Vec<String> = path
        .map(|p| {
            p.components()
                .filter_map(|c| match c {
                    Component::Normal(s) => Some(s.to_string_lossy().to_lowercase()),
                    _ => None,
                })
                .filter(|segment| !CONTAINER_SEGMENTS.iter().any(|c| segment.contains(c)))
                .flat_map(|segment| {
                    SEPARATORS
                        .split(&segment)
                        .map(str::to_owned)
                        .collect::<Vec<_>>()
                })
                .collect()
        })
        .unwrap_or_default();

    let candidates = name_parts
        .iter()
        .take(2)
        .copied()
        .chain(tech_terms)
        .chain(name_parts.iter().copied())
        .chain(path_parts.iter().map(String::as_str));

    let mut keywords: Vec<String> = Vec::with_capacity(MAX_KEYWORDS);
    for candidate in candidates {
        if keywords.len() == MAX_KEYWORDS {
            break;
        }
        if candidate.chars().count() > 2 && !keywords.iter().any(|k| k == candidate) {
            keywords.push(candidate.to_owned());
        }
    }
    keywords
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_tokens_come_first() {
        let keywords = extract_keywords(
            "stripe-integration",
            "Accept payments with Stripe and PayPal",
            Some(Path::new("plugins/payment-processing/skills/stripe-integration")),
        );
        assert_eq!(keywords, vec!["stripe", "integration", "paypal", "payment"]);
    }

    #[test]
    fn short_tokens_and_duplicates_are_dropped() {
        let keywords = extract_keywords("go_k8s up", "Go services on AWS", None);
        assert_eq!(keywords, vec!["k8s", "aws"]);
    }

    #[test]
    fn word_boundaries_are_exact() {
        // "restful" and "reactive" must not match "rest" / "react".
        let keywords = extract_keywords("api", "restful reactive design", None);
        assert_eq!(keywords, vec!["api"]);
    }

    #[test]
    fn never_more_than_four() {
        let keywords = extract_keywords(
            "alpha-beta-gamma-delta-epsilon",
            "rust python docker redis",
            None,
        );
        assert_eq!(keywords.len(), MAX_KEYWORDS);
        assert_eq!(keywords[..2], ["alpha", "beta"]);
        assert_eq!(keywords[2..], ["rust", "python"]);
    }

    #[test]
    fn container_segments_are_skipped() {
        let keywords = extract_keywords(
            "x",
            "",
            Some(Path::new("wshobson-agents/plugins/cloud_infra/skills/x")),
        );
        assert_eq!(keywords, vec!["cloud", "infra"]);
    }
}
