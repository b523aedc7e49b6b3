//! Auto-approval inference by agent category.
//!
//! Agents are classified by matching their name against an ordered rule
//! table. The first rule whose name terms match wins; `dev` is checked
//! before `devops`, so only `infrastructure` names reach the infrastructure
//! grants.

/// Read-only tools that are safe to auto-approve for analysis agents.
const SAFE_TOOLS: &[&str] = &["read", "list_dir", "grep", "introspect"];

/// Broad category an agent is sorted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentCategory {
    Architecture,
    Review,
    Security,
    Development,
    Infrastructure,
}

/// An extra grant applied when any of `body_terms` occurs in the body.
struct ConditionalGrant {
    body_terms: &'static [&'static str],
    grant: &'static str,
}

struct ApprovalRule {
    category: AgentCategory,
    name_terms: &'static [&'static str],
    grants: &'static [&'static str],
    conditional: &'static [ConditionalGrant],
}

static APPROVAL_RULES: &[ApprovalRule] = &[
    ApprovalRule {
        category: AgentCategory::Architecture,
        name_terms: &["architect", "design"],
        grants: SAFE_TOOLS,
        conditional: &[],
    },
    ApprovalRule {
        category: AgentCategory::Review,
        name_terms: &["review", "audit"],
        grants: SAFE_TOOLS,
        conditional: &[],
    },
    ApprovalRule {
        category: AgentCategory::Security,
        name_terms: &["security", "scanner"],
        grants: SAFE_TOOLS,
        conditional: &[ConditionalGrant {
            body_terms: &["scan"],
            grant: "@security-scanner/*",
        }],
    },
    ApprovalRule {
        category: AgentCategory::Development,
        name_terms: &["dev", "engineer"],
        grants: &["read", "write", "list_dir", "shell"],
        conditional: &[],
    },
    ApprovalRule {
        category: AgentCategory::Infrastructure,
        name_terms: &["devops", "infrastructure"],
        grants: &["read", "write", "shell"],
        conditional: &[
            ConditionalGrant {
                body_terms: &["aws"],
                grant: "@aws/*",
            },
            ConditionalGrant {
                body_terms: &["kubernetes", "k8s"],
                grant: "@kubernetes/*",
            },
        ],
    },
];

fn matching_rule(name: &str) -> Option<&'static ApprovalRule> {
    let name = name.to_lowercase();
    APPROVAL_RULES
        .iter()
        .find(|rule| rule.name_terms.iter().any(|term| name.contains(term)))
}

/// Classify an agent by name. `None` when no rule matches.
pub fn classify(name: &str) -> Option<AgentCategory> {
    matching_rule(name).map(|rule| rule.category)
}

/// Infer which tools the agent may use without confirmation.
///
/// Unmatched names get an empty list.
pub fn infer_allowed_tools(name: &str, body: &str) -> Vec<String> {
    let Some(rule) = matching_rule(name) else {
        return Vec::new();
    };

    let body = body.to_lowercase();
    let mut allowed: Vec<String> = rule.grants.iter().map(|t| (*t).to_owned()).collect();
    for extra in rule.conditional {
        if extra.body_terms.iter().any(|term| body.contains(term))
            && !allowed.iter().any(|t| t == extra.grant)
        {
            allowed.push(extra.grant.to_owned());
        }
    }

    tracing::debug!(
        name = %name,
        category = ?rule.category,
        allowed = allowed.len(),
        "auto-approval inferred"
    );
    allowed
}
