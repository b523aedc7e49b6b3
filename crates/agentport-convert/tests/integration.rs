//! Integration tests for the agentport-convert crate.
//!
//! These tests run the agent and skill conversion pipelines end to end
//! against temporary source trees.

use std::path::Path;

use agentport_convert::{
    AgentConvertOptions, ConvertError, HeaderFlavor, SkillConvertOptions, convert_agents,
    convert_skills, parse_document, write_agent_index,
};

fn write(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn agent_opts(source: &Path, output: &Path, dry_run: bool) -> AgentConvertOptions {
    AgentConvertOptions {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        dry_run,
        schema: None,
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Agent conversion
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn agents_convert_to_json_artifacts() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write(
        &src.path().join("plugins/quality/agents/code-reviewer.md"),
        "---\nname: code-reviewer\ndescription: \"Reviews code for quality\"\n---\nYou are a senior reviewer. Use the read tool to inspect files.",
    );
    write(
        &src.path().join("plugins/ops/agents/infrastructure-ops.md"),
        "---\nmodel: opus\n---\nRun terraform on AWS and manage kubernetes clusters.",
    );

    let stats = convert_agents(&agent_opts(src.path(), out.path(), false)).unwrap();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.converted, 2);
    assert_eq!(stats.failed, 0);
    assert!(stats.is_clean());

    let reviewer: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(out.path().join("code-reviewer.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(reviewer["name"], "code-reviewer");
    assert_eq!(reviewer["description"], "Reviews code for quality");
    assert!(reviewer["allowedTools"].as_array().unwrap().contains(&"read".into()));
    let tools = reviewer["tools"].as_array().unwrap();
    assert!(tools.contains(&"*".into()));
    assert!(tools.contains(&"@read".into()));

    let infra: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(out.path().join("infrastructure-ops.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(infra["model"], "opus");
    let allowed = infra["allowedTools"].as_array().unwrap();
    assert!(allowed.contains(&"@aws/*".into()));
    assert!(allowed.contains(&"@kubernetes/*".into()));
    assert_eq!(infra["mcpServers"]["aws"]["command"], "npx");
    assert!(infra["mcpServers"].get("kubernetes").is_some());
}

#[test]
fn unreadable_agent_is_counted_not_fatal() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write(&src.path().join("plugins/a/agents/good.md"), "Plain body.");
    // Invalid UTF-8 cannot be read as text.
    let bad = src.path().join("plugins/a/agents/bad.md");
    std::fs::write(&bad, [0xff, 0xfe, 0x00, 0x80]).unwrap();

    let stats = convert_agents(&agent_opts(src.path(), out.path(), false)).unwrap();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.converted, 1);
    assert_eq!(stats.failed, 1);
    assert_eq!(stats.failures[0].path, bad);
    assert_eq!(stats.converted_names, vec!["good"]);
    assert!(out.path().join("good.json").exists());
}

#[test]
fn dry_run_leaves_output_untouched() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let target = out.path().join("agents");
    write(&src.path().join("plugins/a/agents/helper.md"), "Body");

    let stats = convert_agents(&agent_opts(src.path(), &target, true)).unwrap();
    assert_eq!(stats.converted, 1);
    assert!(!target.exists());
}

#[test]
fn empty_source_is_an_environment_error() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();

    let err = convert_agents(&agent_opts(src.path(), out.path(), false)).unwrap_err();
    assert!(matches!(err, ConvertError::NoDocuments { .. }));

    let missing = src.path().join("nope");
    let err = convert_agents(&agent_opts(&missing, out.path(), false)).unwrap_err();
    assert!(matches!(err, ConvertError::SourceNotFound { .. }));
}

#[test]
fn index_lists_converted_agents() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write(
        &src.path().join("plugins/a/agents/cloud-architect.md"),
        "---\ndescription: Designs cloud systems\n---\nBody",
    );
    convert_agents(&agent_opts(src.path(), out.path(), false)).unwrap();

    let index = std::fs::read_to_string(write_agent_index(out.path()).unwrap()).unwrap();
    assert!(index.starts_with("# Available Kiro Agents\n\nTotal agents: 1\n"));
    assert!(index.contains("## Architecture\n\n- **cloud-architect**: Designs cloud systems\n"));
}

// ═══════════════════════════════════════════════════════════════════════
//  Skill conversion
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn skills_convert_to_power_directories() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let skill = src.path().join("plugins/payments/skills/stripe_integration");
    write(
        &skill.join("SKILL.md"),
        "---\nname: Stripe Integration\ndescription: \"Accept payments with Stripe\"\n---\n\n# Stripe\n\nSteps.",
    );
    let binary = [0u8, 159, 146, 150, 10];
    std::fs::write(skill.join("logo.bin"), binary).unwrap();
    write(&skill.join("reference.md"), "reference text");

    let opts = SkillConvertOptions {
        source: src.path().to_path_buf(),
        output: out.path().to_path_buf(),
        dry_run: false,
    };
    let (stats, outputs) = convert_skills(&opts).unwrap();
    assert_eq!(stats.converted, 1);
    assert_eq!(outputs[0].supplementary.len(), 2);

    let power_dir = out.path().join("power-stripe-integration");
    let power_md = std::fs::read_to_string(power_dir.join("POWER.md")).unwrap();
    assert!(power_md.starts_with("---\nname: \"stripe-integration\"\ndisplayName: \"Stripe Integration\"\n"));
    assert!(power_md.ends_with("---\n\n# Stripe\n\nSteps."));

    let reparsed = parse_document(&power_md, HeaderFlavor::Flat);
    assert_eq!(reparsed.metadata.get_str("description"), Some("Accept payments with Stripe"));
    assert_eq!(reparsed.body, "# Stripe\n\nSteps.");

    assert_eq!(std::fs::read(power_dir.join("steering/logo.bin")).unwrap(), binary);
    assert_eq!(
        std::fs::read_to_string(power_dir.join("steering/reference.md")).unwrap(),
        "reference text"
    );
    assert!(!power_dir.join("steering/SKILL.md").exists());
}

#[test]
fn skill_keywords_are_bounded_and_unique() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write(
        &src.path().join("k8s-helm-deploy-charts/SKILL.md"),
        "---\nname: k8s-helm-deploy-charts\ndescription: Helm charts for Kubernetes with Terraform and Docker\n---\nBody",
    );

    let opts = SkillConvertOptions {
        source: src.path().to_path_buf(),
        output: out.path().to_path_buf(),
        dry_run: true,
    };
    let (_, outputs) = convert_skills(&opts).unwrap();
    let keywords = &outputs[0].power.keywords;
    assert_eq!(keywords, &vec!["k8s", "helm", "kubernetes", "terraform"]);
}

#[test]
fn skill_name_cannot_escape_output_root() {
    let src = tempfile::tempdir().unwrap();
    let work = tempfile::tempdir().unwrap();
    let skill = src.path().join("escape");
    write(
        &skill.join("SKILL.md"),
        "---\nname: x/../../../escaped\ndescription: d\n---\nBody",
    );
    write(&skill.join("notes.md"), "notes");

    let output = work.path().join("a/b/out");
    let opts = SkillConvertOptions {
        source: src.path().to_path_buf(),
        output: output.clone(),
        dry_run: false,
    };
    let (stats, outputs) = convert_skills(&opts).unwrap();
    assert_eq!(stats.converted, 1);
    assert_eq!(outputs[0].power_dir, output.join("power-x-escaped"));
    assert!(output.join("power-x-escaped/POWER.md").exists());
    assert!(output.join("power-x-escaped/steering/notes.md").exists());
    assert!(!work.path().join("a/escaped").exists());
    assert!(!work.path().join("escaped").exists());
}

#[test]
fn no_skills_found_is_an_environment_error() {
    let src = tempfile::tempdir().unwrap();
    let opts = SkillConvertOptions {
        source: src.path().to_path_buf(),
        output: src.path().join("out"),
        dry_run: false,
    };
    assert!(matches!(
        convert_skills(&opts).unwrap_err(),
        ConvertError::NoDocuments { .. }
    ));
}
