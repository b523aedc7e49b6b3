//! End-to-end tests for the `agentport` binary: exit status and the
//! summary block printed on stdout.

use std::path::Path;
use std::process::{Command, Output};

fn agentport(args: &[&str], config_dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_agentport"))
        .arg("--config")
        .arg(config_dir.join("missing.toml"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ═══════════════════════════════════════════════════════════════════════
//  Environment errors
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn agents_with_no_documents_fails_with_zero_summary() {
    let src = tempfile::tempdir().unwrap();
    let out = src.path().join("out");
    let output = agentport(
        &[
            "agents",
            "--source",
            src.path().to_str().unwrap(),
            "--output",
            out.to_str().unwrap(),
        ],
        src.path(),
    );

    assert!(!output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Total agents found: 0"));
    assert!(text.contains("Successfully converted: 0"));
    assert!(text.contains("Failed: 0"));
    assert!(!out.exists());
}

#[test]
fn skills_with_missing_source_fails_with_zero_summary() {
    let tmp = tempfile::tempdir().unwrap();
    let missing = tmp.path().join("nope");
    let output = agentport(
        &["skills", "--source", missing.to_str().unwrap(), "--dry-run"],
        tmp.path(),
    );

    assert!(!output.status.success());
    assert!(stdout(&output).contains("Total skills found: 0"));
}

#[test]
fn validate_missing_dir_fails_with_zero_summary() {
    let tmp = tempfile::tempdir().unwrap();
    let missing = tmp.path().join("agents");
    let output = agentport(
        &["validate", "--agents-dir", missing.to_str().unwrap(), "--no-cli"],
        tmp.path(),
    );

    assert!(!output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Total Scanned: 0\nValid: 0\nInvalid: 0"));
}

#[test]
fn validate_empty_dir_fails_with_zero_summary() {
    let tmp = tempfile::tempdir().unwrap();
    let output = agentport(
        &["validate", "--agents-dir", tmp.path().to_str().unwrap(), "--no-cli"],
        tmp.path(),
    );

    assert!(!output.status.success());
    assert!(stdout(&output).contains("Total Scanned: 0"));
}

// ═══════════════════════════════════════════════════════════════════════
//  Successful runs
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn converted_agents_validate_cleanly() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let agents = src.path().join("plugins/quality/agents");
    std::fs::create_dir_all(&agents).unwrap();
    std::fs::write(
        agents.join("code-reviewer.md"),
        "---\ndescription: Reviews code\n---\nUse the read tool.",
    )
    .unwrap();

    let convert = agentport(
        &[
            "agents",
            "--source",
            src.path().to_str().unwrap(),
            "--output",
            out.path().to_str().unwrap(),
            "--create-index",
        ],
        src.path(),
    );
    assert!(convert.status.success());
    assert!(stdout(&convert).contains("Successfully converted: 1"));
    assert!(out.path().join("code-reviewer.json").exists());
    assert!(out.path().join("agents_index.md").exists());

    let validate = agentport(
        &["validate", "--agents-dir", out.path().to_str().unwrap(), "--no-cli"],
        src.path(),
    );
    assert!(validate.status.success());
    let text = stdout(&validate);
    assert!(text.contains("✓ code-reviewer.json"));
    assert!(text.contains("Total Scanned: 1\nValid: 1\nInvalid: 0"));
}

#[test]
fn invalid_artifact_fails_validation() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("extra.json"),
        r#"{"name": "e", "prompt": "p", "fooBar": 1}"#,
    )
    .unwrap();

    let output = agentport(
        &["validate", "--agents-dir", dir.path().to_str().unwrap(), "--no-cli"],
        dir.path(),
    );
    assert!(!output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Unknown fields found: fooBar"));
    assert!(text.contains("Invalid: 1"));
}
