//! Static validation of agent artifacts.
//!
//! Checks run in a fixed order and collect every applicable error:
//!
//! 1. the artifact parses as a JSON object (stops here on failure)
//! 2. required fields are present
//! 3. required fields have the expected type
//! 4. no field outside the allowed set is present
//!
//! Deep validation through an [`ExternalValidator`] runs afterwards, and
//! only when the static checks passed.

use std::path::Path;

use serde_json::Value;

use crate::external::ExternalValidator;
use crate::schema::{REQUIRED_FIELDS, is_allowed};

/// Error messages for one artifact; empty means valid.
pub type ValidationResult = Vec<String>;

/// Validate already-parsed artifact data.
pub fn validate_value(data: &Value) -> ValidationResult {
    let Some(object) = data.as_object() else {
        return vec!["Artifact root must be a JSON object".to_owned()];
    };

    let mut errors = Vec::new();

    for (field, _) in REQUIRED_FIELDS {
        if !object.contains_key(*field) {
            errors.push(format!("Missing required field: '{field}'"));
        }
    }

    for (field, expected) in REQUIRED_FIELDS {
        if let Some(value) = object.get(*field)
            && !expected.matches(value)
        {
            errors.push(format!("Field '{field}' must be a {}", expected.name()));
        }
    }

    let mut unknown: Vec<&str> = object
        .keys()
        .map(String::as_str)
        .filter(|key| !is_allowed(key))
        .collect();
    if !unknown.is_empty() {
        unknown.sort_unstable();
        errors.push(format!("Unknown fields found: {}", unknown.join(", ")));
    }

    errors
}

/// Parse and validate artifact text.
pub fn validate_str(text: &str) -> ValidationResult {
    match serde_json::from_str::<Value>(text) {
        Ok(data) => validate_value(&data),
        Err(e) => vec![format!("Invalid JSON: {e}")],
    }
}

/// Read and validate an artifact file, optionally delegating to `external`
/// once the static checks pass.
pub fn validate_file(path: &Path, external: Option<&ExternalValidator>) -> ValidationResult {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => return vec![format!("Could not read file: {e}")],
    };

    let mut errors = validate_str(&text);
    if errors.is_empty()
        && let Some(validator) = external
        && let Err(message) = validator.run(path)
    {
        errors.push(message);
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn minimal_artifact_is_valid() {
        assert!(validate_value(&json!({"name": "a", "prompt": "p"})).is_empty());
    }

    #[test]
    fn single_unknown_field() {
        let errors = validate_value(&json!({"name": "a", "prompt": "p", "fooBar": 1}));
        assert_eq!(errors, vec!["Unknown fields found: fooBar"]);
    }

    #[test]
    fn unknown_fields_are_listed_together() {
        let errors = validate_value(&json!({"name": "a", "prompt": "p", "zeta": 1, "alpha": 2}));
        assert_eq!(errors, vec!["Unknown fields found: alpha, zeta"]);
    }

    #[test]
    fn missing_and_mistyped_fields_are_all_reported() {
        let errors = validate_value(&json!({"name": 5, "extra": true}));
        assert_eq!(
            errors,
            vec![
                "Missing required field: 'prompt'",
                "Field 'name' must be a string",
                "Unknown fields found: extra",
            ]
        );
    }

    #[test]
    fn every_optional_field_is_accepted() {
        let data = json!({
            "$schema": "s", "name": "a", "description": "", "prompt": "p",
            "mcpServers": {}, "tools": ["*"], "toolAliases": {}, "allowedTools": [],
            "resources": [], "hooks": {}, "toolsSettings": {}, "includeMcpJson": true,
            "useLegacyMcpJson": false, "model": "m", "temperature": 0.5
        });
        assert!(validate_value(&data).is_empty());
    }

    #[test]
    fn malformed_json_stops_early() {
        let errors = validate_str("{\"name\": ");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Invalid JSON: "));
    }

    #[test]
    fn non_object_root() {
        assert_eq!(validate_str("[1, 2]"), vec!["Artifact root must be a JSON object"]);
    }

    #[test]
    fn unreadable_file() {
        let errors = validate_file(Path::new("/nonexistent/agent.json"), None);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Could not read file: "));
    }

    #[test]
    fn external_validator_skipped_after_static_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("a.json");
        std::fs::write(&path, r#"{"name": "a"}"#).unwrap();

        let missing = ExternalValidator::new("nonexistent_validator_xyz_123");
        let errors = validate_file(&path, Some(&missing));
        assert_eq!(errors, vec!["Missing required field: 'prompt'"]);
    }

    #[test]
    fn external_validator_runs_after_static_success() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("a.json");
        std::fs::write(&path, r#"{"name": "a", "prompt": "p"}"#).unwrap();

        let missing = ExternalValidator::new("nonexistent_validator_xyz_123");
        let errors = validate_file(&path, Some(&missing));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Failed to run "));
    }
}
