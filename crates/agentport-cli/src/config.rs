//! Configuration loaded from `config/default.toml`.
//!
//! ```toml
//! [convert]
//! agents_output = "~/.kiro/agents"
//! powers_output = "./powers"
//! schema = "https://example.com/agent-v1.json"
//!
//! [validate]
//! agents_dir = ".kiro/agents"
//! binary = "kiro-cli"
//! deep = true
//! ```
//!
//! A missing file, section or key falls back to the defaults below.

use std::path::{Path, PathBuf};

use agentport_validate::DEFAULT_BINARY;

/// Settings from the `[convert]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertConfig {
    pub agents_output: PathBuf,
    pub powers_output: PathBuf,
    /// Emitted as `$schema` in every agent artifact.
    pub schema: Option<String>,
}

/// Settings from the `[validate]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidateConfig {
    pub agents_dir: PathBuf,
    pub binary: String,
    /// Use the external validator when it is installed.
    pub deep: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub convert: ConvertConfig,
    pub validate: ValidateConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            convert: ConvertConfig {
                agents_output: PathBuf::from("~/.kiro/agents"),
                powers_output: PathBuf::from("./powers"),
                schema: None,
            },
            validate: ValidateConfig {
                agents_dir: PathBuf::from(".kiro/agents"),
                binary: DEFAULT_BINARY.to_owned(),
                deep: true,
            },
        }
    }
}

/// Load configuration from `path`.
///
/// Falls back to defaults if the file is missing or unparseable.
pub fn load_config(path: &Path) -> AppConfig {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return AppConfig::default();
        }
    };

    match content.parse::<toml::Table>() {
        Ok(table) => from_table(&table),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "invalid config file, using defaults");
            AppConfig::default()
        }
    }
}

fn from_table(table: &toml::Table) -> AppConfig {
    let defaults = AppConfig::default();
    let empty = toml::Table::new();

    let convert = match table.get("convert") {
        Some(toml::Value::Table(t)) => t,
        _ => &empty,
    };
    let validate = match table.get("validate") {
        Some(toml::Value::Table(t)) => t,
        _ => &empty,
    };

    AppConfig {
        convert: ConvertConfig {
            agents_output: get_path(convert, "agents_output")
                .unwrap_or(defaults.convert.agents_output),
            powers_output: get_path(convert, "powers_output")
                .unwrap_or(defaults.convert.powers_output),
            schema: convert
                .get("schema")
                .and_then(|v| v.as_str())
                .map(str::to_owned),
        },
        validate: ValidateConfig {
            agents_dir: get_path(validate, "agents_dir").unwrap_or(defaults.validate.agents_dir),
            binary: validate
                .get("binary")
                .and_then(|v| v.as_str())
                .map(str::to_owned)
                .unwrap_or(defaults.validate.binary),
            deep: validate
                .get("deep")
                .and_then(|v| v.as_bool())
                .unwrap_or(defaults.validate.deep),
        },
    }
}

fn get_path(table: &toml::Table, key: &str) -> Option<PathBuf> {
    table.get(key).and_then(|v| v.as_str()).map(PathBuf::from)
}
