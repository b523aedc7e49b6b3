//! Deep validation through the Kiro CLI's own validator.
//!
//! The call is synchronous and has no timeout: a hung validator blocks
//! only the artifact being checked.

use std::path::Path;
use std::process::{Command, Stdio};

/// Binary invoked when none is configured.
pub const DEFAULT_BINARY: &str = "kiro-cli";

/// Handle on an external `agent validate` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalValidator {
    binary: String,
}

impl ExternalValidator {
    /// Use `binary` without checking that it exists.
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Use `binary` if it can be found on `PATH`.
    pub fn detect(binary: &str) -> Option<Self> {
        if binary_exists(binary) {
            tracing::debug!(binary = %binary, "external validator found");
            Some(Self::new(binary))
        } else {
            tracing::debug!(binary = %binary, "external validator not on PATH");
            None
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Validate one artifact.
    ///
    /// Returns the validator's diagnostic as the error message when it
    /// exits non-zero or cannot be started.
    pub fn run(&self, path: &Path) -> std::result::Result<(), String> {
        let output = Command::new(&self.binary)
            .args(["agent", "validate", "--path"])
            .arg(path)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| format!("Failed to run {}: {e}", self.binary))?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        let message = match stderr.trim() {
            "" => stdout.trim(),
            err => err,
        };
        tracing::debug!(
            path = %path.display(),
            status = ?output.status.code(),
            "external validation failed"
        );
        Err(format!("Kiro CLI validation failed: {message}"))
    }
}

/// Check if a binary is available on PATH.
fn binary_exists(name: &str) -> bool {
    Command::new("which")
        .arg(name)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}
