//! Validation of a whole directory of agent artifacts.

use std::path::{Path, PathBuf};

use crate::error::{Result, ValidateError};
use crate::external::ExternalValidator;
use crate::validator::{ValidationResult, validate_file};

/// JSON files in an agents directory that are not agent definitions.
pub const SKIPPED_FILES: &[&str] = &["INDEX.json"];

/// Settings for one validation run.
#[derive(Debug, Clone)]
pub struct ValidateOptions {
    pub agents_dir: PathBuf,
    /// Deep validation backend; `None` runs static checks only.
    pub external: Option<ExternalValidator>,
}

/// Outcome for one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub errors: ValidationResult,
}

impl FileReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Totals for a validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationSummary {
    pub scanned: usize,
    pub valid: usize,
    pub invalid: usize,
    pub reports: Vec<FileReport>,
}

impl ValidationSummary {
    pub fn all_valid(&self) -> bool {
        self.invalid == 0
    }
}

/// Agent artifacts in `dir`: `*.json`, sorted, minus [`SKIPPED_FILES`].
pub fn discover_artifacts(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|source| ValidateError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|source| ValidateError::Io {
                path: dir.to_path_buf(),
                source,
            })?
            .path();
        let is_json = path.extension().is_some_and(|e| e == "json");
        let skipped = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| SKIPPED_FILES.contains(&n));
        if path.is_file() && is_json && !skipped {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Validate every artifact in `opts.agents_dir`.
///
/// Each file is checked independently; a missing directory or an empty
/// one fails the run.
pub fn validate_dir(opts: &ValidateOptions) -> Result<ValidationSummary> {
    if !opts.agents_dir.is_dir() {
        return Err(ValidateError::DirNotFound {
            path: opts.agents_dir.clone(),
        });
    }

    let files = discover_artifacts(&opts.agents_dir)?;
    if files.is_empty() {
        return Err(ValidateError::NoArtifacts {
            path: opts.agents_dir.clone(),
        });
    }

    let mut summary = ValidationSummary {
        scanned: files.len(),
        ..ValidationSummary::default()
    };

    for path in files {
        let errors = validate_file(&path, opts.external.as_ref());
        if errors.is_empty() {
            summary.valid += 1;
        } else {
            tracing::warn!(path = %path.display(), errors = errors.len(), "artifact invalid");
            summary.invalid += 1;
        }
        summary.reports.push(FileReport { path, errors });
    }

    tracing::info!(
        scanned = summary.scanned,
        valid = summary.valid,
        invalid = summary.invalid,
        "validation finished"
    );
    Ok(summary)
}
