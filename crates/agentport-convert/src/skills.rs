//! Skill-to-power conversion.
//!
//! Skills are directories holding a `SKILL.md` plus optional companion
//! files. Each becomes `<output>/power-<id>/POWER.md`; companion files are
//! copied unchanged into `<output>/power-<id>/steering/`.

use std::path::{Path, PathBuf};

use crate::agents::sorted_entries;
use crate::error::{ConvertError, Result};
use crate::frontmatter::{HeaderFlavor, parse_document};
use crate::mapper::map_power;
use crate::types::{ConversionStats, PowerDocument};

/// Primary file of a skill directory.
pub const SKILL_FILE: &str = "SKILL.md";

/// Primary file of a power directory.
pub const POWER_FILE: &str = "POWER.md";

/// Subdirectory receiving a skill's companion files.
pub const STEERING_DIR: &str = "steering";

/// Settings for one skill conversion run.
#[derive(Debug, Clone)]
pub struct SkillConvertOptions {
    pub source: PathBuf,
    pub output: PathBuf,
    pub dry_run: bool,
}

/// A converted skill and where it went.
#[derive(Debug, Clone)]
pub struct PowerOutput {
    pub power: PowerDocument,
    pub power_dir: PathBuf,
    /// Companion files copied (or, in a dry run, to be copied).
    pub supplementary: Vec<PathBuf>,
}

/// Find every directory below `source` containing a `SKILL.md`, sorted.
///
/// Only a failure to list `source` itself is an error. Subdirectories that
/// cannot be listed are skipped with a warning.
pub fn discover_skill_dirs(source: &Path) -> Result<Vec<PathBuf>> {
    discover_with(source, &sorted_entries)
}

fn discover_with(
    source: &Path,
    list: &dyn Fn(&Path) -> Result<Vec<PathBuf>>,
) -> Result<Vec<PathBuf>> {
    let entries = list(source)?;
    let mut dirs = Vec::new();
    collect_skill_dirs(source, entries, list, &mut dirs);
    dirs.sort();
    Ok(dirs)
}

fn collect_skill_dirs(
    dir: &Path,
    entries: Vec<PathBuf>,
    list: &dyn Fn(&Path) -> Result<Vec<PathBuf>>,
    out: &mut Vec<PathBuf>,
) {
    if dir.join(SKILL_FILE).is_file() {
        out.push(dir.to_path_buf());
    }
    for path in entries {
        if !path.is_dir() || path.is_symlink() {
            continue;
        }
        match list(&path) {
            Ok(children) => collect_skill_dirs(&path, children, list, out),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable directory");
            }
        }
    }
}

/// Build the power for one skill directory without touching the output.
pub fn build_power(skill_dir: &Path, source_root: &Path) -> Result<PowerDocument> {
    let skill_md = skill_dir.join(SKILL_FILE);
    let content = std::fs::read_to_string(&skill_md).map_err(|e| ConvertError::io(&skill_md, e))?;
    let parsed = parse_document(&content, HeaderFlavor::Flat);

    let dir_name = skill_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| ConvertError::UnnamedDocument {
            path: skill_dir.to_path_buf(),
        })?;
    let rel_path = skill_dir.strip_prefix(source_root).ok();

    Ok(map_power(&dir_name, &parsed, rel_path))
}

/// Companion files of a skill: every regular file except `SKILL.md`.
pub fn supplementary_files(skill_dir: &Path) -> Result<Vec<PathBuf>> {
    Ok(sorted_entries(skill_dir)?
        .into_iter()
        .filter(|p| p.is_file() && p.file_name().is_some_and(|n| n != SKILL_FILE))
        .collect())
}

/// Convert one skill directory into a power directory under `output`.
pub fn convert_skill(
    skill_dir: &Path,
    source_root: &Path,
    output: &Path,
    dry_run: bool,
) -> Result<PowerOutput> {
    let power = build_power(skill_dir, source_root)?;
    let power_dir = output.join(power.dir_name());
    let supplementary = supplementary_files(skill_dir)?;

    if !dry_run {
        std::fs::create_dir_all(&power_dir).map_err(|e| ConvertError::io(&power_dir, e))?;
        let power_md = power_dir.join(POWER_FILE);
        std::fs::write(&power_md, power.render()).map_err(|e| ConvertError::io(&power_md, e))?;

        if !supplementary.is_empty() {
            let steering = power_dir.join(STEERING_DIR);
            std::fs::create_dir_all(&steering).map_err(|e| ConvertError::io(&steering, e))?;
            for file in &supplementary {
                let Some(file_name) = file.file_name() else {
                    continue;
                };
                let dest = steering.join(file_name);
                std::fs::copy(file, &dest).map_err(|e| ConvertError::io(&dest, e))?;
            }
        }
    }

    Ok(PowerOutput {
        power,
        power_dir,
        supplementary,
    })
}

/// Convert every skill found below `opts.source`.
///
/// Returns the stats and the successful outputs in processing order.
pub fn convert_skills(opts: &SkillConvertOptions) -> Result<(ConversionStats, Vec<PowerOutput>)> {
    if !opts.source.exists() {
        return Err(ConvertError::SourceNotFound {
            path: opts.source.clone(),
        });
    }

    let dirs = discover_skill_dirs(&opts.source)?;
    if dirs.is_empty() {
        return Err(ConvertError::NoDocuments {
            path: opts.source.clone(),
        });
    }
    tracing::info!(count = dirs.len(), source = %opts.source.display(), "skills found");

    if !opts.dry_run {
        std::fs::create_dir_all(&opts.output).map_err(|e| ConvertError::io(&opts.output, e))?;
    }

    let mut stats = ConversionStats::with_total(dirs.len());
    let mut outputs = Vec::with_capacity(dirs.len());
    for dir in &dirs {
        match convert_skill(dir, &opts.source, &opts.output, opts.dry_run) {
            Ok(out) => {
                tracing::info!(
                    skill = %out.power.display_name,
                    power = %out.power_dir.display(),
                    supplementary = out.supplementary.len(),
                    "skill converted"
                );
                stats.record_success(out.power.identifier.clone());
                outputs.push(out);
            }
            Err(e) => {
                tracing::warn!(path = %dir.display(), error = %e, "failed to convert skill");
                stats.record_failure(dir, e.to_string());
            }
        }
    }

    Ok((stats, outputs))
}
