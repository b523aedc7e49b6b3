//! Shared helpers for the CLI subcommands: tracing setup, path expansion
//! and console summaries.

use std::path::{Path, PathBuf};

use agentport_convert::ConversionStats;
use agentport_validate::ValidationSummary;
use tracing_subscriber::EnvFilter;

/// Width of the separator line printed before summaries.
const RULE_WIDTH: usize = 60;

/// Initialize the tracing subscriber with the given default log level.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

pub fn print_rule() {
    println!("\n{}", "=".repeat(RULE_WIDTH));
}

/// Print the total/succeeded/failed block for a conversion run.
pub fn print_conversion_summary(kind: &str, stats: &ConversionStats) {
    print_rule();
    println!("Conversion complete!");
    println!("Total {kind} found: {}", stats.total);
    println!("Successfully converted: {}", stats.converted);
    println!("Failed: {}", stats.failed);
    for failure in &stats.failures {
        println!("  ✗ {}: {}", failure.path.display(), failure.reason);
    }
}

/// Print the scanned/valid/invalid block for a validation run.
pub fn print_validation_summary(summary: &ValidationSummary) {
    print_rule();
    println!("Total Scanned: {}", summary.scanned);
    println!("Valid: {}", summary.valid);
    println!("Invalid: {}", summary.invalid);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_without_tilde_are_unchanged() {
        assert_eq!(expand_home(Path::new("out/agents")), PathBuf::from("out/agents"));
        assert_eq!(expand_home(Path::new("/abs/~x")), PathBuf::from("/abs/~x"));
    }

    #[test]
    fn tilde_is_replaced_when_home_is_known() {
        let expanded = expand_home(Path::new("~/.kiro/agents"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expanded, home.join(".kiro/agents"));
        } else {
            assert_eq!(expanded, PathBuf::from("~/.kiro/agents"));
        }
    }
}
