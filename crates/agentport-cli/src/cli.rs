//! CLI argument definitions for agentport.
//!
//! All `clap` structures live here so that `main.rs` stays focused on
//! dispatching subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// agentport -- bring Claude Code agents and skills to Kiro.
#[derive(Parser)]
#[command(
    name = "agentport",
    version,
    about = "Convert Claude Code agents and skills to Kiro and validate the results",
    long_about = "Converts Claude Code agent markdown into Kiro agent JSON, Anthropic skills \
                  into Kiro powers, and validates Kiro agent definitions."
)]
pub struct Cli {
    /// Configuration file (TOML).
    #[arg(long, global = true, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert Claude Code agents (plugins/*/agents/*.md) to Kiro agent JSON.
    Agents {
        /// Path to the agents repository checkout.
        #[arg(long, short)]
        source: PathBuf,

        /// Output directory for Kiro agents (default: ~/.kiro/agents).
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Show what would be converted without writing files.
        #[arg(long)]
        dry_run: bool,

        /// Write agents_index.md listing all converted agents.
        #[arg(long)]
        create_index: bool,
    },

    /// Convert skill directories (SKILL.md) to Kiro powers.
    Skills {
        /// Directory searched recursively for SKILL.md files.
        #[arg(long, short)]
        source: PathBuf,

        /// Output directory for powers (default: ./powers).
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Preview the conversion without creating files.
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate Kiro agent JSON files.
    Validate {
        /// Directory containing agent JSON files (default: .kiro/agents).
        #[arg(long)]
        agents_dir: Option<PathBuf>,

        /// Skip kiro-cli validation (static checks only).
        #[arg(long)]
        no_cli: bool,
    },
}
