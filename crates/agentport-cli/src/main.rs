//! CLI entry point for agentport.
//!
//! This binary provides the `agentport` command with subcommands for
//! converting Claude Code agents, converting skills to powers, and
//! validating Kiro agent definitions.

mod cli;
mod config;
mod helpers;

use std::path::PathBuf;
use std::process::ExitCode;

use agentport_convert::{
    AgentConvertOptions, ConversionStats, ConvertError, SkillConvertOptions, agent_output_path,
    convert_agents, convert_skills, write_agent_index,
};
use agentport_validate::{
    ExternalValidator, ValidateError, ValidateOptions, ValidationSummary, validate_dir,
};
use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;

use crate::cli::{Cli, Commands};
use crate::config::{AppConfig, load_config};
use crate::helpers::{
    expand_home, init_tracing, print_conversion_summary, print_rule, print_validation_summary,
};

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(if cli.verbose { "debug" } else { "warn" });

    let config = load_config(&cli.config);

    let result = match cli.command {
        Commands::Agents {
            source,
            output,
            dry_run,
            create_index,
        } => cmd_agents(&config, source, output, dry_run, create_index),
        Commands::Skills {
            source,
            output,
            dry_run,
        } => cmd_skills(&config, source, output, dry_run),
        Commands::Validate { agents_dir, no_cli } => cmd_validate(&config, agents_dir, no_cli),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

// ---------------------------------------------------------------------------
// Subcommand: agents
// ---------------------------------------------------------------------------

fn cmd_agents(
    config: &AppConfig,
    source: PathBuf,
    output: Option<PathBuf>,
    dry_run: bool,
    create_index: bool,
) -> Result<ExitCode> {
    let output = expand_home(&output.unwrap_or_else(|| config.convert.agents_output.clone()));
    let opts = AgentConvertOptions {
        source,
        output,
        dry_run,
        schema: config.convert.schema.clone(),
    };

    println!("Converting agents from {}", opts.source.display());
    println!("Output directory: {}", opts.output.display());
    println!("Dry run: {dry_run}\n");

    let stats = match convert_agents(&opts) {
        Ok(stats) => stats,
        Err(e) => return Ok(report_environment_error("agents", &e)),
    };

    for name in &stats.converted_names {
        let path = agent_output_path(&opts.output, name);
        if dry_run {
            println!("  ✓ {name}: would save to {}", path.display());
        } else {
            println!("  ✓ {name}: saved to {}", path.display());
        }
    }
    print_conversion_summary("agents", &stats);

    if create_index && !dry_run {
        let index = write_agent_index(&opts.output).context("failed to create agent index")?;
        println!("\nCreated index at {}", index.display());
    }

    if stats.converted > 0 {
        print_rule();
        println!("Next steps:");
        println!("1. Review the converted agents in {}", opts.output.display());
        println!("2. Test an agent: kiro-cli chat --agent <agent-name>");
        println!("3. List all agents: kiro-cli agent list");
        println!("4. Validate them: agentport validate --agents-dir {}", opts.output.display());
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

// ---------------------------------------------------------------------------
// Subcommand: skills
// ---------------------------------------------------------------------------

fn cmd_skills(
    config: &AppConfig,
    source: PathBuf,
    output: Option<PathBuf>,
    dry_run: bool,
) -> Result<ExitCode> {
    let output = expand_home(&output.unwrap_or_else(|| config.convert.powers_output.clone()));
    let opts = SkillConvertOptions {
        source,
        output,
        dry_run,
    };

    let (stats, outputs) = match convert_skills(&opts) {
        Ok(result) => result,
        Err(e) => return Ok(report_environment_error("skills", &e)),
    };
    println!("Found {} skills to convert\n", stats.total);

    for out in &outputs {
        if dry_run {
            println!("  Would create: {}/POWER.md", out.power_dir.display());
            println!("    Keywords: {}", out.power.keywords.join(", "));
        } else {
            println!("  ✓ {} → {}", out.power.display_name, out.power_dir.display());
        }
        if !out.supplementary.is_empty() {
            println!("    {} supplementary files → steering/", out.supplementary.len());
        }
    }
    print_conversion_summary("skills", &stats);

    if !dry_run {
        println!("Powers saved to: {}", opts.output.display());
    }

    Ok(if stats.converted > 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

// ---------------------------------------------------------------------------
// Subcommand: validate
// ---------------------------------------------------------------------------

fn cmd_validate(config: &AppConfig, agents_dir: Option<PathBuf>, no_cli: bool) -> Result<ExitCode> {
    let agents_dir = expand_home(&agents_dir.unwrap_or_else(|| config.validate.agents_dir.clone()));
    let binary = config.validate.binary.as_str();

    let external = if no_cli {
        println!("Skipping {binary} validation (--no-cli specified)");
        None
    } else if !config.validate.deep {
        println!("Skipping {binary} validation (disabled in config)");
        None
    } else {
        let detected = ExternalValidator::detect(binary);
        match &detected {
            Some(_) => println!("✓ {binary} found. Performing full validation."),
            None => println!("⚠ {binary} not found in PATH. Skipping CLI validation."),
        }
        detected
    };

    println!("\nValidating agents in: {}\n", agents_dir.display());

    let summary = match validate_dir(&ValidateOptions {
        agents_dir,
        external,
    }) {
        Ok(summary) => summary,
        Err(e @ (ValidateError::DirNotFound { .. } | ValidateError::NoArtifacts { .. })) => {
            println!("✗ {e}");
            print_validation_summary(&ValidationSummary::default());
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e).context("validation run failed"),
    };

    for report in &summary.reports {
        if report.is_valid() {
            println!("✓ {}", report.file_name());
        } else {
            println!("✗ {}", report.file_name());
            for err in &report.errors {
                println!("    - {err}");
            }
        }
    }

    print_validation_summary(&summary);

    if summary.all_valid() {
        println!("\nAll agents valid!");
        Ok(ExitCode::SUCCESS)
    } else {
        println!("\nValidation failed for some agents.");
        Ok(ExitCode::FAILURE)
    }
}

// ---------------------------------------------------------------------------
// Shared reporting
// ---------------------------------------------------------------------------

/// Report a run-level failure, still printing an (empty) summary.
fn report_environment_error(kind: &str, err: &ConvertError) -> ExitCode {
    println!("✗ {err}");
    if let ConvertError::SourceNotFound { .. } = err
        && kind == "agents"
    {
        println!("\nTo clone wshobson/agents:");
        println!("  git clone https://github.com/wshobson/agents.git");
    }
    print_conversion_summary(kind, &ConversionStats::default());
    ExitCode::FAILURE
}
