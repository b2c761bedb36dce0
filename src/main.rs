//! classmerge CLI
//!
//! Entry point for the `classmerge` command-line tool.

use clap::{Args, Parser, Subcommand};
use classmerge::config::{project_config_path, EffectiveConfig};
use classmerge::{ClassInput, ClassMerger, ClassPattern, ValueKind};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "classmerge")]
#[command(about = "Merge CSS class lists with utility override rules", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Family table selection shared by every command.
#[derive(Args)]
struct TableArgs {
    /// Path to project config file (default: .classmerge.toml)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Class prefix every utility carries (e.g. tw-)
    #[arg(long)]
    prefix: Option<String>,

    /// Variant separator (default: ":")
    #[arg(long)]
    separator: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge class inputs and print the result
    Merge {
        /// Parse each input as JSON (string, null, bool, array or object of booleans)
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        table: TableArgs,

        /// Class inputs (after --)
        #[arg(last = true)]
        inputs: Vec<String>,
    },

    /// Explain which tokens survive a merge and why
    Explain {
        /// Output in human-readable format instead of JSON
        #[arg(long)]
        human: bool,

        /// Parse each input as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        table: TableArgs,

        /// Class inputs (after --)
        #[arg(last = true)]
        inputs: Vec<String>,
    },

    /// List the effective utility families
    Families {
        /// Output in JSON format
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        table: TableArgs,
    },

    /// Verify the project configuration
    Verify {
        /// Path to project config file (default: .classmerge.toml)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,
    },

    /// Print the effective configuration with its sources
    Config {
        #[command(flatten)]
        table: TableArgs,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "classmerge=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Merge {
            json,
            table,
            inputs,
        } => {
            run_merge(json, &table, &inputs);
        }
        Commands::Explain {
            human,
            json,
            table,
            inputs,
        } => {
            run_explain(human, json, &table, &inputs);
        }
        Commands::Families { json, table } => {
            run_families(json, &table);
        }
        Commands::Verify { config } => {
            run_verify(config);
        }
        Commands::Config { table } => {
            run_config(&table);
        }
    }
}

fn run_merge(json: bool, table: &TableArgs, inputs: &[String]) {
    let merger = exit_on_error("Error loading config", load_merger(table));
    let inputs = exit_on_error("Invalid input", parse_inputs(json, inputs));

    println!("{}", merger.merge(&inputs));
}

fn run_explain(human: bool, json: bool, table: &TableArgs, inputs: &[String]) {
    let merger = exit_on_error("Error loading config", load_merger(table));
    let inputs = exit_on_error("Invalid input", parse_inputs(json, inputs));

    let explanation = merger.explain(&inputs);

    if human {
        println!("{}", explanation.to_human());
    } else {
        let json = exit_on_error("Error serializing output", explanation.to_json());
        println!("{}", json);
    }
}

fn run_families(json: bool, table: &TableArgs) {
    let effective = exit_on_error("Error loading config", load_effective(table));
    let config = &effective.config;

    if json {
        let json = exit_on_error(
            "Error serializing output",
            serde_json::to_string_pretty(config),
        );
        println!("{}", json);
        return;
    }

    let enabled = config.enabled_families().count();
    println!(
        "Utility families ({} enabled, {} total):\n",
        enabled,
        config.families.len()
    );

    for (id, family) in &config.families {
        let marker = if family.disabled { " (disabled)" } else { "" };
        println!("  {}{}", id, marker);
        let patterns: Vec<String> = family.classes.iter().map(describe_pattern).collect();
        println!("    Classes: {}", patterns.join(", "));
        if !family.conflicts.is_empty() {
            println!("    Overrides: {}", family.conflicts.join(", "));
        }
    }
}

fn describe_pattern(pattern: &ClassPattern) -> String {
    match pattern {
        ClassPattern::Exact { class } => class.clone(),
        ClassPattern::Prefixed { prefix, value } => match value {
            ValueKind::Keywords(words) => format!("{}-{{{}}}", prefix, words.join("|")),
            other => {
                let kind = serde_json::to_value(other)
                    .ok()
                    .and_then(|v| v.as_str().map(str::to_string))
                    .unwrap_or_else(|| "?".to_string());
                format!("{}-<{}>", prefix, kind)
            }
        },
    }
}

fn run_verify(config_path: Option<PathBuf>) {
    let path = config_path.unwrap_or_else(|| project_config_path(Path::new(".")));

    match EffectiveConfig::load(Some(&path), Path::new("."), None) {
        Ok(effective) => {
            let config = &effective.config;
            println!("Configuration valid: {}", path.display());
            println!();
            if let Some(ref prefix) = config.prefix {
                println!("  Prefix: {}", prefix);
            }
            println!("  Separator: {}", config.separator);
            println!(
                "  Families: {} enabled, {} total",
                config.enabled_families().count(),
                config.families.len()
            );
            println!("  Fingerprint: {}", effective.table_fingerprint);
        }
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(1);
        }
    }
}

fn run_config(table: &TableArgs) {
    let effective = exit_on_error("Error loading config", load_effective(table));
    let json = exit_on_error("Error serializing output", effective.to_json());
    println!("{}", json);
}

fn load_effective(table: &TableArgs) -> Result<EffectiveConfig, String> {
    let cli = EffectiveConfig::cli_overrides(table.prefix.as_deref(), table.separator.as_deref());
    EffectiveConfig::load(table.config.as_deref(), Path::new("."), cli).map_err(|e| e.to_string())
}

fn load_merger(table: &TableArgs) -> Result<ClassMerger, String> {
    load_effective(table)?.merger().map_err(|e| e.to_string())
}

fn parse_inputs(json: bool, inputs: &[String]) -> Result<Vec<ClassInput>, String> {
    if !json {
        return Ok(inputs.iter().map(ClassInput::from).collect());
    }

    inputs
        .iter()
        .map(|raw| {
            serde_json::from_str::<serde_json::Value>(raw)
                .map(ClassInput::from)
                .map_err(|e| format!("'{}' is not JSON: {}", raw, e))
        })
        .collect()
}

fn exit_on_error<T, E: std::fmt::Display>(context: &str, result: Result<T, E>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            eprintln!("{}: {}", context, e);
            process::exit(1);
        }
    }
}
