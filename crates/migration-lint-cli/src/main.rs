//! migration-lint CLI tool.
//!
//! Usage:
//! ```bash
//! migration-lint [OPTIONS] [PATH]
//! migration-lint check [OPTIONS] [PATH]
//! migration-lint list-rules
//! migration-lint init
//! migration-lint new <DESCRIPTION> [--type table|alter|function|rls|empty]
//! ```

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

use commands::new::TemplateKind;

/// Default location of Supabase migrations.
const DEFAULT_MIGRATIONS_DIR: &str = "supabase/migrations";

/// Convention linter for Supabase SQL migrations
#[derive(Parser)]
#[command(name = "migration-lint")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    check: CheckArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint migration files (the default command)
    Check(CheckArgs),

    /// List available rules
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },

    /// Create a new migration from a template
    New(NewArgs),
}

/// Arguments of the check command.
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Migration file or directory to lint
    #[arg(default_value = DEFAULT_MIGRATIONS_DIR)]
    pub path: PathBuf,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,

    /// Only show errors, not warnings
    #[arg(short, long)]
    pub quiet: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Lint files one at a time
    #[arg(long)]
    pub sequential: bool,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments of the new command.
#[derive(Args, Debug, Clone)]
pub struct NewArgs {
    /// Migration description in snake_case (e.g., add_users_table)
    pub description: String,

    /// Migration template type
    #[arg(short = 't', long = "type", value_enum, default_value_t)]
    pub kind: TemplateKind,

    /// Migrations directory
    #[arg(short, long, default_value = DEFAULT_MIGRATIONS_DIR)]
    pub dir: PathBuf,

    /// Author name for migration header
    #[arg(short, long, default_value = "")]
    pub author: String,

    /// Print the migration without creating the file
    #[arg(long)]
    pub dry_run: bool,
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose { "debug" } else { "warn" })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<u8> {
    match cli.command {
        None => check(&cli.check),
        Some(Commands::Check(args)) => check(&args),
        Some(Commands::ListRules) => commands::list_rules::run().map(|()| 0),
        Some(Commands::Init { force }) => commands::init::run(force).map(|()| 0),
        Some(Commands::New(args)) => commands::new::run(&args).map(|()| 0),
    }
}

fn check(args: &CheckArgs) -> Result<u8> {
    let code = commands::check::run(args)?;
    Ok(u8::try_from(code).unwrap_or(1))
}
