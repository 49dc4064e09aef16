//! Check command implementation.

use anyhow::{Context, Result};
use migration_lint_core::{BatchRunner, DocumentLinter, RunOptions};

use crate::config_resolver;
use crate::{CheckArgs, OutputFormat};

/// Runs the check command and returns the process exit code.
pub fn run(args: &CheckArgs) -> Result<i32> {
    let source = config_resolver::resolve(&args.path, args.config.as_deref());
    let config = source.load()?;

    let catalog = migration_lint_rules::default_catalog().context("Invalid rule catalog")?;
    for key in config.unknown_rules(|k| catalog.get(k).is_some()) {
        tracing::warn!("Unknown rule in config: {}", key);
    }

    // Flags only switch settings on.
    let options = RunOptions::from_config(&config.linter);
    let options = RunOptions {
        strict: options.strict || args.strict,
        quiet: options.quiet || args.quiet,
        parallel: options.parallel && !args.sequential,
        ..options
    };

    let linter = DocumentLinter::new(&catalog, &config)?;
    let runner = BatchRunner::new(linter, options)?;

    tracing::info!(
        "Checking {} with {} rules",
        args.path.display(),
        catalog.len()
    );

    let result = runner.run(&args.path)?;

    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    if result.is_empty_run() {
        let note = format!("No SQL files found in {}", args.path.display());
        match format {
            OutputFormat::Text => println!("{note}"),
            OutputFormat::Json => {
                println!("{}", super::output::render_json(&result.findings)?);
                eprintln!("{note}");
            }
        }
        return Ok(0);
    }

    super::output::print(&result, format)?;

    Ok(runner.exit_code(&result))
}
