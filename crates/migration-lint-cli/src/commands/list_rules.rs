//! List rules command implementation.

use anyhow::{Context, Result};
use migration_lint_core::{FILENAME_MESSAGE, FILENAME_RULE_ID};

/// Runs the list-rules command.
pub fn run() -> Result<()> {
    let catalog = migration_lint_rules::default_catalog().context("Invalid rule catalog")?;

    println!("Available rules:\n");
    println!("{:<8} {:<22} {:<9} Description", "Code", "Name", "Severity");
    println!("{}", "-".repeat(90));

    println!(
        "{:<8} {:<22} {:<9} {}",
        "-", FILENAME_RULE_ID, "error", FILENAME_MESSAGE
    );
    for rule in catalog.iter() {
        println!(
            "{:<8} {:<22} {:<9} {}",
            rule.code(),
            rule.id(),
            rule.severity().to_string(),
            rule.message()
        );
    }

    println!("\nDisable or re-grade rules by name or code in migration-lint.toml, e.g.:");
    println!("  [rules.function-version]");
    println!("  enabled = false");

    Ok(())
}
