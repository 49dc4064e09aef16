//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

use crate::config_resolver::PROJECT_CONFIG_NAMES;

const DEFAULT_CONFIG: &str = r#"# migration-lint configuration

[linter]
# Let warnings fail the run (same as --strict)
strict = false

# Hide warnings (same as --quiet)
quiet = false

# Lint files on all cores
parallel = true

# File-name globs skipped when linting a directory
exclude = [
    # "*_draft.sql",
]

# Rule configurations
# Rules are keyed by name or code; each can be disabled or re-graded

# [rules.function-version]
# enabled = false

# [rules.insert-in-migration]
# severity = "error"

# [rules.MIG102]
# enabled = false
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new(PROJECT_CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("Created {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Edit {} to configure rules", config_path.display());
    println!("  2. Run: migration-lint check");

    Ok(())
}
