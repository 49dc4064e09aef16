//! # migration-lint-core
//!
//! Rule engine for linting SQL migration files against naming and safety
//! conventions.
//!
//! This crate provides:
//!
//! - [`RuleCatalog`] of positional and whole-document [`Rule`]s, declared
//!   as [`RuleSpec`] data and compiled once
//! - [`FilenameValidator`] for the timestamped file name convention
//! - [`DocumentLinter`] producing ordered [`Finding`]s for one document
//! - [`BatchRunner`] for discovering, linting and aggregating a directory
//! - [`Scaffold`] for writing new migrations from templates
//!
//! ## Example
//!
//! ```ignore
//! use migration_lint_core::{BatchRunner, Config, DocumentLinter, RunOptions};
//!
//! let catalog = migration_lint_rules::default_catalog()?;
//! let config = Config::default();
//! let linter = DocumentLinter::new(&catalog, &config)?;
//! let runner = BatchRunner::new(linter, RunOptions::from_config(&config.linter))?;
//!
//! let result = runner.run("supabase/migrations".as_ref())?;
//! std::process::exit(runner.exit_code(&result));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod filename;
mod linter;
mod rule;
mod runner;
mod types;

pub mod matcher;
pub mod scaffold;

pub use config::{Config, ConfigError, LinterConfig, RuleConfig};
pub use filename::{FilenameValidator, FILENAME_MESSAGE, FILENAME_RULE_ID};
pub use linter::DocumentLinter;
pub use rule::{
    normalize_identifier, CatalogError, DocumentCheck, DocumentRule, PositionalRule, Rule,
    RuleCatalog, RuleClass, RuleKind, RuleSpec, NAME_GROUP,
};
pub use runner::{BatchRunner, RunOptions, RunnerError};
pub use scaffold::{MigrationKind, Scaffold, ScaffoldError};
pub use types::{Document, Finding, RunResult, Severity, EXCERPT_LEN};
