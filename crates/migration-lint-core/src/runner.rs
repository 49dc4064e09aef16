//! Batch execution over a migrations directory.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::LinterConfig;
use crate::linter::DocumentLinter;
use crate::types::{Document, Finding, RunResult, Severity};

/// Errors that abort a run before any document is linted.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// The target path does not exist.
    #[error("{} not found", path.display())]
    PathNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// An exclude pattern or the discovery pattern is invalid.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),
}

/// Options controlling a batch run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Let warnings fail the run.
    pub strict: bool,
    /// Drop warnings before counting and reporting.
    pub quiet: bool,
    /// Lint documents on the rayon pool.
    pub parallel: bool,
    /// File-name glob patterns to skip during discovery.
    pub exclude: Vec<String>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            strict: false,
            quiet: false,
            parallel: true,
            exclude: Vec::new(),
        }
    }
}

impl RunOptions {
    /// Creates options with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds options from the `[linter]` table of a configuration.
    #[must_use]
    pub fn from_config(linter: &LinterConfig) -> Self {
        Self {
            strict: linter.strict,
            quiet: linter.quiet,
            parallel: linter.parallel,
            exclude: linter.exclude.clone(),
        }
    }

    /// Sets strict mode.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sets quiet mode.
    #[must_use]
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Sets parallel linting.
    #[must_use]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Adds an exclude pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude.push(pattern.into());
        self
    }
}

/// Discovers migration documents, lints each, and aggregates the results.
#[derive(Debug)]
pub struct BatchRunner<'a> {
    linter: DocumentLinter<'a>,
    options: RunOptions,
    exclude: Vec<glob::Pattern>,
}

impl<'a> BatchRunner<'a> {
    /// Creates a runner.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Glob`] if an exclude pattern is invalid.
    pub fn new(linter: DocumentLinter<'a>, options: RunOptions) -> Result<Self, RunnerError> {
        let exclude = options
            .exclude
            .iter()
            .map(|p| glob::Pattern::new(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            linter,
            options,
            exclude,
        })
    }

    /// Lints every document under `path` and aggregates the findings.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` does not exist or discovery fails.
    pub fn run(&self, path: &Path) -> Result<RunResult, RunnerError> {
        info!("Starting run at {}", path.display());

        let files = self.discover(path)?;
        info!("Found {} migration files", files.len());

        let result = self.lint_files(&files);

        info!(
            "Run complete: {} errors, {} warnings in {} files",
            result.error_count(),
            result.warning_count(),
            result.file_count
        );
        Ok(result)
    }

    /// Lists the documents a run over `path` would lint, sorted by file name.
    ///
    /// A file path is taken as-is; a directory contributes its immediate
    /// `*.sql` children minus excluded names.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` does not exist or the pattern is invalid.
    pub fn discover(&self, path: &Path) -> Result<Vec<PathBuf>, RunnerError> {
        if !path.exists() {
            return Err(RunnerError::PathNotFound {
                path: path.to_path_buf(),
            });
        }
        if path.is_file() {
            return Ok(vec![path.to_path_buf()]);
        }

        let dir = glob::Pattern::escape(&path.to_string_lossy());
        let pattern = format!("{dir}/*.sql");
        let mut files = Vec::new();

        for entry in glob::glob(&pattern)? {
            let path = match entry {
                Ok(path) => path,
                // Unreadable entries still count and fail at read time.
                Err(e) => e.path().to_path_buf(),
            };

            if self.should_exclude(&path) {
                debug!("Excluding: {}", path.display());
                continue;
            }

            files.push(path);
        }

        files.sort_by_cached_key(|p| Document::name_for(p));
        Ok(files)
    }

    /// Lints already-discovered files, preserving their order.
    #[must_use]
    pub fn lint_files(&self, files: &[PathBuf]) -> RunResult {
        let per_file: Vec<Vec<Finding>> = if self.options.parallel {
            files.par_iter().map(|p| self.lint_file(p)).collect()
        } else {
            files.iter().map(|p| self.lint_file(p)).collect()
        };

        let mut result = RunResult::new();
        result.file_count = files.len();
        result.findings = per_file.into_iter().flatten().collect();
        if self.options.quiet {
            result.drop_warnings();
        }
        result
    }

    /// Exit code for a result under the current options.
    #[must_use]
    pub fn exit_code(&self, result: &RunResult) -> i32 {
        result.exit_code(self.options.strict)
    }

    fn lint_file(&self, path: &Path) -> Vec<Finding> {
        let name = Document::name_for(path);
        match std::fs::read_to_string(path) {
            Ok(text) => self.linter.lint(&Document::new(name, text)),
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                vec![Finding::new(
                    name,
                    0,
                    Severity::Error,
                    format!("Failed to read file: {e}"),
                )]
            }
        }
    }

    /// Checks a file name against the exclude patterns.
    fn should_exclude(&self, path: &Path) -> bool {
        let name = Document::name_for(path);
        self.exclude.iter().any(|p| p.matches(&name))
    }
}
