//! Core types for migration findings and run results.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Maximum number of characters of matched text kept as an excerpt.
pub const EXCERPT_LEN: usize = 50;

/// Severity level for findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Advisory finding; only fails the run in strict mode.
    Warning,
    /// Blocking finding that must be fixed.
    Error,
}

impl Severity {
    /// Upper-case label used in human-readable reports.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// One reported convention violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Document name (file name, not the full path).
    pub file: String,
    /// 1-indexed line of the match start, or 0 for document-scoped findings.
    pub line: usize,
    /// Severity of this finding.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// First characters of the matched text for positional findings.
    #[serde(rename = "match", default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
}

impl Finding {
    /// Creates a new finding without an excerpt.
    #[must_use]
    pub fn new(
        file: impl Into<String>,
        line: usize,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            line,
            severity,
            message: message.into(),
            excerpt: None,
        }
    }

    /// Attaches an excerpt, truncated to [`EXCERPT_LEN`] characters.
    #[must_use]
    pub fn with_excerpt(mut self, matched: &str) -> Self {
        self.excerpt = Some(matched.chars().take(EXCERPT_LEN).collect());
        self
    }

    /// Returns true when the finding is not tied to a line.
    #[must_use]
    pub fn is_document_scoped(&self) -> bool {
        self.line == 0
    }
}

impl std::fmt::Display for Finding {
    /// `<file>[:<line>]: [<SEVERITY>] <message>[ (<excerpt>)]`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.file)?;
        if !self.is_document_scoped() {
            write!(f, ":{}", self.line)?;
        }
        write!(f, ": [{}] {}", self.severity.label(), self.message)?;
        if let Some(excerpt) = &self.excerpt {
            write!(f, " ({excerpt})")?;
        }
        Ok(())
    }
}

/// One migration file under evaluation.
#[derive(Debug, Clone)]
pub struct Document {
    /// File name used in findings.
    pub name: String,
    /// Raw file contents.
    pub text: String,
}

impl Document {
    /// Creates a document from a name and its text.
    #[must_use]
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Derives the reported name from a path (its final component).
    #[must_use]
    pub fn name_for(path: &Path) -> String {
        path.file_name().map_or_else(
            || path.to_string_lossy().into_owned(),
            |n| n.to_string_lossy().into_owned(),
        )
    }
}

/// Aggregate result of one batch run.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RunResult {
    /// All findings, in discovery order.
    pub findings: Vec<Finding>,
    /// Number of documents discovered.
    pub file_count: usize,
}

impl RunResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of error-severity findings.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    /// Number of warning-severity findings.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(|f| f.severity == Severity::Error)
    }

    /// Returns true when no documents were discovered.
    #[must_use]
    pub fn is_empty_run(&self) -> bool {
        self.file_count == 0
    }

    /// Drops warning-severity findings (quiet mode).
    pub fn drop_warnings(&mut self) {
        self.findings.retain(|f| f.severity == Severity::Error);
    }

    /// Process exit code for this result.
    ///
    /// Non-zero when any error is present, or when `strict` is set and any
    /// warning is present.
    #[must_use]
    pub fn exit_code(&self, strict: bool) -> i32 {
        if self.has_errors() || (strict && self.warning_count() > 0) {
            1
        } else {
            0
        }
    }

    /// One-line summary: `<n> file(s) checked: <e> error(s), <w> warning(s)`.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} file(s) checked: {} error(s), {} warning(s)",
            self.file_count,
            self.error_count(),
            self.warning_count()
        )
    }
}
