//! Configuration types for migration-lint.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::rule::Rule;
use crate::types::Severity;

/// Top-level configuration for migration-lint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Linter configuration.
    #[serde(default)]
    pub linter: LinterConfig,

    /// Per-rule configurations, keyed by rule id or code.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// An entry keyed by the rule id wins over one keyed by its code.
    fn rule_config(&self, rule: &Rule) -> Option<&RuleConfig> {
        self.rules.get(rule.id()).or_else(|| {
            self.rules
                .iter()
                .find(|(key, _)| rule.is_named(key))
                .map(|(_, config)| config)
        })
    }

    /// Checks if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule: &Rule) -> bool {
        self.rule_config(rule)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule: &Rule) -> Option<Severity> {
        self.rule_config(rule).and_then(|c| c.severity)
    }

    /// Returns configured rule keys that `known` does not recognise.
    pub fn unknown_rules<'a>(
        &'a self,
        known: impl Fn(&str) -> bool + 'a,
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.rules
            .keys()
            .map(String::as_str)
            .filter(move |key| !known(*key))
    }
}

/// Linter-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinterConfig {
    /// Let warnings fail the run.
    #[serde(default)]
    pub strict: bool,

    /// Drop warnings from the report.
    #[serde(default)]
    pub quiet: bool,

    /// Lint documents in parallel.
    #[serde(default = "default_true")]
    pub parallel: bool,

    /// File-name glob patterns skipped when linting a directory.
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for LinterConfig {
    fn default() -> Self {
        Self {
            strict: false,
            quiet: false,
            parallel: true,
            exclude: Vec::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<Severity>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}
