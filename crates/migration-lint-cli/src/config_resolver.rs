//! Configuration file resolution with global fallback.
//!
//! Resolves the configuration file path using a deterministic priority order:
//!
//! 1. `--config` flag (explicit path)
//! 2. `migration-lint.toml` or `.migration-lint.toml` next to the linted
//!    migrations, then in the current directory
//! 3. `~/.migration-lint/config.toml` (global fallback)
//! 4. No config found → defaults

use anyhow::{Context, Result};
use migration_lint_core::Config;
use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly specified via `--config` flag.
    Explicit(PathBuf),
    /// Found in a project directory.
    Project(PathBuf),
    /// Loaded from the global config directory (`~/.migration-lint/`).
    Global(PathBuf),
    /// No config found; defaults will be used.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Returns `true` if the config was loaded from the global directory.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }

    /// Loads the configuration this source points at.
    pub fn load(&self) -> Result<Config> {
        let Some(p) = self.path() else {
            return Ok(Config::default());
        };
        if self.is_global() {
            tracing::info!("Using global config: {}", p.display());
        }
        Config::from_file(p).with_context(|| format!("Failed to load config: {}", p.display()))
    }
}

/// Project-level config file names, checked in order.
pub const PROJECT_CONFIG_NAMES: &[&str] = &["migration-lint.toml", ".migration-lint.toml"];

/// Config file name within the global config directory.
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Environment variable overriding the global config directory.
const CONFIG_DIR_ENV: &str = "MIGRATION_LINT_CONFIG_DIR";

/// Resolves the configuration file for linting `target`.
///
/// See module-level docs for resolution order.
#[must_use]
pub fn resolve(target: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_inner(&project_dirs(target), explicit, global_config_dir())
}

/// Directories searched for a project config: the migrations directory
/// (or the file's parent), then the current directory.
fn project_dirs(target: &Path) -> Vec<PathBuf> {
    let local = if target.is_dir() {
        Some(target.to_path_buf())
    } else {
        target.parent().map(Path::to_path_buf)
    };
    let mut dirs: Vec<PathBuf> = local.into_iter().collect();
    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    dirs
}

/// Testable core: accepts `global_dir` as parameter to avoid env var races.
fn resolve_inner(
    project_dirs: &[PathBuf],
    explicit: Option<&Path>,
    global_dir: Option<PathBuf>,
) -> ConfigSource {
    // 1. Explicit path from --config flag
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    // 2. Project-level config
    for dir in project_dirs {
        for name in PROJECT_CONFIG_NAMES {
            let candidate = dir.join(name);
            if candidate.exists() {
                tracing::debug!("Found project config: {}", candidate.display());
                return ConfigSource::Project(candidate);
            }
        }
    }

    // 3. Global fallback
    if let Some(dir) = global_dir {
        let candidate = dir.join(GLOBAL_CONFIG_NAME);
        if candidate.exists() {
            tracing::debug!("Found global config: {}", candidate.display());
            return ConfigSource::Global(candidate);
        }
    }

    ConfigSource::Default
}

/// Returns the global config directory path.
///
/// Resolution: `$MIGRATION_LINT_CONFIG_DIR` > `~/.migration-lint/`
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".migration-lint"))
}
