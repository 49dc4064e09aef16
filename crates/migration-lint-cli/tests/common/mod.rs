#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the migration-lint binary, isolated
/// from any global config and colour settings.
#[macro_export]
macro_rules! migration_lint {
    ($fixture:expr) => {{
        let mut cmd =
            assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("migration-lint"));
        cmd.current_dir($fixture.path())
            .env("MIGRATION_LINT_CONFIG_DIR", $fixture.path().join(".global"))
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }};
}

/// A temporary project with a migrations directory.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    /// Creates a new fixture with an empty `migrations/` directory.
    pub fn new() -> Self {
        let fixture = Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        };
        fs::create_dir_all(fixture.migrations()).expect("Failed to create migrations dir");
        fixture
    }

    /// Returns the path to the temp directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Returns the migrations directory.
    pub fn migrations(&self) -> PathBuf {
        self.dir.path().join("migrations")
    }

    /// Writes a migration into `migrations/`.
    pub fn create_migration(&self, name: &str, content: &str) {
        fs::write(self.migrations().join(name), content).expect("Failed to write file");
    }

    /// Writes a file relative to the project root.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }
}

/// A migration that passes every rule.
pub const CLEAN: &str = "BEGIN;
CREATE TABLE tb_users (id uuid);
COMMENT ON TABLE tb_users IS 'Users';
COMMIT;
";

/// A wrapped, correctly named table without a comment (one warning).
pub const WARN_ONLY: &str = "BEGIN;\nCREATE TABLE tb_users (id uuid);\nCOMMIT;";
