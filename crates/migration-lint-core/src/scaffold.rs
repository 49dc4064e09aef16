//! Scaffolding of new, convention-conforming migration files.
//!
//! A scaffold renders one of five templates for a snake_case description
//! and names the file `<YYYYMMDDHHMMSS>_<description>.sql`.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use thiserror::Error;
use tracing::debug;

/// Verbs stripped from the front of a description to get the identifier stem.
const VERB_PREFIXES: &[&str] = &["add_", "create_", "update_", "modify_", "remove_", "delete_"];

/// Object nouns stripped from the end of a description.
const NOUN_SUFFIXES: &[&str] = &["_table", "_fn", "_function", "_trigger", "_policy", "_index"];

/// Errors raised while scaffolding a migration.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The description is empty or not snake_case.
    #[error("invalid description `{0}`: use letters, digits and underscores (e.g. add_users_table)")]
    InvalidDescription(String),

    /// A migration with the same name already exists.
    #[error("{} already exists", .0.display())]
    AlreadyExists(PathBuf),

    /// Writing the migration failed.
    #[error("failed to write {path}: {source}")]
    Io {
        /// Target path.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
}

/// Template used for a new migration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MigrationKind {
    /// New table with comment, timestamp trigger and RLS.
    #[default]
    Table,
    /// Changes to an existing table.
    Alter,
    /// Versioned plpgsql function with a pinned search path.
    Function,
    /// Row-level-security policies.
    Rls,
    /// Bare transaction.
    Empty,
}

impl MigrationKind {
    /// Every kind, in menu order.
    pub const ALL: [Self; 5] = [
        Self::Table,
        Self::Alter,
        Self::Function,
        Self::Rls,
        Self::Empty,
    ];

    /// Lower-case name used on the command line.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Alter => "alter",
            Self::Function => "function",
            Self::Rls => "rls",
            Self::Empty => "empty",
        }
    }

    fn template(self) -> &'static str {
        match self {
            Self::Table => TABLE_TEMPLATE,
            Self::Alter => ALTER_TEMPLATE,
            Self::Function => FUNCTION_TEMPLATE,
            Self::Rls => RLS_TEMPLATE,
            Self::Empty => EMPTY_TEMPLATE,
        }
    }
}

/// Strips one leading verb and one trailing noun from a description.
///
/// Falls back to the full description when nothing would remain.
///
/// ```
/// use migration_lint_core::scaffold::extract_name;
///
/// assert_eq!(extract_name("add_users_table"), "users");
/// assert_eq!(extract_name("create_calculate_total_fn"), "calculate_total");
/// assert_eq!(extract_name("orders"), "orders");
/// ```
#[must_use]
pub fn extract_name(description: &str) -> &str {
    let mut name = description;
    if let Some(rest) = VERB_PREFIXES.iter().find_map(|p| name.strip_prefix(p)) {
        name = rest;
    }
    if let Some(rest) = NOUN_SUFFIXES.iter().find_map(|s| name.strip_suffix(s)) {
        name = rest;
    }
    if name.is_empty() {
        description
    } else {
        name
    }
}

/// `add_users_table` -> `Add Users Table`
fn title_case(description: &str) -> String {
    description
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// A migration about to be written.
#[derive(Debug, Clone)]
pub struct Scaffold {
    description: String,
    kind: MigrationKind,
    author: String,
    created: NaiveDateTime,
}

impl Scaffold {
    /// Creates a scaffold for `description` stamped with `created`.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::InvalidDescription`] unless the description
    /// is non-empty and made of ASCII letters, digits and underscores.
    pub fn new(
        description: impl Into<String>,
        kind: MigrationKind,
        created: NaiveDateTime,
    ) -> Result<Self, ScaffoldError> {
        let description = description.into();
        let valid = !description.is_empty()
            && description
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid {
            return Err(ScaffoldError::InvalidDescription(description));
        }
        Ok(Self {
            description,
            kind,
            author: String::new(),
            created,
        })
    }

    /// Sets the author written into the header.
    #[must_use]
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// `<YYYYMMDDHHMMSS>_<description>.sql`
    #[must_use]
    pub fn file_name(&self) -> String {
        format!(
            "{}_{}.sql",
            self.created.format("%Y%m%d%H%M%S"),
            self.description
        )
    }

    /// Renders the template.
    #[must_use]
    pub fn render(&self) -> String {
        self.kind
            .template()
            .replace("{description}", &title_case(&self.description))
            .replace("{author}", &self.author)
            .replace("{date}", &self.created.format("%Y-%m-%d").to_string())
            .replace("{name}", extract_name(&self.description))
    }

    /// Writes the migration into `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::AlreadyExists`] rather than overwriting, or
    /// [`ScaffoldError::Io`] if the directory or file cannot be written.
    pub fn create(&self, dir: &Path) -> Result<PathBuf, ScaffoldError> {
        let path = dir.join(self.file_name());
        let io_err = |source| ScaffoldError::Io {
            path: path.clone(),
            source,
        };

        std::fs::create_dir_all(dir).map_err(io_err)?;
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::AlreadyExists {
                    ScaffoldError::AlreadyExists(path.clone())
                } else {
                    io_err(e)
                }
            })?;
        file.write_all(self.render().as_bytes()).map_err(io_err)?;

        debug!("Created migration: {}", path.display());
        Ok(path)
    }
}

const TABLE_TEMPLATE: &str = r"-- Migration: {description}
-- Author: {author}
-- Date: {date}

BEGIN;

-- 1. Types/Enums (if needed)
-- DO $$
-- BEGIN
--     CREATE TYPE en_status AS ENUM ('active', 'inactive');
-- EXCEPTION
--     WHEN duplicate_object THEN NULL;
-- END $$;

-- 2. Table
CREATE TABLE IF NOT EXISTS tb_{name} (
    id uuid PRIMARY KEY DEFAULT gen_random_uuid(),
    -- Add columns here
    created_at timestamptz NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at timestamptz NOT NULL DEFAULT CURRENT_TIMESTAMP
);

-- 3. Comments
COMMENT ON TABLE tb_{name} IS 'Module: Description';

-- 4. Indexes
-- CREATE INDEX IF NOT EXISTS idx_{name}_column ON tb_{name}(column);

-- 5. Timestamp trigger
DROP TRIGGER IF EXISTS tgr_update_{name}_timestamp ON tb_{name};
CREATE TRIGGER tgr_update_{name}_timestamp
    BEFORE UPDATE ON tb_{name}
    FOR EACH ROW
    EXECUTE FUNCTION update_updated_at_column();

-- 6. RLS
ALTER TABLE tb_{name} ENABLE ROW LEVEL SECURITY;

-- DROP POLICY IF EXISTS pc_{name}_select ON tb_{name};
-- CREATE POLICY pc_{name}_select ON tb_{name}
--     FOR SELECT USING (true);

COMMIT;
";

const ALTER_TEMPLATE: &str = r"-- Migration: {description}
-- Author: {author}
-- Date: {date}

BEGIN;

-- Add column
-- ALTER TABLE tb_{name} ADD COLUMN IF NOT EXISTS new_column text;

-- Add index
-- CREATE INDEX IF NOT EXISTS idx_{name}_column ON tb_{name}(column);

-- Add constraint
-- ALTER TABLE tb_{name} ADD CONSTRAINT uq_{name}_column UNIQUE (column);

COMMIT;
";

const FUNCTION_TEMPLATE: &str = r"-- Migration: {description}
-- Author: {author}
-- Date: {date}

BEGIN;

CREATE OR REPLACE FUNCTION fn_{name}_v1()
RETURNS void AS $$
BEGIN
    -- Function logic here
END;
$$ LANGUAGE plpgsql SECURITY DEFINER
SET search_path = extensions, public, pg_temp;

COMMENT ON FUNCTION fn_{name}_v1() IS 'Description';

COMMIT;
";

const RLS_TEMPLATE: &str = r"-- Migration: {description}
-- Author: {author}
-- Date: {date}

BEGIN;

-- Enable RLS
-- ALTER TABLE tb_{name} ENABLE ROW LEVEL SECURITY;

-- Select policy
DROP POLICY IF EXISTS pc_{name}_select ON tb_{name};
CREATE POLICY pc_{name}_select ON tb_{name}
    FOR SELECT USING (
        -- Condition here
        true
    );

-- Insert policy
-- DROP POLICY IF EXISTS pc_{name}_insert ON tb_{name};
-- CREATE POLICY pc_{name}_insert ON tb_{name}
--     FOR INSERT WITH CHECK (
--         auth.uid() IS NOT NULL
--     );

COMMIT;
";

const EMPTY_TEMPLATE: &str = r"-- Migration: {description}
-- Author: {author}
-- Date: {date}

BEGIN;

-- Your migration here

COMMIT;
";

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn created() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 12, 12)
            .and_then(|d| d.and_hms_opt(14, 30, 0))
            .unwrap()
    }

    #[test]
    fn extract_name_strips_one_verb_and_one_noun() {
        assert_eq!(extract_name("add_users_table"), "users");
        assert_eq!(extract_name("delete_old_index"), "old");
        assert_eq!(extract_name("add_add_users"), "add_users");
        assert_eq!(extract_name("users_table_table"), "users_table");
        assert_eq!(extract_name("add_table"), "table");
        assert_eq!(extract_name("add_"), "add_");
    }

    #[test]
    fn title_case_matches_header_style() {
        assert_eq!(title_case("add_users_table"), "Add Users Table");
        assert_eq!(title_case("fix_UUID"), "Fix Uuid");
    }

    #[test]
    fn file_name_is_timestamped() {
        let s = Scaffold::new("add_users_table", MigrationKind::Table, created()).unwrap();
        assert_eq!(s.file_name(), "20251212143000_add_users_table.sql");
    }

    #[test]
    fn render_fills_every_placeholder() {
        for kind in MigrationKind::ALL {
            let text = Scaffold::new("add_orders_table", kind, created())
                .unwrap()
                .author("dev")
                .render();
            assert!(!text.contains('{'), "{} left a placeholder", kind.name());
            assert!(text.starts_with("-- Migration: Add Orders Table\n-- Author: dev\n-- Date: 2025-12-12\n"));
        }
        let table = Scaffold::new("add_orders_table", MigrationKind::Table, created())
            .unwrap()
            .render();
        assert!(table.contains("CREATE TABLE IF NOT EXISTS tb_orders ("));
    }

    #[test]
    fn rejects_invalid_descriptions() {
        for bad in ["", "add users", "add-users", "../escape"] {
            assert!(matches!(
                Scaffold::new(bad, MigrationKind::Empty, created()),
                Err(ScaffoldError::InvalidDescription(_))
            ));
        }
    }

    #[test]
    fn create_writes_once_and_never_overwrites() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("supabase").join("migrations");
        let s = Scaffold::new("add_users_table", MigrationKind::Table, created()).unwrap();

        let path = s.create(&target).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), s.render());

        let err = s.create(&target).unwrap_err();
        assert!(matches!(err, ScaffoldError::AlreadyExists(_)));
    }
}
