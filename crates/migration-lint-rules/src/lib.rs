//! # migration-lint-rules
//!
//! Built-in Supabase migration conventions for migration-lint.
//!
//! ## Available Rules
//!
//! | Code | Name | Kind | Description |
//! |------|------|------|-------------|
//! | MIG001 | `table-prefix` | positional | Tables must use `tb_` |
//! | MIG002 | `view-prefix` | positional | Views must use `v_` |
//! | MIG003 | `function-prefix` | positional | Functions must use `fn_` (or `private.fn_`) |
//! | MIG004 | `function-version` | positional | `fn_` functions end in `_v<n>` |
//! | MIG005 | `trigger-prefix` | positional | Triggers must use `tgr_` |
//! | MIG006 | `index-prefix` | positional | Indexes must use `idx_` |
//! | MIG007 | `enum-prefix` | positional | Enum types must use `en_` |
//! | MIG008 | `policy-prefix` | positional | RLS policies must use `pc_` |
//! | MIG009 | `extension-schema` | positional | Extensions go into `SCHEMA extensions` |
//! | MIG010 | `security-invoker` | positional | Views declare `WITH (security_invoker)` |
//! | MIG011 | `search-path` | positional | plpgsql functions `SET search_path` |
//! | MIG101 | `no-transaction` | document | No `BEGIN`/`COMMIT` wrapper |
//! | MIG102 | `no-comment-table` | document | A created table lacks `COMMENT ON TABLE` |
//! | MIG103 | `insert-in-migration` | document | `INSERT INTO` belongs in seed files |
//!
//! Positional rules are blocking (`error`); document rules are advisory
//! (`warning`).
//!
//! ## Usage
//!
//! ```
//! use migration_lint_core::{Config, Document, DocumentLinter};
//!
//! let catalog = migration_lint_rules::default_catalog()?;
//! let config = Config::default();
//! let linter = DocumentLinter::new(&catalog, &config)?;
//!
//! let findings = linter.lint(&Document::new("bad.sql", "CREATE TABLE users (id uuid);"));
//! assert_eq!(findings[1].to_string(), "bad.sql:1: [ERROR] Tables must use tb_ prefix (CREATE TABLE users)");
//! # Ok::<(), migration_lint_core::CatalogError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod advisory;
mod naming;
mod safety;

use migration_lint_core::{CatalogError, RuleCatalog, RuleSpec};
use tracing::debug;

pub use advisory::{INSERT_IN_MIGRATION, NO_COMMENT_TABLE, NO_TRANSACTION};
pub use naming::{
    ENUM_PREFIX, FUNCTION_PREFIX, FUNCTION_VERSION, INDEX_PREFIX, POLICY_PREFIX, TABLE_PREFIX,
    TRIGGER_PREFIX, VIEW_PREFIX,
};
pub use safety::{EXTENSION_SCHEMA, SEARCH_PATH, SECURITY_INVOKER};

/// Every built-in rule, in evaluation and report order.
pub const CATALOG: &[RuleSpec] = &[
    TABLE_PREFIX,
    VIEW_PREFIX,
    FUNCTION_PREFIX,
    FUNCTION_VERSION,
    TRIGGER_PREFIX,
    INDEX_PREFIX,
    ENUM_PREFIX,
    POLICY_PREFIX,
    EXTENSION_SCHEMA,
    SECURITY_INVOKER,
    SEARCH_PATH,
    NO_TRANSACTION,
    NO_COMMENT_TABLE,
    INSERT_IN_MIGRATION,
];

/// Compiles the built-in catalog.
///
/// # Errors
///
/// Returns an error if a built-in pattern fails to compile.
pub fn default_catalog() -> Result<RuleCatalog, CatalogError> {
    let catalog = RuleCatalog::from_specs(CATALOG)?;
    debug!("Compiled {} built-in rules", catalog.len());
    Ok(catalog)
}
