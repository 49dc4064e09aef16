//! Whole-document recommendations (MIG101-MIG103).
//!
//! These report at most once per document, at line 0, without an excerpt.

use migration_lint_core::{RuleClass, RuleKind, RuleSpec};

/// The document never opens a transaction.
///
/// Only a transaction-control statement at the start of a line counts, so
/// the `BEGIN` of a plpgsql block does not. `BEGIN [WORK | TRANSACTION]` and
/// `START TRANSACTION` may carry comma-separated transaction modes.
pub const NO_TRANSACTION: RuleSpec = RuleSpec {
    id: "no-transaction",
    code: "MIG101",
    class: RuleClass::Advisory,
    message: "Consider wrapping in BEGIN/COMMIT transaction",
    kind: RuleKind::Missing {
        pattern: r"^\s*(?:BEGIN(?:\s+(?:WORK|TRANSACTION))?|START\s+TRANSACTION)\b(?:\s*,?\s*(?:ISOLATION\s+LEVEL\s+(?:SERIALIZABLE|REPEATABLE\s+READ|READ\s+(?:COMMITTED|UNCOMMITTED))|READ\s+(?:WRITE|ONLY)|(?:NOT\s+)?DEFERRABLE))*\s*;",
    },
};

/// Some created table has no `COMMENT ON TABLE` of its own.
pub const NO_COMMENT_TABLE: RuleSpec = RuleSpec {
    id: "no-comment-table",
    code: "MIG102",
    class: RuleClass::Advisory,
    message: "Consider adding COMMENT ON TABLE",
    kind: RuleKind::Unpaired {
        subject: r#"\bCREATE\s+(?:(?:GLOBAL|LOCAL)\s+)?(?:(?:TEMP|TEMPORARY|UNLOGGED)\s+)?TABLE\s+(?>(?:IF\s+NOT\s+EXISTS\s+)?)(?P<name>(?:"?\w+"?\.)?"?\w+"?)"#,
        companion: r#"\bCOMMENT\s+ON\s+TABLE\s+(?P<name>(?:"?\w+"?\.)?"?\w+"?)\s+IS\b"#,
    },
};

/// Data belongs in seed files.
pub const INSERT_IN_MIGRATION: RuleSpec = RuleSpec {
    id: "insert-in-migration",
    code: "MIG103",
    class: RuleClass::Advisory,
    message: "INSERT statements should be in seed files, not migrations",
    kind: RuleKind::Present {
        pattern: r"\bINSERT\s+INTO\b",
    },
};
