//! Object naming conventions (MIG001-MIG008).
//!
//! Each pattern matches only the violating form: a negative lookahead sits
//! right after the object keyword. Optional clauses before the lookahead
//! (`IF NOT EXISTS`, `CONCURRENTLY`, a schema qualifier) are atomic so the
//! engine cannot backtrack around them.

use migration_lint_core::{RuleClass, RuleKind, RuleSpec};

/// Tables must use the `tb_` prefix.
pub const TABLE_PREFIX: RuleSpec = RuleSpec {
    id: "table-prefix",
    code: "MIG001",
    class: RuleClass::Blocking,
    message: "Tables must use tb_ prefix",
    kind: RuleKind::Positional {
        pattern: r#"\bCREATE\s+(?:(?:GLOBAL|LOCAL)\s+)?(?:(?:TEMP|TEMPORARY|UNLOGGED)\s+)?TABLE\s+(?>(?:IF\s+NOT\s+EXISTS\s+)?)(?>(?:"?\w+"?\.)?)(?!"?tb_)"?\w+"?"#,
    },
};

/// Views must use the `v_` prefix.
pub const VIEW_PREFIX: RuleSpec = RuleSpec {
    id: "view-prefix",
    code: "MIG002",
    class: RuleClass::Blocking,
    message: "Views must use v_ prefix",
    kind: RuleKind::Positional {
        pattern: r#"\bCREATE\s+(?:OR\s+REPLACE\s+)?(?:(?:TEMP|TEMPORARY)\s+)?(?:RECURSIVE\s+)?(?:MATERIALIZED\s+)?VIEW\s+(?>(?:IF\s+NOT\s+EXISTS\s+)?)(?>(?:"?\w+"?\.)?)(?!"?v_)"?\w+"?"#,
    },
};

/// Functions must use the `fn_` prefix, optionally under `private`.
pub const FUNCTION_PREFIX: RuleSpec = RuleSpec {
    id: "function-prefix",
    code: "MIG003",
    class: RuleClass::Blocking,
    message: "Functions must use fn_ prefix",
    kind: RuleKind::Positional {
        pattern: r#"\bCREATE\s+(?:OR\s+REPLACE\s+)?FUNCTION\s+(?!(?:"?private"?\.)?"?fn_)(?:"?\w+"?\.)?"?\w+"?"#,
    },
};

/// `fn_` functions must end in `_v<digits>`.
pub const FUNCTION_VERSION: RuleSpec = RuleSpec {
    id: "function-version",
    code: "MIG004",
    class: RuleClass::Blocking,
    message: "Functions should be versioned (_v1, _v2)",
    kind: RuleKind::Positional {
        pattern: r#"\bCREATE\s+(?:OR\s+REPLACE\s+)?FUNCTION\s+(?:"?private"?\.)?"?(?!\w*_v\d+\b)fn_\w+"?"#,
    },
};

/// Triggers must use the `tgr_` prefix.
pub const TRIGGER_PREFIX: RuleSpec = RuleSpec {
    id: "trigger-prefix",
    code: "MIG005",
    class: RuleClass::Blocking,
    message: "Triggers must use tgr_ prefix",
    kind: RuleKind::Positional {
        pattern: r#"\bCREATE\s+(?:OR\s+REPLACE\s+)?(?:CONSTRAINT\s+)?TRIGGER\s+(?!"?tgr_)"?\w+"?"#,
    },
};

/// Indexes must use the `idx_` prefix. Unnamed indexes (`CREATE INDEX ON`)
/// are left alone.
pub const INDEX_PREFIX: RuleSpec = RuleSpec {
    id: "index-prefix",
    code: "MIG006",
    class: RuleClass::Blocking,
    message: "Indexes must use idx_ prefix",
    kind: RuleKind::Positional {
        pattern: r#"\bCREATE\s+(?:UNIQUE\s+)?INDEX\s+(?>(?:CONCURRENTLY\s+)?)(?>(?:IF\s+NOT\s+EXISTS\s+)?)(?!"?idx_|ON\b)"?\w+"?"#,
    },
};

/// Enum types must use the `en_` prefix.
pub const ENUM_PREFIX: RuleSpec = RuleSpec {
    id: "enum-prefix",
    code: "MIG007",
    class: RuleClass::Blocking,
    message: "Enum types must use en_ prefix",
    kind: RuleKind::Positional {
        pattern: r#"\bCREATE\s+TYPE\s+(?>(?:"?\w+"?\.)?)(?!"?en_)"?\w+"?\s+AS\s+ENUM\b"#,
    },
};

/// Row-level-security policies must use the `pc_` prefix.
pub const POLICY_PREFIX: RuleSpec = RuleSpec {
    id: "policy-prefix",
    code: "MIG008",
    class: RuleClass::Blocking,
    message: "RLS policies must use pc_ prefix",
    kind: RuleKind::Positional {
        pattern: r#"\bCREATE\s+POLICY\s+(?!"?pc_)(?:"[^"]*"|\w+)"#,
    },
};
