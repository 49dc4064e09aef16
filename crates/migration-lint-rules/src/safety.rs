//! Security and schema-placement conventions (MIG009-MIG011).

use migration_lint_core::{RuleClass, RuleKind, RuleSpec};

/// Extensions must be installed into the `extensions` schema.
///
/// `SCHEMA extensions` may appear anywhere among the statement's options.
pub const EXTENSION_SCHEMA: RuleSpec = RuleSpec {
    id: "extension-schema",
    code: "MIG009",
    class: RuleClass::Blocking,
    message: "Extensions should use SCHEMA extensions",
    kind: RuleKind::Positional {
        pattern: r#"\bCREATE\s+EXTENSION\s+(?>(?:IF\s+NOT\s+EXISTS\s+)?)(?>"[^"]+"|[\w-]+)(?![^;]*\bSCHEMA\s+"?extensions\b)"#,
    },
};

/// Views must run with the caller's privileges.
///
/// Accepts `security_invoker`, `security_invoker = true` and `= on` anywhere
/// in the view's `WITH (...)` option list. Materialized views are exempt.
pub const SECURITY_INVOKER: RuleSpec = RuleSpec {
    id: "security-invoker",
    code: "MIG010",
    class: RuleClass::Blocking,
    message: "Views should use WITH (security_invoker)",
    kind: RuleKind::Positional {
        pattern: r#"\bCREATE\s+(?:OR\s+REPLACE\s+)?(?:(?:TEMP|TEMPORARY)\s+)?(?:RECURSIVE\s+)?VIEW\s+(?>(?:"?\w+"?\.)?"?\w+"?)(?!\s*(?:\([^)]*\)\s*)?WITH\s*\((?:[^)]*,)?\s*security_invoker\b(?:\s*=\s*'?(?:true|on)'?)?\s*[,)])"#,
    },
};

/// plpgsql functions must pin `search_path`.
///
/// Reported at the `CREATE FUNCTION` header. The statement is read up to its
/// terminating `;` with dollar-quoted bodies, string literals and `--`
/// comments skipped, so `LANGUAGE` and `SET search_path` may sit on either
/// side of the body and in any order.
pub const SEARCH_PATH: RuleSpec = RuleSpec {
    id: "search-path",
    code: "MIG011",
    class: RuleClass::Blocking,
    message: "Functions should SET search_path",
    kind: RuleKind::Positional {
        pattern: r#"\bCREATE\s+(?:OR\s+REPLACE\s+)?FUNCTION\s+(?>(?:"?\w+"?\.)?"?\w+"?)(?=(?>--[^\n]*|[^;$']|'(?:[^']|'')*'|\$(?P<open>\w*)\$[\s\S]*?\$(?P=open)\$)*?\bLANGUAGE\s+'?plpgsql\b)(?!(?>--[^\n]*|[^;$']|'(?:[^']|'')*'|\$(?P<body>\w*)\$[\s\S]*?\$(?P=body)\$)*?\bSET\s+search_path\b)"#,
    },
};
