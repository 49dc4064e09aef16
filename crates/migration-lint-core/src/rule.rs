//! Rule model and the ordered rule catalog.
//!
//! A catalog is declared as a slice of [`RuleSpec`] (plain data) and
//! compiled once with [`RuleCatalog::from_specs`]. Compilation failures are
//! catalog defects and surface as [`CatalogError`] at startup, never per
//! document.

use std::collections::HashSet;

use fancy_regex::Regex;

use crate::types::Severity;

/// Inline flags applied to every catalog pattern: case-insensitive and
/// multi-line (`^`/`$` match at line boundaries).
const PATTERN_FLAGS: &str = "(?im)";

/// Name of the capture group used by [`RuleKind::Unpaired`] patterns.
pub const NAME_GROUP: &str = "name";

/// Errors raised while building a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// A rule pattern failed to compile.
    #[error("rule `{id}` has an invalid pattern: {message}")]
    RuleConstruction {
        /// Identifier of the offending rule.
        id: String,
        /// Compiler error message.
        message: String,
    },

    /// Two rules share an identifier or code.
    #[error("duplicate rule identifier `{id}`")]
    DuplicateId {
        /// The repeated identifier.
        id: String,
    },
}

/// Whether a rule blocks (error) or advises (warning).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleClass {
    /// Must-fix convention; reported as `error`.
    Blocking,
    /// Recommendation; reported as `warning`.
    Advisory,
}

impl RuleClass {
    /// Severity of findings produced by rules of this class.
    #[must_use]
    pub fn severity(self) -> Severity {
        match self {
            Self::Blocking => Severity::Error,
            Self::Advisory => Severity::Warning,
        }
    }
}

/// How a declared rule inspects a document.
#[derive(Debug, Clone, Copy)]
pub enum RuleKind {
    /// One finding per non-overlapping match, positioned at the match start.
    Positional {
        /// Pattern source.
        pattern: &'static str,
    },
    /// One document-scoped finding when the pattern never matches.
    Missing {
        /// Pattern source.
        pattern: &'static str,
    },
    /// One document-scoped finding when the pattern matches anywhere.
    Present {
        /// Pattern source.
        pattern: &'static str,
    },
    /// One document-scoped finding when a `name` captured by `subject` has
    /// no `companion` capturing the same name.
    Unpaired {
        /// Pattern introducing a named object.
        subject: &'static str,
        /// Pattern that accompanies it.
        companion: &'static str,
    },
}

/// Declarative description of one rule, before compilation.
#[derive(Debug, Clone, Copy)]
pub struct RuleSpec {
    /// Stable kebab-case identifier (config key).
    pub id: &'static str,
    /// Short code (e.g., "MIG001").
    pub code: &'static str,
    /// Blocking or advisory.
    pub class: RuleClass,
    /// Message copied into every finding.
    pub message: &'static str,
    /// Inspection strategy and its pattern sources.
    pub kind: RuleKind,
}

/// A compiled rule that reports individual matches.
#[derive(Debug)]
pub struct PositionalRule {
    /// Stable identifier.
    pub id: &'static str,
    /// Short code.
    pub code: &'static str,
    /// Finding message.
    pub message: &'static str,
    /// Severity of produced findings.
    pub severity: Severity,
    /// Compiled pattern.
    pub pattern: Regex,
}

/// A compiled whole-document predicate.
#[derive(Debug)]
pub struct DocumentRule {
    /// Stable identifier.
    pub id: &'static str,
    /// Short code.
    pub code: &'static str,
    /// Finding message.
    pub message: &'static str,
    /// Severity of produced findings.
    pub severity: Severity,
    /// Predicate deciding whether the document violates the rule.
    pub check: DocumentCheck,
}

/// Whole-document predicate variants.
#[derive(Debug)]
pub enum DocumentCheck {
    /// Violated when the pattern never matches.
    Missing(Regex),
    /// Violated when the pattern matches.
    Present(Regex),
    /// Violated when some subject name lacks a companion.
    Unpaired {
        /// Pattern capturing introduced names.
        subject: Regex,
        /// Pattern capturing accompanied names.
        companion: Regex,
    },
}

impl DocumentCheck {
    /// Evaluates the predicate against `text`.
    ///
    /// # Errors
    ///
    /// Returns the engine error if a pattern aborts (e.g., backtrack limit).
    pub fn is_violated(&self, text: &str) -> Result<bool, fancy_regex::Error> {
        match self {
            Self::Missing(re) => Ok(!re.is_match(text)?),
            Self::Present(re) => re.is_match(text),
            Self::Unpaired { subject, companion } => {
                let paired = captured_names(companion, text)?;
                let subjects = captured_names(subject, text)?;
                Ok(subjects.iter().any(|name| !paired.contains(name)))
            }
        }
    }
}

/// Collects normalized `name` captures: unquoted, schema stripped, lowercase.
fn captured_names(re: &Regex, text: &str) -> Result<HashSet<String>, fancy_regex::Error> {
    let mut names = HashSet::new();
    for caps in re.captures_iter(text) {
        if let Some(m) = caps?.name(NAME_GROUP) {
            names.insert(normalize_identifier(m.as_str()));
        }
    }
    Ok(names)
}

/// Normalizes an SQL identifier for comparison.
#[must_use]
pub fn normalize_identifier(raw: &str) -> String {
    let unqualified = raw.rsplit('.').next().unwrap_or(raw);
    unqualified.trim_matches('"').to_lowercase()
}

/// A compiled rule: either positional or document-scoped.
#[derive(Debug)]
pub enum Rule {
    /// Reports each match.
    Positional(PositionalRule),
    /// Reports at most once per document.
    Document(DocumentRule),
}

impl Rule {
    /// Compiles a rule from its declaration.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::RuleConstruction`] if a pattern is invalid or
    /// an `Unpaired` pattern lacks a `name` group.
    pub fn compile(spec: &RuleSpec) -> Result<Self, CatalogError> {
        let severity = spec.class.severity();
        let rule = match spec.kind {
            RuleKind::Positional { pattern } => Self::Positional(PositionalRule {
                id: spec.id,
                code: spec.code,
                message: spec.message,
                severity,
                pattern: compile_pattern(spec.id, pattern)?,
            }),
            RuleKind::Missing { pattern } => Self::document(
                spec,
                DocumentCheck::Missing(compile_pattern(spec.id, pattern)?),
            ),
            RuleKind::Present { pattern } => Self::document(
                spec,
                DocumentCheck::Present(compile_pattern(spec.id, pattern)?),
            ),
            RuleKind::Unpaired { subject, companion } => Self::document(
                spec,
                DocumentCheck::Unpaired {
                    subject: compile_named_pattern(spec.id, subject)?,
                    companion: compile_named_pattern(spec.id, companion)?,
                },
            ),
        };
        Ok(rule)
    }

    fn document(spec: &RuleSpec, check: DocumentCheck) -> Self {
        Self::Document(DocumentRule {
            id: spec.id,
            code: spec.code,
            message: spec.message,
            severity: spec.class.severity(),
            check,
        })
    }

    /// Returns the rule identifier.
    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            Self::Positional(r) => r.id,
            Self::Document(r) => r.id,
        }
    }

    /// Returns the rule code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Positional(r) => r.code,
            Self::Document(r) => r.code,
        }
    }

    /// Returns the finding message.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::Positional(r) => r.message,
            Self::Document(r) => r.message,
        }
    }

    /// Returns the default severity.
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            Self::Positional(r) => r.severity,
            Self::Document(r) => r.severity,
        }
    }

    /// Returns true when `key` is this rule's id or code.
    #[must_use]
    pub fn is_named(&self, key: &str) -> bool {
        self.id() == key || self.code().eq_ignore_ascii_case(key)
    }
}

fn compile_pattern(id: &str, pattern: &str) -> Result<Regex, CatalogError> {
    Regex::new(&format!("{PATTERN_FLAGS}{pattern}")).map_err(|e| CatalogError::RuleConstruction {
        id: id.to_string(),
        message: e.to_string(),
    })
}

fn compile_named_pattern(id: &str, pattern: &str) -> Result<Regex, CatalogError> {
    let re = compile_pattern(id, pattern)?;
    if re.capture_names().flatten().any(|n| n == NAME_GROUP) {
        Ok(re)
    } else {
        Err(CatalogError::RuleConstruction {
            id: id.to_string(),
            message: format!("pattern must define a `{NAME_GROUP}` capture group"),
        })
    }
}

/// An immutable, ordered set of compiled rules.
///
/// Declaration order is evaluation order and report order. The catalog is
/// `Send + Sync` and meant to be built once and shared by reference.
#[derive(Debug)]
pub struct RuleCatalog {
    rules: Vec<Rule>,
}

impl RuleCatalog {
    /// Compiles every declaration, preserving order.
    ///
    /// # Errors
    ///
    /// Returns an error on the first invalid pattern or duplicate id/code.
    pub fn from_specs(specs: &[RuleSpec]) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        let mut rules = Vec::with_capacity(specs.len());
        for spec in specs {
            for key in [spec.id, spec.code] {
                if !seen.insert(key) {
                    return Err(CatalogError::DuplicateId { id: key.to_string() });
                }
            }
            rules.push(Rule::compile(spec)?);
        }
        Ok(Self { rules })
    }

    /// Iterates rules in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Positional rules in declaration order.
    pub fn positional(&self) -> impl Iterator<Item = &PositionalRule> {
        self.rules.iter().filter_map(|r| match r {
            Rule::Positional(p) => Some(p),
            Rule::Document(_) => None,
        })
    }

    /// Document rules in declaration order.
    pub fn document(&self) -> impl Iterator<Item = &DocumentRule> {
        self.rules.iter().filter_map(|r| match r {
            Rule::Document(d) => Some(d),
            Rule::Positional(_) => None,
        })
    }

    /// Looks up a rule by id or code.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.is_named(key))
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the catalog holds no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
