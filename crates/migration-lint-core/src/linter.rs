//! Per-document linting.
//!
//! Findings come out in a fixed order: the file name check, then every
//! positional rule in catalog order (each rule's matches in document order),
//! then every document rule in catalog order.

use tracing::{debug, warn};

use crate::config::Config;
use crate::filename::FilenameValidator;
use crate::matcher;
use crate::rule::{CatalogError, Rule, RuleCatalog};
use crate::types::{Document, Finding, Severity};

/// Lints single documents against a catalog.
#[derive(Debug)]
pub struct DocumentLinter<'a> {
    catalog: &'a RuleCatalog,
    config: &'a Config,
    filename: FilenameValidator,
}

impl<'a> DocumentLinter<'a> {
    /// Creates a linter borrowing the catalog and configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file name pattern fails to compile.
    pub fn new(catalog: &'a RuleCatalog, config: &'a Config) -> Result<Self, CatalogError> {
        Ok(Self {
            catalog,
            config,
            filename: FilenameValidator::new()?,
        })
    }

    /// Lints one document and returns its ordered findings.
    #[must_use]
    pub fn lint(&self, doc: &Document) -> Vec<Finding> {
        debug!("Linting: {}", doc.name);

        let mut findings: Vec<Finding> = self.filename.check(&doc.name).into_iter().collect();

        for rule in self.catalog.iter() {
            let Rule::Positional(positional) = rule else {
                continue;
            };
            if !self.is_enabled(rule) {
                continue;
            }
            let severity = self.severity_for(rule);
            findings.extend(matcher::scan(positional, doc).map(|mut f| {
                // Evaluation failures keep their own error severity.
                if f.excerpt.is_some() {
                    f.severity = severity;
                }
                f
            }));
        }

        for rule in self.catalog.iter() {
            let Rule::Document(document) = rule else {
                continue;
            };
            if !self.is_enabled(rule) {
                continue;
            }
            match document.check.is_violated(&doc.text) {
                Ok(true) => findings.push(Finding::new(
                    doc.name.as_str(),
                    0,
                    self.severity_for(rule),
                    document.message,
                )),
                Ok(false) => {}
                Err(e) => {
                    warn!("Rule {} aborted on {}: {}", document.id, doc.name, e);
                    findings.push(Finding::new(
                        doc.name.as_str(),
                        0,
                        Severity::Error,
                        format!("Rule {} could not be evaluated: {e}", document.id),
                    ));
                }
            }
        }

        findings
    }

    fn is_enabled(&self, rule: &Rule) -> bool {
        let enabled = self.config.is_rule_enabled(rule);
        if !enabled {
            debug!("Skipping disabled rule: {}", rule.id());
        }
        enabled
    }

    /// Applies severity overrides from configuration.
    fn severity_for(&self, rule: &Rule) -> Severity {
        self.config
            .rule_severity(rule)
            .unwrap_or_else(|| rule.severity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{RuleClass, RuleKind, RuleSpec};

    const SPECS: &[RuleSpec] = &[
        RuleSpec {
            id: "table-prefix",
            code: "T001",
            class: RuleClass::Blocking,
            message: "Tables must use tb_ prefix",
            kind: RuleKind::Positional {
                pattern: r"\bCREATE\s+TABLE\s+(?!tb_)\w+",
            },
        },
        RuleSpec {
            id: "view-prefix",
            code: "T002",
            class: RuleClass::Blocking,
            message: "Views must use v_ prefix",
            kind: RuleKind::Positional {
                pattern: r"\bCREATE\s+VIEW\s+(?!v_)\w+",
            },
        },
        RuleSpec {
            id: "no-transaction",
            code: "T101",
            class: RuleClass::Advisory,
            message: "Consider wrapping in BEGIN/COMMIT transaction",
            kind: RuleKind::Missing {
                pattern: r"^\s*BEGIN\s*;",
            },
        },
        RuleSpec {
            id: "insert-in-migration",
            code: "T102",
            class: RuleClass::Advisory,
            message: "INSERT statements should be in seed files, not migrations",
            kind: RuleKind::Present {
                pattern: r"\bINSERT\s+INTO\b",
            },
        },
    ];

    fn catalog() -> RuleCatalog {
        RuleCatalog::from_specs(SPECS).unwrap()
    }

    #[test]
    fn findings_follow_fixed_order() {
        let catalog = catalog();
        let config = Config::default();
        let linter = DocumentLinter::new(&catalog, &config).unwrap();
        let doc = Document::new(
            "bad.sql",
            "CREATE VIEW users_view AS SELECT 1;\nCREATE TABLE b (x int);\nCREATE TABLE a (x int);\nINSERT INTO tb_x VALUES (1);",
        );

        let messages: Vec<_> = linter
            .lint(&doc)
            .into_iter()
            .map(|f| (f.line, f.message))
            .collect();
        assert_eq!(
            messages,
            [
                (0, "Filename should match YYYYMMDDHHMMSS_description.sql".to_string()),
                (2, "Tables must use tb_ prefix".to_string()),
                (3, "Tables must use tb_ prefix".to_string()),
                (1, "Views must use v_ prefix".to_string()),
                (0, "Consider wrapping in BEGIN/COMMIT transaction".to_string()),
                (
                    0,
                    "INSERT statements should be in seed files, not migrations".to_string()
                ),
            ]
        );
    }

    #[test]
    fn empty_document_still_checks_filename() {
        let catalog = catalog();
        let config = Config::default();
        let linter = DocumentLinter::new(&catalog, &config).unwrap();
        let findings = linter.lint(&Document::new("empty.sql", ""));
        assert_eq!(findings[0].line, 0);
        assert_eq!(findings[0].severity, Severity::Error);
        // Only the filename check and the missing transaction wrapper fire.
        assert_eq!(findings.len(), 2);
    }

    #[test]
    fn disabled_rules_are_skipped_and_overrides_apply() {
        let catalog = catalog();
        let config = Config::parse(
            "[rules.table-prefix]\nenabled = false\n[rules.T102]\nseverity = \"error\"\n",
        )
        .unwrap();
        let linter = DocumentLinter::new(&catalog, &config).unwrap();
        let doc = Document::new(
            "20250101000000_x.sql",
            "BEGIN;\nCREATE TABLE a (x int);\nINSERT INTO tb_a VALUES (1);\nCOMMIT;",
        );
        let findings = linter.lint(&doc);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Error);
        assert!(findings[0].excerpt.is_none());
    }

    #[test]
    fn linting_is_idempotent() {
        let catalog = catalog();
        let config = Config::default();
        let linter = DocumentLinter::new(&catalog, &config).unwrap();
        let doc = Document::new("x.sql", "CREATE TABLE a (x int);\nCREATE VIEW b AS SELECT 1;");
        assert_eq!(linter.lint(&doc), linter.lint(&doc));
    }
}
