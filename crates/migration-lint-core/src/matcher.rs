//! Positional matching of a single rule against a document.
//!
//! Each call to [`scan`] performs a fresh, lazy scan of the whole text for
//! one rule, yielding findings in document order.

use tracing::warn;

use crate::rule::PositionalRule;
use crate::types::{Document, Finding, Severity};

fn newlines(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count()
}

/// Lazily scans `doc` for every non-overlapping match of `rule`.
#[must_use]
pub fn scan<'r, 'd>(rule: &'r PositionalRule, doc: &'d Document) -> Matches<'r, 'd> {
    Matches {
        rule,
        doc,
        inner: rule.pattern.find_iter(&doc.text),
        line: 1,
        offset: 0,
        done: false,
    }
}

/// Iterator over the findings of one rule in one document.
///
/// Line numbers are computed incrementally since matches arrive in order.
pub struct Matches<'r, 'd> {
    rule: &'r PositionalRule,
    doc: &'d Document,
    inner: fancy_regex::Matches<'r, 'd>,
    line: usize,
    offset: usize,
    done: bool,
}

impl Iterator for Matches<'_, '_> {
    type Item = Finding;

    fn next(&mut self) -> Option<Finding> {
        if self.done {
            return None;
        }
        match self.inner.next()? {
            Ok(m) => {
                let start = m.start();
                self.line += self.doc.text.get(self.offset..start).map_or(0, newlines);
                self.offset = start;
                Some(
                    Finding::new(
                        self.doc.name.as_str(),
                        self.line,
                        self.rule.severity,
                        self.rule.message,
                    )
                    .with_excerpt(m.as_str()),
                )
            }
            Err(e) => {
                // The engine cannot resume after an abort; report once and stop.
                self.done = true;
                warn!(
                    "Rule {} aborted on {}: {}",
                    self.rule.id, self.doc.name, e
                );
                Some(Finding::new(
                    self.doc.name.as_str(),
                    0,
                    Severity::Error,
                    format!("Rule {} could not be evaluated: {e}", self.rule.id),
                ))
            }
        }
    }
}
