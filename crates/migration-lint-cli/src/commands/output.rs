//! Report rendering for lint results.

use anyhow::Result;
use migration_lint_core::{Finding, RunResult, Severity};
use std::io::IsTerminal;

use crate::OutputFormat;

const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

/// Print lint results in the specified format.
pub fn print(result: &RunResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", render_text(result, use_color())),
        OutputFormat::Json => println!("{}", render_json(&result.findings)?),
    }
    Ok(())
}

/// Colour only on a terminal, and never when `NO_COLOR` is set.
fn use_color() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}

/// One line per finding, a blank line, then the summary.
pub fn render_text(result: &RunResult, color: bool) -> String {
    let mut out = String::new();

    for finding in &result.findings {
        let line = if color {
            colorize(finding)
        } else {
            finding.to_string()
        };
        out.push_str(&line);
        out.push('\n');
    }

    let summary = result.summary();
    out.push('\n');
    if color {
        let summary_color = if result.error_count() > 0 {
            RED
        } else if result.warning_count() > 0 {
            YELLOW
        } else {
            GREEN
        };
        out.push_str(&format!("{summary_color}{summary}{RESET}\n"));
    } else {
        out.push_str(&format!("{summary}\n"));
    }
    out
}

/// Same layout as [`Finding`]'s `Display`, with a coloured severity label.
fn colorize(finding: &Finding) -> String {
    let label = finding.severity.label();
    let plain = format!("[{label}]");
    let painted = match finding.severity {
        Severity::Error => format!("[{RED}{label}{RESET}]"),
        Severity::Warning => format!("[{YELLOW}{label}{RESET}]"),
    };
    finding.to_string().replacen(&plain, &painted, 1)
}

/// Pretty-printed JSON array of findings.
pub fn render_json(findings: &[Finding]) -> Result<String> {
    Ok(serde_json::to_string_pretty(findings)?)
}
