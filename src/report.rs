//! Output formatting for check results.
//!
//! Three surfaces:
//! - a plain deterministic text report (the engine's canonical output)
//! - colored terminal output for interactive runs
//! - JSON for programmatic consumption
//!
//! All of them list errors first, then warnings, then info entries;
//! within a severity, issues group by category in declared category
//! order, keeping original line order inside each group.

use colored::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::check::{FileReport, Issue, Severity, SeverityCounts};

/// Stable ordering for rendering: severity, then category, then the
/// original encounter order (sort is stable).
fn sorted_for_report(issues: &[Issue]) -> Vec<&Issue> {
    let mut ordered: Vec<&Issue> = issues.iter().collect();
    ordered.sort_by_key(|i| (i.severity.rank(), i.category.rank()));
    ordered
}

fn count_label(count: usize, singular: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}s", count, singular)
    }
}

/// Summary fragment: "2 errors, 1 warning, 0 info".
pub fn summary_line(counts: &SeverityCounts) -> String {
    format!(
        "{}, {}, {} info",
        count_label(counts.errors, "error"),
        count_label(counts.warnings, "warning"),
        counts.infos
    )
}

// =============================================================================
// Plain text
// =============================================================================

const RULE: &str =
    "================================================================================";
const THIN_RULE: &str =
    "--------------------------------------------------------------------------------";

/// Render the canonical text report for one file.
///
/// Deterministic: identical issue sequences render identically.
pub fn render_text(path: &Path, issues: &[Issue]) -> String {
    if issues.is_empty() {
        return format!("\n✓ No cross-platform issues found in {}\n", path.display());
    }

    let mut out = vec![
        format!("\n{}", RULE),
        format!("Cross-Platform Compatibility Report: {}", path.display()),
        format!("{}\n", RULE),
    ];

    let ordered = sorted_for_report(issues);
    let counts = SeverityCounts::of(issues);

    for (severity, label, count) in [
        (Severity::Error, "ERRORS", counts.errors),
        (Severity::Warning, "WARNINGS", counts.warnings),
        (Severity::Info, "INFO", counts.infos),
    ] {
        if count == 0 {
            continue;
        }
        out.push(format!("{} ({}):", label, count));
        out.push(THIN_RULE.to_string());
        for issue in ordered.iter().filter(|i| i.severity == severity) {
            out.push(format!(
                "  [{}] Line {}: {}",
                issue.category, issue.line, issue.message
            ));
            out.push(format!("    Code: {}", issue.snippet));
            out.push(format!("    Fix: {}\n", issue.suggestion));
        }
    }

    out.push(format!("Summary: {}", summary_line(&counts)));
    out.push(RULE.to_string());

    out.join("\n")
}

// =============================================================================
// Pretty (colored terminal)
// =============================================================================

/// Write colored reports for a set of files, with a trailing total line.
pub fn write_pretty(reports: &[FileReport], show_suppressed: bool) {
    let mut totals = SeverityCounts::default();

    for report in reports {
        totals.merge(report.counts());

        if report.issues.is_empty() && report.suppressed.is_empty() {
            continue;
        }

        println!();
        print!("  {}", report.path.display().to_string().blue().bold());
        println!(" {}", format!("({})", report.language).dimmed());

        for issue in sorted_for_report(&report.issues) {
            write_severity_tag(issue.severity);
            print!("{:<10}", issue.category.as_str().dimmed());
            println!("{}", format!("line {}", issue.line).dimmed());
            println!("            {}", issue.message);
            println!("            {}", issue.snippet.dimmed());
            println!("            {} {}", "fix:".dimmed(), issue.suggestion);
        }

        if !report.suppressed.is_empty() {
            println!(
                "    {}",
                format!("({} suppressed)", report.suppressed.len()).dimmed()
            );
            if show_suppressed {
                for sv in &report.suppressed {
                    print!(
                        "    {:<10}{}",
                        sv.issue.category.as_str().dimmed(),
                        format!("line {}", sv.issue.line).dimmed()
                    );
                    if sv.suppression.reason.is_empty() {
                        println!();
                    } else {
                        println!("{}", format!("  reason: {}", sv.suppression.reason).dimmed());
                    }
                }
            }
        }
    }

    println!();
    let scanned = count_label(reports.len(), "file");
    if totals.total() == 0 {
        println!("  {} {} scanned, no issues", "✓".green(), scanned);
    } else {
        print!("  {} scanned: ", scanned);
        print!("{}", count_label(totals.errors, "error").red());
        print!(", {}", count_label(totals.warnings, "warning").yellow());
        println!(", {}", format!("{} info", totals.infos).blue());
    }
}

fn write_severity_tag(severity: Severity) {
    match severity {
        Severity::Error => print!("    {} ", "ERROR".red()),
        Severity::Warning => print!("    {} ", "WARN ".yellow()),
        Severity::Info => print!("    {} ", "INFO ".blue()),
    }
}

// =============================================================================
// JSON
// =============================================================================

/// JSON report envelope.
#[derive(Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub files: Vec<JsonFileReport>,
    pub summary: JsonSummary,
}

#[derive(Serialize, Deserialize)]
pub struct JsonFileReport {
    pub path: String,
    pub language: String,
    pub issues: Vec<JsonIssue>,
    pub suppressed_count: usize,
}

#[derive(Serialize, Deserialize)]
pub struct JsonIssue {
    pub severity: String,
    pub line: usize,
    pub column: usize,
    pub message: String,
    pub snippet: String,
    pub suggestion: String,
    pub category: String,
}

#[derive(Serialize, Deserialize)]
pub struct JsonSummary {
    pub files_scanned: usize,
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
}

fn issue_to_json(issue: &Issue) -> JsonIssue {
    JsonIssue {
        severity: issue.severity.to_string(),
        line: issue.line,
        column: issue.column,
        message: issue.message.clone(),
        snippet: issue.snippet.clone(),
        suggestion: issue.suggestion.clone(),
        category: issue.category.as_str().to_string(),
    }
}

/// Build the JSON report structure for a set of files.
pub fn build_json(reports: &[FileReport]) -> JsonReport {
    let mut totals = SeverityCounts::default();
    let files = reports
        .iter()
        .map(|report| {
            totals.merge(report.counts());
            JsonFileReport {
                path: report.path.display().to_string(),
                language: report.language.as_str().to_string(),
                issues: sorted_for_report(&report.issues)
                    .into_iter()
                    .map(issue_to_json)
                    .collect(),
                suppressed_count: report.suppressed.len(),
            }
        })
        .collect();

    JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        files,
        summary: JsonSummary {
            files_scanned: reports.len(),
            errors: totals.errors,
            warnings: totals.warnings,
            infos: totals.infos,
        },
    }
}

/// Write the JSON report to stdout.
pub fn write_json(reports: &[FileReport]) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&build_json(reports))?;
    println!("{}", json);
    Ok(())
}
