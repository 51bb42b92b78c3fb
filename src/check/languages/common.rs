//! Helpers shared by the language-specific checkers.
//!
//! Most ecosystems get the same two path rules - hardcoded platform
//! roots in file-path context, and variables used as paths - differing
//! only in the suggested fix. Checkers compose these with their own
//! idiom checks.

use lazy_static::lazy_static;
use regex::Regex;

use crate::check::context::CheckContext;
use crate::check::heuristics::{
    is_file_path_context, is_likely_url_or_display, looks_like_file_path, variable_path_argument,
};
use crate::check::scanner::is_comment_line;
use crate::check::types::{Category, Issue, Severity};

/// Per-language wording for the shared path rules.
pub struct PathIdioms {
    /// Fix for a hardcoded drive-letter path.
    pub drive_suggestion: &'static str,
    /// Fix for a hardcoded Unix-rooted path.
    pub unix_suggestion: &'static str,
    /// Finding text for a variable used as a path.
    pub variable_message: &'static str,
    /// Fix for a variable used as a path.
    pub variable_suggestion: &'static str,
    /// Tokens that mark a line as path API usage even when it mentions
    /// URLs (Swift's URL(fileURLWithPath:) family).
    pub url_exempt_tokens: &'static [&'static str],
}

lazy_static! {
    static ref DRIVE_PATH: Regex = Regex::new(r#"["'][A-Za-z]:[/\\]"#).unwrap();
    static ref UNIX_ROOTS: Vec<(Regex, &'static str)> = vec![
        (Regex::new(r#"["']/home/"#).unwrap(), "Unix home directory"),
        (Regex::new(r#"["']/Users/"#).unwrap(), "macOS home directory"),
        (Regex::new(r#"["']/usr/"#).unwrap(), "Unix system directory"),
        (Regex::new(r#"["']/etc/"#).unwrap(), "Unix config directory"),
        (Regex::new(r#"["']/tmp/"#).unwrap(), "Unix temp directory"),
        (Regex::new(r#"["']/var/"#).unwrap(), "Unix variable directory"),
    ];
}

fn url_or_display(line: &str, literal: Option<&str>, idioms: &PathIdioms) -> bool {
    if idioms.url_exempt_tokens.iter().any(|t| line.contains(t)) {
        return false;
    }
    is_likely_url_or_display(line, literal)
}

/// Hardcoded drive-letter and Unix-rooted paths, gated on the line being
/// real file-path API usage.
pub fn check_hardcoded_platform_paths(
    ctx: &CheckContext,
    idioms: &PathIdioms,
    issues: &mut Vec<Issue>,
) {
    for (line_num, line) in ctx.lines() {
        if is_comment_line(line, ctx.language()) {
            continue;
        }
        if !is_file_path_context(line, ctx.language()) {
            continue;
        }
        if url_or_display(line, None, idioms) {
            continue;
        }

        if let Some(m) = DRIVE_PATH.find(line) {
            if !url_or_display(line, Some(m.as_str()), idioms) {
                issues.push(Issue::new(
                    Severity::Error,
                    line_num,
                    m.start(),
                    "Hardcoded Windows drive path detected",
                    line,
                    idioms.drive_suggestion,
                    Category::Path,
                ));
                continue;
            }
        }

        for (pattern, description) in UNIX_ROOTS.iter() {
            let Some(m) = pattern.find(line) else {
                continue;
            };
            if !looks_like_file_path(m.as_str()) {
                continue;
            }
            if url_or_display(line, Some(m.as_str()), idioms) {
                continue;
            }
            issues.push(Issue::new(
                Severity::Error,
                line_num,
                m.start(),
                format!("Hardcoded {} path detected", description),
                line,
                idioms.unix_suggestion,
                Category::Path,
            ));
            break;
        }
    }
}

/// Variables passed as path arguments, dropped when file scope shows the
/// variable never holds a path.
pub fn check_variable_paths(ctx: &CheckContext, idioms: &PathIdioms, issues: &mut Vec<Issue>) {
    for (line_num, line) in ctx.lines() {
        if is_comment_line(line, ctx.language()) {
            continue;
        }
        if !is_file_path_context(line, ctx.language()) {
            continue;
        }
        if url_or_display(line, None, idioms) {
            continue;
        }
        let Some(var) = variable_path_argument(line, ctx.language()) else {
            continue;
        };
        if !ctx.scope().variable_path_is_real(&var) {
            continue;
        }
        issues.push(Issue::new(
            Severity::Warning,
            line_num,
            0,
            idioms.variable_message,
            line,
            idioms.variable_suggestion,
            Category::Path,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;

    const IDIOMS: PathIdioms = PathIdioms {
        drive_suggestion: "drive fix",
        unix_suggestion: "unix fix",
        variable_message: "variable used as file path",
        variable_suggestion: "variable fix",
        url_exempt_tokens: &[],
    };

    #[test]
    fn test_drive_path_requires_path_context() {
        let flagged = CheckContext::new(
            "m.go",
            "f, err := os.Open(\"C:/data/config.ini\")\n",
            Language::Go,
        );
        let mut issues = Vec::new();
        check_hardcoded_platform_paths(&flagged, &IDIOMS, &mut issues);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Error);

        // Same literal without a file API on the line is not flagged here.
        let bare = CheckContext::new("m.go", "s := \"C:/data/config.ini\"\n", Language::Go);
        issues.clear();
        check_hardcoded_platform_paths(&bare, &IDIOMS, &mut issues);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_url_line_skipped() {
        let ctx = CheckContext::new(
            "m.go",
            "resp, err := fetch(\"https://host/home/page\")\n",
            Language::Go,
        );
        let mut issues = Vec::new();
        check_hardcoded_platform_paths(&ctx, &IDIOMS, &mut issues);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_variable_path_flagged_and_scope_gated() {
        let content = "cfg := \"/etc/app.conf\"\nf, err := os.Open(cfg)\n";
        let ctx = CheckContext::new("m.go", content, Language::Go);
        let mut issues = Vec::new();
        check_variable_paths(&ctx, &IDIOMS, &mut issues);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].line, 2);

        // A variable holding a non-path literal is dropped.
        let content = "name := \"service\"\nf, err := os.Open(name)\n";
        let ctx = CheckContext::new("m.go", content, Language::Go);
        issues.clear();
        check_variable_paths(&ctx, &IDIOMS, &mut issues);
        assert!(issues.is_empty());
    }
}
