//! Go-specific checks.

use lazy_static::lazy_static;
use regex::Regex;

use crate::check::context::CheckContext;
use crate::check::heuristics::is_file_path_context;
use crate::check::scanner::{inside_string_literal, is_comment_line};
use crate::check::traits::Checker;
use crate::check::types::{Category, Issue, Severity};

use super::common::{check_hardcoded_platform_paths, check_variable_paths, PathIdioms};

static IDIOMS: PathIdioms = PathIdioms {
    drive_suggestion: "Use filepath.Join, os.Getenv, or runtime.GOOS guards for portability",
    unix_suggestion: "Use os.Getenv or filepath.Join with portable segments",
    variable_message: "Variable used as file path; ensure it is built with filepath.Join or os.Getenv",
    variable_suggestion: "Use path/filepath and os.Getenv for cross-platform paths",
    url_exempt_tokens: &[],
};

lazy_static! {
    static ref GOOS: Regex = Regex::new(r"runtime\.(GOOS|GOARCH)").unwrap();
    static ref WINDOWS_ENV_LOOKUP: Vec<(Regex, &'static str)> = ["USERPROFILE", "APPDATA", "TEMP", "TMP"]
        .iter()
        .map(|var| {
            let pattern = format!(
                r#"\b(?:os\.Getenv|os\.LookupEnv)\s*\(\s*["']{}["']"#,
                regex::escape(var)
            );
            (Regex::new(&pattern).unwrap(), *var)
        })
        .collect();
}

pub struct GoChecker;

impl Checker for GoChecker {
    fn name(&self) -> &'static str {
        "go"
    }

    fn run(&self, ctx: &CheckContext) -> Vec<Issue> {
        let mut issues = Vec::new();
        check_hardcoded_platform_paths(ctx, &IDIOMS, &mut issues);
        check_variable_paths(ctx, &IDIOMS, &mut issues);
        check_platform_detection(ctx, &mut issues);
        check_windows_env_in_path_context(ctx, &mut issues);
        issues
    }
}

/// runtime.GOOS / runtime.GOARCH switches deserve a note: every target
/// needs a branch.
fn check_platform_detection(ctx: &CheckContext, issues: &mut Vec<Issue>) {
    for (line_num, line) in ctx.lines() {
        if is_comment_line(line, ctx.language()) {
            continue;
        }
        if let Some(m) = GOOS.find(line) {
            if !inside_string_literal(line, m.start()) {
                issues.push(Issue::new(
                    Severity::Info,
                    line_num,
                    m.start(),
                    "Platform detection used; ensure all target platforms are handled",
                    line,
                    "Document platform assumptions and test on each target (GOOS/GOARCH)",
                    Category::Platform,
                ));
            }
        }
    }
}

/// Windows-only variable names looked up on a path-building line.
fn check_windows_env_in_path_context(ctx: &CheckContext, issues: &mut Vec<Issue>) {
    for (line_num, line) in ctx.lines() {
        if is_comment_line(line, ctx.language()) {
            continue;
        }
        if !is_file_path_context(line, ctx.language()) {
            continue;
        }
        for (pattern, var) in WINDOWS_ENV_LOOKUP.iter() {
            if let Some(m) = pattern.find(line) {
                if !inside_string_literal(line, m.start()) {
                    issues.push(Issue::new(
                        Severity::Warning,
                        line_num,
                        m.start(),
                        format!("Windows-specific env var in path context: {}", var),
                        line,
                        "Use portable alternatives (os.UserHomeDir, os.TempDir) or GOOS guards",
                        Category::Env,
                    ));
                    break;
                }
            }
        }
    }
}
