//! Swift-specific checks.

use lazy_static::lazy_static;
use regex::Regex;

use crate::check::context::CheckContext;
use crate::check::heuristics::is_file_path_context;
use crate::check::scanner::{inside_string_literal, is_comment_line};
use crate::check::traits::Checker;
use crate::check::types::{Category, Issue, Severity};

use super::common::{check_hardcoded_platform_paths, check_variable_paths, PathIdioms};

static IDIOMS: PathIdioms = PathIdioms {
    drive_suggestion: "Use FileManager.default.urls, homeDirectoryForCurrentUser, or #if os() guards",
    unix_suggestion: "Use FileManager.default.urls or homeDirectoryForCurrentUser for portability",
    variable_message: "Variable used as file path; ensure it is built with FileManager URLs or path components",
    variable_suggestion: "Use URL(fileURLWithPath:), FileManager.default.urls, or path components for cross-platform paths",
    // File-path URL APIs legitimately mention "URL" on the line.
    url_exempt_tokens: &["fileURLWithPath", "atPath"],
};

lazy_static! {
    static ref PLATFORM_DETECTION: Regex = Regex::new(
        r"#(?:else)?if\s+os\s*\(|ProcessInfo\.processInfo\.(?:operatingSystemVersion|isMacCatalystApp)"
    )
    .unwrap();
    static ref WINDOWS_ENV_SUBSCRIPT: Vec<(Regex, &'static str)> = ["USERPROFILE", "APPDATA", "TEMP", "TMP"]
        .iter()
        .map(|var| {
            let pattern = format!(r#"\.environment\s*\[\s*["']{}["']\s*\]"#, regex::escape(var));
            (Regex::new(&pattern).unwrap(), *var)
        })
        .collect();
}

pub struct SwiftChecker;

impl Checker for SwiftChecker {
    fn name(&self) -> &'static str {
        "swift"
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

fn check_platform_detection(ctx: &CheckContext, issues: &mut Vec<Issue>) {
    for (line_num, line) in ctx.lines() {
        if is_comment_line(line, ctx.language()) {
            continue;
        }
        if let Some(m) = PLATFORM_DETECTION.find(line) {
            if !inside_string_literal(line, m.start()) {
                issues.push(Issue::new(
                    Severity::Info,
                    line_num,
                    m.start(),
                    "Platform detection used; ensure all target platforms are handled",
                    line,
                    "Document platform assumptions and test on each target (Windows, macOS, Linux)",
                    Category::Platform,
                ));
            }
        }
    }
}

fn check_windows_env_in_path_context(ctx: &CheckContext, issues: &mut Vec<Issue>) {
    for (line_num, line) in ctx.lines() {
        if is_comment_line(line, ctx.language()) {
            continue;
        }
        if !is_file_path_context(line, ctx.language()) {
            continue;
        }
        for (pattern, var) in WINDOWS_ENV_SUBSCRIPT.iter() {
            if let Some(m) = pattern.find(line) {
                if !inside_string_literal(line, m.start()) {
                    issues.push(Issue::new(
                        Severity::Warning,
                        line_num,
                        m.start(),
                        format!("Windows-specific env var in path context: {}", var),
                        line,
                        "Use FileManager.default.urls or homeDirectoryForCurrentUser, or #if os(Windows) guards",
                        Category::Env,
                    ));
                    break;
                }
            }
        }
    }
}
