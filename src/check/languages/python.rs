//! Python-specific checks.

use lazy_static::lazy_static;
use regex::Regex;

use crate::check::context::CheckContext;
use crate::check::scanner::is_comment_line;
use crate::check::traits::Checker;
use crate::check::types::{Category, Issue, Severity};

lazy_static! {
    /// A quoted string with an internal separator, e.g. "data/raw" or "C:\x".
    static ref STRING_PATH: Regex =
        Regex::new(r#"["'][^"']*[A-Za-z0-9_][/\\][A-Za-z0-9_/\\][^"']*["']"#).unwrap();
}

pub struct PythonChecker;

impl Checker for PythonChecker {
    fn name(&self) -> &'static str {
        "python"
    }

    fn run(&self, ctx: &CheckContext) -> Vec<Issue> {
        let mut issues = Vec::new();
        check_os_name(ctx, &mut issues);
        check_string_paths(ctx, &mut issues);
        issues
    }
}

/// `os.name` only distinguishes nt/posix/java; `platform.system()` is the
/// richer facility.
fn check_os_name(ctx: &CheckContext, issues: &mut Vec<Issue>) {
    for (line_num, line) in ctx.lines() {
        if is_comment_line(line, ctx.language()) {
            continue;
        }
        if line.contains("os.name") && (line.contains("nt") || line.contains("posix")) {
            issues.push(Issue::new(
                Severity::Info,
                line_num,
                0,
                "Direct os.name comparison detected",
                line,
                "Consider platform.system() for more detailed platform detection",
                Category::Platform,
            ));
        }
    }
}

/// Paths built by string literals instead of pathlib / os.path.join.
fn check_string_paths(ctx: &CheckContext, issues: &mut Vec<Issue>) {
    for (line_num, line) in ctx.lines() {
        if is_comment_line(line, ctx.language()) {
            continue;
        }
        if !STRING_PATH.is_match(line) {
            continue;
        }
        // Escape sequences and f-strings produce too many false hits.
        if line.contains("\\n") || line.contains("\\t") || line.contains("f\"") || line.contains("f'") {
            continue;
        }
        if line.contains("os.path.join") || line.contains("pathlib") || line.contains("Path(") {
            continue;
        }
        issues.push(Issue::new(
            Severity::Warning,
            line_num,
            0,
            "String path concatenation detected",
            line,
            "Use pathlib.Path or os.path.join() for cross-platform path handling",
            Category::Path,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;

    fn run(content: &str) -> Vec<Issue> {
        let ctx = CheckContext::new("a.py", content, Language::Python);
        PythonChecker.run(&ctx)
    }

    #[test]
    fn test_os_name_comparison_is_info() {
        let issues = run("if os.name == \"nt\":\n    pass\n");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Info);
        assert_eq!(issues[0].category, Category::Platform);
    }

    #[test]
    fn test_string_path_flagged() {
        let issues = run("config = \"conf/app/settings.ini\"\n");
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("String path"));
    }

    #[test]
    fn test_joined_path_not_flagged() {
        let issues = run("config = os.path.join(\"conf/app\", name)\n");
        assert!(issues.is_empty());
    }

    #[test]
    fn test_pathlib_not_flagged() {
        let issues = run("config = Path(\"conf/app\") / name\n");
        assert!(issues.is_empty());
    }
}
