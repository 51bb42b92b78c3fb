//! C/C++-specific checks. One checker serves both languages.

use crate::check::context::CheckContext;
use crate::check::scanner::{inside_comment_or_string, is_comment_line};
use crate::check::traits::Checker;
use crate::check::types::{Category, Issue, Severity};

/// Windows-exclusive typedefs.
static WINDOWS_TYPES: &[&str] = &["DWORD", "HANDLE", "LPSTR"];

pub struct CppChecker;

impl Checker for CppChecker {
    fn name(&self) -> &'static str {
        "cpp"
    }

    fn run(&self, ctx: &CheckContext) -> Vec<Issue> {
        let mut issues = Vec::new();
        check_filesystem_usage(ctx, &mut issues);
        check_windows_types(ctx, &mut issues);
        issues
    }
}

fn check_filesystem_usage(ctx: &CheckContext, issues: &mut Vec<Issue>) {
    for (line_num, line) in ctx.lines() {
        if is_comment_line(line, ctx.language()) {
            continue;
        }
        if line.contains("<filesystem>") || line.contains("std::filesystem") {
            issues.push(Issue::new(
                Severity::Info,
                line_num,
                0,
                "std::filesystem usage detected (requires C++17)",
                line,
                "Ensure C++17 is enabled and available on all target platforms",
                Category::Api,
            ));
        }
    }
}

fn check_windows_types(ctx: &CheckContext, issues: &mut Vec<Issue>) {
    for (line_num, line) in ctx.lines() {
        if is_comment_line(line, ctx.language()) {
            continue;
        }
        for ty in WINDOWS_TYPES {
            if let Some(idx) = line.find(ty) {
                if !inside_comment_or_string(line, idx, ctx.language()) {
                    issues.push(Issue::new(
                        Severity::Error,
                        line_num,
                        idx,
                        format!("Windows-specific type detected: {}", ty),
                        line,
                        "Use standard C++ types or add platform guards",
                        Category::Api,
                    ));
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;

    fn run(content: &str, language: Language) -> Vec<Issue> {
        let ctx = CheckContext::new("m.cpp", content, language);
        CppChecker.run(&ctx)
    }

    #[test]
    fn test_filesystem_is_info() {
        let issues = run("#include <filesystem>\n", Language::Cpp);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Info);
    }

    #[test]
    fn test_windows_type_is_error() {
        let issues = run("DWORD status = 0;\n", Language::Cpp);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Error);
        assert!(issues[0].message.contains("DWORD"));
    }

    #[test]
    fn test_also_runs_for_c() {
        let issues = run("HANDLE h;\n", Language::C);
        assert_eq!(issues.len(), 1);
    }

    #[test]
    fn test_commented_type_not_flagged() {
        let issues = run("// HANDLE is the Win32 type\n", Language::Cpp);
        assert!(issues.is_empty());
    }
}
