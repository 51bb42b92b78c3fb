//! C#-specific checks.
//!
//! Platform-bound imports (DllImport, Microsoft.Win32, Mono.Unix) are
//! covered by the generic API checker; this adds path handling and
//! platform-detection notes.

use crate::check::context::CheckContext;
use crate::check::scanner::{inside_string_literal, is_comment_line};
use crate::check::traits::Checker;
use crate::check::types::{Category, Issue, Severity};

use super::common::{check_hardcoded_platform_paths, check_variable_paths, PathIdioms};

static IDIOMS: PathIdioms = PathIdioms {
    drive_suggestion: "Use Path.Combine, Path.GetFullPath, or Environment.GetFolderPath for portability",
    unix_suggestion: "Use environment variables or Path APIs for cross-platform paths",
    variable_message: "Variable used as file path; ensure it is built with Path.Combine or Path.GetFullPath",
    variable_suggestion: "Use Path.Combine, Path.GetFullPath, or Environment.GetFolderPath for portability",
    url_exempt_tokens: &[],
};

pub struct CSharpChecker;

impl Checker for CSharpChecker {
    fn name(&self) -> &'static str {
        "csharp"
    }

    fn run(&self, ctx: &CheckContext) -> Vec<Issue> {
        let mut issues = Vec::new();
        check_hardcoded_platform_paths(ctx, &IDIOMS, &mut issues);
        check_variable_paths(ctx, &IDIOMS, &mut issues);
        check_platform_detection(ctx, &mut issues);
        issues
    }
}

fn check_platform_detection(ctx: &CheckContext, issues: &mut Vec<Issue>) {
    for (line_num, line) in ctx.lines() {
        if is_comment_line(line, ctx.language()) {
            continue;
        }
        if line.contains("IsOSPlatform") && line.contains("OSPlatform.") {
            let idx = line.find("IsOSPlatform").unwrap_or(0);
            if !inside_string_literal(line, idx) {
                issues.push(Issue::new(
                    Severity::Info,
                    line_num,
                    idx,
                    "Platform detection used; ensure all target platforms are handled",
                    line,
                    "Document platform assumptions and test on each target",
                    Category::Platform,
                ));
            }
        }
    }
}
