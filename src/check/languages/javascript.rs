//! JavaScript/TypeScript-specific checks. One checker serves both.

use lazy_static::lazy_static;
use regex::Regex;

use crate::check::context::CheckContext;
use crate::check::scanner::is_comment_line;
use crate::check::traits::Checker;
use crate::check::types::{Category, Issue, Severity};

lazy_static! {
    static ref DRIVE_PATH: Regex = Regex::new(r#"["'][A-Z]:[/\\]"#).unwrap();
}

pub struct JavaScriptChecker;

impl Checker for JavaScriptChecker {
    fn name(&self) -> &'static str {
        "javascript"
    }

    fn run(&self, ctx: &CheckContext) -> Vec<Issue> {
        let mut issues = Vec::new();
        for (line_num, line) in ctx.lines() {
            if is_comment_line(line, ctx.language()) {
                continue;
            }
            if let Some(m) = DRIVE_PATH.find(line) {
                issues.push(Issue::new(
                    Severity::Error,
                    line_num,
                    m.start(),
                    "Hardcoded Windows drive path detected",
                    line,
                    "Use path.join() or path.resolve() with process.platform checks",
                    Category::Path,
                ));
            }
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;

    #[test]
    fn test_drive_path_flagged() {
        let ctx = CheckContext::new(
            "a.js",
            "const dir = \"C:/Program Files/app\";\n",
            Language::JavaScript,
        );
        let issues = JavaScriptChecker.run(&ctx);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Error);
    }

    #[test]
    fn test_runs_for_typescript() {
        let ctx = CheckContext::new(
            "a.ts",
            "let p = 'D:\\\\data';\n// 'C:\\\\old' removed\n",
            Language::TypeScript,
        );
        let issues = JavaScriptChecker.run(&ctx);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].line, 1);
    }
}
