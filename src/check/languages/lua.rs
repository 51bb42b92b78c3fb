//! Lua-specific checks.

use lazy_static::lazy_static;
use regex::Regex;

use crate::check::context::CheckContext;
use crate::check::scanner::{inside_string_literal, is_comment_line};
use crate::check::traits::Checker;
use crate::check::types::{Category, Issue, Severity};

use super::common::{check_hardcoded_platform_paths, check_variable_paths, PathIdioms};

static IDIOMS: PathIdioms = PathIdioms {
    drive_suggestion: "Use package.config and portable path building (path separator)",
    unix_suggestion: "Use portable path building or os.getenv for home/tmp",
    variable_message: "Variable used as file path; ensure it is built with portable path segments",
    variable_suggestion: "Use the package.config path separator and portable segments",
    url_exempt_tokens: &[],
};

lazy_static! {
    static ref PLATFORM_DETECTION: Regex =
        Regex::new(r"jit\.os|jit\.arch|package\.config").unwrap();
}

pub struct LuaChecker;

impl Checker for LuaChecker {
    fn name(&self) -> &'static str {
        "lua"
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
        if let Some(m) = PLATFORM_DETECTION.find(line) {
            if !inside_string_literal(line, m.start()) {
                issues.push(Issue::new(
                    Severity::Info,
                    line_num,
                    m.start(),
                    "Platform or path config used; ensure all target platforms are handled",
                    line,
                    "Document platform assumptions and test on each target",
                    Category::Platform,
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;

    fn run(content: &str) -> Vec<Issue> {
        let ctx = CheckContext::new("init.lua", content, Language::Lua);
        LuaChecker.run(&ctx)
    }

    #[test]
    fn test_hardcoded_path_in_io_open() {
        let issues = run("local f = io.open(\"/tmp/app.log\", \"a\")\n");
        assert!(issues
            .iter()
            .any(|i| i.severity == Severity::Error && i.message.contains("Unix temp")));
    }

    #[test]
    fn test_jit_os_is_info() {
        let issues = run("if jit.os == \"Windows\" then\n");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Info);
    }

    #[test]
    fn test_lua_comment_honored() {
        let issues = run("-- io.open(\"/tmp/app.log\")\n");
        assert!(issues.is_empty());
    }
}
