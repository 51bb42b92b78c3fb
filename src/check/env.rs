//! Environment-variable checks: Windows interpolation syntax and
//! variable names that differ by platform.

use lazy_static::lazy_static;
use regex::Regex;

use super::context::CheckContext;
use super::scanner::is_comment_line;
use super::traits::Checker;
use super::types::{Category, Issue, Severity};

lazy_static! {
    static ref WINDOWS_ENV_SYNTAX: Regex = Regex::new(r"%[A-Z_]+%").unwrap();
    static ref PLATFORM_VARS: Vec<(Regex, &'static str, &'static str)> = vec![
        (
            Regex::new(r"\bUSERPROFILE\b").unwrap(),
            "USERPROFILE",
            "Use HOME on Unix/macOS",
        ),
        (
            Regex::new(r"\bAPPDATA\b").unwrap(),
            "APPDATA",
            "Use XDG_CONFIG_HOME on Linux, ~/Library on macOS",
        ),
        (
            Regex::new(r"\bTEMP\b").unwrap(),
            "TEMP",
            "Use TMPDIR on Unix/macOS",
        ),
        (
            Regex::new(r"\bTMP\b").unwrap(),
            "TMP",
            "Use TMPDIR on Unix/macOS",
        ),
    ];
}

pub struct EnvChecker;

impl Checker for EnvChecker {
    fn name(&self) -> &'static str {
        "env"
    }

    fn run(&self, ctx: &CheckContext) -> Vec<Issue> {
        let mut issues = Vec::new();
        check_windows_syntax(ctx, &mut issues);
        check_platform_vars(ctx, &mut issues);
        issues
    }
}

/// `%VAR%` only expands under cmd.exe; on other shells it is literal text.
fn check_windows_syntax(ctx: &CheckContext, issues: &mut Vec<Issue>) {
    for (line_num, line) in ctx.lines() {
        if is_comment_line(line, ctx.language()) {
            continue;
        }
        let Some(m) = WINDOWS_ENV_SYNTAX.find(line) else {
            continue;
        };
        // Display-only strings never reach an environment API.
        if ctx.scope().line_is_display_only(line_num) {
            continue;
        }
        issues.push(Issue::new(
            Severity::Warning,
            line_num,
            m.start(),
            "Windows-specific environment variable syntax (%VAR%) detected",
            line,
            "Use os.getenv() (Python), std::env::var (Rust), or process.env (Node.js)",
            Category::Env,
        ));
    }
}

/// Variable names that exist on one platform family only.
fn check_platform_vars(ctx: &CheckContext, issues: &mut Vec<Issue>) {
    for (line_num, line) in ctx.lines() {
        if is_comment_line(line, ctx.language()) {
            continue;
        }
        for (pattern, var, suggestion) in PLATFORM_VARS.iter() {
            let Some(m) = pattern.find(line) else {
                continue;
            };
            if ctx.scope().line_is_display_only(line_num) {
                continue;
            }
            // A name fed to an env API is a live lookup; a bare mention is
            // informational.
            let severity = if ctx.scope().line_reaches_env_api(line_num) {
                Severity::Warning
            } else {
                Severity::Info
            };
            issues.push(Issue::new(
                severity,
                line_num,
                m.start(),
                format!("Windows-specific environment variable: {}", var),
                line,
                *suggestion,
                Category::Env,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;

    fn run(content: &str, name: &str) -> Vec<Issue> {
        let language = Language::from_path(name);
        let ctx = CheckContext::new(name, content, language);
        EnvChecker.run(&ctx)
    }

    #[test]
    fn test_windows_syntax_flagged() {
        let issues = run("path = \"%USERPROFILE%\\\\data\"\n", "a.py");
        assert!(issues
            .iter()
            .any(|i| i.severity == Severity::Warning && i.message.contains("%VAR%")));
    }

    #[test]
    fn test_commented_syntax_not_flagged() {
        let issues = run("# expand %PATH% first\n", "a.py");
        assert!(issues.is_empty());
    }

    #[test]
    fn test_display_only_syntax_skipped() {
        let issues = run("print(\"set %DEBUG% to enable\")\n", "a.py");
        assert!(issues.iter().all(|i| !i.message.contains("%VAR%")));
    }

    #[test]
    fn test_env_api_lookup_is_warning() {
        let issues = run("home = os.getenv(\"USERPROFILE\")\n", "a.py");
        assert!(issues
            .iter()
            .any(|i| i.severity == Severity::Warning && i.message.contains("USERPROFILE")));
    }

    #[test]
    fn test_bare_mention_is_info() {
        let issues = run("candidates = [\"TEMP\", \"fallback\"]\n", "a.py");
        assert!(issues
            .iter()
            .any(|i| i.severity == Severity::Info && i.message.contains("TEMP")));
    }

    #[test]
    fn test_tmpdir_not_confused_with_tmp() {
        let issues = run("d = os.getenv(\"TMPDIR\")\n", "a.py");
        assert!(issues.is_empty());
    }
}
