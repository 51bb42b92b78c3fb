//! Shell/system invocation checks.
//!
//! Direct shell calls inherit the platform's shell semantics; commands
//! named in them frequently exist on one platform only. Each call site
//! yields one Issue: an ERROR when the command string names a
//! platform-specific command, a WARNING otherwise.

use lazy_static::lazy_static;
use regex::Regex;

use super::context::CheckContext;
use super::scanner::{inside_string_literal, is_comment_line};
use super::traits::Checker;
use super::types::{Category, Issue, Severity};

/// Call tokens that hand a command line to the OS.
static SYSTEM_CALLS: &[&str] = &[
    "system(",
    "popen(",
    "execv(",
    "execvp(",
    "execl(",
    "CreateProcess",
    "ShellExecute",
    "fork()",
    "vfork()",
];

/// Commands that only exist under cmd.exe.
static WINDOWS_COMMANDS: &[&str] = &[
    "dir", "del", "cls", "copy", "move", "xcopy", "rmdir", "ipconfig", "tasklist", "taskkill",
    "findstr", "ver",
];

/// Commands that only exist on Unix-like systems.
static UNIX_COMMANDS: &[&str] = &[
    "ls", "rm", "cp", "mv", "chmod", "chown", "grep", "ifconfig", "which", "clear", "touch",
];

lazy_static! {
    /// First word of the quoted command handed to a shell call.
    static ref COMMAND_ARG: Regex =
        Regex::new(r#"(?:system|popen|execvp?|execl)\s*\(\s*["']\s*([A-Za-z0-9_.-]+)"#).unwrap();
}

pub struct SystemChecker;

impl Checker for SystemChecker {
    fn name(&self) -> &'static str {
        "system"
    }

    fn run(&self, ctx: &CheckContext) -> Vec<Issue> {
        let mut issues = Vec::new();

        for (line_num, line) in ctx.lines() {
            if is_comment_line(line, ctx.language()) {
                continue;
            }

            for call in SYSTEM_CALLS {
                let Some(idx) = line.find(call) else {
                    continue;
                };
                if inside_string_literal(line, idx) {
                    continue;
                }

                if let Some(platform_command) = platform_command(line) {
                    issues.push(Issue::new(
                        Severity::Error,
                        line_num,
                        idx,
                        format!(
                            "Shell invocation with platform-specific command {:?}",
                            platform_command
                        ),
                        line,
                        "Use a portable API for the operation, or branch on the platform before invoking the shell",
                        Category::System,
                    ));
                } else {
                    issues.push(Issue::new(
                        Severity::Warning,
                        line_num,
                        idx,
                        format!("System call detected: {}", call.trim_end_matches('(')),
                        line,
                        "Ensure command syntax is compatible across platforms or use platform-specific guards",
                        Category::System,
                    ));
                }
                break; // one Issue per call site
            }
        }

        issues
    }
}

/// The platform-bound command a shell call passes, if any.
fn platform_command(line: &str) -> Option<&str> {
    let caps = COMMAND_ARG.captures(line)?;
    let command = caps.get(1)?.as_str();
    if WINDOWS_COMMANDS.contains(&command) || UNIX_COMMANDS.contains(&command) {
        Some(command)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;

    fn run(content: &str, name: &str) -> Vec<Issue> {
        let language = Language::from_path(name);
        let ctx = CheckContext::new(name, content, language);
        SystemChecker.run(&ctx)
    }

    #[test]
    fn test_windows_command_is_error() {
        let issues = run("os.system(\"dir\")\n", "a.py");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Error);
        assert_eq!(issues[0].category, Category::System);
        assert!(issues[0].message.contains("dir"));
    }

    #[test]
    fn test_unix_command_is_error() {
        let issues = run("system(\"rm -rf build\");\n", "a.c");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Error);
        assert!(issues[0].message.contains("rm"));
    }

    #[test]
    fn test_generic_shell_call_is_warning() {
        let issues = run("os.system(cmd)\n", "a.py");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert!(issues[0].message.contains("system"));
    }

    #[test]
    fn test_commented_call_not_flagged() {
        let issues = run("# os.system(\"dir\")\n", "a.py");
        assert!(issues.is_empty());
    }

    #[test]
    fn test_portable_command_is_warning() {
        let issues = run("os.system(\"python build.py\")\n", "a.py");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
    }

    #[test]
    fn test_one_issue_per_call_site() {
        let issues = run("r = popen(\"ls -la\");\n", "a.c");
        assert_eq!(issues.len(), 1);
    }
}
