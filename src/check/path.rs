//! Path-related checks: hardcoded separators, absolute roots, and
//! import casing collisions.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::graph::extract_imports;

use super::context::CheckContext;
use super::scanner::is_comment_line;
use super::traits::Checker;
use super::types::{Category, Issue, Severity};

/// Escape sequences that make a backslash on the line an escape, not a
/// path separator.
const ESCAPE_SEQUENCES: &[&str] = &[
    "\\n", "\\t", "\\r", "\\b", "\\f", "\\v", "\\a", "\\\"", "\\'", "\\\\",
];

lazy_static! {
    /// Backslash used as a path separator, not as an escape.
    static ref PATH_SEP: Regex =
        Regex::new(r#"[A-Za-z0-9_/]\\[A-Za-z0-9_/]|["']\w*:\\|["']\w+\\\w+"#).unwrap();

    /// A quoted absolute-ish path opener.
    static ref QUOTED_PATH: Regex = Regex::new(r#"["']([A-Z]:)?[/\\]"#).unwrap();
}

/// Absolute path roots that pin code to one platform.
static HARDCODED_ROOTS: &[(&str, &str)] = &[
    ("\"C:\\", "Windows drive letter"),
    ("'C:\\", "Windows drive letter"),
    ("\"/home/", "Unix home directory"),
    ("'/home/", "Unix home directory"),
    ("\"/Users/", "macOS home directory"),
    ("'/Users/", "macOS home directory"),
    ("\"/usr/", "Unix system directory"),
    ("'/usr/", "Unix system directory"),
    ("\"/etc/", "Unix config directory"),
    ("'/etc/", "Unix config directory"),
    ("\"/tmp/", "Unix temp directory"),
    ("'/tmp/", "Unix temp directory"),
    ("\"/var/", "Unix variable directory"),
    ("'/var/", "Unix variable directory"),
];

pub struct PathChecker;

impl Checker for PathChecker {
    fn name(&self) -> &'static str {
        "path"
    }

    fn run(&self, ctx: &CheckContext) -> Vec<Issue> {
        let mut issues = Vec::new();
        check_path_separators(ctx, &mut issues);
        check_hardcoded_roots(ctx, &mut issues);
        check_import_casing(ctx, &mut issues);
        issues
    }
}

/// Hardcoded separators: `\` in path contexts, plus a warning for
/// well-known Unix directories in quoted paths.
fn check_path_separators(ctx: &CheckContext, issues: &mut Vec<Issue>) {
    for (line_num, line) in ctx.lines() {
        if line.contains('\\') && !is_comment_line(line, ctx.language()) && PATH_SEP.is_match(line)
        {
            let is_escape = ESCAPE_SEQUENCES.iter().any(|esc| line.contains(esc));
            if !is_escape {
                issues.push(Issue::new(
                    Severity::Error,
                    line_num,
                    line.find('\\').unwrap_or(0),
                    "Hardcoded Windows path separator (backslash) detected",
                    line,
                    "Use the platform's path-join facility (os.path.join, std::filesystem::path, path.join)",
                    Category::Path,
                ));
            }
        }

        if QUOTED_PATH.is_match(line)
            && (line.contains("/home/") || line.contains("/usr/") || line.contains("/etc/"))
            && !is_comment_line(line, ctx.language())
        {
            issues.push(Issue::new(
                Severity::Warning,
                line_num,
                0,
                "Hardcoded Unix-style path detected",
                line,
                "Use platform-agnostic path APIs instead",
                Category::Path,
            ));
        }
    }
}

/// Absolute paths rooted at platform-specific directories.
fn check_hardcoded_roots(ctx: &CheckContext, issues: &mut Vec<Issue>) {
    for (line_num, line) in ctx.lines() {
        if is_comment_line(line, ctx.language()) {
            continue;
        }
        for (root, description) in HARDCODED_ROOTS {
            if line.contains(root) {
                let suggestion = if *description == "Windows drive letter" {
                    "Build paths with a portable join facility (os.path.join, std::filesystem::path, path.join) from a configurable base"
                } else {
                    "Use environment variables or platform APIs (os.path.expanduser, getenv(\"HOME\"), etc.)"
                };
                issues.push(Issue::new(
                    Severity::Error,
                    line_num,
                    0,
                    format!("Hardcoded {} path detected", description),
                    line,
                    suggestion,
                    Category::Path,
                ));
            }
        }
    }
}

/// Imports whose names differ only by case collide on case-insensitive
/// filesystems (Windows, default macOS).
fn check_import_casing(ctx: &CheckContext, issues: &mut Vec<Issue>) {
    let mut seen: HashMap<String, (usize, String)> = HashMap::new();

    for import in extract_imports(ctx) {
        let folded = import.target.to_lowercase();
        match seen.get(&folded).cloned() {
            Some((first_line, first_target)) => {
                if first_target != import.target {
                    let snippet = ctx.line(import.line).unwrap_or("");
                    issues.push(Issue::new(
                        Severity::Warning,
                        import.line,
                        0,
                        format!(
                            "Import casing collides with {:?} (line {}) on case-insensitive filesystems",
                            first_target, first_line
                        ),
                        snippet,
                        "Use one canonical casing for every import of a module",
                        Category::Path,
                    ));
                }
            }
            None => {
                seen.insert(folded, (import.line, import.target));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;

    fn run(content: &str, language: Language, name: &str) -> Vec<Issue> {
        let ctx = CheckContext::new(name, content, language);
        PathChecker.run(&ctx)
    }

    #[test]
    fn test_backslash_separator_flagged() {
        let issues = run("p = \"data\\dir\\sub\"\n", Language::Python, "a.py");
        assert!(issues
            .iter()
            .any(|i| i.severity == Severity::Error && i.message.contains("backslash")));
    }

    #[test]
    fn test_windows_drive_path_flagged() {
        // Doubled backslashes read as escapes, but the drive-letter root
        // is still a hardcoded Windows path.
        let issues = run("path = \"C:\\\\Users\\\\test\"\n", Language::Python, "a.py");
        assert!(issues
            .iter()
            .any(|i| i.severity == Severity::Error && i.message.contains("Windows drive letter")));
        assert!(issues.iter().all(|i| i.category == Category::Path));
        assert!(issues[0].snippet.contains("C:"));
    }

    #[test]
    fn test_commented_path_not_flagged() {
        let issues = run("# path = \"C:\\\\Users\\\\test\"\n", Language::Python, "a.py");
        assert!(issues.is_empty());
    }

    #[test]
    fn test_escape_sequences_ignored() {
        let issues = run("s = \"col1\\tcol2\\n\"\n", Language::Python, "a.py");
        assert!(issues.is_empty());
    }

    #[test]
    fn test_hardcoded_unix_root() {
        let issues = run("config = \"/home/user/.config\"\n", Language::Python, "a.py");
        // Both the quoted-path warning and the hardcoded-root error fire;
        // multiple findings on one line are all reported.
        assert!(issues.iter().any(|i| i.severity == Severity::Error
            && i.message.contains("Unix home directory")));
        assert!(issues.iter().all(|i| i.category == Category::Path));
    }

    #[test]
    fn test_unknown_language_still_checked() {
        let issues = run("root: \"/home/user/data\"\n", Language::Unknown, "a.conf");
        assert!(!issues.is_empty());
    }

    #[test]
    fn test_import_casing_collision() {
        let content = "import utils\nimport Utils\n";
        let issues = run(content, Language::Python, "a.py");
        let collision: Vec<_> = issues
            .iter()
            .filter(|i| i.message.contains("casing"))
            .collect();
        assert_eq!(collision.len(), 1);
        assert_eq!(collision[0].line, 2);
    }

    #[test]
    fn test_consistent_casing_ok() {
        let content = "import utils\nimport utils\n";
        let issues = run(content, Language::Python, "a.py");
        assert!(issues.iter().all(|i| !i.message.contains("casing")));
    }
}
