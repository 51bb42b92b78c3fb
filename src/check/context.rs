//! Per-file check context and lazily derived file-scope facts.
//!
//! `CheckContext` is the read-only input every checker receives: the file
//! path, the 1-indexed source lines, and the detected language. Checkers
//! never mutate it.
//!
//! `FileScope` holds file-wide facts (string assignments, variable usages,
//! per-line usage kinds) that checkers consult to drop findings that the
//! wider context shows to be harmless, e.g. a "path-like" variable that is
//! only ever printed, or `exec()` in a Qt codebase. It is built at most
//! once per file, on first use.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use once_cell::sync::OnceCell;
use regex::Regex;

use crate::language::Language;

use super::heuristics::{
    is_file_path_context, looks_like_file_path, variable_path_argument, DISPLAY_INDICATORS,
};
use super::scanner::is_comment_line;

/// Read-only context for one checker run over one file.
pub struct CheckContext {
    path: PathBuf,
    lines: Vec<String>,
    language: Language,
    scope: OnceCell<FileScope>,
}

impl CheckContext {
    /// Build a context from already-decoded file content.
    pub fn new<P: Into<PathBuf>>(path: P, content: &str, language: Language) -> Self {
        CheckContext {
            path: path.into(),
            lines: content.split('\n').map(str::to_string).collect(),
            language,
            scope: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Iterate source lines with 1-based line numbers.
    pub fn lines(&self) -> impl Iterator<Item = (usize, &str)> {
        self.lines.iter().enumerate().map(|(i, l)| (i + 1, l.as_str()))
    }

    /// Fetch a line by its 1-based number.
    pub fn line(&self, number: usize) -> Option<&str> {
        self.lines.get(number.checked_sub(1)?).map(String::as_str)
    }

    /// File-scope facts, built on first access.
    pub fn scope(&self) -> &FileScope {
        self.scope.get_or_init(|| FileScope::build(self))
    }
}

/// What a string literal assigned to a variable looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Path,
    EnvSyntax,
    PlatformVar,
    Other,
}

/// A variable assignment to a string literal.
#[derive(Debug, Clone)]
pub struct Assignment {
    pub line: usize,
    pub literal: String,
    pub kind: LiteralKind,
}

/// How a variable is consumed somewhere in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageKind {
    FileIo,
    EnvApi,
}

/// Per-line usage flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineUsage {
    pub file_io: bool,
    pub env_api: bool,
    pub display: bool,
}

/// Tokens indicating the line reads or writes environment variables.
const ENV_API_INDICATORS: &[&str] = &[
    "getenv(",
    "os.environ",
    "environ[",
    "environ.get(",
    "process.env",
    "os.Getenv",
    "LookupEnv",
    "env::var",
    "std::env",
    "GetEnvironmentVariable",
    ".environment[",
];

lazy_static! {
    static ref ASSIGNMENT: Regex =
        Regex::new(r#"([A-Za-z_][A-Za-z0-9_]*)\s*:?=\s*["']([^"']*)["']"#).unwrap();
    static ref ENV_SYNTAX: Regex = Regex::new(r"%[A-Z_]+%").unwrap();
    static ref GETENV_VAR: Regex =
        Regex::new(r"[Gg]etenv\s*\(\s*([A-Za-z_][A-Za-z0-9_.]*)\s*[,)]").unwrap();
}

const PLATFORM_VAR_NAMES: &[&str] = &["TEMP", "TMP", "USERPROFILE", "APPDATA"];

const QT_MARKERS: &[&str] = &[
    "#include <Q",
    "QApplication",
    "QCoreApplication",
    "QGuiApplication",
    "Q_OBJECT",
];

/// File-wide facts used to confirm or drop context-sensitive findings.
pub struct FileScope {
    assignments: HashMap<String, Assignment>,
    usages: HashMap<String, Vec<UsageKind>>,
    line_usage: Vec<LineUsage>,
    uses_qt: bool,
}

impl FileScope {
    fn build(ctx: &CheckContext) -> FileScope {
        let mut assignments = HashMap::new();
        let mut usages: HashMap<String, Vec<UsageKind>> = HashMap::new();
        let mut line_usage = Vec::with_capacity(ctx.line_count());
        let mut uses_qt = false;

        for (_, line) in ctx.lines() {
            let commented = is_comment_line(line, ctx.language());

            line_usage.push(if commented {
                LineUsage::default()
            } else {
                LineUsage {
                    file_io: is_file_path_context(line, ctx.language()),
                    env_api: ENV_API_INDICATORS.iter().any(|t| line.contains(t)),
                    display: DISPLAY_INDICATORS.iter().any(|t| line.contains(t)),
                }
            });

            if commented {
                continue;
            }

            if !uses_qt && QT_MARKERS.iter().any(|m| line.contains(m)) {
                uses_qt = true;
            }

            if let Some(caps) = ASSIGNMENT.captures(line) {
                let var = caps[1].to_string();
                let literal = caps[2].to_string();
                let kind = classify_literal(&literal);
                assignments.insert(
                    var,
                    Assignment {
                        line: line_usage.len(),
                        literal,
                        kind,
                    },
                );
            }

            if let Some(var) = variable_path_argument(line, ctx.language()) {
                usages.entry(var).or_default().push(UsageKind::FileIo);
            }
            if let Some(caps) = GETENV_VAR.captures(line) {
                usages
                    .entry(caps[1].to_string())
                    .or_default()
                    .push(UsageKind::EnvApi);
            }
        }

        FileScope {
            assignments,
            usages,
            line_usage,
            uses_qt,
        }
    }

    /// Whether a variable used as a file path is worth reporting.
    ///
    /// Dropped when the variable is assigned a string literal that does
    /// not look like a path; confirmed otherwise.
    pub fn variable_path_is_real(&self, var: &str) -> bool {
        if let Some(assignment) = self.assignments.get(var) {
            if assignment.kind != LiteralKind::Path {
                return false;
            }
        }
        match self.usages.get(var) {
            None => true,
            Some(kinds) => kinds.is_empty() || kinds.contains(&UsageKind::FileIo) || kinds.contains(&UsageKind::EnvApi),
        }
    }

    /// The assignment recorded for a variable, if any.
    pub fn assignment(&self, var: &str) -> Option<&Assignment> {
        self.assignments.get(var)
    }

    fn usage(&self, line: usize) -> LineUsage {
        line.checked_sub(1)
            .and_then(|i| self.line_usage.get(i))
            .copied()
            .unwrap_or_default()
    }

    /// Whether the given 1-based line reaches an environment API.
    pub fn line_reaches_env_api(&self, line: usize) -> bool {
        self.usage(line).env_api
    }

    /// Whether the given 1-based line only produces display output.
    pub fn line_is_display_only(&self, line: usize) -> bool {
        let usage = self.usage(line);
        usage.display && !usage.env_api && !usage.file_io
    }

    /// Whether the file shows signs of using Qt (whose `exec()` is
    /// cross-platform, unlike the POSIX exec family).
    pub fn uses_qt(&self) -> bool {
        self.uses_qt
    }
}

fn classify_literal(literal: &str) -> LiteralKind {
    if ENV_SYNTAX.is_match(literal) {
        return LiteralKind::EnvSyntax;
    }
    if PLATFORM_VAR_NAMES.contains(&literal.trim()) {
        return LiteralKind::PlatformVar;
    }
    if looks_like_file_path(literal) {
        return LiteralKind::Path;
    }
    LiteralKind::Other
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(content: &str, language: Language) -> CheckContext {
        CheckContext::new("test.py", content, language)
    }

    #[test]
    fn test_lines_are_one_indexed() {
        let c = ctx("a\nb\nc", Language::Python);
        let collected: Vec<_> = c.lines().collect();
        assert_eq!(collected[0], (1, "a"));
        assert_eq!(collected[2], (3, "c"));
        assert_eq!(c.line(2), Some("b"));
        assert_eq!(c.line(0), None);
    }

    #[test]
    fn test_scope_records_path_assignment() {
        let c = ctx("data_dir = \"/home/user/data\"\nopen(data_dir)\n", Language::Python);
        let scope = c.scope();
        let assignment = scope.assignment("data_dir").expect("assignment recorded");
        assert_eq!(assignment.kind, LiteralKind::Path);
        assert!(scope.variable_path_is_real("data_dir"));
    }

    #[test]
    fn test_scope_drops_non_path_variable() {
        let c = ctx("name = \"alice\"\nopen(name)\n", Language::Python);
        assert!(!c.scope().variable_path_is_real("name"));
        // Unknown variables stay reportable.
        assert!(c.scope().variable_path_is_real("other"));
    }

    #[test]
    fn test_line_usage_kinds() {
        let content = "import os\nprint(\"TEMP\")\nvalue = os.getenv(\"TEMP\")\n";
        let c = ctx(content, Language::Python);
        let scope = c.scope();
        assert!(scope.line_is_display_only(2));
        assert!(scope.line_reaches_env_api(3));
        assert!(!scope.line_is_display_only(3));
    }

    #[test]
    fn test_qt_detection() {
        let c = CheckContext::new(
            "app.cpp",
            "#include <QApplication>\nint main() { return app.exec(); }\n",
            Language::Cpp,
        );
        assert!(c.scope().uses_qt());

        let plain = CheckContext::new("a.cpp", "int main() { exec(); }\n", Language::Cpp);
        assert!(!plain.scope().uses_qt());
    }
}
