//! File-operation checks: implicit text encodings and platform-specific
//! locking primitives.

use lazy_static::lazy_static;
use regex::Regex;

use crate::language::Language;

use super::context::CheckContext;
use super::scanner::{inside_string_literal, is_comment_line};
use super::traits::Checker;
use super::types::{Category, Issue, Severity};

lazy_static! {
    static ref PY_OPEN: Regex = Regex::new(r"\bopen\s*\(").unwrap();
    static ref PY_OPEN_MODE: Regex =
        Regex::new(r#"\bopen\s*\([^,)]+,\s*(?:mode\s*=\s*)?["']([a-z+]+)["']"#).unwrap();
    static ref PLATFORM_ENCODING: Regex =
        Regex::new(r#"(?i)encoding\s*=\s*["'](windows-1252|cp1252|latin-?1)["']"#).unwrap();
}

pub struct FileChecker;

impl Checker for FileChecker {
    fn name(&self) -> &'static str {
        "file"
    }

    fn run(&self, ctx: &CheckContext) -> Vec<Issue> {
        let mut issues = Vec::new();
        check_open_encoding(ctx, &mut issues);
        check_file_locking(ctx, &mut issues);
        check_platform_encodings(ctx, &mut issues);
        issues
    }
}

/// Python text-mode opens without an explicit encoding fall back to the
/// platform's locale encoding.
fn check_open_encoding(ctx: &CheckContext, issues: &mut Vec<Issue>) {
    if ctx.language() != Language::Python {
        return;
    }

    for (line_num, line) in ctx.lines() {
        if is_comment_line(line, ctx.language()) {
            continue;
        }
        let Some(m) = PY_OPEN.find(line) else {
            continue;
        };
        if inside_string_literal(line, m.start()) || line.contains("encoding=") {
            continue;
        }
        // Binary mode does not decode at all.
        if let Some(caps) = PY_OPEN_MODE.captures(line) {
            if caps[1].contains('b') {
                continue;
            }
        }
        issues.push(Issue::new(
            Severity::Warning,
            line_num,
            m.start(),
            "File open without explicit encoding",
            line,
            "Specify encoding=\"utf-8\" for text files to ensure consistent behavior across platforms",
            Category::File,
        ));
    }
}

/// flock/fcntl locking does not exist on Windows.
fn check_file_locking(ctx: &CheckContext, issues: &mut Vec<Issue>) {
    for (line_num, line) in ctx.lines() {
        if !line.contains("flock") && !line.contains("fcntl") {
            continue;
        }
        if is_comment_line(line, ctx.language()) {
            continue;
        }
        issues.push(Issue::new(
            Severity::Warning,
            line_num,
            0,
            "Unix-specific file locking API detected",
            line,
            "Use cross-platform file locking or platform-specific guards",
            Category::File,
        ));
    }
}

/// Single-platform encodings pin the file format to one OS family.
fn check_platform_encodings(ctx: &CheckContext, issues: &mut Vec<Issue>) {
    for (line_num, line) in ctx.lines() {
        if is_comment_line(line, ctx.language()) {
            continue;
        }
        if let Some(caps) = PLATFORM_ENCODING.captures(line) {
            issues.push(Issue::new(
                Severity::Warning,
                line_num,
                caps.get(0).map(|m| m.start()).unwrap_or(0),
                format!("Platform-specific encoding detected: {}", &caps[1]),
                line,
                "Use UTF-8 encoding for maximum cross-platform compatibility",
                Category::File,
            ));
        }
    }
}
