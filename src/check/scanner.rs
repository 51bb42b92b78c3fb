//! Single-line comment and string awareness.
//!
//! Checkers call into this module before reporting a position that could
//! legitimately appear in commented-out code or in display text.
//!
//! Each line is evaluated independently with single-line heuristics: block
//! comments spanning multiple lines are NOT tracked, so a flagged pattern
//! inside the body of a `/* ... */` spanning lines is a known false
//! negative. This is a deliberate precision/speed trade-off, kept from the
//! original design of the checker.

use crate::language::Language;

/// Line-comment and block-comment prefixes that start a comment line.
pub fn comment_prefixes(language: Language) -> &'static [&'static str] {
    match language {
        Language::Python => &["#"],
        Language::Lua => &["--"],
        Language::C
        | Language::Cpp
        | Language::JavaScript
        | Language::TypeScript
        | Language::Java
        | Language::Kotlin
        | Language::Go
        | Language::Rust
        | Language::CSharp
        | Language::Swift => &["//", "/*", "*"],
        // Unknown files get the superset so commented-out code in any
        // style is still suppressed.
        Language::Unknown => &["#", "//", "/*", "*", "--"],
    }
}

/// Check if a whole line is a comment for the given language.
pub fn is_comment_line(line: &str, language: Language) -> bool {
    let trimmed = line.trim_start();
    comment_prefixes(language)
        .iter()
        .any(|prefix| trimmed.starts_with(prefix))
}

/// Check if a byte position in a line falls within a string literal.
///
/// Supports double-quoted, single-quoted, and backtick strings with
/// escape handling.
pub fn inside_string_literal(line: &str, pos: usize) -> bool {
    let mut in_string = false;
    let mut string_char = None;
    let mut escaped = false;

    for (i, ch) in line.char_indices() {
        if i >= pos {
            return in_string;
        }

        if escaped {
            escaped = false;
            continue;
        }

        if ch == '\\' && in_string {
            escaped = true;
            continue;
        }

        if ch == '"' || ch == '\'' || ch == '`' {
            if !in_string {
                in_string = true;
                string_char = Some(ch);
            } else if Some(ch) == string_char {
                in_string = false;
                string_char = None;
            }
        }
    }

    in_string
}

/// Check if a byte position lies inside a comment or a string literal.
///
/// Scans the line from its start, tracking string state; a line-comment
/// marker found outside a string makes everything after it a comment.
pub fn inside_comment_or_string(line: &str, pos: usize, language: Language) -> bool {
    if let Some(start) = comment_start(line, language) {
        if pos >= start {
            return true;
        }
    }
    inside_string_literal(line, pos)
}

/// Byte offset where a line comment begins, if any, ignoring markers
/// inside string literals.
fn comment_start(line: &str, language: Language) -> Option<usize> {
    let markers: &[&str] = match language {
        Language::Python => &["#"],
        Language::Lua => &["--"],
        Language::Unknown => &["#", "//", "--"],
        _ => &["//"],
    };

    let bytes = line.as_bytes();
    for (i, _) in line.char_indices() {
        for marker in markers {
            if bytes[i..].starts_with(marker.as_bytes()) && !inside_string_literal(line, i) {
                return Some(i);
            }
        }
    }
    None
}
