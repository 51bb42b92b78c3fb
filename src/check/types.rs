//! Core types for check results.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::language::Language;

use super::suppress::SuppressedIssue;

/// Severity levels for issues.
///
/// Report ordering and summary counts follow declaration order:
/// errors first, info last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    /// Sort rank: lower sorts first in reports.
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Error => 0,
            Severity::Warning => 1,
            Severity::Info => 2,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Severity::Error),
            "warning" => Ok(Severity::Warning),
            "info" => Ok(Severity::Info),
            _ => Err(format!("unknown severity: {}", s)),
        }
    }
}

/// Issue categories.
///
/// A closed set of short stable tags used for grouping and filtering.
/// Report subgrouping within a severity follows declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "PATH")]
    Path,
    #[serde(rename = "API")]
    Api,
    #[serde(rename = "FILE")]
    File,
    #[serde(rename = "ENV")]
    Env,
    #[serde(rename = "SYSTEM")]
    System,
    #[serde(rename = "PLATFORM")]
    Platform,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Path => "PATH",
            Category::Api => "API",
            Category::File => "FILE",
            Category::Env => "ENV",
            Category::System => "SYSTEM",
            Category::Platform => "PLATFORM",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "PATH" => Some(Category::Path),
            "API" => Some(Category::Api),
            "FILE" => Some(Category::File),
            "ENV" => Some(Category::Env),
            "SYSTEM" => Some(Category::System),
            "PLATFORM" => Some(Category::Platform),
            _ => None,
        }
    }

    /// Sort rank within a severity group.
    pub fn rank(&self) -> u8 {
        match self {
            Category::Path => 0,
            Category::Api => 1,
            Category::File => 2,
            Category::Env => 3,
            Category::System => 4,
            Category::Platform => 5,
        }
    }

    /// All declared categories, in report order.
    pub fn all() -> &'static [Category] {
        &[
            Category::Path,
            Category::Api,
            Category::File,
            Category::Env,
            Category::System,
            Category::Platform,
        ]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single cross-platform compatibility finding.
///
/// Issues are created once by a checker and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    /// 1-based line number.
    pub line: usize,
    /// Byte column of the match, or 0 when not character-precise.
    pub column: usize,
    pub message: String,
    /// The offending source text, trimmed.
    pub snippet: String,
    pub suggestion: String,
    pub category: Category,
}

impl Issue {
    /// Build an issue. `line` is 1-based; a zero line is clamped to 1.
    pub fn new(
        severity: Severity,
        line: usize,
        column: usize,
        message: impl Into<String>,
        snippet: &str,
        suggestion: impl Into<String>,
        category: Category,
    ) -> Self {
        Issue {
            severity,
            line: line.max(1),
            column,
            message: message.into(),
            snippet: snippet.trim().to_string(),
            suggestion: suggestion.into(),
            category,
        }
    }
}

/// Per-severity counts for a set of issues.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
}

impl SeverityCounts {
    pub fn of(issues: &[Issue]) -> Self {
        let mut counts = SeverityCounts::default();
        for issue in issues {
            match issue.severity {
                Severity::Error => counts.errors += 1,
                Severity::Warning => counts.warnings += 1,
                Severity::Info => counts.infos += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.errors + self.warnings + self.infos
    }

    /// Merge another count into this one.
    pub fn merge(&mut self, other: SeverityCounts) {
        self.errors += other.errors;
        self.warnings += other.warnings;
        self.infos += other.infos;
    }
}

/// Result of checking one file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub language: Language,
    pub issues: Vec<Issue>,
    /// Issues silenced by inline directives; kept for reporting.
    #[serde(default)]
    pub suppressed: Vec<SuppressedIssue>,
}

impl FileReport {
    pub fn counts(&self) -> SeverityCounts {
        SeverityCounts::of(&self.issues)
    }

    /// Check if there are any error-severity issues.
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }
}
