//! Inline suppression of issues via comments.
//!
//! Supports suppression comments like:
//! - `// portacheck:ignore <CATEGORY> - <reason>`
//! - `// portacheck:ignore-next-line <CATEGORY> - <reason>`
//! - `// portacheck:ignore-file <CATEGORY> - <reason>`
//!
//! `<CATEGORY>` is one of the issue category tags (PATH, API, FILE, ENV,
//! SYSTEM, PLATFORM) or `*` for all. Suppressed issues are reported
//! separately, never silently dropped.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::types::{Category, Issue};

/// How a suppression applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuppressionType {
    /// Applies to the same line
    Line,
    /// Applies to the next line
    NextLine,
    /// Applies to the entire file
    File,
}

/// An inline suppression directive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suppression {
    /// Category tag to suppress (e.g. "PATH") or "*" for all
    pub category: String,
    /// Human-readable reason
    pub reason: String,
    /// Line number (0 for file-level)
    pub line: usize,
    /// How the suppression applies
    pub suppression_type: SuppressionType,
}

/// An issue that was suppressed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuppressedIssue {
    pub issue: Issue,
    pub suppression: Suppression,
}

lazy_static! {
    /// Patterns for matching suppression comments.
    static ref SUPPRESSION_PATTERNS: Vec<Regex> = vec![
        // C-family style: // portacheck:...
        Regex::new(r"//\s*portacheck:(ignore(?:-file|-next-line)?)\s+(\S+)\s*(?:-\s*(.*))?").unwrap(),
        // Python/shell style: # portacheck:...
        Regex::new(r"#\s*portacheck:(ignore(?:-file|-next-line)?)\s+(\S+)\s*(?:-\s*(.*))?").unwrap(),
        // Lua style: -- portacheck:...
        Regex::new(r"--\s*portacheck:(ignore(?:-file|-next-line)?)\s+(\S+)\s*(?:-\s*(.*))?").unwrap(),
        // Block comment style: /* portacheck:... */
        Regex::new(r"/\*\s*portacheck:(ignore(?:-file|-next-line)?)\s+(\S+)\s*(?:-\s*(.*?))?\s*\*/").unwrap(),
    ];
}

/// Parse suppression directives from file content.
pub fn parse_suppressions(content: &str) -> Vec<Suppression> {
    let mut suppressions = Vec::new();
    let mut in_header = true;

    for (line_num, line) in content.lines().enumerate() {
        let line_number = line_num + 1;
        let trimmed = line.trim();

        // Past the leading comment block, file-level directives no longer apply.
        if in_header && !is_comment_or_empty(trimmed) {
            in_header = false;
        }

        for pattern in SUPPRESSION_PATTERNS.iter() {
            if let Some(caps) = pattern.captures(line) {
                let directive = caps.get(1).map(|m| m.as_str()).unwrap_or("");
                let category = caps.get(2).map(|m| m.as_str()).unwrap_or("");
                let reason = caps
                    .get(3)
                    .map(|m| m.as_str().trim().to_string())
                    .unwrap_or_default();

                let suppression_type = match directive {
                    "ignore-file" => {
                        // File-level suppressions must be near the top of the file
                        if !in_header && line_number > 10 {
                            continue;
                        }
                        SuppressionType::File
                    }
                    "ignore-next-line" => SuppressionType::NextLine,
                    "ignore" => {
                        // Alone on its line the directive covers the next
                        // line; trailing after code it covers this line.
                        if let Some(m) = caps.get(0) {
                            let before = line[..m.start()]
                                .trim()
                                .trim_start_matches('/')
                                .trim_start_matches('#')
                                .trim_start_matches("--")
                                .trim_start_matches("/*")
                                .trim();
                            if before.is_empty() {
                                SuppressionType::NextLine
                            } else {
                                SuppressionType::Line
                            }
                        } else {
                            SuppressionType::NextLine
                        }
                    }
                    _ => continue,
                };

                suppressions.push(Suppression {
                    category: category.to_string(),
                    reason,
                    line: if suppression_type == SuppressionType::File {
                        0
                    } else {
                        line_number
                    },
                    suppression_type,
                });
                break; // Only one suppression per line
            }
        }
    }

    suppressions
}

fn is_comment_or_empty(line: &str) -> bool {
    line.is_empty()
        || line.starts_with("//")
        || line.starts_with('#')
        || line.starts_with("--")
        || line.starts_with("/*")
        || line.starts_with('*')
}

/// Check if an issue matches a suppression.
pub fn matches_suppression(issue: &Issue, suppression: &Suppression) -> bool {
    if suppression.category != "*" {
        match Category::parse(&suppression.category) {
            Some(category) => {
                if issue.category != category {
                    return false;
                }
            }
            None => return false,
        }
    }

    match suppression.suppression_type {
        SuppressionType::File => true,
        SuppressionType::Line => issue.line == suppression.line,
        SuppressionType::NextLine => issue.line == suppression.line + 1,
    }
}

/// Separate issues into active and suppressed.
pub fn filter_suppressed(
    issues: Vec<Issue>,
    suppressions: &[Suppression],
) -> (Vec<Issue>, Vec<SuppressedIssue>) {
    let mut active = Vec::new();
    let mut suppressed = Vec::new();

    for issue in issues {
        match suppressions.iter().find(|s| matches_suppression(&issue, s)) {
            Some(suppression) => suppressed.push(SuppressedIssue {
                issue,
                suppression: suppression.clone(),
            }),
            None => active.push(issue),
        }
    }

    (active, suppressed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::types::Severity;

    #[test]
    fn test_parse_suppressions_styles() {
        let content = "\n# portacheck:ignore-next-line PATH - fixture path\npath = \"C:\\\\data\"\n-- portacheck:ignore-next-line ENV\nlocal t = os.getenv(\"TEMP\")\n";
        let suppressions = parse_suppressions(content);
        assert_eq!(suppressions.len(), 2);
        assert_eq!(suppressions[0].category, "PATH");
        assert_eq!(suppressions[0].reason, "fixture path");
        assert_eq!(suppressions[0].suppression_type, SuppressionType::NextLine);
        assert_eq!(suppressions[0].line, 2);
        assert_eq!(suppressions[1].category, "ENV");
    }

    #[test]
    fn test_parse_file_level_suppression() {
        let content = "// portacheck:ignore-file SYSTEM - launcher script\nfunc main() {}\n";
        let suppressions = parse_suppressions(content);
        assert_eq!(suppressions.len(), 1);
        assert_eq!(suppressions[0].suppression_type, SuppressionType::File);
        assert_eq!(suppressions[0].line, 0);
    }

    #[test]
    fn test_trailing_ignore_covers_same_line() {
        let content = "system(\"dir\") // portacheck:ignore SYSTEM - windows-only tool\n";
        let suppressions = parse_suppressions(content);
        assert_eq!(suppressions.len(), 1);
        assert_eq!(suppressions[0].suppression_type, SuppressionType::Line);
        assert_eq!(suppressions[0].line, 1);
    }

    #[test]
    fn test_filter_suppressed() {
        let issues = vec![
            Issue::new(Severity::Error, 3, 0, "a", "x", "s", Category::Path),
            Issue::new(Severity::Warning, 5, 0, "b", "y", "s", Category::Env),
        ];
        let suppressions = vec![Suppression {
            category: "PATH".to_string(),
            reason: String::new(),
            line: 2,
            suppression_type: SuppressionType::NextLine,
        }];

        let (active, suppressed) = filter_suppressed(issues, &suppressions);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].category, Category::Env);
        assert_eq!(suppressed.len(), 1);
        assert_eq!(suppressed[0].issue.category, Category::Path);
    }

    #[test]
    fn test_wildcard_matches_every_category() {
        let issue = Issue::new(Severity::Info, 1, 0, "m", "c", "s", Category::Platform);
        let wildcard = Suppression {
            category: "*".to_string(),
            reason: String::new(),
            line: 0,
            suppression_type: SuppressionType::File,
        };
        assert!(matches_suppression(&issue, &wildcard));

        let unknown = Suppression {
            category: "NOPE".to_string(),
            ..wildcard
        };
        assert!(!matches_suppression(&issue, &unknown));
    }
}
