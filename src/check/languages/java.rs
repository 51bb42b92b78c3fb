//! Java/Kotlin-specific checks. One checker serves both.
//!
//! These target standard-library limitations: `java.io.File` path
//! handling, default-charset readers and writers, and shell-dependent
//! process launching.

use lazy_static::lazy_static;
use regex::Regex;

use crate::check::context::CheckContext;
use crate::check::heuristics::{is_file_path_context, is_likely_url_or_display, looks_like_file_path};
use crate::check::scanner::{inside_string_literal, is_comment_line};
use crate::check::traits::Checker;
use crate::check::types::{Category, Issue, Severity};

use super::common::{check_hardcoded_platform_paths, check_variable_paths, PathIdioms};

static IDIOMS: PathIdioms = PathIdioms {
    drive_suggestion: "Use Paths.get() or Path.of() with portable segments",
    unix_suggestion: "Use environment variables or Paths.get() with portable segments",
    variable_message: "Variable used as file path; ensure it is built with Paths.get() or Path APIs",
    variable_suggestion: "Use Paths.get() or Path.resolve() for cross-platform paths",
    url_exempt_tokens: &[],
};

lazy_static! {
    static ref FILE_CTOR: Regex = Regex::new(r"\bnew\s+File\s*\(").unwrap();
    static ref PATH_LITERAL: Regex = Regex::new(r#"["']([^"']*[/\\][^"']*)["']"#).unwrap();
    static ref SEP_CONCAT: Regex = Regex::new(
        r#"["'][^"']*["']\s*\+\s*["']\s*[/\\]\s*["']|["']\s*[/\\]\s*["']\s*\+|\+\s*File\.separator\s*\+"#
    )
    .unwrap();
    static ref OS_PROPERTY: Regex =
        Regex::new(r#"System\.getProperty\s*\(\s*["'](os\.name|file\.separator)["']"#).unwrap();
    static ref PROCESS_BUILDER: Regex = Regex::new(r#"new\s+ProcessBuilder\s*\(\s*["']"#).unwrap();
}

pub struct JavaChecker;

impl Checker for JavaChecker {
    fn name(&self) -> &'static str {
        "java"
    }

    fn run(&self, ctx: &CheckContext) -> Vec<Issue> {
        let mut issues = Vec::new();
        check_file_ctor_paths(ctx, &mut issues);
        check_reader_writer_encoding(ctx, &mut issues);
        check_platform_properties(ctx, &mut issues);
        check_process_builder(ctx, &mut issues);
        check_hardcoded_platform_paths(ctx, &IDIOMS, &mut issues);
        check_variable_paths(ctx, &IDIOMS, &mut issues);
        issues
    }
}

/// `new File("a/b")` bakes separators in; string concatenation as a path
/// does the same.
fn check_file_ctor_paths(ctx: &CheckContext, issues: &mut Vec<Issue>) {
    for (line_num, line) in ctx.lines() {
        if is_comment_line(line, ctx.language()) {
            continue;
        }
        if line.contains("Paths.get(") || line.contains("Path.of(") {
            continue;
        }

        if let Some(ctor) = FILE_CTOR.find(line) {
            if !inside_string_literal(line, ctor.start()) {
                for lit in PATH_LITERAL.captures_iter(line) {
                    let content = &lit[1];
                    if !looks_like_file_path(content)
                        && !content.contains('/')
                        && !content.contains('\\')
                    {
                        continue;
                    }
                    if is_likely_url_or_display(line, Some(&lit[0])) {
                        continue;
                    }
                    issues.push(Issue::new(
                        Severity::Warning,
                        line_num,
                        lit.get(0).map(|m| m.start()).unwrap_or(0),
                        "File path from string literal; use Paths.get() or Path.of() for cross-platform paths",
                        line,
                        "Use java.nio.file.Paths.get() or Path.of() and avoid hardcoded separators",
                        Category::Path,
                    ));
                    break;
                }
            }
        }

        if line.contains('+')
            && (line.contains('/') || line.contains("File.separator"))
            && is_file_path_context(line, ctx.language())
        {
            if let Some(m) = SEP_CONCAT.find(line) {
                if !inside_string_literal(line, m.start()) {
                    issues.push(Issue::new(
                        Severity::Warning,
                        line_num,
                        m.start(),
                        "String concatenation used as path",
                        line,
                        "Use Paths.get() or Path.resolve() with Path segments for cross-platform paths",
                        Category::Path,
                    ));
                }
            }
        }
    }
}

/// FileReader/FileWriter silently use the platform default charset.
fn check_reader_writer_encoding(ctx: &CheckContext, issues: &mut Vec<Issue>) {
    for (line_num, line) in ctx.lines() {
        if is_comment_line(line, ctx.language()) {
            continue;
        }
        if line.contains("Charset")
            || line.contains("StandardCharsets")
            || line.contains("InputStreamReader")
            || line.contains("OutputStreamWriter")
        {
            continue;
        }
        for pattern in ["new FileReader(", "new FileWriter("] {
            if let Some(idx) = line.find(pattern) {
                if !inside_string_literal(line, idx) {
                    issues.push(Issue::new(
                        Severity::Warning,
                        line_num,
                        idx,
                        "FileReader/FileWriter use the platform default encoding",
                        line,
                        "Use Files.newBufferedReader(path, StandardCharsets.UTF_8) or InputStreamReader with an explicit Charset",
                        Category::File,
                    ));
                    break;
                }
            }
        }
    }
}

fn check_platform_properties(ctx: &CheckContext, issues: &mut Vec<Issue>) {
    for (line_num, line) in ctx.lines() {
        if is_comment_line(line, ctx.language()) {
            continue;
        }
        if let Some(m) = OS_PROPERTY.find(line) {
            if !inside_string_literal(line, m.start()) {
                issues.push(Issue::new(
                    Severity::Info,
                    line_num,
                    m.start(),
                    "Platform-specific property access; ensure all target platforms are handled",
                    line,
                    "Use File.separator or java.nio.file.Path APIs where possible; document platform assumptions",
                    Category::Platform,
                ));
            }
        }
    }
}

/// ProcessBuilder with a single string hands the whole line to a shell.
fn check_process_builder(ctx: &CheckContext, issues: &mut Vec<Issue>) {
    for (line_num, line) in ctx.lines() {
        if is_comment_line(line, ctx.language()) {
            continue;
        }
        if let Some(m) = PROCESS_BUILDER.find(line) {
            if !inside_string_literal(line, m.start()) {
                issues.push(Issue::new(
                    Severity::Warning,
                    line_num,
                    m.start(),
                    "ProcessBuilder with a single string invokes a shell; behavior is platform-specific",
                    line,
                    "Use ProcessBuilder with an argument array and avoid shell-builtin commands",
                    Category::System,
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;

    fn run(content: &str, language: Language) -> Vec<Issue> {
        let ctx = CheckContext::new("Main.java", content, language);
        JavaChecker.run(&ctx)
    }

    #[test]
    fn test_file_ctor_with_separator_literal() {
        let issues = run("File f = new File(\"conf/app.properties\");\n", Language::Java);
        assert!(issues.iter().any(|i| i.message.contains("string literal")));
    }

    #[test]
    fn test_paths_get_not_flagged() {
        let issues = run("Path p = Paths.get(\"conf\", \"app.properties\");\n", Language::Java);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_separator_concat() {
        let issues = run(
            "OutputStream out = new FileOutputStream(dir + \"/\" + name);\n",
            Language::Java,
        );
        assert!(issues.iter().any(|i| i.message.contains("concatenation")));
    }

    #[test]
    fn test_filereader_default_charset() {
        let issues = run("Reader r = new FileReader(file);\n", Language::Java);
        assert!(issues.iter().any(|i| i.category == Category::File));
    }

    #[test]
    fn test_filereader_with_charset_ok() {
        let issues = run(
            "Reader r = new InputStreamReader(s, StandardCharsets.UTF_8); // new FileReader(\n",
            Language::Java,
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn test_os_name_property_is_info() {
        let issues = run(
            "String os = System.getProperty(\"os.name\");\n",
            Language::Java,
        );
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Info);
        assert_eq!(issues[0].category, Category::Platform);
    }

    #[test]
    fn test_process_builder_single_string() {
        let issues = run(
            "Process p = new ProcessBuilder(\"ls -la\").start();\n",
            Language::Kotlin,
        );
        assert!(issues.iter().any(|i| i.category == Category::System));
    }

    #[test]
    fn test_hardcoded_path_in_file_context() {
        let issues = run(
            "Reader r = new FileReader(\"/home/deploy/app.cfg\");\n",
            Language::Java,
        );
        assert!(issues
            .iter()
            .any(|i| i.severity == Severity::Error && i.message.contains("Unix home")));
    }
}
