//! Integration tests for the full check pipeline.
//!
//! These run the runner and report generator against the testdata
//! fixtures and pin down the engine's observable guarantees: what gets
//! flagged, comment suppression, ordering, and determinism.

use std::path::PathBuf;

use portacheck::check::{Category, Runner, Severity};
use portacheck::report;

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

fn check_fixture(name: &str) -> portacheck::FileReport {
    let path = testdata_path().join(name);
    let content = std::fs::read_to_string(&path).expect("fixture should be readable");
    Runner::new().check_content(&path, &content)
}

#[test]
fn test_python_fixture_finds_all_hazard_families() {
    let report = check_fixture("sample.py");

    // Hardcoded Windows drive path -> PATH error with the literal in the snippet.
    let path_issue = report
        .issues
        .iter()
        .find(|i| i.category == Category::Path && i.severity == Severity::Error)
        .expect("hardcoded drive path should be flagged");
    assert_eq!(path_issue.line, 4);
    assert!(path_issue.snippet.contains("C:"));
    assert!(path_issue.suggestion.contains("join"));

    // os.system("dir") -> SYSTEM issue naming the Windows command.
    let system_issue = report
        .issues
        .iter()
        .find(|i| i.category == Category::System)
        .expect("shell call should be flagged");
    assert_eq!(system_issue.line, 5);
    assert!(system_issue.message.contains("dir"));

    // open() without encoding -> FILE warning.
    assert!(report
        .issues
        .iter()
        .any(|i| i.category == Category::File && i.line == 6));

    // getenv("USERPROFILE") -> ENV warning.
    assert!(report
        .issues
        .iter()
        .any(|i| i.category == Category::Env && i.severity == Severity::Warning));

    // os.name comparison -> PLATFORM info.
    assert!(report
        .issues
        .iter()
        .any(|i| i.category == Category::Platform && i.severity == Severity::Info));
}

#[test]
fn test_commented_pattern_produces_no_issue() {
    let report = check_fixture("sample.py");
    // Line 3 is a comment holding a drive-letter path.
    assert!(report.issues.iter().all(|i| i.line != 3));
}

#[test]
fn test_go_fixture() {
    let report = check_fixture("sample.go");

    assert!(report
        .issues
        .iter()
        .any(|i| i.category == Category::Api && i.message.contains("syscall")));
    assert!(report
        .issues
        .iter()
        .any(|i| i.category == Category::Path && i.severity == Severity::Error));
    assert!(report
        .issues
        .iter()
        .any(|i| i.category == Category::Platform && i.severity == Severity::Info));
}

#[test]
fn test_unknown_extension_still_gets_generic_checkers() {
    let report = check_fixture("settings.conf");

    assert_eq!(report.language, portacheck::Language::Unknown);
    assert!(report
        .issues
        .iter()
        .any(|i| i.category == Category::Path && i.snippet.contains("/home/user")));
    // No language-specific categories appear for unknown files.
    assert!(report
        .issues
        .iter()
        .all(|i| i.category != Category::Platform));
}

#[test]
fn test_inline_suppression() {
    let report = check_fixture("suppressed.py");

    assert!(report.issues.iter().all(|i| i.category != Category::Path));
    assert!(!report.suppressed.is_empty());
    assert_eq!(report.suppressed[0].suppression.category, "PATH");
}

#[test]
fn test_runs_are_deterministic() {
    let first = check_fixture("sample.py");
    let second = check_fixture("sample.py");

    assert_eq!(first.issues.len(), second.issues.len());
    for (a, b) in first.issues.iter().zip(second.issues.iter()) {
        assert_eq!(a.line, b.line);
        assert_eq!(a.message, b.message);
        assert_eq!(a.category, b.category);
        assert_eq!(a.severity, b.severity);
    }
}

#[test]
fn test_every_issue_has_declared_category_and_valid_line() {
    for fixture in ["sample.py", "sample.go", "settings.conf"] {
        let report = check_fixture(fixture);
        for issue in &report.issues {
            assert!(!issue.category.as_str().is_empty());
            assert!(Category::all().contains(&issue.category));
            assert!(issue.line >= 1);
        }
    }
}

#[test]
fn test_report_orders_severities() {
    let report = check_fixture("sample.py");
    let text = report::render_text(&report.path, &report.issues);

    let error_pos = text.find("ERRORS").expect("has errors section");
    let warning_pos = text.find("WARNINGS").expect("has warnings section");
    let info_pos = text.find("INFO (").expect("has info section");
    assert!(error_pos < warning_pos);
    assert!(warning_pos < info_pos);
    assert!(text.contains("Summary:"));
}
