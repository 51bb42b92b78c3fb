//! The runner that sequences checkers over a file.
//!
//! The runner owns composition only: it selects the generic checkers plus
//! the language-specific ones for the file's tag, invokes each in declared
//! order, and concatenates their issues in per-checker order. It performs
//! no pattern matching itself.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;

use crate::language::Language;

use super::context::CheckContext;
use super::languages::checkers_for;
use super::suppress::{filter_suppressed, parse_suppressions};
use super::traits::Checker;
use super::types::{FileReport, Issue};
use super::{ApiChecker, EnvChecker, FileChecker, PathChecker, SystemChecker};

/// Generic checkers, run for every file regardless of language.
static GENERIC_CHECKERS: &[&dyn Checker] = &[
    &PathChecker,
    &ApiChecker,
    &FileChecker,
    &EnvChecker,
    &SystemChecker,
];

/// Runs the applicable checkers for one file and aggregates their issues.
#[derive(Default)]
pub struct Runner;

impl Runner {
    pub fn new() -> Self {
        Runner
    }

    /// Run all applicable checkers over the context, in declared order.
    ///
    /// A checker that panics contributes zero issues; its siblings are
    /// unaffected. Running twice over the same context yields the same
    /// issues in the same order.
    pub fn check(&self, ctx: &CheckContext) -> Vec<Issue> {
        let mut issues = Vec::new();
        for checker in GENERIC_CHECKERS
            .iter()
            .chain(checkers_for(ctx.language()))
        {
            issues.extend(run_isolated(*checker, ctx));
        }
        issues
    }

    /// Detect the language, run the checkers, and apply inline
    /// suppressions. The convenience entry point for hosts holding file
    /// content.
    pub fn check_content(&self, path: &Path, content: &str) -> FileReport {
        let language = Language::from_path(path);
        let ctx = CheckContext::new(path, content, language);
        let issues = self.check(&ctx);

        let suppressions = parse_suppressions(content);
        let (active, suppressed) = filter_suppressed(issues, &suppressions);

        FileReport {
            path: path.to_path_buf(),
            language,
            issues: active,
            suppressed,
        }
    }
}

/// Invoke one checker, isolating any panic to that checker.
fn run_isolated(checker: &dyn Checker, ctx: &CheckContext) -> Vec<Issue> {
    match catch_unwind(AssertUnwindSafe(|| checker.run(ctx))) {
        Ok(issues) => issues,
        Err(_) => {
            tracing::warn!(
                checker = checker.name(),
                path = %ctx.path().display(),
                "checker panicked; continuing without its results"
            );
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::types::{Category, Severity};

    struct PanickingChecker;

    impl Checker for PanickingChecker {
        fn name(&self) -> &'static str {
            "panicking"
        }

        fn run(&self, _ctx: &CheckContext) -> Vec<Issue> {
            panic!("induced failure");
        }
    }

    fn ctx(content: &str, name: &str) -> CheckContext {
        CheckContext::new(name, content, Language::from_path(name))
    }

    #[test]
    fn test_generic_checkers_always_run() {
        let ctx = ctx("path = \"/home/user/data\"\n", "notes.xyz");
        let issues = Runner::new().check(&ctx);
        assert!(!issues.is_empty());
        assert!(issues.iter().all(|i| i.category == Category::Path));
    }

    #[test]
    fn test_language_checkers_compose_with_generic() {
        let content = "if os.name == \"nt\":\n    path = \"C:\\\\Users\\\\x\"\n";
        let issues = Runner::new().check(&ctx(content, "a.py"));
        // Generic path checker and Python-specific checker both report.
        assert!(issues.iter().any(|i| i.category == Category::Path));
        assert!(issues.iter().any(|i| i.category == Category::Platform));
    }

    #[test]
    fn test_determinism() {
        let content = "os.system(\"dir\")\npath = \"C:\\\\x\\\\y\"\nh = os.getenv(\"TEMP\")\n";
        let context = ctx(content, "a.py");
        let runner = Runner::new();
        let first: Vec<String> = runner.check(&context).iter().map(|i| format!("{:?}", i)).collect();
        let second: Vec<String> = runner.check(&context).iter().map(|i| format!("{:?}", i)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_panicking_checker_is_isolated() {
        let context = ctx("path = \"/home/user/data\"\n", "a.py");
        let healthy = run_isolated(&PathChecker, &context);
        assert!(!healthy.is_empty());

        let broken = run_isolated(&PanickingChecker, &context);
        assert!(broken.is_empty());

        // The healthy checker's output is unaffected by the failure.
        let after = run_isolated(&PathChecker, &context);
        assert_eq!(healthy.len(), after.len());
    }

    #[test]
    fn test_check_content_applies_suppressions() {
        let content = "# portacheck:ignore-next-line PATH - fixture\npath = \"/home/user/data\"\n";
        let report = Runner::new().check_content(Path::new("a.py"), content);
        assert!(report.issues.iter().all(|i| i.category != Category::Path));
        assert!(!report.suppressed.is_empty());
    }

    #[test]
    fn test_error_severity_surfaces() {
        let report = Runner::new().check_content(Path::new("a.py"), "os.system(\"dir\")\n");
        assert!(report.has_errors());
        assert!(report
            .issues
            .iter()
            .any(|i| i.severity == Severity::Error && i.category == Category::System));
    }
}
