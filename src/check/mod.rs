//! The detection engine: issue model, scanner, checkers, and the runner
//! that sequences them.

mod api;
mod context;
mod env;
mod file;
mod heuristics;
mod languages;
mod path;
mod runner;
mod scanner;
mod suppress;
mod system;
mod traits;
mod types;

pub use api::ApiChecker;
pub use context::{Assignment, CheckContext, FileScope, LiteralKind};
pub use env::EnvChecker;
pub use file::FileChecker;
pub use languages::{
    checkers_for, CSharpChecker, CppChecker, GoChecker, JavaChecker, JavaScriptChecker,
    LuaChecker, PythonChecker, RustChecker, SwiftChecker,
};
pub use path::PathChecker;
pub use runner::Runner;
pub use scanner::{inside_comment_or_string, inside_string_literal, is_comment_line};
pub use suppress::{
    filter_suppressed, matches_suppression, parse_suppressions, SuppressedIssue, Suppression,
    SuppressionType,
};
pub use system::SystemChecker;
pub use traits::Checker;
pub use types::{Category, FileReport, Issue, Severity, SeverityCounts};
