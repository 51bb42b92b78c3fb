//! Portacheck - cross-platform compatibility checker.
//!
//! Portacheck scans source files in a dozen languages for constructs
//! likely to break when code moves between operating systems: hardcoded
//! path separators and absolute roots, platform-exclusive APIs and
//! imports, implicit file encodings, Windows-style environment variable
//! syntax, and shell calls naming platform-bound commands.
//!
//! Detection is deliberately pattern/heuristic based - no AST, no type
//! checking. False positives and negatives are accepted in exchange for
//! speed and breadth across languages.
//!
//! # Architecture
//!
//! - `language`: extension-based language detection
//! - `check`: the engine - issue model, comment/string scanner, the
//!   checker trait, generic and language-specific checkers, and the
//!   runner that sequences them
//! - `report`: text, colored, and JSON output
//! - `graph`: import extraction and file dependency graphs
//! - `config`: optional YAML configuration
//! - `cli`: the host layer (file collection, parallel fan-out, exit codes)
//!
//! # Adding a language
//!
//! Add the extension mapping in `language.rs`, implement `Checker` under
//! `src/check/languages/`, and register it in `languages/mod.rs`.

pub mod check;
pub mod cli;
pub mod config;
pub mod graph;
pub mod language;
pub mod report;

pub use check::{
    Category, CheckContext, Checker, FileReport, Issue, Runner, Severity, SeverityCounts,
};
pub use config::Config;
pub use language::Language;
