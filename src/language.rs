//! Language detection from file extensions.
//!
//! Detection is a pure function of the (case-insensitive) extension.
//! Unrecognized extensions map to [`Language::Unknown`], in which case
//! only the generic checkers run.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Languages the checker knows about.
///
/// This is a closed set: language-specific checkers are selected by
/// matching on these tags, never by inspecting file contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    C,
    Cpp,
    JavaScript,
    TypeScript,
    Java,
    Kotlin,
    Go,
    Rust,
    CSharp,
    Swift,
    Lua,
    Unknown,
}

/// Extension (lowercase, without dot) to language.
static EXTENSIONS: phf::Map<&'static str, Language> = phf::phf_map! {
    "py" => Language::Python,
    "c" => Language::C,
    "h" => Language::C,
    "cpp" => Language::Cpp,
    "cc" => Language::Cpp,
    "cxx" => Language::Cpp,
    "hpp" => Language::Cpp,
    "hh" => Language::Cpp,
    "js" => Language::JavaScript,
    "jsx" => Language::JavaScript,
    "mjs" => Language::JavaScript,
    "ts" => Language::TypeScript,
    "tsx" => Language::TypeScript,
    "mts" => Language::TypeScript,
    "java" => Language::Java,
    "kt" => Language::Kotlin,
    "kts" => Language::Kotlin,
    "go" => Language::Go,
    "rs" => Language::Rust,
    "cs" => Language::CSharp,
    "swift" => Language::Swift,
    "lua" => Language::Lua,
};

impl Language {
    /// Detect the language from a file path's extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Language {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        Language::from_extension(ext)
    }

    /// Detect the language from an extension (with or without leading dot).
    pub fn from_extension(ext: &str) -> Language {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        EXTENSIONS.get(ext.as_str()).copied().unwrap_or(Language::Unknown)
    }

    /// Stable lowercase identifier for display and JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Java => "java",
            Language::Kotlin => "kotlin",
            Language::Go => "go",
            Language::Rust => "rust",
            Language::CSharp => "csharp",
            Language::Swift => "swift",
            Language::Lua => "lua",
            Language::Unknown => "unknown",
        }
    }

    /// All extensions with a known language, for file collection.
    pub fn known_extensions() -> impl Iterator<Item = &'static str> {
        EXTENSIONS.keys().copied()
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
