//! Shared path-context heuristics.
//!
//! The stricter language checkers gate their findings on these helpers to
//! avoid flagging URLs, display strings, and literals that merely look
//! path-ish. Like the rest of the engine they are textual heuristics, not
//! semantic analysis.

use lazy_static::lazy_static;
use regex::Regex;

use crate::language::Language;

/// Tokens indicating a line builds or prints human-facing output.
pub const DISPLAY_INDICATORS: &[&str] = &[
    "print(",
    "println",
    "printf",
    "eprintln",
    "console.",
    "log(",
    "logger.",
    "NSLog",
    "System.out",
    "fmt.Print",
    "repr(",
];

lazy_static! {
    static ref URL_SCHEME: Regex = Regex::new(r"[a-zA-Z][a-zA-Z0-9+.-]*://").unwrap();
}

/// Check if a string literal plausibly denotes a file path.
pub fn looks_like_file_path(literal: &str) -> bool {
    let lit = literal.trim().trim_matches(|c| c == '"' || c == '\'');
    if lit.len() < 2 || lit.contains("://") {
        return false;
    }
    if !lit.contains('/') && !lit.contains('\\') {
        return false;
    }
    lit.chars()
        .any(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

/// Check if a line (or a specific literal on it) is likely a URL or
/// display-only text rather than a real file path.
pub fn is_likely_url_or_display(line: &str, literal: Option<&str>) -> bool {
    if let Some(lit) = literal {
        if let Some(idx) = line.find(lit) {
            // The literal directly continues a URL scheme.
            let prefix = &line[..idx];
            if prefix.ends_with("://") || URL_SCHEME.is_match(lit) {
                return true;
            }
        }
    }
    URL_SCHEME.is_match(line) || DISPLAY_INDICATORS.iter().any(|d| line.contains(d))
}

/// File-path API tokens per language.
fn file_path_tokens(language: Language) -> &'static [&'static str] {
    match language {
        Language::Python => &[
            "open(", "Path(", "os.path", "shutil.", "os.remove", "os.chdir", "os.listdir",
            "exists(", "isfile(", "isdir(", "expanduser(", "abspath(", "realpath(",
        ],
        Language::Rust => &[
            "File::open", "File::create", "Path::new", "PathBuf::from", "fs::", "OpenOptions",
        ],
        Language::Go => &[
            "os.Open", "os.Create", "os.Stat", "os.ReadFile", "os.WriteFile", "os.Remove",
            "os.Mkdir", "ioutil.", "filepath.",
        ],
        Language::Java | Language::Kotlin => &[
            "new File", "Files.", "Paths.get", "Path.of", "FileInputStream", "FileOutputStream",
            "FileReader", "FileWriter", "RandomAccessFile",
        ],
        Language::Swift => &[
            "FileManager", "fileURLWithPath", "atPath", "contentsOfFile",
        ],
        Language::CSharp => &[
            "File.", "Directory.", "Path.", "StreamReader", "StreamWriter", "FileStream",
        ],
        Language::Lua => &[
            "io.open", "io.lines", "dofile", "loadfile", "os.remove", "os.rename",
        ],
        Language::JavaScript | Language::TypeScript => &[
            "fs.", "readFile", "writeFile", "path.", "createReadStream", "createWriteStream",
        ],
        Language::C | Language::Cpp => &[
            "fopen", "ifstream", "ofstream", "fstream", "std::filesystem", "opendir", "stat(",
        ],
        Language::Unknown => &[],
    }
}

/// Check if a line uses a file-path API of the given language.
pub fn is_file_path_context(line: &str, language: Language) -> bool {
    file_path_tokens(language).iter().any(|t| line.contains(t))
}

lazy_static! {
    static ref PY_VAR_PATH: Regex = Regex::new(
        r"\b(?:open|Path|exists|isfile|isdir|chdir|listdir|expanduser|abspath|realpath)\s*\(\s*([A-Za-z_][A-Za-z0-9_.]*)\s*[,)]"
    )
    .unwrap();
    static ref RS_VAR_PATH: Regex = Regex::new(
        r"\b(?:File::open|File::create|Path::new|PathBuf::from|fs::(?:read_to_string|read|write|remove_file|create_dir_all|create_dir|metadata))\s*\(\s*&?([A-Za-z_][A-Za-z0-9_.]*)\s*[,)]"
    )
    .unwrap();
    static ref GO_VAR_PATH: Regex = Regex::new(
        r"\bos\.(?:Open|Create|Stat|ReadFile|WriteFile|Remove|MkdirAll|Mkdir)\s*\(\s*([A-Za-z_][A-Za-z0-9_.]*)\s*[,)]"
    )
    .unwrap();
    static ref JAVA_VAR_PATH: Regex = Regex::new(
        r"\b(?:new\s+File|Paths\.get|Path\.of|new\s+FileReader|new\s+FileWriter|new\s+FileInputStream|new\s+FileOutputStream)\s*\(\s*([A-Za-z_][A-Za-z0-9_.]*)\s*[,)]"
    )
    .unwrap();
    static ref SWIFT_VAR_PATH: Regex =
        Regex::new(r"(?:atPath|contentsOfFile|fileURLWithPath)\s*:\s*([A-Za-z_][A-Za-z0-9_.]*)")
            .unwrap();
    static ref CS_VAR_PATH: Regex = Regex::new(
        r"\b(?:File\.[A-Za-z]+|Directory\.[A-Za-z]+|Path\.GetFullPath|new\s+StreamReader|new\s+StreamWriter|new\s+FileStream)\s*\(\s*([A-Za-z_][A-Za-z0-9_.]*)\s*[,)]"
    )
    .unwrap();
    static ref LUA_VAR_PATH: Regex = Regex::new(
        r"\b(?:io\.open|dofile|loadfile)\s*\(\s*([A-Za-z_][A-Za-z0-9_.]*)\s*[,)]"
    )
    .unwrap();
}

/// If a file-path API on this line takes a variable (not a string literal)
/// as its path argument, return the variable name.
pub fn variable_path_argument(line: &str, language: Language) -> Option<String> {
    let pattern: &Regex = match language {
        Language::Python => &PY_VAR_PATH,
        Language::Rust => &RS_VAR_PATH,
        Language::Go => &GO_VAR_PATH,
        Language::Java | Language::Kotlin => &JAVA_VAR_PATH,
        Language::Swift => &SWIFT_VAR_PATH,
        Language::CSharp => &CS_VAR_PATH,
        Language::Lua => &LUA_VAR_PATH,
        _ => return None,
    };

    pattern
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_looks_like_file_path() {
        assert!(looks_like_file_path("/home/user/data"));
        assert!(looks_like_file_path("C:\\Users\\test"));
        assert!(looks_like_file_path("\"/etc/hosts\""));
        assert!(!looks_like_file_path("https://example.org/x"));
        assert!(!looks_like_file_path("plain"));
        assert!(!looks_like_file_path("/"));
    }

    #[test]
    fn test_is_likely_url_or_display() {
        assert!(is_likely_url_or_display("url = \"https://host/home/x\"", None));
        assert!(is_likely_url_or_display("print(\"/home/user\")", None));
        assert!(!is_likely_url_or_display("f = open(\"/home/user/f\")", None));
        assert!(is_likely_url_or_display(
            "u = \"https://h\" + \"/home/x\"",
            Some("https://h")
        ));
    }

    #[test]
    fn test_is_file_path_context() {
        assert!(is_file_path_context("f, err := os.Open(p)", Language::Go));
        assert!(is_file_path_context("let f = File::open(p)?;", Language::Rust));
        assert!(is_file_path_context("with open(p) as f:", Language::Python));
        assert!(!is_file_path_context("total := a + b", Language::Go));
    }

    #[test]
    fn test_variable_path_argument() {
        assert_eq!(
            variable_path_argument("f, err := os.Open(cfgPath)", Language::Go).as_deref(),
            Some("cfgPath")
        );
        assert_eq!(
            variable_path_argument("let f = File::open(&path)?;", Language::Rust).as_deref(),
            Some("path")
        );
        // String literal argument is not a variable
        assert_eq!(
            variable_path_argument("os.Open(\"/etc/hosts\")", Language::Go),
            None
        );
        assert_eq!(
            variable_path_argument("let total = add(a, b);", Language::Rust),
            None
        );
    }
}
