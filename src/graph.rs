//! Import extraction and file dependency graphs.
//!
//! Extracts import/include statements per language, resolves them against
//! the set of scanned files, and reports the resulting graph together with
//! unresolved imports and circular dependency chains.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::check::CheckContext;
use crate::language::Language;

/// One import statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Import {
    /// 1-based line of the statement.
    pub line: usize,
    /// Module, package, header, or file the statement names.
    pub target: String,
}

lazy_static! {
    static ref PY_IMPORT: Regex = Regex::new(r"^\s*import\s+(\S+)").unwrap();
    static ref PY_FROM: Regex = Regex::new(r"^\s*from\s+(\S+)\s+import").unwrap();
    static ref PY_DUNDER: Regex = Regex::new(r#"__import__\s*\(\s*['"]([^'"]+)['"]"#).unwrap();
    static ref JS_IMPORT: Regex = Regex::new(r#"import\s+.*\s+from\s+['"]([^'"]+)['"]"#).unwrap();
    static ref JS_REQUIRE: Regex = Regex::new(r#"require\s*\(\s*['"]([^'"]+)['"]"#).unwrap();
    static ref C_INCLUDE_ANGLE: Regex = Regex::new(r"#include\s*<([^>]+)>").unwrap();
    static ref C_INCLUDE_QUOTE: Regex = Regex::new(r#"#include\s*"([^"]+)""#).unwrap();
    static ref JAVA_IMPORT: Regex =
        Regex::new(r"^\s*import\s+(?:static\s+)?([A-Za-z0-9_.*]+?)\s*;?\s*$").unwrap();
    static ref GO_IMPORT: Regex =
        Regex::new(r#"^\s*import\s+(?:[A-Za-z0-9_.]+\s+)?["']([^"']+)["']\s*$"#).unwrap();
    static ref GO_BLOCK_OPEN: Regex = Regex::new(r"^\s*import\s*\(\s*$").unwrap();
    static ref GO_BLOCK_ENTRY: Regex =
        Regex::new(r#"^\s*(?:[A-Za-z0-9_.]+\s+)?["']([^"']+)["']\s*$"#).unwrap();
    static ref RS_USE: Regex = Regex::new(r"^\s*use\s+([A-Za-z0-9_]+)(?:::|\s*;)").unwrap();
    static ref RS_MOD: Regex = Regex::new(r"^\s*(?:pub\s+)?mod\s+([A-Za-z0-9_]+)\s*;").unwrap();
    static ref CS_USING: Regex =
        Regex::new(r"^\s*using\s+(?:[A-Za-z0-9_.]+\s*=\s*)?([A-Za-z0-9_.]+)\s*;").unwrap();
}

fn is_commented(stripped: &str) -> bool {
    stripped.starts_with('#') && !stripped.starts_with("#include")
        || stripped.starts_with("//")
        || stripped.starts_with("/*")
        || stripped.starts_with('*')
        || stripped.starts_with("--")
}

/// Extract import statements from a file's lines.
///
/// Returns an empty list for languages without an import concept here
/// (Swift and Lua module systems are not modeled).
pub fn extract_imports(ctx: &CheckContext) -> Vec<Import> {
    let mut imports = Vec::new();
    let mut in_go_block = false;

    for (line_num, line) in ctx.lines() {
        let stripped = line.trim();
        if is_commented(stripped) {
            continue;
        }

        let target: Option<String> = match ctx.language() {
            Language::Python | Language::Unknown => PY_IMPORT
                .captures(stripped)
                .or_else(|| PY_FROM.captures(stripped))
                .or_else(|| PY_DUNDER.captures(stripped))
                .map(|c| c[1].to_string()),
            Language::JavaScript | Language::TypeScript => JS_IMPORT
                .captures(stripped)
                .or_else(|| JS_REQUIRE.captures(stripped))
                .map(|c| c[1].to_string()),
            Language::C | Language::Cpp => C_INCLUDE_ANGLE
                .captures(stripped)
                .or_else(|| C_INCLUDE_QUOTE.captures(stripped))
                .map(|c| c[1].trim().to_string()),
            Language::Java | Language::Kotlin => {
                JAVA_IMPORT.captures(stripped).map(|c| c[1].to_string())
            }
            Language::Go => {
                if in_go_block {
                    if stripped.starts_with(')') {
                        in_go_block = false;
                        None
                    } else {
                        GO_BLOCK_ENTRY.captures(stripped).map(|c| c[1].to_string())
                    }
                } else if GO_BLOCK_OPEN.is_match(stripped) {
                    in_go_block = true;
                    None
                } else {
                    GO_IMPORT.captures(stripped).map(|c| c[1].to_string())
                }
            }
            Language::Rust => RS_USE
                .captures(stripped)
                .or_else(|| RS_MOD.captures(stripped))
                .map(|c| c[1].to_string()),
            Language::CSharp => CS_USING.captures(stripped).map(|c| c[1].to_string()),
            Language::Swift | Language::Lua => None,
        };

        if let Some(target) = target {
            imports.push(Import {
                line: line_num,
                target,
            });
        }
    }

    imports
}

/// One file's edges in the dependency graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileNode {
    pub imports: Vec<String>,
    pub imported_by: Vec<String>,
}

/// The resolved dependency graph over a set of files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DependencyGraph {
    /// File path -> edges. BTreeMap keeps output deterministic.
    pub nodes: BTreeMap<String, FileNode>,
    /// `file: target` entries that resolved to no scanned file.
    pub missing: Vec<String>,
    /// Circular dependency chains, each ending where it starts.
    pub cycles: Vec<Vec<String>>,
}

/// Build the dependency graph for a set of files and their imports.
pub fn build_graph(files: &[(PathBuf, Vec<Import>)]) -> DependencyGraph {
    let file_set: BTreeSet<PathBuf> = files.iter().map(|(p, _)| p.clone()).collect();
    let mut graph = DependencyGraph::default();

    for (path, _) in files {
        graph.nodes.entry(key(path)).or_default();
    }

    for (path, imports) in files {
        let from_key = key(path);
        for import in imports {
            match resolve_import(&import.target, path, &file_set) {
                Some(resolved) => {
                    let to_key = key(&resolved);
                    graph
                        .nodes
                        .entry(from_key.clone())
                        .or_default()
                        .imports
                        .push(to_key.clone());
                    graph
                        .nodes
                        .entry(to_key)
                        .or_default()
                        .imported_by
                        .push(from_key.clone());
                }
                None => graph.missing.push(format!("{}: {}", from_key, import.target)),
            }
        }
    }

    graph.cycles = find_cycles(&graph.nodes);
    graph
}

fn key(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

const KNOWN_EXTENSIONS: &[&str] = &[
    "py", "js", "ts", "h", "hpp", "cpp", "c", "java", "kt", "go", "rs", "cs",
];

fn strip_known_extension(name: &str) -> &str {
    for ext in KNOWN_EXTENSIONS {
        if let Some(stem) = name.strip_suffix(&format!(".{}", ext)) {
            return stem;
        }
    }
    name
}

/// Try to resolve an import target to a scanned file.
fn resolve_import(target: &str, from: &Path, file_set: &BTreeSet<PathBuf>) -> Option<PathBuf> {
    let target = target.trim();
    if target.is_empty() {
        return None;
    }
    let base = strip_known_extension(target);

    // Relative import (Python style: .module / ..pkg.module)
    if target.starts_with('.') {
        let dots = target.chars().take_while(|c| *c == '.').count();
        let parts: Vec<&str> = target.trim_start_matches('.').split('.').filter(|p| !p.is_empty()).collect();
        let mut dir = from.parent()?.to_path_buf();
        for _ in 1..dots {
            dir = dir.parent()?.to_path_buf();
        }
        for part in &parts {
            dir.push(part);
        }
        for ext in ["py", "ts", "js"] {
            let candidate = dir.with_extension(ext);
            if file_set.contains(&candidate) {
                return Some(candidate);
            }
        }
        let init = dir.join("__init__.py");
        if file_set.contains(&init) {
            return Some(init);
        }
        return None;
    }

    // Dotted module path: match against file stems relative to the set.
    if base.contains('.') && !target.starts_with('/') {
        let dotted = base.replace('.', "/");
        for file in file_set {
            let stem = key(file);
            let stem = strip_known_extension(&stem);
            let stem = stem.strip_suffix("/__init__").unwrap_or(stem);
            if stem == dotted || stem.ends_with(&format!("/{}", dotted)) {
                return Some(file.clone());
            }
        }
    }

    // Exact filename or stem match.
    for file in file_set {
        let Some(name) = file.file_name().map(|n| n.to_string_lossy()) else {
            continue;
        };
        if name == target || strip_known_extension(&name) == base {
            return Some(file.clone());
        }
    }

    // Same directory, trying known extensions.
    if let Some(parent) = from.parent() {
        for ext in KNOWN_EXTENSIONS {
            let candidate = parent.join(format!("{}.{}", base, ext));
            if file_set.contains(&candidate) {
                return Some(candidate);
            }
        }
    }

    None
}

/// Detect circular dependencies with a depth-first search.
fn find_cycles(nodes: &BTreeMap<String, FileNode>) -> Vec<Vec<String>> {
    let mut cycles: Vec<Vec<String>> = Vec::new();
    let mut visited: HashSet<String> = HashSet::new();
    let mut stack: Vec<String> = Vec::new();

    fn dfs(
        node: &str,
        nodes: &BTreeMap<String, FileNode>,
        visited: &mut HashSet<String>,
        stack: &mut Vec<String>,
        cycles: &mut Vec<Vec<String>>,
    ) {
        if let Some(pos) = stack.iter().position(|n| n == node) {
            let mut cycle: Vec<String> = stack[pos..].to_vec();
            cycle.push(node.to_string());
            if !cycles.contains(&cycle) {
                cycles.push(cycle);
            }
            return;
        }
        if visited.contains(node) {
            return;
        }
        visited.insert(node.to_string());
        stack.push(node.to_string());
        if let Some(edges) = nodes.get(node) {
            for neighbor in &edges.imports {
                if nodes.contains_key(neighbor) {
                    dfs(neighbor, nodes, visited, stack, cycles);
                }
            }
        }
        stack.pop();
    }

    for node in nodes.keys() {
        if !visited.contains(node) {
            dfs(node, nodes, &mut visited, &mut stack, &mut cycles);
        }
    }

    cycles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(name: &str, content: &str, language: Language) -> CheckContext {
        CheckContext::new(name, content, language)
    }

    #[test]
    fn test_extract_python_imports() {
        let c = ctx(
            "a.py",
            "import os\nfrom pathlib import Path\n# import commented\nimport app.utils\n",
            Language::Python,
        );
        let imports = extract_imports(&c);
        let targets: Vec<&str> = imports.iter().map(|i| i.target.as_str()).collect();
        assert_eq!(targets, vec!["os", "pathlib", "app.utils"]);
        assert_eq!(imports[0].line, 1);
    }

    #[test]
    fn test_extract_go_import_block() {
        let content = "package main\n\nimport (\n\t\"fmt\"\n\t\"os\"\n)\n\nimport \"strings\"\n";
        let c = ctx("main.go", content, Language::Go);
        let targets: Vec<String> = extract_imports(&c).into_iter().map(|i| i.target).collect();
        assert_eq!(targets, vec!["fmt", "os", "strings"]);
    }

    #[test]
    fn test_extract_c_includes_and_rust_uses() {
        let c = ctx(
            "m.cpp",
            "#include <vector>\n#include \"local.h\"\n",
            Language::Cpp,
        );
        let targets: Vec<String> = extract_imports(&c).into_iter().map(|i| i.target).collect();
        assert_eq!(targets, vec!["vector", "local.h"]);

        let r = ctx("m.rs", "use serde::Serialize;\nmod helpers;\n", Language::Rust);
        let targets: Vec<String> = extract_imports(&r).into_iter().map(|i| i.target).collect();
        assert_eq!(targets, vec!["serde", "helpers"]);
    }

    #[test]
    fn test_build_graph_resolves_same_directory() {
        let a = PathBuf::from("src/a.py");
        let b = PathBuf::from("src/b.py");
        let files = vec![
            (
                a,
                vec![Import {
                    line: 1,
                    target: "b".to_string(),
                }],
            ),
            (b, vec![]),
        ];
        let graph = build_graph(&files);
        assert_eq!(graph.nodes["src/a.py"].imports, vec!["src/b.py"]);
        assert_eq!(graph.nodes["src/b.py"].imported_by, vec!["src/a.py"]);
        assert!(graph.missing.is_empty());
        assert!(graph.cycles.is_empty());
    }

    #[test]
    fn test_build_graph_reports_missing_and_cycles() {
        let a = PathBuf::from("a.py");
        let b = PathBuf::from("b.py");
        let files = vec![
            (
                a,
                vec![
                    Import { line: 1, target: "b".to_string() },
                    Import { line: 2, target: "requests".to_string() },
                ],
            ),
            (
                b,
                vec![Import { line: 1, target: "a".to_string() }],
            ),
        ];
        let graph = build_graph(&files);
        assert_eq!(graph.missing, vec!["a.py: requests"]);
        assert_eq!(graph.cycles.len(), 1);
        let cycle = &graph.cycles[0];
        assert_eq!(cycle.first(), cycle.last());
    }

    #[test]
    fn test_relative_python_import() {
        let a = PathBuf::from("pkg/mod_a.py");
        let b = PathBuf::from("pkg/mod_b.py");
        let files = vec![
            (
                a,
                vec![Import { line: 1, target: ".mod_b".to_string() }],
            ),
            (b, vec![]),
        ];
        let graph = build_graph(&files);
        assert_eq!(graph.nodes["pkg/mod_a.py"].imports, vec!["pkg/mod_b.py"]);
    }
}
