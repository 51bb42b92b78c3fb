//! Command-line interface for portacheck.

use clap::{Parser, Subcommand};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::check::{FileReport, Runner};
use crate::config::Config;
use crate::graph::{self, DependencyGraph};
use crate::language::Language;
use crate::report;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ISSUES: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Cross-platform compatibility checker.
///
/// Portacheck scans source files for constructs that break when code
/// moves between operating systems: hardcoded path separators,
/// platform-specific APIs, implicit file encodings, Windows-style
/// environment syntax, and shell calls with platform-bound commands.
#[derive(Parser)]
#[command(name = "portacheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check files for cross-platform compatibility issues
    #[command(visible_alias = "lint")]
    Check(CheckArgs),
    /// Show the import graph, unresolved imports, and dependency cycles
    Deps(DepsArgs),
}

/// Arguments for the check command.
#[derive(Parser)]
pub struct CheckArgs {
    /// Path to check (file or directory)
    pub path: PathBuf,

    /// Path to config YAML file (default: auto-discover portacheck.yaml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format: pretty, text, or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Show suppressed issues in output
    #[arg(long)]
    pub show_suppressed: bool,
}

/// Arguments for the deps command.
#[derive(Parser)]
pub struct DepsArgs {
    /// Path to analyze (file or directory)
    pub path: PathBuf,

    /// Output format: text or json
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

/// Directories never worth scanning.
const SKIPPED_DIRS: &[&str] = &[
    "vendor",
    "node_modules",
    "target",
    "build",
    "dist",
    "__pycache__",
];

/// Collect checkable files under a root, honoring config excludes.
fn collect_files(root: &Path, config: &Config) -> anyhow::Result<Vec<PathBuf>> {
    let exclude = config.exclude_matcher()?;
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| {
            // The root itself is always walked, whatever its name.
            if e.depth() == 0 || !e.file_type().is_dir() {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            if name.starts_with('.') && name.len() > 1 {
                return false;
            }
            !SKIPPED_DIRS.contains(&name.as_ref())
        })
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if Language::from_path(path) == Language::Unknown {
            continue;
        }
        if exclude.is_match(path) {
            continue;
        }
        files.push(path.to_path_buf());
    }

    files.sort();
    Ok(files)
}

/// Load the config named by the flag, or discover one, or use defaults.
fn load_config(flag: &Option<PathBuf>) -> anyhow::Result<Config> {
    match flag {
        Some(path) => Ok(Config::parse_file(path)?),
        None => match Config::discover() {
            Some(path) => Ok(Config::parse_file(path)?),
            None => Ok(Config::default()),
        },
    }
}

/// Check one file; unreadable files are reported and skipped.
fn check_file(runner: &Runner, path: &Path) -> Option<FileReport> {
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "skipping unreadable file");
            eprintln!("Warning: cannot read {}: {}", path.display(), e);
            return None;
        }
    };
    let content = String::from_utf8_lossy(&bytes);
    Some(runner.check_content(path, &content))
}

/// Apply config filtering to a report's issues.
fn apply_config(mut report: FileReport, config: &Config) -> FileReport {
    report.issues.retain(|issue| {
        config.category_enabled(issue.category)
            && config
                .min_severity()
                .map_or(true, |min| issue.severity.rank() <= min.rank())
    });
    report
}

/// Run the check command.
pub fn run_check(args: &CheckArgs) -> anyhow::Result<i32> {
    if !["pretty", "text", "json"].contains(&args.format.as_str()) {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty', 'text', or 'json'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    let config = match load_config(&args.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let metadata = match std::fs::metadata(&args.path) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error: cannot access path {:?}: {}", args.path, e);
            return Ok(EXIT_ERROR);
        }
    };

    let files = if metadata.is_dir() {
        collect_files(&args.path, &config)?
    } else {
        vec![args.path.clone()]
    };

    if files.is_empty() {
        eprintln!("Warning: no files to scan");
        return Ok(EXIT_SUCCESS);
    }

    // Per-file scans share nothing; fan out and keep input order.
    let runner = Runner::new();
    let reports: Vec<FileReport> = files
        .par_iter()
        .filter_map(|path| check_file(&runner, path))
        .map(|report| apply_config(report, &config))
        .collect();

    match args.format.as_str() {
        "json" => report::write_json(&reports)?,
        "text" => {
            for file_report in &reports {
                println!("{}", report::render_text(&file_report.path, &file_report.issues));
            }
        }
        _ => report::write_pretty(&reports, args.show_suppressed),
    }

    if reports.iter().any(|r| r.has_errors()) {
        Ok(EXIT_ISSUES)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

/// Run the deps command.
pub fn run_deps(args: &DepsArgs) -> anyhow::Result<i32> {
    if !["text", "json"].contains(&args.format.as_str()) {
        eprintln!("Error: invalid format {:?}, must be 'text' or 'json'", args.format);
        return Ok(EXIT_ERROR);
    }

    let metadata = match std::fs::metadata(&args.path) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error: cannot access path {:?}: {}", args.path, e);
            return Ok(EXIT_ERROR);
        }
    };

    let files = if metadata.is_dir() {
        collect_files(&args.path, &Config::default())?
    } else {
        vec![args.path.clone()]
    };

    let mut extracted = Vec::new();
    for path in &files {
        let bytes = match std::fs::read(path) {
            Ok(b) => b,
            Err(e) => {
                eprintln!("Warning: cannot read {}: {}", path.display(), e);
                continue;
            }
        };
        let content = String::from_utf8_lossy(&bytes);
        let ctx = crate::check::CheckContext::new(path.clone(), &content, Language::from_path(path));
        extracted.push((path.clone(), graph::extract_imports(&ctx)));
    }

    let dependency_graph = graph::build_graph(&extracted);

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&dependency_graph)?);
    } else {
        write_graph_text(&dependency_graph, files.len());
    }

    Ok(EXIT_SUCCESS)
}

fn write_graph_text(graph: &DependencyGraph, file_count: usize) {
    println!("Dependency graph ({} files)", file_count);
    println!();

    for (file, node) in &graph.nodes {
        println!("{}", file);
        if !node.imports.is_empty() {
            println!("  imports: {}", node.imports.join(", "));
        }
        if !node.imported_by.is_empty() {
            println!("  imported by: {}", node.imported_by.join(", "));
        }
    }

    if !graph.missing.is_empty() {
        println!();
        println!("Unresolved imports:");
        for entry in &graph.missing {
            println!("  {}", entry);
        }
    }

    if !graph.cycles.is_empty() {
        println!();
        println!("Circular dependencies:");
        for cycle in &graph.cycles {
            println!("  {}", cycle.join(" -> "));
        }
    }
}
