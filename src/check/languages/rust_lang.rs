//! Rust-specific checks.

use lazy_static::lazy_static;
use regex::Regex;

use crate::check::context::CheckContext;
use crate::check::scanner::{inside_string_literal, is_comment_line};
use crate::check::traits::Checker;
use crate::check::types::{Category, Issue, Severity};

use super::common::{check_hardcoded_platform_paths, check_variable_paths, PathIdioms};

static IDIOMS: PathIdioms = PathIdioms {
    drive_suggestion: "Use Path::new()/PathBuf::from() with std::path::MAIN_SEPARATOR or env/cfg for portability",
    unix_suggestion: "Use environment variables or Path APIs for cross-platform paths",
    variable_message: "Variable used as file path; ensure it is built with Path::new/PathBuf::from or Path::join",
    variable_suggestion: "Use std::path::Path/PathBuf and std::path::MAIN_SEPARATOR or cfg for portability",
    url_exempt_tokens: &[],
};

lazy_static! {
    static ref USE_X11: Regex = Regex::new(r"\buse\s+(?:x11|x11rb|x11_dl|xdg)\s*::").unwrap();
    static ref USE_WAYLAND: Regex = Regex::new(r"\buse\s+wayland(?:_[a-z]+)?\s*::").unwrap();
    static ref X11_SYMBOLS: Regex = Regex::new(
        r"\b(?:XOpenDisplay|XCloseDisplay|XCreateWindow|xcb_connect|xcb_disconnect)\b"
    )
    .unwrap();
    static ref WAYLAND_SYMBOLS: Regex = Regex::new(
        r"\b(?:wl_display_connect|wl_display_disconnect|wl_registry|wl_surface|wl_compositor)\b"
    )
    .unwrap();
}

pub struct RustChecker;

impl Checker for RustChecker {
    fn name(&self) -> &'static str {
        "rust"
    }

    fn run(&self, ctx: &CheckContext) -> Vec<Issue> {
        let mut issues = Vec::new();
        check_hardcoded_platform_paths(ctx, &IDIOMS, &mut issues);
        check_variable_paths(ctx, &IDIOMS, &mut issues);
        check_display_server_apis(ctx, &mut issues);
        issues
    }
}

/// X11/Wayland crates and symbols tie the binary to one display server.
fn check_display_server_apis(ctx: &CheckContext, issues: &mut Vec<Issue>) {
    for (line_num, line) in ctx.lines() {
        if is_comment_line(line, ctx.language()) {
            continue;
        }

        let finding = if let Some(m) = USE_X11.find(line) {
            Some((m, "X11-related crate usage; code may not run on Wayland-only or other display servers"))
        } else if let Some(m) = USE_WAYLAND.find(line) {
            Some((m, "Wayland-related crate usage; code may not run on X11-only systems"))
        } else if let Some(m) = X11_SYMBOLS.find(line) {
            Some((m, "X11 API usage; code may not run on Wayland-only or other display servers"))
        } else if let Some(m) = WAYLAND_SYMBOLS.find(line) {
            Some((m, "Wayland API usage; code may not run on X11-only systems"))
        } else {
            None
        };

        if let Some((m, message)) = finding {
            if !inside_string_literal(line, m.start()) {
                issues.push(Issue::new(
                    Severity::Warning,
                    line_num,
                    m.start(),
                    message,
                    line,
                    "Use an abstraction or conditional compilation for X11/Wayland portability",
                    Category::Api,
                ));
            }
        }
    }
}
