//! Platform-specific API usage checks.
//!
//! Covers direct calls into platform-exclusive APIs (Win32, POSIX-only,
//! macOS frameworks), platform-bound imports and includes, threading
//! primitives, Winsock initialization, and single-platform GUI frameworks.

use lazy_static::lazy_static;
use regex::Regex;

use crate::language::Language;

use super::context::CheckContext;
use super::scanner::{inside_comment_or_string, inside_string_literal, is_comment_line};
use super::traits::Checker;
use super::types::{Category, Issue, Severity};

/// A platform-exclusive API symbol. Names ending in `_` match as a
/// prefix (pthread_create, pthread_join, ...); others must be called.
struct PlatformApi {
    platform: &'static str,
    name: &'static str,
    pattern: Regex,
}

fn api_pattern(name: &str) -> Regex {
    let pattern = if name.ends_with('_') {
        format!(r"(?i)\b{}", regex::escape(name))
    } else {
        format!(r"(?i)\b{}\s*\(", regex::escape(name))
    };
    Regex::new(&pattern).unwrap()
}

lazy_static! {
    static ref PLATFORM_APIS: Vec<PlatformApi> = {
        let win32 = [
            "win32api", "win32con", "win32file", "win32gui", "win32process", "win32service",
            "win32security", "CreateFile", "ReadFile", "WriteFile", "CloseHandle",
            "GetModuleHandle", "GetProcAddress", "LoadLibrary",
        ];
        let unix = [
            "fork", "exec", "pthread_", "sigaction", "fcntl", "ioctl", "unlink", "symlink",
        ];
        let macos = [
            "NSApplication", "NSWindow", "CFBundle", "CFString",
        ];

        let mut apis = Vec::new();
        for name in win32 {
            apis.push(PlatformApi { platform: "windows", name, pattern: api_pattern(name) });
        }
        for name in unix {
            apis.push(PlatformApi { platform: "unix", name, pattern: api_pattern(name) });
        }
        for name in macos {
            apis.push(PlatformApi { platform: "macos", name, pattern: api_pattern(name) });
        }
        apis
    };

    static ref C_INCLUDE: Regex = Regex::new(r"#include\s*<([^>]+)>").unwrap();
    static ref RS_USE_CRATE: Regex = Regex::new(r"\buse\s+([a-zA-Z0-9_]+)(?:::|;)").unwrap();
    static ref RS_EXTERN_CRATE: Regex =
        Regex::new(r"\bextern\s+crate\s+([a-zA-Z0-9_]+)\s*;").unwrap();
    static ref CS_DLLIMPORT: Regex = Regex::new(r#"DllImport\s*\(\s*["']"#).unwrap();
    static ref GO_SYSCALL_IMPORT: Regex =
        Regex::new(r#"import\s+(?:[a-zA-Z0-9_]*\s+)?["']syscall["']"#).unwrap();
    static ref GO_X_SYS: Regex =
        Regex::new(r#"["'](golang\.org/x/sys/(?:windows|unix|plan9)[^"']*)["']"#).unwrap();
    static ref THREADING: Regex =
        Regex::new(r"pthread_|CreateThread|_beginthread").unwrap();
}

/// Imports that bind a file to one platform, per language.
fn platform_imports(language: Language) -> &'static [&'static str] {
    match language {
        Language::Python => &[
            "win32api", "win32con", "win32file", "win32gui", "pyobjc", "Cocoa", "AppKit",
        ],
        Language::C | Language::Cpp => &[
            "<windows.h>", "<winsock.h>", "<winsock2.h>", "<sys/socket.h>", "<unistd.h>",
            "<pthread.h>", "<Cocoa/Cocoa.h>", "<AppKit/AppKit.h>",
        ],
        _ => &[],
    }
}

/// GUI frameworks that only exist on one platform.
static GUI_FRAMEWORKS: &[(&str, &str)] = &[
    ("win32gui", "windows"),
    ("MFC", "windows"),
    ("WPF", "windows"),
    ("WinForms", "windows"),
    ("Cocoa", "macos"),
    ("AppKit", "macos"),
    ("NSApplication", "macos"),
];

const WINDOWS_BOUND_CRATES: &[&str] = &["winapi", "windows_sys", "libc", "nix"];

pub struct ApiChecker;

impl Checker for ApiChecker {
    fn name(&self) -> &'static str {
        "api"
    }

    fn run(&self, ctx: &CheckContext) -> Vec<Issue> {
        let mut issues = Vec::new();
        check_platform_apis(ctx, &mut issues);
        check_library_imports(ctx, &mut issues);
        check_threading(ctx, &mut issues);
        check_winsock(ctx, &mut issues);
        check_gui_frameworks(ctx, &mut issues);
        issues
    }
}

fn check_platform_apis(ctx: &CheckContext, issues: &mut Vec<Issue>) {
    for (line_num, line) in ctx.lines() {
        if is_comment_line(line, ctx.language()) {
            continue;
        }

        for api in PLATFORM_APIS.iter() {
            // Python's os.unlink / Path.unlink and exec() are portable.
            if ctx.language() == Language::Python && (api.name == "unlink" || api.name == "exec") {
                continue;
            }

            for m in api.pattern.find_iter(line) {
                if inside_comment_or_string(line, m.start(), ctx.language()) {
                    continue;
                }
                // Qt's exec() is cross-platform; skip it in Qt codebases.
                if api.name == "exec"
                    && matches!(ctx.language(), Language::C | Language::Cpp)
                    && ctx.scope().uses_qt()
                {
                    continue;
                }
                issues.push(Issue::new(
                    Severity::Warning,
                    line_num,
                    m.start(),
                    format!("Platform-specific API detected: {} ({})", api.name, api.platform),
                    line,
                    "Use cross-platform alternatives or add platform guards (#ifdef, platform.system(), cfg!)",
                    Category::Api,
                ));
                break;
            }
        }
    }
}

fn check_library_imports(ctx: &CheckContext, issues: &mut Vec<Issue>) {
    for (line_num, line) in ctx.lines() {
        if is_comment_line(line, ctx.language()) {
            continue;
        }

        for lib in platform_imports(ctx.language()) {
            if let Some(idx) = line.find(lib) {
                if !inside_string_literal(line, idx) {
                    issues.push(Issue::new(
                        Severity::Warning,
                        line_num,
                        idx,
                        format!("Platform-specific library import: {}", lib),
                        line,
                        "Use cross-platform libraries or add platform guards",
                        Category::Api,
                    ));
                    break;
                }
            }
        }

        match ctx.language() {
            Language::C | Language::Cpp => check_c_include(line_num, line, issues),
            Language::Rust => check_rust_crates(line_num, line, issues),
            Language::CSharp => check_csharp_platform(line_num, line, issues),
            Language::Go => check_go_packages(line_num, line, issues),
            _ => {}
        }
    }
}

/// OS- and display-server-specific includes in C/C++.
fn check_c_include(line_num: usize, line: &str, issues: &mut Vec<Issue>) {
    let Some(caps) = C_INCLUDE.captures(line) else {
        return;
    };
    let header = caps[1].trim().to_string();
    let column = caps.get(0).map(|m| m.start()).unwrap_or(0);
    if inside_string_literal(line, column) {
        return;
    }

    let (message, suggestion) = if header.starts_with("linux/") {
        (
            "Linux kernel / OS-specific include".to_string(),
            "Add platform guards or use portable abstractions for cross-OS compatibility",
        )
    } else if header.starts_with("wayland-") || header.starts_with("wayland/") {
        (
            "Wayland-specific include; not available on X11-only or other display servers"
                .to_string(),
            "Use conditional compilation or an abstraction for X11/Wayland portability",
        )
    } else if header.starts_with("X11/") || header.starts_with("xcb/") {
        (
            "X11-specific include; not available on Wayland-only systems".to_string(),
            "Consider X11/Wayland portability or an abstraction layer",
        )
    } else {
        return;
    };

    issues.push(Issue::new(
        Severity::Warning,
        line_num,
        column,
        message,
        line,
        suggestion,
        Category::Api,
    ));
}

/// OS-associated crates in Rust imports.
fn check_rust_crates(line_num: usize, line: &str, issues: &mut Vec<Issue>) {
    for pattern in [&*RS_USE_CRATE, &*RS_EXTERN_CRATE] {
        let Some(caps) = pattern.captures(line) else {
            continue;
        };
        let column = caps.get(0).map(|m| m.start()).unwrap_or(0);
        if inside_string_literal(line, column) {
            continue;
        }
        let krate = &caps[1];
        if WINDOWS_BOUND_CRATES.contains(&krate) || krate.starts_with("linux_") {
            issues.push(Issue::new(
                Severity::Warning,
                line_num,
                column,
                format!("OS-associated crate: {}", krate),
                line,
                "Add cfg(target_os) guards or document target platforms",
                Category::Api,
            ));
        }
    }
}

/// Windows namespaces and DllImports in C#.
fn check_csharp_platform(line_num: usize, line: &str, issues: &mut Vec<Issue>) {
    if let Some(m) = CS_DLLIMPORT.find(line) {
        if !inside_string_literal(line, m.start())
            && ["kernel32", "ntdll", "user32", "advapi32"]
                .iter()
                .any(|dll| line.contains(dll))
        {
            issues.push(Issue::new(
                Severity::Warning,
                line_num,
                m.start(),
                "Windows-specific DllImport detected",
                line,
                "Use cross-platform APIs or RuntimeInformation.IsOSPlatform guards",
                Category::Api,
            ));
            return;
        }
    }

    for (namespace, message) in [
        ("Microsoft.Win32", "Windows-specific namespace: Microsoft.Win32"),
        ("Mono.Unix", "Mono/Unix-specific namespace; not available on all .NET runtimes"),
        ("Mono.Posix", "Mono/Unix-specific namespace; not available on all .NET runtimes"),
    ] {
        if let Some(idx) = line.find(namespace) {
            if !inside_string_literal(line, idx) {
                issues.push(Issue::new(
                    Severity::Warning,
                    line_num,
                    idx,
                    message,
                    line,
                    "Use cross-platform APIs or RuntimeInformation.IsOSPlatform guards",
                    Category::Api,
                ));
                return;
            }
        }
    }
}

/// syscall and golang.org/x/sys imports in Go.
fn check_go_packages(line_num: usize, line: &str, issues: &mut Vec<Issue>) {
    if let Some(m) = GO_SYSCALL_IMPORT.find(line) {
        issues.push(Issue::new(
            Severity::Warning,
            line_num,
            m.start(),
            "Platform-specific package: syscall",
            line,
            "Use build tags or runtime.GOOS guards for cross-platform compatibility",
            Category::Api,
        ));
    }
    if let Some(caps) = GO_X_SYS.captures(line) {
        issues.push(Issue::new(
            Severity::Warning,
            line_num,
            caps.get(1).map(|m| m.start()).unwrap_or(0),
            "Platform-specific package: golang.org/x/sys",
            line,
            "Use build tags or runtime.GOOS guards for cross-platform compatibility",
            Category::Api,
        ));
    }
}

fn check_threading(ctx: &CheckContext, issues: &mut Vec<Issue>) {
    for (line_num, line) in ctx.lines() {
        if is_comment_line(line, ctx.language()) {
            continue;
        }
        if let Some(m) = THREADING.find(line) {
            if inside_string_literal(line, m.start()) {
                continue;
            }
            let description = if m.as_str().starts_with("pthread_") {
                "Unix-specific pthread API"
            } else {
                "Windows-specific thread API"
            };
            issues.push(Issue::new(
                Severity::Warning,
                line_num,
                m.start(),
                format!("{} detected", description),
                line,
                "Use std::thread (C++11+), the threading module (Python), or a cross-platform threading library",
                Category::Api,
            ));
        }
    }
}

fn check_winsock(ctx: &CheckContext, issues: &mut Vec<Issue>) {
    for (line_num, line) in ctx.lines() {
        if let Some(idx) = line.find("WSAStartup") {
            if !inside_string_literal(line, idx) && !is_comment_line(line, ctx.language()) {
                issues.push(Issue::new(
                    Severity::Warning,
                    line_num,
                    idx,
                    "Windows-specific socket initialization (WSAStartup) detected",
                    line,
                    "Use cross-platform socket APIs (BSD sockets work on all platforms)",
                    Category::Api,
                ));
            }
        }
    }
}

fn check_gui_frameworks(ctx: &CheckContext, issues: &mut Vec<Issue>) {
    for (line_num, line) in ctx.lines() {
        if is_comment_line(line, ctx.language()) {
            continue;
        }
        for (framework, platform) in GUI_FRAMEWORKS {
            if let Some(idx) = line.find(framework) {
                if !inside_string_literal(line, idx) {
                    issues.push(Issue::new(
                        Severity::Warning,
                        line_num,
                        idx,
                        format!("Platform-specific GUI framework: {} ({})", framework, platform),
                        line,
                        "Use a cross-platform GUI framework (Qt, wxWidgets, Tkinter, etc.)",
                        Category::Api,
                    ));
                }
            }
        }
    }
}
