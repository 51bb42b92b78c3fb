//! Language-specific checker implementations.

mod common;
mod cpp;
mod csharp;
mod go;
mod java;
mod javascript;
mod lua;
mod python;
mod rust_lang;
mod swift;

pub use cpp::CppChecker;
pub use csharp::CSharpChecker;
pub use go::GoChecker;
pub use java::JavaChecker;
pub use javascript::JavaScriptChecker;
pub use lua::LuaChecker;
pub use python::PythonChecker;
pub use rust_lang::RustChecker;
pub use swift::SwiftChecker;

use crate::language::Language;

use super::traits::Checker;

/// Checkers to run for a language tag, in declared order.
///
/// The table is closed: C and C++ share one checker, as do
/// JavaScript/TypeScript and Java/Kotlin. Unknown files get none;
/// the generic checkers still apply.
pub fn checkers_for(language: Language) -> &'static [&'static dyn Checker] {
    match language {
        Language::Python => &[&PythonChecker],
        Language::C | Language::Cpp => &[&CppChecker],
        Language::JavaScript | Language::TypeScript => &[&JavaScriptChecker],
        Language::Java | Language::Kotlin => &[&JavaChecker],
        Language::Go => &[&GoChecker],
        Language::Rust => &[&RustChecker],
        Language::CSharp => &[&CSharpChecker],
        Language::Swift => &[&SwiftChecker],
        Language::Lua => &[&LuaChecker],
        Language::Unknown => &[],
    }
}
