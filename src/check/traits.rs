//! The checker capability.

use super::context::CheckContext;
use super::types::Issue;

/// A unit of pattern-based detection over a file's lines.
///
/// Implementations must not mutate the context and should degrade to "no
/// issues" on input they cannot make sense of; the runner additionally
/// isolates panics so one misbehaving checker never aborts its siblings.
/// Issues are reported in encounter order: line-ascending, then the
/// declaration order of the check within the checker.
pub trait Checker: Send + Sync {
    /// Short stable name, used in diagnostics.
    fn name(&self) -> &'static str;

    /// Scan the file and return all findings.
    fn run(&self, ctx: &CheckContext) -> Vec<Issue>;
}
