//! Toolchain probing.
//!
//! Answers "is this program on the host's search path?" without ever
//! failing: lookup errors count as absence.

use crate::util::process::find_executable;

/// Build accelerator preferred as the CMake generator when present.
pub const DEFAULT_ACCELERATOR: &str = "ninja";

/// Checks whether a tool is available on the executing host.
pub trait ToolProbe {
    /// Whether an executable named `tool` can be found.
    fn is_available(&self, tool: &str) -> bool;
}

/// Probe that searches `PATH`.
///
/// Nothing is cached; every call looks at the current host state.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathProbe;

impl ToolProbe for PathProbe {
    fn is_available(&self, tool: &str) -> bool {
        let found = find_executable(tool);
        match &found {
            Some(path) => tracing::debug!("found `{}`: {}", tool, path.display()),
            None => tracing::debug!("`{}` not found on PATH", tool),
        }
        found.is_some()
    }
}
