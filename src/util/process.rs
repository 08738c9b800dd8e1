//! Subprocess execution utilities.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use anyhow::{Context, Result};

/// Builder for subprocess execution.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|s| s.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Execute the command and wait for completion, capturing output.
    pub fn exec(&self) -> Result<Output> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        cmd.output()
            .with_context(|| format!("failed to execute `{}`", self.program.display()))
    }

    /// Display the command for logs and error messages.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Find an executable in PATH.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

/// Find CMake, preferring an explicitly configured path.
pub fn find_cmake(configured: Option<&Path>) -> Option<PathBuf> {
    match configured {
        Some(path) if path.is_file() => Some(path.to_path_buf()),
        Some(path) => find_executable(&path.to_string_lossy()),
        None => find_executable("cmake"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_process_builder() {
        let output = ProcessBuilder::new("echo").arg("hello").exec().unwrap();

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("hello"));
    }

    #[test]
    fn test_display_command() {
        let pb = ProcessBuilder::new("cmake").args(["--build", "build_subfolder", "--parallel"]);

        assert_eq!(pb.display_command(), "cmake --build build_subfolder --parallel");
    }

    #[test]
    fn test_missing_program_errors() {
        let err = ProcessBuilder::new("definitely-not-a-real-program-xyz")
            .exec()
            .unwrap_err();
        assert!(err.to_string().contains("failed to execute"));
    }

    #[test]
    fn test_find_cmake_configured_missing() {
        assert!(find_cmake(Some(Path::new("/nonexistent/cmake-xyz"))).is_none());
    }
}
