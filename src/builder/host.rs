//! Host platform detection.
//!
//! Fills in a `PlatformDescriptor` for the machine we are running on when
//! the caller does not pin the settings explicitly.
//!
//! Compiler detection priority:
//! 1. `CXX` / `CC` environment variables
//! 2. Auto-detection (searching PATH for common compilers)

use std::path::Path;
use std::sync::LazyLock;

use anyhow::{bail, Result};
use regex::Regex;

use crate::core::platform::{Compiler, CompilerVersion, OperatingSystem, PlatformDescriptor};
use crate::util::process::{find_executable, ProcessBuilder};

static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\.(\d+)(?:\.(\d+))?").expect("valid regex"));

/// Detect the host platform: OS, architecture and default C++ compiler.
pub fn detect_host_platform() -> Result<PlatformDescriptor> {
    let os = OperatingSystem::host();
    let (compiler, version) = detect_compiler(os)?;

    Ok(PlatformDescriptor::new(os, compiler, version).with_arch(host_arch()))
}

/// Architecture in recipe vocabulary.
pub fn host_arch() -> &'static str {
    match std::env::consts::ARCH {
        "aarch64" => "armv8",
        "arm" => "armv7",
        other => other,
    }
}

fn detect_compiler(os: OperatingSystem) -> Result<(Compiler, CompilerVersion)> {
    let mut candidates: Vec<String> = ["CXX", "CC"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .collect();

    if os == OperatingSystem::Windows {
        candidates.push("cl".to_string());
    }
    candidates.extend(["c++", "g++", "clang++", "gcc", "clang"].map(String::from));

    for candidate in &candidates {
        let Some(path) = find_executable(candidate) else {
            continue;
        };
        match identify(&path) {
            Some(found) => {
                tracing::debug!("detected compiler {} {} at {}", found.0, found.1, path.display());
                return Ok(found);
            }
            None => tracing::debug!("could not identify compiler at {}", path.display()),
        }
    }

    bail!(
        "no C++ compiler found\n\
         \n\
         Set the CXX environment variable, pass --compiler and --compiler-version,\n\
         or install a compiler."
    )
}

/// Identify a compiler from its version banner.
fn identify(path: &Path) -> Option<(Compiler, CompilerVersion)> {
    let is_cl = path
        .file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|s| s.eq_ignore_ascii_case("cl"));

    // cl.exe prints its banner on stderr and rejects --version
    let cmd = if is_cl {
        ProcessBuilder::new(path)
    } else {
        ProcessBuilder::new(path).arg("--version")
    };
    let output = cmd.exec().ok()?;

    let mut banner = String::from_utf8_lossy(&output.stdout).into_owned();
    banner.push_str(&String::from_utf8_lossy(&output.stderr));

    parse_banner(&banner)
}

/// Parse a `--version` banner into a compiler identity.
pub fn parse_banner(banner: &str) -> Option<(Compiler, CompilerVersion)> {
    let lower = banner.to_lowercase();
    let compiler = if lower.contains("microsoft") {
        Compiler::VisualStudio
    } else if lower.contains("apple") && lower.contains("clang") {
        Compiler::AppleClang
    } else if lower.contains("clang") {
        Compiler::Clang
    } else if lower.contains("gcc")
        || lower.contains("g++")
        || lower.contains("free software foundation")
    {
        Compiler::Gcc
    } else {
        return None;
    };

    let first_line = banner.lines().find(|l| VERSION_RE.is_match(l))?;
    let caps = VERSION_RE.captures(first_line)?;
    let part = |i: usize| caps.get(i).and_then(|m| m.as_str().parse().ok()).unwrap_or(0);

    Some((compiler, CompilerVersion::new(part(1), part(2), part(3))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_gcc_banner() {
        let banner = "g++ (Ubuntu 11.4.0-1ubuntu1~22.04) 11.4.0\n\
                      Copyright (C) 2021 Free Software Foundation, Inc.";
        let (compiler, version) = parse_banner(banner).unwrap();
        assert_eq!(compiler, Compiler::Gcc);
        assert_eq!(version, CompilerVersion::new(11, 4, 0));
    }

    #[test]
    fn test_parse_clang_banners() {
        let banner = "Ubuntu clang version 14.0.0-1ubuntu1\nTarget: x86_64-pc-linux-gnu";
        let (compiler, version) = parse_banner(banner).unwrap();
        assert_eq!(compiler, Compiler::Clang);
        assert_eq!(version.major(), 14);

        let (compiler, version) =
            parse_banner("Apple clang version 15.0.0 (clang-1500.1.0.2.5)").unwrap();
        assert_eq!(compiler, Compiler::AppleClang);
        assert_eq!(version.major(), 15);
    }

    #[test]
    fn test_parse_msvc_banner() {
        let banner = "Microsoft (R) C/C++ Optimizing Compiler Version 19.29.30133 for x64";
        let (compiler, version) = parse_banner(banner).unwrap();
        assert_eq!(compiler, Compiler::VisualStudio);
        assert_eq!(version, CompilerVersion::new(19, 29, 30133));
    }

    #[test]
    fn test_unknown_banner() {
        assert!(parse_banner("tcc version 0.9.27").is_none());
    }

    #[test]
    fn test_host_arch_not_empty() {
        assert!(!host_arch().is_empty());
    }
}
