//! Platform descriptor - the settings a package is built for.
//!
//! A `PlatformDescriptor` is supplied once at the start of a build (from CLI
//! flags or host detection) and is read-only for the rest of the session.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a platform setting cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformParseError {
    #[error("invalid operating system '{0}', valid values: Linux, Macos, Windows, FreeBSD, Android")]
    Os(String),

    #[error("invalid build type '{0}', valid values: Debug, Release, RelWithDebInfo, MinSizeRel")]
    BuildType(String),

    #[error("invalid C++ standard '{0}', valid values: 98, 11, 14, 17, 20, 23 (optionally gnu-prefixed)")]
    CppStandard(String),

    #[error("invalid compiler version '{0}'")]
    CompilerVersion(String),
}

/// Operating system family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperatingSystem {
    Linux,
    Macos,
    Windows,
    FreeBSD,
    Android,
}

impl OperatingSystem {
    /// The OS this binary was compiled for.
    pub fn host() -> Self {
        match std::env::consts::OS {
            "windows" => OperatingSystem::Windows,
            "macos" => OperatingSystem::Macos,
            "freebsd" => OperatingSystem::FreeBSD,
            "android" => OperatingSystem::Android,
            _ => OperatingSystem::Linux,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OperatingSystem::Linux => "Linux",
            OperatingSystem::Macos => "Macos",
            OperatingSystem::Windows => "Windows",
            OperatingSystem::FreeBSD => "FreeBSD",
            OperatingSystem::Android => "Android",
        }
    }
}

impl FromStr for OperatingSystem {
    type Err = PlatformParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linux" => Ok(OperatingSystem::Linux),
            "macos" | "darwin" => Ok(OperatingSystem::Macos),
            "windows" => Ok(OperatingSystem::Windows),
            "freebsd" => Ok(OperatingSystem::FreeBSD),
            "android" => Ok(OperatingSystem::Android),
            _ => Err(PlatformParseError::Os(s.to_string())),
        }
    }
}

impl fmt::Display for OperatingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compiler identity.
///
/// Known compilers get their own variant; anything else is kept verbatim
/// so it can still be reported and compared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Compiler {
    Gcc,
    Clang,
    AppleClang,
    VisualStudio,
    Other(String),
}

impl Compiler {
    pub fn as_str(&self) -> &str {
        match self {
            Compiler::Gcc => "gcc",
            Compiler::Clang => "clang",
            Compiler::AppleClang => "apple-clang",
            Compiler::VisualStudio => "Visual Studio",
            Compiler::Other(name) => name,
        }
    }
}

impl FromStr for Compiler {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "gcc" | "g++" => Compiler::Gcc,
            "clang" | "clang++" => Compiler::Clang,
            "apple-clang" | "appleclang" => Compiler::AppleClang,
            "visual studio" | "visual-studio" | "msvc" | "cl" => Compiler::VisualStudio,
            _ => Compiler::Other(s.to_string()),
        })
    }
}

impl fmt::Display for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compiler version, totally ordered.
///
/// Compilers report versions as "9", "4.8", "19.29" or "11.4.0"; missing
/// components are treated as zero so every version compares.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CompilerVersion(semver::Version);

impl CompilerVersion {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        CompilerVersion(semver::Version::new(major, minor, patch))
    }

    pub fn major(&self) -> u64 {
        self.0.major
    }

    pub fn as_semver(&self) -> &semver::Version {
        &self.0
    }
}

impl FromStr for CompilerVersion {
    type Err = PlatformParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Drop suffixes like "-ubuntu1" or "+build"
        let clean = s
            .trim()
            .split(|c: char| !c.is_ascii_digit() && c != '.')
            .next()
            .unwrap_or("");

        let mut parts = clean.split('.');
        let major = parts
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or_else(|| PlatformParseError::CompilerVersion(s.to_string()))?;
        let minor = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
        let patch = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);

        Ok(CompilerVersion::new(major, minor, patch))
    }
}

impl fmt::Display for CompilerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Build type (optimization / debug-info profile).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BuildType {
    Debug,
    #[default]
    Release,
    RelWithDebInfo,
    MinSizeRel,
}

impl BuildType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildType::Debug => "Debug",
            BuildType::Release => "Release",
            BuildType::RelWithDebInfo => "RelWithDebInfo",
            BuildType::MinSizeRel => "MinSizeRel",
        }
    }

    /// Whether the build type produces debug information.
    pub fn has_debug_info(&self) -> bool {
        matches!(self, BuildType::Debug | BuildType::RelWithDebInfo)
    }
}

impl FromStr for BuildType {
    type Err = PlatformParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(BuildType::Debug),
            "release" => Ok(BuildType::Release),
            "relwithdebinfo" => Ok(BuildType::RelWithDebInfo),
            "minsizerel" => Ok(BuildType::MinSizeRel),
            _ => Err(PlatformParseError::BuildType(s.to_string())),
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// C++ standard version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CppStandard {
    /// C++98 (also C++03)
    #[serde(rename = "98", alias = "03")]
    Cpp98,
    /// C++11
    #[serde(rename = "11")]
    Cpp11,
    /// C++14
    #[serde(rename = "14")]
    Cpp14,
    /// C++17
    #[serde(rename = "17")]
    Cpp17,
    /// C++20
    #[serde(rename = "20")]
    Cpp20,
    /// C++23
    #[serde(rename = "23")]
    Cpp23,
}

impl CppStandard {
    /// Value for `CMAKE_CXX_STANDARD`.
    pub fn cmake_value(&self) -> &'static str {
        match self {
            CppStandard::Cpp98 => "98",
            CppStandard::Cpp11 => "11",
            CppStandard::Cpp14 => "14",
            CppStandard::Cpp17 => "17",
            CppStandard::Cpp20 => "20",
            CppStandard::Cpp23 => "23",
        }
    }
}

impl FromStr for CppStandard {
    type Err = PlatformParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        let digits = lower
            .strip_prefix("gnu")
            .or_else(|| lower.strip_prefix("c++"))
            .or_else(|| lower.strip_prefix("cpp"))
            .unwrap_or(&lower);

        match digits {
            "98" | "03" => Ok(CppStandard::Cpp98),
            "11" => Ok(CppStandard::Cpp11),
            "14" => Ok(CppStandard::Cpp14),
            "17" => Ok(CppStandard::Cpp17),
            "20" => Ok(CppStandard::Cpp20),
            "23" => Ok(CppStandard::Cpp23),
            _ => Err(PlatformParseError::CppStandard(s.to_string())),
        }
    }
}

impl fmt::Display for CppStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C++{}", self.cmake_value())
    }
}

/// The settings a package is built for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformDescriptor {
    pub os: OperatingSystem,
    pub compiler: Compiler,
    pub compiler_version: CompilerVersion,
    /// CPU architecture (x86_64, armv8, x86, ...)
    pub arch: String,
    pub build_type: BuildType,
    /// C++ standard, when the caller pins one
    #[serde(default)]
    pub cppstd: Option<CppStandard>,
}

impl PlatformDescriptor {
    pub fn new(os: OperatingSystem, compiler: Compiler, compiler_version: CompilerVersion) -> Self {
        PlatformDescriptor {
            os,
            compiler,
            compiler_version,
            arch: std::env::consts::ARCH.to_string(),
            build_type: BuildType::default(),
            cppstd: None,
        }
    }

    pub fn with_arch(mut self, arch: impl Into<String>) -> Self {
        self.arch = arch.into();
        self
    }

    pub fn with_build_type(mut self, build_type: BuildType) -> Self {
        self.build_type = build_type;
        self
    }

    pub fn with_cppstd(mut self, cppstd: CppStandard) -> Self {
        self.cppstd = Some(cppstd);
        self
    }
}

impl fmt::Display for PlatformDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.os, self.arch, self.compiler, self.compiler_version, self.build_type
        )?;
        if let Some(std) = self.cppstd {
            write!(f, " {}", std)?;
        }
        Ok(())
    }
}
