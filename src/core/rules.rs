//! Per-OS platform rules.
//!
//! Every OS-conditional decision the recipe makes (option applicability,
//! system libraries, debug-symbol publishing) is read from this table so
//! that platform behavior lives in one place.

use crate::core::platform::{BuildType, Compiler, OperatingSystem, PlatformDescriptor};

/// Platform-specific behavior for one OS family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformRules {
    pub os: OperatingSystem,
    /// Whether `fPIC` is a meaningful option
    pub supports_fpic: bool,
    /// Whether the library may be built as a shared library
    pub supports_shared: bool,
    /// System libraries the core component must link
    pub system_libs: &'static [&'static str],
    /// Extension of separate debug-symbol files, if the platform uses them
    pub debug_symbol_extension: Option<&'static str>,
    /// Compiler whose debug symbols are published alongside the libraries
    debug_symbol_compiler: Option<Compiler>,
}

static LINUX: PlatformRules = PlatformRules {
    os: OperatingSystem::Linux,
    supports_fpic: true,
    supports_shared: true,
    system_libs: &["pthread"],
    debug_symbol_extension: None,
    debug_symbol_compiler: None,
};

static FREEBSD: PlatformRules = PlatformRules {
    os: OperatingSystem::FreeBSD,
    supports_fpic: true,
    supports_shared: true,
    system_libs: &["pthread"],
    debug_symbol_extension: None,
    debug_symbol_compiler: None,
};

static MACOS: PlatformRules = PlatformRules {
    os: OperatingSystem::Macos,
    supports_fpic: true,
    supports_shared: true,
    system_libs: &[],
    debug_symbol_extension: None,
    debug_symbol_compiler: None,
};

static ANDROID: PlatformRules = PlatformRules {
    os: OperatingSystem::Android,
    supports_fpic: true,
    supports_shared: true,
    system_libs: &[],
    debug_symbol_extension: None,
    debug_symbol_compiler: None,
};

static WINDOWS: PlatformRules = PlatformRules {
    os: OperatingSystem::Windows,
    supports_fpic: false,
    supports_shared: false,
    system_libs: &["ws2_32", "wsock32"],
    debug_symbol_extension: Some("pdb"),
    debug_symbol_compiler: Some(Compiler::VisualStudio),
};

impl PlatformRules {
    /// Look up the rules for an OS family.
    pub fn for_os(os: OperatingSystem) -> &'static PlatformRules {
        match os {
            OperatingSystem::Linux => &LINUX,
            OperatingSystem::FreeBSD => &FREEBSD,
            OperatingSystem::Macos => &MACOS,
            OperatingSystem::Android => &ANDROID,
            OperatingSystem::Windows => &WINDOWS,
        }
    }

    /// Look up the rules for a platform's OS.
    pub fn for_platform(platform: &PlatformDescriptor) -> &'static PlatformRules {
        Self::for_os(platform.os)
    }

    /// Whether debug symbols should be copied into the package.
    ///
    /// Only separate symbol files produced by the platform's native compiler
    /// in a build type with debug info qualify.
    pub fn publishes_debug_symbols(&self, compiler: &Compiler, build_type: BuildType) -> bool {
        self.debug_symbol_extension.is_some()
            && self.debug_symbol_compiler.as_ref() == Some(compiler)
            && build_type.has_debug_info()
    }

    /// Glob pattern for a library's debug-symbol files, e.g. `oatpp*.pdb`.
    pub fn debug_symbol_pattern(&self, lib_prefix: &str) -> Option<String> {
        self.debug_symbol_extension
            .map(|ext| format!("{}*.{}", lib_prefix, ext))
    }
}
