//! Artifact publishing.
//!
//! After the build driver has installed into the package root, the publisher
//! adds the license, adds MSVC debug symbols for debug-info builds and strips
//! the build-system integration files CMake exports. The package descriptor
//! is the only supported way for consumers to locate the library.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use glob::Pattern;
use walkdir::WalkDir;

use crate::core::layout::{PackageLayout, LICENSES_DIR};
use crate::core::platform::PlatformDescriptor;
use crate::core::rules::PlatformRules;
use crate::util::fs::{ensure_dir, remove_dir_all_if_exists};

/// License file expected at the root of the staged source.
pub const LICENSE_FILE: &str = "LICENSE";

/// Integration directories removed from `<package>/lib`.
pub const INTEGRATION_DIRS: &[&str] = &["cmake", "pkgconfig"];

/// What a publish step did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishReport {
    /// Where the license was copied to
    pub license: PathBuf,
    /// Debug-symbol files copied into the library directory
    pub debug_symbols: Vec<PathBuf>,
    /// Integration directories that were removed
    pub removed: Vec<PathBuf>,
}

/// Publishes build artifacts for one package version.
#[derive(Debug, Clone)]
pub struct Publisher {
    name: String,
    version: String,
    source_root: PathBuf,
}

impl Publisher {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        source_root: impl Into<PathBuf>,
    ) -> Self {
        Publisher {
            name: name.into(),
            version: version.into(),
            source_root: source_root.into(),
        }
    }

    /// Publish artifacts from `build_root` into `package_root`.
    ///
    /// Any failure leaves the package unusable and is returned to the caller.
    pub fn publish(
        &self,
        build_root: &Path,
        package_root: &Path,
        platform: &PlatformDescriptor,
    ) -> Result<PublishReport> {
        let mut report = PublishReport {
            license: self.copy_license(package_root)?,
            ..Default::default()
        };

        let rules = PlatformRules::for_platform(platform);
        if rules.publishes_debug_symbols(&platform.compiler, platform.build_type) {
            if let Some(pattern) = rules.debug_symbol_pattern(&self.name) {
                report.debug_symbols = self.copy_debug_symbols(build_root, package_root, &pattern)?;
            }
        }

        report.removed = remove_integration_dirs(package_root)?;
        Ok(report)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Path of the license in the staged source, or an error if it is missing.
    pub fn require_license(&self) -> Result<PathBuf> {
        let src = self.source_root.join(LICENSE_FILE);
        if !src.is_file() {
            bail!(
                "license file not found: {}\n\
                 \n\
                 A package cannot be published without its license.",
                src.display()
            );
        }
        Ok(src)
    }

    fn copy_license(&self, package_root: &Path) -> Result<PathBuf> {
        let src = self.require_license()?;
        let dst_dir = package_root.join(LICENSES_DIR);
        ensure_dir(&dst_dir)?;
        let dst = dst_dir.join(LICENSE_FILE);
        fs::copy(&src, &dst)
            .with_context(|| format!("failed to copy {} to {}", src.display(), dst.display()))?;

        Ok(dst)
    }

    /// Copy every file under `build_root` whose name matches `pattern` into
    /// the versioned library directory. Subdirectories are flattened.
    fn copy_debug_symbols(
        &self,
        build_root: &Path,
        package_root: &Path,
        pattern: &str,
    ) -> Result<Vec<PathBuf>> {
        tracing::info!("Searching for debug symbols matching {}", pattern);

        let matcher = Pattern::new(pattern)
            .with_context(|| format!("invalid debug symbol pattern: {}", pattern))?;
        let dst_dir = package_root.join(PackageLayout::new(&self.name, &self.version).lib_dir);

        let mut copied = Vec::new();
        for entry in WalkDir::new(build_root).sort_by_file_name() {
            let entry = entry
                .with_context(|| format!("failed to walk {}", build_root.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy();
            if !matcher.matches(&file_name) {
                continue;
            }

            ensure_dir(&dst_dir)?;
            let dst = dst_dir.join(entry.file_name());
            fs::copy(entry.path(), &dst).with_context(|| {
                format!(
                    "failed to copy {} to {}",
                    entry.path().display(),
                    dst.display()
                )
            })?;

            tracing::info!("Copied debug symbols: {}", file_name);
            copied.push(dst);
        }

        Ok(copied)
    }
}

fn remove_integration_dirs(package_root: &Path) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();
    for dir in INTEGRATION_DIRS {
        let path = package_root.join("lib").join(dir);
        if path.exists() {
            remove_dir_all_if_exists(&path)?;
            tracing::debug!("removed {}", path.display());
            removed.push(path);
        }
    }
    Ok(removed)
}
