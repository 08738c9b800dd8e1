//! Versioned package directory layout.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Folder that receives the license file.
pub const LICENSES_DIR: &str = "licenses";

/// Include and library directories inside a package root.
///
/// Directory names carry the version so several versions of one package can
/// be installed side by side on a host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageLayout {
    /// `include/<name>-<version>/<name>`
    pub include_dir: PathBuf,
    /// `lib/<name>-<version>`
    pub lib_dir: PathBuf,
}

impl PackageLayout {
    pub fn new(name: &str, version: &str) -> Self {
        let versioned = format!("{}-{}", name, version);
        PackageLayout {
            include_dir: PathBuf::from("include").join(&versioned).join(name),
            lib_dir: PathBuf::from("lib").join(versioned),
        }
    }
}
