//! Source materialization.
//!
//! A materializer puts the unpacked archive for one version under a work
//! directory. [`stage_source`] then moves it to the canonical
//! [`SOURCE_FOLDER`] the build reads from.

pub mod local;
pub mod tarball;

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::builder::configure::SOURCE_FOLDER;
use crate::core::recipe::SourceSpec;
use crate::util::fs::replace_dir;

pub use local::LocalMaterializer;
pub use tarball::{extract_tarball, TarballMaterializer};

/// Fetches a versioned source archive.
pub trait SourceMaterializer {
    /// Unpack the source described by `spec` into `dest`.
    ///
    /// Returns the directory the archive was unpacked into. The archive's
    /// own top-level folder is kept.
    fn fetch(&self, spec: &SourceSpec, dest: &Path) -> Result<PathBuf>;
}

/// Picks a materializer from the shape of the source URL.
///
/// `http(s)://` URLs and `.tar.gz`/`.tgz` files are treated as tarballs,
/// anything else as an unpacked local directory.
#[derive(Debug, Default)]
pub struct AutoMaterializer {
    tarball: TarballMaterializer,
    local: LocalMaterializer,
}

impl AutoMaterializer {
    pub fn new() -> Self {
        Self::default()
    }
}

fn is_tarball(url: &str) -> bool {
    url.starts_with("http://")
        || url.starts_with("https://")
        || url.ends_with(".tar.gz")
        || url.ends_with(".tgz")
}

impl SourceMaterializer for AutoMaterializer {
    fn fetch(&self, spec: &SourceSpec, dest: &Path) -> Result<PathBuf> {
        if is_tarball(&spec.url) {
            self.tarball.fetch(spec, dest)
        } else {
            self.local.fetch(spec, dest)
        }
    }
}

/// Fetch `spec` into `work_dir` and rename `<work_dir>/<staged_name>` to the
/// canonical source folder. A stale source folder is replaced.
pub fn stage_source(
    materializer: &impl SourceMaterializer,
    spec: &SourceSpec,
    work_dir: &Path,
    staged_name: &str,
) -> Result<PathBuf> {
    let unpacked = materializer.fetch(spec, work_dir)?;
    let staged = unpacked.join(staged_name);
    if !staged.is_dir() {
        bail!(
            "source archive did not unpack to `{}`\n\
             \n\
             Expected {} after fetching {}.\n\
             Set `strip_prefix` for this version in the recipe if the archive \
             uses another folder name.",
            staged_name,
            staged.display(),
            spec.url
        );
    }

    let canonical = work_dir.join(SOURCE_FOLDER);
    replace_dir(&staged, &canonical)?;
    tracing::info!("Staged source in {}", canonical.display());

    Ok(canonical)
}
