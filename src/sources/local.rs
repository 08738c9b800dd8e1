//! Sources that are already unpacked on disk.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::core::recipe::SourceSpec;
use crate::util::fs::copy_dir_all;

/// Copies an unpacked directory (`/path/to/oatpp-1.2.5` or a `file://` URL)
/// into the destination, keeping its folder name.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalMaterializer;

/// Resolve a local source URL to a path.
pub fn local_path(url: &str) -> Result<PathBuf> {
    if url.starts_with("file://") {
        let parsed = url::Url::parse(url).with_context(|| format!("invalid file URL: {}", url))?;
        return parsed
            .to_file_path()
            .map_err(|_| anyhow::anyhow!("file URL does not name a local path: {}", url));
    }
    Ok(PathBuf::from(url))
}

impl super::SourceMaterializer for LocalMaterializer {
    fn fetch(&self, spec: &SourceSpec, dest: &Path) -> Result<PathBuf> {
        let src = local_path(&spec.url)?;
        if !src.is_dir() {
            bail!("source directory not found: {}", src.display());
        }
        let Some(folder) = src.file_name() else {
            bail!("source path has no folder name: {}", src.display());
        };

        if spec.sha256.is_some() {
            tracing::warn!("ignoring sha256 for unpacked source {}", src.display());
        }

        tracing::info!("Copying source from {}", src.display());
        copy_dir_all(&src, &dest.join(folder))?;
        Ok(dest.to_path_buf())
    }
}
