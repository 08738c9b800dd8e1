//! Gzipped tarball sources, remote or on disk.

use std::io::Cursor;
use std::path::{Component, Path, PathBuf};

use anyhow::{bail, Context, Result};
use flate2::read::GzDecoder;
use tar::Archive;

use crate::core::recipe::SourceSpec;
use crate::sources::local::local_path;
use crate::util::hash::{sha256_bytes, verify_sha256};

/// Downloads (or reads) a `.tar.gz`, checks its SHA-256 and unpacks it.
#[derive(Debug, Default, Clone)]
pub struct TarballMaterializer;

impl TarballMaterializer {
    fn read_archive(&self, url: &str) -> Result<Vec<u8>> {
        if url.starts_with("http://") || url.starts_with("https://") {
            tracing::info!("Downloading {}", url);

            let response = reqwest::blocking::get(url)
                .with_context(|| format!("failed to download tarball from {}", url))?;

            if !response.status().is_success() {
                bail!(
                    "failed to download tarball from {}: HTTP {}",
                    url,
                    response.status()
                );
            }

            let bytes = response
                .bytes()
                .context("failed to read tarball response body")?;
            return Ok(bytes.to_vec());
        }

        let path = local_path(url)?;
        std::fs::read(&path).with_context(|| format!("failed to read tarball: {}", path.display()))
    }
}

impl super::SourceMaterializer for TarballMaterializer {
    fn fetch(&self, spec: &SourceSpec, dest: &Path) -> Result<PathBuf> {
        let data = self.read_archive(&spec.url)?;

        match &spec.sha256 {
            Some(expected) => {
                verify_sha256(&data, expected, &spec.url)?;
                tracing::debug!("Tarball hash verified: {}", expected);
            }
            None => tracing::warn!(
                "no sha256 for {}, archive hash is {}",
                spec.url,
                sha256_bytes(&data)
            ),
        }

        extract_tarball(&data, dest)
            .with_context(|| format!("failed to extract tarball from {}", spec.url))?;
        tracing::info!("Extracted tarball to {}", dest.display());

        Ok(dest.to_path_buf())
    }
}

/// Unpack a gzipped tarball into `dest`, keeping the archive's layout.
///
/// Entries with absolute paths or `..` components are rejected, and so are
/// links whose target is absolute or climbs out with `..`.
pub fn extract_tarball(data: &[u8], dest: &Path) -> Result<()> {
    let mut archive = Archive::new(GzDecoder::new(Cursor::new(data)));

    std::fs::create_dir_all(dest)
        .with_context(|| format!("failed to create destination directory: {}", dest.display()))?;

    for entry in archive
        .entries()
        .context("failed to read tarball entries")?
    {
        let mut entry = entry.context("failed to read tarball entry")?;
        let entry_path = entry.path().context("failed to get entry path")?.into_owned();

        if !is_contained(&entry_path) {
            bail!(
                "tarball entry escapes destination directory: {}",
                entry_path.display()
            );
        }

        let entry_type = entry.header().entry_type();
        if matches!(entry_type, tar::EntryType::Link | tar::EntryType::Symlink) {
            let target = entry
                .link_name()
                .context("failed to get link target")?
                .map(|t| t.into_owned())
                .unwrap_or_default();
            if !is_contained(&target) {
                bail!(
                    "tarball entry escapes destination directory: {} -> {}",
                    entry_path.display(),
                    target.display()
                );
            }
        }

        match entry_type {
            tar::EntryType::Directory
            | tar::EntryType::Regular
            | tar::EntryType::Continuous
            | tar::EntryType::Link
            | tar::EntryType::Symlink => {
                // unpack_in refuses to write through a link that leaves `dest`
                let unpacked = entry
                    .unpack_in(dest)
                    .with_context(|| format!("failed to extract {}", entry_path.display()))?;
                if !unpacked {
                    bail!(
                        "tarball entry escapes destination directory: {}",
                        entry_path.display()
                    );
                }
            }
            // pax headers, fifos, devices
            other => tracing::debug!(
                "Skipping unsupported entry type {:?}: {}",
                other,
                entry_path.display()
            ),
        }
    }

    Ok(())
}

/// True if `path` is relative and never steps above where it starts.
fn is_contained(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
