//! Recipe manifest (`Recipe.toml`) parsing.
//!
//! A recipe names the native library, its default options and the source
//! archive for each packaged version:
//!
//! ```toml
//! [package]
//! name = "oatpp"
//! description = "Modern Web Framework for C++"
//! license = "Apache-2.0"
//!
//! [options]
//! shared = false
//! fPIC = true
//!
//! [sources."1.2.5"]
//! url = "https://github.com/oatpp/oatpp/archive/1.2.5.tar.gz"
//! sha256 = "..."
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::options::OptionSet;

/// Default manifest file name.
pub const RECIPE_FILE: &str = "Recipe.toml";

/// Errors found while loading a recipe.
#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("failed to read recipe {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse recipe {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid package name '{0}': must be non-empty lowercase [a-z0-9_-]")]
    InvalidName(String),

    #[error("invalid source version '{0}'")]
    InvalidVersion(String),

    #[error("no source registered for {name} version {version}, available: {available:?}")]
    UnknownVersion {
        name: String,
        version: String,
        available: Vec<String>,
    },

    #[error("sha256 for version {version} must be a 64-character hex string, got '{sha256}'")]
    InvalidChecksum { version: String, sha256: String },

    #[error("invalid source URL '{url}' for version {version}")]
    InvalidUrl { version: String, url: String },
}

/// A parsed recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub package: RecipePackage,

    /// Default option values
    #[serde(default)]
    pub options: OptionSet,

    /// Source archive per version
    #[serde(default)]
    pub sources: BTreeMap<String, SourceSpec>,
}

/// Package metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipePackage {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub license: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    /// Where the recipe itself is maintained
    #[serde(default)]
    pub url: Option<String>,
}

/// A versioned source archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpec {
    /// Download URL (or local directory for path sources)
    pub url: String,

    /// SHA256 of the archive
    #[serde(default)]
    pub sha256: Option<String>,

    /// Top-level directory inside the archive; defaults to `<name>-<version>`
    #[serde(default)]
    pub strip_prefix: Option<String>,
}

impl Recipe {
    /// Load and validate a recipe file.
    pub fn load(path: &Path) -> Result<Self, RecipeError> {
        let content = std::fs::read_to_string(path).map_err(|source| RecipeError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&content, path)
    }

    /// Parse a recipe from TOML content.
    pub fn parse(content: &str, path: &Path) -> Result<Self, RecipeError> {
        let recipe: Recipe = toml::from_str(content).map_err(|source| RecipeError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        recipe.validate()?;
        Ok(recipe)
    }

    pub fn name(&self) -> &str {
        &self.package.name
    }

    /// Validate the recipe contents.
    pub fn validate(&self) -> Result<(), RecipeError> {
        validate_package_name(&self.package.name)?;

        for (version, source) in &self.sources {
            semver::Version::parse(version)
                .map_err(|_| RecipeError::InvalidVersion(version.clone()))?;

            if let Some(sha) = &source.sha256 {
                if sha.len() != 64 || !sha.chars().all(|c| c.is_ascii_hexdigit()) {
                    return Err(RecipeError::InvalidChecksum {
                        version: version.clone(),
                        sha256: sha.clone(),
                    });
                }
            }

            if source.url.contains("://") && url::Url::parse(&source.url).is_err() {
                return Err(RecipeError::InvalidUrl {
                    version: version.clone(),
                    url: source.url.clone(),
                });
            }
        }

        Ok(())
    }

    /// Get the source for a version.
    pub fn source(&self, version: &str) -> Result<&SourceSpec, RecipeError> {
        self.sources
            .get(version)
            .ok_or_else(|| RecipeError::UnknownVersion {
                name: self.package.name.clone(),
                version: version.to_string(),
                available: self.sources.keys().cloned().collect(),
            })
    }

    /// Newest version with a registered source.
    pub fn latest_version(&self) -> Option<&str> {
        self.sources
            .keys()
            .filter_map(|v| semver::Version::parse(v).ok().map(|parsed| (parsed, v)))
            .max_by(|a, b| a.0.cmp(&b.0))
            .map(|(_, v)| v.as_str())
    }

    /// Directory name the archive unpacks to.
    pub fn staged_dir_name(&self, version: &str) -> String {
        self.sources
            .get(version)
            .and_then(|s| s.strip_prefix.clone())
            .unwrap_or_else(|| format!("{}-{}", self.package.name, version))
    }
}

/// Validate a package name: lowercase ascii letters, digits, `_` and `-`.
pub fn validate_package_name(name: &str) -> Result<(), RecipeError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(RecipeError::InvalidName(name.to_string()))
    }
}
