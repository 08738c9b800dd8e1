//! Configuration file support.
//!
//! Two configuration file locations are read:
//! - Global: `~/.recipe/config.toml` - User-wide defaults
//! - Project: `.recipe/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config, and command-line flags
//! take precedence over both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::builder::probe::DEFAULT_ACCELERATOR;

/// Name of the per-user and per-project configuration directory.
pub const CONFIG_DIR: &str = ".recipe";

/// Recipe tool configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Build settings
    pub build: BuildConfig,
}

/// Build-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Number of parallel build jobs (None = let CMake decide)
    pub jobs: Option<usize>,

    /// Build accelerator probed on PATH (default: ninja)
    pub accelerator: Option<String>,

    /// Path to the cmake executable
    pub cmake: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file is missing or broken.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.build.jobs.is_some() {
            self.build.jobs = other.build.jobs;
        }
        if other.build.accelerator.is_some() {
            self.build.accelerator = other.build.accelerator;
        }
        if other.build.cmake.is_some() {
            self.build.cmake = other.build.cmake;
        }
    }

    /// The build accelerator to probe for.
    pub fn accelerator(&self) -> &str {
        self.build.accelerator.as_deref().unwrap_or(DEFAULT_ACCELERATOR)
    }
}

/// Get the global config directory (~/.recipe).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(CONFIG_DIR))
}

/// Get the global config path (~/.recipe/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.recipe/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR).join("config.toml")
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.recipe/config.toml)
/// 2. Global config (~/.recipe/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path));
    }
    config.merge(Config::load_or_default(project_path));

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.build.jobs.is_none());
        assert!(config.build.cmake.is_none());
        assert_eq!(config.accelerator(), "ninja");
    }

    #[test]
    fn test_config_load() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");

        std::fs::write(
            &config_path,
            r#"
[build]
jobs = 8
accelerator = "samu"
cmake = "/opt/cmake/bin/cmake"
"#,
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.build.jobs, Some(8));
        assert_eq!(config.accelerator(), "samu");
        assert_eq!(config.build.cmake, Some(PathBuf::from("/opt/cmake/bin/cmake")));
    }

    #[test]
    fn test_config_merge() {
        let mut base = Config::default();
        base.build.jobs = Some(4);
        base.build.accelerator = Some("ninja".to_string());

        let mut override_cfg = Config::default();
        override_cfg.build.accelerator = Some("samu".to_string());

        base.merge(override_cfg);

        assert_eq!(base.accelerator(), "samu");
        assert_eq!(base.build.jobs, Some(4));
    }

    #[test]
    fn test_broken_config_falls_back() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[build\njobs = ").unwrap();

        let config = Config::load_or_default(&path);
        assert!(config.build.jobs.is_none());
    }

    #[test]
    fn test_load_config_precedence() {
        let tmp = TempDir::new().unwrap();
        let global = tmp.path().join("global.toml");
        let project = project_config_path(tmp.path());

        std::fs::write(&global, "[build]\njobs = 2\naccelerator = \"samu\"\n").unwrap();
        std::fs::create_dir_all(project.parent().unwrap()).unwrap();
        std::fs::write(&project, "[build]\njobs = 16\n").unwrap();

        let config = load_config(Some(&global), &project);
        assert_eq!(config.build.jobs, Some(16));
        assert_eq!(config.accelerator(), "samu");
    }

    #[test]
    fn test_load_config_no_files() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(None, &project_config_path(tmp.path()));
        assert!(config.build.jobs.is_none());
    }
}
