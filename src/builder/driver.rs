//! CMake build driver.
//!
//! Runs configure, build and install for a staged source tree. Failures from
//! CMake are returned with CMake's own stderr and are not interpreted here.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::builder::configure::BuildConfigDescriptor;
use crate::core::platform::BuildType;
use crate::util::fs::ensure_dir;
use crate::util::process::{find_cmake, ProcessBuilder};

/// Drives the external build toolchain.
pub trait BuildDriver {
    /// Configure and build `source_root`; returns the build output root.
    fn run(
        &self,
        config: &BuildConfigDescriptor,
        source_root: &Path,
        work_dir: &Path,
    ) -> Result<PathBuf>;

    /// Install built artifacts into `package_root`.
    fn install(&self, build_root: &Path, package_root: &Path, build_type: BuildType) -> Result<()>;
}

/// Build driver that shells out to `cmake`.
#[derive(Debug, Clone)]
pub struct CMakeDriver {
    cmake: PathBuf,
    jobs: Option<usize>,
}

impl CMakeDriver {
    /// Create a driver using the configured `cmake`, or the one on `PATH`.
    pub fn new(configured: Option<&Path>) -> Result<Self> {
        let Some(cmake) = find_cmake(configured) else {
            bail!(
                "CMake not found\n\
                 \n\
                 CMake is required to build the package.\n\
                 Install CMake and ensure it's in your PATH, or set `build.cmake` in config."
            );
        };
        Ok(Self::with_program(cmake))
    }

    /// Create a driver for a specific cmake executable.
    pub fn with_program(cmake: impl Into<PathBuf>) -> Self {
        CMakeDriver {
            cmake: cmake.into(),
            jobs: None,
        }
    }

    /// Limit build parallelism.
    pub fn jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs;
        self
    }

    /// `cmake -S <src> -B <build> [-G <gen>] -D...`
    pub fn configure_command(
        &self,
        config: &BuildConfigDescriptor,
        source_root: &Path,
        build_root: &Path,
    ) -> ProcessBuilder {
        let mut cmd = ProcessBuilder::new(&self.cmake)
            .arg("-S")
            .arg(source_root)
            .arg("-B")
            .arg(build_root);

        if let Some(generator) = &config.generator {
            cmd = cmd.arg("-G").arg(generator);
        }

        cmd.args(config.define_args())
    }

    /// `cmake --build <build> --config <type> [--parallel N]`
    pub fn build_command(&self, build_root: &Path, build_type: BuildType) -> ProcessBuilder {
        let mut cmd = ProcessBuilder::new(&self.cmake)
            .arg("--build")
            .arg(build_root)
            .arg("--config")
            .arg(build_type.as_str());

        // Multi-config generators ignore CMAKE_BUILD_TYPE, so --config is always passed
        cmd = match self.jobs {
            Some(jobs) => cmd.arg("--parallel").arg(jobs.to_string()),
            None => cmd.arg("--parallel"),
        };

        cmd
    }

    /// `cmake --install <build> --prefix <package> --config <type>`
    pub fn install_command(
        &self,
        build_root: &Path,
        package_root: &Path,
        build_type: BuildType,
    ) -> ProcessBuilder {
        ProcessBuilder::new(&self.cmake)
            .arg("--install")
            .arg(build_root)
            .arg("--prefix")
            .arg(package_root)
            .arg("--config")
            .arg(build_type.as_str())
    }
}

/// Build type the descriptor was configured with.
fn descriptor_build_type(config: &BuildConfigDescriptor) -> BuildType {
    config
        .definition("CMAKE_BUILD_TYPE")
        .and_then(|v| v.to_string().parse().ok())
        .unwrap_or_default()
}

fn run_checked(cmd: &ProcessBuilder, what: &str) -> Result<()> {
    tracing::debug!("running {}", cmd.display_command());
    let output = cmd.exec()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("CMake {} failed:\n{}", what, stderr);
    }

    Ok(())
}

impl BuildDriver for CMakeDriver {
    fn run(
        &self,
        config: &BuildConfigDescriptor,
        source_root: &Path,
        work_dir: &Path,
    ) -> Result<PathBuf> {
        let build_root = work_dir.join(&config.build_folder);
        ensure_dir(&build_root)?;

        tracing::info!("Configuring CMake project in {}", build_root.display());
        run_checked(
            &self.configure_command(config, source_root, &build_root),
            "configuration",
        )
        .with_context(|| format!("failed to configure {}", source_root.display()))?;

        tracing::info!("Building CMake project");
        run_checked(
            &self.build_command(&build_root, descriptor_build_type(config)),
            "build",
        )?;

        Ok(build_root)
    }

    fn install(&self, build_root: &Path, package_root: &Path, build_type: BuildType) -> Result<()> {
        tracing::info!("Installing into {}", package_root.display());
        ensure_dir(package_root)?;
        run_checked(
            &self.install_command(build_root, package_root, build_type),
            "install",
        )
    }
}
