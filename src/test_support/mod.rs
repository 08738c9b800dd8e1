//! Test utilities and mocks for recipe unit tests.
//!
//! Provides stand-ins for the collaborators that touch the host: a probe with
//! a fixed answer that counts its calls, and a build driver that records what
//! it was asked to do and lays out a plausible install tree instead of
//! running CMake.
//!
//! # Example
//!
//! ```rust,ignore
//! use recipe::test_support::{CountingProbe, RecordingDriver};
//!
//! #[test]
//! fn test_example() {
//!     let probe = CountingProbe::present();
//!     let driver = RecordingDriver::new("oatpp", "1.2.5");
//!     // Use in a ConfigureSession / create_package...
//! }
//! ```

pub mod fixtures;

use std::cell::{Cell, RefCell};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::builder::configure::BuildConfigDescriptor;
use crate::builder::driver::BuildDriver;
use crate::builder::probe::ToolProbe;
use crate::core::layout::PackageLayout;
use crate::core::platform::BuildType;

pub use fixtures::*;

/// Probe with a fixed answer that counts how often it was asked.
#[derive(Debug, Default)]
pub struct CountingProbe {
    available: bool,
    calls: Cell<usize>,
}

impl CountingProbe {
    /// Probe that reports every tool as present.
    pub fn present() -> Self {
        CountingProbe {
            available: true,
            calls: Cell::new(0),
        }
    }

    /// Probe that reports every tool as missing.
    pub fn absent() -> Self {
        CountingProbe {
            available: false,
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl ToolProbe for CountingProbe {
    fn is_available(&self, _tool: &str) -> bool {
        self.calls.set(self.calls.get() + 1);
        self.available
    }
}

/// A call made to the recording driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverCall {
    Run { source_root: PathBuf, generator: Option<String> },
    Install { package_root: PathBuf, build_type: BuildType },
}

/// Build driver that records calls and fakes the build outputs.
#[derive(Debug)]
pub struct RecordingDriver {
    name: String,
    version: String,
    fail_with: Option<String>,
    fail_install: bool,
    calls: RefCell<Vec<DriverCall>>,
}

impl RecordingDriver {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        RecordingDriver {
            name: name.into(),
            version: version.into(),
            fail_with: None,
            fail_install: false,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Make `run` fail with the given message.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.fail_with = Some(message.into());
        self
    }

    /// Make `install` fail after it has written part of the package.
    pub fn failing_install(mut self) -> Self {
        self.fail_install = true;
        self
    }

    pub fn calls(&self) -> Vec<DriverCall> {
        self.calls.borrow().clone()
    }
}

impl BuildDriver for RecordingDriver {
    fn run(
        &self,
        config: &BuildConfigDescriptor,
        source_root: &Path,
        work_dir: &Path,
    ) -> Result<PathBuf> {
        self.calls.borrow_mut().push(DriverCall::Run {
            source_root: source_root.to_path_buf(),
            generator: config.generator.clone(),
        });

        if let Some(message) = &self.fail_with {
            bail!("CMake build failed:\n{}", message);
        }

        let build_root = work_dir.join(&config.build_folder);
        let out = build_root.join("src").join("Debug");
        fs::create_dir_all(&out)?;
        fs::write(out.join(format!("{}.pdb", self.name)), "pdb")?;
        fs::write(out.join(format!("{}-test.pdb", self.name)), "pdb")?;
        Ok(build_root)
    }

    fn install(
        &self,
        _build_root: &Path,
        package_root: &Path,
        build_type: BuildType,
    ) -> Result<()> {
        self.calls.borrow_mut().push(DriverCall::Install {
            package_root: package_root.to_path_buf(),
            build_type,
        });

        let layout = PackageLayout::new(&self.name, &self.version);
        let include = package_root.join(&layout.include_dir);
        let lib = package_root.join(&layout.lib_dir);
        fs::create_dir_all(&include)?;
        fs::create_dir_all(&lib)?;
        fs::write(include.join("Environment.hpp"), "#pragma once\n")?;
        fs::write(lib.join(format!("lib{}.a", self.name)), "")?;
        fs::write(lib.join(format!("lib{}-test.a", self.name)), "")?;
        if self.fail_install {
            bail!("CMake install failed:\nfile INSTALL cannot copy file");
        }

        let cmake = package_root
            .join("lib")
            .join("cmake")
            .join(format!("{}-{}", self.name, self.version));
        fs::create_dir_all(&cmake)?;
        fs::write(cmake.join(format!("{}Config.cmake", self.name)), "")?;
        Ok(())
    }
}
