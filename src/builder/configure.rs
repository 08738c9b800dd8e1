//! Build configuration.
//!
//! Translates a validated option set and platform into the CMake invocation
//! descriptor. A `ConfigureSession` computes the descriptor once and hands
//! out the same value for the rest of the build, so configuration cannot
//! drift mid-build.

use std::cell::OnceCell;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::builder::probe::{ToolProbe, DEFAULT_ACCELERATOR};
use crate::core::options::OptionSet;
use crate::core::platform::PlatformDescriptor;

/// Build output folder, relative to the work directory.
pub const BUILD_FOLDER: &str = "build_subfolder";

/// Canonical source folder, relative to the work directory.
pub const SOURCE_FOLDER: &str = "source_subfolder";

/// CMake generator used when the accelerator is found.
pub const ACCELERATOR_GENERATOR: &str = "Ninja";

/// A CMake cache definition value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefinitionValue {
    Bool(bool),
    String(String),
}

impl fmt::Display for DefinitionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefinitionValue::Bool(true) => f.write_str("ON"),
            DefinitionValue::Bool(false) => f.write_str("OFF"),
            DefinitionValue::String(s) => f.write_str(s),
        }
    }
}

impl From<bool> for DefinitionValue {
    fn from(b: bool) -> Self {
        DefinitionValue::Bool(b)
    }
}

impl From<&str> for DefinitionValue {
    fn from(s: &str) -> Self {
        DefinitionValue::String(s.to_string())
    }
}

/// How to invoke CMake for one build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfigDescriptor {
    /// Generator name; `None` selects CMake's platform default
    pub generator: Option<String>,
    /// `-D` cache definitions
    pub definitions: BTreeMap<String, DefinitionValue>,
    /// Build output folder relative to the work directory
    pub build_folder: PathBuf,
}

impl BuildConfigDescriptor {
    /// Render definitions as `-DNAME=VALUE` arguments.
    pub fn define_args(&self) -> Vec<String> {
        self.definitions
            .iter()
            .map(|(name, value)| format!("-D{}={}", name, value))
            .collect()
    }

    pub fn definition(&self, name: &str) -> Option<&DefinitionValue> {
        self.definitions.get(name)
    }
}

/// Name of the define that switches off the library's own test suite.
pub fn self_test_define(package_name: &str) -> String {
    format!("{}_BUILD_TESTS", package_name.to_uppercase().replace('-', "_"))
}

/// Memoized configuration for one build session.
pub struct ConfigureSession<P: ToolProbe> {
    package_name: String,
    probe: P,
    accelerator: String,
    descriptor: OnceCell<BuildConfigDescriptor>,
}

impl<P: ToolProbe> ConfigureSession<P> {
    pub fn new(package_name: impl Into<String>, probe: P) -> Self {
        ConfigureSession {
            package_name: package_name.into(),
            probe,
            accelerator: DEFAULT_ACCELERATOR.to_string(),
            descriptor: OnceCell::new(),
        }
    }

    /// Override the accelerator executable probed for.
    pub fn with_accelerator(mut self, tool: impl Into<String>) -> Self {
        self.accelerator = tool.into();
        self
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    /// Whether the descriptor has been computed.
    pub fn is_configured(&self) -> bool {
        self.descriptor.get().is_some()
    }

    /// Get the build descriptor, computing it on first call.
    ///
    /// Later calls return the stored descriptor unchanged, whatever inputs
    /// they pass.
    pub fn configure(
        &self,
        platform: &PlatformDescriptor,
        options: &OptionSet,
    ) -> &BuildConfigDescriptor {
        self.descriptor.get_or_init(|| self.compute(platform, options))
    }

    fn compute(&self, platform: &PlatformDescriptor, options: &OptionSet) -> BuildConfigDescriptor {
        let generator = if self.probe.is_available(&self.accelerator) {
            Some(ACCELERATOR_GENERATOR.to_string())
        } else {
            None
        };

        let mut definitions = BTreeMap::new();
        definitions.insert(self_test_define(&self.package_name), false.into());
        definitions.insert("CMAKE_WINDOWS_EXPORT_ALL_SYMBOLS".to_string(), true.into());
        definitions.insert("BUILD_SHARED_LIBS".to_string(), options.shared.into());
        definitions.insert(
            "CMAKE_BUILD_TYPE".to_string(),
            platform.build_type.as_str().into(),
        );
        if let Some(fpic) = options.fpic {
            definitions.insert("CMAKE_POSITION_INDEPENDENT_CODE".to_string(), fpic.into());
        }
        if let Some(cppstd) = platform.cppstd {
            definitions.insert("CMAKE_CXX_STANDARD".to_string(), cppstd.cmake_value().into());
        }

        tracing::info!(
            "Configured {} with generator {}",
            self.package_name,
            generator.as_deref().unwrap_or("(platform default)")
        );

        BuildConfigDescriptor {
            generator,
            definitions,
            build_folder: PathBuf::from(BUILD_FOLDER),
        }
    }
}
