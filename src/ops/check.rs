//! Implementation of `recipe check`.
//!
//! Validates a configuration and previews the CMake invocation without
//! fetching or building anything.

use std::fmt;

use crate::builder::configure::{BuildConfigDescriptor, ConfigureSession};
use crate::builder::probe::ToolProbe;
use crate::builder::validate::{validate, ConfigurationError};
use crate::core::options::OptionSet;
use crate::core::platform::PlatformDescriptor;

/// Outcome of a successful check.
#[derive(Debug, Clone)]
pub struct CheckReport {
    pub platform: PlatformDescriptor,
    pub requested: OptionSet,
    /// Options after validation narrowed them
    pub options: OptionSet,
    pub build_config: BuildConfigDescriptor,
}

impl CheckReport {
    /// Whether validation removed `fPIC` from the request.
    pub fn fpic_dropped(&self) -> bool {
        self.requested.has_fpic() && !self.options.has_fpic()
    }
}

/// Validate `requested` for `platform` and compute the build configuration.
pub fn check<P: ToolProbe>(
    name: &str,
    platform: &PlatformDescriptor,
    requested: &OptionSet,
    session: &ConfigureSession<P>,
) -> Result<CheckReport, ConfigurationError> {
    let options = validate(platform, requested)?;
    let build_config = session.configure(platform, &options).clone();
    tracing::debug!("{} configuration accepted: {}", name, options);

    Ok(CheckReport {
        platform: platform.clone(),
        requested: *requested,
        options,
        build_config,
    })
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "platform:  {}", self.platform)?;
        write!(f, "options:   {}", self.options)?;
        if self.fpic_dropped() {
            write!(f, " (fPIC removed)")?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "generator: {}",
            self.build_config.generator.as_deref().unwrap_or("(platform default)")
        )?;
        writeln!(f, "build dir: {}", self.build_config.build_folder.display())?;
        for arg in self.build_config.define_args() {
            writeln!(f, "  {}", arg)?;
        }
        Ok(())
    }
}
