//! Recipe build machinery.
//!
//! This module implements option validation, build configuration, the CMake
//! driver and artifact publishing.

pub mod configure;
pub mod driver;
pub mod host;
pub mod probe;
pub mod publish;
pub mod validate;

pub use configure::{BuildConfigDescriptor, ConfigureSession, DefinitionValue};
pub use driver::{BuildDriver, CMakeDriver};
pub use host::detect_host_platform;
pub use probe::{PathProbe, ToolProbe};
pub use publish::{PublishReport, Publisher};
pub use validate::{validate, ConfigurationError};
