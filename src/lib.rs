//! Recipe - build and package a versioned native C++ library with CMake
//!
//! This crate provides the library behind the `recipe` command: option
//! validation per platform, memoized CMake configuration, source staging,
//! artifact publishing and the component description consumers link against.

pub mod builder;
pub mod core;
pub mod ops;
pub mod sources;
pub mod util;

/// Test utilities and mocks for recipe unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides a counting tool probe, a recording build
/// driver and source-tree fixtures.
#[cfg(test)]
pub mod test_support;

pub use core::{OptionSet, PackageDescriptor, PlatformDescriptor, Recipe};
pub use util::config::Config;
