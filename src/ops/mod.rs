//! High-level operations.
//!
//! This module contains the implementation of recipe commands.

pub mod check;
pub mod create;
pub mod describe;

pub use check::{check, CheckReport};
pub use create::{create_package, CreateOptions, CreateResult};
pub use describe::{describe, read_package_info, write_package_info, PACKAGE_INFO_FILE};
