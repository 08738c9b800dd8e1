//! Core data structures for recipes.
//!
//! This module contains the foundational types the recipe engine works on:
//! - Platform descriptors and option sets
//! - Per-OS platform rules
//! - Package layout and components
//! - Recipe manifests

pub mod component;
pub mod layout;
pub mod options;
pub mod platform;
pub mod recipe;
pub mod rules;

pub use component::{Component, ComponentId, LookupFormat, PackageDescriptor};
pub use layout::PackageLayout;
pub use options::{OptionName, OptionSet};
pub use platform::{
    BuildType, Compiler, CompilerVersion, CppStandard, OperatingSystem, PlatformDescriptor,
};
pub use recipe::{Recipe, SourceSpec, RECIPE_FILE};
pub use rules::PlatformRules;
