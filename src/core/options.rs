//! Package options - the caller-chosen switches for a build.
//!
//! Only two options are recognized: `shared` and `fPIC`. `fPIC` is optional
//! because the validator removes it when it does not apply; its absence is
//! meaningful downstream (no `CMAKE_POSITION_INDEPENDENT_CODE` define).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when parsing a `key=value` option.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionParseError {
    #[error("unknown option '{0}', valid options: shared, fPIC")]
    UnknownOption(String),

    #[error("invalid value '{value}' for option '{name}', expected True or False")]
    InvalidValue { name: String, value: String },

    #[error("invalid option '{0}', expected key=value")]
    Malformed(String),
}

/// Recognized option names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionName {
    Shared,
    Fpic,
}

impl OptionName {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionName::Shared => "shared",
            OptionName::Fpic => "fPIC",
        }
    }
}

impl FromStr for OptionName {
    type Err = OptionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shared" => Ok(OptionName::Shared),
            "fPIC" | "fpic" => Ok(OptionName::Fpic),
            _ => Err(OptionParseError::UnknownOption(s.to_string())),
        }
    }
}

/// A set of package options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptionSet {
    /// Build a shared library instead of a static one
    pub shared: bool,

    /// Position-independent code; `None` once removed
    #[serde(rename = "fPIC", skip_serializing_if = "Option::is_none")]
    pub fpic: Option<bool>,
}

impl Default for OptionSet {
    fn default() -> Self {
        OptionSet {
            shared: false,
            fpic: Some(true),
        }
    }
}

impl OptionSet {
    pub fn new(shared: bool, fpic: Option<bool>) -> Self {
        OptionSet { shared, fpic }
    }

    /// Remove `fPIC` from the set.
    pub fn remove_fpic(&mut self) {
        self.fpic = None;
    }

    pub fn has_fpic(&self) -> bool {
        self.fpic.is_some()
    }

    /// Set an option from its name and textual value.
    pub fn set(&mut self, name: OptionName, value: bool) {
        match name {
            OptionName::Shared => self.shared = value,
            OptionName::Fpic => self.fpic = Some(value),
        }
    }

    /// Apply a `key=value` assignment, e.g. `shared=True`.
    pub fn apply(&mut self, assignment: &str) -> Result<(), OptionParseError> {
        let (name, value) = assignment
            .split_once('=')
            .ok_or_else(|| OptionParseError::Malformed(assignment.to_string()))?;
        let name = name.trim();
        let option: OptionName = name.parse()?;
        let value = parse_bool(value.trim()).ok_or_else(|| OptionParseError::InvalidValue {
            name: name.to_string(),
            value: value.trim().to_string(),
        })?;
        self.set(option, value);
        Ok(())
    }
}

impl fmt::Display for OptionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shared={}", bool_str(self.shared))?;
        if let Some(fpic) = self.fpic {
            write!(f, " fPIC={}", bool_str(fpic))?;
        }
        Ok(())
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "on" | "yes" => Some(true),
        "false" | "0" | "off" | "no" => Some(false),
        _ => None,
    }
}

fn bool_str(b: bool) -> &'static str {
    if b {
        "True"
    } else {
        "False"
    }
}
