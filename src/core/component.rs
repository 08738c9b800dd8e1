//! Package components - the independently linkable units of a package.
//!
//! A published package exposes exactly two components, `core` and
//! `test-support`. Each component is a single record that carries the names
//! downstream build descriptions use to find it, so the legacy single-config
//! name and the multi-config name always resolve to the same data.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Result};
use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use petgraph::visit::Dfs;
use serde::{Deserialize, Serialize};

/// Component identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentId {
    /// The library itself
    Core,
    /// Test helpers shipped with the library
    TestSupport,
}

impl ComponentId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentId::Core => "core",
            ComponentId::TestSupport => "test-support",
        }
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "core" => Ok(ComponentId::Core),
            "test-support" | "test_support" | "test" => Ok(ComponentId::TestSupport),
            other => bail!("unknown component `{}` (expected core or test-support)", other),
        }
    }
}

/// Build-description formats a consumer may look a component up with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupFormat {
    /// Legacy single-config find-module (`cmake_find_package`)
    CmakeFindPackage,
    /// Multi-config package config (`cmake_find_package_multi`)
    CmakeFindPackageMulti,
}

impl LookupFormat {
    pub const ALL: [LookupFormat; 2] = [
        LookupFormat::CmakeFindPackage,
        LookupFormat::CmakeFindPackageMulti,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LookupFormat::CmakeFindPackage => "cmake_find_package",
            LookupFormat::CmakeFindPackageMulti => "cmake_find_package_multi",
        }
    }
}

/// A named, independently linkable unit within a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub id: ComponentId,
    pub display_name: String,
    /// Include search paths, relative to the package root
    pub include_dirs: Vec<PathBuf>,
    /// Library search paths, relative to the package root
    pub lib_dirs: Vec<PathBuf>,
    /// Libraries to link (without prefix/extension)
    pub libs: Vec<String>,
    /// System libraries to link
    pub system_libs: Vec<String>,
    /// Components this one depends on
    pub requires: Vec<ComponentId>,
    /// Name used by each lookup format
    pub aliases: BTreeMap<LookupFormat, String>,
}

impl Component {
    pub fn new(id: ComponentId, display_name: impl Into<String>) -> Self {
        Component {
            id,
            display_name: display_name.into(),
            include_dirs: Vec::new(),
            lib_dirs: Vec::new(),
            libs: Vec::new(),
            system_libs: Vec::new(),
            requires: Vec::new(),
            aliases: BTreeMap::new(),
        }
    }

    /// Register the same lookup name under every format.
    pub fn with_alias_for_all_formats(mut self, name: &str) -> Self {
        for format in LookupFormat::ALL {
            self.aliases.insert(format, name.to_string());
        }
        self
    }

    pub fn lookup_name(&self, format: LookupFormat) -> Option<&str> {
        self.aliases.get(&format).map(String::as_str)
    }
}

/// The complete set of components published by one package version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDescriptor {
    pub name: String,
    pub version: String,
    pub components: Vec<Component>,
}

impl PackageDescriptor {
    /// Get a component by id.
    pub fn get(&self, id: ComponentId) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }

    /// Resolve a component by the name a consumer uses in a given format.
    pub fn resolve(&self, format: LookupFormat, name: &str) -> Option<&Component> {
        self.components
            .iter()
            .find(|c| c.lookup_name(format) == Some(name))
    }

    fn requirement_graph(&self) -> DiGraphMap<ComponentId, ()> {
        let mut graph = DiGraphMap::new();
        for component in &self.components {
            graph.add_node(component.id);
            for req in &component.requires {
                graph.add_edge(component.id, *req, ());
            }
        }
        graph
    }

    /// Components a consumer of `id` links, dependents before their
    /// requirements (static link order).
    pub fn link_order(&self, id: ComponentId) -> Result<Vec<ComponentId>> {
        if self.get(id).is_none() {
            bail!("unknown component `{}` in package `{}`", id, self.name);
        }

        let graph = self.requirement_graph();

        let mut reachable = HashSet::new();
        let mut dfs = Dfs::new(&graph, id);
        while let Some(node) = dfs.next(&graph) {
            reachable.insert(node);
        }

        let sorted = match toposort(&graph, None) {
            Ok(sorted) => sorted,
            Err(cycle) => bail!(
                "component requirements form a cycle at `{}`",
                cycle.node_id()
            ),
        };

        Ok(sorted
            .into_iter()
            .filter(|node| reachable.contains(node))
            .collect())
    }

    /// Libraries a consumer of `id` links, in link order.
    pub fn transitive_libs(&self, id: ComponentId) -> Result<Vec<String>> {
        self.collect_transitive(id, |c| &c.libs)
    }

    /// System libraries a consumer of `id` links, including those required by
    /// its dependencies.
    pub fn transitive_system_libs(&self, id: ComponentId) -> Result<Vec<String>> {
        self.collect_transitive(id, |c| &c.system_libs)
    }

    fn collect_transitive<F>(&self, id: ComponentId, field: F) -> Result<Vec<String>>
    where
        F: Fn(&Component) -> &Vec<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for node in self.link_order(id)? {
            if let Some(component) = self.get(node) {
                for lib in field(component) {
                    if !out.contains(lib) {
                        out.push(lib.clone());
                    }
                }
            }
        }
        Ok(out)
    }
}
