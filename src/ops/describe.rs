//! Package description for downstream consumers.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::component::{Component, ComponentId, PackageDescriptor};
use crate::core::layout::PackageLayout;
use crate::core::platform::PlatformDescriptor;
use crate::core::rules::PlatformRules;
use crate::util::fs::write_string;

/// File the descriptor is written to in the package root.
pub const PACKAGE_INFO_FILE: &str = "package-info.json";

/// Describe the components of `name` `version` as built for `platform`.
///
/// Pure: the result depends only on the arguments.
pub fn describe(name: &str, version: &str, platform: &PlatformDescriptor) -> PackageDescriptor {
    let layout = PackageLayout::new(name, version);
    let rules = PlatformRules::for_platform(platform);

    let with_layout = |mut component: Component| {
        component.include_dirs = vec![layout.include_dir.clone()];
        component.lib_dirs = vec![layout.lib_dir.clone()];
        component
    };

    let mut core =
        with_layout(Component::new(ComponentId::Core, name).with_alias_for_all_formats(name));
    core.libs = vec![name.to_string()];
    core.system_libs = rules.system_libs.iter().map(|s| s.to_string()).collect();

    let test_name = format!("{}-test", name);
    let mut test_support = with_layout(
        Component::new(ComponentId::TestSupport, &test_name).with_alias_for_all_formats(&test_name),
    );
    test_support.libs = vec![test_name];
    test_support.requires = vec![ComponentId::Core];

    PackageDescriptor {
        name: name.to_string(),
        version: version.to_string(),
        components: vec![core, test_support],
    }
}

/// Write `descriptor` as pretty JSON to `<package_root>/package-info.json`.
pub fn write_package_info(package_root: &Path, descriptor: &PackageDescriptor) -> Result<PathBuf> {
    let path = package_root.join(PACKAGE_INFO_FILE);
    let json = serde_json::to_string_pretty(descriptor)
        .context("failed to serialize package description")?;
    write_string(&path, &json)?;
    tracing::debug!("wrote {}", path.display());
    Ok(path)
}

/// Read a descriptor written by [`write_package_info`].
pub fn read_package_info(package_root: &Path) -> Result<PackageDescriptor> {
    let path = package_root.join(PACKAGE_INFO_FILE);
    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("failed to parse {}", path.display()))
}
