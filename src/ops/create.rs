//! Implementation of `recipe create`.
//!
//! Runs one package build end to end: validate the requested options,
//! stage the source, configure and build with CMake, install, publish the
//! extra artifacts and write the package description.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::builder::configure::{BuildConfigDescriptor, ConfigureSession};
use crate::builder::driver::BuildDriver;
use crate::builder::probe::{ToolProbe, DEFAULT_ACCELERATOR};
use crate::builder::publish::{PublishReport, Publisher};
use crate::builder::validate::validate;
use crate::core::component::PackageDescriptor;
use crate::core::options::OptionSet;
use crate::core::platform::PlatformDescriptor;
use crate::core::recipe::Recipe;
use crate::ops::describe::{describe, write_package_info};
use crate::sources::{stage_source, SourceMaterializer};
use crate::util::fs::{ensure_dir, remove_dir_all_if_exists};

/// Options for the create command.
#[derive(Debug, Clone)]
pub struct CreateOptions {
    /// Version to build; must have a source entry in the recipe
    pub version: String,

    /// Scratch directory holding the staged source and the build folder
    pub work_dir: PathBuf,

    /// Directory the package is installed into
    pub package_root: PathBuf,

    /// Build accelerator to probe for
    pub accelerator: String,
}

impl CreateOptions {
    pub fn new(
        version: impl Into<String>,
        work_dir: impl Into<PathBuf>,
        package_root: impl Into<PathBuf>,
    ) -> Self {
        CreateOptions {
            version: version.into(),
            work_dir: work_dir.into(),
            package_root: package_root.into(),
            accelerator: DEFAULT_ACCELERATOR.to_string(),
        }
    }
}

/// Result of a successful create.
#[derive(Debug, Clone)]
pub struct CreateResult {
    /// Options after validation narrowed them
    pub options: OptionSet,
    pub build_config: BuildConfigDescriptor,
    pub publish: PublishReport,
    pub descriptor: PackageDescriptor,
    /// Path of the written `package-info.json`
    pub package_info: PathBuf,
}

/// Build and package one version of `recipe` for `platform`.
///
/// `requested` is validated before anything is fetched, so a rejected
/// configuration never touches the network or the work directory.
pub fn create_package<M, D, P>(
    recipe: &Recipe,
    platform: &PlatformDescriptor,
    requested: &OptionSet,
    opts: &CreateOptions,
    materializer: &M,
    driver: &D,
    probe: P,
) -> Result<CreateResult>
where
    M: SourceMaterializer,
    D: BuildDriver,
    P: ToolProbe,
{
    let name = recipe.name();
    let version = opts.version.as_str();

    let options = validate(platform, requested)?;
    let spec = recipe.source(version)?;
    tracing::info!("Creating {} {} for {} ({})", name, version, platform, options);

    ensure_dir(&opts.work_dir)?;
    let source_root = stage_source(
        materializer,
        spec,
        &opts.work_dir,
        &recipe.staged_dir_name(version),
    )
    .with_context(|| format!("failed to stage source for {} {}", name, version))?;

    let publisher = Publisher::new(name, version, &source_root);
    publisher.require_license()?;

    let session = ConfigureSession::new(name, probe).with_accelerator(&opts.accelerator);
    let build_config = session.configure(platform, &options).clone();

    let build_root = driver.run(&build_config, &source_root, &opts.work_dir)?;

    // Install into an empty root.
    remove_dir_all_if_exists(&opts.package_root)?;
    let packaged = install_and_publish(driver, &publisher, &build_root, opts, platform);
    let (publish, descriptor, package_info) = match packaged {
        Ok(packaged) => packaged,
        Err(err) => {
            if let Err(cleanup) = remove_dir_all_if_exists(&opts.package_root) {
                tracing::warn!(
                    "Failed to remove partial package {}: {:#}",
                    opts.package_root.display(),
                    cleanup
                );
            }
            return Err(err);
        }
    };

    tracing::info!("Packaged {} {} in {}", name, version, opts.package_root.display());

    Ok(CreateResult {
        options,
        build_config,
        publish,
        descriptor,
        package_info,
    })
}

fn install_and_publish<D: BuildDriver>(
    driver: &D,
    publisher: &Publisher,
    build_root: &Path,
    opts: &CreateOptions,
    platform: &PlatformDescriptor,
) -> Result<(PublishReport, PackageDescriptor, PathBuf)> {
    driver.install(build_root, &opts.package_root, platform.build_type)?;
    let publish = publisher.publish(build_root, &opts.package_root, platform)?;

    let descriptor = describe(publisher.name(), publisher.version(), platform);
    let package_info = write_package_info(&opts.package_root, &descriptor)?;
    Ok((publish, descriptor, package_info))
}
