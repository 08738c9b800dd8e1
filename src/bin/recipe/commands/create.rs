//! `recipe create` command

use std::path::PathBuf;

use anyhow::Result;

use super::{load_cli_config, load_recipe, requested_options, resolve_platform};
use crate::cli::CreateArgs;
use recipe::builder::{validate, CMakeDriver, PathProbe};
use recipe::ops::{create_package, CreateOptions};
use recipe::sources::AutoMaterializer;

pub fn execute(args: CreateArgs) -> Result<()> {
    let config = load_cli_config()?;
    let (recipe, version) = load_recipe(&args.recipe)?;
    let platform = resolve_platform(&args.platform)?;
    let requested = requested_options(&recipe, &args.options)?;

    // Reject before looking for cmake
    validate(&platform, &requested)?;

    let slug = format!("{}-{}", recipe.name(), version);
    let work_dir = args
        .work_dir
        .unwrap_or_else(|| PathBuf::from(".recipe").join("work").join(&slug));
    let package_dir = args
        .package_dir
        .unwrap_or_else(|| PathBuf::from(".recipe").join("package").join(&slug));

    let mut opts = CreateOptions::new(&version, work_dir, package_dir);
    opts.accelerator = config.accelerator().to_string();

    // Jobs: CLI > config > None (let CMake decide)
    let jobs = args.jobs.or(config.build.jobs);
    let driver = CMakeDriver::new(config.build.cmake.as_deref())?.jobs(jobs);

    let result = create_package(
        &recipe,
        &platform,
        &requested,
        &opts,
        &AutoMaterializer::new(),
        &driver,
        PathProbe,
    )?;

    eprintln!(
        "    Packaged {} {} ({}) in {}",
        recipe.name(),
        version,
        result.options,
        opts.package_root.display()
    );
    for pdb in &result.publish.debug_symbols {
        eprintln!("      symbols {}", pdb.display());
    }
    eprintln!("    Wrote {}", result.package_info.display());

    Ok(())
}
