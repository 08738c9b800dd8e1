//! Command implementations

pub mod check;
pub mod completions;
pub mod create;
pub mod describe;
pub mod probe;

use anyhow::{bail, Context, Result};

use crate::cli::{PlatformArgs, RecipeArgs};
use recipe::builder::host::{detect_host_platform, host_arch};
use recipe::core::{
    BuildType, Compiler, CppStandard, OperatingSystem, OptionSet, PlatformDescriptor, Recipe,
};
use recipe::util::config::{global_config_path, load_config, project_config_path};
use recipe::Config;

/// Load global and project configuration for the current directory.
pub fn load_cli_config() -> Result<Config> {
    let cwd = std::env::current_dir().context("failed to get current directory")?;
    Ok(load_config(
        global_config_path().as_deref(),
        &project_config_path(&cwd),
    ))
}

/// Load the recipe and pick the version to work on.
pub fn load_recipe(args: &RecipeArgs) -> Result<(Recipe, String)> {
    let recipe = Recipe::load(&args.recipe)?;

    let version = match &args.version {
        Some(v) => v.clone(),
        None => match recipe.latest_version() {
            Some(v) => v.to_string(),
            None => bail!(
                "recipe {} has no sources\n\
                 \n\
                 Add a [sources.\"<version>\"] table with the archive URL.",
                args.recipe.display()
            ),
        },
    };

    Ok((recipe, version))
}

/// Build the target platform from flags, detecting the host for anything unset.
pub fn resolve_platform(args: &PlatformArgs) -> Result<PlatformDescriptor> {
    let mut platform = match (&args.compiler, &args.compiler_version) {
        (Some(compiler), Some(version)) => PlatformDescriptor::new(
            OperatingSystem::host(),
            compiler.parse::<Compiler>()?,
            version.parse()?,
        )
        .with_arch(host_arch()),
        (None, None) => detect_host_platform()?,
        _ => bail!("--compiler and --compiler-version must be given together"),
    };

    if let Some(os) = &args.os {
        platform.os = os.parse()?;
    }
    if let Some(arch) = &args.arch {
        platform.arch = arch.clone();
    }
    platform.build_type = args.build_type.parse::<BuildType>()?;
    if let Some(cppstd) = &args.cppstd {
        platform.cppstd = Some(cppstd.parse::<CppStandard>()?);
    }

    Ok(platform)
}

/// Recipe defaults with `-o key=value` overrides applied in order.
pub fn requested_options(recipe: &Recipe, overrides: &[String]) -> Result<OptionSet> {
    let mut options = recipe.options;
    for assignment in overrides {
        options
            .apply(assignment)
            .with_context(|| format!("invalid option `{}`", assignment))?;
    }
    Ok(options)
}
