//! `recipe check` command

use anyhow::Result;

use super::{load_cli_config, load_recipe, requested_options, resolve_platform};
use crate::cli::CheckArgs;
use recipe::builder::{ConfigureSession, PathProbe};
use recipe::ops::check;

pub fn execute(args: CheckArgs) -> Result<()> {
    let config = load_cli_config()?;
    let (recipe, version) = load_recipe(&args.recipe)?;
    let platform = resolve_platform(&args.platform)?;
    let requested = requested_options(&recipe, &args.options)?;

    let session =
        ConfigureSession::new(recipe.name(), PathProbe).with_accelerator(config.accelerator());
    let report = check(recipe.name(), &platform, &requested, &session)?;

    println!("{} {} can be built", recipe.name(), version);
    print!("{}", report);

    Ok(())
}
