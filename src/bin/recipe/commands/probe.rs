//! `recipe probe` command
//!
//! Shows what the configure step will see on this host.

use anyhow::Result;

use super::load_cli_config;
use crate::cli::ProbeArgs;
use recipe::builder::configure::ACCELERATOR_GENERATOR;
use recipe::builder::{detect_host_platform, PathProbe, ToolProbe};
use recipe::util::process::find_executable;

pub fn execute(args: ProbeArgs) -> Result<()> {
    let config = load_cli_config()?;
    let tool = args.tool.as_deref().unwrap_or(config.accelerator());

    if PathProbe.is_available(tool) {
        let location = find_executable(tool)
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        println!("{}: found {}", tool, location);
        println!("generator: {}", ACCELERATOR_GENERATOR);
    } else {
        println!("{}: not found", tool);
        println!("generator: (platform default)");
    }

    match detect_host_platform() {
        Ok(platform) => println!("host: {}", platform),
        Err(e) => println!("host: not detected ({})", e.to_string().lines().next().unwrap_or("")),
    }

    Ok(())
}
