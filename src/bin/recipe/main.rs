//! Recipe CLI - build and package a native C++ library

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("recipe=debug")
    } else {
        EnvFilter::new("recipe=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Create(args) => commands::create::execute(args),
        Commands::Check(args) => commands::check::execute(args),
        Commands::Describe(args) => commands::describe::execute(args),
        Commands::Probe(args) => commands::probe::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
