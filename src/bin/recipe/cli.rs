//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Recipe - build and package a native C++ library with CMake
#[derive(Parser)]
#[command(name = "recipe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch, build and package one version
    Create(CreateArgs),

    /// Validate a configuration and show the CMake settings it produces
    Check(CheckArgs),

    /// Print the package description consumers link against
    Describe(DescribeArgs),

    /// Report the build accelerator and the detected host platform
    Probe(ProbeArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Recipe manifest selection shared by most commands.
#[derive(Args)]
pub struct RecipeArgs {
    /// Path to the recipe manifest
    #[arg(long, default_value = "Recipe.toml")]
    pub recipe: PathBuf,

    /// Version to use (defaults to the newest in the recipe)
    #[arg(long = "pkg-version", value_name = "VERSION")]
    pub version: Option<String>,
}

/// Target platform settings. Anything left unset is detected from the host.
#[derive(Args)]
pub struct PlatformArgs {
    /// Operating system (Linux, Macos, Windows, FreeBSD, Android)
    #[arg(long)]
    pub os: Option<String>,

    /// Compiler (gcc, clang, apple-clang, "Visual Studio")
    #[arg(long)]
    pub compiler: Option<String>,

    /// Compiler version (e.g. 9, 11.4, 16)
    #[arg(long)]
    pub compiler_version: Option<String>,

    /// Target architecture
    #[arg(long)]
    pub arch: Option<String>,

    /// Build type (Debug, Release, RelWithDebInfo, MinSizeRel)
    #[arg(long, default_value = "Release")]
    pub build_type: String,

    /// C++ language standard (e.g. 11, 17, gnu14)
    #[arg(long)]
    pub cppstd: Option<String>,
}

#[derive(Args)]
pub struct CreateArgs {
    #[command(flatten)]
    pub recipe: RecipeArgs,

    #[command(flatten)]
    pub platform: PlatformArgs,

    /// Option override, `key=value` (shared, fPIC)
    #[arg(short = 'o', long = "option", value_name = "KEY=VALUE")]
    pub options: Vec<String>,

    /// Scratch directory for the source and build folders
    #[arg(long)]
    pub work_dir: Option<PathBuf>,

    /// Directory to install the package into
    #[arg(long)]
    pub package_dir: Option<PathBuf>,

    /// Number of parallel build jobs
    #[arg(short, long)]
    pub jobs: Option<usize>,
}

#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub recipe: RecipeArgs,

    #[command(flatten)]
    pub platform: PlatformArgs,

    /// Option override, `key=value` (shared, fPIC)
    #[arg(short = 'o', long = "option", value_name = "KEY=VALUE")]
    pub options: Vec<String>,
}

#[derive(Args)]
pub struct DescribeArgs {
    #[command(flatten)]
    pub recipe: RecipeArgs,

    #[command(flatten)]
    pub platform: PlatformArgs,

    /// Show link libraries for one component (core, test-support)
    #[arg(long)]
    pub component: Option<String>,
}

#[derive(Args)]
pub struct ProbeArgs {
    /// Tool to look for (defaults to the configured accelerator)
    pub tool: Option<String>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
