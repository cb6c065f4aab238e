use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "convoy")]
#[command(version)]
#[command(about = "Batch git and pip operations across the Cloudify development repositories", long_about = None)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the current ref and working-tree status of every repo
    Status,

    /// Pull every repo concurrently, one thread per repo
    Pull,

    /// pip-install every derived package in editable mode
    Install(InstallArgs),

    /// Check out a branch across the whole repo set
    Checkout(CheckoutArgs),

    /// Clone the catalogue under the repo base directory
    Clone(CloneArgs),

    /// Clone (shallow), status and install in one pass
    Setup(SetupArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser)]
pub struct InstallArgs {
    /// Show all pip output, not just the completed-install lines
    #[arg(long)]
    pub verbose: bool,
}

#[derive(Parser)]
pub struct CheckoutArgs {
    /// Branch or tag to check out everywhere
    pub branch: String,
}

#[derive(Parser)]
pub struct CloneArgs {
    /// Shallow clone (--depth 1)
    #[arg(long)]
    pub shallow: bool,

    /// Include the dev repositories
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub dev: bool,
}

#[derive(Parser)]
pub struct SetupArgs {
    /// Default branch for repos not pinned by the requirements file
    #[arg(long, default_value = "master")]
    pub branch: String,

    /// Requirements file pinning repos to refs (one `repo` or `repo@ref` per line)
    #[arg(long)]
    pub requirements: Option<PathBuf>,
}
