mod catalogue;
mod cli;
mod commands;
mod packages;
mod paths;
mod runner;
mod ui;
mod vcs;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Command};
use std::io;

/// Global context for the application
pub struct Context {
    pub verbose: u8,
    pub quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    let ctx = Context {
        verbose: cli.verbose,
        quiet: cli.quiet,
    };

    match cli.command {
        Command::Status => commands::status::run(&ctx),
        Command::Pull => commands::pull::run(&ctx),
        Command::Install(args) => commands::install::run(&ctx, args.verbose),
        Command::Checkout(args) => commands::checkout::run(&ctx, &args.branch),
        Command::Clone(args) => commands::clone::run(&ctx, args.shallow, args.dev),
        Command::Setup(args) => commands::setup::run(&ctx, &args.branch, args.requirements.as_deref()),
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "convoy", &mut io::stdout());
            Ok(())
        }
    }
}
