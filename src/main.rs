mod catalog;
mod cli;
mod collab;
mod commands;
mod config;
mod error;
mod keywords;
mod model;
mod toc;
mod util;
mod workflow;

use anyhow::Result;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::config::Config;

fn main() {
    init_tracing();

    if let Err(err) = run() {
        error!(error = %err, "command failed");
        for cause in err.chain().skip(1) {
            error!(cause = %cause, "caused by");
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Toc(args) => commands::toc::run(args, &config),
        Commands::Keywords(args) => commands::keywords::run(args, &config),
        Commands::Process(args) => commands::process::run(args, &config),
        Commands::Status(args) => commands::status::run(args, &config),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
