use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod board;
mod calendar;
mod cli;
mod config;
mod github;
mod layout;
mod render;
mod staging;
mod util;
mod workflow;

use cli::{Command, RootArgs};

fn main() -> Result<()> {
    let args = RootArgs::parse();
    init_tracing(args.verbose);

    match args.command {
        Command::Generate(args) => workflow::run_generate_command(args),
        Command::Render(args) => workflow::run_render_command(args),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
