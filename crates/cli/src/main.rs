use anyhow::Result;
use clap::Parser;
use crispy_fonts_cli::cli::Cli;
use env_logger::{Builder, Env};

fn main() -> Result<()> {
    Builder::from_env(Env::default().default_filter_or("info")).init();
    Cli::parse().command.run()
}
