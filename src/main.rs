mod app;
mod cli;
mod config;
mod http;
mod logging;
mod paths;
mod schedule;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    logging::init(cli.debug);
    app::run(cli)
}
