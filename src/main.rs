//! fromscan CLI: list base images declared in Dockerfiles across a GitHub organization.

use anyhow::Result;
use clap::Parser;
use fromscan::engine::arg_parser::Cli;
use fromscan::engine::handle_run;
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
