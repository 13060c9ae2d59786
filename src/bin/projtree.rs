// src/bin/projtree.rs

use anyhow::Result;
use clap::Parser;
use colored::*;
use projtree::cli::{Cli, dispatcher};

/// Parses arguments, dispatches to the matching handler, and reports errors.
fn main() {
    if let Err(e) = run_cli(Cli::parse()) {
        eprintln!("\n{}: {:#}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run_cli(cli: Cli) -> Result<()> {
    log::debug!("CLI args parsed: {:?}", cli);
    let (options, args) = cli.into_parts();
    dispatcher::dispatch(&options, args)
}
