// src/cli/handlers/check.rs

use anyhow::{Result, bail};
use clap::Parser;
use colored::Colorize;

use super::commons;
use crate::{cli::GlobalOptions, core::scaffold};

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Compares the declared structure with the filesystem."
)]
struct CheckArgs {
    /// Fail when any issue is found.
    #[arg(long)]
    strict: bool,
}

pub fn handle(options: &GlobalOptions, args: Vec<String>) -> Result<()> {
    let check_args = CheckArgs::try_parse_from(&args)?;
    let context = commons::load_context(options)?;

    let issues = scaffold::check_tree(&context.tree)?;
    if issues.is_empty() {
        println!("{}", "The project matches its structure spec.".green());
        return Ok(());
    }

    println!("\n{} issue(s) found:", issues.len().to_string().yellow().bold());
    for issue in &issues {
        println!("  - {}", issue);
        context.logger.warning(&issue.to_string());
    }

    if check_args.strict {
        bail!("{} structure issue(s) found.", issues.len());
    }
    Ok(())
}
