// src/cli/handlers/path.rs

use anyhow::Result;
use clap::Parser;

use super::commons;
use crate::cli::GlobalOptions;

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Prints the resolved path of a node of the project tree."
)]
struct PathArgs {
    /// Node keys from the top level down, as separate words or `a/b/c`.
    #[arg(required = true)]
    keys: Vec<String>,
}

pub fn handle(options: &GlobalOptions, args: Vec<String>) -> Result<()> {
    let path_args = PathArgs::try_parse_from(&args)?;
    let context = commons::load_context(options)?;

    let keys = commons::split_keys(&path_args.keys);
    let path = context.node_path(&keys)?;
    println!("{}", path.display());
    Ok(())
}
