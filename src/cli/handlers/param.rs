// src/cli/handlers/param.rs

use anyhow::Result;
use clap::Parser;

use super::commons;
use crate::cli::GlobalOptions;

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Looks up a parameter: the overlay wins, else the attribute of the node named by KEYS."
)]
struct ParamArgs {
    /// The parameter name.
    name: String,

    /// Node keys to fall back to, as separate words or `a/b/c`.
    keys: Vec<String>,

    /// Use the script overlay instead of the app overlay.
    #[arg(long, short)]
    script_config: bool,
}

pub fn handle(options: &GlobalOptions, args: Vec<String>) -> Result<()> {
    let param_args = ParamArgs::try_parse_from(&args)?;
    let context = commons::load_context(options)?;

    let keys = commons::split_keys(&param_args.keys);
    let value = if param_args.script_config {
        context.script_param(&param_args.name, &keys)?
    } else {
        context.param(&param_args.name, &keys)?
    };
    println!("{}", commons::format_value(&value));
    Ok(())
}
