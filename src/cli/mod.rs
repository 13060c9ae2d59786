// src/cli/mod.rs

use clap::Parser;

pub mod dispatcher;
pub mod handlers;

/// projtree: inspect and scaffold a project declared in `project_structure.yaml`.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    styles = clap::builder::Styles::styled()
        .header(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .usage(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .literal(clap::builder::styling::AnsiColor::Cyan.on_default().bold())
        .placeholder(clap::builder::styling::AnsiColor::Green.on_default()),
)]
#[command(disable_help_subcommand = true)]
#[command(trailing_var_arg = true)]
pub struct Cli {
    /// Structure spec file to use instead of probing the project root (`~` and `$VARS` are expanded).
    #[arg(long)]
    pub structure: Option<String>,

    /// Name of the project root directory used to find the structure spec.
    #[arg(long)]
    pub root_name: Option<String>,

    /// Script path the project is resolved from. Defaults to `<cwd>/projtree`.
    #[arg(long)]
    pub script: Option<String>,

    /// The command followed by its own arguments.
    #[arg(allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// The options every handler receives, whatever its own arguments are.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub structure: Option<String>,
    pub root_name: Option<String>,
    pub script: Option<String>,
}

impl Cli {
    /// Splits the parsed command line into the global options and the command words.
    pub fn into_parts(self) -> (GlobalOptions, Vec<String>) {
        let options = GlobalOptions {
            structure: self.structure,
            root_name: self.root_name,
            script: self.script,
        };
        (options, self.args)
    }
}
