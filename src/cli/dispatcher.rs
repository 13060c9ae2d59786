// src/cli/dispatcher.rs

use anyhow::{Result, anyhow};

use crate::cli::{GlobalOptions, handlers};

/// Defines a command, its aliases, and its handler.
struct CommandDefinition {
    name: &'static str,
    aliases: &'static [&'static str],
    about: &'static str,
    handler: fn(&GlobalOptions, Vec<String>) -> Result<()>,
}

/// The single source of truth for all commands.
static COMMAND_REGISTRY: &[CommandDefinition] = &[
    CommandDefinition {
        name: "check",
        aliases: &[],
        about: "Compare the declared structure with the filesystem",
        handler: handlers::check::handle,
    },
    CommandDefinition {
        name: "info",
        aliases: &[],
        about: "Show the resolved root, overlays and constants",
        handler: handlers::info::handle,
    },
    CommandDefinition {
        name: "param",
        aliases: &[],
        about: "Look up a configuration parameter",
        handler: handlers::param::handle,
    },
    CommandDefinition {
        name: "path",
        aliases: &[],
        about: "Print the resolved path of a node",
        handler: handlers::path::handle,
    },
    CommandDefinition {
        name: "scaffold",
        aliases: &["init"],
        about: "Create the declared folders and files",
        handler: handlers::scaffold::handle,
    },
    CommandDefinition {
        name: "tree",
        aliases: &["ls"],
        about: "Display the project tree",
        handler: handlers::tree::handle,
    },
];

/// Finds a command definition in the registry by its name or alias.
fn find_command(name: &str) -> Option<&'static CommandDefinition> {
    COMMAND_REGISTRY
        .iter()
        .find(|cmd| cmd.name == name || cmd.aliases.contains(&name))
}

/// One line per command, for the usage message.
pub fn command_summary() -> String {
    COMMAND_REGISTRY
        .iter()
        .map(|cmd| {
            let names = std::iter::once(cmd.name)
                .chain(cmd.aliases.iter().copied())
                .collect::<Vec<_>>()
                .join("|");
            format!("  {:<16} {}", names, cmd.about)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Routes `<command> [args...]` to its handler. No command means `tree`.
pub fn dispatch(options: &GlobalOptions, all_args: Vec<String>) -> Result<()> {
    log::debug!("Dispatching args: {:?}", all_args);

    let mut args = all_args.into_iter();
    let name = args.next().unwrap_or_else(|| "tree".to_string());
    let command = find_command(&name).ok_or_else(|| {
        anyhow!(
            "Unknown command '{}'. Available commands:\n{}",
            name,
            command_summary()
        )
    })?;

    (command.handler)(options, args.collect())
}
