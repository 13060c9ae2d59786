// src/cli/handlers/tree.rs

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use super::commons;
use crate::{
    cli::GlobalOptions,
    core::{
        graph_display::{self, DisplayOptions},
        lookup,
    },
};

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Displays the project structure as a tree.")]
struct TreeArgs {
    /// Node to use as the root of the display. Defaults to the whole project.
    keys: Vec<String>,

    /// Show the resolved absolute path of each node.
    #[arg(long, short)]
    paths: bool,

    /// Show the declared description of each node.
    #[arg(long)]
    descriptions: bool,

    /// Limit the depth of the tree display.
    #[arg(long, short)]
    depth: Option<usize>,

    /// Check whether each node exists on the filesystem.
    #[arg(long)]
    check: bool,

    /// Print the resolved tree as JSON instead.
    #[arg(long)]
    json: bool,
}

pub fn handle(options: &GlobalOptions, args: Vec<String>) -> Result<()> {
    // 1. Parse this handler's specific arguments.
    let tree_args = TreeArgs::try_parse_from(&args)?;
    let context = commons::load_context(options)?;

    // 2. Resolve the starting node, if any.
    let keys = commons::split_keys(&tree_args.keys);
    let (title, tree) = if keys.is_empty() {
        let name = context
            .project_root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| context.project_root.display().to_string());
        (name, &context.tree)
    } else {
        let node = lookup::find_node(&context.tree, &keys)?;
        (keys.join("/"), &node.children)
    };

    if tree_args.json {
        println!("{}", serde_json::to_string_pretty(tree)?);
        return Ok(());
    }

    // 3. Render.
    let display_options = DisplayOptions {
        show_paths: tree_args.paths,
        show_descriptions: tree_args.descriptions,
        max_depth: tree_args.depth,
        show_health: tree_args.check,
    };
    println!("\n{}", format!("Project tree of '{}':", title).yellow());
    print!("{}", graph_display::render_project_tree(&title, tree, &display_options));
    Ok(())
}
