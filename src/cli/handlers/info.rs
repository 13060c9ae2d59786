// src/cli/handlers/info.rs

use crate::{
    cli::{GlobalOptions, handlers::commons},
    core::{config_loader, initializer::AppContext, paths},
    models::ConfigOverlay,
};
use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use serde_json::json;

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Displays the resolved project root, overlays and config constants."
)]
struct InfoArgs {
    /// Also write the resolved context to this file (`.json`, `.yaml` or `.yml`).
    #[arg(long)]
    export: Option<String>,
}

/// The main handler for the `info` command.
pub fn handle(options: &GlobalOptions, args: Vec<String>) -> Result<()> {
    let info_args = InfoArgs::try_parse_from(&args)?;
    let context = commons::load_context(options)?;

    print_metadata(&context);
    print_overlay("App overlay", &context.app_config);
    print_overlay("Script overlay", &context.script_config);

    println!("\n{}", "Config constants".yellow());
    for (key, value) in &context.constants {
        println!("  {:<24} {}", key.blue(), commons::format_value(value));
    }

    if let Some(raw) = &info_args.export {
        let target = paths::expand_user_path(raw)?;
        export_context(&context, &target)?;
        println!("\n{} {}", "Exported to".green(), target.display());
    }

    println!("\n---------------------------------");
    Ok(())
}

fn export_context(context: &AppContext, target: &std::path::Path) -> Result<()> {
    let document = json!({
        "project_root": context.project_root,
        "structure_path": context.structure_path,
        "app_name": context.app_name,
        "app_config": context.app_config,
        "script_config": context.script_config,
        "constants": context.constants,
        "tree": context.tree,
    });
    config_loader::save_to(&document, target)
        .with_context(|| format!("Could not export the context to '{}'.", target.display()))
}

fn print_metadata(context: &AppContext) {
    println!("\n--- {} ---", "Project".yellow());
    println!("  {:<15} {}", "Root:".blue(), context.project_root.display());
    println!("  {:<15} {}", "Structure:".blue(), context.structure_path.display());
    println!(
        "  {:<15} {}",
        "App name:".blue(),
        context.app_name.as_deref().unwrap_or("-")
    );
    println!("  {:<15} {}", "Top nodes:".blue(), context.tree.len());
    println!("  {:<15} {}", "Log file:".blue(), context.logger.log_path().display());
}

fn print_overlay(label: &str, overlay: &ConfigOverlay) {
    println!("\n{}", label.yellow());
    if overlay.is_empty() {
        println!("  {}", "(empty)".dimmed());
        return;
    }
    for (key, value) in overlay {
        println!("  {:<24} {}", key.blue(), commons::format_value(value));
    }
}
