// src/cli/handlers/scaffold.rs

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use dialoguer::{Confirm, theme::ColorfulTheme};

use super::commons;
use crate::{
    cli::GlobalOptions,
    core::scaffold::{self, ScaffoldReport},
};

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Creates the folders and files declared in the structure spec. Existing files are left untouched."
)]
struct ScaffoldArgs {
    /// Only list what would be created.
    #[arg(long)]
    dry_run: bool,

    /// Do not ask for confirmation.
    #[arg(long, short)]
    yes: bool,
}

pub fn handle(options: &GlobalOptions, args: Vec<String>) -> Result<()> {
    let scaffold_args = ScaffoldArgs::try_parse_from(&args)?;
    let context = commons::load_context(options)?;

    // 1. Always plan first.
    let plan = scaffold::scaffold_tree(&context.tree, &context.project_root, true)?;
    if plan.is_noop() {
        println!("{}", "Nothing to create: every declared node already exists.".green());
        print_skipped(&plan);
        return Ok(());
    }

    println!("\nThe following paths will be created:");
    for path in &plan.created {
        println!("  {} {}", "+".green(), path.display());
    }
    print_skipped(&plan);

    if scaffold_args.dry_run {
        return Ok(());
    }

    // 2. Confirm, then apply.
    let confirmed = scaffold_args.yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Create {} paths?", plan.created.len()))
            .default(true)
            .interact()
            .context("Could not read the confirmation.")?;
    if !confirmed {
        println!("Aborted.");
        return Ok(());
    }

    let report = scaffold::scaffold_tree(&context.tree, &context.project_root, false)?;
    context
        .logger
        .info(&format!("Scaffolded {} paths", report.created.len()));
    println!(
        "\n{} {} created, {} already present.",
        "Done:".green().bold(),
        report.created.len(),
        report.existing.len()
    );
    Ok(())
}

fn print_skipped(report: &ScaffoldReport) {
    let groups = [
        (&report.conflicts, "exists with another kind"),
        (&report.unsupported, "kind cannot be scaffolded"),
        (&report.outside_root, "outside the project root"),
    ];
    for (paths, reason) in groups {
        for path in paths {
            println!("  {} {} ({})", "!".yellow(), path.display(), reason);
        }
    }
}
