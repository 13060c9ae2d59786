// src/core/graph_display.rs

use crate::core::scaffold::{NodeStatus, node_status};
use crate::models::{ProjectTree, TreeNode};
use colored::*;
use std::fmt::Write;

/// Controls what `render_project_tree` prints for each node.
#[derive(Debug, Clone, Default)]
pub struct DisplayOptions {
    pub show_paths: bool,
    pub show_descriptions: bool,
    /// Levels below the starting one to print; `None` prints everything.
    pub max_depth: Option<usize>,
    /// Appends an on-disk status marker to every node.
    pub show_health: bool,
}

/// Renders an ASCII tree of `tree`, one node per line, siblings sorted by name.
pub fn render_project_tree(title: &str, tree: &ProjectTree, options: &DisplayOptions) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", title.bold());
    render_level(&mut out, tree, options, "", 0);
    out
}

fn render_level(out: &mut String, tree: &ProjectTree, options: &DisplayOptions, prefix: &str, depth: usize) {
    if options.max_depth.is_some_and(|max| depth > max) {
        return;
    }
    let count = tree.len();
    for (i, (name, node)) in tree.iter().enumerate() {
        let is_last = i + 1 == count;
        let connector = if is_last { "└─" } else { "├─" };
        let _ = writeln!(out, "{}{}{}", prefix, connector, node_line(name, node, options));

        let child_prefix = format!("{}{}", prefix, if is_last { "   " } else { "│  " });
        render_level(out, &node.children, options, &child_prefix, depth + 1);
    }
}

fn node_line(name: &str, node: &TreeNode, options: &DisplayOptions) -> String {
    let mut line = if node.is_leaf() {
        name.to_string()
    } else {
        format!("{}/", name)
    };
    if let Some(pattern) = &node.pattern {
        line.push_str(&format!(" ({})", pattern.cyan()));
    }
    if options.show_paths {
        line.push_str(&format!(" [{}]", node.path.display()).dimmed().to_string());
    }
    if options.show_descriptions {
        if let Some(description) = &node.description {
            line.push_str(&format!(" - {}", description.italic()));
        }
    }
    if options.show_health {
        let marker = match node_status(node) {
            NodeStatus::Present => "ok".green(),
            NodeStatus::Missing => "missing".red(),
            NodeStatus::WrongKind => "wrong kind".yellow(),
        };
        line.push_str(&format!(" <{}>", marker));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{config_loader::parse_structure, tree_builder::build_project_tree};
    use serde_json::json;
    use std::path::Path;

    fn sample_tree() -> ProjectTree {
        build_project_tree(
            Path::new("/p"),
            &parse_structure(&json!({
                "data": {"content": {"raw": {"description": "Untouched inputs"}, "processed": {}}},
                "logs": {}
            })),
        )
    }

    #[test]
    fn test_render_connectors() {
        colored::control::set_override(false);
        let out = render_project_tree("proj", &sample_tree(), &DisplayOptions::default());
        let expected = "proj\n├─data/\n│  ├─processed\n│  └─raw\n└─logs\n";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_render_depth_and_details() {
        colored::control::set_override(false);
        let options = DisplayOptions {
            show_descriptions: true,
            show_paths: true,
            max_depth: Some(0),
            ..Default::default()
        };
        let out = render_project_tree("proj", &sample_tree(), &options);
        assert!(out.contains("├─data/ [/p/data]"));
        assert!(!out.contains("raw"));

        let options = DisplayOptions {
            show_descriptions: true,
            ..Default::default()
        };
        let out = render_project_tree("proj", &sample_tree(), &options);
        assert!(out.contains("└─raw - Untouched inputs"));
    }
}
