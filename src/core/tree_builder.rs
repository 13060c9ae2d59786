// src/core/tree_builder.rs

use crate::models::{NodeContent, NodeKind, NodeSpec, ProjectTree, StructureSpec, TreeNode};
use std::path::Path;

/// Resolves a structure spec into a `ProjectTree` rooted at `base_path`.
///
/// Every node gets `base_path/<ancestors>/<name>` as its path. The depth and
/// branching of the result mirror `spec` exactly, and leaves get an empty
/// `children` map. This is a pure transformation; the filesystem is not touched.
pub fn build_project_tree(base_path: &Path, spec: &StructureSpec) -> ProjectTree {
    spec.iter()
        .map(|(name, props)| (name.clone(), build_node(&base_path.join(name), props)))
        .collect()
}

fn build_node(node_path: &Path, props: &NodeSpec) -> TreeNode {
    let children = match &props.content {
        Some(NodeContent::Map(content)) => build_project_tree(node_path, content),
        Some(NodeContent::List(items)) => {
            // Later entries overwrite earlier ones on a name collision.
            let mut merged = ProjectTree::new();
            for item in items {
                merged.extend(build_project_tree(node_path, item));
            }
            merged
        }
        None => ProjectTree::new(),
    };

    TreeNode {
        path: node_path.to_path_buf(),
        kind: NodeKind::from_declared(props.kind.as_deref()),
        pattern: props.pattern.clone(),
        description: props.description.clone(),
        extra: props.extra.clone(),
        children,
    }
}

/// Visits every node depth-first, parents before children.
pub fn walk_tree<'a>(tree: &'a ProjectTree, visit: &mut dyn FnMut(&'a str, &'a TreeNode)) {
    for (name, node) in tree {
        visit(name, node);
        walk_tree(&node.children, visit);
    }
}
