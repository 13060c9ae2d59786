// src/core/lookup.rs

use crate::models::{ConfigOverlay, ProjectTree, TreeNode};
use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LookupError {
    #[error("Key '{key}' not found at depth {depth} of the project tree.")]
    KeyNotFound { key: String, depth: usize },
    #[error("An empty key path does not name any node.")]
    EmptyKeyPath,
    #[error("Parameter '{name}' found neither in the overlay nor in the project tree.")]
    ParamNotFound { name: String },
}

type LookupResult<T> = Result<T, LookupError>;

/// Descends the tree one key at a time and returns the node the last key names.
///
/// The first key is looked up in `tree` itself, every following key in the
/// `children` of the node found so far. Fails fast on the first missing key.
pub fn find_node<'a, S: AsRef<str>>(tree: &'a ProjectTree, keys: &[S]) -> LookupResult<&'a TreeNode> {
    let mut level = tree;
    let mut found = None;
    for (depth, key) in keys.iter().enumerate() {
        let key = key.as_ref();
        let node = level.get(key).ok_or_else(|| LookupError::KeyNotFound {
            key: key.to_string(),
            depth,
        })?;
        level = &node.children;
        found = Some(node);
    }
    found.ok_or(LookupError::EmptyKeyPath)
}

/// Returns the resolved path of the node named by `keys`.
pub fn get_node_path<S: AsRef<str>>(tree: &ProjectTree, keys: &[S]) -> LookupResult<PathBuf> {
    find_node(tree, keys).map(|node| node.path.clone())
}

/// Looks a parameter up with "overlay wins, else tree node, else miss" precedence.
///
/// The tree is only descended when `name` is not in the overlay, and a failed
/// descent counts as a miss rather than an error.
pub fn lookup_param<S: AsRef<str>>(
    name: &str,
    overlay: &ConfigOverlay,
    tree: &ProjectTree,
    path_keys: &[S],
) -> Option<Value> {
    if let Some(value) = overlay.get(name) {
        return Some(value.clone());
    }
    find_node(tree, path_keys).ok()?.attribute(name)
}

/// Same as [`lookup_param`], turning a miss into `LookupError::ParamNotFound`.
pub fn get_config_param<S: AsRef<str>>(
    name: &str,
    overlay: &ConfigOverlay,
    tree: &ProjectTree,
    path_keys: &[S],
) -> LookupResult<Value> {
    lookup_param(name, overlay, tree, path_keys).ok_or_else(|| LookupError::ParamNotFound {
        name: name.to_string(),
    })
}
