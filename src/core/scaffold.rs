// src/core/scaffold.rs

use crate::core::{paths, tree_builder::walk_tree};
use crate::models::{NodeKind, ProjectTree, TreeNode};
use regex::Regex;
use std::{
    fmt,
    fs::{self, OpenOptions},
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("Could not create '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid glob pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

type ScaffoldResult<T> = Result<T, ScaffoldError>;

/// What `scaffold_tree` did (or would do, in a dry run).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScaffoldReport {
    /// Nodes created, or to be created in a dry run.
    pub created: Vec<PathBuf>,
    /// Nodes already on disk with the declared kind.
    pub existing: Vec<PathBuf>,
    /// Paths that exist with another kind than the declared one.
    pub conflicts: Vec<PathBuf>,
    /// Missing nodes whose declared kind is neither `folder` nor `file`.
    pub unsupported: Vec<PathBuf>,
    /// Nodes resolving outside the project root. Never created.
    pub outside_root: Vec<PathBuf>,
}

impl ScaffoldReport {
    pub fn is_noop(&self) -> bool {
        self.created.is_empty()
    }

    /// Number of nodes left alone for any reason other than already existing.
    pub fn skipped(&self) -> usize {
        self.conflicts.len() + self.unsupported.len() + self.outside_root.len()
    }
}

/// On-disk state of a single tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStatus {
    Present,
    Missing,
    WrongKind,
}

/// Compares a node's declared kind with what is on disk. Unknown kinds only need to exist.
pub fn node_status(node: &TreeNode) -> NodeStatus {
    let Ok(meta) = fs::metadata(&node.path) else {
        return NodeStatus::Missing;
    };
    let matches = match node.kind {
        NodeKind::Folder => meta.is_dir(),
        NodeKind::File => meta.is_file(),
        NodeKind::Other(_) => true,
    };
    if matches { NodeStatus::Present } else { NodeStatus::WrongKind }
}

/// Creates every folder node and every missing file node (as an empty file).
///
/// Existing files are never opened for writing, and nothing is created outside
/// `project_root`. With `dry_run`, nothing is touched and the report lists what
/// would be created.
pub fn scaffold_tree(tree: &ProjectTree, project_root: &Path, dry_run: bool) -> ScaffoldResult<ScaffoldReport> {
    let mut nodes = Vec::new();
    walk_tree(tree, &mut |_, node| nodes.push(node));

    let mut report = ScaffoldReport::default();
    for node in nodes {
        if !paths::is_path_in_root(&node.path, Some(project_root)) {
            log::warn!("Refusing to scaffold '{}': outside the project root", node.path.display());
            report.outside_root.push(node.path.clone());
            continue;
        }
        match (node_status(node), &node.kind) {
            (NodeStatus::Present, _) => report.existing.push(node.path.clone()),
            (NodeStatus::WrongKind, _) => {
                log::warn!("Skipping '{}': exists but is not a {}", node.path.display(), node.kind);
                report.conflicts.push(node.path.clone());
            }
            (NodeStatus::Missing, NodeKind::Other(kind)) => {
                log::warn!("Skipping '{}': cannot create a '{}'", node.path.display(), kind);
                report.unsupported.push(node.path.clone());
            }
            (NodeStatus::Missing, NodeKind::Folder) => {
                if !dry_run {
                    create_dir(&node.path)?;
                }
                report.created.push(node.path.clone());
            }
            (NodeStatus::Missing, NodeKind::File) => {
                if !dry_run {
                    create_empty_file(&node.path)?;
                }
                report.created.push(node.path.clone());
            }
        }
    }
    log::info!(
        "Scaffold{}: {} created, {} existing, {} skipped",
        if dry_run { " (dry run)" } else { "" },
        report.created.len(),
        report.existing.len(),
        report.skipped()
    );
    Ok(report)
}

fn create_dir(path: &Path) -> ScaffoldResult<()> {
    fs::create_dir_all(path).map_err(|source| ScaffoldError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn create_empty_file(path: &Path) -> ScaffoldResult<()> {
    if let Some(parent) = path.parent() {
        create_dir(parent)?;
    }
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map(|_| ())
        .map_err(|source| ScaffoldError::Io {
            path: path.to_path_buf(),
            source,
        })
}

// --- STRUCTURE CHECK ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    Missing,
    WrongKind { expected: NodeKind },
    /// An entry of a folder whose name does not match the folder's `pattern`.
    PatternMismatch { entry: String, pattern: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeIssue {
    pub path: PathBuf,
    pub kind: IssueKind,
}

impl fmt::Display for TreeIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            IssueKind::Missing => write!(f, "missing: {}", self.path.display()),
            IssueKind::WrongKind { expected } => {
                write!(f, "not a {}: {}", expected, self.path.display())
            }
            IssueKind::PatternMismatch { entry, pattern } => write!(
                f,
                "'{}' in {} does not match '{}'",
                entry,
                self.path.display(),
                pattern
            ),
        }
    }
}

/// Compares the tree with the filesystem.
///
/// Folders that declare a `pattern` have their direct entries checked against it;
/// entries declared as children of the folder are always accepted.
pub fn check_tree(tree: &ProjectTree) -> ScaffoldResult<Vec<TreeIssue>> {
    let mut nodes = Vec::new();
    walk_tree(tree, &mut |_, node| nodes.push(node));

    let mut issues = Vec::new();
    for node in nodes {
        match node_status(node) {
            NodeStatus::Missing => issues.push(TreeIssue {
                path: node.path.clone(),
                kind: IssueKind::Missing,
            }),
            NodeStatus::WrongKind => issues.push(TreeIssue {
                path: node.path.clone(),
                kind: IssueKind::WrongKind {
                    expected: node.kind.clone(),
                },
            }),
            NodeStatus::Present => {
                if let (NodeKind::Folder, Some(pattern)) = (&node.kind, &node.pattern) {
                    issues.extend(check_pattern(node, pattern)?);
                }
            }
        }
    }
    Ok(issues)
}

fn check_pattern(node: &TreeNode, pattern: &str) -> ScaffoldResult<Vec<TreeIssue>> {
    let regex = glob_to_regex(pattern)?;
    let mut issues = Vec::new();

    for entry in WalkDir::new(&node.path)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        let name = entry.file_name().to_string_lossy();
        if node.children.contains_key(name.as_ref()) || regex.is_match(&name) {
            continue;
        }
        issues.push(TreeIssue {
            path: node.path.clone(),
            kind: IssueKind::PatternMismatch {
                entry: name.into_owned(),
                pattern: pattern.to_string(),
            },
        });
    }
    Ok(issues)
}

/// Translates a shell glob (`*`, `?`, `[...]`) into an anchored regex over a file name.
pub fn glob_to_regex(pattern: &str) -> ScaffoldResult<Regex> {
    let mut out = String::with_capacity(pattern.len() + 8);
    out.push('^');
    let mut in_class = false;
    for c in pattern.chars() {
        match c {
            '*' if !in_class => out.push_str("[^/]*"),
            '?' if !in_class => out.push_str("[^/]"),
            '[' if !in_class => {
                in_class = true;
                out.push('[');
            }
            ']' if in_class => {
                in_class = false;
                out.push(']');
            }
            '!' if in_class && out.ends_with('[') => out.push('^'),
            _ if in_class => out.push(c),
            _ => out.push_str(&regex::escape(&c.to_string())),
        }
    }
    out.push('$');
    Regex::new(&out).map_err(|source| ScaffoldError::Pattern {
        pattern: pattern.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{config_loader::parse_structure, tree_builder::build_project_tree};
    use serde_json::json;
    use tempfile::TempDir;

    fn sample_tree(base: &Path) -> ProjectTree {
        build_project_tree(
            base,
            &parse_structure(&json!({
                "data": {"content": {"raw": {"pattern": "*.csv"}}},
                "README.md": {"type": "file"},
                "logs": {}
            })),
        )
    }

    #[test]
    fn test_glob_to_regex() {
        let re = glob_to_regex("*.csv").unwrap();
        assert!(re.is_match("sales.csv"));
        assert!(!re.is_match("sales.csv.bak"));
        assert!(!re.is_match("salesXcsv"));

        let re = glob_to_regex("report_?.[!t]xt").unwrap();
        assert!(!re.is_match("report_1.csv"));
        assert!(re.is_match("report_1.dxt"));
        assert!(!re.is_match("report_1.txt"));
    }

    #[test]
    fn test_scaffold_creates_missing_nodes() {
        let dir = TempDir::new().unwrap();
        let tree = sample_tree(dir.path());

        let report = scaffold_tree(&tree, dir.path(), false).unwrap();
        assert_eq!(report.created.len(), 4);
        assert!(dir.path().join("data/raw").is_dir());
        assert!(dir.path().join("README.md").is_file());

        let again = scaffold_tree(&tree, dir.path(), false).unwrap();
        assert!(again.is_noop());
        assert_eq!(again.existing.len(), 4);
    }

    #[test]
    fn test_scaffold_never_overwrites_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("README.md"), "keep me").unwrap();

        scaffold_tree(&sample_tree(dir.path()), dir.path(), false).unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("README.md")).unwrap(), "keep me");
    }

    #[test]
    fn test_scaffold_dry_run_touches_nothing() {
        let dir = TempDir::new().unwrap();
        let report = scaffold_tree(&sample_tree(dir.path()), dir.path(), true).unwrap();
        assert_eq!(report.created.len(), 4);
        assert!(!dir.path().join("data").exists());
    }

    #[test]
    fn test_scaffold_skips_wrong_kind() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("logs"), "").unwrap();

        let report = scaffold_tree(&sample_tree(dir.path()), dir.path(), false).unwrap();
        assert_eq!(report.conflicts, vec![dir.path().join("logs")]);
        assert!(report.unsupported.is_empty());
    }

    #[test]
    fn test_scaffold_skips_unknown_kind() {
        let dir = TempDir::new().unwrap();
        let tree = build_project_tree(dir.path(), &parse_structure(&json!({"db": {"type": "socket"}})));

        let report = scaffold_tree(&tree, dir.path(), false).unwrap();
        assert_eq!(report.unsupported, vec![dir.path().join("db")]);
        assert!(report.conflicts.is_empty());
        assert!(!dir.path().join("db").exists());
    }

    #[test]
    fn test_scaffold_stays_inside_project_root() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("proj");
        fs::create_dir(&root).unwrap();
        let tree = build_project_tree(
            &root,
            &parse_structure(&json!({
                "../escaped": {},
                "ok": {"content": {"../../also_escaped.txt": {"type": "file"}}}
            })),
        );

        let report = scaffold_tree(&tree, &root, false).unwrap();
        assert_eq!(report.created, vec![root.join("ok")]);
        assert_eq!(report.outside_root.len(), 2);
        assert!(!dir.path().join("escaped").exists());
        assert!(!dir.path().join("also_escaped.txt").exists());
        assert!(root.join("ok").is_dir());
    }

    #[test]
    fn test_check_tree_reports_issues() {
        let dir = TempDir::new().unwrap();
        let tree = sample_tree(dir.path());
        scaffold_tree(&tree, dir.path(), false).unwrap();
        assert!(check_tree(&tree).unwrap().is_empty());

        fs::write(dir.path().join("data/raw/ok.csv"), "").unwrap();
        fs::write(dir.path().join("data/raw/notes.txt"), "").unwrap();
        fs::remove_file(dir.path().join("README.md")).unwrap();

        let issues = check_tree(&tree).unwrap();
        assert_eq!(issues.len(), 2);
        assert!(issues.contains(&TreeIssue {
            path: dir.path().join("README.md"),
            kind: IssueKind::Missing,
        }));
        assert!(issues.contains(&TreeIssue {
            path: dir.path().join("data/raw"),
            kind: IssueKind::PatternMismatch {
                entry: "notes.txt".to_string(),
                pattern: "*.csv".to_string(),
            },
        }));
    }

    #[test]
    fn test_node_status() {
        let dir = TempDir::new().unwrap();
        let tree = sample_tree(dir.path());
        assert_eq!(node_status(&tree["logs"]), NodeStatus::Missing);

        fs::write(dir.path().join("logs"), "").unwrap();
        assert_eq!(node_status(&tree["logs"]), NodeStatus::WrongKind);
    }
}
