// src/models.rs

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

// --- STRUCTURE SPEC MODELS ---
// What is read from `project_structure.yaml`, before any path is resolved.

/// The declarative description of one level of the project layout.
pub type StructureSpec = BTreeMap<String, NodeSpec>;

/// A flat configuration mapping (app-wide or script-specific).
pub type ConfigOverlay = Map<String, Value>;

/// The declared children of a node. The spec file accepts either a mapping
/// or a list of mappings that are merged in order.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeContent {
    Map(StructureSpec),
    List(Vec<StructureSpec>),
}

/// A single entry of the structure spec, as declared by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeSpec {
    /// The declared `type`; absent means folder.
    pub kind: Option<String>,
    /// Glob the entries of a folder are expected to match.
    pub pattern: Option<String>,
    pub description: Option<String>,
    /// Declared children, from `content` (or `children`).
    pub content: Option<NodeContent>,
    /// Any other key declared on the node (e.g. `encoding`, `sep`).
    pub extra: BTreeMap<String, Value>,
}

// --- RESOLVED TREE MODELS ---

/// The resolved project layout: name -> node.
pub type ProjectTree = BTreeMap<String, TreeNode>;

/// The kind of a tree node. Unknown kinds are kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NodeKind {
    #[default]
    Folder,
    File,
    Other(String),
}

impl NodeKind {
    /// Parses the `type` field of a structure node. Absent means folder.
    pub fn from_declared(kind: Option<&str>) -> Self {
        match kind {
            None | Some("folder") => Self::Folder,
            Some("file") => Self::File,
            Some(other) => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Folder => "folder",
            Self::File => "file",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for NodeKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A resolved entry: declared metadata plus its absolute path.
///
/// `path` is always the parent's path joined with the node name; it is never
/// assigned independently.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TreeNode {
    /// Absolute path: the parent's path joined with the node name.
    pub path: PathBuf,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub pattern: Option<String>,
    pub description: Option<String>,
    /// Extra attributes declared on the node.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
    /// Resolved children; empty for a leaf.
    pub children: ProjectTree,
}

impl TreeNode {
    /// Returns a named attribute of this node, as `get_config_param` sees it.
    pub fn attribute(&self, name: &str) -> Option<Value> {
        match name {
            "path" => Some(Value::String(self.path.to_string_lossy().into_owned())),
            "type" => Some(Value::String(self.kind.as_str().to_string())),
            "pattern" => self.pattern.clone().map(Value::String),
            "description" => self.description.clone().map(Value::String),
            _ => self.extra.get(name).cloned(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

// --- STRUCTURE DOCUMENT ---

/// The validated `root` section of a structure spec file.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureDocument {
    /// Name of the project root directory.
    pub name: String,
    /// Application name used for the app overlay and the log file names.
    pub app_name: Option<String>,
    /// The `structure` section, parsed.
    pub structure: StructureSpec,
    /// Every key of the `root` section, uppercased.
    pub constants: BTreeMap<String, Value>,
}
