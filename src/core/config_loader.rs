//! # Config Loader
//!
//! Reads structure spec files and configuration overlays from disk. The format is
//! chosen once from the file extension (`ConfigFormat`); an unknown extension
//! is an error.
//!
//! Parsing is lenient: the loader only checks what the tree builder and the
//! initializer actually need, and unknown or malformed fields are skipped.

use crate::models::{ConfigOverlay, NodeContent, NodeSpec, StructureSpec};
use serde_json::Value;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Configuration file not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("Unsupported configuration format '{extension}' (expected .json, .yaml or .yml).")]
    UnsupportedFormat { extension: String },
    #[error("Configuration file '{}' does not contain a mapping.", path.display())]
    NotAMapping { path: PathBuf },
    #[error("Filesystem Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

type LoadResult<T> = Result<T, LoadError>;

/// Keys of a structure node with a meaning of their own. Everything else is
/// kept as an extra attribute. `path` is reserved because it is always computed.
const RESERVED_NODE_KEYS: &[&str] = &["type", "pattern", "description", "content", "children", "path"];

/// The on-disk formats a configuration file can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Resolves the format from the extension of `path` (case-insensitive).
    pub fn from_path(path: &Path) -> LoadResult<Self> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(LoadError::UnsupportedFormat {
                extension: if extension.is_empty() {
                    "<none>".to_string()
                } else {
                    format!(".{}", extension)
                },
            }),
        }
    }

    fn parse(self, content: &str) -> LoadResult<Value> {
        match self {
            Self::Json => Ok(serde_json::from_str(content)?),
            // An empty YAML document is a null, not an error.
            Self::Yaml if content.trim().is_empty() => Ok(Value::Null),
            Self::Yaml => Ok(serde_yaml::from_str(content)?),
        }
    }

    fn render(self, value: &Value) -> LoadResult<String> {
        match self {
            Self::Json => Ok(serde_json::to_string_pretty(value)?),
            Self::Yaml => Ok(serde_yaml::to_string(value)?),
        }
    }
}

/// Loads a JSON or YAML file into a generic value.
///
/// # Errors
/// `LoadError::NotFound` if `path` is not a file, `LoadError::UnsupportedFormat`
/// for any extension other than `.json`, `.yaml` and `.yml`.
pub fn load_from(path: &Path) -> LoadResult<Value> {
    if !path.is_file() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let format = ConfigFormat::from_path(path)?;
    log::debug!("Loading {:?} file '{}'", format, path.display());
    let content = fs::read_to_string(path)?;
    format.parse(&content)
}

/// Loads a file that must hold a mapping. An empty document yields an empty mapping.
pub fn load_map(path: &Path) -> LoadResult<ConfigOverlay> {
    match load_from(path)? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(ConfigOverlay::new()),
        _ => Err(LoadError::NotAMapping {
            path: path.to_path_buf(),
        }),
    }
}

/// Writes `value` to `path` in the format given by its extension.
pub fn save_to(value: &Value, path: &Path) -> LoadResult<()> {
    let format = ConfigFormat::from_path(path)?;
    let rendered = format.render(value)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, rendered)?;
    Ok(())
}

/// Converts the raw `structure` section into a `StructureSpec`.
/// Anything that is not a mapping yields an empty spec.
pub fn parse_structure(value: &Value) -> StructureSpec {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(name, props)| (name.clone(), parse_node(props)))
            .collect(),
        _ => StructureSpec::new(),
    }
}

fn parse_node(props: &Value) -> NodeSpec {
    let Value::Object(map) = props else {
        // `raw:` with no value, or a scalar: a plain folder.
        return NodeSpec::default();
    };

    let string_field = |key: &str| map.get(key).and_then(Value::as_str).map(str::to_string);

    // `content` wins; an empty `content` falls back to `children`.
    let content = [map.get("content"), map.get("children")]
        .into_iter()
        .flatten()
        .find_map(parse_content);

    let extra = map
        .iter()
        .filter(|(key, _)| !RESERVED_NODE_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    NodeSpec {
        kind: string_field("type"),
        pattern: string_field("pattern"),
        description: string_field("description"),
        content,
        extra,
    }
}

fn parse_content(value: &Value) -> Option<NodeContent> {
    match value {
        Value::Object(map) if !map.is_empty() => Some(NodeContent::Map(parse_structure(value))),
        Value::Array(items) if !items.is_empty() => Some(NodeContent::List(
            items
                .iter()
                .filter(|item| item.is_object())
                .map(parse_structure)
                .collect(),
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_load_from_json_and_yaml() {
        let dir = TempDir::new().unwrap();
        let json_path = dir.path().join("test.json");
        let yaml_path = dir.path().join("test.yaml");
        let yml_path = dir.path().join("test.YML");
        fs::write(&json_path, r#"{"key": "value"}"#).unwrap();
        fs::write(&yaml_path, "key: value\n").unwrap();
        fs::write(&yml_path, "key: value\n").unwrap();

        assert_eq!(load_from(&json_path).unwrap(), json!({"key": "value"}));
        assert_eq!(load_from(&yaml_path).unwrap(), json!({"key": "value"}));
        assert_eq!(load_from(&yml_path).unwrap(), json!({"key": "value"}));
    }

    #[test]
    fn test_load_from_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let bad_path = dir.path().join("file.txt");
        fs::write(&bad_path, "test").unwrap();

        let result = load_from(&bad_path);
        assert!(matches!(result, Err(LoadError::UnsupportedFormat { ref extension }) if extension == ".txt"));
    }

    #[test]
    fn test_load_from_missing_file_checked_before_extension() {
        let result = load_from(Path::new("definitely_missing_file.txt"));
        assert!(matches!(result, Err(LoadError::NotFound { .. })));
    }

    #[test]
    fn test_load_map_rejects_scalars_and_accepts_empty() {
        let dir = TempDir::new().unwrap();
        let scalar = dir.path().join("scalar.yaml");
        let empty = dir.path().join("empty.yaml");
        fs::write(&scalar, "42\n").unwrap();
        fs::write(&empty, "").unwrap();

        assert!(matches!(load_map(&scalar), Err(LoadError::NotAMapping { .. })));
        assert!(load_map(&empty).unwrap().is_empty());
    }

    #[test]
    fn test_save_to_creates_parent_and_reloads() {
        let dir = TempDir::new().unwrap();
        let value = json!({"sep": ";", "encoding": "utf-8"});

        let yaml_path = dir.path().join("nested/out.yaml");
        save_to(&value, &yaml_path).unwrap();
        assert_eq!(load_from(&yaml_path).unwrap(), value);

        let json_path = dir.path().join("out.json");
        save_to(&value, &json_path).unwrap();
        assert_eq!(load_from(&json_path).unwrap(), value);
    }

    #[test]
    fn test_parse_structure_is_lenient() {
        let raw = json!({
            "data": {
                "type": "folder",
                "pattern": 12,
                "encoding": "utf-8",
                "path": "/ignored",
                "content": {"raw": null, "processed": {}}
            },
            "README.md": {"type": "file", "description": "Readme"},
            "weird": "scalar"
        });
        let spec = parse_structure(&raw);

        let data = &spec["data"];
        assert_eq!(data.kind.as_deref(), Some("folder"));
        assert_eq!(data.pattern, None);
        assert_eq!(data.extra.get("encoding"), Some(&json!("utf-8")));
        assert!(!data.extra.contains_key("path"));
        match &data.content {
            Some(NodeContent::Map(children)) => {
                assert!(children.contains_key("raw"));
                assert!(children.contains_key("processed"));
            }
            other => panic!("unexpected content: {:?}", other),
        }

        assert_eq!(spec["README.md"].kind.as_deref(), Some("file"));
        assert_eq!(spec["weird"], NodeSpec::default());
    }

    #[test]
    fn test_parse_structure_content_list_and_children_alias() {
        let raw = json!({
            "docs": {"content": [{"a": {}}, 3, {"b": {}}]},
            "src": {"content": {}, "children": {"lib": {}}}
        });
        let spec = parse_structure(&raw);

        match &spec["docs"].content {
            Some(NodeContent::List(items)) => assert_eq!(items.len(), 2),
            other => panic!("unexpected content: {:?}", other),
        }
        match &spec["src"].content {
            Some(NodeContent::Map(children)) => assert!(children.contains_key("lib")),
            other => panic!("unexpected content: {:?}", other),
        }
    }
}
