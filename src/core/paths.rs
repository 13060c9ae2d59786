// src/core/paths.rs

use crate::constants::STRUCTURE_CANDIDATES;
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PathError {
    #[error("Root directory '{name}' not found above '{}'.", start.display())]
    RootNotFound { name: String, start: PathBuf },
    #[error("No project structure file found under '{}'.", root.display())]
    StructureNotFound { root: PathBuf },
    #[error("Could not resolve path: {0}")]
    Io(#[from] io::Error),
}

type PathResult<T> = Result<T, PathError>;

/// Makes a path absolute and folds `.` and `..` segments lexically.
///
/// The filesystem is never consulted, so symlinks are left as they are and
/// the path does not need to exist.
pub fn absolutize(path: &Path) -> io::Result<PathBuf> {
    let absolute = std::path::absolute(path)?;
    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `pop` never goes above the root.
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    Ok(dunce::simplified(&normalized).to_path_buf())
}

/// Returns the filesystem root (or drive root) a path lives on.
fn filesystem_root(path: &Path) -> PathBuf {
    path.ancestors()
        .last()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| path.to_path_buf())
}

/// Locates the project root by walking upwards from the directory of `start_path`.
///
/// * `explicit_root` wins unconditionally and is only made absolute.
/// * With a `root_dir_name`, the first ancestor (the start directory included)
///   whose name equals it is returned.
/// * Without one, the walk goes all the way up and returns the filesystem root.
///
/// # Errors
/// `PathError::RootNotFound` when no ancestor carries `root_dir_name`.
pub fn find_project_root(
    start_path: &Path,
    root_dir_name: Option<&str>,
    explicit_root: Option<&Path>,
) -> PathResult<PathBuf> {
    if let Some(root) = explicit_root {
        return Ok(absolutize(root)?);
    }

    let start = absolutize(start_path)?;
    let start_dir = start.parent().map(Path::to_path_buf).unwrap_or(start);

    let Some(name) = root_dir_name else {
        // No name means no constraint: the filesystem root is the project root.
        log::debug!(
            "No root directory name given, using filesystem root above '{}'",
            start_dir.display()
        );
        return Ok(filesystem_root(&start_dir));
    };

    start_dir
        .ancestors()
        .find(|dir| dir.file_name().is_some_and(|n| n == name))
        .map(Path::to_path_buf)
        .ok_or_else(|| PathError::RootNotFound {
            name: name.to_string(),
            start: start_dir.clone(),
        })
}

/// Walks upwards from the directory of `start_path` and returns the first
/// ancestor holding a structure spec candidate.
pub fn find_structure_root(start_path: &Path) -> PathResult<PathBuf> {
    let start = absolutize(start_path)?;
    let start_dir = start.parent().map(Path::to_path_buf).unwrap_or(start);

    start_dir
        .ancestors()
        .find(|dir| find_project_structure(dir).is_ok())
        .map(Path::to_path_buf)
        .ok_or_else(|| PathError::StructureNotFound {
            root: start_dir.clone(),
        })
}

/// Checks whether `path` lies under `root`, comparing whole path segments.
///
/// Both sides are made absolute first. Without a `root`, the filesystem root
/// of `path` is used, which every absolute path is under.
pub fn is_path_in_root(path: &Path, root: Option<&Path>) -> bool {
    let Ok(path) = absolutize(path) else {
        return false;
    };
    let root = match root {
        Some(root) => match absolutize(root) {
            Ok(root) => root,
            Err(_) => return false,
        },
        None => filesystem_root(&path),
    };
    path.starts_with(&root)
}

/// Returns the first default structure spec candidate that exists under `project_root`.
pub fn find_project_structure(project_root: &Path) -> PathResult<PathBuf> {
    find_project_structure_in(project_root, STRUCTURE_CANDIDATES)
}

/// Probes `candidates` (relative to `project_root`) in order. The first one
/// that is a file and stays inside the root wins.
pub fn find_project_structure_in<S: AsRef<str>>(
    project_root: &Path,
    candidates: &[S],
) -> PathResult<PathBuf> {
    for candidate in candidates {
        let path = project_root.join(candidate.as_ref());
        if path.is_file() && is_path_in_root(&path, Some(project_root)) {
            log::trace!("Structure spec candidate found: {}", path.display());
            return Ok(path);
        }
    }
    Err(PathError::StructureNotFound {
        root: project_root.to_path_buf(),
    })
}

/// Builds `<dir>/<filename>.<extension>`, adding the dot when it is missing.
/// Without a directory only the file name is returned.
pub fn build_file_path(dir_path: Option<&Path>, filename: &str, extension: &str) -> PathBuf {
    let file_name = if extension.is_empty() || extension.starts_with('.') {
        format!("{}{}", filename, extension)
    } else {
        format!("{}.{}", filename, extension)
    };
    match dir_path {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(file_name),
        _ => PathBuf::from(file_name),
    }
}

/// Resolves a user-supplied path against the project root when it is relative.
pub fn resolve_against(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Expands `~` and environment variables in a user-supplied path.
pub fn expand_user_path(raw: &str) -> anyhow::Result<PathBuf> {
    let expanded = shellexpand::full(raw)
        .map_err(|e| anyhow::anyhow!("Failed to expand path '{}': {}", raw, e))?;
    Ok(PathBuf::from(expanded.into_owned()))
}
