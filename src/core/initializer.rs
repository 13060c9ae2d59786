//! # App Initializer
//!
//! Orchestrates project start-up in a single forward pass:
//!
//! 1. **Cache check:** a populated `InitCache` is returned as is.
//! 2. **Provisional root:** located only to find the structure spec file, using the
//!    configured root name, `PROJTREE_ROOT_NAME`, or the nearest ancestor holding a
//!    structure spec.
//! 3. **Structure spec:** loaded and validated (`root`, `root.name`, `root.structure`).
//! 4. **Authoritative root:** re-resolved from `root.name`; must exist on disk.
//! 5. **Tree:** built from `root.structure` at the authoritative root.
//! 6. **App overlay:** `<conf>/<app_name>.json`, when present inside the root.
//! 7. **Script overlay:** `<conf>/<script_stem>.<ext>`, when present inside the root.
//! 8. **Logger:** installed in the resolved log directory.
//!
//! Nothing is rolled back on failure, but a failure never populates the cache.

use crate::{
    constants::{
        CONF_NODE, DEFAULT_APP_NAME, DEFAULT_CONF_EXTENSION, DEFAULT_LOG_DIR, DEFAULT_LOG_EXTENSION,
        KEY_CONF_DIR, KEY_CONF_EXTENSION, KEY_LOG_DIR, KEY_LOG_EXTENSION, LOGS_NODE, ROOT_NAME_ENV,
    },
    core::{
        cache::InitCache,
        config_loader::{self, LoadError},
        logger::{AppLogger, LoggerError},
        lookup::{self, LookupError},
        paths::{self, PathError},
        tree_builder,
    },
    models::{ConfigOverlay, ProjectTree, StructureDocument},
};
use lazy_static::lazy_static;
use serde_json::Value;
use std::{
    collections::BTreeMap,
    env,
    path::{Path, PathBuf},
    sync::Arc,
};
use thiserror::Error;

lazy_static! {
    static ref APP_CACHE: InitCache<AppContext> = InitCache::new();
}

#[derive(Error, Debug)]
pub enum InitError {
    #[error("A script path is required to initialize the application.")]
    EmptyScriptPath,
    #[error("Path Error: {0}")]
    Path(#[from] PathError),
    #[error("Config Error: {0}")]
    Load(#[from] LoadError),
    #[error("Logger Error: {0}")]
    Logger(#[from] LoggerError),
    #[error("Missing 'root' section in '{}'.", path.display())]
    MissingRoot { path: PathBuf },
    #[error("Missing 'root.name' in '{}'.", path.display())]
    MissingRootName { path: PathBuf },
    #[error("Key 'structure' missing or empty in 'root' of '{}'.", path.display())]
    MissingStructure { path: PathBuf },
    #[error("Project root not found on disk: {}", path.display())]
    RootNotOnDisk { path: PathBuf },
    #[error("Structure file '{}' is outside the project root '{}'.", path.display(), root.display())]
    StructureOutsideRoot { path: PathBuf, root: PathBuf },
}

type InitResult<T> = Result<T, InitError>;

/// Everything an application needs after start-up. Read-only once built.
#[derive(Debug)]
pub struct AppContext {
    pub project_root: PathBuf,
    pub structure_path: PathBuf,
    pub app_name: Option<String>,
    pub tree: ProjectTree,
    /// The application-wide overlay (`dict_app`).
    pub app_config: ConfigOverlay,
    /// The overlay specific to the calling script.
    pub script_config: ConfigOverlay,
    pub logger: AppLogger,
    /// Uppercased keys from the `root` section and the app overlay.
    pub constants: BTreeMap<String, Value>,
}

impl AppContext {
    /// Resolved path of a tree node.
    pub fn node_path<S: AsRef<str>>(&self, keys: &[S]) -> Result<PathBuf, LookupError> {
        lookup::get_node_path(&self.tree, keys)
    }

    /// A parameter from the app overlay, falling back to the node named by `keys`.
    pub fn param<S: AsRef<str>>(&self, name: &str, keys: &[S]) -> Result<Value, LookupError> {
        lookup::get_config_param(name, &self.app_config, &self.tree, keys)
    }

    /// A parameter from the script overlay, falling back to the node named by `keys`.
    pub fn script_param<S: AsRef<str>>(&self, name: &str, keys: &[S]) -> Result<Value, LookupError> {
        lookup::get_config_param(name, &self.script_config, &self.tree, keys)
    }
}

/// Builder for the initialization sequence.
#[derive(Debug, Clone)]
pub struct AppInitializer {
    script_path: PathBuf,
    structure_path: Option<PathBuf>,
    root_dir_name: Option<String>,
}

impl AppInitializer {
    /// `script_path` is the path of the calling script; the project root is
    /// searched for above its directory.
    pub fn new(script_path: impl Into<PathBuf>) -> Self {
        Self {
            script_path: script_path.into(),
            structure_path: None,
            root_dir_name: None,
        }
    }

    /// Uses this structure spec file instead of probing for one.
    pub fn with_structure_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.structure_path = Some(path.into());
        self
    }

    /// Name of the directory used to locate the structure spec file.
    pub fn with_root_dir_name(mut self, name: impl Into<String>) -> Self {
        self.root_dir_name = Some(name.into());
        self
    }

    /// Runs the sequence through the process-wide cache.
    pub fn initialize(self) -> InitResult<Arc<AppContext>> {
        self.initialize_with(&APP_CACHE)
    }

    /// Runs the sequence through a caller-owned cache. Once `cache` is populated,
    /// its value is returned and this initializer's arguments are ignored.
    pub fn initialize_with(self, cache: &InitCache<AppContext>) -> InitResult<Arc<AppContext>> {
        cache.get_or_try_init(|| self.build())
    }

    /// Runs the whole sequence without any caching.
    pub fn build(&self) -> InitResult<AppContext> {
        if self.script_path.as_os_str().is_empty() {
            return Err(InitError::EmptyScriptPath);
        }
        let script_path = paths::absolutize(&self.script_path).map_err(PathError::from)?;

        // --- 2. Locate and load the structure spec ---
        let structure_path = match &self.structure_path {
            Some(explicit) => paths::absolutize(explicit).map_err(PathError::from)?,
            None => {
                let provisional_root = self.provisional_root(&script_path)?;
                log::debug!("Provisional project root: {}", provisional_root.display());
                paths::find_project_structure(&provisional_root)?
            }
        };

        // --- 3. Validate the structure document ---
        let raw = config_loader::load_from(&structure_path)?;
        let document = parse_document(&raw, &structure_path)?;

        // --- 4. Re-resolve the root from the authoritative name ---
        let project_root = paths::find_project_root(&script_path, Some(&document.name), None)?;
        if !project_root.is_dir() {
            return Err(InitError::RootNotOnDisk { path: project_root });
        }
        // A probed structure file was already bounded by the provisional root.
        if self.structure_path.is_some() && !paths::is_path_in_root(&structure_path, Some(&project_root)) {
            return Err(InitError::StructureOutsideRoot {
                path: structure_path,
                root: project_root,
            });
        }

        // --- 5. Build the tree ---
        let tree = tree_builder::build_project_tree(&project_root, &document.structure);
        let mut constants = document.constants.clone();

        // --- 6. App overlay ---
        let conf_dir = node_dir(&tree, CONF_NODE);
        let app_config = match (&document.app_name, &conf_dir) {
            (Some(app_name), Some(dir)) => {
                let candidate = paths::build_file_path(Some(dir), app_name, DEFAULT_CONF_EXTENSION);
                load_overlay(&candidate, &project_root)?
            }
            _ => ConfigOverlay::new(),
        };
        expose_constants(&mut constants, &app_config);

        // --- 7. Script overlay ---
        let script_name = script_stem(&script_path);
        let conf_ext = overlay_str(&app_config, KEY_CONF_EXTENSION).unwrap_or(DEFAULT_CONF_EXTENSION);
        let script_conf_dir = overlay_str(&app_config, KEY_CONF_DIR)
            .map(|dir| paths::resolve_against(&project_root, Path::new(dir)))
            .or(conf_dir);
        let script_config = match &script_conf_dir {
            Some(dir) => {
                let candidate = paths::build_file_path(Some(dir), &script_name, conf_ext);
                load_overlay(&candidate, &project_root)?
            }
            None => ConfigOverlay::new(),
        };

        // --- 8. Logger ---
        let log_dir = overlay_str(&app_config, KEY_LOG_DIR)
            .map(|dir| paths::resolve_against(&project_root, Path::new(dir)))
            .or_else(|| node_dir(&tree, LOGS_NODE))
            .unwrap_or_else(|| project_root.join(DEFAULT_LOG_DIR));
        let log_ext = overlay_str(&app_config, KEY_LOG_EXTENSION).unwrap_or(DEFAULT_LOG_EXTENSION);
        let app_name = document.app_name.as_deref().unwrap_or(DEFAULT_APP_NAME);
        let logger = AppLogger::init(&log_dir, app_name, &script_name, log_ext, Some(&project_root))?;

        logger.info(&format!(
            "Application initialized: root={}, nodes={}",
            project_root.display(),
            tree.len()
        ));

        Ok(AppContext {
            project_root,
            structure_path,
            app_name: document.app_name,
            tree,
            app_config,
            script_config,
            logger,
            constants,
        })
    }

    fn provisional_root(&self, script_path: &Path) -> InitResult<PathBuf> {
        let name = self
            .root_dir_name
            .clone()
            .or_else(|| env::var(ROOT_NAME_ENV).ok().filter(|n| !n.is_empty()));
        match name {
            Some(name) => Ok(paths::find_project_root(script_path, Some(&name), None)?),
            None => Ok(paths::find_structure_root(script_path)?),
        }
    }
}

/// Initializes the application for `script_path` through the process-wide cache.
///
/// The first successful call wins for the lifetime of the process: later calls
/// return the same context even when given a different script path.
pub fn init_app(script_path: impl Into<PathBuf>) -> InitResult<Arc<AppContext>> {
    AppInitializer::new(script_path).initialize()
}

/// Validates the `root` section of a loaded structure spec.
pub fn parse_document(raw: &Value, source: &Path) -> InitResult<StructureDocument> {
    let root = match raw.get("root") {
        Some(Value::Object(root)) if !root.is_empty() => root,
        _ => {
            return Err(InitError::MissingRoot {
                path: source.to_path_buf(),
            });
        }
    };

    let mut constants = BTreeMap::new();
    expose_constants(&mut constants, root);

    let name = root
        .get("name")
        .and_then(Value::as_str)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| InitError::MissingRootName {
            path: source.to_path_buf(),
        })?;

    let structure = match root.get("structure") {
        Some(value) if value.as_object().is_some_and(|map| !map.is_empty()) => {
            config_loader::parse_structure(value)
        }
        _ => {
            return Err(InitError::MissingStructure {
                path: source.to_path_buf(),
            });
        }
    };

    Ok(StructureDocument {
        name: name.to_string(),
        app_name: root
            .get("app_name")
            .and_then(Value::as_str)
            .filter(|n| !n.is_empty())
            .map(str::to_string),
        structure,
        constants,
    })
}

fn expose_constants(constants: &mut BTreeMap<String, Value>, source: &ConfigOverlay) {
    for (key, value) in source {
        constants.insert(key.to_uppercase(), value.clone());
    }
}

fn node_dir(tree: &ProjectTree, name: &str) -> Option<PathBuf> {
    tree.get(name).map(|node| node.path.clone())
}

fn overlay_str<'a>(overlay: &'a ConfigOverlay, key: &str) -> Option<&'a str> {
    overlay.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
}

fn script_stem(script_path: &Path) -> String {
    script_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "script".to_string())
}

/// Loads an optional overlay. A missing candidate, or one outside the root,
/// is an empty overlay; a present but unreadable one is an error.
fn load_overlay(candidate: &Path, project_root: &Path) -> InitResult<ConfigOverlay> {
    if !candidate.is_file() || !paths::is_path_in_root(candidate, Some(project_root)) {
        log::debug!("No overlay at '{}'", candidate.display());
        return Ok(ConfigOverlay::new());
    }
    log::debug!("Loading overlay '{}'", candidate.display());
    Ok(config_loader::load_map(candidate)?)
}
