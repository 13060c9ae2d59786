// src/constants.rs

/// The name of the structure spec file probed for in a project.
pub const STRUCTURE_FILENAME: &str = "project_structure.yaml";

/// Relative locations probed for the structure spec, in priority order.
pub const STRUCTURE_CANDIDATES: &[&str] = &[STRUCTURE_FILENAME, "conf/project_structure.yaml"];

/// Environment variable providing the provisional root directory name.
pub const ROOT_NAME_ENV: &str = "PROJTREE_ROOT_NAME";

/// Environment variable holding an `env_logger` filter for the app logger.
pub const LOG_FILTER_ENV: &str = "PROJTREE_LOG";

/// Tree node holding the configuration overlays.
pub const CONF_NODE: &str = "conf";

/// Tree node holding the log files.
pub const LOGS_NODE: &str = "logs";

/// Log directory used when neither the app overlay nor the tree declares one.
pub const DEFAULT_LOG_DIR: &str = "logs";

/// App name used in log file names when the structure spec declares none.
pub const DEFAULT_APP_NAME: &str = "app";

/// Default extension of the app and script overlay files.
pub const DEFAULT_CONF_EXTENSION: &str = "json";

/// Default extension of the log files.
pub const DEFAULT_LOG_EXTENSION: &str = "log";

/// Script name the CLI uses when no `--script` is given.
pub const DEFAULT_CLI_SCRIPT_NAME: &str = "projtree";

// App overlay keys read by the initializer.

/// Directory holding the script overlays.
pub const KEY_CONF_DIR: &str = "conf";

/// Extension of the script overlay file.
pub const KEY_CONF_EXTENSION: &str = "conf_file_extension";

/// Directory receiving the log files.
pub const KEY_LOG_DIR: &str = "log";

/// Extension of the log files.
pub const KEY_LOG_EXTENSION: &str = "log_file_extension";
