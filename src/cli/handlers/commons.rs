// src/cli/handlers/commons.rs

// Shared helpers used by multiple handlers.

use anyhow::{Context, Result};
use serde_json::Value;
use std::{env, sync::Arc};

use crate::{
    cli::GlobalOptions,
    constants::DEFAULT_CLI_SCRIPT_NAME,
    core::{
        initializer::{AppContext, AppInitializer},
        paths,
    },
};

/// Builds the initializer described by the global options.
pub fn initializer_for(options: &GlobalOptions) -> Result<AppInitializer> {
    let script_path = match &options.script {
        Some(raw) => paths::expand_user_path(raw)?,
        None => env::current_dir()
            .context("Could not read the current directory.")?
            .join(DEFAULT_CLI_SCRIPT_NAME),
    };

    let mut initializer = AppInitializer::new(script_path);
    if let Some(raw) = &options.structure {
        initializer = initializer.with_structure_path(paths::expand_user_path(raw)?);
    }
    if let Some(name) = &options.root_name {
        initializer = initializer.with_root_dir_name(name.clone());
    }
    Ok(initializer)
}

/// Initializes the application for the current invocation.
pub fn load_context(options: &GlobalOptions) -> Result<Arc<AppContext>> {
    initializer_for(options)?
        .initialize()
        .context("Could not initialize the project.")
}

/// Flattens node keys given as separate words or as `a/b/c`.
pub fn split_keys(raw: &[String]) -> Vec<String> {
    raw.iter()
        .flat_map(|k| k.split('/'))
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

/// Strings are printed bare, everything else as JSON.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_split_keys() {
        let raw = vec!["data/raw".to_string(), "csv".to_string(), "/".to_string()];
        assert_eq!(split_keys(&raw), vec!["data", "raw", "csv"]);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&json!("utf-8")), "utf-8");
        assert_eq!(format_value(&json!({"a": 1})), r#"{"a":1}"#);
    }
}
