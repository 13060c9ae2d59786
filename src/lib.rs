//! Project-structure resolution and configuration cascade.
//!
//! A project declares its layout in `project_structure.yaml`. `init_app` locates the
//! project root, resolves that layout into a [`models::ProjectTree`], loads the app
//! and script configuration overlays and installs the application logger.

pub mod cli;
pub mod constants;
pub mod core;
pub mod models;

pub use crate::core::initializer::{AppContext, AppInitializer, InitError, init_app};
pub use crate::core::lookup::{get_config_param, get_node_path};
