// src/core/mod.rs

pub mod cache;
pub mod config_loader;
pub mod graph_display;
pub mod initializer;
pub mod logger;
pub mod lookup;
pub mod paths;
pub mod scaffold;
pub mod tree_builder;
