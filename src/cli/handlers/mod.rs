// src/cli/handlers/mod.rs

pub mod check;
pub mod commons;
pub mod info;
pub mod param;
pub mod path;
pub mod scaffold;
pub mod tree;
