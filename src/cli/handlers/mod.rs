// src/cli/handlers/mod.rs

pub mod commons;
pub mod get;
pub mod set_root;
pub mod set_token;
pub mod setup;
pub mod show;
pub mod token;
pub mod touch;
