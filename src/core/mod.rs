// src/core/mod.rs

pub mod accounts;
pub mod clock;
pub mod config_store;
pub mod ignore_list;
pub mod parameters;
pub mod paths;
pub mod persistence;
pub mod token_store;
