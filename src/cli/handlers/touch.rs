// src/cli/handlers/touch.rs

use anyhow::Result;
use clap::Parser;

use super::commons;
use crate::{core::parameters::Param, state};

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Records the current time as the last run.")]
struct TouchArgs {}

pub fn handle(args: Vec<String>) -> Result<()> {
    let _touch_args = TouchArgs::try_parse_from(&args)?;
    let shared = commons::open_store(false);
    let mut store = state::lock(&shared);

    store.set_last_run_timestamp();
    if let Some(value) = store.get(Param::LastRunTimestamp.key()).and_then(|v| v.as_str()) {
        println!("Last run recorded as {}", value);
    }
    Ok(())
}
