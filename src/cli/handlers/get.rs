// src/cli/handlers/get.rs

use anyhow::{Result, anyhow};
use clap::Parser;

use super::commons;
use crate::state;

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Prints the value of one parameter as JSON.")]
struct GetArgs {
    /// The parameter name, e.g. NUM_OF_WORKERS.
    key: String,
}

pub fn handle(args: Vec<String>) -> Result<()> {
    let get_args = GetArgs::try_parse_from(&args)?;
    let shared = commons::open_store(false);
    let store = state::lock(&shared);

    let value = store
        .get(&get_args.key)
        .ok_or_else(|| anyhow!("Parameter '{}' is not set.", get_args.key))?;
    println!("{}", commons::render_value(value));
    Ok(())
}
