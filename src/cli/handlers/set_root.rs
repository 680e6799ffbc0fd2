// src/cli/handlers/set_root.rs

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use super::commons;
use crate::state;

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Changes the local OneDrive folder.")]
struct SetRootArgs {
    /// An existing directory. `~` and environment variables are expanded.
    path: String,
}

pub fn handle(args: Vec<String>) -> Result<()> {
    let set_root_args = SetRootArgs::try_parse_from(&args)?;
    let root = commons::resolve_existing_dir(&set_root_args.path)?;

    // Setup mode: this is also how a root is first chosen non-interactively.
    let shared = commons::open_store(true);
    state::lock(&shared).set_root_path(&root);

    println!("Root path set to {}", root.display().to_string().green());
    Ok(())
}
