// src/cli/handlers/show.rs

use anyhow::Result;
use clap::Parser;
use colored::*;

use super::commons;
use crate::state;

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Prints the account, file layout and every parameter."
)]
struct ShowArgs {
    /// Print the parameters as a single JSON object instead.
    #[arg(long)]
    json: bool,
}

pub fn handle(args: Vec<String>) -> Result<()> {
    let show_args = ShowArgs::try_parse_from(&args)?;
    let shared = commons::open_store(false);
    let store = state::lock(&shared);

    if show_args.json {
        println!("{}", serde_json::to_string_pretty(store.parameters())?);
        return Ok(());
    }

    let account = store.account();
    let paths = store.paths();
    println!("\n--- {} ---", "onedrive-d configuration".yellow());
    println!("  {:<15} {} (uid {})", "user".blue(), account.name, account.uid);
    println!("  {:<15} {}", "config file".blue(), paths.config_file.display());
    println!("  {:<15} {}", "session file".blue(), paths.token_file.display());
    println!(
        "  {:<15} {}",
        "ignore list".blue(),
        match store.ignore_list() {
            Some(list) => format!("{} rule(s)", list.len()),
            None => "not loaded".dimmed().to_string(),
        }
    );
    println!("  {:<15} {}", "last run".blue(), store.last_run_timestamp());

    println!("\n--- {} ---", "parameters".yellow());
    for (key, value) in store.parameters().iter() {
        println!("  {:<30} {}", key.cyan(), commons::render_value(value));
    }
    Ok(())
}
