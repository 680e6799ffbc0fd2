// src/cli/handlers/token.rs

use anyhow::Result;
use clap::Parser;
use colored::*;

use super::commons;
use crate::state;

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Shows the stored session and whether it has expired."
)]
struct TokenArgs {}

pub fn handle(args: Vec<String>) -> Result<()> {
    let _token_args = TokenArgs::try_parse_from(&args)?;
    let shared = commons::open_store(false);
    let mut store = state::lock(&shared);

    let Some(token) = store.get_access_token().cloned() else {
        println!("{}", "No session stored. Sign in first.".yellow());
        return Ok(());
    };

    println!("\n--- {} ---", "session".yellow());
    println!("  {:<12} {}", "type".blue(), token.token_type);
    println!("  {:<12} {}", "expires".blue(), token.expiration);
    println!(
        "  {:<12} {}",
        "refresh".blue(),
        if token.refresh_token.is_empty() { "no" } else { "yes" }
    );

    // Never print token material itself.
    let status = match store.is_token_expired() {
        Ok(false) => "valid".green(),
        Ok(true) => "expired".red(),
        Err(e) => format!("unknown ({})", e).red(),
    };
    println!("  {:<12} {}", "status".blue(), status);
    Ok(())
}
