// src/cli/handlers/set_token.rs

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;

use super::commons;
use crate::{models::TokenResponse, state};

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Stores a token response obtained from the authorization server."
)]
struct SetTokenArgs {
    /// A JSON file holding the response, or '-' to read it from stdin.
    source: String,
}

pub fn handle(args: Vec<String>) -> Result<()> {
    let set_token_args = SetTokenArgs::try_parse_from(&args)?;

    let raw = if set_token_args.source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read token response from stdin")?;
        buf
    } else {
        std::fs::read_to_string(&set_token_args.source)
            .with_context(|| format!("Failed to read '{}'", set_token_args.source))?
    };
    let response = parse_response(&raw)?;

    let shared = commons::open_store(false);
    let mut store = state::lock(&shared);
    store.set_access_token(response);
    if let Some(token) = store.get_access_token() {
        println!("Session stored; expires at {}", token.expiration);
    }
    Ok(())
}

fn parse_response(raw: &str) -> Result<TokenResponse> {
    serde_json::from_str(raw).context("Token response is not valid JSON or lacks access_token/expires_in")
}
