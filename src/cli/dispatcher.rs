use anyhow::{Result, anyhow};
use colored::Colorize;

use crate::cli::handlers;

/// Defines a command, its aliases, and its handler.
struct CommandDefinition {
    name: &'static str,
    aliases: &'static [&'static str],
    about: &'static str,
    handler: fn(Vec<String>) -> Result<()>,
}

/// The single source of truth for all commands.
static COMMAND_REGISTRY: &[CommandDefinition] = &[
    CommandDefinition {
        name: "setup",
        aliases: &["init"],
        about: "Create ~/.onedrive and choose the local OneDrive folder.",
        handler: handlers::setup::handle,
    },
    CommandDefinition {
        name: "show",
        aliases: &["ls"],
        about: "Print the account, file layout and every parameter.",
        handler: handlers::show::handle,
    },
    CommandDefinition {
        name: "get",
        aliases: &[],
        about: "Print the value of one parameter as JSON.",
        handler: handlers::get::handle,
    },
    CommandDefinition {
        name: "set-root",
        aliases: &[],
        about: "Change the local OneDrive folder.",
        handler: handlers::set_root::handle,
    },
    CommandDefinition {
        name: "touch",
        aliases: &[],
        about: "Record the current time as the last run.",
        handler: handlers::touch::handle,
    },
    CommandDefinition {
        name: "token",
        aliases: &["session"],
        about: "Show the stored session and whether it has expired.",
        handler: handlers::token::handle,
    },
    CommandDefinition {
        name: "set-token",
        aliases: &[],
        about: "Store a token response (JSON file, or '-' for stdin).",
        handler: handlers::set_token::handle,
    },
];

/// Finds a command definition in the registry by its name or alias.
fn find_command(name: &str) -> Option<&'static CommandDefinition> {
    COMMAND_REGISTRY
        .iter()
        .find(|cmd| cmd.name == name || cmd.aliases.contains(&name))
}

fn print_command_list() {
    println!("{}", "Commands:".yellow().bold());
    for cmd in COMMAND_REGISTRY {
        println!("  {:<12} {}", cmd.name.cyan().bold(), cmd.about);
    }
}

/// Routes `<command> [args...]` to its handler.
pub fn dispatch(all_args: Vec<String>) -> Result<()> {
    log::debug!("Dispatching args: {:?}", all_args);

    let mut args = all_args.into_iter();
    let Some(name) = args.next() else {
        print_command_list();
        return Ok(());
    };

    match find_command(&name) {
        Some(command) => (command.handler)(args.collect()),
        None => {
            print_command_list();
            Err(anyhow!("Unknown command '{}'.", name))
        }
    }
}
