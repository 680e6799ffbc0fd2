use clap::Parser;
use std::path::PathBuf;

pub mod dispatcher;
pub mod handlers;

/// onedrive-d: configuration and session management for the OneDrive sync client.
///
/// Run without a command to list the available commands. Each command accepts
/// `--help`.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    styles = clap::builder::Styles::styled()
        .header(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .usage(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .literal(clap::builder::styling::AnsiColor::Cyan.on_default().bold())
        .placeholder(clap::builder::styling::AnsiColor::Green.on_default()),
)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Log debug output.
    #[arg(long, short)]
    pub verbose: bool,

    /// Append log output to this file instead of stderr.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// The command followed by its arguments.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}
