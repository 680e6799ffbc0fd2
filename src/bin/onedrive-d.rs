// src/bin/onedrive-d.rs

use anyhow::Result;
use clap::Parser;
use colored::*;
use log::LevelFilter;
use onedrive_d::{
    cli::{Cli, dispatcher},
    system::{logging, shutdown},
};

/// Runs the command and exits with its status.
///
/// Deferred work (saving a changed configuration, flushing the log) runs from the
/// exit-hook guard, which is dropped before `process::exit` on every return path.
fn main() {
    let cli = Cli::parse();
    shutdown::register(shutdown::LOG_FLUSH_HOOK, logging::flush);
    // Without either flag, logging follows the stored MIN_LOG_LEVEL and LOG_FILE_PATH
    // once a command loads the store.
    if cli.verbose || cli.log_file.is_some() {
        let level = if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };
        logging::init(level, cli.log_file.as_deref());
    }

    let code = {
        let _exit_hooks = scopeguard::guard((), |()| shutdown::run_exit_hooks());
        match run(cli) {
            Ok(()) => 0,
            Err(e) => {
                eprintln!("\n{}: {:#}", "Error".red().bold(), e);
                1
            }
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<()> {
    log::debug!("CLI args parsed: {:?}", cli);
    dispatcher::dispatch(cli.args)
}
