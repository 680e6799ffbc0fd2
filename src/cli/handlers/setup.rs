// src/cli/handlers/setup.rs

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use colored::Colorize;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};
use std::fs;
use std::path::{Path, PathBuf};

use super::commons;
use crate::{
    core::{
        accounts::{self, Account, SystemAccounts, UserSignals},
        paths::{self, AppPaths},
    },
    state,
};

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Creates ~/.onedrive and chooses the local OneDrive folder."
)]
struct SetupArgs {
    /// The local OneDrive folder. Asked interactively if omitted.
    #[arg(long)]
    root: Option<String>,

    /// Do not ask for anything; create missing folders and use defaults.
    #[arg(long)]
    autosolve: bool,
}

/// The main handler for the `setup` command.
/// Prepares the install directory, then records the root path through the store
/// in setup mode. The exit flush writes the new config file.
pub fn handle(args: Vec<String>) -> Result<()> {
    let setup_args = SetupArgs::try_parse_from(&args)?;
    let is_interactive = !setup_args.autosolve;

    // 1. The install directory must exist before the store will load.
    let account = accounts::resolve_account(&UserSignals::from_env(), &SystemAccounts)?;
    let app_paths = AppPaths::for_home(&account.home);
    paths::create_owned_dir(&app_paths.app_dir, account.uid)?;
    println!("Using {}", app_paths.app_dir.display());

    let shared = commons::open_store(true);
    let mut store = state::lock(&shared);

    // 2. Decide the root path.
    let current = store.root_path();
    let root = resolve_root_input(&setup_args, current.as_deref(), &account, is_interactive)?;
    ensure_root_dir(&root, &account, is_interactive)?;
    let root = dunce::canonicalize(&root)
        .with_context(|| format!("Failed to resolve '{}'", root.display()))?;

    // 3. Record it. A first run always gets a config file, even with nothing changed.
    store.set_root_path(&root);
    println!(
        "{} Root path: {}",
        "✔".green(),
        root.display().to_string().green()
    );
    Ok(())
}

fn resolve_root_input(
    args: &SetupArgs,
    current: Option<&Path>,
    account: &Account,
    is_interactive: bool,
) -> Result<PathBuf> {
    if let Some(root) = &args.root {
        return commons::expand_path(root);
    }

    let default = current
        .map(Path::to_path_buf)
        .unwrap_or_else(|| account.home.join("OneDrive"));
    if !is_interactive {
        return Ok(default);
    }

    let answer: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Local OneDrive folder")
        .default(default.display().to_string())
        .interact_text()?;
    commons::expand_path(&answer)
}

fn ensure_root_dir(root: &Path, account: &Account, is_interactive: bool) -> Result<()> {
    if root.is_dir() {
        return Ok(());
    }
    if root.exists() {
        return Err(anyhow!("'{}' exists but is not a directory.", root.display()));
    }

    let create = !is_interactive
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("'{}' does not exist. Create it?", root.display()))
            .default(true)
            .interact()?;
    if !create {
        return Err(anyhow!("Setup cancelled: no root folder."));
    }

    fs::create_dir_all(root).with_context(|| format!("Failed to create '{}'", root.display()))?;
    paths::set_owner(root, account.uid)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn account(home: &Path) -> Account {
        Account {
            name: "alice".into(),
            uid: 0,
            home: home.to_path_buf(),
        }
    }

    #[test]
    fn test_non_interactive_root_defaults() {
        let home = TempDir::new().unwrap();
        let args = SetupArgs::default();
        let acc = account(home.path());

        let root = resolve_root_input(&args, None, &acc, false).unwrap();
        assert_eq!(root, home.path().join("OneDrive"));

        let root = resolve_root_input(&args, Some(Path::new("/srv/od")), &acc, false).unwrap();
        assert_eq!(root, PathBuf::from("/srv/od"));
    }

    #[test]
    fn test_explicit_root_wins() {
        let home = TempDir::new().unwrap();
        let args = SetupArgs {
            root: Some("/data/od".into()),
            autosolve: true,
        };
        let root = resolve_root_input(&args, Some(Path::new("/srv/od")), &account(home.path()), false).unwrap();
        assert_eq!(root, PathBuf::from("/data/od"));
    }

    #[cfg(unix)]
    #[test]
    fn test_ensure_root_dir_creates_missing_folder() {
        use std::os::unix::fs::MetadataExt;

        let home = TempDir::new().unwrap();
        let uid = fs::metadata(home.path()).unwrap().uid();
        let acc = Account {
            uid,
            ..account(home.path())
        };
        let root = home.path().join("OneDrive");

        ensure_root_dir(&root, &acc, false).unwrap();
        assert!(root.is_dir());

        let file = home.path().join("plain-file");
        fs::write(&file, "x").unwrap();
        assert!(ensure_root_dir(&file, &acc, false).is_err());
    }
}
