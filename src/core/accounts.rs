// src/core/accounts.rs

//! Resolution of the OS account that owns the configuration.
//!
//! When run through `sudo`, the configuration belongs to the invoking user rather than
//! root, so `SUDO_USER` takes priority over `USER`. The account is then looked up in
//! the system user database for its uid and home directory.

use crate::constants::{SUDO_USER_ENV, USER_ENV};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AccountError {
    #[error("Cannot find current logged-in user.")]
    NoUser,
    #[error("User '{0}' does not exist in the user database.")]
    UnknownUser(String),
    #[error("User name '{0}' contains an interior NUL byte.")]
    InvalidName(String),
    #[error("Failed to look up user '{name}': {source}")]
    Lookup {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// A resolved OS account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub name: String,
    pub uid: u32,
    pub home: PathBuf,
}

/// The user-name signals read from the environment, captured once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserSignals {
    pub sudo_user: Option<String>,
    pub user: Option<String>,
}

impl UserSignals {
    pub fn from_env() -> Self {
        Self {
            sudo_user: std::env::var(SUDO_USER_ENV).ok(),
            user: std::env::var(USER_ENV).ok(),
        }
    }

    /// Picks the effective user name. Empty values count as unset.
    pub fn resolve_username(&self) -> Result<&str, AccountError> {
        [self.sudo_user.as_deref(), self.user.as_deref()]
            .into_iter()
            .flatten()
            .find(|name| !name.is_empty())
            .ok_or(AccountError::NoUser)
    }
}

/// Source of account records.
pub trait AccountDirectory {
    fn lookup(&self, name: &str) -> Result<Account, AccountError>;
}

/// The system user database (passwd entries via `nix`).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemAccounts;

#[cfg(unix)]
impl AccountDirectory for SystemAccounts {
    fn lookup(&self, name: &str) -> Result<Account, AccountError> {
        use nix::unistd::User;

        if name.contains('\0') {
            return Err(AccountError::InvalidName(name.to_string()));
        }
        let user = User::from_name(name)
            .map_err(|errno| AccountError::Lookup {
                name: name.to_string(),
                source: errno.into(),
            })?
            .ok_or_else(|| AccountError::UnknownUser(name.to_string()))?;

        Ok(Account {
            name: name.to_string(),
            uid: user.uid.as_raw(),
            home: user.dir,
        })
    }
}

#[cfg(not(unix))]
impl AccountDirectory for SystemAccounts {
    fn lookup(&self, name: &str) -> Result<Account, AccountError> {
        Err(AccountError::UnknownUser(name.to_string()))
    }
}

/// Resolves the effective user name and looks it up.
pub fn resolve_account(
    signals: &UserSignals,
    accounts: &dyn AccountDirectory,
) -> Result<Account, AccountError> {
    let name = signals.resolve_username()?;
    log::debug!("Resolving account for user '{}'", name);
    accounts.lookup(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OneAccount(Account);

    impl AccountDirectory for OneAccount {
        fn lookup(&self, name: &str) -> Result<Account, AccountError> {
            if name == self.0.name {
                Ok(self.0.clone())
            } else {
                Err(AccountError::UnknownUser(name.to_string()))
            }
        }
    }

    fn signals(sudo: Option<&str>, user: Option<&str>) -> UserSignals {
        UserSignals {
            sudo_user: sudo.map(str::to_string),
            user: user.map(str::to_string),
        }
    }

    #[test]
    fn test_sudo_user_takes_priority() {
        assert_eq!(signals(Some("alice"), Some("root")).resolve_username().unwrap(), "alice");
    }

    #[test]
    fn test_empty_sudo_user_falls_back() {
        assert_eq!(signals(Some(""), Some("bob")).resolve_username().unwrap(), "bob");
        assert_eq!(signals(None, Some("bob")).resolve_username().unwrap(), "bob");
    }

    #[test]
    fn test_no_user_at_all_is_an_error() {
        assert!(matches!(
            signals(Some(""), Some("")).resolve_username(),
            Err(AccountError::NoUser)
        ));
        assert!(matches!(signals(None, None).resolve_username(), Err(AccountError::NoUser)));
    }

    #[test]
    fn test_resolve_account_uses_directory() {
        let dir = OneAccount(Account {
            name: "alice".into(),
            uid: 1000,
            home: PathBuf::from("/home/alice"),
        });

        let account = resolve_account(&signals(None, Some("alice")), &dir).unwrap();
        assert_eq!(account.uid, 1000);

        let missing = resolve_account(&signals(None, Some("mallory")), &dir);
        assert!(matches!(missing, Err(AccountError::UnknownUser(n)) if n == "mallory"));
    }

    #[cfg(unix)]
    #[test]
    fn test_system_lookup_of_root() {
        let root = SystemAccounts.lookup("root").unwrap();
        assert_eq!(root.uid, 0);
        assert!(root.home.is_absolute());
    }

    #[cfg(unix)]
    #[test]
    fn test_system_lookup_of_unknown_user() {
        let result = SystemAccounts.lookup("no-such-user-onedrive-d-test");
        assert!(matches!(result, Err(AccountError::UnknownUser(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_system_lookup_rejects_nul_in_name() {
        let result = SystemAccounts.lookup("ro\0ot");
        assert!(matches!(result, Err(AccountError::InvalidName(_))));
    }
}
