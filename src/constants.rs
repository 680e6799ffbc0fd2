// src/constants.rs

/// The name of the per-user application directory (inside the home directory).
pub const APP_DIR: &str = ".onedrive";

/// The name of the parameter file (inside ~/.onedrive/).
pub const CONFIG_FILENAME: &str = "config_v2.json";

/// The name of the session file holding the OAuth token pair (inside ~/.onedrive/).
pub const TOKEN_FILENAME: &str = "session.json";

/// The name of the ignore-list file (inside ~/.onedrive/).
pub const IGNORE_FILENAME: &str = "ignore_v2.ini";

/// Set by `sudo` to the invoking user. Takes priority over `USER`.
pub const SUDO_USER_ENV: &str = "SUDO_USER";

pub const USER_ENV: &str = "USER";

/// Application version reported by the CLI.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
