// src/core/parameters.rs

//! The compiled-in parameter defaults and the typed keys used to read them back.

use crate::models::{ParamValue, ParameterSet};

/// Every parameter the client knows about.
///
/// The on-disk file may hold more keys than these; they are kept, but can only be
/// read through the untyped `ConfigStore::get`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Param {
    /// Seconds to wait before retrying after a network failure.
    NetworkErrorRetryInterval,
    /// Seconds between full scans of the local tree.
    DeepScanInterval,
    NumOfWorkers,
    /// Files larger than this many bytes are uploaded through the BITS API.
    BitsFileMinSize,
    /// Block size, in bytes, for BITS uploads.
    BitsBlockSize,
    /// Local directory mirrored to OneDrive. Mandatory outside setup mode.
    RootPath,
    /// Legacy token slot, superseded by the session file.
    Tokens,
    /// Legacy token expiry slot, superseded by the session file.
    TokensExp,
    UseGui,
    /// Numeric log level: 10 debug, 20 info, 30 warning, 40 error, 50 critical.
    MinLogLevel,
    LogFilePath,
    LastRunTimestamp,
}

impl Param {
    pub const ALL: [Param; 12] = [
        Param::NetworkErrorRetryInterval,
        Param::DeepScanInterval,
        Param::NumOfWorkers,
        Param::BitsFileMinSize,
        Param::BitsBlockSize,
        Param::RootPath,
        Param::Tokens,
        Param::TokensExp,
        Param::UseGui,
        Param::MinLogLevel,
        Param::LogFilePath,
        Param::LastRunTimestamp,
    ];

    /// The key under which the parameter is stored in `config_v2.json`.
    pub fn key(self) -> &'static str {
        match self {
            Param::NetworkErrorRetryInterval => "NETWORK_ERROR_RETRY_INTERVAL",
            Param::DeepScanInterval => "DEEP_SCAN_INTERVAL",
            Param::NumOfWorkers => "NUM_OF_WORKERS",
            Param::BitsFileMinSize => "BITS_FILE_MIN_SIZE",
            Param::BitsBlockSize => "BITS_BLOCK_SIZE",
            Param::RootPath => "ONEDRIVE_ROOT_PATH",
            Param::Tokens => "ONEDRIVE_TOKENS",
            Param::TokensExp => "ONEDRIVE_TOKENS_EXP",
            Param::UseGui => "USE_GUI",
            Param::MinLogLevel => "MIN_LOG_LEVEL",
            Param::LogFilePath => "LOG_FILE_PATH",
            Param::LastRunTimestamp => "LAST_RUN_TIMESTAMP",
        }
    }

    pub fn from_key(key: &str) -> Option<Param> {
        Param::ALL.into_iter().find(|p| p.key() == key)
    }

    /// The compiled-in default for this parameter.
    pub fn default_value(self) -> ParamValue {
        match self {
            Param::NetworkErrorRetryInterval => ParamValue::Integer(10),
            Param::DeepScanInterval => ParamValue::Integer(60),
            Param::NumOfWorkers => ParamValue::Integer(4),
            Param::BitsFileMinSize => ParamValue::Integer(4 * 1024 * 1024),
            Param::BitsBlockSize => ParamValue::Integer(512 * 1024),
            Param::RootPath | Param::Tokens | Param::TokensExp => ParamValue::Null,
            Param::UseGui => ParamValue::Bool(false),
            Param::MinLogLevel => ParamValue::Integer(10),
            Param::LogFilePath => ParamValue::from("/var/log/onedrive_d.log"),
            Param::LastRunTimestamp => ParamValue::from("1970-01-01T00:00:00+0000"),
        }
    }
}

/// Builds a fresh parameter set holding every default.
pub fn defaults() -> ParameterSet {
    Param::ALL
        .into_iter()
        .map(|p| (p.key(), p.default_value()))
        .collect()
}

/// Merges a loaded mapping over the defaults. Loaded values win; keys unknown to the
/// defaults are kept as-is.
pub fn merge_over_defaults(loaded: ParameterSet) -> ParameterSet {
    let mut params = defaults();
    params.overlay(loaded);
    params
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_every_param() {
        let params = defaults();
        assert_eq!(params.len(), Param::ALL.len());
        for p in Param::ALL {
            assert_eq!(params.get(p.key()), Some(&p.default_value()), "{}", p.key());
        }
    }

    #[test]
    fn test_known_default_values() {
        let params = defaults();
        assert_eq!(params.get("NUM_OF_WORKERS"), Some(&ParamValue::Integer(4)));
        assert_eq!(params.get("BITS_BLOCK_SIZE"), Some(&ParamValue::Integer(524288)));
        assert_eq!(params.get("BITS_FILE_MIN_SIZE"), Some(&ParamValue::Integer(4194304)));
        assert_eq!(params.get("ONEDRIVE_ROOT_PATH"), Some(&ParamValue::Null));
        assert_eq!(params.get("USE_GUI"), Some(&ParamValue::Bool(false)));
    }

    #[test]
    fn test_key_lookup_is_inverse_of_key() {
        for p in Param::ALL {
            assert_eq!(Param::from_key(p.key()), Some(p));
        }
        assert_eq!(Param::from_key("CUSTOM_KEY"), None);
    }

    #[test]
    fn test_merge_keeps_unknown_keys_and_untouched_defaults() {
        let mut loaded = ParameterSet::new();
        loaded.insert("NUM_OF_WORKERS", 8i64);
        loaded.insert("CUSTOM_KEY", "x");

        let merged = merge_over_defaults(loaded);

        assert_eq!(merged.get("NUM_OF_WORKERS"), Some(&ParamValue::Integer(8)));
        assert_eq!(merged.get("CUSTOM_KEY"), Some(&ParamValue::from("x")));
        assert_eq!(merged.get("BITS_BLOCK_SIZE"), Some(&ParamValue::Integer(524288)));
        assert_eq!(merged.len(), Param::ALL.len() + 1);
    }
}
