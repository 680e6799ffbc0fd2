// src/models.rs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::collections::btree_map;

// --- Parameters ---

/// A single configuration value.
///
/// The on-disk format is plain JSON, so a value is whatever JSON shape was stored.
/// The common shapes get their own variant; anything else (floats, arrays, objects)
/// is carried through untouched in `Other` so that keys written by newer versions
/// survive a load/save cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Null,
    Bool(bool),
    Integer(i64),
    /// Strings, including timestamps such as `LAST_RUN_TIMESTAMP`.
    Text(String),
    Other(Value),
}

impl ParamValue {
    pub fn is_null(&self) -> bool {
        matches!(self, ParamValue::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParamValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        ParamValue::Integer(n)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Bool(b)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Text(s)
    }
}

/// The full parameter mapping, keyed by parameter name.
///
/// Serialized as a flat JSON object. Keys are kept sorted so that the file on disk
/// is stable between saves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet(BTreeMap<String, ParamValue>);

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Overlays every key of `other` onto `self`. Keys not already present are added.
    pub fn overlay(&mut self, other: ParameterSet) {
        self.0.extend(other.0);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, ParamValue> {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// --- Tokens ---

/// A token response as handed over by the network layer after an authorization or
/// refresh exchange. `expires_in` is relative to the moment the response was received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default)]
    pub token_type: String,
    pub expires_in: i64,
    /// Any additional fields (`scope`, `user_id`, ...) are kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The persisted credential pair.
///
/// Reading is lenient: missing fields default to empty so that a hand-edited or
/// older session file still loads. Whether the record is usable is decided by
/// `TokenStore::is_token_expired_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenRecord {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: i64,
    /// Absolute expiry, derived from `expires_in` when the token was set.
    #[serde(default)]
    pub expiration: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TokenRecord {
    /// Builds a record from a response, stamping it with a precomputed `expiration`.
    pub fn from_response(response: TokenResponse, expiration: String) -> Self {
        let mut extra = response.extra;
        // A stale absolute expiry in the response must never shadow the derived one.
        extra.remove("expiration");
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            token_type: response.token_type,
            expires_in: response.expires_in,
            expiration,
            extra,
        }
    }
}
