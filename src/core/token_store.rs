// src/core/token_store.rs

use crate::core::clock::{self, TimestampError};
use crate::core::persistence::{self, PersistError};
use crate::models::{TokenRecord, TokenResponse};
use chrono::{DateTime, Duration, Utc};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("No access token is available.")]
    Missing,
    #[error("Token expiration is unreadable: {0}")]
    BadExpiration(#[from] TimestampError),
}

/// Holds the current credential pair and its session file.
#[derive(Debug)]
pub struct TokenStore {
    path: PathBuf,
    token: Option<TokenRecord>,
}

impl TokenStore {
    /// Creates an empty store backed by `path`. Nothing is read until the first
    /// `get_access_token`.
    pub fn new(path: PathBuf) -> Self {
        Self { path, token: None }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the cached token, filling the cache from the session file on first use.
    ///
    /// Read failures are not errors: the caller simply gets whatever was cached,
    /// possibly nothing.
    pub fn get_access_token(&mut self) -> Option<&TokenRecord> {
        if self.token.is_none() {
            match persistence::read_json::<Option<TokenRecord>>(&self.path) {
                Ok(loaded) => self.token = loaded,
                Err(e) => log::debug!("No session loaded: {}", e),
            }
        }
        self.token.as_ref()
    }

    /// The cached token, without touching the session file.
    pub fn cached(&self) -> Option<&TokenRecord> {
        self.token.as_ref()
    }

    pub fn is_token_expired(&self) -> Result<bool, TokenError> {
        self.is_token_expired_at(clock::now())
    }

    /// A token is expired once its expiration lies strictly before `now`.
    pub fn is_token_expired_at(&self, now: DateTime<Utc>) -> Result<bool, TokenError> {
        let token = self.token.as_ref().ok_or(TokenError::Missing)?;
        let expiration = clock::str_to_time(&token.expiration)?;
        Ok(expiration < now)
    }

    pub fn set_access_token(&mut self, response: TokenResponse) {
        self.set_access_token_at(response, clock::now());
    }

    /// Replaces the cached token, deriving its absolute expiration from `now`.
    pub fn set_access_token_at(&mut self, response: TokenResponse, now: DateTime<Utc>) {
        let expiration = Duration::try_seconds(response.expires_in)
            .and_then(|d| now.checked_add_signed(d))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let record = TokenRecord::from_response(response, clock::time_to_str(&expiration));
        log::debug!("New access token expires at {}", record.expiration);
        self.token = Some(record);
    }

    /// Writes the cached token (or `null` when there is none) to the session file.
    pub fn save(&self) -> Result<(), PersistError> {
        persistence::write_json_atomic(&self.path, &self.token)
    }
}
