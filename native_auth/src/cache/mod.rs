mod memory;

pub use memory::InMemoryTokenCache;

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::executor::TokenPayload;

#[derive(Debug, Error, Clone)]
pub enum CacheError {
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Token material persisted for an account after a completed flow.
#[derive(Clone, Serialize, Deserialize)]
pub struct CachedTokenSet {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub id_token: Option<String>,
    pub token_type: String,
    pub scopes: Vec<String>,
    pub expires_on: DateTime<Utc>,
}

impl CachedTokenSet {
    pub(crate) fn from_payload(payload: &TokenPayload) -> Self {
        let scopes = payload
            .scope
            .as_deref()
            .map(|s| s.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();

        Self {
            access_token: payload.access_token.clone(),
            refresh_token: payload.refresh_token.clone(),
            id_token: payload.id_token.clone(),
            token_type: payload.token_type.clone(),
            scopes,
            expires_on: Utc::now() + Duration::seconds(payload.expires_in as i64),
        }
    }
}

impl fmt::Debug for CachedTokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedTokenSet")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[REDACTED]"))
            .field("id_token", &self.id_token.as_ref().map(|_| "[REDACTED]"))
            .field("token_type", &self.token_type)
            .field("scopes", &self.scopes)
            .field("expires_on", &self.expires_on)
            .finish()
    }
}

/// Persistence handle for issued token sets.
///
/// The flow core only ever calls through this trait; the storage mechanics
/// (disk, keychain, remote cache) belong to the embedding platform. An
/// in-memory implementation ships with the crate.
#[async_trait]
pub trait TokenCache: fmt::Debug + Send + Sync {
    /// Persist the token set for an account.
    async fn put(&self, username: &str, tokens: CachedTokenSet) -> Result<(), CacheError>;

    /// Fetch the token set for an account, if present.
    async fn get(&self, username: &str) -> Result<Option<CachedTokenSet>, CacheError>;

    /// Drop the token set for an account.
    async fn remove(&self, username: &str) -> Result<(), CacheError>;
}
