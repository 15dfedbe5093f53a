use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{CacheError, CachedTokenSet, TokenCache};

/// In-memory token cache, keyed by username.
///
/// Suitable for tests and short-lived processes; a production embedding
/// supplies its own [`TokenCache`] backed by platform storage.
#[derive(Debug)]
pub struct InMemoryTokenCache {
    entries: Mutex<HashMap<String, CachedTokenSet>>,
}

impl InMemoryTokenCache {
    pub fn new() -> Self {
        tracing::info!("Creating new in-memory token cache");
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryTokenCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenCache for InMemoryTokenCache {
    async fn put(&self, username: &str, tokens: CachedTokenSet) -> Result<(), CacheError> {
        self.entries
            .lock()
            .await
            .insert(username.to_string(), tokens);
        Ok(())
    }

    async fn get(&self, username: &str) -> Result<Option<CachedTokenSet>, CacheError> {
        Ok(self.entries.lock().await.get(username).cloned())
    }

    async fn remove(&self, username: &str) -> Result<(), CacheError> {
        self.entries.lock().await.remove(username);
        Ok(())
    }
}
