//! Durable key-value storage backing the client session.

use async_trait::async_trait;

use crate::result::AppResult;

/// Trait for durable client-side session storage (a file, process memory).
///
/// Writes and removals are batched so related keys (the bearer token and
/// the user profile) are always mutated in one step: a backend must either
/// apply every entry of a batch or none of them.
#[async_trait]
pub trait SessionStorage: Send + Sync + std::fmt::Debug + 'static {
    /// Get a value by key. Returns `None` if the key is absent.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Store every `(key, value)` pair as one write.
    async fn set_many(&self, entries: &[(&str, String)]) -> AppResult<()>;

    /// Remove every listed key as one write. Missing keys are ignored.
    async fn remove_many(&self, keys: &[&str]) -> AppResult<()>;

    /// Get a typed value by deserializing from JSON.
    async fn get_json<T: serde::de::DeserializeOwned + Send>(
        &self,
        key: &str,
    ) -> AppResult<Option<T>>
    where
        Self: Sized,
    {
        match self.get(key).await? {
            Some(value) => {
                let parsed = serde_json::from_str(&value)?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }
}
