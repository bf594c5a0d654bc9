//! sessionStorage cache for API responses.
//!
//! Entries live for the current browser session, so the signed-in profile
//! is fetched once per tab rather than on every navigation.

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

use super::dom;

/// Cache operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    #[error("sessionStorage not available")]
    StorageUnavailable,
    #[error("Failed to serialize cache entry: {0}")]
    SerializationFailed(String),
    #[error("Failed to write cache entry")]
    WriteFailed,
}

/// Get cached data from sessionStorage.
///
/// Returns `None` if the key doesn't exist or deserialization fails.
pub fn get<T: DeserializeOwned>(key: &str) -> Option<T> {
    let storage = dom::session_storage()?;
    let json = storage.get_item(key).ok()??;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(err) => {
            log::debug!("Ignoring unreadable cache entry '{}': {}", key, err);
            None
        }
    }
}

/// Store data in sessionStorage.
pub fn set<T: Serialize>(key: &str, data: &T) -> Result<(), CacheError> {
    let storage = dom::session_storage().ok_or(CacheError::StorageUnavailable)?;
    let json =
        serde_json::to_string(data).map_err(|e| CacheError::SerializationFailed(e.to_string()))?;
    storage
        .set_item(key, &json)
        .map_err(|_| CacheError::WriteFailed)
}

pub fn remove(key: &str) {
    if let Some(storage) = dom::session_storage() {
        let _ = storage.remove_item(key);
    }
}
