//! DOM and Web API utility functions.
//!
//! Provides safe, consistent access to browser APIs with proper error handling.

use web_sys::{Storage, Window};

/// Get the browser window object.
#[inline]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Get localStorage.
#[inline]
pub fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

/// Get sessionStorage.
#[inline]
pub fn session_storage() -> Option<Storage> {
    window()?.session_storage().ok()?
}

/// Read a localStorage value; empty values count as missing.
pub fn local_get(key: &str) -> Option<String> {
    local_storage()?
        .get_item(key)
        .ok()?
        .filter(|value| !value.trim().is_empty())
}

/// Write a localStorage value, logging when storage is unavailable.
pub fn local_set(key: &str, value: &str) {
    let stored = local_storage().is_some_and(|storage| storage.set_item(key, value).is_ok());
    if !stored {
        log::warn!("Could not persist '{}' to localStorage", key);
    }
}

pub fn local_remove(key: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(key);
    }
}
