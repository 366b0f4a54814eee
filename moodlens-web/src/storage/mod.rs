//! `localStorage` backend and the browser-only keys.

use gloo_storage::{LocalStorage, Storage};
use leptos::logging;
use moodlens::api::DEFAULT_API_URL;
use moodlens::{KeyValueStore, StorageError};

// Storage keys
pub const STORAGE_API_URL: &str = "moodlens.api_url";

/// Key/value store over `window.localStorage`.
///
/// Values are stored as-is; the core already hands over JSON text.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        LocalStorage::raw().set_item(key, value).map_err(|e| {
            // Usually the quota; the UI keeps working without persistence.
            logging::warn!("localStorage write of {} failed: {:?}", key, e);
            StorageError::WriteError(format!("{:?}", e))
        })
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        LocalStorage::raw()
            .remove_item(key)
            .map_err(|e| StorageError::WriteError(format!("{:?}", e)))
    }
}

/// Saved service URL, or the default one.
pub fn load_api_url() -> String {
    read_api_url(&BrowserStorage)
}

fn read_api_url<S: KeyValueStore>(store: &S) -> String {
    store
        .get(STORAGE_API_URL)
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

pub fn save_api_url<S: KeyValueStore>(store: &mut S, url: &str) -> Result<(), StorageError> {
    store.set(STORAGE_API_URL, url)
}

/// Get current timestamp in milliseconds using js_sys::Date
pub fn now_millis() -> i64 {
    js_sys::Date::now() as i64
}
