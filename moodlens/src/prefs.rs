//! Small persisted user preferences.

use tracing::warn;

use crate::error::StorageError;
use crate::storage::KeyValueStore;

pub const DARK_MODE_KEY: &str = "darkMode";

/// Stored dark-mode choice, `None` when the user never picked one.
pub fn dark_mode<S: KeyValueStore>(storage: &S) -> Option<bool> {
    let raw = storage.get(DARK_MODE_KEY)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Ignoring unreadable dark mode preference: {}", e);
            None
        }
    }
}

pub fn set_dark_mode<S: KeyValueStore>(storage: &mut S, enabled: bool) -> Result<(), StorageError> {
    storage.set(DARK_MODE_KEY, if enabled { "true" } else { "false" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_dark_mode_roundtrip() {
        let mut storage = MemoryStorage::new();
        assert_eq!(dark_mode(&storage), None);

        set_dark_mode(&mut storage, true).unwrap();
        assert_eq!(dark_mode(&storage), Some(true));
        assert_eq!(storage.get(DARK_MODE_KEY).as_deref(), Some("true"));

        set_dark_mode(&mut storage, false).unwrap();
        assert_eq!(dark_mode(&storage), Some(false));
    }

    #[test]
    fn test_garbage_preference_ignored() {
        let mut storage = MemoryStorage::new();
        storage.set(DARK_MODE_KEY, "maybe").unwrap();
        assert_eq!(dark_mode(&storage), None);
    }
}
