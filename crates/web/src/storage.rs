//! Session credentials in the browser's `localStorage`.

use libris_auth::{CredentialStore, StoreError};
use web_sys::Storage;

/// Origin-scoped, survives page reloads. Holds no state of its own.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageCredentialStore;

fn storage() -> Result<Storage, StoreError> {
    web_sys::window()
        .ok_or_else(|| StoreError::Unavailable("no window".to_string()))?
        .local_storage()
        .map_err(|err| StoreError::Unavailable(format!("{err:?}")))?
        .ok_or_else(|| StoreError::Unavailable("localStorage is disabled".to_string()))
}

impl CredentialStore for LocalStorageCredentialStore {
    fn get(&self, key: &str) -> Option<String> {
        storage().ok()?.get_item(key).ok().flatten()
    }

    // The page is single-threaded, so consecutive reads see one snapshot.
    fn get_all(&self, keys: &[&str]) -> Vec<Option<String>> {
        match storage() {
            Ok(storage) => keys
                .iter()
                .map(|key| storage.get_item(key).ok().flatten())
                .collect(),
            Err(_) => vec![None; keys.len()],
        }
    }

    fn set_all(&self, entries: &[(&str, &str)]) -> Result<(), StoreError> {
        let storage = storage()?;
        for (key, value) in entries {
            storage
                .set_item(key, value)
                .map_err(|err| StoreError::Unavailable(format!("{err:?}")))?;
        }
        Ok(())
    }

    fn remove_all(&self, keys: &[&str]) -> Result<(), StoreError> {
        let storage = storage()?;
        for key in keys {
            storage
                .remove_item(key)
                .map_err(|err| StoreError::Unavailable(format!("{err:?}")))?;
        }
        Ok(())
    }
}
