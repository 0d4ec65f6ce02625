//! Persistent key-value storage for the session credentials.

use std::collections::HashMap;
use std::sync::RwLock;

use thiserror::Error;

pub const TOKEN_KEY: &str = "token";
pub const USERNAME_KEY: &str = "username";
pub const ROLE_KEY: &str = "role";

/// Every key the session occupies.
pub const SESSION_KEYS: [&str; 3] = [TOKEN_KEY, USERNAME_KEY, ROLE_KEY];

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("credential storage unavailable: {0}")]
    Unavailable(String),

    #[error("credential storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("credential storage is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Key-value store holding the session credentials.
///
/// `set_all` and `remove_all` apply every entry in one call, and `get_all`
/// reads every key from one snapshot, so a reader never observes a
/// partially written session.
pub trait CredentialStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    /// One value per key, all taken from the same snapshot.
    ///
    /// The default reads key by key and is only consistent when no other
    /// thread can write in between.
    fn get_all(&self, keys: &[&str]) -> Vec<Option<String>> {
        keys.iter().map(|key| self.get(key)).collect()
    }

    fn set_all(&self, entries: &[(&str, &str)]) -> Result<(), StoreError>;

    fn remove_all(&self, keys: &[&str]) -> Result<(), StoreError>;
}

/// In-process store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.get(key).cloned()
    }

    fn get_all(&self, keys: &[&str]) -> Vec<Option<String>> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        keys.iter().map(|key| entries.get(*key).cloned()).collect()
    }

    fn set_all(&self, new_entries: &[(&str, &str)]) -> Result<(), StoreError> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        for (key, value) in new_entries {
            entries.insert((*key).to_string(), (*value).to_string());
        }
        Ok(())
    }

    fn remove_all(&self, keys: &[&str]) -> Result<(), StoreError> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        for key in keys {
            entries.remove(*key);
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileCredentialStore;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use std::collections::BTreeMap;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    use super::{CredentialStore, StoreError};

    /// JSON file store: `{app_data_dir}/libris/credentials.json` by default.
    ///
    /// Each write replaces the whole file through a temp file + rename, so a
    /// reader sees either the old map or the new one.
    #[derive(Debug)]
    pub struct FileCredentialStore {
        path: PathBuf,
        write_lock: Mutex<()>,
    }

    impl FileCredentialStore {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self {
                path: path.into(),
                write_lock: Mutex::new(()),
            }
        }

        /// Store located in the OS data directory.
        pub fn default_location() -> Result<Self, StoreError> {
            Ok(Self::new(default_path()?))
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        fn load(&self) -> Result<BTreeMap<String, String>, StoreError> {
            match std::fs::read_to_string(&self.path) {
                Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
                Ok(raw) => Ok(serde_json::from_str(&raw)?),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
                Err(e) => Err(e.into()),
            }
        }

        fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let tmp = self.path.with_extension("json.tmp");
            std::fs::write(&tmp, serde_json::to_vec_pretty(entries)?)?;
            restrict_permissions(&tmp)?;
            std::fs::rename(&tmp, &self.path)?;
            Ok(())
        }

        fn modify(&self, f: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<(), StoreError> {
            let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
            let mut entries = self.load().unwrap_or_else(|err| {
                tracing::warn!(path = ?self.path, "discarding unreadable credential file: {err}");
                BTreeMap::new()
            });
            f(&mut entries);
            self.save(&entries)
        }
    }

    impl CredentialStore for FileCredentialStore {
        fn get(&self, key: &str) -> Option<String> {
            match self.load() {
                Ok(mut entries) => entries.remove(key),
                Err(err) => {
                    tracing::warn!(path = ?self.path, "failed to read credential file: {err}");
                    None
                }
            }
        }

        fn get_all(&self, keys: &[&str]) -> Vec<Option<String>> {
            let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
            match self.load() {
                Ok(mut entries) => keys.iter().map(|key| entries.remove(*key)).collect(),
                Err(err) => {
                    tracing::warn!(path = ?self.path, "failed to read credential file: {err}");
                    vec![None; keys.len()]
                }
            }
        }

        fn set_all(&self, new_entries: &[(&str, &str)]) -> Result<(), StoreError> {
            self.modify(|entries| {
                for (key, value) in new_entries {
                    entries.insert((*key).to_string(), (*value).to_string());
                }
            })
        }

        fn remove_all(&self, keys: &[&str]) -> Result<(), StoreError> {
            self.modify(|entries| {
                for key in keys {
                    entries.remove(*key);
                }
            })
        }
    }

    fn default_path() -> Result<PathBuf, StoreError> {
        let mut dir = dirs::data_dir()
            .or_else(|| {
                dirs::home_dir().map(|mut h| {
                    h.push(".local");
                    h.push("share");
                    h
                })
            })
            .ok_or_else(|| StoreError::Unavailable("no data or home directory".to_string()))?;
        dir.push("libris");
        dir.push("credentials.json");
        Ok(dir)
    }

    #[cfg(unix)]
    fn restrict_permissions(path: &Path) -> Result<(), StoreError> {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
        Ok(())
    }

    #[cfg(not(unix))]
    fn restrict_permissions(_path: &Path) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_sets_and_removes_together() {
        let store = MemoryCredentialStore::new();
        store
            .set_all(&[(TOKEN_KEY, "abc"), (USERNAME_KEY, "alice")])
            .unwrap();
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("abc"));
        assert_eq!(store.get(USERNAME_KEY).as_deref(), Some("alice"));

        store.remove_all(&SESSION_KEYS).unwrap();
        assert_eq!(store.get(TOKEN_KEY), None);
        assert_eq!(store.get(USERNAME_KEY), None);
    }

    #[test]
    fn get_all_keeps_key_order_and_gaps() {
        let store = MemoryCredentialStore::new();
        store.set_all(&[(TOKEN_KEY, "abc"), (ROLE_KEY, "User")]).unwrap();
        assert_eq!(
            store.get_all(&SESSION_KEYS),
            vec![Some("abc".to_string()), None, Some("User".to_string())]
        );
    }

    #[test]
    fn file_store_reads_all_keys_from_one_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("credentials.json"));
        assert_eq!(store.get_all(&SESSION_KEYS), vec![None, None, None]);

        store
            .set_all(&[(TOKEN_KEY, "abc"), (USERNAME_KEY, "alice"), (ROLE_KEY, "Admin")])
            .unwrap();
        assert_eq!(
            store.get_all(&[ROLE_KEY, TOKEN_KEY]),
            vec![Some("Admin".to_string()), Some("abc".to_string())]
        );
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("credentials.json");

        let store = FileCredentialStore::new(&path);
        store
            .set_all(&[(TOKEN_KEY, "abc"), (USERNAME_KEY, "alice"), (ROLE_KEY, "Admin")])
            .unwrap();

        let reopened = FileCredentialStore::new(&path);
        assert_eq!(reopened.get(ROLE_KEY).as_deref(), Some("Admin"));

        reopened.remove_all(&SESSION_KEYS).unwrap();
        assert_eq!(store.get(TOKEN_KEY), None);
    }

    #[test]
    fn corrupt_file_reads_as_empty_and_is_replaced_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = FileCredentialStore::new(&path);
        assert_eq!(store.get(TOKEN_KEY), None);

        store.set_all(&[(TOKEN_KEY, "fresh")]).unwrap();
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("fresh"));
    }
}
