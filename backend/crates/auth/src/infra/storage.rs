//! Session Storage Adapters
//!
//! Durable homes for the persisted `{user, profile, session}` record.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::domain::entity::session::PersistedAuth;
use crate::domain::repository::SessionStorage;
use crate::error::{AuthError, AuthResult};

// ============================================================================
// In-memory
// ============================================================================

/// Process-local storage. Holds serialized JSON so reads behave like a
/// real round trip through durable storage.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    records: Mutex<HashMap<String, String>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored JSON for a key.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.records.lock().ok()?.get(key).cloned()
    }

    /// Store raw text under a key, bypassing serialization.
    pub fn insert_raw(&self, key: &str, raw: impl Into<String>) -> AuthResult<()> {
        self.lock()?.insert(key.to_string(), raw.into());
        Ok(())
    }

    fn lock(&self) -> AuthResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.records
            .lock()
            .map_err(|_| AuthError::Storage("memory storage lock poisoned".to_string()))
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self, key: &str) -> AuthResult<Option<PersistedAuth>> {
        match self.lock()?.get(key) {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }

    fn save(&self, key: &str, record: &PersistedAuth) -> AuthResult<()> {
        let raw = serde_json::to_string(record)?;
        self.lock()?.insert(key.to_string(), raw);
        Ok(())
    }

    fn remove(&self, key: &str) -> AuthResult<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

// ============================================================================
// File-backed
// ============================================================================

/// One `{key}.json` file per record in a directory.
///
/// Writes go to a sibling temp file that is renamed over the target, so a
/// crash mid-write leaves the previous record intact.
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    dir: PathBuf,
}

impl FileSessionStorage {
    /// Use `dir`, creating it if needed.
    pub fn open(dir: impl Into<PathBuf>) -> AuthResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> AuthResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(AuthError::Storage(format!("invalid storage key: {key:?}")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self, key: &str) -> AuthResult<Option<PersistedAuth>> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str, record: &PersistedAuth) -> AuthResult<()> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");

        let bytes = serde_json::to_vec(record)?;
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(&bytes)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &path)?;

        tracing::trace!(path = %path.display(), "Persisted auth record");
        Ok(())
    }

    fn remove(&self, key: &str) -> AuthResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
