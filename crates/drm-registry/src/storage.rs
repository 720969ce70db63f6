//! # Durable Local Storage
//!
//! The stand-in for the browser's per-origin storage: a directory holding
//! four named JSON files (one per collection) plus one plaintext sync-key
//! file. Saves are synchronous; every store mutation ends here.
//!
//! The `SnapshotSink` trait is the seam between persistence and remote
//! mirroring: after a successful local save the store offers the snapshot
//! to the sink (when a sync key is configured), and the sink decides how
//! to ship it.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::RegistryError;
use crate::snapshot::Snapshot;

const REGIONS_FILE: &str = "regions.json";
const MEMBERS_FILE: &str = "members.json";
const USERS_FILE: &str = "users.json";
const LOGS_FILE: &str = "logs.json";
const SYNC_KEY_FILE: &str = "sync_key";

/// Receives the full snapshot after every persisted mutation.
///
/// Implementations must not block the caller; shipping is best-effort and
/// failures must stay on the implementor's side of the seam.
pub trait SnapshotSink: Send + Sync {
    /// Offer the current snapshot for mirroring under `key`.
    fn offer(&self, key: &str, snapshot: &Snapshot);
}

/// A directory of JSON blobs mirroring the in-memory collections.
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    /// Open (creating if needed) the storage directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, RegistryError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| RegistryError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    /// The storage directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load the persisted snapshot, or `None` on first run.
    ///
    /// Collections are loaded independently: a file that was never written
    /// falls back to empty, matching the per-key behavior of the original
    /// storage. A file that exists but fails to parse is an error.
    pub fn load(&self) -> Result<Option<Snapshot>, RegistryError> {
        let regions = self.read_collection(REGIONS_FILE)?;
        let members = self.read_collection(MEMBERS_FILE)?;
        let users = self.read_collection(USERS_FILE)?;
        let logs = self.read_collection(LOGS_FILE)?;
        match (regions, members, users, logs) {
            (None, None, None, None) => Ok(None),
            (regions, members, users, logs) => Ok(Some(Snapshot {
                regions: regions.unwrap_or_default(),
                members: members.unwrap_or_default(),
                users: users.unwrap_or_default(),
                logs: logs.unwrap_or_default(),
            })),
        }
    }

    /// Write all four collections.
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), RegistryError> {
        self.write_collection(REGIONS_FILE, &snapshot.regions)?;
        self.write_collection(MEMBERS_FILE, &snapshot.members)?;
        self.write_collection(USERS_FILE, &snapshot.users)?;
        self.write_collection(LOGS_FILE, &snapshot.logs)?;
        Ok(())
    }

    /// Read the configured sync key, if any. An empty or whitespace-only
    /// file counts as unset.
    pub fn load_sync_key(&self) -> Result<Option<String>, RegistryError> {
        let path = self.dir.join(SYNC_KEY_FILE);
        match fs::read_to_string(&path) {
            Ok(raw) => {
                let key = raw.trim().to_string();
                Ok(if key.is_empty() { None } else { Some(key) })
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(RegistryError::Io { path, source }),
        }
    }

    /// Persist or clear the sync key.
    pub fn save_sync_key(&self, key: Option<&str>) -> Result<(), RegistryError> {
        let path = self.dir.join(SYNC_KEY_FILE);
        match key {
            Some(key) => fs::write(&path, key).map_err(|source| RegistryError::Io { path, source }),
            None => match fs::remove_file(&path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                Err(source) => Err(RegistryError::Io { path, source }),
            },
        }
    }

    fn read_collection<T: serde::de::DeserializeOwned>(
        &self,
        file: &str,
    ) -> Result<Option<Vec<T>>, RegistryError> {
        let path = self.dir.join(file);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(RegistryError::Io { path, source }),
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| RegistryError::Malformed {
                context: file.to_string(),
                source,
            })
    }

    fn write_collection<T: serde::Serialize>(
        &self,
        file: &str,
        value: &[T],
    ) -> Result<(), RegistryError> {
        let path = self.dir.join(file);
        let json = serde_json::to_string_pretty(value).map_err(|source| RegistryError::Malformed {
            context: file.to_string(),
            source,
        })?;
        fs::write(&path, json).map_err(|source| RegistryError::Io { path, source })
    }
}
