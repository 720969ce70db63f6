//! # Slot Client
//!
//! HTTP access to the shared snapshot slot: `PUT <base>/<key>` replaces
//! the slot, `GET <base>/<key>` returns the last written payload or a
//! not-found condition. The payload is the plain four-array snapshot
//! document; nothing else travels over the wire.

use thiserror::Error;
use tracing::debug;

use drm_registry::{RemoteSnapshot, Snapshot};

/// Default slot endpoint, a plain key-value bucket. Overridable for
/// self-hosted buckets and for tests.
pub const DEFAULT_BASE_URL: &str = "https://kvdb.io/drm-registry";

/// Failures while talking to the remote slot. All of these are treated
/// as non-fatal by callers.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Transport-level failure (DNS, TLS, connect, body read).
    #[error("sync transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The slot endpoint answered with a non-success status.
    #[error("sync endpoint returned status {status}")]
    Status {
        /// The HTTP status code.
        status: u16,
    },

    /// The slot held a payload that is not a snapshot document.
    #[error("malformed slot payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Client for one slot endpoint. Cheap to clone; the key travels per
/// call so a single client serves whatever key the store is configured
/// with at the time.
#[derive(Debug, Clone)]
pub struct SlotClient {
    base_url: String,
    http: reqwest::Client,
}

impl SlotClient {
    /// Create a client against a slot endpoint base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// The configured endpoint base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn slot_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, key.trim())
    }

    /// Replace the slot's value with the full snapshot.
    pub async fn push(&self, key: &str, snapshot: &Snapshot) -> Result<(), SyncError> {
        let url = self.slot_url(key);
        debug!(%url, members = snapshot.members.len(), "pushing snapshot");
        let response = self.http.put(&url).json(snapshot).send().await?;
        if !response.status().is_success() {
            return Err(SyncError::Status {
                status: response.status().as_u16(),
            });
        }
        Ok(())
    }

    /// Fetch the slot's last written snapshot. `Ok(None)` when the slot
    /// has never been written (HTTP 404).
    pub async fn pull(&self, key: &str) -> Result<Option<RemoteSnapshot>, SyncError> {
        let url = self.slot_url(key);
        debug!(%url, "pulling snapshot");
        let response = self.http.get(&url).send().await?;
        if response.status().as_u16() == 404 {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(SyncError::Status {
                status: response.status().as_u16(),
            });
        }
        let body = response.text().await?;
        let remote: RemoteSnapshot = serde_json::from_str(&body)?;
        Ok(Some(remote))
    }
}
