//! # Background Push Sink
//!
//! Bridges the store's persist step to the remote slot. Each offer spawns
//! a detached push task so the mutation that triggered it never blocks,
//! and there is no coalescing of rapid successive offers. A push that
//! races a pull resolves by whichever response lands last (no ordering
//! token).
//!
//! Spawned tasks are tracked so a short-lived process can [`drain`] them
//! before exit; dropping the runtime without draining cancels whatever is
//! still in flight.
//!
//! [`drain`]: PushSink::drain

use std::sync::{Mutex, PoisonError};

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::warn;

use drm_registry::{Snapshot, SnapshotSink};

use crate::client::SlotClient;

/// `SnapshotSink` implementation shipping snapshots via detached tokio
/// tasks.
pub struct PushSink {
    client: SlotClient,
    handle: Handle,
    inflight: Mutex<Vec<JoinHandle<()>>>,
}

impl PushSink {
    /// Create a sink pushing through `client` on the current tokio
    /// runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime; construct the sink
    /// from async context (or use [`PushSink::with_handle`]).
    pub fn new(client: SlotClient) -> Self {
        Self::with_handle(client, Handle::current())
    }

    /// Create a sink spawning onto an explicit runtime handle.
    pub fn with_handle(client: SlotClient, handle: Handle) -> Self {
        Self {
            client,
            handle,
            inflight: Mutex::new(Vec::new()),
        }
    }

    /// Wait for every offered push to finish.
    ///
    /// One-shot processes call this before exit so the runtime is not
    /// torn down under an in-flight PUT. Failed pushes have already been
    /// logged by their task; drain only surfaces tasks that were
    /// cancelled or panicked.
    pub async fn drain(&self) {
        let pending: Vec<JoinHandle<()>> = {
            let mut inflight = self
                .inflight
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            inflight.drain(..).collect()
        };
        for task in pending {
            if let Err(e) = task.await {
                warn!(error = %e, "push task did not complete");
            }
        }
    }

    /// Number of pushes not yet known to have finished.
    pub fn pending(&self) -> usize {
        let mut inflight = self
            .inflight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        inflight.retain(|task| !task.is_finished());
        inflight.len()
    }
}

impl SnapshotSink for PushSink {
    fn offer(&self, key: &str, snapshot: &Snapshot) {
        let client = self.client.clone();
        let key = key.to_string();
        let snapshot = snapshot.clone();
        let task = self.handle.spawn(async move {
            if let Err(e) = client.push(&key, &snapshot).await {
                // Non-fatal: local state stays authoritative.
                warn!(key = %key, error = %e, "snapshot push failed");
            }
        });
        let mut inflight = self
            .inflight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        inflight.retain(|t| !t.is_finished());
        inflight.push(task);
    }
}
