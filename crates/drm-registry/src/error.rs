//! # Registry Error Types
//!
//! Caller-recoverable conditions (blocked region deletion, fail-soft
//! update/delete misses) are not errors; they surface as `Ok(false)` or
//! silent no-ops per the store contract. The error type covers the
//! remaining failure classes: storage IO and malformed documents.

use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by the registry store.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Reading or writing the durable local mirror failed.
    #[error("storage io error at {}: {source}", path.display())]
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },

    /// A persisted, imported or remote document failed to parse. For
    /// imports the store is left untouched.
    #[error("malformed document ({context}): {source}")]
    Malformed {
        /// Which document was being read.
        context: String,
        /// Underlying JSON failure.
        #[source]
        source: serde_json::Error,
    },
}
