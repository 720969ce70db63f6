//! # drm-sync: Remote Snapshot Mirroring
//!
//! Mirrors the full registry snapshot through one shared key-value slot,
//! addressed only by a user-chosen key. Writes replace the slot's value
//! wholesale; reads return the last written snapshot. There is no
//! authentication and no versioning: the key is the only access control,
//! and two parties sharing a key silently overwrite each other
//! (last-writer-wins by design).
//!
//! Sync failures are never fatal. Every caller treats transport errors,
//! bad statuses and malformed payloads as warnings; local state remains
//! the source of truth.

pub mod client;
pub mod sink;

pub use client::{SlotClient, SyncError, DEFAULT_BASE_URL};
pub use sink::PushSink;
