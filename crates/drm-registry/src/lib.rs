//! # drm-registry: The Registry Store
//!
//! The in-memory relational layer of the DRM Registry Stack. Four flat
//! collections (regions, members, users, audit logs) are held in memory,
//! mirrored to a durable directory of JSON files on every mutation, and
//! optionally offered to a remote snapshot sink for best-effort mirroring.
//!
//! ## Responsibilities
//!
//! - **Hierarchy maintenance** (`hierarchy`): member registration walks
//!   STATE through WARD and auto-creates any missing intermediate region.
//! - **Member ID generation** (`store::next_member_id`): jurisdiction-coded
//!   identifiers with a per-(district, ward) sequence.
//! - **Registry operations** (`store::RegistryStore`): register, update
//!   (fail-soft), delete, region deletion guarded by exact-match
//!   referential integrity, role-scoped joined reads and aggregate stats.
//! - **Persistence** (`storage::LocalStore`): four named JSON files plus a
//!   plaintext sync-key file; every mutation ends in a synchronous save.
//! - **Snapshot contract** (`snapshot`): the export/import document and
//!   the remote slot payload, whole-dataset replace on both paths.
//!
//! ## What this layer does not do
//!
//! No transactions, no concurrent-writer conflict resolution, no query
//! language, no schema migrations. Remote mirroring is last-writer-wins by
//! construction; a later-landing pull can revert newer local writes.

pub mod error;
pub mod hierarchy;
pub mod snapshot;
pub mod storage;
pub mod store;

pub use error::RegistryError;
pub use hierarchy::{descendant_ids, ensure_hierarchy};
pub use snapshot::{RemoteSnapshot, Snapshot};
pub use storage::{LocalStore, SnapshotSink};
pub use store::{next_member_id, DashboardStats, JoinedMember, RegionCount, RegistryStore};
