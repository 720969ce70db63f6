//! # drm-core: Foundational Types for the DRM Registry Stack
//!
//! Defines the type-system primitives shared by every other crate in the
//! workspace: identifier newtypes, the five-tier administrative region
//! model (STATE/DISTRICT/BLOCK/GRAMA/WARD), the member/user/audit-log
//! entities, the Kerala jurisdiction coding tables, and UTC timestamps.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain identifiers.** `RegionId`, `UserId`,
//!    `LogId` and the jurisdiction-coded `MemberId` are all distinct types.
//!    You cannot pass a region identifier where a user identifier is
//!    expected.
//!
//! 2. **UTC-only timestamps.** The `Timestamp` type enforces UTC with
//!    seconds precision, so snapshots serialize identically regardless of
//!    the machine's local timezone.
//!
//! 3. **Denormalized locality strings live on `Member`.** The member record
//!    carries district/block/grama/ward strings alongside its ward region
//!    id. Aggregate queries consume the stored strings directly; the store
//!    layer is responsible for keeping them consistent with the region
//!    chain.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `drm-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod error;
pub mod identity;
pub mod jurisdiction;
pub mod log;
pub mod member;
pub mod region;
pub mod temporal;
pub mod user;

// Re-export primary types for ergonomic imports.
pub use error::CoreError;
pub use identity::{LogId, MemberId, RegionId, UserId};
pub use jurisdiction::{district_code, KERALA_DISTRICTS, STATE_PREFIX};
pub use log::{ActionKind, ActivityLog, LogEntity};
pub use member::{Member, MemberDraft, MemberPatch};
pub use region::{Region, RegionLevel};
pub use temporal::Timestamp;
pub use user::{User, UserRole};
