//! # drm-cli handler modules
//!
//! One module per subcommand group, each exposing its clap `Args` struct
//! and a `run` handler. The binary in `main.rs` owns the store and
//! dispatches here.

pub mod data;
pub mod login;
pub mod member;
pub mod region;
pub mod report;
pub mod sync;
pub mod user;

use anyhow::{bail, Result};
use drm_core::{RegionId, RegionLevel, UserId, UserRole};
use drm_registry::RegistryStore;

/// Role argument accepted on the command line.
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum RoleArg {
    /// Global access.
    Admin,
    /// Regional staff.
    Staff,
    /// Oversight role.
    Supervisor,
}

impl From<RoleArg> for UserRole {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Admin => UserRole::Admin,
            RoleArg::Staff => UserRole::Staff,
            RoleArg::Supervisor => UserRole::Supervisor,
        }
    }
}

/// Region level argument accepted on the command line.
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum LevelArg {
    /// The state root.
    State,
    /// District.
    District,
    /// Block panchayat.
    Block,
    /// Grama panchayat.
    Grama,
    /// Ward.
    Ward,
}

impl From<LevelArg> for RegionLevel {
    fn from(arg: LevelArg) -> Self {
        match arg {
            LevelArg::State => RegionLevel::State,
            LevelArg::District => RegionLevel::District,
            LevelArg::Block => RegionLevel::Block,
            LevelArg::Grama => RegionLevel::Grama,
            LevelArg::Ward => RegionLevel::Ward,
        }
    }
}

/// Resolve a username to its user id for audit attribution.
///
/// Usernames are only unique per role, so a name shared across roles is
/// ambiguous and refused rather than attributed to an arbitrary match.
pub fn resolve_acting(store: &RegistryStore, username: &str) -> Result<UserId> {
    let mut matches = store
        .users()
        .iter()
        .filter(|u| u.username.trim().eq_ignore_ascii_case(username.trim()));
    match (matches.next(), matches.next()) {
        (Some(user), None) => Ok(user.id),
        (Some(_), Some(_)) => {
            bail!("ambiguous acting user {username:?}: the name is shared across roles")
        }
        (None, _) => bail!("unknown acting user {username:?}; create it with `drm user add`"),
    }
}

/// Parse a region id argument (plain UUID).
pub fn parse_region_id(raw: &str) -> Result<RegionId> {
    match uuid::Uuid::parse_str(raw.trim()) {
        Ok(id) => Ok(RegionId(id)),
        Err(e) => bail!("invalid region id {raw:?}: {e}"),
    }
}
