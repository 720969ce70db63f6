//! # Snapshot Model
//!
//! One document holding all four collections. The same shape serves as
//! the export/import file contract and as the remote slot payload; both
//! paths are whole-dataset replaces.
//!
//! On import all four arrays are required (all-or-nothing). A remote
//! payload is looser: it is adopted only when its `members` field is
//! present, and any other missing collection falls back to empty.

use serde::{Deserialize, Serialize};

use drm_core::{ActivityLog, Member, MemberId, Region, RegionLevel, Timestamp, User, UserRole};

/// Full registry state: the export/import document and the remote payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// Administrative hierarchy nodes.
    pub regions: Vec<Region>,
    /// Registered members.
    pub members: Vec<Member>,
    /// System users.
    pub users: Vec<User>,
    /// Audit log, newest-first.
    pub logs: Vec<ActivityLog>,
}

/// A snapshot as pulled from the remote slot. Every field is optional so
/// that a foreign or partial payload can be inspected before adoption.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteSnapshot {
    /// Administrative hierarchy nodes, if present.
    #[serde(default)]
    pub regions: Option<Vec<Region>>,
    /// Registered members, if present. Adoption is gated on this field.
    #[serde(default)]
    pub members: Option<Vec<Member>>,
    /// System users, if present.
    #[serde(default)]
    pub users: Option<Vec<User>>,
    /// Audit log, if present.
    #[serde(default)]
    pub logs: Option<Vec<ActivityLog>>,
}

impl RemoteSnapshot {
    /// Convert into a full snapshot, or `None` when the payload carries no
    /// members field and must not be adopted.
    pub fn into_snapshot(self) -> Option<Snapshot> {
        let members = self.members?;
        Some(Snapshot {
            regions: self.regions.unwrap_or_default(),
            members,
            users: self.users.unwrap_or_default(),
            logs: self.logs.unwrap_or_default(),
        })
    }
}

impl Snapshot {
    /// First-run dataset: the Kerala state root with one fully populated
    /// district chain, a demo member, and the three demo users.
    pub fn seed() -> Self {
        let state = Region::new("Kerala", RegionLevel::State, None);
        let kottayam = Region::new("Kottayam", RegionLevel::District, Some(state.id));
        let ernakulam = Region::new("Ernakulam", RegionLevel::District, Some(state.id));
        let block = Region::new(
            "Vaikom Block Panchayat",
            RegionLevel::Block,
            Some(kottayam.id),
        );
        let grama = Region::new("Kumarakom", RegionLevel::Grama, Some(block.id));
        let ward = Region::new("Ward 5", RegionLevel::Ward, Some(grama.id));

        let member = Member {
            id: MemberId::compose("KTM", 5, 1),
            full_name: "Devika Nair".to_string(),
            age: 34,
            phone: "9447000101".to_string(),
            address: "Kavanattinkara".to_string(),
            house_number: "H-101".to_string(),
            district: "Kottayam".to_string(),
            block_panchayat: "Vaikom Block Panchayat".to_string(),
            grama_panchayat: "Kumarakom".to_string(),
            ward_number: 5,
            region: ward.id,
            created_at: Timestamp::now(),
        };

        let users = vec![
            User::new("admin", UserRole::Admin, None),
            User::new("staff_ktm", UserRole::Staff, Some(kottayam.id)),
            User::new("supervisor", UserRole::Supervisor, None),
        ];

        Self {
            regions: vec![state, kottayam, ernakulam, block, grama, ward],
            members: vec![member],
            users,
            logs: Vec::new(),
        }
    }
}
