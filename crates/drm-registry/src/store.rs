//! # Registry Store Operations
//!
//! `RegistryStore` is the explicit store object replacing the original
//! process-wide singleton: constructed from a `LocalStore`, passed by
//! reference to whatever serves the presentation layer. Every mutating
//! operation appends an audit entry and ends in a synchronous persist;
//! when a sync key is configured the persisted snapshot is also offered
//! to the remote sink.
//!
//! ## Error policy
//!
//! - Blocked region deletion reports `Ok(false)` with no state change.
//! - Update/delete of an absent member id is a fail-soft no-op.
//! - Malformed import documents are typed errors; state is untouched.
//! - Storage IO failures propagate.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};

use drm_core::{
    district_code, ActionKind, ActivityLog, Member, MemberDraft, MemberId, MemberPatch, LogEntity,
    Region, RegionId, RegionLevel, Timestamp, User, UserId, UserRole,
};

use crate::error::RegistryError;
use crate::hierarchy::{descendant_ids, ensure_hierarchy};
use crate::snapshot::{RemoteSnapshot, Snapshot};
use crate::storage::{LocalStore, SnapshotSink};

/// Region name reported for members whose region id dangles.
const UNRESOLVED_REGION: &str = "N/A";

/// Generate the next member identifier for a (district, ward) pair.
///
/// The sequence is the count of existing members with the same district
/// (trimmed, case-insensitive) and ward number, plus one. The count is
/// taken from a snapshot of the collection, so two writers registering
/// concurrently into the same pair can collide; single-writer operation
/// yields strictly increasing sequences.
pub fn next_member_id(members: &[Member], district: &str, ward_number: u32) -> MemberId {
    let wanted = district.trim();
    let count = members
        .iter()
        .filter(|m| m.ward_number == ward_number && m.district.trim().eq_ignore_ascii_case(wanted))
        .count() as u32;
    MemberId::compose(&district_code(district), ward_number, count + 1)
}

/// A member enriched with its resolved region, as served to read paths.
#[derive(Debug, Clone, serde::Serialize)]
pub struct JoinedMember {
    /// The member record.
    #[serde(flatten)]
    pub member: Member,
    /// Resolved region name, or `"N/A"` when the region id dangles.
    pub region_name: String,
    /// Resolved region level; `WARD` when dangling.
    pub region_level: RegionLevel,
}

/// Aggregate counters for the dashboard.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct DashboardStats {
    /// Member count (after the optional district filter).
    pub total_members: usize,
    /// Region node count.
    pub total_regions: usize,
    /// User count.
    pub total_users: usize,
    /// Mean member age, `0.0` when no members match.
    pub average_age: f64,
    /// Distinct grama panchayat names among the counted members.
    pub distinct_gramas: usize,
}

/// One name/count pair in a ranked aggregation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RegionCount {
    /// Region or district name.
    pub name: String,
    /// Members attributed to it.
    pub count: usize,
}

/// The in-memory registry, mirrored to durable storage on every mutation.
pub struct RegistryStore {
    regions: Vec<Region>,
    members: Vec<Member>,
    users: Vec<User>,
    logs: Vec<ActivityLog>,
    sync_key: Option<String>,
    disk: LocalStore,
    sink: Option<Arc<dyn SnapshotSink>>,
}

impl RegistryStore {
    /// Open the store: load persisted state, or seed the first run.
    pub fn open(disk: LocalStore) -> Result<Self, RegistryError> {
        let snapshot = match disk.load()? {
            Some(snapshot) => snapshot,
            None => {
                info!(dir = %disk.dir().display(), "first run, seeding registry");
                Snapshot::seed()
            }
        };
        let sync_key = disk.load_sync_key()?;
        Ok(Self {
            regions: snapshot.regions,
            members: snapshot.members,
            users: snapshot.users,
            logs: snapshot.logs,
            sync_key,
            disk,
            sink: None,
        })
    }

    /// Attach the remote snapshot sink. The sink is only consulted while
    /// a non-empty sync key is configured.
    pub fn with_sink(mut self, sink: Arc<dyn SnapshotSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    // ─── Write operations ────────────────────────────────────────────

    /// Register a new member: resolve the ward region (auto-creating any
    /// missing ancestors), assign the jurisdiction-coded id, stamp the
    /// creation time, log and persist.
    pub fn register_member(
        &mut self,
        draft: MemberDraft,
        acting: UserId,
    ) -> Result<Member, RegistryError> {
        let region = ensure_hierarchy(
            &mut self.regions,
            &draft.district,
            &draft.block_panchayat,
            &draft.grama_panchayat,
            draft.ward_number,
        );
        let id = next_member_id(&self.members, &draft.district, draft.ward_number);
        let member = Member {
            id: id.clone(),
            full_name: draft.full_name,
            age: draft.age,
            phone: draft.phone,
            address: draft.address,
            house_number: draft.house_number,
            district: draft.district,
            block_panchayat: draft.block_panchayat,
            grama_panchayat: draft.grama_panchayat,
            ward_number: draft.ward_number,
            region,
            created_at: Timestamp::now(),
        };
        self.members.push(member.clone());
        info!(member = %id, "registered member");
        self.append_log(
            acting,
            ActionKind::Insert,
            LogEntity::Member,
            format!("Registered member {} ({})", member.full_name, id),
        );
        self.persist()?;
        Ok(member)
    }

    /// Apply a partial update to a member. A locality change re-resolves
    /// the ward region and rewrites the denormalized strings; the member
    /// id and creation timestamp are never regenerated. Unknown ids are a
    /// silent no-op.
    pub fn update_member(
        &mut self,
        id: &MemberId,
        patch: MemberPatch,
        acting: UserId,
    ) -> Result<(), RegistryError> {
        let Some(index) = self.members.iter().position(|m| &m.id == id) else {
            debug!(member = %id, "update of unknown member ignored");
            return Ok(());
        };

        let relocate = patch.touches_locality();
        {
            let member = &mut self.members[index];
            if let Some(full_name) = patch.full_name {
                member.full_name = full_name;
            }
            if let Some(age) = patch.age {
                member.age = age;
            }
            if let Some(phone) = patch.phone {
                member.phone = phone;
            }
            if let Some(address) = patch.address {
                member.address = address;
            }
            if let Some(house_number) = patch.house_number {
                member.house_number = house_number;
            }
            if let Some(district) = patch.district {
                member.district = district;
            }
            if let Some(block) = patch.block_panchayat {
                member.block_panchayat = block;
            }
            if let Some(grama) = patch.grama_panchayat {
                member.grama_panchayat = grama;
            }
            if let Some(ward) = patch.ward_number {
                member.ward_number = ward;
            }
        }

        if relocate {
            let (district, block, grama, ward_number) = {
                let m = &self.members[index];
                (
                    m.district.clone(),
                    m.block_panchayat.clone(),
                    m.grama_panchayat.clone(),
                    m.ward_number,
                )
            };
            let region = ensure_hierarchy(&mut self.regions, &district, &block, &grama, ward_number);
            self.members[index].region = region;
        }

        info!(member = %id, relocated = relocate, "updated member");
        self.append_log(
            acting,
            ActionKind::Update,
            LogEntity::Member,
            format!("Updated member {id}"),
        );
        self.persist()
    }

    /// Remove a member if present. Absence is not an error; the DELETE
    /// entry is appended either way, matching the original engine.
    pub fn delete_member(&mut self, id: &MemberId, acting: UserId) -> Result<(), RegistryError> {
        self.members.retain(|m| &m.id != id);
        info!(member = %id, "deleted member");
        self.append_log(
            acting,
            ActionKind::Delete,
            LogEntity::Member,
            format!("Deleted member {id}"),
        );
        self.persist()
    }

    /// Create a region node explicitly.
    pub fn add_region(
        &mut self,
        name: impl Into<String>,
        level: RegionLevel,
        parent: Option<RegionId>,
        acting: UserId,
    ) -> Result<Region, RegistryError> {
        let region = Region::new(name, level, parent);
        self.regions.push(region.clone());
        self.append_log(
            acting,
            ActionKind::Insert,
            LogEntity::Region,
            format!("Created region {} ({})", region.name, region.level),
        );
        self.persist()?;
        Ok(region)
    }

    /// Delete a region, guarded by referential integrity.
    ///
    /// Returns `Ok(false)` with no change at all (no log, no persist)
    /// while any member maps to exactly this region id. Only exact
    /// matches block deletion: a district whose members all live in
    /// grandchild wards is deletable even though its subtree is
    /// populated.
    pub fn delete_region(&mut self, id: RegionId, acting: UserId) -> Result<bool, RegistryError> {
        if self.members.iter().any(|m| m.region == id) {
            debug!(region = %id, "region deletion blocked by members");
            return Ok(false);
        }
        self.regions.retain(|r| r.id != id);
        info!(region = %id, "deleted region");
        self.append_log(
            acting,
            ActionKind::Delete,
            LogEntity::Region,
            format!("Deleted region {id}"),
        );
        self.persist()?;
        Ok(true)
    }

    /// Create a system user.
    pub fn add_user(
        &mut self,
        username: impl Into<String>,
        role: UserRole,
        assigned_district: Option<RegionId>,
        acting: UserId,
    ) -> Result<User, RegistryError> {
        let user = User::new(username, role, assigned_district);
        self.users.push(user.clone());
        self.append_log(
            acting,
            ActionKind::Insert,
            LogEntity::User,
            format!("Created user {} ({})", user.username, user.role),
        );
        self.persist()?;
        Ok(user)
    }

    /// Match login credentials against the user table: trimmed,
    /// case-insensitive username plus exact role. A successful login is
    /// logged and persisted.
    pub fn authenticate(
        &mut self,
        username: &str,
        role: UserRole,
    ) -> Result<Option<User>, RegistryError> {
        let Some(user) = self
            .users
            .iter()
            .find(|u| u.matches_login(username, role))
            .cloned()
        else {
            return Ok(None);
        };
        self.append_log(
            user.id,
            ActionKind::Login,
            LogEntity::Auth,
            format!("User {} logged in as {}", user.username, user.role),
        );
        self.persist()?;
        Ok(Some(user))
    }

    // ─── Read operations ─────────────────────────────────────────────

    /// Every member joined with its resolved region name and level.
    /// Dangling region ids resolve to the `"N/A"` / `WARD` sentinel.
    ///
    /// STAFF visibility is narrowed to the subtree of the assigned
    /// district when both are supplied; other roles see everything.
    pub fn members_joined(
        &self,
        role: Option<UserRole>,
        assigned_district: Option<RegionId>,
    ) -> Vec<JoinedMember> {
        let scope = match (role, assigned_district) {
            (Some(UserRole::Staff), Some(district)) => {
                Some(descendant_ids(&self.regions, district))
            }
            _ => None,
        };
        self.members
            .iter()
            .filter(|m| scope.as_ref().map_or(true, |ids| ids.contains(&m.region)))
            .map(|m| {
                let region = self.regions.iter().find(|r| r.id == m.region);
                JoinedMember {
                    member: m.clone(),
                    region_name: region
                        .map(|r| r.name.clone())
                        .unwrap_or_else(|| UNRESOLVED_REGION.to_string()),
                    region_level: region.map(|r| r.level).unwrap_or(RegionLevel::Ward),
                }
            })
            .collect()
    }

    /// Dashboard counters, optionally narrowed to one district.
    pub fn dashboard_stats(&self, district_filter: Option<&str>) -> DashboardStats {
        let matched: Vec<&Member> = self
            .members
            .iter()
            .filter(|m| match district_filter {
                Some(filter) => m.district.trim().eq_ignore_ascii_case(filter.trim()),
                None => true,
            })
            .collect();
        let average_age = if matched.is_empty() {
            0.0
        } else {
            matched.iter().map(|m| f64::from(m.age)).sum::<f64>() / matched.len() as f64
        };
        let distinct_gramas = matched
            .iter()
            .map(|m| m.grama_panchayat.trim().to_lowercase())
            .collect::<std::collections::HashSet<_>>()
            .len();
        DashboardStats {
            total_members: matched.len(),
            total_regions: self.regions.len(),
            total_users: self.users.len(),
            average_age,
            distinct_gramas,
        }
    }

    /// Member count per region node, sorted descending by count.
    pub fn region_stats(&self) -> Vec<RegionCount> {
        let mut counts: Vec<RegionCount> = self
            .regions
            .iter()
            .map(|r| RegionCount {
                name: r.name.clone(),
                count: self.members.iter().filter(|m| m.region == r.id).count(),
            })
            .collect();
        counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        counts
    }

    /// Member count per denormalized district string, sorted descending.
    pub fn district_stats(&self) -> Vec<RegionCount> {
        let mut by_district: HashMap<String, RegionCount> = HashMap::new();
        for member in &self.members {
            let key = member.district.trim().to_lowercase();
            by_district
                .entry(key)
                .or_insert_with(|| RegionCount {
                    name: member.district.trim().to_string(),
                    count: 0,
                })
                .count += 1;
        }
        let mut counts: Vec<RegionCount> = by_district.into_values().collect();
        counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        counts
    }

    /// All region nodes.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// All members, unjoined.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// All system users.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// The audit log, newest-first.
    pub fn logs(&self) -> &[ActivityLog] {
        &self.logs
    }

    // ─── Snapshot, export/import, sync ───────────────────────────────

    /// Clone the full state into one snapshot document.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            regions: self.regions.clone(),
            members: self.members.clone(),
            users: self.users.clone(),
            logs: self.logs.clone(),
        }
    }

    /// Serialize the full state for manual backup.
    pub fn export_data(&self) -> Result<String, RegistryError> {
        serde_json::to_string_pretty(&self.snapshot()).map_err(|source| {
            RegistryError::Malformed {
                context: "export".to_string(),
                source,
            }
        })
    }

    /// Replace all state from a backup document. All four arrays are
    /// required; a document that fails to parse changes nothing.
    pub fn import_data(&mut self, json: &str) -> Result<(), RegistryError> {
        let snapshot: Snapshot =
            serde_json::from_str(json).map_err(|source| RegistryError::Malformed {
                context: "import".to_string(),
                source,
            })?;
        info!(
            members = snapshot.members.len(),
            regions = snapshot.regions.len(),
            "imported registry document"
        );
        self.replace(snapshot);
        self.persist()
    }

    /// Adopt a remote snapshot: whole-dataset replace when the payload
    /// carries a members field, rejected otherwise. The local mirror is
    /// rewritten but the snapshot is not re-offered to the sink, so a
    /// pull never echoes itself back to the slot.
    pub fn adopt_remote(&mut self, remote: RemoteSnapshot) -> Result<bool, RegistryError> {
        let Some(snapshot) = remote.into_snapshot() else {
            debug!("remote payload without members ignored");
            return Ok(false);
        };
        info!(members = snapshot.members.len(), "adopted remote snapshot");
        self.replace(snapshot);
        self.persist_local()?;
        Ok(true)
    }

    /// The configured sync key, if any.
    pub fn sync_key(&self) -> Option<&str> {
        self.sync_key.as_deref()
    }

    /// Set or clear the sync key. An empty string clears it.
    pub fn set_sync_key(&mut self, key: Option<String>) -> Result<(), RegistryError> {
        let key = key.filter(|k| !k.trim().is_empty());
        self.disk.save_sync_key(key.as_deref())?;
        self.sync_key = key;
        Ok(())
    }

    // ─── Internals ───────────────────────────────────────────────────

    fn replace(&mut self, snapshot: Snapshot) {
        self.regions = snapshot.regions;
        self.members = snapshot.members;
        self.users = snapshot.users;
        self.logs = snapshot.logs;
    }

    /// Prepend an audit entry (the log is kept newest-first).
    fn append_log(
        &mut self,
        user: UserId,
        action: ActionKind,
        entity: LogEntity,
        details: String,
    ) {
        self.logs.insert(0, ActivityLog::record(user, action, entity, details));
    }

    /// Save locally, then offer the snapshot to the sink when a sync key
    /// is configured.
    fn persist(&self) -> Result<(), RegistryError> {
        self.persist_local()?;
        if let (Some(key), Some(sink)) = (self.sync_key.as_deref(), self.sink.as_deref()) {
            sink.offer(key, &self.snapshot());
        }
        Ok(())
    }

    fn persist_local(&self) -> Result<(), RegistryError> {
        self.disk.save(&self.snapshot())
    }
}
