//! End-to-end flows through the registry store: registration sequencing,
//! hierarchy reuse, referential-integrity checks, backup round-trips and
//! reload from the durable mirror.

use std::sync::{Arc, Mutex};

use drm_core::{MemberDraft, MemberId, MemberPatch, RegionLevel, UserRole};
use drm_registry::{LocalStore, RegistryStore, Snapshot, SnapshotSink};

fn open_store(dir: &tempfile::TempDir) -> RegistryStore {
    let disk = LocalStore::open(dir.path()).unwrap();
    RegistryStore::open(disk).unwrap()
}

fn kumarakom_draft(name: &str, ward: u32) -> MemberDraft {
    MemberDraft {
        full_name: name.to_string(),
        age: 41,
        phone: "9447000202".to_string(),
        address: "Lake Road".to_string(),
        house_number: "H-2".to_string(),
        district: "Kottayam".to_string(),
        block_panchayat: "Vaikom Block Panchayat".to_string(),
        grama_panchayat: "Kumarakom".to_string(),
        ward_number: ward,
    }
}

#[test]
fn registered_ids_are_canonical_and_distinct() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);
    let acting = store.users()[0].id;

    let mut seen = std::collections::HashSet::new();
    for (name, district, ward) in [
        ("A", "Kottayam", 5),
        ("B", "Kottayam", 5),
        ("C", "Ernakulam", 5),
        ("D", "Wayanad", 12),
    ] {
        let mut draft = kumarakom_draft(name, ward);
        draft.district = district.to_string();
        let member = store.register_member(draft, acting).unwrap();
        MemberId::parse(member.id.as_str()).expect("canonical id");
        assert!(seen.insert(member.id.clone()), "duplicate id {}", member.id);
    }
}

#[test]
fn double_registration_reuses_ward_and_advances_sequence() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);
    let acting = store.users()[0].id;

    // Count the (Kottayam, ward 5) members the seed already carries so the
    // expected sequences continue from the pre-existing count.
    let base = store
        .members()
        .iter()
        .filter(|m| m.district == "Kottayam" && m.ward_number == 5)
        .count() as u32;

    let first = store
        .register_member(kumarakom_draft("Meera Thomas", 5), acting)
        .unwrap();
    let second = store
        .register_member(kumarakom_draft("Biju Varghese", 5), acting)
        .unwrap();

    assert_eq!(first.region, second.region);
    assert_eq!(first.id.sequence(), Some(base + 1));
    assert_eq!(second.id.sequence(), Some(base + 2));
}

#[test]
fn registration_autovivifies_missing_intermediate_regions() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);
    let acting = store.users()[0].id;
    let regions_before = store.regions().len();

    let draft = MemberDraft {
        district: "Wayanad".to_string(),
        block_panchayat: "Mananthavady Block".to_string(),
        grama_panchayat: "Thirunelly".to_string(),
        ward_number: 3,
        ..kumarakom_draft("Salim P", 3)
    };
    let member = store.register_member(draft, acting).unwrap();

    // District + block + grama + ward created under the existing state root.
    assert_eq!(store.regions().len(), regions_before + 4);
    let ward = store
        .regions()
        .iter()
        .find(|r| r.id == member.region)
        .unwrap();
    assert_eq!(ward.level, RegionLevel::Ward);
    assert_eq!(ward.name, "Ward 3");
}

#[test]
fn delete_region_is_blocked_only_by_exact_matches() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);
    let acting = store.users()[0].id;
    let member = store
        .register_member(kumarakom_draft("Leela K", 5), acting)
        .unwrap();

    assert!(!store.delete_region(member.region, acting).unwrap());

    let district = store
        .regions()
        .iter()
        .find(|r| r.level == RegionLevel::District && r.name == "Kottayam")
        .unwrap()
        .id;
    assert!(store.delete_region(district, acting).unwrap());
}

#[test]
fn export_import_reproduces_equivalent_state() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);
    let acting = store.users()[0].id;
    store
        .register_member(kumarakom_draft("Meera Thomas", 5), acting)
        .unwrap();
    let last_id = store.members().last().unwrap().id.clone();
    store
        .update_member(
            &last_id,
            MemberPatch {
                age: Some(42),
                ..Default::default()
            },
            acting,
        )
        .unwrap();

    let exported = store.export_data().unwrap();

    let dir2 = tempfile::tempdir().unwrap();
    let mut other = open_store(&dir2);
    other.import_data(&exported).unwrap();

    assert_eq!(other.export_data().unwrap(), exported);
    // Logs stay newest-first across the round-trip.
    let logs = other.logs();
    for pair in logs.windows(2) {
        assert!(pair[0].timestamp >= pair[1].timestamp);
    }
}

#[test]
fn reload_from_disk_preserves_state() {
    let dir = tempfile::tempdir().unwrap();
    let member_id;
    {
        let mut store = open_store(&dir);
        let acting = store.users()[0].id;
        member_id = store
            .register_member(kumarakom_draft("Persisted", 7), acting)
            .unwrap()
            .id;
    }
    let reopened = open_store(&dir);
    assert!(reopened.members().iter().any(|m| m.id == member_id));
    assert!(!reopened.logs().is_empty());
}

#[test]
fn staff_login_and_scoped_view() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);
    let acting = store.users()[0].id;
    store
        .register_member(kumarakom_draft("Scoped", 5), acting)
        .unwrap();
    let mut outside = kumarakom_draft("Unscoped", 1);
    outside.district = "Palakkad".to_string();
    store.register_member(outside, acting).unwrap();

    let staff = store
        .authenticate("staff_ktm", UserRole::Staff)
        .unwrap()
        .expect("seed staff user");
    let view = store.members_joined(Some(staff.role), staff.assigned_district);
    assert!(!view.is_empty());
    assert!(view.iter().all(|j| j.member.district == "Kottayam"));
}

/// Sink capturing offers, standing in for the remote push path.
#[derive(Default)]
struct RecordingSink {
    offers: Mutex<Vec<(String, usize)>>,
}

impl SnapshotSink for RecordingSink {
    fn offer(&self, key: &str, snapshot: &Snapshot) {
        self.offers
            .lock()
            .unwrap()
            .push((key.to_string(), snapshot.members.len()));
    }
}

#[test]
fn sink_is_offered_only_while_key_is_set() {
    let dir = tempfile::tempdir().unwrap();
    let sink = Arc::new(RecordingSink::default());
    let mut store = open_store(&dir).with_sink(sink.clone());
    let acting = store.users()[0].id;

    store
        .register_member(kumarakom_draft("Before key", 5), acting)
        .unwrap();
    assert!(sink.offers.lock().unwrap().is_empty());

    store.set_sync_key(Some("shared-slot".to_string())).unwrap();
    store
        .register_member(kumarakom_draft("After key", 5), acting)
        .unwrap();

    let offers = sink.offers.lock().unwrap();
    assert_eq!(offers.len(), 1);
    assert_eq!(offers[0].0, "shared-slot");
}

#[test]
fn manual_import_is_offered_to_the_sink() {
    let dir = tempfile::tempdir().unwrap();
    let sink = Arc::new(RecordingSink::default());
    let mut store = open_store(&dir).with_sink(sink.clone());
    let acting = store.users()[0].id;

    store
        .register_member(kumarakom_draft("Exported", 5), acting)
        .unwrap();
    let exported = store.export_data().unwrap();

    store.set_sync_key(Some("shared-slot".to_string())).unwrap();
    store.import_data(&exported).unwrap();

    // An import is a mutation like any other: it mirrors to the slot,
    // unlike a pull adoption which must not echo itself back.
    let offers = sink.offers.lock().unwrap();
    assert_eq!(offers.len(), 1);
    assert_eq!(offers[0].1, store.members().len());
}
