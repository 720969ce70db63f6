//! # Region Hierarchy Resolver
//!
//! Walks the STATE through WARD chain for a member's locality, reusing an
//! existing same-parent sibling when its trimmed name matches
//! case-insensitively and creating the node otherwise.
//!
//! ## Invariants
//!
//! - Resolution is idempotent: identical input strings always yield the
//!   same ward region id and create no duplicate nodes.
//! - Unrelated regions are never mutated; nodes are only appended.
//! - Matching is by name only. Operator typos beyond case differences
//!   create duplicate branches; this layer does not correct them.

use std::collections::HashSet;

use drm_core::{Region, RegionId, RegionLevel};

/// Name of the single STATE root node.
pub const STATE_NAME: &str = "Kerala";

/// Resolve (creating as needed) the WARD-level region for a locality.
///
/// Returns the ward region id, created or reused. The ward node is named
/// `Ward <N>`.
pub fn ensure_hierarchy(
    regions: &mut Vec<Region>,
    district: &str,
    block: &str,
    grama: &str,
    ward_number: u32,
) -> RegionId {
    let state = find_or_create(regions, STATE_NAME, RegionLevel::State, None);
    let district = find_or_create(regions, district, RegionLevel::District, Some(state));
    let block = find_or_create(regions, block, RegionLevel::Block, Some(district));
    let grama = find_or_create(regions, grama, RegionLevel::Grama, Some(block));
    find_or_create(
        regions,
        &format!("Ward {ward_number}"),
        RegionLevel::Ward,
        Some(grama),
    )
}

/// Find a same-parent sibling at `level` whose trimmed name matches
/// case-insensitively, or append a new node.
fn find_or_create(
    regions: &mut Vec<Region>,
    name: &str,
    level: RegionLevel,
    parent: Option<RegionId>,
) -> RegionId {
    let wanted = name.trim();
    if let Some(existing) = regions
        .iter()
        .find(|r| r.level == level && r.parent == parent && r.name.trim().eq_ignore_ascii_case(wanted))
    {
        return existing.id;
    }
    let region = Region::new(wanted, level, parent);
    let id = region.id;
    regions.push(region);
    id
}

/// Collect a region and every transitive child of it.
///
/// Used to narrow STAFF visibility to the subtree of their assigned
/// district.
pub fn descendant_ids(regions: &[Region], root: RegionId) -> HashSet<RegionId> {
    let mut ids = HashSet::new();
    let mut stack = vec![root];
    while let Some(current) = stack.pop() {
        if !ids.insert(current) {
            continue;
        }
        for child in regions.iter().filter(|r| r.parent == Some(current)) {
            stack.push(child.id);
        }
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_full_chain_from_empty() {
        let mut regions = Vec::new();
        let ward = ensure_hierarchy(&mut regions, "Kottayam", "Vaikom Block Panchayat", "Kumarakom", 5);
        assert_eq!(regions.len(), 5);
        let ward_region = regions.iter().find(|r| r.id == ward).unwrap();
        assert_eq!(ward_region.level, RegionLevel::Ward);
        assert_eq!(ward_region.name, "Ward 5");
    }

    #[test]
    fn test_idempotent_for_identical_input() {
        let mut regions = Vec::new();
        let first = ensure_hierarchy(&mut regions, "Kottayam", "Vaikom Block Panchayat", "Kumarakom", 5);
        let second = ensure_hierarchy(&mut regions, "Kottayam", "Vaikom Block Panchayat", "Kumarakom", 5);
        assert_eq!(first, second);
        assert_eq!(regions.len(), 5);
    }

    #[test]
    fn test_case_and_whitespace_fold_reuses_nodes() {
        let mut regions = Vec::new();
        let first = ensure_hierarchy(&mut regions, "Kottayam", "Vaikom Block Panchayat", "Kumarakom", 5);
        let second = ensure_hierarchy(&mut regions, " KOTTAYAM ", "vaikom block panchayat", "KUMARAKOM", 5);
        assert_eq!(first, second);
        assert_eq!(regions.len(), 5);
    }

    #[test]
    fn test_alternate_spelling_creates_duplicate_branch() {
        let mut regions = Vec::new();
        ensure_hierarchy(&mut regions, "Kottayam", "Vaikom Block Panchayat", "Kumarakom", 5);
        ensure_hierarchy(&mut regions, "Kotayam", "Vaikom Block Panchayat", "Kumarakom", 5);
        // Typo district forks a whole new branch below the shared state root.
        assert_eq!(regions.len(), 9);
    }

    #[test]
    fn test_sibling_wards_share_ancestors() {
        let mut regions = Vec::new();
        let w5 = ensure_hierarchy(&mut regions, "Kottayam", "Vaikom Block Panchayat", "Kumarakom", 5);
        let w6 = ensure_hierarchy(&mut regions, "Kottayam", "Vaikom Block Panchayat", "Kumarakom", 6);
        assert_ne!(w5, w6);
        assert_eq!(regions.len(), 6);
        let w5_parent = regions.iter().find(|r| r.id == w5).unwrap().parent;
        let w6_parent = regions.iter().find(|r| r.id == w6).unwrap().parent;
        assert_eq!(w5_parent, w6_parent);
    }

    #[test]
    fn test_same_grama_name_in_other_district_is_a_new_node() {
        let mut regions = Vec::new();
        let a = ensure_hierarchy(&mut regions, "Kottayam", "Vaikom Block Panchayat", "Kumarakom", 1);
        let b = ensure_hierarchy(&mut regions, "Ernakulam", "Vaikom Block Panchayat", "Kumarakom", 1);
        // Same block/grama/ward names, different district: parents differ,
        // so nothing below the state root is shared.
        assert_ne!(a, b);
        assert_eq!(regions.len(), 9);
    }

    #[test]
    fn test_descendants_cover_the_subtree() {
        let mut regions = Vec::new();
        let ward = ensure_hierarchy(&mut regions, "Kottayam", "Vaikom Block Panchayat", "Kumarakom", 5);
        ensure_hierarchy(&mut regions, "Ernakulam", "Aluva Block", "Keezhmad", 2);
        let district = regions
            .iter()
            .find(|r| r.level == RegionLevel::District && r.name == "Kottayam")
            .unwrap()
            .id;
        let ids = descendant_ids(&regions, district);
        assert_eq!(ids.len(), 4); // district + block + grama + ward
        assert!(ids.contains(&ward));
    }

    #[test]
    fn test_descendants_of_leaf_is_itself() {
        let mut regions = Vec::new();
        let ward = ensure_hierarchy(&mut regions, "Kottayam", "Vaikom Block Panchayat", "Kumarakom", 5);
        let ids = descendant_ids(&regions, ward);
        assert_eq!(ids.len(), 1);
    }
}
