//! # Administrative Region Model
//!
//! Regions form a strict five-tier tree: one STATE root, then
//! DISTRICT, BLOCK, GRAMA and WARD below it. Every non-root region's
//! parent exists and sits exactly one level above it. Members always
//! attach to a WARD-level node.
//!
//! The tree invariant is maintained by the hierarchy resolver in
//! `drm-registry`: regions are only ever created with a resolved parent
//! of the preceding level, and never re-parented.

use serde::{Deserialize, Serialize};

use crate::identity::RegionId;

/// The five administrative levels, in hierarchy order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegionLevel {
    /// The single root level.
    State,
    /// District, directly below the state.
    District,
    /// Block panchayat.
    Block,
    /// Grama panchayat.
    Grama,
    /// Ward, the finest-grained level. Members resolve here.
    Ward,
}

impl RegionLevel {
    /// The level directly below this one, if any.
    pub fn child(&self) -> Option<RegionLevel> {
        match self {
            Self::State => Some(Self::District),
            Self::District => Some(Self::Block),
            Self::Block => Some(Self::Grama),
            Self::Grama => Some(Self::Ward),
            Self::Ward => None,
        }
    }

    /// Zero-based depth below the state root.
    pub fn depth(&self) -> u8 {
        match self {
            Self::State => 0,
            Self::District => 1,
            Self::Block => 2,
            Self::Grama => 3,
            Self::Ward => 4,
        }
    }
}

impl std::fmt::Display for RegionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::State => "STATE",
            Self::District => "DISTRICT",
            Self::Block => "BLOCK",
            Self::Grama => "GRAMA",
            Self::Ward => "WARD",
        };
        f.write_str(s)
    }
}

/// A node in the administrative hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    /// Unique region identifier.
    pub id: RegionId,
    /// Human-readable name. Sibling matching is trimmed and
    /// case-insensitive; alternate spellings create duplicate branches.
    pub name: String,
    /// Which of the five tiers this node occupies.
    pub level: RegionLevel,
    /// Parent node. `None` only for the STATE root.
    pub parent: Option<RegionId>,
}

impl Region {
    /// Create a region node.
    pub fn new(name: impl Into<String>, level: RegionLevel, parent: Option<RegionId>) -> Self {
        Self {
            id: RegionId::new(),
            name: name.into(),
            level,
            parent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_chain_walks_all_five_tiers() {
        let mut level = RegionLevel::State;
        let mut seen = vec![level];
        while let Some(next) = level.child() {
            seen.push(next);
            level = next;
        }
        assert_eq!(
            seen,
            vec![
                RegionLevel::State,
                RegionLevel::District,
                RegionLevel::Block,
                RegionLevel::Grama,
                RegionLevel::Ward,
            ]
        );
    }

    #[test]
    fn test_level_ordering_follows_depth() {
        assert!(RegionLevel::State < RegionLevel::District);
        assert!(RegionLevel::Grama < RegionLevel::Ward);
        assert_eq!(RegionLevel::Ward.depth(), 4);
    }

    #[test]
    fn test_level_serializes_screaming() {
        let json = serde_json::to_string(&RegionLevel::Grama).unwrap();
        assert_eq!(json, "\"GRAMA\"");
    }

    #[test]
    fn test_display() {
        assert_eq!(RegionLevel::Ward.to_string(), "WARD");
    }
}
