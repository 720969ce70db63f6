//! # Domain Identity Newtypes
//!
//! Newtype wrappers for the registry's identifier namespaces. These prevent
//! accidental identifier confusion: you cannot pass a `UserId` where a
//! `RegionId` is expected.
//!
//! `RegionId`, `UserId` and `LogId` are opaque UUIDs. `MemberId` is the one
//! human-readable identifier in the system: it encodes the issuing
//! jurisdiction and is immutable once assigned, even across member updates
//! that move the member to another ward.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;
use crate::jurisdiction::STATE_PREFIX;

/// Unique identifier for a region node in the administrative hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegionId(pub Uuid);

/// Unique identifier for a system user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

/// Unique identifier for an audit log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogId(pub Uuid);

impl RegionId {
    /// Generate a new random region identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl UserId {
    /// Generate a new random user identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl LogId {
    /// Generate a new random log identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RegionId {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for LogId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RegionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "region:{}", self.0)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "user:{}", self.0)
    }
}

impl std::fmt::Display for LogId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "log:{}", self.0)
    }
}

/// A jurisdiction-coded member identifier.
///
/// Canonical shape: `KER-<CODE>-W<WW>-<SSSS>` where `<CODE>` is the
/// 3-letter district code, `<WW>` the zero-padded ward number and `<SSSS>`
/// the zero-padded per-(district, ward) sequence.
///
/// The identifier is assigned at registration and never regenerated, even
/// when a later update moves the member to a different district or ward.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberId(pub String);

impl MemberId {
    /// Compose a canonical member id from its parts.
    ///
    /// Ward numbers are padded to two digits and sequences to four, but
    /// larger values are rendered in full rather than truncated.
    pub fn compose(code: &str, ward_number: u32, sequence: u32) -> Self {
        Self(format!("{STATE_PREFIX}-{code}-W{ward_number:02}-{sequence:04}"))
    }

    /// Parse and validate a canonical member id.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidMemberId`] when the input does not have
    /// four dash-separated segments of the expected shapes.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        let reject = |reason: &str| CoreError::InvalidMemberId {
            value: s.to_string(),
            reason: reason.to_string(),
        };

        let parts: Vec<&str> = s.split('-').collect();
        if parts.len() != 4 {
            return Err(reject("expected four dash-separated segments"));
        }
        if parts[0] != STATE_PREFIX {
            return Err(reject("missing KER state prefix"));
        }
        if parts[1].len() != 3 || !parts[1].chars().all(|c| c.is_ascii_uppercase()) {
            return Err(reject("district code must be three uppercase letters"));
        }
        let ward = parts[2]
            .strip_prefix('W')
            .ok_or_else(|| reject("ward segment must start with W"))?;
        if ward.len() < 2 || !ward.chars().all(|c| c.is_ascii_digit()) {
            return Err(reject("ward segment must carry at least two digits"));
        }
        if parts[3].len() < 4 || !parts[3].chars().all(|c| c.is_ascii_digit()) {
            return Err(reject("sequence segment must carry at least four digits"));
        }
        Ok(Self(s.to_string()))
    }

    /// The 3-letter district code segment, when the id is canonical.
    pub fn district_code(&self) -> Option<&str> {
        self.0.split('-').nth(1).filter(|c| c.len() == 3)
    }

    /// The ward number segment, when the id is canonical.
    pub fn ward_number(&self) -> Option<u32> {
        self.0.split('-').nth(2)?.strip_prefix('W')?.parse().ok()
    }

    /// The per-(district, ward) sequence segment, when the id is canonical.
    pub fn sequence(&self) -> Option<u32> {
        self.0.split('-').nth(3)?.parse().ok()
    }

    /// The raw identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_pads_ward_and_sequence() {
        let id = MemberId::compose("KTM", 5, 1);
        assert_eq!(id.as_str(), "KER-KTM-W05-0001");
    }

    #[test]
    fn test_compose_wide_values_not_truncated() {
        let id = MemberId::compose("KTM", 104, 12345);
        assert_eq!(id.as_str(), "KER-KTM-W104-12345");
    }

    #[test]
    fn test_parse_accepts_canonical() {
        let id = MemberId::parse("KER-EKM-W12-0042").unwrap();
        assert_eq!(id.district_code(), Some("EKM"));
        assert_eq!(id.ward_number(), Some(12));
        assert_eq!(id.sequence(), Some(42));
    }

    #[test]
    fn test_parse_rejects_bad_shapes() {
        assert!(MemberId::parse("KER-EKM-W12").is_err());
        assert!(MemberId::parse("TN-EKM-W12-0042").is_err());
        assert!(MemberId::parse("KER-ekm-W12-0042").is_err());
        assert!(MemberId::parse("KER-EKML-W12-0042").is_err());
        assert!(MemberId::parse("KER-EKM-12-0042").is_err());
        assert!(MemberId::parse("KER-EKM-W1-0042").is_err());
        assert!(MemberId::parse("KER-EKM-W12-042").is_err());
        assert!(MemberId::parse("").is_err());
    }

    #[test]
    fn test_region_ids_are_distinct() {
        assert_ne!(RegionId::new(), RegionId::new());
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = MemberId::compose("TVM", 3, 7);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"KER-TVM-W03-0007\"");
        let back: MemberId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
