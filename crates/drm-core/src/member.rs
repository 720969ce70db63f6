//! # Member Records
//!
//! A member is a tracked individual bound to exactly one WARD-level
//! region. The record carries denormalized district/block/grama/ward
//! strings alongside the ward region id; aggregate queries consume the
//! stored strings directly, and the store reconciles them with the region
//! chain on every registration and locality update.

use serde::{Deserialize, Serialize};

use crate::identity::{MemberId, RegionId};
use crate::temporal::Timestamp;

/// A registered member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// Jurisdiction-coded identifier, immutable after registration.
    pub id: MemberId,
    /// Full legal name.
    pub full_name: String,
    /// Age in years.
    pub age: u32,
    /// Contact phone number.
    pub phone: String,
    /// Street address.
    pub address: String,
    /// House number within the ward.
    pub house_number: String,
    /// Denormalized district name.
    pub district: String,
    /// Denormalized block panchayat name.
    pub block_panchayat: String,
    /// Denormalized grama panchayat name.
    pub grama_panchayat: String,
    /// Ward number within the grama panchayat.
    pub ward_number: u32,
    /// The WARD-level region this member resolves to.
    pub region: RegionId,
    /// Registration instant, immutable after creation.
    pub created_at: Timestamp,
}

/// Registration input. The store derives the id, ward region and
/// creation timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberDraft {
    /// Full legal name.
    pub full_name: String,
    /// Age in years.
    pub age: u32,
    /// Contact phone number.
    pub phone: String,
    /// Street address.
    pub address: String,
    /// House number within the ward.
    pub house_number: String,
    /// District name (free text; matched against the jurisdiction table).
    pub district: String,
    /// Block panchayat name.
    pub block_panchayat: String,
    /// Grama panchayat name.
    pub grama_panchayat: String,
    /// Ward number.
    pub ward_number: u32,
}

/// Partial member update. `None` fields are left unchanged.
///
/// Setting any of the locality fields re-resolves the ward region and
/// rewrites the denormalized strings; the member id and creation
/// timestamp are never touched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberPatch {
    /// New full name.
    pub full_name: Option<String>,
    /// New age.
    pub age: Option<u32>,
    /// New phone number.
    pub phone: Option<String>,
    /// New street address.
    pub address: Option<String>,
    /// New house number.
    pub house_number: Option<String>,
    /// New district name.
    pub district: Option<String>,
    /// New block panchayat name.
    pub block_panchayat: Option<String>,
    /// New grama panchayat name.
    pub grama_panchayat: Option<String>,
    /// New ward number.
    pub ward_number: Option<u32>,
}

impl MemberPatch {
    /// Whether any locality field is being changed.
    pub fn touches_locality(&self) -> bool {
        self.district.is_some()
            || self.block_panchayat.is_some()
            || self.grama_panchayat.is_some()
            || self.ward_number.is_some()
    }
}
