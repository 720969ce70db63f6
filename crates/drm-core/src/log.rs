//! # Activity Audit Log
//!
//! Every mutating store operation and every login appends one entry.
//! The log is append-only and kept newest-first; no normal operation
//! mutates or removes entries.

use serde::{Deserialize, Serialize};

use crate::identity::{LogId, UserId};
use crate::temporal::Timestamp;

/// What kind of action was performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    /// A record was created.
    Insert,
    /// A record was modified.
    Update,
    /// A record was removed.
    Delete,
    /// A user authenticated.
    Login,
    /// A member was moved between regions.
    Transfer,
}

/// Which entity class the action touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogEntity {
    /// A member record.
    Member,
    /// A region node.
    Region,
    /// A system user.
    User,
    /// Authentication events.
    Auth,
}

/// One append-only audit entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLog {
    /// Unique log identifier.
    pub id: LogId,
    /// The acting user.
    pub user: UserId,
    /// Action kind.
    pub action: ActionKind,
    /// Entity class touched.
    pub entity: LogEntity,
    /// Free-text detail.
    pub details: String,
    /// When the action happened.
    pub timestamp: Timestamp,
}

impl ActivityLog {
    /// Create an entry stamped with the current time.
    pub fn record(
        user: UserId,
        action: ActionKind,
        entity: LogEntity,
        details: impl Into<String>,
    ) -> Self {
        Self {
            id: LogId::new(),
            user,
            action,
            entity,
            details: details.into(),
            timestamp: Timestamp::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_kind_wire_names() {
        assert_eq!(
            serde_json::to_string(&ActionKind::Insert).unwrap(),
            "\"INSERT\""
        );
        assert_eq!(
            serde_json::to_string(&ActionKind::Transfer).unwrap(),
            "\"TRANSFER\""
        );
    }

    #[test]
    fn test_entity_wire_names() {
        assert_eq!(serde_json::to_string(&LogEntity::Auth).unwrap(), "\"AUTH\"");
    }

    #[test]
    fn test_record_stamps_time_and_id() {
        let a = ActivityLog::record(UserId::new(), ActionKind::Insert, LogEntity::Member, "x");
        let b = ActivityLog::record(UserId::new(), ActionKind::Insert, LogEntity::Member, "x");
        assert_ne!(a.id, b.id);
    }
}
