//! # Error Types
//!
//! Errors raised by the foundational types. All errors use `thiserror`
//! for derive-based `Display` and `Error` implementations.

use thiserror::Error;

/// Errors raised while constructing or parsing core types.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A member identifier did not match the canonical
    /// `KER-<CODE>-W<WW>-<SSSS>` shape.
    #[error("invalid member id {value:?}: {reason}")]
    InvalidMemberId {
        /// The rejected input.
        value: String,
        /// Which part of the shape was violated.
        reason: String,
    },

    /// A timestamp string could not be parsed as RFC 3339.
    #[error("invalid timestamp {value:?}: {reason}")]
    InvalidTimestamp {
        /// The rejected input.
        value: String,
        /// Underlying parse failure.
        reason: String,
    },
}
