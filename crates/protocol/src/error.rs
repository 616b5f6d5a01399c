//! Error types for the planka-protocol crate.
//!
//! This module defines the local validation errors raised before any request
//! reaches the server: malformed placements, unusable sibling snapshots, and
//! parent/sibling combinations that Planka does not order.

use thiserror::Error;

use crate::position::Position;
use crate::sibling::{Parent, SiblingKind};

/// Errors that can occur during protocol operations.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// A placement token was neither `top`, `bottom` nor a non-negative integer.
    #[error("invalid placement {0:?}: expected \"top\", \"bottom\" or a non-negative integer")]
    InvalidPlacement(String),

    /// A sibling in the snapshot carries no position at all.
    #[error("sibling at index {index} has no position")]
    MissingSiblingPosition {
        /// Index of the offending sibling in the snapshot.
        index: usize,
    },

    /// A sibling in the snapshot carries a negative position.
    #[error("sibling at index {index} has negative position {position}")]
    InvalidSiblingPosition {
        /// Index of the offending sibling in the snapshot.
        index: usize,
        /// The position it reported.
        position: Position,
    },

    /// Position arithmetic would leave the `i64` range.
    #[error("position arithmetic overflowed")]
    PositionOverflow,

    /// A position gap was zero or negative.
    #[error("invalid position gap {0}: gap must be positive")]
    InvalidGap(i64),

    /// The requested sibling kind is not ordered under this parent.
    #[error("{kind} items are not ordered under {parent}")]
    InvalidParent {
        /// The parent that was supplied.
        parent: Parent,
        /// The sibling kind that was requested.
        kind: SiblingKind,
    },
}

/// A specialized Result type for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;
