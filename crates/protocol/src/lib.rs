//! Shared protocol types for the Planka client.
//!
//! This crate defines everything that can be computed or validated without a
//! network round trip: the gap-based position engine, the resource models
//! returned by a Planka server, and the typed bodies sent back to it.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`position`]: Positions, gaps, placements and the `Positioned` trait
//! - [`sibling`]: Which kinds of items are ordered under which parents
//! - [`envelope`]: `{"item": ...}` / `{"items": [...]}` response wrappers
//! - [`project`], [`board`], [`list`], [`card`], [`label`], [`task`],
//!   [`custom_field`]: Resource models
//! - [`payload`]: Request bodies for create, update and move calls
//! - [`dummy`]: Sample board snapshot for tests and examples
//! - [`error`]: Error types for protocol operations
//!
//! # Examples
//!
//! Choosing positions within a board's lists:
//!
//! ```
//! use planka_protocol::{Placement, get_position};
//! use planka_protocol::dummy::dummy_board;
//!
//! let board = dummy_board();
//! let lists = board.finite_lists();
//!
//! // A new list at the end goes one gap past the last one
//! assert_eq!(get_position(&lists, Placement::Bottom).unwrap(), 262_144);
//!
//! // Top is always zero, explicit positions pass through
//! assert_eq!(get_position(&lists, Placement::Top).unwrap(), 0);
//! assert_eq!(get_position(&lists, Placement::Exact(42)).unwrap(), 42);
//! ```

pub mod board;
pub mod card;
pub mod custom_field;
pub mod dummy;
pub mod envelope;
pub mod error;
pub mod label;
pub mod list;
pub mod payload;
pub mod position;
pub mod project;
pub mod sibling;
pub mod task;

// Re-export primary types at crate root for convenience
pub use board::{Board, BoardDetails, BoardIncluded, BoardView};
pub use card::{Card, CardDetails, CardIncluded, CardType, Stopwatch};
pub use custom_field::{
    CustomField, CustomFieldGroup, CustomFieldGroupDetails, CustomFieldGroupIncluded,
};
pub use envelope::{Detailed, Item, Items};
pub use error::{ProtocolError, Result};
pub use label::{CardLabel, LABEL_COLORS, Label, is_label_color};
pub use list::{List, ListDetails, ListIncluded, ListType};
pub use position::{
    POSITION_GAP, Placement, Position, PositionGap, Positioned, get_position, index_to_position,
    position_to_index, sort_by_position,
};
pub use project::{Project, ProjectDetails, ProjectIncluded, User, UserRole};
pub use sibling::{Parent, SiblingKind};
pub use task::{Task, TaskList, TaskListDetails, TaskListIncluded};
