//! Lists (board columns).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::custom_field::{CustomField, CustomFieldGroup};
use crate::envelope::Detailed;
use crate::position::{Position, Positioned, serde_position};
use crate::task::{Task, TaskList};

/// The kind of a list.
///
/// Every board owns exactly one archive and one trash list. Those are
/// "endless" lists without a position; only active and closed lists are
/// ordered by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ListType {
    /// A regular working list.
    #[default]
    Active,
    /// A list whose cards are considered closed.
    Closed,
    /// The board's archive.
    Archive,
    /// The board's trash.
    Trash,
}

impl ListType {
    /// Returns `true` for lists the user can order (active and closed).
    ///
    /// # Examples
    ///
    /// ```
    /// use planka_protocol::ListType;
    ///
    /// assert!(ListType::Active.is_finite());
    /// assert!(ListType::Closed.is_finite());
    /// assert!(!ListType::Archive.is_finite());
    /// ```
    #[must_use]
    pub const fn is_finite(self) -> bool {
        matches!(self, Self::Active | Self::Closed)
    }
}

/// A list (column) of a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    /// Unique identifier.
    pub id: String,
    /// Owning board.
    pub board_id: String,
    /// List kind.
    #[serde(rename = "type")]
    pub list_type: ListType,
    /// Position among the board's lists; absent for archive and trash lists.
    #[serde(default, deserialize_with = "serde_position::optional")]
    pub position: Option<Position>,
    /// Display name; absent for archive and trash lists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Accent color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Positioned for List {
    fn position(&self) -> Option<Position> {
        self.position
    }
}

/// Resources returned alongside a list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListIncluded {
    /// Cards of the list.
    pub cards: Vec<Card>,
    /// Task lists of those cards.
    pub task_lists: Vec<TaskList>,
    /// Tasks of those task lists.
    pub tasks: Vec<Task>,
    /// Custom field groups of those cards.
    pub custom_field_groups: Vec<CustomFieldGroup>,
    /// Custom fields of those groups.
    pub custom_fields: Vec<CustomField>,
}

/// A list with its cards.
pub type ListDetails = Detailed<List, ListIncluded>;
