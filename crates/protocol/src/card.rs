//! Cards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::custom_field::{CustomField, CustomFieldGroup};
use crate::envelope::Detailed;
use crate::position::{Position, Positioned, serde_position};
use crate::task::{Task, TaskList};

/// The kind of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CardType {
    /// A regular work item.
    #[default]
    Project,
    /// A lightweight story card.
    Story,
}

/// Time tracking attached to a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stopwatch {
    /// When the running stopwatch was started; `None` while paused.
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    /// Accumulated seconds.
    pub total: u64,
}

/// A card within a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Unique identifier.
    pub id: String,
    /// Board the card belongs to.
    pub board_id: String,
    /// List the card belongs to.
    pub list_id: String,
    /// List the card was in before being archived or trashed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev_list_id: Option<String>,
    /// Card kind.
    #[serde(rename = "type", default)]
    pub card_type: CardType,
    /// Position within the list.
    #[serde(default, deserialize_with = "serde_position::optional")]
    pub position: Option<Position>,
    /// Display name.
    pub name: String,
    /// Markdown description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Due date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    /// Whether the due date is marked completed.
    #[serde(default)]
    pub is_due_completed: bool,
    /// Time tracking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stopwatch: Option<Stopwatch>,
    /// Whether the card is closed.
    #[serde(default)]
    pub is_closed: bool,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Positioned for Card {
    fn position(&self) -> Option<Position> {
        self.position
    }
}

/// Resources returned alongside a card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CardIncluded {
    /// Task lists of the card.
    pub task_lists: Vec<TaskList>,
    /// Tasks of those task lists.
    pub tasks: Vec<Task>,
    /// Custom field groups attached to the card.
    pub custom_field_groups: Vec<CustomFieldGroup>,
    /// Custom fields of those groups.
    pub custom_fields: Vec<CustomField>,
}

/// A card with its task lists and custom fields.
pub type CardDetails = Detailed<Card, CardIncluded>;
