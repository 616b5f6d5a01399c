//! Custom field groups and custom fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::envelope::Detailed;
use crate::position::{Position, Positioned, serde_position};

/// A group of custom fields, attached either to a board or to a single card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomFieldGroup {
    /// Unique identifier.
    pub id: String,
    /// Owning board, for board-level groups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board_id: Option<String>,
    /// Owning card, for card-level groups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_id: Option<String>,
    /// Project-level template this group was created from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_custom_field_group_id: Option<String>,
    /// Position among the owner's groups.
    #[serde(deserialize_with = "serde_position::required")]
    pub position: Position,
    /// Display name; inherited from the template when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Positioned for CustomFieldGroup {
    fn position(&self) -> Option<Position> {
        Some(self.position)
    }
}

/// A single custom field definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomField {
    /// Unique identifier.
    pub id: String,
    /// Project-level template group, if defined there.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_custom_field_group_id: Option<String>,
    /// Owning group, if defined on a board or card group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_field_group_id: Option<String>,
    /// Position within the group.
    #[serde(deserialize_with = "serde_position::required")]
    pub position: Position,
    /// Display name.
    pub name: String,
    /// Whether the value is shown on the front of cards.
    #[serde(default)]
    pub show_on_front_of_card: bool,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Positioned for CustomField {
    fn position(&self) -> Option<Position> {
        Some(self.position)
    }
}

/// Resources returned alongside a custom field group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomFieldGroupIncluded {
    /// Fields of the group.
    pub custom_fields: Vec<CustomField>,
}

/// A custom field group with its fields.
pub type CustomFieldGroupDetails = Detailed<CustomFieldGroup, CustomFieldGroupIncluded>;
