//! Typed request bodies.
//!
//! Every create, update and move request the client sends is one of these
//! structs. Optional fields are omitted from the JSON body when `None`, so a
//! partial update only touches the fields that were set.
//!
//! # Examples
//!
//! ```
//! use planka_protocol::payload::MoveCard;
//!
//! let body = MoveCard::new(100_000, "42");
//! assert_eq!(
//!     serde_json::to_value(&body).unwrap(),
//!     serde_json::json!({"position": 100000, "listId": "42"}),
//! );
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::card::CardType;
use crate::list::ListType;
use crate::position::Position;

/// Body of `POST api/projects/{projectId}/boards`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBoard {
    /// Position among the project's boards.
    pub position: Position,
    /// Display name.
    pub name: String,
}

/// Body of `POST api/boards/{boardId}/lists`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateList {
    /// List kind; only active and closed lists can be created.
    #[serde(rename = "type")]
    pub list_type: ListType,
    /// Position among the board's lists.
    pub position: Position,
    /// Display name.
    pub name: String,
}

impl CreateList {
    /// Creates the body for a new active list.
    #[must_use]
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        Self {
            list_type: ListType::Active,
            position,
            name: name.into(),
        }
    }
}

/// Body of `POST api/lists/{listId}/cards`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCard {
    /// Card kind.
    #[serde(rename = "type")]
    pub card_type: CardType,
    /// Position within the list.
    pub position: Position,
    /// Display name.
    pub name: String,
    /// Markdown description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Due date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    /// Whether the due date starts out completed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_due_completed: Option<bool>,
}

impl CreateCard {
    /// Creates the body for a new project card with only a name.
    #[must_use]
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        Self {
            card_type: CardType::Project,
            position,
            name: name.into(),
            description: None,
            due_date: None,
            is_due_completed: None,
        }
    }
}

/// Body of `POST api/boards/{boardId}/labels`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLabel {
    /// Position among the board's labels.
    pub position: Position,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Named palette color.
    pub color: String,
}

/// Body of `POST api/cards/{cardId}/task-lists`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskList {
    /// Position among the card's task lists.
    pub position: Position,
    /// Display name.
    pub name: String,
    /// Whether the list is shown on the front of the card.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_on_front_of_card: Option<bool>,
    /// Whether completed tasks are hidden.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_completed_tasks: Option<bool>,
}

/// Body of `POST api/task-lists/{taskListId}/tasks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    /// Position within the task list.
    pub position: Position,
    /// Display name.
    pub name: String,
    /// Card the task links to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_card_id: Option<String>,
    /// Whether the task starts out done.
    pub is_completed: bool,
}

/// Body of `POST api/boards/{boardId}/custom-field-groups` and
/// `POST api/cards/{cardId}/custom-field-groups`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomFieldGroup {
    /// Position among the owner's groups.
    pub position: Position,
    /// Display name; required unless a base group is given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Project-level template to instantiate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_custom_field_group_id: Option<String>,
}

/// Body of `POST api/custom-field-groups/{id}/custom-fields`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomField {
    /// Position within the group.
    pub position: Position,
    /// Display name.
    pub name: String,
    /// Whether the value is shown on the front of cards.
    pub show_on_front_of_card: bool,
}

/// Body of `PATCH api/cards/{id}` when moving a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveCard {
    /// New position within the target list.
    pub position: Position,
    /// Target list.
    pub list_id: String,
    /// Target board, when moving across boards.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board_id: Option<String>,
}

impl MoveCard {
    /// Creates the body for a move within the same board.
    #[must_use]
    pub fn new(position: Position, list_id: impl Into<String>) -> Self {
        Self {
            position,
            list_id: list_id.into(),
            board_id: None,
        }
    }

    /// Targets a list on another board.
    #[must_use]
    pub fn on_board(mut self, board_id: impl Into<String>) -> Self {
        self.board_id = Some(board_id.into());
        self
    }
}

/// Body of `PATCH api/lists/{id}` when moving a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveList {
    /// New position among the target board's lists.
    pub position: Position,
    /// Target board, when moving across boards.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board_id: Option<String>,
}

/// Body of `PATCH api/tasks/{id}` when moving a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveTask {
    /// New position within the target task list.
    pub position: Position,
    /// Target task list, when moving across task lists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_list_id: Option<String>,
}

/// Body of a PATCH that only changes an item's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reposition {
    /// New position within the current sibling group.
    pub position: Position,
}

/// Body of `POST api/lists/{listId}/move-cards`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveCards {
    /// List receiving every card.
    pub list_id: String,
}

/// Body of `POST api/cards/{id}/duplicate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateCard {
    /// Position of the copy within the original's list.
    pub position: Position,
    /// Name of the copy.
    pub name: String,
}

/// Partial update of a board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBoard {
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Partial update of a list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateList {
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New accent color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// New kind (active or closed).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub list_type: Option<ListType>,
}

/// Partial update of a card.
///
/// # Examples
///
/// ```
/// use planka_protocol::payload::UpdateCard;
///
/// let update = UpdateCard {
///     name: Some("Renamed".into()),
///     ..UpdateCard::default()
/// };
/// assert_eq!(
///     serde_json::to_string(&update).unwrap(),
///     r#"{"name":"Renamed"}"#,
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCard {
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New kind.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub card_type: Option<CardType>,
    /// New due date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    /// Marks the due date completed or not.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_due_completed: Option<bool>,
    /// Closes or reopens the card.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_closed: Option<bool>,
}

/// Partial update of a label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLabel {
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New palette color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Partial update of a task list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskList {
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Shows or hides the list on the front of the card.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_on_front_of_card: Option<bool>,
    /// Shows or hides completed tasks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_completed_tasks: Option<bool>,
}

/// Partial update of a task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTask {
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Marks the task done or not.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
    /// Assigns the task.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_user_id: Option<String>,
}

/// Partial update of a custom field group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomFieldGroup {
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Partial update of a custom field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomField {
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Shows or hides the value on the front of cards.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_on_front_of_card: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_list_sends_type() {
        let body = CreateList::new("Backlog", 65_536);
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"type": "active", "position": 65536, "name": "Backlog"})
        );
    }

    #[test]
    fn create_card_skips_unset_fields() {
        let body = CreateCard::new("Fix login", 131_072);
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"type": "project", "position": 131072, "name": "Fix login"})
        );
    }

    #[test]
    fn move_card_across_boards() {
        let body = MoveCard::new(0, "7").on_board("3");
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"position": 0, "listId": "7", "boardId": "3"})
        );
    }

    #[test]
    fn move_task_within_same_list() {
        let body = MoveTask {
            position: 65_536,
            task_list_id: None,
        };
        assert_eq!(serde_json::to_value(&body).unwrap(), json!({"position": 65536}));
    }

    #[test]
    fn empty_update_is_empty_object() {
        assert_eq!(
            serde_json::to_value(UpdateList::default()).unwrap(),
            json!({})
        );
    }
}
