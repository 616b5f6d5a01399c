//! Boards and the resources a board detail response carries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::card::{Card, CardType};
use crate::custom_field::{CustomField, CustomFieldGroup};
use crate::envelope::Detailed;
use crate::label::Label;
use crate::list::{List, ListType};
use crate::position::{Position, Positioned, serde_position};
use crate::project::User;
use crate::task::{Task, TaskList};

/// How a board is displayed by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BoardView {
    /// Columns of cards.
    #[default]
    Kanban,
    /// Spreadsheet-like grid.
    Grid,
    /// Flat list.
    List,
}

/// A board within a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    /// Unique identifier.
    pub id: String,
    /// Owning project.
    pub project_id: String,
    /// Position among the project's boards.
    #[serde(deserialize_with = "serde_position::required")]
    pub position: Position,
    /// Display name.
    pub name: String,
    /// Default view.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_view: Option<BoardView>,
    /// Card type used for new cards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_card_type: Option<CardType>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Positioned for Board {
    fn position(&self) -> Option<Position> {
        Some(self.position)
    }
}

/// Resources returned alongside a board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoardIncluded {
    /// Every list of the board, including the archive and trash lists.
    pub lists: Vec<List>,
    /// Cards in the board's finite lists.
    pub cards: Vec<Card>,
    /// Labels defined on the board.
    pub labels: Vec<Label>,
    /// Task lists of the board's cards.
    pub task_lists: Vec<TaskList>,
    /// Tasks of the board's task lists.
    pub tasks: Vec<Task>,
    /// Custom field groups of the board and of its cards.
    pub custom_field_groups: Vec<CustomFieldGroup>,
    /// Custom fields of those groups.
    pub custom_fields: Vec<CustomField>,
    /// Board members.
    pub users: Vec<User>,
}

/// A board with its related resources.
pub type BoardDetails = Detailed<Board, BoardIncluded>;

impl BoardDetails {
    /// Returns the user-orderable lists (active and closed), sorted by position.
    ///
    /// # Examples
    ///
    /// ```
    /// use planka_protocol::dummy::dummy_board;
    ///
    /// let board = dummy_board();
    /// let names: Vec<_> = board
    ///     .finite_lists()
    ///     .iter()
    ///     .map(|l| l.name.as_deref().unwrap_or_default())
    ///     .collect();
    /// assert_eq!(names, ["Backlog", "In Progress", "Done"]);
    /// ```
    #[must_use]
    pub fn finite_lists(&self) -> Vec<&List> {
        let mut lists: Vec<&List> = self
            .included
            .lists
            .iter()
            .filter(|list| list.list_type.is_finite())
            .collect();
        crate::position::sort_by_position(&mut lists);
        lists
    }

    /// Returns the board's archive list, if the server reported one.
    #[must_use]
    pub fn archive_list(&self) -> Option<&List> {
        self.list_of_type(ListType::Archive)
    }

    /// Returns the board's trash list, if the server reported one.
    #[must_use]
    pub fn trash_list(&self) -> Option<&List> {
        self.list_of_type(ListType::Trash)
    }

    /// Returns the custom field groups attached to the board itself rather
    /// than to one of its cards.
    #[must_use]
    pub fn board_custom_field_groups(&self) -> Vec<&CustomFieldGroup> {
        self.included
            .custom_field_groups
            .iter()
            .filter(|group| group.board_id.as_deref() == Some(self.item.id.as_str()))
            .collect()
    }

    /// Returns the cards of one list, sorted by position.
    #[must_use]
    pub fn cards_in(&self, list_id: &str) -> Vec<&Card> {
        let mut cards: Vec<&Card> = self
            .included
            .cards
            .iter()
            .filter(|card| card.list_id == list_id)
            .collect();
        crate::position::sort_by_position(&mut cards);
        cards
    }

    fn list_of_type(&self, list_type: ListType) -> Option<&List> {
        self.included
            .lists
            .iter()
            .find(|list| list.list_type == list_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dummy::dummy_board;

    #[test]
    fn board_accepts_float_positions() {
        let board: Board = serde_json::from_str(
            r#"{"id": "1", "projectId": "2", "position": 65536.0, "name": "Main"}"#,
        )
        .unwrap();
        assert_eq!(board.position, 65_536);
    }

    #[test]
    fn finite_lists_skip_archive_and_trash() {
        let board = dummy_board();
        let lists = board.finite_lists();
        assert_eq!(lists.len(), 3);
        assert!(lists.iter().all(|list| list.position.is_some()));
    }

    #[test]
    fn special_lists_are_found() {
        let board = dummy_board();
        assert_eq!(board.archive_list().unwrap().list_type, ListType::Archive);
        assert_eq!(board.trash_list().unwrap().list_type, ListType::Trash);
    }

    #[test]
    fn cards_in_are_sorted() {
        let board = dummy_board();
        let backlog = board.finite_lists()[0].id.clone();
        let positions: Vec<_> = board
            .cards_in(&backlog)
            .iter()
            .map(|card| card.position)
            .collect();
        let mut sorted = positions.clone();
        sorted.sort();
        assert_eq!(positions, sorted);
        assert!(!positions.is_empty());
    }

    #[test]
    fn board_custom_field_groups_excludes_card_groups() {
        let board = dummy_board();
        let groups = board.board_custom_field_groups();
        assert_eq!(groups.len(), 1);
        assert!(groups[0].card_id.is_none());
    }
}
