//! Sibling groups: which kinds of items are ordered under which parents.
//!
//! A sibling group is the set of same-kind items sharing one parent, such as
//! all lists of a board or all tasks of a task list. Positions are only
//! meaningful within one group.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ProtocolError, Result};

/// The kind of orderable item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiblingKind {
    /// Boards within a project.
    Board,
    /// Lists within a board.
    List,
    /// Cards within a list.
    Card,
    /// Labels within a board.
    Label,
    /// Task lists within a card.
    TaskList,
    /// Tasks within a task list.
    Task,
    /// Custom field groups within a board or a card.
    CustomFieldGroup,
    /// Custom fields within a custom field group.
    CustomField,
}

impl SiblingKind {
    /// Returns all sibling kinds.
    #[must_use]
    pub const fn all() -> [Self; 8] {
        [
            Self::Board,
            Self::List,
            Self::Card,
            Self::Label,
            Self::TaskList,
            Self::Task,
            Self::CustomFieldGroup,
            Self::CustomField,
        ]
    }

    /// Returns the JSON field naming this kind's parent, as sent when moving
    /// an item to a new parent.
    ///
    /// # Examples
    ///
    /// ```
    /// use planka_protocol::SiblingKind;
    ///
    /// assert_eq!(SiblingKind::Card.parent_field(), "listId");
    /// assert_eq!(SiblingKind::Task.parent_field(), "taskListId");
    /// ```
    #[must_use]
    pub const fn parent_field(self) -> &'static str {
        match self {
            Self::Board => "projectId",
            Self::List | Self::Label => "boardId",
            Self::Card => "listId",
            Self::TaskList => "cardId",
            Self::Task => "taskListId",
            Self::CustomFieldGroup => "boardId",
            Self::CustomField => "customFieldGroupId",
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Board => "board",
            Self::List => "list",
            Self::Card => "card",
            Self::Label => "label",
            Self::TaskList => "task list",
            Self::Task => "task",
            Self::CustomFieldGroup => "custom field group",
            Self::CustomField => "custom field",
        }
    }
}

impl fmt::Display for SiblingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The container whose children form a sibling group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum Parent {
    /// A project, parent of boards.
    Project(String),
    /// A board, parent of lists, labels and board-level custom field groups.
    Board(String),
    /// A list, parent of cards.
    List(String),
    /// A card, parent of task lists and card-level custom field groups.
    Card(String),
    /// A task list, parent of tasks.
    TaskList(String),
    /// A custom field group, parent of custom fields.
    CustomFieldGroup(String),
}

impl Parent {
    /// Returns the parent's identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Project(id)
            | Self::Board(id)
            | Self::List(id)
            | Self::Card(id)
            | Self::TaskList(id)
            | Self::CustomFieldGroup(id) => id,
        }
    }

    /// Returns whether items of `kind` are ordered directly under this parent.
    ///
    /// # Examples
    ///
    /// ```
    /// use planka_protocol::{Parent, SiblingKind};
    ///
    /// let board = Parent::Board("1".to_string());
    /// assert!(board.orders(SiblingKind::List));
    /// assert!(!board.orders(SiblingKind::Card));
    /// ```
    #[must_use]
    pub const fn orders(&self, kind: SiblingKind) -> bool {
        matches!(
            (self, kind),
            (Self::Project(_), SiblingKind::Board)
                | (
                    Self::Board(_),
                    SiblingKind::List | SiblingKind::Label | SiblingKind::CustomFieldGroup
                )
                | (Self::List(_), SiblingKind::Card)
                | (
                    Self::Card(_),
                    SiblingKind::TaskList | SiblingKind::CustomFieldGroup
                )
                | (Self::TaskList(_), SiblingKind::Task)
                | (Self::CustomFieldGroup(_), SiblingKind::CustomField)
        )
    }

    /// Checks that `kind` is ordered under this parent.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidParent`] otherwise.
    pub fn check(&self, kind: SiblingKind) -> Result<()> {
        if self.orders(kind) {
            Ok(())
        } else {
            Err(ProtocolError::InvalidParent {
                parent: self.clone(),
                kind,
            })
        }
    }
}

impl fmt::Display for Parent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::Project(_) => "project",
            Self::Board(_) => "board",
            Self::List(_) => "list",
            Self::Card(_) => "card",
            Self::TaskList(_) => "task list",
            Self::CustomFieldGroup(_) => "custom field group",
        };
        write!(f, "{kind} {}", self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parents() -> Vec<Parent> {
        vec![
            Parent::Project("p".to_string()),
            Parent::Board("b".to_string()),
            Parent::List("l".to_string()),
            Parent::Card("c".to_string()),
            Parent::TaskList("t".to_string()),
            Parent::CustomFieldGroup("g".to_string()),
        ]
    }

    #[test]
    fn every_kind_has_at_least_one_parent() {
        for kind in SiblingKind::all() {
            assert!(
                parents().iter().any(|parent| parent.orders(kind)),
                "{kind} has no parent"
            );
        }
    }

    #[test]
    fn only_custom_field_groups_have_two_parents() {
        for kind in SiblingKind::all() {
            let count = parents().iter().filter(|p| p.orders(kind)).count();
            let expected = if kind == SiblingKind::CustomFieldGroup {
                2
            } else {
                1
            };
            assert_eq!(count, expected, "{kind}");
        }
    }

    #[test]
    fn check_rejects_mismatched_parent() {
        let parent = Parent::TaskList("9".to_string());
        assert!(parent.check(SiblingKind::Task).is_ok());
        let err = parent.check(SiblingKind::Card).unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::InvalidParent {
                kind: SiblingKind::Card,
                ..
            }
        ));
    }

    #[test]
    fn parent_display_and_id() {
        let parent = Parent::CustomFieldGroup("77".to_string());
        assert_eq!(parent.id(), "77");
        assert_eq!(parent.to_string(), "custom field group 77");
    }

    #[test]
    fn parent_serde_is_adjacently_tagged() {
        let json = serde_json::to_string(&Parent::List("5".to_string())).unwrap();
        assert_eq!(json, r#"{"type":"list","id":"5"}"#);
    }
}
