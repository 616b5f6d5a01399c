//! Task lists and tasks (checklists on cards).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::envelope::Detailed;
use crate::position::{Position, Positioned, serde_position};

/// A checklist attached to a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskList {
    /// Unique identifier.
    pub id: String,
    /// Owning card.
    pub card_id: String,
    /// Position among the card's task lists.
    #[serde(deserialize_with = "serde_position::required")]
    pub position: Position,
    /// Display name.
    pub name: String,
    /// Whether the list is shown on the front of the card.
    #[serde(default)]
    pub show_on_front_of_card: bool,
    /// Whether completed tasks are hidden.
    #[serde(default)]
    pub hide_completed_tasks: bool,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Positioned for TaskList {
    fn position(&self) -> Option<Position> {
        Some(self.position)
    }
}

/// A single checklist item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier.
    pub id: String,
    /// Owning task list.
    pub task_list_id: String,
    /// Card this task links to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_card_id: Option<String>,
    /// Assigned user, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_user_id: Option<String>,
    /// Position within the task list.
    #[serde(deserialize_with = "serde_position::required")]
    pub position: Position,
    /// Display name.
    pub name: String,
    /// Whether the task is done.
    #[serde(default)]
    pub is_completed: bool,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Positioned for Task {
    fn position(&self) -> Option<Position> {
        Some(self.position)
    }
}

/// Resources returned alongside a task list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TaskListIncluded {
    /// Tasks of the task list.
    pub tasks: Vec<Task>,
}

/// A task list with its tasks.
pub type TaskListDetails = Detailed<TaskList, TaskListIncluded>;

impl TaskListDetails {
    /// Returns the fraction of completed tasks, or `None` for an empty list.
    ///
    /// # Examples
    ///
    /// ```
    /// use planka_protocol::TaskListDetails;
    ///
    /// let details: TaskListDetails = serde_json::from_str(r#"{
    ///     "item": {"id": "1", "cardId": "2", "position": 65536, "name": "Checks"},
    ///     "included": {"tasks": [
    ///         {"id": "a", "taskListId": "1", "position": 65536, "name": "one", "isCompleted": true},
    ///         {"id": "b", "taskListId": "1", "position": 131072, "name": "two"}
    ///     ]}
    /// }"#).unwrap();
    /// assert_eq!(details.progress(), Some(0.5));
    /// ```
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> Option<f64> {
        let tasks = &self.included.tasks;
        if tasks.is_empty() {
            return None;
        }
        let done = tasks.iter().filter(|task| task.is_completed).count();
        Some(done as f64 / tasks.len() as f64)
    }
}
