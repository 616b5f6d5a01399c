//! Sample data for tests and documentation.
//!
//! This module builds a realistic board snapshot, shaped like the response of
//! `GET api/boards/{id}`, without talking to a server.
//!
//! # Examples
//!
//! ```
//! use planka_protocol::dummy::dummy_board;
//!
//! let board = dummy_board();
//! assert_eq!(board.finite_lists().len(), 3);
//! assert_eq!(board.included.cards.len(), 6);
//! ```

use crate::board::{Board, BoardDetails, BoardIncluded, BoardView};
use crate::card::{Card, CardType};
use crate::custom_field::{CustomField, CustomFieldGroup};
use crate::envelope::Detailed;
use crate::label::Label;
use crate::list::{List, ListType};
use crate::position::{POSITION_GAP, Position};
use crate::project::{User, UserRole};
use crate::task::{Task, TaskList};

/// Identifier of the sample board.
pub const DUMMY_BOARD_ID: &str = "1000";

/// A builder for cards placed in one of the sample lists.
///
/// Keeps the fixture below readable when most fields stay at their defaults.
struct CardBuilder {
    id: &'static str,
    list_id: &'static str,
    name: &'static str,
    position: Option<Position>,
    description: Option<&'static str>,
    prev_list_id: Option<&'static str>,
    is_closed: bool,
}

impl CardBuilder {
    fn new(id: &'static str, list_id: &'static str, name: &'static str) -> Self {
        Self {
            id,
            list_id,
            name,
            position: None,
            description: None,
            prev_list_id: None,
            is_closed: false,
        }
    }

    /// Places the card at the given slot (1-based) of its list.
    fn slot(mut self, slot: Position) -> Self {
        self.position = Some(slot * POSITION_GAP);
        self
    }

    fn description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    /// Marks the card as trashed out of `prev_list_id`.
    fn trashed_from(mut self, prev_list_id: &'static str) -> Self {
        self.prev_list_id = Some(prev_list_id);
        self.position = None;
        self
    }

    fn closed(mut self) -> Self {
        self.is_closed = true;
        self
    }

    fn build(self) -> Card {
        Card {
            id: self.id.to_string(),
            board_id: DUMMY_BOARD_ID.to_string(),
            list_id: self.list_id.to_string(),
            prev_list_id: self.prev_list_id.map(str::to_string),
            card_type: CardType::Project,
            position: self.position,
            name: self.name.to_string(),
            description: self.description.map(str::to_string),
            due_date: None,
            is_due_completed: false,
            stopwatch: None,
            is_closed: self.is_closed,
            created_at: None,
            updated_at: None,
        }
    }
}

fn list(id: &str, list_type: ListType, position: Option<Position>, name: Option<&str>) -> List {
    List {
        id: id.to_string(),
        board_id: DUMMY_BOARD_ID.to_string(),
        list_type,
        position,
        name: name.map(str::to_string),
        color: None,
        created_at: None,
        updated_at: None,
    }
}

/// Generates a sample board with its lists, cards and related resources.
///
/// The snapshot holds:
///
/// - **Lists**: "Backlog", "In Progress" and "Done" (closed), plus the
///   board's archive and trash lists. The finite lists are stored out of
///   position order on purpose.
/// - **Cards**: 3 in Backlog, 1 in In Progress, 1 in Done and 1 in the trash.
/// - **Labels**: 2.
/// - **Task lists**: 1 with 2 tasks on the first Backlog card.
/// - **Custom field groups**: 1 on the board and 1 on a card, each with a
///   field.
///
/// # Examples
///
/// ```
/// use planka_protocol::dummy::dummy_board;
///
/// let board = dummy_board();
/// let backlog = board.finite_lists()[0];
/// assert_eq!(backlog.name.as_deref(), Some("Backlog"));
/// assert_eq!(board.cards_in(&backlog.id).len(), 3);
/// ```
#[must_use]
pub fn dummy_board() -> BoardDetails {
    let lists = vec![
        list("2001", ListType::Archive, None, None),
        list("2004", ListType::Closed, Some(3 * POSITION_GAP), Some("Done")),
        list("2001b", ListType::Trash, None, None),
        list("2002", ListType::Active, Some(POSITION_GAP), Some("Backlog")),
        list("2003", ListType::Active, Some(2 * POSITION_GAP), Some("In Progress")),
    ];

    // Backlog cards are listed out of order; `cards_in` sorts them.
    let cards = vec![
        CardBuilder::new("3002", "2002", "Write API documentation")
            .slot(2)
            .description("Document every public endpoint with an example.")
            .build(),
        CardBuilder::new("3001", "2002", "Set up CI pipeline")
            .slot(1)
            .build(),
        CardBuilder::new("3003", "2002", "Add config file support")
            .slot(3)
            .build(),
        CardBuilder::new("3004", "2003", "Implement bulk moves")
            .slot(1)
            .build(),
        CardBuilder::new("3005", "2004", "Initial release")
            .slot(1)
            .closed()
            .build(),
        CardBuilder::new("3006", "2001b", "Abandoned spike")
            .trashed_from("2003")
            .build(),
    ];

    let labels = vec![
        Label {
            id: "4001".to_string(),
            board_id: DUMMY_BOARD_ID.to_string(),
            position: POSITION_GAP,
            name: Some("bug".to_string()),
            color: "berry-red".to_string(),
            created_at: None,
            updated_at: None,
        },
        Label {
            id: "4002".to_string(),
            board_id: DUMMY_BOARD_ID.to_string(),
            position: 2 * POSITION_GAP,
            name: Some("docs".to_string()),
            color: "lagoon-blue".to_string(),
            created_at: None,
            updated_at: None,
        },
    ];

    let task_lists = vec![TaskList {
        id: "5001".to_string(),
        card_id: "3001".to_string(),
        position: POSITION_GAP,
        name: "Steps".to_string(),
        show_on_front_of_card: true,
        hide_completed_tasks: false,
        created_at: None,
        updated_at: None,
    }];

    let tasks = ["Run tests", "Publish artifacts"]
        .into_iter()
        .zip(1..)
        .map(|(name, slot)| Task {
            id: format!("600{slot}"),
            task_list_id: "5001".to_string(),
            linked_card_id: None,
            assignee_user_id: None,
            position: slot * POSITION_GAP,
            name: name.to_string(),
            is_completed: slot == 1,
            created_at: None,
            updated_at: None,
        })
        .collect();

    let custom_field_groups = vec![
        CustomFieldGroup {
            id: "7001".to_string(),
            board_id: Some(DUMMY_BOARD_ID.to_string()),
            card_id: None,
            base_custom_field_group_id: None,
            position: POSITION_GAP,
            name: Some("Planning".to_string()),
            created_at: None,
            updated_at: None,
        },
        CustomFieldGroup {
            id: "7002".to_string(),
            board_id: None,
            card_id: Some("3004".to_string()),
            base_custom_field_group_id: None,
            position: POSITION_GAP,
            name: Some("Review".to_string()),
            created_at: None,
            updated_at: None,
        },
    ];

    let custom_fields = vec![
        CustomField {
            id: "8001".to_string(),
            base_custom_field_group_id: None,
            custom_field_group_id: Some("7001".to_string()),
            position: POSITION_GAP,
            name: "Estimate".to_string(),
            show_on_front_of_card: true,
            created_at: None,
            updated_at: None,
        },
        CustomField {
            id: "8002".to_string(),
            base_custom_field_group_id: None,
            custom_field_group_id: Some("7002".to_string()),
            position: POSITION_GAP,
            name: "Reviewer".to_string(),
            show_on_front_of_card: false,
            created_at: None,
            updated_at: None,
        },
    ];

    let users = vec![User {
        id: "9001".to_string(),
        name: "Demo User".to_string(),
        username: Some("demo".to_string()),
        email: None,
        role: Some(UserRole::ProjectOwner),
    }];

    Detailed {
        item: Board {
            id: DUMMY_BOARD_ID.to_string(),
            project_id: "900".to_string(),
            position: POSITION_GAP,
            name: "Engineering".to_string(),
            default_view: Some(BoardView::Kanban),
            default_card_type: Some(CardType::Project),
            created_at: None,
            updated_at: None,
        },
        included: BoardIncluded {
            lists,
            cards,
            labels,
            task_lists,
            tasks,
            custom_field_groups,
            custom_fields,
            users,
        },
    }
}
