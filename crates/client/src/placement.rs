//! Sibling-aware placement.
//!
//! Turns a [`Placement`] into a concrete position for a new or moved item by
//! fetching the current positions of its future siblings. Snapshots are
//! fetched fresh on every call and never cached; concurrent writers may still
//! race, and the server stays authoritative.

use planka_protocol::payload::{
    CreateBoard, CreateCard, CreateCustomField, CreateCustomFieldGroup, CreateLabel, CreateList,
    CreateTask, CreateTaskList,
};
use planka_protocol::{
    Board, Card, CustomField, CustomFieldGroup, Label, List, Parent, Placement, Position,
    Positioned, ProtocolError, SiblingKind, Task, TaskList,
};
use tracing::{debug, instrument};

use crate::client::PlankaClient;
use crate::error::Result;

fn positions<T: Positioned>(items: impl IntoIterator<Item = T>) -> Vec<Option<Position>> {
    items.into_iter().map(|item| item.position()).collect()
}

impl PlankaClient {
    /// Computes the position for an item of `kind` placed under `parent`.
    ///
    /// `Top` and `Exact` need no snapshot and return without a request;
    /// `Bottom` fetches the parent's current children first.
    ///
    /// # Errors
    ///
    /// - [`ProtocolError::InvalidParent`] if `parent` does not order items of
    ///   `kind`; nothing is sent.
    /// - Any [`ProtocolError`] from resolving the placement.
    /// - Request errors from fetching the siblings.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use planka_client::PlankaClient;
    /// use planka_protocol::{Parent, Placement, SiblingKind};
    ///
    /// # async fn example(client: PlankaClient) -> planka_client::Result<()> {
    /// let board = Parent::Board("1000".to_string());
    /// let position = client
    ///     .position_for(&board, SiblingKind::List, Placement::Bottom)
    ///     .await?;
    /// println!("new list goes at {position}");
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self), fields(gap = self.gap.get()))]
    pub async fn position_for(
        &self,
        parent: &Parent,
        kind: SiblingKind,
        placement: Placement,
    ) -> Result<Position> {
        parent.check(kind)?;

        if let Placement::Top | Placement::Exact(_) = placement {
            let none: &[Position] = &[];
            return Ok(self.gap.resolve(none, placement)?);
        }

        let siblings = self.sibling_positions(parent, kind).await?;
        let position = self.gap.resolve(&siblings, placement)?;
        debug!(siblings = siblings.len(), position, "resolved placement");
        Ok(position)
    }

    /// Fetches the positions of every `kind` item under `parent`.
    ///
    /// Only user-orderable lists count as list siblings, and only the
    /// board's own custom field groups count under a board.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidParent`] for pairs that are not
    /// ordered, or the error of the fetch.
    #[instrument(skip(self))]
    pub async fn sibling_positions(
        &self,
        parent: &Parent,
        kind: SiblingKind,
    ) -> Result<Vec<Option<Position>>> {
        let siblings = match (parent, kind) {
            (Parent::Project(id), SiblingKind::Board) => {
                positions(self.project(id).await?.included.boards)
            }
            (Parent::Board(id), SiblingKind::List) => {
                positions(self.board(id).await?.finite_lists())
            }
            (Parent::Board(id), SiblingKind::Label) => {
                positions(self.board(id).await?.included.labels)
            }
            (Parent::Board(id), SiblingKind::CustomFieldGroup) => {
                positions(self.board(id).await?.board_custom_field_groups())
            }
            (Parent::List(id), SiblingKind::Card) => positions(self.cards_of(id).await?),
            (Parent::Card(id), SiblingKind::TaskList) => {
                let card = self.card(id).await?;
                positions(
                    card.included
                        .task_lists
                        .iter()
                        .filter(|task_list| task_list.card_id == *id),
                )
            }
            (Parent::Card(id), SiblingKind::CustomFieldGroup) => {
                let card = self.card(id).await?;
                positions(
                    card.included
                        .custom_field_groups
                        .iter()
                        .filter(|group| group.card_id.as_deref() == Some(id.as_str())),
                )
            }
            (Parent::TaskList(id), SiblingKind::Task) => {
                positions(self.task_list(id).await?.included.tasks)
            }
            (Parent::CustomFieldGroup(id), SiblingKind::CustomField) => {
                positions(self.custom_field_group(id).await?.included.custom_fields)
            }
            _ => {
                return Err(ProtocolError::InvalidParent {
                    parent: parent.clone(),
                    kind,
                }
                .into());
            }
        };
        Ok(siblings)
    }

    /// Returns every card of a list, read from the list's own details.
    ///
    /// [`list_cards`](Self::list_cards) is paginated; the details always
    /// carry the whole list.
    pub(crate) async fn cards_of(&self, list_id: &str) -> Result<Vec<Card>> {
        let list = self.list(list_id).await?;
        Ok(list
            .included
            .cards
            .into_iter()
            .filter(|card| card.list_id == list_id)
            .collect())
    }

    /// Creates a board in a project at `placement`.
    ///
    /// # Errors
    ///
    /// See [`position_for`](Self::position_for) and
    /// [`create_board`](Self::create_board).
    pub async fn add_board(
        &self,
        project_id: &str,
        name: impl Into<String>,
        placement: Placement,
    ) -> Result<Board> {
        let parent = Parent::Project(project_id.to_string());
        let position = self
            .position_for(&parent, SiblingKind::Board, placement)
            .await?;
        let board = CreateBoard {
            position,
            name: name.into(),
        };
        self.create_board(project_id, &board).await
    }

    /// Creates an active list on a board at `placement`.
    ///
    /// # Errors
    ///
    /// See [`position_for`](Self::position_for) and
    /// [`create_list`](Self::create_list).
    pub async fn add_list(
        &self,
        board_id: &str,
        name: impl Into<String>,
        placement: Placement,
    ) -> Result<List> {
        let parent = Parent::Board(board_id.to_string());
        let position = self
            .position_for(&parent, SiblingKind::List, placement)
            .await?;
        self.create_list(board_id, &CreateList::new(name, position))
            .await
    }

    /// Creates a card in a list at `placement`.
    ///
    /// # Errors
    ///
    /// See [`position_for`](Self::position_for) and
    /// [`create_card`](Self::create_card).
    pub async fn add_card(
        &self,
        list_id: &str,
        name: impl Into<String>,
        placement: Placement,
    ) -> Result<Card> {
        let parent = Parent::List(list_id.to_string());
        let position = self
            .position_for(&parent, SiblingKind::Card, placement)
            .await?;
        self.create_card(list_id, &CreateCard::new(name, position))
            .await
    }

    /// Creates a label on a board at `placement`.
    ///
    /// # Errors
    ///
    /// See [`position_for`](Self::position_for) and
    /// [`create_label`](Self::create_label).
    pub async fn add_label(
        &self,
        board_id: &str,
        name: Option<String>,
        color: impl Into<String>,
        placement: Placement,
    ) -> Result<Label> {
        let parent = Parent::Board(board_id.to_string());
        let position = self
            .position_for(&parent, SiblingKind::Label, placement)
            .await?;
        let label = CreateLabel {
            position,
            name,
            color: color.into(),
        };
        self.create_label(board_id, &label).await
    }

    /// Creates a task list on a card at `placement`.
    ///
    /// # Errors
    ///
    /// See [`position_for`](Self::position_for) and
    /// [`create_task_list`](Self::create_task_list).
    pub async fn add_task_list(
        &self,
        card_id: &str,
        name: impl Into<String>,
        placement: Placement,
    ) -> Result<TaskList> {
        let parent = Parent::Card(card_id.to_string());
        let position = self
            .position_for(&parent, SiblingKind::TaskList, placement)
            .await?;
        let task_list = CreateTaskList {
            position,
            name: name.into(),
            show_on_front_of_card: None,
            hide_completed_tasks: None,
        };
        self.create_task_list(card_id, &task_list).await
    }

    /// Creates an open task in a task list at `placement`.
    ///
    /// # Errors
    ///
    /// See [`position_for`](Self::position_for) and
    /// [`create_task`](Self::create_task).
    pub async fn add_task(
        &self,
        task_list_id: &str,
        name: impl Into<String>,
        placement: Placement,
    ) -> Result<Task> {
        let parent = Parent::TaskList(task_list_id.to_string());
        let position = self
            .position_for(&parent, SiblingKind::Task, placement)
            .await?;
        let task = CreateTask {
            position,
            name: name.into(),
            linked_card_id: None,
            is_completed: false,
        };
        self.create_task(task_list_id, &task).await
    }

    /// Creates a custom field group on a board or a card at `placement`.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidParent`] if `parent` is neither a
    /// board nor a card, otherwise see [`position_for`](Self::position_for).
    pub async fn add_custom_field_group(
        &self,
        parent: &Parent,
        name: Option<String>,
        placement: Placement,
    ) -> Result<CustomFieldGroup> {
        let position = self
            .position_for(parent, SiblingKind::CustomFieldGroup, placement)
            .await?;
        let group = CreateCustomFieldGroup {
            position,
            name,
            base_custom_field_group_id: None,
        };
        match parent {
            Parent::Board(id) => self.create_board_custom_field_group(id, &group).await,
            Parent::Card(id) => self.create_card_custom_field_group(id, &group).await,
            _ => Err(ProtocolError::InvalidParent {
                parent: parent.clone(),
                kind: SiblingKind::CustomFieldGroup,
            }
            .into()),
        }
    }

    /// Creates a custom field in a group at `placement`.
    ///
    /// # Errors
    ///
    /// See [`position_for`](Self::position_for) and
    /// [`create_custom_field`](Self::create_custom_field).
    pub async fn add_custom_field(
        &self,
        group_id: &str,
        name: impl Into<String>,
        placement: Placement,
    ) -> Result<CustomField> {
        let parent = Parent::CustomFieldGroup(group_id.to_string());
        let position = self
            .position_for(&parent, SiblingKind::CustomField, placement)
            .await?;
        let field = CreateCustomField {
            position,
            name: name.into(),
            show_on_front_of_card: false,
        };
        self.create_custom_field(group_id, &field).await
    }
}
