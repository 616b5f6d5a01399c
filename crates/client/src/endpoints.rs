//! Typed wrappers around single Planka endpoints.
//!
//! Each method issues exactly one request. Methods that need a position take
//! it ready-made inside their payload; see [`crate::placement`] for the
//! helpers that compute one from a [`Placement`](planka_protocol::Placement).

use planka_protocol::payload::{
    CreateBoard, CreateCard, CreateCustomField, CreateCustomFieldGroup, CreateLabel, CreateList,
    CreateTask, CreateTaskList, MoveCards, UpdateBoard, UpdateCard, UpdateCustomField,
    UpdateCustomFieldGroup, UpdateLabel, UpdateList, UpdateTask, UpdateTaskList,
};
use planka_protocol::{
    Board, BoardDetails, Card, CardDetails, CardLabel, CustomField, CustomFieldGroup,
    CustomFieldGroupDetails, Item, Items, Label, List, ListDetails, Project, ProjectDetails, Task,
    TaskList, TaskListDetails, User,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::client::PlankaClient;
use crate::error::Result;
use crate::route::{Route, routes};

/// Public server settings returned by `api/config`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    /// Server version, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Every other setting, as sent by the server.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PlankaClient {
    async fn send_for_id<T: DeserializeOwned>(&self, route: Route, id: &str) -> Result<T> {
        self.send(route.request().param("id", id)).await
    }

    async fn patch_item<T, B>(&self, route: Route, id: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let item: Item<T> = self.send(route.request().param("id", id).json(body)?).await?;
        Ok(item.into_inner())
    }

    async fn delete_item<T: DeserializeOwned>(&self, route: Route, id: &str) -> Result<T> {
        let item: Item<T> = self.send_for_id(route, id).await?;
        Ok(item.into_inner())
    }

    async fn create_item<T, B>(
        &self,
        route: Route,
        parent: (&'static str, &str),
        body: &B,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = route.request().param(parent.0, parent.1).json(body)?;
        let item: Item<T> = self.send(request).await?;
        Ok(item.into_inner())
    }

    // Server and users

    /// Returns the current user.
    #[instrument(skip(self))]
    pub async fn me(&self) -> Result<User> {
        let user: Item<User> = self.send_for_id(routes::GET_USER, "me").await?;
        Ok(user.into_inner())
    }

    /// Returns the server's public settings.
    #[instrument(skip(self))]
    pub async fn server_config(&self) -> Result<ServerInfo> {
        let info: Item<ServerInfo> = self.send(routes::GET_CONFIG.request()).await?;
        Ok(info.into_inner())
    }

    // Projects

    /// Lists the projects visible to the current user.
    #[instrument(skip(self))]
    pub async fn projects(&self) -> Result<Vec<Project>> {
        let projects: Items<Project> = self.send(routes::GET_PROJECTS.request()).await?;
        Ok(projects.into_inner())
    }

    /// Fetches a project with its boards.
    #[instrument(skip(self))]
    pub async fn project(&self, id: &str) -> Result<ProjectDetails> {
        self.send_for_id(routes::GET_PROJECT, id).await
    }

    // Boards

    /// Fetches a board with its lists, cards, labels and custom fields.
    #[instrument(skip(self))]
    pub async fn board(&self, id: &str) -> Result<BoardDetails> {
        self.send_for_id(routes::GET_BOARD, id).await
    }

    /// Creates a board in a project.
    #[instrument(skip(self, board), fields(name = %board.name, position = board.position))]
    pub async fn create_board(&self, project_id: &str, board: &CreateBoard) -> Result<Board> {
        self.create_item(routes::CREATE_BOARD, ("projectId", project_id), board)
            .await
    }

    /// Updates a board.
    #[instrument(skip(self, update))]
    pub async fn update_board(&self, id: &str, update: &UpdateBoard) -> Result<Board> {
        self.patch_item(routes::UPDATE_BOARD, id, update).await
    }

    /// Deletes a board, returning it.
    #[instrument(skip(self))]
    pub async fn delete_board(&self, id: &str) -> Result<Board> {
        self.delete_item(routes::DELETE_BOARD, id).await
    }

    // Lists

    /// Fetches a list with its cards.
    #[instrument(skip(self))]
    pub async fn list(&self, id: &str) -> Result<ListDetails> {
        self.send_for_id(routes::GET_LIST, id).await
    }

    /// Returns the first page of cards of a list.
    ///
    /// The endpoint is paginated for endless lists. Use
    /// [`list`](Self::list) when every card is needed.
    #[instrument(skip(self))]
    pub async fn list_cards(&self, list_id: &str) -> Result<Vec<Card>> {
        let cards: Items<Card> = self
            .send(routes::GET_LIST_CARDS.request().param("listId", list_id))
            .await?;
        Ok(cards.into_inner())
    }

    /// Creates a list on a board.
    #[instrument(skip(self, list), fields(name = %list.name, position = list.position))]
    pub async fn create_list(&self, board_id: &str, list: &CreateList) -> Result<List> {
        self.create_item(routes::CREATE_LIST, ("boardId", board_id), list)
            .await
    }

    /// Updates a list.
    #[instrument(skip(self, update))]
    pub async fn update_list(&self, id: &str, update: &UpdateList) -> Result<List> {
        self.patch_item(routes::UPDATE_LIST, id, update).await
    }

    /// Deletes a list, returning it.
    #[instrument(skip(self))]
    pub async fn delete_list(&self, id: &str) -> Result<List> {
        self.delete_item(routes::DELETE_LIST, id).await
    }

    /// Asks the server to move every card of a list to another list in one
    /// request. The server decides the new positions.
    ///
    /// See [`move_cards`](Self::move_cards) for a client-side version that
    /// honors a placement.
    #[instrument(skip(self))]
    pub async fn move_list_cards(&self, list_id: &str, to_list_id: &str) -> Result<()> {
        let body = MoveCards {
            list_id: to_list_id.to_string(),
        };
        self.execute(routes::MOVE_LIST_CARDS.request().param("id", list_id).json(&body)?)
            .await?;
        Ok(())
    }

    // Cards

    /// Fetches a card with its task lists and custom fields.
    #[instrument(skip(self))]
    pub async fn card(&self, id: &str) -> Result<CardDetails> {
        self.send_for_id(routes::GET_CARD, id).await
    }

    /// Creates a card in a list.
    #[instrument(skip(self, card), fields(name = %card.name, position = card.position))]
    pub async fn create_card(&self, list_id: &str, card: &CreateCard) -> Result<Card> {
        self.create_item(routes::CREATE_CARD, ("listId", list_id), card)
            .await
    }

    /// Updates a card.
    #[instrument(skip(self, update))]
    pub async fn update_card(&self, id: &str, update: &UpdateCard) -> Result<Card> {
        self.patch_item(routes::UPDATE_CARD, id, update).await
    }

    /// Deletes a card, returning it.
    #[instrument(skip(self))]
    pub async fn delete_card(&self, id: &str) -> Result<Card> {
        self.delete_item(routes::DELETE_CARD, id).await
    }

    /// Attaches a board label to a card.
    #[instrument(skip(self))]
    pub async fn add_card_label(&self, card_id: &str, label_id: &str) -> Result<CardLabel> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body<'a> {
            label_id: &'a str,
        }

        self.create_item(routes::ADD_CARD_LABEL, ("cardId", card_id), &Body { label_id })
            .await
    }

    /// Detaches a label from a card.
    #[instrument(skip(self))]
    pub async fn remove_card_label(&self, card_id: &str, label_id: &str) -> Result<CardLabel> {
        let request = routes::REMOVE_CARD_LABEL
            .request()
            .param("cardId", card_id)
            .param("labelId", label_id);
        let item: Item<CardLabel> = self.send(request).await?;
        Ok(item.into_inner())
    }

    // Labels

    /// Creates a label on a board.
    #[instrument(skip(self, label), fields(color = %label.color, position = label.position))]
    pub async fn create_label(&self, board_id: &str, label: &CreateLabel) -> Result<Label> {
        self.create_item(routes::CREATE_LABEL, ("boardId", board_id), label)
            .await
    }

    /// Updates a label.
    #[instrument(skip(self, update))]
    pub async fn update_label(&self, id: &str, update: &UpdateLabel) -> Result<Label> {
        self.patch_item(routes::UPDATE_LABEL, id, update).await
    }

    /// Deletes a label, returning it.
    #[instrument(skip(self))]
    pub async fn delete_label(&self, id: &str) -> Result<Label> {
        self.delete_item(routes::DELETE_LABEL, id).await
    }

    // Task lists

    /// Fetches a task list with its tasks.
    #[instrument(skip(self))]
    pub async fn task_list(&self, id: &str) -> Result<TaskListDetails> {
        self.send_for_id(routes::GET_TASK_LIST, id).await
    }

    /// Creates a task list on a card.
    #[instrument(skip(self, task_list), fields(name = %task_list.name))]
    pub async fn create_task_list(
        &self,
        card_id: &str,
        task_list: &CreateTaskList,
    ) -> Result<TaskList> {
        self.create_item(routes::CREATE_TASK_LIST, ("cardId", card_id), task_list)
            .await
    }

    /// Updates a task list.
    #[instrument(skip(self, update))]
    pub async fn update_task_list(&self, id: &str, update: &UpdateTaskList) -> Result<TaskList> {
        self.patch_item(routes::UPDATE_TASK_LIST, id, update).await
    }

    /// Deletes a task list, returning it.
    #[instrument(skip(self))]
    pub async fn delete_task_list(&self, id: &str) -> Result<TaskList> {
        self.delete_item(routes::DELETE_TASK_LIST, id).await
    }

    // Tasks

    /// Creates a task in a task list.
    #[instrument(skip(self, task), fields(name = %task.name))]
    pub async fn create_task(&self, task_list_id: &str, task: &CreateTask) -> Result<Task> {
        self.create_item(routes::CREATE_TASK, ("taskListId", task_list_id), task)
            .await
    }

    /// Updates a task.
    #[instrument(skip(self, update))]
    pub async fn update_task(&self, id: &str, update: &UpdateTask) -> Result<Task> {
        self.patch_item(routes::UPDATE_TASK, id, update).await
    }

    /// Deletes a task, returning it.
    #[instrument(skip(self))]
    pub async fn delete_task(&self, id: &str) -> Result<Task> {
        self.delete_item(routes::DELETE_TASK, id).await
    }

    // Custom field groups

    /// Fetches a custom field group with its fields.
    #[instrument(skip(self))]
    pub async fn custom_field_group(&self, id: &str) -> Result<CustomFieldGroupDetails> {
        self.send_for_id(routes::GET_CUSTOM_FIELD_GROUP, id).await
    }

    /// Creates a custom field group on a board.
    #[instrument(skip(self, group))]
    pub async fn create_board_custom_field_group(
        &self,
        board_id: &str,
        group: &CreateCustomFieldGroup,
    ) -> Result<CustomFieldGroup> {
        self.create_item(
            routes::CREATE_BOARD_CUSTOM_FIELD_GROUP,
            ("boardId", board_id),
            group,
        )
        .await
    }

    /// Creates a custom field group on a card.
    #[instrument(skip(self, group))]
    pub async fn create_card_custom_field_group(
        &self,
        card_id: &str,
        group: &CreateCustomFieldGroup,
    ) -> Result<CustomFieldGroup> {
        self.create_item(
            routes::CREATE_CARD_CUSTOM_FIELD_GROUP,
            ("cardId", card_id),
            group,
        )
        .await
    }

    /// Updates a custom field group.
    #[instrument(skip(self, update))]
    pub async fn update_custom_field_group(
        &self,
        id: &str,
        update: &UpdateCustomFieldGroup,
    ) -> Result<CustomFieldGroup> {
        self.patch_item(routes::UPDATE_CUSTOM_FIELD_GROUP, id, update)
            .await
    }

    /// Deletes a custom field group, returning it.
    #[instrument(skip(self))]
    pub async fn delete_custom_field_group(&self, id: &str) -> Result<CustomFieldGroup> {
        self.delete_item(routes::DELETE_CUSTOM_FIELD_GROUP, id).await
    }

    // Custom fields

    /// Creates a custom field in a group.
    #[instrument(skip(self, field), fields(name = %field.name))]
    pub async fn create_custom_field(
        &self,
        group_id: &str,
        field: &CreateCustomField,
    ) -> Result<CustomField> {
        self.create_item(
            routes::CREATE_CUSTOM_FIELD,
            ("customFieldGroupId", group_id),
            field,
        )
        .await
    }

    /// Updates a custom field.
    #[instrument(skip(self, update))]
    pub async fn update_custom_field(
        &self,
        id: &str,
        update: &UpdateCustomField,
    ) -> Result<CustomField> {
        self.patch_item(routes::UPDATE_CUSTOM_FIELD, id, update).await
    }

    /// Deletes a custom field, returning it.
    #[instrument(skip(self))]
    pub async fn delete_custom_field(&self, id: &str) -> Result<CustomField> {
        self.delete_item(routes::DELETE_CUSTOM_FIELD, id).await
    }
}
