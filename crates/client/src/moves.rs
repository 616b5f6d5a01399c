//! Moving and reordering items.
//!
//! Every move resolves its placement against the destination parent, then
//! sends a single PATCH carrying the new position and, where the item
//! changes parent, the new parent's id. Destination legality is left to the
//! server; a rejected move surfaces as [`Error::Api`](crate::Error::Api).

use planka_protocol::payload::{DuplicateCard, MoveCard, MoveList, MoveTask, Reposition};
use planka_protocol::{
    Board, Card, CustomField, CustomFieldGroup, Item, Label, List, Parent, Placement, Position,
    PositionGap, ProtocolError, SiblingKind, Task, TaskList, sort_by_position,
};
use serde::de::DeserializeOwned;
use tokio::task::JoinSet;
use tracing::{debug, instrument, warn};

use crate::client::PlankaClient;
use crate::error::{Error, Result};
use crate::route::{Route, routes};

impl PlankaClient {
    async fn reposition<T: DeserializeOwned>(
        &self,
        route: Route,
        id: &str,
        parent: &Parent,
        kind: SiblingKind,
        placement: Placement,
    ) -> Result<T> {
        let position = self.position_for(parent, kind, placement).await?;
        let request = route.request().param("id", id).json(&Reposition { position })?;
        let item: Item<T> = self.send(request).await?;
        Ok(item.into_inner())
    }

    /// Moves a card to `list_id` at `placement`.
    ///
    /// The request body is exactly `{"position": ..., "listId": ...}`.
    ///
    /// # Errors
    ///
    /// See [`position_for`](Self::position_for); server rejections are
    /// returned unchanged.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use planka_client::PlankaClient;
    /// use planka_protocol::Placement;
    ///
    /// # async fn example(client: PlankaClient) -> planka_client::Result<()> {
    /// let card = client.move_card("3001", "2003", Placement::Bottom).await?;
    /// assert_eq!(card.list_id, "2003");
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self))]
    pub async fn move_card(
        &self,
        card_id: &str,
        list_id: &str,
        placement: Placement,
    ) -> Result<Card> {
        let parent = Parent::List(list_id.to_string());
        let position = self
            .position_for(&parent, SiblingKind::Card, placement)
            .await?;
        self.patch_card(card_id, &MoveCard::new(position, list_id))
            .await
    }

    /// Moves a card to a list on another board.
    ///
    /// # Errors
    ///
    /// See [`move_card`](Self::move_card).
    #[instrument(skip(self))]
    pub async fn move_card_to_board(
        &self,
        card_id: &str,
        board_id: &str,
        list_id: &str,
        placement: Placement,
    ) -> Result<Card> {
        let parent = Parent::List(list_id.to_string());
        let position = self
            .position_for(&parent, SiblingKind::Card, placement)
            .await?;
        self.patch_card(card_id, &MoveCard::new(position, list_id).on_board(board_id))
            .await
    }

    async fn patch_card(&self, card_id: &str, body: &MoveCard) -> Result<Card> {
        let request = routes::UPDATE_CARD
            .request()
            .param("id", card_id)
            .json(body)?;
        let card: Item<Card> = self.send(request).await?;
        Ok(card.into_inner())
    }

    /// Moves a list to `board_id` at `placement` among its finite lists.
    ///
    /// # Errors
    ///
    /// See [`position_for`](Self::position_for).
    #[instrument(skip(self))]
    pub async fn move_list(
        &self,
        list_id: &str,
        board_id: &str,
        placement: Placement,
    ) -> Result<List> {
        let parent = Parent::Board(board_id.to_string());
        let position = self
            .position_for(&parent, SiblingKind::List, placement)
            .await?;
        let body = MoveList {
            position,
            board_id: Some(board_id.to_string()),
        };
        let request = routes::UPDATE_LIST
            .request()
            .param("id", list_id)
            .json(&body)?;
        let list: Item<List> = self.send(request).await?;
        Ok(list.into_inner())
    }

    /// Moves a task to `task_list_id` at `placement`.
    ///
    /// # Errors
    ///
    /// See [`position_for`](Self::position_for).
    #[instrument(skip(self))]
    pub async fn move_task(
        &self,
        task_id: &str,
        task_list_id: &str,
        placement: Placement,
    ) -> Result<Task> {
        let parent = Parent::TaskList(task_list_id.to_string());
        let position = self
            .position_for(&parent, SiblingKind::Task, placement)
            .await?;
        let body = MoveTask {
            position,
            task_list_id: Some(task_list_id.to_string()),
        };
        let request = routes::UPDATE_TASK
            .request()
            .param("id", task_id)
            .json(&body)?;
        let task: Item<Task> = self.send(request).await?;
        Ok(task.into_inner())
    }

    /// Reorders a board within its project.
    ///
    /// # Errors
    ///
    /// See [`position_for`](Self::position_for).
    #[instrument(skip(self))]
    pub async fn reposition_board(
        &self,
        board_id: &str,
        project_id: &str,
        placement: Placement,
    ) -> Result<Board> {
        let parent = Parent::Project(project_id.to_string());
        self.reposition(routes::UPDATE_BOARD, board_id, &parent, SiblingKind::Board, placement)
            .await
    }

    /// Reorders a label within its board.
    ///
    /// # Errors
    ///
    /// See [`position_for`](Self::position_for).
    #[instrument(skip(self))]
    pub async fn reposition_label(
        &self,
        label_id: &str,
        board_id: &str,
        placement: Placement,
    ) -> Result<Label> {
        let parent = Parent::Board(board_id.to_string());
        self.reposition(routes::UPDATE_LABEL, label_id, &parent, SiblingKind::Label, placement)
            .await
    }

    /// Reorders a task list within its card.
    ///
    /// # Errors
    ///
    /// See [`position_for`](Self::position_for).
    #[instrument(skip(self))]
    pub async fn reposition_task_list(
        &self,
        task_list_id: &str,
        card_id: &str,
        placement: Placement,
    ) -> Result<TaskList> {
        let parent = Parent::Card(card_id.to_string());
        self.reposition(
            routes::UPDATE_TASK_LIST,
            task_list_id,
            &parent,
            SiblingKind::TaskList,
            placement,
        )
        .await
    }

    /// Reorders a custom field group within its board or card.
    ///
    /// # Errors
    ///
    /// See [`position_for`](Self::position_for).
    #[instrument(skip(self))]
    pub async fn reposition_custom_field_group(
        &self,
        group_id: &str,
        parent: &Parent,
        placement: Placement,
    ) -> Result<CustomFieldGroup> {
        self.reposition(
            routes::UPDATE_CUSTOM_FIELD_GROUP,
            group_id,
            parent,
            SiblingKind::CustomFieldGroup,
            placement,
        )
        .await
    }

    /// Reorders a custom field within its group.
    ///
    /// # Errors
    ///
    /// See [`position_for`](Self::position_for).
    #[instrument(skip(self))]
    pub async fn reposition_custom_field(
        &self,
        field_id: &str,
        group_id: &str,
        placement: Placement,
    ) -> Result<CustomField> {
        let parent = Parent::CustomFieldGroup(group_id.to_string());
        self.reposition(
            routes::UPDATE_CUSTOM_FIELD,
            field_id,
            &parent,
            SiblingKind::CustomField,
            placement,
        )
        .await
    }

    /// Moves every card of `from_list_id` to `to_list_id` as one block,
    /// keeping their relative order.
    ///
    /// The first card lands at `placement`. Following cards are spaced one
    /// gap apart, or closer when the block has to fit below the next card
    /// already in the target list, so it never interleaves with it.
    ///
    /// The moves run concurrently. All of them are awaited before returning;
    /// if any failed, the first error is returned and the cards that did move
    /// stay moved.
    ///
    /// Returns the moved cards sorted by their new position.
    ///
    /// # Errors
    ///
    /// - [`ProtocolError::MissingSiblingPosition`] if a source card has no
    ///   position.
    /// - [`Error::NoRoom`] if the block does not fit before the next target
    ///   card.
    /// - [`ProtocolError::PositionOverflow`] if the positions do not fit.
    /// - The first failed move.
    #[instrument(skip(self))]
    pub async fn move_cards(
        &self,
        from_list_id: &str,
        to_list_id: &str,
        placement: Placement,
    ) -> Result<Vec<Card>> {
        let mut cards = self.cards_of(from_list_id).await?;
        if cards.is_empty() {
            debug!("source list is empty");
            return Ok(Vec::new());
        }
        if let Some(index) = cards.iter().position(|card| card.position.is_none()) {
            return Err(ProtocolError::MissingSiblingPosition { index }.into());
        }
        sort_by_position(&mut cards);

        let targets: Vec<Option<Position>> = self
            .cards_of(to_list_id)
            .await?
            .into_iter()
            .filter(|target| cards.iter().all(|card| card.id != target.id))
            .map(|target| target.position)
            .collect();
        let positions = block_positions(self.gap, &targets, placement, cards.len())?;
        debug!(cards = cards.len(), targets = targets.len(), "moving card block");

        let mut moves = JoinSet::new();
        for (card, position) in cards.into_iter().zip(positions) {
            let client = self.clone();
            let body = MoveCard::new(position, to_list_id);
            moves.spawn(async move { client.patch_card(&card.id, &body).await });
        }

        let mut moved = Vec::with_capacity(moves.len());
        let mut first_error = None;
        while let Some(joined) = moves.join_next().await {
            match joined.map_err(Error::from).and_then(|result| result) {
                Ok(card) => moved.push(card),
                Err(err) => {
                    warn!(error = %err, "card move failed");
                    first_error.get_or_insert(err);
                }
            }
        }

        if let Some(err) = first_error {
            return Err(err);
        }
        sort_by_position(&mut moved);
        Ok(moved)
    }

    /// Duplicates a card within its list at `placement`.
    ///
    /// The copy keeps the original name unless `name` is given.
    ///
    /// # Errors
    ///
    /// Request errors from fetching the card or its siblings, or from the
    /// duplication itself.
    #[instrument(skip(self))]
    pub async fn duplicate_card(
        &self,
        card_id: &str,
        placement: Placement,
        name: Option<String>,
    ) -> Result<Card> {
        let card = self.card(card_id).await?.item;
        let parent = Parent::List(card.list_id);
        let position = self
            .position_for(&parent, SiblingKind::Card, placement)
            .await?;
        let body = DuplicateCard {
            position,
            name: name.unwrap_or(card.name),
        };
        let request = routes::DUPLICATE_CARD
            .request()
            .param("id", card_id)
            .json(&body)?;
        let copy: Item<Card> = self.send(request).await?;
        Ok(copy.into_inner())
    }

    /// Moves an archived or trashed card back to the list it came from.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotRestorable`] if the card does not remember a
    /// previous list, otherwise see [`move_card`](Self::move_card).
    #[instrument(skip(self))]
    pub async fn restore_card(&self, card_id: &str, placement: Placement) -> Result<Card> {
        let card = self.card(card_id).await?.item;
        let prev_list_id = card.prev_list_id.ok_or_else(|| Error::NotRestorable {
            card_id: card_id.to_string(),
        })?;
        self.move_card(card_id, &prev_list_id, placement).await
    }
}

/// Returns `count` positions for a block of items placed in `targets`.
///
/// The block starts at `placement` and steps by one gap. When an existing
/// target sits after the start, the step shrinks so the whole block stays
/// below it.
fn block_positions(
    gap: PositionGap,
    targets: &[Option<Position>],
    placement: Placement,
    count: usize,
) -> Result<Vec<Position>> {
    let first = gap.resolve(targets, placement)?;
    let next = targets
        .iter()
        .flatten()
        .copied()
        .filter(|&position| position > first)
        .min();
    let len = i64::try_from(count).map_err(|_| ProtocolError::PositionOverflow)?;

    let step = match next {
        Some(before) => {
            let step = gap.get().min((before - first) / len.max(1));
            if step == 0 && count > 1 {
                return Err(Error::NoRoom {
                    count,
                    after: first,
                    before,
                });
            }
            step
        }
        None => gap.get(),
    };

    (0..len)
        .map(|offset| {
            step.checked_mul(offset)
                .and_then(|delta| first.checked_add(delta))
                .ok_or(Error::Protocol(ProtocolError::PositionOverflow))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use planka_protocol::POSITION_GAP;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> PlankaClient {
        PlankaClient::builder(server.uri()).build().unwrap()
    }

    fn card(id: &str, list_id: &str, position: Option<Position>) -> serde_json::Value {
        json!({
            "id": id,
            "boardId": "1000",
            "listId": list_id,
            "type": "project",
            "position": position,
            "name": format!("Card {id}")
        })
    }

    fn list(id: &str, cards: &[serde_json::Value]) -> serde_json::Value {
        json!({
            "item": {"id": id, "boardId": "1000", "type": "active", "position": 65536, "name": id},
            "included": {"cards": cards}
        })
    }

    #[tokio::test]
    async fn move_card_with_exact_position_sends_exact_body() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/api/cards/3001"))
            .and(body_json(json!({"position": 100000, "listId": "2003"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"item": card("3001", "2003", Some(100_000))})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let moved = client(&server)
            .move_card("3001", "2003", Placement::Exact(100_000))
            .await
            .unwrap();
        assert_eq!(moved.list_id, "2003");
        assert_eq!(moved.position, Some(100_000));
        // The PATCH is the only request
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn move_card_to_bottom_of_target() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/lists/2003"))
            .respond_with(ResponseTemplate::new(200).set_body_json(list(
                "2003",
                &[card("3004", "2003", Some(POSITION_GAP))],
            )))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/api/cards/3001"))
            .and(body_json(json!({"position": 2 * POSITION_GAP, "listId": "2003"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"item": card("3001", "2003", Some(2 * POSITION_GAP))})),
            )
            .expect(1)
            .mount(&server)
            .await;

        client(&server)
            .move_card("3001", "2003", Placement::Bottom)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn move_card_to_board_includes_board_id() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/api/cards/3001"))
            .and(body_json(json!({"position": 0, "listId": "9002", "boardId": "9000"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"item": card("3001", "9002", Some(0))})),
            )
            .expect(1)
            .mount(&server)
            .await;

        client(&server)
            .move_card_to_board("3001", "9000", "9002", Placement::Top)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn rejected_move_is_returned_unchanged() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/api/cards/3001"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "code": "E_UNPROCESSABLE_ENTITY",
                "message": "List must be finite"
            })))
            .mount(&server)
            .await;

        let err = client(&server)
            .move_card("3001", "2001", Placement::Exact(1))
            .await
            .unwrap_err();
        assert_eq!(
            err.api_code(),
            Some(crate::error::ApiErrorCode::UnprocessableEntity)
        );
    }

    #[tokio::test]
    async fn move_task_sends_task_list_id() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/api/tasks/6001"))
            .and(body_json(json!({"position": 5, "taskListId": "5002"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "item": {"id": "6001", "taskListId": "5002", "position": 5, "name": "a"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let task = client(&server)
            .move_task("6001", "5002", Placement::Exact(5))
            .await
            .unwrap();
        assert_eq!(task.task_list_id, "5002");
    }

    #[tokio::test]
    async fn reposition_label_sends_position_only() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/api/labels/4001"))
            .and(body_json(json!({"position": 0})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "item": {"id": "4001", "boardId": "1000", "position": 0, "color": "berry-red"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let label = client(&server)
            .reposition_label("4001", "1000", Placement::Top)
            .await
            .unwrap();
        assert_eq!(label.position, 0);
    }

    #[tokio::test]
    async fn move_cards_keeps_relative_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/lists/2002"))
            .respond_with(ResponseTemplate::new(200).set_body_json(list(
                "2002",
                &[
                    card("3002", "2002", Some(2 * POSITION_GAP)),
                    card("3001", "2002", Some(POSITION_GAP)),
                ],
            )))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/lists/2003"))
            .respond_with(ResponseTemplate::new(200).set_body_json(list(
                "2003",
                &[card("3004", "2003", Some(POSITION_GAP))],
            )))
            .expect(1)
            .mount(&server)
            .await;
        for (id, position) in [("3001", 2 * POSITION_GAP), ("3002", 3 * POSITION_GAP)] {
            Mock::given(method("PATCH"))
                .and(path(format!("/api/cards/{id}")))
                .and(body_json(json!({"position": position, "listId": "2003"})))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(json!({"item": card(id, "2003", Some(position))})),
                )
                .expect(1)
                .mount(&server)
                .await;
        }

        let moved = client(&server)
            .move_cards("2002", "2003", Placement::Bottom)
            .await
            .unwrap();
        let ids: Vec<_> = moved.iter().map(|card| card.id.as_str()).collect();
        assert_eq!(ids, ["3001", "3002"]);
    }

    #[tokio::test]
    async fn move_cards_to_top_stays_above_existing_cards() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/lists/2002"))
            .respond_with(ResponseTemplate::new(200).set_body_json(list(
                "2002",
                &[
                    card("3001", "2002", Some(POSITION_GAP)),
                    card("3002", "2002", Some(2 * POSITION_GAP)),
                    card("3003", "2002", Some(3 * POSITION_GAP)),
                ],
            )))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/lists/2003"))
            .respond_with(ResponseTemplate::new(200).set_body_json(list(
                "2003",
                &[
                    card("3004", "2003", Some(POSITION_GAP)),
                    card("3005", "2003", Some(2 * POSITION_GAP)),
                ],
            )))
            .expect(1)
            .mount(&server)
            .await;
        for (id, position) in [("3001", 0), ("3002", 21_845), ("3003", 43_690)] {
            Mock::given(method("PATCH"))
                .and(path(format!("/api/cards/{id}")))
                .and(body_json(json!({"position": position, "listId": "2003"})))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(json!({"item": card(id, "2003", Some(position))})),
                )
                .expect(1)
                .mount(&server)
                .await;
        }

        let moved = client(&server)
            .move_cards("2002", "2003", Placement::Top)
            .await
            .unwrap();
        let positions: Vec<_> = moved.iter().filter_map(|card| card.position).collect();
        assert_eq!(positions, [0, 21_845, 43_690]);
        assert!(positions.iter().all(|&position| position < POSITION_GAP));
    }

    #[tokio::test]
    async fn move_cards_reports_failure_after_all_moves() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/lists/2002"))
            .respond_with(ResponseTemplate::new(200).set_body_json(list(
                "2002",
                &[
                    card("3001", "2002", Some(POSITION_GAP)),
                    card("3002", "2002", Some(2 * POSITION_GAP)),
                ],
            )))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/lists/2003"))
            .respond_with(ResponseTemplate::new(200).set_body_json(list("2003", &[])))
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/api/cards/3001"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "code": "E_NOT_FOUND",
                "message": "Card not found"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/api/cards/3002"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"item": card("3002", "2003", Some(POSITION_GAP))})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let err = client(&server)
            .move_cards("2002", "2003", Placement::Exact(0))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn move_cards_from_empty_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/lists/2002"))
            .respond_with(ResponseTemplate::new(200).set_body_json(list("2002", &[])))
            .mount(&server)
            .await;

        let moved = client(&server)
            .move_cards("2002", "2003", Placement::Bottom)
            .await
            .unwrap();
        assert!(moved.is_empty());
    }

    #[tokio::test]
    async fn duplicate_card_keeps_name_by_default() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/cards/3001"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"item": card("3001", "2002", Some(POSITION_GAP))})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/lists/2002"))
            .respond_with(ResponseTemplate::new(200).set_body_json(list(
                "2002",
                &[card("3001", "2002", Some(POSITION_GAP))],
            )))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/cards/3001/duplicate"))
            .and(body_json(json!({"position": 2 * POSITION_GAP, "name": "Card 3001"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"item": card("3010", "2002", Some(2 * POSITION_GAP))})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let copy = client(&server)
            .duplicate_card("3001", Placement::Bottom, None)
            .await
            .unwrap();
        assert_eq!(copy.id, "3010");
    }

    #[tokio::test]
    async fn restore_card_targets_previous_list() {
        let server = MockServer::start().await;
        let mut trashed = card("3006", "2001b", None);
        trashed["prevListId"] = json!("2003");
        Mock::given(method("GET"))
            .and(path("/api/cards/3006"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"item": trashed})))
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/api/cards/3006"))
            .and(body_json(json!({"position": 0, "listId": "2003"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"item": card("3006", "2003", Some(0))})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let restored = client(&server)
            .restore_card("3006", Placement::Top)
            .await
            .unwrap();
        assert_eq!(restored.list_id, "2003");
    }

    #[tokio::test]
    async fn restore_without_previous_list_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/cards/3001"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"item": card("3001", "2002", Some(1))})),
            )
            .mount(&server)
            .await;

        let err = client(&server)
            .restore_card("3001", Placement::Top)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotRestorable { card_id } if card_id == "3001"));
    }

    #[test]
    fn block_after_bottom_steps_by_gap() {
        let targets = [Some(POSITION_GAP)];
        assert_eq!(
            block_positions(PositionGap::CURRENT, &targets, Placement::Bottom, 3).unwrap(),
            [2 * POSITION_GAP, 3 * POSITION_GAP, 4 * POSITION_GAP]
        );
    }

    #[test]
    fn block_at_top_fits_before_first_target() {
        let targets = [Some(POSITION_GAP), Some(2 * POSITION_GAP)];
        let positions =
            block_positions(PositionGap::CURRENT, &targets, Placement::Top, 3).unwrap();
        assert_eq!(positions, [0, 21_845, 43_690]);
        assert!(positions.iter().all(|&position| position < POSITION_GAP));
    }

    #[test]
    fn exact_block_fits_before_next_target() {
        let targets = [Some(POSITION_GAP), Some(2 * POSITION_GAP)];
        assert_eq!(
            block_positions(PositionGap::CURRENT, &targets, Placement::Exact(100_000), 2)
                .unwrap(),
            [100_000, 115_536]
        );
    }

    #[test]
    fn block_without_room_is_rejected() {
        let targets = [Some(1)];
        let err = block_positions(PositionGap::CURRENT, &targets, Placement::Top, 2).unwrap_err();
        assert!(matches!(
            err,
            Error::NoRoom {
                count: 2,
                after: 0,
                before: 1
            }
        ));
    }

    #[test]
    fn block_overflow_is_reported() {
        let err = block_positions(PositionGap::CURRENT, &[], Placement::Exact(i64::MAX), 2)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Protocol(ProtocolError::PositionOverflow)
        ));
    }
}
