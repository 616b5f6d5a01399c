//! End-to-end tests: configuration file to client to a mock Planka server.

use std::fs;

use planka::protocol::dummy::dummy_board;
use planka::protocol::POSITION_GAP;
use planka::{Config, Parent, Placement, PlankaClient, SiblingKind};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_from_config_file(server: &MockServer) -> PlankaClient {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("planka.json5");
    fs::write(
        &config_path,
        format!(
            r#"{{
                server: {{ url: "{}", timeout_secs: 5 }},
                credentials: {{ username: "demo", password: "demo" }},
            }}"#,
            server.uri()
        ),
    )
    .unwrap();

    let config = Config::load_from(&config_path).unwrap();
    PlankaClient::from_config(&config).unwrap()
}

async fn mount_logon(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/access-tokens"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"item": "tok"})))
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "item": {"id": "9001", "name": "Demo Demo"}
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn logon_then_append_list_to_board() {
    let server = MockServer::start().await;
    mount_logon(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/boards/1000"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(dummy_board()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/boards/1000/lists"))
        .and(header("authorization", "Bearer tok"))
        .and(body_json(json!({
            "type": "active",
            "position": 4 * POSITION_GAP,
            "name": "Review"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "item": {
                "id": "2005",
                "boardId": "1000",
                "type": "active",
                "position": 4 * POSITION_GAP,
                "name": "Review"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_from_config_file(&server).await;
    let me = client.logon().await.unwrap();
    assert_eq!(me.id, "9001");

    let list = client
        .add_list("1000", "Review", Placement::Bottom)
        .await
        .unwrap();
    assert_eq!(list.position, Some(4 * POSITION_GAP));
}

#[tokio::test]
async fn explicit_move_sends_position_verbatim() {
    let server = MockServer::start().await;
    mount_logon(&server).await;
    Mock::given(method("PATCH"))
        .and(path("/api/cards/3001"))
        .and(body_json(json!({"position": 100000, "listId": "2003"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "item": {
                "id": "3001",
                "boardId": "1000",
                "listId": "2003",
                "type": "project",
                "position": 100000,
                "name": "Set up CI"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_from_config_file(&server).await;
    client.logon().await.unwrap();
    let card = client
        .move_card("3001", "2003", "100000".parse().unwrap())
        .await
        .unwrap();
    assert_eq!(card.position, Some(100_000));
}

#[tokio::test]
async fn invalid_parent_is_rejected_before_any_request() {
    let server = MockServer::start().await;
    let client = client_from_config_file(&server).await;

    let err = client
        .position_for(
            &Parent::TaskList("5001".to_string()),
            SiblingKind::Card,
            Placement::Bottom,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, planka::Error::Protocol(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}
