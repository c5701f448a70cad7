//! HTTP API tests driven through the router without binding a socket.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use wordgame::{GameId, GameRegistry, RegistrySettings, server};

fn app() -> Router {
    server::router(GameRegistry::new(RegistrySettings::new(8, Some(11))))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("Failed to build request"),
        None => builder.body(Body::empty()).expect("Failed to build request"),
    };

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Router failed");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    (status, bytes.to_vec())
}

async fn send_json(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    let value = serde_json::from_slice(&bytes).expect("Response was not JSON");
    (status, value)
}

/// Creates a game, seats the named players and starts it.
async fn started_game(app: &Router, names: &[&str]) -> (Value, Vec<Value>) {
    let (status, created) = send_json(app, "POST", "/game/create", None).await;
    assert_eq!(status, StatusCode::CREATED);
    let game_id = created["game_id"].clone();

    let mut players = Vec::new();
    for name in names {
        let (status, joined) = send_json(
            app,
            "POST",
            "/game/join",
            Some(json!({ "game_id": game_id, "player_name": name })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        players.push(joined["player_id"].clone());
    }

    let (status, body) = send(app, "POST", "/game/start", Some(json!({ "game_id": game_id }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");
    (game_id, players)
}

#[tokio::test]
async fn test_create_returns_created() {
    let app = app();
    let (status, body) = send_json(&app, "POST", "/game/create", None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["game_id"].is_string());
}

#[tokio::test]
async fn test_join_reports_seat() {
    let app = app();
    let (_, created) = send_json(&app, "POST", "/game/create", None).await;
    let game_id = created["game_id"].clone();

    for seat in 0..2 {
        let (status, joined) = send_json(
            &app,
            "POST",
            "/game/join",
            Some(json!({ "game_id": game_id, "player_name": format!("p{seat}") })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(joined["seat"], seat);
        assert_eq!(joined["game_id"], game_id);
        assert!(joined["player_id"].is_string());
    }
}

#[tokio::test]
async fn test_unknown_game_is_404() {
    let app = app();
    let missing = GameId::new().to_string();
    let (status, body) = send_json(
        &app,
        "POST",
        "/game/join",
        Some(json!({ "game_id": missing, "player_name": "Alice" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "not_found");
    assert!(body["error"].as_str().unwrap().contains(&missing));
}

#[tokio::test]
async fn test_lifecycle_conflicts_are_409() {
    let app = app();
    let (_, created) = send_json(&app, "POST", "/game/create", None).await;
    let game_id = created["game_id"].clone();

    let (status, body) = send_json(&app, "POST", "/game/start", Some(json!({ "game_id": game_id }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["kind"], "conflict");

    for name in ["A", "B", "C", "D"] {
        let (status, _) = send_json(
            &app,
            "POST",
            "/game/join",
            Some(json!({ "game_id": game_id, "player_name": name })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
    let (status, _) = send_json(
        &app,
        "POST",
        "/game/join",
        Some(json!({ "game_id": game_id, "player_name": "E" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_blank_name_is_400() {
    let app = app();
    let (_, created) = send_json(&app, "POST", "/game/create", None).await;
    let (status, body) = send_json(
        &app,
        "POST",
        "/game/join",
        Some(json!({ "game_id": created["game_id"], "player_name": "  " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "validation");
}

#[tokio::test]
async fn test_state_returns_private_hand() {
    let app = app();
    let (game_id, players) = started_game(&app, &["A", "B"]).await;

    let (status, state) = send_json(
        &app,
        "POST",
        "/game/state",
        Some(json!({ "game_id": game_id, "player_id": players[1] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state["hand"].as_array().unwrap().len(), 7);
    assert_eq!(state["current_turn_seat"], 0);
    assert_eq!(state["supply_remaining"], 86);
    assert_eq!(state["players"].as_array().unwrap().len(), 2);
    assert_eq!(state["players"][0]["name"], "A");
    assert_eq!(state["players"][0]["tile_count"], 7);
    assert!(state["players"][0].get("hand").is_none());
    assert_eq!(state["board"]["squares"][7][7]["type"], "star");
    assert!(state.get("error").is_none());
}

#[tokio::test]
async fn test_swap_over_http() {
    let app = app();
    let (game_id, players) = started_game(&app, &["A", "B"]).await;
    let (_, state) = send_json(
        &app,
        "POST",
        "/game/state",
        Some(json!({ "game_id": game_id, "player_id": players[0] })),
    )
    .await;
    let first = state["hand"][0].clone();

    let (status, after) = send_json(
        &app,
        "POST",
        "/game/play",
        Some(json!({ "game_id": game_id, "player_id": players[0], "tiles": [first] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(after.get("error").is_none());
    assert_eq!(after["current_turn_seat"], 1);
    assert_eq!(after["hand"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn test_rejected_play_is_reported_in_state() {
    let app = app();
    let (game_id, players) = started_game(&app, &["A", "B"]).await;

    let (status, after) = send_json(
        &app,
        "POST",
        "/game/play",
        Some(json!({ "game_id": game_id, "player_id": players[1], "tiles": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(after["error"]["kind"], "out_of_turn");
    assert_eq!(after["current_turn_seat"], 0);
}

#[tokio::test]
async fn test_state_before_start_is_409() {
    let app = app();
    let (_, created) = send_json(&app, "POST", "/game/create", None).await;
    let game_id = created["game_id"].clone();
    let (_, joined) = send_json(
        &app,
        "POST",
        "/game/join",
        Some(json!({ "game_id": game_id, "player_name": "A" })),
    )
    .await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/game/state",
        Some(json!({ "game_id": game_id, "player_id": joined["player_id"] })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["kind"], "conflict");
}

#[tokio::test]
async fn test_list_games() {
    let app = app();
    started_game(&app, &["A", "B"]).await;
    send_json(&app, "POST", "/game/create", None).await;

    let (status, games) = send_json(&app, "GET", "/games", None).await;
    assert_eq!(status, StatusCode::OK);
    let games = games.as_array().unwrap();
    assert_eq!(games.len(), 2);
    assert_eq!(games.iter().filter(|g| g["active"] == true).count(), 1);
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let app = app();
    let (status, _) = send(
        &app,
        "POST",
        "/game/join",
        Some(json!({ "game_id": "not-a-uuid", "player_name": "A" })),
    )
    .await;
    assert!(status.is_client_error());
}
