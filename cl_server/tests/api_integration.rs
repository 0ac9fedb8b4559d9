//! Integration tests for the HTTP lobby API.
//!
//! These tests drive the full router with in-process requests: the lobby
//! scenario from create through deal, the error mapping, and the privacy
//! guarantees of the projected state.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use card_lobby::session::SessionManager;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt; // For `oneshot` method

/// Build a router backed by a fresh session manager.
fn create_test_app() -> axum::Router {
    let state = cl_server::api::AppState {
        session_manager: Arc::new(SessionManager::new()),
    };
    cl_server::api::create_router(state)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a session and three joiners, returning (code, [4 player ids]).
async fn seat_four(app: &axum::Router) -> (String, Vec<String>) {
    let response = app
        .clone()
        .oneshot(post_json("/api/v1/sessions", json!({"host_name": "Ann"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let code = created["code"].as_str().unwrap().to_string();
    let mut ids = vec![created["player_id"].as_str().unwrap().to_string()];

    for name in ["Bob", "Cid", "Dee"] {
        let response = app
            .clone()
            .oneshot(post_json(
                &format!("/api/v1/sessions/{code}/join"),
                json!({"name": name}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let seated = body_json(response).await;
        ids.push(seated["player_id"].as_str().unwrap().to_string());
    }

    (code, ids)
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check_endpoint() {
    let app = create_test_app();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let health = body_json(response).await;
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["sessions"]["active_count"], 0);
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let app = create_test_app();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}

// ============================================================================
// Lobby Flow Tests
// ============================================================================

#[tokio::test]
async fn test_create_join_start_state_flow() {
    let app = create_test_app();
    let (code, ids) = seat_four(&app).await;

    // Host deals.
    let response = app
        .clone()
        .oneshot(post_json(
            &format!("/api/v1/sessions/{code}/start"),
            json!({"player_id": ids[0]}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Every player polls a dealt view with 13 own cards and only counts
    // for the others.
    for (seat, player_id) in ids.iter().enumerate() {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/api/v1/sessions/{code}/state?player_id={player_id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let view = body_json(response).await;
        assert_eq!(view["status"], "dealt");
        assert_eq!(view["code"], code);
        assert_eq!(view["hand"].as_array().unwrap().len(), 13);

        let players = view["players"].as_array().unwrap();
        assert_eq!(players.len(), 4);
        for seat_view in players {
            assert_eq!(seat_view["hand_size"], 13);
            // The only cards anywhere in the view are the requester's own.
            assert!(seat_view.get("hand").is_none());
            assert!(seat_view.get("cards").is_none());
        }
        let me: Vec<_> = players.iter().filter(|p| p["is_you"] == true).collect();
        assert_eq!(me.len(), 1);
        assert_eq!(me[0]["seat_idx"], seat as u64);

        // Cards use the canonical wire encoding.
        for card in view["hand"].as_array().unwrap() {
            let card = card.as_str().unwrap();
            assert!(card.len() >= 2 && card.len() <= 3, "bad card code {card}");
        }
    }
}

#[tokio::test]
async fn test_lobby_state_before_deal() {
    let app = create_test_app();

    let response = app
        .clone()
        .oneshot(post_json("/api/v1/sessions", json!({"host_name": "Ann"})))
        .await
        .unwrap();
    let created = body_json(response).await;
    let code = created["code"].as_str().unwrap();
    let host_id = created["player_id"].as_str().unwrap();
    assert_eq!(created["seat_idx"], 0);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/sessions/{code}/state?player_id={host_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let view = body_json(response).await;
    assert_eq!(view["status"], "lobby");
    assert_eq!(view["host_id"].as_str().unwrap(), host_id);
    assert_eq!(view["hand"].as_array().unwrap().len(), 0);
    assert_eq!(view["players"][0]["is_host"], true);
    assert_eq!(view["players"][0]["hand_size"], 0);
}

#[tokio::test]
async fn test_session_codes_are_case_insensitive() {
    let app = create_test_app();

    let response = app
        .clone()
        .oneshot(post_json("/api/v1/sessions", json!({"host_name": "Ann"})))
        .await
        .unwrap();
    let created = body_json(response).await;
    let lower = created["code"].as_str().unwrap().to_ascii_lowercase();

    let response = app
        .clone()
        .oneshot(post_json(
            &format!("/api/v1/sessions/{lower}/join"),
            json!({"name": "Bob"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let seated = body_json(response).await;
    assert_eq!(seated["seat_idx"], 1);
}

// ============================================================================
// Error Mapping Tests
// ============================================================================

#[tokio::test]
async fn test_create_with_blank_name_is_bad_request() {
    let app = create_test_app();

    let response = app
        .oneshot(post_json("/api/v1/sessions", json!({"host_name": "   "})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = body_json(response).await;
    assert!(error["error"].as_str().unwrap().contains("name"));
}

#[tokio::test]
async fn test_join_unknown_code_is_not_found() {
    let app = create_test_app();

    let response = app
        .oneshot(post_json("/api/v1/sessions/ZZZZZ/join", json!({"name": "Bob"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_fifth_join_is_rejected() {
    let app = create_test_app();
    let (code, _ids) = seat_four(&app).await;

    let response = app
        .clone()
        .oneshot(post_json(
            &format!("/api/v1/sessions/{code}/join"),
            json!({"name": "Eve"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = body_json(response).await;
    assert_eq!(error["error"], "session is full");
}

#[tokio::test]
async fn test_non_host_start_is_rejected() {
    let app = create_test_app();
    let (code, ids) = seat_four(&app).await;

    let response = app
        .clone()
        .oneshot(post_json(
            &format!("/api/v1/sessions/{code}/start"),
            json!({"player_id": ids[1]}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = body_json(response).await;
    assert_eq!(error["error"], "only the host can start the deal");
}

#[tokio::test]
async fn test_start_without_full_table_is_rejected() {
    let app = create_test_app();

    let response = app
        .clone()
        .oneshot(post_json("/api/v1/sessions", json!({"host_name": "Ann"})))
        .await
        .unwrap();
    let created = body_json(response).await;
    let code = created["code"].as_str().unwrap();
    let host_id = created["player_id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(post_json(
            &format!("/api/v1/sessions/{code}/start"),
            json!({"player_id": host_id}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = body_json(response).await;
    assert_eq!(error["error"], "dealing needs exactly four players");
}

#[tokio::test]
async fn test_join_after_deal_is_rejected() {
    let app = create_test_app();
    let (code, ids) = seat_four(&app).await;

    app.clone()
        .oneshot(post_json(
            &format!("/api/v1/sessions/{code}/start"),
            json!({"player_id": ids[0]}),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(post_json(
            &format!("/api/v1/sessions/{code}/join"),
            json!({"name": "Eve"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = body_json(response).await;
    assert_eq!(error["error"], "session already started");
}

#[tokio::test]
async fn test_state_for_unknown_player_is_not_found() {
    let app = create_test_app();

    let response = app
        .clone()
        .oneshot(post_json("/api/v1/sessions", json!({"host_name": "Ann"})))
        .await
        .unwrap();
    let created = body_json(response).await;
    let code = created["code"].as_str().unwrap();

    let stranger = uuid::Uuid::new_v4();
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/sessions/{code}/state?player_id={stranger}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
