//! Integration tests for TICTAC
//!
//! Tests the full stack: core engine, game session, and the HTTP API.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::{json, Value};
use tower::ServiceExt;

use tictac_core::{
    detect_outcome, select_opponent_move, Board, GameSession, Mark, Outcome, SessionView,
};
use tictac_server::{create_router, ServerState};

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn test_app() -> axum::Router {
    create_router(Arc::new(ServerState::new()))
}

async fn call(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// ============================================================================
// ENGINE
// ============================================================================

#[test]
fn test_opponent_completes_line_over_block() {
    let board: Board = "XX_ OO_ ___".parse().unwrap();
    assert_eq!(select_opponent_move(&board), Some(5));

    let after = board.with_mark(5, Mark::Opponent);
    assert_eq!(detect_outcome(&after), Outcome::OpponentWins);
}

#[test]
fn test_random_sessions_never_lost() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);

    for _ in 0..40 {
        let mut session = GameSession::new();
        while session.status() == Outcome::Ongoing {
            let empty: Vec<usize> = session.current_board().empty_cells().collect();
            let cell = *empty.choose(&mut rng).unwrap();
            session.apply_human_move(cell).unwrap();
        }
        assert_ne!(session.status(), Outcome::PlayerWins);
    }
}

// ============================================================================
// HTTP API
// ============================================================================

#[tokio::test]
async fn test_api_game_matches_local_session() {
    let app = test_app();
    let mut local = GameSession::new();

    for cell in [4, 8, 1, 6, 2, 3, 5, 7] {
        let body = json!({ "cell": cell });
        let (status, body) = call(&app, "POST", "/api/game/move", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        local.apply_human_move(cell);

        let view: SessionView = serde_json::from_value(body).unwrap();
        assert_eq!(view, local.view());
    }

    assert!(local.status().is_terminal());
    assert_ne!(local.status(), Outcome::PlayerWins);
}

#[tokio::test]
async fn test_api_history_navigation() {
    let app = test_app();
    call(&app, "POST", "/api/game/move", Some(json!({ "cell": 4 }))).await;
    call(&app, "POST", "/api/game/move", Some(json!({ "cell": 8 }))).await;

    let (_, game) = call(&app, "GET", "/api/game", None).await;
    let history_len = game["history_len"].as_u64().unwrap() as usize;
    let mut boards = Vec::new();
    for index in 0..history_len {
        let body = json!({ "index": index });
        let (status, view) = call(&app, "POST", "/api/game/jump", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        boards.push(view["board"].clone());
    }

    // Second pass reads back the same boards
    for (index, board) in boards.iter().enumerate() {
        let (_, view) = call(&app, "POST", "/api/game/jump", Some(json!({ "index": index }))).await;
        assert_eq!(&view["board"], board);
    }

    let body = json!({ "index": history_len });
    let (status, _) = call(&app, "POST", "/api/game/jump", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
