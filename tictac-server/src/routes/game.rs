//! Game API endpoints
//!
//! Every handler answers with the session view after the action, so the
//! UI redraws from a single response.

use crate::state::ServerState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tictac_core::{GameSession, SessionError, SessionView};

#[derive(Deserialize)]
pub struct MoveRequest {
    pub cell: usize,
}

#[derive(Deserialize)]
pub struct JumpRequest {
    pub index: usize,
}

/// Session error as a `400 {"error": ...}` response
pub struct ApiError(SessionError);

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.0.to_string() }));
        (StatusCode::BAD_REQUEST, body).into_response()
    }
}

/// Get the board at the cursor, status, and move list
pub async fn get_game_state(State(state): State<Arc<ServerState>>) -> Json<SessionView> {
    Json(state.session().view())
}

/// Play the Player's move and the Opponent's reply
///
/// Clicks on occupied cells or finished boards leave the session unchanged.
pub async fn make_player_move(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<MoveRequest>,
) -> Json<SessionView> {
    let mut session = state.session_mut();

    match session.apply_human_move(req.cell) {
        Some(turn) => tracing::info!(
            player = turn.player_cell,
            opponent = ?turn.opponent_cell,
            outcome = %turn.outcome,
            "turn played"
        ),
        None => tracing::debug!(cell = req.cell, "move ignored"),
    }

    Json(session.view())
}

/// Move the cursor to a history entry
pub async fn jump_to_move(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<JumpRequest>,
) -> Result<Json<SessionView>, ApiError> {
    let mut session = state.session_mut();

    session.jump_to(req.index).map_err(|err| {
        tracing::warn!(%err, "rejected jump");
        err
    })?;

    Ok(Json(session.view()))
}

/// Discard the session and start from the empty board
pub async fn new_game(State(state): State<Arc<ServerState>>) -> Json<SessionView> {
    let mut session = state.session_mut();
    *session = GameSession::new();

    tracing::info!("new game started");

    Json(session.view())
}
