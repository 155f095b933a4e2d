//! Action endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};

use super::{not_found, single, SharedState};

/// GET /actions/{id}
///
/// Each fetch advances a running action by one step.
pub async fn get_action(State(state): State<SharedState>, Path(id): Path<u64>) -> Response {
    let mut state = state.write().await;

    match state.poll_action(id) {
        Some(action) => single(StatusCode::OK, "action", &action),
        None => not_found("action", id),
    }
}
