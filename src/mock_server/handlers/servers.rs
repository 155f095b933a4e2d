//! Server endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
};

use super::{not_found, paginated, single, PageQuery, SharedState};

/// GET /servers
pub async fn list_servers(
    State(state): State<SharedState>,
    Query(query): Query<PageQuery>,
) -> Response {
    let state = state.read().await;
    paginated("servers", state.servers.values().collect(), &query)
}

/// GET /servers/{id}
pub async fn get_server(State(state): State<SharedState>, Path(id): Path<u64>) -> Response {
    let state = state.read().await;

    match state.servers.get(&id) {
        Some(server) => single(StatusCode::OK, "server", server),
        None => not_found("server", id),
    }
}

/// DELETE /servers/{id}
pub async fn delete_server(State(state): State<SharedState>, Path(id): Path<u64>) -> Response {
    let mut state = state.write().await;

    if state.servers.remove(&id).is_none() {
        return not_found("server", id);
    }

    let action = state.start_action("delete_server", id, "server");
    single(StatusCode::OK, "action", &action)
}

/// POST /servers/{id}/actions/poweron
pub async fn power_on_server(State(state): State<SharedState>, Path(id): Path<u64>) -> Response {
    set_power(state, id, "start_server", "running").await
}

/// POST /servers/{id}/actions/poweroff
pub async fn power_off_server(State(state): State<SharedState>, Path(id): Path<u64>) -> Response {
    set_power(state, id, "stop_server", "off").await
}

async fn set_power(state: SharedState, id: u64, command: &str, status: &str) -> Response {
    let mut state = state.write().await;

    match state.servers.get_mut(&id) {
        Some(server) => server.status = status.to_string(),
        None => return not_found("server", id),
    }

    let action = state.start_action(command, id, "server");
    single(StatusCode::CREATED, "action", &action)
}
