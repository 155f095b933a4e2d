//! Firewall endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
};

use super::{not_found, paginated, single, PageQuery, SharedState};

/// GET /firewalls
pub async fn list_firewalls(
    State(state): State<SharedState>,
    Query(query): Query<PageQuery>,
) -> Response {
    let state = state.read().await;
    paginated("firewalls", state.firewalls.values().collect(), &query)
}

/// GET /firewalls/{id}
pub async fn get_firewall(State(state): State<SharedState>, Path(id): Path<u64>) -> Response {
    let state = state.read().await;

    match state.firewalls.get(&id) {
        Some(firewall) => single(StatusCode::OK, "firewall", firewall),
        None => not_found("firewall", id),
    }
}
