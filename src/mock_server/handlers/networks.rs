//! Network endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
};

use super::{not_found, paginated, single, PageQuery, SharedState};

/// GET /networks
pub async fn list_networks(
    State(state): State<SharedState>,
    Query(query): Query<PageQuery>,
) -> Response {
    let state = state.read().await;
    paginated("networks", state.networks.values().collect(), &query)
}

/// GET /networks/{id}
pub async fn get_network(State(state): State<SharedState>, Path(id): Path<u64>) -> Response {
    let state = state.read().await;

    match state.networks.get(&id) {
        Some(network) => single(StatusCode::OK, "network", network),
        None => not_found("network", id),
    }
}
