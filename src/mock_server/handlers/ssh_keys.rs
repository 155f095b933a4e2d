//! SSH key endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use super::{error, not_found, paginated, single, PageQuery, SharedState};
use crate::{Labels, SshKey};

/// Body of POST /ssh_keys.
#[derive(Debug, Deserialize)]
pub struct CreateSshKeyBody {
    pub name: String,
    pub public_key: String,
    #[serde(default)]
    pub labels: Labels,
}

/// GET /ssh_keys
pub async fn list_ssh_keys(
    State(state): State<SharedState>,
    Query(query): Query<PageQuery>,
) -> Response {
    let state = state.read().await;
    paginated("ssh_keys", state.ssh_keys.values().collect(), &query)
}

/// GET /ssh_keys/{id}
pub async fn get_ssh_key(State(state): State<SharedState>, Path(id): Path<u64>) -> Response {
    let state = state.read().await;

    match state.ssh_keys.get(&id) {
        Some(key) => single(StatusCode::OK, "ssh_key", key),
        None => not_found("ssh_key", id),
    }
}

/// POST /ssh_keys
pub async fn create_ssh_key(
    State(state): State<SharedState>,
    Json(body): Json<CreateSshKeyBody>,
) -> Response {
    let mut state = state.write().await;

    if state.ssh_keys.values().any(|key| key.name == body.name) {
        return error(
            StatusCode::CONFLICT,
            "uniqueness_error",
            "SSH key with the same name already exists",
        );
    }

    let id = state.next_id();
    let key = SshKey {
        id,
        fingerprint: format!("00:00:00:00:00:00:00:00:00:00:00:00:00:00:00:{:02x}", id % 256),
        name: body.name,
        public_key: body.public_key,
        labels: body.labels,
        created: Utc::now(),
    };
    state.ssh_keys.insert(id, key.clone());

    single(StatusCode::CREATED, "ssh_key", &key)
}

/// DELETE /ssh_keys/{id}
pub async fn delete_ssh_key(State(state): State<SharedState>, Path(id): Path<u64>) -> Response {
    let mut state = state.write().await;

    match state.ssh_keys.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found("ssh_key", id),
    }
}
