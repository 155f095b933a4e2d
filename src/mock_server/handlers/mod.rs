//! HTTP request handlers for the mock server.

pub mod actions;
pub mod firewalls;
pub mod networks;
pub mod servers;
pub mod ssh_keys;

pub use actions::*;
pub use firewalls::*;
pub use networks::*;
pub use servers::*;
pub use ssh_keys::*;

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::sync::RwLock;

use crate::mock_server::state::MockState;
use crate::Pagination;

pub(crate) type SharedState = Arc<RwLock<MockState>>;

/// Query parameters accepted by every list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Render `items` as one page of a `{key: [...], meta: {pagination}}` body.
pub(crate) fn paginated<T: Serialize>(key: &str, items: Vec<&T>, query: &PageQuery) -> Response {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(25).max(1);

    let total = items.len() as u64;
    let last_page = u32::try_from(total.div_ceil(u64::from(per_page)))
        .unwrap_or(u32::MAX)
        .max(1);

    let start = ((page - 1) as usize).saturating_mul(per_page as usize);
    let page_items: Vec<&T> = items
        .into_iter()
        .skip(start)
        .take(per_page as usize)
        .collect();

    let pagination = Pagination {
        page,
        per_page,
        previous_page: (page > 1).then(|| page - 1),
        next_page: (page < last_page).then(|| page + 1),
        last_page: Some(last_page),
        total_entries: Some(total),
    };

    let mut body = serde_json::Map::new();
    body.insert(key.to_string(), json!(page_items));
    body.insert("meta".to_string(), json!({ "pagination": pagination }));

    (StatusCode::OK, Json(Value::Object(body))).into_response()
}

/// Wrap `value` in a single-key envelope.
pub(crate) fn single<T: Serialize>(status: StatusCode, key: &str, value: &T) -> Response {
    let mut body = serde_json::Map::new();
    body.insert(key.to_string(), json!(value));
    (status, Json(Value::Object(body))).into_response()
}

/// The API's error envelope.
pub(crate) fn error(status: StatusCode, code: &str, message: &str) -> Response {
    (
        status,
        Json(json!({
            "error": {
                "code": code,
                "message": message,
                "details": {}
            }
        })),
    )
        .into_response()
}

pub(crate) fn not_found(kind: &str, id: u64) -> Response {
    error(
        StatusCode::NOT_FOUND,
        "not_found",
        &format!("{kind} with ID {id} not found"),
    )
}

/// Reject requests without the configured bearer token.
pub async fn require_token(
    State(state): State<SharedState>,
    request: Request,
    next: Next,
) -> Response {
    let required = state.read().await.required_token.clone();

    if let Some(token) = required {
        let expected = format!("Bearer {token}");
        let provided = request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        if provided != Some(expected.as_str()) {
            return error(
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "unable to authenticate",
            );
        }
    }

    next.run(request).await
}
