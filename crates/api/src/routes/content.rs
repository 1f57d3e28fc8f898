use axum::extract::{Path, Query, State};
use axum::routing::{delete, get, put};
use axum::{Json, Router};
use ecole_core::events::types::CmsEvent;
use ecole_core::model::content::{ContentEntry, UpsertContentEntry};
use ecole_core::repo;
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

const COLLECTION: &str = "contentEntries";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/content", get(list))
        .route("/v1/content/{key}", get(get_by_key))
        .route("/v1/admin/content", put(upsert))
        .route("/v1/admin/content/{key}", delete(remove))
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    page: Option<String>,
    limit: Option<i64>,
}

async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<ContentEntry>>> {
    let entries = repo::content::list(state.pool(), query.page.as_deref(), query.limit).await?;
    Ok(Json(entries))
}

/// 404 here means "use the hardcoded fallback copy".
async fn get_by_key(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ApiResult<Json<ContentEntry>> {
    repo::content::get_by_key(state.pool(), &key)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("no content entry for key {key}")))
}

async fn upsert(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(body): Json<UpsertContentEntry>,
) -> ApiResult<Json<ContentEntry>> {
    let entry = repo::content::upsert(state.pool(), body).await?;
    state.event_bus().publish(CmsEvent::updated(COLLECTION, entry.id));
    Ok(Json(entry))
}

async fn remove(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(key): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    repo::content::delete(state.pool(), &key).await?;
    state
        .event_bus()
        .publish(CmsEvent::mutation(COLLECTION, &key, ecole_core::events::types::MutationAction::Deleted));
    Ok(Json(serde_json::json!({ "deleted": key })))
}
