use axum::extract::{Path, Query, State};
use axum::routing::{get, patch};
use axum::{Json, Router};
use ecole_core::events::types::CmsEvent;
use ecole_core::model::media::{MediaItem, MediaKind, MediaPatch};
use ecole_core::repo;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

const COLLECTION: &str = "media";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/media", get(list))
        .route("/v1/media/{id}", get(get_one))
        .route("/v1/admin/media/{id}", patch(update).delete(remove))
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    kind: Option<MediaKind>,
    limit: Option<i64>,
}

async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<MediaItem>>> {
    Ok(Json(
        repo::media::list(state.pool(), query.kind, query.limit).await?,
    ))
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MediaItem>> {
    Ok(Json(repo::media::get(state.pool(), id).await?))
}

async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<MediaPatch>,
) -> ApiResult<Json<MediaItem>> {
    let item = repo::media::update(state.pool(), id, body).await?;
    state.event_bus().publish(CmsEvent::updated(COLLECTION, id));
    Ok(Json(item))
}

/// Delete the metadata row and, best-effort, the stored blob. References to
/// the URL elsewhere are not retracted.
async fn remove(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    let item = repo::media::delete(state.pool(), id).await?;
    if let Some(storage_id) = state.storage().storage_id_from_url(&item.url) {
        if let Err(err) = state.storage().remove(storage_id).await {
            tracing::warn!(%storage_id, "failed to remove stored blob: {err}");
        }
    }
    state.event_bus().publish(CmsEvent::deleted(COLLECTION, id));
    Ok(Json(serde_json::json!({ "deleted": id })))
}
