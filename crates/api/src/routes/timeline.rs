use axum::extract::{Path, State};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use ecole_core::events::types::CmsEvent;
use ecole_core::model::timeline::{NewTimelineEntry, TimelineEntry, TimelineEntryPatch};
use ecole_core::repo;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

const COLLECTION: &str = "timelineEntries";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/timeline", get(list_visible))
        .route("/v1/admin/timeline", get(admin_list).post(create))
        .route("/v1/admin/timeline/reorder", post(reorder))
        .route("/v1/admin/timeline/{id}", patch(update).delete(remove))
        .route(
            "/v1/admin/timeline/{id}/toggle-visibility",
            post(toggle_visibility),
        )
}

async fn list_visible(State(state): State<AppState>) -> ApiResult<Json<Vec<TimelineEntry>>> {
    Ok(Json(repo::timeline::list(state.pool(), false).await?))
}

async fn admin_list(
    State(state): State<AppState>,
    _user: AuthUser,
) -> ApiResult<Json<Vec<TimelineEntry>>> {
    Ok(Json(repo::timeline::list(state.pool(), true).await?))
}

async fn create(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(body): Json<NewTimelineEntry>,
) -> ApiResult<Json<TimelineEntry>> {
    let entry = repo::timeline::create(state.pool(), body).await?;
    state.event_bus().publish(CmsEvent::created(COLLECTION, entry.id));
    Ok(Json(entry))
}

async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<TimelineEntryPatch>,
) -> ApiResult<Json<TimelineEntry>> {
    let entry = repo::timeline::update(state.pool(), id, body).await?;
    state.event_bus().publish(CmsEvent::updated(COLLECTION, id));
    Ok(Json(entry))
}

async fn toggle_visibility(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<TimelineEntry>> {
    let entry = repo::timeline::toggle_visible(state.pool(), id).await?;
    state.event_bus().publish(CmsEvent::updated(COLLECTION, id));
    Ok(Json(entry))
}

#[derive(Debug, Deserialize)]
struct ReorderBody {
    ids: Vec<Uuid>,
}

async fn reorder(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(body): Json<ReorderBody>,
) -> ApiResult<Json<Vec<TimelineEntry>>> {
    repo::timeline::reorder(state.pool(), &body.ids).await?;
    for id in &body.ids {
        state.event_bus().publish(CmsEvent::updated(COLLECTION, *id));
    }
    Ok(Json(repo::timeline::list(state.pool(), true).await?))
}

async fn remove(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    repo::timeline::delete(state.pool(), id).await?;
    state.event_bus().publish(CmsEvent::deleted(COLLECTION, id));
    Ok(Json(serde_json::json!({ "deleted": id })))
}
