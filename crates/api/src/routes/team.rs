use axum::extract::{Path, State};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use ecole_core::events::types::CmsEvent;
use ecole_core::model::team::{NewTeamMember, TeamMember, TeamMemberPatch};
use ecole_core::repo;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

const COLLECTION: &str = "teamMembers";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/team", get(list_visible))
        .route("/v1/admin/team", get(admin_list).post(create))
        .route("/v1/admin/team/reorder", post(reorder))
        .route("/v1/admin/team/{id}", patch(update).delete(remove))
        .route("/v1/admin/team/{id}/toggle-visibility", post(toggle_visibility))
}

async fn list_visible(State(state): State<AppState>) -> ApiResult<Json<Vec<TeamMember>>> {
    Ok(Json(repo::team::list(state.pool(), false).await?))
}

async fn admin_list(
    State(state): State<AppState>,
    _user: AuthUser,
) -> ApiResult<Json<Vec<TeamMember>>> {
    Ok(Json(repo::team::list(state.pool(), true).await?))
}

async fn create(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(body): Json<NewTeamMember>,
) -> ApiResult<Json<TeamMember>> {
    let member = repo::team::create(state.pool(), body).await?;
    state.event_bus().publish(CmsEvent::created(COLLECTION, member.id));
    Ok(Json(member))
}

async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<TeamMemberPatch>,
) -> ApiResult<Json<TeamMember>> {
    let member = repo::team::update(state.pool(), id, body).await?;
    state.event_bus().publish(CmsEvent::updated(COLLECTION, id));
    Ok(Json(member))
}

async fn toggle_visibility(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<TeamMember>> {
    let member = repo::team::toggle_visible(state.pool(), id).await?;
    state.event_bus().publish(CmsEvent::updated(COLLECTION, id));
    Ok(Json(member))
}

#[derive(Debug, Deserialize)]
struct ReorderBody {
    ids: Vec<Uuid>,
}

async fn reorder(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(body): Json<ReorderBody>,
) -> ApiResult<Json<Vec<TeamMember>>> {
    repo::team::reorder(state.pool(), &body.ids).await?;
    for id in &body.ids {
        state.event_bus().publish(CmsEvent::updated(COLLECTION, *id));
    }
    Ok(Json(repo::team::list(state.pool(), true).await?))
}

async fn remove(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    repo::team::delete(state.pool(), id).await?;
    state.event_bus().publish(CmsEvent::deleted(COLLECTION, id));
    Ok(Json(serde_json::json!({ "deleted": id })))
}
