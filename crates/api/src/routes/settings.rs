use axum::extract::State;
use axum::routing::{get, patch};
use axum::{Json, Router};
use ecole_core::events::types::{CmsEvent, MutationAction};
use ecole_core::model::settings::{SiteSettings, SiteSettingsPatch};
use ecole_core::repo;

use crate::error::ApiResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/settings", get(get_settings))
        .route("/v1/admin/settings", patch(update_settings))
}

async fn get_settings(State(state): State<AppState>) -> ApiResult<Json<SiteSettings>> {
    Ok(Json(repo::settings::get(state.pool()).await?))
}

async fn update_settings(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(body): Json<SiteSettingsPatch>,
) -> ApiResult<Json<SiteSettings>> {
    let settings = repo::settings::update(state.pool(), body).await?;
    state
        .event_bus()
        .publish(CmsEvent::mutation("siteSettings", "singleton", MutationAction::Updated));
    Ok(Json(settings))
}
