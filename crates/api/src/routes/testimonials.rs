use axum::extract::{Path, Query, State};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use ecole_core::events::types::CmsEvent;
use ecole_core::model::testimonial::{NewTestimonial, Testimonial, TestimonialPatch};
use ecole_core::repo;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

const COLLECTION: &str = "testimonials";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/testimonials", get(list_visible))
        .route("/v1/admin/testimonials", get(admin_list).post(create))
        .route("/v1/admin/testimonials/reorder", post(reorder))
        .route("/v1/admin/testimonials/{id}", patch(update).delete(remove))
        .route(
            "/v1/admin/testimonials/{id}/toggle-visibility",
            post(toggle_visibility),
        )
        .route(
            "/v1/admin/testimonials/{id}/toggle-featured",
            post(toggle_featured),
        )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListQuery {
    #[serde(default)]
    featured_only: bool,
}

async fn list_visible(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Testimonial>>> {
    Ok(Json(
        repo::testimonial::list(state.pool(), false, query.featured_only).await?,
    ))
}

async fn admin_list(
    State(state): State<AppState>,
    _user: AuthUser,
) -> ApiResult<Json<Vec<Testimonial>>> {
    Ok(Json(repo::testimonial::list(state.pool(), true, false).await?))
}

async fn create(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(body): Json<NewTestimonial>,
) -> ApiResult<Json<Testimonial>> {
    let testimonial = repo::testimonial::create(state.pool(), body).await?;
    state
        .event_bus()
        .publish(CmsEvent::created(COLLECTION, testimonial.id));
    Ok(Json(testimonial))
}

async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<TestimonialPatch>,
) -> ApiResult<Json<Testimonial>> {
    let testimonial = repo::testimonial::update(state.pool(), id, body).await?;
    state.event_bus().publish(CmsEvent::updated(COLLECTION, id));
    Ok(Json(testimonial))
}

async fn toggle_visibility(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Testimonial>> {
    let testimonial = repo::testimonial::toggle_visible(state.pool(), id).await?;
    state.event_bus().publish(CmsEvent::updated(COLLECTION, id));
    Ok(Json(testimonial))
}

async fn toggle_featured(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Testimonial>> {
    let testimonial = repo::testimonial::toggle_featured(state.pool(), id).await?;
    state.event_bus().publish(CmsEvent::updated(COLLECTION, id));
    Ok(Json(testimonial))
}

#[derive(Debug, Deserialize)]
struct ReorderBody {
    ids: Vec<Uuid>,
}

async fn reorder(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(body): Json<ReorderBody>,
) -> ApiResult<Json<Vec<Testimonial>>> {
    repo::testimonial::reorder(state.pool(), &body.ids).await?;
    for id in &body.ids {
        state.event_bus().publish(CmsEvent::updated(COLLECTION, *id));
    }
    Ok(Json(repo::testimonial::list(state.pool(), true, false).await?))
}

async fn remove(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    repo::testimonial::delete(state.pool(), id).await?;
    state.event_bus().publish(CmsEvent::deleted(COLLECTION, id));
    Ok(Json(serde_json::json!({ "deleted": id })))
}
