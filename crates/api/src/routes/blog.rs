use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use ecole_core::events::types::CmsEvent;
use ecole_core::model::blog::{BlogPost, BlogPostPatch, BlogStatus, NewBlogPost};
use ecole_core::repo;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::state::AppState;

const COLLECTION: &str = "blogPosts";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/blog", get(list_published))
        .route("/v1/blog/{slug}", get(get_by_slug))
        .route("/v1/admin/blog", get(admin_list).post(create))
        .route(
            "/v1/admin/blog/{id}",
            get(admin_get).patch(update).delete(remove),
        )
        .route("/v1/admin/blog/{id}/publish", post(publish))
        .route("/v1/admin/blog/{id}/unpublish", post(unpublish))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PublicListQuery {
    #[serde(default)]
    featured_only: bool,
    limit: Option<i64>,
}

async fn list_published(
    State(state): State<AppState>,
    Query(query): Query<PublicListQuery>,
) -> ApiResult<Json<Vec<BlogPost>>> {
    let posts =
        repo::blog::list_published(state.pool(), query.featured_only, query.limit).await?;
    Ok(Json(posts))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SlugQuery {
    #[serde(default)]
    preview: bool,
}

/// Drafts are only visible in preview mode, which requires authentication.
async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<SlugQuery>,
    MaybeAuthUser(user): MaybeAuthUser,
) -> ApiResult<Json<BlogPost>> {
    let include_drafts = query.preview && user.is_some();
    let mut post = repo::blog::get_by_slug(state.pool(), &slug, include_drafts)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("no post with slug {slug}")))?;
    // An editor that was opened and closed leaves empty markup behind; hide
    // it instead of shipping empty paragraphs to the page.
    if let Some(body) = post.body.as_deref() {
        if ecole_richtext::sanitize_rich_text(body).is_empty() {
            post.body = None;
        }
    }
    Ok(Json(post))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AdminListQuery {
    status: Option<BlogStatus>,
    limit: Option<i64>,
}

async fn admin_list(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<AdminListQuery>,
) -> ApiResult<Json<Vec<BlogPost>>> {
    let posts = repo::blog::list(state.pool(), query.status, query.limit).await?;
    Ok(Json(posts))
}

async fn admin_get(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<BlogPost>> {
    Ok(Json(repo::blog::get(state.pool(), id).await?))
}

async fn create(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(body): Json<NewBlogPost>,
) -> ApiResult<Json<BlogPost>> {
    let post = repo::blog::create(state.pool(), body).await?;
    state.event_bus().publish(CmsEvent::created(COLLECTION, post.id));
    Ok(Json(post))
}

async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<BlogPostPatch>,
) -> ApiResult<Json<BlogPost>> {
    let post = repo::blog::update(state.pool(), id, body).await?;
    state.event_bus().publish(CmsEvent::updated(COLLECTION, id));
    Ok(Json(post))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PublishBody {
    published_at: Option<DateTime<Utc>>,
}

async fn publish(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
    body: Option<Json<PublishBody>>,
) -> ApiResult<Json<BlogPost>> {
    let published_at = body.and_then(|Json(b)| b.published_at);
    let post = repo::blog::publish(state.pool(), id, published_at).await?;
    state.event_bus().publish(CmsEvent::updated(COLLECTION, id));
    Ok(Json(post))
}

async fn unpublish(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<BlogPost>> {
    let post = repo::blog::unpublish(state.pool(), id).await?;
    state.event_bus().publish(CmsEvent::updated(COLLECTION, id));
    Ok(Json(post))
}

async fn remove(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    repo::blog::delete(state.pool(), id).await?;
    state.event_bus().publish(CmsEvent::deleted(COLLECTION, id));
    Ok(Json(serde_json::json!({ "deleted": id })))
}
