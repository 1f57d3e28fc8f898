use axum::extract::{Path, Query, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use ecole_core::events::types::CmsEvent;
use ecole_core::model::message::{ContactMessage, NewContactMessage, NewsletterSubscriber};
use ecole_core::repo;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/contact", post(submit_contact))
        .route("/v1/newsletter/subscribe", post(subscribe))
        .route("/v1/admin/messages", get(list_messages))
        .route("/v1/admin/messages/{id}", delete(remove_message))
        .route("/v1/admin/messages/{id}/toggle-read", post(toggle_read))
        .route("/v1/admin/newsletter", get(list_subscribers))
        .route("/v1/admin/newsletter/{id}", delete(remove_subscriber))
        .route("/v1/admin/newsletter/{id}/toggle-active", post(toggle_active))
}

async fn submit_contact(
    State(state): State<AppState>,
    Json(body): Json<NewContactMessage>,
) -> ApiResult<Json<ContactMessage>> {
    let message = repo::message::create_contact(state.pool(), body).await?;
    state
        .event_bus()
        .publish(CmsEvent::created("contactMessages", message.id));
    Ok(Json(message))
}

#[derive(Debug, Deserialize)]
struct SubscribeBody {
    email: String,
}

async fn subscribe(
    State(state): State<AppState>,
    Json(body): Json<SubscribeBody>,
) -> ApiResult<Json<NewsletterSubscriber>> {
    let subscriber = repo::message::subscribe(state.pool(), &body.email).await?;
    state
        .event_bus()
        .publish(CmsEvent::created("newsletterSubscribers", subscriber.id));
    Ok(Json(subscriber))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessagesQuery {
    #[serde(default)]
    unread_only: bool,
    limit: Option<i64>,
}

async fn list_messages(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<MessagesQuery>,
) -> ApiResult<Json<Vec<ContactMessage>>> {
    Ok(Json(
        repo::message::list_contact(state.pool(), query.unread_only, query.limit).await?,
    ))
}

async fn toggle_read(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ContactMessage>> {
    let message = repo::message::toggle_contact_read(state.pool(), id).await?;
    state.event_bus().publish(CmsEvent::updated("contactMessages", id));
    Ok(Json(message))
}

async fn remove_message(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    repo::message::delete_contact(state.pool(), id).await?;
    state.event_bus().publish(CmsEvent::deleted("contactMessages", id));
    Ok(Json(serde_json::json!({ "deleted": id })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubscribersQuery {
    #[serde(default)]
    active_only: bool,
    limit: Option<i64>,
}

async fn list_subscribers(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<SubscribersQuery>,
) -> ApiResult<Json<Vec<NewsletterSubscriber>>> {
    Ok(Json(
        repo::message::list_subscribers(state.pool(), query.active_only, query.limit).await?,
    ))
}

async fn toggle_active(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<NewsletterSubscriber>> {
    let subscriber = repo::message::toggle_subscriber_active(state.pool(), id).await?;
    state
        .event_bus()
        .publish(CmsEvent::updated("newsletterSubscribers", id));
    Ok(Json(subscriber))
}

async fn remove_subscriber(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    repo::message::delete_subscriber(state.pool(), id).await?;
    state
        .event_bus()
        .publish(CmsEvent::deleted("newsletterSubscribers", id));
    Ok(Json(serde_json::json!({ "deleted": id })))
}
