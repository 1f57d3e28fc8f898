pub mod auth;
pub mod blog;
pub mod content;
pub mod health;
pub mod media;
pub mod messages;
pub mod settings;
pub mod team;
pub mod testimonials;
pub mod timeline;
pub mod upload;

use axum::Router;
use tower_http::services::ServeDir;

use crate::state::AppState;

/// Assemble the full router with all route groups. Stored blobs are served
/// statically under `/uploads`.
pub fn build_router(state: AppState) -> Router {
    let uploads = ServeDir::new(state.storage().root());
    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(blog::routes())
        .merge(content::routes())
        .merge(team::routes())
        .merge(testimonials::routes())
        .merge(timeline::routes())
        .merge(media::routes())
        .merge(settings::routes())
        .merge(messages::routes())
        .merge(upload::routes())
        .nest_service("/uploads", uploads)
        .with_state(state)
}
