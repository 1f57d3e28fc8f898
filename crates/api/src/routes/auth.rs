use axum::{extract::State, routing::get, routing::post, Json, Router};
use ecole_core::auth::token;
use ecole_core::model::user::UserProfile;
use ecole_core::repo;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{ApiError, ApiResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/auth/signup", post(signup))
        .route("/v1/auth/signin", post(signin))
        .route("/v1/auth/signout", post(signout))
        .route("/v1/auth/me", get(me))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Credentials {
    email: String,
    password: String,
    display_name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionResponse {
    token: String,
    user: UserProfile,
}

/// Create an admin account. Open signup is disabled by default; the first
/// account can always be created so a fresh deployment can bootstrap.
async fn signup(
    State(state): State<AppState>,
    Json(body): Json<Credentials>,
) -> ApiResult<Json<SessionResponse>> {
    if !state.config().allow_signup && repo::user::any_exist(state.pool()).await? {
        return Err(ApiError::Unauthorized);
    }
    let user = repo::user::create(
        state.pool(),
        &body.email,
        &body.password,
        body.display_name.as_deref(),
    )
    .await?;
    tracing::info!(email = %user.email, "admin account created");
    let (id, email) = (user.id, user.email.clone());
    session_response(&state, id, &email, user.into())
}

async fn signin(
    State(state): State<AppState>,
    Json(body): Json<Credentials>,
) -> ApiResult<Json<SessionResponse>> {
    let user = repo::user::authenticate(state.pool(), &body.email, &body.password).await?;
    let (id, email) = (user.id, user.email.clone());
    session_response(&state, id, &email, user.into())
}

/// Sessions are stateless JWTs; sign-out just acknowledges so the client
/// can discard its token.
async fn signout() -> Json<Value> {
    Json(json!({ "success": true }))
}

async fn me(State(state): State<AppState>, AuthUser(claims): AuthUser) -> ApiResult<Json<UserProfile>> {
    let user = repo::user::get(state.pool(), claims.sub).await?;
    Ok(Json(user.into()))
}

fn session_response(
    state: &AppState,
    user_id: uuid::Uuid,
    email: &str,
    user: UserProfile,
) -> ApiResult<Json<SessionResponse>> {
    let config = state.config();
    let token = token::issue(&config.jwt_secret, user_id, email, config.jwt_ttl_secs)?;
    Ok(Json(SessionResponse { token, user }))
}
