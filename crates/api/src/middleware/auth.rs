use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use ecole_core::auth::token::{self, Claims};

use crate::error::ApiError;
use crate::state::AppState;

/// Extractor gating admin handlers: requires a valid bearer token.
pub struct AuthUser(pub Claims);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::Unauthorized)?;
        let claims = token::verify(&state.config().jwt_secret, bearer.token())
            .map_err(|_| ApiError::Unauthorized)?;
        Ok(AuthUser(claims))
    }
}

/// Best-effort identity: `None` when the request carries no valid token.
/// Used by the upload endpoint (uploader attribution) and blog preview.
pub struct MaybeAuthUser(pub Option<Claims>);

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuthUser(
            AuthUser::from_request_parts(parts, state)
                .await
                .ok()
                .map(|user| user.0),
        ))
    }
}
