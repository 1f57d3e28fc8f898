use tower_http::cors::{Any, CorsLayer};

/// CORS for the public site and the admin SPA. Permissive; the API carries
/// no cookies, auth is a bearer header.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
