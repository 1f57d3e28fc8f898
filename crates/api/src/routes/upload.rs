use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use ecole_core::model::media::{MediaKind, NewMediaItem};
use ecole_core::repo;
use serde_json::json;

use crate::middleware::auth::MaybeAuthUser;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/upload", post(upload))
}

/// `POST /api/upload` — multipart form with a single `file` field.
///
/// Unlike the rest of the API this endpoint reports with a
/// `{success, message}` body, and it tolerates partial failure: a missing
/// uploader identity falls back to "unknown", and a failed metadata insert
/// still reports the upload as successful with a null `mediaId`. The blob
/// is on disk either way.
async fn upload(
    State(state): State<AppState>,
    MaybeAuthUser(user): MaybeAuthUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let mut multipart = match multipart {
        Ok(m) => m,
        Err(_) => return fail(StatusCode::BAD_REQUEST, "expected multipart/form-data"),
    };

    let mut file: Option<(String, Option<String>, Vec<u8>)> = None;
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some("file") => {
                let name = field
                    .file_name()
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "file".to_string());
                let content_type = field.content_type().map(|c| c.to_string());
                match field.bytes().await {
                    Ok(bytes) => file = Some((name, content_type, bytes.to_vec())),
                    Err(err) => {
                        return fail(
                            StatusCode::BAD_REQUEST,
                            &format!("failed to read file field: {err}"),
                        )
                    }
                }
            }
            Ok(Some(_)) => continue,
            Ok(None) => break,
            Err(err) => {
                return fail(
                    StatusCode::BAD_REQUEST,
                    &format!("malformed multipart body: {err}"),
                )
            }
        }
    }
    let Some((name, content_type, bytes)) = file else {
        return fail(StatusCode::BAD_REQUEST, "missing file field");
    };
    if bytes.is_empty() {
        return fail(StatusCode::BAD_REQUEST, "file is empty");
    }

    let blob = match state.storage().store(&name, &bytes).await {
        Ok(blob) => blob,
        Err(err) => {
            tracing::error!("failed to store upload: {err}");
            return fail(StatusCode::INTERNAL_SERVER_ERROR, "failed to store file");
        }
    };

    let uploaded_by = user
        .map(|claims| claims.email)
        .unwrap_or_else(|| "unknown".to_string());

    let uploaded_at = chrono::Utc::now();
    let size = bytes.len() as i64;
    let media = repo::media::create(
        state.pool(),
        NewMediaItem {
            url: blob.url.clone(),
            name: name.clone(),
            size,
            kind: MediaKind::from_mime(content_type.as_deref()),
            width: None,
            height: None,
            alt: None,
            tags: Vec::new(),
            uploaded_by,
        },
    )
    .await;

    let media_id = match media {
        Ok(item) => {
            state
                .event_bus()
                .publish(ecole_core::events::types::CmsEvent::created("media", item.id));
            Some(item.id)
        }
        Err(err) => {
            // The blob is stored; report success and let the admin re-sync
            // the library later.
            tracing::warn!("upload stored but metadata insert failed: {err}");
            None
        }
    };

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "storageId": blob.storage_id,
            "mediaId": media_id,
            "url": blob.url,
            "name": name,
            "size": size,
            "uploadedAt": uploaded_at,
        })),
    )
        .into_response()
}

fn fail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "success": false, "message": message }))).into_response()
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::header::CONTENT_TYPE;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use crate::config::AppConfig;
    use crate::routes::build_router;
    use crate::state::AppState;
    use crate::storage::LocalStorage;
    use ecole_core::events::bus::EventBus;

    fn test_state() -> AppState {
        let config = AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            database_url: "postgres://postgres@localhost/ecole_test".into(),
            db_max_connections: 1,
            db_min_connections: 0,
            jwt_secret: "test-secret".into(),
            jwt_ttl_secs: 3600,
            allow_signup: false,
            upload_dir: std::env::temp_dir()
                .join(format!("ecole-upload-test-{}", uuid::Uuid::new_v4()))
                .to_string_lossy()
                .into_owned(),
            public_base_url: "http://localhost:3030".into(),
            max_upload_bytes: 1024 * 1024,
            event_bus_capacity: 16,
            log_level: "info".into(),
        };
        // Lazy pool: no connection is attempted until a query runs.
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect_lazy(&config.database_url)
            .expect("valid database url");
        let storage = LocalStorage::new(&config.upload_dir, &config.public_base_url);
        AppState::new(pool, config, EventBus::new(16), storage)
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn non_multipart_body_is_a_400() {
        let app = build_router(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/upload")
                    .header(CONTENT_TYPE, "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["success"], Value::Bool(false));
    }

    #[tokio::test]
    async fn multipart_without_file_field_is_a_400() {
        let boundary = "test-boundary";
        let body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"other\"\r\n\r\nvalue\r\n--{boundary}--\r\n"
        );

        let app = build_router(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/upload")
                    .header(
                        CONTENT_TYPE,
                        format!("multipart/form-data; boundary={boundary}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["success"], Value::Bool(false));
        assert_eq!(body["message"], Value::String("missing file field".into()));
    }

    #[tokio::test]
    async fn upload_survives_metadata_insert_failure() {
        // The pool is lazy and points at no live database, so the metadata
        // insert fails; the endpoint must still report success with a null
        // mediaId because the blob was stored.
        let state = test_state();
        state.storage().ensure_root().await.unwrap();
        let upload_root = state.storage().root().to_path_buf();

        let boundary = "test-boundary";
        let body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"note.txt\"\r\nContent-Type: text/plain\r\n\r\nbonjour\r\n--{boundary}--\r\n"
        );

        let app = build_router(state);
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/upload")
                    .header(
                        CONTENT_TYPE,
                        format!("multipart/form-data; boundary={boundary}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], Value::Bool(true));
        assert_eq!(body["mediaId"], Value::Null);
        assert_eq!(body["size"], Value::from(7));
        let storage_id = body["storageId"].as_str().unwrap();
        assert!(storage_id.ends_with("note.txt"));
        assert!(upload_root.join(storage_id).exists());

        tokio::fs::remove_dir_all(&upload_root).await.unwrap();
    }
}
