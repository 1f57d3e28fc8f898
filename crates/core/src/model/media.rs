use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "media_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Classify an uploaded file by its MIME type. Anything that is not a
    /// video is treated as an image; the gallery only distinguishes the two.
    pub fn from_mime(mime: Option<&str>) -> Self {
        match mime {
            Some(m) if m.starts_with("video/") => MediaKind::Video,
            _ => MediaKind::Image,
        }
    }
}

/// Metadata for a stored blob. `url` is the public address; deleting a row
/// does not retract references to that URL held by other documents.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: Uuid,
    pub url: String,
    pub name: String,
    pub size: i64,
    pub kind: MediaKind,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub alt: Option<String>,
    pub tags: Vec<String>,
    pub uploaded_by: String,
    pub uploaded_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMediaItem {
    pub url: String,
    pub name: String,
    pub size: i64,
    pub kind: MediaKind,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub alt: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub uploaded_by: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaPatch {
    pub name: Option<String>,
    pub alt: Option<String>,
    pub tags: Option<Vec<String>>,
}
