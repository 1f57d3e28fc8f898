use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "content_kind", rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum ContentKind {
    Text,
    Image,
    RichText,
}

/// An editor override for hardcoded page copy.
///
/// `key` is a stable semantic identifier the front end uses as a
/// fallback-lookup slot (e.g. `home.hero.title`); components render their
/// built-in copy when no entry exists for the key.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ContentEntry {
    pub id: Uuid,
    pub key: String,
    pub content: String,
    pub kind: ContentKind,
    pub page: String,
    pub media_id: Option<Uuid>,
    pub alt: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Upsert payload: writing to an existing key replaces its content.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertContentEntry {
    pub key: String,
    pub content: String,
    pub kind: ContentKind,
    pub page: String,
    pub media_id: Option<Uuid>,
    pub alt: Option<String>,
}
