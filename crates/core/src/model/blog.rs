use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Publication state of a blog post. "draft → published" is a plain field
/// toggle, not a state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "blog_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BlogStatus {
    Draft,
    Published,
}

/// A journal article. `slug` is unique (enforced by a DB constraint in
/// addition to the friendly pre-insert check).
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub excerpt: Option<String>,
    pub body: Option<String>,
    pub cover_url: Option<String>,
    pub cover_alt: Option<String>,
    pub author: Option<String>,
    pub status: BlogStatus,
    pub featured: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBlogPost {
    pub title: String,
    /// Explicit slug; derived from the title when absent.
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub body: Option<String>,
    pub cover_url: Option<String>,
    pub cover_alt: Option<String>,
    pub author: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

/// Patch: only provided fields are written. `Option<Option<_>>` would let
/// callers null out a field, but the admin UI never does that, so absent
/// means "leave unchanged" and an explicit value always overwrites.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostPatch {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub body: Option<String>,
    pub cover_url: Option<String>,
    pub cover_alt: Option<String>,
    pub author: Option<String>,
    pub featured: Option<bool>,
}
