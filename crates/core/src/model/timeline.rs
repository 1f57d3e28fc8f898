use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An entry on the school-history page ("notre histoire").
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub id: Uuid,
    pub year: i32,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "order")]
    pub sort_order: i32,
    pub visible: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTimelineEntry {
    pub year: i32,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "order", default)]
    pub sort_order: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntryPatch {
    pub year: Option<i32>,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "order")]
    pub sort_order: Option<i32>,
}
