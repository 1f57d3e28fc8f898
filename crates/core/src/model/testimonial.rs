use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: Uuid,
    pub quote: String,
    pub author: String,
    pub role: Option<String>,
    pub avatar_url: Option<String>,
    pub visible: bool,
    pub featured: bool,
    #[serde(rename = "order")]
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creation payload. `visible` defaults to true, `featured` to false,
/// `order` to 0.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTestimonial {
    pub quote: String,
    pub author: String,
    pub role: Option<String>,
    pub avatar_url: Option<String>,
    #[serde(rename = "order", default)]
    pub sort_order: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialPatch {
    pub quote: Option<String>,
    pub author: Option<String>,
    pub role: Option<String>,
    pub avatar_url: Option<String>,
    #[serde(rename = "order")]
    pub sort_order: Option<i32>,
}
