use chrono::Utc;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::error::StoreError;
use crate::model::media::{MediaItem, MediaKind, MediaPatch, NewMediaItem};

use super::clamp_limit;

const COLLECTION: &str = "media";

pub async fn list(
    pool: &PgPool,
    kind: Option<MediaKind>,
    limit: Option<i64>,
) -> Result<Vec<MediaItem>, StoreError> {
    let items = sqlx::query_as::<_, MediaItem>(
        "SELECT * FROM media
         WHERE ($1::media_kind IS NULL OR kind = $1)
         ORDER BY uploaded_at DESC
         LIMIT $2",
    )
    .bind(kind)
    .bind(clamp_limit(limit))
    .fetch_all(pool)
    .await?;
    Ok(items)
}

pub async fn get(pool: &PgPool, id: Uuid) -> Result<MediaItem, StoreError> {
    sqlx::query_as::<_, MediaItem>("SELECT * FROM media WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(StoreError::not_found(COLLECTION))
}

pub async fn create(pool: &PgPool, new: NewMediaItem) -> Result<MediaItem, StoreError> {
    let now = Utc::now();
    let item = sqlx::query_as::<_, MediaItem>(
        "INSERT INTO media
           (id, url, name, size, kind, width, height, alt, tags, uploaded_by,
            uploaded_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $11)
         RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(&new.url)
    .bind(&new.name)
    .bind(new.size)
    .bind(new.kind)
    .bind(new.width)
    .bind(new.height)
    .bind(&new.alt)
    .bind(&new.tags)
    .bind(&new.uploaded_by)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(item)
}

/// Patch the editable metadata (name, alt text, tags). The URL, size, and
/// dimensions describe the stored blob and never change.
pub async fn update(pool: &PgPool, id: Uuid, patch: MediaPatch) -> Result<MediaItem, StoreError> {
    let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE media SET updated_at = ");
    qb.push_bind(Utc::now());
    if let Some(name) = patch.name {
        qb.push(", name = ").push_bind(name);
    }
    if let Some(alt) = patch.alt {
        qb.push(", alt = ").push_bind(alt);
    }
    if let Some(tags) = patch.tags {
        qb.push(", tags = ").push_bind(tags);
    }
    qb.push(" WHERE id = ").push_bind(id);
    qb.push(" RETURNING *");
    qb.build_query_as::<MediaItem>()
        .fetch_optional(pool)
        .await?
        .ok_or(StoreError::not_found(COLLECTION))
}

/// Delete the metadata row, returning it so the caller can remove the blob.
/// References to the URL held elsewhere are not retracted.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<MediaItem, StoreError> {
    sqlx::query_as::<_, MediaItem>("DELETE FROM media WHERE id = $1 RETURNING *")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(StoreError::not_found(COLLECTION))
}
