use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::StoreError;
use crate::model::content::{ContentEntry, UpsertContentEntry};

use super::clamp_limit;

const COLLECTION: &str = "contentEntries";

/// List overrides, optionally scoped to one page.
pub async fn list(
    pool: &PgPool,
    page: Option<&str>,
    limit: Option<i64>,
) -> Result<Vec<ContentEntry>, StoreError> {
    let entries = sqlx::query_as::<_, ContentEntry>(
        "SELECT * FROM content_entries
         WHERE ($1::text IS NULL OR page = $1)
         ORDER BY key
         LIMIT $2",
    )
    .bind(page)
    .bind(clamp_limit(limit))
    .fetch_all(pool)
    .await?;
    Ok(entries)
}

/// Fetch one override by its semantic key; components fall back to their
/// hardcoded copy when this returns `None`.
pub async fn get_by_key(pool: &PgPool, key: &str) -> Result<Option<ContentEntry>, StoreError> {
    let entry = sqlx::query_as::<_, ContentEntry>("SELECT * FROM content_entries WHERE key = $1")
        .bind(key)
        .fetch_optional(pool)
        .await?;
    Ok(entry)
}

/// Insert or replace the override for a key.
pub async fn upsert(pool: &PgPool, entry: UpsertContentEntry) -> Result<ContentEntry, StoreError> {
    if entry.key.trim().is_empty() {
        return Err(StoreError::Validation("key is required".into()));
    }
    let saved = sqlx::query_as::<_, ContentEntry>(
        "INSERT INTO content_entries (id, key, content, kind, page, media_id, alt, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         ON CONFLICT (key) DO UPDATE SET
           content = EXCLUDED.content,
           kind = EXCLUDED.kind,
           page = EXCLUDED.page,
           media_id = EXCLUDED.media_id,
           alt = EXCLUDED.alt,
           updated_at = EXCLUDED.updated_at
         RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(&entry.key)
    .bind(&entry.content)
    .bind(entry.kind)
    .bind(&entry.page)
    .bind(entry.media_id)
    .bind(&entry.alt)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;
    Ok(saved)
}

/// Remove an override; the page falls back to its built-in copy.
pub async fn delete(pool: &PgPool, key: &str) -> Result<(), StoreError> {
    let result = sqlx::query("DELETE FROM content_entries WHERE key = $1")
        .bind(key)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::not_found(COLLECTION));
    }
    Ok(())
}
