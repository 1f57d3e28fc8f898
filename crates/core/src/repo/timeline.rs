use chrono::Utc;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::error::StoreError;
use crate::model::timeline::{NewTimelineEntry, TimelineEntry, TimelineEntryPatch};

const COLLECTION: &str = "timelineEntries";

pub async fn list(pool: &PgPool, include_hidden: bool) -> Result<Vec<TimelineEntry>, StoreError> {
    let rows = sqlx::query_as::<_, TimelineEntry>(
        "SELECT * FROM timeline_entries
         WHERE ($1 OR visible)
         ORDER BY sort_order, year",
    )
    .bind(include_hidden)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn create(pool: &PgPool, new: NewTimelineEntry) -> Result<TimelineEntry, StoreError> {
    if new.title.trim().is_empty() {
        return Err(StoreError::Validation("title is required".into()));
    }
    let now = Utc::now();
    let row = sqlx::query_as::<_, TimelineEntry>(
        "INSERT INTO timeline_entries
           (id, year, title, description, sort_order, visible, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, TRUE, $6, $6)
         RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(new.year)
    .bind(&new.title)
    .bind(&new.description)
    .bind(new.sort_order)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    patch: TimelineEntryPatch,
) -> Result<TimelineEntry, StoreError> {
    let mut qb: QueryBuilder<Postgres> =
        QueryBuilder::new("UPDATE timeline_entries SET updated_at = ");
    qb.push_bind(Utc::now());
    if let Some(year) = patch.year {
        qb.push(", year = ").push_bind(year);
    }
    if let Some(title) = patch.title {
        qb.push(", title = ").push_bind(title);
    }
    if let Some(description) = patch.description {
        qb.push(", description = ").push_bind(description);
    }
    if let Some(sort_order) = patch.sort_order {
        qb.push(", sort_order = ").push_bind(sort_order);
    }
    qb.push(" WHERE id = ").push_bind(id);
    qb.push(" RETURNING *");
    qb.build_query_as::<TimelineEntry>()
        .fetch_optional(pool)
        .await?
        .ok_or(StoreError::not_found(COLLECTION))
}

pub async fn toggle_visible(pool: &PgPool, id: Uuid) -> Result<TimelineEntry, StoreError> {
    sqlx::query_as::<_, TimelineEntry>(
        "UPDATE timeline_entries SET visible = NOT visible, updated_at = $2
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?
    .ok_or(StoreError::not_found(COLLECTION))
}

pub async fn reorder(pool: &PgPool, ids: &[Uuid]) -> Result<(), StoreError> {
    let now = Utc::now();
    let mut tx = pool.begin().await?;
    for (position, id) in ids.iter().enumerate() {
        let result = sqlx::query(
            "UPDATE timeline_entries SET sort_order = $2, updated_at = $3 WHERE id = $1",
        )
        .bind(id)
        .bind(position as i32)
        .bind(now)
        .execute(&mut *tx)
        .await?;
        if result.rows_affected() == 0 {
            tracing::warn!(%id, "reorder skipped unknown timeline entry");
        }
    }
    tx.commit().await?;
    Ok(())
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), StoreError> {
    let result = sqlx::query("DELETE FROM timeline_entries WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::not_found(COLLECTION));
    }
    Ok(())
}
