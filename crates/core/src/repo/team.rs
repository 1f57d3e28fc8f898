use chrono::Utc;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::error::StoreError;
use crate::model::team::{NewTeamMember, TeamMember, TeamMemberPatch};

const COLLECTION: &str = "teamMembers";

/// Members in display order. Hidden members only appear for the admin.
pub async fn list(pool: &PgPool, include_hidden: bool) -> Result<Vec<TeamMember>, StoreError> {
    let members = sqlx::query_as::<_, TeamMember>(
        "SELECT * FROM team_members
         WHERE ($1 OR visible)
         ORDER BY sort_order, created_at",
    )
    .bind(include_hidden)
    .fetch_all(pool)
    .await?;
    Ok(members)
}

/// New members default to visible.
pub async fn create(pool: &PgPool, new: NewTeamMember) -> Result<TeamMember, StoreError> {
    if new.name.trim().is_empty() {
        return Err(StoreError::Validation("name is required".into()));
    }
    let now = Utc::now();
    let member = sqlx::query_as::<_, TeamMember>(
        "INSERT INTO team_members
           (id, name, role, bio, photo_url, sort_order, visible, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, TRUE, $7, $7)
         RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(&new.name)
    .bind(&new.role)
    .bind(&new.bio)
    .bind(&new.photo_url)
    .bind(new.sort_order)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(member)
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    patch: TeamMemberPatch,
) -> Result<TeamMember, StoreError> {
    let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE team_members SET updated_at = ");
    qb.push_bind(Utc::now());
    if let Some(name) = patch.name {
        qb.push(", name = ").push_bind(name);
    }
    if let Some(role) = patch.role {
        qb.push(", role = ").push_bind(role);
    }
    if let Some(bio) = patch.bio {
        qb.push(", bio = ").push_bind(bio);
    }
    if let Some(photo_url) = patch.photo_url {
        qb.push(", photo_url = ").push_bind(photo_url);
    }
    if let Some(sort_order) = patch.sort_order {
        qb.push(", sort_order = ").push_bind(sort_order);
    }
    qb.push(" WHERE id = ").push_bind(id);
    qb.push(" RETURNING *");
    qb.build_query_as::<TeamMember>()
        .fetch_optional(pool)
        .await?
        .ok_or(StoreError::not_found(COLLECTION))
}

/// Flip visibility in SQL so the toggle cannot lose a concurrent write.
pub async fn toggle_visible(pool: &PgPool, id: Uuid) -> Result<TeamMember, StoreError> {
    sqlx::query_as::<_, TeamMember>(
        "UPDATE team_members SET visible = NOT visible, updated_at = $2 WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?
    .ok_or(StoreError::not_found(COLLECTION))
}

/// Rewrite `sort_order` to match the given id sequence, in one transaction.
/// Ids not present in the table are skipped.
pub async fn reorder(pool: &PgPool, ids: &[Uuid]) -> Result<(), StoreError> {
    let now = Utc::now();
    let mut tx = pool.begin().await?;
    for (position, id) in ids.iter().enumerate() {
        let result =
            sqlx::query("UPDATE team_members SET sort_order = $2, updated_at = $3 WHERE id = $1")
                .bind(id)
                .bind(position as i32)
                .bind(now)
                .execute(&mut *tx)
                .await?;
        if result.rows_affected() == 0 {
            tracing::warn!(%id, "reorder skipped unknown team member");
        }
    }
    tx.commit().await?;
    Ok(())
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), StoreError> {
    let result = sqlx::query("DELETE FROM team_members WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::not_found(COLLECTION));
    }
    Ok(())
}
