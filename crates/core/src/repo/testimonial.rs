use chrono::Utc;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::error::StoreError;
use crate::model::testimonial::{NewTestimonial, Testimonial, TestimonialPatch};

const COLLECTION: &str = "testimonials";

pub async fn list(
    pool: &PgPool,
    include_hidden: bool,
    featured_only: bool,
) -> Result<Vec<Testimonial>, StoreError> {
    let rows = sqlx::query_as::<_, Testimonial>(
        "SELECT * FROM testimonials
         WHERE ($1 OR visible) AND (NOT $2 OR featured)
         ORDER BY sort_order, created_at",
    )
    .bind(include_hidden)
    .bind(featured_only)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Defaults: visible, not featured, order 0 unless given.
pub async fn create(pool: &PgPool, new: NewTestimonial) -> Result<Testimonial, StoreError> {
    if new.quote.trim().is_empty() {
        return Err(StoreError::Validation("quote is required".into()));
    }
    if new.author.trim().is_empty() {
        return Err(StoreError::Validation("author is required".into()));
    }
    let now = Utc::now();
    let row = sqlx::query_as::<_, Testimonial>(
        "INSERT INTO testimonials
           (id, quote, author, role, avatar_url, visible, featured, sort_order,
            created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, TRUE, FALSE, $6, $7, $7)
         RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(&new.quote)
    .bind(&new.author)
    .bind(&new.role)
    .bind(&new.avatar_url)
    .bind(new.sort_order)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    patch: TestimonialPatch,
) -> Result<Testimonial, StoreError> {
    let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE testimonials SET updated_at = ");
    qb.push_bind(Utc::now());
    if let Some(quote) = patch.quote {
        qb.push(", quote = ").push_bind(quote);
    }
    if let Some(author) = patch.author {
        qb.push(", author = ").push_bind(author);
    }
    if let Some(role) = patch.role {
        qb.push(", role = ").push_bind(role);
    }
    if let Some(avatar_url) = patch.avatar_url {
        qb.push(", avatar_url = ").push_bind(avatar_url);
    }
    if let Some(sort_order) = patch.sort_order {
        qb.push(", sort_order = ").push_bind(sort_order);
    }
    qb.push(" WHERE id = ").push_bind(id);
    qb.push(" RETURNING *");
    qb.build_query_as::<Testimonial>()
        .fetch_optional(pool)
        .await?
        .ok_or(StoreError::not_found(COLLECTION))
}

/// Flips only `visible`; every other field is untouched.
pub async fn toggle_visible(pool: &PgPool, id: Uuid) -> Result<Testimonial, StoreError> {
    sqlx::query_as::<_, Testimonial>(
        "UPDATE testimonials SET visible = NOT visible, updated_at = $2 WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?
    .ok_or(StoreError::not_found(COLLECTION))
}

/// Flips only `featured`; every other field is untouched.
pub async fn toggle_featured(pool: &PgPool, id: Uuid) -> Result<Testimonial, StoreError> {
    sqlx::query_as::<_, Testimonial>(
        "UPDATE testimonials SET featured = NOT featured, updated_at = $2 WHERE id = $1 RETURNING *",
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
        let result =
            sqlx::query("UPDATE testimonials SET sort_order = $2, updated_at = $3 WHERE id = $1")
                .bind(id)
                .bind(position as i32)
                .bind(now)
                .execute(&mut *tx)
                .await?;
        if result.rows_affected() == 0 {
            tracing::warn!(%id, "reorder skipped unknown testimonial");
        }
    }
    tx.commit().await?;
    Ok(())
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), StoreError> {
    let result = sqlx::query("DELETE FROM testimonials WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::not_found(COLLECTION));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::test_support;

    fn new_testimonial() -> NewTestimonial {
        NewTestimonial {
            quote: "Une école où nos enfants s'épanouissent.".into(),
            author: "Claire Martin".into(),
            role: Some("Parent d'élève".into()),
            avatar_url: None,
            sort_order: 0,
        }
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL"]
    async fn new_testimonials_start_visible_and_unfeatured() {
        let pool = test_support::pool().await;
        let t = create(&pool, new_testimonial()).await.unwrap();

        assert!(t.visible);
        assert!(!t.featured);
        assert_eq!(t.sort_order, 0);

        delete(&pool, t.id).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL"]
    async fn toggles_flip_one_flag_and_nothing_else() {
        let pool = test_support::pool().await;
        let t = create(&pool, new_testimonial()).await.unwrap();

        let hidden = toggle_visible(&pool, t.id).await.unwrap();
        assert!(!hidden.visible);
        assert_eq!(hidden.featured, t.featured);
        assert_eq!(hidden.quote, t.quote);
        assert_eq!(hidden.sort_order, t.sort_order);

        let shown = toggle_visible(&pool, t.id).await.unwrap();
        assert!(shown.visible);

        let starred = toggle_featured(&pool, t.id).await.unwrap();
        assert!(starred.featured);
        assert!(starred.visible);

        delete(&pool, t.id).await.unwrap();
    }
}
