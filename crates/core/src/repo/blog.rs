use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::error::{is_unique_violation, StoreError};
use crate::model::blog::{BlogPost, BlogPostPatch, BlogStatus, NewBlogPost};
use crate::slug::{is_valid_slug, slugify};

use super::clamp_limit;

const COLLECTION: &str = "blogPosts";

/// Admin listing: newest first, optional status filter.
pub async fn list(
    pool: &PgPool,
    status: Option<BlogStatus>,
    limit: Option<i64>,
) -> Result<Vec<BlogPost>, StoreError> {
    let posts = sqlx::query_as::<_, BlogPost>(
        "SELECT * FROM blog_posts
         WHERE ($1::blog_status IS NULL OR status = $1)
         ORDER BY created_at DESC
         LIMIT $2",
    )
    .bind(status)
    .bind(clamp_limit(limit))
    .fetch_all(pool)
    .await?;
    Ok(posts)
}

/// Public listing: published posts only, newest publication first.
pub async fn list_published(
    pool: &PgPool,
    featured_only: bool,
    limit: Option<i64>,
) -> Result<Vec<BlogPost>, StoreError> {
    let posts = sqlx::query_as::<_, BlogPost>(
        "SELECT * FROM blog_posts
         WHERE status = 'published' AND (NOT $1 OR featured)
         ORDER BY published_at DESC
         LIMIT $2",
    )
    .bind(featured_only)
    .bind(clamp_limit(limit))
    .fetch_all(pool)
    .await?;
    Ok(posts)
}

/// Look up a post by slug. Drafts are hidden unless `include_drafts` is set
/// (admin preview).
pub async fn get_by_slug(
    pool: &PgPool,
    slug: &str,
    include_drafts: bool,
) -> Result<Option<BlogPost>, StoreError> {
    let post = sqlx::query_as::<_, BlogPost>(
        "SELECT * FROM blog_posts
         WHERE slug = $1 AND ($2 OR status = 'published')",
    )
    .bind(slug)
    .bind(include_drafts)
    .fetch_optional(pool)
    .await?;
    Ok(post)
}

pub async fn get(pool: &PgPool, id: Uuid) -> Result<BlogPost, StoreError> {
    sqlx::query_as::<_, BlogPost>("SELECT * FROM blog_posts WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(StoreError::not_found(COLLECTION))
}

/// Create a draft post.
///
/// The slug is the provided one (validated) or derived from the title. A
/// friendly existence check runs first; the unique constraint on `slug`
/// closes the check-then-insert race, and a constraint hit maps back to the
/// same error.
pub async fn create(pool: &PgPool, new: NewBlogPost) -> Result<BlogPost, StoreError> {
    if new.title.trim().is_empty() {
        return Err(StoreError::Validation("title is required".into()));
    }
    let slug = match &new.slug {
        Some(s) if is_valid_slug(s) => s.clone(),
        Some(s) => return Err(StoreError::Validation(format!("invalid slug: {s}"))),
        None => {
            let derived = slugify(&new.title);
            if derived.is_empty() {
                return Err(StoreError::Validation(
                    "title yields an empty slug".into(),
                ));
            }
            derived
        }
    };

    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM blog_posts WHERE slug = $1)")
        .bind(&slug)
        .fetch_one(pool)
        .await?;
    if exists {
        return Err(StoreError::SlugExists(slug));
    }

    // Derive a plaintext excerpt from the body when the editor left it blank.
    let excerpt = new
        .excerpt
        .or_else(|| new.body.as_deref().map(|b| ecole_richtext::plain_text_excerpt(b, 200)))
        .filter(|e| !e.is_empty());

    let now = Utc::now();
    let post = sqlx::query_as::<_, BlogPost>(
        "INSERT INTO blog_posts
           (id, slug, title, excerpt, body, cover_url, cover_alt, author,
            status, featured, published_at, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'draft', $9, NULL, $10, $10)
         RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(&slug)
    .bind(&new.title)
    .bind(&excerpt)
    .bind(&new.body)
    .bind(&new.cover_url)
    .bind(&new.cover_alt)
    .bind(&new.author)
    .bind(new.featured)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            StoreError::SlugExists(slug.clone())
        } else {
            StoreError::Database(e)
        }
    })?;
    Ok(post)
}

/// Assemble the patch UPDATE. `updated_at` is always written, provided
/// fields exactly once each. Split out so the whitelisting is testable
/// without a database.
fn build_update(
    id: Uuid,
    patch: BlogPostPatch,
    now: DateTime<Utc>,
) -> Result<QueryBuilder<'static, Postgres>, StoreError> {
    if let Some(slug) = &patch.slug {
        if !is_valid_slug(slug) {
            return Err(StoreError::Validation(format!("invalid slug: {slug}")));
        }
    }
    let mut qb = QueryBuilder::new("UPDATE blog_posts SET updated_at = ");
    qb.push_bind(now);
    if let Some(title) = patch.title {
        qb.push(", title = ").push_bind(title);
    }
    if let Some(slug) = patch.slug {
        qb.push(", slug = ").push_bind(slug);
    }
    if let Some(excerpt) = patch.excerpt {
        qb.push(", excerpt = ").push_bind(excerpt);
    }
    if let Some(body) = patch.body {
        qb.push(", body = ").push_bind(body);
    }
    if let Some(cover_url) = patch.cover_url {
        qb.push(", cover_url = ").push_bind(cover_url);
    }
    if let Some(cover_alt) = patch.cover_alt {
        qb.push(", cover_alt = ").push_bind(cover_alt);
    }
    if let Some(author) = patch.author {
        qb.push(", author = ").push_bind(author);
    }
    if let Some(featured) = patch.featured {
        qb.push(", featured = ").push_bind(featured);
    }
    qb.push(" WHERE id = ").push_bind(id);
    qb.push(" RETURNING *");
    Ok(qb)
}

/// What a unique-violation on update should name: the slug the caller tried
/// to take, or the post itself when the patch carried no slug.
fn conflict_slug(patch_slug: Option<String>, id: Uuid) -> String {
    patch_slug.unwrap_or_else(|| format!("post {id}"))
}

/// Patch a post. Unspecified fields are left unchanged; `updated_at` always
/// moves.
pub async fn update(pool: &PgPool, id: Uuid, patch: BlogPostPatch) -> Result<BlogPost, StoreError> {
    let slug_for_conflict = patch.slug.clone();
    let mut qb = build_update(id, patch, Utc::now())?;
    qb.build_query_as::<BlogPost>()
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                StoreError::SlugExists(conflict_slug(slug_for_conflict, id))
            } else {
                StoreError::Database(e)
            }
        })?
        .ok_or(StoreError::not_found(COLLECTION))
}

/// Publish: status becomes `published` and `published_at` is the explicit
/// value when given, the current time otherwise.
pub async fn publish(
    pool: &PgPool,
    id: Uuid,
    published_at: Option<DateTime<Utc>>,
) -> Result<BlogPost, StoreError> {
    let now = Utc::now();
    sqlx::query_as::<_, BlogPost>(
        "UPDATE blog_posts
         SET status = 'published', published_at = $2, updated_at = $3
         WHERE id = $1
         RETURNING *",
    )
    .bind(id)
    .bind(published_at.unwrap_or(now))
    .bind(now)
    .fetch_optional(pool)
    .await?
    .ok_or(StoreError::not_found(COLLECTION))
}

/// Unpublish: back to draft. `published_at` is deliberately left in place so
/// re-publishing keeps the original date visible in the admin UI.
pub async fn unpublish(pool: &PgPool, id: Uuid) -> Result<BlogPost, StoreError> {
    sqlx::query_as::<_, BlogPost>(
        "UPDATE blog_posts SET status = 'draft', updated_at = $2 WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?
    .ok_or(StoreError::not_found(COLLECTION))
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), StoreError> {
    let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
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

    fn patch() -> BlogPostPatch {
        BlogPostPatch::default()
    }

    #[test]
    fn empty_patch_still_bumps_updated_at() {
        let qb = build_update(Uuid::new_v4(), patch(), Utc::now()).unwrap();
        let sql = qb.sql();
        assert!(sql.starts_with("UPDATE blog_posts SET updated_at = $1"));
        assert!(!sql.contains("title"));
        assert!(sql.contains("WHERE id ="));
        assert!(sql.ends_with("RETURNING *"));
    }

    #[test]
    fn provided_fields_appear_exactly_once() {
        let p = BlogPostPatch {
            title: Some("New title".into()),
            featured: Some(true),
            ..patch()
        };
        let qb = build_update(Uuid::new_v4(), p, Utc::now()).unwrap();
        let sql = qb.sql();
        assert_eq!(sql.matches("title =").count(), 1);
        assert_eq!(sql.matches("featured =").count(), 1);
        assert!(!sql.contains("excerpt ="));
        assert!(!sql.contains("body ="));
    }

    #[test]
    fn invalid_slug_in_patch_is_rejected() {
        let p = BlogPostPatch {
            slug: Some("Not A Slug".into()),
            ..patch()
        };
        assert!(matches!(
            build_update(Uuid::new_v4(), p, Utc::now()),
            Err(StoreError::Validation(_))
        ));
    }

    #[test]
    fn slug_conflict_names_the_slug_when_the_patch_has_one() {
        let id = Uuid::new_v4();
        assert_eq!(
            conflict_slug(Some("rentree-2026".into()), id),
            "rentree-2026"
        );
    }

    #[test]
    fn slug_conflict_falls_back_to_the_post_when_the_patch_has_none() {
        let id = Uuid::new_v4();
        let named = conflict_slug(None, id);
        assert!(!named.is_empty());
        assert!(named.contains(&id.to_string()));
    }

    mod db {
        use super::super::*;
        use crate::repo::test_support;

        fn draft(slug: &str) -> NewBlogPost {
            NewBlogPost {
                title: "Rentrée 2026".into(),
                slug: Some(slug.into()),
                excerpt: None,
                body: None,
                cover_url: None,
                cover_alt: None,
                author: None,
                featured: false,
            }
        }

        #[tokio::test]
        #[ignore = "requires DATABASE_URL"]
        async fn duplicate_slug_is_rejected_on_create() {
            let pool = test_support::pool().await;
            let slug = format!("rentree-{}", Uuid::new_v4());
            let first = create(&pool, draft(&slug)).await.unwrap();

            let err = create(&pool, draft(&slug)).await.unwrap_err();
            assert!(matches!(err, StoreError::SlugExists(s) if s == slug));

            delete(&pool, first.id).await.unwrap();
        }

        #[tokio::test]
        #[ignore = "requires DATABASE_URL"]
        async fn renaming_to_a_taken_slug_is_rejected() {
            let pool = test_support::pool().await;
            let taken = format!("portes-ouvertes-{}", Uuid::new_v4());
            let other = format!("kermesse-{}", Uuid::new_v4());
            let a = create(&pool, draft(&taken)).await.unwrap();
            let b = create(&pool, draft(&other)).await.unwrap();

            let p = BlogPostPatch {
                slug: Some(taken.clone()),
                ..Default::default()
            };
            let err = update(&pool, b.id, p).await.unwrap_err();
            assert!(matches!(err, StoreError::SlugExists(s) if s == taken));

            delete(&pool, a.id).await.unwrap();
            delete(&pool, b.id).await.unwrap();
        }

        #[tokio::test]
        #[ignore = "requires DATABASE_URL"]
        async fn published_listing_never_returns_drafts() {
            let pool = test_support::pool().await;
            let slug = format!("sortie-scolaire-{}", Uuid::new_v4());
            let post = create(&pool, draft(&slug)).await.unwrap();

            let listed = list_published(&pool, false, None).await.unwrap();
            assert!(listed.iter().all(|p| p.id != post.id));

            publish(&pool, post.id, None).await.unwrap();
            let listed = list_published(&pool, false, None).await.unwrap();
            assert!(listed.iter().any(|p| p.id == post.id));

            unpublish(&pool, post.id).await.unwrap();
            let listed = list_published(&pool, false, None).await.unwrap();
            assert!(listed.iter().all(|p| p.id != post.id));

            delete(&pool, post.id).await.unwrap();
        }
    }
}
