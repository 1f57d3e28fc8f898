//! Postgres repositories, one module per collection.
//!
//! Conventions shared by every module:
//! - list operations clamp `limit` to [`MAX_LIST_LIMIT`];
//! - create stamps `created_at`/`updated_at`, update always bumps
//!   `updated_at` even when no other field changed;
//! - patch updates write only the fields the caller provided, assembled
//!   with `sqlx::QueryBuilder`;
//! - toggles negate the target column in SQL, so concurrent toggles cannot
//!   lose a read-modify-write;
//! - deletes have no cascades and no referential-integrity checks.

pub mod blog;
pub mod content;
pub mod media;
pub mod message;
pub mod settings;
pub mod team;
pub mod testimonial;
pub mod timeline;
pub mod user;

/// Hard cap on list sizes; requests above it are clamped, not rejected.
pub const MAX_LIST_LIMIT: i64 = 100;

/// Page size used when a caller passes no limit.
pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// Clamp an optional caller-provided limit into [1, MAX_LIST_LIMIT].
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, MAX_LIST_LIMIT)
}

/// Shared setup for the database-backed tests. Those tests are `#[ignore]`d
/// so the default suite runs without Postgres; run them with
/// `DATABASE_URL=... cargo test -- --ignored`.
#[cfg(test)]
pub(crate) mod test_support {
    use sqlx::postgres::PgPoolOptions;
    use sqlx::PgPool;

    pub async fn pool() -> PgPool {
        let url =
            std::env::var("DATABASE_URL").expect("DATABASE_URL must point at a test database");
        let pool = PgPoolOptions::new()
            .max_connections(2)
            .connect(&url)
            .await
            .expect("connect to test database");
        sqlx::migrate!("../../migrations")
            .run(&pool)
            .await
            .expect("apply migrations");
        pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_limit_bounds() {
        assert_eq!(clamp_limit(None), DEFAULT_LIST_LIMIT);
        assert_eq!(clamp_limit(Some(10)), 10);
        assert_eq!(clamp_limit(Some(10_000)), MAX_LIST_LIMIT);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(-5)), 1);
    }
}
