use thiserror::Error;

/// Errors surfaced by repositories and auth.
///
/// Mutations fail loudly on invariant violations (duplicate slug, missing
/// target document); there is no retry layer, transient and permanent
/// failures are not distinguished.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{collection} not found")]
    NotFound { collection: &'static str },

    #[error("slug already exists: {0}")]
    SlugExists(String),

    #[error("email already registered")]
    EmailExists,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("password hash error: {0}")]
    PasswordHash(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    pub fn not_found(collection: &'static str) -> Self {
        StoreError::NotFound { collection }
    }
}

/// Postgres unique-violation code, used to map constraint hits back to
/// domain errors (duplicate slug, duplicate email).
pub const PG_UNIQUE_VIOLATION: &str = "23505";

/// Whether a database error is a unique-constraint violation.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.code().as_deref() == Some(PG_UNIQUE_VIOLATION),
        _ => false,
    }
}
