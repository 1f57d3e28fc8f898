use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::password::{hash_password, verify_password};
use crate::error::{is_unique_violation, StoreError};
use crate::model::user::User;

const COLLECTION: &str = "users";

pub async fn create(
    pool: &PgPool,
    email: &str,
    password: &str,
    display_name: Option<&str>,
) -> Result<User, StoreError> {
    let email = email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(StoreError::Validation("a valid email is required".into()));
    }
    if password.len() < 8 {
        return Err(StoreError::Validation(
            "password must be at least 8 characters".into(),
        ));
    }
    let hash = hash_password(password)?;
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (id, email, password_hash, display_name, created_at)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(&email)
    .bind(&hash)
    .bind(display_name)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            StoreError::EmailExists
        } else {
            StoreError::Database(e)
        }
    })?;
    Ok(user)
}

/// Check credentials. Unknown email and wrong password are indistinguishable
/// to the caller.
pub async fn authenticate(pool: &PgPool, email: &str, password: &str) -> Result<User, StoreError> {
    let email = email.trim().to_lowercase();
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(pool)
        .await?
        .ok_or(StoreError::InvalidCredentials)?;
    if !verify_password(password, &user.password_hash)? {
        return Err(StoreError::InvalidCredentials);
    }
    Ok(user)
}

pub async fn get(pool: &PgPool, id: Uuid) -> Result<User, StoreError> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(StoreError::not_found(COLLECTION))
}

/// Whether any admin account exists yet; used to allow the very first
/// signup even when open signup is disabled.
pub async fn any_exist(pool: &PgPool) -> Result<bool, StoreError> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users)")
        .fetch_one(pool)
        .await?;
    Ok(exists)
}
