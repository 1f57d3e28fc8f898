use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{is_unique_violation, StoreError};
use crate::model::message::{ContactMessage, NewContactMessage, NewsletterSubscriber};

use super::clamp_limit;

const CONTACT: &str = "contactMessages";
const NEWSLETTER: &str = "newsletterSubscribers";

// Contact form submissions.

pub async fn create_contact(
    pool: &PgPool,
    new: NewContactMessage,
) -> Result<ContactMessage, StoreError> {
    if new.email.trim().is_empty() || !new.email.contains('@') {
        return Err(StoreError::Validation("a valid email is required".into()));
    }
    if new.body.trim().is_empty() {
        return Err(StoreError::Validation("message body is required".into()));
    }
    let message = sqlx::query_as::<_, ContactMessage>(
        "INSERT INTO contact_messages (id, name, email, subject, body, read, created_at)
         VALUES ($1, $2, $3, $4, $5, FALSE, $6)
         RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(&new.name)
    .bind(&new.email)
    .bind(&new.subject)
    .bind(&new.body)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;
    Ok(message)
}

pub async fn list_contact(
    pool: &PgPool,
    unread_only: bool,
    limit: Option<i64>,
) -> Result<Vec<ContactMessage>, StoreError> {
    let messages = sqlx::query_as::<_, ContactMessage>(
        "SELECT * FROM contact_messages
         WHERE (NOT $1 OR NOT read)
         ORDER BY created_at DESC
         LIMIT $2",
    )
    .bind(unread_only)
    .bind(clamp_limit(limit))
    .fetch_all(pool)
    .await?;
    Ok(messages)
}

pub async fn toggle_contact_read(pool: &PgPool, id: Uuid) -> Result<ContactMessage, StoreError> {
    sqlx::query_as::<_, ContactMessage>(
        "UPDATE contact_messages SET read = NOT read WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(StoreError::not_found(CONTACT))
}

pub async fn delete_contact(pool: &PgPool, id: Uuid) -> Result<(), StoreError> {
    let result = sqlx::query("DELETE FROM contact_messages WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::not_found(CONTACT));
    }
    Ok(())
}

// Newsletter subscribers.

/// Subscribe an address. Duplicates hit the unique constraint on `email`
/// and surface as a conflict.
pub async fn subscribe(pool: &PgPool, email: &str) -> Result<NewsletterSubscriber, StoreError> {
    let email = email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(StoreError::Validation("a valid email is required".into()));
    }
    let subscriber = sqlx::query_as::<_, NewsletterSubscriber>(
        "INSERT INTO newsletter_subscribers (id, email, active, subscribed_at)
         VALUES ($1, $2, TRUE, $3)
         RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(&email)
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
    Ok(subscriber)
}

pub async fn list_subscribers(
    pool: &PgPool,
    active_only: bool,
    limit: Option<i64>,
) -> Result<Vec<NewsletterSubscriber>, StoreError> {
    let subscribers = sqlx::query_as::<_, NewsletterSubscriber>(
        "SELECT * FROM newsletter_subscribers
         WHERE (NOT $1 OR active)
         ORDER BY subscribed_at DESC
         LIMIT $2",
    )
    .bind(active_only)
    .bind(clamp_limit(limit))
    .fetch_all(pool)
    .await?;
    Ok(subscribers)
}

pub async fn toggle_subscriber_active(
    pool: &PgPool,
    id: Uuid,
) -> Result<NewsletterSubscriber, StoreError> {
    sqlx::query_as::<_, NewsletterSubscriber>(
        "UPDATE newsletter_subscribers SET active = NOT active WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(StoreError::not_found(NEWSLETTER))
}

pub async fn delete_subscriber(pool: &PgPool, id: Uuid) -> Result<(), StoreError> {
    let result = sqlx::query("DELETE FROM newsletter_subscribers WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::not_found(NEWSLETTER));
    }
    Ok(())
}
