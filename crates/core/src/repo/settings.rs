use chrono::Utc;
use serde_json::json;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::error::StoreError;
use crate::model::settings::{SiteSettings, SiteSettingsPatch};

/// Fetch the singleton settings row, creating it with defaults on first
/// access so the admin form always has something to edit.
pub async fn get(pool: &PgPool) -> Result<SiteSettings, StoreError> {
    if let Some(settings) =
        sqlx::query_as::<_, SiteSettings>("SELECT * FROM site_settings WHERE id = 1")
            .fetch_optional(pool)
            .await?
    {
        return Ok(settings);
    }
    let created = sqlx::query_as::<_, SiteSettings>(
        "INSERT INTO site_settings
           (id, school_name, social_links, opening_hours, departments, updated_at)
         VALUES (1, $1, $2, $3, $4, $5)
         ON CONFLICT (id) DO UPDATE SET id = site_settings.id
         RETURNING *",
    )
    .bind("École")
    .bind(json!({}))
    .bind(json!({}))
    .bind(json!([]))
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;
    Ok(created)
}

/// Patch the singleton. Only provided fields are written.
pub async fn update(pool: &PgPool, patch: SiteSettingsPatch) -> Result<SiteSettings, StoreError> {
    // Make sure the row exists before patching it.
    let _ = get(pool).await?;

    let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE site_settings SET updated_at = ");
    qb.push_bind(Utc::now());
    if let Some(school_name) = patch.school_name {
        qb.push(", school_name = ").push_bind(school_name);
    }
    if let Some(tagline) = patch.tagline {
        qb.push(", tagline = ").push_bind(tagline);
    }
    if let Some(contact_email) = patch.contact_email {
        qb.push(", contact_email = ").push_bind(contact_email);
    }
    if let Some(contact_phone) = patch.contact_phone {
        qb.push(", contact_phone = ").push_bind(contact_phone);
    }
    if let Some(address) = patch.address {
        qb.push(", address = ").push_bind(address);
    }
    if let Some(social_links) = patch.social_links {
        qb.push(", social_links = ").push_bind(social_links);
    }
    if let Some(opening_hours) = patch.opening_hours {
        qb.push(", opening_hours = ").push_bind(opening_hours);
    }
    if let Some(departments) = patch.departments {
        qb.push(", departments = ").push_bind(departments);
    }
    qb.push(" WHERE id = 1 RETURNING *");
    let settings = qb.build_query_as::<SiteSettings>().fetch_one(pool).await?;
    Ok(settings)
}
