use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StoreError;

/// JWT claims for an admin session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: Uuid,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issue an HS256 token for the given user, valid for `ttl_secs`.
pub fn issue(secret: &str, user_id: Uuid, email: &str, ttl_secs: i64) -> Result<String, StoreError> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        iat: now,
        exp: now + ttl_secs,
    };
    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?)
}

/// Verify a token's signature and expiry, returning its claims.
pub fn verify(secret: &str, token: &str) -> Result<Claims, StoreError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn round_trip_preserves_subject() {
        let id = Uuid::new_v4();
        let token = issue(SECRET, id, "admin@ecole.test", 3600).unwrap();
        let claims = verify(SECRET, &token).unwrap();
        assert_eq!(claims.sub, id);
        assert_eq!(claims.email, "admin@ecole.test");
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue(SECRET, Uuid::new_v4(), "a@b.c", 3600).unwrap();
        assert!(verify("other-secret", &token).is_err());
    }

    #[test]
    fn tampered_token_is_rejected() {
        let token = issue(SECRET, Uuid::new_v4(), "a@b.c", 3600).unwrap();
        let tampered = format!("{}x", token);
        assert!(verify(SECRET, &tampered).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        // Default validation allows 60s leeway, so expire well in the past.
        let token = issue(SECRET, Uuid::new_v4(), "a@b.c", -300).unwrap();
        assert!(verify(SECRET, &token).is_err());
    }
}
