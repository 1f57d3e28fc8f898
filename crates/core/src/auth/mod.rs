//! Authentication primitives: argon2 password hashing and HS256 JWTs.
//!
//! Sessions are stateless; sign-out is a client-side token discard.

pub mod password;
pub mod token;
