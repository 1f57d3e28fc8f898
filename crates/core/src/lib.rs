//! Domain layer of the school CMS: models, Postgres repositories, slug
//! handling, auth primitives, and the in-process event bus.
//!
//! Everything here is consumed by the `ecole-api` HTTP crate; nothing in
//! this crate knows about axum or request/response shapes.

pub mod auth;
pub mod error;
pub mod events;
pub mod model;
pub mod repo;
pub mod slug;

pub use error::StoreError;
