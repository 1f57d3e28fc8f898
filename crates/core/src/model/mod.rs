//! Row and wire types for every collection. Each row derives
//! `sqlx::FromRow` for the repositories and `Serialize` in camelCase for the
//! HTTP layer; patch types carry only the fields a caller chose to send.

pub mod blog;
pub mod content;
pub mod media;
pub mod message;
pub mod settings;
pub mod team;
pub mod testimonial;
pub mod timeline;
pub mod user;
