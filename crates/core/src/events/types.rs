use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Events emitted after successful admin mutations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CmsEvent {
    Mutation(MutationEvent),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MutationAction {
    Created,
    Updated,
    Deleted,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationEvent {
    pub collection: String,
    pub document_id: String,
    pub action: MutationAction,
    pub timestamp: DateTime<Utc>,
}

impl CmsEvent {
    /// Convenience constructor used by route handlers after a mutation.
    pub fn mutation(collection: &str, document_id: impl ToString, action: MutationAction) -> Self {
        CmsEvent::Mutation(MutationEvent {
            collection: collection.to_string(),
            document_id: document_id.to_string(),
            action,
            timestamp: Utc::now(),
        })
    }

    pub fn created(collection: &str, id: Uuid) -> Self {
        Self::mutation(collection, id, MutationAction::Created)
    }

    pub fn updated(collection: &str, id: Uuid) -> Self {
        Self::mutation(collection, id, MutationAction::Updated)
    }

    pub fn deleted(collection: &str, id: Uuid) -> Self {
        Self::mutation(collection, id, MutationAction::Deleted)
    }
}
