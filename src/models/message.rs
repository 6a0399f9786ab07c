use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{ActorRole, MessageKind};

/// Append-only note or communication attached to a case.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseMessage {
    pub id: Uuid,
    pub case_id: Uuid,
    pub author_id: Uuid,
    pub author_role: ActorRole,
    pub kind: MessageKind,
    pub content: String,
    pub created_at: NaiveDateTime,
}
