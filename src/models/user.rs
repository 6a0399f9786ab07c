use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::ActorRole;

/// Identity record resolved through the directory collaborator.
/// `areas` lists the coverage areas a worker or doctor serves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub role: ActorRole,
    pub areas: Vec<Uuid>,
}

/// The authenticated party behind a lifecycle operation. Resolved by the
/// transport layer from its session; the core only needs id and role.
#[derive(Debug, Clone)]
pub struct Actor {
    pub user_id: Uuid,
    pub role: ActorRole,
}

impl Actor {
    pub fn new(user_id: Uuid, role: ActorRole) -> Self {
        Self { user_id, role }
    }
}
