use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::AssignmentStatus;

/// Binding of a case to at most one worker and/or one doctor.
/// A case has at most one assignment row; re-assignment updates it.
/// `worker_id = None` with an area-scoped case is the unclaimed
/// placeholder created at case intake.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: Uuid,
    pub case_id: Uuid,
    pub worker_id: Option<Uuid>,
    pub doctor_id: Option<Uuid>,
    pub status: AssignmentStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
