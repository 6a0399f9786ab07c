use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::CaseStatus;

/// One patient encounter under triage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub created_by_user_id: Uuid,
    pub area_id: Option<Uuid>,
    pub description: String,
    pub language: String,
    pub status: CaseStatus,
    pub patient_name: Option<String>,
    pub patient_age: Option<u32>,
    pub location: Option<String>,
    pub audio_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input for case creation. `requested_worker_id` is an optional proposal
/// validated against role and area membership before an assignment is made.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCase {
    pub patient_id: Uuid,
    pub created_by_user_id: Uuid,
    #[serde(default)]
    pub area_id: Option<Uuid>,
    pub description: String,
    pub language: String,
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub patient_age: Option<u32>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub audio_url: Option<String>,
    #[serde(default)]
    pub requested_worker_id: Option<Uuid>,
    /// Patient context forwarded to the classifier, not persisted on the case.
    #[serde(default)]
    pub medical_history: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
}
