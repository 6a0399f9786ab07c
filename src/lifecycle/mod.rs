//! Case lifecycle orchestration: creation, retriage, assignment, messages
//! and status transitions. The manager is constructed with its persistence,
//! identity and classifier collaborators injected, so it can be unit-tested
//! against an in-memory database and a scripted classifier.

mod service;

pub use service::CaseLifecycle;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::enums::CaseStatus;
use crate::models::{Assignment, Case, CaseMessage, TriageRecord, UserProfile};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum LifecycleError {
    /// Missing or malformed input; maps to a 4xx at the transport layer.
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    /// Actor is authenticated but not allowed to perform the operation.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

// ---------------------------------------------------------------------------
// Collaborator traits
// ---------------------------------------------------------------------------

/// Persistence collaborator. Triage records are append-only: the trait
/// deliberately has no update or delete for them, and `latest_triage`
/// resolves "current" as the most recently created record.
pub trait CaseStore {
    fn insert_case(&self, case: &Case) -> Result<(), DatabaseError>;
    fn case(&self, id: &Uuid) -> Result<Option<Case>, DatabaseError>;
    fn set_case_status(&self, id: &Uuid, status: &CaseStatus) -> Result<(), DatabaseError>;

    fn insert_triage(&self, record: &TriageRecord) -> Result<(), DatabaseError>;
    fn latest_triage(&self, case_id: &Uuid) -> Result<Option<TriageRecord>, DatabaseError>;
    fn triage_history(&self, case_id: &Uuid) -> Result<Vec<TriageRecord>, DatabaseError>;

    fn insert_assignment(&self, assignment: &Assignment) -> Result<(), DatabaseError>;
    fn update_assignment(&self, assignment: &Assignment) -> Result<(), DatabaseError>;
    fn assignment_for_case(&self, case_id: &Uuid) -> Result<Option<Assignment>, DatabaseError>;

    fn append_message(&self, message: &CaseMessage) -> Result<(), DatabaseError>;
    fn messages(&self, case_id: &Uuid) -> Result<Vec<CaseMessage>, DatabaseError>;

    fn cases_for_patient(&self, patient_id: &Uuid) -> Result<Vec<Case>, DatabaseError>;
    fn cases_for_creator(&self, user_id: &Uuid) -> Result<Vec<Case>, DatabaseError>;
    fn cases_for_areas(&self, area_ids: &[Uuid]) -> Result<Vec<Case>, DatabaseError>;
    fn all_cases(&self) -> Result<Vec<Case>, DatabaseError>;

    fn status_counts(&self) -> Result<Vec<(String, i64)>, DatabaseError>;
    fn urgency_counts(&self) -> Result<Vec<(String, i64)>, DatabaseError>;
}

/// Identity collaborator: resolves a user id to role and area membership.
/// Authentication itself happens upstream.
pub trait UserDirectory {
    fn user(&self, id: &Uuid) -> Result<Option<UserProfile>, DatabaseError>;
}

// ---------------------------------------------------------------------------
// Read models
// ---------------------------------------------------------------------------

/// The composed case view returned to callers: the case row, its current
/// triage, its assignment, and the message thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseDetail {
    pub case: Case,
    pub triage: Option<TriageRecord>,
    pub assignment: Option<Assignment>,
    pub messages: Vec<CaseMessage>,
}

/// Counts by status and by current urgency, for dashboards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseStatistics {
    pub by_status: BTreeMap<String, i64>,
    pub by_urgency: BTreeMap<String, i64>,
}
