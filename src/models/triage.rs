use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{RiskFlag, UrgencyLevel};

/// Output of one classification run, attached to a case. Append-only:
/// the record with the latest `created_at` is the case's current triage,
/// earlier records are history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageRecord {
    pub id: Uuid,
    pub case_id: Uuid,
    pub urgency_level: UrgencyLevel,
    pub structured_symptoms: StructuredSymptoms,
    pub risk_flags: Vec<RiskFlag>,
    pub summary: String,
    pub recommendations: Vec<String>,
    pub ai_model: String,
    pub created_at: NaiveDateTime,
}

/// Symptom indicators scanned from the description, independent of the
/// urgency tier decision. Serializes with only the detected entries so
/// the JSON object matches what existing consumers expect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StructuredSymptoms {
    #[serde(skip_serializing_if = "is_false")]
    pub fever: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub pain: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pain_location: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub cough: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub headache: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub nausea_vomiting: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub dizziness: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub breathing_difficulty: bool,
}

fn is_false(v: &bool) -> bool {
    !*v
}
