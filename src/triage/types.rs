use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::enums::{RiskFlag, UrgencyLevel, WireUrgency};
use crate::models::StructuredSymptoms;

// ---------------------------------------------------------------------------
// Confidence
// ---------------------------------------------------------------------------

/// Confidence label derived from the final urgency tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

// ---------------------------------------------------------------------------
// Request / result / response
// ---------------------------------------------------------------------------

/// Classification input: the symptom description plus optional patient
/// context. Field names follow the existing JSON contract.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageRequest {
    pub description: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub medical_history: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub age: Option<u32>,
}

/// Full output of one classification run, in the canonical urgency
/// vocabulary. Persisted as a triage record; converted to
/// [`TriageResponse`] at the system boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageResult {
    pub urgency_level: UrgencyLevel,
    pub structured_symptoms: StructuredSymptoms,
    pub risk_flags: Vec<RiskFlag>,
    pub summary: String,
    pub detailed_assessment: String,
    pub recommendations: Vec<String>,
    pub ai_model: String,
    pub confidence: Confidence,
}

/// Wire shape consumed by downstream services. Uses the
/// critical/urgent/moderate/routine vocabulary (see
/// [`UrgencyLevel::to_wire`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageResponse {
    pub urgency_level: WireUrgency,
    pub structured_symptoms: StructuredSymptoms,
    pub risk_flags: Vec<RiskFlag>,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<String>>,
    pub ai_model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
}

impl From<&TriageResult> for TriageResponse {
    fn from(result: &TriageResult) -> Self {
        Self {
            urgency_level: result.urgency_level.to_wire(),
            structured_symptoms: result.structured_symptoms.clone(),
            risk_flags: result.risk_flags.clone(),
            summary: result.summary.clone(),
            recommendations: Some(result.recommendations.clone()),
            ai_model: result.ai_model.clone(),
            confidence: Some(result.confidence),
        }
    }
}

// ---------------------------------------------------------------------------
// Classifier trait
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Invalid classifier input: {0}")]
    InvalidInput(String),

    #[error("Classifier backend unavailable: {0}")]
    Unavailable(String),
}

/// Seam between the lifecycle manager and a triage implementation.
/// The keyword rule engine is the production implementation; a remote
/// model-backed classifier plugs in here without touching the lifecycle
/// manager. Implementations must be deterministic for identical inputs.
pub trait Classifier {
    fn classify(&self, request: &TriageRequest) -> Result<TriageResult, ClassifierError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_uses_wire_vocabulary() {
        let result = TriageResult {
            urgency_level: UrgencyLevel::Urgent,
            structured_symptoms: StructuredSymptoms::default(),
            risk_flags: vec![RiskFlag::HighRisk],
            summary: "s".into(),
            detailed_assessment: "d".into(),
            recommendations: vec!["r".into()],
            ai_model: "m".into(),
            confidence: Confidence::High,
        };
        let response = TriageResponse::from(&result);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["urgencyLevel"], "critical");
        assert_eq!(value["riskFlags"][0], "high_risk");
        assert_eq!(value["aiModel"], "m");
        assert_eq!(value["confidence"], "high");
    }

    #[test]
    fn request_deserializes_with_optional_context() {
        let request: TriageRequest =
            serde_json::from_str("{\"description\": \"mild cough\"}").unwrap();
        assert_eq!(request.description, "mild cough");
        assert!(request.medical_history.is_empty());
        assert!(request.allergies.is_empty());
        assert!(request.age.is_none());
    }
}
