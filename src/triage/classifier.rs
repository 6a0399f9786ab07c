use std::sync::LazyLock;

use regex::Regex;

use crate::models::enums::{RiskFlag, UrgencyLevel};
use crate::models::StructuredSymptoms;

use super::keywords::{CHRONIC_CONDITION_TERMS, HIGH_TERMS, MODERATE_TERMS, URGENT_TERMS};
use super::templates::TriageTemplates;
use super::types::{Classifier, ClassifierError, Confidence, TriageRequest, TriageResult};

/// Model identifier stamped on every record produced by the rule engine.
pub const AI_MODEL_ID: &str = "VerboCare-SmartTriage-v1.0";

/// Body location immediately preceding the word "pain".
static PAIN_LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(chest|head|stomach|abdominal|back|leg|arm)\s*pain").unwrap()
});

/// The production triage implementation: deterministic keyword rules,
/// no I/O, cannot fail.
pub struct KeywordClassifier;

impl Classifier for KeywordClassifier {
    fn classify(&self, request: &TriageRequest) -> Result<TriageResult, ClassifierError> {
        Ok(classify(request))
    }
}

/// Classify a symptom description with optional patient context.
///
/// Pure and deterministic: identical inputs always produce identical
/// output, which is what makes a retriage a genuine re-evaluation.
/// Keyword matching is substring-based on the lowercased description.
pub fn classify(request: &TriageRequest) -> TriageResult {
    let desc = request.description.to_lowercase();

    // Empty input is the caller's validation problem; degrade to a
    // flag-free routine result instead of panicking.
    if desc.trim().is_empty() {
        return build_result(UrgencyLevel::Low, StructuredSymptoms::default(), Vec::new());
    }

    let contains_any = |terms: &[&str]| terms.iter().any(|kw| desc.contains(kw));

    let mut urgency = if contains_any(URGENT_TERMS) {
        UrgencyLevel::Urgent
    } else if contains_any(HIGH_TERMS) {
        UrgencyLevel::High
    } else if contains_any(MODERATE_TERMS) {
        UrgencyLevel::Moderate
    } else {
        UrgencyLevel::Low
    };

    let mut risk_flags: Vec<RiskFlag> = match urgency {
        UrgencyLevel::Urgent => vec![
            RiskFlag::SevereSymptoms,
            RiskFlag::ImmediateAttentionRequired,
            RiskFlag::HighRisk,
        ],
        UrgencyLevel::High => vec![RiskFlag::SignificantSymptoms, RiskFlag::PromptCareNeeded],
        UrgencyLevel::Moderate => vec![RiskFlag::MedicalEvaluationRecommended],
        UrgencyLevel::Low => Vec::new(),
    };

    let symptoms = scan_symptoms(&desc, &mut risk_flags);

    // Escalation rules never de-escalate; each raises one tier from one
    // specific starting tier.
    let has_chronic_condition = request.medical_history.iter().any(|entry| {
        let entry = entry.to_lowercase();
        CHRONIC_CONDITION_TERMS.iter().any(|term| entry.contains(term))
    });
    if has_chronic_condition {
        risk_flags.push(RiskFlag::ChronicConditionPresent);
        if urgency == UrgencyLevel::Moderate {
            urgency = UrgencyLevel::High;
        }
    }

    if !request.allergies.is_empty() && desc.contains("allergic") {
        risk_flags.push(RiskFlag::AllergyAlert);
        if urgency == UrgencyLevel::Low {
            urgency = UrgencyLevel::Moderate;
        }
    }

    build_result(urgency, symptoms, risk_flags)
}

/// Scan for symptom indicators, independent of the tier decision.
fn scan_symptoms(desc: &str, risk_flags: &mut Vec<RiskFlag>) -> StructuredSymptoms {
    let mut symptoms = StructuredSymptoms::default();

    if desc.contains("fever") {
        symptoms.fever = true;
        risk_flags.push(RiskFlag::FeverPresent);
    }
    if desc.contains("pain") {
        symptoms.pain = true;
        symptoms.pain_location = PAIN_LOCATION
            .captures(desc)
            .map(|caps| caps[1].to_string());
    }
    if desc.contains("cough") {
        symptoms.cough = true;
    }
    if desc.contains("headache") {
        symptoms.headache = true;
    }
    if desc.contains("nausea") || desc.contains("vomiting") {
        symptoms.nausea_vomiting = true;
    }
    if desc.contains("dizzy") || desc.contains("dizziness") {
        symptoms.dizziness = true;
    }
    if desc.contains("shortness of breath") || desc.contains("difficulty breathing") {
        symptoms.breathing_difficulty = true;
        risk_flags.push(RiskFlag::RespiratoryDistress);
    }

    symptoms
}

fn build_result(
    urgency: UrgencyLevel,
    symptoms: StructuredSymptoms,
    risk_flags: Vec<RiskFlag>,
) -> TriageResult {
    // Summary, recommendations and confidence follow the final tier,
    // after any escalation.
    let confidence = match urgency {
        UrgencyLevel::Urgent | UrgencyLevel::High => Confidence::High,
        UrgencyLevel::Moderate => Confidence::Medium,
        UrgencyLevel::Low => Confidence::Low,
    };

    TriageResult {
        summary: TriageTemplates::summary(&urgency).to_string(),
        detailed_assessment: TriageTemplates::detailed_assessment(&urgency),
        recommendations: TriageTemplates::recommendations(&urgency),
        urgency_level: urgency,
        structured_symptoms: symptoms,
        risk_flags,
        ai_model: AI_MODEL_ID.to_string(),
        confidence,
    }
}
