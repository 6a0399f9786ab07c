use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(CaseStatus {
    New => "new",
    Assigned => "assigned",
    InProgress => "in_progress",
    AwaitingDoctor => "awaiting_doctor",
    Completed => "completed",
    Closed => "closed",
    Resolved => "resolved",
});

impl CaseStatus {
    /// Terminal states: no further staff action expected.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Closed | Self::Resolved)
    }
}

/// Canonical urgency produced by the rule engine and stored with each
/// triage record. The public JSON contract uses [`WireUrgency`]; the two
/// are related by [`UrgencyLevel::to_wire`] and never merged implicitly.
str_enum!(UrgencyLevel {
    Urgent => "urgent",
    High => "high",
    Moderate => "moderate",
    Low => "low",
});

impl UrgencyLevel {
    /// Map the canonical level onto the wire vocabulary consumed by
    /// downstream services (critical/urgent/moderate/routine).
    pub fn to_wire(&self) -> WireUrgency {
        match self {
            Self::Urgent => WireUrgency::Critical,
            Self::High => WireUrgency::Urgent,
            Self::Moderate => WireUrgency::Moderate,
            Self::Low => WireUrgency::Routine,
        }
    }
}

str_enum!(WireUrgency {
    Critical => "critical",
    Urgent => "urgent",
    Moderate => "moderate",
    Routine => "routine",
});

str_enum!(AssignmentStatus {
    Pending => "pending",
    Accepted => "accepted",
    InProgress => "in_progress",
    Completed => "completed",
});

str_enum!(ActorRole {
    Patient => "patient",
    Worker => "worker",
    Doctor => "doctor",
    Admin => "admin",
    System => "system",
});

impl ActorRole {
    /// Staff roles may act on any case; patients only on their own.
    pub fn is_staff(&self) -> bool {
        matches!(self, Self::Worker | Self::Doctor | Self::Admin)
    }
}

/// First-class message sub-type. Replaces the legacy convention of
/// tagging notes with `[WORKER NOTE]` / `[DOCTOR ADVICE]` content prefixes.
str_enum!(MessageKind {
    Standard => "standard",
    WorkerNote => "worker_note",
    DoctorAdvice => "doctor_advice",
    System => "system",
});

/// Machine-readable clinical risk signals attached to a triage record.
str_enum!(RiskFlag {
    SevereSymptoms => "severe_symptoms",
    ImmediateAttentionRequired => "immediate_attention_required",
    HighRisk => "high_risk",
    SignificantSymptoms => "significant_symptoms",
    PromptCareNeeded => "prompt_care_needed",
    MedicalEvaluationRecommended => "medical_evaluation_recommended",
    FeverPresent => "fever_present",
    RespiratoryDistress => "respiratory_distress",
    ChronicConditionPresent => "chronic_condition_present",
    AllergyAlert => "allergy_alert",
});
