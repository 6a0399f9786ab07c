use crate::models::enums::UrgencyLevel;

/// Summary persisted on the degraded-mode record written when a
/// classifier implementation fails.
pub const FALLBACK_SUMMARY: &str =
    "AI triage unavailable at the moment. Showing default assessment.";

/// Model identifier for degraded-mode records.
pub const FALLBACK_MODEL: &str = "fallback";

/// Fixed per-tier texts. Selected by final urgency only, not by the
/// specific symptoms detected.
pub struct TriageTemplates;

impl TriageTemplates {
    pub fn summary(level: &UrgencyLevel) -> &'static str {
        match level {
            UrgencyLevel::Urgent => {
                "Patient requires IMMEDIATE medical attention. Symptoms indicate \
                 a potentially life-threatening condition."
            }
            UrgencyLevel::High => {
                "Patient should be seen URGENTLY. Symptoms warrant prompt medical \
                 evaluation within hours."
            }
            UrgencyLevel::Moderate => {
                "Patient should be evaluated soon. Symptoms may require medical \
                 attention within 24-48 hours."
            }
            UrgencyLevel::Low => {
                "Patient appears stable with minor symptoms. Routine care recommended."
            }
        }
    }

    pub fn detailed_assessment(level: &UrgencyLevel) -> String {
        format!(
            "Based on the patient's description, the triage system has assessed \
             this case as {} priority. {}",
            level.as_str().to_uppercase(),
            Self::summary(level),
        )
    }

    pub fn recommendations(level: &UrgencyLevel) -> Vec<String> {
        let lines: &[&str] = match level {
            UrgencyLevel::Urgent => &[
                "Call emergency services immediately",
                "Do not wait - seek ER care now",
                "Monitor vital signs closely",
            ],
            UrgencyLevel::High => &[
                "Schedule urgent care visit within 2-4 hours",
                "Do not delay treatment",
                "Monitor for worsening symptoms",
            ],
            UrgencyLevel::Moderate => &[
                "Schedule appointment within 24-48 hours",
                "Monitor symptoms for any changes",
                "Rest and maintain hydration",
            ],
            UrgencyLevel::Low => &[
                "Monitor symptoms and schedule routine follow-up if symptoms persist",
                "Self-care measures may be sufficient",
                "Contact healthcare provider if condition worsens",
            ],
        };
        lines.iter().map(|s| s.to_string()).collect()
    }
}
