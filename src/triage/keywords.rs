//! Keyword tiers for the rule engine. Matching is substring-based on the
//! lowercased description, with no word-boundary checks; consumers depend
//! on that permissiveness, so tightening it is a behavior change.

/// Tier 1: any match short-circuits the tier decision to `Urgent`.
pub const URGENT_TERMS: &[&str] = &[
    "severe",
    "bleeding",
    "chest pain",
    "unconscious",
    "emergency",
    "critical",
    "can't breathe",
    "seizure",
    "heart attack",
    "stroke",
    "poisoning",
];

/// Tier 2: checked only when no tier-1 term matched.
pub const HIGH_TERMS: &[&str] = &[
    "intense pain",
    "high fever",
    "difficulty breathing",
    "heavy vomiting",
    "severe injury",
    "broken bone",
    "deep cut",
    "allergic reaction",
];

/// Tier 3: checked only when tiers 1-2 did not match.
pub const MODERATE_TERMS: &[&str] = &[
    "pain",
    "fever",
    "cough",
    "headache",
    "nausea",
    "dizzy",
    "rash",
    "stomach ache",
];

/// Medical-history entries containing any of these mark a chronic condition.
pub const CHRONIC_CONDITION_TERMS: &[&str] = &["diabetes", "heart", "hypertension"];
