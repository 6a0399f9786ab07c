//! Rule-based triage classification.
//!
//! [`classify`] is a pure function over the description text and optional
//! patient context; the [`Classifier`] trait is the seam the lifecycle
//! manager consumes, so alternative backends can be swapped in.

mod classifier;
mod keywords;
mod templates;
mod types;

pub use classifier::{classify, KeywordClassifier, AI_MODEL_ID};
pub use templates::{TriageTemplates, FALLBACK_MODEL, FALLBACK_SUMMARY};
pub use types::{
    Classifier, ClassifierError, Confidence, TriageRequest, TriageResponse, TriageResult,
};
