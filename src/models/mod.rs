pub mod area;
pub mod assignment;
pub mod case;
pub mod enums;
pub mod message;
pub mod triage;
pub mod user;

pub use area::Area;
pub use assignment::Assignment;
pub use case::{Case, NewCase};
pub use message::CaseMessage;
pub use triage::{StructuredSymptoms, TriageRecord};
pub use user::{Actor, UserProfile};
