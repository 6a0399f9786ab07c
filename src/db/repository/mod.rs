//! Repository layer — entity-scoped database operations.
//!
//! Free functions over a `rusqlite::Connection`, grouped per entity.
//! [`SqliteStore`] and [`SqliteDirectory`] wrap a shared connection and
//! implement the lifecycle collaborator traits on top of these functions.

mod area;
mod assignment;
mod case;
mod message;
mod store;
mod triage_record;
mod user;

pub use area::*;
pub use assignment::*;
pub use case::*;
pub use message::*;
pub use store::{SqliteDirectory, SqliteStore};
pub use triage_record::*;
pub use user::*;

use chrono::NaiveDateTime;
use uuid::Uuid;

use super::DatabaseError;

/// Fixed-width so that lexicographic ordering matches chronological.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

pub(crate) fn ts_to_sql(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

pub(crate) fn ts_from_sql(s: &str) -> Result<NaiveDateTime, DatabaseError> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f").map_err(|e| {
        DatabaseError::ConstraintViolation(format!("invalid timestamp {s:?}: {e}"))
    })
}

pub(crate) fn uuid_from_sql(s: &str) -> Result<Uuid, DatabaseError> {
    Uuid::parse_str(s).map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rusqlite::{params, Connection};

    use super::*;
    use crate::db::sqlite::open_memory_database;
    use crate::models::enums::*;
    use crate::models::*;

    fn test_db() -> Connection {
        open_memory_database().unwrap()
    }

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn make_area(conn: &Connection, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        insert_area(
            conn,
            &Area {
                id,
                name: name.into(),
                description: None,
                created_at: ts("2026-01-01 08:00:00"),
            },
        )
        .unwrap();
        id
    }

    fn make_user(conn: &Connection, role: ActorRole, areas: Vec<Uuid>) -> Uuid {
        let id = Uuid::new_v4();
        insert_user(
            conn,
            &UserProfile {
                id,
                name: "Test User".into(),
                role,
                areas,
            },
        )
        .unwrap();
        id
    }

    fn make_case(conn: &Connection, patient: Uuid, area: Option<Uuid>) -> Uuid {
        let id = Uuid::new_v4();
        insert_case(
            conn,
            &Case {
                id,
                patient_id: patient,
                created_by_user_id: patient,
                area_id: area,
                description: "persistent cough".into(),
                language: "en".into(),
                status: CaseStatus::New,
                patient_name: None,
                patient_age: Some(40),
                location: None,
                audio_url: None,
                created_at: ts("2026-02-01 09:00:00"),
                updated_at: ts("2026-02-01 09:00:00"),
            },
        )
        .unwrap();
        id
    }

    fn make_triage(case_id: Uuid, level: UrgencyLevel, created_at: NaiveDateTime) -> TriageRecord {
        TriageRecord {
            id: Uuid::new_v4(),
            case_id,
            urgency_level: level,
            structured_symptoms: StructuredSymptoms {
                cough: true,
                ..Default::default()
            },
            risk_flags: vec![RiskFlag::MedicalEvaluationRecommended],
            summary: "summary".into(),
            recommendations: vec!["rest".into()],
            ai_model: "VerboCare-SmartTriage-v1.0".into(),
            created_at,
        }
    }

    #[test]
    fn case_insert_and_retrieve() {
        let conn = test_db();
        let patient = make_user(&conn, ActorRole::Patient, vec![]);
        let area = make_area(&conn, "North");
        let case_id = make_case(&conn, patient, Some(area));

        let case = get_case(&conn, &case_id).unwrap().unwrap();
        assert_eq!(case.patient_id, patient);
        assert_eq!(case.area_id, Some(area));
        assert_eq!(case.status, CaseStatus::New);
        assert_eq!(case.patient_age, Some(40));
        assert_eq!(case.created_at, ts("2026-02-01 09:00:00"));
    }

    #[test]
    fn case_unknown_id_is_none() {
        let conn = test_db();
        assert!(get_case(&conn, &Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn case_foreign_key_enforced() {
        let conn = test_db();
        let result = insert_case(
            &conn,
            &Case {
                id: Uuid::new_v4(),
                patient_id: Uuid::new_v4(), // no such user
                created_by_user_id: Uuid::new_v4(),
                area_id: None,
                description: "x".into(),
                language: "en".into(),
                status: CaseStatus::New,
                patient_name: None,
                patient_age: None,
                location: None,
                audio_url: None,
                created_at: ts("2026-02-01 09:00:00"),
                updated_at: ts("2026-02-01 09:00:00"),
            },
        );
        assert!(result.is_err());
    }

    #[test]
    fn case_status_update() {
        let conn = test_db();
        let patient = make_user(&conn, ActorRole::Patient, vec![]);
        let case_id = make_case(&conn, patient, None);

        set_case_status(&conn, &case_id, &CaseStatus::InProgress).unwrap();
        let case = get_case(&conn, &case_id).unwrap().unwrap();
        assert_eq!(case.status, CaseStatus::InProgress);
        assert!(case.updated_at > case.created_at);
    }

    #[test]
    fn case_status_update_not_found() {
        let conn = test_db();
        let result = set_case_status(&conn, &Uuid::new_v4(), &CaseStatus::Closed);
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }

    #[test]
    fn triage_records_append_and_latest_wins() {
        let conn = test_db();
        let patient = make_user(&conn, ActorRole::Patient, vec![]);
        let case_id = make_case(&conn, patient, None);

        let first = make_triage(case_id, UrgencyLevel::Moderate, ts("2026-02-01 10:00:00"));
        let second = make_triage(case_id, UrgencyLevel::High, ts("2026-02-01 11:00:00"));
        insert_triage_record(&conn, &first).unwrap();
        insert_triage_record(&conn, &second).unwrap();

        let latest = latest_triage(&conn, &case_id).unwrap().unwrap();
        assert_eq!(latest.id, second.id);
        assert_eq!(latest.urgency_level, UrgencyLevel::High);

        let history = triage_history(&conn, &case_id).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, second.id);
        assert_eq!(history[1].id, first.id);
        // The earlier record round-trips untouched.
        assert_eq!(history[1].urgency_level, UrgencyLevel::Moderate);
        assert_eq!(history[1].risk_flags, first.risk_flags);
        assert_eq!(history[1].structured_symptoms, first.structured_symptoms);
    }

    #[test]
    fn triage_equal_timestamps_resolved_by_insertion_order() {
        let conn = test_db();
        let patient = make_user(&conn, ActorRole::Patient, vec![]);
        let case_id = make_case(&conn, patient, None);

        let when = ts("2026-02-01 10:00:00");
        let first = make_triage(case_id, UrgencyLevel::Low, when);
        let second = make_triage(case_id, UrgencyLevel::Urgent, when);
        insert_triage_record(&conn, &first).unwrap();
        insert_triage_record(&conn, &second).unwrap();

        // Last write wins when created_at ties.
        let latest = latest_triage(&conn, &case_id).unwrap().unwrap();
        assert_eq!(latest.id, second.id);
    }

    #[test]
    fn assignment_unique_per_case() {
        let conn = test_db();
        let patient = make_user(&conn, ActorRole::Patient, vec![]);
        let worker = make_user(&conn, ActorRole::Worker, vec![]);
        let case_id = make_case(&conn, patient, None);

        let assignment = Assignment {
            id: Uuid::new_v4(),
            case_id,
            worker_id: Some(worker),
            doctor_id: None,
            status: AssignmentStatus::Pending,
            created_at: ts("2026-02-01 09:30:00"),
            updated_at: ts("2026-02-01 09:30:00"),
        };
        insert_assignment(&conn, &assignment).unwrap();

        // A second row for the same case violates the UNIQUE constraint.
        let duplicate = Assignment {
            id: Uuid::new_v4(),
            ..assignment.clone()
        };
        assert!(insert_assignment(&conn, &duplicate).is_err());

        let loaded = get_assignment_by_case(&conn, &case_id).unwrap().unwrap();
        assert_eq!(loaded.id, assignment.id);
        assert_eq!(loaded.worker_id, Some(worker));
    }

    #[test]
    fn assignment_update_in_place() {
        let conn = test_db();
        let patient = make_user(&conn, ActorRole::Patient, vec![]);
        let worker = make_user(&conn, ActorRole::Worker, vec![]);
        let case_id = make_case(&conn, patient, None);

        let mut assignment = Assignment {
            id: Uuid::new_v4(),
            case_id,
            worker_id: None,
            doctor_id: None,
            status: AssignmentStatus::Pending,
            created_at: ts("2026-02-01 09:30:00"),
            updated_at: ts("2026-02-01 09:30:00"),
        };
        insert_assignment(&conn, &assignment).unwrap();

        assignment.worker_id = Some(worker);
        assignment.status = AssignmentStatus::Accepted;
        assignment.updated_at = ts("2026-02-01 10:00:00");
        update_assignment(&conn, &assignment).unwrap();

        let loaded = get_assignment_by_case(&conn, &case_id).unwrap().unwrap();
        assert_eq!(loaded.worker_id, Some(worker));
        assert_eq!(loaded.status, AssignmentStatus::Accepted);
        assert_eq!(loaded.updated_at, ts("2026-02-01 10:00:00"));
    }

    #[test]
    fn messages_ordered_by_creation() {
        let conn = test_db();
        let patient = make_user(&conn, ActorRole::Patient, vec![]);
        let worker = make_user(&conn, ActorRole::Worker, vec![]);
        let case_id = make_case(&conn, patient, None);

        for (author, role, kind, content, when) in [
            (patient, ActorRole::Patient, MessageKind::Standard, "It hurts", "2026-02-01 09:10:00"),
            (worker, ActorRole::Worker, MessageKind::WorkerNote, "Visited on site", "2026-02-01 09:20:00"),
        ] {
            insert_message(
                &conn,
                &CaseMessage {
                    id: Uuid::new_v4(),
                    case_id,
                    author_id: author,
                    author_role: role,
                    kind,
                    content: content.into(),
                    created_at: ts(when),
                },
            )
            .unwrap();
        }

        let messages = messages_by_case(&conn, &case_id).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content, "It hurts");
        assert_eq!(messages[0].kind, MessageKind::Standard);
        assert_eq!(messages[1].kind, MessageKind::WorkerNote);
        assert_eq!(messages[1].author_role, ActorRole::Worker);
    }

    #[test]
    fn user_round_trip_with_areas() {
        let conn = test_db();
        let a1 = make_area(&conn, "North");
        let a2 = make_area(&conn, "South");
        let worker = make_user(&conn, ActorRole::Worker, vec![a1, a2]);

        let profile = get_user(&conn, &worker).unwrap().unwrap();
        assert_eq!(profile.role, ActorRole::Worker);
        assert_eq!(profile.areas.len(), 2);
        assert!(profile.areas.contains(&a1));
        assert!(profile.areas.contains(&a2));

        assert!(get_user(&conn, &Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn case_listing_queries() {
        let conn = test_db();
        let north = make_area(&conn, "North");
        let south = make_area(&conn, "South");
        let patient_a = make_user(&conn, ActorRole::Patient, vec![]);
        let patient_b = make_user(&conn, ActorRole::Patient, vec![]);

        let in_north = make_case(&conn, patient_a, Some(north));
        let in_south = make_case(&conn, patient_b, Some(south));
        let no_area = make_case(&conn, patient_a, None);

        let of_a = cases_by_patient(&conn, &patient_a).unwrap();
        assert_eq!(of_a.len(), 2);

        let northern: Vec<Uuid> = cases_by_areas(&conn, &[north])
            .unwrap()
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(northern, vec![in_north]);

        let both = cases_by_areas(&conn, &[north, south]).unwrap();
        assert_eq!(both.len(), 2);
        assert!(cases_by_areas(&conn, &[]).unwrap().is_empty());

        let created_by_a: Vec<Uuid> = cases_by_creator(&conn, &patient_a)
            .unwrap()
            .iter()
            .map(|c| c.id)
            .collect();
        assert!(created_by_a.contains(&in_north));
        assert!(created_by_a.contains(&no_area));
        assert!(!created_by_a.contains(&in_south));

        assert_eq!(all_cases(&conn).unwrap().len(), 3);
    }

    #[test]
    fn count_queries_group_by_status_and_current_urgency() {
        let conn = test_db();
        let patient = make_user(&conn, ActorRole::Patient, vec![]);
        let case_a = make_case(&conn, patient, None);
        let case_b = make_case(&conn, patient, None);
        set_case_status(&conn, &case_b, &CaseStatus::Resolved).unwrap();

        // case_a was retriaged: only the latest record counts.
        insert_triage_record(
            &conn,
            &make_triage(case_a, UrgencyLevel::Low, ts("2026-02-01 10:00:00")),
        )
        .unwrap();
        insert_triage_record(
            &conn,
            &make_triage(case_a, UrgencyLevel::Urgent, ts("2026-02-01 11:00:00")),
        )
        .unwrap();
        insert_triage_record(
            &conn,
            &make_triage(case_b, UrgencyLevel::Low, ts("2026-02-01 10:00:00")),
        )
        .unwrap();

        let statuses = status_counts(&conn).unwrap();
        assert!(statuses.contains(&("new".to_string(), 1)));
        assert!(statuses.contains(&("resolved".to_string(), 1)));

        let urgencies = urgency_counts(&conn).unwrap();
        assert!(urgencies.contains(&("urgent".to_string(), 1)));
        assert!(urgencies.contains(&("low".to_string(), 1)));
    }

    #[test]
    fn triage_json_columns_round_trip() {
        let conn = test_db();
        let patient = make_user(&conn, ActorRole::Patient, vec![]);
        let case_id = make_case(&conn, patient, None);

        let record = TriageRecord {
            id: Uuid::new_v4(),
            case_id,
            urgency_level: UrgencyLevel::Urgent,
            structured_symptoms: StructuredSymptoms {
                pain: true,
                pain_location: Some("chest".into()),
                breathing_difficulty: true,
                ..Default::default()
            },
            risk_flags: vec![
                RiskFlag::SevereSymptoms,
                RiskFlag::RespiratoryDistress,
            ],
            summary: "Immediate attention".into(),
            recommendations: vec!["Call emergency services immediately".into()],
            ai_model: "VerboCare-SmartTriage-v1.0".into(),
            created_at: ts("2026-02-01 10:00:00"),
        };
        insert_triage_record(&conn, &record).unwrap();

        // Stored as JSON text, readable by any other consumer of the table.
        let raw: String = conn
            .query_row(
                "SELECT risk_flags FROM triage_records WHERE id = ?1",
                params![record.id.to_string()],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(
            serde_json::from_str::<Vec<String>>(&raw).unwrap(),
            vec!["severe_symptoms", "respiratory_distress"]
        );

        let loaded = latest_triage(&conn, &case_id).unwrap().unwrap();
        assert_eq!(loaded.structured_symptoms, record.structured_symptoms);
        assert_eq!(loaded.risk_flags, record.risk_flags);
        assert_eq!(loaded.recommendations, record.recommendations);
    }

    #[test]
    fn deleting_case_cascades_to_children() {
        let conn = test_db();
        let patient = make_user(&conn, ActorRole::Patient, vec![]);
        let case_id = make_case(&conn, patient, None);
        insert_triage_record(
            &conn,
            &make_triage(case_id, UrgencyLevel::Low, ts("2026-02-01 10:00:00")),
        )
        .unwrap();

        // Administrative escape hatch, outside the lifecycle manager.
        conn.execute("DELETE FROM cases WHERE id = ?1", params![case_id.to_string()])
            .unwrap();

        let remaining: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM triage_records WHERE case_id = ?1",
                params![case_id.to_string()],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(remaining, 0);
    }

    #[test]
    fn timestamp_format_round_trips() {
        let when = NaiveDateTime::from_str("2026-02-01T10:00:00.123456").unwrap();
        let encoded = ts_to_sql(&when);
        assert_eq!(ts_from_sql(&encoded).unwrap(), when);

        // Plain second precision parses too.
        assert!(ts_from_sql("2026-02-01 10:00:00").is_ok());
        assert!(ts_from_sql("not a timestamp").is_err());
    }
}
