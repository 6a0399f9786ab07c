use std::str::FromStr;

use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use super::{ts_from_sql, ts_to_sql, uuid_from_sql};
use crate::db::DatabaseError;
use crate::models::enums::{RiskFlag, UrgencyLevel};
use crate::models::{StructuredSymptoms, TriageRecord};

const TRIAGE_COLUMNS: &str = "id, case_id, urgency_level, structured_symptoms, risk_flags, \
     summary, recommendations, ai_model, created_at";

type TriageRow = (
    String, // id
    String, // case_id
    String, // urgency_level
    String, // structured_symptoms (JSON object)
    String, // risk_flags (JSON array)
    String, // summary
    String, // recommendations (JSON array)
    String, // ai_model
    String, // created_at
);

fn read_triage_row(row: &Row<'_>) -> rusqlite::Result<TriageRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
        row.get(8)?,
    ))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, DatabaseError> {
    serde_json::to_string(value).map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))
}

fn from_json<T: serde::de::DeserializeOwned>(raw: &str) -> Result<T, DatabaseError> {
    serde_json::from_str(raw).map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))
}

fn triage_from_row(row: TriageRow) -> Result<TriageRecord, DatabaseError> {
    let (id, case_id, urgency, symptoms, flags, summary, recommendations, ai_model, created_at) =
        row;

    Ok(TriageRecord {
        id: uuid_from_sql(&id)?,
        case_id: uuid_from_sql(&case_id)?,
        urgency_level: UrgencyLevel::from_str(&urgency)?,
        structured_symptoms: from_json::<StructuredSymptoms>(&symptoms)?,
        risk_flags: from_json::<Vec<RiskFlag>>(&flags)?,
        summary,
        recommendations: from_json::<Vec<String>>(&recommendations)?,
        ai_model,
        created_at: ts_from_sql(&created_at)?,
    })
}

pub fn insert_triage_record(conn: &Connection, record: &TriageRecord) -> Result<(), DatabaseError> {
    conn.execute(
        &format!(
            "INSERT INTO triage_records ({TRIAGE_COLUMNS}) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
        ),
        params![
            record.id.to_string(),
            record.case_id.to_string(),
            record.urgency_level.as_str(),
            to_json(&record.structured_symptoms)?,
            to_json(&record.risk_flags)?,
            record.summary,
            to_json(&record.recommendations)?,
            record.ai_model,
            ts_to_sql(&record.created_at),
        ],
    )?;
    Ok(())
}

/// The case's current triage: most recent `created_at`, ties broken by
/// insertion order.
pub fn latest_triage(
    conn: &Connection,
    case_id: &Uuid,
) -> Result<Option<TriageRecord>, DatabaseError> {
    let row = conn
        .query_row(
            &format!(
                "SELECT {TRIAGE_COLUMNS} FROM triage_records WHERE case_id = ?1 \
                 ORDER BY created_at DESC, rowid DESC LIMIT 1"
            ),
            params![case_id.to_string()],
            read_triage_row,
        )
        .optional()?;
    row.map(triage_from_row).transpose()
}

/// All triage records for a case, newest first.
pub fn triage_history(
    conn: &Connection,
    case_id: &Uuid,
) -> Result<Vec<TriageRecord>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {TRIAGE_COLUMNS} FROM triage_records WHERE case_id = ?1 \
         ORDER BY created_at DESC, rowid DESC"
    ))?;
    let rows = stmt.query_map(params![case_id.to_string()], read_triage_row)?;
    let mut records = Vec::new();
    for row in rows {
        records.push(triage_from_row(row?)?);
    }
    Ok(records)
}
