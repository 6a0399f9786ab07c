use std::str::FromStr;

use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use uuid::Uuid;

use super::{ts_from_sql, ts_to_sql, uuid_from_sql};
use crate::db::DatabaseError;
use crate::models::enums::CaseStatus;
use crate::models::Case;

const CASE_COLUMNS: &str = "id, patient_id, created_by_user_id, area_id, description, \
     language, status, patient_name, patient_age, location, audio_url, created_at, updated_at";

type CaseRow = (
    String,         // id
    String,         // patient_id
    String,         // created_by_user_id
    Option<String>, // area_id
    String,         // description
    String,         // language
    String,         // status
    Option<String>, // patient_name
    Option<i64>,    // patient_age
    Option<String>, // location
    Option<String>, // audio_url
    String,         // created_at
    String,         // updated_at
);

fn read_case_row(row: &Row<'_>) -> rusqlite::Result<CaseRow> {
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
        row.get(9)?,
        row.get(10)?,
        row.get(11)?,
        row.get(12)?,
    ))
}

fn case_from_row(row: CaseRow) -> Result<Case, DatabaseError> {
    let (
        id,
        patient_id,
        created_by_user_id,
        area_id,
        description,
        language,
        status,
        patient_name,
        patient_age,
        location,
        audio_url,
        created_at,
        updated_at,
    ) = row;

    Ok(Case {
        id: uuid_from_sql(&id)?,
        patient_id: uuid_from_sql(&patient_id)?,
        created_by_user_id: uuid_from_sql(&created_by_user_id)?,
        area_id: area_id.as_deref().map(uuid_from_sql).transpose()?,
        description,
        language,
        status: CaseStatus::from_str(&status)?,
        patient_name,
        patient_age: patient_age.map(|a| a as u32),
        location,
        audio_url,
        created_at: ts_from_sql(&created_at)?,
        updated_at: ts_from_sql(&updated_at)?,
    })
}

fn collect_cases(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> Result<Vec<Case>, DatabaseError> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, read_case_row)?;
    let mut cases = Vec::new();
    for row in rows {
        cases.push(case_from_row(row?)?);
    }
    Ok(cases)
}

pub fn insert_case(conn: &Connection, case: &Case) -> Result<(), DatabaseError> {
    conn.execute(
        &format!(
            "INSERT INTO cases ({CASE_COLUMNS}) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)"
        ),
        params![
            case.id.to_string(),
            case.patient_id.to_string(),
            case.created_by_user_id.to_string(),
            case.area_id.map(|a| a.to_string()),
            case.description,
            case.language,
            case.status.as_str(),
            case.patient_name,
            case.patient_age.map(|a| a as i64),
            case.location,
            case.audio_url,
            ts_to_sql(&case.created_at),
            ts_to_sql(&case.updated_at),
        ],
    )?;
    Ok(())
}

pub fn get_case(conn: &Connection, id: &Uuid) -> Result<Option<Case>, DatabaseError> {
    let row = conn
        .query_row(
            &format!("SELECT {CASE_COLUMNS} FROM cases WHERE id = ?1"),
            params![id.to_string()],
            read_case_row,
        )
        .optional()?;
    row.map(case_from_row).transpose()
}

pub fn set_case_status(
    conn: &Connection,
    id: &Uuid,
    status: &CaseStatus,
) -> Result<(), DatabaseError> {
    let now = chrono::Local::now().naive_local();
    let changed = conn.execute(
        "UPDATE cases SET status = ?1, updated_at = ?2 WHERE id = ?3",
        params![status.as_str(), ts_to_sql(&now), id.to_string()],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "case".into(),
            id: id.to_string(),
        });
    }
    Ok(())
}

pub fn cases_by_patient(conn: &Connection, patient_id: &Uuid) -> Result<Vec<Case>, DatabaseError> {
    collect_cases(
        conn,
        &format!(
            "SELECT {CASE_COLUMNS} FROM cases WHERE patient_id = ?1 \
             ORDER BY created_at DESC, rowid DESC"
        ),
        params![patient_id.to_string()],
    )
}

pub fn cases_by_creator(conn: &Connection, user_id: &Uuid) -> Result<Vec<Case>, DatabaseError> {
    collect_cases(
        conn,
        &format!(
            "SELECT {CASE_COLUMNS} FROM cases WHERE created_by_user_id = ?1 \
             ORDER BY created_at DESC, rowid DESC"
        ),
        params![user_id.to_string()],
    )
}

pub fn cases_by_areas(conn: &Connection, area_ids: &[Uuid]) -> Result<Vec<Case>, DatabaseError> {
    if area_ids.is_empty() {
        return Ok(Vec::new());
    }
    let placeholders = (1..=area_ids.len())
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");
    collect_cases(
        conn,
        &format!(
            "SELECT {CASE_COLUMNS} FROM cases WHERE area_id IN ({placeholders}) \
             ORDER BY created_at DESC, rowid DESC"
        ),
        params_from_iter(area_ids.iter().map(Uuid::to_string)),
    )
}

pub fn all_cases(conn: &Connection) -> Result<Vec<Case>, DatabaseError> {
    collect_cases(
        conn,
        &format!("SELECT {CASE_COLUMNS} FROM cases ORDER BY created_at DESC, rowid DESC"),
        [],
    )
}

pub fn status_counts(conn: &Connection) -> Result<Vec<(String, i64)>, DatabaseError> {
    let mut stmt = conn.prepare("SELECT status, COUNT(*) FROM cases GROUP BY status")?;
    let rows = stmt.query_map([], |r| Ok((r.get(0)?, r.get(1)?)))?;
    let mut counts = Vec::new();
    for row in rows {
        counts.push(row?);
    }
    Ok(counts)
}

/// Counts cases by the urgency of their current (most recent) triage
/// record. Cases without any triage record are excluded.
pub fn urgency_counts(conn: &Connection) -> Result<Vec<(String, i64)>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT t.urgency_level, COUNT(*) FROM cases c \
         JOIN triage_records t ON t.id = ( \
             SELECT id FROM triage_records WHERE case_id = c.id \
             ORDER BY created_at DESC, rowid DESC LIMIT 1) \
         GROUP BY t.urgency_level",
    )?;
    let rows = stmt.query_map([], |r| Ok((r.get(0)?, r.get(1)?)))?;
    let mut counts = Vec::new();
    for row in rows {
        counts.push(row?);
    }
    Ok(counts)
}
