use std::str::FromStr;

use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::{ts_from_sql, ts_to_sql, uuid_from_sql};
use crate::db::DatabaseError;
use crate::models::enums::AssignmentStatus;
use crate::models::Assignment;

type AssignmentRow = (
    String,         // id
    String,         // case_id
    Option<String>, // worker_id
    Option<String>, // doctor_id
    String,         // status
    String,         // created_at
    String,         // updated_at
);

fn assignment_from_row(row: AssignmentRow) -> Result<Assignment, DatabaseError> {
    let (id, case_id, worker_id, doctor_id, status, created_at, updated_at) = row;
    Ok(Assignment {
        id: uuid_from_sql(&id)?,
        case_id: uuid_from_sql(&case_id)?,
        worker_id: worker_id.as_deref().map(uuid_from_sql).transpose()?,
        doctor_id: doctor_id.as_deref().map(uuid_from_sql).transpose()?,
        status: AssignmentStatus::from_str(&status)?,
        created_at: ts_from_sql(&created_at)?,
        updated_at: ts_from_sql(&updated_at)?,
    })
}

pub fn insert_assignment(conn: &Connection, assignment: &Assignment) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO assignments (id, case_id, worker_id, doctor_id, status, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            assignment.id.to_string(),
            assignment.case_id.to_string(),
            assignment.worker_id.map(|w| w.to_string()),
            assignment.doctor_id.map(|d| d.to_string()),
            assignment.status.as_str(),
            ts_to_sql(&assignment.created_at),
            ts_to_sql(&assignment.updated_at),
        ],
    )?;
    Ok(())
}

pub fn update_assignment(conn: &Connection, assignment: &Assignment) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE assignments SET worker_id = ?1, doctor_id = ?2, status = ?3, updated_at = ?4 \
         WHERE id = ?5",
        params![
            assignment.worker_id.map(|w| w.to_string()),
            assignment.doctor_id.map(|d| d.to_string()),
            assignment.status.as_str(),
            ts_to_sql(&assignment.updated_at),
            assignment.id.to_string(),
        ],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "assignment".into(),
            id: assignment.id.to_string(),
        });
    }
    Ok(())
}

pub fn get_assignment_by_case(
    conn: &Connection,
    case_id: &Uuid,
) -> Result<Option<Assignment>, DatabaseError> {
    let row: Option<AssignmentRow> = conn
        .query_row(
            "SELECT id, case_id, worker_id, doctor_id, status, created_at, updated_at \
             FROM assignments WHERE case_id = ?1",
            params![case_id.to_string()],
            |r| {
                Ok((
                    r.get(0)?,
                    r.get(1)?,
                    r.get(2)?,
                    r.get(3)?,
                    r.get(4)?,
                    r.get(5)?,
                    r.get(6)?,
                ))
            },
        )
        .optional()?;
    row.map(assignment_from_row).transpose()
}
