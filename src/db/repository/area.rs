use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::{ts_from_sql, ts_to_sql, uuid_from_sql};
use crate::db::DatabaseError;
use crate::models::Area;

pub fn insert_area(conn: &Connection, area: &Area) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO areas (id, name, description, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![
            area.id.to_string(),
            area.name,
            area.description,
            ts_to_sql(&area.created_at),
        ],
    )?;
    Ok(())
}

pub fn get_area(conn: &Connection, id: &Uuid) -> Result<Option<Area>, DatabaseError> {
    let row: Option<(String, String, Option<String>, String)> = conn
        .query_row(
            "SELECT id, name, description, created_at FROM areas WHERE id = ?1",
            params![id.to_string()],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
        )
        .optional()?;

    match row {
        Some((id, name, description, created_at)) => Ok(Some(Area {
            id: uuid_from_sql(&id)?,
            name,
            description,
            created_at: ts_from_sql(&created_at)?,
        })),
        None => Ok(None),
    }
}
