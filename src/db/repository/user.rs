use std::str::FromStr;

use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::{ts_to_sql, uuid_from_sql};
use crate::db::DatabaseError;
use crate::models::enums::ActorRole;
use crate::models::UserProfile;

pub fn insert_user(conn: &Connection, user: &UserProfile) -> Result<(), DatabaseError> {
    let now = chrono::Local::now().naive_local();
    conn.execute(
        "INSERT INTO users (id, name, role, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![
            user.id.to_string(),
            user.name,
            user.role.as_str(),
            ts_to_sql(&now),
        ],
    )?;
    for area_id in &user.areas {
        conn.execute(
            "INSERT INTO user_areas (user_id, area_id) VALUES (?1, ?2)",
            params![user.id.to_string(), area_id.to_string()],
        )?;
    }
    Ok(())
}

pub fn get_user(conn: &Connection, id: &Uuid) -> Result<Option<UserProfile>, DatabaseError> {
    let row: Option<(String, String, String)> = conn
        .query_row(
            "SELECT id, name, role FROM users WHERE id = ?1",
            params![id.to_string()],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        )
        .optional()?;

    let Some((user_id, name, role)) = row else {
        return Ok(None);
    };

    let mut stmt =
        conn.prepare("SELECT area_id FROM user_areas WHERE user_id = ?1 ORDER BY area_id")?;
    let area_rows = stmt.query_map(params![user_id], |r| r.get::<_, String>(0))?;
    let mut areas = Vec::new();
    for area in area_rows {
        areas.push(uuid_from_sql(&area?)?);
    }

    Ok(Some(UserProfile {
        id: uuid_from_sql(&user_id)?,
        name,
        role: ActorRole::from_str(&role)?,
        areas,
    }))
}
