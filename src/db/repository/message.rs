use std::str::FromStr;

use rusqlite::{params, Connection};
use uuid::Uuid;

use super::{ts_from_sql, ts_to_sql, uuid_from_sql};
use crate::db::DatabaseError;
use crate::models::enums::{ActorRole, MessageKind};
use crate::models::CaseMessage;

pub fn insert_message(conn: &Connection, message: &CaseMessage) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO case_messages (id, case_id, author_id, author_role, kind, content, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            message.id.to_string(),
            message.case_id.to_string(),
            message.author_id.to_string(),
            message.author_role.as_str(),
            message.kind.as_str(),
            message.content,
            ts_to_sql(&message.created_at),
        ],
    )?;
    Ok(())
}

/// The full message thread for a case, oldest first.
pub fn messages_by_case(
    conn: &Connection,
    case_id: &Uuid,
) -> Result<Vec<CaseMessage>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, case_id, author_id, author_role, kind, content, created_at \
         FROM case_messages WHERE case_id = ?1 ORDER BY created_at ASC, rowid ASC",
    )?;
    let rows = stmt.query_map(params![case_id.to_string()], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, String>(5)?,
            r.get::<_, String>(6)?,
        ))
    })?;

    let mut messages = Vec::new();
    for row in rows {
        let (id, case_id, author_id, author_role, kind, content, created_at) = row?;
        messages.push(CaseMessage {
            id: uuid_from_sql(&id)?,
            case_id: uuid_from_sql(&case_id)?,
            author_id: uuid_from_sql(&author_id)?,
            author_role: ActorRole::from_str(&author_role)?,
            kind: MessageKind::from_str(&kind)?,
            content,
            created_at: ts_from_sql(&created_at)?,
        });
    }
    Ok(messages)
}
