use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::lifecycle::{CaseStore, UserDirectory};
use crate::models::enums::CaseStatus;
use crate::models::{Assignment, Case, CaseMessage, TriageRecord, UserProfile};

/// [`CaseStore`] backed by SQLite. The connection is shared behind a
/// mutex so the store and the directory can use the same database,
/// which matters for in-memory databases where each open is distinct.
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, DatabaseError> {
        self.conn.lock().map_err(|_| DatabaseError::LockFailed)
    }
}

impl CaseStore for SqliteStore {
    fn insert_case(&self, case: &Case) -> Result<(), DatabaseError> {
        super::insert_case(&*self.conn()?, case)
    }

    fn case(&self, id: &Uuid) -> Result<Option<Case>, DatabaseError> {
        super::get_case(&*self.conn()?, id)
    }

    fn set_case_status(&self, id: &Uuid, status: &CaseStatus) -> Result<(), DatabaseError> {
        super::set_case_status(&*self.conn()?, id, status)
    }

    fn insert_triage(&self, record: &TriageRecord) -> Result<(), DatabaseError> {
        super::insert_triage_record(&*self.conn()?, record)
    }

    fn latest_triage(&self, case_id: &Uuid) -> Result<Option<TriageRecord>, DatabaseError> {
        super::latest_triage(&*self.conn()?, case_id)
    }

    fn triage_history(&self, case_id: &Uuid) -> Result<Vec<TriageRecord>, DatabaseError> {
        super::triage_history(&*self.conn()?, case_id)
    }

    fn insert_assignment(&self, assignment: &Assignment) -> Result<(), DatabaseError> {
        super::insert_assignment(&*self.conn()?, assignment)
    }

    fn update_assignment(&self, assignment: &Assignment) -> Result<(), DatabaseError> {
        super::update_assignment(&*self.conn()?, assignment)
    }

    fn assignment_for_case(&self, case_id: &Uuid) -> Result<Option<Assignment>, DatabaseError> {
        super::get_assignment_by_case(&*self.conn()?, case_id)
    }

    fn append_message(&self, message: &CaseMessage) -> Result<(), DatabaseError> {
        super::insert_message(&*self.conn()?, message)
    }

    fn messages(&self, case_id: &Uuid) -> Result<Vec<CaseMessage>, DatabaseError> {
        super::messages_by_case(&*self.conn()?, case_id)
    }

    fn cases_for_patient(&self, patient_id: &Uuid) -> Result<Vec<Case>, DatabaseError> {
        super::cases_by_patient(&*self.conn()?, patient_id)
    }

    fn cases_for_creator(&self, user_id: &Uuid) -> Result<Vec<Case>, DatabaseError> {
        super::cases_by_creator(&*self.conn()?, user_id)
    }

    fn cases_for_areas(&self, area_ids: &[Uuid]) -> Result<Vec<Case>, DatabaseError> {
        super::cases_by_areas(&*self.conn()?, area_ids)
    }

    fn all_cases(&self) -> Result<Vec<Case>, DatabaseError> {
        super::all_cases(&*self.conn()?)
    }

    fn status_counts(&self) -> Result<Vec<(String, i64)>, DatabaseError> {
        super::status_counts(&*self.conn()?)
    }

    fn urgency_counts(&self) -> Result<Vec<(String, i64)>, DatabaseError> {
        super::urgency_counts(&*self.conn()?)
    }
}

/// [`UserDirectory`] over the same SQLite database.
pub struct SqliteDirectory {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteDirectory {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }
}

impl UserDirectory for SqliteDirectory {
    fn user(&self, id: &Uuid) -> Result<Option<UserProfile>, DatabaseError> {
        let conn = self.conn.lock().map_err(|_| DatabaseError::LockFailed)?;
        super::get_user(&conn, id)
    }
}
