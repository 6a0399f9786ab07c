use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::models::enums::{ActorRole, AssignmentStatus, CaseStatus, MessageKind, UrgencyLevel};
use crate::models::{
    Actor, Assignment, Case, CaseMessage, NewCase, StructuredSymptoms, TriageRecord, UserProfile,
};
use crate::triage::{Classifier, TriageRequest, FALLBACK_MODEL, FALLBACK_SUMMARY};

use super::{CaseDetail, CaseStatistics, CaseStore, LifecycleError, UserDirectory};

fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// Orchestrates the case lifecycle. Persistence, identity and triage are
/// injected collaborators; one instance per process, shared by request
/// handlers.
pub struct CaseLifecycle {
    store: Box<dyn CaseStore>,
    directory: Box<dyn UserDirectory>,
    classifier: Box<dyn Classifier>,
}

impl CaseLifecycle {
    pub fn new(
        store: Box<dyn CaseStore>,
        directory: Box<dyn UserDirectory>,
        classifier: Box<dyn Classifier>,
    ) -> Self {
        Self {
            store,
            directory,
            classifier,
        }
    }

    /// Create a case, run triage on it, and set up its assignment.
    ///
    /// A classifier failure never fails the request: a fallback triage
    /// record is persisted instead so the case is immediately actionable.
    pub fn create_case(&self, input: NewCase) -> Result<CaseDetail, LifecycleError> {
        let description = input.description.trim().to_string();
        if description.is_empty() {
            return Err(LifecycleError::Validation("description is required".into()));
        }
        let language = input.language.trim().to_string();
        if language.is_empty() {
            return Err(LifecycleError::Validation("language is required".into()));
        }

        // Validate a proposed worker before anything is persisted.
        if let Some(worker_id) = &input.requested_worker_id {
            self.validated_worker(worker_id, input.area_id.as_ref())?;
        }

        let created = now();
        let case = Case {
            id: Uuid::new_v4(),
            patient_id: input.patient_id,
            created_by_user_id: input.created_by_user_id,
            area_id: input.area_id,
            description: description.clone(),
            language: language.clone(),
            status: CaseStatus::New,
            patient_name: input.patient_name.clone(),
            patient_age: input.patient_age,
            location: input.location.clone(),
            audio_url: input.audio_url.clone(),
            created_at: created,
            updated_at: created,
        };
        self.store.insert_case(&case)?;

        let request = TriageRequest {
            description,
            language: Some(language),
            medical_history: input.medical_history.clone(),
            allergies: input.allergies.clone(),
            age: input.patient_age,
        };
        self.record_triage(&case.id, &request)?;
        self.store.set_case_status(&case.id, &CaseStatus::Assigned)?;

        if let Some(worker_id) = input.requested_worker_id {
            self.upsert_worker(&case.id, &worker_id)?;
        } else if input.area_id.is_some() {
            // Unclaimed placeholder; workers covering the case's area pick
            // it up from their queue.
            let ts = now();
            self.store.insert_assignment(&Assignment {
                id: Uuid::new_v4(),
                case_id: case.id,
                worker_id: None,
                doctor_id: None,
                status: AssignmentStatus::Pending,
                created_at: ts,
                updated_at: ts,
            })?;
        }

        tracing::info!(case_id = %case.id, patient_id = %case.patient_id, "Case created");
        self.case_detail(&case.id)
    }

    /// Re-run classification against the case's current description,
    /// appending a new triage record. Prior records are never touched.
    pub fn retriage(&self, case_id: &Uuid, actor: &Actor) -> Result<CaseDetail, LifecycleError> {
        let case = self.require_case(case_id)?;

        if !actor.role.is_staff() && case.patient_id != actor.user_id {
            return Err(LifecycleError::Forbidden(
                "only staff may retriage another patient's case".into(),
            ));
        }

        let request = TriageRequest {
            description: case.description.clone(),
            language: Some(case.language.clone()),
            age: case.patient_age,
            ..Default::default()
        };
        self.record_triage(case_id, &request)?;

        tracing::info!(case_id = %case_id, actor = %actor.user_id, "Case retriaged");
        self.case_detail(case_id)
    }

    /// Assign (or re-assign) a worker. The case keeps a single assignment
    /// row; re-assignment updates it in place.
    pub fn assign_worker(
        &self,
        case_id: &Uuid,
        worker_id: &Uuid,
    ) -> Result<Assignment, LifecycleError> {
        let case = self.require_case(case_id)?;
        self.validated_worker(worker_id, case.area_id.as_ref())?;
        self.upsert_worker(case_id, worker_id)
    }

    /// Append a message to the case thread. No business validation beyond
    /// non-empty content and a valid case reference.
    pub fn add_message(
        &self,
        case_id: &Uuid,
        actor: &Actor,
        kind: MessageKind,
        content: &str,
    ) -> Result<CaseMessage, LifecycleError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(LifecycleError::Validation("message content is required".into()));
        }
        self.require_case(case_id)?;

        let message = CaseMessage {
            id: Uuid::new_v4(),
            case_id: *case_id,
            author_id: actor.user_id,
            author_role: actor.role.clone(),
            kind,
            content: content.to_string(),
            created_at: now(),
        };
        self.store.append_message(&message)?;
        Ok(message)
    }

    /// Set the case status from its string form. Statuses form a closed
    /// vocabulary but not a strict transition graph; any defined status is
    /// accepted, undefined strings are rejected.
    pub fn update_status(&self, case_id: &Uuid, status: &str) -> Result<Case, LifecycleError> {
        let status: CaseStatus = status
            .parse()
            .map_err(|_| LifecycleError::Validation(format!("undefined case status: {status}")))?;
        let mut case = self.require_case(case_id)?;
        self.store.set_case_status(case_id, &status)?;
        case.status = status;
        Ok(case)
    }

    /// Case + current triage + assignment + message thread.
    pub fn case_detail(&self, case_id: &Uuid) -> Result<CaseDetail, LifecycleError> {
        let case = self.require_case(case_id)?;
        Ok(CaseDetail {
            triage: self.store.latest_triage(case_id)?,
            assignment: self.store.assignment_for_case(case_id)?,
            messages: self.store.messages(case_id)?,
            case,
        })
    }

    /// All triage records for a case, most recent first.
    pub fn triage_history(&self, case_id: &Uuid) -> Result<Vec<TriageRecord>, LifecycleError> {
        self.require_case(case_id)?;
        Ok(self.store.triage_history(case_id)?)
    }

    /// The cases visible to an actor: patients see their own, admins see
    /// everything, workers and doctors see their areas plus cases they
    /// created themselves.
    pub fn cases_for_actor(&self, actor: &Actor) -> Result<Vec<Case>, LifecycleError> {
        match actor.role {
            ActorRole::Patient => Ok(self.store.cases_for_patient(&actor.user_id)?),
            ActorRole::Admin | ActorRole::System => Ok(self.store.all_cases()?),
            ActorRole::Worker | ActorRole::Doctor => {
                let profile = self.require_user(&actor.user_id)?;
                let mut cases = self.store.cases_for_areas(&profile.areas)?;
                let mut seen: Vec<Uuid> = cases.iter().map(|c| c.id).collect();
                for case in self.store.cases_for_creator(&actor.user_id)? {
                    if !seen.contains(&case.id) {
                        seen.push(case.id);
                        cases.push(case);
                    }
                }
                Ok(cases)
            }
        }
    }

    /// Counts by status and by current urgency.
    pub fn case_statistics(&self) -> Result<CaseStatistics, LifecycleError> {
        let mut stats = CaseStatistics::default();
        for (status, count) in self.store.status_counts()? {
            stats.by_status.insert(status, count);
        }
        for (urgency, count) in self.store.urgency_counts()? {
            stats.by_urgency.insert(urgency, count);
        }
        Ok(stats)
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Run the classifier and persist the result. On classifier failure,
    /// persist the degraded fallback record instead — the case must never
    /// be left without a current triage.
    fn record_triage(
        &self,
        case_id: &Uuid,
        request: &TriageRequest,
    ) -> Result<TriageRecord, LifecycleError> {
        let record = match self.classifier.classify(request) {
            Ok(result) => TriageRecord {
                id: Uuid::new_v4(),
                case_id: *case_id,
                urgency_level: result.urgency_level,
                structured_symptoms: result.structured_symptoms,
                risk_flags: result.risk_flags,
                summary: result.summary,
                recommendations: result.recommendations,
                ai_model: result.ai_model,
                created_at: now(),
            },
            Err(err) => {
                tracing::warn!(case_id = %case_id, error = %err, "Classifier failed, persisting fallback triage");
                TriageRecord {
                    id: Uuid::new_v4(),
                    case_id: *case_id,
                    urgency_level: UrgencyLevel::Moderate,
                    structured_symptoms: StructuredSymptoms::default(),
                    risk_flags: Vec::new(),
                    summary: FALLBACK_SUMMARY.to_string(),
                    recommendations: Vec::new(),
                    ai_model: FALLBACK_MODEL.to_string(),
                    created_at: now(),
                }
            }
        };
        self.store.insert_triage(&record)?;
        Ok(record)
    }

    fn upsert_worker(
        &self,
        case_id: &Uuid,
        worker_id: &Uuid,
    ) -> Result<Assignment, LifecycleError> {
        match self.store.assignment_for_case(case_id)? {
            Some(mut existing) => {
                existing.worker_id = Some(*worker_id);
                existing.updated_at = now();
                self.store.update_assignment(&existing)?;
                Ok(existing)
            }
            None => {
                let ts = now();
                let assignment = Assignment {
                    id: Uuid::new_v4(),
                    case_id: *case_id,
                    worker_id: Some(*worker_id),
                    doctor_id: None,
                    status: AssignmentStatus::Pending,
                    created_at: ts,
                    updated_at: ts,
                };
                self.store.insert_assignment(&assignment)?;
                Ok(assignment)
            }
        }
    }

    fn validated_worker(
        &self,
        worker_id: &Uuid,
        area_id: Option<&Uuid>,
    ) -> Result<UserProfile, LifecycleError> {
        let worker = self.require_user(worker_id)?;
        if worker.role != ActorRole::Worker {
            return Err(LifecycleError::Validation(format!(
                "user {worker_id} is not a worker"
            )));
        }
        if let Some(area) = area_id {
            if !worker.areas.contains(area) {
                return Err(LifecycleError::Validation(
                    "worker is not assigned to the case area".into(),
                ));
            }
        }
        Ok(worker)
    }

    fn require_case(&self, case_id: &Uuid) -> Result<Case, LifecycleError> {
        self.store
            .case(case_id)?
            .ok_or(LifecycleError::NotFound {
                entity: "case",
                id: *case_id,
            })
    }

    fn require_user(&self, user_id: &Uuid) -> Result<UserProfile, LifecycleError> {
        self.directory
            .user(user_id)?
            .ok_or(LifecycleError::NotFound {
                entity: "user",
                id: *user_id,
            })
    }
}
