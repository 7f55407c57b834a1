//! The admin review console: list and filter every agent's submissions,
//! move them through review states, and edit the underlying form payload.
//!
//! Edits touch two collections: the admin-wide list and the submitting
//! agent's own list. The writes are independent; a failure after the first
//! write leaves the collections inconsistent. That is a documented
//! limitation of the storage layout, not something the console recovers
//! from — the second write is logged and dropped on failure.

use super::forms::FormPayload;
use super::record::{AdminSubmissionRecord, SubmissionStatus};
use super::reports::{AdminFilter, AdminStats};
use super::store::SubmissionStore;
use crate::storage::{StorageBackend, StorageError};
use serde_json::Value;
use tracing::warn;

#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error("submission {0} not found")]
    NotFound(i64),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub struct AdminConsole<S> {
    store: SubmissionStore<S>,
}

impl<S: StorageBackend> AdminConsole<S> {
    pub fn new(store: SubmissionStore<S>) -> Self {
        Self { store }
    }

    /// Filtered listing, newest first.
    pub fn submissions(
        &self,
        filter: &AdminFilter,
    ) -> Result<Vec<AdminSubmissionRecord>, StorageError> {
        let mut records: Vec<AdminSubmissionRecord> = self
            .store
            .admin_submissions()?
            .into_iter()
            .filter(|record| filter.matches(record))
            .collect();
        records.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(records)
    }

    pub fn stats(&self) -> Result<AdminStats, StorageError> {
        Ok(AdminStats::compute(&self.store.admin_submissions()?))
    }

    /// Review-state change. Transitions are unconstrained: any state may move
    /// to any other, and nothing is terminal.
    pub fn set_status(&self, id: i64, status: SubmissionStatus) -> Result<(), AdminError> {
        let record = self.update_admin_record(id, |record| {
            record.status = status;
        })?;
        self.propagate_status(&record, status);
        Ok(())
    }

    /// Save from the wizard's admin edit mode: rewrites the admin record's
    /// payload and header fields, then patches the per-agent record with the
    /// same changes.
    pub fn save_changes(&self, id: i64, payload: FormPayload) -> Result<(), AdminError> {
        let record = self.update_admin_record(id, |record| {
            record.project_name = payload.basics.project_name.clone();
            record.builder_name = payload.basics.builder_name.clone();
            record.rera_number = payload.basics.rera_number.clone();
            record.form_data = payload.clone();
        })?;
        self.propagate_edit(&record);
        Ok(())
    }

    fn update_admin_record(
        &self,
        id: i64,
        apply: impl FnOnce(&mut AdminSubmissionRecord),
    ) -> Result<AdminSubmissionRecord, AdminError> {
        let mut records = self.store.admin_submissions()?;
        let record = records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or(AdminError::NotFound(id))?;
        apply(record);
        let updated = record.clone();
        self.store.save_admin_submissions(&records)?;
        Ok(updated)
    }

    /// Best-effort second write. A record missing from the agent collection
    /// is skipped; a storage failure is logged and dropped.
    fn propagate_status(&self, record: &AdminSubmissionRecord, status: SubmissionStatus) {
        let result = self.patch_agent_record(record, |agent_record| {
            agent_record.status = status;
        });
        if let Err(error) = result {
            warn!(id = record.id, %error, "status change did not reach the agent collection");
        }
    }

    fn propagate_edit(&self, record: &AdminSubmissionRecord) {
        let result = self.patch_agent_record(record, |agent_record| {
            agent_record.project_name = record.project_name.clone();
            agent_record.builder_name = record.builder_name.clone();
            agent_record.details =
                serde_json::to_value(&record.form_data).unwrap_or(Value::Null);
        });
        if let Err(error) = result {
            warn!(id = record.id, %error, "edit did not reach the agent collection");
        }
    }

    fn patch_agent_record(
        &self,
        record: &AdminSubmissionRecord,
        apply: impl FnOnce(&mut super::record::SubmissionRecord),
    ) -> Result<(), StorageError> {
        let mut submissions = self.store.submissions(&record.agent_id)?;
        let Some(agent_record) = submissions.iter_mut().find(|s| s.id == record.id) else {
            return Ok(());
        };
        apply(agent_record);
        self.store.save_submissions(&record.agent_id, &submissions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::onboarding::forms::BasicsPatch;
    use crate::onboarding::reports::AdminFilter;
    use crate::onboarding::wizard::FormWizard;
    use crate::onboarding::{submit_project, AgentSession};
    use crate::storage::MemoryStore;
    use chrono::{Local, TimeZone};

    fn seeded_console() -> (SubmissionStore<MemoryStore>, AdminConsole<MemoryStore>, i64, String) {
        let store = SubmissionStore::new(MemoryStore::new());
        let session = AgentSession {
            name: "John Smith".to_string(),
            email: "john@example.com".to_string(),
            id: "1700000000000".to_string(),
        };

        let mut wizard = FormWizard::new();
        wizard.update_basics(BasicsPatch {
            project_name: Some("Cloud 9 Residency".to_string()),
            builder_name: Some("Urban Rise Builders".to_string()),
            rera_number: Some("P024000001XX".to_string()),
            ..BasicsPatch::default()
        });

        let now = Local.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();
        let record = submit_project(&store, &session, &wizard, now, None).expect("submit");
        let console = AdminConsole::new(store.clone());
        (store, console, record.id, session.id)
    }

    #[test]
    fn status_can_leave_and_reenter_any_state() {
        let (_store, console, id, _agent) = seeded_console();

        console.set_status(id, SubmissionStatus::Approved).expect("approve");
        console.set_status(id, SubmissionStatus::Pending).expect("reopen");
        console.set_status(id, SubmissionStatus::Rejected).expect("reject");

        let records = console.submissions(&AdminFilter::default()).expect("list");
        assert_eq!(records[0].status, SubmissionStatus::Rejected);
    }

    #[test]
    fn status_change_reaches_the_agent_collection() {
        let (store, console, id, agent_id) = seeded_console();
        console.set_status(id, SubmissionStatus::Approved).expect("approve");

        let agent_records = store.submissions(&agent_id).expect("load");
        assert_eq!(agent_records[0].status, SubmissionStatus::Approved);
    }

    #[test]
    fn unknown_ids_are_reported() {
        let (_store, console, _id, _agent) = seeded_console();
        match console.set_status(42, SubmissionStatus::Approved) {
            Err(AdminError::NotFound(42)) => {}
            other => panic!("expected not-found, got {other:?}"),
        }
    }

    #[test]
    fn save_changes_updates_both_collections() {
        let (store, console, id, agent_id) = seeded_console();

        let admin_record = console
            .submissions(&AdminFilter::default())
            .expect("list")
            .remove(0);
        let mut wizard = FormWizard::from_payload(admin_record.form_data);
        wizard.update_basics(BasicsPatch {
            project_name: Some("Cloud 9 Residency Phase 2".to_string()),
            ..BasicsPatch::default()
        });
        console.save_changes(id, wizard.into_payload()).expect("save");

        let admin_records = console.submissions(&AdminFilter::default()).expect("list");
        assert_eq!(admin_records[0].project_name, "Cloud 9 Residency Phase 2");

        let agent_records = store.submissions(&agent_id).expect("load");
        assert_eq!(agent_records[0].project_name, "Cloud 9 Residency Phase 2");
        assert_eq!(
            agent_records[0].canonical_details().rera_number,
            "P024000001XX"
        );
    }
}
