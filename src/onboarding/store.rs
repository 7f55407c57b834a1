//! Read/write of submission and draft collections over the storage backend.
//!
//! Every operation reads the full collection under a key and, on mutation,
//! writes the full collection back. Malformed stored JSON is logged and
//! treated as an empty collection rather than surfaced as an error.

use super::auth::AgentSession;
use super::record::{AdminSubmissionRecord, DraftRecord, SubmissionRecord};
use crate::storage::{keys, StorageBackend, StorageError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

pub struct SubmissionStore<S> {
    backend: Arc<S>,
}

impl<S> Clone for SubmissionStore<S> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<S: StorageBackend> SubmissionStore<S> {
    pub fn new(backend: S) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    // Agent submissions

    pub fn submissions(&self, agent_id: &str) -> Result<Vec<SubmissionRecord>, StorageError> {
        self.load_collection(&keys::agent_submissions(agent_id))
    }

    pub fn save_submissions(
        &self,
        agent_id: &str,
        records: &[SubmissionRecord],
    ) -> Result<(), StorageError> {
        self.save_collection(&keys::agent_submissions(agent_id), records)
    }

    pub fn append_submission(
        &self,
        agent_id: &str,
        record: SubmissionRecord,
    ) -> Result<(), StorageError> {
        let mut records = self.submissions(agent_id)?;
        records.push(record);
        self.save_submissions(agent_id, &records)
    }

    /// Submissions written before the layout became per-agent. Read-only.
    pub fn shared_submissions(&self) -> Result<Vec<SubmissionRecord>, StorageError> {
        self.load_collection(keys::LEGACY_AGENT_SUBMISSIONS)
    }

    // Drafts

    pub fn drafts(&self, agent_id: &str) -> Result<Vec<DraftRecord>, StorageError> {
        self.load_collection(&keys::agent_drafts(agent_id))
    }

    /// Inserts the draft, or replaces the existing draft carrying the same
    /// identifier when one is being re-saved.
    pub fn upsert_draft(&self, agent_id: &str, draft: DraftRecord) -> Result<(), StorageError> {
        let mut drafts = self.drafts(agent_id)?;
        match drafts.iter_mut().find(|existing| existing.id == draft.id) {
            Some(existing) => *existing = draft,
            None => drafts.push(draft),
        }
        self.save_collection(&keys::agent_drafts(agent_id), &drafts)
    }

    pub fn remove_draft(&self, agent_id: &str, draft_id: i64) -> Result<(), StorageError> {
        let mut drafts = self.drafts(agent_id)?;
        drafts.retain(|draft| draft.id != draft_id);
        self.save_collection(&keys::agent_drafts(agent_id), &drafts)
    }

    /// Single-slot draft from the superseded `draft_<id>` layout.
    pub fn legacy_draft(&self, draft_id: i64) -> Result<Option<DraftRecord>, StorageError> {
        self.load_single(&keys::legacy_draft(draft_id))
    }

    // Admin collection

    pub fn admin_submissions(&self) -> Result<Vec<AdminSubmissionRecord>, StorageError> {
        self.load_collection(keys::ALL_AGENT_SUBMISSIONS)
    }

    pub fn save_admin_submissions(
        &self,
        records: &[AdminSubmissionRecord],
    ) -> Result<(), StorageError> {
        self.save_collection(keys::ALL_AGENT_SUBMISSIONS, records)
    }

    pub fn append_admin_submission(
        &self,
        record: AdminSubmissionRecord,
    ) -> Result<(), StorageError> {
        let mut records = self.admin_submissions()?;
        records.push(record);
        self.save_admin_submissions(&records)
    }

    // Session

    pub fn save_session(&self, session: &AgentSession) -> Result<(), StorageError> {
        let text = serde_json::to_string(session).map_err(|source| StorageError::Encode {
            key: keys::AGENT_SESSION.to_string(),
            source,
        })?;
        self.backend.set(keys::AGENT_SESSION, &text)
    }

    pub fn load_session(&self) -> Result<Option<AgentSession>, StorageError> {
        self.load_single(keys::AGENT_SESSION)
    }

    pub fn clear_session(&self) -> Result<(), StorageError> {
        self.backend.remove(keys::AGENT_SESSION)
    }

    // Shared plumbing

    fn load_collection<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, StorageError> {
        let Some(text) = self.backend.get(key)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&text) {
            Ok(records) => Ok(records),
            Err(error) => {
                warn!(key, %error, "stored collection is not valid JSON; treating as empty");
                Ok(Vec::new())
            }
        }
    }

    fn load_single<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(text) = self.backend.get(key)? else {
            return Ok(None);
        };

        match serde_json::from_str(&text) {
            Ok(record) => Ok(Some(record)),
            Err(error) => {
                warn!(key, %error, "stored record is not valid JSON; ignoring");
                Ok(None)
            }
        }
    }

    fn save_collection<T: Serialize>(&self, key: &str, records: &[T]) -> Result<(), StorageError> {
        let text = serde_json::to_string(records).map_err(|source| StorageError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.backend.set(key, &text)
    }
}
