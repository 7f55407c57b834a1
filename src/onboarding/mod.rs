//! The onboarding domain: records, normalization, the form wizards, derived
//! report views, and the admin review console.

pub mod admin;
pub mod auth;
pub mod details;
pub mod forms;
pub mod record;
pub mod reports;
pub mod short_form;
pub mod store;
pub mod wizard;

pub use admin::{AdminConsole, AdminError};
pub use auth::{login, logout, verify_admin, AgentSession};
pub use details::{display_field, CanonicalDetails, DetailsPayload, FlatDetails, NOT_AVAILABLE};
pub use forms::{
    BasicsPatch, CommissionMode, ConstructionPatch, FinancialPatch, FormPayload, SecondaryPatch,
    Toggle, UnitTypeConfig, UnitVariant, UNIT_TYPES,
};
pub use record::{
    AdminSubmissionRecord, DraftRecord, SubmissionKind, SubmissionRecord, SubmissionStatus,
};
pub use reports::{
    agent_names, display_date, group_by_date, render_timestamp, sort_recent_first, AdminFilter,
    AdminStats, ReportFilter, SubmissionStats, INVALID_DATE,
};
pub use short_form::ShortFormRecord;
pub use store::SubmissionStore;
pub use wizard::{FormWizard, ValidationError};

use crate::storage::{StorageBackend, StorageError};
use chrono::{DateTime, Local};

/// Error raised by the persistence flows that sit above the wizard.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Finalizes the wizard and persists the submission: once to the agent's own
/// collection and once, as a `pending` review record, to the admin-wide
/// collection (same identifier, so the two can be kept in sync). When the
/// wizard was resumed from a draft, the draft is removed afterward.
pub fn submit_project<S: StorageBackend>(
    store: &SubmissionStore<S>,
    session: &AgentSession,
    wizard: &FormWizard,
    now: DateTime<Local>,
    draft_id: Option<i64>,
) -> Result<SubmissionRecord, SubmitError> {
    let record = wizard.finalize(now)?;
    store.append_submission(&session.id, record.clone())?;

    let payload = wizard.payload();
    store.append_admin_submission(AdminSubmissionRecord {
        id: record.id,
        agent_id: session.id.clone(),
        agent_name: session.name.clone(),
        project_name: record.project_name.clone(),
        builder_name: record.builder_name.clone(),
        rera_number: payload.basics.rera_number.clone(),
        submitted_date: record.date.clone(),
        status: SubmissionStatus::Pending,
        form_data: payload.clone(),
    })?;

    if let Some(draft_id) = draft_id {
        store.remove_draft(&session.id, draft_id)?;
    }

    Ok(record)
}

/// Converts a short-form record into the nested shape and parks it in the
/// agent's drafts collection.
pub fn save_short_form_draft<S: StorageBackend>(
    store: &SubmissionStore<S>,
    session: &AgentSession,
    short_form: ShortFormRecord,
    now: DateTime<Local>,
) -> Result<DraftRecord, SubmitError> {
    let draft = short_form.into_draft(now)?;
    store.upsert_draft(&session.id, draft.clone())?;
    Ok(draft)
}
