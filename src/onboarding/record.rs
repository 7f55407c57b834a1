//! Persisted record types shared by the agent pages and the admin console.

use super::details::{CanonicalDetails, DetailsPayload};
use super::forms::FormPayload;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Draft,
    Submitted,
    Pending,
    Approved,
    Rejected,
}

impl SubmissionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Submitted => "Submitted",
            Self::Pending => "Pending Review",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

/// Which wizard produced a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionKind {
    #[serde(rename = "Full Onboarding")]
    FullOnboarding,
    #[serde(rename = "Short-Form")]
    ShortForm,
}

impl SubmissionKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::FullOnboarding => "Full Onboarding",
            Self::ShortForm => "Short-Form",
        }
    }
}

/// One row in an agent's submissions list. The identifier is the creation
/// timestamp in milliseconds, so it doubles as the recency sort key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub id: i64,
    pub project_name: String,
    pub builder_name: String,
    pub submission_type: SubmissionKind,
    pub status: SubmissionStatus,
    /// Calendar date string, `YYYY-MM-DD`.
    pub date: String,
    /// Local clock string, `hh:mm AM/PM`.
    pub time: String,
    /// Either the flat legacy shape or the full nested payload. Consumers go
    /// through [`DetailsPayload`] before reading fields.
    #[serde(default)]
    pub details: Value,
}

impl SubmissionRecord {
    pub fn details_payload(&self) -> DetailsPayload {
        DetailsPayload::from_value(&self.details)
    }

    pub fn canonical_details(&self) -> CanonicalDetails {
        self.details_payload().normalize()
    }
}

/// An incomplete submission parked for later completion. Never counted as
/// submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftRecord {
    pub id: i64,
    pub project_name: String,
    pub builder_name: String,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
    pub status: SubmissionStatus,
    pub form_data: FormPayload,
}

/// The admin console's view of a submission. Shares its identifier with the
/// agent-side record so edits can be propagated; the two collections are kept
/// logically consistent on a best-effort basis only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSubmissionRecord {
    pub id: i64,
    pub agent_id: String,
    pub agent_name: String,
    pub project_name: String,
    pub builder_name: String,
    pub rera_number: String,
    pub submitted_date: String,
    pub status: SubmissionStatus,
    pub form_data: FormPayload,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&SubmissionStatus::Pending).expect("serialize"),
            "\"pending\""
        );
        let parsed: SubmissionStatus =
            serde_json::from_str("\"approved\"").expect("deserialize");
        assert_eq!(parsed, SubmissionStatus::Approved);
    }

    #[test]
    fn submission_kind_uses_historical_tags() {
        assert_eq!(
            serde_json::to_string(&SubmissionKind::FullOnboarding).expect("serialize"),
            "\"Full Onboarding\""
        );
        assert_eq!(
            serde_json::to_string(&SubmissionKind::ShortForm).expect("serialize"),
            "\"Short-Form\""
        );
    }

    #[test]
    fn record_tolerates_missing_details() {
        let record: SubmissionRecord = serde_json::from_str(
            r#"{
                "id": 1,
                "projectName": "Skyline Towers",
                "builderName": "Prime Construction",
                "submissionType": "Full Onboarding",
                "status": "submitted",
                "date": "2024-06-13",
                "time": "11:15 AM"
            }"#,
        )
        .expect("deserialize");

        assert_eq!(record.canonical_details().rera_number, "");
    }
}
