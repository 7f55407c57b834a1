//! Identity plumbing: the agent session object and the placeholder admin
//! credential check.

use super::store::SubmissionStore;
use crate::storage::{StorageBackend, StorageError};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Hard-coded admin login. Explicitly a placeholder, not a security boundary.
pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin123";

/// In-memory identity for the logged-in agent, persisted to a single-slot
/// key so a reload keeps the session alive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentSession {
    pub name: String,
    pub email: String,
    /// Generated at login time from the clock; also used to derive the
    /// per-agent storage keys.
    pub id: String,
}

impl AgentSession {
    pub fn new(name: &str, email: &str, now: DateTime<Local>) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            id: now.timestamp_millis().to_string(),
        }
    }
}

/// Agent login is open: any name/email pair is accepted and handed a fresh
/// session, mirroring the portal's pre-registration-free flow.
pub fn login<S: StorageBackend>(
    store: &SubmissionStore<S>,
    name: &str,
    email: &str,
    now: DateTime<Local>,
) -> Result<AgentSession, StorageError> {
    let session = AgentSession::new(name, email, now);
    store.save_session(&session)?;
    Ok(session)
}

pub fn logout<S: StorageBackend>(store: &SubmissionStore<S>) -> Result<(), StorageError> {
    store.clear_session()
}

pub fn verify_admin(username: &str, password: &str) -> bool {
    username == ADMIN_USERNAME && password == ADMIN_PASSWORD
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use chrono::TimeZone;

    #[test]
    fn admin_credentials_are_the_documented_pair() {
        assert!(verify_admin("admin", "admin123"));
        assert!(!verify_admin("admin", "wrong"));
        assert!(!verify_admin("root", "admin123"));
    }

    #[test]
    fn login_persists_session_until_logout() {
        let store = SubmissionStore::new(MemoryStore::new());
        let now = Local.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap();

        let session = login(&store, "  Asha Verma ", "asha@example.com", now).expect("login");
        assert_eq!(session.name, "Asha Verma");
        assert_eq!(store.load_session().expect("load"), Some(session));

        logout(&store).expect("logout");
        assert_eq!(store.load_session().expect("load"), None);
    }
}
