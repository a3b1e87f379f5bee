//! Preference toggles.
//!
//! Each flag lives twice: mirrored in [`crate::state::AppState`] for
//! synchronous reads, and persisted through [`beacon_store::Preferences`]
//! so it survives a restart.  Toggles update both.

use serde::{Deserialize, Serialize};
use tracing::info;

use beacon_shared::constants::{
    PREF_HAS_AGREED_COMMUNITY_RULES, PREF_HAS_SEEN_COMMUNITY_RULES, PREF_IS_ANONYMOUS,
    PREF_IS_DARK_MODE, PREF_SAVED_REPORTS, PREF_USER_ID,
};
use beacon_store::Preferences;

use crate::error::Result;
use crate::events::StoreEvent;
use crate::session::Session;

/// Snapshot of the user-facing settings, shaped for the UI layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsSnapshot {
    pub user_id: Option<String>,
    pub is_dark_mode: bool,
    pub is_anonymous: bool,
    pub has_agreed_community_rules: bool,
    pub has_seen_community_rules: bool,
}

impl Session {
    /// Attach the preference database and load its flags into the state.
    /// Called once at startup.
    pub fn attach_preferences(&self, preferences: Preferences) -> Result<()> {
        self.lock()?.attach_preferences(preferences)?;
        info!("Preferences loaded");
        Ok(())
    }

    /// Current settings as one snapshot.
    pub fn settings(&self) -> Result<SettingsSnapshot> {
        let guard = self.lock()?;
        Ok(SettingsSnapshot {
            user_id: guard.user_id.clone(),
            is_dark_mode: guard.is_dark_mode,
            is_anonymous: guard.is_anonymous,
            has_agreed_community_rules: guard.has_agreed_community_rules,
            has_seen_community_rules: guard.has_seen_community_rules,
        })
    }

    pub fn set_dark_mode(&self, value: bool) -> Result<()> {
        {
            let mut guard = self.lock()?;
            guard.is_dark_mode = value;
            if let Some(ref prefs) = guard.preferences {
                prefs.set_dark_mode(value)?;
            }
        }
        self.emit(StoreEvent::PreferenceChanged {
            key: PREF_IS_DARK_MODE.to_string(),
        });
        Ok(())
    }

    pub fn set_anonymous(&self, value: bool) -> Result<()> {
        {
            let mut guard = self.lock()?;
            guard.is_anonymous = value;
            if let Some(ref prefs) = guard.preferences {
                prefs.set_anonymous(value)?;
            }
        }
        self.emit(StoreEvent::PreferenceChanged {
            key: PREF_IS_ANONYMOUS.to_string(),
        });
        Ok(())
    }

    /// Record agreement to the community rules (one-way in the UI).
    pub fn agree_to_community_rules(&self) -> Result<()> {
        {
            let mut guard = self.lock()?;
            guard.has_agreed_community_rules = true;
            if let Some(ref prefs) = guard.preferences {
                prefs.set_has_agreed_community_rules(true)?;
            }
        }
        self.emit(StoreEvent::PreferenceChanged {
            key: PREF_HAS_AGREED_COMMUNITY_RULES.to_string(),
        });
        Ok(())
    }

    /// Record that the community rules screen has been shown.
    pub fn mark_community_rules_seen(&self) -> Result<()> {
        {
            let mut guard = self.lock()?;
            guard.has_seen_community_rules = true;
            if let Some(ref prefs) = guard.preferences {
                prefs.set_has_seen_community_rules(true)?;
            }
        }
        self.emit(StoreEvent::PreferenceChanged {
            key: PREF_HAS_SEEN_COMMUNITY_RULES.to_string(),
        });
        Ok(())
    }

    /// Set the local user's identity.
    pub fn set_user_id(&self, user_id: &str) -> Result<()> {
        {
            let mut guard = self.lock()?;
            guard.user_id = Some(user_id.to_string());
            if let Some(ref prefs) = guard.preferences {
                prefs.set_user_id(user_id)?;
            }
        }
        self.emit(StoreEvent::PreferenceChanged {
            key: PREF_USER_ID.to_string(),
        });
        Ok(())
    }

    /// Append one report reference to the persisted saved-reports list.
    pub fn save_report(&self, report: &str) -> Result<()> {
        {
            let guard = self.lock()?;
            if let Some(ref prefs) = guard.preferences {
                let mut reports = prefs.saved_reports()?;
                reports.push(report.to_string());
                prefs.set_saved_reports(&reports)?;
            }
        }
        self.emit(StoreEvent::PreferenceChanged {
            key: PREF_SAVED_REPORTS.to_string(),
        });
        Ok(())
    }

    /// The persisted saved-reports list (empty when no preferences are
    /// attached).
    pub fn saved_reports(&self) -> Result<Vec<String>> {
        let guard = self.lock()?;
        match guard.preferences {
            Some(ref prefs) => Ok(prefs.saved_reports()?),
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with_prefs(dir: &tempfile::TempDir) -> Session {
        let prefs = Preferences::open_at(&dir.path().join("prefs.db")).unwrap();
        let session = Session::new();
        session.attach_preferences(prefs).unwrap();
        session
    }

    #[test]
    fn toggles_update_state_and_disk() {
        let dir = tempfile::tempdir().unwrap();
        let session = session_with_prefs(&dir);

        session.set_dark_mode(true).unwrap();
        session.set_anonymous(true).unwrap();
        session.agree_to_community_rules().unwrap();
        session.set_user_id("user-42").unwrap();

        let snapshot = session.settings().unwrap();
        assert!(snapshot.is_dark_mode);
        assert!(snapshot.is_anonymous);
        assert!(snapshot.has_agreed_community_rules);
        assert!(!snapshot.has_seen_community_rules);
        assert_eq!(snapshot.user_id.as_deref(), Some("user-42"));

        // A second session over the same database sees the persisted flags.
        let prefs = Preferences::open_at(&dir.path().join("prefs.db")).unwrap();
        let reopened = Session::new();
        reopened.attach_preferences(prefs).unwrap();
        let snapshot = reopened.settings().unwrap();
        assert!(snapshot.is_dark_mode);
        assert_eq!(snapshot.user_id.as_deref(), Some("user-42"));
    }

    #[test]
    fn toggles_work_without_a_database() {
        let session = Session::new();

        session.set_dark_mode(true).unwrap();
        assert!(session.settings().unwrap().is_dark_mode);
        assert!(session.saved_reports().unwrap().is_empty());
    }

    #[test]
    fn saved_reports_accumulate() {
        let dir = tempfile::tempdir().unwrap();
        let session = session_with_prefs(&dir);

        session.save_report("report-1").unwrap();
        session.save_report("report-2").unwrap();

        assert_eq!(
            session.saved_reports().unwrap(),
            vec!["report-1".to_string(), "report-2".to_string()]
        );
    }
}
