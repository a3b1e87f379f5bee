//! Scalar preference persistence.
//!
//! The only thing Beacon writes to disk: a handful of string-valued
//! preferences (dark mode, community-rules consent, anonymous mode, the
//! local user id, saved reports) kept in a single rusqlite key-value
//! table.  Read once at startup, written on toggle.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Result, StoreError};
use beacon_shared::constants::{
    PREF_HAS_AGREED_COMMUNITY_RULES, PREF_HAS_SEEN_COMMUNITY_RULES, PREF_IS_ANONYMOUS,
    PREF_IS_DARK_MODE, PREF_SAVED_REPORTS, PREF_USER_ID,
};

/// Handle to the local preference database.
pub struct Preferences {
    conn: Connection,
}

impl Preferences {
    /// Open (or create) the default preference database.
    ///
    /// The file is placed in the platform-appropriate data directory:
    /// - Linux:   `~/.local/share/beacon/prefs.db`
    /// - macOS:   `~/Library/Application Support/com.beacon.beacon/prefs.db`
    /// - Windows: `{FOLDERID_RoamingAppData}\beacon\beacon\data\prefs.db`
    pub fn new() -> Result<Self> {
        let project_dirs =
            ProjectDirs::from("com", "beacon", "beacon").ok_or(StoreError::NoDataDir)?;

        let data_dir = project_dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        let db_path = data_dir.join("prefs.db");

        tracing::info!(path = %db_path.display(), "opening preference database");

        Self::open_at(&db_path)
    }

    /// Open (or create) a preference database at an explicit path.
    ///
    /// This is useful for tests and for embedding the store inside custom
    /// directory layouts.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS preferences (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;

        Ok(Self { conn })
    }

    /// Return the filesystem path of the open database (if any).
    pub fn path(&self) -> Option<PathBuf> {
        self.conn.path().map(PathBuf::from)
    }

    // ------------------------------------------------------------------
    // Raw key-value access
    // ------------------------------------------------------------------

    /// Fetch the raw string value for `key`, if set.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Set the raw string value for `key`, replacing any previous value.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO preferences (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    fn get_bool(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.as_deref() == Some("true"))
    }

    fn set_bool(&self, key: &str, value: bool) -> Result<()> {
        self.set(key, if value { "true" } else { "false" })
    }

    // ------------------------------------------------------------------
    // Typed helpers
    // ------------------------------------------------------------------

    pub fn has_agreed_community_rules(&self) -> Result<bool> {
        self.get_bool(PREF_HAS_AGREED_COMMUNITY_RULES)
    }

    pub fn set_has_agreed_community_rules(&self, value: bool) -> Result<()> {
        self.set_bool(PREF_HAS_AGREED_COMMUNITY_RULES, value)
    }

    pub fn has_seen_community_rules(&self) -> Result<bool> {
        self.get_bool(PREF_HAS_SEEN_COMMUNITY_RULES)
    }

    pub fn set_has_seen_community_rules(&self, value: bool) -> Result<()> {
        self.set_bool(PREF_HAS_SEEN_COMMUNITY_RULES, value)
    }

    pub fn is_dark_mode(&self) -> Result<bool> {
        self.get_bool(PREF_IS_DARK_MODE)
    }

    pub fn set_dark_mode(&self, value: bool) -> Result<()> {
        self.set_bool(PREF_IS_DARK_MODE, value)
    }

    pub fn is_anonymous(&self) -> Result<bool> {
        self.get_bool(PREF_IS_ANONYMOUS)
    }

    pub fn set_anonymous(&self, value: bool) -> Result<()> {
        self.set_bool(PREF_IS_ANONYMOUS, value)
    }

    pub fn user_id(&self) -> Result<Option<String>> {
        self.get(PREF_USER_ID)
    }

    pub fn set_user_id(&self, value: &str) -> Result<()> {
        self.set(PREF_USER_ID, value)
    }

    /// Saved SOS reports, stored as a JSON-serialized string array.
    pub fn saved_reports(&self) -> Result<Vec<String>> {
        match self.get(PREF_SAVED_REPORTS)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    pub fn set_saved_reports(&self, reports: &[String]) -> Result<()> {
        let json = serde_json::to_string(reports)?;
        self.set(PREF_SAVED_REPORTS, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_temp() -> (tempfile::TempDir, Preferences) {
        let dir = tempfile::tempdir().unwrap();
        let prefs = Preferences::open_at(&dir.path().join("prefs.db")).expect("should open");
        (dir, prefs)
    }

    #[test]
    fn unset_keys_read_as_defaults() {
        let (_dir, prefs) = open_temp();

        assert!(prefs.get("someUnknownKey").unwrap().is_none());
        assert!(!prefs.is_dark_mode().unwrap());
        assert!(!prefs.has_agreed_community_rules().unwrap());
        assert!(prefs.user_id().unwrap().is_none());
        assert!(prefs.saved_reports().unwrap().is_empty());
    }

    #[test]
    fn toggles_round_trip() {
        let (_dir, prefs) = open_temp();

        prefs.set_dark_mode(true).unwrap();
        prefs.set_anonymous(true).unwrap();
        prefs.set_has_seen_community_rules(true).unwrap();
        assert!(prefs.is_dark_mode().unwrap());
        assert!(prefs.is_anonymous().unwrap());
        assert!(prefs.has_seen_community_rules().unwrap());

        prefs.set_dark_mode(false).unwrap();
        assert!(!prefs.is_dark_mode().unwrap());
    }

    #[test]
    fn saved_reports_round_trip_as_json() {
        let (_dir, prefs) = open_temp();

        let reports = vec!["report-1".to_string(), "report-2".to_string()];
        prefs.set_saved_reports(&reports).unwrap();
        assert_eq!(prefs.saved_reports().unwrap(), reports);

        // The raw value is a plain JSON string array.
        let raw = prefs.get(PREF_SAVED_REPORTS).unwrap().unwrap();
        assert_eq!(raw, r#"["report-1","report-2"]"#);
    }

    #[test]
    fn corrupt_saved_reports_surface_as_json_error() {
        let (_dir, prefs) = open_temp();

        prefs.set(PREF_SAVED_REPORTS, "not json").unwrap();
        assert!(matches!(
            prefs.saved_reports(),
            Err(StoreError::Json(_))
        ));
    }

    #[test]
    fn reopen_preserves_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.db");

        {
            let prefs = Preferences::open_at(&path).unwrap();
            prefs.set_user_id("user-42").unwrap();
        }

        let prefs = Preferences::open_at(&path).unwrap();
        assert_eq!(prefs.user_id().unwrap().as_deref(), Some("user-42"));
        assert!(prefs.path().is_some());
    }
}
