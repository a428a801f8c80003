//! Session storage and role routing.
//!
//! The session is written once at login, read through a single accessor,
//! and cleared at logout. It persists across restarts in the platform data
//! directory so a relaunch resumes the signed-in dashboard.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};

/// User role as returned by the login endpoint.
///
/// Parsed once at the login boundary; every later branch matches this enum
/// exhaustively instead of comparing strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Role {
    #[default]
    Student,
    Doctor,
    StaffAffairs,
}

impl Role {
    /// Parse the server's role tag. Unknown or missing tags fall back to
    /// `Student`, matching the portal's default account role.
    pub fn parse(tag: &str) -> Self {
        match tag.trim().to_ascii_uppercase().as_str() {
            "DOCTOR" => Role::Doctor,
            "ADMIN" | "STAFF" | "STAFF_AFFAIRS" => Role::StaffAffairs,
            _ => Role::Student,
        }
    }

    /// Storage tag written to the session file.
    pub fn tag(&self) -> &'static str {
        match self {
            Role::Student => "STUDENT",
            Role::Doctor => "DOCTOR",
            Role::StaffAffairs => "STAFF_AFFAIRS",
        }
    }

    /// Display name for headers and the activity log.
    pub fn name(&self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Doctor => "Doctor",
            Role::StaffAffairs => "Student Affairs",
        }
    }
}

/// Authenticated session: tokens plus the role tag from the login response.
///
/// No expiry tracking; an expired token simply makes the next request fail
/// with an authentication error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub user_role: Role,
    pub username: String,
}

impl Session {
    pub fn role(&self) -> Role {
        self.user_role
    }
}

/// File-backed session store.
///
/// One TOML file with the fixed field names `access_token`, `refresh_token`,
/// `user_role`, `username`. Written at login, removed at logout.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default store location in the platform data directory.
    pub fn default_path() -> PathBuf {
        crate::config::AppConfig::data_dir().join("session.toml")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist a session, replacing any previous one.
    pub fn store(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(session).map_err(|e| AppError::session(format!("serialize failed: {e}")))?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    /// Load the persisted session, if any. A corrupt file is treated as no
    /// session rather than an error, matching a cleared login state.
    pub fn load(&self) -> Option<Session> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        match toml::from_str::<Session>(&content) {
            Ok(session) if !session.access_token.is_empty() => Some(session),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!("Discarding unreadable session file: {}", e);
                None
            }
        }
    }

    /// Remove the persisted session (logout).
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> SessionStore {
        let path = std::env::temp_dir().join(format!("bsu_portal_session_{name}_{}.toml", std::process::id()));
        let _ = std::fs::remove_file(&path);
        SessionStore::new(path)
    }

    fn sample_session(role: Role) -> Session {
        Session {
            access_token: "abc123".to_string(),
            refresh_token: "def456".to_string(),
            user_role: role,
            username: "42100123".to_string(),
        }
    }

    #[test]
    fn test_role_parse_known_tags() {
        assert_eq!(Role::parse("STUDENT"), Role::Student);
        assert_eq!(Role::parse("DOCTOR"), Role::Doctor);
        assert_eq!(Role::parse("ADMIN"), Role::StaffAffairs);
        assert_eq!(Role::parse("STAFF_AFFAIRS"), Role::StaffAffairs);
    }

    #[test]
    fn test_role_parse_is_case_insensitive() {
        assert_eq!(Role::parse("doctor"), Role::Doctor);
        assert_eq!(Role::parse(" admin "), Role::StaffAffairs);
    }

    #[test]
    fn test_role_parse_unknown_falls_back_to_student() {
        assert_eq!(Role::parse(""), Role::Student);
        assert_eq!(Role::parse("JANITOR"), Role::Student);
    }

    #[test]
    fn test_store_load_roundtrip() {
        let store = temp_store("roundtrip");
        store.store(&sample_session(Role::Doctor)).unwrap();

        let loaded = store.load().expect("session should load");
        assert_eq!(loaded.access_token, "abc123");
        assert_eq!(loaded.role(), Role::Doctor);
        assert_eq!(loaded.username, "42100123");

        store.clear().unwrap();
    }

    #[test]
    fn test_clear_removes_session() {
        let store = temp_store("clear");
        store.store(&sample_session(Role::Student)).unwrap();
        store.clear().unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let store = temp_store("clear_twice");
        assert!(store.clear().is_ok());
        assert!(store.clear().is_ok());
    }

    #[test]
    fn test_empty_token_treated_as_no_session() {
        let store = temp_store("empty_token");
        let mut session = sample_session(Role::Student);
        session.access_token = String::new();
        store.store(&session).unwrap();
        assert!(store.load().is_none());
        store.clear().unwrap();
    }

    #[test]
    fn test_corrupt_file_treated_as_no_session() {
        let store = temp_store("corrupt");
        std::fs::write(store.path(), "not really toml [[[").unwrap();
        assert!(store.load().is_none());
        store.clear().unwrap();
    }
}
