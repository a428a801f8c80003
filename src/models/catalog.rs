//! University structure lookup entities: departments, academic years, levels.

use serde::{Deserialize, Serialize};

/// A department (e.g. Electrical, Civil).
#[derive(Debug, Clone, Deserialize)]
pub struct Department {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
}

/// An academic year label (e.g. "2025-2026").
#[derive(Debug, Clone, Deserialize)]
pub struct AcademicYear {
    pub id: i64,
    pub year: String,
    #[serde(default)]
    pub is_active: bool,
}

/// A study level (e.g. "Prep", "First Year").
#[derive(Debug, Clone, Deserialize)]
pub struct Level {
    pub id: i64,
    pub name: String,
}

/// Name-only creation payload for departments and levels.
#[derive(Debug, Clone, Serialize)]
pub struct CreateNamed {
    pub name: String,
}

/// Creation payload for academic years (the backend field is `year`).
#[derive(Debug, Clone, Serialize)]
pub struct CreateYear {
    pub year: String,
}

/// Outcome of a catalog delete request.
///
/// The server decides per caller role: either the row is gone, or the
/// request was recorded for approval and nothing changed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Pending,
}

#[derive(Debug, Deserialize)]
struct DeleteResponse {
    #[serde(default)]
    status: String,
}

impl DeleteOutcome {
    /// Parse a delete response body. An empty body (204) means deleted; a
    /// `status` field containing "pending" means the soft path was taken.
    pub fn parse(body: &str) -> Self {
        if body.trim().is_empty() {
            return DeleteOutcome::Deleted;
        }
        match serde_json::from_str::<DeleteResponse>(body) {
            Ok(resp) if resp.status.to_ascii_lowercase().contains("pending") => DeleteOutcome::Pending,
            _ => DeleteOutcome::Deleted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_department_list() {
        let json = r#"[{"id":1,"name":"Electrical","code":"EE"},{"id":2,"name":"Civil"}]"#;
        let departments: Vec<Department> = serde_json::from_str(json).unwrap();
        assert_eq!(departments.len(), 2);
        assert_eq!(departments[0].code.as_deref(), Some("EE"));
        assert!(departments[1].code.is_none());
    }

    #[test]
    fn test_delete_outcome_empty_body_is_deleted() {
        assert_eq!(DeleteOutcome::parse(""), DeleteOutcome::Deleted);
        assert_eq!(DeleteOutcome::parse("  "), DeleteOutcome::Deleted);
    }

    #[test]
    fn test_delete_outcome_explicit_deleted() {
        assert_eq!(DeleteOutcome::parse(r#"{"status":"deleted"}"#), DeleteOutcome::Deleted);
    }

    #[test]
    fn test_delete_outcome_pending() {
        assert_eq!(DeleteOutcome::parse(r#"{"status":"pending"}"#), DeleteOutcome::Pending);
        assert_eq!(
            DeleteOutcome::parse(r#"{"status":"Pending approval"}"#),
            DeleteOutcome::Pending
        );
    }

    #[test]
    fn test_delete_outcome_unknown_body_defaults_to_deleted() {
        assert_eq!(DeleteOutcome::parse(r#"{"ok":true}"#), DeleteOutcome::Deleted);
    }
}
