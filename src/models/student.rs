//! Student account records (staff-scoped).

use serde::{Deserialize, Serialize};

/// A student account scoped by department and level.
#[derive(Debug, Clone, Deserialize)]
pub struct Student {
    pub id: i64,
    /// The student id used to sign in.
    pub username: String,
    #[serde(default)]
    pub first_name: String,
}

/// Payload for `PUT /students/{id}/manage/`. Only these two fields are
/// editable client-side.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateStudent {
    pub username: String,
    pub first_name: String,
}

/// A graduation certificate from `GET /my-certificate/`.
#[derive(Debug, Clone, Deserialize)]
pub struct Certificate {
    /// Download URL served by the backend.
    pub file: String,
    #[serde(default)]
    pub uploaded_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_student_list() {
        let json = r#"[{"id":11,"username":"42100123","first_name":"Sara"},{"id":12,"username":"42100124"}]"#;
        let students: Vec<Student> = serde_json::from_str(json).unwrap();
        assert_eq!(students.len(), 2);
        assert_eq!(students[0].first_name, "Sara");
        assert_eq!(students[1].first_name, "");
    }
}
