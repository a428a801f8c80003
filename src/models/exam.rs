//! Exam schedule records.

use serde::{Deserialize, Serialize};

/// A scheduled exam. Created and deleted; never updated.
#[derive(Debug, Clone, Deserialize)]
pub struct Exam {
    pub id: i64,
    /// Course id the exam belongs to.
    #[serde(default)]
    pub course: Option<i64>,
    #[serde(default)]
    pub course_code: String,
    pub exam_type: String,
    pub date: String,
    pub time: String,
    pub location: String,
}

/// Payload for `POST /doctor/exams/`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateExam {
    pub course: i64,
    pub exam_type: String,
    pub date: String,
    pub time: String,
    pub location: String,
}

/// Exam types offered by the scheduler form.
pub const EXAM_TYPES: [&str; 3] = ["Midterm", "Final", "Quiz"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exam() {
        let json = r#"{"id":7,"course":5,"course_code":"EE101","exam_type":"Midterm","date":"2025-12-01","time":"10:00","location":"Hall 1"}"#;
        let exam: Exam = serde_json::from_str(json).unwrap();
        assert_eq!(exam.course, Some(5));
        assert_eq!(exam.exam_type, "Midterm");
    }
}
