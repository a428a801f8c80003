//! Grade records.

use serde::{Deserialize, Serialize};

/// A grade row from `GET /my-grades/` or `GET /doctor/grades/`.
///
/// Only `score` is editable client-side; everything else is display data
/// serialized by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct Grade {
    pub id: i64,
    #[serde(default)]
    pub student_id: Option<i64>,
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default)]
    pub course_code: Option<String>,
    #[serde(default)]
    pub course_name: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub semester: String,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub letter_grade: Option<String>,
}

impl Grade {
    /// Displayed student label; doctor listings carry either a name or an id.
    pub fn student_label(&self) -> String {
        match (&self.student_name, self.student_id) {
            (Some(name), _) if !name.is_empty() => name.clone(),
            (_, Some(id)) => format!("Student ID: {id}"),
            _ => "-".to_string(),
        }
    }
}

/// Payload for `PUT /doctor/grades/{id}/update/`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateScore {
    pub score: f64,
}

/// Severity bucket for color-coding a letter grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeBand {
    Good,
    Fair,
    Weak,
    Fail,
}

/// Map a letter grade to its display band.
pub fn grade_band(letter: &str) -> GradeBand {
    match letter.chars().next() {
        Some('A') => GradeBand::Good,
        Some('B') => GradeBand::Fair,
        Some('C') => GradeBand::Weak,
        _ => GradeBand::Fail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_doctor_grade_row() {
        let json = r#"{"id":9,"student_id":17,"student_name":"Mona Adel","course_code":"EE101","semester":"Fall 2025","score":75.0,"letter_grade":"B"}"#;
        let grade: Grade = serde_json::from_str(json).unwrap();
        assert_eq!(grade.score, Some(75.0));
        assert_eq!(grade.student_label(), "Mona Adel");
    }

    #[test]
    fn test_student_label_falls_back_to_id() {
        let json = r#"{"id":9,"student_id":17,"semester":"Fall 2025"}"#;
        let grade: Grade = serde_json::from_str(json).unwrap();
        assert_eq!(grade.student_label(), "Student ID: 17");
    }

    #[test]
    fn test_grade_bands() {
        assert_eq!(grade_band("A-"), GradeBand::Good);
        assert_eq!(grade_band("B"), GradeBand::Fair);
        assert_eq!(grade_band("C"), GradeBand::Weak);
        assert_eq!(grade_band("F"), GradeBand::Fail);
        assert_eq!(grade_band("N/A"), GradeBand::Fail);
    }
}
