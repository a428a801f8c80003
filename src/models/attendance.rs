//! Attendance records (read-only from the UI).

use serde::Deserialize;

/// One attendance row from `GET /my-attendance/` or `GET /doctor/attendance/`.
#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceRecord {
    pub id: i64,
    #[serde(default)]
    pub student_id: Option<i64>,
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub course_code: String,
    #[serde(default)]
    pub course_name: Option<String>,
    #[serde(default)]
    pub attended_lectures: Option<i32>,
    #[serde(default)]
    pub total_lectures: Option<i32>,
    #[serde(default)]
    pub percentage: Option<f64>,
    #[serde(default)]
    pub status: String,
}

impl AttendanceRecord {
    pub fn is_present(&self) -> bool {
        self.status.eq_ignore_ascii_case("present")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_student_attendance() {
        let json = r#"[{"id":1,"date":"2025-11-02","course_code":"EE101","course_name":"Circuit Analysis","status":"Present"},
                       {"id":2,"date":"2025-11-09","course_code":"EE101","status":"Absent"}]"#;
        let records: Vec<AttendanceRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].is_present());
        assert!(!records[1].is_present());
    }

    #[test]
    fn test_parse_summary_fields() {
        let json = r#"{"id":3,"student_name":"Omar","course_code":"CE201","attended_lectures":10,"total_lectures":12,"percentage":83.3,"status":"Present"}"#;
        let record: AttendanceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.attended_lectures, Some(10));
        assert_eq!(record.percentage, Some(83.3));
    }
}
