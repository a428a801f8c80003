//! Course records.

use serde::Deserialize;

/// A course as listed by `GET /courses/` or `GET /doctor/courses/`.
#[derive(Debug, Clone, Deserialize)]
pub struct Course {
    pub id: i64,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub department_name: String,
    #[serde(default)]
    pub level_name: Option<String>,
    #[serde(default)]
    pub credit_hours: i32,
    /// Present only on student-scoped listings.
    #[serde(default)]
    pub student_grade: Option<f64>,
    #[serde(default)]
    pub student_attendance: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_course_list() {
        let json = r#"[
            {"id":5,"code":"EE101","name":"Circuit Analysis","department_name":"Electrical","credit_hours":3},
            {"id":6,"code":"CE201","name":"Structures","department_name":"Civil","level_name":"Second Year","credit_hours":4,"student_grade":82.5}
        ]"#;
        let courses: Vec<Course> = serde_json::from_str(json).unwrap();
        assert_eq!(courses.len(), 2);
        assert_eq!(courses[0].code, "EE101");
        assert!(courses[0].level_name.is_none());
        assert_eq!(courses[1].student_grade, Some(82.5));
    }
}
