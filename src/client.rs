//! Portal REST API client.
//!
//! One `reqwest::Client` per app, configured with the base URL and transport
//! timeout from config. Every method is a single request; the bearer token
//! is attached per call and nothing is retried.

use std::path::Path;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode, multipart};
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::error::{AppError, Result};
use crate::models::attendance::AttendanceRecord;
use crate::models::auth::{LoginRequest, LoginResponse};
use crate::models::catalog::{AcademicYear, CreateNamed, CreateYear, DeleteOutcome, Department, Level};
use crate::models::course::Course;
use crate::models::exam::{CreateExam, Exam};
use crate::models::grade::{Grade, UpdateScore};
use crate::models::material::Material;
use crate::models::news::NewsItem;
use crate::models::student::{Certificate, Student, UpdateStudent};

/// Bulk upload endpoints that take a bare Excel file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetKind {
    Grades,
    Attendance,
    Students,
}

impl SheetKind {
    fn path(&self) -> &'static str {
        match self {
            SheetKind::Grades => "upload-grades/",
            SheetKind::Attendance => "upload-attendance/",
            SheetKind::Students => "upload-students/",
        }
    }
}

/// Portal API client.
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{base}/{path}", base = self.base_url)
    }

    fn authed(&self, builder: RequestBuilder, token: &str) -> RequestBuilder {
        builder.header("Authorization", format!("Bearer {token}"))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, token: Option<&str>) -> Result<T> {
        let mut builder = self.client.get(self.url(path));
        if let Some(token) = token {
            builder = self.authed(builder, token);
        }
        let response = check(builder.send().await?).await?;
        parse_body(response).await
    }

    // --- Authentication ---

    /// `POST /token/`: exchange credentials for a token pair plus role tag.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let payload = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response = check(self.client.post(self.url("token/")).json(&payload).send().await?).await?;
        parse_body(response).await
    }

    // --- Public listings ---

    pub async fn fetch_news(&self) -> Result<Vec<NewsItem>> {
        self.get_json("news/", None).await
    }

    pub async fn fetch_courses(&self) -> Result<Vec<Course>> {
        self.get_json("courses/", None).await
    }

    // --- Student views ---

    pub async fn fetch_my_grades(&self, token: &str) -> Result<Vec<Grade>> {
        self.get_json("my-grades/", Some(token)).await
    }

    pub async fn fetch_my_attendance(&self, token: &str) -> Result<Vec<AttendanceRecord>> {
        self.get_json("my-attendance/", Some(token)).await
    }

    /// `GET /my-certificate/`: `None` when no certificate was uploaded yet.
    pub async fn fetch_my_certificate(&self, token: &str) -> Result<Option<Certificate>> {
        match self.get_json::<Certificate>("my-certificate/", Some(token)).await {
            Ok(cert) => Ok(Some(cert)),
            Err(AppError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn fetch_course_materials(&self, token: &str, course_id: i64) -> Result<Vec<Material>> {
        self.get_json(&format!("courses/{course_id}/materials/"), Some(token)).await
    }

    // --- Doctor views ---

    pub async fn fetch_doctor_courses(&self, token: &str) -> Result<Vec<Course>> {
        self.get_json("doctor/courses/", Some(token)).await
    }

    pub async fn fetch_doctor_grades(&self, token: &str, course_id: Option<i64>) -> Result<Vec<Grade>> {
        let path = match course_id {
            Some(id) => format!("doctor/grades/?course_id={id}"),
            None => "doctor/grades/".to_string(),
        };
        self.get_json(&path, Some(token)).await
    }

    /// `PUT /doctor/grades/{id}/update/`: score is the only editable field.
    pub async fn update_grade(&self, token: &str, grade_id: i64, score: f64) -> Result<()> {
        let builder = self
            .client
            .put(self.url(&format!("doctor/grades/{grade_id}/update/")))
            .json(&UpdateScore { score });
        check(self.authed(builder, token).send().await?).await?;
        Ok(())
    }

    pub async fn fetch_doctor_attendance(&self, token: &str, course_id: Option<i64>) -> Result<Vec<AttendanceRecord>> {
        let path = match course_id {
            Some(id) => format!("doctor/attendance/?course_id={id}"),
            None => "doctor/attendance/".to_string(),
        };
        self.get_json(&path, Some(token)).await
    }

    /// `POST /upload-material/`: multipart title + course id + file.
    pub async fn upload_material(&self, token: &str, course_id: i64, title: &str, file: &Path) -> Result<String> {
        let form = multipart::Form::new()
            .text("course_id", course_id.to_string())
            .text("title", title.to_string())
            .part("file", file_part(file).await?);

        let builder = self.client.post(self.url("upload-material/")).multipart(form);
        let response = check(self.authed(builder, token).send().await?).await?;
        Ok(upload_status(&response.text().await?))
    }

    pub async fn delete_material(&self, token: &str, material_id: i64) -> Result<()> {
        let builder = self.client.delete(self.url(&format!("material/{material_id}/delete/")));
        check(self.authed(builder, token).send().await?).await?;
        Ok(())
    }

    // --- Exams ---

    pub async fn fetch_exams(&self, token: &str) -> Result<Vec<Exam>> {
        self.get_json("doctor/exams/", Some(token)).await
    }

    /// `POST /doctor/exams/`: returns the created record for local append.
    pub async fn create_exam(&self, token: &str, data: &CreateExam) -> Result<Exam> {
        let builder = self.client.post(self.url("doctor/exams/")).json(data);
        let response = check(self.authed(builder, token).send().await?).await?;
        parse_body(response).await
    }

    pub async fn delete_exam(&self, token: &str, exam_id: i64) -> Result<()> {
        let builder = self.client.delete(self.url(&format!("doctor/exams/{exam_id}/delete/")));
        check(self.authed(builder, token).send().await?).await?;
        Ok(())
    }

    // --- University structure (staff) ---

    pub async fn fetch_departments(&self, token: &str) -> Result<Vec<Department>> {
        self.get_json("departments/", Some(token)).await
    }

    pub async fn fetch_years(&self, token: &str) -> Result<Vec<AcademicYear>> {
        self.get_json("years/", Some(token)).await
    }

    pub async fn fetch_levels(&self, token: &str) -> Result<Vec<Level>> {
        self.get_json("levels/", Some(token)).await
    }

    pub async fn create_department(&self, token: &str, name: &str) -> Result<Department> {
        let payload = CreateNamed { name: name.to_string() };
        let builder = self.client.post(self.url("departments/")).json(&payload);
        let response = check(self.authed(builder, token).send().await?).await?;
        parse_body(response).await
    }

    pub async fn create_year(&self, token: &str, year: &str) -> Result<AcademicYear> {
        let payload = CreateYear { year: year.to_string() };
        let builder = self.client.post(self.url("years/")).json(&payload);
        let response = check(self.authed(builder, token).send().await?).await?;
        parse_body(response).await
    }

    /// Rejected server-side once the level cap is reached; the error carries
    /// the server's limit message.
    pub async fn create_level(&self, token: &str, name: &str) -> Result<Level> {
        let payload = CreateNamed { name: name.to_string() };
        let builder = self.client.post(self.url("levels/")).json(&payload);
        let response = check(self.authed(builder, token).send().await?).await?;
        parse_body(response).await
    }

    pub async fn delete_department(&self, token: &str, department_id: i64) -> Result<DeleteOutcome> {
        self.delete_with_outcome(&format!("departments/{department_id}/"), token).await
    }

    pub async fn delete_year(&self, token: &str, year_id: i64) -> Result<DeleteOutcome> {
        self.delete_with_outcome(&format!("years/{year_id}/"), token).await
    }

    pub async fn delete_level(&self, token: &str, level_id: i64) -> Result<DeleteOutcome> {
        self.delete_with_outcome(&format!("levels/{level_id}/"), token).await
    }

    /// DELETE where the server distinguishes hard deletion from a recorded
    /// "pending approval" request.
    async fn delete_with_outcome(&self, path: &str, token: &str) -> Result<DeleteOutcome> {
        let builder = self.client.delete(self.url(path));
        let response = check(self.authed(builder, token).send().await?).await?;
        let body = response.text().await?;
        Ok(DeleteOutcome::parse(&body))
    }

    // --- Students (staff) ---

    pub async fn fetch_students(&self, token: &str, dept: &str, level: &str) -> Result<Vec<Student>> {
        let path = format!(
            "students/?dept={dept}&level={level}",
            dept = urlencode(dept),
            level = urlencode(level)
        );
        self.get_json(&path, Some(token)).await
    }

    pub async fn update_student(&self, token: &str, student_id: i64, data: &UpdateStudent) -> Result<()> {
        let builder = self
            .client
            .put(self.url(&format!("students/{student_id}/manage/")))
            .json(data);
        check(self.authed(builder, token).send().await?).await?;
        Ok(())
    }

    pub async fn delete_student(&self, token: &str, student_id: i64) -> Result<()> {
        let builder = self.client.delete(self.url(&format!("students/{student_id}/manage/")));
        check(self.authed(builder, token).send().await?).await?;
        Ok(())
    }

    // --- Bulk uploads ---

    /// Submit a bare Excel sheet to one of the bulk endpoints.
    pub async fn upload_sheet(&self, token: &str, kind: SheetKind, file: &Path) -> Result<String> {
        let form = multipart::Form::new().part("file", file_part(file).await?);
        let builder = self.client.post(self.url(kind.path())).multipart(form);
        let response = check(self.authed(builder, token).send().await?).await?;
        Ok(upload_status(&response.text().await?))
    }

    /// `POST /upload-certificate/`: PDF plus the target student id.
    pub async fn upload_certificate(&self, token: &str, student_id: &str, file: &Path) -> Result<String> {
        let form = multipart::Form::new()
            .text("student_id", student_id.to_string())
            .part("file", file_part(file).await?);
        let builder = self.client.post(self.url("upload-certificate/")).multipart(form);
        let response = check(self.authed(builder, token).send().await?).await?;
        Ok(upload_status(&response.text().await?))
    }
}

/// Build a multipart file part from a local path.
async fn file_part(path: &Path) -> Result<multipart::Part> {
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    Ok(multipart::Part::bytes(bytes).file_name(file_name))
}

/// Map a non-success response to the error taxonomy.
async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(map_status(status, &body))
}

fn map_status(status: StatusCode, body: &str) -> AppError {
    let message = extract_error_message(body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    });

    match status.as_u16() {
        401 | 403 => AppError::Auth(message),
        400 if message.to_ascii_lowercase().contains("limit") => AppError::Conflict(message),
        400 => AppError::Validation(message),
        404 => AppError::NotFound(message),
        409 => AppError::Conflict(message),
        code => AppError::Api { status: code, message },
    }
}

/// Pull a human-readable message out of a DRF-style error body.
fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    for key in ["detail", "error", "message", "status"] {
        if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
            if !text.is_empty() {
                return Some(text.to_string());
            }
        }
    }
    None
}

/// Status text from an upload response, with a generic fallback.
fn upload_status(body: &str) -> String {
    extract_error_message(body).unwrap_or_else(|| "Upload complete".to_string())
}

async fn parse_body<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| AppError::parse(format!("unexpected response: {e}")))
}

/// Percent-encode a query value. Only the characters that actually occur in
/// department and level names need escaping.
fn urlencode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => out.push(byte as char),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_detail_message() {
        assert_eq!(
            extract_error_message(r#"{"detail":"Invalid token"}"#).as_deref(),
            Some("Invalid token")
        );
        assert_eq!(
            extract_error_message(r#"{"error":"levels limit reached"}"#).as_deref(),
            Some("levels limit reached")
        );
        assert_eq!(
            extract_error_message(r#"{"status":"Registered 30 students"}"#).as_deref(),
            Some("Registered 30 students")
        );
    }

    #[test]
    fn test_extract_message_from_non_json() {
        assert!(extract_error_message("<html>502</html>").is_none());
        assert!(extract_error_message("").is_none());
    }

    #[test]
    fn test_map_status_auth() {
        assert!(matches!(
            map_status(StatusCode::UNAUTHORIZED, ""),
            AppError::Auth(_)
        ));
        assert!(matches!(map_status(StatusCode::FORBIDDEN, ""), AppError::Auth(_)));
    }

    #[test]
    fn test_map_status_validation_vs_conflict() {
        assert!(matches!(
            map_status(StatusCode::BAD_REQUEST, r#"{"detail":"score must be 0-100"}"#),
            AppError::Validation(_)
        ));
        // A 400 carrying a limit message is surfaced as a conflict.
        assert!(matches!(
            map_status(StatusCode::BAD_REQUEST, r#"{"error":"levels limit reached"}"#),
            AppError::Conflict(_)
        ));
        assert!(matches!(map_status(StatusCode::CONFLICT, ""), AppError::Conflict(_)));
    }

    #[test]
    fn test_map_status_not_found_and_other() {
        assert!(matches!(map_status(StatusCode::NOT_FOUND, ""), AppError::NotFound(_)));
        assert!(matches!(
            map_status(StatusCode::INTERNAL_SERVER_ERROR, ""),
            AppError::Api { status: 500, .. }
        ));
    }

    #[test]
    fn test_upload_status_fallback() {
        assert_eq!(upload_status(r#"{"status":"Registered 30 students"}"#), "Registered 30 students");
        assert_eq!(upload_status(r#"{"ok":true}"#), "Upload complete");
        assert_eq!(upload_status(""), "Upload complete");
    }

    #[test]
    fn test_urlencode_spaces_and_unicode() {
        assert_eq!(urlencode("First Year"), "First%20Year");
        assert_eq!(urlencode("Electrical"), "Electrical");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = ApiConfig {
            base_url: "http://localhost:8000/api/".to_string(),
            timeout_secs: 30,
        };
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.url("token/"), "http://localhost:8000/api/token/");
    }
}
