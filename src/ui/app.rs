//! Main application UI state.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Local};
use eframe::egui::{self, Align, Layout, RichText};
use tokio::sync::mpsc;

use crate::client::{ApiClient, SheetKind};
use crate::config::AppConfig;
use crate::models::attendance::AttendanceRecord;
use crate::models::auth::LoginResponse;
use crate::models::catalog::{AcademicYear, DeleteOutcome, Department, Level};
use crate::models::course::Course;
use crate::models::exam::{CreateExam, Exam};
use crate::models::grade::Grade;
use crate::models::material::Material;
use crate::models::news::NewsItem;
use crate::models::student::{Certificate, Student, UpdateStudent};
use crate::session::{Role, Session, SessionStore};

use super::components::colors;
use super::course_manage::ManageTab;
use super::drilldown::{DrillContext, DrillDown};
use super::{
    attendance_panel, course_manage, doctor_courses, doctor_dashboard, exams_panel, grades_panel, home, login,
    materials_panel, staff_dashboard, student_dashboard, student_list, upload_panel,
};

/// Current panel being displayed.
#[derive(Debug, Clone, PartialEq)]
pub enum Panel {
    Home,
    Login,
    StudentDashboard,
    MyGrades,
    MyAttendance,
    CourseMaterials { course_id: i64, course_name: String },
    DoctorDashboard,
    DoctorCourses,
    CourseManage { course_id: i64 },
    Exams,
    StaffDashboard,
    StudentList,
    UploadSheet(SheetKind),
    UploadCertificate,
}

/// Post-login dispatch: role tag to landing panel.
///
/// A pure lookup, fired once per successful login (and once on session
/// resume). Unknown roles were already folded into `Student` at parse time.
pub fn landing_panel(role: Role) -> Panel {
    match role {
        Role::Student => Panel::StudentDashboard,
        Role::Doctor => Panel::DoctorDashboard,
        Role::StaffAffairs => Panel::StaffDashboard,
    }
}

/// Messages from async tasks to UI.
pub enum UiMessage {
    // Authentication
    LoggedIn(LoginResponse, String),
    LoginFailed(String),

    // Data loading
    NewsLoaded(Vec<NewsItem>),
    CoursesLoaded(Vec<Course>),
    MyGradesLoaded(Vec<Grade>),
    MyAttendanceLoaded(Vec<AttendanceRecord>),
    CertificateLoaded(Option<Certificate>),
    MaterialsLoaded(Vec<Material>),
    DoctorCoursesLoaded(Vec<Course>),
    DoctorGradesLoaded(Vec<Grade>),
    DoctorAttendanceLoaded(Vec<AttendanceRecord>),
    ExamsLoaded(Vec<Exam>),
    DepartmentsLoaded(Vec<Department>),
    YearsLoaded(Vec<AcademicYear>),
    LevelsLoaded(Vec<Level>),
    StudentsLoaded(Vec<Student>),
    LoadError(String),

    // CRUD operations
    GradeUpdated,
    MaterialUploaded(String),
    MaterialDeleted(i64),
    ExamCreated(Exam),
    ExamDeleted(i64),
    DepartmentCreated(Department),
    DepartmentDeleted(i64, DeleteOutcome),
    YearCreated(AcademicYear),
    LevelCreated(Level),
    YearDeleted(i64, DeleteOutcome),
    LevelDeleted(i64, DeleteOutcome),
    StudentUpdated,
    StudentDeleted(i64),
    OperationFailed(String),

    // Uploads
    SheetUploaded(SheetKind, String),
    SheetUploadFailed(SheetKind, String),
    CertificateUploaded(String),
    CertificateUploadFailed(String),
}

/// Login form state.
#[derive(Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub error: Option<String>,
    pub in_flight: bool,
}

/// Grade score edit dialog state.
#[derive(Clone)]
pub struct GradeEditForm {
    pub grade_id: i64,
    pub student_label: String,
    pub score_input: String,
}

/// Exam creation form state.
#[derive(Default, Clone)]
pub struct ExamForm {
    pub course_id: Option<i64>,
    pub exam_type: String,
    pub date: String,
    pub time: String,
    pub location: String,
}

impl ExamForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Material upload dialog state (course manage view).
#[derive(Default)]
pub struct MaterialForm {
    pub is_open: bool,
    pub title: String,
    pub file: Option<PathBuf>,
    pub in_flight: bool,
}

impl MaterialForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Student edit dialog state.
#[derive(Clone)]
pub struct StudentEditForm {
    pub student_id: i64,
    pub username: String,
    pub first_name: String,
}

/// One bulk-upload form: a picked file plus the last outcome notice.
#[derive(Default)]
pub struct UploadForm {
    pub file: Option<PathBuf>,
    pub in_flight: bool,
    /// `(success, message)` from the last attempt.
    pub notice: Option<(bool, String)>,
    pub finished_at: Option<Instant>,
}

impl UploadForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Log level for UI messages.
#[derive(Clone, Copy, Debug)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Log entry for display in the UI.
#[derive(Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
    pub level: LogLevel,
}

/// Target for delete confirmation dialog.
#[derive(Clone)]
pub enum DeleteTarget {
    Department(i64, String),
    Year(i64, String),
    Level(i64, String),
    Student(i64, String),
    Exam(i64, String),
    Material(i64, String),
}

/// Main application state.
pub struct App {
    // Runtime and API client
    pub rt: tokio::runtime::Runtime,
    pub api: Arc<ApiClient>,

    // Session
    pub store: SessionStore,
    pub session: Option<Session>,

    // Message channel for async communication
    pub tx: mpsc::UnboundedSender<UiMessage>,
    pub rx: mpsc::UnboundedReceiver<UiMessage>,

    // Navigation
    pub current_panel: Panel,

    // Cached data
    pub news: Vec<NewsItem>,
    pub courses: Vec<Course>,
    pub my_grades: Vec<Grade>,
    pub my_attendance: Vec<AttendanceRecord>,
    /// `None` until fetched; `Some(None)` when no certificate exists.
    pub certificate: Option<Option<Certificate>>,
    pub materials: Vec<Material>,
    pub doctor_courses: Vec<Course>,
    pub doctor_grades: Vec<Grade>,
    pub doctor_attendance: Vec<AttendanceRecord>,
    pub exams: Vec<Exam>,
    pub departments: Vec<Department>,
    pub years: Vec<AcademicYear>,
    pub levels: Vec<Level>,
    pub students: Vec<Student>,

    // Loading state
    pub is_loading: bool,

    // Forms
    pub login_form: LoginForm,
    pub grade_edit: Option<GradeEditForm>,
    pub exam_form: ExamForm,
    pub material_form: MaterialForm,
    pub student_edit: Option<StudentEditForm>,
    pub new_department_input: String,
    pub new_year_input: String,
    pub new_level_input: String,
    pub grades_upload: UploadForm,
    pub attendance_upload: UploadForm,
    pub students_upload: UploadForm,
    pub certificate_upload: UploadForm,
    pub certificate_student_id: String,

    // Drill-down navigator
    pub drill: DrillDown,
    pub drill_context: Option<DrillContext>,

    /// Course scoping the manage view; grade refetches reuse it.
    pub manage_course_id: Option<i64>,
    pub manage_tab: ManageTab,

    // Log messages
    pub log_messages: Vec<LogEntry>,

    // Dialogs
    pub show_delete_confirm: bool,
    pub delete_target: Option<DeleteTarget>,
    pub error_message: Option<String>,
    pub success_message: Option<String>,

    // Configuration
    pub config: AppConfig,
}

impl App {
    pub fn new(api: ApiClient, store: SessionStore, config: AppConfig, rt: tokio::runtime::Runtime) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let session = store.load();

        let mut app = Self {
            rt,
            api: Arc::new(api),
            store,
            session,
            tx,
            rx,
            current_panel: Panel::Home,
            news: Vec::new(),
            courses: Vec::new(),
            my_grades: Vec::new(),
            my_attendance: Vec::new(),
            certificate: None,
            materials: Vec::new(),
            doctor_courses: Vec::new(),
            doctor_grades: Vec::new(),
            doctor_attendance: Vec::new(),
            exams: Vec::new(),
            departments: Vec::new(),
            years: Vec::new(),
            levels: Vec::new(),
            students: Vec::new(),
            is_loading: false,
            login_form: LoginForm::default(),
            grade_edit: None,
            exam_form: ExamForm::default(),
            material_form: MaterialForm::default(),
            student_edit: None,
            new_department_input: String::new(),
            new_year_input: String::new(),
            new_level_input: String::new(),
            grades_upload: UploadForm::default(),
            attendance_upload: UploadForm::default(),
            students_upload: UploadForm::default(),
            certificate_upload: UploadForm::default(),
            certificate_student_id: String::new(),
            drill: DrillDown::default(),
            drill_context: None,
            manage_course_id: None,
            manage_tab: ManageTab::Materials,
            log_messages: Vec::new(),
            show_delete_confirm: false,
            delete_target: None,
            error_message: None,
            success_message: None,
            config,
        };

        // Resume a persisted session, otherwise land on the public home page.
        if let Some(session) = app.session.clone() {
            tracing::info!("Resuming session for {} ({})", session.username, session.role().tag());
            app.navigate(landing_panel(session.role()));
        } else {
            app.navigate(Panel::Home);
        }

        app
    }

    /// Log a message to the UI log.
    pub fn log(&mut self, level: LogLevel, message: impl Into<String>) {
        self.log_messages.push(LogEntry {
            timestamp: Local::now(),
            message: message.into(),
            level,
        });

        // Keep only last 100 messages
        if self.log_messages.len() > 100 {
            self.log_messages.remove(0);
        }
    }

    pub fn log_info(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    pub fn log_success(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Success, message);
    }

    pub fn log_error(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    fn token(&self) -> Option<String> {
        self.session.as_ref().map(|s| s.access_token.clone())
    }

    /// Switch panels, issuing the new panel's initial fetches.
    pub fn navigate(&mut self, panel: Panel) {
        match &panel {
            Panel::Home => self.load_news(),
            Panel::Login => self.login_form = LoginForm::default(),
            Panel::StudentDashboard => {
                self.load_courses();
                self.load_certificate();
            }
            Panel::MyGrades => self.load_my_grades(),
            Panel::MyAttendance => self.load_my_attendance(),
            Panel::CourseMaterials { course_id, .. } => self.load_materials(*course_id),
            Panel::DoctorDashboard => {}
            Panel::DoctorCourses => self.load_doctor_courses(),
            Panel::CourseManage { course_id } => {
                self.manage_course_id = Some(*course_id);
                self.manage_tab = ManageTab::Materials;
                // The header is found in the cached course list; make sure it exists.
                if self.doctor_courses.is_empty() {
                    self.load_doctor_courses();
                }
                self.load_materials(*course_id);
                self.load_doctor_grades(Some(*course_id));
                self.load_doctor_attendance(Some(*course_id));
            }
            Panel::Exams => {
                self.load_exams();
                if self.doctor_courses.is_empty() {
                    self.load_doctor_courses();
                }
            }
            Panel::StaffDashboard => {
                self.load_departments();
                self.load_years();
                self.load_levels();
            }
            Panel::StudentList => self.load_students(),
            Panel::UploadSheet(_) | Panel::UploadCertificate => {}
        }
        self.current_panel = panel;
    }

    /// Clear the session and return to the public home page.
    pub fn logout(&mut self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!("Failed to clear session file: {}", e);
        }
        self.session = None;
        self.drill = DrillDown::default();
        self.drill_context = None;
        self.log_info("Logged out");
        self.navigate(Panel::Home);
    }

    // --- Async operations ---

    pub fn submit_login(&mut self) {
        let username = self.login_form.username.trim().to_string();
        let password = self.login_form.password.clone();
        if username.is_empty() || password.is_empty() {
            self.login_form.error = Some("Username and password are required".to_string());
            return;
        }

        self.login_form.in_flight = true;
        self.login_form.error = None;

        let api = self.api.clone();
        let tx = self.tx.clone();
        self.rt.spawn(async move {
            match api.login(&username, &password).await {
                Ok(resp) => {
                    let _ = tx.send(UiMessage::LoggedIn(resp, username));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::LoginFailed(e.to_string()));
                }
            }
        });
    }

    pub fn load_news(&mut self) {
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.is_loading = true;
        self.rt.spawn(async move {
            match api.fetch_news().await {
                Ok(items) => {
                    let _ = tx.send(UiMessage::NewsLoaded(items));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::LoadError(e.to_string()));
                }
            }
        });
    }

    pub fn load_courses(&mut self) {
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.is_loading = true;
        self.rt.spawn(async move {
            match api.fetch_courses().await {
                Ok(courses) => {
                    let _ = tx.send(UiMessage::CoursesLoaded(courses));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::LoadError(e.to_string()));
                }
            }
        });
    }

    pub fn load_my_grades(&mut self) {
        let Some(token) = self.token() else { return };
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.is_loading = true;
        self.rt.spawn(async move {
            match api.fetch_my_grades(&token).await {
                Ok(grades) => {
                    let _ = tx.send(UiMessage::MyGradesLoaded(grades));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::LoadError(e.to_string()));
                }
            }
        });
    }

    pub fn load_my_attendance(&mut self) {
        let Some(token) = self.token() else { return };
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.is_loading = true;
        self.rt.spawn(async move {
            match api.fetch_my_attendance(&token).await {
                Ok(records) => {
                    let _ = tx.send(UiMessage::MyAttendanceLoaded(records));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::LoadError(e.to_string()));
                }
            }
        });
    }

    pub fn load_certificate(&mut self) {
        let Some(token) = self.token() else { return };
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.rt.spawn(async move {
            match api.fetch_my_certificate(&token).await {
                Ok(cert) => {
                    let _ = tx.send(UiMessage::CertificateLoaded(cert));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::LoadError(e.to_string()));
                }
            }
        });
    }

    pub fn load_materials(&mut self, course_id: i64) {
        let Some(token) = self.token() else { return };
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.is_loading = true;
        self.rt.spawn(async move {
            match api.fetch_course_materials(&token, course_id).await {
                Ok(materials) => {
                    let _ = tx.send(UiMessage::MaterialsLoaded(materials));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::LoadError(e.to_string()));
                }
            }
        });
    }

    pub fn load_doctor_courses(&mut self) {
        let Some(token) = self.token() else { return };
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.is_loading = true;
        self.rt.spawn(async move {
            match api.fetch_doctor_courses(&token).await {
                Ok(courses) => {
                    let _ = tx.send(UiMessage::DoctorCoursesLoaded(courses));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::LoadError(e.to_string()));
                }
            }
        });
    }

    pub fn load_doctor_grades(&mut self, course_id: Option<i64>) {
        let Some(token) = self.token() else { return };
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.rt.spawn(async move {
            match api.fetch_doctor_grades(&token, course_id).await {
                Ok(grades) => {
                    let _ = tx.send(UiMessage::DoctorGradesLoaded(grades));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::LoadError(e.to_string()));
                }
            }
        });
    }

    pub fn load_doctor_attendance(&mut self, course_id: Option<i64>) {
        let Some(token) = self.token() else { return };
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.rt.spawn(async move {
            match api.fetch_doctor_attendance(&token, course_id).await {
                Ok(records) => {
                    let _ = tx.send(UiMessage::DoctorAttendanceLoaded(records));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::LoadError(e.to_string()));
                }
            }
        });
    }

    /// Save the score from the edit dialog, then refetch.
    pub fn save_grade_edit(&mut self) {
        let Some(form) = self.grade_edit.clone() else { return };
        let score: f64 = match form.score_input.trim().parse() {
            Ok(v) if (0.0..=100.0).contains(&v) => v,
            _ => {
                self.error_message = Some("Score must be a number between 0 and 100".to_string());
                return;
            }
        };
        let Some(token) = self.token() else { return };

        let api = self.api.clone();
        let tx = self.tx.clone();
        self.rt.spawn(async move {
            match api.update_grade(&token, form.grade_id, score).await {
                Ok(()) => {
                    let _ = tx.send(UiMessage::GradeUpdated);
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::OperationFailed(e.to_string()));
                }
            }
        });
        self.grade_edit = None;
    }

    pub fn submit_material_upload(&mut self) {
        let title = self.material_form.title.trim().to_string();
        let Some(file) = self.material_form.file.clone() else {
            self.error_message = Some("Select a file first".to_string());
            return;
        };
        if title.is_empty() {
            self.error_message = Some("Material title is required".to_string());
            return;
        }
        let Some(course_id) = self.manage_course_id else { return };
        let Some(token) = self.token() else { return };

        self.material_form.in_flight = true;
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.rt.spawn(async move {
            match api.upload_material(&token, course_id, &title, &file).await {
                Ok(status) => {
                    let _ = tx.send(UiMessage::MaterialUploaded(status));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::OperationFailed(e.to_string()));
                }
            }
        });
    }

    pub fn delete_material(&mut self, material_id: i64) {
        let Some(token) = self.token() else { return };
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.rt.spawn(async move {
            match api.delete_material(&token, material_id).await {
                Ok(()) => {
                    let _ = tx.send(UiMessage::MaterialDeleted(material_id));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::OperationFailed(e.to_string()));
                }
            }
        });
    }

    pub fn load_exams(&mut self) {
        let Some(token) = self.token() else { return };
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.is_loading = true;
        self.rt.spawn(async move {
            match api.fetch_exams(&token).await {
                Ok(exams) => {
                    let _ = tx.send(UiMessage::ExamsLoaded(exams));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::LoadError(e.to_string()));
                }
            }
        });
    }

    pub fn submit_exam(&mut self) {
        let form = &self.exam_form;
        let Some(course_id) = form.course_id else {
            self.error_message = Some("Select a course".to_string());
            return;
        };
        if form.date.trim().is_empty() || form.time.trim().is_empty() || form.location.trim().is_empty() {
            self.error_message = Some("Date, time, and location are required".to_string());
            return;
        }
        let data = CreateExam {
            course: course_id,
            exam_type: if form.exam_type.is_empty() {
                "Midterm".to_string()
            } else {
                form.exam_type.clone()
            },
            date: form.date.trim().to_string(),
            time: form.time.trim().to_string(),
            location: form.location.trim().to_string(),
        };
        let Some(token) = self.token() else { return };

        let api = self.api.clone();
        let tx = self.tx.clone();
        self.rt.spawn(async move {
            match api.create_exam(&token, &data).await {
                Ok(exam) => {
                    let _ = tx.send(UiMessage::ExamCreated(exam));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::OperationFailed(e.to_string()));
                }
            }
        });
    }

    pub fn delete_exam(&mut self, exam_id: i64) {
        let Some(token) = self.token() else { return };
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.rt.spawn(async move {
            match api.delete_exam(&token, exam_id).await {
                Ok(()) => {
                    let _ = tx.send(UiMessage::ExamDeleted(exam_id));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::OperationFailed(e.to_string()));
                }
            }
        });
    }

    pub fn load_departments(&mut self) {
        let Some(token) = self.token() else { return };
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.is_loading = true;
        self.rt.spawn(async move {
            match api.fetch_departments(&token).await {
                Ok(departments) => {
                    let _ = tx.send(UiMessage::DepartmentsLoaded(departments));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::LoadError(e.to_string()));
                }
            }
        });
    }

    pub fn load_years(&mut self) {
        let Some(token) = self.token() else { return };
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.rt.spawn(async move {
            match api.fetch_years(&token).await {
                Ok(years) => {
                    let _ = tx.send(UiMessage::YearsLoaded(years));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::LoadError(e.to_string()));
                }
            }
        });
    }

    pub fn load_levels(&mut self) {
        let Some(token) = self.token() else { return };
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.rt.spawn(async move {
            match api.fetch_levels(&token).await {
                Ok(levels) => {
                    let _ = tx.send(UiMessage::LevelsLoaded(levels));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::LoadError(e.to_string()));
                }
            }
        });
    }

    /// Create a department; the response record is appended locally
    /// without refetching.
    pub fn submit_new_department(&mut self) {
        let name = self.new_department_input.trim().to_string();
        if name.is_empty() {
            self.error_message = Some("Department name is required".to_string());
            return;
        }
        let Some(token) = self.token() else { return };

        let api = self.api.clone();
        let tx = self.tx.clone();
        self.rt.spawn(async move {
            match api.create_department(&token, &name).await {
                Ok(record) => {
                    let _ = tx.send(UiMessage::DepartmentCreated(record));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::OperationFailed(e.to_string()));
                }
            }
        });
    }

    pub fn delete_department(&mut self, department_id: i64) {
        let Some(token) = self.token() else { return };
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.rt.spawn(async move {
            match api.delete_department(&token, department_id).await {
                Ok(outcome) => {
                    let _ = tx.send(UiMessage::DepartmentDeleted(department_id, outcome));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::OperationFailed(e.to_string()));
                }
            }
        });
    }

    /// Create an academic year; the response record is appended locally
    /// without refetching.
    pub fn submit_new_year(&mut self) {
        let year = self.new_year_input.trim().to_string();
        if year.is_empty() {
            self.error_message = Some("Year label is required".to_string());
            return;
        }
        let Some(token) = self.token() else { return };

        let api = self.api.clone();
        let tx = self.tx.clone();
        self.rt.spawn(async move {
            match api.create_year(&token, &year).await {
                Ok(record) => {
                    let _ = tx.send(UiMessage::YearCreated(record));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::OperationFailed(e.to_string()));
                }
            }
        });
    }

    /// Create a level. The server enforces the level cap and rejects past
    /// it; the local list is only touched on success.
    pub fn submit_new_level(&mut self) {
        let name = self.new_level_input.trim().to_string();
        if name.is_empty() {
            self.error_message = Some("Level name is required".to_string());
            return;
        }
        let Some(token) = self.token() else { return };

        let api = self.api.clone();
        let tx = self.tx.clone();
        self.rt.spawn(async move {
            match api.create_level(&token, &name).await {
                Ok(record) => {
                    let _ = tx.send(UiMessage::LevelCreated(record));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::OperationFailed(e.to_string()));
                }
            }
        });
    }

    pub fn delete_year(&mut self, year_id: i64) {
        let Some(token) = self.token() else { return };
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.rt.spawn(async move {
            match api.delete_year(&token, year_id).await {
                Ok(outcome) => {
                    let _ = tx.send(UiMessage::YearDeleted(year_id, outcome));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::OperationFailed(e.to_string()));
                }
            }
        });
    }

    pub fn delete_level(&mut self, level_id: i64) {
        let Some(token) = self.token() else { return };
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.rt.spawn(async move {
            match api.delete_level(&token, level_id).await {
                Ok(outcome) => {
                    let _ = tx.send(UiMessage::LevelDeleted(level_id, outcome));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::OperationFailed(e.to_string()));
                }
            }
        });
    }

    pub fn load_students(&mut self) {
        let Some(ctx) = self.drill_context.clone() else { return };
        let Some(token) = self.token() else { return };
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.is_loading = true;
        self.rt.spawn(async move {
            match api.fetch_students(&token, &ctx.department_name, &ctx.level_name).await {
                Ok(students) => {
                    let _ = tx.send(UiMessage::StudentsLoaded(students));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::LoadError(e.to_string()));
                }
            }
        });
    }

    /// Save the student edit dialog, then refetch the scoped list.
    pub fn save_student_edit(&mut self) {
        let Some(form) = self.student_edit.clone() else { return };
        if form.username.trim().is_empty() || form.first_name.trim().is_empty() {
            self.error_message = Some("Student ID and name are required".to_string());
            return;
        }
        let data = UpdateStudent {
            username: form.username.trim().to_string(),
            first_name: form.first_name.trim().to_string(),
        };
        let Some(token) = self.token() else { return };

        let api = self.api.clone();
        let tx = self.tx.clone();
        self.rt.spawn(async move {
            match api.update_student(&token, form.student_id, &data).await {
                Ok(()) => {
                    let _ = tx.send(UiMessage::StudentUpdated);
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::OperationFailed(e.to_string()));
                }
            }
        });
        self.student_edit = None;
    }

    pub fn delete_student(&mut self, student_id: i64) {
        let Some(token) = self.token() else { return };
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.rt.spawn(async move {
            match api.delete_student(&token, student_id).await {
                Ok(()) => {
                    let _ = tx.send(UiMessage::StudentDeleted(student_id));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::OperationFailed(e.to_string()));
                }
            }
        });
    }

    pub fn sheet_form_mut(&mut self, kind: SheetKind) -> &mut UploadForm {
        match kind {
            SheetKind::Grades => &mut self.grades_upload,
            SheetKind::Attendance => &mut self.attendance_upload,
            SheetKind::Students => &mut self.students_upload,
        }
    }

    pub fn submit_sheet_upload(&mut self, kind: SheetKind) {
        let Some(file) = self.sheet_form_mut(kind).file.clone() else {
            self.sheet_form_mut(kind).notice = Some((false, "Please select a file first.".to_string()));
            return;
        };
        let Some(token) = self.token() else { return };

        let form = self.sheet_form_mut(kind);
        form.in_flight = true;
        form.notice = None;

        let api = self.api.clone();
        let tx = self.tx.clone();
        self.rt.spawn(async move {
            match api.upload_sheet(&token, kind, &file).await {
                Ok(status) => {
                    let _ = tx.send(UiMessage::SheetUploaded(kind, status));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::SheetUploadFailed(kind, e.to_string()));
                }
            }
        });
    }

    pub fn submit_certificate_upload(&mut self) {
        let student_id = self.certificate_student_id.trim().to_string();
        let Some(file) = self.certificate_upload.file.clone() else {
            self.certificate_upload.notice = Some((false, "Please select a file first.".to_string()));
            return;
        };
        if student_id.is_empty() {
            self.certificate_upload.notice = Some((false, "Student ID is required.".to_string()));
            return;
        }
        let Some(token) = self.token() else { return };

        self.certificate_upload.in_flight = true;
        self.certificate_upload.notice = None;

        let api = self.api.clone();
        let tx = self.tx.clone();
        self.rt.spawn(async move {
            match api.upload_certificate(&token, &student_id, &file).await {
                Ok(status) => {
                    let _ = tx.send(UiMessage::CertificateUploaded(status));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::CertificateUploadFailed(e.to_string()));
                }
            }
        });
    }

    // --- Message handling ---

    /// Poll async operation results.
    fn poll_async_results(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                UiMessage::LoggedIn(resp, typed_username) => {
                    let role = Role::parse(resp.role.as_deref().unwrap_or_default());
                    let session = Session {
                        access_token: resp.access,
                        refresh_token: resp.refresh,
                        user_role: role,
                        username: resp.username.unwrap_or(typed_username),
                    };
                    if let Err(e) = self.store.store(&session) {
                        tracing::warn!("Failed to persist session: {}", e);
                    }
                    self.log_success(format!("Signed in as {} ({})", session.username, role.name()));
                    self.session = Some(session);
                    self.login_form = LoginForm::default();
                    self.navigate(landing_panel(role));
                }
                UiMessage::LoginFailed(e) => {
                    self.login_form.in_flight = false;
                    self.login_form.error = Some("Invalid ID or Password".to_string());
                    self.log_error(format!("Login failed: {e}"));
                }
                UiMessage::NewsLoaded(items) => {
                    self.news = items;
                    self.is_loading = false;
                }
                UiMessage::CoursesLoaded(courses) => {
                    self.courses = courses;
                    self.is_loading = false;
                }
                UiMessage::MyGradesLoaded(grades) => {
                    self.my_grades = grades;
                    self.is_loading = false;
                }
                UiMessage::MyAttendanceLoaded(records) => {
                    self.my_attendance = records;
                    self.is_loading = false;
                }
                UiMessage::CertificateLoaded(cert) => {
                    self.certificate = Some(cert);
                }
                UiMessage::MaterialsLoaded(materials) => {
                    self.materials = materials;
                    self.is_loading = false;
                }
                UiMessage::DoctorCoursesLoaded(courses) => {
                    self.doctor_courses = courses;
                    self.is_loading = false;
                }
                UiMessage::DoctorGradesLoaded(grades) => {
                    self.doctor_grades = grades;
                }
                UiMessage::DoctorAttendanceLoaded(records) => {
                    self.doctor_attendance = records;
                }
                UiMessage::ExamsLoaded(exams) => {
                    self.exams = exams;
                    self.is_loading = false;
                }
                UiMessage::DepartmentsLoaded(departments) => {
                    self.departments = departments;
                    self.is_loading = false;
                }
                UiMessage::YearsLoaded(years) => {
                    self.years = years;
                }
                UiMessage::LevelsLoaded(levels) => {
                    self.levels = levels;
                }
                UiMessage::StudentsLoaded(students) => {
                    self.students = students;
                    self.is_loading = false;
                }
                UiMessage::LoadError(e) => {
                    self.is_loading = false;
                    self.error_message = Some(e.clone());
                    self.log_error(e);
                }
                UiMessage::GradeUpdated => {
                    self.success_message = Some("Grade updated".to_string());
                    self.log_success("Grade updated");
                    // Update via PUT, then full refetch.
                    self.load_doctor_grades(self.manage_course_id);
                }
                UiMessage::MaterialUploaded(status) => {
                    self.material_form.reset();
                    self.success_message = Some(status.clone());
                    self.log_success(format!("Material uploaded: {status}"));
                    if let Some(course_id) = self.manage_course_id {
                        self.load_materials(course_id);
                    }
                }
                UiMessage::MaterialDeleted(id) => {
                    self.materials.retain(|m| m.id != id);
                    self.success_message = Some("Material deleted".to_string());
                    self.log_success("Material deleted");
                }
                UiMessage::ExamCreated(exam) => {
                    self.exams.push(exam);
                    self.exam_form.reset();
                    self.success_message = Some("Exam scheduled".to_string());
                    self.log_success("Exam scheduled");
                }
                UiMessage::ExamDeleted(id) => {
                    self.exams.retain(|e| e.id != id);
                    self.success_message = Some("Exam cancelled".to_string());
                    self.log_success("Exam cancelled");
                }
                UiMessage::DepartmentCreated(record) => {
                    self.log_success(format!("Department '{}' created", record.name));
                    self.departments.push(record);
                    self.new_department_input.clear();
                }
                UiMessage::DepartmentDeleted(id, outcome) => match outcome {
                    DeleteOutcome::Deleted => {
                        self.departments.retain(|d| d.id != id);
                        self.success_message = Some("Department deleted".to_string());
                        self.log_success("Department deleted");
                    }
                    DeleteOutcome::Pending => {
                        self.success_message = Some(
                            "Deletion request recorded, awaiting approval. The department was not removed."
                                .to_string(),
                        );
                        self.log_info("Department deletion pending approval");
                    }
                },
                UiMessage::YearCreated(record) => {
                    self.log_success(format!("Academic year '{}' created", record.year));
                    self.years.push(record);
                    self.new_year_input.clear();
                }
                UiMessage::LevelCreated(record) => {
                    self.log_success(format!("Level '{}' created", record.name));
                    self.levels.push(record);
                    self.new_level_input.clear();
                }
                UiMessage::YearDeleted(id, outcome) => match outcome {
                    DeleteOutcome::Deleted => {
                        self.years.retain(|y| y.id != id);
                        self.success_message = Some("Academic year deleted".to_string());
                        self.log_success("Academic year deleted");
                    }
                    DeleteOutcome::Pending => {
                        // Soft path: the row stays until someone approves.
                        self.success_message =
                            Some("Deletion request recorded, awaiting approval. The year was not removed.".to_string());
                        self.log_info("Year deletion pending approval");
                    }
                },
                UiMessage::LevelDeleted(id, outcome) => match outcome {
                    DeleteOutcome::Deleted => {
                        self.levels.retain(|l| l.id != id);
                        self.success_message = Some("Level deleted".to_string());
                        self.log_success("Level deleted");
                    }
                    DeleteOutcome::Pending => {
                        self.success_message =
                            Some("Deletion request recorded, awaiting approval. The level was not removed.".to_string());
                        self.log_info("Level deletion pending approval");
                    }
                },
                UiMessage::StudentUpdated => {
                    self.success_message = Some("Student updated".to_string());
                    self.log_success("Student updated");
                    self.load_students();
                }
                UiMessage::StudentDeleted(id) => {
                    self.students.retain(|s| s.id != id);
                    self.success_message = Some("Student deleted".to_string());
                    self.log_success("Student deleted");
                }
                UiMessage::OperationFailed(e) => {
                    self.material_form.in_flight = false;
                    self.error_message = Some(e.clone());
                    self.log_error(e);
                }
                UiMessage::SheetUploaded(kind, status) => {
                    self.log_success(format!("Upload finished: {status}"));
                    let form = self.sheet_form_mut(kind);
                    form.in_flight = false;
                    form.file = None;
                    form.notice = Some((true, status));
                    form.finished_at = Some(Instant::now());
                }
                UiMessage::SheetUploadFailed(kind, e) => {
                    self.log_error(format!("Upload failed: {e}"));
                    let form = self.sheet_form_mut(kind);
                    form.in_flight = false;
                    form.notice = Some((false, e));
                }
                UiMessage::CertificateUploaded(status) => {
                    self.log_success(format!("Certificate uploaded: {status}"));
                    self.certificate_upload.in_flight = false;
                    self.certificate_upload.file = None;
                    self.certificate_upload.notice = Some((true, status));
                    self.certificate_upload.finished_at = Some(Instant::now());
                    self.certificate_student_id.clear();
                }
                UiMessage::CertificateUploadFailed(e) => {
                    self.log_error(format!("Certificate upload failed: {e}"));
                    self.certificate_upload.in_flight = false;
                    self.certificate_upload.notice = Some((false, e));
                }
            }
        }

        // Success notices on upload forms fade after the configured delay.
        let notice_secs = self.config.ui.notice_secs;
        for form in [
            &mut self.grades_upload,
            &mut self.attendance_upload,
            &mut self.students_upload,
            &mut self.certificate_upload,
        ] {
            if let Some(finished) = form.finished_at {
                if finished.elapsed().as_secs() >= notice_secs {
                    form.notice = None;
                    form.finished_at = None;
                }
            }
        }
    }

    // --- Chrome ---

    /// Render the signed-in header bar.
    fn show_top_bar(&mut self, ctx: &egui::Context) {
        let Some(session) = self.session.clone() else { return };

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("BSU Engineering Portal").strong().size(16.0));
                ui.separator();
                ui.label(RichText::new(session.role().name()).weak());

                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if ui.button("Logout").clicked() {
                        self.logout();
                    }
                    ui.separator();
                    ui.label(&session.username);
                });
            });
        });
    }

    /// Render modal dialogs (error, success, delete confirmation).
    fn show_dialogs(&mut self, ctx: &egui::Context) {
        // Error dialog
        if let Some(ref error) = self.error_message.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.colored_label(colors::ERROR, error);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.error_message = None;
                    }
                });
        }

        // Success dialog
        if let Some(ref msg) = self.success_message.clone() {
            egui::Window::new("Notice")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.colored_label(colors::SUCCESS, msg);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.success_message = None;
                    }
                });
        }

        // Delete confirmation dialog
        if self.show_delete_confirm
            && let Some(ref target) = self.delete_target.clone()
        {
            let (title, message) = match target {
                DeleteTarget::Department(_, name) => ("Delete Department", format!("Delete department '{name}'?")),
                DeleteTarget::Year(_, label) => ("Delete Academic Year", format!("Delete academic year '{label}'?")),
                DeleteTarget::Level(_, name) => ("Delete Level", format!("Delete level '{name}'?")),
                DeleteTarget::Student(_, name) => (
                    "Delete Student",
                    format!("Are you sure? This will delete the account of '{name}'."),
                ),
                DeleteTarget::Exam(_, label) => ("Cancel Exam", format!("Cancel the exam '{label}'?")),
                DeleteTarget::Material(_, title) => ("Delete Material", format!("Delete material '{title}'?")),
            };

            egui::Window::new(title)
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(message);
                    ui.add_space(10.0);
                    ui.horizontal(|ui| {
                        if ui.button("Cancel").clicked() {
                            self.show_delete_confirm = false;
                            self.delete_target = None;
                        }
                        if ui.button("Delete").clicked() {
                            self.confirm_delete();
                            self.show_delete_confirm = false;
                            self.delete_target = None;
                        }
                    });
                });
        }
    }

    /// Execute the confirmed delete operation.
    fn confirm_delete(&mut self) {
        if let Some(target) = self.delete_target.take() {
            match target {
                DeleteTarget::Department(id, name) => {
                    self.log_info(format!("Deleting department: {name}"));
                    self.delete_department(id);
                }
                DeleteTarget::Year(id, label) => {
                    self.log_info(format!("Deleting academic year: {label}"));
                    self.delete_year(id);
                }
                DeleteTarget::Level(id, name) => {
                    self.log_info(format!("Deleting level: {name}"));
                    self.delete_level(id);
                }
                DeleteTarget::Student(id, name) => {
                    self.log_info(format!("Deleting student: {name}"));
                    self.delete_student(id);
                }
                DeleteTarget::Exam(id, label) => {
                    self.log_info(format!("Cancelling exam: {label}"));
                    self.delete_exam(id);
                }
                DeleteTarget::Material(id, title) => {
                    self.log_info(format!("Deleting material: {title}"));
                    self.delete_material(id);
                }
            }
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Poll async results
        self.poll_async_results();

        // Request repaint while requests are in flight
        if self.is_loading
            || self.login_form.in_flight
            || self.material_form.in_flight
            || self.grades_upload.in_flight
            || self.attendance_upload.in_flight
            || self.students_upload.in_flight
            || self.certificate_upload.in_flight
        {
            ctx.request_repaint();
        }

        self.show_top_bar(ctx);
        self.show_dialogs(ctx);

        // Main content
        let panel = self.current_panel.clone();
        let mut next: Option<Panel> = None;
        egui::CentralPanel::default().show(ctx, |ui| match panel {
            Panel::Home => next = home::show(self, ui),
            Panel::Login => next = login::show(self, ui),
            Panel::StudentDashboard => next = student_dashboard::show(self, ui),
            Panel::MyGrades => next = grades_panel::show(self, ui),
            Panel::MyAttendance => next = attendance_panel::show(self, ui),
            Panel::CourseMaterials { course_name, .. } => next = materials_panel::show(self, ui, &course_name),
            Panel::DoctorDashboard => next = doctor_dashboard::show(self, ui),
            Panel::DoctorCourses => next = doctor_courses::show(self, ui),
            Panel::CourseManage { course_id } => next = course_manage::show(self, ui, course_id),
            Panel::Exams => next = exams_panel::show(self, ui),
            Panel::StaffDashboard => next = staff_dashboard::show(self, ui),
            Panel::StudentList => next = student_list::show(self, ui),
            Panel::UploadSheet(kind) => next = upload_panel::show_sheet(self, ui, kind),
            Panel::UploadCertificate => next = upload_panel::show_certificate(self, ui),
        });

        if let Some(panel) = next {
            self.navigate(panel);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ApiClient;

    fn test_app(name: &str) -> App {
        let config = AppConfig::default();
        let api = ApiClient::new(&config.api).unwrap();
        let path = std::env::temp_dir().join(format!("bsu_portal_app_{name}_{}.toml", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let store = SessionStore::new(path);
        let rt = tokio::runtime::Runtime::new().unwrap();
        App::new(api, store, config, rt)
    }

    fn year(id: i64, label: &str) -> AcademicYear {
        AcademicYear {
            id,
            year: label.to_string(),
            is_active: true,
        }
    }

    fn dept(id: i64, name: &str) -> Department {
        Department {
            id,
            name: name.to_string(),
            code: None,
        }
    }

    #[test]
    fn test_pending_year_delete_leaves_list_untouched() {
        let mut app = test_app("pending_year");
        app.years = vec![year(1, "2024-2025"), year(2, "2025-2026")];

        app.tx.send(UiMessage::YearDeleted(1, DeleteOutcome::Pending)).unwrap();
        app.poll_async_results();

        assert_eq!(app.years.len(), 2);
        let message = app.success_message.clone().expect("a notice should be shown");
        assert!(message.contains("awaiting approval"));
        assert_ne!(message, "Academic year deleted");
    }

    #[test]
    fn test_hard_year_delete_removes_row() {
        let mut app = test_app("hard_year");
        app.years = vec![year(1, "2024-2025"), year(2, "2025-2026")];

        app.tx.send(UiMessage::YearDeleted(1, DeleteOutcome::Deleted)).unwrap();
        app.poll_async_results();

        assert_eq!(app.years.len(), 1);
        assert!(app.years.iter().all(|y| y.id != 1));
        assert_eq!(app.success_message.as_deref(), Some("Academic year deleted"));
    }

    #[test]
    fn test_pending_department_delete_leaves_list_untouched() {
        let mut app = test_app("pending_dept");
        app.departments = vec![dept(1, "Electrical"), dept(2, "Civil")];

        app.tx.send(UiMessage::DepartmentDeleted(2, DeleteOutcome::Pending)).unwrap();
        app.poll_async_results();

        assert_eq!(app.departments.len(), 2);
        let message = app.success_message.clone().expect("a notice should be shown");
        assert!(message.contains("awaiting approval"));
        assert_ne!(message, "Department deleted");
    }

    #[test]
    fn test_department_create_appends_server_record() {
        let mut app = test_app("create_dept");
        app.new_department_input = "Mechanical".to_string();

        app.tx.send(UiMessage::DepartmentCreated(dept(7, "Mechanical"))).unwrap();
        app.poll_async_results();

        assert_eq!(app.departments.len(), 1);
        assert_eq!(app.departments[0].name, "Mechanical");
        assert!(app.new_department_input.is_empty());
    }

    #[test]
    fn test_router_covers_all_roles() {
        assert_eq!(landing_panel(Role::Student), Panel::StudentDashboard);
        assert_eq!(landing_panel(Role::Doctor), Panel::DoctorDashboard);
        assert_eq!(landing_panel(Role::StaffAffairs), Panel::StaffDashboard);
    }

    #[test]
    fn test_router_is_idempotent() {
        for role in [Role::Student, Role::Doctor, Role::StaffAffairs] {
            assert_eq!(landing_panel(role), landing_panel(role));
        }
    }

    #[test]
    fn test_unknown_role_lands_on_student_dashboard() {
        // Unknown tags collapse to Student at the parse boundary.
        let role = Role::parse("REGISTRAR");
        assert_eq!(landing_panel(role), Panel::StudentDashboard);
    }

    #[test]
    fn test_doctor_does_not_land_on_student_path() {
        let role = Role::parse("DOCTOR");
        assert_eq!(landing_panel(role), Panel::DoctorDashboard);
        assert_ne!(landing_panel(role), Panel::StudentDashboard);
    }
}
