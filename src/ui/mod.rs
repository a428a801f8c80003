//! UI panels and shared widgets.

pub mod app;
pub mod attendance_panel;
pub mod components;
pub mod course_manage;
pub mod doctor_courses;
pub mod doctor_dashboard;
pub mod drilldown;
pub mod exams_panel;
pub mod grades_panel;
pub mod home;
pub mod login;
pub mod materials_panel;
pub mod staff_dashboard;
pub mod student_dashboard;
pub mod student_list;
pub mod upload_panel;

pub use app::App;
