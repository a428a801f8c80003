//! Student landing page: enrolled courses, quick actions, certificate access.

use eframe::egui::{self, RichText, Ui, vec2};
use egui_phosphor::regular;

use super::app::{App, Panel};
use super::components::{dashboard_card, empty_state, panel_header};

pub fn show(app: &mut App, ui: &mut Ui) -> Option<Panel> {
    let mut next = None;

    panel_header(ui, "Student Dashboard");

    // Quick actions
    ui.horizontal(|ui| {
        let size = vec2(180.0, 110.0);
        if dashboard_card(ui, "My Grades", "Scores and letter grades", regular::EXAM, size).clicked() {
            next = Some(Panel::MyGrades);
        }
        if dashboard_card(ui, "My Attendance", "Lecture attendance record", regular::CALENDAR_CHECK, size).clicked() {
            next = Some(Panel::MyAttendance);
        }
        if dashboard_card(ui, "News", "Faculty announcements", regular::NEWSPAPER, size).clicked() {
            next = Some(Panel::Home);
        }
    });

    ui.add_space(12.0);
    certificate_section(app, ui);
    ui.add_space(12.0);
    ui.separator();
    ui.add_space(8.0);

    ui.heading(format!("{} My Courses", regular::BOOKS));
    ui.add_space(8.0);

    if app.is_loading && app.courses.is_empty() {
        ui.spinner();
        return next;
    }
    if app.courses.is_empty() {
        empty_state(ui, "No courses found for your level.");
        return next;
    }

    let courses = app.courses.clone();
    egui::ScrollArea::vertical().show(ui, |ui| {
        for course in &courses {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(RichText::new(format!("{} - {}", course.code, course.name)).strong());
                        let mut meta = course.department_name.clone();
                        if course.credit_hours > 0 {
                            meta.push_str(&format!(" · {} credit hours", course.credit_hours));
                        }
                        ui.label(RichText::new(meta).weak().size(11.0));
                        if let Some(grade) = course.student_grade {
                            ui.label(format!("Current grade: {grade:.1}"));
                        }
                        if let Some(att) = course.student_attendance {
                            ui.label(format!("Attendance: {att:.0}%"));
                        }
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button(format!("{} Materials", regular::FOLDER_OPEN)).clicked() {
                            next = Some(Panel::CourseMaterials {
                                course_id: course.id,
                                course_name: course.name.clone(),
                            });
                        }
                    });
                });
            });
            ui.add_space(6.0);
        }
    });

    next
}

fn certificate_section(app: &mut App, ui: &mut Ui) {
    match &app.certificate {
        None => {} // not fetched yet
        Some(None) => {
            ui.label(RichText::new("No graduation certificate on file.").weak());
        }
        Some(Some(cert)) => {
            ui.horizontal(|ui| {
                ui.label(format!("{} Graduation certificate:", regular::CERTIFICATE));
                ui.hyperlink_to("Download", &cert.file);
            });
        }
    }
}
