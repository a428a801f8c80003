//! Courses taught by the signed-in doctor.

use eframe::egui::{self, RichText, Ui};
use egui_phosphor::regular;

use super::app::{App, Panel};
use super::components::{back_button, empty_state, panel_header};

pub fn show(app: &mut App, ui: &mut Ui) -> Option<Panel> {
    let mut next = None;

    if back_button(ui, "Dashboard") {
        return Some(Panel::DoctorDashboard);
    }

    panel_header(ui, "My Courses");

    if app.is_loading && app.doctor_courses.is_empty() {
        ui.spinner();
        return None;
    }
    if app.doctor_courses.is_empty() {
        empty_state(ui, "No courses are assigned to you.");
        return None;
    }

    let courses = app.doctor_courses.clone();
    egui::ScrollArea::vertical().show(ui, |ui| {
        for course in &courses {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(RichText::new(format!("{} - {}", course.code, course.name)).strong());
                        let mut meta = course.department_name.clone();
                        if let Some(level) = &course.level_name {
                            meta.push_str(&format!(" · {level}"));
                        }
                        ui.label(RichText::new(meta).weak().size(11.0));
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button(format!("{} Manage", regular::GEAR)).clicked() {
                            next = Some(Panel::CourseManage { course_id: course.id });
                        }
                    });
                });
            });
            ui.add_space(6.0);
        }
    });

    next
}
