//! Exam scheduling: creation form plus the schedule table.

use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};
use egui_phosphor::regular;

use super::app::{App, DeleteTarget, Panel};
use super::components::{back_button, colors, empty_state, panel_header};
use crate::models::exam::EXAM_TYPES;

pub fn show(app: &mut App, ui: &mut Ui) -> Option<Panel> {
    if back_button(ui, "Dashboard") {
        return Some(Panel::DoctorDashboard);
    }

    panel_header(ui, "Exam Schedule");

    show_form(app, ui);
    ui.add_space(12.0);
    ui.separator();
    ui.add_space(8.0);

    if app.is_loading && app.exams.is_empty() {
        ui.spinner();
        return None;
    }
    if app.exams.is_empty() {
        empty_state(ui, "No exams scheduled.");
        return None;
    }

    let exams = app.exams.clone();
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(90.0))
        .column(Column::auto().at_least(80.0))
        .column(Column::auto().at_least(100.0))
        .column(Column::auto().at_least(70.0))
        .column(Column::remainder())
        .column(Column::auto().at_least(40.0))
        .header(24.0, |mut header| {
            header.col(|ui| {
                ui.label(RichText::new("Course").strong());
            });
            header.col(|ui| {
                ui.label(RichText::new("Type").strong());
            });
            header.col(|ui| {
                ui.label(RichText::new("Date").strong());
            });
            header.col(|ui| {
                ui.label(RichText::new("Time").strong());
            });
            header.col(|ui| {
                ui.label(RichText::new("Location").strong());
            });
            header.col(|_| {});
        })
        .body(|mut body| {
            for exam in &exams {
                body.row(22.0, |mut row| {
                    row.col(|ui| {
                        ui.label(&exam.course_code);
                    });
                    row.col(|ui| {
                        ui.label(&exam.exam_type);
                    });
                    row.col(|ui| {
                        ui.label(&exam.date);
                    });
                    row.col(|ui| {
                        ui.label(&exam.time);
                    });
                    row.col(|ui| {
                        ui.label(&exam.location);
                    });
                    row.col(|ui| {
                        if ui.button(RichText::new(regular::TRASH).color(colors::ERROR)).clicked() {
                            let label = format!("{} {}", exam.course_code, exam.exam_type);
                            app.delete_target = Some(DeleteTarget::Exam(exam.id, label));
                            app.show_delete_confirm = true;
                        }
                    });
                });
            }
        });

    None
}

fn show_form(app: &mut App, ui: &mut Ui) {
    ui.heading(format!("{} Schedule an Exam", regular::CALENDAR_PLUS));
    ui.add_space(6.0);

    let courses = app.doctor_courses.clone();
    egui::Grid::new("exam_form").num_columns(2).spacing([10.0, 8.0]).show(ui, |ui| {
        ui.label("Course:");
        let selected = app
            .exam_form
            .course_id
            .and_then(|id| courses.iter().find(|c| c.id == id))
            .map(|c| c.code.clone())
            .unwrap_or_else(|| "Select...".to_string());
        egui::ComboBox::from_id_salt("exam_course").selected_text(selected).show_ui(ui, |ui| {
            for course in &courses {
                ui.selectable_value(
                    &mut app.exam_form.course_id,
                    Some(course.id),
                    format!("{} - {}", course.code, course.name),
                );
            }
        });
        ui.end_row();

        ui.label("Type:");
        let type_text = if app.exam_form.exam_type.is_empty() {
            EXAM_TYPES[0]
        } else {
            app.exam_form.exam_type.as_str()
        }
        .to_string();
        egui::ComboBox::from_id_salt("exam_type").selected_text(type_text).show_ui(ui, |ui| {
            for kind in EXAM_TYPES {
                ui.selectable_value(&mut app.exam_form.exam_type, kind.to_string(), kind);
            }
        });
        ui.end_row();

        ui.label("Date (YYYY-MM-DD):");
        ui.text_edit_singleline(&mut app.exam_form.date);
        ui.end_row();

        ui.label("Time (HH:MM):");
        ui.text_edit_singleline(&mut app.exam_form.time);
        ui.end_row();

        ui.label("Location:");
        ui.text_edit_singleline(&mut app.exam_form.location);
        ui.end_row();
    });

    ui.add_space(6.0);
    if ui.button(format!("{} Schedule", regular::PLUS)).clicked() {
        app.submit_exam();
    }
}
