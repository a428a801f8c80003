//! Student account listing scoped by the drill-down context.

use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};
use egui_phosphor::regular;

use super::app::{App, DeleteTarget, Panel, StudentEditForm};
use super::components::{back_button, colors, empty_state, panel_header};

pub fn show(app: &mut App, ui: &mut Ui) -> Option<Panel> {
    if back_button(ui, "Staff Affairs") {
        return Some(Panel::StaffDashboard);
    }

    // Arriving here without a completed drill-down (e.g. after logout and
    // resume) has no scope to query; send the user back.
    let Some(ctx) = app.drill_context.clone() else {
        panel_header(ui, "Student List");
        empty_state(ui, "No department and level selected. Please go back and choose them first.");
        return None;
    };

    panel_header(ui, &format!("Students - {} / {} / {}", ctx.department_name, ctx.year, ctx.level_name));

    if app.is_loading && app.students.is_empty() {
        ui.spinner();
        return None;
    }
    if app.students.is_empty() {
        empty_state(ui, "No students registered for this department and level.");
        return None;
    }

    let students = app.students.clone();
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(120.0))
        .column(Column::remainder())
        .column(Column::auto().at_least(70.0))
        .header(24.0, |mut header| {
            header.col(|ui| {
                ui.label(RichText::new("Student ID").strong());
            });
            header.col(|ui| {
                ui.label(RichText::new("Name").strong());
            });
            header.col(|_| {});
        })
        .body(|mut body| {
            for student in &students {
                body.row(22.0, |mut row| {
                    row.col(|ui| {
                        ui.label(&student.username);
                    });
                    row.col(|ui| {
                        ui.label(&student.first_name);
                    });
                    row.col(|ui| {
                        ui.horizontal(|ui| {
                            if ui.button(regular::PENCIL_SIMPLE).clicked() {
                                app.student_edit = Some(StudentEditForm {
                                    student_id: student.id,
                                    username: student.username.clone(),
                                    first_name: student.first_name.clone(),
                                });
                            }
                            if ui.button(RichText::new(regular::TRASH).color(colors::ERROR)).clicked() {
                                let name = if student.first_name.is_empty() {
                                    student.username.clone()
                                } else {
                                    student.first_name.clone()
                                };
                                app.delete_target = Some(DeleteTarget::Student(student.id, name));
                                app.show_delete_confirm = true;
                            }
                        });
                    });
                });
            }
        });

    show_edit_dialog(app, ui.ctx());

    None
}

/// Edit dialog; saving issues the update and then refetches the scoped list.
fn show_edit_dialog(app: &mut App, ctx: &egui::Context) {
    if app.student_edit.is_none() {
        return;
    }

    let mut close = false;
    egui::Window::new("Edit Student")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            if let Some(form) = app.student_edit.as_mut() {
                egui::Grid::new("student_edit").num_columns(2).spacing([10.0, 8.0]).show(ui, |ui| {
                    ui.label("Student ID:");
                    ui.text_edit_singleline(&mut form.username);
                    ui.end_row();

                    ui.label("Name:");
                    ui.text_edit_singleline(&mut form.first_name);
                    ui.end_row();
                });
            }
            ui.add_space(10.0);
            ui.horizontal(|ui| {
                if ui.button("Cancel").clicked() {
                    close = true;
                }
                if ui.button("Save").clicked() {
                    app.save_student_edit();
                }
            });
        });

    if close {
        app.student_edit = None;
    }
}
