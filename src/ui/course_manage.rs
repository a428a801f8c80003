//! Per-course management view for doctors: materials, grades, attendance.

use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};
use egui_phosphor::regular;

use super::app::{App, DeleteTarget, GradeEditForm, Panel};
use super::components::{back_button, colors, empty_state, panel_header, status_chip};
use super::grades_panel::band_color;
use crate::models::grade::grade_band;

/// Tabs of the course management view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ManageTab {
    #[default]
    Materials,
    Grades,
    Attendance,
}

pub fn show(app: &mut App, ui: &mut Ui, course_id: i64) -> Option<Panel> {
    if back_button(ui, "My Courses") {
        return Some(Panel::DoctorCourses);
    }

    // Course lists stay small (a doctor teaches a handful), so a linear
    // scan beats maintaining an id index.
    let header = app
        .doctor_courses
        .iter()
        .find(|c| c.id == course_id)
        .map(|c| format!("{} - {}", c.code, c.name))
        .unwrap_or_else(|| "Course".to_string());
    panel_header(ui, &header);

    ui.horizontal(|ui| {
        ui.selectable_value(&mut app.manage_tab, ManageTab::Materials, format!("{} Materials", regular::FOLDER_OPEN));
        ui.selectable_value(&mut app.manage_tab, ManageTab::Grades, format!("{} Grades", regular::EXAM));
        ui.selectable_value(
            &mut app.manage_tab,
            ManageTab::Attendance,
            format!("{} Attendance", regular::CALENDAR_CHECK),
        );
    });
    ui.add_space(10.0);

    match app.manage_tab {
        ManageTab::Materials => show_materials_tab(app, ui),
        ManageTab::Grades => show_grades_tab(app, ui),
        ManageTab::Attendance => show_attendance_tab(app, ui),
    }

    show_material_dialog(app, ui.ctx());
    show_grade_edit_dialog(app, ui.ctx());

    None
}

fn show_materials_tab(app: &mut App, ui: &mut Ui) {
    if ui.button(format!("{} Upload Material", regular::UPLOAD_SIMPLE)).clicked() {
        app.material_form.reset();
        app.material_form.is_open = true;
    }
    ui.add_space(8.0);

    if app.materials.is_empty() {
        empty_state(ui, "No materials uploaded for this course yet.");
        return;
    }

    let materials = app.materials.clone();
    egui::ScrollArea::vertical().show(ui, |ui| {
        for material in &materials {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(RichText::new(&material.title).strong());
                        ui.label(RichText::new(material.uploaded_date()).weak().size(11.0));
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button(RichText::new(regular::TRASH).color(colors::ERROR)).clicked() {
                            app.delete_target = Some(DeleteTarget::Material(material.id, material.title.clone()));
                            app.show_delete_confirm = true;
                        }
                        ui.hyperlink_to(format!("{} Open", regular::DOWNLOAD_SIMPLE), &material.file);
                    });
                });
            });
            ui.add_space(6.0);
        }
    });
}

fn show_grades_tab(app: &mut App, ui: &mut Ui) {
    if app.doctor_grades.is_empty() {
        empty_state(ui, "No grade rows for this course yet. Upload a grade sheet first.");
        return;
    }

    let grades = app.doctor_grades.clone();
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::remainder())
        .column(Column::auto().at_least(100.0))
        .column(Column::auto().at_least(70.0))
        .column(Column::auto().at_least(60.0))
        .column(Column::auto().at_least(60.0))
        .header(24.0, |mut header| {
            header.col(|ui| {
                ui.label(RichText::new("Student").strong());
            });
            header.col(|ui| {
                ui.label(RichText::new("Semester").strong());
            });
            header.col(|ui| {
                ui.label(RichText::new("Score").strong());
            });
            header.col(|ui| {
                ui.label(RichText::new("Grade").strong());
            });
            header.col(|_| {});
        })
        .body(|mut body| {
            for grade in &grades {
                body.row(22.0, |mut row| {
                    row.col(|ui| {
                        ui.label(grade.student_label());
                    });
                    row.col(|ui| {
                        ui.label(&grade.semester);
                    });
                    row.col(|ui| match grade.score {
                        Some(score) => {
                            ui.label(format!("{score:.1}"));
                        }
                        None => {
                            ui.label("-");
                        }
                    });
                    row.col(|ui| match &grade.letter_grade {
                        Some(letter) => status_chip(ui, letter, band_color(grade_band(letter))),
                        None => {
                            ui.label("-");
                        }
                    });
                    row.col(|ui| {
                        if ui.button(regular::PENCIL_SIMPLE).clicked() {
                            app.grade_edit = Some(GradeEditForm {
                                grade_id: grade.id,
                                student_label: grade.student_label(),
                                score_input: grade.score.map(|s| s.to_string()).unwrap_or_default(),
                            });
                        }
                    });
                });
            }
        });
}

fn show_attendance_tab(app: &mut App, ui: &mut Ui) {
    if app.doctor_attendance.is_empty() {
        empty_state(ui, "No attendance records for this course yet.");
        return;
    }

    let records = app.doctor_attendance.clone();
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::remainder())
        .column(Column::auto().at_least(90.0))
        .column(Column::auto().at_least(90.0))
        .column(Column::auto().at_least(80.0))
        .header(24.0, |mut header| {
            header.col(|ui| {
                ui.label(RichText::new("Student").strong());
            });
            header.col(|ui| {
                ui.label(RichText::new("Attended").strong());
            });
            header.col(|ui| {
                ui.label(RichText::new("Percentage").strong());
            });
            header.col(|ui| {
                ui.label(RichText::new("Status").strong());
            });
        })
        .body(|mut body| {
            for record in &records {
                body.row(22.0, |mut row| {
                    row.col(|ui| {
                        let label = record
                            .student_name
                            .clone()
                            .filter(|n| !n.is_empty())
                            .or_else(|| record.student_id.map(|id| format!("Student ID: {id}")))
                            .unwrap_or_else(|| "-".to_string());
                        ui.label(label);
                    });
                    row.col(|ui| {
                        match (record.attended_lectures, record.total_lectures) {
                            (Some(a), Some(t)) => {
                                ui.label(format!("{a}/{t}"));
                            }
                            _ => {
                                ui.label("-");
                            }
                        };
                    });
                    row.col(|ui| match record.percentage {
                        Some(p) => {
                            ui.label(format!("{p:.0}%"));
                        }
                        None => {
                            ui.label("-");
                        }
                    });
                    row.col(|ui| {
                        if record.is_present() {
                            status_chip(ui, "Present", colors::SUCCESS);
                        } else {
                            status_chip(ui, "Absent", colors::ERROR);
                        }
                    });
                });
            }
        });
}

/// Material upload dialog: title, file picker, submit.
fn show_material_dialog(app: &mut App, ctx: &egui::Context) {
    if !app.material_form.is_open {
        return;
    }

    let mut close = false;
    egui::Window::new("Upload Material")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Title:");
                ui.text_edit_singleline(&mut app.material_form.title);
            });
            ui.add_space(6.0);

            ui.horizontal(|ui| {
                if ui.button(format!("{} Choose File", regular::FILE_ARROW_UP)).clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Documents", &["pdf", "doc", "docx", "ppt", "pptx"])
                        .pick_file()
                    {
                        app.material_form.file = Some(path);
                    }
                }
                match &app.material_form.file {
                    Some(path) => {
                        ui.label(path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default());
                    }
                    None => {
                        ui.label(RichText::new("No file selected").weak());
                    }
                };
            });
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                if ui.button("Cancel").clicked() {
                    close = true;
                }
                if app.material_form.in_flight {
                    ui.spinner();
                } else if ui.button("Upload").clicked() {
                    app.submit_material_upload();
                }
            });
        });

    if close {
        app.material_form.reset();
    }
}

/// Score edit dialog. Saving issues the update and then a full refetch.
fn show_grade_edit_dialog(app: &mut App, ctx: &egui::Context) {
    let Some(form) = app.grade_edit.clone() else { return };

    let mut close = false;
    egui::Window::new("Edit Score")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(RichText::new(&form.student_label).strong());
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.label("Score (0-100):");
                if let Some(edit) = app.grade_edit.as_mut() {
                    ui.text_edit_singleline(&mut edit.score_input);
                }
            });
            ui.add_space(10.0);
            ui.horizontal(|ui| {
                if ui.button("Cancel").clicked() {
                    close = true;
                }
                if ui.button("Save").clicked() {
                    app.save_grade_edit();
                }
            });
        });

    if close {
        app.grade_edit = None;
    }
}
