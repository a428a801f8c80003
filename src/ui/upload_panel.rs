//! Bulk upload views: Excel sheets and graduation certificates.

use eframe::egui::{RichText, Ui};
use egui_phosphor::regular;

use crate::client::SheetKind;

use super::app::{App, Panel, UploadForm};
use super::components::{back_button, colors, panel_header};

/// Excel sheet upload view (grades, attendance, student registration).
pub fn show_sheet(app: &mut App, ui: &mut Ui, kind: SheetKind) -> Option<Panel> {
    let (title, hint, back_panel) = match kind {
        SheetKind::Grades => (
            "Upload Grades",
            "Excel sheet with student ids, course codes, and scores.",
            Panel::DoctorDashboard,
        ),
        SheetKind::Attendance => (
            "Upload Attendance",
            "Excel sheet with student ids, dates, and presence per course.",
            Panel::DoctorDashboard,
        ),
        SheetKind::Students => (
            "Register Students",
            "Excel sheet with one row per new student account.",
            Panel::StaffDashboard,
        ),
    };

    if back_button(ui, if kind == SheetKind::Students { "Staff Affairs" } else { "Dashboard" }) {
        return Some(back_panel);
    }

    panel_header(ui, title);

    if kind == SheetKind::Students
        && let Some(ctx) = &app.drill_context
    {
        ui.label(
            RichText::new(format!("{} · {} · {}", ctx.department_name, ctx.year, ctx.level_name))
                .weak()
                .size(12.0),
        );
        ui.add_space(8.0);
    }

    ui.label(RichText::new(hint).weak());
    ui.add_space(12.0);

    let submit = {
        let form = app.sheet_form_mut(kind);
        file_picker_row(form, ui, &["xlsx", "xls"], "Excel");
        ui.add_space(10.0);
        let submit = upload_row(form, ui);
        notice_row(form, ui);
        submit
    };
    if submit {
        app.submit_sheet_upload(kind);
    }

    None
}

/// Certificate upload view: target student id plus a PDF.
pub fn show_certificate(app: &mut App, ui: &mut Ui) -> Option<Panel> {
    if back_button(ui, "Staff Affairs") {
        return Some(Panel::StaffDashboard);
    }

    panel_header(ui, "Upload Certificate");

    ui.horizontal(|ui| {
        ui.label("Student ID:");
        ui.text_edit_singleline(&mut app.certificate_student_id);
    });
    ui.add_space(8.0);

    let submit = {
        let form = &mut app.certificate_upload;
        file_picker_row(form, ui, &["pdf"], "PDF");
        ui.add_space(10.0);
        let submit = upload_row(form, ui);
        notice_row(form, ui);
        submit
    };
    if submit {
        app.submit_certificate_upload();
    }

    None
}

fn file_picker_row(form: &mut UploadForm, ui: &mut Ui, extensions: &[&str], filter_name: &str) {
    ui.horizontal(|ui| {
        if ui.button(format!("{} Choose File", regular::FILE_ARROW_UP)).clicked()
            && let Some(path) = rfd::FileDialog::new().add_filter(filter_name, extensions).pick_file()
        {
            form.file = Some(path);
            form.notice = None;
        }
        match &form.file {
            Some(path) => {
                ui.label(path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default());
            }
            None => {
                ui.label(RichText::new("No file selected").weak());
            }
        };
    });
}

/// Upload button or spinner; returns true when the user submitted.
fn upload_row(form: &mut UploadForm, ui: &mut Ui) -> bool {
    let mut submit = false;
    ui.horizontal(|ui| {
        if form.in_flight {
            ui.spinner();
            ui.label("Uploading...");
        } else if ui.button(format!("{} Upload", regular::UPLOAD_SIMPLE)).clicked() {
            submit = true;
        }
    });
    submit
}

/// Outcome notice from the last attempt, success or failure.
fn notice_row(form: &UploadForm, ui: &mut Ui) {
    if let Some((ok, message)) = &form.notice {
        ui.add_space(8.0);
        let color = if *ok { colors::SUCCESS } else { colors::ERROR };
        ui.colored_label(color, message);
    }
}
