//! Doctor landing page: navigation cards plus recent activity.

use eframe::egui::{self, RichText, Ui, vec2};
use egui_phosphor::regular;

use crate::client::SheetKind;

use super::app::{App, LogLevel, Panel};
use super::components::{colors, dashboard_card, panel_header};

pub fn show(app: &mut App, ui: &mut Ui) -> Option<Panel> {
    let mut next = None;

    panel_header(ui, "Doctor Dashboard");

    let size = vec2(180.0, 110.0);
    ui.horizontal(|ui| {
        if dashboard_card(ui, "My Courses", "Materials, grades, attendance", regular::BOOKS, size).clicked() {
            next = Some(Panel::DoctorCourses);
        }
        if dashboard_card(ui, "Exams", "Schedule and cancel exams", regular::EXAM, size).clicked() {
            next = Some(Panel::Exams);
        }
    });
    ui.add_space(8.0);
    ui.horizontal(|ui| {
        if dashboard_card(ui, "Upload Grades", "Bulk Excel grade sheet", regular::UPLOAD_SIMPLE, size).clicked() {
            next = Some(Panel::UploadSheet(SheetKind::Grades));
        }
        if dashboard_card(
            ui,
            "Upload Attendance",
            "Bulk Excel attendance sheet",
            regular::CALENDAR_CHECK,
            size,
        )
        .clicked()
        {
            next = Some(Panel::UploadSheet(SheetKind::Attendance));
        }
    });

    ui.add_space(16.0);
    ui.separator();
    ui.add_space(8.0);
    show_activity_log(app, ui);

    next
}

/// Recent activity list, newest first.
pub fn show_activity_log(app: &App, ui: &mut Ui) {
    ui.heading(format!("{} Recent Activity", regular::CLOCK_COUNTER_CLOCKWISE));
    ui.add_space(6.0);

    if app.log_messages.is_empty() {
        ui.label(RichText::new("Nothing yet this session.").weak());
        return;
    }

    egui::ScrollArea::vertical().max_height(160.0).show(ui, |ui| {
        for entry in app.log_messages.iter().rev().take(20) {
            let color = match entry.level {
                LogLevel::Success => colors::SUCCESS,
                LogLevel::Error => colors::ERROR,
                LogLevel::Warning => colors::WARNING,
                LogLevel::Info => colors::NEUTRAL,
            };
            ui.horizontal(|ui| {
                ui.label(RichText::new(entry.timestamp.format("%H:%M:%S").to_string()).weak().size(11.0));
                ui.colored_label(color, &entry.message);
            });
        }
    });
}
