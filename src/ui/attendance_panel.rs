//! Student attendance listing.

use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use super::app::{App, Panel};
use super::components::{back_button, colors, empty_state, panel_header, status_chip};

pub fn show(app: &mut App, ui: &mut Ui) -> Option<Panel> {
    if back_button(ui, "Dashboard") {
        return Some(Panel::StudentDashboard);
    }

    panel_header(ui, "My Attendance");

    if app.is_loading && app.my_attendance.is_empty() {
        ui.spinner();
        return None;
    }
    if app.my_attendance.is_empty() {
        empty_state(ui, "No attendance records yet.");
        return None;
    }

    let records = app.my_attendance.clone();
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(100.0))
        .column(Column::auto().at_least(90.0))
        .column(Column::remainder())
        .column(Column::auto().at_least(80.0))
        .header(24.0, |mut header| {
            header.col(|ui| {
                ui.label(RichText::new("Date").strong());
            });
            header.col(|ui| {
                ui.label(RichText::new("Code").strong());
            });
            header.col(|ui| {
                ui.label(RichText::new("Course").strong());
            });
            header.col(|ui| {
                ui.label(RichText::new("Status").strong());
            });
        })
        .body(|mut body| {
            for record in &records {
                body.row(22.0, |mut row| {
                    row.col(|ui| {
                        ui.label(&record.date);
                    });
                    row.col(|ui| {
                        ui.label(&record.course_code);
                    });
                    row.col(|ui| {
                        ui.label(record.course_name.as_deref().unwrap_or("-"));
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

    None
}
