//! Course material listing (student view, read-only).

use eframe::egui::{self, RichText, Ui};
use egui_phosphor::regular;

use super::app::{App, Panel};
use super::components::{back_button, empty_state, panel_header};

pub fn show(app: &mut App, ui: &mut Ui, course_name: &str) -> Option<Panel> {
    if back_button(ui, "Dashboard") {
        return Some(Panel::StudentDashboard);
    }

    panel_header(ui, &format!("Materials - {course_name}"));

    if app.is_loading && app.materials.is_empty() {
        ui.spinner();
        return None;
    }
    if app.materials.is_empty() {
        empty_state(ui, "No materials uploaded for this course yet.");
        return None;
    }

    let materials = app.materials.clone();
    egui::ScrollArea::vertical().show(ui, |ui| {
        for material in &materials {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.label(RichText::new(regular::FILE_PDF).size(20.0));
                    ui.vertical(|ui| {
                        ui.label(RichText::new(&material.title).strong());
                        ui.label(RichText::new(material.uploaded_date()).weak().size(11.0));
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.hyperlink_to(format!("{} Download", regular::DOWNLOAD_SIMPLE), &material.file);
                    });
                });
            });
            ui.add_space(6.0);
        }
    });

    None
}
