//! Student grade listing.

use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use super::app::{App, Panel};
use super::components::{back_button, colors, empty_state, panel_header, status_chip};
use crate::models::grade::{GradeBand, grade_band};

pub fn band_color(band: GradeBand) -> eframe::egui::Color32 {
    match band {
        GradeBand::Good => colors::SUCCESS,
        GradeBand::Fair => colors::INFO,
        GradeBand::Weak => colors::WARNING,
        GradeBand::Fail => colors::ERROR,
    }
}

pub fn show(app: &mut App, ui: &mut Ui) -> Option<Panel> {
    if back_button(ui, "Dashboard") {
        return Some(Panel::StudentDashboard);
    }

    panel_header(ui, "My Grades");

    if app.is_loading && app.my_grades.is_empty() {
        ui.spinner();
        return None;
    }
    if app.my_grades.is_empty() {
        empty_state(ui, "No grades recorded yet.");
        return None;
    }

    let grades = app.my_grades.clone();
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(90.0))
        .column(Column::remainder())
        .column(Column::auto().at_least(100.0))
        .column(Column::auto().at_least(70.0))
        .column(Column::auto().at_least(60.0))
        .header(24.0, |mut header| {
            header.col(|ui| {
                ui.label(RichText::new("Code").strong());
            });
            header.col(|ui| {
                ui.label(RichText::new("Course").strong());
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
        })
        .body(|mut body| {
            for grade in &grades {
                body.row(22.0, |mut row| {
                    row.col(|ui| {
                        ui.label(grade.course_code.as_deref().unwrap_or("-"));
                    });
                    row.col(|ui| {
                        ui.label(grade.course_name.as_deref().unwrap_or("-"));
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
                });
            }
        });

    None
}
