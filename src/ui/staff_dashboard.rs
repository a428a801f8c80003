//! Staff affairs dashboard: department / year / level drill-down plus
//! catalog management.

use eframe::egui::{RichText, Ui, vec2};
use egui_phosphor::regular;

use crate::client::SheetKind;

use super::app::{App, DeleteTarget, Panel};
use super::components::{colors, dashboard_card, empty_state, panel_header};
use super::doctor_dashboard::show_activity_log;
use super::drilldown::DrillStep;

pub fn show(app: &mut App, ui: &mut Ui) -> Option<Panel> {
    let mut next = None;

    panel_header(ui, "Staff Affairs");
    show_breadcrumbs(app, ui);
    ui.add_space(10.0);

    if app.drill_context.is_some() {
        next = show_actions(app, ui);
    } else {
        match app.drill.step() {
            DrillStep::SelectDepartment => show_departments(app, ui),
            DrillStep::SelectYear => show_years(app, ui),
            DrillStep::SelectLevel => show_levels(app, ui),
        }
    }

    ui.add_space(16.0);
    ui.separator();
    ui.add_space(8.0);
    show_activity_log(app, ui);

    next
}

/// Clickable breadcrumb trail. Clicking an earlier step discards the
/// deeper selections.
fn show_breadcrumbs(app: &mut App, ui: &mut Ui) {
    ui.horizontal(|ui| {
        if ui.link("Departments").clicked() {
            app.drill.reset();
            app.drill_context = None;
        }

        if let Some(dept) = app.drill.department().cloned() {
            ui.label(">");
            if ui.link(&dept.name).clicked() {
                app.drill.back_to_years();
                app.drill_context = None;
            }
        }

        if let Some(year) = app.drill.year().cloned() {
            ui.label(">");
            if ui.link(&year.year).clicked() {
                app.drill_context = None;
            }
        }

        if let Some(ctx) = &app.drill_context {
            ui.label(">");
            ui.label(RichText::new(&ctx.level_name).strong());
        }
    });
}

fn show_departments(app: &mut App, ui: &mut Ui) {
    ui.heading(format!("{} Select a Department", regular::BUILDINGS));
    ui.add_space(8.0);

    if app.is_loading && app.departments.is_empty() {
        ui.spinner();
        return;
    }

    if app.departments.is_empty() {
        empty_state(ui, "No departments defined yet.");
    }

    let departments = app.departments.clone();
    ui.horizontal_wrapped(|ui| {
        for dept in &departments {
            ui.vertical(|ui| {
                let desc = dept.code.as_deref().unwrap_or("");
                if dashboard_card(ui, &dept.name, desc, regular::BUILDINGS, vec2(170.0, 100.0)).clicked() {
                    app.drill.select_department(dept.clone());
                }
                if ui.button(RichText::new(regular::TRASH).color(colors::ERROR)).clicked() {
                    app.delete_target = Some(DeleteTarget::Department(dept.id, dept.name.clone()));
                    app.show_delete_confirm = true;
                }
            });
        }
    });

    ui.add_space(10.0);
    ui.horizontal(|ui| {
        ui.label("New department:");
        ui.text_edit_singleline(&mut app.new_department_input);
        if ui.button(format!("{} Add", regular::PLUS)).clicked() {
            app.submit_new_department();
        }
    });
}

fn show_years(app: &mut App, ui: &mut Ui) {
    ui.heading(format!("{} Select an Academic Year", regular::CALENDAR_BLANK));
    ui.add_space(8.0);

    let years = app.years.clone();
    if years.is_empty() {
        empty_state(ui, "No academic years defined yet.");
    }

    for year in &years {
        ui.horizontal(|ui| {
            if ui.button(RichText::new(&year.year).size(14.0)).clicked() {
                app.drill.select_year(year.clone());
            }
            if year.is_active {
                ui.label(RichText::new("active").color(colors::SUCCESS).size(11.0));
            }
            if ui.button(RichText::new(regular::TRASH).color(colors::ERROR)).clicked() {
                app.delete_target = Some(DeleteTarget::Year(year.id, year.year.clone()));
                app.show_delete_confirm = true;
            }
        });
        ui.add_space(4.0);
    }

    ui.add_space(10.0);
    ui.horizontal(|ui| {
        ui.label("New year (e.g. 2025-2026):");
        ui.text_edit_singleline(&mut app.new_year_input);
        if ui.button(format!("{} Add", regular::PLUS)).clicked() {
            app.submit_new_year();
        }
    });
}

fn show_levels(app: &mut App, ui: &mut Ui) {
    ui.heading(format!("{} Select a Level", regular::STAIRS));
    ui.add_space(8.0);

    let levels = app.levels.clone();
    if levels.is_empty() {
        empty_state(ui, "No levels defined yet.");
    }

    for level in &levels {
        ui.horizontal(|ui| {
            if ui.button(RichText::new(&level.name).size(14.0)).clicked() {
                // Completing the wizard pins the context used by the
                // student views until a breadcrumb clears it.
                app.drill_context = app.drill.select_level(level);
            }
            if ui.button(RichText::new(regular::TRASH).color(colors::ERROR)).clicked() {
                app.delete_target = Some(DeleteTarget::Level(level.id, level.name.clone()));
                app.show_delete_confirm = true;
            }
        });
        ui.add_space(4.0);
    }

    ui.add_space(10.0);
    ui.horizontal(|ui| {
        ui.label("New level:");
        ui.text_edit_singleline(&mut app.new_level_input);
        if ui.button(format!("{} Add", regular::PLUS)).clicked() {
            // The server owns the cap; a rejection shows its message.
            app.submit_new_level();
        }
    });
}

/// Actions available once a full department/year/level context exists.
fn show_actions(app: &mut App, ui: &mut Ui) -> Option<Panel> {
    let mut next = None;
    let Some(ctx) = app.drill_context.clone() else { return None };

    ui.label(
        RichText::new(format!("{} · {} · {}", ctx.department_name, ctx.year, ctx.level_name))
            .weak()
            .size(12.0),
    );
    ui.add_space(8.0);

    let size = vec2(180.0, 110.0);
    ui.horizontal(|ui| {
        if dashboard_card(ui, "Student List", "View, edit, delete accounts", regular::USERS, size).clicked() {
            next = Some(Panel::StudentList);
        }
        if dashboard_card(ui, "Register Students", "Bulk Excel registration", regular::USER_PLUS, size).clicked() {
            next = Some(Panel::UploadSheet(SheetKind::Students));
        }
        if dashboard_card(ui, "Upload Certificate", "Graduation certificate PDF", regular::CERTIFICATE, size).clicked()
        {
            next = Some(Panel::UploadCertificate);
        }
    });

    next
}
