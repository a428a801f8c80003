//! Public landing page: faculty announcements plus the sign-in entry point.

use eframe::egui::{self, RichText, Ui};
use egui_phosphor::regular;

use super::app::{App, Panel, landing_panel};
use super::components::{back_button, empty_state};

pub fn show(app: &mut App, ui: &mut Ui) -> Option<Panel> {
    let mut next = None;

    if let Some(session) = &app.session
        && back_button(ui, "Dashboard")
    {
        return Some(landing_panel(session.role()));
    }

    ui.add_space(20.0);
    ui.vertical_centered(|ui| {
        ui.label(RichText::new(regular::GRADUATION_CAP).size(48.0));
        ui.heading(RichText::new("Faculty of Engineering").size(28.0));
        ui.label(RichText::new("Beni-Suef University").weak());
    });
    ui.add_space(10.0);

    if app.session.is_none() {
        ui.vertical_centered(|ui| {
            if ui
                .button(RichText::new(format!("{} Sign In", regular::SIGN_IN)).size(16.0))
                .clicked()
            {
                next = Some(Panel::Login);
            }
        });
    }

    ui.add_space(20.0);
    ui.separator();
    ui.add_space(10.0);
    ui.heading(format!("{} Latest News", regular::NEWSPAPER));
    ui.add_space(10.0);

    if app.news.is_empty() {
        empty_state(ui, "No announcements yet.");
        return next;
    }

    let news = app.news.clone();
    egui::ScrollArea::vertical().show(ui, |ui| {
        for item in &news {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(&item.title).strong().size(16.0));
                if !item.created_at.is_empty() {
                    ui.label(RichText::new(&item.created_at).weak().size(11.0));
                }
                ui.add_space(4.0);
                ui.label(item.preview(240));
            });
            ui.add_space(8.0);
        }
    });

    next
}
