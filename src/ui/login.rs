//! Sign-in form.

use eframe::egui::{self, Key, RichText, Ui};
use egui_phosphor::regular;

use super::app::{App, Panel};
use super::components::{back_button, colors};

pub fn show(app: &mut App, ui: &mut Ui) -> Option<Panel> {
    if back_button(ui, "Home") {
        return Some(Panel::Home);
    }

    ui.add_space(40.0);
    ui.vertical_centered(|ui| {
        ui.label(RichText::new(regular::USER_CIRCLE).size(40.0));
        ui.heading("Portal Sign In");
        ui.add_space(20.0);

        egui::Grid::new("login_form").num_columns(2).spacing([10.0, 10.0]).show(ui, |ui| {
            ui.label("Student / Staff ID:");
            ui.text_edit_singleline(&mut app.login_form.username);
            ui.end_row();

            ui.label("Password:");
            ui.add(egui::TextEdit::singleline(&mut app.login_form.password).password(true));
            ui.end_row();
        });

        ui.add_space(10.0);

        if let Some(ref error) = app.login_form.error {
            ui.colored_label(colors::ERROR, error);
            ui.add_space(6.0);
        }

        let submit_clicked = ui
            .add_enabled(!app.login_form.in_flight, egui::Button::new("Sign In"))
            .clicked();
        let enter_pressed = ui.input(|i| i.key_pressed(Key::Enter));

        if app.login_form.in_flight {
            ui.add_space(6.0);
            ui.spinner();
        } else if submit_clicked || enter_pressed {
            app.submit_login();
        }
    });

    // A successful login routes from the message handler, not from here.
    None
}
