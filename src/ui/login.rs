//! Username-only login screen.

use eframe::egui;

use super::theme::ChatTheme;

/// Render the login form. Returns the username when the user submits.
pub fn render_login(ctx: &egui::Context, username_input: &mut String) -> Option<String> {
    let theme = ChatTheme::for_ctx(ctx);
    let mut submitted = None;

    egui::CentralPanel::default()
        .frame(egui::Frame::new().fill(theme.surface[0]))
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() * 0.3);
                ui.heading(egui::RichText::new("Room Chat").strong());
                ui.label(egui::RichText::new("Pick a username to start chatting").color(theme.text_muted));
                ui.add_space(16.0);

                let response = ui.add(
                    egui::TextEdit::singleline(username_input)
                        .hint_text("Username")
                        .desired_width(240.0),
                );
                let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

                ui.add_space(8.0);
                let clicked = ui
                    .add_sized([240.0, 32.0], egui::Button::new("Join chat").fill(theme.accent))
                    .clicked();

                if enter || clicked {
                    submitted = Some(username_input.clone());
                }
            });
        });

    submitted
}
