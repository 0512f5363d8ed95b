//! Main update loop

use eframe::egui;
use std::time::Duration;

use super::RoomChatApp;
use crate::ui::input::render_input_panel;
use crate::ui::login::render_login;
use crate::ui::messages::render_messages;
use crate::ui::sidebar::{render_sidebar, SidebarAction};
use crate::ui::theme::ChatTheme;
use crate::ui::toasts::render_status_toasts;

impl eframe::App for RoomChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.client.process_events();

        // Keep polling the backend even without input
        ctx.request_repaint_after(Duration::from_millis(100));
        self.client.state.purge_old_status_messages(4);

        if self.client.state.is_authenticated() {
            self.render_chat(ctx);
        } else if let Some(username) = render_login(ctx, &mut self.username_input) {
            if self.client.login(&username) {
                self.username_input.clear();
            }
        }

        render_status_toasts(ctx, &self.client.state.status_messages);
    }
}

impl RoomChatApp {
    fn render_chat(&mut self, ctx: &egui::Context) {
        if let Some(action) = render_sidebar(ctx, &self.client.state, &mut self.new_room_input) {
            match action {
                SidebarAction::Join(room_id) => self.client.join_room(&room_id),
                SidebarAction::Create(name) => {
                    if self.client.create_room(&name) {
                        self.new_room_input.clear();
                    }
                }
                SidebarAction::Logout => self.client.logout(),
            }
        }

        let room_name = self
            .client
            .state
            .current_room
            .as_ref()
            .map(|r| r.name.clone());
        if let Some(text) = render_input_panel(ctx, &mut self.message_input, room_name.as_deref()) {
            self.client.submit_input(&text);
        }

        let theme = ChatTheme::for_ctx(ctx);
        let mut toggle_theme = false;
        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(theme.surface[2])
                    .inner_margin(egui::Margin::symmetric(16, 8)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let title = room_name
                        .as_deref()
                        .map(|n| format!("# {}", n))
                        .unwrap_or_else(|| "No room selected".to_string());
                    ui.heading(egui::RichText::new(title).strong());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let icon = if self.settings.theme == "light" { "🌙" } else { "☀" };
                        if ui.small_button(icon).on_hover_text("Toggle theme").clicked() {
                            toggle_theme = true;
                        }
                        if self.client.state.is_loading {
                            ui.spinner();
                        }
                    });
                });
                ui.separator();
                render_messages(
                    ui,
                    &self.client.state,
                    &theme,
                    self.settings.show_timestamps,
                );
            });

        if toggle_theme {
            self.toggle_theme(ctx);
        }
    }
}
