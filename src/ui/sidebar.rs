//! Room list panel with the create-room field.

use eframe::egui::{self, Stroke};

use crate::state::ChatState;

use super::theme::ChatTheme;

/// What the user asked for in the sidebar this frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarAction {
    Join(String),
    Create(String),
    Logout,
}

/// Render the left room list.
pub fn render_sidebar(
    ctx: &egui::Context,
    state: &ChatState,
    new_room_input: &mut String,
) -> Option<SidebarAction> {
    let theme = ChatTheme::for_ctx(ctx);
    let mut action = None;

    egui::SidePanel::left("rooms_panel")
        .resizable(true)
        .default_width(220.0)
        .min_width(180.0)
        .frame(
            egui::Frame::new()
                .fill(theme.surface[1])
                .inner_margin(egui::Margin::same(12))
                .stroke(Stroke::new(1.0, theme.border)),
        )
        .show(ctx, |ui| {
            if let Some(user) = &state.user {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(&user.username).strong());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("Log out").clicked() {
                            action = Some(SidebarAction::Logout);
                        }
                    });
                });
                ui.separator();
            }

            ui.label(
                egui::RichText::new("ROOMS")
                    .size(11.0)
                    .strong()
                    .color(theme.text_muted),
            );
            ui.add_space(4.0);

            egui::ScrollArea::vertical()
                .max_height(ui.available_height() - 80.0)
                .show(ui, |ui| {
                    if state.rooms.is_empty() && !state.is_loading {
                        ui.label(egui::RichText::new("No rooms yet").color(theme.text_muted));
                    }
                    for room in &state.rooms {
                        let selected = state.current_room_id() == Some(room.id.as_str());
                        if ui
                            .selectable_label(selected, format!("# {}", room.name))
                            .clicked()
                            && !selected
                        {
                            action = Some(SidebarAction::Join(room.id.clone()));
                        }
                    }
                });

            ui.separator();
            let response = ui.add(
                egui::TextEdit::singleline(new_room_input)
                    .hint_text("New room name")
                    .desired_width(f32::INFINITY),
            );
            let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Create room").clicked() || enter {
                action = Some(SidebarAction::Create(new_room_input.clone()));
            }

            if state.is_loading {
                ui.add_space(4.0);
                ui.spinner();
            }
        });

    action
}
