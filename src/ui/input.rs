//! Message composer at the bottom of the chat view.

use eframe::egui;

use super::theme::ChatTheme;

/// Render the input bar. Returns the text when Enter or Send is pressed.
pub fn render_input_panel(
    ctx: &egui::Context,
    message_input: &mut String,
    room_name: Option<&str>,
) -> Option<String> {
    let theme = ChatTheme::for_ctx(ctx);
    let mut submitted = None;

    egui::TopBottomPanel::bottom("input_panel")
        .frame(
            egui::Frame::new()
                .fill(theme.surface[1])
                .inner_margin(egui::Margin::symmetric(12, 10))
                .stroke(egui::Stroke::new(1.0, theme.border)),
        )
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                let hint = match room_name {
                    Some(name) => format!("Message #{}  (**bold**, *italic*, /help)", name),
                    None => "Join a room to send messages".to_string(),
                };
                let response = ui.add(
                    egui::TextEdit::singleline(message_input)
                        .desired_width(ui.available_width() - 70.0)
                        .hint_text(hint),
                );

                let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                let clicked = ui.button("Send").clicked();

                if (enter || clicked) && !message_input.is_empty() {
                    submitted = Some(std::mem::take(message_input));
                    response.request_focus();
                }
            });
        });

    submitted
}
