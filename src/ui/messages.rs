//! Message list rendering: avatars, bubbles and formatted spans.

use eframe::egui::{self, Color32};

use crate::buffer::ChatMessage;
use crate::format::{Span, SpanKind};
use crate::state::ChatState;
use crate::validation::{format_time, initials};

use super::theme::{user_color, ChatTheme};

const AVATAR_SIZE: f32 = 32.0;

/// Render the messages of the current room, newest at the bottom.
pub fn render_messages(ui: &mut egui::Ui, state: &ChatState, theme: &ChatTheme, show_timestamps: bool) {
    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            ui.add_space(8.0);

            if state.current_room.is_none() {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        egui::RichText::new("Select or create a room to start chatting")
                            .color(theme.text_muted),
                    );
                });
                return;
            }

            if state.buffer.messages.is_empty() && !state.is_loading {
                ui.label(
                    egui::RichText::new("No messages yet. Say hello!")
                        .color(theme.text_muted),
                );
            }

            for msg in &state.buffer.messages {
                let own = msg.is_from(state.user.as_ref());
                render_message(ui, msg, own, theme, show_timestamps);
                ui.add_space(6.0);
            }

            ui.add_space(8.0);
        });
}

fn render_message(
    ui: &mut egui::Ui,
    msg: &ChatMessage,
    own: bool,
    theme: &ChatTheme,
    show_timestamps: bool,
) {
    let layout = if own {
        egui::Layout::right_to_left(egui::Align::TOP)
    } else {
        egui::Layout::left_to_right(egui::Align::TOP)
    };

    ui.with_layout(layout, |ui| {
        render_avatar(ui, &msg.username);
        ui.add_space(6.0);

        ui.vertical(|ui| {
            if !own {
                ui.label(
                    egui::RichText::new(&msg.username)
                        .size(11.0)
                        .color(theme.text_muted),
                );
            }

            let (fill, text_color) = if own {
                (theme.bubble_own, theme.text_own)
            } else {
                (theme.bubble_other, theme.text_primary)
            };
            egui::Frame::new()
                .fill(fill)
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(10, 6))
                .show(ui, |ui| {
                    ui.set_max_width(ui.available_width() * 0.7);
                    render_spans(ui, &msg.spans, theme, text_color);
                    if show_timestamps {
                        ui.label(
                            egui::RichText::new(format_time(&msg.timestamp))
                                .size(10.0)
                                .color(text_color.gamma_multiply(0.7)),
                        );
                    }
                });
        });
    });
}

/// Lay out formatted spans as wrapped inline text.
pub fn render_spans(ui: &mut egui::Ui, spans: &[Span], theme: &ChatTheme, text_color: Color32) {
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;

        for span in spans {
            let rich = egui::RichText::new(&span.text).size(14.0);
            match span.kind {
                SpanKind::Plain => {
                    ui.label(rich.color(text_color));
                }
                SpanKind::Bold => {
                    ui.label(rich.color(text_color).strong());
                }
                SpanKind::Italic => {
                    ui.label(rich.color(text_color).italics());
                }
                SpanKind::Link => {
                    ui.add(
                        egui::Hyperlink::from_label_and_url(rich.color(theme.link), &span.text)
                            .open_in_new_tab(true),
                    );
                }
            }
        }
    });
}

/// Circular avatar showing the first two letters of the username.
fn render_avatar(ui: &mut egui::Ui, username: &str) -> egui::Response {
    let (rect, response) =
        ui.allocate_exact_size(egui::vec2(AVATAR_SIZE, AVATAR_SIZE), egui::Sense::hover());
    let painter = ui.painter();
    painter.circle_filled(rect.center(), AVATAR_SIZE / 2.0, user_color(username));
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        initials(username),
        egui::FontId::proportional(12.0),
        Color32::WHITE,
    );
    response.on_hover_text(username)
}
