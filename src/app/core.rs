//! Core RoomChatApp struct definition and initialization

use eframe::egui;

use crate::chat::ChatClient;
use crate::config::{save_settings, Settings};
use crate::ui::theme::apply_visuals;

pub struct RoomChatApp {
    // Chat state and the backend channel pair
    pub client: ChatClient,

    pub settings: Settings,

    // Form inputs
    pub username_input: String,
    pub new_room_input: String,
    pub message_input: String,
}

impl RoomChatApp {
    pub fn new(cc: &eframe::CreationContext<'_>, client: ChatClient, settings: Settings) -> Self {
        apply_visuals(&cc.egui_ctx, &settings.theme);
        Self {
            client,
            settings,
            username_input: String::new(),
            new_room_input: String::new(),
            message_input: String::new(),
        }
    }

    pub(super) fn toggle_theme(&mut self, ctx: &egui::Context) {
        self.settings.theme = if self.settings.theme == "light" {
            "dark".to_string()
        } else {
            "light".to_string()
        };
        apply_visuals(ctx, &self.settings.theme);
        if let Err(e) = save_settings(&self.settings) {
            tracing::warn!("Failed to save settings: {}", e);
        }
    }
}
