//! Room Chat - a small room-based chat client built with egui
//!
//! Architecture:
//! - Main thread: runs the egui UI and owns the chat state
//! - Backend thread: owns the store, so store calls never block a frame
//! - Communication via crossbeam channels (lock-free, sync-safe)

use eframe::egui;
use tracing_subscriber::EnvFilter;

use roomchat_client::app::RoomChatApp;
use roomchat_client::chat::ChatClient;
use roomchat_client::config::{load_settings, DEFAULT_ROOMS};
use roomchat_client::logging::Logger;
use roomchat_client::session::SessionStore;
use roomchat_client::store::MemoryStore;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> eframe::Result<()> {
    init_tracing();

    let settings = load_settings().unwrap_or_default();
    let logger = if settings.log_messages {
        match Logger::new() {
            Ok(logger) => Some(logger),
            Err(e) => {
                tracing::warn!("Transcript logging disabled: {}", e);
                None
            }
        }
    } else {
        None
    };

    let store = MemoryStore::with_rooms(DEFAULT_ROOMS);
    let mut client = match ChatClient::spawn(store, SessionStore::default_location(), logger) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("{}", e);
            return Ok(());
        }
    };
    client.restore_session();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 600.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Room Chat",
        options,
        Box::new(move |cc| Ok(Box::new(RoomChatApp::new(cc, client, settings)))),
    )
}
