//! Desktop application shell
//!
//! - `core`: RoomChatApp struct and initialization
//! - `update`: per-frame update loop

pub mod core;
pub mod update;

pub use self::core::RoomChatApp;
