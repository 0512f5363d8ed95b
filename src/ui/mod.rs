//! UI rendering modules for the chat client.
//!
//! - `login`: username form shown while logged out
//! - `sidebar`: room list and room creation
//! - `messages`: message list and span rendering
//! - `input`: message composer
//! - `toasts`: transient status messages
//! - `theme`: color schemes

pub mod input;
pub mod login;
pub mod messages;
pub mod sidebar;
pub mod theme;
pub mod toasts;
