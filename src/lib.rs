//! Room Chat client library.
//!
//! This module re-exports the core components for testing and extension.

pub mod app;
pub mod backend;
pub mod buffer;
pub mod chat;
pub mod commands;
pub mod config;
pub mod events;
pub mod format;
pub mod logging;
pub mod protocol;
pub mod session;
pub mod state;
pub mod store;
pub mod ui;
pub mod validation;
