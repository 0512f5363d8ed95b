//! Storage collaborators: authentication, rooms and the per-room message feed.
//!
//! The chat client only talks to these traits. `MemoryStore` implements all of
//! them in-process and is what the desktop app runs against.

mod memory;

use chrono::{DateTime, Utc};
use crossbeam_channel::Receiver;
use thiserror::Error;

pub use memory::MemoryStore;

/// An anonymous backend session obtained after a local login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub access_token: String,
    pub issued_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: String,
    pub name: String,
    pub created_by: String,
}

/// A stored message exactly as the feed returns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRow {
    pub id: String,
    pub room_id: String,
    pub content: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("not signed in")]
    Unauthorized,
    #[error("{0} already exists")]
    Conflict(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// A live subscription to newly inserted messages of one room.
#[derive(Debug)]
pub struct Subscription {
    pub id: u64,
    pub room_id: String,
    pub rx: Receiver<MessageRow>,
}

pub trait AuthStore {
    fn sign_in_anonymously(&self) -> Result<AuthSession, StoreError>;
    fn sign_out(&self) -> Result<(), StoreError>;
    fn current_session(&self) -> Option<AuthSession>;
}

pub trait RoomStore {
    fn list_rooms(&self) -> Result<Vec<Room>, StoreError>;
    /// Requires a session. Names are unique regardless of case.
    fn create_room(&self, name: &str, created_by: &str) -> Result<Room, StoreError>;
}

pub trait MessageFeed {
    /// History of a room, oldest first.
    fn fetch_messages(&self, room_id: &str) -> Result<Vec<MessageRow>, StoreError>;
    /// Requires a session. The stored row is also delivered to subscribers.
    fn insert_message(
        &self,
        room_id: &str,
        user_id: &str,
        content: &str,
    ) -> Result<MessageRow, StoreError>;
    fn subscribe(&self, room_id: &str) -> Result<Subscription, StoreError>;
    fn unsubscribe(&self, subscription: Subscription);
}

/// Everything the backend worker needs from a store.
pub trait ChatStore: AuthStore + RoomStore + MessageFeed + Send + 'static {}

impl<T> ChatStore for T where T: AuthStore + RoomStore + MessageFeed + Send + 'static {}
