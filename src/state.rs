//! Core chat state, separated from UI logic.
//!
//! `ChatState` holds everything the views read: the logged-in user, known
//! rooms, the selected room and its messages, plus transient status toasts.

use std::time::{Duration, Instant};

use crate::buffer::RoomBuffer;
use crate::session::AuthUser;
use crate::store::Room;

#[derive(Default)]
pub struct ChatState {
    /// Locally logged-in user, if any.
    pub user: Option<AuthUser>,

    /// Rooms in the order the store returned them, then creation order.
    pub rooms: Vec<Room>,

    /// Room being viewed.
    pub current_room: Option<Room>,

    /// Messages of `current_room`.
    pub buffer: RoomBuffer,

    /// A room fetch, creation or join is in flight.
    pub is_loading: bool,

    /// Status toast messages with creation time (auto-expire).
    pub status_messages: Vec<(String, Instant)>,

    /// Show "Login successful!" once the backend session is up.
    pub(crate) announce_sign_in: bool,
}

impl ChatState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn current_room_id(&self) -> Option<&str> {
        self.current_room.as_ref().map(|r| r.id.as_str())
    }

    pub fn room_by_id(&self, room_id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == room_id)
    }

    /// Case-insensitive lookup by display name.
    pub fn room_by_name(&self, name: &str) -> Option<&Room> {
        let lower = name.to_lowercase();
        self.rooms.iter().find(|r| r.name.to_lowercase() == lower)
    }

    pub fn push_status(&mut self, msg: impl Into<String>) {
        self.status_messages.push((msg.into(), Instant::now()));
    }

    /// Drop toasts older than `max_age_secs`.
    pub fn purge_old_status_messages(&mut self, max_age_secs: u64) {
        let max_age = Duration::from_secs(max_age_secs);
        self.status_messages.retain(|(_, t)| t.elapsed() < max_age);
    }

    /// Forget everything tied to the logged-in user.
    pub fn reset(&mut self) {
        self.user = None;
        self.rooms.clear();
        self.current_room = None;
        self.buffer.clear();
        self.is_loading = false;
        self.announce_sign_in = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(id: &str, name: &str) -> Room {
        Room {
            id: id.into(),
            name: name.into(),
            created_by: "system".into(),
        }
    }

    #[test]
    fn test_room_lookup() {
        let mut state = ChatState::new();
        state.rooms = vec![room("1", "General"), room("2", "random")];
        assert_eq!(state.room_by_id("2").map(|r| r.name.as_str()), Some("random"));
        assert!(state.room_by_id("3").is_none());
        assert_eq!(state.room_by_name("general").map(|r| r.id.as_str()), Some("1"));
        assert!(state.room_by_name("rust").is_none());
    }

    #[test]
    fn test_status_messages_expire() {
        let mut state = ChatState::new();
        state.push_status("hello");
        state.purge_old_status_messages(60);
        assert_eq!(state.status_messages.len(), 1);
        state.purge_old_status_messages(0);
        assert!(state.status_messages.is_empty());
    }

    #[test]
    fn test_reset() {
        let mut state = ChatState::new();
        state.user = Some(AuthUser {
            username: "alice".into(),
            id: "user_1".into(),
        });
        state.rooms = vec![room("1", "general")];
        state.current_room = state.rooms.first().cloned();
        state.is_loading = true;

        state.reset();
        assert!(!state.is_authenticated());
        assert!(state.rooms.is_empty());
        assert!(state.current_room_id().is_none());
        assert!(!state.is_loading);
    }
}
