use chrono::{DateTime, Utc};

use crate::format::{format_message, Span};
use crate::session::AuthUser;
use crate::store::MessageRow;
use crate::validation::display_name;

/// Maximum messages to keep in a buffer before trimming
const MAX_BUFFER_MESSAGES: usize = 2000;
/// Number of oldest messages to remove when trimming
const BUFFER_TRIM_COUNT: usize = 500;

/// A message ready for display: author resolved and content formatted
#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    pub room_id: String,
    pub content: String,
    pub user_id: String,
    pub username: String,
    pub timestamp: DateTime<Utc>,
    pub spans: Vec<Span>,
}

impl ChatMessage {
    pub fn from_row(row: MessageRow, me: Option<&AuthUser>) -> Self {
        let username = display_name(
            &row.user_id,
            me.map(|u| (u.id.as_str(), u.username.as_str())),
        );
        let spans = format_message(&row.content);
        Self {
            id: row.id,
            room_id: row.room_id,
            content: row.content,
            user_id: row.user_id,
            username,
            timestamp: row.created_at,
            spans,
        }
    }

    pub fn is_from(&self, user: Option<&AuthUser>) -> bool {
        user.is_some_and(|u| u.id == self.user_id)
    }
}

/// Messages of the room currently being viewed
#[derive(Default, Clone, Debug)]
pub struct RoomBuffer {
    pub messages: Vec<ChatMessage>,
}

impl RoomBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with a freshly fetched history.
    pub fn replace(&mut self, mut messages: Vec<ChatMessage>) {
        if messages.len() > MAX_BUFFER_MESSAGES {
            messages.drain(0..messages.len() - MAX_BUFFER_MESSAGES);
        }
        self.messages = messages;
    }

    /// Append a live message. Returns false if it was already present.
    pub fn add_message(&mut self, msg: ChatMessage) -> bool {
        if self.messages.iter().any(|m| m.id == msg.id) {
            return false;
        }
        self.messages.push(msg);
        self.trim();
        true
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    fn trim(&mut self) {
        if self.messages.len() > MAX_BUFFER_MESSAGES {
            self.messages.drain(0..BUFFER_TRIM_COUNT);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, user_id: &str, content: &str) -> MessageRow {
        MessageRow {
            id: id.to_string(),
            room_id: "room-1".to_string(),
            content: content.to_string(),
            user_id: user_id.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_from_row_formats_and_names() {
        let me = AuthUser {
            username: "alice".into(),
            id: "user_a1".into(),
        };

        let own = ChatMessage::from_row(row("1", "user_a1", "**hi**"), Some(&me));
        assert_eq!(own.username, "alice");
        assert_eq!(own.spans, vec![Span::bold("hi")]);
        assert!(own.is_from(Some(&me)));

        let other = ChatMessage::from_row(row("2", "f00dcafe", "yo"), Some(&me));
        assert_eq!(other.username, "User-f00d");
        assert!(!other.is_from(Some(&me)));
        assert!(!other.is_from(None));
    }

    #[test]
    fn test_add_message_dedupes_and_trims() {
        let mut buf = RoomBuffer::new();
        assert!(buf.add_message(ChatMessage::from_row(row("1", "u", "a"), None)));
        assert!(!buf.add_message(ChatMessage::from_row(row("1", "u", "a"), None)));
        assert_eq!(buf.messages.len(), 1);

        for i in 0..(MAX_BUFFER_MESSAGES + 10) {
            buf.add_message(ChatMessage::from_row(row(&format!("m{i}"), "u", "x"), None));
        }
        assert!(buf.messages.len() <= MAX_BUFFER_MESSAGES);
    }

    #[test]
    fn test_replace_and_clear() {
        let mut buf = RoomBuffer::new();
        buf.add_message(ChatMessage::from_row(row("old", "u", "a"), None));
        buf.replace(vec![
            ChatMessage::from_row(row("1", "u", "a"), None),
            ChatMessage::from_row(row("2", "u", "b"), None),
        ]);
        let ids: Vec<_> = buf.messages.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        buf.clear();
        assert!(buf.messages.is_empty());
    }
}
