use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use crossbeam_channel::{unbounded, Sender};
use uuid::Uuid;

use super::{
    AuthSession, AuthStore, MessageFeed, MessageRow, Room, RoomStore, StoreError, Subscription,
};

#[derive(Default)]
struct Inner {
    session: Option<AuthSession>,
    rooms: Vec<Room>,
    messages: Vec<MessageRow>,
    /// Live subscribers keyed by room id.
    subscribers: HashMap<String, Vec<(u64, Sender<MessageRow>)>>,
    next_subscription: u64,
    offline: bool,
}

/// In-process store shared by every clone of the handle.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already contains rooms with the given names.
    pub fn with_rooms(names: &[&str]) -> Self {
        let store = Self::new();
        if let Ok(mut inner) = store.inner.lock() {
            inner.rooms = names
                .iter()
                .map(|name| Room {
                    id: Uuid::new_v4().to_string(),
                    name: name.to_string(),
                    created_by: "system".to_string(),
                })
                .collect();
        }
        store
    }

    /// Simulate the backend going away; every call fails until restored.
    pub fn set_offline(&self, offline: bool) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.offline = offline;
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        let inner = self
            .inner
            .lock()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".into()))?;
        if inner.offline {
            return Err(StoreError::Unavailable("backend offline".into()));
        }
        Ok(inner)
    }

    fn lock_signed_in(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        let inner = self.lock()?;
        if inner.session.is_none() {
            return Err(StoreError::Unauthorized);
        }
        Ok(inner)
    }
}

impl AuthStore for MemoryStore {
    fn sign_in_anonymously(&self) -> Result<AuthSession, StoreError> {
        let mut inner = self.lock()?;
        let session = AuthSession {
            access_token: Uuid::new_v4().to_string(),
            issued_at: Utc::now(),
        };
        inner.session = Some(session.clone());
        Ok(session)
    }

    fn sign_out(&self) -> Result<(), StoreError> {
        self.lock()?.session = None;
        Ok(())
    }

    fn current_session(&self) -> Option<AuthSession> {
        self.lock().ok().and_then(|inner| inner.session.clone())
    }
}

impl RoomStore for MemoryStore {
    fn list_rooms(&self) -> Result<Vec<Room>, StoreError> {
        Ok(self.lock()?.rooms.clone())
    }

    fn create_room(&self, name: &str, created_by: &str) -> Result<Room, StoreError> {
        let mut inner = self.lock_signed_in()?;
        let lower = name.to_lowercase();
        if inner.rooms.iter().any(|r| r.name.to_lowercase() == lower) {
            return Err(StoreError::Conflict(format!("room \"{}\"", name)));
        }
        let room = Room {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            created_by: created_by.to_string(),
        };
        inner.rooms.push(room.clone());
        Ok(room)
    }
}

impl MessageFeed for MemoryStore {
    fn fetch_messages(&self, room_id: &str) -> Result<Vec<MessageRow>, StoreError> {
        let inner = self.lock()?;
        if !inner.rooms.iter().any(|r| r.id == room_id) {
            return Err(StoreError::NotFound(format!("room {}", room_id)));
        }
        let mut rows: Vec<MessageRow> = inner
            .messages
            .iter()
            .filter(|m| m.room_id == room_id)
            .cloned()
            .collect();
        rows.sort_by_key(|m| m.created_at);
        Ok(rows)
    }

    fn insert_message(
        &self,
        room_id: &str,
        user_id: &str,
        content: &str,
    ) -> Result<MessageRow, StoreError> {
        let mut inner = self.lock_signed_in()?;
        if !inner.rooms.iter().any(|r| r.id == room_id) {
            return Err(StoreError::NotFound(format!("room {}", room_id)));
        }
        let row = MessageRow {
            id: Uuid::new_v4().to_string(),
            room_id: room_id.to_string(),
            content: content.to_string(),
            user_id: user_id.to_string(),
            created_at: Utc::now(),
        };
        inner.messages.push(row.clone());
        if let Some(subs) = inner.subscribers.get_mut(room_id) {
            // Drop subscribers whose receiving end has gone away
            subs.retain(|(_, tx)| tx.send(row.clone()).is_ok());
        }
        Ok(row)
    }

    fn subscribe(&self, room_id: &str) -> Result<Subscription, StoreError> {
        let mut inner = self.lock()?;
        let (tx, rx) = unbounded();
        inner.next_subscription += 1;
        let id = inner.next_subscription;
        inner
            .subscribers
            .entry(room_id.to_string())
            .or_default()
            .push((id, tx));
        Ok(Subscription {
            id,
            room_id: room_id.to_string(),
            rx,
        })
    }

    fn unsubscribe(&self, subscription: Subscription) {
        // Unsubscribing must work even while offline
        let Ok(mut inner) = self.inner.lock() else {
            return;
        };
        if let Some(subs) = inner.subscribers.get_mut(&subscription.room_id) {
            subs.retain(|(id, _)| *id != subscription.id);
            if subs.is_empty() {
                inner.subscribers.remove(&subscription.room_id);
            }
        }
    }
}
