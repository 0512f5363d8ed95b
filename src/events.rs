//! Backend event processing (room lists, history, live messages, failures).

use chrono::Local;

use crate::buffer::ChatMessage;
use crate::chat::ChatClient;
use crate::logging::LogEntry;
use crate::protocol::GuiEvent;

impl ChatClient {
    /// Apply all pending backend events. Returns how many were handled.
    pub fn process_events(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.event_rx.try_recv() {
            self.apply_event(event);
            handled += 1;
        }
        handled
    }

    fn apply_event(&mut self, event: GuiEvent) {
        match event {
            GuiEvent::SignedIn => {
                if std::mem::take(&mut self.state.announce_sign_in) {
                    self.state.push_status("Login successful!");
                }
            }

            GuiEvent::SignInFailed(error) => {
                tracing::error!("anonymous login failed: {}", error);
                if std::mem::take(&mut self.state.announce_sign_in) {
                    self.state.push_status("Login error occurred");
                }
            }

            GuiEvent::SignedOut => {
                tracing::debug!("backend session closed");
            }

            GuiEvent::RoomsLoaded(rooms) => {
                // Arrived after a logout
                if !self.state.is_authenticated() {
                    return;
                }
                self.state.is_loading = false;
                self.state.rooms = rooms;
                if self.state.current_room.is_none() {
                    if let Some(first) = self.state.rooms.first().map(|r| r.id.clone()) {
                        self.join_room(&first);
                    }
                }
            }

            GuiEvent::RoomsFailed(error) => {
                tracing::error!("error fetching rooms: {}", error);
                self.state.is_loading = false;
                self.state.push_status("Failed to load chat rooms");
            }

            GuiEvent::RoomCreated(room) => {
                if !self.state.is_authenticated() {
                    return;
                }
                self.state.is_loading = false;
                if self.state.room_by_id(&room.id).is_none() {
                    self.state.rooms.push(room.clone());
                }
                self.state
                    .push_status(format!("Room \"{}\" created successfully!", room.name));
                self.join_room(&room.id);
            }

            GuiEvent::RoomCreateFailed(error) => {
                tracing::error!("error creating room: {}", error);
                self.state.is_loading = false;
                self.state.push_status("Failed to create room");
            }

            GuiEvent::History { room_id, messages } => {
                if self.state.current_room_id() != Some(room_id.as_str()) {
                    return;
                }
                let me = self.state.user.clone();
                let messages = messages
                    .into_iter()
                    .map(|row| ChatMessage::from_row(row, me.as_ref()))
                    .collect();
                self.state.buffer.replace(messages);
                self.state.is_loading = false;
            }

            GuiEvent::JoinFailed { room_id, error } => {
                tracing::error!("error joining room {}: {}", room_id, error);
                if self.state.current_room_id() == Some(room_id.as_str()) {
                    self.state.is_loading = false;
                    self.state.push_status("Failed to join room");
                }
            }

            GuiEvent::MessageReceived(row) => {
                let Some(room_name) = self
                    .state
                    .current_room
                    .as_ref()
                    .filter(|r| r.id == row.room_id)
                    .map(|r| r.name.clone())
                else {
                    return;
                };
                let msg = ChatMessage::from_row(row, self.state.user.as_ref());
                let entry = LogEntry {
                    room: room_name,
                    timestamp: msg
                        .timestamp
                        .with_timezone(&Local)
                        .format("%H:%M:%S")
                        .to_string(),
                    username: msg.username.clone(),
                    message: msg.content.clone(),
                };
                if self.state.buffer.add_message(msg) {
                    if let Some(logger) = &self.logger {
                        logger.log(entry);
                    }
                }
            }

            GuiEvent::SendFailed(error) => {
                tracing::error!("error sending message: {}", error);
                self.state.push_status("Failed to send message");
            }
        }
    }
}
