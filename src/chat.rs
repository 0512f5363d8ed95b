//! The chat client: login, rooms and messaging on top of the backend worker.
//!
//! `ChatClient` owns the UI side of the channel pair. Every operation updates
//! `ChatState` immediately where it can and leaves the slow part to the
//! backend thread; results come back through `process_events`.

use chrono::Utc;
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::thread::{self, JoinHandle};

use crate::backend::run_backend;
use crate::commands::{parse_command, Command, HELP_TEXT};
use crate::logging::Logger;
use crate::protocol::{BackendAction, GuiEvent};
use crate::session::{AuthUser, SessionStore};
use crate::state::ChatState;
use crate::store::ChatStore;
use crate::validation::{
    generate_user_id, is_blank_message, room_name_taken, validate_room_name, validate_username,
};

pub struct ChatClient {
    pub state: ChatState,

    // Channels for backend communication
    pub(crate) action_tx: Sender<BackendAction>,
    pub(crate) event_rx: Receiver<GuiEvent>,

    /// Where the logged-in user is persisted; None keeps logins in memory only.
    session: Option<SessionStore>,
    /// Transcript logger, when enabled in settings.
    pub(crate) logger: Option<Logger>,

    backend: Option<JoinHandle<()>>,
}

impl ChatClient {
    /// Start a backend thread over `store` and return the client driving it.
    pub fn spawn<S: ChatStore>(
        store: S,
        session: Option<SessionStore>,
        logger: Option<Logger>,
    ) -> Result<Self, String> {
        let (action_tx, action_rx) = unbounded::<BackendAction>();
        let (event_tx, event_rx) = unbounded::<GuiEvent>();

        let backend = thread::Builder::new()
            .name("chat-backend".into())
            .spawn(move || run_backend(store, action_rx, event_tx))
            .map_err(|e| format!("Failed to start backend thread: {}", e))?;

        Ok(Self {
            state: ChatState::new(),
            action_tx,
            event_rx,
            session,
            logger,
            backend: Some(backend),
        })
    }

    pub(crate) fn send(&self, action: BackendAction) {
        if self.action_tx.send(action).is_err() {
            tracing::error!("backend thread is not running");
        }
    }

    /// Pick up a user saved by an earlier run. Returns true if one was found.
    pub fn restore_session(&mut self) -> bool {
        let Some(user) = self.session.as_ref().and_then(|s| s.load()) else {
            return false;
        };
        tracing::info!("restored session for {}", user.username);
        self.state.user = Some(user);
        self.send(BackendAction::SignIn);
        self.fetch_rooms();
        true
    }

    /// Log in with just a username. Returns false (with a toast) if invalid.
    pub fn login(&mut self, username: &str) -> bool {
        if let Err(e) = validate_username(username) {
            self.state.push_status(e);
            return false;
        }

        let user = AuthUser {
            username: username.to_string(),
            id: generate_user_id(Utc::now()),
        };
        if let Some(session) = &self.session {
            if let Err(e) = session.save(&user) {
                tracing::warn!("{}", e);
            }
        }
        tracing::info!("logged in as {} ({})", user.username, user.id);

        self.state.user = Some(user);
        self.state.announce_sign_in = true;
        self.send(BackendAction::SignIn);
        self.fetch_rooms();
        true
    }

    pub fn logout(&mut self) {
        self.state.reset();
        if let Some(session) = &self.session {
            if let Err(e) = session.clear() {
                tracing::warn!("{}", e);
            }
        }
        self.send(BackendAction::SignOut);
    }

    pub fn fetch_rooms(&mut self) {
        self.state.is_loading = true;
        self.send(BackendAction::FetchRooms);
    }

    /// Ask the backend for a new room. Returns false (with a toast) when the
    /// request is rejected locally.
    pub fn create_room(&mut self, name: &str) -> bool {
        let Some(created_by) = self.state.user.as_ref().map(|u| u.id.clone()) else {
            self.state.push_status("You must be logged in to create a room");
            return false;
        };
        if let Err(e) = validate_room_name(name) {
            self.state.push_status(e);
            return false;
        }
        if room_name_taken(&self.state.rooms, name) {
            self.state.push_status("A room with this name already exists");
            return false;
        }

        self.state.is_loading = true;
        self.send(BackendAction::CreateRoom {
            name: name.to_string(),
            created_by,
        });
        true
    }

    /// Switch to a known room. Unknown ids are ignored.
    pub fn join_room(&mut self, room_id: &str) {
        let Some(room) = self.state.room_by_id(room_id).cloned() else {
            return;
        };
        tracing::debug!("joining room {}", room.name);
        self.state.current_room = Some(room);
        self.state.is_loading = true;
        self.state.buffer.clear();
        self.send(BackendAction::JoinRoom {
            room_id: room_id.to_string(),
        });
    }

    /// Post to the current room. Blank messages are dropped.
    pub fn send_message(&mut self, content: &str) {
        let target = self
            .state
            .user
            .as_ref()
            .zip(self.state.current_room.as_ref())
            .map(|(u, r)| (u.id.clone(), r.id.clone()));
        let Some((user_id, room_id)) = target else {
            self.state
                .push_status("You must be logged in and join a room first");
            return;
        };
        if is_blank_message(content) {
            return;
        }
        self.send(BackendAction::SendMessage {
            room_id,
            user_id,
            content: content.to_string(),
        });
    }

    /// Handle a line from the input bar: a known slash command or a message.
    pub fn submit_input(&mut self, input: &str) {
        match parse_command(input) {
            Some(command) => self.run_command(command),
            None => self.send_message(input),
        }
    }

    fn run_command(&mut self, command: Command) {
        match command {
            Command::Join(name) => match self.state.room_by_name(&name).map(|r| r.id.clone()) {
                Some(room_id) => self.join_room(&room_id),
                None => self.state.push_status(format!("No room named \"{}\"", name)),
            },
            Command::Create(name) => {
                self.create_room(&name);
            }
            Command::Rooms => {
                if self.state.rooms.is_empty() {
                    self.state.push_status("No rooms yet");
                } else {
                    let names: Vec<&str> =
                        self.state.rooms.iter().map(|r| r.name.as_str()).collect();
                    let line = format!("Rooms: {}", names.join(", "));
                    self.state.push_status(line);
                }
            }
            Command::Logout => self.logout(),
            Command::Help => self.state.push_status(HELP_TEXT),
            Command::Usage(usage) => self.state.push_status(usage),
        }
    }

    /// Stop the backend thread and wait for it.
    pub fn shutdown(&mut self) {
        let _ = self.action_tx.send(BackendAction::Shutdown);
        if let Some(handle) = self.backend.take() {
            if handle.join().is_err() {
                tracing::error!("backend thread panicked");
            }
        }
    }
}

impl Drop for ChatClient {
    fn drop(&mut self) {
        self.shutdown();
    }
}
