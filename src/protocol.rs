use crate::store::{MessageRow, Room};

/// Actions sent from the UI to the Backend
#[derive(Debug, Clone, PartialEq)]
pub enum BackendAction {
    /// Open an anonymous backend session
    SignIn,
    /// Close the backend session and drop any room subscription
    SignOut,
    /// Load the room list
    FetchRooms,
    /// Create a room owned by `created_by`
    CreateRoom { name: String, created_by: String },
    /// Load a room's history and follow its new messages
    JoinRoom { room_id: String },
    /// Stop following the current room
    /// Post a message to a room
    SendMessage {
        room_id: String,
        user_id: String,
        content: String,
    },
    /// Stop the backend thread
    Shutdown,
}

/// Events sent from the Backend to the UI
#[derive(Debug, Clone, PartialEq)]
pub enum GuiEvent {
    SignedIn,
    SignInFailed(String),
    SignedOut,
    RoomsLoaded(Vec<Room>),
    RoomsFailed(String),
    RoomCreated(Room),
    RoomCreateFailed(String),
    /// Full history of a freshly joined room, oldest first
    History {
        room_id: String,
        messages: Vec<MessageRow>,
    },
    JoinFailed { room_id: String, error: String },
    /// A new message arrived on the followed room
    MessageReceived(MessageRow),
    SendFailed(String),
}
