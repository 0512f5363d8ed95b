//! Backend worker: owns the store and runs every store call off the UI thread.
//!
//! The worker waits on UI actions and on the followed room's feed at the
//! same time, so new messages are forwarded as soon as they are published.

use crossbeam_channel::{never, select, Receiver, Sender};

use crate::protocol::{BackendAction, GuiEvent};
use crate::store::{ChatStore, Subscription};

pub fn run_backend<S: ChatStore>(
    store: S,
    action_rx: Receiver<BackendAction>,
    event_tx: Sender<GuiEvent>,
) {
    let mut subscription: Option<Subscription> = None;

    loop {
        let feed = subscription
            .as_ref()
            .map(|s| s.rx.clone())
            .unwrap_or_else(never);

        select! {
            recv(action_rx) -> action => {
                // The UI side hung up
                let Ok(action) = action else { break };
                if !handle_action(&store, action, &mut subscription, &event_tx) {
                    break;
                }
            }
            recv(feed) -> row => match row {
                Ok(row) => {
                    let _ = event_tx.send(GuiEvent::MessageReceived(row));
                }
                Err(_) => {
                    tracing::warn!("message feed closed");
                    if let Some(sub) = subscription.take() {
                        store.unsubscribe(sub);
                    }
                }
            }
        }
    }

    if let Some(sub) = subscription.take() {
        store.unsubscribe(sub);
    }
    tracing::debug!("backend thread stopped");
}

/// Returns false when the worker should stop.
fn handle_action<S: ChatStore>(
    store: &S,
    action: BackendAction,
    subscription: &mut Option<Subscription>,
    event_tx: &Sender<GuiEvent>,
) -> bool {
    match action {
        BackendAction::SignIn => match store.sign_in_anonymously() {
            Ok(_) => {
                tracing::info!("anonymous session established");
                let _ = event_tx.send(GuiEvent::SignedIn);
            }
            Err(e) => {
                tracing::error!("anonymous sign-in failed: {}", e);
                let _ = event_tx.send(GuiEvent::SignInFailed(e.to_string()));
            }
        },

        BackendAction::SignOut => {
            if let Some(sub) = subscription.take() {
                store.unsubscribe(sub);
            }
            if let Err(e) = store.sign_out() {
                tracing::warn!("sign-out failed: {}", e);
            }
            let _ = event_tx.send(GuiEvent::SignedOut);
        }

        BackendAction::FetchRooms => match store.list_rooms() {
            Ok(rooms) => {
                tracing::debug!("loaded {} rooms", rooms.len());
                let _ = event_tx.send(GuiEvent::RoomsLoaded(rooms));
            }
            Err(e) => {
                tracing::error!("error fetching rooms: {}", e);
                let _ = event_tx.send(GuiEvent::RoomsFailed(e.to_string()));
            }
        },

        BackendAction::CreateRoom { name, created_by } => {
            match store.create_room(&name, &created_by) {
                Ok(room) => {
                    tracing::info!("created room {} ({})", room.name, room.id);
                    let _ = event_tx.send(GuiEvent::RoomCreated(room));
                }
                Err(e) => {
                    tracing::error!("room creation error: {}", e);
                    let _ = event_tx.send(GuiEvent::RoomCreateFailed(e.to_string()));
                }
            }
        }

        BackendAction::JoinRoom { room_id } => {
            if let Some(sub) = subscription.take() {
                store.unsubscribe(sub);
            }
            // Subscribe before fetching so nothing posted in between is lost;
            // the client drops rows it already has from the history.
            let joined = store.subscribe(&room_id).and_then(|sub| {
                match store.fetch_messages(&room_id) {
                    Ok(messages) => Ok((sub, messages)),
                    Err(e) => {
                        store.unsubscribe(sub);
                        Err(e)
                    }
                }
            });
            match joined {
                Ok((sub, messages)) => {
                    tracing::debug!("joined room {} with {} messages", room_id, messages.len());
                    *subscription = Some(sub);
                    let _ = event_tx.send(GuiEvent::History { room_id, messages });
                }
                Err(e) => {
                    tracing::error!("error joining room {}: {}", room_id, e);
                    let _ = event_tx.send(GuiEvent::JoinFailed {
                        room_id,
                        error: e.to_string(),
                    });
                }
            }
        }

        BackendAction::SendMessage {
            room_id,
            user_id,
            content,
        } => {
            if let Err(e) = store.insert_message(&room_id, &user_id, &content) {
                tracing::error!("message sending error: {}", e);
                let _ = event_tx.send(GuiEvent::SendFailed(e.to_string()));
            }
        }

        BackendAction::Shutdown => return false,
    }
    true
}
