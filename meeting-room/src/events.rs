/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! Room events and the per-room event bus.
//!
//! The coordinator emits a [`RoomEvent`] for every state change it owns, so a
//! shell can re-render and a simulator can trace the session without polling.
//!
//! ```ignore
//! let mut rx = room.subscribe();
//! tokio::spawn(async move {
//!     while let Ok(event) = rx.recv().await {
//!         if let RoomEvent::WhiteboardShared { url } = event {
//!             println!("whiteboard at {url}");
//!         }
//!     }
//! });
//! ```

use async_broadcast::{broadcast, InactiveReceiver, Receiver, Sender};
use meeting_room_types::{LayoutMode, Panel};

/// Capacity of a room's event channel. Oldest events are dropped on overflow.
const EVENT_BUS_CAPACITY: usize = 64;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoomEvent {
    /// A device initialization attempt finished, successfully or not.
    DevicesReady { attempt: u32, mic_cam_disabled: bool },

    LayoutChanged(LayoutMode),

    PanelToggled { panel: Panel, open: bool },

    /// The meeting chat channel was created or fetched and joined.
    ChatBound { meeting_id: String },

    /// A whiteboard session URL was posted to the meeting chat.
    WhiteboardShared { url: String },

    /// The user left the room.
    Left,

    /// The host ended the call for everyone.
    CallEnded,
}

/// Broadcast channel scoped to one room instance.
#[derive(Clone)]
pub struct RoomEventBus {
    sender: Sender<RoomEvent>,
    // Keeps the channel open while nobody is subscribed.
    _keepalive: InactiveReceiver<RoomEvent>,
}

impl RoomEventBus {
    pub fn new() -> Self {
        let (mut sender, receiver) = broadcast(EVENT_BUS_CAPACITY);
        sender.set_overflow(true);
        Self {
            sender,
            _keepalive: receiver.deactivate(),
        }
    }

    /// Receives every event emitted after this call.
    pub fn subscribe(&self) -> Receiver<RoomEvent> {
        self.sender.new_receiver()
    }

    /// Non-blocking; events are dropped when nobody listens.
    pub fn emit(&self, event: RoomEvent) {
        if self.sender.receiver_count() == 0 {
            return;
        }
        if let Err(e) = self.sender.try_broadcast(event) {
            log::debug!("room event not delivered: {e}");
        }
    }
}

impl Default for RoomEventBus {
    fn default() -> Self {
        Self::new()
    }
}
