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

//! Meeting page flow: admission and device setup until the user joins, then
//! the room coordinator.

use chrono::{DateTime, Utc};
use meeting_room_types::RoomRoute;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::admission::{classify, Admission};
use crate::config::RoomConfig;
use crate::devices::{DeviceSetup, PreviewState};
use crate::error::RoomError;
use crate::events::{RoomEvent, RoomEventBus};
use crate::providers::{CallHandle, ChatClient};
use crate::room::{MeetingRoom, RoomCollaborators, RoomScreen};

/// What the meeting page shows. Exactly one variant applies at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionScreen {
    NotStarted {
        starts_at: DateTime<Utc>,
        message: String,
    },
    Ended {
        message: String,
        icon_url: String,
    },
    Setup {
        preview: PreviewState,
        mic_cam_disabled: bool,
    },
    Room(RoomScreen),
}

pub struct MeetingSession {
    call: Arc<dyn CallHandle>,
    config: RoomConfig,
    setup: DeviceSetup,
    room: MeetingRoom,
    setup_complete: AtomicBool,
    events: RoomEventBus,
}

impl MeetingSession {
    /// Fails with [`RoomError::NoActiveCall`] when no call handle is available.
    pub fn new(
        call: Option<Arc<dyn CallHandle>>,
        chat: Option<Arc<dyn ChatClient>>,
        collaborators: RoomCollaborators,
        route: RoomRoute,
        config: RoomConfig,
    ) -> Result<Self, RoomError> {
        let call = call.ok_or(RoomError::NoActiveCall)?;
        let events = RoomEventBus::new();
        let setup = DeviceSetup::new(Some(call.clone()), events.clone())?;
        let room = MeetingRoom::new(
            Some(call.clone()),
            chat,
            collaborators,
            route,
            &config,
            events.clone(),
        )?;

        Ok(Self {
            call,
            config,
            setup,
            room,
            setup_complete: AtomicBool::new(false),
            events,
        })
    }

    pub fn setup(&self) -> &DeviceSetup {
        &self.setup
    }

    pub fn room(&self) -> &MeetingRoom {
        &self.room
    }

    pub fn subscribe(&self) -> async_broadcast::Receiver<RoomEvent> {
        self.events.subscribe()
    }

    pub fn is_setup_complete(&self) -> bool {
        self.setup_complete.load(Ordering::Acquire)
    }

    /// Admission for the call's current schedule. Never cached.
    pub fn admission(&self, now: DateTime<Utc>) -> Admission {
        classify(&self.call.schedule(), now, &self.config)
    }

    pub fn screen(&self, now: DateTime<Utc>) -> SessionScreen {
        if self.is_setup_complete() {
            return SessionScreen::Room(self.room.screen());
        }
        match self.admission(now) {
            Admission::NotStarted { starts_at, message } => {
                SessionScreen::NotStarted { starts_at, message }
            }
            Admission::Ended { message, icon_url } => SessionScreen::Ended { message, icon_url },
            Admission::Joinable => SessionScreen::Setup {
                preview: self.setup.preview(),
                mic_cam_disabled: self.setup.mic_cam_disabled(),
            },
        }
    }

    /// Mount the setup screen: apply the initial device intent.
    pub async fn mount(&self) {
        self.setup.initialize().await;
    }

    /// Join the call and hand over to the room.
    ///
    /// The provider join runs in the background; the room shows its loading
    /// screen until the provider reports the call as joined. Returns `None`
    /// when the call is not joinable at `now` or setup already completed.
    pub async fn join(&self, now: DateTime<Utc>) -> Option<JoinHandle<()>> {
        if !self.admission(now).is_joinable() {
            return None;
        }
        if self
            .setup_complete
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return None;
        }

        let call = self.call.clone();
        let join = tokio::spawn(async move {
            if let Err(e) = call.join().await {
                log::error!("Failed to join call: {e}");
            }
        });

        self.room.sync().await;
        Some(join)
    }
}
