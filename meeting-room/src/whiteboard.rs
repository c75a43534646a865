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

//! On-demand whiteboard sessions shared through the meeting chat.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::ProviderError;
use crate::events::{RoomEvent, RoomEventBus};
use crate::providers::{ChannelOptions, ChatClient, SessionProvisioner, UrlOpener};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// A session was provisioned, posted and opened.
    Shared(String),
    /// Another launch is in flight or the chat user has no display name.
    Skipped,
    /// Provisioning or posting failed. Logged; the user may retry.
    Failed,
}

/// Launches at most one whiteboard provisioning at a time per room.
pub struct WhiteboardLauncher {
    provisioner: Arc<dyn SessionProvisioner>,
    opener: Arc<dyn UrlOpener>,
    channel_kind: String,
    in_flight: AtomicBool,
    events: RoomEventBus,
}

/// Releases the in-flight lock on every exit path, including a dropped future.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl WhiteboardLauncher {
    pub fn new(
        provisioner: Arc<dyn SessionProvisioner>,
        opener: Arc<dyn UrlOpener>,
        channel_kind: impl Into<String>,
        events: RoomEventBus,
    ) -> Self {
        Self {
            provisioner,
            opener,
            channel_kind: channel_kind.into(),
            in_flight: AtomicBool::new(false),
            events,
        }
    }

    /// True while a session is being provisioned; the launch control is disabled.
    pub fn is_launching(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn message_text(url: &str) -> String {
        format!("Join Whiteboard session: {url}")
    }

    /// Provision a fresh session, post it to the meeting chat and open it.
    ///
    /// Sessions are never reused across launches.
    pub async fn launch(&self, chat: &Arc<dyn ChatClient>, meeting_id: &str) -> LaunchOutcome {
        let Some(display_name) = chat.user_name() else {
            return LaunchOutcome::Skipped;
        };
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return LaunchOutcome::Skipped;
        }
        let _guard = InFlightGuard(&self.in_flight);

        match self.share(chat, meeting_id, &display_name).await {
            Ok(url) => {
                self.opener.open(&url);
                self.events.emit(RoomEvent::WhiteboardShared { url: url.clone() });
                LaunchOutcome::Shared(url)
            }
            Err(e) => {
                log::error!("Failed to create whiteboard session: {e}");
                LaunchOutcome::Failed
            }
        }
    }

    async fn share(
        &self,
        chat: &Arc<dyn ChatClient>,
        meeting_id: &str,
        display_name: &str,
    ) -> Result<String, ProviderError> {
        let url = self.provisioner.provision(display_name).await?;
        // No ordering against the chat binder's create(); the provider is
        // expected to serialize create-or-fetch and the post.
        let channel = chat.channel(&self.channel_kind, meeting_id, ChannelOptions::default());
        channel.send_message(&Self::message_text(&url)).await?;
        Ok(url)
    }
}
