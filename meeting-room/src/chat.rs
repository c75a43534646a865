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

//! Meeting chat channel binding.

use std::sync::Arc;

use crate::events::{RoomEvent, RoomEventBus};
use crate::providers::{ChannelOptions, ChatClient};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindOutcome {
    Bound,
    /// No connected chat user or no meeting id yet.
    Skipped,
    /// The provider rejected the channel. Logged, not retried.
    Failed,
}

/// Ensures the meeting's chat channel exists and the current user is a member.
///
/// Explicit membership is what grants the channel role in the provider's
/// permission model, so the user is listed as a member even though creating
/// the channel would also watch it.
#[derive(Clone)]
pub struct ChatBinder {
    channel_kind: String,
    events: RoomEventBus,
}

impl ChatBinder {
    pub fn new(channel_kind: impl Into<String>, events: RoomEventBus) -> Self {
        Self {
            channel_kind: channel_kind.into(),
            events,
        }
    }

    pub fn channel_kind(&self) -> &str {
        &self.channel_kind
    }

    pub fn channel_name(meeting_id: &str) -> String {
        format!("Meeting Chat {meeting_id}")
    }

    /// Create-or-fetch the channel for `meeting_id`.
    ///
    /// Safe to call repeatedly for the same meeting: the provider's
    /// create-or-fetch semantics keep a single channel.
    pub async fn bind(&self, client: &Arc<dyn ChatClient>, meeting_id: &str) -> BindOutcome {
        if meeting_id.is_empty() {
            return BindOutcome::Skipped;
        }
        let Some(user_id) = client.user_id() else {
            log::debug!("Chat user not connected yet, not binding channel for {meeting_id}");
            return BindOutcome::Skipped;
        };

        let channel = client.channel(
            &self.channel_kind,
            meeting_id,
            ChannelOptions {
                name: Some(Self::channel_name(meeting_id)),
                members: vec![user_id],
            },
        );

        match channel.create().await {
            Ok(()) => {
                log::info!("Chat channel {}:{} ready", self.channel_kind, meeting_id);
                self.events.emit(RoomEvent::ChatBound {
                    meeting_id: meeting_id.to_string(),
                });
                BindOutcome::Bound
            }
            Err(e) => {
                log::error!("Error watching or creating channel {meeting_id}: {e}");
                BindOutcome::Failed
            }
        }
    }
}
