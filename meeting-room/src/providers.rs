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

//! Collaborator interfaces consumed by the room coordinator.
//!
//! The call handle and chat client are owned by the surrounding provider
//! context. The coordinator only holds shared references to them and never
//! constructs or tears them down.

use async_trait::async_trait;
use meeting_room_types::{CallSchedule, CallingState};
use std::sync::Arc;

use crate::error::ProviderError;

/// A local capture device (camera or microphone) exposed by the call.
#[async_trait]
pub trait MediaDevice: Send + Sync {
    async fn enable(&self) -> Result<(), ProviderError>;

    async fn disable(&self) -> Result<(), ProviderError>;
}

/// Handle to the call the user is setting up or sitting in.
#[async_trait]
pub trait CallHandle: Send + Sync {
    /// Calling state as currently reported by the provider.
    fn calling_state(&self) -> CallingState;

    /// Schedule fields as currently reported by the provider.
    fn schedule(&self) -> CallSchedule;

    /// `None` when the provider exposes no camera control.
    fn camera(&self) -> Option<Arc<dyn MediaDevice>>;

    /// `None` when the provider exposes no microphone control.
    fn microphone(&self) -> Option<Arc<dyn MediaDevice>>;

    /// True when the local user created the call and may end it for everyone.
    fn is_owned_by_local_user(&self) -> bool;

    async fn join(&self) -> Result<(), ProviderError>;

    async fn leave(&self) -> Result<(), ProviderError>;

    /// Ends the call for every participant.
    async fn end_call(&self) -> Result<(), ProviderError>;
}

/// Options used when a channel handle is first requested.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelOptions {
    pub name: Option<String>,
    pub members: Vec<String>,
}

/// An addressable chat message stream.
#[async_trait]
pub trait ChatChannel: Send + Sync {
    fn kind(&self) -> &str;

    fn id(&self) -> &str;

    /// Create-or-fetch the channel and join it. Idempotent on the provider side.
    async fn create(&self) -> Result<(), ProviderError>;

    async fn send_message(&self, text: &str) -> Result<(), ProviderError>;
}

/// Connected chat client for the current user.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Identifier of the connected user, `None` until the user is connected.
    fn user_id(&self) -> Option<String>;

    /// Display name of the connected user.
    fn user_name(&self) -> Option<String>;

    /// Channel handle for `kind` and `id`. Does not contact the provider.
    fn channel(&self, kind: &str, id: &str, options: ChannelOptions) -> Arc<dyn ChatChannel>;

    async fn disconnect_user(&self) -> Result<(), ProviderError>;
}

/// Provisions a fresh third-party whiteboard session.
#[async_trait]
pub trait SessionProvisioner: Send + Sync {
    /// Returns a shareable session URL keyed by `display_name`.
    async fn provision(&self, display_name: &str) -> Result<String, ProviderError>;
}

/// Application navigation.
pub trait Navigator: Send + Sync {
    fn navigate_to(&self, path: &str);
}

/// Opens a URL in a new browsing context (tab, window or external browser).
pub trait UrlOpener: Send + Sync {
    fn open(&self, url: &str);
}
