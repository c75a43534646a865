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

//! Error types for the meeting room coordinator.

use thiserror::Error;

/// Hard failures that the surrounding shell has to handle.
///
/// Everything else (device, chat, whiteboard and leave failures) is logged
/// and contained by the component that produced it.
#[derive(Debug, Error)]
pub enum RoomError {
    /// Device setup or the room was created without a call handle.
    #[error("No active call: the meeting room must be created inside an active call context.")]
    NoActiveCall,

    /// The end-call control is not offered for this room.
    #[error("End call is not available: {0}")]
    EndCallUnavailable(&'static str),

    /// The room configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Failures reported by the call, chat or collaboration providers.
///
/// The message is carried verbatim so that logs show what the provider said.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// A camera or microphone request was rejected.
    #[error("{0}")]
    Device(String),

    /// The call provider rejected a join, leave or end request.
    #[error("{0}")]
    Call(String),

    /// The chat provider rejected a channel or session request.
    #[error("{0}")]
    Chat(String),

    /// The collaboration session could not be provisioned.
    #[error("Provisioning failed: {0}")]
    Provisioning(String),
}

impl From<serde_yaml::Error> for RoomError {
    fn from(e: serde_yaml::Error) -> Self {
        RoomError::Config(e.to_string())
    }
}

impl From<std::io::Error> for RoomError {
    fn from(e: std::io::Error) -> Self {
        RoomError::Config(e.to_string())
    }
}
