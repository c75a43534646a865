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

//! Meeting room session coordinator.
//!
//! Decides which screen a meeting page is on (admission, device setup, in
//! call) and drives the side effects behind it: enabling devices, binding the
//! meeting chat channel, sharing whiteboard sessions and leaving the room.
//! The call provider, chat provider, navigation and whiteboard provisioning
//! are injected as trait objects, so the coordinator runs under any UI shell
//! or none at all.
//!
//! # Example
//!
//! ```no_run
//! # use std::sync::Arc;
//! use meeting_room::{MeetingSession, RoomCollaborators, RoomConfig, SessionScreen};
//! use meeting_room::meeting_room_types::RoomRoute;
//!
//! # async fn example(
//! #     call: Arc<dyn meeting_room::CallHandle>,
//! #     chat: Arc<dyn meeting_room::ChatClient>,
//! #     collaborators: RoomCollaborators,
//! # ) -> Result<(), meeting_room::RoomError> {
//! let route = RoomRoute::parse("/meeting/standup", Some("personal=true")).unwrap();
//! let session = MeetingSession::new(
//!     Some(call),
//!     Some(chat),
//!     collaborators,
//!     route,
//!     RoomConfig::from_env_or_default()?,
//! )?;
//!
//! session.mount().await;
//! if let SessionScreen::Setup { .. } = session.screen(chrono::Utc::now()) {
//!     session.join(chrono::Utc::now()).await;
//! }
//! # Ok(())
//! # }
//! ```

pub mod admission;
pub mod chat;
pub mod config;
pub mod devices;
pub mod error;
pub mod events;
pub mod launcher;
pub mod providers;
pub mod room;
pub mod session;
pub mod whiteboard;

pub use admission::{classify, Admission};
pub use chat::{BindOutcome, ChatBinder};
pub use config::{RoomConfig, ScheduleDisplay, WhiteboardCommand};
pub use devices::{DeviceSetup, PreviewState};
pub use error::{ProviderError, RoomError};
pub use events::{RoomEvent, RoomEventBus};
pub use launcher::CommandProvisioner;
pub use meeting_room_types;
pub use providers::{
    CallHandle, ChannelOptions, ChatChannel, ChatClient, MediaDevice, Navigator,
    SessionProvisioner, UrlOpener,
};
pub use room::{MeetingRoom, RoomCollaborators, RoomControls, RoomScreen};
pub use session::{MeetingSession, SessionScreen};
pub use whiteboard::{LaunchOutcome, WhiteboardLauncher};
