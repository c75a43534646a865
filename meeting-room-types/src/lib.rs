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

//! Shared data model for the meeting room session coordinator.
//!
//! This crate defines the state vocabulary shared between the room
//! coordinator and whatever shell renders it (web, desktop, simulator).
//! It is intentionally framework-agnostic: no UI toolkit, no provider SDK types.

pub mod calling_state;
pub mod error;
pub mod layout;
pub mod route;
pub mod schedule;

pub use calling_state::CallingState;
pub use error::RouteError;
pub use layout::{LayoutMode, Panel, ParticipantsBar};
pub use route::RoomRoute;
pub use schedule::CallSchedule;
