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

//! Call admission gate.
//!
//! Decides from the call's schedule whether the user may continue to device
//! setup. The gate holds no state: callers re-run [`classify`] on every
//! render so that a call starting while the user waits flips the gate
//! without any user action.

use chrono::{DateTime, Utc};
use meeting_room_types::CallSchedule;

use crate::config::RoomConfig;

/// Outcome of the admission gate. Exactly one applies at any time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// The scheduled start is still in the future. Device setup must not be shown.
    NotStarted {
        starts_at: DateTime<Utc>,
        message: String,
    },
    /// The host ended the call.
    Ended { message: String, icon_url: String },
    /// Continue to device setup.
    Joinable,
}

impl Admission {
    pub fn is_joinable(&self) -> bool {
        matches!(self, Admission::Joinable)
    }
}

/// Classify a call schedule at `now`.
///
/// Not-started is checked before ended, so a schedule that reports both
/// classifies as not started.
pub fn classify(schedule: &CallSchedule, now: DateTime<Utc>, config: &RoomConfig) -> Admission {
    if let Some(starts_at) = schedule.pending_start(now) {
        return Admission::NotStarted {
            starts_at,
            message: format!(
                "Your Meeting has not started yet. It is scheduled for {}",
                config.schedule.format(starts_at)
            ),
        };
    }

    if schedule.has_ended() {
        return Admission::Ended {
            message: config.ended_message.clone(),
            icon_url: config.ended_icon_url.clone(),
        };
    }

    Admission::Joinable
}
