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

use serde::{Deserialize, Serialize};

/// Lifecycle phase of a call as reported by the call provider.
///
/// The coordinator only ever reads this value; the provider owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallingState {
    #[default]
    Idle,
    Joining,
    Joined,
    Reconnecting,
    Left,
}

impl CallingState {
    pub fn is_joined(self) -> bool {
        matches!(self, CallingState::Joined)
    }
}

impl std::fmt::Display for CallingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CallingState::Idle => "idle",
            CallingState::Joining => "joining",
            CallingState::Joined => "joined",
            CallingState::Reconnecting => "reconnecting",
            CallingState::Left => "left",
        };
        f.write_str(s)
    }
}
