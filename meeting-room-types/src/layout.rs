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

//! Layout modes and side panels of the in-call view.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How participant video is arranged in the room.
///
/// The option set is closed, so selecting a layout never needs validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutMode {
    /// Paginated grid, every participant gets an equal tile.
    Grid,
    /// Active speaker on the left, participants bar on the right.
    #[default]
    SpeakerLeft,
    /// Active speaker on the right, participants bar on the left.
    SpeakerRight,
}

/// Where the participants bar sits next to the active speaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipantsBar {
    Left,
    Right,
}

impl LayoutMode {
    /// Every layout, in the order the layout menu lists them.
    pub const ALL: [LayoutMode; 3] = [
        LayoutMode::Grid,
        LayoutMode::SpeakerLeft,
        LayoutMode::SpeakerRight,
    ];

    /// Menu label for the layout.
    pub fn label(self) -> &'static str {
        match self {
            LayoutMode::Grid => "Grid",
            LayoutMode::SpeakerLeft => "Speaker-Left",
            LayoutMode::SpeakerRight => "Speaker-Right",
        }
    }

    /// Position of the participants bar, `None` for the grid.
    pub fn participants_bar(self) -> Option<ParticipantsBar> {
        match self {
            LayoutMode::Grid => None,
            LayoutMode::SpeakerLeft => Some(ParticipantsBar::Right),
            LayoutMode::SpeakerRight => Some(ParticipantsBar::Left),
        }
    }
}

impl std::fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LayoutMode {
    type Err = String;

    /// Accepts menu labels in any case, e.g. `speaker-left` or `Grid`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LayoutMode::ALL
            .into_iter()
            .find(|mode| mode.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown layout '{s}'"))
    }
}

/// Side panels that can be opened next to the call layout.
///
/// Panels are independent of each other and of the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Panel {
    Participants,
    Chat,
}
