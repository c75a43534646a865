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

//! Room configuration: chat channel kind, home path, schedule display and the
//! whiteboard provisioning command.
//!
//! Loaded from a YAML file named by `ROOM_CONFIG_PATH`, otherwise from
//! `ROOM_*` environment variables over the defaults below.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fs;

use crate::error::RoomError;

pub const DEFAULT_CHANNEL_KIND: &str = "messaging";
pub const DEFAULT_HOME_PATH: &str = "/";
/// India Standard Time, +05:30.
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 330;
pub const DEFAULT_TIME_FORMAT: &str = "%d/%m/%Y, %-I:%M:%S %P";
pub const DEFAULT_ENDED_MESSAGE: &str = "The call has been ended by the host";
pub const DEFAULT_ENDED_ICON_URL: &str = "/icons/call-ended.svg";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct RoomConfig {
    /// Chat channel kind used for meeting channels.
    pub channel_kind: String,
    /// Where the user lands after leaving the room.
    pub home_path: String,
    pub schedule: ScheduleDisplay,
    pub ended_message: String,
    pub ended_icon_url: String,
    /// External whiteboard provisioning script. `None` disables the process launcher.
    pub whiteboard: Option<WhiteboardCommand>,
}

/// How a scheduled start time is shown to the viewer.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ScheduleDisplay {
    pub utc_offset_minutes: i32,
    /// `chrono` strftime pattern.
    pub time_format: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct WhiteboardCommand {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            channel_kind: DEFAULT_CHANNEL_KIND.to_string(),
            home_path: DEFAULT_HOME_PATH.to_string(),
            schedule: ScheduleDisplay::default(),
            ended_message: DEFAULT_ENDED_MESSAGE.to_string(),
            ended_icon_url: DEFAULT_ENDED_ICON_URL.to_string(),
            whiteboard: None,
        }
    }
}

impl Default for ScheduleDisplay {
    fn default() -> Self {
        Self {
            utc_offset_minutes: DEFAULT_UTC_OFFSET_MINUTES,
            time_format: DEFAULT_TIME_FORMAT.to_string(),
        }
    }
}

impl ScheduleDisplay {
    pub fn offset(&self) -> Result<FixedOffset, RoomError> {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).ok_or_else(|| {
            RoomError::Config(format!(
                "UTC offset of {} minutes is out of range",
                self.utc_offset_minutes
            ))
        })
    }

    /// Render `at` in the configured offset and format.
    ///
    /// Falls back to UTC when the offset is out of range.
    pub fn format(&self, at: DateTime<Utc>) -> String {
        match self.offset() {
            Ok(offset) => at.with_timezone(&offset).format(&self.time_format).to_string(),
            Err(e) => {
                log::warn!("{e}, showing UTC");
                at.format(&self.time_format).to_string()
            }
        }
    }
}

impl RoomConfig {
    pub fn from_file(path: &str) -> Result<Self, RoomError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, RoomError> {
        let config: RoomConfig = serde_yaml::from_str(content)?;
        config.schedule.offset()?;
        Ok(config)
    }

    pub fn from_env_or_default() -> Result<Self, RoomError> {
        if let Ok(config_path) = std::env::var("ROOM_CONFIG_PATH") {
            return Self::from_file(&config_path);
        }

        let mut config = RoomConfig::default();
        if let Ok(kind) = std::env::var("ROOM_CHANNEL_KIND") {
            config.channel_kind = kind;
        }
        if let Ok(home) = std::env::var("ROOM_HOME_PATH") {
            config.home_path = home;
        }
        if let Ok(offset) = std::env::var("ROOM_UTC_OFFSET_MINUTES") {
            config.schedule.utc_offset_minutes = offset.parse::<i32>().map_err(|e| {
                RoomError::Config(format!("Invalid ROOM_UTC_OFFSET_MINUTES '{offset}': {e}"))
            })?;
        }
        if let Ok(format) = std::env::var("ROOM_TIME_FORMAT") {
            config.schedule.time_format = format;
        }
        if let Ok(command) = std::env::var("ROOM_WHITEBOARD_COMMAND") {
            config.whiteboard = WhiteboardCommand::parse(&command);
        }

        config.schedule.offset()?;
        Ok(config)
    }
}

impl WhiteboardCommand {
    /// Split a whitespace separated command line into program and arguments.
    pub fn parse(command: &str) -> Option<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }
}
