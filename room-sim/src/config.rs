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
 *
 * Unless you explicitly state otherwise, any contribution intentionally
 * submitted for inclusion in the work by you, as defined in the Apache-2.0
 * license, shall be dual licensed as above, without any additional terms or
 * conditions.
 */

use clap::Parser;
use meeting_room::meeting_room_types::LayoutMode;
use meeting_room::{RoomConfig, WhiteboardCommand};

#[derive(Parser, Debug, Clone)]
#[clap(name = "room-sim", about = "Walk through a meeting room session with simulated providers")]
pub struct SimOptions {
    /// Route of the meeting page, e.g. `/meeting/standup?personal=true`.
    #[clap(long = "route", env = "SIM_ROUTE", default_value = "/meeting/demo-room")]
    pub route: String,

    #[clap(long = "user-id", env = "SIM_USER_ID", default_value = "sim-user")]
    pub user_id: String,

    #[clap(long = "user-name", env = "SIM_USER_NAME", default_value = "Sim User")]
    pub user_name: String,

    /// YAML room configuration. Falls back to `ROOM_*` environment variables.
    #[clap(long = "config")]
    pub config: Option<String>,

    /// Join with mic and camera off.
    #[clap(long = "mic-cam-off")]
    pub mic_cam_off: bool,

    /// Simulate the browser denying camera access.
    #[clap(long = "deny-camera")]
    pub deny_camera: bool,

    /// Schedule the call to start this many seconds from now.
    #[clap(long = "starts-in-secs")]
    pub starts_in_secs: Option<i64>,

    /// Simulate a call the host already ended.
    #[clap(long = "ended")]
    pub ended: bool,

    /// Layout to switch to once in the call.
    #[clap(long = "layout", default_value = "grid", value_parser = parse_layout)]
    pub layout: LayoutMode,

    /// External whiteboard script; overrides the configured command.
    #[clap(long = "whiteboard-command", env = "SIM_WHITEBOARD_COMMAND")]
    pub whiteboard_command: Option<String>,

    /// Skip the whiteboard launch.
    #[clap(long = "no-whiteboard")]
    pub no_whiteboard: bool,
}

fn parse_layout(s: &str) -> Result<LayoutMode, String> {
    s.parse::<LayoutMode>()
}

impl SimOptions {
    pub fn room_config(&self) -> anyhow::Result<RoomConfig> {
        let mut config = match &self.config {
            Some(path) => RoomConfig::from_file(path)?,
            None => RoomConfig::from_env_or_default()?,
        };
        if let Some(command) = &self.whiteboard_command {
            config.whiteboard = WhiteboardCommand::parse(command);
        }
        Ok(config)
    }

    /// Path and query of the configured route.
    pub fn route_parts(&self) -> (&str, Option<&str>) {
        match self.route.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (self.route.as_str(), None),
        }
    }
}
