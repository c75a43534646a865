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

//! Route and query context of a meeting page.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::error::RouteError;

const MEETING_SEGMENT: &str = "meeting";
const PERSONAL_PARAM: &str = "personal";

/// Identity of the room a user entered, read once when the room mounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRoute {
    /// Opaque meeting identifier taken from the `/meeting/{id}` path.
    pub meeting_id: String,

    /// Host's persistent room. Suppresses the end-call control.
    #[serde(default)]
    pub personal: bool,
}

impl RoomRoute {
    pub fn new(meeting_id: impl Into<String>, personal: bool) -> Self {
        Self {
            meeting_id: meeting_id.into(),
            personal,
        }
    }

    /// Parse a path like `/meeting/abc123` and an optional query string like
    /// `personal=true`.
    ///
    /// `personal` is set whenever the parameter carries a non-empty value,
    /// so `?personal=1` and `?personal=true` both mark a personal room.
    pub fn parse(path: &str, query: Option<&str>) -> Result<Self, RouteError> {
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let meeting_id = loop {
            match segments.next() {
                Some(MEETING_SEGMENT) => break segments.next(),
                Some(_) => continue,
                None => return Err(RouteError::MissingMeetingId(path.to_string())),
            }
        };
        let meeting_id = match meeting_id {
            Some(id) if !id.trim().is_empty() => id.to_string(),
            _ => return Err(RouteError::EmptyMeetingId),
        };

        let personal = query
            .map(|q| q.trim_start_matches('?'))
            .map(|q| {
                form_urlencoded::parse(q.as_bytes())
                    .any(|(key, value)| key == PERSONAL_PARAM && !value.is_empty())
            })
            .unwrap_or(false);

        Ok(Self {
            meeting_id,
            personal,
        })
    }

    /// Path of this room, including the personal flag when set.
    pub fn to_path(&self) -> String {
        if self.personal {
            format!("/{MEETING_SEGMENT}/{}?{PERSONAL_PARAM}=true", self.meeting_id)
        } else {
            format!("/{MEETING_SEGMENT}/{}", self.meeting_id)
        }
    }
}
