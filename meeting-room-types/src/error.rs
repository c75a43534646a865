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

//! Errors raised while reading room data from the shell.

/// Failure to extract a [`RoomRoute`](crate::RoomRoute) from a path or query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// The path does not contain a `/meeting/{id}` segment.
    MissingMeetingId(String),

    /// The meeting identifier segment is present but empty.
    EmptyMeetingId,
}

impl std::fmt::Display for RouteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteError::MissingMeetingId(path) => {
                write!(f, "No meeting id found in route '{path}'")
            }
            RouteError::EmptyMeetingId => write!(f, "Meeting id must not be empty"),
        }
    }
}

impl std::error::Error for RouteError {}
