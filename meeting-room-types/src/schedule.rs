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

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Schedule fields of a call, as reported by the call provider.
///
/// Both fields are optional: ad-hoc calls have no start time and a call that
/// is still running has no end time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CallSchedule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
}

impl CallSchedule {
    pub fn new(starts_at: Option<DateTime<Utc>>, ended_at: Option<DateTime<Utc>>) -> Self {
        Self {
            starts_at,
            ended_at,
        }
    }

    /// The start time when it is strictly after `now`.
    pub fn pending_start(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.starts_at.filter(|starts_at| *starts_at > now)
    }

    pub fn has_ended(&self) -> bool {
        self.ended_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn start_equal_to_now_is_not_pending() {
        let now = Utc::now();
        let schedule = CallSchedule::new(Some(now), None);
        assert_eq!(schedule.pending_start(now), None);
        assert_eq!(
            schedule.pending_start(now - Duration::seconds(1)),
            Some(now)
        );
    }

    #[test]
    fn missing_fields_deserialize_as_none() {
        let schedule: CallSchedule = serde_json::from_str("{}").unwrap();
        assert_eq!(schedule, CallSchedule::default());
        assert!(!schedule.has_ended());
    }
}
