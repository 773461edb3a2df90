// SPDX-FileCopyrightText: 2026 Mariana Rey <sala@mrey.dev>
//
// SPDX-License-Identifier: Apache-2.0

//! Time-of-day utilities and the working-hours clamp.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer};

/// Parses a wire time-of-day string, padding `HH:MM` to `HH:MM:SS`.
///
/// Returns `None` on unparseable input; callers must check before use.
pub fn normalize_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}

/// Combines a date with a time of day into a concrete instant.
pub fn at(date: NaiveDate, time: NaiveTime) -> NaiveDateTime {
    NaiveDateTime::new(date, time)
}

/// The daily range selections are clamped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct WorkingHours {
    /// Earliest selectable time of day.
    #[serde(deserialize_with = "de_time")]
    pub start: NaiveTime,

    /// Latest selectable time of day.
    #[serde(deserialize_with = "de_time")]
    pub end: NaiveTime,
}

impl Default for WorkingHours {
    /// Default campus hours: 06:00 to 20:00.
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(6, 0, 0).expect("06:00:00 must exist in NaiveTime"),
            end: NaiveTime::from_hms_opt(20, 0, 0).expect("20:00:00 must exist in NaiveTime"),
        }
    }
}

impl WorkingHours {
    /// Clamps a time of day into the working range.
    pub fn clamp_time(&self, time: NaiveTime) -> NaiveTime {
        time.clamp(self.start, self.end)
    }

    /// Clamps an instant into the working range, preserving its date.
    ///
    /// Values below the floor snap to the floor, values above the ceiling
    /// snap to the ceiling.
    pub fn clamp(&self, dt: NaiveDateTime) -> NaiveDateTime {
        at(dt.date(), self.clamp_time(dt.time()))
    }

    /// Whether a time of day lies inside the working range.
    pub fn contains(&self, time: NaiveTime) -> bool {
        self.start <= time && time <= self.end
    }
}

fn de_time<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    normalize_time(&s)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid time of day: {s:?}")))
}
