// SPDX-FileCopyrightText: 2026 Mariana Rey <sala@mrey.dev>
//
// SPDX-License-Identifier: Apache-2.0

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// A declared window on a space's schedule.
///
/// `Availability` entries say when the space may be booked at all;
/// `Block` and `Class` entries exclude time from booking. The three are the
/// same shape on the wire and differ only in `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Backend identifier.
    pub id: u64,

    /// The space this entry belongs to.
    pub space: u64,

    /// Availability window, maintenance block or class occurrence.
    pub kind: EntryKind,

    /// When the entry applies.
    pub schedule: EntrySchedule,

    /// Free-form notes shown on the calendar.
    pub notes: Option<String>,
}

impl ScheduleEntry {
    /// Calendar label for this entry.
    pub fn title(&self) -> &str {
        match (&self.notes, self.kind) {
            (Some(notes), _) if !notes.is_empty() => notes,
            (_, EntryKind::Class) => "Clase",
            (_, EntryKind::Block) => "Bloqueo",
            (_, EntryKind::Availability) => "Disponible",
        }
    }
}

/// What a schedule entry means for booking.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// The space is nominally bookable during this window.
    #[default]
    Availability,

    /// Maintenance or administrative exclusion.
    Block,

    /// Recurring teaching-schedule exclusion.
    ///
    /// The legacy backend encodes this as a `"[CLASE] "` prefix on the notes
    /// field; the wire client resolves that convention into this variant once
    /// at the API boundary.
    Class,
}

impl EntryKind {
    /// Whether this entry excludes time from booking.
    pub fn is_exclusion(self) -> bool {
        !matches!(self, EntryKind::Availability)
    }
}

/// When a schedule entry applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "repeat", rename_all = "lowercase")]
pub enum EntrySchedule {
    /// Repeats every week on `weekday`, indefinitely.
    Weekly {
        /// Day of the week (wire index 0 = Monday).
        weekday: Weekday,
        /// Time of day the window opens.
        start: NaiveTime,
        /// Time of day the window closes.
        end: NaiveTime,
    },

    /// Applies once, over a concrete date range.
    OneOff {
        /// First day of the range.
        first: NaiveDate,
        /// Last day of the range, inclusive.
        last: NaiveDate,
        /// Time of day on the first day.
        start: NaiveTime,
        /// Time of day on the last day.
        end: NaiveTime,
    },
}

impl EntrySchedule {
    /// Time-of-day boundaries, independent of the repeat rule.
    pub fn times(&self) -> (NaiveTime, NaiveTime) {
        match *self {
            EntrySchedule::Weekly { start, end, .. } => (start, end),
            EntrySchedule::OneOff { start, end, .. } => (start, end),
        }
    }

    /// Whether this rule applies on the given date.
    pub fn applies_on(&self, date: NaiveDate) -> bool {
        match *self {
            EntrySchedule::Weekly { weekday, .. } => date.weekday() == weekday,
            EntrySchedule::OneOff { first, last, .. } => first <= date && date <= last,
        }
    }
}

/// Payload for creating a new block or class entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryDraft {
    /// The space to attach the entry to.
    pub space: u64,

    /// Availability window, block or class.
    pub kind: EntryKind,

    /// When the entry applies.
    pub schedule: EntrySchedule,

    /// Free-form notes.
    pub notes: Option<String>,
}

/// Maps the wire weekday index (0 = Monday .. 6 = Sunday) to [`Weekday`].
pub fn weekday_from_index(index: u8) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Mon),
        1 => Some(Weekday::Tue),
        2 => Some(Weekday::Wed),
        3 => Some(Weekday::Thu),
        4 => Some(Weekday::Fri),
        5 => Some(Weekday::Sat),
        6 => Some(Weekday::Sun),
        _ => None,
    }
}

/// Inverse of [`weekday_from_index`].
pub fn weekday_index(weekday: Weekday) -> u8 {
    weekday.num_days_from_monday() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_index_round_trips() {
        for i in 0..7 {
            assert_eq!(weekday_from_index(i).map(weekday_index), Some(i));
        }
        assert_eq!(weekday_from_index(7), None);
    }

    #[test]
    fn weekly_applies_on_matching_weekday_only() {
        let schedule = EntrySchedule::Weekly {
            weekday: Weekday::Wed,
            start: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
        };
        // 2024-05-08 is a Wednesday.
        assert!(schedule.applies_on(NaiveDate::from_ymd_opt(2024, 5, 8).unwrap()));
        assert!(!schedule.applies_on(NaiveDate::from_ymd_opt(2024, 5, 9).unwrap()));
    }

    #[test]
    fn one_off_applies_inside_date_range() {
        let schedule = EntrySchedule::OneOff {
            first: NaiveDate::from_ymd_opt(2024, 5, 6).unwrap(),
            last: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
            start: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
        };
        assert!(schedule.applies_on(NaiveDate::from_ymd_opt(2024, 5, 6).unwrap()));
        assert!(schedule.applies_on(NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()));
        assert!(!schedule.applies_on(NaiveDate::from_ymd_opt(2024, 5, 11).unwrap()));
    }

    #[test]
    fn entry_title_falls_back_to_kind() {
        let entry = ScheduleEntry {
            id: 1,
            space: 1,
            kind: EntryKind::Block,
            schedule: EntrySchedule::Weekly {
                weekday: Weekday::Mon,
                start: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
                end: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            },
            notes: None,
        };
        assert_eq!(entry.title(), "Bloqueo");
    }
}
