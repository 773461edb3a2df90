// SPDX-FileCopyrightText: 2026 Mariana Rey <sala@mrey.dev>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Display;
use std::str::FromStr;

use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A booking request for a space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Backend identifier.
    pub id: u64,

    /// The reserved space.
    pub space: u64,

    /// Who requested the reservation.
    pub requester: String,

    /// Start of the reserved range (campus local time).
    pub start: NaiveDateTime,

    /// End of the reserved range (campus local time).
    pub end: NaiveDateTime,

    /// Approval state.
    pub status: ReservationStatus,

    /// Expected number of attendees.
    pub attendees: u32,

    /// Whether a physical key must be loaned for the booking.
    pub needs_key: bool,

    /// What the space is booked for.
    pub purpose: Option<String>,

    /// Weekly semester recurrence, if any. Only the stored series head
    /// carries this; server-side duplicate rows are plain one-offs.
    pub recurrence: Recurrence,
}

impl Reservation {
    /// Calendar label for this reservation.
    pub fn title(&self) -> &str {
        match &self.purpose {
            Some(purpose) if !purpose.is_empty() => purpose,
            _ => &self.requester,
        }
    }
}

/// Approval state of a reservation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    /// Awaiting review; renders distinctly but does not block new slots.
    #[default]
    Pending,

    /// Approved; blocks overlapping selections.
    Approved,

    /// Rejected; not rendered on the calendar.
    Rejected,
}

const STATUS_PENDING: &str = "pending";
const STATUS_APPROVED: &str = "approved";
const STATUS_REJECTED: &str = "rejected";

impl AsRef<str> for ReservationStatus {
    fn as_ref(&self) -> &str {
        match self {
            ReservationStatus::Pending => STATUS_PENDING,
            ReservationStatus::Approved => STATUS_APPROVED,
            ReservationStatus::Rejected => STATUS_REJECTED,
        }
    }
}

impl Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for ReservationStatus {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            STATUS_PENDING => Ok(ReservationStatus::Pending),
            STATUS_APPROVED => Ok(ReservationStatus::Approved),
            STATUS_REJECTED => Ok(ReservationStatus::Rejected),
            _ => Err(()),
        }
    }
}

/// Recurrence rule for a reservation.
///
/// Replaces the legacy free-form recurrence metadata bag: a reservation
/// either happens once or repeats weekly until the end of a semester.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "repeat", rename_all = "lowercase")]
pub enum Recurrence {
    /// One-off reservation.
    #[default]
    None,

    /// Repeats weekly at the same time of day.
    Weekly {
        /// Last day of the semester; no occurrence starts after this.
        until: NaiveDate,
        /// Total number of occurrences, the stored one included.
        count: u32,
    },
}

impl Recurrence {
    /// Whether this reservation repeats.
    pub fn is_recurring(&self) -> bool {
        !matches!(self, Recurrence::None)
    }

    /// Weekly recurrence spanning `first..=until`, one occurrence per week.
    pub fn weekly_through(first: NaiveDate, until: NaiveDate) -> Self {
        if until < first {
            return Recurrence::None;
        }
        let weeks = (until - first).num_days() / 7;
        Recurrence::Weekly {
            until,
            count: weeks as u32 + 1,
        }
    }
}

/// Payload for creating a new reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReservationDraft {
    /// The space to reserve.
    pub space: u64,

    /// Start of the requested range.
    pub start: NaiveDateTime,

    /// End of the requested range.
    pub end: NaiveDateTime,

    /// Expected number of attendees.
    pub attendees: u32,

    /// Whether a key loan is required.
    pub needs_key: bool,

    /// What the space is booked for.
    pub purpose: Option<String>,

    /// Weekly semester recurrence, if any.
    pub recurrence: Recurrence,
}

impl ReservationDraft {
    /// A minimal one-off draft for the given space and range.
    pub fn new(space: u64, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            space,
            start,
            end,
            attendees: 1,
            needs_key: false,
            purpose: None,
            recurrence: Recurrence::None,
        }
    }

    /// First day of the recurrence range, when recurring.
    pub fn semester_start(&self) -> Option<NaiveDate> {
        self.recurrence.is_recurring().then(|| self.start.date())
    }

    /// Last day of the recurrence range, when recurring.
    pub fn semester_end(&self) -> Option<NaiveDate> {
        match self.recurrence {
            Recurrence::Weekly { until, .. } => Some(until),
            Recurrence::None => None,
        }
    }
}

/// Date of occurrence `index` of a weekly series starting at `base`.
pub(crate) fn nth_week(base: NaiveDateTime, index: u32) -> Option<NaiveDateTime> {
    base.checked_add_days(Days::new(u64::from(index) * 7))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn status_round_trips_through_str() {
        for status in [
            ReservationStatus::Pending,
            ReservationStatus::Approved,
            ReservationStatus::Rejected,
        ] {
            assert_eq!(status.as_ref().parse::<ReservationStatus>(), Ok(status));
        }
        assert!("cancelled".parse::<ReservationStatus>().is_err());
    }

    #[test]
    fn weekly_through_counts_both_ends() {
        // 2024-03-04 .. 2024-06-03 is exactly 13 weeks.
        let rec = Recurrence::weekly_through(date(2024, 3, 4), date(2024, 6, 3));
        assert_eq!(
            rec,
            Recurrence::Weekly {
                until: date(2024, 6, 3),
                count: 14,
            }
        );
    }

    #[test]
    fn weekly_through_single_week() {
        let rec = Recurrence::weekly_through(date(2024, 3, 4), date(2024, 3, 8));
        assert_eq!(
            rec,
            Recurrence::Weekly {
                until: date(2024, 3, 8),
                count: 1,
            }
        );
    }

    #[test]
    fn weekly_through_inverted_range_is_none() {
        let rec = Recurrence::weekly_through(date(2024, 3, 4), date(2024, 3, 1));
        assert_eq!(rec, Recurrence::None);
    }
}
