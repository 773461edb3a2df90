// SPDX-FileCopyrightText: 2026 Mariana Rey <sala@mrey.dev>
//
// SPDX-License-Identifier: Apache-2.0

//! Slot selection: turning a raw calendar drag into a confirmed booking range.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::schedule::conflict::{SlotError, Timetable};
use crate::schedule::expand::DateSpan;
use crate::schedule::hours::WorkingHours;

/// Which calendar layout the user is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum CalendarView {
    Month,
    #[default]
    Week,
    Day,
}

impl CalendarView {
    /// The date range this view shows around a focus date.
    pub fn span_around(self, date: NaiveDate) -> DateSpan {
        match self {
            CalendarView::Month => DateSpan::month_of(date),
            CalendarView::Week => DateSpan::week_of(date),
            CalendarView::Day => DateSpan::day(date),
        }
    }
}

/// A normalized candidate range, ready to be confirmed into a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Slot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// What a selection attempt produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Month-view selections of a day or more switch to that day instead of
    /// picking a slot.
    DrillDown(NaiveDate),

    /// The normalized slot passed every check and awaits confirmation.
    Pending(Slot),

    /// The slot was rejected; the picker keeps its previous state.
    Rejected(SlotError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    PendingConfirmation(Slot),
}

/// Drives the select/confirm flow over a [`Timetable`].
///
/// A selection never creates anything on its own; the caller confirms the
/// pending slot and submits the reservation itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotPicker {
    hours: WorkingHours,
    step: Duration,
    state: State,
}

impl SlotPicker {
    pub fn new(hours: WorkingHours, step_minutes: u32) -> Self {
        Self {
            hours,
            step: Duration::minutes(i64::from(step_minutes)),
            state: State::Idle,
        }
    }

    /// The slot currently awaiting confirmation, if any.
    pub fn pending(&self) -> Option<Slot> {
        match self.state {
            State::PendingConfirmation(slot) => Some(slot),
            State::Idle => None,
        }
    }

    /// Normalizes and validates a raw selection against the timetable.
    ///
    /// Zero-length selections (a single click) expand to one step before
    /// clamping, so a click at the closing hour still yields a range and is
    /// then rejected by the availability check rather than producing an
    /// empty slot.
    pub fn select(
        &mut self,
        timetable: &Timetable,
        view: CalendarView,
        raw_start: NaiveDateTime,
        raw_end: NaiveDateTime,
        now: NaiveDateTime,
    ) -> Outcome {
        if view == CalendarView::Month && raw_end - raw_start >= Duration::days(1) {
            return Outcome::DrillDown(raw_start.date());
        }

        let raw_end = if raw_end == raw_start {
            raw_start + self.step
        } else {
            raw_end
        };

        let start = self.hours.clamp(raw_start);
        let end = self.hours.clamp(raw_end);

        match timetable.check_slot(start, end, now) {
            Ok(()) => {
                let slot = Slot { start, end };
                self.state = State::PendingConfirmation(slot);
                Outcome::Pending(slot)
            }
            Err(err) => Outcome::Rejected(err),
        }
    }

    /// Consumes the pending slot for submission.
    pub fn confirm(&mut self) -> Option<Slot> {
        match std::mem::replace(&mut self.state, State::Idle) {
            State::PendingConfirmation(slot) => Some(slot),
            State::Idle => None,
        }
    }

    /// Discards the pending slot.
    pub fn cancel(&mut self) {
        self.state = State::Idle;
    }
}
