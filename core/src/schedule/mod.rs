// SPDX-FileCopyrightText: 2026 Mariana Rey <sala@mrey.dev>
//
// SPDX-License-Identifier: Apache-2.0

//! The space-availability calendar core.
//!
//! Everything here is a pure function of its inputs: occurrences are
//! recomputed from the current entries and reservations on every call, never
//! maintained incrementally.

mod conflict;
mod expand;
mod hours;
mod occurrence;
mod selection;

pub use conflict::{SlotError, Timetable};
pub use expand::{
    DateSpan, ScheduleWindows, WeeklyDates, expand_entry, expand_reservation, expand_schedule,
};
pub use hours::{WorkingHours, at, normalize_time};
pub use occurrence::{Occurrence, OccurrenceKind};
pub use selection::{CalendarView, Outcome, Slot, SlotPicker};
