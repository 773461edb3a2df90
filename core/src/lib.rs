// SPDX-FileCopyrightText: 2026 Mariana Rey <sala@mrey.dev>
//
// SPDX-License-Identifier: Apache-2.0

//! Core types and scheduling logic for the sala space-reservation tools.
//!
//! This crate holds the domain model (spaces, schedule entries,
//! reservations, front-desk records) and the calendar core: recurrence
//! expansion, occurrence classification, conflict checking and the
//! slot-selection state machine. It performs no I/O; the HTTP client lives
//! in `sala-client`.

mod config;
mod entry;
mod frontdesk;
mod reservation;
pub mod schedule;
mod space;

pub use crate::config::{APP_NAME, Config, expand_path, get_config_dir};
pub use crate::entry::{
    EntryDraft, EntryKind, EntrySchedule, ScheduleEntry, weekday_from_index, weekday_index,
};
pub use crate::frontdesk::{DeskStep, FrontDeskLog, RegisteredStep};
pub use crate::reservation::{Recurrence, Reservation, ReservationDraft, ReservationStatus};
pub use crate::schedule::{
    CalendarView, DateSpan, Occurrence, OccurrenceKind, Outcome, Slot, SlotError, SlotPicker,
    Timetable, WorkingHours,
};
pub use crate::space::{Space, SpaceKind};
