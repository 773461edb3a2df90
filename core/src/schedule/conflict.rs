// SPDX-FileCopyrightText: 2026 Mariana Rey <sala@mrey.dev>
//
// SPDX-License-Identifier: Apache-2.0

//! Conflict and availability checking for candidate slots.

use chrono::{NaiveDateTime, NaiveTime};
use thiserror::Error;

use crate::entry::{EntryKind, ScheduleEntry};
use crate::reservation::Reservation;
use crate::schedule::expand::{DateSpan, expand_entry, expand_reservation};
use crate::schedule::hours::at;
use crate::schedule::occurrence::{Occurrence, OccurrenceKind};
use crate::space::Space;

/// Why a candidate slot was rejected.
///
/// `OutsideAvailability` and `Conflict` are distinct user-facing reasons and
/// must not be conflated: the first means no availability window covers the
/// range, the second that something already occupies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SlotError {
    /// The space is flagged inactive. The message is the exact one the
    /// booking UI shows.
    #[error("Este espacio esta inactivo, no es posible reservarlo.")]
    Inactive,

    /// The candidate starts before the current instant.
    #[error("the selection starts in the past")]
    InPast,

    /// The candidate ends at or before its start.
    #[error("the selection ends before it starts")]
    Inverted,

    /// No availability window covers the whole candidate range.
    #[error("outside available hours")]
    OutsideAvailability,

    /// A blocking occurrence overlaps the candidate range.
    #[error("slot already taken")]
    Conflict(OccurrenceKind),
}

/// A space's calendar state: the space itself plus its declared windows and
/// reservations, as last fetched from the backend.
///
/// All queries are recomputed from these inputs; nothing is cached.
#[derive(Debug, Clone, PartialEq)]
pub struct Timetable {
    /// The space this timetable belongs to.
    pub space: Space,

    /// Availability windows and exclusion entries.
    pub entries: Vec<ScheduleEntry>,

    /// Reservations for the space, any status.
    pub reservations: Vec<Reservation>,
}

impl Timetable {
    /// All classified occurrences visible in `span`, ordered by start and,
    /// within the same start, by precedence.
    pub fn occurrences(&self, span: DateSpan) -> Vec<Occurrence> {
        let mut out = Vec::new();

        if !self.space.active {
            // Synthetic all-day markers; they suppress all slot selection.
            let mut day = span.first;
            while day <= span.last {
                out.push(Occurrence {
                    start: at(day, NaiveTime::MIN),
                    end: at(day, end_of_day()),
                    kind: OccurrenceKind::Inactive,
                    title: "Espacio inactivo".to_string(),
                    source: None,
                });
                let Some(next) = day.succ_opt() else { break };
                day = next;
            }
        }

        for entry in &self.entries {
            out.extend(expand_entry(entry, span));
        }
        for reservation in &self.reservations {
            out.extend(expand_reservation(reservation, span));
        }

        out.sort_by(|a, b| {
            a.start
                .cmp(&b.start)
                .then(a.kind.priority().cmp(&b.kind.priority()))
        });
        out
    }

    /// Whether the candidate range fits entirely within at least one
    /// availability window occurrence on its date, the window's time-of-day
    /// boundaries translated onto the candidate's calendar date.
    pub fn inside_availability(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        let date = start.date();
        self.entries
            .iter()
            .filter(|e| e.kind == EntryKind::Availability)
            .filter(|e| e.schedule.applies_on(date))
            .any(|e| {
                let (open, close) = e.schedule.times();
                at(date, open) <= start && end <= at(date, close)
            })
    }

    /// The strongest blocking occurrence overlapping the candidate range,
    /// if any. Exclusion entries outrank reservations, so they are scanned
    /// first and the search short-circuits.
    pub fn first_conflict(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Option<OccurrenceKind> {
        let span = DateSpan::new(start.date(), end.date());

        for entry in &self.entries {
            if let Some(o) = expand_entry(entry, span)
                .iter()
                .find(|o| o.overlaps(start, end))
            {
                return Some(o.kind);
            }
        }

        for reservation in &self.reservations {
            if let Some(o) = expand_reservation(reservation, span)
                .iter()
                .find(|o| o.kind.blocks() && o.overlaps(start, end))
            {
                return Some(o.kind);
            }
        }

        None
    }

    /// Runs the full selectability check for a candidate range.
    ///
    /// Both checks are mandatory: the range must sit inside an availability
    /// window and must not overlap any blocking occurrence.
    pub fn check_slot(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        now: NaiveDateTime,
    ) -> Result<(), SlotError> {
        if !self.space.active {
            return Err(SlotError::Inactive);
        }
        if end <= start {
            return Err(SlotError::Inverted);
        }
        if start < now {
            return Err(SlotError::InPast);
        }
        if !self.inside_availability(start, end) {
            return Err(SlotError::OutsideAvailability);
        }
        if let Some(kind) = self.first_conflict(start, end) {
            return Err(SlotError::Conflict(kind));
        }
        Ok(())
    }
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 59).expect("23:59:59 must exist in NaiveTime")
}
