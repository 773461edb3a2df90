// SPDX-FileCopyrightText: 2026 Mariana Rey <sala@mrey.dev>
//
// SPDX-License-Identifier: Apache-2.0

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::reservation::ReservationStatus;

/// One concrete calendar instance produced by expanding a schedule entry or
/// reservation into a visible date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Occurrence {
    /// Start of the instance.
    pub start: NaiveDateTime,

    /// End of the instance.
    pub end: NaiveDateTime,

    /// Category, used both for rendering style and conflict semantics.
    pub kind: OccurrenceKind,

    /// Calendar label.
    pub title: String,

    /// Id of the entry or reservation this instance came from; `None` for
    /// synthetic markers.
    pub source: Option<u64>,
}

impl Occurrence {
    /// Half-open interval intersection with a candidate range.
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.start < end && start < self.end
    }
}

/// Category of an expanded occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OccurrenceKind {
    /// Synthetic all-day marker on an inactive space; suppresses all
    /// slot selection.
    Inactive,

    /// Maintenance or administrative exclusion.
    Block,

    /// Teaching-schedule exclusion.
    Class,

    /// A reservation, carrying its approval state.
    Reservation(ReservationStatus),
}

impl OccurrenceKind {
    /// Whether an occurrence of this kind rejects overlapping candidates.
    ///
    /// Blocks and classes always conflict; reservations only once approved.
    pub fn blocks(self) -> bool {
        match self {
            OccurrenceKind::Inactive | OccurrenceKind::Block | OccurrenceKind::Class => true,
            OccurrenceKind::Reservation(status) => status == ReservationStatus::Approved,
        }
    }

    /// Render/reporting precedence; lower is stronger.
    ///
    /// block/class > approved reservation > pending reservation.
    pub fn priority(self) -> u8 {
        match self {
            OccurrenceKind::Inactive => 0,
            OccurrenceKind::Block | OccurrenceKind::Class => 1,
            OccurrenceKind::Reservation(ReservationStatus::Approved) => 2,
            OccurrenceKind::Reservation(ReservationStatus::Pending) => 3,
            OccurrenceKind::Reservation(ReservationStatus::Rejected) => 4,
        }
    }
}
