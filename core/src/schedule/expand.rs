// SPDX-FileCopyrightText: 2026 Mariana Rey <sala@mrey.dev>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurrence expansion: turning schedule rules and reservations into
//! concrete occurrences within a visible date range.

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

use crate::entry::{EntryKind, EntrySchedule, ScheduleEntry};
use crate::reservation::{Recurrence, Reservation, ReservationStatus, nth_week};
use crate::schedule::hours::at;
use crate::schedule::occurrence::{Occurrence, OccurrenceKind};

/// The visible date range of a calendar view, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateSpan {
    /// First visible day.
    pub first: NaiveDate,

    /// Last visible day, inclusive.
    pub last: NaiveDate,
}

impl DateSpan {
    /// Span covering `first..=last`.
    pub fn new(first: NaiveDate, last: NaiveDate) -> Self {
        Self { first, last }
    }

    /// Span covering a single day.
    pub fn day(date: NaiveDate) -> Self {
        Self::new(date, date)
    }

    /// The Monday-to-Sunday week containing `date`.
    pub fn week_of(date: NaiveDate) -> Self {
        let monday = date - Days::new(u64::from(date.weekday().num_days_from_monday()));
        Self::new(monday, monday + Days::new(6))
    }

    /// The calendar month containing `date`.
    pub fn month_of(date: NaiveDate) -> Self {
        let first = date.with_day(1).expect("every month has a day 1");
        let last = first
            .checked_add_months(Months::new(1))
            .and_then(|d| d.pred_opt())
            .expect("every month has a last day");
        Self::new(first, last)
    }

    /// Whether `date` falls inside the span.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.first <= date && date <= self.last
    }

    /// Whether the date range `first..=last` intersects the span.
    pub fn intersects(&self, first: NaiveDate, last: NaiveDate) -> bool {
        first <= self.last && self.first <= last
    }
}

/// Dates of a given weekday inside a span, one per 7-day step.
///
/// Starts at the first occurrence of the weekday at/after the span start.
/// Restartable: clone it, or rebuild it from the same inputs, to replay.
#[derive(Debug, Clone)]
pub struct WeeklyDates {
    next: Option<NaiveDate>,
    last: NaiveDate,
}

impl WeeklyDates {
    /// All dates with weekday `weekday` inside `span`.
    pub fn new(weekday: Weekday, span: DateSpan) -> Self {
        let offset = (weekday.num_days_from_monday() + 7
            - span.first.weekday().num_days_from_monday())
            % 7;
        let first = span.first + Days::new(u64::from(offset));
        Self {
            next: (first <= span.last).then_some(first),
            last: span.last,
        }
    }
}

impl Iterator for WeeklyDates {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current
            .checked_add_days(Days::new(7))
            .filter(|d| *d <= self.last);
        Some(current)
    }
}

/// Lazy, finite sequence of concrete time windows for one schedule rule.
#[derive(Debug, Clone)]
pub struct ScheduleWindows {
    weekly: Option<(WeeklyDates, NaiveTime, NaiveTime)>,
    one_off: Option<(NaiveDateTime, NaiveDateTime)>,
}

impl Iterator for ScheduleWindows {
    type Item = (NaiveDateTime, NaiveDateTime);

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.weekly {
            Some((dates, start, end)) => {
                let date = dates.next()?;
                Some((at(date, *start), at(date, *end)))
            }
            None => self.one_off.take(),
        }
    }
}

/// Expands one schedule rule into concrete windows inside `span`.
///
/// Weekly rules emit one window per matching date; one-off rules emit a
/// single window iff their date range intersects the span.
pub fn expand_schedule(schedule: &EntrySchedule, span: DateSpan) -> ScheduleWindows {
    match *schedule {
        EntrySchedule::Weekly {
            weekday,
            start,
            end,
        } => ScheduleWindows {
            weekly: Some((WeeklyDates::new(weekday, span), start, end)),
            one_off: None,
        },
        EntrySchedule::OneOff {
            first,
            last,
            start,
            end,
        } => ScheduleWindows {
            weekly: None,
            one_off: span
                .intersects(first, last)
                .then(|| (at(first, start), at(last, end))),
        },
    }
}

/// Expands an exclusion entry into classified occurrences inside `span`.
///
/// Availability entries yield nothing here: they are background windows,
/// not calendar events.
pub fn expand_entry(entry: &ScheduleEntry, span: DateSpan) -> Vec<Occurrence> {
    let kind = match entry.kind {
        EntryKind::Availability => return Vec::new(),
        EntryKind::Block => OccurrenceKind::Block,
        EntryKind::Class => OccurrenceKind::Class,
    };

    expand_schedule(&entry.schedule, span)
        .map(|(start, end)| Occurrence {
            start,
            end,
            kind,
            title: entry.title().to_string(),
            source: Some(entry.id),
        })
        .collect()
}

/// Expands a reservation into classified occurrences inside `span`.
///
/// A weekly series adds `i` weeks to the base start/end for each occurrence
/// index; only the stored series head carries recurrence metadata, so
/// server-side duplicate rows are never re-expanded. Rejected reservations
/// are not rendered and yield nothing.
pub fn expand_reservation(reservation: &Reservation, span: DateSpan) -> Vec<Occurrence> {
    if reservation.status == ReservationStatus::Rejected {
        return Vec::new();
    }

    let occurrence = |start: NaiveDateTime, end: NaiveDateTime| Occurrence {
        start,
        end,
        kind: OccurrenceKind::Reservation(reservation.status),
        title: reservation.title().to_string(),
        source: Some(reservation.id),
    };

    match reservation.recurrence {
        Recurrence::None => span
            .intersects(reservation.start.date(), reservation.end.date())
            .then(|| occurrence(reservation.start, reservation.end))
            .into_iter()
            .collect(),

        Recurrence::Weekly { until, count } => {
            let mut out = Vec::new();
            for index in 0..count {
                let (Some(start), Some(end)) = (
                    nth_week(reservation.start, index),
                    nth_week(reservation.end, index),
                ) else {
                    break;
                };
                if start.date() > until {
                    break;
                }
                if span.intersects(start.date(), end.date()) {
                    out.push(occurrence(start, end));
                }
            }
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reservation::ReservationStatus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn block(schedule: EntrySchedule) -> ScheduleEntry {
        ScheduleEntry {
            id: 3,
            space: 1,
            kind: EntryKind::Block,
            schedule,
            notes: Some("Mantenimiento".to_string()),
        }
    }

    #[test]
    fn week_span_runs_monday_to_sunday() {
        // 2024-05-08 is a Wednesday.
        let span = DateSpan::week_of(date(2024, 5, 8));
        assert_eq!(span, DateSpan::new(date(2024, 5, 6), date(2024, 5, 12)));
    }

    #[test]
    fn month_span_covers_the_whole_month() {
        let span = DateSpan::month_of(date(2024, 2, 14));
        assert_eq!(span, DateSpan::new(date(2024, 2, 1), date(2024, 2, 29)));
    }

    #[test]
    fn weekly_dates_step_seven_days() {
        let span = DateSpan::month_of(date(2024, 5, 1));
        let dates: Vec<_> = WeeklyDates::new(Weekday::Wed, span).collect();
        assert_eq!(
            dates,
            vec![
                date(2024, 5, 1),
                date(2024, 5, 8),
                date(2024, 5, 15),
                date(2024, 5, 22),
                date(2024, 5, 29),
            ]
        );
    }

    #[test]
    fn weekly_dates_are_restartable() {
        let span = DateSpan::week_of(date(2024, 5, 8));
        let first = WeeklyDates::new(Weekday::Wed, span);
        let second = first.clone();
        assert_eq!(first.collect::<Vec<_>>(), second.collect::<Vec<_>>());
    }

    #[test]
    fn weekly_block_yields_exactly_one_occurrence_per_week() {
        // Recurring block on Wednesday 10:00-11:00; week containing
        // 2024-05-08 must yield exactly [2024-05-08T10:00, 2024-05-08T11:00].
        let entry = block(EntrySchedule::Weekly {
            weekday: Weekday::Wed,
            start: time(10, 0),
            end: time(11, 0),
        });
        let span = DateSpan::week_of(date(2024, 5, 8));

        let occurrences = expand_entry(&entry, span);
        assert_eq!(occurrences.len(), 1);
        assert_eq!(occurrences[0].start, at(date(2024, 5, 8), time(10, 0)));
        assert_eq!(occurrences[0].end, at(date(2024, 5, 8), time(11, 0)));
        assert_eq!(occurrences[0].kind, OccurrenceKind::Block);
    }

    #[test]
    fn expansion_is_idempotent() {
        let entry = block(EntrySchedule::Weekly {
            weekday: Weekday::Fri,
            start: time(8, 0),
            end: time(9, 30),
        });
        let span = DateSpan::month_of(date(2024, 5, 1));
        assert_eq!(expand_entry(&entry, span), expand_entry(&entry, span));
    }

    #[test]
    fn one_off_emits_single_window_when_intersecting() {
        let entry = block(EntrySchedule::OneOff {
            first: date(2024, 5, 7),
            last: date(2024, 5, 9),
            start: time(8, 0),
            end: time(18, 0),
        });

        let visible = expand_entry(&entry, DateSpan::week_of(date(2024, 5, 8)));
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].start, at(date(2024, 5, 7), time(8, 0)));
        assert_eq!(visible[0].end, at(date(2024, 5, 9), time(18, 0)));

        let outside = expand_entry(&entry, DateSpan::week_of(date(2024, 5, 15)));
        assert!(outside.is_empty());
    }

    #[test]
    fn availability_entries_expand_to_no_events() {
        let entry = ScheduleEntry {
            kind: EntryKind::Availability,
            ..block(EntrySchedule::Weekly {
                weekday: Weekday::Mon,
                start: time(6, 0),
                end: time(20, 0),
            })
        };
        assert!(expand_entry(&entry, DateSpan::week_of(date(2024, 5, 8))).is_empty());
    }

    fn weekly_reservation(count: u32) -> Reservation {
        Reservation {
            id: 11,
            space: 1,
            requester: "vsoto".to_string(),
            start: at(date(2024, 5, 8), time(14, 0)),
            end: at(date(2024, 5, 8), time(16, 0)),
            status: ReservationStatus::Approved,
            attendees: 20,
            needs_key: true,
            purpose: Some("Electiva de robotica".to_string()),
            recurrence: Recurrence::Weekly {
                until: date(2024, 6, 30),
                count,
            },
        }
    }

    #[test]
    fn weekly_reservation_adds_weeks_per_index() {
        let reservation = weekly_reservation(4);
        let span = DateSpan::new(date(2024, 5, 1), date(2024, 6, 30));

        let occurrences = expand_reservation(&reservation, span);
        let starts: Vec<_> = occurrences.iter().map(|o| o.start.date()).collect();
        assert_eq!(
            starts,
            vec![
                date(2024, 5, 8),
                date(2024, 5, 15),
                date(2024, 5, 22),
                date(2024, 5, 29),
            ]
        );
        for o in &occurrences {
            assert_eq!(o.end - o.start, chrono::Duration::hours(2));
        }
    }

    #[test]
    fn weekly_reservation_stops_at_until() {
        let mut reservation = weekly_reservation(40);
        reservation.recurrence = Recurrence::Weekly {
            until: date(2024, 5, 22),
            count: 40,
        };
        let span = DateSpan::new(date(2024, 5, 1), date(2024, 12, 31));

        let occurrences = expand_reservation(&reservation, span);
        assert_eq!(occurrences.len(), 3);
    }

    #[test]
    fn non_recurring_duplicate_rows_are_not_re_expanded() {
        let mut duplicate = weekly_reservation(4);
        duplicate.recurrence = Recurrence::None;
        let span = DateSpan::new(date(2024, 5, 1), date(2024, 6, 30));

        let occurrences = expand_reservation(&duplicate, span);
        assert_eq!(occurrences.len(), 1);
    }

    #[test]
    fn rejected_reservations_are_not_rendered() {
        let mut reservation = weekly_reservation(4);
        reservation.status = ReservationStatus::Rejected;
        let span = DateSpan::new(date(2024, 5, 1), date(2024, 6, 30));
        assert!(expand_reservation(&reservation, span).is_empty());
    }
}
