// SPDX-FileCopyrightText: 2026 Mariana Rey <sala@mrey.dev>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use chrono::NaiveDate;
use clap::{ArgMatches, Command, arg, value_parser};
use colored::Colorize;

use sala_core::{
    CalendarView, Outcome, Recurrence, Reservation, ReservationDraft, ReservationStatus,
    SlotPicker,
};

use crate::cli::Context;
use crate::util::{now, parse_datetime_range};

/// Reserve a space.
///
/// Runs the same select/confirm flow the calendar does: the raw range is
/// normalized and validated first, and nothing is submitted unless `--yes`
/// was given.
#[derive(Debug, Clone)]
pub struct CmdReserve {
    pub space: u64,
    pub start: String,
    pub end: String,
    pub attendees: u32,
    pub needs_key: bool,
    pub purpose: Option<String>,
    pub weekly_until: Option<NaiveDate>,
    pub yes: bool,
}

impl CmdReserve {
    pub const NAME: &str = "reserve";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Reserve a space")
            .arg(
                arg!(<SPACE> "Space identifier")
                    .value_parser(value_parser!(u64)),
            )
            .arg(arg!(<START> "Start of the range (YYYY-MM-DD HH:MM or HH:MM)"))
            .arg(arg!(<END> "End of the range, or a bare HH:MM on the same day"))
            .arg(
                arg!(--attendees <COUNT> "Expected number of attendees")
                    .value_parser(value_parser!(u32))
                    .default_value("1"),
            )
            .arg(arg!(--key "A physical key must be loaned"))
            .arg(arg!(--purpose <TEXT> "What the space is booked for"))
            .arg(
                arg!(--"weekly-until" <DATE> "Repeat weekly until this date")
                    .value_parser(value_parser!(NaiveDate)),
            )
            .arg(arg!(-y --yes "Submit without asking for confirmation"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            space: *matches.get_one("SPACE").expect("SPACE is required"),
            start: matches
                .get_one::<String>("START")
                .expect("START is required")
                .clone(),
            end: matches
                .get_one::<String>("END")
                .expect("END is required")
                .clone(),
            attendees: matches.get_one("attendees").copied().unwrap_or(1),
            needs_key: matches.get_flag("key"),
            purpose: matches.get_one("purpose").cloned(),
            weekly_until: matches.get_one("weekly-until").copied(),
            yes: matches.get_flag("yes"),
        }
    }

    pub async fn run(self, ctx: &Context) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "reserving...");
        let now = now();
        let (start, end) = parse_datetime_range(now, &self.start, &self.end)?;

        let timetable = ctx.client.fetch_timetable(self.space).await?;
        let mut picker = SlotPicker::new(
            ctx.config.working_hours(),
            ctx.config.slot_step_minutes,
        );

        match picker.select(&timetable, CalendarView::Day, start, end, now) {
            Outcome::Rejected(err) => return Err(err.to_string().into()),
            Outcome::DrillDown(_) => unreachable!("day view never drills down"),
            Outcome::Pending(slot) => {
                if !self.yes {
                    println!(
                        "Would reserve {} from {} to {}",
                        timetable.space.code.bold(),
                        slot.start.format("%Y-%m-%d %H:%M"),
                        slot.end.format("%Y-%m-%d %H:%M"),
                    );
                    println!("Re-run with {} to submit", "--yes".bold());
                    return Ok(());
                }
            }
        }

        let slot = picker.confirm().ok_or("No pending slot to confirm")?;
        let recurrence = match self.weekly_until {
            Some(until) => Recurrence::weekly_through(slot.start.date(), until),
            None => Recurrence::None,
        };
        let draft = ReservationDraft {
            space: self.space,
            start: slot.start,
            end: slot.end,
            attendees: self.attendees,
            needs_key: self.needs_key,
            purpose: self.purpose,
            recurrence,
        };

        let reservation = ctx.client.create_reservation(&draft).await?;
        print_created(&reservation);
        Ok(())
    }
}

fn print_created(reservation: &Reservation) {
    let status = match reservation.status {
        ReservationStatus::Pending => "pending approval".yellow(),
        ReservationStatus::Approved => "approved".green(),
        ReservationStatus::Rejected => "rejected".red(),
    };
    println!(
        "Reservation #{} created, {} ({} ~ {})",
        reservation.id,
        status,
        reservation.start.format("%Y-%m-%d %H:%M"),
        reservation.end.format("%Y-%m-%d %H:%M"),
    );
    if let Recurrence::Weekly { until, count } = reservation.recurrence {
        println!("Repeats weekly until {until}, {count} occurrences in total");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reserve() {
        let cmd = Command::new("test")
            .subcommand_required(true)
            .subcommand(CmdReserve::command());

        let matches = cmd
            .try_get_matches_from([
                "test",
                "reserve",
                "4",
                "2024-05-08 09:00",
                "10:30",
                "--attendees",
                "25",
                "--key",
                "--purpose",
                "Club de robotica",
                "--weekly-until",
                "2024-06-03",
                "--yes",
            ])
            .unwrap();
        let sub_matches = matches.subcommand_matches("reserve").unwrap();
        let parsed = CmdReserve::from(sub_matches);

        assert_eq!(parsed.space, 4);
        assert_eq!(parsed.attendees, 25);
        assert!(parsed.needs_key);
        assert_eq!(parsed.purpose, Some("Club de robotica".to_string()));
        assert_eq!(parsed.weekly_until, NaiveDate::from_ymd_opt(2024, 6, 3));
        assert!(parsed.yes);
    }

    #[test]
    fn test_parse_reserve_defaults() {
        let cmd = Command::new("test")
            .subcommand_required(true)
            .subcommand(CmdReserve::command());

        let matches = cmd
            .try_get_matches_from(["test", "reserve", "4", "09:00", "10:00"])
            .unwrap();
        let sub_matches = matches.subcommand_matches("reserve").unwrap();
        let parsed = CmdReserve::from(sub_matches);

        assert_eq!(parsed.attendees, 1);
        assert!(!parsed.needs_key);
        assert_eq!(parsed.purpose, None);
        assert_eq!(parsed.weekly_until, None);
        assert!(!parsed.yes);
    }
}
