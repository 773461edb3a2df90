// SPDX-FileCopyrightText: 2026 Mariana Rey <sala@mrey.dev>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg};
use colored::Colorize;

use sala_core::{CalendarView, Outcome, SlotPicker};

use crate::cli::Context;
use crate::util::{now, parse_datetime_range};

/// Check whether a time range is bookable, without reserving it.
#[derive(Debug, Clone)]
pub struct CmdSlot {
    pub space: u64,
    pub start: String,
    pub end: String,
}

impl CmdSlot {
    pub const NAME: &str = "slot";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Check whether a slot is free")
            .arg(
                arg!(<SPACE> "Space identifier")
                    .value_parser(clap::value_parser!(u64)),
            )
            .arg(arg!(<START> "Start of the range (YYYY-MM-DD HH:MM or HH:MM)"))
            .arg(arg!(<END> "End of the range, or a bare HH:MM on the same day"))
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
        }
    }

    pub async fn run(self, ctx: &Context) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "checking slot...");
        let now = now();
        let (start, end) = parse_datetime_range(now, &self.start, &self.end)?;

        let timetable = ctx.client.fetch_timetable(self.space).await?;
        let mut picker = SlotPicker::new(
            ctx.config.working_hours(),
            ctx.config.slot_step_minutes,
        );

        match picker.select(&timetable, CalendarView::Day, start, end, now) {
            Outcome::Pending(slot) => {
                println!(
                    "{} {} ~ {}",
                    "Free:".green(),
                    slot.start.format("%Y-%m-%d %H:%M"),
                    slot.end.format("%H:%M"),
                );
            }
            Outcome::Rejected(err) => println!("{} {}", "Not bookable:".red(), err),
            Outcome::DrillDown(_) => unreachable!("day view never drills down"),
        }
        Ok(())
    }
}
