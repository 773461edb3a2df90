// SPDX-FileCopyrightText: 2026 Mariana Rey <sala@mrey.dev>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use chrono::NaiveDate;
use clap::{ArgMatches, Command, arg, value_parser};
use colored::Colorize;

use sala_core::CalendarView;

use crate::cli::Context;
use crate::formatter::OccurrenceFormatter;
use crate::util::{ArgOutputFormat, now};

/// Show the expanded calendar of one space.
#[derive(Debug, Clone, Copy)]
pub struct CmdSchedule {
    pub space: u64,
    pub view: Option<CalendarView>,
    pub date: Option<NaiveDate>,
    pub output_format: ArgOutputFormat,
}

impl CmdSchedule {
    pub const NAME: &str = "schedule";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Show a space's calendar")
            .arg(
                arg!(<SPACE> "Space identifier")
                    .value_parser(value_parser!(u64)),
            )
            .arg(
                arg!(--view <VIEW> "Calendar layout to expand")
                    .value_parser(value_parser!(CalendarView)),
            )
            .arg(
                arg!(--date <DATE> "Focus date, defaults to today")
                    .value_parser(value_parser!(NaiveDate)),
            )
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            space: *matches.get_one("SPACE").expect("SPACE is required"),
            view: matches.get_one("view").copied(),
            date: matches.get_one("date").copied(),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, ctx: &Context) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "expanding schedule...");
        let timetable = ctx.client.fetch_timetable(self.space).await?;

        let view = self.view.unwrap_or(ctx.config.default_view);
        let date = self.date.unwrap_or_else(|| now().date());
        let occurrences = timetable.occurrences(view.span_around(date));

        if occurrences.is_empty() && self.output_format == ArgOutputFormat::Table {
            println!("{}", "Nothing scheduled".italic());
            return Ok(());
        }

        let formatter = OccurrenceFormatter::new().with_output_format(self.output_format);
        println!("{}", formatter.format(&occurrences));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_schedule() {
        let cmd = Command::new("test")
            .subcommand_required(true)
            .subcommand(CmdSchedule::command());

        let matches = cmd
            .try_get_matches_from([
                "test",
                "schedule",
                "4",
                "--view",
                "month",
                "--date",
                "2024-05-08",
                "--output-format",
                "json",
            ])
            .unwrap();
        let sub_matches = matches.subcommand_matches("schedule").unwrap();
        let parsed = CmdSchedule::from(sub_matches);

        assert_eq!(parsed.space, 4);
        assert_eq!(parsed.view, Some(CalendarView::Month));
        assert_eq!(parsed.date, NaiveDate::from_ymd_opt(2024, 5, 8));
        assert_eq!(parsed.output_format, ArgOutputFormat::Json);
    }

    #[test]
    fn test_parse_schedule_defaults() {
        let cmd = Command::new("test")
            .subcommand_required(true)
            .subcommand(CmdSchedule::command());

        let matches = cmd.try_get_matches_from(["test", "schedule", "4"]).unwrap();
        let sub_matches = matches.subcommand_matches("schedule").unwrap();
        let parsed = CmdSchedule::from(sub_matches);

        assert_eq!(parsed.view, None);
        assert_eq!(parsed.date, None);
        assert_eq!(parsed.output_format, ArgOutputFormat::Table);
    }
}
