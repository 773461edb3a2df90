// SPDX-FileCopyrightText: 2026 Mariana Rey <sala@mrey.dev>
//
// SPDX-License-Identifier: Apache-2.0

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use clap::{Arg, ArgMatches, arg, value_parser};

/// The output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ArgOutputFormat {
    Json,
    Table,
}

impl ArgOutputFormat {
    pub fn arg() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(ArgOutputFormat))
            .default_value("table")
    }

    pub fn from(matches: &ArgMatches) -> Self {
        matches
            .get_one("output-format")
            .copied()
            .unwrap_or(ArgOutputFormat::Table)
    }
}

/// The current instant in campus local time.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Parses a campus-local datetime.
///
/// Accepts `YYYY-MM-DD HH:MM`, a bare `HH:MM` (today), or a bare
/// `YYYY-MM-DD` (midnight).
pub fn parse_datetime(now: NaiveDateTime, s: &str) -> Result<NaiveDateTime, &'static str> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M") {
        Ok(dt)
    } else if let Ok(time) = NaiveTime::parse_from_str(s, "%H:%M") {
        Ok(NaiveDateTime::new(now.date(), time))
    } else if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        date.and_hms_opt(0, 0, 0).ok_or("Invalid date")
    } else {
        Err("Invalid date format. Expected format: YYYY-MM-DD, HH:MM or YYYY-MM-DD HH:MM")
    }
}

/// Parses a start/end pair.
///
/// A bare `HH:MM` end lands on the start's date, or the next day when it
/// reads earlier than the start time.
pub fn parse_datetime_range(
    now: NaiveDateTime,
    start: &str,
    end: &str,
) -> Result<(NaiveDateTime, NaiveDateTime), &'static str> {
    let start = parse_datetime(now, start)?;

    let end = if let Ok(time) = NaiveTime::parse_from_str(end, "%H:%M") {
        let delta = if start.time() <= time {
            TimeDelta::zero()
        } else {
            TimeDelta::days(1)
        };
        NaiveDateTime::new(start.date(), time) + delta
    } else {
        parse_datetime(now, end)?
    };

    Ok((start, end))
}
