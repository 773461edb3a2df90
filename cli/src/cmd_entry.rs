// SPDX-FileCopyrightText: 2026 Mariana Rey <sala@mrey.dev>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use chrono::{NaiveDate, NaiveTime};
use clap::{ArgMatches, Command, arg, value_parser};
use colored::Colorize;

use sala_core::{EntryDraft, EntryKind, EntrySchedule, ScheduleEntry, weekday_from_index};

use crate::cli::Context;
use crate::util::ArgOutputFormat;

/// Create an availability window, block or class entry.
#[derive(Debug, Clone)]
pub struct CmdEntryNew {
    pub space: u64,
    pub kind: EntryKind,
    pub weekday: Option<u8>,
    pub first: Option<NaiveDate>,
    pub last: Option<NaiveDate>,
    pub from: String,
    pub to: String,
    pub notes: Option<String>,
}

impl CmdEntryNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("add")
            .about("Add a schedule entry")
            .arg(
                arg!(<SPACE> "Space identifier")
                    .value_parser(value_parser!(u64)),
            )
            .arg(
                arg!(--kind <KIND> "Entry kind")
                    .value_parser(value_parser!(EntryKind))
                    .default_value("block"),
            )
            .arg(
                arg!(--weekday <DAY> "Repeat weekly on this day (0 = Monday .. 6 = Sunday)")
                    .value_parser(value_parser!(u8).range(0..=6))
                    .conflicts_with_all(["first", "last"]),
            )
            .arg(
                arg!(--first <DATE> "First day of a one-off entry")
                    .value_parser(value_parser!(NaiveDate))
                    .requires("last"),
            )
            .arg(
                arg!(--last <DATE> "Last day of a one-off entry, inclusive")
                    .value_parser(value_parser!(NaiveDate))
                    .requires("first"),
            )
            .arg(arg!(--from <TIME> "Time the window opens (HH:MM)").required(true))
            .arg(arg!(--to <TIME> "Time the window closes (HH:MM)").required(true))
            .arg(arg!(--notes <TEXT> "Notes shown on the calendar"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            space: *matches.get_one("SPACE").expect("SPACE is required"),
            kind: matches.get_one("kind").copied().unwrap_or_default(),
            weekday: matches.get_one("weekday").copied(),
            first: matches.get_one("first").copied(),
            last: matches.get_one("last").copied(),
            from: matches
                .get_one::<String>("from")
                .expect("--from is required")
                .clone(),
            to: matches
                .get_one::<String>("to")
                .expect("--to is required")
                .clone(),
            notes: matches.get_one("notes").cloned(),
        }
    }

    pub async fn run(self, ctx: &Context) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "creating schedule entry...");
        let start = parse_time(&self.from)?;
        let end = parse_time(&self.to)?;

        let schedule = match (self.weekday, self.first, self.last) {
            (Some(index), None, None) => {
                let weekday = weekday_from_index(index).ok_or("Weekday out of range")?;
                EntrySchedule::Weekly {
                    weekday,
                    start,
                    end,
                }
            }
            (None, Some(first), Some(last)) if first <= last => EntrySchedule::OneOff {
                first,
                last,
                start,
                end,
            },
            (None, Some(_), Some(_)) => return Err("--last must not be before --first".into()),
            _ => return Err("Either --weekday or --first/--last is required".into()),
        };

        let draft = EntryDraft {
            space: self.space,
            kind: self.kind,
            schedule,
            notes: self.notes,
        };
        let entry = ctx.client.create_entry(&draft).await?;
        println!("Entry #{} created ({})", entry.id, entry.title());
        Ok(())
    }
}

/// Delete a schedule entry.
#[derive(Debug, Clone, Copy)]
pub struct CmdEntryDelete {
    pub id: u64,
}

impl CmdEntryDelete {
    pub const NAME: &str = "delete";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("rm")
            .about("Delete a schedule entry")
            .arg(arg!(<ID> "Entry identifier").value_parser(value_parser!(u64)))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: *matches.get_one("ID").expect("ID is required"),
        }
    }

    pub async fn run(self, ctx: &Context) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "deleting schedule entry...");
        ctx.client.delete_entry(self.id).await?;
        println!("Entry #{} deleted", self.id);
        Ok(())
    }
}

/// List the schedule entries of a space.
#[derive(Debug, Clone, Copy)]
pub struct CmdEntryList {
    pub space: u64,
    pub blocks: bool,
    pub output_format: ArgOutputFormat,
}

impl CmdEntryList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("List schedule entries")
            .arg(
                arg!(<SPACE> "Space identifier")
                    .value_parser(value_parser!(u64)),
            )
            .arg(arg!(--blocks "List blocks and classes instead of availability"))
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            space: *matches.get_one("SPACE").expect("SPACE is required"),
            blocks: matches.get_flag("blocks"),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, ctx: &Context) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing schedule entries...");
        let entries = if self.blocks {
            ctx.client.list_blocks(self.space).await?
        } else {
            ctx.client.list_availability(self.space).await?
        };

        match self.output_format {
            ArgOutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
            ArgOutputFormat::Table if entries.is_empty() => {
                println!("{}", "No entries found".italic());
            }
            ArgOutputFormat::Table => {
                for entry in &entries {
                    println!(
                        "#{}  {}  {}  {}",
                        entry.id,
                        kind_label(entry.kind),
                        schedule_label(entry),
                        entry.title(),
                    );
                }
            }
        }
        Ok(())
    }
}

fn parse_time(s: &str) -> Result<NaiveTime, Box<dyn Error>> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| format!("Invalid time: {s}, expected HH:MM").into())
}

fn schedule_label(entry: &ScheduleEntry) -> String {
    match entry.schedule {
        EntrySchedule::Weekly {
            weekday,
            start,
            end,
        } => format!("{weekday} {}~{}", start.format("%H:%M"), end.format("%H:%M")),
        EntrySchedule::OneOff {
            first,
            last,
            start,
            end,
        } => format!(
            "{first}..{last} {}~{}",
            start.format("%H:%M"),
            end.format("%H:%M")
        ),
    }
}

fn kind_label(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::Availability => "availability",
        EntryKind::Block => "block",
        EntryKind::Class => "class",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entry_new_weekly() {
        let cmd = Command::new("test")
            .subcommand_required(true)
            .subcommand(CmdEntryNew::command());

        let matches = cmd
            .try_get_matches_from([
                "test", "new", "4", "--kind", "class", "--weekday", "2", "--from", "10:00",
                "--to", "12:00", "--notes", "Fisica II",
            ])
            .unwrap();
        let sub_matches = matches.subcommand_matches("new").unwrap();
        let parsed = CmdEntryNew::from(sub_matches);

        assert_eq!(parsed.space, 4);
        assert_eq!(parsed.kind, EntryKind::Class);
        assert_eq!(parsed.weekday, Some(2));
        assert_eq!(parsed.notes, Some("Fisica II".to_string()));
    }

    #[test]
    fn test_parse_entry_new_rejects_weekday_with_dates() {
        let cmd = Command::new("test")
            .subcommand_required(true)
            .subcommand(CmdEntryNew::command());

        let result = cmd.try_get_matches_from([
            "test",
            "new",
            "4",
            "--weekday",
            "2",
            "--first",
            "2024-05-06",
            "--last",
            "2024-05-10",
            "--from",
            "10:00",
            "--to",
            "12:00",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_entry_new_first_requires_last() {
        let cmd = Command::new("test")
            .subcommand_required(true)
            .subcommand(CmdEntryNew::command());

        let result = cmd.try_get_matches_from([
            "test",
            "new",
            "4",
            "--first",
            "2024-05-06",
            "--from",
            "10:00",
            "--to",
            "12:00",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_entry_list() {
        let cmd = Command::new("test")
            .subcommand_required(true)
            .subcommand(CmdEntryList::command());

        let matches = cmd
            .try_get_matches_from(["test", "list", "4", "--blocks"])
            .unwrap();
        let sub_matches = matches.subcommand_matches("list").unwrap();
        let parsed = CmdEntryList::from(sub_matches);

        assert_eq!(parsed.space, 4);
        assert!(parsed.blocks);
    }

    #[test]
    fn test_parse_time_formats() {
        assert!(parse_time("10:00").is_ok());
        assert!(parse_time("10:00:30").is_ok());
        assert!(parse_time("25:00").is_err());
    }
}
