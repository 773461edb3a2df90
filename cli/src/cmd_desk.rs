// SPDX-FileCopyrightText: 2026 Mariana Rey <sala@mrey.dev>
//
// SPDX-License-Identifier: Apache-2.0

//! Front-desk subcommands: registering opening, attendance and closure,
//! and showing a reservation's paper trail.

use std::error::Error;

use clap::{Arg, ArgMatches, Command, arg, value_parser};
use colored::Colorize;

use sala_core::{DeskStep, FrontDeskLog, RegisteredStep};

use crate::cli::Context;
use crate::util::ArgOutputFormat;

/// Register the physical opening of a space.
#[derive(Debug, Clone)]
pub struct CmdDeskOpen {
    pub reservation: u64,
    pub actor: String,
    pub notes: Option<String>,
}

impl CmdDeskOpen {
    pub const NAME: &str = "open";

    pub fn command() -> Command {
        step_command(Self::NAME, "Register the opening of the space")
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let (reservation, actor, notes) = step_args(matches);
        Self {
            reservation,
            actor,
            notes,
        }
    }

    pub async fn run(self, ctx: &Context) -> Result<(), Box<dyn Error>> {
        register(ctx, self.reservation, DeskStep::Opening, self.actor, self.notes).await
    }
}

/// Confirm that the attendees showed up.
#[derive(Debug, Clone)]
pub struct CmdDeskAttend {
    pub reservation: u64,
    pub actor: String,
    pub notes: Option<String>,
}

impl CmdDeskAttend {
    pub const NAME: &str = "attend";

    pub fn command() -> Command {
        step_command(Self::NAME, "Confirm attendance")
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let (reservation, actor, notes) = step_args(matches);
        Self {
            reservation,
            actor,
            notes,
        }
    }

    pub async fn run(self, ctx: &Context) -> Result<(), Box<dyn Error>> {
        register(
            ctx,
            self.reservation,
            DeskStep::Attendance,
            self.actor,
            self.notes,
        )
        .await
    }
}

/// Register the closure of a space after use.
#[derive(Debug, Clone)]
pub struct CmdDeskClose {
    pub reservation: u64,
    pub actor: String,
    pub notes: Option<String>,
}

impl CmdDeskClose {
    pub const NAME: &str = "close";

    pub fn command() -> Command {
        step_command(Self::NAME, "Register the closure of the space")
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let (reservation, actor, notes) = step_args(matches);
        Self {
            reservation,
            actor,
            notes,
        }
    }

    pub async fn run(self, ctx: &Context) -> Result<(), Box<dyn Error>> {
        register(ctx, self.reservation, DeskStep::Closure, self.actor, self.notes).await
    }
}

/// Show the front-desk trail of a reservation.
#[derive(Debug, Clone, Copy)]
pub struct CmdDeskShow {
    pub reservation: u64,
    pub output_format: ArgOutputFormat,
}

impl CmdDeskShow {
    pub const NAME: &str = "show";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Show the front-desk trail of a reservation")
            .arg(reservation_arg())
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            reservation: *matches
                .get_one("RESERVATION")
                .expect("RESERVATION is required"),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, ctx: &Context) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "showing front-desk trail...");
        let log = ctx.client.desk_log(self.reservation).await?;
        match self.output_format {
            ArgOutputFormat::Json => println!("{}", serde_json::to_string_pretty(&log)?),
            ArgOutputFormat::Table => print_log(&log),
        }
        Ok(())
    }
}

fn reservation_arg() -> Arg {
    arg!(<RESERVATION> "Reservation identifier").value_parser(value_parser!(u64))
}

fn step_command(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .arg(reservation_arg())
        .arg(arg!(--actor <NAME> "Front-desk staff member").required(true))
        .arg(arg!(--notes <TEXT> "Remarks, e.g. why a room was opened late"))
}

fn step_args(matches: &ArgMatches) -> (u64, String, Option<String>) {
    (
        *matches
            .get_one("RESERVATION")
            .expect("RESERVATION is required"),
        matches
            .get_one::<String>("actor")
            .expect("--actor is required")
            .clone(),
        matches.get_one("notes").cloned(),
    )
}

async fn register(
    ctx: &Context,
    reservation: u64,
    step: DeskStep,
    actor: String,
    notes: Option<String>,
) -> Result<(), Box<dyn Error>> {
    tracing::debug!(%step, reservation, "registering front-desk step...");
    ctx.client
        .register_step(reservation, step, actor, notes)
        .await?;
    println!("Registered {step} for reservation #{reservation}");
    Ok(())
}

fn print_log(log: &FrontDeskLog) {
    println!("Reservation #{}", log.reservation);
    for step in [DeskStep::Opening, DeskStep::Attendance, DeskStep::Closure] {
        match log.step(step) {
            Some(registered) => print_step(step, registered),
            None => println!("  {:<10} {}", step.to_string(), "not registered".dimmed()),
        }
    }
    if log.is_open() {
        println!("  {}", "The space is currently open".yellow());
    }
}

fn print_step(step: DeskStep, registered: &RegisteredStep) {
    let when = registered.at.format("%Y-%m-%d %H:%M");
    match &registered.notes {
        Some(notes) => println!(
            "  {:<10} {when} by {} ({notes})",
            step.to_string(),
            registered.actor
        ),
        None => println!("  {:<10} {when} by {}", step.to_string(), registered.actor),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_desk_open() {
        let cmd = Command::new("test")
            .subcommand_required(true)
            .subcommand(CmdDeskOpen::command());

        let matches = cmd
            .try_get_matches_from([
                "test", "open", "7", "--actor", "porteria", "--notes", "llego tarde",
            ])
            .unwrap();
        let sub_matches = matches.subcommand_matches("open").unwrap();
        let parsed = CmdDeskOpen::from(sub_matches);

        assert_eq!(parsed.reservation, 7);
        assert_eq!(parsed.actor, "porteria");
        assert_eq!(parsed.notes, Some("llego tarde".to_string()));
    }

    #[test]
    fn test_parse_desk_step_requires_actor() {
        let cmd = Command::new("test")
            .subcommand_required(true)
            .subcommand(CmdDeskClose::command());
        assert!(cmd.try_get_matches_from(["test", "close", "7"]).is_err());
    }

    #[test]
    fn test_parse_desk_show() {
        let cmd = Command::new("test")
            .subcommand_required(true)
            .subcommand(CmdDeskShow::command());

        let matches = cmd
            .try_get_matches_from(["test", "show", "7", "--output-format", "json"])
            .unwrap();
        let sub_matches = matches.subcommand_matches("show").unwrap();
        let parsed = CmdDeskShow::from(sub_matches);

        assert_eq!(parsed.reservation, 7);
        assert_eq!(parsed.output_format, ArgOutputFormat::Json);
    }
}
