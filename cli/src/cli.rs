// SPDX-FileCopyrightText: 2026 Mariana Rey <sala@mrey.dev>
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;
use std::{error::Error, ffi::OsString, path::PathBuf};

use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;

use sala_client::SpaceClient;
use sala_core::{APP_NAME, Config};

use crate::cmd_desk::{CmdDeskAttend, CmdDeskClose, CmdDeskOpen, CmdDeskShow};
use crate::cmd_entry::{CmdEntryDelete, CmdEntryList, CmdEntryNew};
use crate::cmd_reserve::CmdReserve;
use crate::cmd_schedule::CmdSchedule;
use crate::cmd_slot::CmdSlot;
use crate::cmd_space::CmdSpace;
use crate::config::parse_config;

/// Run the sala command-line interface.
pub async fn run() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    match Cli::parse() {
        Ok(cli) => {
            if let Err(e) = cli.run().await {
                println!("{} {}", "Error:".red(), e);
            }
        }
        Err(e) => println!("{} {}", "Error:".red(), e),
    };
    Ok(())
}

/// Shared handles every command runs against.
#[derive(Debug)]
pub(crate) struct Context {
    pub config: Config,
    pub client: SpaceClient,
}

impl Context {
    async fn init(config: Option<PathBuf>) -> Result<Self, Box<dyn Error>> {
        tracing::debug!("Parsing configuration...");
        let (config, api, session) = parse_config(config).await?;
        let client = SpaceClient::new(api, Arc::new(session))?;
        Ok(Self { config, client })
    }
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("Campus space reservations from the command line.")
            .author("Mariana Rey <sala@mrey.dev>")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(true)
            .arg_required_else_help(true)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $XDG_CONFIG_HOME/sala/config.toml on Linux and MacOS, \
%LOCALAPPDATA%/sala/config.toml on Windows.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .subcommand(CmdSpace::command())
            .subcommand(CmdSchedule::command())
            .subcommand(CmdSlot::command())
            .subcommand(CmdReserve::command())
            .subcommand(
                Command::new("entry")
                    .alias("e")
                    .about("Manage availability windows, blocks and classes")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdEntryNew::command())
                    .subcommand(CmdEntryDelete::command())
                    .subcommand(CmdEntryList::command()),
            )
            .subcommand(
                Command::new("desk")
                    .alias("d")
                    .about("Register front-desk steps")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdDeskOpen::command())
                    .subcommand(CmdDeskAttend::command())
                    .subcommand(CmdDeskClose::command())
                    .subcommand(CmdDeskShow::command()),
            )
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::*;
        let command = match matches.subcommand() {
            Some((CmdSpace::NAME, matches)) => Space(CmdSpace::from(matches)),
            Some((CmdSchedule::NAME, matches)) => Schedule(CmdSchedule::from(matches)),
            Some((CmdSlot::NAME, matches)) => Slot(CmdSlot::from(matches)),
            Some((CmdReserve::NAME, matches)) => Reserve(CmdReserve::from(matches)),
            Some(("entry", matches)) => match matches.subcommand() {
                Some((CmdEntryNew::NAME, matches)) => EntryNew(CmdEntryNew::from(matches)),
                Some((CmdEntryDelete::NAME, matches)) => EntryDelete(CmdEntryDelete::from(matches)),
                Some((CmdEntryList::NAME, matches)) => EntryList(CmdEntryList::from(matches)),
                _ => unreachable!(),
            },
            Some(("desk", matches)) => match matches.subcommand() {
                Some((CmdDeskOpen::NAME, matches)) => DeskOpen(CmdDeskOpen::from(matches)),
                Some((CmdDeskAttend::NAME, matches)) => DeskAttend(CmdDeskAttend::from(matches)),
                Some((CmdDeskClose::NAME, matches)) => DeskClose(CmdDeskClose::from(matches)),
                Some((CmdDeskShow::NAME, matches)) => DeskShow(CmdDeskShow::from(matches)),
                _ => unreachable!(),
            },
            _ => unreachable!(),
        };

        let config = matches.get_one("config").cloned();
        Ok(Cli { config, command })
    }

    /// Run the command
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config).await
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// Show a space
    Space(CmdSpace),

    /// Show a space's calendar
    Schedule(CmdSchedule),

    /// Check whether a slot is free
    Slot(CmdSlot),

    /// Reserve a space
    Reserve(CmdReserve),

    /// Add a schedule entry
    EntryNew(CmdEntryNew),

    /// Delete a schedule entry
    EntryDelete(CmdEntryDelete),

    /// List schedule entries
    EntryList(CmdEntryList),

    /// Register the opening of a space
    DeskOpen(CmdDeskOpen),

    /// Confirm attendance
    DeskAttend(CmdDeskAttend),

    /// Register the closure of a space
    DeskClose(CmdDeskClose),

    /// Show a reservation's front-desk trail
    DeskShow(CmdDeskShow),
}

impl Commands {
    /// Run the command with the given configuration
    #[rustfmt::skip]
    pub async fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        use Commands::*;
        let ctx = Context::init(config).await?;
        match self {
            Space(a)       => a.run(&ctx).await,
            Schedule(a)    => a.run(&ctx).await,
            Slot(a)        => a.run(&ctx).await,
            Reserve(a)     => a.run(&ctx).await,
            EntryNew(a)    => a.run(&ctx).await,
            EntryDelete(a) => a.run(&ctx).await,
            EntryList(a)   => a.run(&ctx).await,
            DeskOpen(a)    => a.run(&ctx).await,
            DeskAttend(a)  => a.run(&ctx).await,
            DeskClose(a)   => a.run(&ctx).await,
            DeskShow(a)    => a.run(&ctx).await,
        }
    }
}
