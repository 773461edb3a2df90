// SPDX-FileCopyrightText: 2026 Mariana Rey <sala@mrey.dev>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg, value_parser};
use colored::Colorize;

use sala_core::Space;

use crate::cli::Context;
use crate::util::ArgOutputFormat;

/// Show the details of one space.
#[derive(Debug, Clone, Copy)]
pub struct CmdSpace {
    pub space: u64,
    pub output_format: ArgOutputFormat,
}

impl CmdSpace {
    pub const NAME: &str = "space";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Show a space")
            .arg(
                arg!(<SPACE> "Space identifier")
                    .value_parser(value_parser!(u64)),
            )
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            space: *matches.get_one("SPACE").expect("SPACE is required"),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, ctx: &Context) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "showing space...");
        let space = ctx.client.get_space(self.space).await?;
        match self.output_format {
            ArgOutputFormat::Json => println!("{}", serde_json::to_string_pretty(&space)?),
            ArgOutputFormat::Table => print_space(&space),
        }
        Ok(())
    }
}

fn print_space(space: &Space) {
    println!("{} {} ({})", space.code.bold(), space.name, space.kind);
    println!("  capacity: {}", space.capacity);
    if let Some(floor) = &space.floor {
        println!("  floor: {floor}");
    }
    if let Some(location) = &space.location {
        println!("  location: {location}");
    }
    if !space.resources.is_empty() {
        println!("  resources: {}", space.resources.join(", "));
    }
    if !space.active {
        println!(
            "  {}",
            "Este espacio esta inactivo, no es posible reservarlo.".yellow()
        );
    }
}
