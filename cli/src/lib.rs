// SPDX-FileCopyrightText: 2026 Mariana Rey <sala@mrey.dev>
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line front-end for the sala reservation tools.

mod cli;
mod cmd_desk;
mod cmd_entry;
mod cmd_reserve;
mod cmd_schedule;
mod cmd_slot;
mod cmd_space;
mod config;
mod formatter;
mod util;

pub use crate::cli::{Cli, Commands, run};
