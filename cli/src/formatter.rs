// SPDX-FileCopyrightText: 2026 Mariana Rey <sala@mrey.dev>
//
// SPDX-License-Identifier: Apache-2.0

//! Calendar output: a colored table or JSON.

use std::fmt;

use colored::{ColoredString, Colorize};
use unicode_width::UnicodeWidthStr;

use sala_core::{Occurrence, OccurrenceKind, ReservationStatus};

use crate::util::ArgOutputFormat;

/// Formats expanded occurrences for the terminal.
#[derive(Debug, Clone, Copy)]
pub struct OccurrenceFormatter {
    format: ArgOutputFormat,
}

impl OccurrenceFormatter {
    pub fn new() -> Self {
        Self {
            format: ArgOutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: ArgOutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a>(&'a self, occurrences: &'a [Occurrence]) -> Display<'a> {
        Display {
            occurrences,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    occurrences: &'a [Occurrence],
    formatter: &'a OccurrenceFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.formatter.format {
            ArgOutputFormat::Json => {
                let json = serde_json::to_string_pretty(self.occurrences)
                    .unwrap_or_else(|_| "[]".to_string());
                write!(f, "{json}")
            }
            ArgOutputFormat::Table => self.fmt_table(f),
        }
    }
}

impl Display<'_> {
    fn fmt_table(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<_> = self
            .occurrences
            .iter()
            .map(|o| (time_range(o), kind_label(o.kind), o.title.as_str()))
            .collect();

        let time_width = rows.iter().map(|(t, _, _)| t.width()).max().unwrap_or(0);
        let kind_width = rows
            .iter()
            .map(|(_, k, _)| k.label.width())
            .max()
            .unwrap_or(0);

        for (i, (time, kind, title)) in rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let time_pad = " ".repeat(time_width - time.width());
            let kind_pad = " ".repeat(kind_width - kind.label.width());
            write!(f, "{time}{time_pad}  {}{kind_pad}  {title}", kind.colored)?;
        }
        Ok(())
    }
}

fn time_range(o: &Occurrence) -> String {
    if o.start.date() == o.end.date() {
        format!(
            "{} {}~{}",
            o.start.date().format("%Y-%m-%d"),
            o.start.time().format("%H:%M"),
            o.end.time().format("%H:%M")
        )
    } else {
        format!(
            "{}~{}",
            o.start.format("%Y-%m-%d %H:%M"),
            o.end.format("%Y-%m-%d %H:%M")
        )
    }
}

struct KindLabel {
    label: &'static str,
    colored: ColoredString,
}

fn kind_label(kind: OccurrenceKind) -> KindLabel {
    let (label, colored) = match kind {
        OccurrenceKind::Inactive => ("inactivo", "inactivo".dimmed()),
        OccurrenceKind::Block => ("bloqueo", "bloqueo".red()),
        OccurrenceKind::Class => ("clase", "clase".blue()),
        OccurrenceKind::Reservation(ReservationStatus::Approved) => ("reserva", "reserva".green()),
        OccurrenceKind::Reservation(ReservationStatus::Pending) => {
            ("pendiente", "pendiente".yellow())
        }
        OccurrenceKind::Reservation(ReservationStatus::Rejected) => {
            ("rechazada", "rechazada".dimmed())
        }
    };
    KindLabel { label, colored }
}

impl fmt::Debug for KindLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KindLabel").field("label", &self.label).finish()
    }
}
