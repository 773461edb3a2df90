// SPDX-FileCopyrightText: 2026 Mariana Rey <sala@mrey.dev>
//
// SPDX-License-Identifier: Apache-2.0

//! Front-desk workflow records.
//!
//! Each scheduled class or reservation can have its physical opening,
//! attendance confirmation and closure registered at the front desk.

use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One registered front-desk step: who did it, when, and any notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredStep {
    /// Front-desk staff member who registered the step.
    pub actor: String,

    /// When the step was registered.
    pub at: NaiveDateTime,

    /// Reason or remarks, e.g. why a room was opened late.
    pub notes: Option<String>,
}

/// Front-desk paper trail for one reservation occurrence.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontDeskLog {
    /// The reservation this trail belongs to.
    pub reservation: u64,

    /// Physical opening of the space.
    pub opening: Option<RegisteredStep>,

    /// Confirmation that the attendees showed up.
    pub attendance: Option<RegisteredStep>,

    /// Closure of the space after use.
    pub closure: Option<RegisteredStep>,
}

impl FrontDeskLog {
    /// The recorded step for `step`, if registered.
    pub fn step(&self, step: DeskStep) -> Option<&RegisteredStep> {
        match step {
            DeskStep::Opening => self.opening.as_ref(),
            DeskStep::Attendance => self.attendance.as_ref(),
            DeskStep::Closure => self.closure.as_ref(),
        }
    }

    /// Whether the space is currently open (opened but not yet closed).
    pub fn is_open(&self) -> bool {
        self.opening.is_some() && self.closure.is_none()
    }
}

/// The three registrable front-desk steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum DeskStep {
    /// The space was physically opened.
    Opening,

    /// Attendance was confirmed.
    Attendance,

    /// The space was closed after use.
    Closure,
}

const STEP_OPENING: &str = "opening";
const STEP_ATTENDANCE: &str = "attendance";
const STEP_CLOSURE: &str = "closure";

impl AsRef<str> for DeskStep {
    fn as_ref(&self) -> &str {
        match self {
            DeskStep::Opening => STEP_OPENING,
            DeskStep::Attendance => STEP_ATTENDANCE,
            DeskStep::Closure => STEP_CLOSURE,
        }
    }
}

impl Display for DeskStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for DeskStep {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            STEP_OPENING => Ok(DeskStep::Opening),
            STEP_ATTENDANCE => Ok(DeskStep::Attendance),
            STEP_CLOSURE => Ok(DeskStep::Closure),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn step_at(h: u32) -> RegisteredStep {
        RegisteredStep {
            actor: "porteria".to_string(),
            at: NaiveDate::from_ymd_opt(2024, 5, 8)
                .unwrap()
                .and_time(NaiveTime::from_hms_opt(h, 0, 0).unwrap()),
            notes: None,
        }
    }

    #[test]
    fn open_until_closed() {
        let mut log = FrontDeskLog {
            reservation: 7,
            ..Default::default()
        };
        assert!(!log.is_open());

        log.opening = Some(step_at(10));
        assert!(log.is_open());
        assert!(log.step(DeskStep::Opening).is_some());
        assert!(log.step(DeskStep::Closure).is_none());

        log.closure = Some(step_at(12));
        assert!(!log.is_open());
    }
}
