// SPDX-FileCopyrightText: 2026 Mariana Rey <sala@mrey.dev>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A bookable physical space: a classroom, a laboratory or a shared hall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Space {
    /// Backend identifier.
    pub id: u64,

    /// Institutional code, e.g. "B-204".
    pub code: String,

    /// Human-readable name.
    pub name: String,

    /// What kind of space this is.
    pub kind: SpaceKind,

    /// Maximum number of occupants.
    pub capacity: u32,

    /// Floor label, if the building has one.
    pub floor: Option<String>,

    /// Free-form location description.
    pub location: Option<String>,

    /// Inactive spaces accept no new bookings.
    pub active: bool,

    /// Fixed resources available in the space (projector, whiteboard, ...).
    pub resources: Vec<String>,
}

/// The kind of a bookable space.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum SpaceKind {
    /// A regular classroom or meeting room.
    #[default]
    Room,

    /// A laboratory.
    Lab,

    /// An auditorium or multi-purpose hall.
    Hall,
}

const KIND_ROOM: &str = "room";
const KIND_LAB: &str = "lab";
const KIND_HALL: &str = "hall";

impl AsRef<str> for SpaceKind {
    fn as_ref(&self) -> &str {
        match self {
            SpaceKind::Room => KIND_ROOM,
            SpaceKind::Lab => KIND_LAB,
            SpaceKind::Hall => KIND_HALL,
        }
    }
}

impl Display for SpaceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for SpaceKind {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            KIND_ROOM => Ok(SpaceKind::Room),
            KIND_LAB => Ok(SpaceKind::Lab),
            KIND_HALL => Ok(SpaceKind::Hall),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_kind_round_trips_through_str() {
        for kind in [SpaceKind::Room, SpaceKind::Lab, SpaceKind::Hall] {
            assert_eq!(kind.as_ref().parse::<SpaceKind>(), Ok(kind));
        }
        assert!("warehouse".parse::<SpaceKind>().is_err());
    }
}
