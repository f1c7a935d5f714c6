//! Robot heading as exposed by the contract's `direction` view

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Compass heading of the robot. Serialized as the bare variant name,
/// the same way the contract returns it (`"South"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Heading after one `turn_right`
    pub fn turned_right(self) -> Self {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }

    /// Heading after one `turn_left`
    pub fn turned_left(self) -> Self {
        match self {
            Direction::North => Direction::West,
            Direction::East => Direction::North,
            Direction::South => Direction::East,
            Direction::West => Direction::South,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::North => "North",
            Direction::East => "East",
            Direction::South => "South",
            Direction::West => "West",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "North" => Ok(Direction::North),
            "East" => Ok(Direction::East),
            "South" => Ok(Direction::South),
            "West" => Ok(Direction::West),
            other => Err(crate::Error::config(
                "direction",
                &format!("Unknown direction: {}", other),
            )),
        }
    }
}
