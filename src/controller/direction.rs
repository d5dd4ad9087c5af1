use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::controller::PadError;

// One of the four pad zones. "No direction" is `Option::<Direction>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Input zones map one-to-one onto directions.
pub type Zone = Direction;

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = PadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            other => Err(PadError::ParseError(format!("unknown zone '{}'", other))),
        }
    }
}

// What caused an emission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmissionKind {
    Press,
    Repeat,
    Release,
}

/// A single emitted direction value with the moment it left the controller.
///
/// Produced by [`ChannelObserver`](crate::controller::observer::ChannelObserver);
/// plain callback observers only receive the direction itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionEvent {
    pub direction: Option<Direction>,
    pub kind: EmissionKind,
    pub timestamp: DateTime<Local>,
}

impl DirectionEvent {
    pub fn new(direction: Option<Direction>, kind: EmissionKind) -> Self {
        Self {
            direction,
            kind,
            timestamp: Local::now(),
        }
    }
}

// Observable controller state, published to views for highlight feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PadState {
    #[default]
    Idle,
    Held(Direction),
    TornDown,
}

impl PadState {
    pub fn active_direction(&self) -> Option<Direction> {
        match self {
            PadState::Held(direction) => Some(*direction),
            PadState::Idle | PadState::TornDown => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_zone_names_case_insensitively() {
        assert_eq!("UP".parse::<Direction>().unwrap(), Direction::Up);
        assert_eq!(" left ".parse::<Direction>().unwrap(), Direction::Left);
        assert!("diagonal".parse::<Direction>().is_err());
    }

    #[test]
    fn display_matches_parse() {
        for direction in Direction::ALL {
            assert_eq!(direction.to_string().parse::<Direction>().unwrap(), direction);
        }
    }

    #[test]
    fn only_held_state_reports_a_direction() {
        assert_eq!(PadState::Idle.active_direction(), None);
        assert_eq!(PadState::TornDown.active_direction(), None);
        assert_eq!(
            PadState::Held(Direction::Right).active_direction(),
            Some(Direction::Right)
        );
    }
}
