//! Core types shared by the filetree, grid, and query layers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// NodeId: unique identifier of a content node, derived from its file or directory name
pub type NodeId = String;

/// Id of the synthetic folder wrapping the top-level listing
pub const ROOT_ID: &str = "root";

/// Integer grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coords {
    pub x: u32,
    pub y: u32,
}

impl Coords {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Axis direction used for spatial navigation between tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    /// Accepts plain direction names and browser arrow-key names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" | "ArrowLeft" => Ok(Direction::Left),
            "right" | "ArrowRight" => Ok(Direction::Right),
            "up" | "ArrowUp" => Ok(Direction::Up),
            "down" | "ArrowDown" => Ok(Direction::Down),
            other => Err(format!(
                "Unknown direction: {} (expected left, right, up, or down)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_parses_arrow_keys() {
        assert_eq!("ArrowLeft".parse::<Direction>().unwrap(), Direction::Left);
        assert_eq!("down".parse::<Direction>().unwrap(), Direction::Down);
        assert!("Enter".parse::<Direction>().is_err());
    }

    #[test]
    fn test_coords_order_is_row_major_by_x_then_y() {
        let mut cells = vec![Coords::new(1, 0), Coords::new(0, 2), Coords::new(0, 1)];
        cells.sort();
        assert_eq!(
            cells,
            vec![Coords::new(0, 1), Coords::new(0, 2), Coords::new(1, 0)]
        );
    }
}
