//! Grid vectors and the four canonical headings.
//!
//! Positions and headings share one integer pair type. Headings are a closed
//! enum so every `match` over them is checked for exhaustiveness.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Integer pair used for both grid cells and unit headings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: i32,
    pub y: i32,
}

/// A grid cell. `(0, 0)` is the top-left corner.
pub type Position = Vector2;

impl Vector2 {
    /// Create a new vector.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell one step away in `direction`.
    #[must_use]
    pub const fn offset(self, direction: Direction) -> Self {
        let delta = direction.vector();
        Self::new(self.x + delta.x, self.y + delta.y)
    }

    /// Check whether this cell lies on a `width` x `height` grid.
    #[must_use]
    pub const fn within(self, width: u32, height: u32) -> bool {
        self.x >= 0 && self.y >= 0 && (self.x as u32) < width && (self.y as u32) < height
    }
}

impl std::fmt::Display for Vector2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Heading of travel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All headings, in key-table order.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Unit vector for this heading. Up is negative y.
    #[must_use]
    pub const fn vector(self) -> Vector2 {
        match self {
            Direction::Up => Vector2::new(0, -1),
            Direction::Down => Vector2::new(0, 1),
            Direction::Left => Vector2::new(-1, 0),
            Direction::Right => Vector2::new(1, 0),
        }
    }

    /// The reverse heading.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// True if `other` points exactly the other way.
    #[must_use]
    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Look up a heading by its input key.
    ///
    /// Keys are the exact lower-case names `up`, `down`, `left` and `right`.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Input key for this heading.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// A direction key that names none of the four headings.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown direction key `{0}`")]
pub struct UnknownDirection(pub String);

impl std::str::FromStr for Direction {
    type Err = UnknownDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::from_key(s).ok_or_else(|| UnknownDirection(s.to_string()))
    }
}
