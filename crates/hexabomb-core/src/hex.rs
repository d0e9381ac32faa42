//! Hex coordinate system using axial coordinates (q, r).
//!
//! The board is a set of hexagonal cells addressed by two integers. The third
//! cubic coordinate `z = -q - r` is never stored; it only shows up in the
//! naming of the movement directions.

use serde::{Deserialize, Serialize};

/// One of the six movement directions of a character.
///
/// Each direction changes exactly two of the three cubic coordinates, so
/// `q + r + z` stays zero whichever way a character walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "x+")]
    XPlus,
    #[serde(rename = "x-")]
    XMinus,
    #[serde(rename = "y+")]
    YPlus,
    #[serde(rename = "y-")]
    YMinus,
    #[serde(rename = "z+")]
    ZPlus,
    #[serde(rename = "z-")]
    ZMinus,
}

impl Direction {
    /// All six directions, positive before negative on each axis
    pub const ALL: [Direction; 6] = [
        Direction::XPlus,
        Direction::YPlus,
        Direction::ZPlus,
        Direction::XMinus,
        Direction::YMinus,
        Direction::ZMinus,
    ];

    /// Axial `(dq, dr)` offset of one step in this direction
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::XPlus => (1, 0),
            Direction::XMinus => (-1, 0),
            Direction::YPlus => (0, 1),
            Direction::YMinus => (0, -1),
            Direction::ZPlus => (-1, 1),
            Direction::ZMinus => (1, -1),
        }
    }

    /// The direction that undoes a step in this one
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::XPlus => Direction::XMinus,
            Direction::XMinus => Direction::XPlus,
            Direction::YPlus => Direction::YMinus,
            Direction::YMinus => Direction::YPlus,
            Direction::ZPlus => Direction::ZMinus,
            Direction::ZMinus => Direction::ZPlus,
        }
    }

    /// Wire name, as sent in the `direction` field of a move action
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::XPlus => "x+",
            Direction::XMinus => "x-",
            Direction::YPlus => "y+",
            Direction::YMinus => "y-",
            Direction::ZPlus => "z+",
            Direction::ZMinus => "z-",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Axial coordinate of a board cell.
///
/// No bounds are checked here: which coordinates exist is decided by the map
/// the server loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Coord {
    pub q: i32,
    pub r: i32,
}

impl Coord {
    /// Create a new coordinate
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// The implicit third coordinate (z = -q - r)
    pub const fn z(&self) -> i32 {
        -self.q - self.r
    }

    /// The cell reached by one step in `direction`
    pub const fn neighbor(&self, direction: Direction) -> Coord {
        let (dq, dr) = direction.delta();
        Coord::new(self.q + dq, self.r + dr)
    }

    /// The six neighboring cells, in [`Direction::ALL`] order
    pub fn neighbors(&self) -> [Coord; 6] {
        Direction::ALL.map(|dir| self.neighbor(dir))
    }

    /// Distance to another cell (in hex steps)
    pub fn distance_to(&self, other: &Coord) -> u64 {
        // Widened so that coordinates near the i32 limits cannot overflow
        let (q1, r1) = (i64::from(self.q), i64::from(self.r));
        let (q2, r2) = (i64::from(other.q), i64::from(other.r));
        let dq = (q1 - q2).abs();
        let dr = (r1 - r2).abs();
        let dz = ((-q1 - r1) - (-q2 - r2)).abs();
        ((dq + dr + dz) / 2) as u64
    }

    /// Convert "odd-r" offset coordinates (as stored by Tiled maps) to axial.
    pub const fn from_odd_r(col: i32, row: i32) -> Self {
        let q = col - (row - (row & 1)) / 2;
        Self::new(q, row)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}
