//! Integer lattice geometry: positions, directions, and distance heuristics.
//!
//! # Axes
//!
//! The lattice is unbounded and uses a y-up convention:
//!
//! | Direction | Unit vector   |
//! |-----------|---------------|
//! | north     | ( 0,  0, -1)  |
//! | east      | ( 1,  0,  0)  |
//! | south     | ( 0,  0,  1)  |
//! | west      | (-1,  0,  0)  |
//! | up        | ( 0,  1,  0)  |
//! | down      | ( 0, -1,  0)  |
//!
//! The four horizontal directions form a clockwise rotation cycle
//! (north → east → south → west) used for turn-magnitude computation.
//! `up`/`down` sit outside the cycle.
//!
//! # Range
//!
//! Coordinates are `i32`.  Position arithmetic saturates at the limits, so
//! a step off the edge of that range stays where it is, and distances
//! saturate at `u32::MAX`.

use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use crate::{CoreError, CoreResult};

// ── Position ──────────────────────────────────────────────────────────────────

/// A cell on the 3-D integer lattice.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0, y: 0, z: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Manhattan (L1) distance to `other`, saturating at `u32::MAX`.
    #[inline]
    pub fn manhattan(self, other: Position) -> u32 {
        self.x
            .abs_diff(other.x)
            .saturating_add(self.y.abs_diff(other.y))
            .saturating_add(self.z.abs_diff(other.z))
    }

    /// Smallest Manhattan distance from `self` to any of `targets`.
    ///
    /// Returns `None` for an empty target set.
    pub fn multi_manhattan(self, targets: &[Position]) -> Option<u32> {
        targets.iter().map(|&t| self.manhattan(t)).min()
    }

    /// The cell one unit away in `dir`.
    #[inline]
    pub fn step(self, dir: Direction) -> Position {
        self + dir.vector()
    }

    /// All six face-adjacent cells, paired with the move direction, in
    /// [`Direction::ALL`] order.
    pub fn neighbors(self) -> [(Direction, Position); 6] {
        Direction::ALL.map(|d| (d, self.step(d)))
    }

    /// `true` if `self` is a unit vector along exactly one axis.
    #[inline]
    pub fn is_unit(self) -> bool {
        self.manhattan(Position::ORIGIN) == 1
    }

    /// Stable `"x,y,z"` key used by map serializers.
    pub fn key(self) -> String {
        self.to_string()
    }
}

impl Add for Position {
    type Output = Position;
    #[inline]
    fn add(self, rhs: Position) -> Position {
        Position::new(
            self.x.saturating_add(rhs.x),
            self.y.saturating_add(rhs.y),
            self.z.saturating_add(rhs.z),
        )
    }
}

impl Sub for Position {
    type Output = Position;
    #[inline]
    fn sub(self, rhs: Position) -> Position {
        Position::new(
            self.x.saturating_sub(rhs.x),
            self.y.saturating_sub(rhs.y),
            self.z.saturating_sub(rhs.z),
        )
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

impl FromStr for Position {
    type Err = CoreError;

    /// Parse the `"x,y,z"` key produced by `Display`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',').map(|p| p.trim().parse::<i32>());
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(Ok(x)), Some(Ok(y)), Some(Ok(z)), None) => Ok(Position::new(x, y, z)),
            _ => Err(CoreError::Parse(format!("bad position key {s:?}"))),
        }
    }
}

// ── Direction ─────────────────────────────────────────────────────────────────

/// One of the six axis-aligned movement directions.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    North,
    East,
    South,
    West,
    Up,
    Down,
}

impl Direction {
    /// All directions; the first four are the horizontal rotation cycle.
    pub const ALL: [Direction; 6] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::Up,
        Direction::Down,
    ];

    pub const HORIZONTAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    #[inline]
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// Position in the clockwise horizontal cycle, `None` for up/down.
    #[inline]
    pub fn rotation_index(self) -> Option<u8> {
        match self {
            Direction::North => Some(0),
            Direction::East => Some(1),
            Direction::South => Some(2),
            Direction::West => Some(3),
            Direction::Up | Direction::Down => None,
        }
    }

    /// Unit vector for this direction.
    #[inline]
    pub fn vector(self) -> Position {
        match self {
            Direction::North => Position::new(0, 0, -1),
            Direction::East => Position::new(1, 0, 0),
            Direction::South => Position::new(0, 0, 1),
            Direction::West => Position::new(-1, 0, 0),
            Direction::Up => Position::new(0, 1, 0),
            Direction::Down => Position::new(0, -1, 0),
        }
    }

    /// Reverse lookup of [`vector`](Self::vector).
    ///
    /// Only unit-length axis-aligned vectors map to a direction; anything
    /// else is a caller error.
    pub fn from_vector(v: Position) -> CoreResult<Direction> {
        Direction::ALL
            .into_iter()
            .find(|d| d.vector() == v)
            .ok_or(CoreError::NotUnitVector(v))
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Rotate a horizontal direction clockwise by `quarter_turns`.
    /// Vertical directions are returned unchanged.
    pub fn rotate(self, quarter_turns: i32) -> Direction {
        match self.rotation_index() {
            Some(i) => Direction::HORIZONTAL[(i as i32 + quarter_turns).rem_euclid(4) as usize],
            None => self,
        }
    }

    /// Cyclic index distance `(self - other) mod 4` for two horizontal
    /// directions; `None` if either is vertical.
    #[inline]
    pub fn rotation_distance(self, other: Direction) -> Option<u8> {
        let a = self.rotation_index()?;
        let b = other.rotation_index()?;
        Some((a + 4 - b) % 4)
    }

    /// Movement direction expressed relative to an agent's `facing`.
    ///
    /// Vertical moves pass through as `Up`/`Down` whatever the facing.
    /// A vertical `facing` has no horizontal frame, so every horizontal move
    /// is reported as `Front`.
    pub fn relative_to(self, facing: Direction) -> Relative {
        match self {
            Direction::Up => Relative::Up,
            Direction::Down => Relative::Down,
            _ => match self.rotation_distance(facing) {
                Some(1) => Relative::Right,
                Some(2) => Relative::Back,
                Some(3) => Relative::Left,
                _ => Relative::Front,
            },
        }
    }

    /// The facing an agent holds after moving in `self`.
    ///
    /// Horizontal moves turn the agent; vertical moves keep `facing`.
    #[inline]
    pub fn facing_after(self, facing: Direction) -> Direction {
        if self.is_vertical() { facing } else { self }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::Parse(format!("unknown direction {s:?}")))
    }
}

// ── Relative ──────────────────────────────────────────────────────────────────

/// A move expressed in the agent's own frame.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Relative {
    Front,
    Right,
    Back,
    Left,
    Up,
    Down,
}

impl Relative {
    /// Quarter turns needed before the move: 0 ahead/vertical, 1 sideways,
    /// 2 to reverse.
    #[inline]
    pub fn quarter_turns(self) -> u32 {
        match self {
            Relative::Front | Relative::Up | Relative::Down => 0,
            Relative::Left | Relative::Right => 1,
            Relative::Back => 2,
        }
    }
}
