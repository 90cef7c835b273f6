//! Grid coordinates and cardinal directions

use core::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::Doors;

/// A grid cell index. Identifies a room: no two rooms share a coordinate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    /// Absolute grid origin `(0, 0)`
    pub const ORIGIN: Coord = Coord { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The adjacent coordinate in `dir`, unchecked against any bounds
    pub const fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.offset();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Cardinal direction. North is `+y`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Order in which a frontier cell proposes its neighbors
    pub const EXPANSION_ORDER: [Direction; 4] = [
        Direction::West,
        Direction::East,
        Direction::North,
        Direction::South,
    ];

    /// `(dx, dy)` step for this direction
    pub const fn offset(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    pub const fn opposite(&self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Door flag on the side of a room facing this direction
    pub const fn door(&self) -> Doors {
        match self {
            Direction::North => Doors::NORTH,
            Direction::South => Doors::SOUTH,
            Direction::East => Doors::EAST,
            Direction::West => Doors::WEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_step_and_back() {
        let c = Coord::new(3, 4);
        for dir in Direction::iter() {
            assert_eq!(c.step(dir).step(dir.opposite()), c);
            assert_ne!(c.step(dir), c);
        }
    }

    #[test]
    fn test_north_is_up() {
        assert_eq!(Coord::new(5, 5).step(Direction::North), Coord::new(5, 6));
        assert_eq!(Coord::new(5, 5).step(Direction::West), Coord::new(4, 5));
    }

    #[test]
    fn test_expansion_order_covers_all() {
        for dir in Direction::iter() {
            assert!(Direction::EXPANSION_ORDER.contains(&dir));
        }
    }

    #[test]
    fn test_door_flags_distinct() {
        let all = Direction::iter().fold(Doors::empty(), |acc, d| {
            assert!(!acc.contains(d.door()));
            acc | d.door()
        });
        assert_eq!(all, Doors::all());
    }

    #[test]
    fn test_display() {
        assert_eq!(Coord::new(5, -1).to_string(), "(5, -1)");
        assert_eq!(Direction::North.to_string(), "north");
    }
}
