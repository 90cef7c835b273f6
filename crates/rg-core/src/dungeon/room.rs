//! Rooms placed on the grid

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use super::{Coord, Direction, Doors};

/// A committed room
///
/// The coordinate never changes after placement. Doors only open, and only
/// during finalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Room {
    pub coord: Coord,
    pub doors: Doors,
}

impl Room {
    /// New room with every door closed
    pub const fn new(coord: Coord) -> Self {
        Self {
            coord,
            doors: Doors::empty(),
        }
    }

    pub fn open_door(&mut self, dir: Direction) {
        self.doors.insert(dir.door());
    }

    pub fn is_open(&self, dir: Direction) -> bool {
        self.doors.contains(dir.door())
    }

    /// Directions with an open door, in north, south, east, west order
    pub fn open_directions(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::iter().filter(move |d| self.is_open(*d))
    }

    pub fn door_count(&self) -> usize {
        self.doors.bits().count_ones() as usize
    }
}
