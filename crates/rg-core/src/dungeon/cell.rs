//! Occupancy markers and door flags

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Occupancy of one grid cell
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum CellState {
    #[default]
    Empty = 0,
    Occupied = 1,
}

impl CellState {
    pub const fn is_occupied(&self) -> bool {
        matches!(self, CellState::Occupied)
    }

    /// Get the display character for this cell
    pub const fn symbol(&self) -> char {
        match self {
            CellState::Empty => '.',
            CellState::Occupied => '#',
        }
    }
}

bitflags! {
    /// Open doors of a room, one flag per side. Empty means all closed.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct Doors: u8 {
        const NORTH = 0x01;
        const SOUTH = 0x02;
        const EAST = 0x04;
        const WEST = 0x08;
    }
}

// Manual serde impl for Doors
impl Serialize for Doors {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Doors {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u8::deserialize(deserializer)?;
        Ok(Doors::from_bits_truncate(bits))
    }
}
