//! Dungeon layout system
//!
//! Contains the occupancy grid, rooms and doors, the generator state
//! machine and the exported layout.

mod cell;
mod coord;
mod generation;
mod grid;
mod layout;
mod room;

pub use cell::{CellState, Doors};
pub use coord::{Coord, Direction};
pub use generation::{Generator, Phase, Rejection, StepOutcome};
pub use grid::GridState;
pub use layout::Layout;
pub use room::Room;
