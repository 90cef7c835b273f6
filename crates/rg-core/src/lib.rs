//! rg-core: room-grid dungeon layout generation
//!
//! Grows a connected cluster of rooms on a 2D grid by breadth-first
//! expansion with randomized acceptance, then derives doors from the
//! final grid adjacency. Pure logic: the only I/O is config-file loading.

pub mod config;
pub mod dungeon;
pub mod error;

mod consts;
mod rng;

pub use config::GeneratorConfig;
pub use consts::*;
pub use dungeon::{
    CellState, Coord, Direction, Doors, Generator, GridState, Layout, Phase, Rejection, Room,
    StepOutcome,
};
pub use error::{ConfigError, GenerateError, GridError};
pub use rng::{GameRng, RandomSource, ScriptedRng};
