//! Generator defaults
//!
//! Values match the level settings the generator was tuned with.

/// Grid dimensions
pub const DEFAULT_GRID_WIDTH: i32 = 10;
pub const DEFAULT_GRID_HEIGHT: i32 = 10;

/// Room count limits
pub const DEFAULT_MIN_ROOMS: usize = 10;
pub const DEFAULT_MAX_ROOMS: usize = 15;

/// Host-space size of one grid cell
pub const DEFAULT_ROOM_WIDTH: i32 = 20;
pub const DEFAULT_ROOM_HEIGHT: i32 = 12;

/// Largest grid, in cells, a config may ask for
pub const MAX_GRID_CELLS: i64 = 1_000_000;

/// Probability that a candidate survives the random gate
pub const KEEP_PROBABILITY: f64 = 0.5;

/// A candidate touching more occupied neighbors than this is rejected
pub const MAX_OCCUPIED_NEIGHBORS: usize = 1;
