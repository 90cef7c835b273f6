//! Error types for grid bookkeeping, configuration and generation.

use thiserror::Error;

use crate::dungeon::Coord;

/// Invariant violations reported by [`GridState`](crate::GridState)
///
/// The generator bounds- and occupancy-checks before mutating the grid,
/// so these only reach a caller through a generator bug.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("coordinate {0} is outside the grid")]
    OutOfBounds(Coord),

    #[error("cell {0} is already occupied")]
    AlreadyOccupied(Coord),

    #[error("cell {0} is not occupied and cannot join the frontier")]
    NotOccupied(Coord),
}

/// Configuration errors: validation failures and config-file problems
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("grid of {width}x{height} exceeds the {max} cell limit")]
    GridTooLarge { width: i32, height: i32, max: i64 },

    #[error("maximum room count must be at least 1")]
    NoRooms,

    #[error("minimum room count {min} exceeds maximum {max}")]
    MinExceedsMax { min: usize, max: usize },

    #[error("{rooms} rooms cannot fit in a grid of {capacity} cells")]
    ExceedsCapacity { rooms: usize, capacity: i64 },

    #[error("room size must be positive, got {width}x{height}")]
    InvalidRoomSize { width: i32, height: i32 },

    #[error("attempt limit must be at least 1")]
    ZeroAttempts,

    #[error("unknown option: {0}")]
    UnknownOption(String),

    #[error("missing value for option: {0}")]
    MissingValue(String),

    #[error("invalid value '{value}' for option '{option}'")]
    InvalidValue { option: String, value: String },

    #[error("I/O error: {0}")]
    Io(String),
}

/// Errors surfaced by [`Generator`](crate::Generator)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    #[error("no layout reached {min_rooms} rooms within {attempts} attempts")]
    AttemptsExhausted { attempts: u32, min_rooms: usize },

    #[error("grid invariant violated: {0}")]
    Grid(#[from] GridError),
}
