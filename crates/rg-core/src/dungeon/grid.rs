//! Occupancy grid and expansion frontier
//!
//! The grid is the single source of truth for adjacency: "is there a room
//! at (x, y)" never needs a room to be looked up.

use std::collections::VecDeque;

use super::{CellState, Coord, Direction, Room};
use crate::error::GridError;

/// Occupancy, room count and frontier for one generation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridState {
    width: i32,
    height: i32,
    /// Cells indexed `[x][y]`
    cells: Vec<Vec<CellState>>,
    room_count: usize,
    frontier: VecDeque<Coord>,
}

impl GridState {
    /// Allocate an all-empty grid
    pub fn new(width: i32, height: i32) -> Result<Self, GridError> {
        if width <= 0 || height <= 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![vec![CellState::Empty; height as usize]; width as usize],
            room_count: 0,
            frontier: VecDeque::new(),
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of cells in the grid
    pub fn capacity(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.x >= 0 && coord.y >= 0 && coord.x < self.width && coord.y < self.height
    }

    /// Out-of-range coordinates are simply not occupied
    pub fn is_occupied(&self, coord: Coord) -> bool {
        self.in_bounds(coord) && self.cells[coord.x as usize][coord.y as usize].is_occupied()
    }

    pub fn cell(&self, coord: Coord) -> Option<CellState> {
        self.in_bounds(coord)
            .then(|| self.cells[coord.x as usize][coord.y as usize])
    }

    /// Mark `coord` occupied and return its room, all doors closed
    pub fn place_room(&mut self, coord: Coord) -> Result<Room, GridError> {
        if !self.in_bounds(coord) {
            return Err(GridError::OutOfBounds(coord));
        }
        let cell = &mut self.cells[coord.x as usize][coord.y as usize];
        if cell.is_occupied() {
            return Err(GridError::AlreadyOccupied(coord));
        }
        *cell = CellState::Occupied;
        self.room_count += 1;
        Ok(Room::new(coord))
    }

    pub fn room_count(&self) -> usize {
        self.room_count
    }

    /// North, south, east and west neighbors, not bounds-filtered
    pub fn neighbors_of(coord: Coord) -> [Coord; 4] {
        [
            coord.step(Direction::North),
            coord.step(Direction::South),
            coord.step(Direction::East),
            coord.step(Direction::West),
        ]
    }

    /// Occupied cells among the four neighbors of `coord`
    pub fn adjacent_occupied_count(&self, coord: Coord) -> usize {
        Self::neighbors_of(coord)
            .into_iter()
            .filter(|n| self.is_occupied(*n))
            .count()
    }

    /// Queue an occupied cell for expansion
    pub fn enqueue(&mut self, coord: Coord) -> Result<(), GridError> {
        if !self.is_occupied(coord) {
            return Err(GridError::NotOccupied(coord));
        }
        self.frontier.push_back(coord);
        Ok(())
    }

    pub fn dequeue(&mut self) -> Option<Coord> {
        self.frontier.pop_front()
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Rows from the top (highest y) down, for text dumps
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(self.capacity() + self.height as usize);
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                out.push(self.cells[x as usize][y as usize].symbol());
            }
            out.push('\n');
        }
        out
    }
}
