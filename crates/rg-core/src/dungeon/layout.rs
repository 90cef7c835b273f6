//! Finished layouts handed to the host
//!
//! A layout is produced once per successful generation. Rooms keep their
//! insertion order: the seed first, then breadth-first discovery order.

use serde::{Deserialize, Serialize};

use super::{Coord, Direction, Room};

/// A finalized set of rooms with their door states
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub width: i32,
    pub height: i32,
    /// Host-space size of one grid cell
    pub room_width: i32,
    pub room_height: i32,
    /// Attempts needed to reach the minimum room count
    pub attempts: u32,
    rooms: Vec<Room>,
}

impl Layout {
    pub(crate) fn new(
        width: i32,
        height: i32,
        room_size: (i32, i32),
        attempts: u32,
        rooms: Vec<Room>,
    ) -> Self {
        Self {
            width,
            height,
            room_width: room_size.0,
            room_height: room_size.1,
            attempts,
            rooms,
        }
    }

    /// Rooms in insertion order
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn iter(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// The starting room
    pub fn seed(&self) -> Option<&Room> {
        self.rooms.first()
    }

    pub fn room_at(&self, coord: Coord) -> Option<&Room> {
        self.rooms.iter().find(|r| r.coord == coord)
    }

    /// One `(room, side)` entry per open door side, in room order
    pub fn door_events(&self) -> impl Iterator<Item = (Coord, Direction)> + '_ {
        self.rooms
            .iter()
            .flat_map(|room| room.open_directions().map(move |d| (room.coord, d)))
    }

    /// Host-space position of a grid cell, centered on the grid middle
    ///
    /// Widened to `i64` so any `i32` room size and coordinate fit.
    pub fn world_position(&self, coord: Coord) -> (i64, i64) {
        let offset_x = coord.x as i64 - (self.width / 2) as i64;
        let offset_y = coord.y as i64 - (self.height / 2) as i64;
        (
            self.room_width as i64 * offset_x,
            self.room_height as i64 * offset_y,
        )
    }

    /// Text rendering with door connectors, north at the top
    ///
    /// Rooms are `#`, the seed `@`, empty cells `.`; open doors show as
    /// `-` between columns and `|` between rows.
    pub fn to_ascii(&self) -> String {
        let w = self.width.max(0) as usize;
        let h = self.height.max(0) as usize;
        let mut cells: Vec<Option<&Room>> = vec![None; w * h];
        for room in &self.rooms {
            if room.coord.x >= 0 && room.coord.y >= 0 {
                let (x, y) = (room.coord.x as usize, room.coord.y as usize);
                if x < w && y < h {
                    cells[x * h + y] = Some(room);
                }
            }
        }
        let seed = self.seed().map(|r| r.coord);

        let mut out = String::new();
        for y in (0..h).rev() {
            for x in 0..w {
                let room = cells[x * h + y];
                out.push(match room {
                    Some(r) if Some(r.coord) == seed => '@',
                    Some(_) => '#',
                    None => '.',
                });
                if x + 1 < w {
                    let open = room.is_some_and(|r| r.is_open(Direction::East));
                    out.push(if open { '-' } else { ' ' });
                }
            }
            out.push('\n');

            if y > 0 {
                for x in 0..w {
                    let open = cells[x * h + y].is_some_and(|r| r.is_open(Direction::South));
                    out.push(if open { '|' } else { ' ' });
                    if x + 1 < w {
                        out.push(' ');
                    }
                }
                out.push('\n');
            }
        }
        out
    }
}

impl<'a> IntoIterator for &'a Layout {
    type Item = &'a Room;
    type IntoIter = std::slice::Iter<'a, Room>;

    fn into_iter(self) -> Self::IntoIter {
        self.rooms.iter()
    }
}
