//! Generator configuration
//!
//! Validated once when a generator is built. Can be loaded from an
//! rc-style file of `OPTIONS=key:value,...` lines.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::dungeon::Coord;
use crate::error::ConfigError;

/// Grid size, room-count range and acceptance tweaks for one generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub width: i32,
    pub height: i32,
    pub min_rooms: usize,
    pub max_rooms: usize,

    /// Host-space size of one grid cell
    pub room_width: i32,
    pub room_height: i32,

    /// Candidate that skips the random gate. Origin by default.
    pub always_accept: Option<Coord>,

    /// Give up after this many attempts; `None` retries forever
    pub max_attempts: Option<u32>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
            min_rooms: DEFAULT_MIN_ROOMS,
            max_rooms: DEFAULT_MAX_ROOMS,
            room_width: DEFAULT_ROOM_WIDTH,
            room_height: DEFAULT_ROOM_HEIGHT,
            always_accept: Some(Coord::ORIGIN),
            max_attempts: None,
        }
    }
}

impl GeneratorConfig {
    /// Config for a `width` x `height` grid with `min..=max` rooms, other fields default
    pub fn new(width: i32, height: i32, min_rooms: usize, max_rooms: usize) -> Self {
        Self {
            width,
            height,
            min_rooms,
            max_rooms,
            ..Self::default()
        }
    }

    /// Starting cell: the grid center, rounded down
    pub fn seed_coord(&self) -> Coord {
        Coord::new(self.width / 2, self.height / 2)
    }

    /// Number of cells in the grid
    pub fn capacity(&self) -> i64 {
        self.width as i64 * self.height as i64
    }

    /// Check every constraint a generation run relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.capacity() > MAX_GRID_CELLS {
            return Err(ConfigError::GridTooLarge {
                width: self.width,
                height: self.height,
                max: MAX_GRID_CELLS,
            });
        }
        if self.max_rooms == 0 {
            return Err(ConfigError::NoRooms);
        }
        if self.min_rooms > self.max_rooms {
            return Err(ConfigError::MinExceedsMax {
                min: self.min_rooms,
                max: self.max_rooms,
            });
        }
        if self.max_rooms as i64 > self.capacity() {
            return Err(ConfigError::ExceedsCapacity {
                rooms: self.max_rooms,
                capacity: self.capacity(),
            });
        }
        if self.room_width <= 0 || self.room_height <= 0 {
            return Err(ConfigError::InvalidRoomSize {
                width: self.room_width,
                height: self.room_height,
            });
        }
        if self.max_attempts == Some(0) {
            return Err(ConfigError::ZeroAttempts);
        }
        Ok(())
    }

    /// Load options from a file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        Self::parse_config(&contents)
    }

    /// Save options to a file
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_config_string()).map_err(|e| ConfigError::Io(e.to_string()))
    }

    /// Parse options from a config string, starting from the defaults
    ///
    /// The result is not validated; that happens when a generator is built.
    pub fn parse_config(contents: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        for line in contents.lines() {
            let line = line.trim();

            // Skip comments and empty lines
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(opts) = line.strip_prefix("OPTIONS=") {
                for opt in opts.split(',') {
                    config.parse_option(opt.trim())?;
                }
            } else {
                return Err(ConfigError::UnknownOption(line.to_string()));
            }
        }

        Ok(config)
    }

    fn parse_option(&mut self, opt: &str) -> Result<(), ConfigError> {
        if opt.is_empty() {
            return Ok(());
        }
        match opt.split_once(':').or_else(|| opt.split_once('=')) {
            Some((key, value)) => self.set_option(key.trim(), value.trim()),
            None => Err(ConfigError::MissingValue(opt.to_string())),
        }
    }

    /// Set an option with a value
    fn set_option(&mut self, name: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            option: name.to_string(),
            value: value.to_string(),
        };

        match name {
            "width" => self.width = value.parse().map_err(|_| invalid())?,
            "height" => self.height = value.parse().map_err(|_| invalid())?,
            "min_rooms" | "minrooms" => self.min_rooms = value.parse().map_err(|_| invalid())?,
            "max_rooms" | "maxrooms" => self.max_rooms = value.parse().map_err(|_| invalid())?,
            "room_width" => self.room_width = value.parse().map_err(|_| invalid())?,
            "room_height" => self.room_height = value.parse().map_err(|_| invalid())?,
            "always_accept" => {
                self.always_accept = parse_always_accept(value).ok_or_else(invalid)?;
            }
            "max_attempts" => {
                self.max_attempts = match value.to_lowercase().as_str() {
                    "none" | "unlimited" => None,
                    n => Some(n.parse().map_err(|_| invalid())?),
                };
            }
            _ => return Err(ConfigError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    /// Convert options to config file format
    pub fn to_config_string(&self) -> String {
        let always_accept = match self.always_accept {
            None => "none".to_string(),
            Some(Coord::ORIGIN) => "origin".to_string(),
            Some(c) => format!("{};{}", c.x, c.y),
        };
        let max_attempts = self
            .max_attempts
            .map_or_else(|| "none".to_string(), |n| n.to_string());

        let lines = [
            "# roomgrid configuration file".to_string(),
            String::new(),
            format!("OPTIONS=width:{},height:{}", self.width, self.height),
            format!(
                "OPTIONS=min_rooms:{},max_rooms:{}",
                self.min_rooms, self.max_rooms
            ),
            format!(
                "OPTIONS=room_width:{},room_height:{}",
                self.room_width, self.room_height
            ),
            format!("OPTIONS=always_accept:{always_accept},max_attempts:{max_attempts}"),
        ];
        lines.join("\n") + "\n"
    }
}

/// `origin`, `none`, or `x;y`. Outer `None` means unparseable.
pub fn parse_always_accept(value: &str) -> Option<Option<Coord>> {
    match value.to_lowercase().as_str() {
        "origin" => Some(Some(Coord::ORIGIN)),
        "none" | "off" => Some(None),
        other => {
            let (x, y) = other.split_once(';').or_else(|| other.split_once(','))?;
            let x = x.trim().parse().ok()?;
            let y = y.trim().parse().ok()?;
            Some(Some(Coord::new(x, y)))
        }
    }
}
