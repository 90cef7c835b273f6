//! Layout generation
//!
//! Grows rooms breadth-first from the grid center. Each frontier cell
//! proposes its four neighbors; a candidate becomes a room only if it is
//! in bounds, empty, under the room cap, survives a coin flip and touches
//! at most one existing room. A run that ends below the minimum room count
//! is thrown away and started again. Doors are derived from the final
//! grid adjacency, so every connection is open on both sides.

use std::mem;

use hashbrown::HashMap;
use log::{debug, info, trace, warn};
use strum::IntoEnumIterator;

use super::{Coord, Direction, GridState, Layout, Room};
use crate::config::GeneratorConfig;
use crate::consts::{KEEP_PROBABILITY, MAX_OCCUPIED_NEIGHBORS};
use crate::error::GenerateError;
use crate::rng::{GameRng, RandomSource};

/// Where the generator is in its state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Seeding,
    Expanding,
    Finalizing,
    Restarting,
    Complete,
}

/// Why a candidate neighbor was not turned into a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum Rejection {
    OutOfBounds,
    Occupied,
    AtCapacity,
    RandomGate,
    Crowded,
}

/// Result of a single [`Generator::step`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// A fresh run placed its starting room
    Seeded { attempt: u32, seed: Coord },
    /// One frontier cell was expanded
    Expanded { source: Coord, placed: Vec<Coord> },
    /// Frontier drained or cap reached with enough rooms
    Exhausted { rooms: usize },
    /// Frontier drained below the minimum; the run will be discarded
    Shortfall { rooms: usize, min_rooms: usize },
    /// The discarded run is gone; the next step seeds a new one
    Restarted { attempt: u32 },
    /// Doors derived and the layout is ready
    Finalized { rooms: usize },
    /// Nothing left to do
    Idle,
}

/// Grid, frontier and rooms of one attempt
#[derive(Debug, Clone)]
struct GenerationRun {
    grid: GridState,
    rooms: Vec<Room>,
    index: HashMap<Coord, usize>,
}

impl GenerationRun {
    fn new(config: &GeneratorConfig) -> Result<Self, GenerateError> {
        Ok(Self {
            grid: GridState::new(config.width, config.height)?,
            rooms: Vec::with_capacity(config.max_rooms),
            index: HashMap::with_capacity(config.max_rooms),
        })
    }

    /// Place a room and queue it for expansion
    fn commit(&mut self, coord: Coord) -> Result<(), GenerateError> {
        let room = self.grid.place_room(coord)?;
        self.grid.enqueue(coord)?;
        self.index.insert(coord, self.rooms.len());
        self.rooms.push(room);
        Ok(())
    }

    /// Open a door pair for every occupied neighbor of every room
    fn open_doors(&mut self) {
        for i in 0..self.rooms.len() {
            let coord = self.rooms[i].coord;
            for dir in Direction::iter() {
                let neighbor = coord.step(dir);
                if !self.grid.is_occupied(neighbor) {
                    continue;
                }
                if let Some(&j) = self.index.get(&neighbor) {
                    self.rooms[i].open_door(dir);
                    self.rooms[j].open_door(dir.opposite());
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
enum State {
    Seeding,
    Expanding(GenerationRun),
    Finalizing(GenerationRun),
    Restarting,
    Complete(Layout),
}

impl State {
    fn phase(&self) -> Phase {
        match self {
            State::Seeding => Phase::Seeding,
            State::Expanding(_) => Phase::Expanding,
            State::Finalizing(_) => Phase::Finalizing,
            State::Restarting => Phase::Restarting,
            State::Complete(_) => Phase::Complete,
        }
    }
}

/// Drives generation runs for one configuration
///
/// Either call [`generate`](Self::generate) to run to completion, or call
/// [`step`](Self::step) repeatedly; both produce the same layout for the
/// same random draws.
#[derive(Debug, Clone)]
pub struct Generator<R = GameRng> {
    config: GeneratorConfig,
    rng: R,
    state: State,
    attempts: u32,
}

impl Generator<GameRng> {
    /// Generator backed by a ChaCha rng seeded with `seed`
    pub fn with_seed(config: GeneratorConfig, seed: u64) -> Result<Self, GenerateError> {
        Self::new(config, GameRng::new(seed))
    }
}

impl<R: RandomSource> Generator<R> {
    /// Validate `config`; nothing is allocated if it is rejected
    pub fn new(config: GeneratorConfig, rng: R) -> Result<Self, GenerateError> {
        config.validate()?;
        Ok(Self {
            config,
            rng,
            state: State::Seeding,
            attempts: 0,
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Runs started for the current layout, including the active one
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// The finished layout, once generation is complete
    pub fn layout(&self) -> Option<&Layout> {
        match &self.state {
            State::Complete(layout) => Some(layout),
            _ => None,
        }
    }

    /// Occupancy of the run in progress
    pub fn grid(&self) -> Option<&GridState> {
        match &self.state {
            State::Expanding(run) | State::Finalizing(run) => Some(&run.grid),
            _ => None,
        }
    }

    /// Rooms of the run in progress, doors still closed
    pub fn pending_rooms(&self) -> &[Room] {
        match &self.state {
            State::Expanding(run) | State::Finalizing(run) => &run.rooms,
            _ => &[],
        }
    }

    /// Advance the state machine by one transition
    pub fn step(&mut self) -> Result<StepOutcome, GenerateError> {
        match mem::replace(&mut self.state, State::Seeding) {
            State::Seeding => self.seed(),
            State::Expanding(run) => self.expand_next(run),
            State::Finalizing(mut run) => {
                run.open_doors();
                let rooms = run.rooms.len();
                info!(
                    "Generation complete, {} rooms created in {} attempt(s)",
                    rooms, self.attempts
                );
                self.state = State::Complete(Layout::new(
                    self.config.width,
                    self.config.height,
                    (self.config.room_width, self.config.room_height),
                    self.attempts,
                    run.rooms,
                ));
                Ok(StepOutcome::Finalized { rooms })
            }
            State::Restarting => {
                self.state = State::Seeding;
                Ok(StepOutcome::Restarted {
                    attempt: self.attempts + 1,
                })
            }
            State::Complete(layout) => {
                self.state = State::Complete(layout);
                Ok(StepOutcome::Idle)
            }
        }
    }

    /// Run to completion and return the finished layout
    pub fn generate(&mut self) -> Result<Layout, GenerateError> {
        loop {
            if let Some(layout) = self.layout() {
                return Ok(layout.clone());
            }
            self.step()?;
        }
    }

    /// Drop the current layout or run and start over
    pub fn reset(&mut self) {
        self.state = State::Seeding;
        self.attempts = 0;
    }

    /// Discard whatever exists and generate a new layout
    pub fn regenerate(&mut self) -> Result<Layout, GenerateError> {
        debug!("Regenerating layout on request");
        self.reset();
        self.generate()
    }

    fn seed(&mut self) -> Result<StepOutcome, GenerateError> {
        if let Some(limit) = self.config.max_attempts
            && self.attempts >= limit
        {
            warn!(
                "Gave up after {} attempts without reaching {} rooms",
                self.attempts, self.config.min_rooms
            );
            return Err(GenerateError::AttemptsExhausted {
                attempts: self.attempts,
                min_rooms: self.config.min_rooms,
            });
        }

        self.attempts += 1;
        let seed = self.config.seed_coord();
        let mut run = GenerationRun::new(&self.config)?;
        run.commit(seed)?;
        debug!("Attempt {} seeded at {}", self.attempts, seed);

        self.state = State::Expanding(run);
        Ok(StepOutcome::Seeded {
            attempt: self.attempts,
            seed,
        })
    }

    fn expand_next(&mut self, mut run: GenerationRun) -> Result<StepOutcome, GenerateError> {
        let source = if run.grid.room_count() < self.config.max_rooms {
            run.grid.dequeue()
        } else {
            None
        };

        let Some(source) = source else {
            let rooms = run.grid.room_count();
            if rooms < self.config.min_rooms {
                debug!(
                    "Room count {} was less than the minimum {}, trying again",
                    rooms, self.config.min_rooms
                );
                self.state = State::Restarting;
                return Ok(StepOutcome::Shortfall {
                    rooms,
                    min_rooms: self.config.min_rooms,
                });
            }
            self.state = State::Finalizing(run);
            return Ok(StepOutcome::Exhausted { rooms });
        };

        let mut placed = Vec::new();
        for dir in Direction::EXPANSION_ORDER {
            let candidate = source.step(dir);
            match self.evaluate(&run.grid, candidate) {
                Ok(()) => {
                    run.commit(candidate)?;
                    placed.push(candidate);
                }
                Err(Rejection::AtCapacity) => {
                    trace!("{} full, stopping expansion of {}", candidate, source);
                    break;
                }
                Err(reason) => trace!("Rejected {} from {}: {}", candidate, source, reason),
            }
        }

        self.state = State::Expanding(run);
        Ok(StepOutcome::Expanded { source, placed })
    }

    /// Acceptance policy. Checks run in order and stop at the first failure;
    /// the random draw is only consumed by candidates that reach the gate.
    fn evaluate(&mut self, grid: &GridState, candidate: Coord) -> Result<(), Rejection> {
        if !grid.in_bounds(candidate) {
            return Err(Rejection::OutOfBounds);
        }
        if grid.is_occupied(candidate) {
            return Err(Rejection::Occupied);
        }
        if grid.room_count() >= self.config.max_rooms {
            return Err(Rejection::AtCapacity);
        }
        let draw = self.rng.next_unit();
        if draw >= KEEP_PROBABILITY && self.config.always_accept != Some(candidate) {
            return Err(Rejection::RandomGate);
        }
        // computed before the candidate is placed
        if grid.adjacent_occupied_count(candidate) > MAX_OCCUPIED_NEIGHBORS {
            return Err(Rejection::Crowded);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::rng::ScriptedRng;
    use crate::Doors;

    fn config(width: i32, height: i32, min: usize, max: usize) -> GeneratorConfig {
        GeneratorConfig {
            always_accept: None,
            ..GeneratorConfig::new(width, height, min, max)
        }
    }

    fn coords(layout: &Layout) -> Vec<Coord> {
        layout.iter().map(|r| r.coord).collect()
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let err = Generator::new(config(10, 10, 5, 3), ScriptedRng::constant(0.0)).unwrap_err();
        assert_eq!(
            err,
            GenerateError::InvalidConfiguration(ConfigError::MinExceedsMax { min: 5, max: 3 })
        );
    }

    #[test]
    fn test_single_cell_grid() {
        let mut generator =
            Generator::new(config(1, 1, 1, 1), ScriptedRng::constant(0.0)).unwrap();
        let layout = generator.generate().unwrap();
        assert_eq!(coords(&layout), vec![Coord::ORIGIN]);
        assert_eq!(layout.rooms()[0].doors, Doors::empty());
        assert_eq!(layout.attempts, 1);
        // the cap is hit before any candidate reaches the gate
        assert_eq!(generator.rng().consumed(), 0);
    }

    #[test]
    fn test_plus_shape_when_everything_passes_the_gate() {
        let mut generator =
            Generator::new(config(3, 3, 1, 9), ScriptedRng::constant(0.0)).unwrap();
        let layout = generator.generate().unwrap();

        // corners touch two arms and are always crowded out
        assert_eq!(
            coords(&layout),
            vec![
                Coord::new(1, 1),
                Coord::new(0, 1),
                Coord::new(2, 1),
                Coord::new(1, 2),
                Coord::new(1, 0),
            ]
        );
        assert_eq!(layout.rooms()[0].doors, Doors::all());
        assert_eq!(layout.room_at(Coord::new(0, 1)).unwrap().doors, Doors::EAST);
        assert_eq!(layout.room_at(Coord::new(2, 1)).unwrap().doors, Doors::WEST);
        assert_eq!(layout.room_at(Coord::new(1, 2)).unwrap().doors, Doors::SOUTH);
        assert_eq!(layout.room_at(Coord::new(1, 0)).unwrap().doors, Doors::NORTH);
        assert_eq!(generator.rng().consumed(), 12);
    }

    #[test]
    fn test_capacity_limits_expansion() {
        let mut generator =
            Generator::new(config(3, 3, 1, 3), ScriptedRng::constant(0.0)).unwrap();
        let layout = generator.generate().unwrap();
        assert_eq!(
            coords(&layout),
            vec![Coord::new(1, 1), Coord::new(0, 1), Coord::new(2, 1)]
        );
        assert_eq!(generator.rng().consumed(), 2);
    }

    #[test]
    fn test_shortfall_restarts_with_fresh_draws() {
        let rng = ScriptedRng::new(vec![0.9, 0.9, 0.9, 0.9, 0.0]);
        let mut generator = Generator::new(config(5, 5, 2, 5), rng).unwrap();
        let layout = generator.generate().unwrap();

        assert_eq!(layout.attempts, 2);
        assert_eq!(
            coords(&layout),
            vec![Coord::new(2, 2), Coord::new(1, 2), Coord::new(1, 3)]
        );
        assert_eq!(layout.rooms()[0].doors, Doors::WEST);
        assert_eq!(layout.rooms()[1].doors, Doors::EAST | Doors::NORTH);
        assert_eq!(layout.rooms()[2].doors, Doors::SOUTH);
    }

    #[test]
    fn test_attempt_limit() {
        let mut cfg = config(5, 5, 2, 5);
        cfg.max_attempts = Some(3);
        let mut generator = Generator::new(cfg, ScriptedRng::constant(0.9)).unwrap();
        assert_eq!(
            generator.generate(),
            Err(GenerateError::AttemptsExhausted {
                attempts: 3,
                min_rooms: 2
            })
        );
    }

    #[test]
    fn test_always_accept_skips_random_gate() {
        // seed is (1, 0); its west neighbor is the origin
        let mut cfg = config(2, 1, 1, 2);
        cfg.always_accept = Some(Coord::ORIGIN);
        let mut generator = Generator::new(cfg.clone(), ScriptedRng::constant(0.9)).unwrap();
        let layout = generator.generate().unwrap();
        assert_eq!(coords(&layout), vec![Coord::new(1, 0), Coord::ORIGIN]);
        assert_eq!(layout.rooms()[0].doors, Doors::WEST);
        assert_eq!(layout.rooms()[1].doors, Doors::EAST);

        cfg.always_accept = None;
        let mut generator = Generator::new(cfg, ScriptedRng::constant(0.9)).unwrap();
        assert_eq!(generator.generate().unwrap().len(), 1);
    }

    #[test]
    fn test_always_accept_still_respects_crowding() {
        let mut generator =
            Generator::new(config(3, 3, 1, 9), ScriptedRng::constant(0.0)).unwrap();
        generator.config.always_accept = Some(Coord::ORIGIN);
        let layout = generator.generate().unwrap();
        assert!(layout.room_at(Coord::ORIGIN).is_none());
    }

    #[test]
    fn test_step_sequence() {
        let mut generator =
            Generator::new(config(3, 1, 1, 3), ScriptedRng::constant(0.0)).unwrap();
        assert_eq!(generator.phase(), Phase::Seeding);

        assert_eq!(
            generator.step().unwrap(),
            StepOutcome::Seeded {
                attempt: 1,
                seed: Coord::new(1, 0)
            }
        );
        assert_eq!(generator.phase(), Phase::Expanding);
        assert_eq!(generator.pending_rooms().len(), 1);

        assert_eq!(
            generator.step().unwrap(),
            StepOutcome::Expanded {
                source: Coord::new(1, 0),
                placed: vec![Coord::new(0, 0), Coord::new(2, 0)],
            }
        );
        assert_eq!(generator.step().unwrap(), StepOutcome::Exhausted { rooms: 3 });
        assert_eq!(generator.phase(), Phase::Finalizing);
        assert_eq!(generator.step().unwrap(), StepOutcome::Finalized { rooms: 3 });
        assert_eq!(generator.phase(), Phase::Complete);
        assert_eq!(generator.step().unwrap(), StepOutcome::Idle);
        assert!(generator.layout().is_some());
        assert!(generator.grid().is_none());
    }

    #[test]
    fn test_step_reports_shortfall_and_restart() {
        let mut generator =
            Generator::new(config(3, 3, 2, 3), ScriptedRng::constant(0.9)).unwrap();
        generator.step().unwrap();
        assert_eq!(
            generator.step().unwrap(),
            StepOutcome::Expanded {
                source: Coord::new(1, 1),
                placed: vec![]
            }
        );
        assert_eq!(
            generator.step().unwrap(),
            StepOutcome::Shortfall {
                rooms: 1,
                min_rooms: 2
            }
        );
        assert_eq!(generator.phase(), Phase::Restarting);
        assert_eq!(generator.step().unwrap(), StepOutcome::Restarted { attempt: 2 });
        assert_eq!(generator.phase(), Phase::Seeding);
        assert!(matches!(
            generator.step().unwrap(),
            StepOutcome::Seeded { attempt: 2, .. }
        ));
    }

    #[test]
    fn test_stepping_matches_generate() {
        let cfg = GeneratorConfig::default();
        let expected = Generator::with_seed(cfg.clone(), 99).unwrap().generate().unwrap();

        let mut generator = Generator::with_seed(cfg, 99).unwrap();
        while generator.phase() != Phase::Complete {
            generator.step().unwrap();
        }
        assert_eq!(generator.layout(), Some(&expected));
    }

    #[test]
    fn test_regenerate_discards_layout() {
        let mut generator = Generator::with_seed(GeneratorConfig::default(), 5).unwrap();
        let first = generator.generate().unwrap();
        assert_eq!(generator.generate().unwrap(), first);

        let second = generator.regenerate().unwrap();
        assert!(second.len() >= 10 && second.len() <= 15);
        assert_eq!(generator.attempts(), second.attempts);
    }

    #[test]
    fn test_reset_mid_run() {
        let mut generator = Generator::with_seed(GeneratorConfig::default(), 3).unwrap();
        generator.step().unwrap();
        generator.step().unwrap();
        generator.reset();
        assert_eq!(generator.phase(), Phase::Seeding);
        assert_eq!(generator.attempts(), 0);
        assert!(generator.pending_rooms().is_empty());
    }
}
