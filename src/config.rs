//! Game configurations: board geometry, ship rosters and tunables.

use alloc::vec::Vec;

use crate::common::{EngineError, Side};

/// Largest supported board side.
pub const MAX_BOARD_SIZE: usize = 64;

/// Cap on random draws per ship before placement is abandoned.
pub const DEFAULT_PLACEMENT_ATTEMPTS: usize = 10_000;

/// Rejection-sampling budget of the computer move source before it falls
/// back to drawing from the remaining candidates.
pub const DEFAULT_MOVE_ATTEMPTS: usize = 1_000;

/// Match length in seconds.
pub const DEFAULT_TIME_LIMIT_SECS: u32 = 60;

/// A roster entry: ship name, length and the points awarded for sinking it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipSpec {
    name: &'static str,
    length: usize,
    points: u32,
}

impl ShipSpec {
    /// Create a new ship spec.
    pub const fn new(name: &'static str, length: usize, points: u32) -> Self {
        Self {
            name,
            length,
            points,
        }
    }

    /// Ship's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Ship's length.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Points awarded to whoever sinks the ship.
    pub fn points(&self) -> u32 {
        self.points
    }
}

/// Roster of the 20×20 variant, placed inside the top-left 10×10 quadrant.
pub const NAVY_WAR_ROSTER: [ShipSpec; 5] = [
    ShipSpec::new("Aircraft Carrier", 8, 100),
    ShipSpec::new("Battleship", 7, 70),
    ShipSpec::new("Destroyer", 5, 50),
    ShipSpec::new("Frigate", 4, 40),
    ShipSpec::new("Submarine", 4, 80),
];

/// Roster of the classic 10×10 variant.
pub const CLASSIC_ROSTER: [ShipSpec; 5] = [
    ShipSpec::new("Carrier", 5, 50),
    ShipSpec::new("Battleship", 4, 40),
    ShipSpec::new("Cruiser", 3, 30),
    ShipSpec::new("Submarine", 3, 30),
    ShipSpec::new("Destroyer", 2, 20),
];

/// Everything needed to set up a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Side of the square board.
    pub board_size: usize,
    /// Side of the top-left square where ships may be placed.
    pub placement_bounds: usize,
    /// Ships placed for each side, in placement order.
    pub roster: Vec<ShipSpec>,
    /// Seconds before the match is decided on points.
    pub time_limit_secs: u32,
    /// Side that attacks first.
    pub first_turn: Side,
    /// Random draws allowed per ship during placement.
    pub placement_attempts: usize,
    /// Rejection-sampling budget for computer moves.
    pub move_attempts: usize,
}

impl GameConfig {
    /// 20×20 board, ships confined to the 10×10 top-left quadrant.
    pub fn navy_war() -> Self {
        Self {
            board_size: 20,
            placement_bounds: 10,
            roster: NAVY_WAR_ROSTER.to_vec(),
            time_limit_secs: DEFAULT_TIME_LIMIT_SECS,
            first_turn: Side::Human,
            placement_attempts: DEFAULT_PLACEMENT_ATTEMPTS,
            move_attempts: DEFAULT_MOVE_ATTEMPTS,
        }
    }

    /// 10×10 board with ships spanning the whole grid.
    pub fn classic() -> Self {
        Self {
            board_size: 10,
            placement_bounds: 10,
            roster: CLASSIC_ROSTER.to_vec(),
            ..Self::navy_war()
        }
    }

    pub fn with_time_limit(mut self, secs: u32) -> Self {
        self.time_limit_secs = secs;
        self
    }

    pub fn with_first_turn(mut self, side: Side) -> Self {
        self.first_turn = side;
        self
    }

    pub fn with_roster(mut self, roster: &[ShipSpec]) -> Self {
        self.roster = roster.to_vec();
        self
    }

    /// Sum of all ship lengths in the roster.
    pub fn total_ship_cells(&self) -> usize {
        self.roster.iter().map(|s| s.length()).sum()
    }

    /// Check that a match can be built from this configuration.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.board_size == 0 || self.board_size > MAX_BOARD_SIZE {
            return Err(EngineError::InvalidConfig("board size must be within 1..=64"));
        }
        if self.placement_bounds == 0 || self.placement_bounds > self.board_size {
            return Err(EngineError::InvalidConfig(
                "placement bounds must be within 1..=board size",
            ));
        }
        if self.roster.is_empty() {
            return Err(EngineError::InvalidConfig("roster is empty"));
        }
        if self
            .roster
            .iter()
            .any(|s| s.length() == 0 || s.length() > self.placement_bounds)
        {
            return Err(EngineError::InvalidConfig(
                "every ship must fit inside the placement bounds",
            ));
        }
        if self.total_ship_cells() > self.placement_bounds * self.placement_bounds {
            return Err(EngineError::InvalidConfig(
                "roster needs more cells than the placement area holds",
            ));
        }
        if self.time_limit_secs == 0 {
            return Err(EngineError::InvalidConfig("time limit must be positive"));
        }
        if self.placement_attempts == 0 || self.move_attempts == 0 {
            return Err(EngineError::InvalidConfig("attempt budgets must be positive"));
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::navy_war()
    }
}
