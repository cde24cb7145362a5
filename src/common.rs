//! Common types for NavyWar: coordinates, sides, attack outcomes and engine errors.

use core::fmt;

use crate::bitboard::{BitBoard, BitBoardError};

/// Bitboard type used by every board in the engine.
pub type Bits = BitBoard<u64>;

/// Index of a ship inside its fleet (roster order).
pub type ShipId = usize;

/// A zero-based (row, col) cell position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// Grid notation: column letter followed by the 1-based row, e.g. `C5`.
impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let col = u8::try_from(self.col).ok().filter(|c| *c < 26);
        match (col, self.row.checked_add(1)) {
            (Some(c), Some(row)) => write!(f, "{}{}", (b'A' + c) as char, row),
            _ => write!(f, "({}, {})", self.row, self.col),
        }
    }
}

/// The two participants of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Human,
    Computer,
}

impl Side {
    /// The side being attacked when `self` attacks.
    pub fn opponent(self) -> Side {
        match self {
            Side::Human => Side::Computer,
            Side::Computer => Side::Human,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Human => write!(f, "human"),
            Side::Computer => write!(f, "computer"),
        }
    }
}

/// Attack status of a single cell. Only moves from `Unattacked` to `Miss` or `Hit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackState {
    Unattacked,
    Miss,
    Hit,
}

/// Full view of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Ship occupying the cell, if any.
    pub occupant: Option<ShipId>,
    pub attack: AttackState,
}

/// Result of resolving an attack against a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackOutcome {
    /// The cell was attacked before; nothing changed.
    AlreadyAttacked,
    /// The cell was empty.
    Miss,
    /// A ship was hit but is still afloat.
    Hit(ShipId),
    /// The attack destroyed the ship.
    HitAndSunk(ShipId),
}

impl AttackOutcome {
    /// Ship touched by the attack, if any.
    pub fn ship(&self) -> Option<ShipId> {
        match self {
            AttackOutcome::Hit(id) | AttackOutcome::HitAndSunk(id) => Some(*id),
            AttackOutcome::AlreadyAttacked | AttackOutcome::Miss => None,
        }
    }

    /// Whether the attack changed the board.
    pub fn is_fresh(&self) -> bool {
        !matches!(self, AttackOutcome::AlreadyAttacked)
    }
}

/// Errors returned by the battle engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Underlying bitboard error.
    BitBoardError(BitBoardError),
    /// Coordinate lies outside the board.
    InvalidCoordinate(Coord),
    /// Ship placement overlaps another ship.
    ShipOverlaps,
    /// Ship placement leaves the placement area.
    ShipOutOfBounds,
    /// Random placement gave up after too many rejected draws.
    UnableToPlaceShip {
        ship: &'static str,
        attempts: usize,
    },
    /// Ship id does not exist in the fleet.
    UnknownShip(ShipId),
    /// The attacking side does not hold the turn.
    NotYourTurn(Side),
    /// The match is over and accepts no attacks.
    GameOver,
    /// Every cell has already been attacked.
    BoardExhausted,
    /// Configuration is unusable.
    InvalidConfig(&'static str),
}

impl From<BitBoardError> for EngineError {
    fn from(err: BitBoardError) -> Self {
        EngineError::BitBoardError(err)
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::BitBoardError(e) => write!(f, "BitBoard error: {}", e),
            EngineError::InvalidCoordinate(c) => {
                write!(f, "Coordinate ({}, {}) is outside the board", c.row, c.col)
            }
            EngineError::ShipOverlaps => write!(f, "Ship placement overlaps with another ship"),
            EngineError::ShipOutOfBounds => write!(f, "Ship placement is out of bounds"),
            EngineError::UnableToPlaceShip { ship, attempts } => {
                write!(f, "Unable to place {} after {} attempts", ship, attempts)
            }
            EngineError::UnknownShip(id) => write!(f, "No ship with id {}", id),
            EngineError::NotYourTurn(side) => write!(f, "It is not the {}'s turn", side),
            EngineError::GameOver => write!(f, "The game is over"),
            EngineError::BoardExhausted => write!(f, "Every cell has already been attacked"),
            EngineError::InvalidConfig(reason) => write!(f, "Invalid configuration: {}", reason),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EngineError {}
