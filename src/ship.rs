//! Ship definitions: footprint geometry and damage tracking.

use alloc::vec::Vec;
use core::fmt;

use crate::common::{Bits, Coord, EngineError};
use crate::config::ShipSpec;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Cell `step` positions away from `origin` along this axis, or `None`
    /// if the index overflows.
    pub fn step(self, origin: Coord, step: usize) -> Option<Coord> {
        match self {
            Orientation::Horizontal => Some(Coord::new(origin.row, origin.col.checked_add(step)?)),
            Orientation::Vertical => Some(Coord::new(origin.row.checked_add(step)?, origin.col)),
        }
    }
}

/// Ordered cells covered by a ship of `length` starting at `origin`, or
/// `ShipOutOfBounds` if any of them leaves the `bounds × bounds` area.
pub fn footprint(
    origin: Coord,
    orientation: Orientation,
    length: usize,
    bounds: usize,
) -> Result<Vec<Coord>, EngineError> {
    let end = length
        .checked_sub(1)
        .and_then(|last| orientation.step(origin, last))
        .ok_or(EngineError::ShipOutOfBounds)?;
    if end.row >= bounds || end.col >= bounds {
        return Err(EngineError::ShipOutOfBounds);
    }
    // `end` is in range, so every earlier step is too.
    Ok((0..length)
        .filter_map(|i| orientation.step(origin, i))
        .collect())
}

/// A ship placed on a board.
#[derive(Clone, PartialEq, Eq)]
pub struct Ship {
    spec: ShipSpec,
    orientation: Orientation,
    cells: Vec<Coord>,
    mask: Bits,
    hits: usize,
    destroyed: bool,
}

impl Ship {
    /// Place a ship at `origin` with `orientation` on a `board_size` board,
    /// keeping it inside the top-left `bounds × bounds` area.
    pub fn new(
        spec: ShipSpec,
        origin: Coord,
        orientation: Orientation,
        board_size: usize,
        bounds: usize,
    ) -> Result<Self, EngineError> {
        let cells = footprint(origin, orientation, spec.length(), bounds.min(board_size))?;
        let mut mask = Bits::new(board_size);
        for c in cells.iter() {
            mask.set(c.row, c.col)?;
        }
        Ok(Ship {
            spec,
            orientation,
            cells,
            mask,
            hits: 0,
            destroyed: false,
        })
    }

    /// Register a hit at `coord`. Returns `true` if the ship covers it.
    ///
    /// Callers must not report the same cell twice; the board guarantees this
    /// by refusing repeated attacks.
    pub(crate) fn register_hit(&mut self, coord: Coord) -> bool {
        if !self.occupies(coord) {
            return false;
        }
        if self.hits < self.spec.length() {
            self.hits += 1;
        }
        if self.hits == self.spec.length() {
            self.destroyed = true;
        }
        true
    }

    /// Whether the ship covers `coord`.
    pub fn occupies(&self, coord: Coord) -> bool {
        self.mask.get(coord.row, coord.col).unwrap_or(false)
    }

    /// Check if the ship is sunk (every cell hit).
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Number of hits taken so far.
    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn spec(&self) -> ShipSpec {
        self.spec
    }

    pub fn name(&self) -> &'static str {
        self.spec.name()
    }

    pub fn length(&self) -> usize {
        self.spec.length()
    }

    /// First cell of the footprint.
    pub fn origin(&self) -> Coord {
        self.cells[0]
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Ordered footprint, from the origin outwards.
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    /// Occupancy mask of the ship on the board.
    pub fn mask(&self) -> &Bits {
        &self.mask
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ name: \"{}\", origin: ({}, {}), orientation: {:?}, hits: {}/{}, destroyed: {} }}",
            self.spec.name(),
            self.origin().row,
            self.origin().col,
            self.orientation,
            self.hits,
            self.spec.length(),
            self.destroyed,
        )
    }
}
