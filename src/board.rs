//! One side's grid: ship occupancy, attack marks and the attack resolver.

use core::fmt;

use crate::common::{AttackOutcome, AttackState, Bits, Cell, Coord, EngineError, ShipId};
use crate::config::ShipSpec;
use crate::fleet::Fleet;
use crate::ship::{Orientation, Ship};

/// Grid plus the fleet placed on it.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    bounds: usize,
    fleet: Fleet,
    ship_map: Bits,
    hits: Bits,
    misses: Bits,
}

impl Board {
    /// Create an empty `size×size` board whose ships must stay inside the
    /// top-left `bounds×bounds` area.
    pub fn new(size: usize, bounds: usize) -> Self {
        let empty = Bits::new(size);
        Board {
            size,
            bounds: bounds.min(size),
            fleet: Fleet::new(),
            ship_map: empty.clone(),
            hits: empty.clone(),
            misses: empty,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Side of the placement area.
    pub fn bounds(&self) -> usize {
        self.bounds
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    /// Occupancy mask of all ships.
    pub fn ship_map(&self) -> &Bits {
        &self.ship_map
    }

    pub fn hits(&self) -> &Bits {
        &self.hits
    }

    pub fn misses(&self) -> &Bits {
        &self.misses
    }

    /// Every attacked cell, hit or miss.
    pub fn attacked(&self) -> Bits {
        let mut all = self.hits.clone();
        // Both masks are created with the same side.
        let _ = all.union_with(&self.misses);
        all
    }

    /// Returns `true` when every placed ship is sunk.
    pub fn all_sunk(&self) -> bool {
        self.fleet.all_destroyed()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.size && coord.col < self.size
    }

    /// Occupancy and attack state of a cell.
    pub fn cell(&self, coord: Coord) -> Result<Cell, EngineError> {
        if !self.contains(coord) {
            return Err(EngineError::InvalidCoordinate(coord));
        }
        let attack = if self.hits.get(coord.row, coord.col)? {
            AttackState::Hit
        } else if self.misses.get(coord.row, coord.col)? {
            AttackState::Miss
        } else {
            AttackState::Unattacked
        };
        let occupant = if self.ship_map.get(coord.row, coord.col)? {
            self.fleet.ship_at(coord)
        } else {
            None
        };
        Ok(Cell { occupant, attack })
    }

    /// Place a ship at `origin` with `orientation`, returning its id.
    pub fn place(
        &mut self,
        spec: ShipSpec,
        origin: Coord,
        orientation: Orientation,
    ) -> Result<ShipId, EngineError> {
        let ship = Ship::new(spec, origin, orientation, self.size, self.bounds)?;
        if self.ship_map.intersects(ship.mask())? {
            return Err(EngineError::ShipOverlaps);
        }
        self.ship_map.union_with(ship.mask())?;
        log::debug!(
            "placed {} at {} {:?}",
            spec.name(),
            origin,
            orientation
        );
        Ok(self.fleet.push(ship))
    }

    /// Apply an attack at `coord` and classify the result.
    ///
    /// Repeating an attack returns [`AttackOutcome::AlreadyAttacked`] and
    /// leaves the board untouched.
    pub fn resolve_attack(&mut self, coord: Coord) -> Result<AttackOutcome, EngineError> {
        if !self.contains(coord) {
            return Err(EngineError::InvalidCoordinate(coord));
        }
        let (row, col) = (coord.row, coord.col);
        if self.hits.get(row, col)? || self.misses.get(row, col)? {
            return Ok(AttackOutcome::AlreadyAttacked);
        }
        if !self.ship_map.get(row, col)? {
            self.misses.set(row, col)?;
            return Ok(AttackOutcome::Miss);
        }

        let id = self
            .fleet
            .ship_at(coord)
            .ok_or(EngineError::InvalidCoordinate(coord))?;
        self.hits.set(row, col)?;
        let ship = self.fleet.ship_mut(id).ok_or(EngineError::UnknownShip(id))?;
        ship.register_hit(coord);
        if ship.is_destroyed() {
            Ok(AttackOutcome::HitAndSunk(id))
        } else {
            Ok(AttackOutcome::Hit(id))
        }
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{\n  size: {}, bounds: {},\n  ship_map: {:?},\n  hits: {:?},\n  misses: {:?},\n  ships: {:?}\n}}",
            self.size,
            self.bounds,
            self.ship_map,
            self.hits,
            self.misses,
            self.fleet.ships()
        )
    }
}
