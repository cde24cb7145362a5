//! One side's placed ships.

use alloc::vec::Vec;

use crate::common::{Coord, ShipId};
use crate::ship::Ship;

/// Ships of one side in placement order. A ship's index is its [`ShipId`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fleet {
    ships: Vec<Ship>,
}

impl Fleet {
    pub fn new() -> Self {
        Self { ships: Vec::new() }
    }

    pub(crate) fn push(&mut self, ship: Ship) -> ShipId {
        self.ships.push(ship);
        self.ships.len() - 1
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.get(id)
    }

    pub(crate) fn ship_mut(&mut self, id: ShipId) -> Option<&mut Ship> {
        self.ships.get_mut(id)
    }

    /// Ship covering `coord`, if any.
    pub fn ship_at(&self, coord: Coord) -> Option<ShipId> {
        self.ships.iter().position(|s| s.occupies(coord))
    }

    pub fn len(&self) -> usize {
        self.ships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    /// Count of ships still afloat.
    pub fn remaining(&self) -> usize {
        self.ships.iter().filter(|s| !s.is_destroyed()).count()
    }

    /// Returns `true` when the fleet has ships and all of them are sunk.
    pub fn all_destroyed(&self) -> bool {
        !self.ships.is_empty() && self.ships.iter().all(|s| s.is_destroyed())
    }
}
