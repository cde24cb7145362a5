//! Random fleet placement by rejection sampling.
//!
//! Each ship draws a uniform origin inside the placement area and a uniform
//! orientation until the footprint fits and overlaps nothing. Ships are placed
//! in roster order and may touch each other.

use alloc::vec::Vec;
use rand::Rng;

use crate::board::Board;
use crate::common::{Coord, EngineError, ShipId};
use crate::config::ShipSpec;
use crate::ship::{Orientation, Ship};

/// Returns a random non-overlapping origin and orientation for `spec`.
///
/// Gives up with [`EngineError::UnableToPlaceShip`] after `max_attempts`
/// rejected draws, and fails with [`EngineError::InvalidConfig`] on a board
/// without a placement area.
pub fn random_placement<R: Rng + ?Sized>(
    board: &Board,
    spec: ShipSpec,
    max_attempts: usize,
    rng: &mut R,
) -> Result<(Coord, Orientation), EngineError> {
    let bounds = board.bounds();
    if bounds == 0 {
        return Err(EngineError::InvalidConfig("placement bounds must be positive"));
    }
    for _ in 0..max_attempts {
        let origin = Coord::new(rng.random_range(0..bounds), rng.random_range(0..bounds));
        let orientation = if rng.random() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        let ship = match Ship::new(spec, origin, orientation, board.size(), bounds) {
            Ok(ship) => ship,
            Err(EngineError::ShipOutOfBounds) => continue,
            Err(e) => return Err(e),
        };
        if !board.ship_map().intersects(ship.mask())? {
            return Ok((origin, orientation));
        }
    }
    Err(EngineError::UnableToPlaceShip {
        ship: spec.name(),
        attempts: max_attempts,
    })
}

/// Place every ship of `roster` on `board`, returning their ids in order.
pub fn place_fleet<R: Rng + ?Sized>(
    roster: &[ShipSpec],
    board: &mut Board,
    max_attempts: usize,
    rng: &mut R,
) -> Result<Vec<ShipId>, EngineError> {
    let mut ids = Vec::with_capacity(roster.len());
    for spec in roster.iter().copied() {
        let (origin, orientation) = random_placement(board, spec, max_attempts, rng)?;
        ids.push(board.place(spec, origin, orientation)?);
    }
    Ok(ids)
}
