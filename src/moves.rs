//! Move sources for the computer opponent.
//!
//! Attacks are uniformly random; the only constraint is that a cell is never
//! attacked twice. Both sources fall back to drawing from the explicit set of
//! remaining cells, so success does not depend on a lucky draw when the board
//! is nearly full.

use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::common::{Bits, Coord, EngineError};
use crate::config::DEFAULT_MOVE_ATTEMPTS;

/// Supplies attack coordinates that avoid a set of excluded cells.
pub trait MoveSource {
    /// Choose a cell of the `exclude.side()` board that is not set in `exclude`.
    fn next_move(&mut self, rng: &mut SmallRng, exclude: &Bits) -> Result<Coord, EngineError>;
}

/// Rejection sampling with a bounded budget, then a direct draw from the
/// cells not yet excluded.
#[derive(Debug, Clone, Copy)]
pub struct RandomMoveSource {
    max_attempts: usize,
}

impl RandomMoveSource {
    pub fn new(max_attempts: usize) -> Self {
        Self { max_attempts }
    }
}

impl Default for RandomMoveSource {
    fn default() -> Self {
        Self::new(DEFAULT_MOVE_ATTEMPTS)
    }
}

impl MoveSource for RandomMoveSource {
    fn next_move(&mut self, rng: &mut SmallRng, exclude: &Bits) -> Result<Coord, EngineError> {
        let side = exclude.side();
        if side == 0 || exclude.is_full() {
            return Err(EngineError::BoardExhausted);
        }
        for _ in 0..self.max_attempts {
            let (row, col) = (rng.random_range(0..side), rng.random_range(0..side));
            if !exclude.get(row, col)? {
                return Ok(Coord::new(row, col));
            }
        }
        log::debug!(
            "rejection sampling exhausted after {} draws, sampling remaining cells",
            self.max_attempts
        );
        sample_remaining(rng, exclude)
    }
}

/// Uniform draw among the cells not set in `exclude`.
pub fn sample_remaining<R: Rng + ?Sized>(rng: &mut R, exclude: &Bits) -> Result<Coord, EngineError> {
    let candidates: Vec<(usize, usize)> = exclude.iter_unset_bits().collect();
    candidates
        .choose(rng)
        .map(|&cell| Coord::from(cell))
        .ok_or(EngineError::BoardExhausted)
}

/// Explicit pool of cells that have not been handed out yet.
///
/// Every draw removes a uniformly chosen cell, so a pool of `n×n` cells yields
/// each cell at most once and never needs to retry on a fresh cell.
#[derive(Debug, Clone)]
pub struct CandidatePool {
    side: usize,
    remaining: Vec<Coord>,
}

impl CandidatePool {
    pub fn new(side: usize) -> Self {
        let remaining = (0..side)
            .flat_map(|row| (0..side).map(move |col| Coord::new(row, col)))
            .collect();
        Self { side, remaining }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    /// Cells still available.
    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Remove and return a uniformly chosen cell.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Coord> {
        if self.remaining.is_empty() {
            return None;
        }
        let idx = rng.random_range(0..self.remaining.len());
        Some(self.remaining.swap_remove(idx))
    }
}

impl MoveSource for CandidatePool {
    fn next_move(&mut self, rng: &mut SmallRng, exclude: &Bits) -> Result<Coord, EngineError> {
        while let Some(coord) = self.draw(rng) {
            // Cells attacked through another channel are dropped for good.
            if !exclude.get(coord.row, coord.col).unwrap_or(false) {
                return Ok(coord);
            }
        }
        Err(EngineError::BoardExhausted)
    }
}
