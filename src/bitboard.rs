//! A square bitboard whose side is chosen at runtime.
//!
//! Cells of an `n×n` grid are packed row-major into a vector of unsigned
//! words `T`. The type only needs `alloc`, so it stays usable without `std`.
//! Every cell accessor is bounds checked and reports errors instead of
//! panicking.

use alloc::vec;
use alloc::vec::Vec;
use core::{any, fmt, mem};
use num_traits::{PrimInt, Unsigned, Zero};

/// Errors returned by bitboard operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitBoardError {
    /// Row or column index is out of bounds [0..n).
    IndexOutOfBounds { row: usize, col: usize },
    /// Two boards of different sides were combined.
    SizeMismatch { left: usize, right: usize },
}

impl fmt::Display for BitBoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitBoardError::IndexOutOfBounds { row, col } => {
                write!(f, "IndexOutOfBounds: row={}, col={}", row, col)
            }
            BitBoardError::SizeMismatch { left, right } => {
                write!(f, "SizeMismatch: {}x{} vs {}x{}", left, left, right, right)
            }
        }
    }
}

/// An `n×n` bitboard stored in words of type `T`.
#[derive(Clone, PartialEq, Eq)]
pub struct BitBoard<T = u64>
where
    T: PrimInt + Unsigned + Zero,
{
    side: usize,
    words: Vec<T>,
}

impl<T> BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    #[inline]
    fn word_bits() -> usize {
        mem::size_of::<T>() * 8
    }

    /// Create an empty `side×side` board.
    pub fn new(side: usize) -> Self {
        let cells = side * side;
        let words = cells.div_ceil(Self::word_bits());
        BitBoard {
            side,
            words: vec![T::zero(); words],
        }
    }

    /// Create a board with every cell set.
    pub fn full(side: usize) -> Self {
        let mut board = Self::new(side);
        for idx in 0..side * side {
            board.set_index(idx);
        }
        board
    }

    /// Side length of the board.
    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    /// Total number of cells (`side * side`).
    #[inline]
    pub fn cells(&self) -> usize {
        self.side * self.side
    }

    /// Returns the number of set cells.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns true if no cell is set.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| w.is_zero())
    }

    /// Returns true if every cell is set.
    pub fn is_full(&self) -> bool {
        self.count_ones() == self.cells()
    }

    /// Gets the cell at (row, col).
    pub fn get(&self, row: usize, col: usize) -> Result<bool, BitBoardError> {
        self.check_bounds(row, col)?;
        Ok(self.get_index(row * self.side + col))
    }

    /// Sets the cell at (row, col).
    pub fn set(&mut self, row: usize, col: usize) -> Result<(), BitBoardError> {
        self.check_bounds(row, col)?;
        self.set_index(row * self.side + col);
        Ok(())
    }

    /// Clears the cell at (row, col).
    pub fn clear(&mut self, row: usize, col: usize) -> Result<(), BitBoardError> {
        self.check_bounds(row, col)?;
        let idx = row * self.side + col;
        let (w, b) = (idx / Self::word_bits(), idx % Self::word_bits());
        self.words[w] = self.words[w] & !(T::one() << b);
        Ok(())
    }

    /// Clears all cells.
    pub fn clear_all(&mut self) {
        for w in self.words.iter_mut() {
            *w = T::zero();
        }
    }

    /// Returns true if any cell is set on both boards.
    pub fn intersects(&self, other: &Self) -> Result<bool, BitBoardError> {
        self.check_side(other)?;
        Ok(self
            .words
            .iter()
            .zip(other.words.iter())
            .any(|(a, b)| !(*a & *b).is_zero()))
    }

    /// Sets every cell that is set in `other`.
    pub fn union_with(&mut self, other: &Self) -> Result<(), BitBoardError> {
        self.check_side(other)?;
        for (a, b) in self.words.iter_mut().zip(other.words.iter()) {
            *a = *a | *b;
        }
        Ok(())
    }

    /// Iterator over the set cells, row-major.
    pub fn iter_set_bits(&self) -> Cells<'_, T> {
        Cells {
            board: self,
            idx: 0,
            wanted: true,
        }
    }

    /// Iterator over the unset cells, row-major.
    pub fn iter_unset_bits(&self) -> Cells<'_, T> {
        Cells {
            board: self,
            idx: 0,
            wanted: false,
        }
    }

    #[inline]
    fn get_index(&self, idx: usize) -> bool {
        let (w, b) = (idx / Self::word_bits(), idx % Self::word_bits());
        ((self.words[w] >> b) & T::one()) != T::zero()
    }

    #[inline]
    fn set_index(&mut self, idx: usize) {
        let (w, b) = (idx / Self::word_bits(), idx % Self::word_bits());
        self.words[w] = self.words[w] | (T::one() << b);
    }

    #[inline]
    fn check_bounds(&self, row: usize, col: usize) -> Result<(), BitBoardError> {
        if row >= self.side || col >= self.side {
            Err(BitBoardError::IndexOutOfBounds { row, col })
        } else {
            Ok(())
        }
    }

    #[inline]
    fn check_side(&self, other: &Self) -> Result<(), BitBoardError> {
        if self.side != other.side {
            Err(BitBoardError::SizeMismatch {
                left: self.side,
                right: other.side,
            })
        } else {
            Ok(())
        }
    }
}

impl<T> fmt::Debug for BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BitBoard<{}, {}>:", any::type_name::<T>(), self.side)?;
        fmt::Display::fmt(self, f)?;
        writeln!(f)
    }
}

impl<T> fmt::Display for BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.side {
            for c in 0..self.side {
                let bit = if self.get_index(r * self.side + c) {
                    '■'
                } else {
                    '□'
                };
                write!(f, "{} ", bit)?;
            }
            if r + 1 < self.side {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Iterator over the set (or unset) cells of a bitboard.
#[derive(Clone)]
pub struct Cells<'a, T>
where
    T: PrimInt + Unsigned + Zero,
{
    board: &'a BitBoard<T>,
    idx: usize,
    wanted: bool,
}

impl<'a, T> Iterator for Cells<'a, T>
where
    T: PrimInt + Unsigned + Zero,
{
    type Item = (usize, usize);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let side = self.board.side;
        while self.idx < side * side {
            let idx = self.idx;
            self.idx += 1;
            if self.board.get_index(idx) == self.wanted {
                return Some((idx / side, idx % side));
            }
        }
        None
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BitBoardError {}
