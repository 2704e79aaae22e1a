//! [`Bitboard`] is the set-of-squares type returned by move generation. It is
//! one of the classic [Bitboards]: there are exactly 64 squares, so membership
//! and union are single integer operations and iteration walks the set bits.
//!
//! [Bitboards]: https://www.chessprogramming.org/Bitboards

use std::fmt;
use std::ops::BitOr;

use itertools::Itertools;

use crate::chess::core::{Square, BOARD_SIZE, BOARD_WIDTH};

/// Represents a set of squares and provides common operations (membership and
/// union) over these sets. Each bit corresponds to one of 64 squares of the
/// chess board.
///
/// Mirroring [`Square::index`] semantics, the least significant bit
/// corresponds to a8, and the most significant bit to h1.
///
/// Bitboard is a thin wrapper around [u64].
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Bitboard {
    bits: u64,
}

impl Bitboard {
    /// Constructs Bitboard from pre-calculated bits.
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self { bits }
    }

    /// Constructs a bitboard representing empty set of squares.
    #[must_use]
    pub const fn empty() -> Self {
        Self::from_bits(0)
    }

    /// Returns true if this bitboard contains given square.
    #[must_use]
    pub const fn contains(self, square: Square) -> bool {
        (self.bits & (1u64 << square.index())) != 0
    }

    /// Adds the square to the set.
    pub fn extend(&mut self, square: Square) {
        self.bits |= 1u64 << square.index();
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn has_any(self) -> bool {
        !self.is_empty()
    }

    /// Number of squares in the set.
    #[must_use]
    pub const fn count(self) -> u32 {
        self.bits.count_ones()
    }

    /// An efficient way to iterate over the set squares.
    #[must_use]
    pub const fn iter(self) -> BitboardIterator {
        BitboardIterator { bits: self.bits }
    }
}

impl fmt::Debug for Bitboard {
    /// Draws the set as an 8x8 grid: `1` for set squares, `.` otherwise, with
    /// row 0 (rank 8) at the top.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            Square::iter()
                .map(|square| if self.contains(square) { '1' } else { '.' })
                .chunks(BOARD_WIDTH as usize)
                .into_iter()
                .map(|mut row| row.join(SQUARE_SEPARATOR))
                .join(LINE_SEPARATOR)
        )
    }
}

impl BitOr for Bitboard {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::from_bits(self.bits | rhs.bits)
    }
}

impl From<Square> for Bitboard {
    fn from(square: Square) -> Self {
        Self::from_bits(1u64 << square.index())
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Square>>(squares: I) -> Self {
        let mut result = Self::empty();
        for square in squares {
            result.extend(square);
        }
        result
    }
}

impl IntoIterator for Bitboard {
    type IntoIter = BitboardIterator;
    type Item = Square;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterates over set squares in a given [Bitboard] from least significant 1
/// bits (LS1B) to most significant 1 bits (MS1B) through implementing
/// [BitScan] forward operation. This yields the squares in row-major order.
///
/// [BitScan]: https://www.chessprogramming.org/BitScan
pub struct BitboardIterator {
    bits: u64,
}

impl Iterator for BitboardIterator {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        // Get the LS1B and consume it from the iterator.
        let next_index = self.bits.trailing_zeros();
        self.bits ^= 1 << next_index;
        debug_assert!(next_index < u32::from(BOARD_SIZE));
        u8::try_from(next_index).ok().map(Square::from_index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.bits.count_ones() as usize;
        (count, Some(count))
    }
}

impl ExactSizeIterator for BitboardIterator {}

const LINE_SEPARATOR: &str = "\n";
const SQUARE_SEPARATOR: &str = " ";
