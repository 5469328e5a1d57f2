//! Bitboard helpers and the precomputed knight destination table.
//!
//! A bitboard is a 64-bit integer where each bit represents a square on the
//! chess board. Square indexing: a1 = 0, b1 = 1, ..., h1 = 7, a2 = 8, ..., h8 = 63,
//! i.e. square_index = rank * 8 + file with 0-indexed rank and file.
//!
//! The knight is the only piece whose destinations are not expressible as a
//! ray, so its ≤8 in-board targets are precomputed per square. The table is
//! built once, on first use, and never mutated afterwards.

use crate::types::Square;
use once_cell::sync::Lazy;

/// Convert a 0-indexed (rank, file) pair to a square index (0-63)
#[inline(always)]
pub const fn rf_to_sq(rank: u8, file: u8) -> u8 {
    rank * 8 + file
}

/// Convert a square index to a bitboard with that single bit set
#[inline(always)]
pub const fn sq_to_bb(sq: u8) -> u64 {
    1u64 << sq
}

/// Get the rank (0-7) from a square index
#[inline(always)]
pub const fn sq_rank(sq: u8) -> u8 {
    sq >> 3
}

/// Get the file (0-7) from a square index
#[inline(always)]
pub const fn sq_file(sq: u8) -> u8 {
    sq & 7
}

/// Convert a square index to a Square
#[inline(always)]
pub fn sq_to_square(sq: u8) -> Square {
    Square::new(sq_rank(sq), sq_file(sq))
}

/// Convert a Square to a bitboard with that single bit set
#[inline(always)]
pub fn square_to_bb(square: &Square) -> u64 {
    sq_to_bb(square.index())
}

/// Iterate over set bits in a bitboard, returning square indices in ascending order
pub struct BitboardIter(pub u64);

impl Iterator for BitboardIter {
    type Item = u8;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.0 == 0 {
            None
        } else {
            let sq = self.0.trailing_zeros() as u8;
            self.0 &= self.0 - 1; // Clear the lowest set bit
            Some(sq)
        }
    }
}

/// Knight move deltas: (rank_delta, file_delta)
#[rustfmt::skip]
const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (-2, -1), (-2, 1), (-1, -2), (-1, 2),
    (1, -2), (1, 2), (2, -1), (2, 1),
];

/// Precomputed knight destination bitboards, one per origin square
pub struct KnightTable {
    table: [u64; 64],
}

impl KnightTable {
    fn new() -> Self {
        let mut table = [0u64; 64];
        for sq in 0..64u8 {
            let from = sq_to_square(sq);
            for (dr, df) in KNIGHT_DELTAS {
                if let Some(to) = from.offset(dr, df) {
                    table[sq as usize] |= square_to_bb(&to);
                }
            }
        }
        KnightTable { table }
    }

    /// All in-board knight destinations from a square. Always valid, possibly empty near corners.
    #[inline(always)]
    pub fn lookup(&self, sq: u8) -> u64 {
        self.table[sq as usize]
    }
}

/// Global knight table, initialized once on first access
static KNIGHT_TABLE: Lazy<KnightTable> = Lazy::new(KnightTable::new);

/// Get the knight destinations for a square from the global table
#[inline(always)]
pub fn knight_destinations(sq: u8) -> u64 {
    KNIGHT_TABLE.lookup(sq)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_knight_center() {
        // Knight on e4 should reach d2, f2, c3, g3, c5, g5, d6, f6
        let sq = rf_to_sq(3, 4); // e4
        let attacks = knight_destinations(sq);

        assert!(attacks & sq_to_bb(rf_to_sq(1, 3)) != 0); // d2
        assert!(attacks & sq_to_bb(rf_to_sq(1, 5)) != 0); // f2
        assert!(attacks & sq_to_bb(rf_to_sq(2, 2)) != 0); // c3
        assert!(attacks & sq_to_bb(rf_to_sq(2, 6)) != 0); // g3
        assert!(attacks & sq_to_bb(rf_to_sq(4, 2)) != 0); // c5
        assert!(attacks & sq_to_bb(rf_to_sq(4, 6)) != 0); // g5
        assert!(attacks & sq_to_bb(rf_to_sq(5, 3)) != 0); // d6
        assert!(attacks & sq_to_bb(rf_to_sq(5, 5)) != 0); // f6
        assert_eq!(attacks.count_ones(), 8);
    }

    #[test]
    fn test_knight_corner() {
        // Knight on a1 should only reach b3 and c2
        let sq = rf_to_sq(0, 0); // a1
        let attacks = knight_destinations(sq);

        assert!(attacks & sq_to_bb(rf_to_sq(1, 2)) != 0); // c2
        assert!(attacks & sq_to_bb(rf_to_sq(2, 1)) != 0); // b3
        assert_eq!(attacks.count_ones(), 2);
    }

    #[test]
    fn test_knight_edge() {
        // Knight on h4 has 4 destinations: g2, f3, f5, g6
        let sq = rf_to_sq(3, 7); // h4
        let attacks = knight_destinations(sq);
        assert_eq!(attacks.count_ones(), 4);
    }

    #[test]
    fn test_bitboard_iter_ascending() {
        let bb = sq_to_bb(0) | sq_to_bb(7) | sq_to_bb(63); // a1, h1, h8
        let squares: Vec<u8> = BitboardIter(bb).collect();
        assert_eq!(squares, vec![0, 7, 63]);
    }

    #[test]
    fn test_sq_rank_file() {
        let sq = rf_to_sq(4, 6); // g5
        assert_eq!(sq_rank(sq), 4);
        assert_eq!(sq_file(sq), 6);
        assert_eq!(sq_to_square(sq), Square::new(4, 6));
    }
}
