//! Static evaluation: material plus piece-square tables, always from White's
//! perspective. Positive favors White, negative favors Black, regardless of
//! whose turn it is.

use crate::bitboard::{sq_file, sq_rank, BitboardIter};
use crate::board::Board;
use crate::types::{Color, GameResult, PieceType, ALL_PIECE_TYPES};

/// Score for a decisive game-over position. Dominates any achievable
/// material score.
pub const MATE_SCORE: i32 = 1_000_000;

/// Material value in centipawns. The king value is a sentinel: with both
/// kings on the board it cancels out and never drives material trades.
pub fn piece_value(piece_type: PieceType) -> i32 {
    match piece_type {
        PieceType::Pawn => 100,
        PieceType::Rook => 500,
        PieceType::Knight => 300,
        PieceType::Bishop => 300,
        PieceType::Queen => 900,
        PieceType::King => 20_000,
    }
}

// Piece-square tables, written as seen from White's side of the board: the
// first row is rank 8, the last row is rank 1. White reads them through
// `7 - rank`, Black through `rank` (a vertical mirror), so both sides use the
// same relative-to-own-side orientation.

#[rustfmt::skip]
const PAWN_TABLE: [[i32; 8]; 8] = [
    [  0,   0,   0,   0,   0,   0,   0,   0],
    [ 50,  50,  50,  50,  50,  50,  50,  50],
    [ 10,  10,  20,  30,  30,  20,  10,  10],
    [  5,   5,  10,  25,  25,  10,   5,   5],
    [  0,   0,   0,  20,  20,   0,   0,   0],
    [  5,  -5, -10,   0,   0, -10,  -5,   5],
    [  5,  10,  10, -20, -20,  10,  10,   5],
    [  0,   0,   0,   0,   0,   0,   0,   0],
];

#[rustfmt::skip]
const KNIGHT_TABLE: [[i32; 8]; 8] = [
    [-50, -40, -30, -30, -30, -30, -40, -50],
    [-40, -20,   0,   5,   5,   0, -20, -40],
    [-30,   5,  10,  15,  15,  10,   5, -30],
    [-30,   0,  15,  20,  20,  15,   0, -30],
    [-30,   5,  15,  20,  20,  15,   5, -30],
    [-30,   0,  10,  15,  15,  10,   0, -30],
    [-40, -20,   0,   0,   0,   0, -20, -40],
    [-50, -40, -30, -30, -30, -30, -40, -50],
];

fn table_value(table: &[[i32; 8]; 8], sq: u8, color: Color) -> i32 {
    let row = match color {
        Color::White => 7 - sq_rank(sq),
        Color::Black => sq_rank(sq),
    };
    table[row as usize][sq_file(sq) as usize]
}

/// Evaluate a position in centipawns from White's perspective. Pure function
/// of the board.
pub fn evaluate(board: &Board) -> i32 {
    if board.game_over {
        return match board.result {
            Some(GameResult::WhiteWins) => MATE_SCORE,
            Some(GameResult::BlackWins) => -MATE_SCORE,
            Some(GameResult::Stalemate) | Some(GameResult::Draw) | None => 0,
        };
    }

    let mut score = 0;
    for color in [Color::White, Color::Black] {
        let sign = match color {
            Color::White => 1,
            Color::Black => -1,
        };

        for piece_type in ALL_PIECE_TYPES {
            let bb = board.get_piece_bb(color, piece_type);
            score += sign * piece_value(piece_type) * bb.count_ones() as i32;
        }

        for sq in BitboardIter(board.get_piece_bb(color, PieceType::Pawn)) {
            score += sign * table_value(&PAWN_TABLE, sq, color);
        }
        for sq in BitboardIter(board.get_piece_bb(color, PieceType::Knight)) {
            score += sign * table_value(&KNIGHT_TABLE, sq, color);
        }
    }
    score
}
