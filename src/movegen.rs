//! Pseudo-legal move generation, check detection and the legality filter.
//!
//! Pseudo-legal moves respect piece movement and blocking rules but not king
//! safety. Check detection generates the opponent's full pseudo-legal move
//! set and looks for the king square among the destinations; the legality
//! filter applies each candidate and keeps it only if the mover's own king is
//! safe afterwards. That recomputation is the dominant cost of the engine.

use crate::bitboard::{knight_destinations, sq_rank, sq_to_square, BitboardIter};
use crate::board::Board;
use crate::types::{Color, Move, PieceType, Square};

/// Upper bound on moves in any chess position, used to reserve once
const MAX_MOVES: usize = 218;

/// King move deltas: (rank_delta, file_delta)
#[rustfmt::skip]
const KING_DELTAS: [(i8, i8); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

pub struct MoveGenerator<'a> {
    board: &'a Board,
    color: Color,
    moves: Vec<Move>,
}

impl<'a> MoveGenerator<'a> {
    pub fn new(board: &'a Board, color: Color) -> Self {
        Self {
            board,
            color,
            moves: Vec::with_capacity(MAX_MOVES), // 1 malloc here
        }
    }

    /// Every pseudo-legal move for `color`, in a fixed piece-type order with
    /// origins scanned in ascending square order. Deterministic for a given
    /// board.
    pub fn collect(&mut self) -> Vec<Move> {
        let friendly = self.board.get_pieces_bb(self.color);
        let enemy = self.board.get_pieces_bb(self.color.other_color());

        self.generate_knight_moves(friendly);
        self.generate_king_moves();
        self.generate_rook_moves();
        self.generate_bishop_moves();
        self.generate_queen_moves();
        self.generate_pawn_moves(enemy);

        std::mem::take(&mut self.moves)
    }

    fn generate_knight_moves(&mut self, friendly: u64) {
        let knights = self.board.get_piece_bb(self.color, PieceType::Knight);
        for from_sq in BitboardIter(knights) {
            let from = sq_to_square(from_sq);
            let targets = knight_destinations(from_sq) & !friendly;
            for to_sq in BitboardIter(targets) {
                self.moves.push(Move::new(from, sq_to_square(to_sq)));
            }
        }
    }

    fn generate_king_moves(&mut self) {
        let kings = self.board.get_piece_bb(self.color, PieceType::King);
        for from_sq in BitboardIter(kings) {
            let from = sq_to_square(from_sq);
            for (dr, df) in KING_DELTAS {
                let Some(to) = from.offset(dr, df) else {
                    continue;
                };
                match self.board.piece_at(&to) {
                    Some(piece) if piece.color == self.color => {}
                    _ => self.moves.push(Move::new(from, to)),
                }
            }
        }
    }

    fn generate_rook_moves(&mut self) {
        let rooks = self.board.get_piece_bb(self.color, PieceType::Rook);
        for from_sq in BitboardIter(rooks) {
            self.generate_ray_moves(sq_to_square(from_sq), &ROOK_DIRECTIONS);
        }
    }

    fn generate_bishop_moves(&mut self) {
        let bishops = self.board.get_piece_bb(self.color, PieceType::Bishop);
        for from_sq in BitboardIter(bishops) {
            self.generate_ray_moves(sq_to_square(from_sq), &BISHOP_DIRECTIONS);
        }
    }

    fn generate_queen_moves(&mut self) {
        let queens = self.board.get_piece_bb(self.color, PieceType::Queen);
        for from_sq in BitboardIter(queens) {
            let from = sq_to_square(from_sq);
            self.generate_ray_moves(from, &ROOK_DIRECTIONS);
            self.generate_ray_moves(from, &BISHOP_DIRECTIONS);
        }
    }

    /// Walk each ray direction from `from`, appending empty squares, stopping
    /// at the first occupied square and including it iff it holds an enemy
    /// piece.
    fn generate_ray_moves(&mut self, from: Square, directions: &[(i8, i8); 4]) {
        for (dr, df) in directions {
            let mut current = from;
            while let Some(to) = current.offset(*dr, *df) {
                match self.board.piece_at(&to) {
                    None => {
                        self.moves.push(Move::new(from, to));
                        current = to;
                    }
                    Some(piece) => {
                        if piece.color != self.color {
                            self.moves.push(Move::new(from, to));
                        }
                        break;
                    }
                }
            }
        }
    }

    fn generate_pawn_moves(&mut self, enemy: u64) {
        let pawns = self.board.get_piece_bb(self.color, PieceType::Pawn);
        let empty = self.board.get_empty();
        let (forward, start_rank) = match self.color {
            Color::White => (1i8, 1u8),
            Color::Black => (-1i8, 6u8),
        };

        for from_sq in BitboardIter(pawns) {
            let from = sq_to_square(from_sq);

            // Diagonal captures, onto enemy-held squares only
            for df in [1i8, -1i8] {
                if let Some(to) = from.offset(forward, df) {
                    if enemy & (1u64 << to.index()) != 0 {
                        self.moves.push(Move::new(from, to));
                    }
                }
            }

            // Double push from the start rank, both squares must be empty
            if sq_rank(from_sq) == start_rank {
                let step = from.offset(forward, 0).unwrap();
                let to = step.offset(forward, 0).unwrap();
                if empty & (1u64 << step.index()) != 0 && empty & (1u64 << to.index()) != 0 {
                    self.moves.push(Move::new(from, to));
                }
            }

            // Single push to an empty square
            if let Some(to) = from.offset(forward, 0) {
                if empty & (1u64 << to.index()) != 0 {
                    self.moves.push(Move::new(from, to));
                }
            }
        }
    }
}

/// Is `color`'s king attacked? A kingless side is reported as in check so no
/// square index is ever derived from an empty bitboard.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    let Some(king_square) = board.king_square(color) else {
        return true;
    };
    let opponent_moves = MoveGenerator::new(board, color.other_color()).collect();
    opponent_moves.iter().any(|m| m.to == king_square)
}

/// The legal moves for the side to move: pseudo-legal moves that do not leave
/// the mover's own king in check. Reads from the pseudo-legal list and writes
/// survivors to a separate list.
pub fn legal_moves(board: &Board) -> Vec<Move> {
    let mover = board.side_to_move;
    let pseudo_legal = MoveGenerator::new(board, mover).collect();
    let mut legal = Vec::with_capacity(pseudo_legal.len());
    for mv in pseudo_legal {
        let child = board.apply_unclassified(&mv);
        if !is_in_check(&child, mover) {
            legal.push(mv);
        }
    }
    legal
}
