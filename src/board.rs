//! The position representation: twelve piece bitboards plus game state flags,
//! with cached aggregate occupancies and the check flag for the side to move.
//!
//! Boards are copy-on-branch values: `apply` returns a new `Board` and never
//! mutates the original, so search branches never share mutable state.

use crate::bitboard::{sq_to_square, square_to_bb, BitboardIter};
use crate::movegen;
use crate::types::{Color, GameResult, Move, Piece, PieceType, Square, ALL_PIECE_TYPES};

/// Back rank piece order, a-file to h-file
const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Piece bitboards, indexed [color][piece_type]. Pairwise disjoint.
    pieces: [[u64; 6]; 2],

    pub side_to_move: Color,

    /// Castling rights. Recorded and maintained, but castling is never
    /// generated or executed as a move.
    pub castle_kingside_white: bool,
    pub castle_queenside_white: bool,
    pub castle_kingside_black: bool,
    pub castle_queenside_black: bool,

    /// En passant target square after a double pawn push. Recorded only;
    /// en passant captures are never generated.
    pub en_passant_target: Option<Square>,

    pub halfmove_clock: u32,
    pub fullmove_number: u32,

    pub game_over: bool,
    pub result: Option<GameResult>,

    // Cached aggregates, recomputed after every piece-set mutation
    white_occupancy: u64,
    black_occupancy: u64,
    occupied: u64,
    empty: u64,
    /// Whether the side to move is currently in check
    in_check: bool,
}

impl Board {
    /// A board with no pieces, no rights, White to move. Building block for
    /// the public constructors; not a playable position on its own.
    fn blank() -> Board {
        Board {
            pieces: [[0; 6]; 2],
            side_to_move: Color::White,
            castle_kingside_white: false,
            castle_queenside_white: false,
            castle_kingside_black: false,
            castle_queenside_black: false,
            en_passant_target: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            game_over: false,
            result: None,
            white_occupancy: 0,
            black_occupancy: 0,
            occupied: 0,
            empty: !0,
            in_check: false,
        }
    }

    /// Construct a position from an explicit piece list. This is the seam an
    /// external importer feeds: aggregates, the check flag and the terminal
    /// status are all consistent by the time the board is returned.
    pub fn new(pieces: &[(Piece, Square)], side_to_move: Color) -> Board {
        let mut board = Board::blank();
        board.side_to_move = side_to_move;
        for (piece, square) in pieces {
            board.place_piece(*piece, *square);
        }
        board.recompute_aggregates();
        board.update_check_flag();
        board.refresh_status();
        board
    }

    /// The standard chess starting position, full castling rights
    pub fn starting_position() -> Board {
        let mut board = Board::blank();
        for file in 0..8 {
            board.place_piece(Piece::new(Color::White, BACK_RANK[file as usize]), Square::new(0, file));
            board.place_piece(Piece::new(Color::White, PieceType::Pawn), Square::new(1, file));
            board.place_piece(Piece::new(Color::Black, PieceType::Pawn), Square::new(6, file));
            board.place_piece(Piece::new(Color::Black, BACK_RANK[file as usize]), Square::new(7, file));
        }
        board.castle_kingside_white = true;
        board.castle_queenside_white = true;
        board.castle_kingside_black = true;
        board.castle_queenside_black = true;
        board.recompute_aggregates();
        board.update_check_flag();
        board
    }

    fn place_piece(&mut self, piece: Piece, square: Square) {
        let bb = square_to_bb(&square);
        assert!(
            self.pieces.iter().flatten().all(|set| set & bb == 0),
            "Square {} is already occupied",
            square.to_algebraic()
        );
        self.pieces[piece.color.index()][piece.piece_type.index()] |= bb;
    }

    /// Bitboard of one piece type for one color
    #[inline(always)]
    pub fn get_piece_bb(&self, color: Color, piece_type: PieceType) -> u64 {
        self.pieces[color.index()][piece_type.index()]
    }

    /// Bitboard of all pieces of one color
    #[inline(always)]
    pub fn get_pieces_bb(&self, color: Color) -> u64 {
        match color {
            Color::White => self.white_occupancy,
            Color::Black => self.black_occupancy,
        }
    }

    #[inline(always)]
    pub fn get_occupied(&self) -> u64 {
        self.occupied
    }

    #[inline(always)]
    pub fn get_empty(&self) -> u64 {
        self.empty
    }

    /// Whether the side to move is in check
    #[inline(always)]
    pub fn in_check(&self) -> bool {
        self.in_check
    }

    /// The piece on a square, if any
    pub fn piece_at(&self, square: &Square) -> Option<Piece> {
        let bb = square_to_bb(square);
        if self.occupied & bb == 0 {
            return None;
        }
        for color in [Color::White, Color::Black] {
            if self.get_pieces_bb(color) & bb == 0 {
                continue;
            }
            for piece_type in ALL_PIECE_TYPES {
                if self.get_piece_bb(color, piece_type) & bb != 0 {
                    return Some(Piece::new(color, piece_type));
                }
            }
        }
        None
    }

    /// The square of a side's king, or None for a degenerate kingless position
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let king_bb = self.get_piece_bb(color, PieceType::King);
        BitboardIter(king_bb).next().map(sq_to_square)
    }

    /// Recompute the cached occupancy aggregates from the piece bitboards.
    /// Idempotent: calling it twice in a row yields identical fields.
    pub fn recompute_aggregates(&mut self) {
        self.white_occupancy = self.pieces[Color::White.index()]
            .iter()
            .fold(0, |acc, bb| acc | bb);
        self.black_occupancy = self.pieces[Color::Black.index()]
            .iter()
            .fold(0, |acc, bb| acc | bb);
        self.occupied = self.white_occupancy | self.black_occupancy;
        self.empty = !self.occupied;
    }

    fn update_check_flag(&mut self) {
        self.in_check = movegen::is_in_check(self, self.side_to_move);
    }

    /// Apply a move and return the resulting position: piece bits moved,
    /// capture resolved, flags maintained, side flipped, aggregates and check
    /// flag recomputed, terminal state classified.
    pub fn apply(&self, mv: &Move) -> Board {
        let mut board = self.apply_unclassified(mv);
        board.refresh_status();
        board
    }

    /// The board-update step of `apply`, without terminal-state
    /// classification. Used by the legality filter, which only needs the
    /// child's check flag; classifying there would recurse without bound.
    pub(crate) fn apply_unclassified(&self, mv: &Move) -> Board {
        let mover = self.side_to_move;
        let piece = match self.piece_at(&mv.from) {
            Some(p) => p,
            None => panic!(
                "No piece to move on {} (move {})",
                mv.from.to_algebraic(),
                mv.to_algebraic()
            ),
        };
        let captured = self.piece_at(&mv.to);

        let from_bb = square_to_bb(&mv.from);
        let to_bb = square_to_bb(&mv.to);

        let mut board = self.clone();
        board.game_over = false;
        board.result = None;

        // Move the bit within the mover's piece-set and explicitly clear the
        // destination from every other set, re-establishing disjointness.
        for color_pieces in board.pieces.iter_mut() {
            for bb in color_pieces.iter_mut() {
                *bb &= !to_bb;
            }
        }
        board.pieces[piece.color.index()][piece.piece_type.index()] &= !from_bb;
        board.pieces[piece.color.index()][piece.piece_type.index()] |= to_bb;

        // En passant target: set on a double pawn push, cleared otherwise
        board.en_passant_target = if piece.piece_type == PieceType::Pawn
            && mv.from.rank.abs_diff(mv.to.rank) == 2
        {
            Some(Square::new((mv.from.rank + mv.to.rank) / 2, mv.from.file))
        } else {
            None
        };

        board.update_castling_rights(&piece, mv, &captured);

        if piece.piece_type == PieceType::Pawn || captured.is_some() {
            board.halfmove_clock = 0;
        } else {
            board.halfmove_clock = self.halfmove_clock + 1;
        }
        if mover == Color::Black {
            board.fullmove_number = self.fullmove_number + 1;
        }

        board.side_to_move = mover.other_color();
        board.recompute_aggregates();
        board.update_check_flag();
        board
    }

    fn update_castling_rights(&mut self, piece: &Piece, mv: &Move, captured: &Option<Piece>) {
        if piece.piece_type == PieceType::King {
            match piece.color {
                Color::White => {
                    self.castle_kingside_white = false;
                    self.castle_queenside_white = false;
                }
                Color::Black => {
                    self.castle_kingside_black = false;
                    self.castle_queenside_black = false;
                }
            }
        }
        if piece.piece_type == PieceType::Rook {
            self.clear_rook_right(piece.color, &mv.from);
        }
        if let Some(captured) = captured {
            if captured.piece_type == PieceType::Rook {
                self.clear_rook_right(captured.color, &mv.to);
            }
        }
    }

    fn clear_rook_right(&mut self, color: Color, square: &Square) {
        match (color, square.rank, square.file) {
            (Color::White, 0, 0) => self.castle_queenside_white = false,
            (Color::White, 0, 7) => self.castle_kingside_white = false,
            (Color::Black, 7, 0) => self.castle_queenside_black = false,
            (Color::Black, 7, 7) => self.castle_kingside_black = false,
            _ => {}
        }
    }

    /// Classify the terminal state for the side to move: checkmate when in
    /// check with no legal moves (the side that just moved wins), stalemate
    /// when not in check with no legal moves.
    pub fn refresh_status(&mut self) {
        if movegen::legal_moves(self).is_empty() {
            self.game_over = true;
            self.result = Some(if self.in_check {
                match self.side_to_move {
                    Color::White => GameResult::BlackWins,
                    Color::Black => GameResult::WhiteWins,
                }
            } else {
                GameResult::Stalemate
            });
        }
    }
}
