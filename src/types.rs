#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn other_color(&self) -> Color {
        if *self == Color::White {
            Color::Black
        } else {
            Color::White
        }
    }

    /// Index into per-color arrays (White = 0, Black = 1)
    #[inline(always)]
    pub fn index(&self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PieceType {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

/// All piece types, in the fixed order used for board storage and move generation
pub const ALL_PIECE_TYPES: [PieceType; 6] = [
    PieceType::Pawn,
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
];

impl PieceType {
    /// Index into per-piece-type arrays, matching `ALL_PIECE_TYPES` order
    #[inline(always)]
    pub fn index(&self) -> usize {
        match self {
            PieceType::Pawn => 0,
            PieceType::Rook => 1,
            PieceType::Knight => 2,
            PieceType::Bishop => 3,
            PieceType::Queen => 4,
            PieceType::King => 5,
        }
    }

}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Piece {
    pub color: Color,
    pub piece_type: PieceType,
}

impl Piece {
    pub fn new(color: Color, piece_type: PieceType) -> Piece {
        Piece { color, piece_type }
    }
}

/// A board square. Rank and file are 0-indexed: a1 is (0, 0), h8 is (7, 7).
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Square {
    pub rank: u8,
    pub file: u8,
}

impl Square {
    pub fn new(rank: u8, file: u8) -> Square {
        assert!(
            rank < 8 && file < 8,
            "Square out of range: rank {rank}, file {file}"
        );
        Square { rank, file }
    }

    /// Square index (0-63), a1 = 0, h1 = 7, a2 = 8, ..., h8 = 63
    #[inline(always)]
    pub fn index(&self) -> u8 {
        self.rank * 8 + self.file
    }

    /// The square offset by (rank_delta, file_delta), or None if it falls off the board
    pub fn offset(&self, rank_delta: i8, file_delta: i8) -> Option<Square> {
        let rank = self.rank as i8 + rank_delta;
        let file = self.file as i8 + file_delta;
        if (0..8).contains(&rank) && (0..8).contains(&file) {
            Some(Square {
                rank: rank as u8,
                file: file as u8,
            })
        } else {
            None
        }
    }

    pub fn to_algebraic(&self) -> String {
        format!(
            "{}{}",
            (self.file + b'a') as char,
            (self.rank + b'1') as char
        )
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Move {
        Move { from, to }
    }

    pub fn to_algebraic(&self) -> String {
        format!("{}{}", self.from.to_algebraic(), self.to.to_algebraic())
    }
}

/// Outcome of a finished game. Only meaningful once `Board::game_over` is set.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum GameResult {
    WhiteWins,
    BlackWins,
    Stalemate,
    Draw,
}
