pub mod types;
pub mod bitboard;
pub mod board;
pub mod movegen;
pub mod evaluate;
pub mod search;
pub mod perft;
