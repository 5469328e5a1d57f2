use itertools::Itertools;

use crate::board::Board;
use crate::movegen::legal_moves;

/// Count the leaves of the legal-move tree to the given depth.
///
/// With no castling, en passant or promotion in the move model, counts from
/// the standard starting position match the published perft values through
/// depth 4 (20 / 400 / 8,902 / 197,281); those moves first occur at depth 5.
/// https://www.chessprogramming.org/Perft_Results
pub fn perft(board: &Board, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut nodes = 0;
    for mv in legal_moves(board) {
        let child = board.apply(&mv);
        nodes += perft(&child, depth - 1);
    }
    nodes
}

/// Per-root-move subtree counts, one `from-to: count` line per legal move.
/// Handy for diffing against another engine's divide output.
pub fn divide(board: &Board, depth: u8) -> String {
    legal_moves(board)
        .iter()
        .map(|mv| {
            let child = board.apply(mv);
            format!("{}: {}", mv.to_algebraic(), perft(&child, depth.saturating_sub(1)))
        })
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn expected_node_count(depth: u8) -> u64 {
        match depth {
            0 => 1,
            1 => 20,
            2 => 400,
            3 => 8_902,
            4 => 197_281,
            _ => panic!("No expected node count for depth {}", depth),
        }
    }

    #[test]
    fn test_perft_start() {
        let board = Board::starting_position();
        for depth in 0..=3 {
            assert_eq!(perft(&board, depth), expected_node_count(depth), "depth {depth}");
        }
    }

    #[test]
    #[ignore] // slow in debug builds
    fn test_perft_start_depth_4() {
        let board = Board::starting_position();
        assert_eq!(perft(&board, 4), expected_node_count(4));
    }

    #[test]
    fn test_divide_sums_to_perft() {
        let board = Board::starting_position();
        let divide_output = divide(&board, 2);
        let total: u64 = divide_output
            .lines()
            .map(|line| line.split(": ").nth(1).unwrap().parse::<u64>().unwrap())
            .sum();
        assert_eq!(total, perft(&board, 2));
        assert_eq!(divide_output.lines().count(), 20);
    }
}
