//! [Perft] (*per*formance *t*esting) is a technique for checking correctness of
//! move generation: it counts the leaf nodes of the legal move tree up to a
//! fixed depth and compares the number against known values. Every node is
//! reached by [`Game::apply`] and left by [`Game::undo`], so it also checks that
//! taking moves back restores the position.
//!
//! [Perft]: https://www.chessprogramming.org/Perft

use crate::chess::core::Move;
use crate::chess::game::Game;

/// Counts the leaves of the legal move tree of given depth. The game is
/// returned to its original position.
#[must_use]
pub fn perft(game: &mut Game, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = game.board().legal_moves_for(game.side_to_move());
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut nodes = 0;
    for mv in moves {
        let _ = game.apply(mv.from(), mv.to());
        nodes += perft(game, depth - 1);
        let _ = game.undo();
    }
    nodes
}

/// [`perft`] split by the first move: useful for finding the exact subtree
/// where two move generators disagree.
#[must_use]
pub fn divide(game: &mut Game, depth: u8) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    let moves = game.board().legal_moves_for(game.side_to_move());
    let mut subtrees = Vec::with_capacity(moves.len());
    for mv in moves {
        let _ = game.apply(mv.from(), mv.to());
        subtrees.push((mv, perft(game, depth - 1)));
        let _ = game.undo();
    }
    subtrees
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn starting_position() {
        let mut game = Game::new();
        assert_eq!(perft(&mut game, 0), 1);
        assert_eq!(perft(&mut game, 1), 20);
        assert_eq!(perft(&mut game, 2), 400);
        assert_eq!(perft(&mut game, 3), 8902);
        assert_eq!(game.state(), Game::new().state());
        assert_eq!(game.history_len(), 0);
    }

    #[test]
    fn divide_sums_up() {
        let mut game = Game::new();
        let subtrees = divide(&mut game, 2);
        assert_eq!(subtrees.len(), 20);
        assert!(subtrees.iter().all(|&(_, nodes)| nodes == 20));
        assert_eq!(subtrees.iter().map(|&(_, nodes)| nodes).sum::<u64>(), 400);
        assert!(divide(&mut game, 0).is_empty());
    }

    #[test]
    fn checkmated_side_has_no_moves() {
        let mut game =
            Game::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w").unwrap();
        assert_eq!(perft(&mut game, 1), 0);
        assert_eq!(perft(&mut game, 3), 0);
    }
}
