//! Computer opponents. The front-end asks a [`Strategy`] for a move whenever
//! the side it plays is to move and applies the answer through
//! [`crate::chess::game::Game::try_apply`], so a misbehaving strategy can't
//! corrupt the game.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::chess::board::Board;
use crate::chess::core::{Move, Player};

/// Picks a move for the player. [`None`] means the player has no legal moves.
pub trait Strategy {
    #[allow(missing_docs)]
    fn select_move(&mut self, player: Player, board: &Board) -> Option<Move>;
}

/// Plays a uniformly random legal move.
#[derive(Debug)]
pub struct RandomMover {
    rng: StdRng,
}

impl RandomMover {
    /// Seeds from the operating system: moves differ between runs.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic sequence of choices for reproducible games and tests.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomMover {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for RandomMover {
    fn select_move(&mut self, player: Player, board: &Board) -> Option<Move> {
        board
            .legal_moves_for(player)
            .choose(&mut self.rng)
            .copied()
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::chess::game::{Game, Outcome};

    #[test]
    fn picks_legal_moves() {
        let mut game = Game::new();
        let mut strategy = RandomMover::with_seed(42);
        for _ in 0..40 {
            let player = game.side_to_move();
            let Some(mv) = strategy.select_move(player, game.board()) else {
                break;
            };
            assert!(game.legal_moves(mv.from()).contains(mv.to()), "{mv}");
            if game.try_apply(mv).unwrap() == Outcome::Checkmate {
                break;
            }
        }
    }

    #[test]
    fn same_seed_same_moves() {
        let board = Board::starting();
        let mut first = RandomMover::with_seed(7);
        let mut second = RandomMover::with_seed(7);
        for _ in 0..10 {
            assert_eq!(
                first.select_move(Player::White, &board),
                second.select_move(Player::White, &board)
            );
        }
    }

    #[test]
    fn no_moves_when_checkmated() {
        let game =
            Game::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w").unwrap();
        let mut strategy = RandomMover::with_seed(0);
        assert_eq!(strategy.select_move(Player::White, game.board()), None);
        assert!(strategy.select_move(Player::Black, game.board()).is_some());
    }

    #[test]
    fn no_moves_when_stalemated() {
        let game = Game::from_fen("k7/8/1QK5/8/8/8/8/8 b").unwrap();
        let mut strategy = RandomMover::with_seed(0);
        assert!(!game.board().is_in_check(Player::Black));
        assert_eq!(strategy.select_move(Player::Black, game.board()), None);
    }
}
