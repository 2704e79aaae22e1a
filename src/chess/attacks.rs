//! Check detection: finds the king and scans the raw moves of every opposing
//! piece for its square.
//!
//! Raw (not legality-filtered) moves are sufficient here: a piece attacks the
//! king even if moving it would expose its own king, because capturing the
//! king ends the game before that matters.

use crate::chess::bitboard::Bitboard;
use crate::chess::board::Board;
use crate::chess::core::{PieceKind, Player, Square};

impl Board {
    /// Square of the player's king. [`None`] if there is no king on the board.
    #[must_use]
    pub fn king_square(&self, player: Player) -> Option<Square> {
        self.pieces(player)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(square, _)| square)
    }

    /// Squares of the `attacker`'s pieces that can reach `target` with a raw
    /// move.
    #[must_use]
    pub fn attackers(&self, target: Square, attacker: Player) -> Bitboard {
        self.pieces(attacker)
            .filter(|&(from, _)| self.raw_moves(from).contains(target))
            .map(|(from, _)| from)
            .collect()
    }

    /// Whether the player's king is attacked by any opposing piece.
    ///
    /// A board without the player's king is never in check: this should not be
    /// reachable in a game where both sides only make legal moves, but it is
    /// handled gracefully instead of failing.
    #[must_use]
    pub fn is_in_check(&self, player: Player) -> bool {
        let Some(king) = self.king_square(player) else {
            return false;
        };
        self.attackers(king, player.opponent()).has_any()
    }
}
