//! Errors reported by [`crate::chess::game::Game`]. None of them is fatal:
//! the game state is left untouched whenever one is returned.

use thiserror::Error;

use crate::chess::core::{Move, Square};

/// Recoverable failures of game operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    /// [`crate::chess::game::Game::undo`] was called without any applied
    /// moves.
    #[error("no moves to undo")]
    NoHistory,
    /// The destination is not among the legal moves of the piece.
    #[error("illegal move {mv}")]
    IllegalMove {
        #[allow(missing_docs)]
        mv: Move,
    },
    /// There is no piece to move.
    #[error("no piece on {square}")]
    EmptySquare {
        #[allow(missing_docs)]
        square: Square,
    },
    /// The piece belongs to the player who is not on move.
    #[error("piece on {square} can not move: it is the other player's turn")]
    NotYourTurn {
        #[allow(missing_docs)]
        square: Square,
    },
}
