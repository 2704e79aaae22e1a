//! [`Game`] owns the board and drives it forward and backward: it applies
//! moves, records them for undo, keeps the turn order and classifies the
//! position after each move.
//!
//! It also tracks the piece currently selected by the player ([`Game::select`])
//! so that front-ends can implement "click a piece, then click a destination"
//! without re-validating moves themselves.

use std::fmt;

use anyhow::bail;

use crate::chess::bitboard::Bitboard;
use crate::chess::board::Board;
use crate::chess::core::{Move, Piece, PieceKind, Player, Square};
use crate::chess::error::GameError;
use crate::chess::history::{History, MoveRecord};

/// Classification of the position right after a move, from the perspective of
/// the player who is now on move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The player to move is not in check.
    Normal,
    /// The player to move is in check and has at least one legal move.
    Check,
    /// The player to move is in check and has no legal moves.
    Checkmate,
}

/// Where the game stands.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    #[allow(missing_docs)]
    ToMove { player: Player, in_check: bool },
    /// The player on move has been checkmated. This is not a terminal state:
    /// the game keeps accepting moves (e.g. after an undo).
    Checkmate {
        #[allow(missing_docs)]
        winner: Player,
    },
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ToMove {
                player,
                in_check: false,
            } => write!(f, "{} to move", name(*player)),
            Self::ToMove {
                player,
                in_check: true,
            } => write!(f, "{} to move, in check", name(*player)),
            Self::Checkmate { winner } => write!(f, "checkmate, {} wins", name(*winner)),
        }
    }
}

const fn name(player: Player) -> &'static str {
    match player {
        Player::White => "white",
        Player::Black => "black",
    }
}

/// Result of [`Game::select`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    /// A piece of the player to move is now selected; `moves` are its legal
    /// destinations.
    Selected {
        #[allow(missing_docs)]
        square: Square,
        #[allow(missing_docs)]
        moves: Bitboard,
    },
    /// The selected piece moved to the clicked square.
    Moved {
        #[allow(missing_docs)]
        mv: Move,
        #[allow(missing_docs)]
        outcome: Outcome,
    },
    /// Nothing is selected anymore.
    Cleared,
}

/// Read-only snapshot of everything a front-end needs to draw the game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    #[allow(missing_docs)]
    pub board: Board,
    #[allow(missing_docs)]
    pub side_to_move: Player,
    /// Currently selected square.
    pub selection: Option<Square>,
    /// Legal destinations of the selected piece. Empty without a selection.
    pub legal_moves: Bitboard,
}

/// A game of standard chess without castling and en passant. Pawns always
/// promote to a queen.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    side_to_move: Player,
    history: History,
    /// Selected square and its cached legal moves.
    selection: Option<(Square, Bitboard)>,
}

impl Game {
    /// Starts a new game from the standard layout, White to move.
    #[must_use]
    pub fn new() -> Self {
        Self::with_board(Board::starting(), Player::White)
    }

    /// Starts a game from an arbitrary board with an empty history.
    #[must_use]
    pub const fn with_board(board: Board, side_to_move: Player) -> Self {
        Self {
            board,
            side_to_move,
            history: History::new(),
            selection: None,
        }
    }

    /// Parses the first two fields of [Forsyth-Edwards Notation]: piece
    /// placement and side to move (defaults to White when omitted).
    ///
    /// The remaining FEN fields are accepted for compatibility but ignored:
    /// castling and en passant are not part of the rules implemented here and
    /// the move counters are not tracked.
    ///
    /// # Errors
    ///
    /// If the placement or the side to move are malformed or there are more
    /// than 6 fields.
    ///
    /// [Forsyth-Edwards Notation]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
    pub fn from_fen(input: &str) -> anyhow::Result<Self> {
        let mut parts = input.split_whitespace();
        let board = match parts.next() {
            Some(placement) => Board::from_fen(placement)?,
            None => bail!("incorrect FEN: missing pieces placement"),
        };
        let side_to_move = match parts.next() {
            Some(side) => side.try_into()?,
            None => Player::White,
        };
        const IGNORED_FIELDS: usize = 4;
        if parts.nth(IGNORED_FIELDS).is_some() {
            bail!("trailing symbols are not allowed in FEN: {input}");
        }
        Ok(Self::with_board(board, side_to_move))
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn side_to_move(&self) -> Player {
        self.side_to_move
    }

    /// Applied moves that can be undone, oldest first.
    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }

    /// Number of moves that can be undone.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Legal destinations of the piece on the square (of either color).
    #[must_use]
    pub fn legal_moves(&self, square: Square) -> Bitboard {
        self.board.legal_moves(square)
    }

    /// Applies the move and reports the status of the player who is to move
    /// next.
    ///
    /// The caller guarantees that `to` is among [`Game::legal_moves`] of
    /// `from` and that the piece on `from` belongs to the player to move; use
    /// [`Game::try_apply`] for unvalidated input. A pawn reaching its farthest
    /// row becomes a queen.
    pub fn apply(&mut self, from: Square, to: Square) -> Outcome {
        debug_assert!(
            self.board
                .at(from)
                .is_some_and(|piece| piece.owner == self.side_to_move),
            "{from} should hold a piece of the player to move"
        );
        debug_assert!(
            self.board.legal_moves(from).contains(to),
            "{from}{to} should be a legal move"
        );
        let Some(moved) = self.board.take(from) else {
            return self.outcome();
        };
        let placed = if moved.kind == PieceKind::Pawn && to.row() == moved.owner.promotion_row()
        {
            Piece::new(moved.owner, PieceKind::Queen)
        } else {
            moved
        };
        let captured = self.board.put(to, Some(placed));
        self.history.push(MoveRecord {
            from,
            to,
            moved,
            captured,
        });
        self.side_to_move = self.side_to_move.opponent();
        self.selection = None;
        self.outcome()
    }

    /// Validates the move against the current position and applies it.
    ///
    /// # Errors
    ///
    /// If there is no piece on the origin square, it belongs to the other
    /// player or the destination is not one of its legal moves. The game is
    /// not changed in that case.
    pub fn try_apply(&mut self, mv: Move) -> Result<Outcome, GameError> {
        let piece = self
            .board
            .at(mv.from())
            .ok_or(GameError::EmptySquare { square: mv.from() })?;
        if piece.owner != self.side_to_move {
            return Err(GameError::NotYourTurn { square: mv.from() });
        }
        if !self.legal_moves(mv.from()).contains(mv.to()) {
            return Err(GameError::IllegalMove { mv });
        }
        Ok(self.apply(mv.from(), mv.to()))
    }

    /// Takes back the most recent move, restoring the board and the turn
    /// exactly as they were before it.
    ///
    /// # Errors
    ///
    /// [`GameError::NoHistory`] if no moves were applied; nothing changes.
    pub fn undo(&mut self) -> Result<MoveRecord, GameError> {
        let record = self.history.pop().ok_or(GameError::NoHistory)?;
        let _ = self.board.put(record.to, record.captured);
        let _ = self.board.put(record.from, Some(record.moved));
        self.side_to_move = self.side_to_move.opponent();
        self.selection = None;
        Ok(record)
    }

    /// Starts over from the standard layout.
    pub fn reset(&mut self) {
        self.board = Board::starting();
        self.side_to_move = Player::White;
        self.history.clear();
        self.selection = None;
    }

    /// Classifies the current position for the player to move. Checkmate
    /// requires searching every piece of that player for a legal move.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        if !self.board.is_in_check(self.side_to_move) {
            Outcome::Normal
        } else if self.board.has_legal_moves(self.side_to_move) {
            Outcome::Check
        } else {
            Outcome::Checkmate
        }
    }

    #[must_use]
    #[allow(missing_docs)]
    pub fn status(&self) -> Status {
        let player = self.side_to_move;
        match self.outcome() {
            Outcome::Normal => Status::ToMove {
                player,
                in_check: false,
            },
            Outcome::Check => Status::ToMove {
                player,
                in_check: true,
            },
            Outcome::Checkmate => Status::Checkmate {
                winner: player.opponent(),
            },
        }
    }

    /// Handles a click on the square:
    ///
    /// - with a piece selected, clicking one of its legal destinations makes
    ///   the move;
    /// - clicking a piece of the player to move selects it (clicking the
    ///   selected piece again deselects it);
    /// - anything else clears the selection.
    ///
    /// Illegal destinations are never reported as errors.
    pub fn select(&mut self, square: Square) -> Selection {
        if let Some((selected, moves)) = self.selection {
            if moves.contains(square) {
                let outcome = self.apply(selected, square);
                return Selection::Moved {
                    mv: Move::new(selected, square),
                    outcome,
                };
            }
            if selected == square {
                self.selection = None;
                return Selection::Cleared;
            }
        }
        match self.board.at(square) {
            Some(piece) if piece.owner == self.side_to_move => {
                let moves = self.legal_moves(square);
                self.selection = Some((square, moves));
                Selection::Selected { square, moves }
            },
            _ => {
                self.selection = None;
                Selection::Cleared
            },
        }
    }

    /// Cancels the current selection, if any.
    pub fn deselect(&mut self) {
        self.selection = None;
    }

    #[must_use]
    #[allow(missing_docs)]
    pub fn state(&self) -> GameState {
        GameState {
            board: self.board,
            side_to_move: self.side_to_move,
            selection: self.selection.map(|(square, _)| square),
            legal_moves: self
                .selection
                .map_or_else(Bitboard::empty, |(_, moves)| moves),
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Game {
    /// Prints the first two FEN fields: piece placement and side to move.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.board, self.side_to_move)
    }
}
