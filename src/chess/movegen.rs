//! Move generation in two layers:
//!
//! - [`Board::raw_moves`] enumerates the destinations allowed by a piece's
//!   movement pattern and the occupancy of the board, without regard to the
//!   safety of its own king.
//! - [`Board::legal_moves`] removes the raw destinations that would leave the
//!   mover's king attacked (see [`Board::would_expose_check`]).
//!
//! The check detector ([`Board::is_in_check`]) only ever looks at raw moves,
//! so the two layers never recurse into each other.

use arrayvec::ArrayVec;

use crate::chess::bitboard::Bitboard;
use crate::chess::board::Board;
use crate::chess::core::{Direction, Move, PieceKind, Player, Square};

/// Upper bound on the number of moves one side can have on any placement of
/// pieces, whether it is reachable in a real game or not.
///
/// A side with `n` pieces gives each of them at most `min(27, 64 - n)`
/// destinations (27 for a queen in the center), which peaks at `37 * 27 = 999`
/// moves. Positions from real games stay far below that: the [maximum number
/// of moves] known for them is 218.
///
/// [maximum number of moves]: https://www.chessprogramming.org/Encoding_Moves#MoveIndex
pub const MAX_MOVES: usize = 1024;

/// All legal moves of one side, stored inline.
pub type MoveList = ArrayVec<Move, MAX_MOVES>;

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

impl Board {
    /// Destinations of the piece on `from` that satisfy its movement pattern
    /// and occupancy rules. King safety is not considered. An empty square has
    /// no moves.
    #[must_use]
    pub fn raw_moves(&self, from: Square) -> Bitboard {
        let Some(piece) = self.at(from) else {
            return Bitboard::empty();
        };
        match piece.kind {
            PieceKind::Pawn => self.pawn_moves(from, piece.owner),
            PieceKind::Knight => self.step_moves(
                from,
                piece.owner,
                KNIGHT_OFFSETS
                    .iter()
                    .filter_map(|&(d_row, d_col)| from.offset(d_row, d_col)),
            ),
            PieceKind::Bishop => self.sliding_moves(from, piece.owner, &Direction::DIAGONAL),
            PieceKind::Rook => self.sliding_moves(from, piece.owner, &Direction::ORTHOGONAL),
            PieceKind::Queen => {
                self.sliding_moves(from, piece.owner, &Direction::ORTHOGONAL)
                    | self.sliding_moves(from, piece.owner, &Direction::DIAGONAL)
            },
            PieceKind::King => self.step_moves(
                from,
                piece.owner,
                Direction::ALL
                    .iter()
                    .filter_map(|&direction| from.shift(direction)),
            ),
        }
    }

    /// True if the square is empty or holds a piece the player can capture.
    fn is_available(&self, square: Square, player: Player) -> bool {
        self.at(square).map_or(true, |piece| piece.owner != player)
    }

    fn step_moves(
        &self,
        from: Square,
        player: Player,
        targets: impl Iterator<Item = Square>,
    ) -> Bitboard {
        debug_assert_eq!(self.at(from).map(|piece| piece.owner), Some(player));
        targets
            .filter(|&to| self.is_available(to, player))
            .collect()
    }

    /// Casts a ray in each direction. A ray stops at the first occupied square
    /// and includes it only when it holds an opposing piece.
    fn sliding_moves(&self, from: Square, player: Player, directions: &[Direction]) -> Bitboard {
        let mut targets = Bitboard::empty();
        for &direction in directions {
            let mut current = from;
            while let Some(next) = current.shift(direction) {
                match self.at(next) {
                    None => targets.extend(next),
                    Some(blocker) => {
                        if blocker.owner != player {
                            targets.extend(next);
                        }
                        break;
                    },
                }
                current = next;
            }
        }
        targets
    }

    fn pawn_moves(&self, from: Square, player: Player) -> Bitboard {
        let mut targets = Bitboard::empty();
        let push = player.push_direction();
        // Single push and, from the starting row, double push.
        if let Some(single) = from.offset(push, 0) {
            if self.at(single).is_none() {
                targets.extend(single);
                if from.row() == player.pawns_starting_row() {
                    if let Some(double) = single.offset(push, 0) {
                        if self.at(double).is_none() {
                            targets.extend(double);
                        }
                    }
                }
            }
        }
        // Diagonal captures only onto opposing pieces.
        for d_col in [-1, 1] {
            if let Some(capture) = from.offset(push, d_col) {
                if self
                    .at(capture)
                    .is_some_and(|piece| piece.owner != player)
                {
                    targets.extend(capture);
                }
            }
        }
        targets
    }

    /// Simulates moving the piece from `from` to `to` on a copy of the board
    /// (dropping whatever stood on `to`) and checks whether the mover's king
    /// is attacked afterwards. `self` is never modified.
    ///
    /// An empty `from` square never exposes anything.
    #[must_use]
    pub fn would_expose_check(&self, from: Square, to: Square) -> bool {
        let Some(piece) = self.at(from) else {
            return false;
        };
        let mut simulated = *self;
        let _ = simulated.take(from);
        let _ = simulated.put(to, Some(piece));
        simulated.is_in_check(piece.owner)
    }

    /// Raw moves of the piece on `from` minus those that would leave its own
    /// king in check.
    #[must_use]
    pub fn legal_moves(&self, from: Square) -> Bitboard {
        self.raw_moves(from)
            .iter()
            .filter(|&to| !self.would_expose_check(from, to))
            .collect()
    }

    /// Every legal move of every piece the player owns, in row-major order of
    /// the origin squares.
    #[must_use]
    pub fn legal_moves_for(&self, player: Player) -> MoveList {
        let mut moves = MoveList::new();
        for (from, _) in self.pieces(player) {
            for to in self.legal_moves(from) {
                moves.push(Move::new(from, to));
            }
        }
        moves
    }

    /// True if at least one piece of the player has a legal move. Stops at the
    /// first one found.
    #[must_use]
    pub fn has_legal_moves(&self, player: Player) -> bool {
        self.pieces(player)
            .any(|(from, _)| self.legal_moves(from).has_any())
    }
}
