//! Square-centric ([mailbox]) [`Board`]: an 8x8 grid of optional pieces. The
//! grid is small enough to be copied freely, which is what the legality filter
//! relies on: candidate moves are tried on a copy and the live board is never
//! touched.
//!
//! [mailbox]: https://www.chessprogramming.org/Mailbox

use std::fmt::{self, Write};

use anyhow::bail;

use crate::chess::core::{Piece, PieceKind, Player, Square, BOARD_WIDTH};

const WIDTH: usize = BOARD_WIDTH as usize;

/// The 8x8 grid. Row 0 holds Black's back rank, row 7 holds White's.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    grid: [[Option<Piece>; WIDTH]; WIDTH],
}

/// Order of the pieces on both back ranks, from file `a` to file `h`.
const BACK_RANK: [PieceKind; WIDTH] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Board {
    /// Creates the starting layout of the standard chess variant.
    ///
    /// ```
    /// use caissa::chess::board::Board;
    ///
    /// assert_eq!(
    ///     Board::starting().to_string(),
    ///     "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
    /// );
    /// ```
    #[must_use]
    pub fn starting() -> Self {
        let mut board = Self::empty();
        for (col, kind) in BACK_RANK.into_iter().enumerate() {
            board.grid[0][col] = Some(Piece::new(Player::Black, kind));
            board.grid[1][col] = Some(Piece::new(Player::Black, PieceKind::Pawn));
            board.grid[6][col] = Some(Piece::new(Player::White, PieceKind::Pawn));
            board.grid[7][col] = Some(Piece::new(Player::White, kind));
        }
        board
    }

    /// Creates a board without any pieces.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            grid: [[None; WIDTH]; WIDTH],
        }
    }

    /// Returns the piece occupying the square, if any.
    #[must_use]
    pub const fn at(&self, square: Square) -> Option<Piece> {
        self.grid[square.row() as usize][square.col() as usize]
    }

    /// Puts the piece (or nothing) on the square and returns the previous
    /// occupant.
    pub fn put(&mut self, square: Square, piece: Option<Piece>) -> Option<Piece> {
        std::mem::replace(
            &mut self.grid[square.row() as usize][square.col() as usize],
            piece,
        )
    }

    /// Removes the piece from the square and returns it.
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.put(square, None)
    }

    /// All pieces on the board with their squares, in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(|square| self.at(square).map(|piece| (square, piece)))
    }

    /// Pieces owned by the given player.
    pub fn pieces(&self, player: Player) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupied().filter(move |(_, piece)| piece.owner == player)
    }

    /// Number of pieces of the given kind owned by the player.
    #[must_use]
    pub fn count(&self, player: Player, kind: PieceKind) -> usize {
        self.pieces(player)
            .filter(|(_, piece)| piece.kind == kind)
            .count()
    }

    /// Parses the piece placement part of [Forsyth-Edwards Notation].
    ///
    /// ```text
    /// Piece Placement ::= Rank '/' Rank '/' ... '/' Rank (8 times)
    /// ```
    ///
    /// Each rank is listed from file `a` to file `h`; digits stand for runs of
    /// empty squares. The first rank listed is rank 8 (row 0).
    ///
    /// # Errors
    ///
    /// If the input does not describe exactly 8 ranks of exactly 8 squares or
    /// contains symbols other than piece letters and digits.
    ///
    /// [Forsyth-Edwards Notation]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
    pub fn from_fen(placement: &str) -> anyhow::Result<Self> {
        let mut result = Self::empty();
        let mut row: u8 = 0;
        for rank_fen in placement.split('/') {
            if row == BOARD_WIDTH {
                bail!("incorrect FEN: expected 8 ranks, got {placement}");
            }
            let mut col: u8 = 0;
            for symbol in rank_fen.chars() {
                if col >= BOARD_WIDTH {
                    bail!("incorrect FEN: rank {rank_fen} has more than {BOARD_WIDTH} squares");
                }
                match symbol {
                    '0' => bail!("increment can not be 0"),
                    '1'..='8' => {
                        col += symbol as u8 - b'0';
                        continue;
                    },
                    _ => (),
                }
                let piece = Piece::try_from(symbol)?;
                let _ = result.put(Square::new(row, col)?, Some(piece));
                col += 1;
            }
            if col != BOARD_WIDTH {
                bail!(
                    "incorrect FEN: rank size should be exactly {BOARD_WIDTH}, got {rank_fen} of \
                     length {col}"
                );
            }
            row += 1;
        }
        if row != BOARD_WIDTH {
            bail!("incorrect FEN: there should be 8 ranks, got {placement}");
        }
        Ok(result)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::starting()
    }
}

impl fmt::Display for Board {
    /// Prints the piece placement in FEN format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, rank) in self.grid.iter().enumerate() {
            let mut empty_squares = 0;
            for square in rank {
                if let Some(piece) = square {
                    if empty_squares != 0 {
                        write!(f, "{empty_squares}")?;
                        empty_squares = 0;
                    }
                    write!(f, "{piece}")?;
                } else {
                    empty_squares += 1;
                }
            }
            if empty_squares != 0 {
                write!(f, "{empty_squares}")?;
            }
            if row != WIDTH - 1 {
                const RANK_SEPARATOR: char = '/';
                f.write_char(RANK_SEPARATOR)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    /// Dumps the board in a simple format ('.' for empty square, FEN algebraic
    /// symbol for piece) a-la Stockfish "debug" command in UCI mode.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, rank) in self.grid.iter().enumerate() {
            for (col, square) in rank.iter().enumerate() {
                match square {
                    Some(piece) => write!(f, "{piece}"),
                    None => f.write_char('.'),
                }?;
                if col != WIDTH - 1 {
                    f.write_str(SQUARE_SEPARATOR)?;
                }
            }
            if row != WIDTH - 1 {
                f.write_str(LINE_SEPARATOR)?;
            }
        }
        Ok(())
    }
}

const LINE_SEPARATOR: &str = "\n";
const SQUARE_SEPARATOR: &str = " ";

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    fn setup(fen: &str) -> Board {
        let board = Board::from_fen(fen);
        assert!(board.is_ok(), "input: {fen}");
        let board = board.unwrap();
        assert_eq!(board.to_string(), fen);
        board
    }

    #[test]
    fn starting_material() {
        let board = Board::starting();
        for player in [Player::White, Player::Black] {
            assert_eq!(board.count(player, PieceKind::Pawn), 8);
            assert_eq!(board.count(player, PieceKind::Rook), 2);
            assert_eq!(board.count(player, PieceKind::Knight), 2);
            assert_eq!(board.count(player, PieceKind::Bishop), 2);
            assert_eq!(board.count(player, PieceKind::Queen), 1);
            assert_eq!(board.count(player, PieceKind::King), 1);
            assert_eq!(board.pieces(player).count(), 16);
        }
        assert_eq!(board.occupied().count(), 32);
    }

    #[test]
    fn starting_layout_is_symmetric() {
        let board = Board::starting();
        for square in Square::iter() {
            let mirrored = Square::new(BOARD_WIDTH - 1 - square.row(), square.col()).unwrap();
            match (board.at(square), board.at(mirrored)) {
                (None, None) => (),
                (Some(piece), Some(mirrored_piece)) => {
                    assert_eq!(piece.kind, mirrored_piece.kind);
                    assert_eq!(piece.owner, mirrored_piece.owner.opponent());
                },
                _ => panic!("{square} and {mirrored} should both be empty or occupied"),
            }
        }
        assert_eq!(
            board.at(Square::try_from("e1").unwrap()),
            Some(Piece::new(Player::White, PieceKind::King))
        );
        assert_eq!(
            board.at(Square::try_from("d8").unwrap()),
            Some(Piece::new(Player::Black, PieceKind::Queen))
        );
    }

    #[test]
    fn correct_fen() {
        let _ = setup("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR");
        let _ = setup("2r3r1/p3k3/1p3pp1/1B5p/5P2/2P1p1P1/PP4KP/3R4");
        let _ = setup("r3k3/5p2/2p5/p7/P3r3/2N2n2/1PP2P2/2K2B2");
        let _ = setup("8/8/8/8/8/8/8/8");
        let board = setup("8/8/8/8/3N4/8/8/8");
        assert_eq!(
            board.occupied().collect::<Vec<_>>(),
            vec![(
                Square::try_from("d4").unwrap(),
                Piece::new(Player::White, PieceKind::Knight)
            )]
        );
    }

    #[test]
    fn incorrect_fen() {
        assert!(Board::from_fen("").is_err());
        assert!(Board::from_fen("8/8/8/8/8/8/8").is_err());
        assert!(Board::from_fen("8/8/8/8/8/8/8/8/8").is_err());
        assert!(Board::from_fen("9/8/8/8/8/8/8/8").is_err());
        assert!(Board::from_fen("7/8/8/8/8/8/8/8").is_err());
        assert!(Board::from_fen("ppppppppp/8/8/8/8/8/8/8").is_err());
        assert!(Board::from_fen("0pppppppp/8/8/8/8/8/8/8").is_err());
        assert!(Board::from_fen("rnbqkbnx/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR").is_err());
        assert!(Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w").is_err());
        // Don't crash on unicode symbols.
        assert!(Board::from_fen("8/8/8/8/8/8/8/7\u{265a}").is_err());
    }

    #[test]
    fn put_and_take() {
        let mut board = Board::empty();
        let e4 = Square::try_from("e4").unwrap();
        let queen = Piece::new(Player::White, PieceKind::Queen);
        assert_eq!(board.put(e4, Some(queen)), None);
        assert_eq!(board.at(e4), Some(queen));
        assert_eq!(board.take(e4), Some(queen));
        assert_eq!(board.at(e4), None);
        assert_eq!(board, Board::empty());
    }

    #[test]
    fn dump() {
        assert_eq!(
            format!("{:?}", Board::starting()),
            "r n b q k b n r\n\
             p p p p p p p p\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             P P P P P P P P\n\
             R N B Q K B N R"
        );
    }
}
