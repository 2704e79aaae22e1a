//! Chess primitives commonly used within [`crate::chess`].

use std::fmt::{self, Write};

use anyhow::bail;
use itertools::Itertools;

#[allow(missing_docs)]
pub const BOARD_WIDTH: u8 = 8;
#[allow(missing_docs)]
pub const BOARD_SIZE: u8 = BOARD_WIDTH * BOARD_WIDTH;

/// A candidate transition of a piece from one square to the other. Whether it
/// is legal depends on the board it is applied to: moves are not persisted
/// beyond their immediate use.
///
/// Moves are serialized in the same form the [UCI] protocol uses, minus the
/// promotion suffix: promotion is always to a queen, so it does not need to be
/// spelled out.
///
/// [UCI]: http://wbec-ridderkerk.nl/html/UCIProtocol.html
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    from: Square,
    to: Square,
}

impl Move {
    #[must_use]
    #[allow(missing_docs)]
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn from(&self) -> Square {
        self.from
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn to(&self) -> Square {
        self.to
    }

    /// Parses a move in "long algebraic" form (`e2e4`).
    ///
    /// # Errors
    ///
    /// If the input is not exactly two squares glued together.
    pub fn from_uci(input: &str) -> anyhow::Result<Self> {
        if input.len() != 4 || !input.is_ascii() {
            bail!("move should be 4 ASCII chars (e.g. \"e2e4\"), got \"{input}\"");
        }
        let (from, to) = input.split_at(2);
        Ok(Self::new(from.try_into()?, to.try_into()?))
    }
}

impl TryFrom<&str> for Move {
    type Error = anyhow::Error;

    fn try_from(input: &str) -> anyhow::Result<Self> {
        Self::from_uci(input)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// A square of the board addressed by `(row, col)`, both in `0..8`.
///
/// Rows go from Black's back rank (row 0, rank 8 in algebraic notation) down to
/// White's back rank (row 7, rank 1). Columns go from file `a` (col 0) to file
/// `h` (col 7):
///
/// ```
/// use caissa::chess::core::Square;
///
/// let e2 = Square::try_from("e2").unwrap();
/// assert_eq!((e2.row(), e2.col()), (6, 4));
/// assert_eq!(Square::new(0, 0).unwrap().to_string(), "a8");
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Creates a square from row and column.
    ///
    /// # Errors
    ///
    /// If either coordinate is outside `0..BOARD_WIDTH`.
    pub fn new(row: u8, col: u8) -> anyhow::Result<Self> {
        if row >= BOARD_WIDTH {
            bail!("row should be within 0..BOARD_WIDTH, got {row}");
        }
        if col >= BOARD_WIDTH {
            bail!("column should be within 0..BOARD_WIDTH, got {col}");
        }
        Ok(Self { row, col })
    }

    /// Callers guarantee both coordinates are on the board.
    pub(crate) const fn at(row: u8, col: u8) -> Self {
        debug_assert!(row < BOARD_WIDTH && col < BOARD_WIDTH);
        Self { row, col }
    }

    pub(crate) const fn from_index(index: u8) -> Self {
        debug_assert!(index < BOARD_SIZE);
        Self::at(index / BOARD_WIDTH, index % BOARD_WIDTH)
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Position of the square in row-major order: a8 is 0, h1 is 63.
    #[must_use]
    pub const fn index(self) -> u8 {
        self.row * BOARD_WIDTH + self.col
    }

    /// Returns the square `d_row` rows and `d_col` columns away or [`None`] if
    /// it falls off the board.
    #[must_use]
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        let row = i16::from(self.row) + i16::from(d_row);
        let col = i16::from(self.col) + i16::from(d_col);
        let width = i16::from(BOARD_WIDTH);
        if (0..width).contains(&row) && (0..width).contains(&col) {
            Some(Self::at(u8::try_from(row).ok()?, u8::try_from(col).ok()?))
        } else {
            None
        }
    }

    /// Moves one step in the given direction.
    #[must_use]
    pub fn shift(self, direction: Direction) -> Option<Self> {
        let (d_row, d_col) = direction.delta();
        self.offset(d_row, d_col)
    }

    /// All 64 squares in row-major order.
    pub fn iter() -> impl Iterator<Item = Self> {
        (0..BOARD_SIZE).map(Self::from_index)
    }
}

impl TryFrom<&str> for Square {
    type Error = anyhow::Error;

    fn try_from(square: &str) -> anyhow::Result<Self> {
        let (file, rank) = match square.chars().collect_tuple() {
            Some((file, rank)) => (file, rank),
            None => bail!(
                "square should be two-char, got {square} with {} chars",
                square.chars().count()
            ),
        };
        let col = match file {
            'a'..='h' => file as u8 - b'a',
            _ => bail!("file should be within 'a'..='h', got '{file}'"),
        };
        let row = match rank {
            '1'..='8' => b'8' - rank as u8,
            _ => bail!("rank should be within '1'..='8', got '{rank}'"),
        };
        Ok(Self::at(row, col))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char((b'a' + self.col) as char)?;
        f.write_char((b'8' - self.row) as char)
    }
}

/// A standard game of chess is played between two players: White (having the
/// advantage of the first turn) and Black.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    White,
    Black,
}

impl Player {
    /// "Flips" the color.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Row delta of a single pawn push: White moves toward row 0.
    pub(crate) const fn push_direction(self) -> i8 {
        match self {
            Self::White => -1,
            Self::Black => 1,
        }
    }

    /// Row the pawns start on and can make a double push from.
    pub(crate) const fn pawns_starting_row(self) -> u8 {
        match self {
            Self::White => 6,
            Self::Black => 1,
        }
    }

    /// The farthest row for this player's pawns: reaching it promotes them.
    pub(crate) const fn promotion_row(self) -> u8 {
        match self {
            Self::White => 0,
            Self::Black => BOARD_WIDTH - 1,
        }
    }
}

impl TryFrom<&str> for Player {
    type Error = anyhow::Error;

    fn try_from(player: &str) -> anyhow::Result<Self> {
        match player {
            "w" | "white" => Ok(Self::White),
            "b" | "black" => Ok(Self::Black),
            _ => bail!("player should be 'w' or 'b', got '{player}'"),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(match &self {
            Self::White => 'w',
            Self::Black => 'b',
        })
    }
}

/// Standard [chess pieces].
///
/// [chess pieces]: https://en.wikipedia.org/wiki/Chess_piece
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(match &self {
            Self::King => 'k',
            Self::Queen => 'q',
            Self::Rook => 'r',
            Self::Bishop => 'b',
            Self::Knight => 'n',
            Self::Pawn => 'p',
        })
    }
}

/// Represents a specific piece owned by a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    #[allow(missing_docs)]
    pub owner: Player,
    #[allow(missing_docs)]
    pub kind: PieceKind,
}

impl Piece {
    #[must_use]
    #[allow(missing_docs)]
    pub const fn new(owner: Player, kind: PieceKind) -> Self {
        Self { owner, kind }
    }
}

impl TryFrom<char> for Piece {
    type Error = anyhow::Error;

    fn try_from(symbol: char) -> anyhow::Result<Self> {
        let kind = match symbol.to_ascii_lowercase() {
            'k' => PieceKind::King,
            'q' => PieceKind::Queen,
            'r' => PieceKind::Rook,
            'b' => PieceKind::Bishop,
            'n' => PieceKind::Knight,
            'p' => PieceKind::Pawn,
            _ => bail!("piece symbol should be within \"KQRBNPkqrbnp\", got '{symbol}'"),
        };
        // White player: uppercase symbols, black player: lowercase symbols.
        let owner = if symbol.is_ascii_uppercase() {
            Player::White
        } else {
            Player::Black
        };
        Ok(Self { owner, kind })
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.kind.to_string();
        match self.owner {
            Player::White => f.write_str(&symbol.to_ascii_uppercase()),
            Player::Black => f.write_str(&symbol),
        }
    }
}

/// Directions on the board from a perspective of White player.
///
/// Traditionally those are North (Up), West (Left), East (Right), South (Down)
/// and their combinations. However, using cardinal directions is confusing,
/// hence they are replaced by relative directions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Also known as NorthWest.
    UpLeft,
    /// Also known as North.
    Up,
    /// Also known as NorthEast.
    UpRight,
    /// Also known as East.
    Right,
    /// Also known as West.
    Left,
    /// Also known as SouthWest.
    DownLeft,
    /// Also known as South.
    Down,
    /// Also known as SouthEast.
    DownRight,
}

impl Direction {
    /// Orthogonal directions a rook slides along.
    pub const ORTHOGONAL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];
    /// Diagonal directions a bishop slides along.
    pub const DIAGONAL: [Self; 4] = [Self::UpLeft, Self::UpRight, Self::DownLeft, Self::DownRight];
    /// Every direction: a queen's rays and a king's steps.
    pub const ALL: [Self; 8] = [
        Self::UpLeft,
        Self::Up,
        Self::UpRight,
        Self::Right,
        Self::Left,
        Self::DownLeft,
        Self::Down,
        Self::DownRight,
    ];

    /// `(row, col)` step. "Up" is toward Black's side, i.e. decreasing rows.
    #[must_use]
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Self::UpLeft => (-1, -1),
            Self::Up => (-1, 0),
            Self::UpRight => (-1, 1),
            Self::Right => (0, 1),
            Self::Left => (0, -1),
            Self::DownLeft => (1, -1),
            Self::Down => (1, 0),
            Self::DownRight => (1, 1),
        }
    }
}
