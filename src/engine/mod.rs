//! Text front-end for playing a game from a terminal or a script.
//!
//! [`Engine::run`] is the "main loop": it reads one command per line from the
//! input stream, executes it on the [`Game`] and writes the response to the
//! output stream. Problems with the input (unknown commands, illegal moves)
//! are reported as `info string ...` lines and never stop the loop.

use std::io::{BufRead, Write};

use itertools::Itertools;

use crate::chess::bitboard::Bitboard;
use crate::chess::core::{Move, Player, Square};
use crate::chess::game::{Game, Outcome, Selection};
use crate::engine::command::Command;
use crate::strategy::Strategy;

mod command;

/// Computer opponent playing one of the sides.
struct Computer {
    player: Player,
    strategy: Box<dyn Strategy>,
}

/// The Engine connects the game with the I/O and, optionally, with a computer
/// opponent.
pub struct Engine<'a, R: BufRead, W: Write> {
    game: Game,
    computer: Option<Computer>,
    input: &'a mut R,
    output: &'a mut W,
}

impl<'a, R: BufRead, W: Write> Engine<'a, R, W> {
    /// Creates a new instance of the engine for the game and provided I/O.
    #[must_use]
    pub fn new(game: Game, input: &'a mut R, output: &'a mut W) -> Self {
        Self {
            game,
            computer: None,
            input,
            output,
        }
    }

    /// Lets the strategy play for the player.
    #[must_use]
    pub fn with_computer(mut self, player: Player, strategy: Box<dyn Strategy>) -> Self {
        self.computer = Some(Computer { player, strategy });
        self
    }

    /// Continuously reads the input stream and executes commands until
    /// "quit" is sent or the input is closed.
    ///
    /// # Errors
    ///
    /// Only when reading the input or writing the output fails.
    pub fn run(&mut self) -> anyhow::Result<()> {
        self.play_computer()?;
        let mut line = String::new();
        loop {
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            if line.trim().is_empty() {
                continue;
            }
            match Command::parse(&line) {
                Command::Show => self.handle_show()?,
                Command::Moves { square } => self.handle_moves(square)?,
                Command::Select { square } => self.handle_select(square)?,
                Command::Move { mv } => self.handle_move(mv)?,
                Command::Undo => self.handle_undo()?,
                Command::Reset => self.handle_reset()?,
                Command::Status => self.handle_status()?,
                Command::Quit => break,
                Command::Unknown(command) => {
                    writeln!(self.output, "info string Unsupported command: {command}")?;
                },
            }
        }
        Ok(())
    }

    /// Prints the board diagram, the position and the status.
    fn handle_show(&mut self) -> anyhow::Result<()> {
        writeln!(self.output, "{:?}", self.game.board())?;
        writeln!(self.output, "position {}", self.game)?;
        self.handle_status()
    }

    fn handle_moves(&mut self, square: Square) -> anyhow::Result<()> {
        if self.game.board().at(square).is_none() {
            writeln!(self.output, "info string no piece on {square}")?;
            return Ok(());
        }
        let moves = self.game.legal_moves(square);
        writeln!(self.output, "moves {square}: {}", destinations(moves))?;
        Ok(())
    }

    fn handle_select(&mut self, square: Square) -> anyhow::Result<()> {
        match self.game.select(square) {
            Selection::Selected { square, moves } => {
                writeln!(self.output, "selected {square}: {}", destinations(moves))?;
            },
            Selection::Moved { mv, outcome } => {
                self.report_move("move", mv, outcome)?;
                self.play_computer()?;
            },
            Selection::Cleared => writeln!(self.output, "selection cleared")?,
        }
        Ok(())
    }

    fn handle_move(&mut self, mv: Move) -> anyhow::Result<()> {
        match self.game.try_apply(mv) {
            Ok(outcome) => {
                self.report_move("move", mv, outcome)?;
                self.play_computer()
            },
            Err(e) => {
                writeln!(self.output, "info string {e}")?;
                Ok(())
            },
        }
    }

    fn handle_undo(&mut self) -> anyhow::Result<()> {
        match self.game.undo() {
            Ok(record) => writeln!(self.output, "undo {}{}", record.from, record.to)?,
            Err(e) => writeln!(self.output, "info string {e}")?,
        }
        Ok(())
    }

    fn handle_reset(&mut self) -> anyhow::Result<()> {
        self.game.reset();
        writeln!(self.output, "new game")?;
        self.play_computer()
    }

    fn handle_status(&mut self) -> anyhow::Result<()> {
        writeln!(self.output, "status {}", self.game.status())?;
        Ok(())
    }

    /// Reports the move and, when it changed anything beyond the turn, the
    /// resulting status.
    fn report_move(&mut self, prefix: &str, mv: Move, outcome: Outcome) -> anyhow::Result<()> {
        writeln!(self.output, "{prefix} {mv}")?;
        if outcome != Outcome::Normal {
            self.handle_status()?;
        }
        Ok(())
    }

    /// Makes a move for the computer opponent if it is its turn.
    fn play_computer(&mut self) -> anyhow::Result<()> {
        let Some(computer) = self.computer.as_mut() else {
            return Ok(());
        };
        if computer.player != self.game.side_to_move() {
            return Ok(());
        }
        let Some(mv) = computer
            .strategy
            .select_move(computer.player, self.game.board())
        else {
            writeln!(self.output, "info string computer has no legal moves")?;
            return Ok(());
        };
        match self.game.try_apply(mv) {
            Ok(outcome) => self.report_move("computer", mv, outcome),
            Err(e) => {
                writeln!(self.output, "info string computer move rejected: {e}")?;
                Ok(())
            },
        }
    }
}

fn destinations(moves: Bitboard) -> String {
    if moves.is_empty() {
        return "none".to_string();
    }
    moves.iter().map(|square| square.to_string()).sorted().join(" ")
}
