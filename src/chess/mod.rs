//! Implementation of the chess rules: board representation, move generation,
//! check detection and the game that applies and takes back moves.

pub mod attacks;
pub mod bitboard;
pub mod board;
pub mod core;
pub mod error;
pub mod game;
pub mod history;
pub mod movegen;
pub mod perft;
