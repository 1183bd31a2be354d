//! Error type shared by the board, players, and protocol layers.

use thiserror::Error;

use crate::board::Mark;

/// Recoverable failures. Broken search invariants panic instead.
#[derive(Error, Debug)]
pub enum Error {
    #[error("illegal move: cell {0} is outside the board")]
    OutOfRange(usize),

    #[error("illegal move: cell {0} is already taken")]
    Occupied(usize),

    #[error("game over: no move to choose")]
    GameOver,

    #[error("invalid mark '{0}' (expected 'x' or 'o')")]
    InvalidMark(String),

    #[error("invalid board '{board}': {reason}")]
    InvalidBoard { board: String, reason: String },

    #[error("input closed before {0} chose a move")]
    InputClosed(Mark),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
