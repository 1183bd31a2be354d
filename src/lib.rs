//! tictac-minimax: an unbeatable tic-tac-toe move selector.
//!
//! The engine searches the complete remaining game tree with plain minimax
//! (no pruning, no caching) and scores terminal positions so that quicker
//! wins and slower losses are preferred.
//!
//! ## Modules
//!
//! - [`board`] - The 3x3 board, legality, win detection, undo
//! - [`search`] - Minimax search and the move selector
//! - [`player`] - Human, random and search-based players
//! - [`game`] - Running a game between two players
//! - [`protocol`] - Line-based text protocol for external controllers
//! - [`constants`] - Board geometry and defaults
//! - [`error`] - Error type
//!
//! ## Example
//!
//! ```
//! use tictac_minimax::board::{Board, Mark};
//! use tictac_minimax::search::Minimax;
//!
//! // O threatens the top row; X must block.
//! let mut board: Board = "OO..X....".parse().unwrap();
//! let result = Minimax::new(Mark::X).search(&mut board, Mark::X);
//! assert_eq!(result.position, Some(2));
//! ```

pub mod board;
pub mod constants;
pub mod error;
pub mod game;
pub mod player;
pub mod protocol;
pub mod search;

pub use error::{Error, Result};
