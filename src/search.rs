//! Exhaustive minimax search and the move selector built on it.
//!
//! The search walks the whole remaining game tree depth-first on a single
//! mutable [`Board`]. Each candidate move is applied through a
//! [`Simulation`] guard that undoes it when dropped, so the board comes
//! back unchanged however a frame exits.
//!
//! Terminal scores are `±(empty + 1)`, where `empty` is the number of free
//! cells when the win is detected. Quicker wins therefore score higher and
//! slower losses score closer to zero. Draws score 0.
//!
//! There is no pruning and no caching: the full tree from an empty board
//! is 549,946 nodes.

use std::ops::{Deref, DerefMut};

use tracing::{debug, trace};

use crate::board::{Board, Mark, Move};
use crate::constants::{CELLS, SCORE_NEG_INF, SCORE_POS_INF};
use crate::error::{Error, Result};

/// Outcome of searching one position.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move for the side to act. `None` only for terminal positions.
    pub position: Option<Move>,
    /// Score from the engine's point of view.
    pub score: i32,
}

impl SearchResult {
    fn terminal(score: i32) -> Self {
        Self {
            position: None,
            score,
        }
    }
}

/// Score of a win detected with `empty` free cells left.
#[inline]
pub fn win_score(empty: usize) -> i32 {
    empty as i32 + 1
}

/// A move applied to the board for the lifetime of the guard.
struct Simulation<'a> {
    board: &'a mut Board,
    cell: Move,
}

impl<'a> Simulation<'a> {
    fn apply(board: &'a mut Board, cell: Move, mark: Mark) -> Self {
        assert!(
            cell < CELLS && board.get(cell).is_none(),
            "simulated move on unavailable cell {cell}"
        );
        board.place(cell, mark);
        Self { board, cell }
    }
}

impl Deref for Simulation<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Simulation<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Simulation<'_> {
    fn drop(&mut self) {
        self.board.undo(self.cell);
    }
}

/// Minimax searcher playing as `me`, the maximizing side.
pub struct Minimax {
    me: Mark,
    /// Positions visited by the last call to [`Minimax::search`]
    nodes: u64,
}

impl Minimax {
    pub fn new(me: Mark) -> Self {
        Self { me, nodes: 0 }
    }

    pub fn me(&self) -> Mark {
        self.me
    }

    /// Number of positions visited by the most recent search, root included.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Find the best move for `acting` on `board`.
    ///
    /// The board is borrowed mutably for the whole search and is identical
    /// to its prior state when this returns.
    ///
    /// # Panics
    /// If `acting` has already won on `board`. Turns must alternate, so the
    /// side to move can never be the one that just completed a line.
    pub fn search(&mut self, board: &mut Board, acting: Mark) -> SearchResult {
        #[cfg(debug_assertions)]
        let before = board.clone();

        self.nodes = 0;
        let result = self.minimax(board, acting, 0);

        #[cfg(debug_assertions)]
        debug_assert_eq!(*board, before, "search leaked a simulated move");

        debug!(
            me = %self.me,
            %acting,
            position = ?result.position,
            score = result.score,
            nodes = self.nodes,
            "search finished"
        );
        result
    }

    fn minimax(&mut self, board: &mut Board, acting: Mark, depth: usize) -> SearchResult {
        self.nodes += 1;
        let other = acting.opponent();

        match board.current_winner() {
            Some(winner) if winner == other => {
                let score = win_score(board.num_empty_squares());
                return SearchResult::terminal(if winner == self.me { score } else { -score });
            }
            Some(winner) => panic!("search for {acting} on a board {winner} has already won"),
            None => {}
        }
        if !board.empty_squares() {
            return SearchResult::terminal(0);
        }

        let maximizing = acting == self.me;
        let mut best = SearchResult::terminal(if maximizing { SCORE_NEG_INF } else { SCORE_POS_INF });

        for cell in board.available_moves() {
            let mut candidate = {
                let mut sim = Simulation::apply(board, cell, acting);
                self.minimax(&mut sim, other, depth + 1)
            };
            candidate.position = Some(cell);

            if depth == 0 {
                trace!(%acting, cell, score = candidate.score, "root candidate");
            }

            let better = if maximizing {
                candidate.score > best.score
            } else {
                candidate.score < best.score
            };
            if better {
                best = candidate;
            }
        }

        best
    }
}

/// Pick a move for `me`.
///
/// On an empty board the opening cell is drawn uniformly from `rng`, since
/// the search would always pick the same one. Any other position is
/// searched exhaustively.
///
/// # Errors
/// [`Error::GameOver`] if the board already has a winner or no free cells.
pub fn choose_move(board: &mut Board, me: Mark, rng: &mut fastrand::Rng) -> Result<Move> {
    if board.is_over() {
        return Err(Error::GameOver);
    }

    if board.is_empty() {
        let cell = rng.choice(board.available_moves()).ok_or(Error::GameOver)?;
        debug!(%me, cell, "random opening");
        return Ok(cell);
    }

    let result = Minimax::new(me).search(board, me);
    result.position.ok_or(Error::GameOver)
}
