//! Constants for board geometry, protocol identity, and defaults.
//!
//! The grid is fixed at 3x3. Cells are numbered row-major:
//!
//! ```text
//! | 0 | 1 | 2 |
//! | 3 | 4 | 5 |
//! | 6 | 7 | 8 |
//! ```

// =============================================================================
// Board Geometry
// =============================================================================

/// Side length of the grid.
pub const N: usize = 3;

/// Number of cells on the board.
pub const CELLS: usize = N * N;

/// Every line of three that wins the game: rows, columns, then diagonals.
pub const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

// =============================================================================
// Search Scoring
// =============================================================================

/// Starting score for the maximizing side. Any terminal score beats it.
pub const SCORE_NEG_INF: i32 = i32::MIN;

/// Starting score for the minimizing side.
pub const SCORE_POS_INF: i32 = i32::MAX;

// =============================================================================
// Protocol and CLI Defaults
// =============================================================================

/// Engine name reported by the text protocol.
pub const ENGINE_NAME: &str = "tictac-minimax";

/// Text protocol version.
pub const PROTOCOL_VERSION: u32 = 1;

/// Default number of games for `tictac match`.
pub const DEFAULT_MATCH_GAMES: usize = 10;
