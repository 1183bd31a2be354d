//! The 3x3 board: cell storage, legality, win detection, and undo.
//!
//! `make_move` records the winner as soon as a move completes a line, so
//! callers never rescan the grid. `undo` is the inverse used by the search
//! when it backtracks.

use std::fmt;
use std::str::FromStr;

use crate::constants::{CELLS, N, WIN_LINES};
use crate::error::{Error, Result};

/// A cell index in `[0, 9)`.
pub type Move = usize;

/// One of the two player symbols.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    fn symbol(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Mark {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "x" => Ok(Mark::X),
            "o" => Ok(Mark::O),
            _ => Err(Error::InvalidMark(s.to_string())),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Mark>; CELLS],
    current_winner: Option<Mark>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contents of `cell`, or `None` when empty or off the board.
    pub fn get(&self, cell: Move) -> Option<Mark> {
        self.cells.get(cell).copied().flatten()
    }

    /// Empty cells in ascending order.
    pub fn available_moves(&self) -> Vec<Move> {
        (0..CELLS).filter(|&c| self.cells[c].is_none()).collect()
    }

    pub fn empty_squares(&self) -> bool {
        self.cells.iter().any(Option::is_none)
    }

    pub fn num_empty_squares(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.num_empty_squares() == CELLS
    }

    /// The mark that completed a line, if any.
    pub fn current_winner(&self) -> Option<Mark> {
        self.current_winner
    }

    /// True once someone has won or the grid is full.
    pub fn is_over(&self) -> bool {
        self.current_winner.is_some() || !self.empty_squares()
    }

    /// Place `mark` on `cell`, recording a win if the move completes a line.
    ///
    /// # Errors
    /// - [`Error::OutOfRange`] if `cell >= 9`
    /// - [`Error::Occupied`] if the cell already holds a mark
    pub fn make_move(&mut self, cell: Move, mark: Mark) -> Result<()> {
        if cell >= CELLS {
            return Err(Error::OutOfRange(cell));
        }
        if self.cells[cell].is_some() {
            return Err(Error::Occupied(cell));
        }
        self.place(cell, mark);
        Ok(())
    }

    /// Unchecked placement. The cell must be empty.
    pub(crate) fn place(&mut self, cell: Move, mark: Mark) {
        debug_assert!(self.cells[cell].is_none(), "cell {cell} overwritten");
        self.cells[cell] = Some(mark);
        if self.completes_line(cell, mark) {
            self.current_winner = Some(mark);
        }
    }

    /// Clear `cell` and forget any recorded winner.
    pub fn undo(&mut self, cell: Move) {
        self.cells[cell] = None;
        self.current_winner = None;
    }

    /// Whether `mark` on `cell` fills one of the lines through that cell.
    fn completes_line(&self, cell: Move, mark: Mark) -> bool {
        WIN_LINES
            .iter()
            .filter(|line| line.contains(&cell))
            .any(|line| line.iter().all(|&c| self.cells[c] == Some(mark)))
    }

    fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|&&c| c == Some(mark)).count()
    }

    /// Cell indices laid out like the board, for prompting humans.
    pub fn number_grid() -> String {
        let mut s = String::new();
        for row in 0..N {
            let cells: Vec<String> = (0..N).map(|col| (row * N + col).to_string()).collect();
            s.push_str(&format!("| {} |\n", cells.join(" | ")));
        }
        s
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..N {
            write!(f, "|")?;
            for col in 0..N {
                let ch = self.cells[row * N + col].map_or(' ', Mark::symbol);
                write!(f, " {ch} |")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Parses nine cells row-major. `X`/`O` (any case) are marks; `.`, `-`, `_`
/// and `' '` are empty. Whitespace other than spaces is ignored, so
/// `"XO.\n.X.\n..O"` works.
impl FromStr for Board {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidBoard {
            board: s.to_string(),
            reason,
        };

        let cells: Vec<char> = s.chars().filter(|c| !matches!(c, '\n' | '\r' | '\t')).collect();
        if cells.len() != CELLS {
            return Err(invalid(format!("expected {CELLS} cells, got {}", cells.len())));
        }

        let mut board = Board::new();
        for (i, ch) in cells.into_iter().enumerate() {
            board.cells[i] = match ch {
                'x' | 'X' => Some(Mark::X),
                'o' | 'O' => Some(Mark::O),
                '.' | '-' | '_' | ' ' => None,
                other => return Err(invalid(format!("unexpected '{other}' at cell {i}"))),
            };
        }

        let (xs, os) = (board.count(Mark::X), board.count(Mark::O));
        if xs.abs_diff(os) > 1 {
            return Err(invalid(format!("mark counts X={xs} O={os} differ by more than one")));
        }

        let winners: Vec<Mark> = [Mark::X, Mark::O]
            .into_iter()
            .filter(|&m| WIN_LINES.iter().any(|l| l.iter().all(|&c| board.cells[c] == Some(m))))
            .collect();
        match winners.as_slice() {
            [] => {}
            [winner] => board.current_winner = Some(*winner),
            _ => return Err(invalid("both marks have a completed line".to_string())),
        }

        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert!(board.is_empty());
        assert_eq!(board.num_empty_squares(), 9);
        assert_eq!(board.available_moves(), (0..9).collect::<Vec<_>>());
        assert_eq!(board.current_winner(), None);
    }

    #[test]
    fn test_make_move_rejects_occupied_and_out_of_range() {
        let mut board = Board::new();
        board.make_move(4, Mark::X).unwrap();
        assert!(matches!(board.make_move(4, Mark::O), Err(Error::Occupied(4))));
        assert!(matches!(board.make_move(9, Mark::O), Err(Error::OutOfRange(9))));
        assert_eq!(board.get(4), Some(Mark::X));
        assert_eq!(board.get(9), None);
    }

    #[test]
    fn test_make_move_records_winner() {
        let mut board = Board::new();
        for cell in [2, 4] {
            board.make_move(cell, Mark::O).unwrap();
            assert_eq!(board.current_winner(), None);
        }
        board.make_move(6, Mark::O).unwrap();
        assert_eq!(board.current_winner(), Some(Mark::O));
        assert!(board.is_over());
    }

    #[test]
    fn test_undo_restores_board() {
        let mut board: Board = "XX.OO....".parse().unwrap();
        let before = board.clone();
        board.make_move(2, Mark::X).unwrap();
        assert_eq!(board.current_winner(), Some(Mark::X));
        board.undo(2);
        assert_eq!(board, before);
    }

    #[test]
    fn test_parse_detects_winner() {
        let board: Board = "XXXOO....".parse().unwrap();
        assert_eq!(board.current_winner(), Some(Mark::X));
        assert_eq!(board.num_empty_squares(), 4);
    }

    #[test]
    fn test_parse_rejects_bad_boards() {
        assert!("XX".parse::<Board>().is_err());
        assert!("XXXX.....".parse::<Board>().is_err());
        assert!("XXXOOO...".parse::<Board>().is_err());
        assert!("XO?......".parse::<Board>().is_err());
    }

    #[test]
    fn test_parse_multiline() {
        let board: Board = "XO.\n.X.\n..O".parse().unwrap();
        assert_eq!(board.get(0), Some(Mark::X));
        assert_eq!(board.get(8), Some(Mark::O));
        assert_eq!(board.num_empty_squares(), 5);
    }

    #[test]
    fn test_display() {
        let board: Board = "X...O...X".parse().unwrap();
        assert_eq!(board.to_string(), "| X |   |   |\n|   | O |   |\n|   |   | X |\n");
        assert_eq!(Board::number_grid(), "| 0 | 1 | 2 |\n| 3 | 4 | 5 |\n| 6 | 7 | 8 |\n");
    }

    #[test]
    fn test_mark_parse_and_opponent() {
        assert_eq!("x".parse::<Mark>().unwrap(), Mark::X);
        assert_eq!("O".parse::<Mark>().unwrap(), Mark::O);
        assert!("z".parse::<Mark>().is_err());
        assert_eq!(Mark::X.opponent(), Mark::O);
        assert_eq!(Mark::O.opponent(), Mark::X);
    }
}
