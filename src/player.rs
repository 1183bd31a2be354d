//! Player strategies behind a single `get_move` capability.
//!
//! - [`HumanPlayer`] - reads cell numbers from any `BufRead`
//! - [`RandomPlayer`] - uniform choice among free cells
//! - [`SmartPlayer`] - random opening, then exhaustive minimax

use std::io::{BufRead, Write};

use crate::board::{Board, Mark, Move};
use crate::error::{Error, Result};
use crate::search::choose_move;

/// Something that can choose a move for one side.
///
/// The board is lent mutably so search-based players can simulate moves in
/// place. Implementations must leave it as they found it.
pub trait Player {
    fn mark(&self) -> Mark;

    fn get_move(&mut self, board: &mut Board) -> Result<Move>;
}

impl<P: Player + ?Sized> Player for Box<P> {
    fn mark(&self) -> Mark {
        (**self).mark()
    }

    fn get_move(&mut self, board: &mut Board) -> Result<Move> {
        (**self).get_move(board)
    }
}

/// Prompts on `output` and reads moves from `input` until a free cell is given.
pub struct HumanPlayer<R, W> {
    mark: Mark,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> HumanPlayer<R, W> {
    pub fn new(mark: Mark, input: R, output: W) -> Self {
        Self {
            mark,
            input,
            output,
        }
    }
}

impl<R: BufRead, W: Write> Player for HumanPlayer<R, W> {
    fn mark(&self) -> Mark {
        self.mark
    }

    fn get_move(&mut self, board: &mut Board) -> Result<Move> {
        let available = board.available_moves();
        loop {
            write!(self.output, "{}'s turn. Input move (0-8): ", self.mark)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(Error::InputClosed(self.mark));
            }

            match line.trim().parse::<Move>() {
                Ok(cell) if available.contains(&cell) => return Ok(cell),
                _ => writeln!(self.output, "Invalid square. Try again.")?,
            }
        }
    }
}

pub struct RandomPlayer {
    mark: Mark,
    rng: fastrand::Rng,
}

impl RandomPlayer {
    pub fn new(mark: Mark, rng: fastrand::Rng) -> Self {
        Self { mark, rng }
    }
}

impl Player for RandomPlayer {
    fn mark(&self) -> Mark {
        self.mark
    }

    fn get_move(&mut self, board: &mut Board) -> Result<Move> {
        self.rng
            .choice(board.available_moves())
            .ok_or(Error::GameOver)
    }
}

/// The unbeatable player. Owns the randomness used for its opening move.
pub struct SmartPlayer {
    mark: Mark,
    rng: fastrand::Rng,
}

impl SmartPlayer {
    pub fn new(mark: Mark, rng: fastrand::Rng) -> Self {
        Self { mark, rng }
    }
}

impl Player for SmartPlayer {
    fn mark(&self) -> Mark {
        self.mark
    }

    fn get_move(&mut self, board: &mut Board) -> Result<Move> {
        choose_move(board, self.mark, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_human_retries_until_valid() {
        let mut board: Board = "X........".parse().unwrap();
        let input = Cursor::new("abc\n0\n12\n 4 \n");
        let mut output: Vec<u8> = Vec::new();
        let cell = HumanPlayer::new(Mark::O, input, &mut output)
            .get_move(&mut board)
            .unwrap();
        assert_eq!(cell, 4);

        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("Invalid square. Try again.").count(), 3);
        assert!(text.starts_with("O's turn. Input move (0-8): "));
    }

    #[test]
    fn test_human_eof() {
        let mut board = Board::new();
        let mut player = HumanPlayer::new(Mark::X, Cursor::new(""), Vec::<u8>::new());
        assert!(matches!(player.get_move(&mut board), Err(Error::InputClosed(Mark::X))));
    }

    #[test]
    fn test_random_player_picks_free_cell() {
        let mut board: Board = "XOXOX.O..".parse().unwrap();
        let mut player = RandomPlayer::new(Mark::X, fastrand::Rng::with_seed(3));
        for _ in 0..20 {
            let cell = player.get_move(&mut board).unwrap();
            assert!([5, 7, 8].contains(&cell));
        }
    }

    #[test]
    fn test_smart_player_blocks() {
        let mut board: Board = "OO..X....".parse().unwrap();
        let mut player: Box<dyn Player> = Box::new(SmartPlayer::new(Mark::X, fastrand::Rng::with_seed(0)));
        assert_eq!(player.mark(), Mark::X);
        assert_eq!(player.get_move(&mut board).unwrap(), 2);
    }
}
