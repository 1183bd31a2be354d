//! Hosting a full game between two players.

use std::io::Write;

use tracing::info;

use crate::board::{Board, Mark};
use crate::error::Result;
use crate::player::Player;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Winner(Mark),
    Tie,
}

/// Play `board` to the end, X first, alternating turns.
///
/// Every move goes through [`Board::make_move`], so a player returning an
/// occupied cell aborts the game with an error. When `out` is given the
/// board is printed after each move, in the style of a console game.
pub fn play_game(
    board: &mut Board,
    x_player: &mut dyn Player,
    o_player: &mut dyn Player,
    mut out: Option<&mut dyn Write>,
) -> Result<Outcome> {
    debug_assert_eq!(x_player.mark(), Mark::X);
    debug_assert_eq!(o_player.mark(), Mark::O);

    if let Some(out) = out.as_deref_mut() {
        write!(out, "{}", Board::number_grid())?;
    }

    let mut turn = Mark::X;
    while board.empty_squares() {
        let player: &mut dyn Player = match turn {
            Mark::X => &mut *x_player,
            Mark::O => &mut *o_player,
        };
        let cell = player.get_move(board)?;
        board.make_move(cell, turn)?;
        info!(mark = %turn, cell, "move played");

        if let Some(out) = out.as_deref_mut() {
            writeln!(out, "{turn} makes a move to square {cell}")?;
            writeln!(out, "{board}")?;
        }

        if let Some(winner) = board.current_winner() {
            if let Some(out) = out.as_deref_mut() {
                writeln!(out, "{winner} wins!")?;
            }
            info!(%winner, "game over");
            return Ok(Outcome::Winner(winner));
        }
        turn = turn.opponent();
    }

    if let Some(out) = out.as_deref_mut() {
        writeln!(out, "It's a tie!")?;
    }
    info!("game tied");
    Ok(Outcome::Tie)
}
