//! Line-based text protocol, modelled on the Go Text Protocol.
//!
//! Each request is one line, optionally prefixed with a numeric id. Each
//! response starts with `=` on success or `?` on failure, followed by the
//! id (if any) and the payload, and ends with a blank line.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`
//! - `list_commands`, `known_command <cmd>`
//! - `quit` - end the session
//! - `clear_board` - reset to an empty board
//! - `play <mark> <cell>` - place a mark (`x` or `o`) on cell 0-8
//! - `genmove <mark>` - let the engine choose and play a move for `mark`
//! - `showboard` - print the board
//! - `undo` - take back the last move
//!
//! Turn order is not enforced; the controller decides who moves.
//!
//! ```ignore
//! use tictac_minimax::protocol::TextEngine;
//! let mut engine = TextEngine::new(fastrand::Rng::new());
//! engine.run(std::io::stdin().lock(), std::io::stdout())?;
//! ```

use std::io::{BufRead, Write};

use tracing::{debug, warn};

use crate::board::{Board, Mark, Move};
use crate::constants::{ENGINE_NAME, PROTOCOL_VERSION};
use crate::error::Result;
use crate::search::choose_move;

const KNOWN_COMMANDS: &[&str] = &[
    "clear_board",
    "genmove",
    "known_command",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "showboard",
    "undo",
    "version",
];

/// Protocol session state.
pub struct TextEngine {
    board: Board,
    /// Cells played so far, for `undo`
    history: Vec<Move>,
    rng: fastrand::Rng,
}

impl TextEngine {
    pub fn new(rng: fastrand::Rng) -> Self {
        Self {
            board: Board::new(),
            history: Vec::new(),
            rng,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Serve requests from `input` until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        for line in input.lines() {
            let line = line?;

            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            let (success, message) = self.execute(&command, args);
            if !success {
                warn!(%command, %message, "command failed");
            }

            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            writeln!(output, "{prefix}{id_str} {message}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Split an optional leading numeric id from the command.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let end = line
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(line.len());
        if end == 0 {
            return (None, line);
        }
        match line[..end].parse::<u32>() {
            Ok(id) => (Some(id), line[end..].trim()),
            Err(_) => (None, line),
        }
    }

    /// Execute one command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        debug!(command, ?args, "executing");
        match command {
            "name" => (true, ENGINE_NAME.to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, PROTOCOL_VERSION.to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => match args.first() {
                Some(cmd) => {
                    let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                    (true, known.to_string())
                }
                None => (false, "missing argument".to_string()),
            },

            "quit" => (true, String::new()),

            "clear_board" => {
                self.board = Board::new();
                self.history.clear();
                (true, String::new())
            }

            "play" => {
                let [mark, cell] = args else {
                    return (false, "expected: play <mark> <cell>".to_string());
                };
                let mark = match mark.parse::<Mark>() {
                    Ok(mark) => mark,
                    Err(err) => return (false, err.to_string()),
                };
                let Ok(cell) = cell.parse::<Move>() else {
                    return (false, format!("invalid cell '{cell}'"));
                };
                if self.board.is_over() {
                    return (false, "game over".to_string());
                }
                match self.board.make_move(cell, mark) {
                    Ok(()) => {
                        self.history.push(cell);
                        (true, String::new())
                    }
                    Err(err) => (false, err.to_string()),
                }
            }

            "genmove" => {
                let Some(mark) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let mark = match mark.parse::<Mark>() {
                    Ok(mark) => mark,
                    Err(err) => return (false, err.to_string()),
                };
                let played = choose_move(&mut self.board, mark, &mut self.rng)
                    .and_then(|cell| self.board.make_move(cell, mark).map(|()| cell));
                match played {
                    Ok(cell) => {
                        self.history.push(cell);
                        (true, cell.to_string())
                    }
                    Err(err) => (false, err.to_string()),
                }
            }

            "showboard" => (true, format!("\n{}", self.board.to_string().trim_end())),

            "undo" => match self.history.pop() {
                Some(cell) => {
                    self.board.undo(cell);
                    (true, String::new())
                }
                None => (false, "cannot undo".to_string()),
            },

            _ => (false, format!("unknown command: {command}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> TextEngine {
        TextEngine::new(fastrand::Rng::with_seed(42))
    }

    #[test]
    fn test_parse_id_with_id() {
        assert_eq!(TextEngine::parse_id("123 name"), (Some(123), "name"));
    }

    #[test]
    fn test_parse_id_without_id() {
        assert_eq!(TextEngine::parse_id("name"), (None, "name"));
    }

    #[test]
    fn test_name_and_version() {
        let mut engine = engine();
        assert_eq!(engine.execute("name", &[]), (true, ENGINE_NAME.to_string()));
        assert_eq!(engine.execute("protocol_version", &[]), (true, "1".to_string()));
    }

    #[test]
    fn test_known_command() {
        let mut engine = engine();
        assert_eq!(engine.execute("known_command", &["genmove"]), (true, "true".to_string()));
        assert_eq!(engine.execute("known_command", &["komi"]), (true, "false".to_string()));
        assert!(!engine.execute("known_command", &[]).0);
    }

    #[test]
    fn test_play_validation() {
        let mut engine = engine();
        assert!(engine.execute("play", &["x", "4"]).0);
        assert!(!engine.execute("play", &["o", "4"]).0);
        assert!(!engine.execute("play", &["o", "9"]).0);
        assert!(!engine.execute("play", &["z", "1"]).0);
        assert!(!engine.execute("play", &["o"]).0);
        assert_eq!(engine.board().get(4), Some(Mark::X));
    }

    #[test]
    fn test_genmove_blocks() {
        let mut engine = engine();
        for (mark, cell) in [("o", "0"), ("x", "4"), ("o", "1")] {
            assert!(engine.execute("play", &[mark, cell]).0);
        }
        assert_eq!(engine.execute("genmove", &["x"]), (true, "2".to_string()));
        assert_eq!(engine.board().get(2), Some(Mark::X));
    }

    #[test]
    fn test_genmove_after_win_fails() {
        let mut engine = engine();
        for (mark, cell) in [("x", "0"), ("o", "3"), ("x", "1"), ("o", "4"), ("x", "2")] {
            assert!(engine.execute("play", &[mark, cell]).0);
        }
        let (success, message) = engine.execute("genmove", &["o"]);
        assert!(!success);
        assert!(message.contains("game over"));
        assert!(!engine.execute("play", &["o", "5"]).0);
    }

    #[test]
    fn test_undo_and_clear() {
        let mut engine = engine();
        assert!(!engine.execute("undo", &[]).0);
        engine.execute("play", &["x", "0"]);
        engine.execute("play", &["o", "8"]);
        assert!(engine.execute("undo", &[]).0);
        assert_eq!(engine.board().get(8), None);
        assert!(engine.execute("clear_board", &[]).0);
        assert!(engine.board().is_empty());
    }

    #[test]
    fn test_run_session() {
        let mut engine = engine();
        let input = "1 name\n\n# comment\nplay x 4\nshowboard\nbogus\nquit\nname\n";
        let mut output: Vec<u8> = Vec::new();
        engine.run(input.as_bytes(), &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with(&format!("=1 {ENGINE_NAME}\n\n")));
        assert!(text.contains("|   | X |   |"));
        assert!(text.contains("? unknown command: bogus"));
        // Nothing after quit is answered.
        assert_eq!(text.matches(ENGINE_NAME).count(), 1);
    }
}
