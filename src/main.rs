//! tictac: an unbeatable tic-tac-toe player.
//!
//! ## Usage
//!
//! - `tictac` - Play against the engine (same as `tictac play`)
//! - `tictac play --human o` - Let the engine open
//! - `tictac match --games 100 --x random` - Run automated games
//! - `tictac protocol` - Speak the text protocol on stdin/stdout
//!
//! Set `RUST_LOG=debug` to see search summaries on stderr.

use std::io::{self, Write};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tictac_minimax::board::{Board, Mark};
use tictac_minimax::constants::DEFAULT_MATCH_GAMES;
use tictac_minimax::game::{Outcome, play_game};
use tictac_minimax::player::{HumanPlayer, Player, RandomPlayer, SmartPlayer};
use tictac_minimax::protocol::TextEngine;

/// tictac: an unbeatable tic-tac-toe player
#[derive(Parser)]
#[command(name = "tictac")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Seed for the opening move and random players
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the computer in the terminal
    Play {
        /// The mark you play (X always moves first)
        #[arg(long, value_enum, default_value_t = Side::X)]
        human: Side,
        /// How the computer chooses its moves
        #[arg(long, value_enum, default_value_t = Strategy::Smart)]
        opponent: Strategy,
    },
    /// Play automated games and tally the results
    Match {
        #[arg(long, default_value_t = DEFAULT_MATCH_GAMES)]
        games: usize,
        #[arg(long, value_enum, default_value_t = Strategy::Smart)]
        x: Strategy,
        #[arg(long, value_enum, default_value_t = Strategy::Smart)]
        o: Strategy,
    },
    /// Speak the text protocol on stdin/stdout
    Protocol,
}

#[derive(Copy, Clone, ValueEnum)]
enum Side {
    X,
    O,
}

impl From<Side> for Mark {
    fn from(side: Side) -> Mark {
        match side {
            Side::X => Mark::X,
            Side::O => Mark::O,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Strategy {
    Smart,
    Random,
}

fn computer(strategy: Strategy, mark: Mark, rng: fastrand::Rng) -> Box<dyn Player> {
    match strategy {
        Strategy::Smart => Box::new(SmartPlayer::new(mark, rng)),
        Strategy::Random => Box::new(RandomPlayer::new(mark, rng)),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut rng = match cli.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };

    match cli.command {
        Some(Commands::Protocol) => {
            let mut engine = TextEngine::new(rng.fork());
            engine
                .run(io::stdin().lock(), io::stdout())
                .context("text protocol session failed")?;
        }
        Some(Commands::Match { games, x, o }) => run_match(games, x, o, &mut rng)?,
        Some(Commands::Play { human, opponent }) => run_play(human.into(), opponent, &mut rng)?,
        None => run_play(Mark::X, Strategy::Smart, &mut rng)?,
    }
    Ok(())
}

fn run_play(human: Mark, opponent: Strategy, rng: &mut fastrand::Rng) -> anyhow::Result<()> {
    let mut you: Box<dyn Player> = Box::new(HumanPlayer::new(human, io::stdin().lock(), io::stdout()));
    let mut them = computer(opponent, human.opponent(), rng.fork());
    let (x, o) = match human {
        Mark::X => (&mut you, &mut them),
        Mark::O => (&mut them, &mut you),
    };

    let mut board = Board::new();
    let mut stdout = io::stdout();
    play_game(&mut board, &mut **x, &mut **o, Some(&mut stdout as &mut dyn Write))?;
    Ok(())
}

fn run_match(games: usize, x: Strategy, o: Strategy, rng: &mut fastrand::Rng) -> anyhow::Result<()> {
    let (mut x_wins, mut o_wins, mut ties) = (0usize, 0usize, 0usize);

    for game in 0..games {
        let mut board = Board::new();
        let mut x_player = computer(x, Mark::X, rng.fork());
        let mut o_player = computer(o, Mark::O, rng.fork());
        let outcome = play_game(&mut board, &mut *x_player, &mut *o_player, None)
            .with_context(|| format!("game {game} failed"))?;
        info!(game, ?outcome, "match game finished");

        match outcome {
            Outcome::Winner(Mark::X) => x_wins += 1,
            Outcome::Winner(Mark::O) => o_wins += 1,
            Outcome::Tie => ties += 1,
        }
    }

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "X ({x:?}) wins: {x_wins}")?;
    writeln!(stdout, "O ({o:?}) wins: {o_wins}")?;
    writeln!(stdout, "Ties: {ties}")?;
    Ok(())
}
