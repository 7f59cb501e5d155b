//! Autoplay driver: generates boards and lets the solver play them.
//!
//! Turn sequencing lives here, outside the engine: take a proven-safe move
//! if one exists, otherwise guess; relay the board's neighbor count into the
//! solver; flag every mine the solver has proven; stop on a win, on probing
//! a mine, or when no probe is left.

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sweeper_agent::board::Board;
use sweeper_agent::rng::GameRng;
use sweeper_agent::solver::Solver;
use sweeper_agent::types::{Cell, Dims};

#[derive(Debug, Parser)]
#[command(about = "Plays minesweeper by logical deduction, guessing only when it must")]
struct Args {
    /// Board height in cells.
    #[arg(long, default_value_t = 8)]
    height: usize,

    /// Board width in cells.
    #[arg(long, default_value_t = 8)]
    width: usize,

    /// Number of mines to place.
    #[arg(long, default_value_t = 8)]
    mines: usize,

    /// RNG seed; omit for a fresh layout every run.
    #[arg(long)]
    seed: Option<u64>,

    /// How many games to play.
    #[arg(long, default_value_t = 1)]
    games: usize,

    /// Emit one JSON summary per game instead of text.
    #[arg(long)]
    json: bool,

    /// Print the final view of each game's board.
    #[arg(long)]
    show_boards: bool,
}

#[derive(Debug, Serialize)]
struct GameSummary {
    won: bool,
    moves: usize,
    guesses: usize,
    /// The mine the agent probed, when the game was lost.
    hit: Option<Cell>,
}

/// Play one game to completion.
fn play_game(board: &mut Board, rng: &mut GameRng) -> Result<GameSummary> {
    let mut solver = Solver::new(board.dims());
    let mut moves = 0usize;
    let mut guesses = 0usize;

    loop {
        let cell = match solver.choose_safe_move() {
            Some(cell) => cell,
            None => match solver.choose_random_move(rng) {
                Some(cell) => {
                    guesses += 1;
                    cell
                }
                None => break,
            },
        };
        moves += 1;

        if board.is_mine(cell) {
            return Ok(GameSummary {
                won: false,
                moves,
                guesses,
                hit: Some(cell),
            });
        }

        solver.add_knowledge(cell, board.neighbor_mine_count(cell))?;

        for &mine in solver.known_mines() {
            board.flag(mine);
        }
        if board.has_won() {
            return Ok(GameSummary {
                won: true,
                moves,
                guesses,
                hit: None,
            });
        }
    }

    // No probe left: the board is exhausted, won iff every mine was flagged.
    Ok(GameSummary {
        won: board.has_won(),
        moves,
        guesses,
        hit: None,
    })
}

/// End-of-game view: neighbor counts, flagged mines as `F`, missed mines as `X`.
fn render_view(board: &Board) -> String {
    let dims = board.dims();
    let rule = "-".repeat(dims.width * 2 + 1);
    let mut out = String::new();
    for row in 0..dims.height {
        out.push_str(&rule);
        out.push('\n');
        for col in 0..dims.width {
            let cell = Cell::new(row, col);
            out.push('|');
            if board.flagged().contains(&cell) {
                out.push('F');
            } else if board.is_mine(cell) {
                out.push('X');
            } else {
                out.push(char::from_digit(board.neighbor_mine_count(cell) as u32, 10).unwrap_or('?'));
            }
        }
        out.push_str("|\n");
    }
    out.push_str(&rule);
    out
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    anyhow::ensure!(
        args.height > 0 && args.width > 0,
        "board dimensions must be non-zero"
    );
    let dims = Dims::new(args.height, args.width);
    anyhow::ensure!(
        args.mines <= dims.cell_count(),
        "cannot place {} mines on a {dims} board",
        args.mines
    );
    let mut rng = match args.seed {
        Some(seed) => GameRng::from_seed(seed),
        None => GameRng::from_entropy(),
    };

    let mut won = 0usize;
    for game in 0..args.games {
        let mut board = Board::generate(dims, args.mines, &mut rng);
        let summary = play_game(&mut board, &mut rng)?;
        if summary.won {
            won += 1;
        }
        info!(
            game,
            won = summary.won,
            moves = summary.moves,
            guesses = summary.guesses,
            "game finished"
        );

        if args.json {
            println!("{}", serde_json::to_string(&summary)?);
        } else {
            match summary.hit {
                Some(cell) => println!(
                    "game {game}: lost after {} moves, hit a mine at {cell}",
                    summary.moves
                ),
                None if summary.won => println!(
                    "game {game}: won in {} moves ({} guessed)",
                    summary.moves, summary.guesses
                ),
                None => println!("game {game}: stalled after {} moves", summary.moves),
            }
        }
        if args.show_boards {
            println!("{}", render_view(&board));
        }
    }

    if !args.json {
        println!("won {won} of {} games", args.games);
    }
    Ok(())
}
