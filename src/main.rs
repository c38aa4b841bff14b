//! `rook`: play chess in the terminal.
//!
//! Moves are typed as coordinates (`e2e4`, `e7e8q`) or SAN (`Nf3`, `O-O`).
//! Other commands: `board`, `go`, `save`, `load`, `pgn`, `q`.

use std::io::{self, BufRead, Lines, StdinLock, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use rook_engine::chess_errors::ChessResult;
use rook_engine::game::chess_game::{ChessGame, MoveOutcome};
use rook_engine::game_state::chess_types::{Color, GameStatus, PieceKind};
use rook_engine::game_state::game_state::GameState;
use rook_engine::utils::long_algebraic::move_to_long_algebraic;
use rook_engine::utils::pgn::{write_pgn, PgnTags};
use rook_engine::utils::render_game_state::render_game_state;
use rook_engine::utils::save_file::{load_from_path, save_to_path};

#[derive(Parser, Debug)]
#[command(name = "rook", author, version, about, long_about = None)]
struct Cli {
    /// Search depth in plies for computer moves.
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..))]
    depth: u8,

    /// Side played by the computer.
    #[arg(short, long, value_enum, default_value_t = ComputerSide::None)]
    computer: ComputerSide,

    #[arg(long, default_value = "rook_save.txt")]
    save_file: PathBuf,

    #[arg(long, default_value = "rook_game.pgn")]
    pgn_file: PathBuf,

    /// Start from a FEN position instead of the initial setup.
    #[arg(long)]
    fen: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ComputerSide {
    None,
    White,
    Black,
}

impl ComputerSide {
    fn plays(self, color: Color) -> bool {
        matches!(
            (self, color),
            (ComputerSide::White, Color::Light) | (ComputerSide::Black, Color::Dark)
        )
    }
}

type InputLines<'a> = Lines<StdinLock<'a>>;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> ChessResult<()> {
    let mut game = match &cli.fen {
        Some(fen) => ChessGame::from_state(GameState::from_fen(fen)?),
        None => ChessGame::new(),
    };
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("{}", render_game_state(game.state()));
    let mut finished = report_status(&mut game);

    loop {
        if !finished && cli.computer.plays(game.side_to_move()) {
            finished = computer_turn(&mut game, cli.depth)?;
            continue;
        }

        print!("{}> ", game.side_to_move().name());
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        match line.trim() {
            "" => {}
            "q" | "quit" => break,
            "board" => println!("{}", render_game_state(game.state())),
            "go" if !finished => finished = computer_turn(&mut game, cli.depth)?,
            "save" => match save_to_path(game.state(), &cli.save_file) {
                Ok(()) => println!("saved to {}", cli.save_file.display()),
                Err(err) => println!("save failed: {err}"),
            },
            "load" => match load_from_path(&cli.save_file) {
                Ok(state) => {
                    game = ChessGame::from_state(state);
                    println!("{}", render_game_state(game.state()));
                    finished = report_status(&mut game);
                }
                Err(err) => {
                    warn!(%err, "load failed");
                    println!("load failed: {err}");
                }
            },
            "pgn" => {
                let tags = pgn_tags(cli, &mut game);
                let text = write_pgn(&game, &tags);
                match std::fs::write(&cli.pgn_file, text) {
                    Ok(()) => println!("PGN written to {}", cli.pgn_file.display()),
                    Err(err) => println!("PGN export failed: {err}"),
                }
            }
            _ if finished => println!("the game is over; use load, pgn or q"),
            text => finished = human_turn(&mut game, text, &mut lines)?,
        }
    }

    Ok(())
}

/// Returns whether the game has ended.
fn human_turn(game: &mut ChessGame, text: &str, lines: &mut InputLines<'_>) -> ChessResult<bool> {
    match game.commit_text(text) {
        Ok(MoveOutcome::Applied) => {}
        Ok(MoveOutcome::PromotionPending) => prompt_promotion(game, lines)?,
        Ok(MoveOutcome::RejectedIllegal) => {
            println!("illegal move");
            return Ok(false);
        }
        Ok(MoveOutcome::RejectedLeavesKingInCheck) => {
            println!("illegal move: your king would be in check");
            return Ok(false);
        }
        Err(err) => {
            println!("{err}");
            return Ok(false);
        }
    }

    println!("{}", render_game_state(game.state()));
    Ok(report_status(game))
}

fn prompt_promotion(game: &mut ChessGame, lines: &mut InputLines<'_>) -> ChessResult<()> {
    loop {
        print!("promote to (q/r/b/n)> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            return game.choose_promotion(PieceKind::Queen).map(|_| ());
        };
        let line = line?;
        let choice = line.trim().chars().next().and_then(PieceKind::from_letter);
        match choice {
            Some(kind) if kind.is_promotion_choice() => {
                return game.choose_promotion(kind).map(|_| ());
            }
            _ => println!("choose one of q, r, b, n"),
        }
    }
}

fn computer_turn(game: &mut ChessGame, depth: u8) -> ChessResult<bool> {
    match game.computer_move(depth)? {
        Some(result) => {
            if let Some(mv) = result.best_move {
                println!(
                    "computer plays {} (score {}, {} nodes)",
                    move_to_long_algebraic(mv),
                    result.best_score,
                    result.nodes
                );
            }
            println!("{}", render_game_state(game.state()));
        }
        None => println!("computer has no legal move"),
    }
    Ok(report_status(game))
}

/// Print check, checkmate or stalemate for the side to move; returns whether the game ended.
fn report_status(game: &mut ChessGame) -> bool {
    let side = game.side_to_move();
    match game.current_status() {
        GameStatus::Normal => false,
        GameStatus::Check => {
            println!("{} is in check", side.name());
            false
        }
        GameStatus::Checkmate => {
            println!("checkmate, {} wins", side.opposite().name());
            true
        }
        GameStatus::Stalemate => {
            println!("stalemate");
            true
        }
    }
}

fn pgn_tags(cli: &Cli, game: &mut ChessGame) -> PgnTags {
    let name = |color: Color| {
        if cli.computer.plays(color) {
            format!("rook depth {}", cli.depth)
        } else {
            "Human".to_owned()
        }
    };
    let side = game.side_to_move();
    let result = match game.current_status() {
        GameStatus::Checkmate if side == Color::Light => "0-1",
        GameStatus::Checkmate => "1-0",
        GameStatus::Stalemate => "1/2-1/2",
        GameStatus::Normal | GameStatus::Check => "*",
    };
    PgnTags {
        white: name(Color::Light),
        black: name(Color::Dark),
        result: result.to_owned(),
        ..PgnTags::default()
    }
}
