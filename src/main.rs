use clap::Parser;
use std::fs::File;
use std::path::PathBuf;
use std::process;

use pgntolong::{ConvertError, Transcriber, DEFAULT_MAX_GAMES};

/// Convert PGN games to long algebraic move listings with FEN snapshots.
///
/// Each move is written as a hyphenated coordinate token (castling as two
/// comma-joined segments, promotions with an `=<PIECE>` suffix) followed by
/// the FEN after the move; each game ends with a `---` line.
#[derive(Parser)]
#[command(name = "pgntolong")]
#[command(about = "Convert PGN games to long algebraic listings with FEN snapshots")]
#[command(version = "0.1.0")]
struct Args {
    /// Path to the input PGN file
    #[arg(value_name = "PGN")]
    pgn: PathBuf,

    /// Path to the output text file (created or fully overwritten)
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Maximum number of games to convert
    #[arg(long, default_value_t = DEFAULT_MAX_GAMES)]
    max_games: usize,
}

fn main() {
    let args = Args::parse();

    // Rejected before any file is opened; clap already refuses negatives.
    if args.max_games == 0 {
        eprintln!("Error: {}", ConvertError::InvalidMaxGames);
        process::exit(2);
    }

    let input = match File::open(&args.pgn) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Error opening PGN file '{}': {}", args.pgn.display(), e);
            process::exit(1);
        }
    };

    println!(
        "Converting games from '{}' to long algebraic format...",
        args.pgn.display()
    );

    let transcriber = Transcriber::new().with_max_games(args.max_games);

    match transcriber.transcribe(input, &args.output) {
        Ok(games_written) => {
            println!(
                "Successfully converted {} games to '{}'",
                games_written,
                args.output.display()
            );
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
