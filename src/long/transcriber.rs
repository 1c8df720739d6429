use std::fs;
use std::io::Read;
use std::path::Path;

use pgn_reader::{BufferedReader, RawHeader, SanPlus, Skip, Visitor};
use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, EnPassantMode, Position};

use crate::error::ConvertError;
use crate::long::encoder;

/// Games converted per run when no limit is given.
pub const DEFAULT_MAX_GAMES: usize = 250;

/// Converts PGN games to the long algebraic transcript format.
///
/// Each game becomes an interleaved listing of move tokens and the FEN after
/// every move, closed by a `---` line. The whole transcript is buffered in
/// memory and written in a single pass once every game has been processed, so
/// a failure mid-run never leaves a truncated output file behind.
pub struct Transcriber {
    max_games: usize,
}

impl Transcriber {
    pub fn new() -> Self {
        Transcriber {
            max_games: DEFAULT_MAX_GAMES,
        }
    }

    pub fn with_max_games(mut self, max: usize) -> Self {
        self.max_games = max;
        self
    }

    /// Convert up to `max_games` games from `input`, writing the transcript
    /// to `output_path` (fully overwriting it) and returning the number of
    /// games converted.
    ///
    /// Games past the limit are never pulled from the reader. Zero games is
    /// an error and leaves the output file untouched.
    pub fn transcribe<R: Read>(&self, input: R, output_path: &Path) -> Result<usize, ConvertError> {
        if self.max_games == 0 {
            return Err(ConvertError::InvalidMaxGames);
        }

        let mut reader = BufferedReader::new(input);
        let mut visitor = TranscriptVisitor::new();
        let mut games_written = 0;

        while games_written < self.max_games {
            match reader.read_game(&mut visitor)? {
                Some(game_result) => {
                    game_result?;
                    games_written += 1;
                }
                None => break,
            }
        }

        if games_written == 0 {
            return Err(ConvertError::NoGames);
        }

        let mut transcript = visitor.lines.join("\n");
        transcript.push('\n');
        fs::write(output_path, transcript)?;

        Ok(games_written)
    }
}

impl Default for Transcriber {
    fn default() -> Self {
        Self::new()
    }
}

/// Visitor that replays each game's mainline and accumulates the transcript.
///
/// The running position is owned here for the duration of a game; every SAN
/// move is encoded against the position before it is applied. Visitor
/// callbacks cannot return errors, so a failed move resolution is stashed and
/// surfaced from `end_game`.
struct TranscriptVisitor {
    lines: Vec<String>,
    position: Chess,
    error: Option<ConvertError>,
}

impl TranscriptVisitor {
    fn new() -> Self {
        TranscriptVisitor {
            lines: Vec::new(),
            position: Chess::default(),
            error: None,
        }
    }

    fn set_start_position(&mut self, raw: &[u8]) {
        let fen = match Fen::from_ascii(raw) {
            Ok(fen) => fen,
            Err(err) => {
                self.error = Some(ConvertError::InvalidFenHeader {
                    fen: String::from_utf8_lossy(raw).into_owned(),
                    reason: err.to_string(),
                });
                return;
            }
        };
        match fen.into_position(CastlingMode::Standard) {
            Ok(position) => self.position = position,
            Err(err) => {
                self.error = Some(ConvertError::InvalidFenHeader {
                    fen: String::from_utf8_lossy(raw).into_owned(),
                    reason: err.to_string(),
                });
            }
        }
    }
}

impl Visitor for TranscriptVisitor {
    type Result = Result<(), ConvertError>;

    fn begin_game(&mut self) {
        self.position = Chess::default();
        self.error = None;
    }

    fn header(&mut self, key: &[u8], value: RawHeader<'_>) {
        // A FEN header replaces the standard starting position; all other
        // headers are metadata the transcript does not carry.
        if key == b"FEN" {
            self.set_start_position(value.as_bytes());
        }
    }

    fn san(&mut self, san_plus: SanPlus) {
        if self.error.is_some() {
            return;
        }
        match san_plus.san.to_move(&self.position) {
            Ok(m) => {
                let token = encoder::encode(&self.position, &m);
                self.position.play_unchecked(&m);
                self.lines.push(token);
                // Snapshots record the en passant square after every double
                // push, capturable or not.
                self.lines.push(
                    Fen::from_position(self.position.clone(), EnPassantMode::Always).to_string(),
                );
            }
            Err(source) => {
                self.error = Some(ConvertError::IllegalSan {
                    san: san_plus.san.to_string(),
                    source,
                });
            }
        }
    }

    fn begin_variation(&mut self) -> Skip {
        Skip(true) // mainline only
    }

    fn end_game(&mut self) -> Self::Result {
        match self.error.take() {
            Some(err) => Err(err),
            None => {
                self.lines.push("---".to_string());
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn transcribe_to_string(pgn: &str, max_games: usize) -> (usize, String) {
        let dir = tempdir().expect("tempdir");
        let out = dir.path().join("out.txt");
        let games = Transcriber::new()
            .with_max_games(max_games)
            .transcribe(pgn.as_bytes(), &out)
            .expect("transcription should succeed");
        let content = fs::read_to_string(&out).expect("output file should exist");
        (games, content)
    }

    #[test]
    fn test_line_count_is_two_per_move_plus_terminator() {
        let (games, content) = transcribe_to_string("1. e4 e5 2. Nf3 *\n", 250);
        assert_eq!(games, 1);
        let lines: Vec<&str> = content.trim_end().split('\n').collect();
        assert_eq!(lines.len(), 7, "3 moves must yield 2*3 + 1 lines");
        assert_eq!(lines[0], "e2-e4");
        assert_eq!(lines[6], "---");
    }

    #[test]
    fn test_zero_move_game_contributes_only_terminator() {
        let pgn = "[Event \"?\"]\n[Result \"*\"]\n\n*\n";
        let (games, content) = transcribe_to_string(pgn, 250);
        assert_eq!(games, 1);
        assert_eq!(content, "---\n");
    }

    #[test]
    fn test_variations_are_skipped() {
        let (_, content) = transcribe_to_string("1. e4 (1. d4 d5) 1... e5 *\n", 250);
        let lines: Vec<&str> = content.trim_end().split('\n').collect();
        assert_eq!(lines.len(), 5, "only the two mainline moves should appear");
        assert_eq!(lines[0], "e2-e4");
        assert_eq!(lines[2], "e7-e5");
    }

    #[test]
    fn test_limit_stops_after_max_games() {
        let pgn = "1. e4 *\n\n1. d4 *\n\n1. c4 *\n";
        let (games, content) = transcribe_to_string(pgn, 2);
        assert_eq!(games, 2);
        assert_eq!(content.matches("---").count(), 2);
        assert!(content.contains("e2-e4"));
        assert!(content.contains("d2-d4"));
        assert!(!content.contains("c2-c4"), "third game must not be read");
    }

    #[test]
    fn test_fen_header_sets_starting_position() {
        let pgn = "[FEN \"r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1\"]\n\n1... O-O-O *\n";
        let (_, content) = transcribe_to_string(pgn, 250);
        assert!(content.starts_with("e8-c8,a8-d8\n"));
    }

    #[test]
    fn test_empty_input_writes_nothing() {
        let dir = tempdir().expect("tempdir");
        let out = dir.path().join("out.txt");
        let err = Transcriber::new()
            .transcribe(&b""[..], &out)
            .expect_err("empty input must not succeed");
        assert!(matches!(err, ConvertError::NoGames));
        assert!(!out.exists(), "no output file may be created");
    }

    #[test]
    fn test_zero_limit_is_rejected_before_reading() {
        let dir = tempdir().expect("tempdir");
        let out = dir.path().join("out.txt");
        let err = Transcriber::new()
            .with_max_games(0)
            .transcribe(&b"1. e4 *\n"[..], &out)
            .expect_err("a zero limit must be rejected");
        assert!(matches!(err, ConvertError::InvalidMaxGames));
        assert!(!out.exists());
    }

    #[test]
    fn test_illegal_san_aborts_without_output() {
        let dir = tempdir().expect("tempdir");
        let out = dir.path().join("out.txt");
        let err = Transcriber::new()
            .transcribe(&b"1. e4 Ke4 *\n"[..], &out)
            .expect_err("an illegal move must abort the run");
        assert!(matches!(err, ConvertError::IllegalSan { .. }));
        assert!(!out.exists(), "a failed run must not leave output behind");
    }
}
