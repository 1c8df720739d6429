use std::io;

use shakmaty::san::SanError;
use thiserror::Error;

/// Errors that can end a conversion run.
///
/// Every variant is terminal: the run either produces the full transcript for
/// all processed games or writes nothing at all. There is no skip-and-continue
/// handling for individual games.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// The configured game limit was not a positive integer.
    #[error("--max-games must be a positive integer")]
    InvalidMaxGames,

    /// The input yielded zero games (empty or entirely unparsable).
    #[error("no games were found in the input")]
    NoGames,

    /// A SAN move in the input could not be resolved against the current
    /// position (illegal or ambiguous movetext).
    #[error("cannot play '{san}': {source}")]
    IllegalSan {
        san: String,
        #[source]
        source: SanError,
    },

    /// A game carried a FEN header that does not describe a usable position.
    #[error("invalid FEN header '{fen}': {reason}")]
    InvalidFenHeader { fen: String, reason: String },

    /// An underlying read or write failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}
