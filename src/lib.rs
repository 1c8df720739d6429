//! PGN to Long Algebraic Converter Library
//!
//! This library reads standard PGN files and converts each game's mainline
//! into a flat transcript: one coordinate move token per move (castling split
//! into king and rook segments, promotions suffixed with `=<PIECE>`) followed
//! by the FEN of the resulting position, with games separated by `---`.
//!
//! Move legality, SAN resolution and FEN formatting are delegated to
//! `shakmaty`; reading games one at a time is delegated to `pgn-reader`.

pub mod error;
pub mod long;

pub use error::ConvertError;
pub use long::{encode, MoveToken, Transcriber, DEFAULT_MAX_GAMES};
