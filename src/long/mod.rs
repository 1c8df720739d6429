pub mod encoder;
pub mod transcriber;

pub use encoder::{encode, MoveToken};
pub use transcriber::{Transcriber, DEFAULT_MAX_GAMES};
