//! Long algebraic move encoding
//! Turns one legal move into its hyphenated coordinate token

use std::fmt;

use shakmaty::{Chess, Color, File, Move, Position, Role, Square};

/// Classified form of a single move, decided once before formatting.
///
/// The three shapes a token can take are distinct enough that branching on a
/// variant is clearer (and easier to test) than chaining predicate checks
/// while building the string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveToken {
    /// A plain move (including captures and en passant): `e2-e4`.
    Ordinary { from: Square, to: Square },
    /// A promotion: `a7-a8=Q`.
    Promotion {
        from: Square,
        to: Square,
        piece: Role,
    },
    /// Castling split into king and rook segments: `e1-g1,h1-f1`.
    Castle {
        king_from: Square,
        king_to: Square,
        rook_from: Square,
        rook_to: Square,
    },
}

impl MoveToken {
    /// Classify a move against the position it is about to be played in.
    ///
    /// The move must be legal in `position`; legality is the rules engine's
    /// responsibility and is not re-checked here.
    pub fn classify(position: &Chess, m: &Move) -> MoveToken {
        match *m {
            Move::Castle { king, rook } => {
                // Castle moves are king-takes-rook: `rook` is the rook's
                // origin square. The king lands on the g-file when castling
                // toward the h-side rook, the c-file otherwise.
                let king_to = Square::from_coords(
                    if rook > king { File::G } else { File::C },
                    king.rank(),
                );
                let (rook_from, rook_to) = rook_segment(position.turn(), king_to);
                MoveToken::Castle {
                    king_from: king,
                    king_to,
                    rook_from,
                    rook_to,
                }
            }
            Move::Normal {
                from,
                to,
                promotion: Some(piece),
                ..
            } => MoveToken::Promotion { from, to, piece },
            Move::Normal { from, to, .. } | Move::EnPassant { from, to } => {
                MoveToken::Ordinary { from, to }
            }
            // Drops exist only in crazyhouse; SAN for standard games never
            // resolves to one.
            Move::Put { .. } => unreachable!("piece drops cannot occur in a standard game"),
        }
    }
}

impl fmt::Display for MoveToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveToken::Ordinary { from, to } => write!(f, "{}-{}", from, to),
            MoveToken::Promotion { from, to, piece } => {
                write!(f, "{}-{}={}", from, to, piece.upper_char())
            }
            MoveToken::Castle {
                king_from,
                king_to,
                rook_from,
                rook_to,
            } => write!(f, "{}-{},{}-{}", king_from, king_to, rook_from, rook_to),
        }
    }
}

/// Encode one legal move as its long algebraic token.
pub fn encode(position: &Chess, m: &Move) -> String {
    MoveToken::classify(position, m).to_string()
}

/// The rook's half of a castling move, keyed on the side to move and the file
/// the king lands on (g-file means king side, anything else is queen side).
fn rook_segment(turn: Color, king_to: Square) -> (Square, Square) {
    match turn {
        Color::White if king_to == Square::G1 => (Square::H1, Square::F1),
        Color::White => (Square::A1, Square::D1),
        Color::Black if king_to == Square::G8 => (Square::H8, Square::F8),
        Color::Black => (Square::A8, Square::D8),
    }
}
