//! PGN Annotator Core Library
//!
//! Parses a PGN game and describes every move played: captures, checks,
//! castling, the resulting FEN and the material balance.
//!
//! ```
//! use pgn_annotator_core::{annotate, parse};
//!
//! let game = parse("1. e4 e5 2. Nf3 Nc6").unwrap();
//! let annotations = annotate(&game);
//! assert_eq!(annotations.len(), 4);
//! assert_eq!(annotations[0].san, "e4");
//! ```

pub mod annotate;
pub mod board;
pub mod error;
pub mod parser;

pub use annotate::{annotate, MoveAnnotation};
pub use board::{Board, CastlingRights, Color, Move, Piece, Square, STARTING_FEN};
pub use error::{FenError, ParseError, SanError};
pub use parser::{parse, Game};
