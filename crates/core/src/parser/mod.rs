//! PGN parsing

mod pgn;

pub use pgn::{parse, Game};
