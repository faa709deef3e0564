//! Board representation, move generation and algebraic notation

mod apply;
mod attacks;
mod fen;
mod movegen;
mod san;
mod state;
mod types;

pub use apply::Undo;
pub use fen::STARTING_FEN;
pub use state::Board;
pub use types::*;
