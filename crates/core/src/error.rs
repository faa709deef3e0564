//! Error types for pgn-annotator-core

use thiserror::Error;

use crate::board::Color;

/// Reasons a PGN text is rejected. Every variant aborts the whole parse;
/// no partial game is ever returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Input contains no PGN data")]
    MalformedInput,

    #[error("Halfmove {ply}: no legal move matches '{san}'")]
    IllegalMove { san: String, ply: usize },

    #[error("Halfmove {ply}: '{san}' matches more than one legal move")]
    AmbiguousMove { san: String, ply: usize },

    #[error("Game contains no moves")]
    EmptyGame,
}

/// Failure to resolve a single SAN token against a position.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SanError {
    #[error("Unreadable move text '{0}'")]
    Syntax(String),

    #[error("No legal move matches '{0}'")]
    NoMatch(String),

    #[error("'{0}' matches more than one legal move")]
    Ambiguous(String),
}

/// Field-level FEN validation failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("Expected 6 whitespace-separated fields, found {found}")]
    FieldCount { found: usize },

    #[error("Piece placement must describe 8 ranks")]
    RankCount,

    #[error("Rank '{0}' does not describe exactly 8 files")]
    BadRank(String),

    #[error("Unknown piece character '{0}'")]
    UnknownPiece(char),

    #[error("Side to move must be 'w' or 'b', found '{0}'")]
    SideToMove(String),

    #[error("Invalid castling availability '{0}'")]
    Castling(String),

    #[error("Invalid en passant square '{0}'")]
    EnPassant(String),

    #[error("Invalid move counter '{0}'")]
    Counter(String),

    #[error("Expected exactly one {color} king, found {count}")]
    KingCount { color: Color, count: u32 },
}
