//! Move-by-move annotation of a parsed game.
//!
//! The game is replayed on a single board. Facts about the move itself
//! (captures, castling) are read before it is applied; facts about the
//! position it creates (check, checkmate, FEN, material) after.

use serde::Serialize;

use crate::board::{Board, Color};
use crate::parser::Game;

/// Everything reported about one played move. The field names are part
/// of the wire format and must not change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoveAnnotation {
    pub san: String,
    pub fen: String,
    pub is_capture: bool,
    pub captured_piece: Option<String>,
    pub is_check: bool,
    pub is_checkmate: bool,
    pub is_kingside_castling: bool,
    pub is_queenside_castling: bool,
    pub material_white: u32,
    pub material_black: u32,
}

/// Annotates every move of a parsed game, in game order.
///
/// The moves come out of the parser already validated, so this cannot
/// fail; a game with no moves yields an empty vector.
pub fn annotate(game: &Game) -> Vec<MoveAnnotation> {
    let mut board = Board::new();
    let mut annotations = Vec::with_capacity(game.moves.len());

    for mv in &game.moves {
        debug_assert!(board.is_legal(mv), "replayed move must be legal");

        let mut san = board.san_stem(mv);
        let captured = board.captured_piece(mv);
        let is_kingside_castling = board.is_kingside_castling(mv);
        let is_queenside_castling = board.is_queenside_castling(mv);

        board.apply(mv);

        let is_checkmate = board.is_checkmate();
        let is_check = board.is_check();
        if is_checkmate {
            san.push('#');
        } else if is_check {
            san.push('+');
        }

        annotations.push(MoveAnnotation {
            san,
            fen: board.to_fen(),
            is_capture: captured.is_some(),
            captured_piece: captured.map(|(color, piece)| piece.to_char(color).to_string()),
            is_check,
            is_checkmate,
            is_kingside_castling,
            is_queenside_castling,
            material_white: board.material(Color::White),
            material_black: board.material(Color::Black),
        });
    }

    annotations
}
