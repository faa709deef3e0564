//! Applying and undoing moves on a board.
//!
//! A move carries only origin, destination and promotion. Whether it is a
//! capture, an en passant capture or a castle is answered here by looking
//! at the position, so the answers always agree with the board.

use super::state::Board;
use super::types::{CastlingRights, Color, Move, Piece, Square};

/// State needed to reverse one applied move.
#[derive(Clone, Copy, Debug)]
pub struct Undo {
    captured: Option<(Color, Piece, Square)>,
    castling: CastlingRights,
    en_passant: Option<Square>,
    halfmove_clock: u32,
}

impl Board {
    /// King move across two files. Only ever true for a legal castle.
    pub fn is_castling(&self, mv: &Move) -> bool {
        matches!(self.piece_at(mv.from), Some((_, Piece::King)))
            && mv.from.file.abs_diff(mv.to.file) == 2
    }

    pub fn is_kingside_castling(&self, mv: &Move) -> bool {
        self.is_castling(mv) && mv.to.file == 6
    }

    pub fn is_queenside_castling(&self, mv: &Move) -> bool {
        self.is_castling(mv) && mv.to.file == 2
    }

    /// Pawn capture onto the empty en passant target square.
    pub fn is_en_passant(&self, mv: &Move) -> bool {
        matches!(self.piece_at(mv.from), Some((_, Piece::Pawn)))
            && self.en_passant == Some(mv.to)
            && mv.from.file != mv.to.file
    }

    pub fn is_capture(&self, mv: &Move) -> bool {
        self.captured_piece(mv).is_some()
    }

    /// The piece this move removes from the board, before the move is made.
    pub fn captured_piece(&self, mv: &Move) -> Option<(Color, Piece)> {
        let mover = self.piece_at(mv.from)?.0;
        if self.is_en_passant(mv) {
            return Some((mover.opponent(), Piece::Pawn));
        }
        match self.piece_at(mv.to) {
            Some((color, piece)) if color != mover => Some((color, piece)),
            _ => None,
        }
    }

    /// Plays a legal move in place and returns the record needed to undo
    /// it. Calling this with an illegal move is a programming error.
    pub fn apply(&mut self, mv: &Move) -> Undo {
        let (color, piece) = self
            .piece_at(mv.from)
            .expect("apply: no piece on origin square");
        debug_assert_eq!(color, self.side_to_move, "apply: wrong side moving");

        let en_passant_capture = self.is_en_passant(mv);
        let castling = self.is_castling(mv);
        let mut undo = Undo {
            captured: None,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
        };

        if en_passant_capture {
            // The captured pawn stands beside the origin, not on the target.
            let taken = Square::new(mv.from.rank, mv.to.file);
            self.remove_piece(taken, color.opponent(), Piece::Pawn);
            undo.captured = Some((color.opponent(), Piece::Pawn, taken));
        } else if let Some((victim_color, victim)) = self.piece_at(mv.to) {
            self.remove_piece(mv.to, victim_color, victim);
            undo.captured = Some((victim_color, victim, mv.to));
        }

        self.remove_piece(mv.from, color, piece);
        self.set_piece(mv.to, color, mv.promotion.unwrap_or(piece));

        if castling {
            let rank = mv.from.rank;
            let (rook_from, rook_to) = if mv.to.file == 6 { (7, 5) } else { (0, 3) };
            self.remove_piece(Square::new(rank, rook_from), color, Piece::Rook);
            self.set_piece(Square::new(rank, rook_to), color, Piece::Rook);
        }

        if piece == Piece::King {
            self.castling.revoke_all(color);
        }
        if piece == Piece::Rook {
            if mv.from == Square::new(color.back_rank(), 0) {
                self.castling.revoke_queenside(color);
            } else if mv.from == Square::new(color.back_rank(), 7) {
                self.castling.revoke_kingside(color);
            }
        }
        if let Some((victim_color, Piece::Rook, sq)) = undo.captured {
            if sq == Square::new(victim_color.back_rank(), 0) {
                self.castling.revoke_queenside(victim_color);
            } else if sq == Square::new(victim_color.back_rank(), 7) {
                self.castling.revoke_kingside(victim_color);
            }
        }

        self.en_passant = if piece == Piece::Pawn && mv.from.rank.abs_diff(mv.to.rank) == 2 {
            Some(Square::new((mv.from.rank + mv.to.rank) / 2, mv.from.file))
        } else {
            None
        };

        if piece == Piece::Pawn || undo.captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if color == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = color.opponent();

        undo
    }

    /// Reverses the most recent `apply` of `mv`.
    pub fn undo(&mut self, mv: &Move, undo: Undo) {
        let color = self.side_to_move.opponent();
        let (_, placed) = self
            .piece_at(mv.to)
            .expect("undo: no piece on destination square");

        if placed == Piece::King && mv.from.file.abs_diff(mv.to.file) == 2 {
            let rank = mv.from.rank;
            let (rook_from, rook_to) = if mv.to.file == 6 { (7, 5) } else { (0, 3) };
            self.remove_piece(Square::new(rank, rook_to), color, Piece::Rook);
            self.set_piece(Square::new(rank, rook_from), color, Piece::Rook);
        }

        self.remove_piece(mv.to, color, placed);
        let original = if mv.promotion.is_some() {
            Piece::Pawn
        } else {
            placed
        };
        self.set_piece(mv.from, color, original);

        if let Some((victim_color, victim, sq)) = undo.captured {
            self.set_piece(sq, victim_color, victim);
        }

        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        if color == Color::Black {
            self.fullmove_number -= 1;
        }
        self.side_to_move = color;
    }
}
