//! Board state: piece placement bitboards plus move bookkeeping.

use super::types::{CastlingRights, Color, Piece, Square};

const BACK_RANK: [Piece; 8] = [
    Piece::Rook,
    Piece::Knight,
    Piece::Bishop,
    Piece::Queen,
    Piece::King,
    Piece::Bishop,
    Piece::Knight,
    Piece::Rook,
];

/// A chess position.
///
/// Placement is kept as one bitboard per color and piece type, with
/// aggregate occupancy masks maintained alongside. The struct also carries
/// everything needed to apply and undo moves: side to move, castling
/// rights, en passant target, halfmove clock and fullmove number.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    pub(crate) pieces: [[u64; 6]; 2],
    pub(crate) occupied: [u64; 2],
    pub(crate) all_occupied: u64,
    pub(crate) side_to_move: Color,
    pub(crate) castling: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
}

impl Board {
    /// The standard starting position.
    pub fn new() -> Board {
        let mut board = Board::empty();
        for (file, &piece) in BACK_RANK.iter().enumerate() {
            board.set_piece(Square::new(0, file), Color::White, piece);
            board.set_piece(Square::new(1, file), Color::White, Piece::Pawn);
            board.set_piece(Square::new(6, file), Color::Black, Piece::Pawn);
            board.set_piece(Square::new(7, file), Color::Black, piece);
        }
        board.castling = CastlingRights::ALL;
        board
    }

    pub(crate) fn empty() -> Board {
        Board {
            pieces: [[0; 6]; 2],
            occupied: [0; 2],
            all_occupied: 0,
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    /// The square a pawn just skipped over, if the last move was a double
    /// push. Set regardless of whether a capture onto it is possible.
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        let bit = sq.bit();
        if self.all_occupied & bit == 0 {
            return None;
        }
        let color = if self.occupied[Color::White.index()] & bit != 0 {
            Color::White
        } else {
            Color::Black
        };
        for piece in Piece::ALL {
            if self.pieces[color.index()][piece.index()] & bit != 0 {
                return Some((color, piece));
            }
        }
        None
    }

    pub(crate) fn is_empty(&self, sq: Square) -> bool {
        self.all_occupied & sq.bit() == 0
    }

    pub(crate) fn set_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        let bit = sq.bit();
        debug_assert_eq!(self.all_occupied & bit, 0, "square {sq} already occupied");
        self.pieces[color.index()][piece.index()] |= bit;
        self.occupied[color.index()] |= bit;
        self.all_occupied |= bit;
    }

    pub(crate) fn remove_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        let bit = sq.bit();
        debug_assert_ne!(
            self.pieces[color.index()][piece.index()] & bit,
            0,
            "no {color} {piece:?} on {sq}"
        );
        self.pieces[color.index()][piece.index()] &= !bit;
        self.occupied[color.index()] &= !bit;
        self.all_occupied &= !bit;
    }

    pub(crate) fn king_square(&self, color: Color) -> Square {
        let kings = self.pieces[color.index()][Piece::King.index()];
        debug_assert_eq!(kings.count_ones(), 1, "{color} must have exactly one king");
        Square::from_index(kings.trailing_zeros() as usize)
    }

    /// Total material for one side: pawn 1, knight 3, bishop 3, rook 5,
    /// queen 9, king 0. Recomputed from the piece set on every call.
    pub fn material(&self, color: Color) -> u32 {
        Piece::ALL
            .iter()
            .map(|&piece| {
                self.pieces[color.index()][piece.index()].count_ones() * piece.material_value()
            })
            .sum()
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_position_layout() {
        let board = Board::new();
        assert_eq!(
            board.piece_at(Square::new(0, 4)),
            Some((Color::White, Piece::King))
        );
        assert_eq!(
            board.piece_at(Square::new(7, 3)),
            Some((Color::Black, Piece::Queen))
        );
        assert_eq!(
            board.piece_at(Square::new(1, 0)),
            Some((Color::White, Piece::Pawn))
        );
        assert_eq!(board.piece_at(Square::new(4, 4)), None);
        assert_eq!(board.side_to_move(), Color::White);
        assert_eq!(board.en_passant_target(), None);
        assert_eq!(board.halfmove_clock(), 0);
        assert_eq!(board.fullmove_number(), 1);
        assert!(board.castling_rights().has_kingside(Color::White));
        assert!(board.castling_rights().has_queenside(Color::Black));
        assert_eq!(board.all_occupied.count_ones(), 32);
    }

    #[test]
    fn test_starting_material() {
        let board = Board::new();
        assert_eq!(board.material(Color::White), 39);
        assert_eq!(board.material(Color::Black), 39);
    }

    #[test]
    fn test_set_and_remove_piece() {
        let mut board = Board::empty();
        let sq = Square::new(3, 3);
        board.set_piece(sq, Color::White, Piece::Rook);
        assert_eq!(board.piece_at(sq), Some((Color::White, Piece::Rook)));
        assert!(!board.is_empty(sq));

        board.remove_piece(sq, Color::White, Piece::Rook);
        assert_eq!(board.piece_at(sq), None);
        assert!(board.is_empty(sq));
        assert_eq!(board.all_occupied, 0);
    }

    #[test]
    fn test_king_square() {
        let board = Board::new();
        assert_eq!(board.king_square(Color::White), Square::new(0, 4));
        assert_eq!(board.king_square(Color::Black), Square::new(7, 4));
    }

    #[test]
    fn test_default_is_starting_position() {
        assert_eq!(Board::default(), Board::new());
    }
}
