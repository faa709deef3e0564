//! Primitive chess types: colors, pieces, squares, moves, castling rights.

use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    /// Rank step of this side's pawns.
    pub(crate) fn pawn_direction(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    pub(crate) fn back_rank(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    pub(crate) fn pawn_start_rank(self) -> usize {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    pub(crate) fn promotion_rank(self) -> usize {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Piece {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Piece {
    pub(crate) const ALL: [Piece; 6] = [
        Piece::Pawn,
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
        Piece::King,
    ];

    pub(crate) fn index(self) -> usize {
        match self {
            Piece::Pawn => 0,
            Piece::Knight => 1,
            Piece::Bishop => 2,
            Piece::Rook => 3,
            Piece::Queen => 4,
            Piece::King => 5,
        }
    }

    /// Fixed material weight. Kings are not counted.
    pub fn material_value(self) -> u32 {
        match self {
            Piece::Pawn => 1,
            Piece::Knight => 3,
            Piece::Bishop => 3,
            Piece::Rook => 5,
            Piece::Queen => 9,
            Piece::King => 0,
        }
    }

    /// FEN letter: uppercase for White, lowercase for Black.
    pub fn to_char(self, color: Color) -> char {
        let c = match self {
            Piece::Pawn => 'p',
            Piece::Knight => 'n',
            Piece::Bishop => 'b',
            Piece::Rook => 'r',
            Piece::Queen => 'q',
            Piece::King => 'k',
        };
        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    pub(crate) fn from_fen_char(c: char) -> Option<(Color, Piece)> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let piece = match c.to_ascii_lowercase() {
            'p' => Piece::Pawn,
            'n' => Piece::Knight,
            'b' => Piece::Bishop,
            'r' => Piece::Rook,
            'q' => Piece::Queen,
            'k' => Piece::King,
            _ => return None,
        };
        Some((color, piece))
    }

    /// SAN piece letter. Pawns have no letter in SAN; callers skip them.
    pub(crate) fn san_letter(self) -> char {
        match self {
            Piece::Pawn => 'P',
            Piece::Knight => 'N',
            Piece::Bishop => 'B',
            Piece::Rook => 'R',
            Piece::Queen => 'Q',
            Piece::King => 'K',
        }
    }

    pub(crate) fn from_san_letter(c: char) -> Option<Piece> {
        match c {
            'N' => Some(Piece::Knight),
            'B' => Some(Piece::Bishop),
            'R' => Some(Piece::Rook),
            'Q' => Some(Piece::Queen),
            'K' => Some(Piece::King),
            _ => None,
        }
    }
}

/// A board coordinate. Rank 0 is White's back rank, file 0 is the a-file.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Square {
    pub rank: usize,
    pub file: usize,
}

impl Square {
    pub fn new(rank: usize, file: usize) -> Square {
        debug_assert!(rank < 8 && file < 8);
        Square { rank, file }
    }

    pub(crate) fn index(self) -> usize {
        self.rank * 8 + self.file
    }

    pub(crate) fn from_index(index: usize) -> Square {
        Square::new(index / 8, index % 8)
    }

    pub(crate) fn bit(self) -> u64 {
        1u64 << self.index()
    }

    /// Steps by the given rank/file deltas, `None` when off the board.
    pub(crate) fn offset(self, dr: i8, df: i8) -> Option<Square> {
        let rank = self.rank as i8 + dr;
        let file = self.file as i8 + df;
        if (0..8).contains(&rank) && (0..8).contains(&file) {
            Some(Square::new(rank as usize, file as usize))
        } else {
            None
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", file_char(self.file), rank_char(self.rank))
    }
}

pub(crate) fn file_char(file: usize) -> char {
    (b'a' + file as u8) as char
}

pub(crate) fn rank_char(rank: usize) -> char {
    (b'1' + rank as u8) as char
}

/// Clears and returns the lowest set square of a bitboard.
pub(crate) fn pop_lsb(bb: &mut u64) -> Square {
    let index = bb.trailing_zeros() as usize;
    *bb &= *bb - 1;
    Square::from_index(index)
}

/// Origin, destination and optional promotion piece. Capture, en passant
/// and castling are not stored; the board derives them from context when
/// the move is applied, so the flags can never disagree with the position.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Piece>,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Move {
        Move {
            from,
            to,
            promotion: None,
        }
    }

    pub fn promote(from: Square, to: Square, piece: Piece) -> Move {
        Move {
            from,
            to,
            promotion: Some(piece),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(piece) = self.promotion {
            write!(f, "{}", piece.to_char(Color::Black))?;
        }
        Ok(())
    }
}

/// The four independent castling permissions, packed into one byte.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub(crate) const NONE: CastlingRights = CastlingRights(0);
    pub(crate) const ALL: CastlingRights = CastlingRights(0b1111);

    fn kingside_bit(color: Color) -> u8 {
        1 << (2 * color.index())
    }

    fn queenside_bit(color: Color) -> u8 {
        2 << (2 * color.index())
    }

    pub fn has_kingside(self, color: Color) -> bool {
        self.0 & Self::kingside_bit(color) != 0
    }

    pub fn has_queenside(self, color: Color) -> bool {
        self.0 & Self::queenside_bit(color) != 0
    }

    pub(crate) fn grant_kingside(&mut self, color: Color) {
        self.0 |= Self::kingside_bit(color);
    }

    pub(crate) fn grant_queenside(&mut self, color: Color) {
        self.0 |= Self::queenside_bit(color);
    }

    pub(crate) fn revoke_kingside(&mut self, color: Color) {
        self.0 &= !Self::kingside_bit(color);
    }

    pub(crate) fn revoke_queenside(&mut self, color: Color) {
        self.0 &= !Self::queenside_bit(color);
    }

    pub(crate) fn revoke_all(&mut self, color: Color) {
        self.revoke_kingside(color);
        self.revoke_queenside(color);
    }

    pub(crate) fn is_none(self) -> bool {
        self.0 == 0
    }
}
