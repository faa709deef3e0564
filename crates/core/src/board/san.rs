//! Standard algebraic notation.
//!
//! SAN is context dependent: the same text names different moves in
//! different positions, and the shortest unambiguous spelling depends on
//! which same-type pieces can reach the destination. Both directions here
//! therefore work against the full legal move list.
//!
//! ```
//! use pgn_annotator_core::board::{Board, Move, Square};
//!
//! let board = Board::new();
//! let mv = board.resolve_san("e4").unwrap();
//! assert_eq!(mv, Move::new(Square::new(1, 4), Square::new(3, 4)));
//! assert_eq!(board.to_algebraic(&mv), "e4");
//! ```

use super::state::Board;
use super::types::{file_char, rank_char, Move, Piece, Square};
use crate::error::SanError;

struct SanComponents {
    piece: Piece,
    to: Square,
    from_file: Option<usize>,
    from_rank: Option<usize>,
    promotion: Option<Piece>,
}

/// Splits a SAN token into piece, destination, origin hints and promotion.
/// Capture and annotation glyphs are tolerated and ignored; the resolved
/// move's real effect is what counts.
fn parse_san_components(text: &str) -> Option<SanComponents> {
    let mut chars: Vec<char> = text.chars().collect();

    let mut promotion = None;
    if chars.len() >= 3 {
        if let Some(piece) = chars
            .last()
            .and_then(|c| Piece::from_san_letter(c.to_ascii_uppercase()))
        {
            if !matches!(
                piece,
                Piece::Queen | Piece::Rook | Piece::Bishop | Piece::Knight
            ) {
                return None;
            }
            chars.pop();
            if chars.last() == Some(&'=') {
                chars.pop();
            }
            promotion = Some(piece);
        }
    }

    let rank = chars.pop()?;
    let file = chars.pop()?;
    if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
        return None;
    }
    let to = Square::new(rank as usize - '1' as usize, file as usize - 'a' as usize);

    let mut piece = Piece::Pawn;
    let mut start = 0;
    if let Some(&first) = chars.first() {
        if first.is_ascii_uppercase() {
            piece = Piece::from_san_letter(first)?;
            start = 1;
        }
    }

    let mut from_file = None;
    let mut from_rank = None;
    for &c in &chars[start..] {
        match c {
            'a'..='h' if from_file.is_none() => from_file = Some(c as usize - 'a' as usize),
            '1'..='8' if from_rank.is_none() => from_rank = Some(c as usize - '1' as usize),
            'x' | '-' => {}
            _ => return None,
        }
    }

    Some(SanComponents {
        piece,
        to,
        from_file,
        from_rank,
        promotion,
    })
}

impl Board {
    /// Resolves one SAN token to the unique legal move it names.
    ///
    /// Accepts `O-O`/`0-0` castling spellings, promotions with or without
    /// `=`, and trailing check or annotation glyphs. Claimed capture
    /// markers are not verified. A pawn token without a file letter names
    /// a push on the destination's file; pawn captures always spell the
    /// origin file.
    pub fn resolve_san(&self, san: &str) -> Result<Move, SanError> {
        let stripped = san.trim_end_matches(['+', '#', '!', '?']);
        if stripped.is_empty() {
            return Err(SanError::Syntax(san.to_string()));
        }

        let castles_kingside = match stripped {
            "O-O" | "0-0" => Some(true),
            "O-O-O" | "0-0-0" => Some(false),
            _ => None,
        };
        if let Some(kingside) = castles_kingside {
            return self
                .legal_moves()
                .into_iter()
                .find(|mv| {
                    if kingside {
                        self.is_kingside_castling(mv)
                    } else {
                        self.is_queenside_castling(mv)
                    }
                })
                .ok_or_else(|| SanError::NoMatch(san.to_string()));
        }

        let wanted = match parse_san_components(stripped) {
            Some(components) => components,
            None => return Err(SanError::Syntax(san.to_string())),
        };

        let mut matches = self.legal_moves().into_iter().filter(|mv| {
            mv.to == wanted.to
                && mv.promotion == wanted.promotion
                && self.piece_at(mv.from).map(|(_, piece)| piece) == Some(wanted.piece)
                && wanted.from_file.map_or(true, |file| mv.from.file == file)
                && wanted.from_rank.map_or(true, |rank| mv.from.rank == rank)
                && (wanted.piece != Piece::Pawn
                    || wanted.from_file.is_some()
                    || mv.from.file == wanted.to.file)
        });
        match (matches.next(), matches.next()) {
            (Some(mv), None) => Ok(mv),
            (Some(_), Some(_)) => Err(SanError::Ambiguous(san.to_string())),
            (None, _) => Err(SanError::NoMatch(san.to_string())),
        }
    }

    /// Full SAN for a legal move, including the check or mate suffix.
    pub fn to_algebraic(&self, mv: &Move) -> String {
        let mut san = self.san_stem(mv);
        let mut probe = self.clone();
        probe.apply(mv);
        if probe.is_check() {
            san.push(if probe.legal_moves().is_empty() {
                '#'
            } else {
                '+'
            });
        }
        san
    }

    /// SAN without the check or mate suffix, evaluated pre-move.
    pub(crate) fn san_stem(&self, mv: &Move) -> String {
        if self.is_kingside_castling(mv) {
            return "O-O".to_string();
        }
        if self.is_queenside_castling(mv) {
            return "O-O-O".to_string();
        }

        let (_, piece) = self
            .piece_at(mv.from)
            .expect("san_stem: no piece on origin square");
        let capture = self.is_capture(mv);
        let mut san = String::new();

        if piece == Piece::Pawn {
            if capture {
                san.push(file_char(mv.from.file));
            }
        } else {
            san.push(piece.san_letter());
            let (need_file, need_rank) = self.disambiguation(mv, piece);
            if need_file {
                san.push(file_char(mv.from.file));
            }
            if need_rank {
                san.push(rank_char(mv.from.rank));
            }
        }

        if capture {
            san.push('x');
        }
        san.push_str(&mv.to.to_string());
        if let Some(promotion) = mv.promotion {
            san.push('=');
            san.push(promotion.san_letter());
        }
        san
    }

    /// Which origin coordinates SAN needs to single out this move among
    /// same-type pieces reaching the same destination.
    fn disambiguation(&self, mv: &Move, piece: Piece) -> (bool, bool) {
        let mut conflict = false;
        let mut need_file = false;
        let mut need_rank = false;
        for other in self.legal_moves() {
            if other.to != mv.to || other.from == mv.from {
                continue;
            }
            match self.piece_at(other.from) {
                Some((_, other_piece)) if other_piece == piece => {}
                _ => continue,
            }
            conflict = true;
            if other.from.file == mv.from.file {
                need_rank = true;
            }
            if other.from.rank == mv.from.rank {
                need_file = true;
            }
        }
        if conflict && !need_file && !need_rank {
            need_file = true;
        }
        (need_file, need_rank)
    }
}
