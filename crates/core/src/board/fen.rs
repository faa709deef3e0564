//! FEN serialization and parsing.

use std::str::FromStr;

use super::attacks;
use super::state::Board;
use super::types::{file_char, pop_lsb, rank_char, CastlingRights, Color, Move, Piece, Square};
use crate::error::FenError;

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Board {
    /// Serializes the position as a six-field FEN string.
    ///
    /// The en passant field is written only when an en passant capture is
    /// actually playable, so two positions that differ only in a dead
    /// target square serialize identically.
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.piece_at(Square::new(rank, file)) {
                    Some((color, piece)) => {
                        if empty > 0 {
                            fen.push(char::from_digit(empty, 10).unwrap_or('0'));
                            empty = 0;
                        }
                        fen.push(piece.to_char(color));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push(char::from_digit(empty, 10).unwrap_or('0'));
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        fen.push(' ');
        if self.castling.is_none() {
            fen.push('-');
        } else {
            for (color, symbol) in [
                (Color::White, ('K', 'Q')),
                (Color::Black, ('k', 'q')),
            ] {
                if self.castling.has_kingside(color) {
                    fen.push(symbol.0);
                }
                if self.castling.has_queenside(color) {
                    fen.push(symbol.1);
                }
            }
        }

        fen.push(' ');
        match self.en_passant {
            Some(target) if self.has_legal_en_passant() => {
                fen.push(file_char(target.file));
                fen.push(rank_char(target.rank));
            }
            _ => fen.push('-'),
        }

        fen.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        fen
    }

    /// True when the side to move has at least one legal en passant
    /// capture onto the current target square.
    fn has_legal_en_passant(&self) -> bool {
        let target = match self.en_passant {
            Some(target) => target,
            None => return false,
        };
        let color = self.side_to_move;
        let mut candidates = attacks::pawn_attacks(color.opponent(), target)
            & self.pieces[color.index()][Piece::Pawn.index()];
        while candidates != 0 {
            let from = pop_lsb(&mut candidates);
            let mut probe = self.clone();
            probe.apply(&Move::new(from, target));
            if !probe.in_check(color) {
                return true;
            }
        }
        false
    }

    /// Reconstructs a board from a six-field FEN string.
    pub fn from_fen(fen: &str) -> Result<Board, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(FenError::FieldCount {
                found: fields.len(),
            });
        }

        let mut board = Board::empty();

        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount);
        }
        for (row, rank_text) in ranks.iter().enumerate() {
            let rank = 7 - row;
            let mut file = 0;
            for c in rank_text.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                } else {
                    let (color, piece) =
                        Piece::from_fen_char(c).ok_or(FenError::UnknownPiece(c))?;
                    if file >= 8 {
                        return Err(FenError::BadRank(rank_text.to_string()));
                    }
                    board.set_piece(Square::new(rank, file), color, piece);
                    file += 1;
                }
            }
            if file != 8 {
                return Err(FenError::BadRank(rank_text.to_string()));
            }
        }

        board.side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::SideToMove(other.to_string())),
        };

        board.castling = CastlingRights::NONE;
        if fields[2] != "-" {
            for c in fields[2].chars() {
                match c {
                    'K' => board.castling.grant_kingside(Color::White),
                    'Q' => board.castling.grant_queenside(Color::White),
                    'k' => board.castling.grant_kingside(Color::Black),
                    'q' => board.castling.grant_queenside(Color::Black),
                    _ => return Err(FenError::Castling(fields[2].to_string())),
                }
            }
        }

        board.en_passant = if fields[3] == "-" {
            None
        } else {
            Some(parse_en_passant(fields[3])?)
        };

        board.halfmove_clock = fields[4]
            .parse()
            .map_err(|_| FenError::Counter(fields[4].to_string()))?;
        board.fullmove_number = fields[5]
            .parse()
            .map_err(|_| FenError::Counter(fields[5].to_string()))?;

        for color in [Color::White, Color::Black] {
            let kings = board.pieces[color.index()][Piece::King.index()].count_ones();
            if kings != 1 {
                return Err(FenError::KingCount {
                    color,
                    count: kings,
                });
            }
        }

        Ok(board)
    }
}

fn parse_en_passant(text: &str) -> Result<Square, FenError> {
    let mut chars = text.chars();
    let (file, rank) = match (chars.next(), chars.next(), chars.next()) {
        (Some(f @ 'a'..='h'), Some(r @ ('3' | '6')), None) => {
            (f as usize - 'a' as usize, r as usize - '1' as usize)
        }
        _ => return Err(FenError::EnPassant(text.to_string())),
    };
    Ok(Square::new(rank, file))
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Board, FenError> {
        Board::from_fen(s)
    }
}
