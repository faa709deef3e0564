//! Move generation and legality.
//!
//! Pseudo-legal moves are produced per piece type from the attack tables,
//! then filtered by playing each one on a probe board and rejecting those
//! that leave the mover's king in check.

use super::attacks;
use super::state::Board;
use super::types::{pop_lsb, Color, Move, Piece, Square};

const PROMOTION_PIECES: [Piece; 4] = [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight];

fn push_pawn_move(moves: &mut Vec<Move>, from: Square, to: Square, color: Color) {
    if to.rank == color.promotion_rank() {
        for piece in PROMOTION_PIECES {
            moves.push(Move::promote(from, to, piece));
        }
    } else {
        moves.push(Move::new(from, to));
    }
}

impl Board {
    pub(crate) fn pseudo_legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        self.pawn_moves(&mut moves);
        self.knight_moves(&mut moves);
        self.slider_moves(&mut moves);
        self.king_moves(&mut moves);
        moves
    }

    fn pawn_moves(&self, moves: &mut Vec<Move>) {
        let color = self.side_to_move;
        let direction = color.pawn_direction();
        let enemy = self.occupied[color.opponent().index()];
        let mut pawns = self.pieces[color.index()][Piece::Pawn.index()];
        while pawns != 0 {
            let from = pop_lsb(&mut pawns);
            if let Some(one) = from.offset(direction, 0) {
                if self.is_empty(one) {
                    push_pawn_move(moves, from, one, color);
                    if from.rank == color.pawn_start_rank() {
                        if let Some(two) = one.offset(direction, 0) {
                            if self.is_empty(two) {
                                moves.push(Move::new(from, two));
                            }
                        }
                    }
                }
            }
            let mut captures = attacks::pawn_attacks(color, from) & enemy;
            while captures != 0 {
                let to = pop_lsb(&mut captures);
                push_pawn_move(moves, from, to, color);
            }
            if let Some(target) = self.en_passant {
                if attacks::pawn_attacks(color, from) & target.bit() != 0 {
                    moves.push(Move::new(from, target));
                }
            }
        }
    }

    fn knight_moves(&self, moves: &mut Vec<Move>) {
        let color = self.side_to_move;
        let own = self.occupied[color.index()];
        let mut knights = self.pieces[color.index()][Piece::Knight.index()];
        while knights != 0 {
            let from = pop_lsb(&mut knights);
            let mut targets = attacks::knight_attacks(from) & !own;
            while targets != 0 {
                moves.push(Move::new(from, pop_lsb(&mut targets)));
            }
        }
    }

    fn slider_moves(&self, moves: &mut Vec<Move>) {
        let color = self.side_to_move;
        let own = self.occupied[color.index()];
        let sliders: [(Piece, fn(Square, u64) -> u64); 3] = [
            (Piece::Bishop, attacks::bishop_attacks),
            (Piece::Rook, attacks::rook_attacks),
            (Piece::Queen, attacks::queen_attacks),
        ];
        for (piece, attack) in sliders {
            let mut from_set = self.pieces[color.index()][piece.index()];
            while from_set != 0 {
                let from = pop_lsb(&mut from_set);
                let mut targets = attack(from, self.all_occupied) & !own;
                while targets != 0 {
                    moves.push(Move::new(from, pop_lsb(&mut targets)));
                }
            }
        }
    }

    fn king_moves(&self, moves: &mut Vec<Move>) {
        let color = self.side_to_move;
        let own = self.occupied[color.index()];
        let mut kings = self.pieces[color.index()][Piece::King.index()];
        while kings != 0 {
            let from = pop_lsb(&mut kings);
            let mut targets = attacks::king_attacks(from) & !own;
            while targets != 0 {
                moves.push(Move::new(from, pop_lsb(&mut targets)));
            }
        }

        // Castling: rights intact, rook at home, path clear. Check
        // constraints on the king's path are enforced in legal_moves.
        let rank = color.back_rank();
        let king_home = Square::new(rank, 4);
        if self.pieces[color.index()][Piece::King.index()] & king_home.bit() == 0 {
            return;
        }
        let rooks = self.pieces[color.index()][Piece::Rook.index()];
        if self.castling.has_kingside(color)
            && rooks & Square::new(rank, 7).bit() != 0
            && self.is_empty(Square::new(rank, 5))
            && self.is_empty(Square::new(rank, 6))
        {
            moves.push(Move::new(king_home, Square::new(rank, 6)));
        }
        if self.castling.has_queenside(color)
            && rooks & Square::new(rank, 0).bit() != 0
            && self.is_empty(Square::new(rank, 1))
            && self.is_empty(Square::new(rank, 2))
            && self.is_empty(Square::new(rank, 3))
        {
            moves.push(Move::new(king_home, Square::new(rank, 2)));
        }
    }

    pub(crate) fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        let them = &self.pieces[by.index()];
        if attacks::pawn_attacks(by.opponent(), sq) & them[Piece::Pawn.index()] != 0 {
            return true;
        }
        if attacks::knight_attacks(sq) & them[Piece::Knight.index()] != 0 {
            return true;
        }
        if attacks::king_attacks(sq) & them[Piece::King.index()] != 0 {
            return true;
        }
        let lines = them[Piece::Rook.index()] | them[Piece::Queen.index()];
        if attacks::rook_attacks(sq, self.all_occupied) & lines != 0 {
            return true;
        }
        let diagonals = them[Piece::Bishop.index()] | them[Piece::Queen.index()];
        attacks::bishop_attacks(sq, self.all_occupied) & diagonals != 0
    }

    pub(crate) fn in_check(&self, color: Color) -> bool {
        self.is_square_attacked(self.king_square(color), color.opponent())
    }

    /// True when the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.in_check(self.side_to_move)
    }

    /// Every legal move for the side to move.
    pub fn legal_moves(&self) -> Vec<Move> {
        let color = self.side_to_move;
        let in_check_now = self.in_check(color);
        let mut probe = self.clone();
        let mut legal = Vec::new();
        for mv in self.pseudo_legal_moves() {
            if self.is_castling(&mv) {
                if in_check_now {
                    continue;
                }
                let passed = Square::new(mv.from.rank, (mv.from.file + mv.to.file) / 2);
                if self.is_square_attacked(passed, color.opponent()) {
                    continue;
                }
            }
            let undo = probe.apply(&mv);
            if !probe.in_check(color) {
                legal.push(mv);
            }
            probe.undo(&mv, undo);
        }
        legal
    }

    pub fn is_legal(&self, mv: &Move) -> bool {
        self.legal_moves().contains(mv)
    }

    pub fn is_checkmate(&self) -> bool {
        self.is_check() && self.legal_moves().is_empty()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.is_check() && self.legal_moves().is_empty()
    }

    /// Counts leaf nodes of the legal move tree to the given depth.
    pub fn perft(&mut self, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }
        let moves = self.legal_moves();
        if depth == 1 {
            return moves.len() as u64;
        }
        let mut nodes = 0;
        for mv in &moves {
            let undo = self.apply(mv);
            nodes += self.perft(depth - 1);
            self.undo(mv, undo);
        }
        nodes
    }
}
