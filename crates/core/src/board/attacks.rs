//! Precomputed attack tables.
//!
//! Knight, king and pawn attacks are plain per-square lookups. Sliding
//! attacks use classical ray tables: the ray past the first blocker is
//! removed with one XOR against the blocker's own ray.

use once_cell::sync::Lazy;

use super::types::{Color, Square};

const NORTH: usize = 0;
const SOUTH: usize = 1;
const EAST: usize = 2;
const WEST: usize = 3;
const NORTH_EAST: usize = 4;
const NORTH_WEST: usize = 5;
const SOUTH_EAST: usize = 6;
const SOUTH_WEST: usize = 7;

const DIRECTIONS: [(i8, i8); 8] = [
    (1, 0),   // NORTH
    (-1, 0),  // SOUTH
    (0, 1),   // EAST
    (0, -1),  // WEST
    (1, 1),   // NORTH_EAST
    (1, -1),  // NORTH_WEST
    (-1, 1),  // SOUTH_EAST
    (-1, -1), // SOUTH_WEST
];

const ROOK_DIRECTIONS: [usize; 4] = [NORTH, SOUTH, EAST, WEST];
const BISHOP_DIRECTIONS: [usize; 4] = [NORTH_EAST, NORTH_WEST, SOUTH_EAST, SOUTH_WEST];

/// Rays that point towards higher square indices scan for the first
/// blocker from the low end, the others from the high end.
fn scans_upward(direction: usize) -> bool {
    matches!(direction, NORTH | EAST | NORTH_EAST | NORTH_WEST)
}

fn leaper_table(deltas: &[(i8, i8)]) -> [u64; 64] {
    let mut table = [0u64; 64];
    for (index, entry) in table.iter_mut().enumerate() {
        let from = Square::from_index(index);
        for &(dr, df) in deltas {
            if let Some(to) = from.offset(dr, df) {
                *entry |= to.bit();
            }
        }
    }
    table
}

static KNIGHT_ATTACKS: Lazy<[u64; 64]> = Lazy::new(|| {
    leaper_table(&[
        (2, 1),
        (2, -1),
        (-2, 1),
        (-2, -1),
        (1, 2),
        (1, -2),
        (-1, 2),
        (-1, -2),
    ])
});

static KING_ATTACKS: Lazy<[u64; 64]> = Lazy::new(|| {
    leaper_table(&[
        (1, -1),
        (1, 0),
        (1, 1),
        (0, -1),
        (0, 1),
        (-1, -1),
        (-1, 0),
        (-1, 1),
    ])
});

static PAWN_ATTACKS: Lazy<[[u64; 64]; 2]> = Lazy::new(|| {
    [
        leaper_table(&[(1, -1), (1, 1)]),
        leaper_table(&[(-1, -1), (-1, 1)]),
    ]
});

static RAYS: Lazy<[[u64; 64]; 8]> = Lazy::new(|| {
    let mut rays = [[0u64; 64]; 8];
    for (direction, &(dr, df)) in DIRECTIONS.iter().enumerate() {
        for index in 0..64 {
            let mut mask = 0u64;
            let mut step = Square::from_index(index).offset(dr, df);
            while let Some(sq) = step {
                mask |= sq.bit();
                step = sq.offset(dr, df);
            }
            rays[direction][index] = mask;
        }
    }
    rays
});

pub(crate) fn knight_attacks(sq: Square) -> u64 {
    KNIGHT_ATTACKS[sq.index()]
}

pub(crate) fn king_attacks(sq: Square) -> u64 {
    KING_ATTACKS[sq.index()]
}

/// Squares a pawn of `color` standing on `sq` attacks.
pub(crate) fn pawn_attacks(color: Color, sq: Square) -> u64 {
    PAWN_ATTACKS[color.index()][sq.index()]
}

fn ray_attacks(direction: usize, from: usize, occupied: u64) -> u64 {
    let ray = RAYS[direction][from];
    let blockers = ray & occupied;
    if blockers == 0 {
        return ray;
    }
    let blocker = if scans_upward(direction) {
        blockers.trailing_zeros() as usize
    } else {
        63 - blockers.leading_zeros() as usize
    };
    ray ^ RAYS[direction][blocker]
}

pub(crate) fn rook_attacks(sq: Square, occupied: u64) -> u64 {
    ROOK_DIRECTIONS
        .iter()
        .fold(0, |acc, &dir| acc | ray_attacks(dir, sq.index(), occupied))
}

pub(crate) fn bishop_attacks(sq: Square, occupied: u64) -> u64 {
    BISHOP_DIRECTIONS
        .iter()
        .fold(0, |acc, &dir| acc | ray_attacks(dir, sq.index(), occupied))
}

pub(crate) fn queen_attacks(sq: Square, occupied: u64) -> u64 {
    rook_attacks(sq, occupied) | bishop_attacks(sq, occupied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_knight_corner() {
        let attacks = knight_attacks(Square::new(0, 0));
        assert_eq!(attacks.count_ones(), 2);
        assert_ne!(attacks & Square::new(2, 1).bit(), 0);
        assert_ne!(attacks & Square::new(1, 2).bit(), 0);
    }

    #[test]
    fn test_king_center_and_edge() {
        assert_eq!(king_attacks(Square::new(4, 4)).count_ones(), 8);
        assert_eq!(king_attacks(Square::new(0, 4)).count_ones(), 5);
        assert_eq!(king_attacks(Square::new(0, 0)).count_ones(), 3);
    }

    #[test]
    fn test_pawn_attack_direction() {
        let white = pawn_attacks(Color::White, Square::new(3, 4));
        assert_ne!(white & Square::new(4, 3).bit(), 0);
        assert_ne!(white & Square::new(4, 5).bit(), 0);
        assert_eq!(white.count_ones(), 2);

        let black = pawn_attacks(Color::Black, Square::new(3, 4));
        assert_ne!(black & Square::new(2, 3).bit(), 0);
        assert_eq!(black.count_ones(), 2);

        // Rook pawns only attack inward.
        assert_eq!(pawn_attacks(Color::White, Square::new(1, 0)).count_ones(), 1);
    }

    #[test]
    fn test_rook_attacks_empty_board() {
        assert_eq!(rook_attacks(Square::new(3, 3), 0).count_ones(), 14);
    }

    #[test]
    fn test_rook_attacks_stop_at_blocker() {
        let from = Square::new(0, 0);
        let blocker = Square::new(0, 3);
        let attacks = rook_attacks(from, blocker.bit());
        // The blocker square itself is attacked, squares behind it are not.
        assert_ne!(attacks & blocker.bit(), 0);
        assert_eq!(attacks & Square::new(0, 4).bit(), 0);
        assert_ne!(attacks & Square::new(7, 0).bit(), 0);
    }

    #[test]
    fn test_bishop_attacks_blocked_both_ways() {
        let from = Square::new(3, 3);
        let occupied = Square::new(5, 5).bit() | Square::new(1, 1).bit();
        let attacks = bishop_attacks(from, occupied);
        assert_ne!(attacks & Square::new(5, 5).bit(), 0);
        assert_eq!(attacks & Square::new(6, 6).bit(), 0);
        assert_ne!(attacks & Square::new(1, 1).bit(), 0);
        assert_eq!(attacks & Square::new(0, 0).bit(), 0);
    }

    #[test]
    fn test_queen_combines_lines() {
        let queen = queen_attacks(Square::new(3, 3), 0);
        let rook = rook_attacks(Square::new(3, 3), 0);
        let bishop = bishop_attacks(Square::new(3, 3), 0);
        assert_eq!(queen, rook | bishop);
        assert_eq!(queen.count_ones(), 27);
    }
}
