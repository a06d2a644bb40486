// SPDX-License-Identifier: GPL-3.0-or-later

use crate::types::*;

macro_rules! S { ($x:expr, $y:expr) => (Score(($y << 16) + $x)) }

// BONUS[PieceType-2][Rank][File/2] contains piece-square bonuses for the
// non-pawn pieces. The file dimension is folded: the board is symmetric
// along the d/e boundary, so only half of it is stored.
const BONUS: [[[Score; 4]; 8]; 5] = [
    [ // Knight
        [ S!(-169,-105), S!(-96,-74), S!(-80,-46), S!(-79,-18) ],
        [ S!( -79, -70), S!(-39,-56), S!(-24,-15), S!( -9,  6) ],
        [ S!( -64, -38), S!(-20,-33), S!(  4, -5), S!( 19, 27) ],
        [ S!( -28, -36), S!(  5,  0), S!( 41, 13), S!( 47, 34) ],
        [ S!( -29, -41), S!( 13,-20), S!( 42,  4), S!( 52, 35) ],
        [ S!( -11, -51), S!( 28,-38), S!( 63,-17), S!( 55, 19) ],
        [ S!( -67, -64), S!(-21,-45), S!(  6,-37), S!( 37, 16) ],
        [ S!(-200, -98), S!(-80,-89), S!(-53,-53), S!(-32,-16) ],
    ],
    [ // Bishop
        [ S!(-44,-63), S!( -4,-30), S!(-11,-35), S!(-28, -8) ],
        [ S!(-18,-38), S!(  7,-13), S!( 14,-14), S!(  3,  0) ],
        [ S!( -8,-18), S!( 24,  0), S!( -3, -7), S!( 15, 13) ],
        [ S!(  1,-26), S!(  8, -3), S!( 26,  1), S!( 37, 16) ],
        [ S!( -7,-24), S!( 30, -6), S!( 23,-10), S!( 28, 17) ],
        [ S!(-17,-26), S!(  4,  2), S!( -1,  1), S!(  8, 16) ],
        [ S!(-21,-34), S!(-19,-18), S!( 10, -7), S!( -6,  9) ],
        [ S!(-48,-51), S!( -3,-40), S!(-12,-39), S!(-25,-20) ],
    ],
    [ // Rook
        [ S!(-24, -2), S!(-13,-6), S!( -7, -3), S!( 2,-2) ],
        [ S!(-18,-10), S!(-10,-7), S!( -5,  1), S!( 9, 0) ],
        [ S!(-21, 10), S!( -7,-4), S!(  3,  2), S!(-1,-2) ],
        [ S!(-13, -5), S!( -5, 2), S!( -4, -8), S!(-6, 8) ],
        [ S!(-24, -8), S!(-12, 5), S!( -1,  4), S!( 6,-9) ],
        [ S!(-24,  3), S!( -4,-2), S!(  4,-10), S!(10, 7) ],
        [ S!( -8,  1), S!(  6, 2), S!( 10, 17), S!(12,-8) ],
        [ S!(-22, 12), S!(-24,-6), S!( -6, 13), S!( 4, 7) ],
    ],
    [ // Queen
        [ S!( 3,-69), S!(-5,-57), S!(-5,-47), S!( 4,-26) ],
        [ S!(-3,-55), S!( 5,-31), S!( 8,-22), S!(12, -4) ],
        [ S!(-3,-39), S!( 6,-18), S!(13, -9), S!( 7,  3) ],
        [ S!( 4,-23), S!( 5, -3), S!( 9, 13), S!( 8, 24) ],
        [ S!( 0,-29), S!(14, -6), S!(12,  9), S!( 5, 21) ],
        [ S!(-4,-38), S!(10,-18), S!( 6,-12), S!( 8,  1) ],
        [ S!(-5,-50), S!( 6,-27), S!(10,-24), S!( 8, -8) ],
        [ S!(-2,-75), S!(-2,-52), S!( 1,-43), S!(-2,-36) ],
    ],
    [ // King
        [ S!(272,  0), S!(325, 41), S!(273, 80), S!(190, 93) ],
        [ S!(277, 57), S!(305, 98), S!(241,138), S!(183,131) ],
        [ S!(198, 86), S!(253,138), S!(168,165), S!(120,173) ],
        [ S!(169,103), S!(191,152), S!(136,168), S!(108,169) ],
        [ S!(145, 98), S!(176,166), S!(112,197), S!( 69,194) ],
        [ S!(122, 87), S!(159,164), S!( 85,174), S!( 36,189) ],
        [ S!( 87, 40), S!(120, 99), S!( 64,128), S!( 25,141) ],
        [ S!( 64,  5), S!( 87, 60), S!( 49, 75), S!(  0, 75) ],
    ],
];

// PBONUS[Rank][File] contains the full pawn table; pawn structure is not
// symmetric between the wings.
const PBONUS: [[Score; 8]; 8] = [
    [ S!(  0,  0), S!(  0,  0), S!(  0,  0), S!( 0,  0),
      S!( 0,  0), S!(  0,  0), S!(  0,  0), S!(  0,  0) ],
    [ S!(  0,-10), S!( -5, -3), S!( 10,  7), S!(13, -1),
      S!(21,  7), S!( 17,  6), S!(  6,  1), S!( -3,-20) ],
    [ S!(-11, -6), S!(-10, -6), S!( 15, -1), S!(22, -1),
      S!(26, -1), S!( 28,  2), S!(  4, -2), S!(-24, -5) ],
    [ S!( -9,  4), S!(-18, -5), S!(  8, -4), S!(22, -5),
      S!(33, -6), S!( 25,-13), S!( -4, -3), S!(-16, -7) ],
    [ S!(  6, 18), S!( -3,  2), S!(-10,  2), S!( 1, -9),
      S!(12,-13), S!(  6, -8), S!(-12, 11), S!(  1,  9) ],
    [ S!( -6, 25), S!( -8, 17), S!(  5, 19), S!(11, 29),
      S!(-14, 29), S!(  0,  8), S!(-12,  4), S!(-14, 12) ],
    [ S!(-10, -1), S!(  6, -6), S!( -5, 18), S!(-11, 22),
      S!( -2, 22), S!(-14, 17), S!( 12,  2), S!( -1,  9) ],
    [ S!(  0,  0), S!(  0,  0), S!(  0,  0), S!( 0,  0),
      S!( 0,  0), S!(  0,  0), S!(  0,  0), S!(  0,  0) ],
];

static mut PSQ: [[Score; 64]; 16] = [[Score::ZERO; 64]; 16];

pub fn psq(pc: Piece, s: Square) -> Score {
    unsafe { PSQ[pc.0 as usize][s.0 as usize] }
}

// init() computes the full piece-square tables by adding the piece values
// to the bonuses. The white tables are mirrored for black.

pub fn init() {
    for pt in 1..7 {
        let pc = Piece::make(WHITE, PieceType(pt));
        let v = Score::make(piece_value(MG, pc).0, piece_value(EG, pc).0);

        for s in Square::A1.take(64) {
            let f = std::cmp::min(s.file(), FILE_H - s.file());
            let bonus = if PieceType(pt) == PAWN {
                PBONUS[s.rank() as usize][s.file() as usize]
            } else {
                BONUS[(pt - 2) as usize][s.rank() as usize][f as usize]
            };
            unsafe {
                PSQ[pc.0 as usize][s.0 as usize] = v + bonus;
                PSQ[(!pc).0 as usize][(!s).0 as usize] =
                    -PSQ[pc.0 as usize][s.0 as usize];
            }
        }
    }
}
