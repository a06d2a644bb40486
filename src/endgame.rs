// SPDX-License-Identifier: GPL-3.0-or-later

use crate::bitbases;
use crate::bitboard::*;
use crate::position::zobrist;
use crate::position::Position;
use crate::types::*;

use std;

pub type EvalFn = fn(&Position, Color) -> Value;
pub type ScaleFn = fn(&Position, Color) -> ScaleFactor;

struct EvalInit {
    func: EvalFn,
    code: &'static str,
}

const EVAL_INITS: [EvalInit; 5] = [
    EvalInit { func: evaluate_kpk,  code: "KPk"  },
    EvalInit { func: evaluate_knnk, code: "KNNk" },
    EvalInit { func: evaluate_krkb, code: "KRkb" },
    EvalInit { func: evaluate_krkn, code: "KRkn" },
    EvalInit { func: evaluate_kqkr, code: "KQkr" },
];

struct ScaleInit {
    func: ScaleFn,
    code: &'static str,
}

const SCALE_INITS: [ScaleInit; 1] = [
    ScaleInit { func: scale_kbpkb, code: "KBPkb" },
];

#[derive(Clone, Copy)]
pub struct EvalEntry {
    pub func: EvalFn,
    pub key: [Key; 2],
}

#[derive(Clone, Copy)]
pub struct ScaleEntry {
    pub func: ScaleFn,
    pub key: [Key; 2],
}

pub static mut EVAL_FNS: [EvalEntry; 5] =
    [EvalEntry { func: evaluate_kpk, key: [Key(0); 2] }; 5];

pub static mut SCALE_FNS: [ScaleEntry; 1] =
    [ScaleEntry { func: scale_kbpkb, key: [Key(0); 2] }; 1];

// Table used to drive the king towards the edge of the board in KX vs K
// and KQ vs KR endgames.
const PUSH_TO_EDGES: [i32; 64] = [
    100, 90, 80, 70, 70, 80, 90, 100,
     90, 70, 60, 50, 50, 60, 70,  90,
     80, 60, 40, 30, 30, 40, 60,  80,
     70, 50, 30, 20, 20, 30, 50,  70,
     70, 50, 30, 20, 20, 30, 50,  70,
     80, 60, 40, 30, 30, 40, 60,  80,
     90, 70, 60, 50, 50, 60, 70,  90,
    100, 90, 80, 70, 70, 80, 90, 100,
];

// Tables used to drive a piece towards or away from another piece
const PUSH_CLOSE: [i32; 8] = [0, 0, 100, 80, 60, 40, 20, 10];
const PUSH_AWAY: [i32; 8] = [0, 5, 20, 40, 60, 80, 90, 100];

fn calc_key(code: &str, c: Color) -> Key {
    let mut cnt: [i32; 16] = [0; 16];
    let mut key = Key(0);

    for ch in code.chars() {
        let mut pc = Piece(Position::PIECE_TO_CHAR.find(ch).unwrap() as u32);
        if c == BLACK {
            pc = !pc;
        }
        key ^= zobrist::material(pc, cnt[pc.0 as usize]);
        cnt[pc.0 as usize] += 1;
    }

    key
}

pub fn init() {
    for i in 0..EVAL_INITS.len() {
        let ei = &EVAL_INITS[i];
        unsafe {
            EVAL_FNS[i].func = ei.func;
            EVAL_FNS[i].key[WHITE.0 as usize] = calc_key(ei.code, WHITE);
            EVAL_FNS[i].key[BLACK.0 as usize] = calc_key(ei.code, BLACK);
        }
    }

    for i in 0..SCALE_INITS.len() {
        let si = &SCALE_INITS[i];
        unsafe {
            SCALE_FNS[i].func = si.func;
            SCALE_FNS[i].key[WHITE.0 as usize] = calc_key(si.code, WHITE);
            SCALE_FNS[i].key[BLACK.0 as usize] = calc_key(si.code, BLACK);
        }
    }
}

fn verify_material(
    pos: &Position, c: Color, npm: Value, pawns_cnt: i32
) -> bool {
    pos.non_pawn_material_c(c) == npm && pos.count(c, PAWN) == pawns_cnt
}

// Map the square as if strong_side were white and strong_side's only pawn
// were on the left half of the board.
fn normalize(pos: &Position, strong_side: Color, mut sq: Square) -> Square {
    debug_assert!(pos.count(strong_side, PAWN) == 1);

    if pos.square(strong_side, PAWN).file() >= FILE_E {
        sq = Square(sq.0 ^ 7);
    }

    if strong_side == BLACK {
        sq = !sq;
    }

    sq
}

// The weak side has a lone king; report whether it has any legal move.
// This replaces a full legal move generation, which does not exist at this
// layer.
fn lone_king_can_move(pos: &Position, weak_side: Color) -> bool {
    let ksq = pos.square(weak_side, KING);
    let occ = pos.pieces() ^ ksq;

    for to in pseudo_attacks(KING, ksq) & !pos.pieces_c(weak_side) {
        if pos.attackers_to_occ(to, occ) & pos.pieces_c(!weak_side) == 0 {
            return true;
        }
    }
    false
}

// Mate with KX vs K. Gives the attacking side a bonus for driving the
// defending king towards the edge of the board and for keeping the
// distance between the two kings small.
pub fn evaluate_kxk(pos: &Position, strong_side: Color) -> Value {
    let weak_side = !strong_side;

    debug_assert!(verify_material(pos, weak_side, Value::ZERO, 0));
    debug_assert!(pos.checkers() == 0);

    // Stalemate detection with lone king
    if pos.side_to_move() == weak_side && !lone_king_can_move(pos, weak_side) {
        return Value::DRAW;
    }

    let winner_ksq = pos.square(strong_side, KING);
    let loser_ksq = pos.square(weak_side, KING);

    let mut result = pos.non_pawn_material_c(strong_side)
        + pos.count(strong_side, PAWN) * PawnValueEg
        + PUSH_TO_EDGES[loser_ksq.0 as usize]
        + PUSH_CLOSE[Square::distance(winner_ksq, loser_ksq) as usize];

    if pos.pieces_pp(QUEEN, ROOK) != 0
        || (pos.pieces_p(BISHOP) != 0 && pos.pieces_p(KNIGHT) != 0)
        || (pos.pieces_p(BISHOP) & !DARK_SQUARES != 0
            && pos.pieces_p(BISHOP) & DARK_SQUARES != 0)
    {
        result = std::cmp::min(result + Value::KNOWN_WIN, Value::MATE - 1);
    }

    if strong_side == pos.side_to_move() { result } else { -result }
}

// KP vs K, evaluated with the help of the bitbase.
fn evaluate_kpk(pos: &Position, strong_side: Color) -> Value {
    let weak_side = !strong_side;

    debug_assert!(verify_material(pos, strong_side, Value::ZERO, 1));
    debug_assert!(verify_material(pos, weak_side, Value::ZERO, 0));

    // Assume strong_side is white and the pawn is on files A-D
    let wksq = normalize(pos, strong_side, pos.square(strong_side, KING));
    let bksq = normalize(pos, strong_side, pos.square(weak_side, KING));
    let psq = normalize(pos, strong_side, pos.square(strong_side, PAWN));

    let us = if strong_side == pos.side_to_move() { WHITE } else { BLACK };

    if !bitbases::probe(wksq, psq, bksq, us) {
        return Value::DRAW;
    }

    let result = Value::KNOWN_WIN + PawnValueEg + Value(psq.rank() as i32);

    if strong_side == pos.side_to_move() { result } else { -result }
}

// Two knights cannot force mate
fn evaluate_knnk(_pos: &Position, _strong_side: Color) -> Value {
    Value::DRAW
}

// KR vs KB is a draw in practice; the score grows slightly when the
// defending king is close to the edge.
fn evaluate_krkb(pos: &Position, strong_side: Color) -> Value {
    let weak_side = !strong_side;

    debug_assert!(verify_material(pos, strong_side, RookValueMg, 0));
    debug_assert!(verify_material(pos, weak_side, BishopValueMg, 0));

    let result = Value(PUSH_TO_EDGES[pos.square(weak_side, KING).0 as usize]);

    if strong_side == pos.side_to_move() { result } else { -result }
}

// KR vs KN: slightly better winning chances than against a bishop,
// particularly when the king and the knight are far apart.
fn evaluate_krkn(pos: &Position, strong_side: Color) -> Value {
    let weak_side = !strong_side;

    debug_assert!(verify_material(pos, strong_side, RookValueMg, 0));
    debug_assert!(verify_material(pos, weak_side, KnightValueMg, 0));

    let bksq = pos.square(weak_side, KING);
    let bnsq = pos.square(weak_side, KNIGHT);
    let result = Value(PUSH_TO_EDGES[bksq.0 as usize]
        + PUSH_AWAY[Square::distance(bksq, bnsq) as usize]);

    if strong_side == pos.side_to_move() { result } else { -result }
}

// KQ vs KR: drive the defending king towards the edge with the kings close
// together; usually sufficient to win.
fn evaluate_kqkr(pos: &Position, strong_side: Color) -> Value {
    let weak_side = !strong_side;

    debug_assert!(verify_material(pos, strong_side, QueenValueMg, 0));
    debug_assert!(verify_material(pos, weak_side, RookValueMg, 0));

    let winner_ksq = pos.square(strong_side, KING);
    let loser_ksq = pos.square(weak_side, KING);

    let result = QueenValueEg - RookValueEg
        + PUSH_TO_EDGES[loser_ksq.0 as usize]
        + PUSH_CLOSE[Square::distance(winner_ksq, loser_ksq) as usize];

    if strong_side == pos.side_to_move() { result } else { -result }
}

// KB and one or more pawns vs K: detects draws with rook pawns and a
// bishop of the wrong color.
pub fn scale_kbpsk(pos: &Position, strong_side: Color) -> ScaleFactor {
    let weak_side = !strong_side;

    debug_assert!(pos.non_pawn_material_c(strong_side) == BishopValueMg);
    debug_assert!(pos.count(strong_side, PAWN) >= 1);

    let pawns = pos.pieces_cp(strong_side, PAWN);
    let pawns_file = lsb(pawns).file();

    // All pawns on a single rook file?
    if (pawns_file == FILE_A || pawns_file == FILE_H)
        && pawns & !file_bb(pawns_file) == 0
    {
        let bishop_sq = pos.square(strong_side, BISHOP);
        let queening_sq =
            Square::make(pawns_file, RANK_8).relative(strong_side);
        let king_sq = pos.square(weak_side, KING);

        if opposite_colors(queening_sq, bishop_sq)
            && Square::distance(queening_sq, king_sq) <= 1
        {
            return ScaleFactor::DRAW;
        }
    }

    // All pawns on the same B or G file blocked on the 7th rank is
    // potentially a draw as well
    if (pawns_file == FILE_B || pawns_file == FILE_G)
        && pos.pieces_p(PAWN) & !file_bb(pawns_file) == 0
        && pos.non_pawn_material_c(weak_side) == Value::ZERO
        && pos.count(weak_side, PAWN) >= 1
    {
        let weak_pawn_sq =
            backmost_sq(weak_side, pos.pieces_cp(weak_side, PAWN));

        let strong_king_sq = pos.square(strong_side, KING);
        let weak_king_sq = pos.square(weak_side, KING);
        let bishop_sq = pos.square(strong_side, BISHOP);

        if weak_pawn_sq.relative_rank(strong_side) == RANK_7
            && pos.pieces_cp(strong_side, PAWN)
                & (weak_pawn_sq + pawn_push(weak_side)) != 0
            && (opposite_colors(bishop_sq, weak_pawn_sq)
                || pos.count(strong_side, PAWN) == 1)
        {
            let strong_king_dist =
                Square::distance(weak_pawn_sq, strong_king_sq);
            let weak_king_dist = Square::distance(weak_pawn_sq, weak_king_sq);

            if weak_king_sq.relative_rank(strong_side) >= RANK_7
                && weak_king_dist <= 2
                && weak_king_dist <= strong_king_dist
            {
                return ScaleFactor::DRAW;
            }
        }
    }

    ScaleFactor::NONE
}

// KQ vs KR and one or more pawns: fortress draws with a rook on the third
// rank defended by a pawn.
pub fn scale_kqkrps(pos: &Position, strong_side: Color) -> ScaleFactor {
    let weak_side = !strong_side;

    debug_assert!(verify_material(pos, strong_side, QueenValueMg, 0));
    debug_assert!(pos.count(weak_side, ROOK) == 1);
    debug_assert!(pos.count(weak_side, PAWN) >= 1);

    let king_sq = pos.square(weak_side, KING);
    let rsq = pos.square(weak_side, ROOK);

    if king_sq.relative_rank(weak_side) <= RANK_2
        && pos.square(strong_side, KING).relative_rank(weak_side) >= RANK_4
        && rsq.relative_rank(weak_side) == RANK_3
        && pos.pieces_cp(weak_side, PAWN)
            & pos.attacks_from(KING, king_sq)
            & pos.attacks_from_pawn(rsq, strong_side) != 0
    {
        return ScaleFactor::DRAW;
    }

    ScaleFactor::NONE
}

// KBP vs KB: a draw when the defending king blocks the pawn on the wrong
// bishop color, or with opposite-colored bishops and a short pawn.
fn scale_kbpkb(pos: &Position, strong_side: Color) -> ScaleFactor {
    let weak_side = !strong_side;

    debug_assert!(verify_material(pos, strong_side, BishopValueMg, 1));
    debug_assert!(verify_material(pos, weak_side, BishopValueMg, 0));

    let psq = pos.square(strong_side, PAWN);
    let sbsq = pos.square(strong_side, BISHOP);
    let wbsq = pos.square(weak_side, BISHOP);
    let wksq = pos.square(weak_side, KING);

    // Case 1: defending king blocks the pawn and cannot be driven away
    if wksq.file() == psq.file()
        && psq.relative_rank(strong_side) < wksq.relative_rank(strong_side)
        && (opposite_colors(wksq, sbsq)
            || wksq.relative_rank(strong_side) <= RANK_6)
    {
        return ScaleFactor::DRAW;
    }

    // Case 2: opposite colored bishops
    if opposite_colors(sbsq, wbsq) {
        if psq.relative_rank(strong_side) <= RANK_5 {
            return ScaleFactor::DRAW;
        }

        let path = forward_file_bb(strong_side, psq);

        if path & pos.pieces_cp(weak_side, KING) != 0 {
            return ScaleFactor::DRAW;
        }

        if pos.attacks_from(BISHOP, wbsq) & path != 0
            && Square::distance(wbsq, psq) >= 3
        {
            return ScaleFactor::DRAW;
        }
    }

    ScaleFactor::NONE
}

// K and two or more pawns vs K: a draw when all the pawns are on a single
// rook file and blockaded by the defending king.
pub fn scale_kpsk(pos: &Position, strong_side: Color) -> ScaleFactor {
    let weak_side = !strong_side;

    debug_assert!(pos.non_pawn_material_c(strong_side) == Value::ZERO);
    debug_assert!(pos.count(strong_side, PAWN) >= 2);
    debug_assert!(verify_material(pos, weak_side, Value::ZERO, 0));

    let ksq = pos.square(weak_side, KING);
    let pawns = pos.pieces_cp(strong_side, PAWN);

    if pawns & !forward_ranks_bb(weak_side, ksq) == 0
        && !(pawns & !FILEA_BB != 0 && pawns & !FILEH_BB != 0)
        && File::distance(ksq.file(), lsb(pawns).file()) <= 1
    {
        return ScaleFactor::DRAW;
    }

    ScaleFactor::NONE
}

// KP vs KP: probe the bitbase with the weaker side's pawn removed. If that
// is a draw, having the pawn cannot hurt.
pub fn scale_kpkp(pos: &Position, strong_side: Color) -> ScaleFactor {
    let weak_side = !strong_side;

    debug_assert!(verify_material(pos, strong_side, Value::ZERO, 1));
    debug_assert!(verify_material(pos, weak_side, Value::ZERO, 1));

    // Assume strong_side is white and the pawn is on files A-D
    let wksq = normalize(pos, strong_side, pos.square(strong_side, KING));
    let bksq = normalize(pos, strong_side, pos.square(weak_side, KING));
    let psq = normalize(pos, strong_side, pos.square(strong_side, PAWN));

    let us = if strong_side == pos.side_to_move() { WHITE } else { BLACK };

    // A pawn on the fifth rank or beyond which is not a rook pawn is too
    // dangerous to assume a draw
    if psq.rank() >= RANK_5 && psq.file() != FILE_A {
        return ScaleFactor::NONE;
    }

    if bitbases::probe(wksq, psq, bksq, us) {
        ScaleFactor::NONE
    } else {
        ScaleFactor::DRAW
    }
}
