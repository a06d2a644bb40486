// SPDX-License-Identifier: GPL-3.0-or-later

use crate::bitboard::*;
use crate::types::*;

// There are 24 possible pawn squares: the first 4 files and ranks 2 to 7
const MAX_INDEX: usize = 2 * 24 * 64 * 64;

// Each u32 stores results of 32 positions, one per bit
static mut KPK_BITBASE: [u32; MAX_INDEX / 32] = [0; MAX_INDEX / 32];

// A KPK bitbase index is an integer in the [0, MAX_INDEX] range:
//
// bit  0- 5: white king square
// bit  6-11: black king square
// bit    12: side to move
// bit 13-14: white pawn file (FILE_A to FILE_D)
// bit 15-17: white pawn RANK_7 - rank
fn index(us: Color, bksq: Square, wksq: Square, psq: Square) -> usize {
    (wksq.0 | (bksq.0 << 6) | (us.0 << 12) | (psq.file() << 13)
        | ((RANK_7 - psq.rank()) << 15)) as usize
}

const INVALID: u8 = 0;
const UNKNOWN: u8 = 1;
const DRAW: u8 = 2;
const WIN: u8 = 4;

struct KPKPosition {
    us: Color,
    ksq: [Square; 2],
    psq: Square,
    result: u8,
}

impl KPKPosition {
    fn new(idx: u32) -> KPKPosition {
        let ksq = [Square(idx & 0x3f), Square((idx >> 6) & 0x3f)];
        let us = Color((idx >> 12) & 0x01);
        let psq =
            Square::make((idx >> 13) & 0x03, RANK_7 - ((idx >> 15) & 0x07));

        let wksq = ksq[WHITE.0 as usize];
        let bksq = ksq[BLACK.0 as usize];

        // Overlapping pieces or a capturable king invalidate the index
        let result = if Square::distance(wksq, bksq) <= 1
            || wksq == psq
            || bksq == psq
            || (us == WHITE && pawn_attacks(WHITE, psq) & bksq != 0)
        {
            INVALID
        }
        // Immediate win if the pawn can be promoted without getting captured
        else if us == WHITE
            && psq.rank() == RANK_7
            && wksq != psq + NORTH
            && (Square::distance(bksq, psq + NORTH) > 1
                || pseudo_attacks(KING, wksq) & (psq + NORTH) != 0)
        {
            WIN
        }
        // Immediate draw if it is a stalemate or the king captures an
        // undefended pawn
        else if us == BLACK
            && ((pseudo_attacks(KING, bksq)
                    & !(pseudo_attacks(KING, wksq) | pawn_attacks(WHITE, psq)))
                    == 0
                || pseudo_attacks(KING, bksq) & psq
                    & !pseudo_attacks(KING, wksq) != 0)
        {
            DRAW
        }
        // Position will be classified later
        else {
            UNKNOWN
        };

        KPKPosition { us, ksq, psq, result }
    }

    // White to move: WIN if any move leads to WIN, DRAW if all moves lead
    // to DRAW, otherwise UNKNOWN. Black to move: the dual.
    fn classify(&self, db: &Vec<KPKPosition>) -> u8 {
        let us = self.us;
        let psq = self.psq;

        let them = !us;
        let good = if us == WHITE { WIN } else { DRAW };
        let bad = if us == WHITE { DRAW } else { WIN };

        let mut r = INVALID;

        for s in pseudo_attacks(KING, self.ksq[us.0 as usize]) {
            r |= if us == WHITE {
                db[index(them, self.ksq[them.0 as usize], s, psq)].result
            } else {
                db[index(them, s, self.ksq[them.0 as usize], psq)].result
            };
        }

        if us == WHITE {
            if psq.rank() < RANK_7 {
                r |= db[index(them, self.ksq[them.0 as usize],
                        self.ksq[us.0 as usize], psq + NORTH)].result;
            }

            if psq.rank() == RANK_2
                && psq + NORTH != self.ksq[us.0 as usize]
                && psq + NORTH != self.ksq[them.0 as usize]
            {
                r |= db[index(them, self.ksq[them.0 as usize],
                        self.ksq[us.0 as usize], psq + 2 * NORTH)].result;
            }
        }

        if r & good != 0 {
            good
        } else if r & UNKNOWN != 0 {
            UNKNOWN
        } else {
            bad
        }
    }
}

// init() computes the whole KPK bitbase at startup by retrograde analysis:
// keep reclassifying unknown positions until a fixpoint is reached (15
// cycles are needed).

pub fn init() {
    let mut db: Vec<KPKPosition> = Vec::with_capacity(MAX_INDEX);

    for idx in 0..MAX_INDEX {
        db.push(KPKPosition::new(idx as u32));
    }

    let mut repeat = true;

    while repeat {
        repeat = false;
        for idx in 0..MAX_INDEX {
            if db[idx].result == UNKNOWN {
                let result = db[idx].classify(&db);
                if result != UNKNOWN {
                    db[idx].result = result;
                    repeat = true;
                }
            }
        }
    }

    // Pack 32 results into each KPK_BITBASE[] entry
    for idx in 0..MAX_INDEX {
        if db[idx].result == WIN {
            unsafe {
                KPK_BITBASE[idx / 32] |= 1u32 << (idx & 0x1f);
            }
        }
    }
}

pub fn probe(wksq: Square, wpsq: Square, bksq: Square, us: Color) -> bool {
    debug_assert!(wpsq.file() <= FILE_D);

    let idx = index(us, bksq, wksq, wpsq);
    unsafe { KPK_BITBASE[idx / 32] & (1 << (idx & 0x1f)) != 0 }
}
