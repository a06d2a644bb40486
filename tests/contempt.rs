// SPDX-License-Identifier: GPL-3.0-or-later

// Contempt is process-global, so this test lives in its own binary and
// does not race against the other evaluation tests.

use varifish::evaluate::{evaluate, set_contempt};
use varifish::position::Position;
use varifish::types::*;

#[test]
fn contempt_shifts_the_evaluation() {
    varifish::init();

    let pos = Position::from_fen(
        "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 0 4",
        Variant::Chess);
    let base = evaluate(&pos);

    set_contempt(Score::make(30, 15));
    let shifted = evaluate(&pos);
    set_contempt(Score::ZERO);

    assert!(shifted > base, "contempt ignored: {} vs {}",
        shifted.0, base.0);
}
