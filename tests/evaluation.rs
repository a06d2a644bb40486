// SPDX-License-Identifier: GPL-3.0-or-later

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use varifish::evaluate::{evaluate, trace, TEMPO};
use varifish::position::Position;
use varifish::types::*;

const STARTPOS: &str =
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
const ITALIAN: &str =
    "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 0 4";
const KIWIPETE: &str =
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

fn swap_case(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii_uppercase() {
                c.to_ascii_lowercase()
            } else {
                c.to_ascii_uppercase()
            }
        })
        .collect()
}

// Mirror a FEN vertically and swap the colors of everything. The mirrored
// position is the same game seen from the other side of the board.
fn mirror_fen(fen: &str) -> String {
    let parts: Vec<&str> = fen.split_whitespace().collect();

    let board = parts[0]
        .split('/')
        .rev()
        .map(swap_case)
        .collect::<Vec<_>>()
        .join("/");

    let stm = if parts[1] == "w" { "b" } else { "w" };

    let castling = if parts[2] == "-" {
        "-".to_string()
    } else {
        swap_case(parts[2])
    };

    let ep = if parts[3] == "-" {
        "-".to_string()
    } else {
        let mut it = parts[3].chars();
        let file = it.next().unwrap();
        let rank = if it.next().unwrap() == '3' { '6' } else { '3' };
        format!("{}{}", file, rank)
    };

    let mut out = format!("{} {} {} {}", board, stm, castling, ep);
    for p in &parts[4..] {
        out.push(' ');
        out.push_str(p);
    }
    out
}

fn eval_fen(fen: &str, variant: Variant) -> Value {
    let pos = Position::from_fen(fen, variant);
    evaluate(&pos)
}

#[test]
fn startpos_evaluates_to_tempo() {
    varifish::init();

    // The start position is symmetric, so only the tempo remains
    assert_eq!(eval_fen(STARTPOS, Variant::Chess), TEMPO[0]);
}

#[test]
fn mirrored_positions_evaluate_equally() {
    varifish::init();

    let fens = [
        STARTPOS,
        ITALIAN,
        KIWIPETE,
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "r4rk1/1pp1qppp/p1np1n2/2b1p1b1/2B1P1B1/P1NP1N2/1PP1QPPP/R4RK1 b - - 0 10",
        "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1",
        "8/8/8/8/4p3/5k2/8/4K3 b - - 0 1",
    ];

    for &fen in fens.iter() {
        let v1 = eval_fen(fen, Variant::Chess);
        let v2 = eval_fen(&mirror_fen(fen), Variant::Chess);
        assert_eq!(v1, v2, "asymmetric evaluation for {}", fen);
    }
}

#[test]
fn mirrored_random_positions_evaluate_equally() {
    varifish::init();

    let mut rng = StdRng::seed_from_u64(20180623);
    let mut tested = 0;

    while tested < 200 {
        let mut board = [' '; 64];

        let wk: i32 = rng.gen_range(0..64);
        let bk: i32 = loop {
            let s: i32 = rng.gen_range(0..64);
            let fd = (s % 8 - wk % 8).abs();
            let rd = (s / 8 - wk / 8).abs();
            if fd.max(rd) > 1 {
                break s;
            }
        };
        board[wk as usize] = 'K';
        board[bk as usize] = 'k';

        const PIECES: [char; 10] =
            ['P', 'N', 'B', 'R', 'Q', 'p', 'n', 'b', 'r', 'q'];

        for _ in 0..rng.gen_range(0..12) {
            let s: usize = rng.gen_range(0..64);
            if board[s] != ' ' {
                continue;
            }
            let pc = PIECES[rng.gen_range(0..PIECES.len())];
            if (pc == 'P' || pc == 'p') && (s < 8 || s >= 56) {
                continue;
            }
            board[s] = pc;
        }

        let mut body = String::new();
        for r in (0..8).rev() {
            let mut empty = 0;
            for f in 0..8 {
                let c = board[r * 8 + f];
                if c == ' ' {
                    empty += 1;
                } else {
                    if empty > 0 {
                        body.push_str(&empty.to_string());
                        empty = 0;
                    }
                    body.push(c);
                }
            }
            if empty > 0 {
                body.push_str(&empty.to_string());
            }
            if r > 0 {
                body.push('/');
            }
        }
        let stm = if rng.gen_bool(0.5) { 'w' } else { 'b' };
        let fen = format!("{} {} - - 0 1", body, stm);

        // The evaluator requires the side to move not to be in check
        let pos = Position::from_fen(&fen, Variant::Chess);
        if pos.checkers() != 0 {
            continue;
        }

        let v1 = evaluate(&pos);
        let v2 = eval_fen(&mirror_fen(&fen), Variant::Chess);
        assert_eq!(v1, v2, "asymmetric evaluation for {}", fen);
        tested += 1;
    }
}

#[test]
fn kpk_uses_the_specialized_endgame() {
    varifish::init();

    // A won king and pawn ending is worth far more than the pawn itself
    let v = eval_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1", Variant::Chess);
    assert!(v > Value(5000), "KPK win undervalued: {}", v.0);

    // The runaway rook pawn promotes before anyone can interfere
    let v = eval_fen("8/P7/8/8/8/8/8/k6K w - - 0 1", Variant::Chess);
    assert!(v > Value(5000), "running passer undervalued: {}", v.0);

    // The defender holds the rook-pawn corner draw
    let v = eval_fen("k7/P7/K7/8/8/8/8/8 w - - 0 1", Variant::Chess);
    assert!(v.abs() <= Value(50), "drawn KPK overvalued: {}", v.0);
}

#[test]
fn bare_kings_are_dead_drawn() {
    varifish::init();

    let v = eval_fen("8/8/8/3k4/8/3K4/8/8 w - - 0 1", Variant::Chess);
    assert_eq!(v, TEMPO[0]);
}

#[test]
fn opposite_bishops_scale_towards_a_draw() {
    varifish::init();

    let v = eval_fen("8/8/4b3/8/6k1/1P6/1B3K2/8 w - - 0 1", Variant::Chess);
    assert!(v.abs() < Value(60), "drawish ending overvalued: {}", v.0);
}

#[test]
fn development_counts() {
    varifish::init();

    // White is developed and to move; the score must be positive
    let v = eval_fen(ITALIAN, Variant::Chess);
    assert!(v > Value::ZERO, "Italian not positive: {}", v.0);
}

#[test]
fn passed_pawns_grow_with_their_rank() {
    varifish::init();

    let far = eval_fen("8/P6r/8/8/8/8/6k1/K6R w - - 0 1", Variant::Chess);
    let near = eval_fen("8/7r/8/8/P7/8/6k1/K6R w - - 0 1", Variant::Chess);

    assert!(far > near, "a7 passer ({}) not above a4 passer ({})",
        far.0, near.0);
    assert!(far > Value(100), "7th rank passer undervalued: {}", far.0);
}

#[test]
fn lazy_threshold_keeps_lopsided_scores_large() {
    varifish::init();

    let v = eval_fen("QQQQ4/8/8/8/8/3kn3/8/K7 w - - 0 1", Variant::Chess);
    assert!(v > Value(1500), "four extra queens score too low: {}", v.0);
}

#[test]
fn three_check_rewards_checks_already_given() {
    varifish::init();

    let none = eval_fen(
        "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 3+3 0 4",
        Variant::ThreeCheck);
    let two = eval_fen(
        "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 1+3 0 4",
        Variant::ThreeCheck);

    assert!(two > none + Value(1000),
        "two delivered checks not rewarded: {} vs {}", two.0, none.0);
}

#[test]
fn crazyhouse_holdings_feed_king_danger() {
    varifish::init();

    // The black bishop on c5 eyes f2, so the white king ring is attacked
    // and the king safety machinery runs
    let quiet = eval_fen(
        "r1bq1rk1/ppp2ppp/2np1n2/2b1p3/2B1P3/2NP1N2/PPP2PPP/R1BQ1RK1[] w - - 0 8",
        Variant::Crazyhouse);
    let armed = eval_fen(
        "r1bq1rk1/ppp2ppp/2np1n2/2b1p3/2B1P3/2NP1N2/PPP2PPP/R1BQ1RK1[q] w - - 0 8",
        Variant::Crazyhouse);

    assert!(armed < quiet,
        "a queen in the black hand should hurt white: {} vs {}",
        armed.0, quiet.0);
}

#[test]
fn variant_terminal_positions_short_circuit() {
    varifish::init();

    // White king on the hill
    let v = eval_fen(
        "rnbq1bnr/pppppppp/8/8/4K3/8/PPPPPPPP/RNBQ1BNR w - - 0 1",
        Variant::Koth);
    assert!(v > Value(30000), "hill not decisive: {}", v.0);

    // Third check delivered
    let v = eval_fen(
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0+3 0 1",
        Variant::ThreeCheck);
    assert!(v > Value(30000), "third check not decisive: {}", v.0);
}

#[test]
fn every_variant_evaluates_without_panicking() {
    varifish::init();

    let variants = [
        Variant::Chess,
        Variant::Anti,
        Variant::Atomic,
        Variant::Crazyhouse,
        Variant::Extinction,
        Variant::Grid,
        Variant::Koth,
        Variant::Losers,
        Variant::Relay,
        Variant::ThreeCheck,
        Variant::TwoKings,
    ];

    for &variant in variants.iter() {
        let pos = Position::from_fen(ITALIAN, variant);
        let v = evaluate(&pos);
        assert!(v.abs() < Value::MATE, "odd value for {:?}: {}", variant, v.0);
    }

    // Horde and Racing Kings have their own starting setups
    let pos = Position::from_fen(
        "rnbqkbnr/pppppppp/8/1PP2PP1/PPPPPPPP/PPPPPPPP/PPPPPPPP/PPPPPPPP w kq - 0 1",
        Variant::Horde);
    let v = evaluate(&pos);
    assert!(v.abs() < Value::MATE, "odd horde value: {}", v.0);

    let pos = Position::from_fen(
        "8/8/8/8/8/8/krbnNBRK/qrbnNBRQ w - - 0 1", Variant::Race);
    let v = evaluate(&pos);
    assert!(v.abs() < Value::MATE, "odd race value: {}", v.0);
}

#[test]
fn antichess_uses_its_own_formula() {
    varifish::init();

    // In Antichess being forced to capture is what matters; the same
    // board must evaluate very differently from standard chess.
    let standard = eval_fen(KIWIPETE, Variant::Chess);
    let anti = eval_fen(KIWIPETE, Variant::Anti);
    assert_ne!(standard, anti);
}

#[test]
fn trace_lists_every_term_and_matches_evaluate() {
    varifish::init();

    let pos = Position::from_fen(ITALIAN, Variant::Chess);
    let out = trace(&pos);

    let labels = [
        "Material", "Imbalance", "Pawns", "Knights", "Bishops", "Rooks",
        "Queens", "Mobility", "King safety", "Threats", "Passed pawns",
        "Space", "Initiative", "Total", "Total Evaluation:",
    ];
    for &label in labels.iter() {
        assert!(out.contains(label), "trace misses {}:\n{}", label, out);
    }

    // White to move, so the white-side total equals the evaluation
    let v = evaluate(&pos);
    let cp = format!("{:.2}", f64::from(v.0) / f64::from(PawnValueEg.0));
    assert!(out.contains(&cp), "trace total {} not found in:\n{}", cp, out);
}
