// SPDX-License-Identifier: GPL-3.0-or-later

use crate::bitboard::*;
use crate::material;
use crate::pawns;
use crate::psqt;
use crate::types::*;

use std;
use std::cell::UnsafeCell;

pub mod zobrist {
    use crate::misc;
    use crate::types::*;

    static mut PSQ: [[Key; 64]; 16] = [[Key(0); 64]; 16];
    static mut ENPASSANT: [Key; 8] = [Key(0); 8];
    static mut CASTLING: [Key; 16] = [Key(0); 16];
    static mut SIDE: Key = Key(0);
    static mut NO_PAWNS: Key = Key(0);

    pub fn psq(pc: Piece, s: Square) -> Key {
        unsafe { PSQ[pc.0 as usize][s.0 as usize] }
    }

    // The material key folds piece counts into the psq keys: the key of the
    // n-th piece of a kind is the psq key of square n.
    pub fn material(pc: Piece, num: i32) -> Key {
        unsafe { PSQ[pc.0 as usize][num as usize] }
    }

    pub fn enpassant(f: File) -> Key {
        unsafe { ENPASSANT[f as usize] }
    }

    pub fn castling(cr: CastlingRight) -> Key {
        unsafe { CASTLING[cr.0 as usize] }
    }

    pub fn side() -> Key {
        unsafe { SIDE }
    }

    pub fn no_pawns() -> Key {
        unsafe { NO_PAWNS }
    }

    // init() fills at startup the various arrays used to compute hash keys.

    pub fn init() {
        let mut rng = misc::Prng::new(1070372);

        unsafe {
            for i in 1..15 {
                if i != 7 && i != 8 {
                    for s in 0..64 {
                        PSQ[i][s] = Key(rng.rand64());
                    }
                }
            }

            for f in 0..8 {
                ENPASSANT[f] = Key(rng.rand64());
            }

            for cr in 0..16u64 {
                let b = crate::bitboard::Bitboard(cr);
                for s in b {
                    let k = CASTLING[1usize << s.0];
                    CASTLING[cr as usize] ^=
                        if k.0 != 0 { k } else { Key(rng.rand64()) };
                }
            }

            SIDE = Key(rng.rand64());
            NO_PAWNS = Key(rng.rand64());
        }
    }
}

// A Horde side can field up to 36 pawns, so the piece lists are sized well
// beyond the orthodox sixteen.
const PIECE_LIST_MAX: usize = 40;

#[derive(Clone)]
pub struct StateInfo {
    pub pawn_key: Key,
    pub material_key: Key,
    pub non_pawn_material: [Value; 2],
    pub castling_rights: CastlingRight,
    pub rule50: i32,
    pub psq: Score,
    pub ep_square: Square,
    pub checkers_bb: Bitboard,
    pub blockers_for_king: [Bitboard; 2],
    pub pinners_for_king: [Bitboard; 2],
}

impl StateInfo {
    fn new() -> StateInfo {
        StateInfo {
            pawn_key: Key(0),
            material_key: Key(0),
            non_pawn_material: [Value::ZERO; 2],
            castling_rights: CastlingRight(0),
            rule50: 0,
            psq: Score::ZERO,
            ep_square: Square::NONE,
            checkers_bb: Bitboard(0),
            blockers_for_king: [Bitboard(0); 2],
            pinners_for_king: [Bitboard(0); 2],
        }
    }
}

// Position is the board snapshot the evaluator scores. It is set up from a
// FEN string and then only queried; there is no move making at this layer.
// The per-thread pawn and material hash tables are owned by the position so
// that concurrent searches never share cache entries.

pub struct Position {
    board: [Piece; 64],
    by_color_bb: [Bitboard; 2],
    by_type_bb: [Bitboard; 8],
    piece_count: [i32; 16],
    piece_list: [[Square; PIECE_LIST_MAX]; 16],
    index: [i32; 64],
    castling_rook_square: [Square; 16],
    game_ply: i32,
    side_to_move: Color,
    variant: Variant,
    chess960: bool,
    checks_given_cnt: [i32; 2],
    hand: [[i32; 8]; 2],
    st: StateInfo,
    pub pawns_table: Vec<UnsafeCell<pawns::Entry>>,
    pub material_table: Vec<UnsafeCell<material::Entry>>,
}

impl Position {
    pub fn new() -> Position {
        let mut pawns_table = Vec::with_capacity(pawns::TABLE_SIZE);
        for _ in 0..pawns::TABLE_SIZE {
            pawns_table.push(UnsafeCell::new(pawns::Entry::new()));
        }
        let mut material_table = Vec::with_capacity(material::TABLE_SIZE);
        for _ in 0..material::TABLE_SIZE {
            material_table.push(UnsafeCell::new(material::Entry::new()));
        }
        Position {
            board: [NO_PIECE; 64],
            by_color_bb: [Bitboard(0); 2],
            by_type_bb: [Bitboard(0); 8],
            piece_count: [0; 16],
            piece_list: [[Square::NONE; PIECE_LIST_MAX]; 16],
            index: [0; 64],
            castling_rook_square: [Square::NONE; 16],
            game_ply: 0,
            side_to_move: WHITE,
            variant: Variant::Chess,
            chess960: false,
            checks_given_cnt: [0; 2],
            hand: [[0; 8]; 2],
            st: StateInfo::new(),
            pawns_table,
            material_table,
        }
    }

    pub fn from_fen(fen: &str, variant: Variant) -> Position {
        let mut pos = Position::new();
        pos.set(fen, variant, false);
        pos
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn is_anti(&self) -> bool {
        self.variant == Variant::Anti
    }

    pub fn is_atomic(&self) -> bool {
        self.variant == Variant::Atomic
    }

    pub fn is_house(&self) -> bool {
        self.variant == Variant::Crazyhouse
    }

    pub fn is_extinction(&self) -> bool {
        self.variant == Variant::Extinction
    }

    pub fn is_grid(&self) -> bool {
        self.variant == Variant::Grid
    }

    pub fn is_horde(&self) -> bool {
        self.variant == Variant::Horde
    }

    pub fn is_koth(&self) -> bool {
        self.variant == Variant::Koth
    }

    pub fn is_losers(&self) -> bool {
        self.variant == Variant::Losers
    }

    pub fn is_race(&self) -> bool {
        self.variant == Variant::Race
    }

    pub fn is_relay(&self) -> bool {
        self.variant == Variant::Relay
    }

    pub fn is_three_check(&self) -> bool {
        self.variant == Variant::ThreeCheck
    }

    pub fn is_two_kings(&self) -> bool {
        self.variant == Variant::TwoKings
    }

    // The horde side is the one playing without a king.
    pub fn is_horde_color(&self, c: Color) -> bool {
        self.is_horde() && self.count(c, KING) == 0
    }

    pub fn checks_given(&self, c: Color) -> i32 {
        self.checks_given_cnt[c.0 as usize]
    }

    pub fn count_in_hand(&self, c: Color, pt: PieceType) -> i32 {
        self.hand[c.0 as usize][pt.0 as usize]
    }

    pub fn grid_bb(&self, s: Square) -> Bitboard {
        grid_cell_bb(s)
    }

    pub fn empty(&self, s: Square) -> bool {
        self.board[s.0 as usize] == NO_PIECE
    }

    pub fn piece_on(&self, s: Square) -> Piece {
        self.board[s.0 as usize]
    }

    pub fn pieces(&self) -> Bitboard {
        self.by_type_bb[ALL_PIECES.0 as usize]
    }

    pub fn pieces_p(&self, pt: PieceType) -> Bitboard {
        self.by_type_bb[pt.0 as usize]
    }

    pub fn pieces_pp(&self, pt1: PieceType, pt2: PieceType) -> Bitboard {
        self.pieces_p(pt1) | self.pieces_p(pt2)
    }

    pub fn pieces_c(&self, c: Color) -> Bitboard {
        self.by_color_bb[c.0 as usize]
    }

    pub fn pieces_cp(&self, c: Color, pt: PieceType) -> Bitboard {
        self.pieces_c(c) & self.pieces_p(pt)
    }

    pub fn pieces_cpp(
        &self, c: Color, pt1: PieceType, pt2: PieceType,
    ) -> Bitboard {
        self.pieces_c(c) & self.pieces_pp(pt1, pt2)
    }

    pub fn count(&self, c: Color, pt: PieceType) -> i32 {
        self.piece_count[Piece::make(c, pt).0 as usize]
    }

    pub fn squares(&self, c: Color, pt: PieceType) -> &[Square] {
        &self.piece_list[Piece::make(c, pt).0 as usize]
    }

    pub fn square_list(&self, c: Color, pt: PieceType) -> SquareList {
        SquareList::construct(self.squares(c, pt))
    }

    // The first piece of the list; Square::NONE when the side has none.
    // Variants with several pieces of a nominally unique type (Two-Kings,
    // Extinction, Antichess promoted kings) report the first one, as the
    // evaluation expects.
    pub fn square(&self, c: Color, pt: PieceType) -> Square {
        self.squares(c, pt)[0]
    }

    pub fn ep_square(&self) -> Square {
        self.st.ep_square
    }

    pub fn has_castling_right(&self, cr: CastlingRight) -> bool {
        self.st.castling_rights & cr != 0
    }

    pub fn castling_rights(&self, c: Color) -> CastlingRight {
        self.st.castling_rights & CastlingRight(3 << (2 * c.0))
    }

    pub fn can_castle(&self, c: Color) -> bool {
        self.castling_rights(c) != 0
    }

    pub fn castling_rook_square(&self, cr: CastlingRight) -> Square {
        self.castling_rook_square[cr.0 as usize]
    }

    pub fn attacks_from_pawn(&self, s: Square, c: Color) -> Bitboard {
        pawn_attacks(c, s)
    }

    pub fn attacks_from(&self, pt: PieceType, s: Square) -> Bitboard {
        debug_assert!(pt != PAWN);
        match pt {
            BISHOP | ROOK => attacks_bb(pt, s, self.pieces()),
            QUEEN => self.attacks_from(ROOK, s) | self.attacks_from(BISHOP, s),
            _ => pseudo_attacks(pt, s),
        }
    }

    pub fn attackers_to_occ(&self, s: Square, occ: Bitboard) -> Bitboard {
        (self.attacks_from_pawn(s, BLACK) & self.pieces_cp(WHITE, PAWN))
        | (self.attacks_from_pawn(s, WHITE) & self.pieces_cp(BLACK, PAWN))
        | (pseudo_attacks(KNIGHT, s) & self.pieces_p(KNIGHT))
        | (attacks_bb(ROOK, s, occ) & self.pieces_pp(ROOK, QUEEN))
        | (attacks_bb(BISHOP, s, occ) & self.pieces_pp(BISHOP, QUEEN))
        | (pseudo_attacks(KING, s) & self.pieces_p(KING))
    }

    pub fn attackers_to(&self, s: Square) -> Bitboard {
        self.attackers_to_occ(s, self.by_type_bb[ALL_PIECES.0 as usize])
    }

    pub fn checkers(&self) -> Bitboard {
        self.st.checkers_bb
    }

    pub fn blockers_for_king(&self, c: Color) -> Bitboard {
        self.st.blockers_for_king[c.0 as usize]
    }

    pub fn pinners_for_king(&self, c: Color) -> Bitboard {
        self.st.pinners_for_king[c.0 as usize]
    }

    pub fn pinned_pieces(&self, c: Color) -> Bitboard {
        self.blockers_for_king(c) & self.pieces_c(c)
    }

    pub fn pawn_passed(&self, c: Color, s: Square) -> bool {
        self.pieces_cp(!c, PAWN) & passed_pawn_mask(c, s) == 0
    }

    pub fn pawn_key(&self) -> Key {
        self.st.pawn_key
    }

    pub fn material_key(&self) -> Key {
        self.st.material_key
    }

    pub fn psq_score(&self) -> Score {
        self.st.psq
    }

    pub fn non_pawn_material_c(&self, c: Color) -> Value {
        self.st.non_pawn_material[c.0 as usize]
    }

    pub fn non_pawn_material(&self) -> Value {
        self.non_pawn_material_c(WHITE) + self.non_pawn_material_c(BLACK)
    }

    pub fn game_ply(&self) -> i32 {
        self.game_ply
    }

    pub fn rule50_count(&self) -> i32 {
        self.st.rule50
    }

    pub fn opposite_bishops(&self) -> bool {
        self.piece_count[W_BISHOP.0 as usize] == 1
        && self.piece_count[B_BISHOP.0 as usize] == 1
        && opposite_colors(self.square(WHITE, BISHOP),
            self.square(BLACK, BISHOP))
    }

    pub fn is_chess960(&self) -> bool {
        self.chess960
    }

    // is_variant_end() reports the end states decidable from the board
    // alone: reaching the hill, the third check, the finished king race,
    // an exploded or exterminated side, an extinct piece type. Checkmate
    // and stalemate ends need move generation and are the search's job.

    pub fn is_variant_end(&self) -> bool {
        match self.variant {
            Variant::ThreeCheck =>
                self.checks_given_cnt[0] >= 3 || self.checks_given_cnt[1] >= 3,
            Variant::Koth =>
                self.pieces_p(KING) & KOTH_CENTER != 0,
            Variant::Race =>
                self.pieces_p(KING) & RANK8_BB != 0,
            Variant::Horde =>
                self.pieces_c(WHITE) == 0 || self.pieces_c(BLACK) == 0,
            Variant::Atomic =>
                self.count(WHITE, KING) == 0 || self.count(BLACK, KING) == 0,
            Variant::Anti | Variant::Losers =>
                self.pieces_c(WHITE) == 0 || self.pieces_c(BLACK) == 0,
            Variant::Extinction =>
                COLORS.iter().any(|&c| {
                    (1..7).any(|pt| self.count(c, PieceType(pt)) == 0)
                }),
            _ => false,
        }
    }

    // variant_result() returns the terminal score from the side to move's
    // point of view. Precondition: is_variant_end().

    pub fn variant_result(&self) -> Value {
        debug_assert!(self.is_variant_end());
        let us = self.side_to_move;

        let won = match self.variant {
            Variant::ThreeCheck => self.checks_given(us) >= 3,
            Variant::Koth => self.pieces_cp(us, KING) & KOTH_CENTER != 0,
            Variant::Race => {
                if popcount(self.pieces_p(KING) & RANK8_BB) == 2 {
                    return Value::DRAW;
                }
                self.pieces_cp(us, KING) & RANK8_BB != 0
            }
            Variant::Horde => self.pieces_c(!us) == 0,
            Variant::Atomic => self.count(!us, KING) == 0,
            // Shedding all pieces wins in Antichess and Losers
            Variant::Anti | Variant::Losers => self.pieces_c(us) == 0,
            Variant::Extinction =>
                (1..7).any(|pt| self.count(!us, PieceType(pt)) == 0),
            _ => unreachable!(),
        };

        if won { mate_in(0) } else { mated_in(0) }
    }

    pub const PIECE_TO_CHAR: &'static str = " PNBRQK  pnbrqk";

    fn put_piece(&mut self, pc: Piece, s: Square) {
        self.board[s.0 as usize] = pc;
        self.by_type_bb[ALL_PIECES.0 as usize] |= s;
        self.by_type_bb[pc.piece_type().0 as usize] |= s;
        self.by_color_bb[pc.color().0 as usize] |= s;
        self.index[s.0 as usize] = self.piece_count[pc.0 as usize];
        self.piece_count[pc.0 as usize] += 1;
        self.piece_count[Piece::make(pc.color(), ALL_PIECES).0 as usize] += 1;
        self.piece_list[pc.0 as usize][self.index[s.0 as usize] as usize] = s;
    }

    // set() initializes the position from a FEN string for the given
    // variant. Crazyhouse holdings are accepted in brackets after the board
    // field ("...[QRb]"), promoted pieces marked with '~' are kept as their
    // current type, and a Three-Check FEN may carry a remaining-checks
    // field such as "3+1" before the halfmove clock. The function is not
    // robust against garbage; correct input is the caller's responsibility.

    pub fn set(&mut self, fen_str: &str, variant: Variant, is_chess960: bool) {
        for c in 0..2 {
            self.by_color_bb[c] = Bitboard(0);
            self.checks_given_cnt[c] = 0;
            self.hand[c] = [0; 8];
        }
        for t in 0..8 {
            self.by_type_bb[t] = Bitboard(0);
        }
        for i in 0..16 {
            self.piece_count[i] = 0;
            self.castling_rook_square[i] = Square::NONE;
            for j in 0..PIECE_LIST_MAX {
                self.piece_list[i][j] = Square::NONE;
            }
        }
        for i in 0..64 {
            self.board[i] = NO_PIECE;
        }
        self.st = StateInfo::new();
        self.variant = variant;
        self.chess960 = is_chess960;

        let mut iter = fen_str.split_whitespace();

        // 1. Piece placement, with optional bracketed holdings
        let pieces = iter.next().unwrap();
        let mut sq = Square::A8;
        let mut in_hand = false;
        for c in pieces.chars() {
            if c == '[' {
                in_hand = true;
            } else if c == ']' || c == '~' {
                // nothing to do: promoted pieces keep their over-the-board
                // type at this layer
            } else if in_hand {
                if let Some(idx) = Position::PIECE_TO_CHAR.find(c) {
                    let pc = Piece(idx as u32);
                    self.hand[pc.color().0 as usize]
                        [pc.piece_type().0 as usize] += 1;
                    self.hand[pc.color().0 as usize]
                        [ALL_PIECES.0 as usize] += 1;
                }
            } else if let Some(d) = c.to_digit(10) {
                sq += (d as i32) * EAST;
            } else if c == '/' {
                sq += 2 * SOUTH;
            } else if let Some(idx) = Position::PIECE_TO_CHAR.find(c) {
                self.put_piece(Piece(idx as u32), sq);
                sq += EAST;
            }
        }

        // 2. Active color
        let color = iter.next().unwrap();
        self.side_to_move = if color == "b" { BLACK } else { WHITE };

        // 3. Castling availability, in FEN, Shredder-FEN or X-FEN style
        let castling = iter.next().unwrap();
        if castling != "-" {
            for c in castling.chars() {
                let color = if c.is_lowercase() { BLACK } else { WHITE };
                if self.count(color, KING) == 0 {
                    continue;
                }
                let rook = Piece::make(color, ROOK);
                let side = c.to_uppercase().next().unwrap();
                let mut rsq;
                if side == 'K' {
                    rsq = Square::H1.relative(color);
                    while rsq.file() > FILE_A && self.piece_on(rsq) != rook {
                        rsq += WEST;
                    }
                } else if side == 'Q' {
                    rsq = Square::A1.relative(color);
                    while rsq.file() < FILE_H && self.piece_on(rsq) != rook {
                        rsq += EAST;
                    }
                } else if side >= 'A' && side <= 'H' {
                    let file = side.to_digit(18).unwrap() - 10;
                    rsq = Square::make(file, relative_rank(color, RANK_1));
                } else {
                    continue;
                }
                if self.piece_on(rsq) == rook {
                    self.set_castling_right(color, rsq);
                }
            }
        }

        // 4. En passant square
        let enpassant = iter.next().unwrap();
        self.st.ep_square = Square::NONE;
        if enpassant != "-" && enpassant.len() >= 2 {
            let file = enpassant.chars().nth(0).unwrap();
            if let Some(f) = file.to_digit(18) {
                let file = f - 10;
                let rank = if self.side_to_move == WHITE { 5 } else { 2 };
                let ep_sq = Square::make(file, rank);
                if self.attackers_to(ep_sq)
                        & self.pieces_cp(self.side_to_move, PAWN) != 0
                    && self.pieces_cp(!self.side_to_move, PAWN)
                        & (ep_sq + pawn_push(!self.side_to_move)) != 0
                {
                    self.st.ep_square = ep_sq;
                }
            }
        }

        // 5. Optional remaining-checks counter ("3+3" style)
        let mut next = iter.next();
        if let Some(tok) = next {
            if tok.contains('+') {
                let mut parts = tok.split('+');
                let w: i32 = parts.next().unwrap().parse().unwrap_or(3);
                let b: i32 = parts.next().unwrap().parse().unwrap_or(3);
                self.checks_given_cnt[WHITE.0 as usize] = 3 - w;
                self.checks_given_cnt[BLACK.0 as usize] = 3 - b;
                next = iter.next();
            }
        }

        // 6-7. Halfmove clock and fullmove number
        if let Some(halfmove) = next {
            self.st.rule50 = halfmove.parse::<i32>().unwrap_or(0);
        } else {
            self.st.rule50 = 0;
        }

        if let Some(fullmove) = iter.next() {
            let fullmove = fullmove.parse::<i32>().unwrap_or(1);
            self.game_ply = std::cmp::max(2 * (fullmove - 1), 0);
        } else {
            self.game_ply = 0;
        }
        if self.side_to_move == BLACK {
            self.game_ply += 1;
        }

        self.set_state();
    }

    fn set_castling_right(&mut self, c: Color, rfrom: Square) {
        let kfrom = self.square(c, KING);
        let cs = if kfrom < rfrom { CastlingSide::KING }
                 else { CastlingSide::QUEEN };
        let cr = c | cs;

        self.st.castling_rights |= cr;
        self.castling_rook_square[cr.0 as usize] = rfrom;
    }

    // set_check_info() computes the pin and discovered-check data for both
    // kings. Sides without a king (Horde, exploded Atomic kings) get empty
    // sets.

    fn set_check_info(&mut self) {
        for &c in COLORS.iter() {
            let mut pinners = Bitboard(0);
            let blockers = if self.count(c, KING) != 0 {
                self.slider_blockers(self.pieces_c(!c), self.square(c, KING),
                    &mut pinners)
            } else {
                Bitboard(0)
            };
            self.st.blockers_for_king[c.0 as usize] = blockers;
            self.st.pinners_for_king[c.0 as usize] = pinners;
        }
    }

    // set_state() computes hash keys, incremental scores and material
    // counters from scratch. Used only at setup time.

    fn set_state(&mut self) {
        self.st.pawn_key = zobrist::no_pawns();
        self.st.checkers_bb =
            if self.count(self.side_to_move, KING) != 0 {
                self.attackers_to(self.square(self.side_to_move, KING))
                    & self.pieces_c(!self.side_to_move)
            } else {
                Bitboard(0)
            };

        self.set_check_info();

        for s in self.pieces() {
            let pc = self.piece_on(s);
            self.st.psq += psqt::psq(pc, s);
        }

        for s in self.pieces_p(PAWN) {
            self.st.pawn_key ^= zobrist::psq(self.piece_on(s), s);
        }

        for c in 0..2 {
            for pt in 2..6 {
                let pc = Piece::make(Color(c), PieceType(pt));
                self.st.non_pawn_material[c as usize] +=
                    self.count(Color(c), PieceType(pt)) * piece_value(MG, pc);
            }

            for pt in 1..7 {
                let pc = Piece::make(Color(c), PieceType(pt));
                for cnt in 0..self.count(Color(c), PieceType(pt)) {
                    self.st.material_key ^= zobrist::material(pc, cnt);
                }
            }
        }
    }

    // fen() returns a FEN representation of the position, including the
    // holdings and remaining-checks fields where the variant has them.

    pub fn fen(&self) -> String {
        let mut ss = String::new();

        for r in (0..8).rev() {
            let mut f = 0;
            while f < 8 {
                let mut empty_cnt = 0u8;
                while f < 8 && self.empty(Square::make(f, r)) {
                    empty_cnt += 1;
                    f += 1;
                }
                if empty_cnt > 0 {
                    ss.push((48u8 + empty_cnt) as char);
                }
                if f < 8 {
                    let c = Position::PIECE_TO_CHAR.chars()
                        .nth(self.piece_on(Square::make(f, r)).0 as usize)
                        .unwrap();
                    ss.push(c);
                    f += 1;
                }
            }
            if r > 0 {
                ss.push('/');
            }
        }

        if self.is_house() {
            ss.push('[');
            for &c in COLORS.iter() {
                for pt in (1..6).rev() {
                    let pc = Piece::make(c, PieceType(pt));
                    for _ in 0..self.count_in_hand(c, PieceType(pt)) {
                        ss.push(Position::PIECE_TO_CHAR.chars()
                            .nth(pc.0 as usize).unwrap());
                    }
                }
            }
            ss.push(']');
        }

        ss.push_str(if self.side_to_move == WHITE { " w " } else { " b " });

        self.castle_helper(&mut ss, WHITE_OO, 'K');
        self.castle_helper(&mut ss, WHITE_OOO, 'Q');
        self.castle_helper(&mut ss, BLACK_OO, 'k');
        self.castle_helper(&mut ss, BLACK_OOO, 'q');

        if !self.has_castling_right(ANY_CASTLING) {
            ss.push('-');
        }

        if self.ep_square() == Square::NONE {
            ss.push_str(" -");
        } else {
            ss.push(' ');
            ss.push_str(&self.ep_square().to_string());
        }

        if self.is_three_check() {
            ss.push_str(&format!(" {}+{}",
                3 - self.checks_given(WHITE), 3 - self.checks_given(BLACK)));
        }

        ss.push(' ');
        ss.push_str(&self.rule50_count().to_string());
        ss.push(' ');
        ss.push_str(&(1 + self.game_ply() / 2).to_string());

        ss
    }

    fn castle_helper(&self, ss: &mut String, cr: CastlingRight, c: char) {
        if !self.has_castling_right(cr) {
            return;
        }

        if !self.chess960 {
            ss.push(c);
        } else {
            let f = self.castling_rook_square(cr).file();
            let r = self.castling_rook_square(cr).rank();
            let mut ch = 65 + f;
            if r == RANK_8 {
                ch += 32;
            }
            ss.push((ch as u8) as char);
        }
    }

    // slider_blockers() returns a bitboard of all the pieces (both colors)
    // that block attacks on square 's' from 'sliders'. A piece blocks a
    // slider if removing it would expose 's'; 'pinners' receives the
    // sliders pinning a blocker of the same color as the piece on 's'.

    pub fn slider_blockers(
        &self,
        sliders: Bitboard,
        s: Square,
        pinners: &mut Bitboard,
    ) -> Bitboard {
        let mut result = Bitboard(0);
        *pinners = Bitboard(0);

        // Snipers are sliders that attack 's' when a piece is removed
        let snipers =
            ((pseudo_attacks(ROOK, s) & self.pieces_pp(QUEEN, ROOK))
                | (pseudo_attacks(BISHOP, s) & self.pieces_pp(QUEEN, BISHOP)))
            & sliders;

        for sniper_sq in snipers {
            let b = between_bb(s, sniper_sq) & self.pieces();

            if b != 0 && !more_than_one(b) {
                result |= b;
                if b & self.pieces_c(self.piece_on(s).color()) != 0 {
                    *pinners |= sniper_sq;
                }
            }
        }
        result
    }
}

// The four hill squares d4, e4, d5, e5
pub const KOTH_CENTER: Bitboard = Bitboard(0x0000001818000000);
