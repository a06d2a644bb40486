// SPDX-License-Identifier: GPL-3.0-or-later

//! Static evaluation core of a multi-variant chess engine.
//!
//! The crate scores an immutable [`position::Position`] with
//! [`evaluate::evaluate`], a composite of mobility, king safety, threats,
//! passed pawns, space and initiative terms computed over shared per-color
//! attack maps. Which terms run and which constant tables drive them is
//! selected by the position's [`types::Variant`].
//!
//! Call [`init`] once before creating positions; it fills the precomputed
//! bitboard, zobrist, piece-square and bitbase tables.

#![allow(dead_code)]
#![allow(static_mut_refs)]

pub mod bitbases;
pub mod bitboard;
pub mod endgame;
pub mod evaluate;
pub mod material;
mod misc;
pub mod pawns;
pub mod position;
pub mod psqt;
pub mod types;

use once_cell::sync::OnceCell;

pub use evaluate::{evaluate, trace};
pub use position::Position;
pub use types::{Value, Variant};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// One-time initialization of all precomputed tables. Safe to call from
/// multiple threads; only the first call does any work.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        psqt::init();
        bitboard::init();
        position::zobrist::init();
        bitbases::init();
        pawns::init();
        endgame::init();
    });
}
