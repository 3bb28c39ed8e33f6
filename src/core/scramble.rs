//! # Scramble Generation
//!
//! Random-move scrambles with two anti-repetition rules:
//!
//! - (a) a face never follows itself (`R R'` collapses to nothing),
//! - (b) a face never repeats two moves back when the move in between is on
//!   the same axis (`R L R` is just `R2 L`).
//!
//! The random source is injected so callers pick between `thread_rng()` at
//! runtime and a seeded `StdRng` for reproducible output.

use rand::Rng;

use crate::core::cube::{CubeState, apply_move};
use crate::core::moves::{Face, Modifier, Move, format_sequence};

/// WCA-style random-move scramble length.
pub const SCRAMBLE_LENGTH: usize = 20;

/// Generate `length` moves obeying the anti-repetition rules.
pub fn generate_moves<R: Rng + ?Sized>(rng: &mut R, length: usize) -> Vec<Move> {
    let mut moves: Vec<Move> = Vec::with_capacity(length);

    for _ in 0..length {
        let last = moves.last().map(|m| m.face);
        let second_last = moves.len().checked_sub(2).map(|i| moves[i].face);

        let face = loop {
            let candidate = Face::ALL[rng.gen_range(0..Face::ALL.len())];
            if !is_redundant(candidate, last, second_last) {
                break candidate;
            }
        };
        let modifier = Modifier::ALL[rng.gen_range(0..Modifier::ALL.len())];
        moves.push(Move::new(face, modifier));
    }

    moves
}

/// Generate a scramble in display notation (`"R U' F2 ..."`).
pub fn generate_random_moves<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    format_sequence(&generate_moves(rng, length))
}

/// Whether `candidate` would break rule (a) or rule (b) after `last` and `second_last`.
pub fn is_redundant(candidate: Face, last: Option<Face>, second_last: Option<Face>) -> bool {
    match (last, second_last) {
        (Some(last), _) if candidate == last => true,
        (Some(last), Some(second)) => candidate == second && candidate.shares_axis(last),
        _ => false,
    }
}

/// Apply generated moves to a solved cube, producing the state to display.
pub fn scrambled_state(moves: &[Move]) -> CubeState {
    moves
        .iter()
        .fold(CubeState::solved(), |state, &mv| apply_move(&state, mv))
}
