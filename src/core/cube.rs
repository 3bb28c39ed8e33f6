//! # Cube Model
//!
//! Facelet model of a 3x3x3 cube: six faces of nine stickers each.
//!
//! ```text
//!              ┌──────────┐
//!              │ 0  1  2  │
//!              │ 3  U  5  │   U seen from above, top row toward B
//!              │ 6  7  8  │
//! ┌──────────┬─┴────────┬─┴────────┬──────────┐
//! │    L     │    F     │    R     │    B     │   side faces, top row toward U
//! └──────────┴─┬────────┴─┬────────┴──────────┘
//!              │    D     │   D seen from below, top row toward F
//!              └──────────┘
//! ```
//!
//! `CubeState` is a plain value (`Copy`): every derived state is a fresh
//! copy, so the solved template can never be mutated through an alias.
//! Moves only permute stickers, which keeps each color at exactly 9
//! occurrences.

use std::fmt;

use crate::core::moves::{Face, Move, MoveError, parse_sequence};

/// Sticker colors, named after the WCA color scheme (white top, green front).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Yellow,
    Orange,
    Red,
    Green,
    Blue,
}

impl Color {
    pub const ALL: [Color; 6] = [
        Color::White,
        Color::Yellow,
        Color::Orange,
        Color::Red,
        Color::Green,
        Color::Blue,
    ];

    pub fn symbol(self) -> char {
        match self {
            Color::White => 'w',
            Color::Yellow => 'y',
            Color::Orange => 'o',
            Color::Red => 'r',
            Color::Green => 'g',
            Color::Blue => 'b',
        }
    }

    /// Color of the given face's center on a solved cube.
    pub fn of_solved_face(face: Face) -> Self {
        match face {
            Face::U => Color::White,
            Face::D => Color::Yellow,
            Face::L => Color::Orange,
            Face::R => Color::Red,
            Face::F => Color::Green,
            Face::B => Color::Blue,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

pub type FaceStickers = [Color; 9];

// ============================================================================
// Ring Tables
// ============================================================================

/// Three sticker indices on one adjacent face.
type Strip = (Face, [usize; 3]);

/// For a clockwise quarter turn, stickers travel ring[0] -> ring[1] ->
/// ring[2] -> ring[3] -> ring[0], position by position within each strip.
fn ring(face: Face) -> [Strip; 4] {
    match face {
        Face::U => [
            (Face::F, [0, 1, 2]),
            (Face::L, [0, 1, 2]),
            (Face::B, [0, 1, 2]),
            (Face::R, [0, 1, 2]),
        ],
        Face::D => [
            (Face::F, [6, 7, 8]),
            (Face::R, [6, 7, 8]),
            (Face::B, [6, 7, 8]),
            (Face::L, [6, 7, 8]),
        ],
        Face::L => [
            (Face::U, [0, 3, 6]),
            (Face::F, [0, 3, 6]),
            (Face::D, [0, 3, 6]),
            (Face::B, [8, 5, 2]),
        ],
        Face::R => [
            (Face::U, [2, 5, 8]),
            (Face::B, [6, 3, 0]),
            (Face::D, [2, 5, 8]),
            (Face::F, [2, 5, 8]),
        ],
        Face::F => [
            (Face::U, [6, 7, 8]),
            (Face::R, [0, 3, 6]),
            (Face::D, [2, 1, 0]),
            (Face::L, [8, 5, 2]),
        ],
        Face::B => [
            (Face::U, [0, 1, 2]),
            (Face::L, [6, 3, 0]),
            (Face::D, [8, 7, 6]),
            (Face::R, [2, 5, 8]),
        ],
    }
}

/// Move the content at `indices[k]` to `indices[k + 1]`, last wrapping to first.
fn cycle(stickers: &mut FaceStickers, indices: [usize; 4]) {
    let last = stickers[indices[3]];
    for k in (1..4).rev() {
        stickers[indices[k]] = stickers[indices[k - 1]];
    }
    stickers[indices[0]] = last;
}

/// Rotate one face's stickers 90 degrees clockwise in place.
/// Corners travel 0 -> 2 -> 8 -> 6, edges 1 -> 5 -> 7 -> 3; the center stays.
pub fn rotate_face_clockwise(stickers: &mut FaceStickers) {
    cycle(stickers, [0, 2, 8, 6]);
    cycle(stickers, [1, 5, 7, 3]);
}

// ============================================================================
// Cube State
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CubeState {
    faces: [FaceStickers; 6],
}

impl Default for CubeState {
    fn default() -> Self {
        Self::solved()
    }
}

impl CubeState {
    pub fn solved() -> Self {
        let mut faces = [[Color::White; 9]; 6];
        for face in Face::ALL {
            faces[face.index()] = [Color::of_solved_face(face); 9];
        }
        Self { faces }
    }

    pub fn face(&self, face: Face) -> &FaceStickers {
        &self.faces[face.index()]
    }

    pub fn is_solved(&self) -> bool {
        Face::ALL
            .iter()
            .all(|&f| self.face(f).iter().all(|&c| c == self.face(f)[4]))
    }

    /// How many stickers of each color (indexed like `Color::ALL`) are on the cube.
    pub fn color_counts(&self) -> [usize; 6] {
        let mut counts = [0; 6];
        for sticker in self.faces.iter().flatten() {
            counts[*sticker as usize] += 1;
        }
        counts
    }

    fn quarter_turn(&mut self, face: Face) {
        rotate_face_clockwise(&mut self.faces[face.index()]);

        let strips = ring(face);
        let carried = self.read_strip(strips[3]);
        for k in (1..4).rev() {
            let moved = self.read_strip(strips[k - 1]);
            self.write_strip(strips[k], moved);
        }
        self.write_strip(strips[0], carried);
    }

    fn read_strip(&self, (face, indices): Strip) -> [Color; 3] {
        let stickers = self.face(face);
        indices.map(|i| stickers[i])
    }

    fn write_strip(&mut self, (face, indices): Strip, colors: [Color; 3]) {
        let stickers = &mut self.faces[face.index()];
        for (i, color) in indices.into_iter().zip(colors) {
            stickers[i] = color;
        }
    }
}

// ============================================================================
// Engine Operations
// ============================================================================

/// Independent copy of a state. `CubeState` is `Copy`, so this can never
/// share face storage with its source.
pub fn clone_state(state: &CubeState) -> CubeState {
    *state
}

/// Apply a single move, returning the new state and leaving `state` untouched.
pub fn apply_move(state: &CubeState, mv: Move) -> CubeState {
    let mut next = clone_state(state);
    for _ in 0..mv.modifier.quarter_turns() {
        next.quarter_turn(mv.face);
    }
    next
}

/// Apply a single move written in notation. An empty token is a no-op.
pub fn apply_notation(state: &CubeState, token: &str) -> Result<CubeState, MoveError> {
    Ok(match Move::parse_optional(token)? {
        Some(mv) => apply_move(state, mv),
        None => clone_state(state),
    })
}

/// Apply a whole space-delimited sequence, left to right.
pub fn apply_scramble(state: &CubeState, notation: &str) -> Result<CubeState, MoveError> {
    let moves = parse_sequence(notation)?;
    Ok(moves.into_iter().fold(*state, |s, mv| apply_move(&s, mv)))
}

impl fmt::Display for CubeState {
    /// Unfolded net: U on top, then L F R B, then D.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let row = |face: Face, r: usize| -> String {
            self.face(face)[r * 3..r * 3 + 3]
                .iter()
                .map(Color::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        };
        let pad = " ".repeat(6);

        for r in 0..3 {
            writeln!(f, "{pad}{}", row(Face::U, r))?;
        }
        for r in 0..3 {
            let band = [Face::L, Face::F, Face::R, Face::B]
                .iter()
                .map(|&face| row(face, r))
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "{band}")?;
        }
        for r in 0..3 {
            writeln!(f, "{pad}{}", row(Face::D, r))?;
        }
        Ok(())
    }
}
