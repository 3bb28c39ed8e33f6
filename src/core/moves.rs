//! # Move Notation
//!
//! A move is a face letter plus an optional modifier, in standard
//! outer-block notation:
//!
//! ```text
//! R    one clockwise quarter turn of the right face
//! R'   counter-clockwise (three clockwise quarter turns)
//! R2   half turn (two clockwise quarter turns)
//! ```
//!
//! Parsing is strict. Malformed notation is a caller bug, so it comes back
//! as a `MoveError` instead of being silently skipped. The only tolerated
//! "non-move" is the empty string, which `parse_optional` maps to `None`.

use std::fmt;
use std::str::FromStr;

// ============================================================================
// Face
// ============================================================================

/// The six outer faces. The declaration order pairs faces on the same axis
/// (U/D, L/R, F/B), so `index() / 2` is the axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    U,
    D,
    L,
    R,
    F,
    B,
}

impl Face {
    pub const ALL: [Face; 6] = [Face::U, Face::D, Face::L, Face::R, Face::F, Face::B];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn axis(self) -> usize {
        self.index() / 2
    }

    pub fn shares_axis(self, other: Face) -> bool {
        self.axis() == other.axis()
    }

    pub fn letter(self) -> char {
        match self {
            Face::U => 'U',
            Face::D => 'D',
            Face::L => 'L',
            Face::R => 'R',
            Face::F => 'F',
            Face::B => 'B',
        }
    }

    fn from_letter(c: char) -> Option<Self> {
        match c {
            'U' => Some(Face::U),
            'D' => Some(Face::D),
            'L' => Some(Face::L),
            'R' => Some(Face::R),
            'F' => Some(Face::F),
            'B' => Some(Face::B),
            _ => None,
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

// ============================================================================
// Modifier
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Clockwise,
    CounterClockwise,
    Double,
}

impl Modifier {
    pub const ALL: [Modifier; 3] = [
        Modifier::Clockwise,
        Modifier::CounterClockwise,
        Modifier::Double,
    ];

    /// Number of clockwise quarter turns this modifier stands for.
    pub fn quarter_turns(self) -> usize {
        match self {
            Modifier::Clockwise => 1,
            Modifier::CounterClockwise => 3,
            Modifier::Double => 2,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Modifier::Clockwise => "",
            Modifier::CounterClockwise => "'",
            Modifier::Double => "2",
        }
    }
}

// ============================================================================
// Move
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub face: Face,
    pub modifier: Modifier,
}

impl Move {
    pub fn new(face: Face, modifier: Modifier) -> Self {
        Self { face, modifier }
    }

    /// The move that undoes this one. Half turns are their own inverse.
    pub fn inverse(self) -> Self {
        let modifier = match self.modifier {
            Modifier::Clockwise => Modifier::CounterClockwise,
            Modifier::CounterClockwise => Modifier::Clockwise,
            Modifier::Double => Modifier::Double,
        };
        Self::new(self.face, modifier)
    }

    /// Parse a token, treating an empty (or all-whitespace) token as "no move".
    pub fn parse_optional(token: &str) -> Result<Option<Self>, MoveError> {
        let token = token.trim();
        if token.is_empty() {
            return Ok(None);
        }
        token.parse().map(Some)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.face, self.modifier.suffix())
    }
}

impl FromStr for Move {
    type Err = MoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let first = chars.next().ok_or(MoveError::Empty)?;
        let face = Face::from_letter(first).ok_or(MoveError::UnknownFace(first))?;
        let modifier = match chars.as_str() {
            "" => Modifier::Clockwise,
            "'" => Modifier::CounterClockwise,
            "2" => Modifier::Double,
            other => return Err(MoveError::UnknownModifier(other.to_string())),
        };
        Ok(Self::new(face, modifier))
    }
}

/// Parse a space-delimited move sequence. Runs of whitespace are skipped.
pub fn parse_sequence(notation: &str) -> Result<Vec<Move>, MoveError> {
    notation.split_whitespace().map(str::parse).collect()
}

/// Join moves into display notation (`"R U' F2"`).
pub fn format_sequence(moves: &[Move]) -> String {
    moves
        .iter()
        .map(Move::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    Empty,
    UnknownFace(char),
    UnknownModifier(String),
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::Empty => write!(f, "empty move token"),
            MoveError::UnknownFace(c) => write!(f, "unknown face '{c}'"),
            MoveError::UnknownModifier(m) => write!(f, "unknown modifier '{m}'"),
        }
    }
}

impl std::error::Error for MoveError {}
