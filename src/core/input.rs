//! # Raw Input
//!
//! UI-agnostic key edges. Adapters (the TUI today) translate their native
//! key events into `InputEdge` values; the timer never sees crossterm types.
//!
//! Keys are physical-key identifiers in the DOM `code` style used by the
//! settings file (`Space`, `KeyI`, `Digit1`, `Enter`), so a binding written
//! as `"KeyI"` and one written as `"i"` name the same key.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    Enter,
    Tab,
    Backspace,
    Escape,
    /// Letters are stored lowercase so Shift does not change identity.
    Char(char),
}

impl Key {
    pub fn from_char(c: char) -> Self {
        match c {
            ' ' => Key::Space,
            '\n' | '\r' => Key::Enter,
            '\t' => Key::Tab,
            c => Key::Char(c.to_ascii_lowercase()),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Space => write!(f, "Space"),
            Key::Enter => write!(f, "Enter"),
            Key::Tab => write!(f, "Tab"),
            Key::Backspace => write!(f, "Backspace"),
            Key::Escape => write!(f, "Escape"),
            Key::Char(c) if c.is_ascii_alphabetic() => write!(f, "Key{}", c.to_ascii_uppercase()),
            Key::Char(c) if c.is_ascii_digit() => write!(f, "Digit{c}"),
            Key::Char(c) => write!(f, "{c}"),
        }
    }
}

impl FromStr for Key {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Space" | "space" | " " => return Ok(Key::Space),
            "Enter" | "enter" | "Return" => return Ok(Key::Enter),
            "Tab" | "tab" => return Ok(Key::Tab),
            "Backspace" => return Ok(Key::Backspace),
            "Escape" | "Esc" => return Ok(Key::Escape),
            _ => {}
        }

        let single = |rest: &str| {
            let mut chars = rest.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(c),
                _ => None,
            }
        };

        if let Some(c) = s.strip_prefix("Key").and_then(single) {
            if c.is_ascii_alphabetic() {
                return Ok(Key::from_char(c));
            }
        }
        if let Some(c) = s.strip_prefix("Digit").and_then(single) {
            if c.is_ascii_digit() {
                return Ok(Key::Char(c));
            }
        }
        match single(s) {
            Some(c) if !c.is_whitespace() => Ok(Key::from_char(c)),
            _ => Err(KeyParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyParseError(pub String);

impl fmt::Display for KeyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized key '{}'", self.0)
    }
}

impl std::error::Error for KeyParseError {}

/// Modifier keys held while an edge happened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    /// Super / Meta / Command.
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        alt: false,
        shift: false,
        meta: false,
    };

    /// Shortcut chords (Ctrl, Alt, Meta) are never timer input. Shift alone is.
    pub fn is_chord(&self) -> bool {
        self.ctrl || self.alt || self.meta
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    Press,
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEdge {
    pub key: Key,
    pub kind: EdgeKind,
    pub modifiers: Modifiers,
}

impl InputEdge {
    pub fn press(key: Key) -> Self {
        Self {
            key,
            kind: EdgeKind::Press,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn release(key: Key) -> Self {
        Self {
            key,
            kind: EdgeKind::Release,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}
