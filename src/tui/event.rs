//! Crossterm events → core input edges.
//!
//! With the keyboard enhancement protocol the terminal reports key release
//! and repeat events, which is what hold-to-start needs. Terminals without
//! it only send presses (auto-repeat shows up as more presses), so
//! `ReleaseSynthesizer` turns a burst of presses into one press plus a
//! release once the burst stops.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::input::{EdgeKind, InputEdge, Key, Modifiers};

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    /// Passed to the core as `Action::InputAt`.
    Edge(InputEdge),
    /// Auto-repeat of a held key. Only terminals that report event kinds
    /// send these, so its arrival proves real releases will follow.
    Repeat,
    Resize,
    /// Esc or Ctrl+C.
    Quit,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> io::Result<Option<TuiEvent>> {
    poll_event_timeout(Duration::ZERO)
}

/// Block up to `timeout` for the next event we care about.
pub fn poll_event_timeout(timeout: Duration) -> io::Result<Option<TuiEvent>> {
    if event::poll(timeout)? {
        Ok(translate(event::read()?))
    } else {
        Ok(None)
    }
}

pub fn translate(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key_event) => translate_key(key_event),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

fn translate_key(key_event: KeyEvent) -> Option<TuiEvent> {
    log::debug!(
        "Key event: {:?} {:?} with modifiers {:?}",
        key_event.kind,
        key_event.code,
        key_event.modifiers
    );

    let kind = match key_event.kind {
        KeyEventKind::Press => EdgeKind::Press,
        KeyEventKind::Release => EdgeKind::Release,
        // Holding a key must not look like pressing it again.
        KeyEventKind::Repeat => return Some(TuiEvent::Repeat),
    };

    let quit = match key_event.code {
        KeyCode::Esc => true,
        KeyCode::Char('c') => key_event.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    };
    if quit {
        return (kind == EdgeKind::Press).then_some(TuiEvent::Quit);
    }

    let key = match key_event.code {
        KeyCode::Char(c) => Key::from_char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        _ => return None,
    };

    let modifiers = Modifiers {
        ctrl: key_event.modifiers.contains(KeyModifiers::CONTROL),
        alt: key_event.modifiers.contains(KeyModifiers::ALT),
        shift: key_event.modifiers.contains(KeyModifiers::SHIFT),
        meta: key_event
            .modifiers
            .intersects(KeyModifiers::SUPER | KeyModifiers::META),
    };

    Some(TuiEvent::Edge(InputEdge {
        key,
        kind,
        modifiers,
    }))
}

// ============================================================================
// Release synthesis for press-only terminals
// ============================================================================

/// Longest pause between a press and the first auto-repeat.
const INITIAL_REPEAT_GAP: Duration = Duration::from_millis(600);
/// Longest pause between two auto-repeats.
const REPEAT_GAP: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy)]
struct HeldKey {
    press: InputEdge,
    pressed_at: Instant,
    /// At least one auto-repeat arrived, so this is a hold and not a tap.
    repeated: bool,
    deadline: Instant,
}

impl HeldKey {
    /// The synthetic release and the instant it counts as having happened.
    /// A tap is released where it was pressed; a repeating key when the
    /// burst was found quiet.
    fn release(&self, now: Instant) -> (InputEdge, Instant) {
        let at = if self.repeated { now } else { self.pressed_at };
        (release_of(self.press), at)
    }
}

#[derive(Debug, Default)]
pub struct ReleaseSynthesizer {
    held: Option<HeldKey>,
}

impl ReleaseSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter an incoming edge. Returns the edges to forward, in order, each
    /// with the instant it took effect.
    pub fn on_edge(&mut self, edge: InputEdge, now: Instant) -> Vec<(InputEdge, Instant)> {
        match (edge.kind, self.held) {
            (EdgeKind::Press, Some(held)) if held.press.key == edge.key => {
                self.held = Some(HeldKey {
                    repeated: true,
                    deadline: now + REPEAT_GAP,
                    ..held
                });
                Vec::new()
            }
            (EdgeKind::Press, held) => {
                let mut forwarded: Vec<(InputEdge, Instant)> =
                    held.map(|h| h.release(now)).into_iter().collect();
                forwarded.push((edge, now));
                self.held = Some(HeldKey {
                    press: edge,
                    pressed_at: now,
                    repeated: false,
                    deadline: now + INITIAL_REPEAT_GAP,
                });
                forwarded
            }
            (EdgeKind::Release, Some(held)) if held.press.key == edge.key => {
                self.held = None;
                vec![(edge, now)]
            }
            (EdgeKind::Release, _) => vec![(edge, now)],
        }
    }

    /// The synthetic release, once the press burst has gone quiet.
    pub fn due(&mut self, now: Instant) -> Option<(InputEdge, Instant)> {
        match self.held {
            Some(held) if now >= held.deadline => {
                self.held = None;
                Some(held.release(now))
            }
            _ => None,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.held.map(|h| h.deadline)
    }

    /// A key is down that hasn't auto-repeated yet, so it may still be a tap.
    pub fn tap_pending(&self) -> bool {
        self.held.is_some_and(|h| !h.repeated)
    }
}

fn release_of(press: InputEdge) -> InputEdge {
    InputEdge {
        kind: EdgeKind::Release,
        ..press
    }
}
