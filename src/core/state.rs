//! # Application State
//!
//! Core business state for the timer. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── clock: Arc<dyn Clock>         // monotonic + wall time source
//! ├── machine: TimerMachine         // hold / inspection / solve states
//! ├── scramble: Vec<Move>           // current scramble
//! ├── cube: CubeState               // facelets after the scramble
//! ├── history: SolveHistory         // newest first
//! ├── session_id: String            // uuid v4, one per run
//! ├── rng: StdRng                   // scramble source
//! ├── show_cube: bool               // display setting
//! └── status_message: String        // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Local, Utc};
use log::info;
use rand::rngs::StdRng;

use crate::core::config::ResolvedConfig;
use crate::core::cube::CubeState;
use crate::core::moves::{Move, format_sequence};
use crate::core::scramble::{SCRAMBLE_LENGTH, generate_moves, scrambled_state};
use crate::core::solve::SolveHistory;
use crate::core::stats::{Stats, calculate_stats};
use crate::core::timer::TimerMachine;

/// Time source for the core. The machine takes `now` on every call; the App
/// reads it from here so tests can drive time by hand.
pub trait Clock: Send + Sync {
    /// Monotonic time for the timer machine.
    fn now(&self) -> Instant;
    /// Wall-clock time for solve timestamps.
    fn wall(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn wall(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

pub struct App {
    pub clock: Arc<dyn Clock>,
    pub machine: TimerMachine,
    pub scramble: Vec<Move>,
    pub cube: CubeState,
    pub history: SolveHistory,
    pub session_id: String,
    pub show_cube: bool,
    pub status_message: String,
    rng: StdRng,
}

impl App {
    pub fn new(clock: Arc<dyn Clock>, config: &ResolvedConfig, rng: StdRng) -> Self {
        let mut app = Self {
            clock,
            machine: TimerMachine::new(config.timer.clone()),
            scramble: Vec::new(),
            cube: CubeState::solved(),
            history: SolveHistory::new(),
            session_id: crate::core::history::new_session_id(),
            show_cube: config.show_cube,
            status_message: String::from("Hold the timer key to start"),
            rng,
        };
        app.regenerate_scramble();
        app
    }

    pub fn with_history(mut self, history: SolveHistory) -> Self {
        self.history = history;
        self
    }

    /// Scramble as displayed: space-delimited notation.
    pub fn scramble_text(&self) -> String {
        format_sequence(&self.scramble)
    }

    /// Regenerate the scramble and drop any attempt in progress.
    pub fn new_scramble(&mut self) {
        self.machine.reset();
        self.regenerate_scramble();
    }

    /// Regenerate the scramble without touching the timer.
    pub(crate) fn regenerate_scramble(&mut self) {
        self.scramble = generate_moves(&mut self.rng, SCRAMBLE_LENGTH);
        self.cube = scrambled_state(&self.scramble);
        info!("New scramble: {}", self.scramble_text());
    }

    /// Aggregates over the whole history, "today" in local time.
    pub fn stats(&self) -> Stats {
        let now = self.clock.wall().with_timezone(&Local);
        calculate_stats(self.history.as_slice(), &now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cube::apply_move;
    use crate::core::timer::TimerStatus;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.machine.status(), TimerStatus::Idle);
        assert_eq!(app.scramble.len(), SCRAMBLE_LENGTH);
        assert!(app.history.is_empty());
        assert!(app.show_cube);
        assert_eq!(app.session_id.len(), 36);
    }

    #[test]
    fn test_cube_matches_scramble() {
        let app = test_app();
        let expected = app
            .scramble
            .iter()
            .fold(CubeState::solved(), |state, mv| apply_move(&state, *mv));
        assert_eq!(app.cube, expected);
        assert!(!app.cube.is_solved());
    }

    #[test]
    fn test_new_scramble_changes_moves() {
        let mut app = test_app();
        let before = app.scramble_text();
        app.new_scramble();
        assert_ne!(app.scramble_text(), before);
        assert_eq!(app.scramble.len(), SCRAMBLE_LENGTH);
    }
}
