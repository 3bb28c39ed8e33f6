//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The poll timeout follows what the timer machine is waiting for:
//!
//! - **Sampling** (inspection countdown or running clock): wakes every ~16ms
//!   and redraws each time so the display keeps up.
//! - **Holding**: sleeps until the hold deadline, so `ready` shows on time.
//! - **Idle**: sleeps up to 250ms, only redraws on events or resize.
//!
//! All pending events are drained before the next draw.

mod component;
mod components;
mod event;
mod ui;

use std::io::{self, stdout};
use std::time::{Duration, Instant};

use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use log::{debug, info, warn};

use crate::core::action::{Action, Effect, update};
use crate::core::history;
use crate::core::input::{EdgeKind, InputEdge, Key};
use crate::core::state::App;
use crate::core::timer::{TimerConfig, TimerStatus};
use crate::tui::event::{ReleaseSynthesizer, TuiEvent, poll_event_immediate, poll_event_timeout};

/// Poll timeout when nothing is pending.
const IDLE_POLL: Duration = Duration::from_millis(250);
/// Draws a new scramble when pressed outside an attempt.
const NEW_SCRAMBLE_KEY: Key = Key::Char('n');

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> io::Result<Self> {
        // Release events are what hold-to-start runs on. Terminals that
        // don't speak the protocol ignore the push.
        execute!(
            stdout(),
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
    }
}

/// How long to block waiting for input before the core needs a tick.
fn poll_timeout(now: Instant, deadlines: impl IntoIterator<Item = Option<Instant>>) -> Duration {
    deadlines
        .into_iter()
        .flatten()
        .map(|deadline| deadline.saturating_duration_since(now))
        .fold(IDLE_POLL, Duration::min)
}

/// Map a key edge that took effect at `at` to an action. `n` draws a new
/// scramble between attempts unless it is bound to the timer.
fn route_edge(edge: InputEdge, at: Instant, config: &TimerConfig, status: TimerStatus) -> Action {
    let bound = edge.key == config.timer_hotkey
        || (config.use_inspection && edge.key == config.inspection_hotkey);
    let between_attempts = matches!(status, TimerStatus::Idle | TimerStatus::Finished);

    if edge.key == NEW_SCRAMBLE_KEY
        && edge.kind == EdgeKind::Press
        && !edge.modifiers.is_chord()
        && !bound
        && between_attempts
    {
        Action::NewScramble
    } else {
        Action::InputAt(edge, at)
    }
}

/// Run `action` and carry out its effect. Returns true when the app should quit.
fn dispatch(app: &mut App, action: Action, persist: bool) -> bool {
    match update(app, action) {
        Effect::Quit => true,
        Effect::SolveCompleted(_) if persist => {
            if let Err(e) = history::save_history(&app.history) {
                warn!("Failed to save history: {}", e);
                app.status_message = format!("History not saved: {}", e);
            }
            false
        }
        Effect::SolveCompleted(_) | Effect::None => false,
    }
}

/// Feed one key edge through the release synthesizer, when there is one,
/// into the core. Returns true when the app should quit.
fn handle_edge(
    app: &mut App,
    synth: &mut Option<ReleaseSynthesizer>,
    edge: InputEdge,
    persist: bool,
) -> bool {
    let now = app.clock.now();
    let edges = match synth.as_mut() {
        Some(s) => s.on_edge(edge, now),
        None => vec![(edge, now)],
    };

    let mut quit = false;
    for (edge, at) in edges {
        let action = route_edge(edge, at, app.machine.config(), app.machine.status());
        quit |= dispatch(app, action, persist);
    }
    quit
}

/// A possible tap is down while the hold timer runs. Ticking now could make
/// the attempt `ready` before the tap's release is known, so ticks wait.
fn awaiting_tap(app: &App, synth: &Option<ReleaseSynthesizer>) -> bool {
    app.machine.status() == TimerStatus::Holding
        && synth.as_ref().is_some_and(ReleaseSynthesizer::tap_pending)
}

/// The time-driven half of a loop turn: deliver a due synthetic release,
/// then tick the core if it is waiting on time. Returns (quit, redraw).
fn advance(app: &mut App, synth: &mut Option<ReleaseSynthesizer>, persist: bool) -> (bool, bool) {
    let mut quit = false;
    let mut redraw = false;

    if let Some((release, at)) = synth.as_mut().and_then(|s| s.due(app.clock.now())) {
        debug!("Synthetic release of {}", release.key);
        quit |= dispatch(app, Action::InputAt(release, at), persist);
        redraw = true;
    }

    if app.machine.next_wakeup().is_some() && !awaiting_tap(app, synth) {
        let before = app.machine.status();
        quit |= dispatch(app, Action::Tick, persist);
        // A live sampler changes the display every tick.
        redraw |= app.machine.sampler().is_some() || app.machine.status() != before;
    }

    (quit, redraw)
}

pub fn run(mut app: App, persist: bool) -> io::Result<()> {
    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let mut synth = match crossterm::terminal::supports_keyboard_enhancement() {
        Ok(true) => None,
        Ok(false) | Err(_) => {
            warn!("Terminal may not report key releases, synthesizing them from repeats");
            Some(ReleaseSynthesizer::new())
        }
    };

    let mut needs_redraw = true; // Force first frame
    let mut should_quit = false;

    while !should_quit {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app))?;
            needs_redraw = false;
        }

        let machine_wakeup = if awaiting_tap(&app, &synth) {
            None
        } else {
            app.machine.next_wakeup()
        };
        let timeout = poll_timeout(
            app.clock.now(),
            [
                machine_wakeup,
                synth.as_ref().and_then(ReleaseSynthesizer::deadline),
            ],
        );

        // Process first event + drain ALL pending events before next draw
        let mut next = poll_event_timeout(timeout)?;
        while let Some(event) = next {
            needs_redraw = true;
            match event {
                TuiEvent::Resize => {}
                TuiEvent::Quit => should_quit |= dispatch(&mut app, Action::Quit, persist),
                TuiEvent::Repeat => {
                    if synth.take().is_some() {
                        info!("Terminal reports key event kinds, using real releases");
                    }
                }
                TuiEvent::Edge(edge) => {
                    should_quit |= handle_edge(&mut app, &mut synth, edge, persist);
                }
            }
            next = poll_event_immediate()?;
        }

        let (quit, redraw) = advance(&mut app, &mut synth, persist);
        should_quit |= quit;
        needs_redraw |= redraw;
    }

    ratatui::restore();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::Modifiers;
    use crate::test_support::{ManualClock, test_app_with};

    #[test]
    fn test_poll_timeout_takes_earliest_deadline() {
        let now = Instant::now();
        let hold = Some(now + Duration::from_millis(40));
        let sample = Some(now + Duration::from_millis(16));
        assert_eq!(poll_timeout(now, [hold, sample]), Duration::from_millis(16));
        assert_eq!(poll_timeout(now, [None, None]), IDLE_POLL);
        assert_eq!(
            poll_timeout(now, [Some(now + Duration::from_secs(5))]),
            IDLE_POLL
        );
    }

    #[test]
    fn test_poll_timeout_overdue_is_zero() {
        let now = Instant::now();
        let past = now.checked_sub(Duration::from_millis(5));
        assert_eq!(poll_timeout(now, [past]), Duration::ZERO);
    }

    #[test]
    fn test_route_new_scramble_between_attempts() {
        let config = TimerConfig::default();
        let now = Instant::now();
        let press_n = InputEdge::press(Key::Char('n'));
        assert_eq!(
            route_edge(press_n, now, &config, TimerStatus::Idle),
            Action::NewScramble
        );
        assert_eq!(
            route_edge(press_n, now, &config, TimerStatus::Running),
            Action::InputAt(press_n, now)
        );
        let release_n = InputEdge::release(Key::Char('n'));
        assert_eq!(
            route_edge(release_n, now, &config, TimerStatus::Idle),
            Action::InputAt(release_n, now)
        );
    }

    #[test]
    fn test_route_respects_bound_n() {
        let config = TimerConfig {
            timer_hotkey: Key::Char('n'),
            ..TimerConfig::default()
        };
        let now = Instant::now();
        let press_n = InputEdge::press(Key::Char('n'));
        assert_eq!(
            route_edge(press_n, now, &config, TimerStatus::Idle),
            Action::InputAt(press_n, now)
        );
    }

    #[test]
    fn test_route_ignores_chorded_n() {
        let ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::NONE
        };
        let now = Instant::now();
        let edge = InputEdge::press(Key::Char('n')).with_modifiers(ctrl);
        assert_eq!(
            route_edge(edge, now, &TimerConfig::default(), TimerStatus::Idle),
            Action::InputAt(edge, now)
        );
    }

    /// Loop turns every 16 ms for `ms` milliseconds with no input.
    fn idle_for(
        clock: &ManualClock,
        app: &mut App,
        synth: &mut Option<ReleaseSynthesizer>,
        ms: u64,
    ) {
        for _ in 0..ms / 16 {
            clock.advance(16);
            advance(app, synth, false);
        }
    }

    #[test]
    fn test_tap_on_press_only_terminal_does_not_start() {
        let clock = ManualClock::new();
        let mut app = test_app_with(clock.clone(), TimerConfig::default());
        let mut synth = Some(ReleaseSynthesizer::new());

        handle_edge(&mut app, &mut synth, InputEdge::press(Key::Space), false);
        assert_eq!(app.machine.status(), TimerStatus::Holding);
        assert!(awaiting_tap(&app, &synth));

        idle_for(&clock, &mut app, &mut synth, 1_000);
        assert_eq!(app.machine.status(), TimerStatus::Idle);
        assert!(app.machine.next_wakeup().is_none());
        assert!(synth.as_ref().and_then(ReleaseSynthesizer::deadline).is_none());
        assert!(app.history.is_empty());
    }

    #[test]
    fn test_held_key_on_press_only_terminal_starts() {
        let clock = ManualClock::new();
        let mut app = test_app_with(clock.clone(), TimerConfig::default());
        let mut synth = Some(ReleaseSynthesizer::new());
        let space = InputEdge::press(Key::Space);

        handle_edge(&mut app, &mut synth, space, false);
        idle_for(&clock, &mut app, &mut synth, 496);
        // Auto-repeat keeps the key down past the hold duration.
        for _ in 0..10 {
            handle_edge(&mut app, &mut synth, space, false);
            idle_for(&clock, &mut app, &mut synth, 32);
        }
        assert_eq!(app.machine.status(), TimerStatus::Ready);

        idle_for(&clock, &mut app, &mut synth, 208);
        assert_eq!(app.machine.status(), TimerStatus::Running);
    }

    #[test]
    fn test_real_releases_tick_without_waiting() {
        let clock = ManualClock::new();
        let mut app = test_app_with(clock.clone(), TimerConfig::default());
        let mut synth = None;

        handle_edge(&mut app, &mut synth, InputEdge::press(Key::Space), false);
        assert!(!awaiting_tap(&app, &synth));
        idle_for(&clock, &mut app, &mut synth, 560);
        assert_eq!(app.machine.status(), TimerStatus::Ready);

        handle_edge(&mut app, &mut synth, InputEdge::release(Key::Space), false);
        assert_eq!(app.machine.status(), TimerStatus::Running);
    }
}
