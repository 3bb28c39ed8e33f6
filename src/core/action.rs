//! # Actions
//!
//! Everything that can happen in the timer becomes an `Action`.
//! User releases Space? That's `Action::Input(InputEdge::release(Key::Space))`.
//! The sampling cadence elapsed? That's `Action::Tick`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state and returns an `Effect` the adapter must carry out. No I/O here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! This makes everything testable: drive a clock by hand, feed actions,
//! assert on `app.machine.status()`.

use std::time::Instant;

use log::{debug, info};

use crate::core::input::InputEdge;
use crate::core::solve::SolveRecord;
use crate::core::state::App;
use crate::core::timer::{TimerConfig, TimerOutput};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// A key went down or up.
    Input(InputEdge),
    /// A key edge that took effect at an earlier instant (a reconstructed
    /// release). Never later than now.
    InputAt(InputEdge, Instant),
    /// Sampling callback: fire due deadlines, refresh displayed times.
    Tick,
    /// Discard the current attempt and draw a fresh scramble.
    NewScramble,
    /// Replace timer settings (staged until idle).
    SetConfig(TimerConfig),
    Quit,
}

/// What the adapter has to do after `update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// A record was appended to the history; persist it.
    SolveCompleted(SolveRecord),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    let now = app.clock.now();
    let outputs = match action {
        Action::Input(edge) => {
            debug!("Input {:?} {}", edge.kind, edge.key);
            app.machine.handle_input(edge, now)
        }
        Action::InputAt(edge, at) => {
            debug!("Input {:?} {} (backdated)", edge.kind, edge.key);
            app.machine.handle_input(edge, at.min(now))
        }
        Action::Tick => app.machine.tick(now),
        Action::NewScramble => {
            app.new_scramble();
            app.status_message = String::from("New scramble");
            return Effect::None;
        }
        Action::SetConfig(config) => {
            app.machine.set_config(config);
            return Effect::None;
        }
        Action::Quit => return Effect::Quit,
    };

    let mut effect = Effect::None;
    for output in outputs {
        match output {
            TimerOutput::ScrambleRequested => app.regenerate_scramble(),
            TimerOutput::SolveCompleted(completion) => {
                let record = SolveRecord::new(
                    completion,
                    &app.scramble_text(),
                    app.clock.wall(),
                    Some(&app.session_id),
                );
                info!(
                    "Recorded solve {} ({:?} ms, penalty {:?})",
                    record.id, record.duration_ms, record.penalty
                );
                app.status_message = match record.penalty {
                    Some(penalty) => format!("{penalty}"),
                    None => String::from("Solve recorded"),
                };
                app.history.push(record.clone());
                effect = Effect::SolveCompleted(record);
            }
        }
    }
    effect
}
