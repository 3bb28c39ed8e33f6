//! # Timer State Machine
//!
//! Turns key press/release edges plus monotonic time into WCA-style timer
//! states.
//!
//! ```text
//!            inspection key                timer key
//!   ┌──────┐ ─────────────► ┌────────────┐ ─────────► ┌─────────┐
//!   │ Idle │ ◄───────────── │ Inspecting │ ◄───────── │ Holding │
//!   └──────┘ inspection key └────────────┘  early     └─────────┘
//!     ▲  │ timer key (no inspection)   │      release     │ hold elapsed
//!     │  └─────────────────────────────┼──────────────►   ▼
//!     │                          DNS   │              ┌───────┐
//!     │ release                        ▼              │ Ready │
//!   ┌──────────┐ ◄──────────────────────              └───────┘
//!   │ Finished │                                          │ release
//!   └──────────┘ ◄──────────── ┌─────────┐ ◄──────────────┘
//!        │ press → Holding     │ Running │
//!        └──────────────────►  └─────────┘  press stops the clock
//! ```
//!
//! The machine never reads a clock. Every call takes `now`, which keeps it
//! deterministic under test and lets the host decide the sampling cadence.
//!
//! ## Waiting Primitives
//!
//! There are exactly two, and each lives in a single `Option` slot:
//!
//! - the one-shot **hold timer** (`Holding` → `Ready`),
//! - the recurring **sampler** that recomputes either the inspection
//!   countdown or the solve time on every `tick`.
//!
//! Arming either replaces whatever occupied the slot, so a superseded timer
//! or sampler is gone before it could fire. Each arm is stamped with a fresh
//! `Handle`, which lets callers tell a re-arm apart from the timer they saw
//! earlier. Leaving `Inspecting`/`Running` clears the sampler slot in the
//! same call.

use std::time::{Duration, Instant};

use log::{debug, info};

use crate::core::input::{EdgeKind, InputEdge, Key};
use crate::core::solve::{Completion, Penalty};

/// WCA inspection budget.
pub const INSPECTION_BUDGET_MS: i64 = 15_000;
/// Overtime allowed after the budget before the attempt becomes DNS.
pub const DNS_OVERTIME_MS: i64 = 2_000;
/// Sampling cadence the host should tick at while a sampler is active (~60 Hz).
pub const SAMPLE_INTERVAL: Duration = Duration::from_millis(16);
pub const DEFAULT_HOLD_DURATION: Duration = Duration::from_millis(550);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerStatus {
    Idle,
    Inspecting,
    Holding,
    Ready,
    Running,
    Finished,
}

impl TimerStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TimerStatus::Idle => "idle",
            TimerStatus::Inspecting => "inspecting",
            TimerStatus::Holding => "holding",
            TimerStatus::Ready => "ready",
            TimerStatus::Running => "running",
            TimerStatus::Finished => "finished",
        }
    }

    /// Solve-in-progress states where surrounding UI should get out of the way.
    pub fn is_focus(&self) -> bool {
        matches!(self, TimerStatus::Running | TimerStatus::Inspecting)
    }
}

// ============================================================================
// Configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerConfig {
    pub use_inspection: bool,
    pub inspection_hotkey: Key,
    pub timer_hotkey: Key,
    pub hold_duration: Duration,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            use_inspection: false,
            inspection_hotkey: Key::Char('i'),
            timer_hotkey: Key::Space,
            hold_duration: DEFAULT_HOLD_DURATION,
        }
    }
}

// ============================================================================
// Timers and Samplers
// ============================================================================

/// Identity of one arming of the hold timer or the sampler. Informational:
/// cancellation is done by emptying or replacing the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoldTimer {
    pub handle: Handle,
    pub deadline: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplerKind {
    Inspection,
    Solve,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sampler {
    pub handle: Handle,
    pub kind: SamplerKind,
    /// Start of the measured interval. Samples are always `now - anchor`.
    pub anchor: Instant,
    pub last_sample: Instant,
}

/// Side effects the owner must carry out after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerOutput {
    /// An attempt ended; turn it into a `SolveRecord`.
    SolveCompleted(Completion),
    /// The next attempt needs a fresh scramble.
    ScrambleRequested,
}

// ============================================================================
// Machine
// ============================================================================

#[derive(Debug, Clone)]
pub struct TimerMachine {
    config: TimerConfig,
    staged_config: Option<TimerConfig>,
    status: TimerStatus,
    penalty: Option<Penalty>,
    elapsed_ms: u64,
    inspection_remaining_ms: i64,
    hold_timer: Option<HoldTimer>,
    sampler: Option<Sampler>,
    next_handle: u64,
}

impl Default for TimerMachine {
    fn default() -> Self {
        Self::new(TimerConfig::default())
    }
}

impl TimerMachine {
    pub fn new(config: TimerConfig) -> Self {
        Self {
            config,
            staged_config: None,
            status: TimerStatus::Idle,
            penalty: None,
            elapsed_ms: 0,
            inspection_remaining_ms: INSPECTION_BUDGET_MS,
            hold_timer: None,
            sampler: None,
            next_handle: 0,
        }
    }

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn penalty(&self) -> Option<Penalty> {
        self.penalty
    }

    /// Solve time as of the last sample, or the final time once finished.
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Inspection time left as of the last sample. Negative in overtime.
    pub fn inspection_remaining_ms(&self) -> i64 {
        self.inspection_remaining_ms
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub fn hold_timer(&self) -> Option<&HoldTimer> {
        self.hold_timer.as_ref()
    }

    pub fn sampler(&self) -> Option<&Sampler> {
        self.sampler.as_ref()
    }

    /// Whether an inspection countdown is still being sampled.
    pub fn inspection_live(&self) -> bool {
        matches!(self.sampler, Some(Sampler { kind: SamplerKind::Inspection, .. }))
    }

    /// When the host must call `tick` next, if anything is pending.
    pub fn next_wakeup(&self) -> Option<Instant> {
        let sample = self.sampler.map(|s| s.last_sample + SAMPLE_INTERVAL);
        let hold = self.hold_timer.map(|h| h.deadline);
        match (sample, hold) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Replace the configuration. Applies now when idle, otherwise on the
    /// next entry into `Idle` so an attempt in flight keeps its rules.
    pub fn set_config(&mut self, config: TimerConfig) {
        if self.status == TimerStatus::Idle {
            debug!("Timer config applied: {:?}", config);
            self.config = config;
            self.staged_config = None;
        } else {
            debug!("Timer config staged until idle: {:?}", config);
            self.staged_config = Some(config);
        }
    }

    /// Drop any attempt in progress and return to `Idle`.
    pub fn reset(&mut self) {
        self.enter_idle();
    }

    /// The sampling callback: fire due deadlines and refresh displayed times.
    pub fn tick(&mut self, now: Instant) -> Vec<TimerOutput> {
        self.fire_due(now)
    }

    pub fn handle_input(&mut self, edge: InputEdge, now: Instant) -> Vec<TimerOutput> {
        if edge.modifiers.is_chord() {
            debug!("Ignoring {:?} {} during modifier chord", edge.kind, edge.key);
            return Vec::new();
        }

        // Deadlines that passed before this edge arrived happen first.
        let mut outputs = self.fire_due(now);

        let inspection_key =
            self.config.use_inspection && edge.key == self.config.inspection_hotkey;
        let timer_key = edge.key == self.config.timer_hotkey;

        match edge.kind {
            EdgeKind::Press if inspection_key && self.status == TimerStatus::Idle => {
                self.start_inspection(now);
            }
            EdgeKind::Press if inspection_key && self.status == TimerStatus::Inspecting => {
                self.enter_idle();
            }
            EdgeKind::Press if timer_key => match self.status {
                TimerStatus::Running => {
                    outputs.push(TimerOutput::SolveCompleted(self.stop_solve(now)));
                }
                TimerStatus::Idle if !self.config.use_inspection => self.arm_hold(now),
                TimerStatus::Inspecting => self.arm_hold(now),
                TimerStatus::Finished => {
                    self.arm_hold(now);
                    outputs.push(TimerOutput::ScrambleRequested);
                }
                _ => {}
            },
            EdgeKind::Release if timer_key => match self.status {
                TimerStatus::Ready => self.start_solve(now),
                TimerStatus::Holding => self.cancel_hold(),
                TimerStatus::Finished => {
                    self.enter_idle();
                    outputs.push(TimerOutput::ScrambleRequested);
                }
                _ => {}
            },
            _ => {}
        }

        outputs
    }

    // ------------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------------

    fn fire_due(&mut self, now: Instant) -> Vec<TimerOutput> {
        let mut outputs = Vec::new();

        if let Some(hold) = self.hold_timer {
            if now >= hold.deadline && self.status == TimerStatus::Holding {
                self.hold_timer = None;
                self.set_status(TimerStatus::Ready);
            }
        }

        let Some(mut sampler) = self.sampler else {
            return outputs;
        };
        sampler.last_sample = now;
        let since_anchor = now.saturating_duration_since(sampler.anchor);

        match sampler.kind {
            SamplerKind::Solve => {
                self.elapsed_ms = since_anchor.as_millis() as u64;
                self.sampler = Some(sampler);
            }
            SamplerKind::Inspection => {
                self.inspection_remaining_ms =
                    INSPECTION_BUDGET_MS - since_anchor.as_millis() as i64;
                self.sampler = Some(sampler);
                if self.inspection_remaining_ms < -DNS_OVERTIME_MS {
                    outputs.push(TimerOutput::SolveCompleted(self.declare_dns()));
                }
            }
        }

        outputs
    }

    fn start_inspection(&mut self, now: Instant) {
        self.penalty = None;
        self.elapsed_ms = 0;
        self.inspection_remaining_ms = INSPECTION_BUDGET_MS;
        self.start_sampler(SamplerKind::Inspection, now);
        self.set_status(TimerStatus::Inspecting);
    }

    fn arm_hold(&mut self, now: Instant) {
        let handle = self.fresh_handle();
        self.hold_timer = Some(HoldTimer {
            handle,
            deadline: now + self.config.hold_duration,
        });
        self.set_status(TimerStatus::Holding);
    }

    /// Early release: back to inspection if its countdown is still going,
    /// otherwise to idle.
    fn cancel_hold(&mut self) {
        self.hold_timer = None;
        if self.inspection_live() && self.inspection_remaining_ms >= -DNS_OVERTIME_MS {
            self.set_status(TimerStatus::Inspecting);
        } else {
            self.enter_idle();
        }
    }

    fn start_solve(&mut self, now: Instant) {
        self.penalty = None;
        self.elapsed_ms = 0;
        // Replaces the inspection sampler when coming from inspection.
        self.start_sampler(SamplerKind::Solve, now);
        self.set_status(TimerStatus::Running);
    }

    fn stop_solve(&mut self, now: Instant) -> Completion {
        if let Some(sampler) = self.sampler.take() {
            self.elapsed_ms = now.saturating_duration_since(sampler.anchor).as_millis() as u64;
        }
        self.set_status(TimerStatus::Finished);
        info!("Solve finished in {} ms", self.elapsed_ms);
        Completion {
            duration_ms: Some(self.elapsed_ms),
            penalty: None,
        }
    }

    fn declare_dns(&mut self) -> Completion {
        self.sampler = None;
        self.hold_timer = None;
        self.penalty = Some(Penalty::Dns);
        self.set_status(TimerStatus::Finished);
        info!(
            "Inspection overtime ({} ms), attempt is DNS",
            self.inspection_remaining_ms
        );
        Completion {
            duration_ms: None,
            penalty: Some(Penalty::Dns),
        }
    }

    fn enter_idle(&mut self) {
        self.hold_timer = None;
        self.sampler = None;
        self.penalty = None;
        self.inspection_remaining_ms = INSPECTION_BUDGET_MS;
        if let Some(config) = self.staged_config.take() {
            debug!("Applying staged timer config: {:?}", config);
            self.config = config;
        }
        self.set_status(TimerStatus::Idle);
    }

    fn start_sampler(&mut self, kind: SamplerKind, now: Instant) {
        let handle = self.fresh_handle();
        self.sampler = Some(Sampler {
            handle,
            kind,
            anchor: now,
            last_sample: now,
        });
    }

    fn fresh_handle(&mut self) -> Handle {
        self.next_handle += 1;
        Handle(self.next_handle)
    }

    fn set_status(&mut self, status: TimerStatus) {
        if self.status != status {
            debug!("Timer: {} -> {}", self.status.label(), status.label());
        }
        self.status = status;
    }
}
