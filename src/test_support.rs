//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use chrono::{DateTime, TimeZone, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::core::config::ResolvedConfig;
use crate::core::state::{App, Clock};
use crate::core::timer::TimerConfig;

/// A clock that only moves when told to.
pub struct ManualClock {
    start: Instant,
    wall_start: DateTime<Utc>,
    offset: Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            start: Instant::now(),
            // 2023-11-14 22:13:20 UTC
            wall_start: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            offset: Mutex::new(Duration::ZERO),
        })
    }

    pub fn advance(&self, ms: u64) {
        *self.offset.lock().unwrap() += Duration::from_millis(ms);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.start + *self.offset.lock().unwrap()
    }

    fn wall(&self) -> DateTime<Utc> {
        let offset = *self.offset.lock().unwrap();
        self.wall_start + chrono::Duration::from_std(offset).unwrap()
    }
}

/// Creates a test App on a manual clock with a fixed seed.
pub fn test_app() -> App {
    test_app_with(ManualClock::new(), TimerConfig::default())
}

pub fn test_app_with(clock: Arc<ManualClock>, timer: TimerConfig) -> App {
    let config = ResolvedConfig {
        timer,
        ..ResolvedConfig::default()
    };
    App::new(clock, &config, StdRng::seed_from_u64(7))
}
