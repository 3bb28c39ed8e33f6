//! # Solve Records
//!
//! A `SolveRecord` is created once, when the timer reaches `finished`, and
//! never changes afterwards. History keeps them newest first.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Penalty tag on a completed attempt. Only DNS is modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Penalty {
    #[serde(rename = "DNS")]
    Dns,
}

impl fmt::Display for Penalty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Penalty::Dns => write!(f, "DNS"),
        }
    }
}

/// What the timer hands over when an attempt ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    /// Elapsed solve time. `None` when the solve never started (DNS).
    pub duration_ms: Option<u64>,
    pub penalty: Option<Penalty>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveRecord {
    /// Creation time in milliseconds since the Unix epoch, as text.
    pub id: String,
    pub duration_ms: Option<u64>,
    pub scramble: String,
    pub created_at: DateTime<Utc>,
    pub penalty: Option<Penalty>,
    /// Practice session the solve belongs to (one per program run).
    #[serde(default)]
    pub session_id: Option<String>,
}

impl SolveRecord {
    pub fn new(
        completion: Completion,
        scramble: &str,
        created_at: DateTime<Utc>,
        session_id: Option<&str>,
    ) -> Self {
        Self {
            id: created_at.timestamp_millis().to_string(),
            duration_ms: completion.duration_ms,
            scramble: scramble.to_string(),
            created_at,
            penalty: completion.penalty,
            session_id: session_id.map(str::to_string),
        }
    }

    /// Time that counts for statistics: present and not penalized.
    pub fn valid_time(&self) -> Option<u64> {
        match self.penalty {
            Some(Penalty::Dns) => None,
            None => self.duration_ms,
        }
    }
}

/// Ordered solve history, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveHistory {
    solves: Vec<SolveRecord>,
}

impl SolveHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(mut solves: Vec<SolveRecord>) -> Self {
        solves.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Self { solves }
    }

    pub fn push(&mut self, record: SolveRecord) {
        self.solves.insert(0, record);
    }

    pub fn latest(&self) -> Option<&SolveRecord> {
        self.solves.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SolveRecord> {
        self.solves.iter()
    }

    pub fn as_slice(&self) -> &[SolveRecord] {
        &self.solves
    }

    pub fn len(&self) -> usize {
        self.solves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solves.is_empty()
    }
}
