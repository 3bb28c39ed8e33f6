//! # Core Application Logic
//!
//! This module contains the timer's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Cube engine          │
//!                    │  • Timer machine        │
//!                    │  • State + Action       │
//!                    │  • update() (reducer)   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │   config   │      │  history   │
//!     │  Adapter   │      │  (TOML)    │      │  (JSON)    │
//!     │ (ratatui)  │      │            │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`moves`], [`cube`], [`scramble`]: facelet cube and move notation
//! - [`timer`]: the hold / inspection / solve state machine
//! - [`solve`], [`stats`], [`format`]: records and what is derived from them
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum, everything that can happen in the app
//! - [`config`], [`history`]: the only modules that touch the filesystem

pub mod action;
pub mod config;
pub mod cube;
pub mod format;
pub mod history;
pub mod input;
pub mod moves;
pub mod scramble;
pub mod solve;
pub mod state;
pub mod stats;
pub mod timer;
