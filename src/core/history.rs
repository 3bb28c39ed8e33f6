//! # History Persistence
//!
//! Save/load solve history to `~/.cubetimer/solves.json`.
//!
//! The file holds every recorded solve, newest first. All writes use atomic
//! rename (write `.tmp`, then `rename()`) so a crash mid-save never leaves a
//! truncated history behind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::core::config::config_dir;
use crate::core::solve::{SolveHistory, SolveRecord};

/// On-disk layout. Versioned so the format can grow.
#[derive(Serialize, Deserialize, Debug)]
struct HistoryFile {
    version: u32,
    solves: Vec<SolveRecord>,
}

const HISTORY_VERSION: u32 = 1;

/// Returns `~/.cubetimer/solves.json`.
pub fn history_path() -> io::Result<PathBuf> {
    config_dir()
        .map(|d| d.join("solves.json"))
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no home directory"))
}

/// Generate a new UUID v4 session ID.
pub fn new_session_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Atomically write `data` as JSON to `path` (via `.tmp` + rename).
fn atomic_write_json<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

pub fn save_history(history: &SolveHistory) -> io::Result<()> {
    save_history_to(&history_path()?, history)
}

pub fn save_history_to(path: &Path, history: &SolveHistory) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = HistoryFile {
        version: HISTORY_VERSION,
        solves: history.as_slice().to_vec(),
    };
    atomic_write_json(path, &file)?;
    debug!("Saved {} solves to {}", history.len(), path.display());
    Ok(())
}

/// Load the history. A missing file is an empty history, not an error.
pub fn load_history_from(path: &Path) -> io::Result<SolveHistory> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("No history at {}, starting fresh", path.display());
            return Ok(SolveHistory::new());
        }
        Err(e) => return Err(e),
    };
    let file: HistoryFile =
        serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    if file.version != HISTORY_VERSION {
        warn!(
            "History file version {} differs from {}, loading anyway",
            file.version, HISTORY_VERSION
        );
    }
    info!("Loaded {} solves from {}", file.solves.len(), path.display());
    Ok(SolveHistory::from_records(file.solves))
}

/// Load the history for a run that will save it again. An unparsable file
/// is moved aside to `solves.json.bak` so the next save can't overwrite it;
/// the backup path is returned when that happens.
pub fn load_or_backup_history() -> io::Result<(SolveHistory, Option<PathBuf>)> {
    load_or_backup_history_from(&history_path()?)
}

pub fn load_or_backup_history_from(path: &Path) -> io::Result<(SolveHistory, Option<PathBuf>)> {
    match load_history_from(path) {
        Ok(history) => Ok((history, None)),
        Err(e) if e.kind() == io::ErrorKind::InvalidData => {
            let backup = path.with_extension("json.bak");
            fs::rename(path, &backup)?;
            warn!(
                "History at {} is unreadable ({}), moved to {}",
                path.display(),
                e,
                backup.display()
            );
            Ok((SolveHistory::new(), Some(backup)))
        }
        Err(e) => Err(e),
    }
}
