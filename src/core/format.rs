//! Display strings for times, inspection countdowns and averages.

use crate::core::solve::Penalty;
use crate::core::stats::Average;
use crate::core::timer::DNS_OVERTIME_MS;

/// `s.cc` under a minute, `m:ss.cc` above. Centiseconds are truncated.
pub fn format_time(ms: u64) -> String {
    let centis = (ms % 1000) / 10;
    let seconds = (ms / 1000) % 60;
    let minutes = ms / 60_000;

    if minutes > 0 {
        format!("{minutes}:{seconds:02}.{centis:02}")
    } else {
        format!("{seconds}.{centis:02}")
    }
}

/// Like `format_time`, with a missing time shown as `0.00`.
pub fn format_optional_time(ms: Option<u64>) -> String {
    format_time(ms.unwrap_or(0))
}

/// Inspection display: whole seconds left while counting down, `+s.cc`
/// during the overtime grace, `DNS` after it.
pub fn format_inspection(remaining_ms: i64, penalty: Option<Penalty>) -> String {
    if penalty == Some(Penalty::Dns) || remaining_ms < -DNS_OVERTIME_MS {
        return "DNS".to_string();
    }
    if remaining_ms >= 0 {
        let whole = (remaining_ms + 999) / 1000;
        whole.to_string()
    } else {
        format!("+{}", format_time(remaining_ms.unsigned_abs()))
    }
}

pub fn format_average(average: Average) -> String {
    match average {
        Average::NotEnough => "-".to_string(),
        Average::Dnf => "DNF".to_string(),
        Average::Time(ms) => format_time(ms),
    }
}
