//! # Statistics
//!
//! Aggregates derived from the solve history. Nothing here is stored; it is
//! recomputed from the newest-first records whenever the UI asks.

use chrono::{DateTime, TimeZone, Utc};

use crate::core::solve::SolveRecord;

/// A WCA rolling average over the most recent solves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Average {
    /// Fewer solves than the window.
    NotEnough,
    /// More than one DNS in the window.
    Dnf,
    Time(u64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stats {
    pub count: usize,
    /// Fastest non-DNS time, if any.
    pub best_single: Option<u64>,
    pub today_count: usize,
    pub mean: Option<u64>,
    pub ao5: Average,
    pub ao12: Average,
}

/// Compute stats for `solves` (newest first). "Today" starts at midnight in
/// the timezone of `now`.
pub fn calculate_stats<Tz: TimeZone>(solves: &[SolveRecord], now: &DateTime<Tz>) -> Stats {
    let valid: Vec<u64> = solves.iter().filter_map(SolveRecord::valid_time).collect();

    let start_of_today = now
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .and_then(|midnight| now.timezone().from_local_datetime(&midnight).earliest())
        .map(|start| start.with_timezone(&Utc));

    let today_count = match start_of_today {
        Some(start) => solves.iter().filter(|s| s.created_at >= start).count(),
        None => 0,
    };

    let mean = if valid.is_empty() {
        None
    } else {
        Some(rounded_mean(&valid))
    };

    Stats {
        count: solves.len(),
        best_single: valid.iter().copied().min(),
        today_count,
        mean,
        ao5: average_of(solves, 5),
        ao12: average_of(solves, 12),
    }
}

/// WCA average of the newest `n` solves: drop the best and the worst, mean
/// the rest. A DNS counts as the worst result; two of them make it DNF.
pub fn average_of(solves: &[SolveRecord], n: usize) -> Average {
    if n < 3 || solves.len() < n {
        return Average::NotEnough;
    }

    let window = &solves[..n];
    let dns_count = window.iter().filter(|s| s.valid_time().is_none()).count();
    if dns_count > 1 {
        return Average::Dnf;
    }

    // DNS sorts last so it is the one trimmed as worst.
    let mut times: Vec<u64> = window
        .iter()
        .map(|s| s.valid_time().unwrap_or(u64::MAX))
        .collect();
    times.sort_unstable();

    Average::Time(rounded_mean(&times[1..n - 1]))
}

fn rounded_mean(times: &[u64]) -> u64 {
    let sum: u64 = times.iter().sum();
    let len = times.len() as u64;
    (sum + len / 2) / len
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::solve::{Completion, Penalty};

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn solve(ms: u64, created: i64) -> SolveRecord {
        let completion = Completion {
            duration_ms: Some(ms),
            penalty: None,
        };
        SolveRecord::new(completion, "R U", at(created), None)
    }

    fn dns(created: i64) -> SolveRecord {
        let completion = Completion {
            duration_ms: None,
            penalty: Some(Penalty::Dns),
        };
        SolveRecord::new(completion, "R U", at(created), None)
    }

    // 2023-11-14 22:13:20 UTC
    const NOW: i64 = 1_700_000_000;
    const DAY: i64 = 86_400;

    #[test]
    fn test_empty_history() {
        let stats = calculate_stats(&[], &at(NOW));
        assert_eq!(stats.count, 0);
        assert_eq!(stats.best_single, None);
        assert_eq!(stats.today_count, 0);
        assert_eq!(stats.mean, None);
        assert_eq!(stats.ao5, Average::NotEnough);
    }

    #[test]
    fn test_best_single_skips_dns() {
        let solves = vec![dns(NOW), solve(12_000, NOW - 10), solve(9_500, NOW - 20)];
        let stats = calculate_stats(&solves, &at(NOW));
        assert_eq!(stats.best_single, Some(9_500));
        assert_eq!(stats.mean, Some(10_750));
    }

    #[test]
    fn test_today_count_uses_midnight() {
        let solves = vec![
            solve(10_000, NOW),
            solve(10_000, NOW - 3_600),
            solve(10_000, NOW - DAY),
        ];
        let stats = calculate_stats(&solves, &at(NOW));
        assert_eq!(stats.today_count, 2);
    }

    #[test]
    fn test_ao5_trims_best_and_worst() {
        let solves: Vec<_> = [10_000, 12_000, 8_000, 11_000, 30_000]
            .iter()
            .enumerate()
            .map(|(i, &ms)| solve(ms, NOW - i as i64))
            .collect();
        assert_eq!(average_of(&solves, 5), Average::Time(11_000));
    }

    #[test]
    fn test_ao5_single_dns_counts_as_worst() {
        let mut solves: Vec<_> = [10_000, 12_000, 8_000, 11_000]
            .iter()
            .enumerate()
            .map(|(i, &ms)| solve(ms, NOW - i as i64))
            .collect();
        solves.push(dns(NOW - 10));
        assert_eq!(average_of(&solves, 5), Average::Time(11_000));
    }

    #[test]
    fn test_ao5_two_dns_is_dnf() {
        let solves = vec![
            dns(NOW),
            solve(10_000, NOW - 1),
            dns(NOW - 2),
            solve(9_000, NOW - 3),
            solve(8_000, NOW - 4),
        ];
        assert_eq!(average_of(&solves, 5), Average::Dnf);
    }

    #[test]
    fn test_average_uses_newest_window_only() {
        let solves: Vec<_> = (0..7).map(|i| solve(10_000 + i * 1_000, NOW - i as i64)).collect();
        // Newest five: 10,11,12,13,14 s -> trimmed mean 12 s
        assert_eq!(average_of(&solves, 5), Average::Time(12_000));
        assert_eq!(average_of(&solves, 12), Average::NotEnough);
    }
}
