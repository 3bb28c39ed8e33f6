//! Session statistics followed by the most recent solves.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::core::format::{format_average, format_optional_time, format_time};
use crate::core::solve::SolveRecord;
use crate::core::stats::Stats;
use crate::tui::component::Component;

pub const PANEL_WIDTH: u16 = 24;

pub struct StatsPanel<'a> {
    pub stats: Stats,
    /// Newest first.
    pub recent: &'a [SolveRecord],
}

impl<'a> StatsPanel<'a> {
    pub fn new(stats: Stats, recent: &'a [SolveRecord]) -> Self {
        Self { stats, recent }
    }

    pub fn lines(&self, max_recent: usize) -> Vec<Line<'static>> {
        let label = Style::default().fg(Color::DarkGray);
        let row = |name: &str, value: String| {
            Line::from(vec![Span::styled(format!("{name:<7}"), label), Span::raw(value)])
        };

        let mut lines = vec![
            row(
                "solves",
                format!("{} ({} today)", self.stats.count, self.stats.today_count),
            ),
            row("best", self.stats.best_single.map(format_time).unwrap_or_else(|| "-".into())),
            row("mean", self.stats.mean.map(format_time).unwrap_or_else(|| "-".into())),
            row("ao5", format_average(self.stats.ao5)),
            row("ao12", format_average(self.stats.ao12)),
            Line::default(),
        ];

        for (i, record) in self.recent.iter().take(max_recent).enumerate() {
            let number = self.recent.len() - i;
            let value = match record.penalty {
                Some(penalty) => Span::styled(
                    penalty.to_string(),
                    Style::default().fg(Color::Red).add_modifier(Modifier::DIM),
                ),
                None => Span::raw(format_optional_time(record.duration_ms)),
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{number:>4}. "), label),
                value,
            ]));
        }
        lines
    }
}

impl Component for StatsPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let summary_rows = 6;
        let max_recent = (area.height.saturating_sub(2) as usize).saturating_sub(summary_rows);
        let paragraph = Paragraph::new(self.lines(max_recent)).block(
            Block::bordered()
                .title("Stats")
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::solve::{Completion, Penalty};
    use crate::core::stats::calculate_stats;
    use chrono::{TimeZone, Utc};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn records() -> Vec<SolveRecord> {
        let at = |secs| Utc.timestamp_opt(secs, 0).unwrap();
        let solve = |ms, secs| {
            SolveRecord::new(
                Completion {
                    duration_ms: Some(ms),
                    penalty: None,
                },
                "R U",
                at(secs),
                None,
            )
        };
        let dns = SolveRecord::new(
            Completion {
                duration_ms: None,
                penalty: Some(Penalty::Dns),
            },
            "R U",
            at(1_700_000_300),
            None,
        );
        vec![dns, solve(9_870, 1_700_000_200), solve(11_020, 1_700_000_100)]
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_lines_summarize_and_list_newest_first() {
        let records = records();
        let stats = calculate_stats(&records, &Utc.timestamp_opt(1_700_000_400, 0).unwrap());
        let lines = StatsPanel::new(stats, &records).lines(10);

        assert!(line_text(&lines[0]).contains("3 (3 today)"));
        assert!(line_text(&lines[1]).contains("9.87"));
        assert!(line_text(&lines[3]).contains('-'));
        assert_eq!(line_text(&lines[6]).trim(), "3. DNS");
        assert_eq!(line_text(&lines[7]).trim(), "2. 9.87");
        assert_eq!(line_text(&lines[8]).trim(), "1. 11.02");
    }

    #[test]
    fn test_recent_list_is_capped() {
        let records = records();
        let stats = calculate_stats(&records, &Utc.timestamp_opt(1_700_000_400, 0).unwrap());
        let lines = StatsPanel::new(stats, &records).lines(1);
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn test_render_small_area() {
        let records = records();
        let stats = calculate_stats(&records, &Utc.timestamp_opt(1_700_000_400, 0).unwrap());
        let backend = TestBackend::new(PANEL_WIDTH, 4);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut panel = StatsPanel::new(stats, &records);
        terminal.draw(|f| panel.render(f, f.area())).unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Stats"));
        assert!(text.contains("solves"));
    }
}
