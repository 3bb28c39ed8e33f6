//! # TimerDisplay Component
//!
//! The big number in the middle of the screen. What it shows depends on the
//! timer status:
//!
//! ```text
//! idle        last time            (white)
//! inspecting  countdown / +s.cc    (yellow)
//! holding     countdown or 0.00    (red)
//! ready       countdown or 0.00    (green)
//! running     elapsed              (white, bold)
//! finished    final time or DNS    (cyan)
//! ```

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};

use crate::core::format::{format_inspection, format_time};
use crate::core::solve::Penalty;
use crate::core::timer::{TimerMachine, TimerStatus};
use crate::tui::component::Component;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerDisplay {
    pub status: TimerStatus,
    pub elapsed_ms: u64,
    pub inspection_remaining_ms: i64,
    pub penalty: Option<Penalty>,
    /// An inspection countdown is still running underneath a hold.
    pub inspection_live: bool,
}

impl TimerDisplay {
    pub fn from_machine(machine: &TimerMachine) -> Self {
        Self {
            status: machine.status(),
            elapsed_ms: machine.elapsed_ms(),
            inspection_remaining_ms: machine.inspection_remaining_ms(),
            penalty: machine.penalty(),
            inspection_live: machine.inspection_live(),
        }
    }

    pub fn text(&self) -> String {
        let countdown = || format_inspection(self.inspection_remaining_ms, self.penalty);
        match self.status {
            TimerStatus::Idle | TimerStatus::Running => format_time(self.elapsed_ms),
            TimerStatus::Inspecting => countdown(),
            TimerStatus::Holding | TimerStatus::Ready if self.inspection_live => countdown(),
            TimerStatus::Holding | TimerStatus::Ready => format_time(0),
            TimerStatus::Finished => match self.penalty {
                Some(penalty) => penalty.to_string(),
                None => format_time(self.elapsed_ms),
            },
        }
    }

    pub fn style(&self) -> Style {
        match self.status {
            TimerStatus::Idle => Style::default().fg(Color::White),
            TimerStatus::Inspecting => Style::default().fg(Color::Yellow),
            TimerStatus::Holding => Style::default().fg(Color::Red),
            TimerStatus::Ready => Style::default().fg(Color::Green),
            TimerStatus::Running => Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            TimerStatus::Finished => Style::default().fg(Color::Cyan),
        }
    }
}

impl Component for TimerDisplay {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered().border_style(self.style().add_modifier(Modifier::DIM));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        // Vertically center the single line.
        let [_, middle, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(inner);

        let paragraph = Paragraph::new(Line::from(self.text()))
            .style(self.style())
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, middle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn display(status: TimerStatus) -> TimerDisplay {
        TimerDisplay {
            status,
            elapsed_ms: 12_345,
            inspection_remaining_ms: 7_200,
            penalty: None,
            inspection_live: false,
        }
    }

    #[test]
    fn test_text_per_status() {
        assert_eq!(display(TimerStatus::Idle).text(), "12.34");
        assert_eq!(display(TimerStatus::Running).text(), "12.34");
        assert_eq!(display(TimerStatus::Inspecting).text(), "8");
        assert_eq!(display(TimerStatus::Holding).text(), "0.00");
        assert_eq!(display(TimerStatus::Finished).text(), "12.34");
    }

    #[test]
    fn test_hold_during_inspection_keeps_countdown() {
        let holding = TimerDisplay {
            inspection_live: true,
            ..display(TimerStatus::Ready)
        };
        assert_eq!(holding.text(), "8");
    }

    #[test]
    fn test_finished_dns() {
        let dns = TimerDisplay {
            penalty: Some(Penalty::Dns),
            ..display(TimerStatus::Finished)
        };
        assert_eq!(dns.text(), "DNS");
    }

    #[test]
    fn test_render_centers_text() {
        let backend = TestBackend::new(30, 5);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut timer = display(TimerStatus::Running);
        terminal.draw(|f| timer.render(f, f.area())).unwrap();

        let buffer = terminal.backend().buffer();
        let middle_row: String = (0..30u16).map(|x| buffer[(x, 2u16)].symbol()).collect();
        assert!(middle_row.contains("12.34"));
    }
}
