//! # TitleBar Component
//!
//! Top status bar: program name, timer status and the latest status message.
//!
//! TitleBar is purely presentational. It receives all data as props and has
//! no internal state:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(TimerStatus::Ready, "Solve recorded".into(), true);
//! title_bar.render(frame, area);
//! ```
//!
//! ## Conditional Formatting
//!
//! 1. **Status message**: `"cubetimer [inspection] | ready | Solve recorded"`
//! 2. **Default**: `"cubetimer | idle"`

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::core::timer::TimerStatus;
use crate::tui::component::Component;

pub struct TitleBar {
    pub status: TimerStatus,
    pub status_message: String,
    /// Whether inspection is enabled for the next attempt.
    pub inspection: bool,
}

impl TitleBar {
    pub fn new(status: TimerStatus, status_message: String, inspection: bool) -> Self {
        Self {
            status,
            status_message,
            inspection,
        }
    }

    fn text(&self) -> String {
        let name = if self.inspection {
            "cubetimer [inspection]"
        } else {
            "cubetimer"
        };
        if self.status_message.is_empty() {
            format!("{} | {}", name, self.status.label())
        } else {
            format!("{} | {} | {}", name, self.status.label(), self.status_message)
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![Span::styled(
            self.text(),
            Style::default().fg(Color::Gray),
        )]);
        frame.render_widget(line, area);
    }
}
