//! Scramble notation for the next attempt, wrapped to the available width.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::tui::component::Component;

pub struct ScrambleBar {
    pub scramble: String,
}

impl ScrambleBar {
    pub fn new(scramble: String) -> Self {
        Self { scramble }
    }

    /// Rows needed at `width`, borders included.
    pub fn height(&self, width: u16) -> u16 {
        let paragraph = Paragraph::new(self.scramble.as_str()).wrap(Wrap { trim: true });
        paragraph.line_count(width.saturating_sub(2)) as u16 + 2
    }
}

impl Component for ScrambleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new(self.scramble.as_str())
            .block(
                Block::bordered()
                    .title("Scramble")
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}
