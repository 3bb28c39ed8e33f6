//! # CubeNet Component
//!
//! Unfolded view of the scrambled cube, two terminal cells per sticker:
//!
//! ```text
//!         U
//!   L  F  R  B
//!         D
//! ```

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color as TermColor, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::core::cube::{Color, CubeState};
use crate::core::moves::Face;
use crate::tui::component::Component;

const STICKER: &str = "██";
const GAP: &str = "      ";

/// Width and height of the net, borders included.
pub const NET_WIDTH: u16 = 12 * 2 + 2;
pub const NET_HEIGHT: u16 = 9 + 2;

pub struct CubeNet {
    pub cube: CubeState,
}

impl CubeNet {
    pub fn new(cube: CubeState) -> Self {
        Self { cube }
    }

    pub fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::with_capacity(9);
        for row in 0..3 {
            lines.push(self.band(&[Face::U], row, true));
        }
        for row in 0..3 {
            lines.push(self.band(&[Face::L, Face::F, Face::R, Face::B], row, false));
        }
        for row in 0..3 {
            lines.push(self.band(&[Face::D], row, true));
        }
        lines
    }

    fn band(&self, faces: &[Face], row: usize, indent: bool) -> Line<'static> {
        let mut spans = Vec::with_capacity(13);
        if indent {
            spans.push(Span::raw(GAP));
        }
        for &face in faces {
            let stickers = self.cube.face(face);
            for col in 0..3 {
                let color = stickers[row * 3 + col];
                spans.push(Span::styled(STICKER, Style::default().fg(term_color(color))));
            }
        }
        Line::from(spans)
    }
}

pub fn term_color(color: Color) -> TermColor {
    match color {
        Color::White => TermColor::White,
        Color::Yellow => TermColor::Yellow,
        Color::Orange => TermColor::Indexed(208),
        Color::Red => TermColor::Red,
        Color::Green => TermColor::Green,
        Color::Blue => TermColor::Blue,
    }
}

impl Component for CubeNet {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new(self.lines()).block(
            Block::bordered()
                .title("Cube")
                .border_style(Style::default().fg(TermColor::DarkGray)),
        );
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cube::apply_scramble;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn fg_at(line: &Line, span: usize) -> Option<TermColor> {
        line.spans[span].style.fg
    }

    #[test]
    fn test_solved_net_layout() {
        let lines = CubeNet::new(CubeState::solved()).lines();
        assert_eq!(lines.len(), 9);
        // U band: indent + 3 stickers, all white.
        assert_eq!(lines[0].spans.len(), 4);
        assert_eq!(fg_at(&lines[0], 1), Some(TermColor::White));
        // Middle band: L F R B.
        assert_eq!(lines[4].spans.len(), 12);
        assert_eq!(fg_at(&lines[4], 0), Some(TermColor::Indexed(208)));
        assert_eq!(fg_at(&lines[4], 3), Some(TermColor::Green));
        assert_eq!(fg_at(&lines[4], 6), Some(TermColor::Red));
        assert_eq!(fg_at(&lines[4], 9), Some(TermColor::Blue));
        assert_eq!(fg_at(&lines[8], 3), Some(TermColor::Yellow));
    }

    #[test]
    fn test_u_turn_shows_on_front_top_row() {
        let cube = apply_scramble(&CubeState::solved(), "U").unwrap();
        let lines = CubeNet::new(cube).lines();
        // After U, the front top row carries the right face's colour.
        assert_eq!(fg_at(&lines[3], 3), Some(TermColor::Red));
        assert_eq!(fg_at(&lines[4], 3), Some(TermColor::Green));
    }

    #[test]
    fn test_render_fits_declared_size() {
        let backend = TestBackend::new(NET_WIDTH, NET_HEIGHT);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut net = CubeNet::new(CubeState::solved());
        terminal.draw(|f| net.render(f, f.area())).unwrap();

        let buffer = terminal.backend().buffer();
        // Last sticker of the middle band sits just inside the right border.
        assert_eq!(buffer[(NET_WIDTH - 2, 5u16)].symbol(), "█");
        assert_eq!(buffer[(NET_WIDTH - 2, 5u16)].fg, TermColor::Blue);
    }
}
