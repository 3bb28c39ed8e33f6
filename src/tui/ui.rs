//! Frame layout. Builds every component from the `App` and places it.
//!
//! ```text
//! ┌ title bar ─────────────────────────────────────┐
//! ├ scramble ──────────────────────────────────────┤
//! │ ┌ timer ──────────────────────┐ ┌ stats ─────┐ │
//! │ │            12.34            │ │ best  9.87 │ │
//! │ └─────────────────────────────┘ │ ...        │ │
//! │ ┌ cube ──────────┐              │            │ │
//! │ └────────────────┘              └────────────┘ │
//! └ help line ─────────────────────────────────────┘
//! ```
//!
//! While an attempt is in progress (inspecting or running) only the title
//! bar and the timer are drawn.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;

use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::cube_net::{NET_HEIGHT, NET_WIDTH};
use crate::tui::components::stats_panel::PANEL_WIDTH;
use crate::tui::components::{CubeNet, ScrambleBar, StatsPanel, TimerDisplay, TitleBar};

pub fn draw_ui(frame: &mut Frame, app: &App) {
    use Constraint::{Length, Min};

    let status = app.machine.status();
    let mut title_bar = TitleBar::new(
        status,
        app.status_message.clone(),
        app.machine.config().use_inspection,
    );
    let mut timer = TimerDisplay::from_machine(&app.machine);

    if status.is_focus() {
        let [title_area, timer_area] = Layout::vertical([Length(1), Min(0)]).areas(frame.area());
        title_bar.render(frame, title_area);
        timer.render(frame, timer_area);
        return;
    }

    let mut scramble = ScrambleBar::new(app.scramble_text());
    let scramble_height = scramble.height(frame.area().width);
    let [title_area, scramble_area, body_area, help_area] =
        Layout::vertical([Length(1), Length(scramble_height), Min(0), Length(1)])
            .areas(frame.area());

    title_bar.render(frame, title_area);
    scramble.render(frame, scramble_area);

    let [left_area, stats_area] = Layout::horizontal([Min(0), Length(PANEL_WIDTH)]).areas(body_area);
    let mut stats = StatsPanel::new(app.stats(), app.history.as_slice());
    stats.render(frame, stats_area);

    if app.show_cube && left_area.height >= NET_HEIGHT + 3 {
        let [timer_area, cube_row] = Layout::vertical([Min(3), Length(NET_HEIGHT)]).areas(left_area);
        timer.render(frame, timer_area);
        let [cube_area] = Layout::horizontal([Length(NET_WIDTH)])
            .flex(ratatui::layout::Flex::Center)
            .areas(cube_row);
        CubeNet::new(app.cube).render(frame, cube_area);
    } else {
        timer.render(frame, left_area);
    }

    draw_help(frame, help_area, app);
}

fn draw_help(frame: &mut Frame, area: Rect, app: &App) {
    let config = app.machine.config();
    let mut text = format!("hold {} to start", config.timer_hotkey);
    if config.use_inspection {
        text.push_str(&format!(" · {} inspection", config.inspection_hotkey));
    }
    text.push_str(" · n new scramble · Esc quit");
    frame.render_widget(
        Line::styled(text, Style::default().fg(Color::DarkGray)),
        area,
    );
}
