//! # TUI Components
//!
//! All components are stateless and props-based: the layout code in `ui.rs`
//! builds each one from a read-only view of the core `App` on every frame and
//! calls `render`. Nothing here mutates core state.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs            (this file)
//! ├── title_bar.rs      (status line)
//! ├── timer_display.rs  (the big number)
//! ├── scramble_bar.rs   (scramble notation)
//! ├── cube_net.rs       (unfolded scrambled cube)
//! └── stats_panel.rs    (averages + recent solves)
//! ```

pub mod cube_net;
pub mod scramble_bar;
pub mod stats_panel;
pub mod timer_display;
mod title_bar;

pub use cube_net::CubeNet;
pub use scramble_bar::ScrambleBar;
pub use stats_panel::StatsPanel;
pub use timer_display::TimerDisplay;
pub use title_bar::TitleBar;
