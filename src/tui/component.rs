use ratatui::Frame;
use ratatui::layout::Rect;

/// A reusable UI component.
///
/// Components receive everything they show as props (struct fields) built
/// from a read-only view of the core `App`, and render into a given `Rect`.
///
/// The `render` method takes `&mut self` so a component may keep
/// presentation caches, in line with ratatui's `StatefulWidget` pattern.
pub trait Component {
    /// Render the component into the given area.
    fn render(&mut self, frame: &mut Frame, area: Rect);
}
