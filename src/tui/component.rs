use ratatui::Frame;
use ratatui::layout::Rect;

/// A reusable UI component.
///
/// Components follow the React pattern:
/// - They receive data via props (struct fields).
/// - They render to a `Frame` within a given `Rect`.
/// - Clickable components record where they drew their targets, so the
///   event loop can hit-test the next click against the last frame.
///
/// `render` takes `&mut self` so components can fill those region caches
/// (and adjust presentation state such as scroll offsets) while drawing.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}
