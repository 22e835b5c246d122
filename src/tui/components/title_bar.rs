//! # TitleBar Component
//!
//! Top status bar: console name, the screen being shown, whether the
//! appliance controller answers, and the transient status message.
//!
//! Stateless and props-based:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new("Recipes".into(), "Loading Statistics…".into(), true);
//! title_bar.render(frame, area);
//! ```
//!
//! ## Conditional Formatting
//!
//! 1. **Status message**: `"Bar Console | Recipes | ● online | Loading…"`
//! 2. **Default**: `"Bar Console | Recipes | ● online"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    /// Title of the current screen; empty before the first screen loads.
    pub screen_title: String,
    pub status_message: String,
    /// Whether the appliance controller is reachable.
    pub online: bool,
}

impl TitleBar {
    pub fn new(screen_title: String, status_message: String, online: bool) -> Self {
        Self {
            screen_title,
            status_message,
            online,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::raw("Bar Console")];
        if !self.screen_title.is_empty() {
            spans.push(Span::raw(format!(" | {}", self.screen_title)));
        }
        let (marker, color) = if self.online {
            ("● online", Color::Green)
        } else {
            ("○ offline", Color::Red)
        };
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(marker, Style::default().fg(color)));
        if !self.status_message.is_empty() {
            spans.push(Span::raw(format!(" | {}", self.status_message)));
        }

        frame.render_widget(Line::from(spans), area);
    }
}
