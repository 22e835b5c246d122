//! # MenuBar Component
//!
//! One line of menu entries. The entry for the current screen (or its admin
//! family) is highlighted. Entries are numbered; `1`..`4` select them from
//! the keyboard.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use unicode_width::UnicodeWidthStr;

use crate::core::screen::ScreenId;
use crate::tui::component::Component;

pub struct MenuBar {
    pub current: Option<ScreenId>,
    /// Filled during render: where each entry was drawn.
    pub regions: Vec<(Rect, ScreenId)>,
}

impl MenuBar {
    pub fn new(current: Option<ScreenId>) -> Self {
        Self {
            current,
            regions: Vec::new(),
        }
    }

    fn is_current(&self, entry: ScreenId) -> bool {
        match self.current {
            Some(screen) if entry == ScreenId::AdminOverview => screen.is_admin(),
            Some(ScreenId::Edit) => entry == ScreenId::ListRecipes,
            Some(screen) => screen == entry,
            None => false,
        }
    }
}

impl Component for MenuBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.regions.clear();
        let mut x = area.x;
        for (number, entry) in ScreenId::MENU.into_iter().enumerate() {
            let label = format!(" {} {} ", number + 1, entry.title());
            let width = (label.width() as u16).min(area.right().saturating_sub(x));
            if width == 0 {
                break;
            }
            let style = if self.is_current(entry) {
                Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
            } else {
                Style::default()
            };
            let rect = Rect::new(x, area.y, width, 1);
            frame.render_widget(Span::styled(label, style), rect);
            self.regions.push((rect, entry));
            x = x.saturating_add(width + 1);
        }
    }
}
