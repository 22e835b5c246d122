//! # KeyboardView Component
//!
//! Draws [`LAYOUT`] with key caps in the current shift state. The key under
//! the cursor is highlighted; the caps key shows shift (yellow) and caps
//! lock (bold).

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::Block;

use crate::core::keyboard::{Key, LAYOUT};
use crate::tui::component::Component;

const KEY_WIDTH: u16 = 5;
const SPACE_WIDTH: u16 = 25;

pub struct KeyboardView {
    pub shift: bool,
    pub capslock: bool,
    /// (row, column) in [`LAYOUT`].
    pub cursor: (usize, usize),
    /// Filled during render: where each key was drawn.
    pub regions: Vec<(Rect, Key)>,
}

impl KeyboardView {
    /// Rows plus the border.
    pub const HEIGHT: u16 = LAYOUT.len() as u16 + 2;

    pub fn new(shift: bool, capslock: bool, cursor: (usize, usize)) -> Self {
        Self {
            shift,
            capslock,
            cursor,
            regions: Vec::new(),
        }
    }

    fn key_width(key: Key) -> u16 {
        match key {
            Key::Space => SPACE_WIDTH,
            _ => KEY_WIDTH,
        }
    }

    fn key_style(&self, key: Key, under_cursor: bool) -> Style {
        let mut style = Style::default();
        if key == Key::Caps {
            if self.shift {
                style = style.fg(Color::Yellow);
            }
            if self.capslock {
                style = style.add_modifier(Modifier::BOLD);
            }
        }
        if under_cursor {
            style = style.add_modifier(Modifier::REVERSED);
        }
        style
    }
}

/// Clamps a cursor into [`LAYOUT`] after moving it by (`rows`, `cols`).
pub fn move_cursor(cursor: (usize, usize), rows: isize, cols: isize) -> (usize, usize) {
    let row = (cursor.0 as isize + rows).clamp(0, LAYOUT.len() as isize - 1) as usize;
    let last = LAYOUT[row].len() as isize - 1;
    let col = (cursor.1 as isize + cols).clamp(0, last) as usize;
    (row, col)
}

impl Component for KeyboardView {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.regions.clear();
        let title = match (self.shift, self.capslock) {
            (_, true) => " Keyboard (CAPS) ",
            (true, false) => " Keyboard (Shift) ",
            _ => " Keyboard ",
        };
        let block = Block::bordered().title(title);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        for (r, row) in LAYOUT.iter().enumerate() {
            let y = inner.y + r as u16;
            if y >= inner.bottom() {
                break;
            }
            let row_width: u16 = row.iter().map(|k| Self::key_width(*k)).sum();
            let mut x = inner.x + inner.width.saturating_sub(row_width) / 2;
            for (c, key) in row.iter().enumerate() {
                let width = Self::key_width(*key).min(inner.right().saturating_sub(x));
                if width == 0 {
                    break;
                }
                let rect = Rect::new(x, y, width, 1);
                let label = format!("{:^w$}", key.label(self.shift || self.capslock), w = width as usize);
                let style = self.key_style(*key, self.cursor == (r, c));
                frame.render_widget(Span::styled(label, style), rect);
                self.regions.push((rect, *key));
                x += width;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(view: &mut KeyboardView) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, KeyboardView::HEIGHT)).unwrap();
        terminal.draw(|f| view.render(f, f.area())).unwrap();
        terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_every_key_gets_a_region() {
        let mut view = KeyboardView::new(false, false, (0, 0));
        let text = draw(&mut view);
        let total: usize = LAYOUT.iter().map(|row| row.len()).sum();
        assert_eq!(view.regions.len(), total);
        assert!(text.contains('q'));
        assert!(text.contains("space"));
    }

    #[test]
    fn test_shift_shows_upper_case() {
        let mut view = KeyboardView::new(true, false, (0, 0));
        let text = draw(&mut view);
        assert!(text.contains('Q'));
        assert!(text.contains('!'));
        assert!(text.contains("Shift"));
    }

    #[test]
    fn test_move_cursor_clamps_to_row() {
        assert_eq!(move_cursor((0, 9), 1, 0), (1, 9));
        assert_eq!(move_cursor((3, 8), 1, 0), (4, 2));
        assert_eq!(move_cursor((0, 0), -1, -1), (0, 0));
        assert_eq!(move_cursor((4, 2), 0, 5), (4, 2));
    }
}
