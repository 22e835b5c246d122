//! # ContentView Component
//!
//! Draws the shared content area: one terminal line per [`Element`].
//!
//! ```text
//!   Mojito
//!   4           Rum
//! ▶ [ Order ]
//!   Name: [Gin Tonic▏]
//!   Amount: ‹ 4 ›
//! ```
//!
//! The view scrolls just far enough to keep the focused element on screen
//! and records the rectangle of every visible element for hit-testing.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::core::content::{ContentArea, Element};
use crate::core::form::{ActionForm, FieldKind};
use crate::tui::component::Component;

const CELL_WIDTH: usize = 18;

pub struct ContentView<'a> {
    pub content: &'a ContentArea,
    /// Element index with focus.
    pub focus: Option<usize>,
    /// First element line shown. Adjusted during render.
    pub scroll: usize,
    /// Form field the virtual keyboard is typing into.
    pub typing: Option<usize>,
    /// Filled during render: element index → drawn line.
    pub regions: Vec<(Rect, usize)>,
}

impl<'a> ContentView<'a> {
    pub fn new(content: &'a ContentArea, focus: Option<usize>, scroll: usize, typing: Option<usize>) -> Self {
        Self {
            content,
            focus,
            scroll,
            typing,
            regions: Vec::new(),
        }
    }
}

/// Scroll offset that keeps `focus` inside a window of `height` lines.
pub fn scroll_for(scroll: usize, focus: Option<usize>, height: usize, len: usize) -> usize {
    if height == 0 {
        return 0;
    }
    let mut scroll = scroll.min(len.saturating_sub(height));
    if let Some(focus) = focus {
        if focus < scroll {
            scroll = focus;
        } else if focus >= scroll + height {
            scroll = focus + 1 - height;
        }
    }
    scroll
}

fn pad(text: &str, width: usize) -> String {
    let used = text.width();
    if used >= width {
        format!("{text} ")
    } else {
        format!("{text}{}", " ".repeat(width - used))
    }
}

fn field_text(form: Option<&ActionForm>, index: usize, typing: bool) -> String {
    let Some(field) = form.and_then(|f| f.field(index)) else {
        return String::new();
    };
    match &field.kind {
        FieldKind::Text(text) => {
            let cursor = if typing { "▏" } else { "" };
            format!("{}: [{text}{cursor}]", field.label)
        }
        FieldKind::Select { .. } => format!("{}: ‹ {} ›", field.label, field.display_value()),
        FieldKind::Hidden(_) => String::new(),
    }
}

fn element_line(element: &Element, form: Option<&ActionForm>, typing: Option<usize>, width: usize) -> Line<'static> {
    match element {
        Element::Heading(text) => Line::styled(text.clone(), Style::default().add_modifier(Modifier::BOLD)),
        Element::Text(text) => Line::raw(text.clone()),
        Element::Notice(text) => Line::styled(text.clone(), Style::default().fg(Color::Yellow)),
        Element::Row(cells) => {
            let mut line = String::new();
            for (i, cell) in cells.iter().enumerate() {
                if i + 1 == cells.len() {
                    line.push_str(cell);
                } else {
                    line.push_str(&pad(cell, CELL_WIDTH));
                }
            }
            Line::raw(line)
        }
        Element::Bar { label, value, fraction } => {
            let room = width.saturating_sub(CELL_WIDTH + 10);
            let filled = ((room as f64) * fraction).round() as usize;
            Line::from(vec![
                Span::raw(pad(label, CELL_WIDTH)),
                Span::styled("█".repeat(filled), Style::default().fg(Color::Cyan)),
                Span::raw(format!(" {value}")),
            ])
        }
        Element::Button { label, .. } => Line::raw(format!("[ {label} ]")),
        Element::Field(index) => Line::raw(field_text(form, *index, typing == Some(*index))),
        Element::Submit(label) => {
            let enabled = form.is_none_or(ActionForm::submit_enabled);
            let style = if enabled {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default().add_modifier(Modifier::DIM)
            };
            Line::styled(format!("[ {label} ]"), style)
        }
    }
}

impl Component for ContentView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.regions.clear();
        let content = match self.content {
            ContentArea::Empty => return,
            ContentArea::Loading(screen) => {
                let loading = Paragraph::new(format!("Loading {}…", screen.title())).alignment(Alignment::Center);
                frame.render_widget(loading, area);
                return;
            }
            ContentArea::Ready { content, .. } => content,
        };

        let height = area.height as usize;
        self.scroll = scroll_for(self.scroll, self.focus, height, content.elements.len());
        let form = content.form.as_ref();

        for (row, (index, element)) in content
            .elements
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(height)
            .enumerate()
        {
            let rect = Rect::new(area.x, area.y + row as u16, area.width, 1);
            let focused = self.focus == Some(index);
            let marker = if focused { "▶ " } else { "  " };
            let mut line = element_line(element, form, self.typing, area.width as usize);
            line.spans.insert(0, Span::raw(marker));
            if focused {
                line = line.patch_style(Style::default().add_modifier(Modifier::REVERSED));
            }
            frame.render_widget(line, rect);
            self.regions.push((rect, index));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::content::{Command, Content};
    use crate::core::form::FormField;
    use crate::core::screen::ScreenId;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn ready(content: Content) -> ContentArea {
        ContentArea::Ready { generation: 1, content }
    }

    fn lines(terminal: &Terminal<TestBackend>) -> Vec<String> {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        let symbols: Vec<_> = buffer.content().iter().map(|c| c.symbol().to_string()).collect();
        symbols.chunks(width).map(|row| row.concat()).collect()
    }

    #[test]
    fn test_scroll_keeps_focus_visible() {
        assert_eq!(scroll_for(0, Some(2), 5, 20), 0);
        assert_eq!(scroll_for(0, Some(7), 5, 20), 3);
        assert_eq!(scroll_for(6, Some(2), 5, 20), 2);
        assert_eq!(scroll_for(30, None, 5, 8), 3);
        assert_eq!(scroll_for(4, Some(1), 0, 8), 0);
    }

    #[test]
    fn test_fields_and_focus_render() {
        let mut content = Content::new(ScreenId::Edit);
        content
            .heading("New recipe")
            .bind(ActionForm::new("saverecipe"))
            .field(FormField::text("name", "Name", "Gin"))
            .button("Add ingredient", Command::AppendFields(vec![]))
            .submit("Save");
        let area = ready(content);

        let mut terminal = Terminal::new(TestBackend::new(40, 6)).unwrap();
        let mut view = ContentView::new(&area, Some(1), 0, Some(1));
        terminal.draw(|f| view.render(f, f.area())).unwrap();

        let lines = lines(&terminal);
        assert!(lines[0].contains("New recipe"));
        assert!(lines[1].starts_with("▶ Name: [Gin▏]"));
        assert!(lines[2].contains("[ Add ingredient ]"));
        assert_eq!(view.regions.len(), 4);
        assert_eq!(view.regions[2], (Rect::new(0, 2, 40, 1), 2));
    }

    #[test]
    fn test_regions_follow_scroll() {
        let mut content = Content::new(ScreenId::AdminClean);
        for port in 1..=12 {
            content.button(format!("Clean port {port}"), Command::navigate(ScreenId::AdminClean));
        }
        let area = ready(content);

        let mut terminal = Terminal::new(TestBackend::new(30, 4)).unwrap();
        let mut view = ContentView::new(&area, Some(10), 0, None);
        terminal.draw(|f| view.render(f, f.area())).unwrap();

        assert_eq!(view.scroll, 7);
        assert_eq!(view.regions.first().map(|(_, i)| *i), Some(7));
        assert_eq!(view.regions.last(), Some(&(Rect::new(0, 3, 30, 1), 10)));
        assert!(lines(&terminal)[3].contains("Clean port 11"));
    }

    #[test]
    fn test_loading_placeholder() {
        let area = ContentArea::Loading(ScreenId::Statistics);
        let mut terminal = Terminal::new(TestBackend::new(40, 3)).unwrap();
        let mut view = ContentView::new(&area, None, 0, None);
        terminal.draw(|f| view.render(f, f.area())).unwrap();
        assert!(lines(&terminal)[0].contains("Loading Statistics"));
        assert!(view.regions.is_empty());
    }
}
