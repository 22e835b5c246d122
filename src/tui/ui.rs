//! Frame layout and hit-testing.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │ Bar Console | Recipes | ● online         │  title bar
//! │ 1 Recipes  2 Single ingredient  ...      │  menu bar
//! │                                          │
//! │   content area                           │
//! │                                          │
//! │ ┌ Keyboard ────────────────────────────┐ │  only while visible
//! │ └──────────────────────────────────────┘ │
//! └──────────────────────────────────────────┘
//! ```
//!
//! The status overlay and then the modal are drawn last, centered on top.
//! Every clickable thing drawn in a frame lands in the [`HitMap`], which the
//! event loop consults for the next click.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::core::content::SystemCommand;
use crate::core::keyboard::Key;
use crate::core::screen::{CurrentScreen, ScreenId};
use crate::core::state::Console;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    ContentView, KeyboardView, MenuBar, ModalButton, ModalView, OverlayView, TitleBar,
};

/// Something a click can land on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Target {
    Menu(ScreenId),
    /// Element index in the current content.
    Element(usize),
    Key(Key),
    OverlayButton(SystemCommand),
    Modal(ModalButton),
}

/// Clickable regions of the last frame, in drawing order.
#[derive(Debug, Default)]
pub struct HitMap {
    regions: Vec<(Rect, Target)>,
}

impl HitMap {
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn push(&mut self, area: Rect, target: Target) {
        self.regions.push((area, target));
    }

    /// Topmost target under (column, row): later regions were drawn above
    /// earlier ones.
    pub fn hit(&self, column: u16, row: u16) -> Option<Target> {
        self.regions
            .iter()
            .rev()
            .find(|(area, _)| {
                column >= area.x && column < area.right() && row >= area.y && row < area.bottom()
            })
            .map(|(_, target)| *target)
    }
}

/// A `width` × `height` rectangle centered in `area`, shrunk to fit.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

pub fn draw_ui(frame: &mut Frame, console: &Console, tui: &mut TuiState) {
    use Constraint::{Length, Min};

    tui.hits.clear();
    let keyboard_height = if console.keyboard.is_visible() {
        KeyboardView::HEIGHT
    } else {
        0
    };
    let layout = Layout::vertical([Length(1), Length(1), Min(0), Length(keyboard_height)]);
    let full = frame.area();
    let [title_area, menu_area, content_area, keyboard_area] = layout.areas(full);

    let screen = console.current_screen.screen();
    let mut title_bar = TitleBar::new(
        screen.map(|s| s.title().to_string()).unwrap_or_default(),
        console.status_message.clone(),
        console.current_screen != CurrentScreen::ServerError,
    );
    title_bar.render(frame, title_area);

    let mut menu = MenuBar::new(screen);
    menu.render(frame, menu_area);
    for (area, entry) in &menu.regions {
        tui.hits.push(*area, Target::Menu(*entry));
    }

    let typing = console.keyboard.target().map(|handle| handle.field);
    let mut content = ContentView::new(&console.content, tui.focus, tui.scroll, typing);
    content.render(frame, content_area);
    tui.scroll = content.scroll;
    for (area, index) in &content.regions {
        tui.hits.push(*area, Target::Element(*index));
    }

    if console.keyboard.is_visible() {
        let mut keyboard = KeyboardView::new(
            console.keyboard.shift(),
            console.keyboard.capslock(),
            tui.key_cursor,
        );
        keyboard.render(frame, keyboard_area);
        for (area, key) in &keyboard.regions {
            tui.hits.push(*area, Target::Key(*key));
        }
    }

    if console.overlay.is_visible() {
        let mut overlay = OverlayView::new(&console.overlay, tui.overlay_focus);
        overlay.render(frame, full);
        for (area, command) in &overlay.regions {
            tui.hits.push(*area, Target::OverlayButton(*command));
        }
    }

    if let Some(modal) = &console.modal {
        let mut view = ModalView::new(modal);
        view.render(frame, full);
        for (area, button) in &view.regions {
            tui.hits.push(*area, Target::Modal(*button));
        }
    }
}
