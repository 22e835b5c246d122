use std::time::Duration;

use log::warn;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind};

/// TUI-specific input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuiEvent {
    /// Ctrl+C, quits from anywhere.
    ForceQuit,
    Enter,
    Escape,
    Tab,
    BackTab,
    Up,
    Down,
    Left,
    Right,
    Backspace,
    Char(char),
    /// Left mouse button pressed at (column, row).
    Click(u16, u16),
    Resize,
}

/// Poll for an event with timeout.
pub fn poll_event_timeout(timeout: Duration) -> Option<TuiEvent> {
    match event::poll(timeout).and_then(|ready| if ready { event::read().map(Some) } else { Ok(None) }) {
        Ok(event) => translate(event?),
        Err(e) => {
            warn!("Terminal event read failed: {}", e);
            None
        }
    }
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(Duration::ZERO)
}

pub fn translate(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key_event) => {
            if key_event.kind != KeyEventKind::Press {
                return None;
            }
            log::debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
            match (key_event.modifiers, key_event.code) {
                (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
                (_, KeyCode::BackTab) | (KeyModifiers::SHIFT, KeyCode::Tab) => Some(TuiEvent::BackTab),
                (_, KeyCode::Tab) => Some(TuiEvent::Tab),
                (_, KeyCode::Enter) => Some(TuiEvent::Enter),
                (_, KeyCode::Esc) => Some(TuiEvent::Escape),
                (_, KeyCode::Up) => Some(TuiEvent::Up),
                (_, KeyCode::Down) => Some(TuiEvent::Down),
                (_, KeyCode::Left) => Some(TuiEvent::Left),
                (_, KeyCode::Right) => Some(TuiEvent::Right),
                (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
                (_, KeyCode::Char(c)) => Some(TuiEvent::Char(c)),
                _ => None,
            }
        }
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(TuiEvent::Click(mouse_event.column, mouse_event.row)),
            _ => None,
        },
        Event::Resize(..) => Some(TuiEvent::Resize),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, MouseEvent};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_ctrl_c_force_quits() {
        assert_eq!(
            translate(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(TuiEvent::ForceQuit)
        );
        assert_eq!(
            translate(key(KeyCode::Char('c'), KeyModifiers::NONE)),
            Some(TuiEvent::Char('c'))
        );
    }

    #[test]
    fn test_shift_tab_is_back_tab() {
        assert_eq!(translate(key(KeyCode::Tab, KeyModifiers::SHIFT)), Some(TuiEvent::BackTab));
        assert_eq!(translate(key(KeyCode::BackTab, KeyModifiers::SHIFT)), Some(TuiEvent::BackTab));
        assert_eq!(translate(key(KeyCode::Tab, KeyModifiers::NONE)), Some(TuiEvent::Tab));
    }

    #[test]
    fn test_left_click_only() {
        let click = |kind| {
            Event::Mouse(MouseEvent {
                kind,
                column: 4,
                row: 9,
                modifiers: KeyModifiers::NONE,
            })
        };
        assert_eq!(
            translate(click(MouseEventKind::Down(MouseButton::Left))),
            Some(TuiEvent::Click(4, 9))
        );
        assert_eq!(translate(click(MouseEventKind::Down(MouseButton::Right))), None);
        assert_eq!(translate(click(MouseEventKind::Moved)), None);
    }
}
