//! Maps terminal events to core actions.
//!
//! Input goes to the topmost layer only:
//!
//! ```text
//! modal  >  status overlay  >  virtual keyboard  >  content
//! ```
//!
//! Focus, keyboard cursor and overlay highlight live in [`TuiState`]; moving
//! them is presentation and produces no action.

use crate::core::action::Action;
use crate::core::content::{Command, Element, SystemCommand};
use crate::core::form::FieldKind;
use crate::core::keyboard::{Interaction, Key, LAYOUT};
use crate::core::screen::ScreenId;
use crate::core::state::{Console, Modal};
use crate::core::status::Overlay;
use crate::tui::TuiState;
use crate::tui::components::{ModalButton, move_cursor};
use crate::tui::event::TuiEvent;
use crate::tui::ui::Target;

pub fn handle_event(console: &Console, tui: &mut TuiState, event: &TuiEvent) -> Vec<Action> {
    match *event {
        TuiEvent::ForceQuit => vec![Action::Quit],
        TuiEvent::Resize => Vec::new(),
        TuiEvent::Click(column, row) => {
            let target = tui.hits.hit(column, row);
            click(console, tui, target)
        }
        _ if console.modal.is_some() => modal_key(console, event),
        _ if console.overlay.is_visible() => overlay_key(console, tui, event),
        _ if console.keyboard.is_visible() => keyboard_key(tui, event),
        _ => content_key(console, tui, event),
    }
}

fn modal_answer(console: &Console, button: ModalButton) -> Action {
    match (&console.modal, button) {
        (Some(Modal::Confirm { .. }), ModalButton::Ok) => Action::ConfirmModal,
        _ => Action::DismissModal,
    }
}

fn click(console: &Console, tui: &mut TuiState, target: Option<Target>) -> Vec<Action> {
    if console.modal.is_some() {
        return match target {
            Some(Target::Modal(button)) => vec![modal_answer(console, button)],
            _ => Vec::new(),
        };
    }
    if console.overlay.is_visible() {
        return match target {
            Some(Target::OverlayButton(command)) => {
                vec![Action::Activate(Command::System(command))]
            }
            _ => Vec::new(),
        };
    }

    match target {
        Some(Target::Menu(screen)) => vec![
            Action::Interaction(Interaction::Elsewhere),
            Action::Navigate {
                screen,
                params: Vec::new(),
            },
        ],
        Some(Target::Element(index)) => {
            let interactive = console
                .content()
                .and_then(|c| c.elements.get(index))
                .is_some_and(Element::is_interactive);
            if interactive {
                tui.focus = Some(index);
                vec![Action::Press(index)]
            } else {
                vec![Action::Interaction(Interaction::Elsewhere)]
            }
        }
        Some(Target::Key(key)) => vec![Action::Interaction(Interaction::Keyboard), Action::Key(key)],
        Some(Target::OverlayButton(_)) | Some(Target::Modal(_)) | None => {
            vec![Action::Interaction(Interaction::Elsewhere)]
        }
    }
}

fn modal_key(console: &Console, event: &TuiEvent) -> Vec<Action> {
    match event {
        TuiEvent::Enter => vec![modal_answer(console, ModalButton::Ok)],
        TuiEvent::Escape => vec![Action::DismissModal],
        _ => Vec::new(),
    }
}

fn keyboard_key(tui: &mut TuiState, event: &TuiEvent) -> Vec<Action> {
    let (rows, cols) = match event {
        TuiEvent::Up => (-1, 0),
        TuiEvent::Down => (1, 0),
        TuiEvent::Left => (0, -1),
        TuiEvent::Right => (0, 1),
        TuiEvent::Enter => {
            let (row, col) = tui.key_cursor;
            return vec![Action::Key(LAYOUT[row][col])];
        }
        TuiEvent::Backspace => return vec![Action::Key(Key::Delete)],
        TuiEvent::Escape => return vec![Action::DismissKeyboard],
        _ => return Vec::new(),
    };
    tui.key_cursor = move_cursor(tui.key_cursor, rows, cols);
    Vec::new()
}

fn overlay_key(console: &Console, tui: &mut TuiState, event: &TuiEvent) -> Vec<Action> {
    if console.overlay != Overlay::ServerError {
        return Vec::new();
    }
    let count = SystemCommand::ALL.len();
    match event {
        TuiEvent::Down | TuiEvent::Right | TuiEvent::Tab => {
            tui.overlay_focus = (tui.overlay_focus + 1) % count;
            Vec::new()
        }
        TuiEvent::Up | TuiEvent::Left | TuiEvent::BackTab => {
            tui.overlay_focus = (tui.overlay_focus + count - 1) % count;
            Vec::new()
        }
        TuiEvent::Enter => {
            let command = SystemCommand::ALL[tui.overlay_focus.min(count - 1)];
            vec![Action::Activate(Command::System(command))]
        }
        _ => Vec::new(),
    }
}

fn content_key(console: &Console, tui: &mut TuiState, event: &TuiEvent) -> Vec<Action> {
    let stops = console.content().map(|c| c.interactive()).unwrap_or_default();
    match event {
        TuiEvent::Tab | TuiEvent::Down => {
            tui.focus = step(&stops, tui.focus, true);
            Vec::new()
        }
        TuiEvent::BackTab | TuiEvent::Up => {
            tui.focus = step(&stops, tui.focus, false);
            Vec::new()
        }
        TuiEvent::Left | TuiEvent::Right => {
            let delta = if *event == TuiEvent::Left { -1 } else { 1 };
            match focused_select(console, tui.focus) {
                Some(field) => vec![Action::CycleField { field, delta }],
                None => Vec::new(),
            }
        }
        TuiEvent::Enter => match tui.focus {
            Some(index) => vec![Action::Press(index)],
            None => Vec::new(),
        },
        TuiEvent::Char(c @ '1'..='9') => {
            let entry = c.to_digit(10).map(|n| n as usize - 1);
            match entry.and_then(|n| ScreenId::MENU.get(n)) {
                Some(screen) => vec![Action::Navigate {
                    screen: *screen,
                    params: Vec::new(),
                }],
                None => Vec::new(),
            }
        }
        _ => Vec::new(),
    }
}

/// Next (or previous) focus stop, wrapping around.
fn step(stops: &[usize], focus: Option<usize>, forward: bool) -> Option<usize> {
    if stops.is_empty() {
        return None;
    }
    let position = focus.and_then(|f| stops.iter().position(|s| *s == f));
    let next = match (position, forward) {
        (None, true) => 0,
        (None, false) => stops.len() - 1,
        (Some(p), true) => (p + 1) % stops.len(),
        (Some(p), false) => (p + stops.len() - 1) % stops.len(),
    };
    Some(stops[next])
}

/// Form field index of the focused element, if it is a select.
fn focused_select(console: &Console, focus: Option<usize>) -> Option<usize> {
    let content = console.content()?;
    let Element::Field(field) = content.elements.get(focus?)? else {
        return None;
    };
    let form = content.form.as_ref()?;
    matches!(form.field(*field)?.kind, FieldKind::Select { .. }).then_some(*field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::update;
    use crate::test_support::{FORM_SCREEN, loaded_console, test_console};
    use ratatui::layout::Rect;
    use serde_json::json;

    fn form_console() -> (Console, TuiState) {
        let console = loaded_console(FORM_SCREEN, json!({"a": 1, "b": 2}));
        let mut tui = TuiState::new();
        tui.sync(&console);
        (console, tui)
    }

    #[test]
    fn test_ctrl_c_quits_from_any_layer() {
        let (mut console, mut tui) = form_console();
        console.overlay = Overlay::Cleaning;
        assert_eq!(handle_event(&console, &mut tui, &TuiEvent::ForceQuit), vec![Action::Quit]);
    }

    #[test]
    fn test_tab_cycles_interactive_elements() {
        let (console, mut tui) = form_console();
        // heading(0) name(1) add note(2) save(3)
        assert_eq!(tui.focus, Some(1));
        handle_event(&console, &mut tui, &TuiEvent::Tab);
        assert_eq!(tui.focus, Some(2));
        handle_event(&console, &mut tui, &TuiEvent::Tab);
        handle_event(&console, &mut tui, &TuiEvent::Tab);
        assert_eq!(tui.focus, Some(1));
        handle_event(&console, &mut tui, &TuiEvent::BackTab);
        assert_eq!(tui.focus, Some(3));
        assert_eq!(handle_event(&console, &mut tui, &TuiEvent::Enter), vec![Action::Press(3)]);
    }

    #[test]
    fn test_number_keys_navigate_menu() {
        let (console, mut tui) = form_console();
        assert_eq!(
            handle_event(&console, &mut tui, &TuiEvent::Char('3')),
            vec![Action::Navigate {
                screen: ScreenId::MENU[2],
                params: Vec::new()
            }]
        );
        assert!(handle_event(&console, &mut tui, &TuiEvent::Char('9')).is_empty());
    }

    #[test]
    fn test_keyboard_captures_keys_while_visible() {
        let (mut console, mut tui) = form_console();
        update(&mut console, Action::Press(1));
        assert!(console.keyboard.is_visible());

        handle_event(&console, &mut tui, &TuiEvent::Down);
        handle_event(&console, &mut tui, &TuiEvent::Right);
        assert_eq!(tui.key_cursor, (1, 1));
        assert_eq!(
            handle_event(&console, &mut tui, &TuiEvent::Enter),
            vec![Action::Key(LAYOUT[1][1])]
        );
        assert_eq!(
            handle_event(&console, &mut tui, &TuiEvent::Backspace),
            vec![Action::Key(Key::Delete)]
        );
        assert_eq!(handle_event(&console, &mut tui, &TuiEvent::Escape), vec![Action::DismissKeyboard]);
    }

    #[test]
    fn test_click_on_key_counts_as_keyboard_interaction() {
        let (console, mut tui) = form_console();
        tui.hits.push(Rect::new(0, 20, 5, 1), Target::Key(Key::Space));
        assert_eq!(
            handle_event(&console, &mut tui, &TuiEvent::Click(2, 20)),
            vec![Action::Interaction(Interaction::Keyboard), Action::Key(Key::Space)]
        );
        assert_eq!(
            handle_event(&console, &mut tui, &TuiEvent::Click(50, 22)),
            vec![Action::Interaction(Interaction::Elsewhere)]
        );
    }

    #[test]
    fn test_click_on_element_focuses_and_presses() {
        let (console, mut tui) = form_console();
        tui.hits.push(Rect::new(0, 2, 80, 1), Target::Element(0));
        tui.hits.push(Rect::new(0, 4, 80, 1), Target::Element(2));
        assert_eq!(handle_event(&console, &mut tui, &TuiEvent::Click(3, 4)), vec![Action::Press(2)]);
        assert_eq!(tui.focus, Some(2));
        assert_eq!(
            handle_event(&console, &mut tui, &TuiEvent::Click(3, 2)),
            vec![Action::Interaction(Interaction::Elsewhere)]
        );
        assert_eq!(tui.focus, Some(2));
    }

    #[test]
    fn test_modal_swallows_everything_else() {
        let (mut console, mut tui) = form_console();
        update(
            &mut console,
            Action::Activate(Command::Confirm {
                prompt: "Sure?".into(),
                then: Box::new(Command::System(SystemCommand::Reboot)),
            }),
        );
        tui.hits.push(Rect::new(0, 4, 80, 1), Target::Element(2));
        assert!(handle_event(&console, &mut tui, &TuiEvent::Click(3, 4)).is_empty());
        assert!(handle_event(&console, &mut tui, &TuiEvent::Tab).is_empty());
        assert_eq!(handle_event(&console, &mut tui, &TuiEvent::Enter), vec![Action::ConfirmModal]);

        console.modal = Some(Modal::Alert("Reboot failed".into()));
        assert_eq!(handle_event(&console, &mut tui, &TuiEvent::Enter), vec![Action::DismissModal]);
    }

    #[test]
    fn test_server_error_overlay_selects_system_command() {
        let mut console = test_console();
        console.overlay = Overlay::ServerError;
        let mut tui = TuiState::new();

        handle_event(&console, &mut tui, &TuiEvent::Down);
        assert_eq!(
            handle_event(&console, &mut tui, &TuiEvent::Enter),
            vec![Action::Activate(Command::System(SystemCommand::ALL[1]))]
        );
        handle_event(&console, &mut tui, &TuiEvent::Up);
        handle_event(&console, &mut tui, &TuiEvent::Up);
        assert_eq!(tui.overlay_focus, SystemCommand::ALL.len() - 1);
    }

    #[test]
    fn test_busy_overlay_blocks_content() {
        let (mut console, mut tui) = form_console();
        console.overlay = Overlay::Mixing { percent: 10 };
        assert!(handle_event(&console, &mut tui, &TuiEvent::Enter).is_empty());
        assert!(handle_event(&console, &mut tui, &TuiEvent::Char('1')).is_empty());
    }

    #[test]
    fn test_busy_overlay_outranks_visible_keyboard() {
        let (mut console, mut tui) = form_console();
        update(&mut console, Action::Press(1));
        assert!(console.keyboard.is_visible());
        console.overlay = Overlay::Mixing { percent: 10 };

        assert!(handle_event(&console, &mut tui, &TuiEvent::Enter).is_empty());
        assert!(handle_event(&console, &mut tui, &TuiEvent::Backspace).is_empty());
        assert!(handle_event(&console, &mut tui, &TuiEvent::Escape).is_empty());
        handle_event(&console, &mut tui, &TuiEvent::Down);
        assert_eq!(tui.key_cursor, (0, 0));
    }

    #[test]
    fn test_step_wraps_and_handles_empty() {
        assert_eq!(step(&[], Some(1), true), None);
        assert_eq!(step(&[2, 5, 7], None, true), Some(2));
        assert_eq!(step(&[2, 5, 7], None, false), Some(7));
        assert_eq!(step(&[2, 5, 7], Some(7), true), Some(2));
    }
}
