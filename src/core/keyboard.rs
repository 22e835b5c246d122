//! # Virtual Keyboard
//!
//! On-screen keyboard for operators without a physical one. Keystrokes go
//! straight into whichever text field asked for the keyboard; there is no
//! pending buffer.
//!
//! ```text
//!  1! 2" 3§ 4$ 5% 6& 7/ 8( 9) 0ß
//!  q  w  e  r  t  z  u  i  o  p
//!  a  s  d  f  g  h  j  k  l  ö
//!  y  x  c  v  b  n  m  ä  ü
//!  ▲  [    space    ]  ←
//! ```
//!
//! The caps key cycles three states:
//!
//! ```text
//! (shift, caps):  (off, off) → (on, off) → (on, on) → (off, off)
//! ```
//!
//! Shift is one-shot: the next printable key clears it. With caps on it stays.
//!
//! The focus target is a [`FocusHandle`], not a reference. The field it names
//! may be gone by the time a key arrives (the screen was re-rendered), so the
//! owner resolves the handle to live text before every press.

use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Symbol { plain: char, shifted: char },
    Letter(char),
    Caps,
    Space,
    Delete,
}

impl Key {
    /// Text shown on the key cap in the current shift state.
    pub fn label(self, shift: bool) -> String {
        match self {
            Key::Symbol { plain, shifted } => {
                let glyph = if shift { shifted } else { plain };
                glyph.to_string()
            }
            Key::Letter(c) => {
                if shift {
                    c.to_uppercase().collect()
                } else {
                    c.to_string()
                }
            }
            Key::Caps => "▲".to_string(),
            Key::Space => "space".to_string(),
            Key::Delete => "←".to_string(),
        }
    }
}

const fn sym(plain: char, shifted: char) -> Key {
    Key::Symbol { plain, shifted }
}

const fn letter(c: char) -> Key {
    Key::Letter(c)
}

const SYMBOL_ROW: &[Key] = &[
    sym('1', '!'),
    sym('2', '"'),
    sym('3', '§'),
    sym('4', '$'),
    sym('5', '%'),
    sym('6', '&'),
    sym('7', '/'),
    sym('8', '('),
    sym('9', ')'),
    sym('0', 'ß'),
];

const TOP_ROW: &[Key] = &[
    letter('q'),
    letter('w'),
    letter('e'),
    letter('r'),
    letter('t'),
    letter('z'),
    letter('u'),
    letter('i'),
    letter('o'),
    letter('p'),
];

const HOME_ROW: &[Key] = &[
    letter('a'),
    letter('s'),
    letter('d'),
    letter('f'),
    letter('g'),
    letter('h'),
    letter('j'),
    letter('k'),
    letter('l'),
    letter('ö'),
];

const BOTTOM_ROW: &[Key] = &[
    letter('y'),
    letter('x'),
    letter('c'),
    letter('v'),
    letter('b'),
    letter('n'),
    letter('m'),
    letter('ä'),
    letter('ü'),
];

const CONTROL_ROW: &[Key] = &[Key::Caps, Key::Space, Key::Delete];

pub const LAYOUT: [&[Key]; 5] = [SYMBOL_ROW, TOP_ROW, HOME_ROW, BOTTOM_ROW, CONTROL_ROW];

/// Non-owning reference to a text field: the content generation it was taken
/// from plus the field's index in that content's form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusHandle {
    pub generation: u64,
    pub field: usize,
}

/// Where an operator interaction originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    Keyboard,
    /// A form field in the current content.
    Field(usize),
    Elsewhere,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardSession {
    focus_target: Option<FocusHandle>,
    shift: bool,
    capslock: bool,
    visible: bool,
    dismiss_rule: bool,
}

impl KeyboardSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(&self) -> Option<FocusHandle> {
        self.focus_target
    }

    pub fn shift(&self) -> bool {
        self.shift
    }

    pub fn capslock(&self) -> bool {
        self.capslock
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn activate(&mut self, target: FocusHandle) {
        debug!("Keyboard activated for field {} (generation {})", target.field, target.generation);
        self.focus_target = Some(target);
        self.visible = true;
        self.dismiss_rule = true;
    }

    pub fn deactivate(&mut self) {
        if self.visible {
            debug!("Keyboard dismissed");
        }
        self.visible = false;
        self.focus_target = None;
        self.dismiss_rule = false;
    }

    /// Applies the dismiss-on-outside-interaction rule. Returns true if the
    /// keyboard was dismissed.
    pub fn on_interaction(&mut self, origin: Interaction) -> bool {
        if !self.dismiss_rule {
            return false;
        }
        let inside = match origin {
            Interaction::Keyboard => true,
            Interaction::Field(field) => self.focus_target.is_some_and(|t| t.field == field),
            Interaction::Elsewhere => false,
        };
        if inside {
            return false;
        }
        self.deactivate();
        true
    }

    /// Applies one key press to `target`, the resolved text of the focus
    /// target. `None` means the target is gone and the press is ignored.
    /// Returns true if anything changed.
    pub fn press(&mut self, key: Key, target: Option<&mut String>) -> bool {
        let Some(text) = target else {
            debug!("Key {:?} ignored: no live focus target", key);
            return false;
        };

        let ch = match key {
            Key::Caps => {
                (self.shift, self.capslock) = match (self.shift, self.capslock) {
                    (false, _) => (true, false),
                    (true, false) => (true, true),
                    (true, true) => (false, false),
                };
                return true;
            }
            Key::Delete => {
                text.pop();
                return true;
            }
            Key::Space => " ".to_string(),
            Key::Symbol { .. } | Key::Letter(_) => key.label(self.shift || self.capslock),
        };

        if !self.capslock {
            self.shift = false;
        }
        text.push_str(&ch);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(field: usize) -> FocusHandle {
        FocusHandle { generation: 1, field }
    }

    fn active() -> KeyboardSession {
        let mut keyboard = KeyboardSession::new();
        keyboard.activate(handle(3));
        keyboard
    }

    #[test]
    fn test_three_caps_presses_return_to_rest() {
        let mut keyboard = active();
        let mut text = String::new();
        keyboard.press(Key::Caps, Some(&mut text));
        assert_eq!((keyboard.shift(), keyboard.capslock()), (true, false));
        keyboard.press(Key::Caps, Some(&mut text));
        assert_eq!((keyboard.shift(), keyboard.capslock()), (true, true));
        keyboard.press(Key::Caps, Some(&mut text));
        assert_eq!((keyboard.shift(), keyboard.capslock()), (false, false));
        assert!(text.is_empty());
    }

    #[test]
    fn test_shift_is_consumed_by_one_key() {
        let mut keyboard = active();
        let mut text = String::new();
        keyboard.press(Key::Caps, Some(&mut text));
        keyboard.press(Key::Letter('m'), Some(&mut text));
        keyboard.press(Key::Letter('o'), Some(&mut text));
        assert_eq!(text, "Mo");
        assert!(!keyboard.shift());
    }

    #[test]
    fn test_capslock_is_sticky() {
        let mut keyboard = active();
        let mut text = String::new();
        keyboard.press(Key::Caps, Some(&mut text));
        keyboard.press(Key::Caps, Some(&mut text));
        for c in ['r', 'u', 'm'] {
            keyboard.press(Key::Letter(c), Some(&mut text));
        }
        assert_eq!(text, "RUM");
        assert!(keyboard.capslock());
    }

    #[test]
    fn test_symbol_row_uses_shifted_glyph() {
        let mut keyboard = active();
        let mut text = String::new();
        keyboard.press(Key::Symbol { plain: '1', shifted: '!' }, Some(&mut text));
        keyboard.press(Key::Caps, Some(&mut text));
        keyboard.press(Key::Symbol { plain: '1', shifted: '!' }, Some(&mut text));
        keyboard.press(Key::Symbol { plain: '1', shifted: '!' }, Some(&mut text));
        assert_eq!(text, "1!1");
    }

    #[test]
    fn test_umlauts_uppercase() {
        let mut keyboard = active();
        let mut text = String::new();
        keyboard.press(Key::Caps, Some(&mut text));
        keyboard.press(Key::Letter('ä'), Some(&mut text));
        assert_eq!(text, "Ä");
    }

    #[test]
    fn test_space_and_delete() {
        let mut keyboard = active();
        let mut text = String::from("Gin");
        keyboard.press(Key::Space, Some(&mut text));
        assert_eq!(text, "Gin ");
        keyboard.press(Key::Delete, Some(&mut text));
        keyboard.press(Key::Delete, Some(&mut text));
        assert_eq!(text, "Gi");
    }

    #[test]
    fn test_delete_on_empty_text_is_harmless() {
        let mut keyboard = active();
        let mut text = String::new();
        keyboard.press(Key::Delete, Some(&mut text));
        assert!(text.is_empty());
    }

    #[test]
    fn test_dead_target_ignores_everything() {
        let mut keyboard = active();
        assert!(!keyboard.press(Key::Caps, None));
        assert!(!keyboard.shift());
    }

    #[test]
    fn test_outside_interaction_dismisses() {
        let mut keyboard = active();
        assert!(!keyboard.on_interaction(Interaction::Keyboard));
        assert!(!keyboard.on_interaction(Interaction::Field(3)));
        assert!(keyboard.is_visible());

        assert!(keyboard.on_interaction(Interaction::Field(4)));
        assert!(!keyboard.is_visible());
        assert_eq!(keyboard.target(), None);
    }

    #[test]
    fn test_interaction_without_rule_is_noop() {
        let mut keyboard = KeyboardSession::new();
        assert!(!keyboard.on_interaction(Interaction::Elsewhere));
    }

    #[test]
    fn test_deactivate_keeps_modifiers() {
        let mut keyboard = active();
        let mut text = String::new();
        keyboard.press(Key::Caps, Some(&mut text));
        keyboard.press(Key::Caps, Some(&mut text));
        keyboard.deactivate();
        assert!(keyboard.capslock());
        assert_eq!(keyboard.target(), None);
    }

    #[test]
    fn test_layout_shape() {
        assert_eq!(LAYOUT.len(), 5);
        assert_eq!(LAYOUT[0].len(), 10);
        assert_eq!(LAYOUT[4], &[Key::Caps, Key::Space, Key::Delete]);
    }
}
