//! # TUI Components
//!
//! Every component receives the data it draws as "props" and implements
//! [`Component`](crate::tui::component::Component). Components that can be
//! clicked fill a `regions` list while rendering; `ui::draw_ui` copies those
//! into the frame's hit map.
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (top status line)
//! ├── menu.rs          (menu entries)
//! ├── content_view.rs  (shared content area)
//! ├── keyboard.rs      (virtual keyboard)
//! ├── overlay.rs       (status overlay)
//! └── modal.rs         (alert / confirm box)
//! ```

mod content_view;
mod keyboard;
mod menu;
mod modal;
mod overlay;
mod title_bar;

pub use content_view::ContentView;
pub use keyboard::{KeyboardView, move_cursor};
pub use menu::MenuBar;
pub use modal::{ModalButton, ModalView};
pub use overlay::OverlayView;
pub use title_bar::TitleBar;
