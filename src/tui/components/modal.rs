//! # ModalView Component
//!
//! Alert or confirmation box, drawn above everything including the status
//! overlay.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};

use crate::core::state::Modal;
use crate::tui::component::Component;
use crate::tui::ui::centered;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalButton {
    Ok,
    Cancel,
}

const ALERT_BUTTONS: &[ModalButton] = &[ModalButton::Ok];
const CONFIRM_BUTTONS: &[ModalButton] = &[ModalButton::Ok, ModalButton::Cancel];

pub struct ModalView<'a> {
    pub modal: &'a Modal,
    pub regions: Vec<(Rect, ModalButton)>,
}

impl<'a> ModalView<'a> {
    pub fn new(modal: &'a Modal) -> Self {
        Self {
            modal,
            regions: Vec::new(),
        }
    }
}

impl Component for ModalView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        use Constraint::{Length, Min};

        self.regions.clear();
        let (title, text, buttons) = match self.modal {
            Modal::Alert(text) => (" Notice ", text.as_str(), ALERT_BUTTONS),
            Modal::Confirm { prompt, .. } => (" Confirm ", prompt.as_str(), CONFIRM_BUTTONS),
        };

        let rect = centered(area, 56, 7);
        let block = Block::bordered()
            .title(title)
            .border_style(Style::default().fg(Color::Yellow));
        let inner = block.inner(rect);
        frame.render_widget(Clear, rect);
        frame.render_widget(block, rect);

        let [text_area, button_area] = Layout::vertical([Min(0), Length(1)]).areas(inner);
        frame.render_widget(
            Paragraph::new(text).alignment(Alignment::Center).wrap(Wrap { trim: true }),
            text_area,
        );

        let width = button_area.width / buttons.len() as u16;
        for (i, button) in buttons.iter().enumerate() {
            let label = match button {
                ModalButton::Ok => "[ OK ]",
                ModalButton::Cancel => "[ Cancel ]",
            };
            let slot = Rect::new(button_area.x + width * i as u16, button_area.y, width, 1);
            let style = if i == 0 {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            frame.render_widget(
                Paragraph::new(label).style(style).alignment(Alignment::Center),
                slot,
            );
            self.regions.push((slot, *button));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::content::{Command, SystemCommand};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(modal: &Modal) -> (String, Vec<ModalButton>) {
        let mut terminal = Terminal::new(TestBackend::new(70, 15)).unwrap();
        let mut view = ModalView::new(modal);
        terminal.draw(|f| view.render(f, f.area())).unwrap();
        let text = terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect();
        (text, view.regions.into_iter().map(|(_, b)| b).collect())
    }

    #[test]
    fn test_alert_has_only_ok() {
        let (text, buttons) = draw(&Modal::Alert("Reboot failed".into()));
        assert!(text.contains("Reboot failed"));
        assert_eq!(buttons, vec![ModalButton::Ok]);
    }

    #[test]
    fn test_confirm_has_ok_and_cancel() {
        let (text, buttons) = draw(&Modal::Confirm {
            prompt: "Really remove recipe?".into(),
            command: Command::System(SystemCommand::Shutdown),
        });
        assert!(text.contains("Really remove recipe?"));
        assert!(text.contains("Cancel"));
        assert_eq!(buttons, vec![ModalButton::Ok, ModalButton::Cancel]);
    }
}
