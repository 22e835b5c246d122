//! # OverlayView Component
//!
//! The status overlay: a centered box drawn above the menu, content and
//! keyboard. The mixing overlay carries a progress [`Gauge`]; the server
//! error overlay lists the system commands as buttons.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Gauge, Paragraph, Wrap};

use crate::core::content::SystemCommand;
use crate::core::status::Overlay;
use crate::tui::component::Component;
use crate::tui::ui::centered;

pub struct OverlayView<'a> {
    pub overlay: &'a Overlay,
    /// Highlighted system button on the server error overlay.
    pub focus: usize,
    /// Filled during render: where each system button was drawn.
    pub regions: Vec<(Rect, SystemCommand)>,
}

impl<'a> OverlayView<'a> {
    pub fn new(overlay: &'a Overlay, focus: usize) -> Self {
        Self {
            overlay,
            focus,
            regions: Vec::new(),
        }
    }

    fn title_and_body(&self) -> (&'static str, Vec<String>) {
        match self.overlay {
            Overlay::Hidden => ("", Vec::new()),
            Overlay::ServerError => (
                " Controller unreachable ",
                vec!["The bar controller does not answer.".into(), "Waiting for it to come back…".into()],
            ),
            Overlay::Connecting => (" Connecting ", vec!["Connecting to the mixer…".into()]),
            Overlay::Startup => (" Starting ", vec!["The bar is starting up…".into()]),
            Overlay::Cleaning => (" Cleaning ", vec!["Cleaning in progress…".into()]),
            Overlay::PlaceGlass => (" Glass ", vec!["Please place a glass.".into()]),
            Overlay::MixingDone { instruction } => {
                let mut body = vec!["Done! Please remove the glass.".to_string()];
                body.extend(instruction.iter().cloned());
                (" Enjoy ", body)
            }
            Overlay::Mixing { .. } => (" Mixing ", vec!["Your drink is being mixed…".into()]),
            Overlay::SingleIngredient => (" Dispensing ", vec!["Dispensing ingredient…".into()]),
        }
    }
}

impl Component for OverlayView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        use Constraint::{Length, Min};

        self.regions.clear();
        if !self.overlay.is_visible() {
            return;
        }

        let (title, body) = self.title_and_body();
        let extra = match self.overlay {
            Overlay::Mixing { .. } => 2,
            Overlay::ServerError => SystemCommand::ALL.len() as u16 + 1,
            _ => 0,
        };
        let rect = centered(area, 50, body.len() as u16 + extra + 2);
        let block = Block::bordered()
            .title(title)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(rect);
        frame.render_widget(Clear, rect);
        frame.render_widget(block, rect);

        let [body_area, extra_area] = Layout::vertical([Length(body.len() as u16), Min(0)]).areas(inner);
        let lines: Vec<Line> = body.into_iter().map(Line::from).collect();
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center).wrap(Wrap { trim: true }),
            body_area,
        );

        match self.overlay {
            Overlay::Mixing { percent } => {
                let gauge_area = Rect::new(extra_area.x + 1, extra_area.y + 1, extra_area.width.saturating_sub(2), 1)
                    .intersection(extra_area);
                let gauge = Gauge::default()
                    .gauge_style(Style::default().fg(Color::Green))
                    .percent(u16::from(*percent));
                frame.render_widget(gauge, gauge_area);
            }
            Overlay::ServerError => {
                for (i, command) in SystemCommand::ALL.into_iter().enumerate() {
                    let y = extra_area.y + 1 + i as u16;
                    if y >= extra_area.bottom() {
                        break;
                    }
                    let button = Rect::new(extra_area.x, y, extra_area.width, 1);
                    let style = if i == self.focus {
                        Style::default().add_modifier(Modifier::REVERSED)
                    } else {
                        Style::default()
                    };
                    let label = Line::from(Span::styled(format!("[ {} ]", command.label()), style))
                        .alignment(Alignment::Center);
                    frame.render_widget(label, button);
                    self.regions.push((button, command));
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(overlay: &Overlay) -> (String, Vec<(Rect, SystemCommand)>) {
        let mut terminal = Terminal::new(TestBackend::new(70, 20)).unwrap();
        let mut view = OverlayView::new(overlay, 1);
        terminal.draw(|f| view.render(f, f.area())).unwrap();
        let text = terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect();
        (text, view.regions)
    }

    #[test]
    fn test_mixing_shows_gauge_percent() {
        let (text, regions) = draw(&Overlay::Mixing { percent: 42 });
        assert!(text.contains("Mixing"));
        assert!(text.contains("42%"));
        assert!(regions.is_empty());
    }

    #[test]
    fn test_server_error_lists_system_buttons() {
        let (text, regions) = draw(&Overlay::ServerError);
        assert!(text.contains("Controller unreachable"));
        assert!(text.contains("Reboot"));
        let commands: Vec<_> = regions.iter().map(|(_, c)| *c).collect();
        assert_eq!(commands, SystemCommand::ALL.to_vec());
    }

    #[test]
    fn test_mixing_done_shows_instruction() {
        let (text, _) = draw(&Overlay::MixingDone {
            instruction: Some("Add a lime wedge".into()),
        });
        assert!(text.contains("remove the glass"));
        assert!(text.contains("Add a lime wedge"));
    }

    #[test]
    fn test_hidden_draws_nothing() {
        let (text, regions) = draw(&Overlay::Hidden);
        assert!(text.trim().is_empty());
        assert!(regions.is_empty());
    }
}
