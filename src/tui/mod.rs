//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the console,
//! and translates keyboard and mouse events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! ```text
//! crossterm events ──► input::handle_event ──┐
//!                                           ├──► update() ──► Effect::Request ──► spawn_request
//! mpsc::Receiver<Action> ◄── poller, requests┘                                          │
//!          ▲                                                                            │
//!          └────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Redraws only happen after an event or a background action; the loop
//! otherwise sleeps in `poll_event_timeout`.

mod component;
mod components;
mod event;
mod input;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;

use crate::client::poller;
use crate::client::ActionTransport;
use crate::core::action::{Action, Effect, PendingRequest, update};
use crate::core::config::ResolvedConfig;
use crate::core::registry::RendererRegistry;
use crate::core::state::Console;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::ui::HitMap;

const IDLE_POLL: Duration = Duration::from_millis(100);

/// TUI-specific presentation state (not part of core business logic)
#[derive(Debug, Default)]
pub struct TuiState {
    /// Focused element index in the current content.
    pub focus: Option<usize>,
    /// (row, column) of the highlighted virtual key.
    pub key_cursor: (usize, usize),
    /// Highlighted system button on the server error overlay.
    pub overlay_focus: usize,
    pub scroll: usize,
    /// Clickable regions of the last drawn frame.
    pub hits: HitMap,
    /// Content generation the focus and scroll belong to.
    generation: Option<u64>,
}

impl TuiState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets focus and scroll whenever the content area was replaced.
    pub fn sync(&mut self, console: &Console) {
        let generation = console.content.generation();
        if generation == self.generation {
            return;
        }
        self.generation = generation;
        self.scroll = 0;
        self.focus = console
            .content()
            .and_then(|c| c.interactive().first().copied());
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, Hide)?;
        info!("Terminal modes enabled (mouse capture, hidden cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, Show);
    }
}

pub fn run(
    config: ResolvedConfig,
    transport: Arc<dyn ActionTransport>,
    registry: Arc<RendererRegistry>,
) -> std::io::Result<()> {
    let mut console = Console::new(registry, config.default_screen);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let poll_tx = tx.clone();
    tokio::spawn(poller::run(transport.clone(), config.poll_interval, move |result| {
        let action = match result {
            Ok(response) => Action::StatusPolled(response),
            Err(error) => Action::ApplianceUnreachable(error),
        };
        poll_tx.send(action).is_ok()
    }));

    let mut should_quit = dispatch(
        &mut console,
        Action::Navigate {
            screen: config.default_screen,
            params: Vec::new(),
        },
        &transport,
        &tx,
    );
    let mut needs_redraw = true;

    while !should_quit {
        if needs_redraw {
            tui.sync(&console);
            terminal.draw(|f| ui::draw_ui(f, &console, &mut tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(IDLE_POLL);
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if matches!(event, TuiEvent::Resize) {
                continue;
            }
            for action in input::handle_event(&console, &mut tui, &event) {
                should_quit |= dispatch(&mut console, action, &transport, &tx);
            }
        }

        // Handle background task actions (poll ticks, request outcomes)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            should_quit |= dispatch(&mut console, action, &transport, &tx);
        }
    }

    info!("Console shutting down");
    ratatui::restore();
    Ok(())
}

/// Runs one action through `update` and starts whatever it asks for.
/// Returns true when the console should quit.
fn dispatch(
    console: &mut Console,
    action: Action,
    transport: &Arc<dyn ActionTransport>,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match update(console, action) {
        Effect::Quit => true,
        Effect::Request(pending) => {
            spawn_request(transport.clone(), pending, tx.clone());
            false
        }
        Effect::None => false,
    }
}

fn spawn_request(transport: Arc<dyn ActionTransport>, pending: PendingRequest, tx: mpsc::Sender<Action>) {
    debug!(
        "Spawning {:?} request action={}",
        pending.endpoint,
        pending.request.action()
    );
    tokio::spawn(async move {
        let result = transport.send(pending.endpoint, &pending.request).await;
        if let Err(e) = &result {
            warn!("Request action={} failed: {}", pending.request.action(), e);
        }
        if let Some(action) = pending.completion(result)
            && tx.send(action).is_err()
        {
            warn!("Failed to send request outcome: receiver dropped");
        }
    });
}
