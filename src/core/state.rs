//! # Console State
//!
//! Everything the console knows, in one place.
//!
//! ```text
//! Console
//! ├── current_screen: CurrentScreen   // navigation state (Navigator + Poller)
//! ├── phase: NavPhase                 // Idle / Loading / Rendered / Error
//! ├── content: ContentArea            // what the screen shows right now
//! ├── overlay: Overlay                // status overlay (Poller)
//! ├── keyboard: KeyboardSession       // virtual keyboard (Keyboard)
//! ├── modal: Option<Modal>            // alert / confirm box
//! ├── status_message: String          // title bar text
//! ├── default_screen: ScreenId        // where recovery lands
//! ├── registry: Arc<RendererRegistry> // ScreenId → renderer
//! └── nav_token: u64                  // latest navigation request
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs,
//! one action at a time on the UI thread. A poll tick therefore can never
//! observe a navigation halfway through.

use std::sync::Arc;

use log::{debug, info, warn};

use crate::client::{ActionResponse, Endpoint, Params};
use crate::core::action::{PendingRequest, Purpose};
use crate::core::content::{Command, Content, ContentArea};
use crate::core::form::FieldKind;
use crate::core::keyboard::{FocusHandle, KeyboardSession};
use crate::core::registry::RendererRegistry;
use crate::core::screen::{CurrentScreen, NavPhase, ScreenId};
use crate::core::status::{Overlay, StatusSnapshot, overlay_for};

/// Blocking dialog above everything else, overlay included.
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    Alert(String),
    Confirm { prompt: String, command: Command },
}

pub struct Console {
    pub current_screen: CurrentScreen,
    pub phase: NavPhase,
    pub content: ContentArea,
    pub overlay: Overlay,
    pub keyboard: KeyboardSession,
    pub modal: Option<Modal>,
    pub status_message: String,
    pub default_screen: ScreenId,
    registry: Arc<RendererRegistry>,
    nav_token: u64,
    generation: u64,
}

impl Console {
    pub fn new(registry: Arc<RendererRegistry>, default_screen: ScreenId) -> Self {
        Self {
            current_screen: CurrentScreen::Empty,
            phase: NavPhase::Idle,
            content: ContentArea::Empty,
            overlay: Overlay::Hidden,
            keyboard: KeyboardSession::new(),
            modal: None,
            status_message: String::new(),
            default_screen,
            registry,
            nav_token: 0,
            generation: 0,
        }
    }

    /// Back to a freshly started console, keeping the registry. Navigation
    /// tokens and content generations carry on from where they were.
    pub fn reset(&mut self) {
        info!("Console reset");
        let (nav_token, generation) = (self.nav_token, self.generation);
        *self = Console::new(Arc::clone(&self.registry), self.default_screen);
        self.nav_token = nav_token;
        self.generation = generation;
    }

    pub fn nav_token(&self) -> u64 {
        self.nav_token
    }

    pub fn content(&self) -> Option<&Content> {
        self.content.content()
    }

    // ------------------------------------------------------------------
    // Navigator
    // ------------------------------------------------------------------

    /// Starts loading `screen`: hides the keyboard, shows the loading
    /// placeholder, and returns the request to issue.
    pub fn begin_navigation(&mut self, screen: ScreenId, params: Params) -> PendingRequest {
        self.keyboard.deactivate();
        self.content = ContentArea::Loading(screen);
        self.phase = NavPhase::Loading(screen);
        self.nav_token += 1;
        self.status_message = format!("Loading {}…", screen.title());
        info!("Navigating to {} (token {})", screen, self.nav_token);

        PendingRequest {
            endpoint: Endpoint::Appliance,
            request: screen.request(&params),
            purpose: Purpose::Navigate {
                token: self.nav_token,
                screen,
            },
        }
    }

    /// Completes a navigation. Replies to superseded requests are dropped.
    pub fn finish_navigation(&mut self, token: u64, screen: ScreenId, response: &ActionResponse) -> bool {
        if token != self.nav_token {
            info!(
                "Discarding stale reply for {} (token {}, latest {})",
                screen, token, self.nav_token
            );
            return false;
        }
        if self.current_screen == CurrentScreen::ServerError {
            info!("Controller answered for {}; leaving server error", screen);
            self.overlay = Overlay::Hidden;
        }
        self.current_screen = CurrentScreen::Screen(screen);
        self.phase = NavPhase::Rendered(screen);
        self.status_message.clear();
        let content = self.registry.render(screen, response);
        self.show(content);
        true
    }

    /// Redisplays the current screen from `data` without a network round-trip.
    pub fn rerender(&mut self, data: &ActionResponse) -> bool {
        let Some(screen) = self.current_screen.screen() else {
            debug!("Re-render requested with no current screen");
            return false;
        };
        let content = self.registry.render(screen, data);
        self.show(content);
        true
    }

    fn show(&mut self, content: Content) {
        self.generation += 1;
        // Old handles can never resolve again.
        if self.keyboard.target().is_some() {
            self.keyboard.deactivate();
        }
        self.content = ContentArea::Ready {
            generation: self.generation,
            content,
        };
    }

    // ------------------------------------------------------------------
    // Status poller
    // ------------------------------------------------------------------

    /// Appliance endpoint unreachable. Idempotent.
    pub fn enter_server_error(&mut self) {
        if self.current_screen != CurrentScreen::ServerError {
            warn!("Appliance controller unreachable; showing server error overlay");
            self.current_screen = CurrentScreen::ServerError;
            self.phase = NavPhase::Error;
            self.status_message = "Controller unreachable".to_string();
        }
        self.overlay = Overlay::ServerError;
        self.keyboard.deactivate();
    }

    /// Applies one successful status reply. Returns the recovery navigation
    /// when this tick ends a server error.
    pub fn apply_status(&mut self, response: &ActionResponse) -> Option<PendingRequest> {
        let recovery = if self.current_screen == CurrentScreen::ServerError {
            info!("Controller reachable again; reloading {}", self.default_screen);
            self.current_screen = CurrentScreen::Screen(self.default_screen);
            Some(self.begin_navigation(self.default_screen, Vec::new()))
        } else {
            None
        };
        self.overlay = overlay_for(&StatusSnapshot::from_response(response));
        if self.overlay.is_visible() && self.keyboard.is_visible() {
            self.keyboard.deactivate();
        }
        recovery
    }

    // ------------------------------------------------------------------
    // Keyboard target
    // ------------------------------------------------------------------

    /// Handle for text field `field` in the current content, if it is one.
    pub fn focus_handle(&self, field: usize) -> Option<FocusHandle> {
        let generation = self.content.generation()?;
        let form = self.content()?.form.as_ref()?;
        form.field(field)
            .filter(|f| f.is_text())
            .map(|_| FocusHandle { generation, field })
    }

    pub fn target_text(&self) -> Option<&str> {
        let handle = self.keyboard.target()?;
        match &self.content {
            ContentArea::Ready { generation, content } if *generation == handle.generation => {
                match &content.form.as_ref()?.field(handle.field)?.kind {
                    FieldKind::Text(text) => Some(text.as_str()),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

/// Resolves a focus handle to live text, or `None` if the field is gone.
pub(crate) fn resolve_text(content: &mut ContentArea, handle: Option<FocusHandle>) -> Option<&mut String> {
    let handle = handle?;
    match content {
        ContentArea::Ready { generation, content } if *generation == handle.generation => {
            content.form.as_mut()?.field_mut(handle.field)?.text_mut()
        }
        _ => None,
    }
}
