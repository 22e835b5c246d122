//! # Actions
//!
//! Everything that can happen in the console becomes an `Action`.
//! Operator picks a menu entry? That's `Action::Navigate`.
//! Status poll comes back? That's `Action::StatusPolled(response)`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` describing the I/O to perform next.
//! No I/O happens here; the TUI adapter runs effects and feeds their
//! outcomes back in as more actions.
//!
//! ```text
//! Console + Action  →  update()  →  Console' + Effect
//!                                             │
//!                       Action  ←  spawn_request (tokio task)
//! ```
//!
//! This makes everything testable: `assert_eq!(update(&mut console, action), expected)`.

use log::{debug, info, warn};

use crate::client::{ActionRequest, ActionResponse, Endpoint, Params, TransportError};
use crate::core::content::{Command, Element, SystemCommand};
use crate::core::keyboard::{Interaction, Key};
use crate::core::screen::{CurrentScreen, ScreenId};
use crate::core::state::{Console, Modal, resolve_text};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // Navigator
    Navigate { screen: ScreenId, params: Params },
    NavigationLoaded {
        token: u64,
        screen: ScreenId,
        response: ActionResponse,
    },

    // Form binder
    SubmitForm,
    Refreshed {
        screen: ScreenId,
        response: ActionResponse,
    },
    CycleField { field: usize, delta: isize },

    // Status poller
    StatusPolled(ActionResponse),
    /// Any transport failure against the appliance endpoint.
    ApplianceUnreachable(TransportError),

    // Buttons and dispatches
    /// Operator activated element `index` of the current content.
    Press(usize),
    Activate(Command),
    /// A dispatch finished. `unlocks` is the content generation whose form
    /// it releases, if any.
    Dispatched { unlocks: Option<u64> },
    SystemFailed {
        command: SystemCommand,
        error: TransportError,
    },

    // Virtual keyboard
    Key(Key),
    Interaction(Interaction),
    DismissKeyboard,

    // Modal
    ConfirmModal,
    DismissModal,

    Quit,
}

/// Why a request was sent; decides which action its outcome becomes.
#[derive(Debug, Clone, PartialEq)]
pub enum Purpose {
    Navigate { token: u64, screen: ScreenId },
    /// Form submission; refresh `screen` with the reply.
    Refresh { screen: ScreenId },
    Dispatch { unlocks: Option<u64> },
    System(SystemCommand),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingRequest {
    pub endpoint: Endpoint,
    pub request: ActionRequest,
    pub purpose: Purpose,
}

impl PendingRequest {
    /// Maps the finished round-trip back into an action. Appliance failures
    /// all funnel into the poller's error path; system failures raise an
    /// alert.
    pub fn completion(self, result: Result<ActionResponse, TransportError>) -> Option<Action> {
        match (self.purpose, result) {
            (Purpose::System(command), Err(error)) => Some(Action::SystemFailed { command, error }),
            (Purpose::System(command), Ok(_)) => {
                info!("System command {:?} accepted", command);
                None
            }
            (_, Err(error)) => Some(Action::ApplianceUnreachable(error)),
            (Purpose::Navigate { token, screen }, Ok(response)) => Some(Action::NavigationLoaded {
                token,
                screen,
                response,
            }),
            (Purpose::Refresh { screen }, Ok(response)) => Some(Action::Refreshed { screen, response }),
            (Purpose::Dispatch { unlocks }, Ok(_)) => Some(Action::Dispatched { unlocks }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    Request(PendingRequest),
}

impl From<Option<PendingRequest>> for Effect {
    fn from(request: Option<PendingRequest>) -> Self {
        request.map_or(Effect::None, Effect::Request)
    }
}

pub fn update(console: &mut Console, action: Action) -> Effect {
    match action {
        Action::Navigate { screen, params } => Effect::Request(console.begin_navigation(screen, params)),
        Action::NavigationLoaded {
            token,
            screen,
            response,
        } => {
            console.finish_navigation(token, screen, &response);
            Effect::None
        }

        Action::SubmitForm => submit_form(console),
        Action::Refreshed { screen, response } => {
            if console.current_screen == CurrentScreen::Screen(screen) {
                console.rerender(&response);
            } else {
                info!(
                    "Dropping form reply for {}; current screen is now {:?}",
                    screen, console.current_screen
                );
            }
            Effect::None
        }
        Action::CycleField { field, delta } => {
            if let Some(form) = console.content.content_mut().and_then(|c| c.form.as_mut())
                && let Some(field) = form.field_mut(field)
            {
                field.cycle(delta);
            }
            Effect::None
        }

        Action::StatusPolled(response) => console.apply_status(&response).into(),
        Action::ApplianceUnreachable(error) => {
            debug!("Appliance transport failure: {}", error);
            console.enter_server_error();
            Effect::None
        }

        Action::Press(index) => press(console, index),
        Action::Activate(command) => run_command(console, command, None),
        Action::Dispatched { unlocks } => {
            if let Some(generation) = unlocks {
                if console.content.generation() == Some(generation)
                    && let Some(form) = console.content.content_mut().and_then(|c| c.form.as_mut())
                {
                    form.unlock();
                } else {
                    debug!("Dispatch finished after its form was replaced; nothing to unlock");
                }
            }
            Effect::None
        }
        Action::SystemFailed { command, error } => {
            warn!("System command {:?} failed: {}", command, error);
            console.modal = Some(Modal::Alert(format!("{} failed: {}", command.label(), error)));
            Effect::None
        }

        Action::Key(key) => {
            let handle = console.keyboard.target();
            let text = resolve_text(&mut console.content, handle);
            console.keyboard.press(key, text);
            Effect::None
        }
        Action::Interaction(origin) => {
            console.keyboard.on_interaction(origin);
            Effect::None
        }
        Action::DismissKeyboard => {
            console.keyboard.deactivate();
            Effect::None
        }

        Action::ConfirmModal => match console.modal.take() {
            Some(Modal::Confirm { command, .. }) => run_command(console, command, None),
            _ => Effect::None,
        },
        Action::DismissModal => {
            console.modal = None;
            Effect::None
        }

        Action::Quit => Effect::Quit,
    }
}

fn submit_form(console: &mut Console) -> Effect {
    let Some(screen) = console.current_screen.screen() else {
        debug!("Form submitted with no current screen");
        return Effect::None;
    };
    let Some(form) = console.content().and_then(|c| c.form.as_ref()) else {
        debug!("Form submitted but {} has no form", screen);
        return Effect::None;
    };
    if !form.submit_enabled() {
        debug!("Submit for {} is locked", screen);
        return Effect::None;
    }

    let request = form.serialize();
    info!("Submitting action={} from {}", request.action(), screen);
    console.keyboard.deactivate();
    Effect::Request(PendingRequest {
        endpoint: Endpoint::Appliance,
        request,
        purpose: Purpose::Refresh { screen },
    })
}

fn press(console: &mut Console, index: usize) -> Effect {
    let Some(element) = console.content().and_then(|c| c.elements.get(index)).cloned() else {
        return Effect::None;
    };

    let origin = match element {
        Element::Field(field) => Interaction::Field(field),
        _ => Interaction::Elsewhere,
    };
    console.keyboard.on_interaction(origin);

    match element {
        Element::Button { command, .. } => run_command(console, command, Some(index)),
        Element::Field(field) => {
            if let Some(handle) = console.focus_handle(field) {
                console.keyboard.activate(handle);
            } else {
                return update(console, Action::CycleField { field, delta: 1 });
            }
            Effect::None
        }
        Element::Submit(_) => submit_form(console),
        _ => Effect::None,
    }
}

/// Runs a button's command. `at` is the button's element index, if it came
/// from the content area.
fn run_command(console: &mut Console, command: Command, at: Option<usize>) -> Effect {
    match command {
        Command::Navigate { screen, params } => Effect::Request(console.begin_navigation(screen, params)),
        Command::Dispatch {
            mut request,
            carry,
            unlocks_submit,
        } => {
            if let Some(form) = console.content().and_then(|c| c.form.as_ref()) {
                for name in &carry {
                    if let Some(value) = form.value_of(name) {
                        request.set(name, value);
                    }
                }
            }
            info!("Dispatching action={}", request.action());
            let unlocks = if unlocks_submit {
                console.content.generation()
            } else {
                None
            };
            Effect::Request(PendingRequest {
                endpoint: Endpoint::Appliance,
                request,
                purpose: Purpose::Dispatch { unlocks },
            })
        }
        Command::System(SystemCommand::RestartConsole) => {
            console.reset();
            Effect::Request(console.begin_navigation(console.default_screen, Vec::new()))
        }
        Command::System(command) => match command.action() {
            Some(action) => Effect::Request(PendingRequest {
                endpoint: Endpoint::System,
                request: ActionRequest::new(action),
                purpose: Purpose::System(command),
            }),
            None => Effect::None,
        },
        Command::Confirm { prompt, then } => {
            console.modal = Some(Modal::Confirm {
                prompt,
                command: *then,
            });
            Effect::None
        }
        Command::AppendFields(fields) => {
            if let Some(content) = console.content.content_mut() {
                let at = at.unwrap_or(content.elements.len());
                content.insert_fields(at, fields);
            }
            Effect::None
        }
    }
}
