//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::client::{ActionRequest, ActionResponse, ActionTransport, Endpoint, TransportError};
use crate::core::action::update;
use crate::core::content::{Command, Content};
use crate::core::form::{ActionForm, FormField};
use crate::core::registry::RendererRegistry;
use crate::core::screen::ScreenId;
use crate::core::state::Console;

/// Screen whose test renderer binds a small form:
/// `action=X`, hidden `a` and `b` (from the reply), text `name` (field 3),
/// an "Add note" button and a submit.
pub const FORM_SCREEN: ScreenId = ScreenId::Edit;

/// Screen whose test renderer binds only `action=X` and hidden `a` and `b`,
/// so a submission carries exactly those three pairs.
pub const HIDDEN_FORM_SCREEN: ScreenId = ScreenId::SingleIngredient;

/// A transport that replays scripted replies and records every request.
/// Once the script runs out it answers with an empty object.
#[derive(Default)]
pub struct StubTransport {
    replies: Mutex<VecDeque<Result<ActionResponse, TransportError>>>,
    sent: Mutex<Vec<(Endpoint, ActionRequest)>>,
}

impl StubTransport {
    pub fn new(replies: Vec<Result<ActionResponse, TransportError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<(Endpoint, ActionRequest)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ActionTransport for StubTransport {
    async fn send(&self, endpoint: Endpoint, request: &ActionRequest) -> Result<ActionResponse, TransportError> {
        self.sent.lock().unwrap().push((endpoint, request.clone()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ActionResponse::default()))
    }
}

pub fn response(value: Value) -> ActionResponse {
    ActionResponse::from_value(value)
}

fn title_only(screen: ScreenId, data: &ActionResponse) -> Content {
    let mut content = Content::new(screen);
    content.heading(screen.title()).error_notice(data.error());
    content
}

fn form_screen(screen: ScreenId, data: &ActionResponse) -> Content {
    let int = |key: &str| data.get(key).and_then(Value::as_i64).unwrap_or(0);
    let mut content = Content::new(screen);
    content
        .heading(screen.title())
        .bind(ActionForm::new("X"))
        .field(FormField::hidden("a", int("a")))
        .field(FormField::hidden("b", int("b")))
        .field(FormField::text("name", "Name", ""))
        .button(
            "Add note",
            Command::AppendFields(vec![FormField::text("note[]", "Note", "")]),
        )
        .submit("Save");
    if let Some(message) = data.str_field("message") {
        content.notice(message);
    }
    content
}

fn hidden_form_screen(screen: ScreenId, data: &ActionResponse) -> Content {
    let int = |key: &str| data.get(key).and_then(Value::as_i64).unwrap_or(0);
    let mut content = Content::new(screen);
    content
        .heading(screen.title())
        .bind(ActionForm::new("X"))
        .field(FormField::hidden("a", int("a")))
        .field(FormField::hidden("b", int("b")))
        .submit("Send");
    content
}

pub fn test_registry() -> RendererRegistry {
    let mut registry = RendererRegistry::new();
    for screen in ScreenId::ALL {
        registry.register(screen, title_only);
    }
    registry.register(FORM_SCREEN, form_screen);
    registry.register(HIDDEN_FORM_SCREEN, hidden_form_screen);
    registry
}

/// A fresh console whose default screen is `list_recipes`.
pub fn test_console() -> Console {
    Console::new(Arc::new(test_registry()), ScreenId::ListRecipes)
}

/// A console that has navigated to `screen` and rendered `data`.
pub fn loaded_console(screen: ScreenId, data: Value) -> Console {
    let mut console = test_console();
    let pending = console.begin_navigation(screen, Vec::new());
    let action = pending
        .completion(Ok(response(data)))
        .expect("navigation completes with an action");
    update(&mut console, action);
    assert!(matches!(
        console.current_screen,
        crate::core::screen::CurrentScreen::Screen(s) if s == screen
    ));
    console
}

