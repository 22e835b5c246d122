//! # Content
//!
//! What a screen renderer produces: a flat list of one-line elements plus at
//! most one bound [`ActionForm`]. Rendering always builds a fresh `Content`,
//! so showing the same reply twice yields identical output.

use crate::client::{ActionRequest, Params};
use crate::core::form::{ActionForm, FormField};
use crate::core::screen::ScreenId;

/// Operations on the system endpoint, plus the local console restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemCommand {
    Start,
    Reboot,
    Shutdown,
    RestartConsole,
}

impl SystemCommand {
    pub const ALL: [SystemCommand; 4] = [
        SystemCommand::Start,
        SystemCommand::Reboot,
        SystemCommand::Shutdown,
        SystemCommand::RestartConsole,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SystemCommand::Start => "Start controller",
            SystemCommand::Reboot => "Reboot",
            SystemCommand::Shutdown => "Shut down",
            SystemCommand::RestartConsole => "Restart console",
        }
    }

    /// Action for the system endpoint; `None` for local commands.
    pub fn action(self) -> Option<&'static str> {
        match self {
            SystemCommand::Start => Some("start"),
            SystemCommand::Reboot => Some("reboot"),
            SystemCommand::Shutdown => Some("shutdown"),
            SystemCommand::RestartConsole => None,
        }
    }
}

/// What activating a button does.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Navigate { screen: ScreenId, params: Params },
    /// Fire-and-forget appliance action. `carry` names form fields whose
    /// current values are copied into the request at activation time.
    Dispatch {
        request: ActionRequest,
        carry: Vec<String>,
        unlocks_submit: bool,
    },
    System(SystemCommand),
    /// Ask first, then run `then`.
    Confirm { prompt: String, then: Box<Command> },
    /// Grow the bound form by a group of fields, inserted before this button.
    AppendFields(Vec<FormField>),
}

impl Command {
    pub fn navigate(screen: ScreenId) -> Self {
        Command::Navigate {
            screen,
            params: Vec::new(),
        }
    }

    pub fn dispatch(request: ActionRequest) -> Self {
        Command::Dispatch {
            request,
            carry: Vec::new(),
            unlocks_submit: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Heading(String),
    Text(String),
    /// Status line from the controller (saved, removed, error...).
    Notice(String),
    Row(Vec<String>),
    Bar {
        label: String,
        value: String,
        fraction: f64,
    },
    Button {
        label: String,
        command: Command,
    },
    /// Index into the bound form's fields.
    Field(usize),
    Submit(String),
}

impl Element {
    pub fn is_interactive(&self) -> bool {
        matches!(
            self,
            Element::Button { .. } | Element::Field(_) | Element::Submit(_)
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Content {
    pub screen: ScreenId,
    pub elements: Vec<Element>,
    pub form: Option<ActionForm>,
}

impl Content {
    pub fn new(screen: ScreenId) -> Self {
        Self {
            screen,
            elements: Vec::new(),
            form: None,
        }
    }

    pub fn heading(&mut self, text: impl Into<String>) -> &mut Self {
        self.elements.push(Element::Heading(text.into()));
        self
    }

    pub fn text(&mut self, text: impl Into<String>) -> &mut Self {
        self.elements.push(Element::Text(text.into()));
        self
    }

    pub fn notice(&mut self, text: impl Into<String>) -> &mut Self {
        self.elements.push(Element::Notice(text.into()));
        self
    }

    pub fn row(&mut self, cells: Vec<String>) -> &mut Self {
        self.elements.push(Element::Row(cells));
        self
    }

    pub fn bar(&mut self, label: impl Into<String>, value: impl Into<String>, fraction: f64) -> &mut Self {
        self.elements.push(Element::Bar {
            label: label.into(),
            value: value.into(),
            fraction: fraction.clamp(0.0, 1.0),
        });
        self
    }

    pub fn button(&mut self, label: impl Into<String>, command: Command) -> &mut Self {
        self.elements.push(Element::Button {
            label: label.into(),
            command,
        });
        self
    }

    /// Binds `form`; its visible fields are added by [`Content::field`].
    pub fn bind(&mut self, form: ActionForm) -> &mut Self {
        self.form = Some(form);
        self
    }

    /// Adds a field to the bound form. Hidden fields get no element.
    ///
    /// # Panics
    /// If no form has been bound; renderers always bind before adding fields.
    pub fn field(&mut self, field: FormField) -> &mut Self {
        let hidden = field.is_hidden();
        let screen = self.screen;
        let form = self
            .form
            .as_mut()
            .unwrap_or_else(|| panic!("{screen}: field added before a form was bound"));
        let index = form.push(field);
        if !hidden {
            self.elements.push(Element::Field(index));
        }
        self
    }

    pub fn submit(&mut self, label: impl Into<String>) -> &mut Self {
        self.elements.push(Element::Submit(label.into()));
        self
    }

    /// Shows the controller's application error, if the reply carried one.
    pub fn error_notice(&mut self, error: Option<&str>) -> &mut Self {
        if let Some(error) = error {
            self.notice(format!("Error: {error}"));
        }
        self
    }

    /// Indices of elements the operator can focus.
    pub fn interactive(&self) -> Vec<usize> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_interactive())
            .map(|(i, _)| i)
            .collect()
    }

    /// Inserts `fields` into the form, with their elements placed at `at`.
    pub fn insert_fields(&mut self, at: usize, fields: Vec<FormField>) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        let mut at = at.min(self.elements.len());
        for field in fields {
            let hidden = field.is_hidden();
            let index = form.push(field);
            if !hidden {
                self.elements.insert(at, Element::Field(index));
                at += 1;
            }
        }
    }
}

/// The shared content area.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ContentArea {
    #[default]
    Empty,
    Loading(ScreenId),
    Ready {
        /// Bumped on every render; keyboard handles compare against it.
        generation: u64,
        content: Content,
    },
}

impl ContentArea {
    pub fn content(&self) -> Option<&Content> {
        match self {
            ContentArea::Ready { content, .. } => Some(content),
            _ => None,
        }
    }

    pub fn content_mut(&mut self) -> Option<&mut Content> {
        match self {
            ContentArea::Ready { content, .. } => Some(content),
            _ => None,
        }
    }

    pub fn generation(&self) -> Option<u64> {
        match self {
            ContentArea::Ready { generation, .. } => Some(*generation),
            _ => None,
        }
    }
}
