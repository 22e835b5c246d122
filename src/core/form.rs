//! # Action Forms
//!
//! One submission protocol shared by every screen that changes data.
//!
//! A form is bound to a single controller action when it is created. That
//! action lives in a hidden `action` field, so serializing the form always
//! produces `{action, ...fields}` with nothing screen-specific in between.
//! After a successful submit the console re-renders the screen that was
//! current when the form was sent, using the reply as fresh data.

use crate::client::{ACTION_KEY, ActionRequest, Scalar};

/// One choice in a select field.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub value: Scalar,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<Scalar>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Hidden(Scalar),
    Text(String),
    Select {
        options: Vec<SelectOption>,
        selected: usize,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
}

impl FormField {
    pub fn hidden(name: &str, value: impl Into<Scalar>) -> Self {
        Self {
            name: name.to_string(),
            label: String::new(),
            kind: FieldKind::Hidden(value.into()),
        }
    }

    pub fn text(name: &str, label: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind: FieldKind::Text(value.into()),
        }
    }

    /// A select field; `selected_value` picks the initial option, falling
    /// back to the first one.
    pub fn select(name: &str, label: &str, options: Vec<SelectOption>, selected_value: Option<&Scalar>) -> Self {
        let selected = selected_value
            .and_then(|wanted| options.iter().position(|o| same_value(&o.value, wanted)))
            .unwrap_or(0);
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind: FieldKind::Select { options, selected },
        }
    }

    pub fn is_hidden(&self) -> bool {
        matches!(self.kind, FieldKind::Hidden(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, FieldKind::Text(_))
    }

    /// Current value, or `None` for a select with no options.
    pub fn value(&self) -> Option<Scalar> {
        match &self.kind {
            FieldKind::Hidden(value) => Some(value.clone()),
            FieldKind::Text(text) => Some(Scalar::Text(text.clone())),
            FieldKind::Select { options, selected } => options.get(*selected).map(|o| o.value.clone()),
        }
    }

    /// Human-readable current value.
    pub fn display_value(&self) -> String {
        match &self.kind {
            FieldKind::Hidden(value) => value.to_string(),
            FieldKind::Text(text) => text.clone(),
            FieldKind::Select { options, selected } => options
                .get(*selected)
                .map(|o| o.label.clone())
                .unwrap_or_default(),
        }
    }

    /// Moves a select by `delta` options, wrapping. No-op for other kinds.
    pub fn cycle(&mut self, delta: isize) {
        if let FieldKind::Select { options, selected } = &mut self.kind
            && !options.is_empty()
        {
            let len = options.len() as isize;
            *selected = (*selected as isize + delta).rem_euclid(len) as usize;
        }
    }

    pub fn text_mut(&mut self) -> Option<&mut String> {
        match &mut self.kind {
            FieldKind::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Scalars coming from JSON may be ints on one side and text on the other
/// (`"3"` vs `3`); compare them by their rendered form.
fn same_value(a: &Scalar, b: &Scalar) -> bool {
    a == b || a.to_string() == b.to_string()
}

/// A set of fields bound to one controller action.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionForm {
    fields: Vec<FormField>,
    submit_enabled: bool,
}

impl ActionForm {
    pub fn new(action: &str) -> Self {
        Self {
            fields: vec![FormField::hidden(ACTION_KEY, action)],
            submit_enabled: true,
        }
    }

    /// Starts with submission disabled until something unlocks it.
    pub fn locked(mut self) -> Self {
        self.submit_enabled = false;
        self
    }

    pub fn action(&self) -> String {
        self.fields[0]
            .value()
            .map(|v| v.to_string())
            .unwrap_or_default()
    }

    /// Adds a field and returns its index.
    pub fn push(&mut self, field: FormField) -> usize {
        self.fields.push(field);
        self.fields.len() - 1
    }

    pub fn field(&self, index: usize) -> Option<&FormField> {
        self.fields.get(index)
    }

    pub fn field_mut(&mut self, index: usize) -> Option<&mut FormField> {
        self.fields.get_mut(index)
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// Current value of the first field called `name`.
    pub fn value_of(&self, name: &str) -> Option<Scalar> {
        self.fields.iter().find(|f| f.name == name).and_then(FormField::value)
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    pub fn unlock(&mut self) {
        self.submit_enabled = true;
    }

    /// Every field, in order, as one request.
    pub fn serialize(&self) -> ActionRequest {
        self.fields
            .iter()
            .filter_map(|field| field.value().map(|value| (field.name.clone(), value)))
            .collect()
    }
}
