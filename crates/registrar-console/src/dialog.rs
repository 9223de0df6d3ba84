//! Modal dialogs.
//!
//! The caller decides what each button does by attaching a closure that
//! turns the submitted form into a [`Command`]. A dialog host only shows the
//! [`DialogSpec`] and hands the chosen action's command back to the app.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use crate::command::Command;
use crate::form::{FormData, FormField};

/// Visual weight of a dialog button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionStyle {
    Ghost,
    Primary,
    Danger,
}

type Handler = Arc<dyn Fn(&FormData) -> Option<Command> + Send + Sync>;

/// A dialog button. Without a handler the button just dismisses.
#[derive(Clone)]
pub struct DialogAction {
    pub label: &'static str,
    pub style: ActionStyle,
    on_select: Option<Handler>,
}

impl DialogAction {
    /// A dismiss button.
    pub fn cancel() -> Self {
        Self {
            label: "Cancel",
            style: ActionStyle::Ghost,
            on_select: None,
        }
    }

    pub fn primary(
        label: &'static str,
        on_select: impl Fn(&FormData) -> Option<Command> + Send + Sync + 'static,
    ) -> Self {
        Self {
            label,
            style: ActionStyle::Primary,
            on_select: Some(Arc::new(on_select)),
        }
    }

    pub fn danger(
        label: &'static str,
        on_select: impl Fn(&FormData) -> Option<Command> + Send + Sync + 'static,
    ) -> Self {
        Self {
            label,
            style: ActionStyle::Danger,
            on_select: Some(Arc::new(on_select)),
        }
    }

    /// Whether choosing this action only closes the dialog.
    pub fn dismisses(&self) -> bool {
        self.on_select.is_none()
    }

    /// The command this action yields for `form`.
    pub fn select(&self, form: &FormData) -> Option<Command> {
        self.on_select.as_ref().and_then(|handler| handler(form))
    }
}

impl fmt::Debug for DialogAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogAction")
            .field("label", &self.label)
            .field("style", &self.style)
            .field("dismisses", &self.dismisses())
            .finish()
    }
}

#[derive(Debug, Clone)]
pub enum DialogBody {
    Message(String),
    Form(Vec<FormField>),
}

/// Everything a host needs to show one dialog.
#[derive(Debug, Clone)]
pub struct DialogSpec {
    pub title: String,
    pub body: DialogBody,
    pub actions: Vec<DialogAction>,
}

impl DialogSpec {
    pub fn message(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: DialogBody::Message(message.into()),
            actions: Vec::new(),
        }
    }

    pub fn form(title: impl Into<String>, fields: Vec<FormField>) -> Self {
        Self {
            title: title.into(),
            body: DialogBody::Form(fields),
            actions: Vec::new(),
        }
    }

    pub fn with_action(mut self, action: DialogAction) -> Self {
        self.actions.push(action);
        self
    }

    pub fn fields(&self) -> &[FormField] {
        match &self.body {
            DialogBody::Form(fields) => fields,
            DialogBody::Message(_) => &[],
        }
    }

    /// The pre-filled values of every field.
    pub fn form_values(&self) -> FormData {
        self.fields()
            .iter()
            .map(|field| (field.name, field.value.clone()))
            .collect()
    }

    pub fn action(&self, label: &str) -> Option<&DialogAction> {
        self.actions.iter().find(|a| a.label == label)
    }

    /// The first non-dismissing action (the "submit" button).
    pub fn default_action(&self) -> Option<&DialogAction> {
        self.actions.iter().find(|a| !a.dismisses())
    }

    /// Choose the action labelled `label` with `form` as the submitted values.
    pub fn choose(&self, label: &str, form: &FormData) -> Option<Command> {
        self.action(label).and_then(|action| action.select(form))
    }
}

/// Host of the single active dialog. Opening replaces any open dialog.
pub trait Dialog: Send + Sync {
    fn open(&self, spec: DialogSpec);
    fn close(&self);
}

/// Dialog host that just holds the open spec. Headless hosts and tests
/// drive it through [`DialogSlot::current`] and [`DialogSpec::choose`].
#[derive(Debug, Default)]
pub struct DialogSlot {
    open: Mutex<Option<DialogSpec>>,
}

impl DialogSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<DialogSpec> {
        self.open
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_open(&self) -> bool {
        self.open
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Take the open dialog out of the slot, leaving it closed.
    pub fn take(&self) -> Option<DialogSpec> {
        self.open
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

impl Dialog for DialogSlot {
    fn open(&self, spec: DialogSpec) {
        *self.open.lock().unwrap_or_else(PoisonError::into_inner) = Some(spec);
    }

    fn close(&self) {
        *self.open.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
