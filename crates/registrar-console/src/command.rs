//! User intents routed by the [`App`](crate::App).

use registrar_api::{EnrollmentStatus, Grade};

use crate::form::FormData;
use crate::router::Page;

/// Something the user asked for. Row buttons and dialog actions produce
/// these; the app dispatches them to the active page.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Navigate(Page),
    /// Reload the active page.
    Refresh,
    Search(String),
    /// Enrollment status filter; `None` clears it.
    FilterStatus(Option<EnrollmentStatus>),
    OpenCreate,
    Create(FormData),
    OpenEdit(i64),
    Update(i64, FormData),
    /// Ask for confirmation before deleting.
    ConfirmRemove(i64),
    Remove(i64),
    OpenGrade(i64),
    SetGrade(i64, Grade),
    OpenStatus(i64),
    SetStatus(i64, EnrollmentStatus),
    CloseDialog,
}

impl Command {
    /// Short name for logs and informational notices.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Navigate(_) => "navigate",
            Command::Refresh => "refresh",
            Command::Search(_) => "search",
            Command::FilterStatus(_) => "filter",
            Command::OpenCreate => "new",
            Command::Create(_) => "create",
            Command::OpenEdit(_) => "edit",
            Command::Update(..) => "update",
            Command::ConfirmRemove(_) => "delete",
            Command::Remove(_) => "remove",
            Command::OpenGrade(_) | Command::SetGrade(..) => "grade",
            Command::OpenStatus(_) | Command::SetStatus(..) => "status",
            Command::CloseDialog => "close",
        }
    }
}
