//! Render instructions handed to a [`Screen`](crate::Screen).
//!
//! Controllers never format output themselves; they describe tables,
//! placeholders and dashboard panels as plain data and let the host draw.

use registrar_api::EnrollmentStatus;

use crate::command::Command;
use crate::router::Page;

/// Colour family of a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Green,
    Blue,
    Red,
    Yellow,
}

impl From<EnrollmentStatus> for Tone {
    fn from(status: EnrollmentStatus) -> Self {
        match status {
            EnrollmentStatus::Active => Tone::Green,
            EnrollmentStatus::Completed => Tone::Blue,
            EnrollmentStatus::Dropped => Tone::Red,
        }
    }
}

/// One table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    /// Secondary text; `None` renders as a dash.
    Muted(Option<String>),
    /// Monospace value (ids, emails, dates); `None` renders as a dash.
    Mono(Option<String>),
    Badge { text: String, tone: Tone },
    /// Avatar with initials, a name and a sub-line.
    Person {
        initials: String,
        name: String,
        sub: String,
    },
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn muted<T: ToString>(value: Option<T>) -> Self {
        Cell::Muted(value.map(|v| v.to_string()))
    }

    pub fn mono<T: ToString>(value: Option<T>) -> Self {
        Cell::Mono(value.map(|v| v.to_string()))
    }

    /// Plain-text rendering, dash for absent values.
    pub fn plain(&self) -> String {
        match self {
            Cell::Text(text) | Cell::Badge { text, .. } => text.clone(),
            Cell::Muted(value) | Cell::Mono(value) => {
                value.clone().unwrap_or_else(|| "—".to_string())
            }
            Cell::Person { name, .. } => name.clone(),
        }
    }
}

/// A per-row button and the intent it dispatches.
#[derive(Debug, Clone, PartialEq)]
pub struct RowAction {
    pub label: &'static str,
    pub command: Command,
    pub danger: bool,
}

impl RowAction {
    pub fn new(label: &'static str, command: Command) -> Self {
        Self {
            label,
            command,
            danger: false,
        }
    }

    pub fn danger(label: &'static str, command: Command) -> Self {
        Self {
            label,
            command,
            danger: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub id: i64,
    pub cells: Vec<Cell>,
    pub actions: Vec<RowAction>,
}

/// A rendered collection, or its empty placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub columns: Vec<&'static str>,
    pub rows: Vec<TableRow>,
    pub empty_message: &'static str,
}

impl TableView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Ids of the rows, in display order.
    pub fn ids(&self) -> Vec<i64> {
        self.rows.iter().map(|row| row.id).collect()
    }
}

/// Headline counts on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub students: usize,
    pub courses: usize,
    pub enrollments: usize,
}

/// A titled list of recent records.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub title: &'static str,
    pub table: TableView,
}

/// Dashboard content. `stats` is `None` when the summary failed, in which
/// case no card shows a number and no panel is drawn.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardView {
    pub stats: Option<Stats>,
    pub panels: Vec<Panel>,
}

/// A full frame for the content area.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Loading(Page),
    Table { page: Page, table: TableView },
    Failed { page: Page, message: String },
    Dashboard(DashboardView),
}

impl View {
    pub fn page(&self) -> Page {
        match self {
            View::Loading(page) | View::Table { page, .. } | View::Failed { page, .. } => *page,
            View::Dashboard(_) => Page::Dashboard,
        }
    }

    pub fn table(&self) -> Option<&TableView> {
        match self {
            View::Table { table, .. } => Some(table),
            _ => None,
        }
    }
}
