//! Registrar Console Core
//!
//! Host-agnostic client logic for the registrar admin console. Each page
//! keeps an in-memory snapshot of one remote collection, renders it as a
//! searchable table and synchronises every mutation with the server,
//! reloading the whole collection afterwards.
//!
//! # Architecture
//!
//! ```text
//!              ┌──────────── App ─────────────┐
//!  Command ──→ │ Router ──→ PageState          │
//!              │            ├─ dashboard      │
//!              │            └─ Controller<R>  │
//!              └──────┬─────────────┬─────────┘
//!                     │             │
//!               Transport      Screen / Notifier / Dialog
//!              (registrar-api)     (host widgets)
//! ```
//!
//! Hosts supply the widgets through a [`Context`]; the headless
//! implementations ([`HeadlessScreen`], [`NotificationLog`], [`DialogSlot`])
//! record everything and back the test suite.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use registrar_adapter_sim::SimTransport;
//! use registrar_console::{App, Command, Context, Page};
//!
//! let (ctx, host) = Context::headless(Arc::new(SimTransport::seeded()));
//! let mut app = App::new(ctx);
//! app.start().await?;
//! app.dispatch(Command::Navigate(Page::Students)).await?;
//! app.dispatch(Command::Search("turing".into())).await?;
//! println!("{:?}", host.screen.last_frame());
//! ```

pub mod app;
pub mod command;
pub mod context;
pub mod controller;
pub mod course;
pub mod dashboard;
pub mod dialog;
pub mod enrollment;
pub mod form;
pub mod notify;
pub mod resource;
pub mod router;
pub mod screen;
pub mod student;
pub mod view;

pub use app::{App, PageState};
pub use command::Command;
pub use context::{Context, Headless};
pub use controller::{Controller, RELOAD_ON_MUTATE, apply_filters};
pub use course::Courses;
pub use dashboard::{Summary, Tally, summarize};
pub use dialog::{ActionStyle, Dialog, DialogAction, DialogBody, DialogSlot, DialogSpec};
pub use enrollment::Enrollments;
pub use form::{FieldKind, FormData, FormField, SelectOption, ValidationError};
pub use notify::{Level, NotificationLog, Notifier};
pub use resource::{Editable, Resource};
pub use router::{Page, Router};
pub use screen::{HeadlessScreen, Screen};
pub use student::Students;
pub use view::{Cell, DashboardView, Panel, RowAction, Stats, TableRow, TableView, Tone, View};
