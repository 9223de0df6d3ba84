//! Host services passed into every page operation.

use std::sync::Arc;

use registrar_api::{ApiError, Transport};
use tracing::warn;

use crate::dialog::{Dialog, DialogSlot};
use crate::notify::{Level, NotificationLog, Notifier};
use crate::screen::{HeadlessScreen, Screen};

/// The transport plus the three widgets a page talks to.
#[derive(Clone)]
pub struct Context {
    pub transport: Arc<dyn Transport>,
    pub notifier: Arc<dyn Notifier>,
    pub dialog: Arc<dyn Dialog>,
    pub screen: Arc<dyn Screen>,
}

/// Concrete handles behind a headless [`Context`].
#[derive(Clone, Default)]
pub struct Headless {
    pub notifications: Arc<NotificationLog>,
    pub dialog: Arc<DialogSlot>,
    pub screen: Arc<HeadlessScreen>,
}

impl Context {
    pub fn new(
        transport: Arc<dyn Transport>,
        notifier: Arc<dyn Notifier>,
        dialog: Arc<dyn Dialog>,
        screen: Arc<dyn Screen>,
    ) -> Self {
        Self {
            transport,
            notifier,
            dialog,
            screen,
        }
    }

    /// A context with recording widgets, returned alongside their handles.
    pub fn headless(transport: Arc<dyn Transport>) -> (Self, Headless) {
        let host = Headless::default();
        let ctx = Self::new(
            transport,
            host.notifications.clone(),
            host.dialog.clone(),
            host.screen.clone(),
        );
        (ctx, host)
    }

    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    pub fn success(&self, message: &str) {
        self.notifier.notify(message, Level::Success);
    }

    pub fn info(&self, message: &str) {
        self.notifier.notify(message, Level::Info);
    }

    /// Surface `err` to the user and hand it back for propagation.
    pub fn fail(&self, err: ApiError) -> ApiError {
        warn!(error = %err, "operation failed");
        self.notifier.notify(&err.to_string(), Level::Error);
        err
    }
}
