//! Terminal implementations of the console's host widgets.

pub mod dialog;
pub mod notifier;
pub mod screen;

pub use dialog::{CliDialog, LineSource, Prompting, Stdin};
pub use notifier::CliNotifier;
pub use screen::CliScreen;
