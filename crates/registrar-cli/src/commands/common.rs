//! Shared helpers for CLI commands.

use std::io::IsTerminal;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use console::style;
use registrar_adapter_http::HttpTransport;
use registrar_adapter_sim::SimTransport;
use registrar_api::{ApiError, Transport};
use registrar_console::{App, Command, Context, FormData, Page};
use tracing::debug;

use crate::config::Config;
use crate::ui::{CliDialog, CliNotifier, CliScreen, Prompting, Stdin};

/// Which registrar the command talks to.
#[derive(Debug, Clone)]
pub struct Target {
    pub config: Config,
    /// Use the in-process simulator instead of the configured server.
    pub sim: bool,
}

impl Target {
    /// Build the transport for this target.
    pub fn transport(&self) -> Result<Arc<dyn Transport>> {
        if self.sim {
            debug!("using the in-process simulator");
            return Ok(Arc::new(SimTransport::seeded()));
        }

        let transport = HttpTransport::new(&self.config.api.base_url).with_context(|| {
            format!("Failed to create HTTP client for {}", self.config.api.base_url)
        })?;
        debug!(base_url = transport.base_url(), "using HTTP transport");
        Ok(Arc::new(transport))
    }
}

/// Print `err` unless it is an API failure, which the console has already
/// surfaced as a notification.
pub fn report_error(err: &anyhow::Error) {
    if err.downcast_ref::<ApiError>().is_none() {
        eprintln!("{} {}", style("Error:").red().bold(), err);
    }
}

/// `prompting` when stdin is a terminal, otherwise [`Prompting::Never`].
pub fn prompting_if_terminal(prompting: Prompting) -> Prompting {
    if std::io::stdin().is_terminal() {
        prompting
    } else {
        Prompting::Never
    }
}

/// An app wired to terminal widgets.
pub struct Session {
    pub app: App,
    pub screen: Arc<CliScreen>,
    pub dialog: Arc<CliDialog>,
}

impl Session {
    /// Connect to `target`. A live session prints every frame as it is drawn.
    pub fn open(target: &Target, live: bool) -> Result<Self> {
        Ok(Self::with_transport(target.transport()?, live))
    }

    pub fn with_transport(transport: Arc<dyn Transport>, live: bool) -> Self {
        let screen = Arc::new(CliScreen::new(live));
        let dialog = Arc::new(CliDialog::new());
        let ctx = Context::new(
            transport,
            Arc::new(CliNotifier),
            dialog.clone(),
            screen.clone(),
        );
        Self {
            app: App::new(ctx),
            screen,
            dialog,
        }
    }

    /// Enter `page` and load it.
    pub async fn visit(&mut self, page: Page) -> Result<()> {
        self.app.dispatch(Command::Navigate(page)).await?;
        Ok(())
    }

    pub async fn dispatch(&mut self, command: Command) -> Result<()> {
        self.app.dispatch(command).await?;
        Ok(())
    }

    /// Complete the open dialog and dispatch what it yields.
    ///
    /// A dismissed dialog is closed and reported as cancelled.
    pub async fn submit(&mut self, overrides: &FormData, prompting: Prompting, yes: bool) -> Result<()> {
        match self.dialog.resolve(overrides, prompting, yes, &mut Stdin)? {
            Some(command) => self.dispatch(command).await,
            None => {
                self.app.dispatch(Command::CloseDialog).await?;
                eprintln!("{} Cancelled", style("·").cyan().bold());
                Ok(())
            }
        }
    }

    /// Print the row with `id` of the active table as label/value pairs.
    pub fn show_row(&self, id: i64, noun: &str) -> Result<()> {
        let table = self
            .app
            .table()
            .ok_or_else(|| anyhow::anyhow!("No table on the {} page", self.app.active_page()))?;
        let row = table
            .rows
            .iter()
            .find(|row| row.id == id)
            .ok_or_else(|| anyhow::anyhow!("{noun} not found with ID: {id}"))?;

        println!("{} {noun} #{id}\n", style("→").cyan().bold());
        for (column, cell) in table.columns.iter().zip(&row.cells) {
            println!("  {:<14} {}", style(column).bold(), cell.plain());
        }
        Ok(())
    }
}

/// One invocation of a page edited through full forms (students, courses).
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOp {
    List { search: Option<String> },
    Show(i64),
    Add(FormData),
    Edit(i64, FormData),
    Delete { id: i64, yes: bool },
}

/// Run `op` against `page` the way the console would: open the page, then
/// drive its dialogs with the given values.
pub async fn run_record_op(target: &Target, page: Page, noun: &str, op: RecordOp) -> Result<()> {
    let mut session = Session::open(target, false)?;
    session.visit(page).await?;

    match op {
        RecordOp::List { search } => {
            if let Some(text) = search {
                session.dispatch(Command::Search(text)).await?;
            }
            session.screen.present();
        }
        RecordOp::Show(id) => session.show_row(id, noun)?,
        RecordOp::Add(form) => {
            session.dispatch(Command::OpenCreate).await?;
            let prompting = prompting_if_terminal(Prompting::Missing);
            session.submit(&form, prompting, false).await?;
        }
        RecordOp::Edit(id, form) => {
            session.dispatch(Command::OpenEdit(id)).await?;
            let prompting = if form.iter().next().is_none() {
                prompting_if_terminal(Prompting::All)
            } else {
                Prompting::Never
            };
            session.submit(&form, prompting, false).await?;
        }
        RecordOp::Delete { id, yes } => {
            session.dispatch(Command::ConfirmRemove(id)).await?;
            let prompting = prompting_if_terminal(Prompting::Missing);
            session.submit(&FormData::new(), prompting, yes).await?;
        }
    }
    Ok(())
}

/// Collect the flags that were given into form values.
pub fn form_from(pairs: &[(&'static str, &Option<String>)]) -> FormData {
    pairs
        .iter()
        .filter_map(|(name, value)| value.as_ref().map(|v| (*name, v.clone())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sim() -> Session {
        Session::with_transport(Arc::new(SimTransport::seeded()), false)
    }

    #[test]
    fn test_form_from_skips_absent_flags() {
        let name = Some("Compilers".to_string());
        let absent = None;
        let form = form_from(&[("courseName", &name), ("instructor", &absent)]);
        assert_eq!(form.get("courseName"), "Compilers");
        assert_eq!(form.iter().count(), 1);
    }

    #[tokio::test]
    async fn test_add_through_dialog() {
        let mut session = sim();
        session.visit(Page::Courses).await.unwrap();
        session.dispatch(Command::OpenCreate).await.unwrap();

        let form = FormData::new()
            .with("courseName", "Operating Systems")
            .with("courseCode", "CS350")
            .with("credits", "4");
        session.submit(&form, Prompting::Never, false).await.unwrap();

        assert!(!session.dialog.is_open());
        let table = session.app.table().unwrap();
        assert_eq!(table.rows.len(), 4);
    }

    #[tokio::test]
    async fn test_delete_needs_confirmation() {
        let mut session = sim();
        session.visit(Page::Students).await.unwrap();
        session.dispatch(Command::ConfirmRemove(2)).await.unwrap();

        let err = session
            .submit(&FormData::new(), Prompting::Never, false)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("--yes"));

        session
            .submit(&FormData::new(), Prompting::Never, true)
            .await
            .unwrap();
        assert_eq!(session.app.table().unwrap().ids(), vec![1, 3]);
    }

    #[tokio::test]
    async fn test_show_row_reports_missing_id() {
        let mut session = sim();
        session.visit(Page::Students).await.unwrap();
        assert!(session.show_row(1, "Student").is_ok());
        let err = session.show_row(99, "Student").unwrap_err();
        assert_eq!(err.to_string(), "Student not found with ID: 99");
    }

    #[tokio::test]
    async fn test_rejected_submit_surfaces_api_error() {
        let mut session = sim();
        session.visit(Page::Courses).await.unwrap();
        session.dispatch(Command::OpenCreate).await.unwrap();

        let form = FormData::new()
            .with("courseName", "Duplicate")
            .with("courseCode", "CS301")
            .with("credits", "3");
        let err = session
            .submit(&form, Prompting::Never, false)
            .await
            .unwrap_err();
        let api = err.downcast_ref::<ApiError>().unwrap();
        assert_eq!(api.status(), Some(409));
        assert!(session.dialog.is_open());
    }
}
