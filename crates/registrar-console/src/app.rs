//! Application shell: the router plus the active page's state.

use registrar_api::ApiResult;
use tracing::debug;

use crate::command::Command;
use crate::context::Context;
use crate::controller::Controller;
use crate::course::Courses;
use crate::dashboard;
use crate::enrollment::Enrollments;
use crate::resource::{Editable, Resource};
use crate::router::{Page, Router};
use crate::student::Students;
use crate::view::TableView;

/// State owned by the active page. Rebuilt on every page entry.
#[derive(Debug)]
pub enum PageState {
    Dashboard,
    Students(Controller<Students>),
    Courses(Controller<Courses>),
    Enrollments(Controller<Enrollments>),
}

impl PageState {
    fn fresh(page: Page) -> Self {
        match page {
            Page::Dashboard => PageState::Dashboard,
            Page::Students => PageState::Students(Controller::new()),
            Page::Courses => PageState::Courses(Controller::new()),
            Page::Enrollments => PageState::Enrollments(Controller::new()),
        }
    }
}

/// Outcome of offering a command to a page handler.
enum Step {
    Done(ApiResult<()>),
    Pass(Command),
}

/// Commands every collection page understands.
async fn collection<R: Resource>(
    ctrl: &mut Controller<R>,
    ctx: &Context,
    command: Command,
) -> Step {
    match command {
        Command::Search(text) => {
            ctrl.search(ctx, text);
            Step::Done(Ok(()))
        }
        Command::Create(form) => Step::Done(ctrl.create(ctx, &form).await),
        Command::ConfirmRemove(id) => {
            ctrl.confirm_remove(ctx, id);
            Step::Done(Ok(()))
        }
        Command::Remove(id) => Step::Done(ctrl.remove(ctx, id).await),
        other => Step::Pass(other),
    }
}

/// Commands of pages edited through a full form.
async fn editable<R: Editable>(
    ctrl: &mut Controller<R>,
    ctx: &Context,
    command: Command,
) -> Step {
    match command {
        Command::OpenCreate => {
            ctrl.open_create(ctx);
            Step::Done(Ok(()))
        }
        Command::OpenEdit(id) => Step::Done(ctrl.open_edit(ctx, id).await),
        Command::Update(id, form) => Step::Done(ctrl.update(ctx, id, &form).await),
        other => collection(ctrl, ctx, other).await,
    }
}

async fn enrollments(ctrl: &mut Controller<Enrollments>, ctx: &Context, command: Command) -> Step {
    match command {
        Command::FilterStatus(status) => {
            ctrl.filter_facet(ctx, status);
            Step::Done(Ok(()))
        }
        Command::OpenCreate => Step::Done(ctrl.open_enroll(ctx).await),
        Command::OpenGrade(id) => {
            ctrl.open_grade(ctx, id);
            Step::Done(Ok(()))
        }
        Command::SetGrade(id, grade) => Step::Done(ctrl.set_grade(ctx, id, grade).await),
        Command::OpenStatus(id) => {
            ctrl.open_status(ctx, id);
            Step::Done(Ok(()))
        }
        Command::SetStatus(id, status) => Step::Done(ctrl.set_status(ctx, id, status).await),
        other => collection(ctrl, ctx, other).await,
    }
}

/// The client: one router, one active page, one set of host services.
pub struct App {
    ctx: Context,
    router: Router,
    state: PageState,
}

impl App {
    /// An app sitting on the dashboard. Nothing is fetched until
    /// [`start`](Self::start) or the first command.
    pub fn new(ctx: Context) -> Self {
        Self {
            ctx,
            router: Router::new(),
            state: PageState::Dashboard,
        }
    }

    /// Enter the dashboard.
    pub async fn start(&mut self) -> ApiResult<()> {
        self.switch_page(Page::Dashboard).await
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn active_page(&self) -> Page {
        self.router.active()
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    /// Render instructions of the active collection page.
    pub fn table(&self) -> Option<TableView> {
        match &self.state {
            PageState::Dashboard => None,
            PageState::Students(ctrl) => Some(ctrl.table()),
            PageState::Courses(ctrl) => Some(ctrl.table()),
            PageState::Enrollments(ctrl) => Some(ctrl.table()),
        }
    }

    /// Switch to `page` with fresh page state and run its entry point.
    pub async fn switch_page(&mut self, page: Page) -> ApiResult<()> {
        self.router.switch_to(page, self.ctx.screen.as_ref());
        self.state = PageState::fresh(page);
        self.refresh().await
    }

    /// Re-run the active page's entry point, keeping its filters.
    pub async fn refresh(&mut self) -> ApiResult<()> {
        let ctx = &self.ctx;
        match &mut self.state {
            PageState::Dashboard => dashboard::show(ctx).await.map(|_| ()),
            PageState::Students(ctrl) => ctrl.load(ctx).await,
            PageState::Courses(ctrl) => ctrl.load(ctx).await,
            PageState::Enrollments(ctrl) => ctrl.load(ctx).await,
        }
    }

    /// Route `command` to the active page.
    ///
    /// Commands the active page does not support produce an informational
    /// notice and change nothing.
    pub async fn dispatch(&mut self, command: Command) -> ApiResult<()> {
        debug!(command = command.name(), page = %self.active_page(), "dispatch");

        match command {
            Command::Navigate(page) => return self.switch_page(page).await,
            Command::Refresh => return self.refresh().await,
            Command::CloseDialog => {
                self.ctx.dialog.close();
                return Ok(());
            }
            _ => {}
        }

        let ctx = &self.ctx;
        let step = match &mut self.state {
            PageState::Dashboard => Step::Pass(command),
            PageState::Students(ctrl) => editable(ctrl, ctx, command).await,
            PageState::Courses(ctrl) => editable(ctrl, ctx, command).await,
            PageState::Enrollments(ctrl) => enrollments(ctrl, ctx, command).await,
        };

        match step {
            Step::Done(result) => result,
            Step::Pass(command) => {
                ctx.info(&format!(
                    "'{}' is not available on the {} page",
                    command.name(),
                    self.router.active().title()
                ));
                Ok(())
            }
        }
    }
}
