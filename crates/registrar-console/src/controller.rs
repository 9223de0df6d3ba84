//! Generic collection controller.
//!
//! A [`Controller`] owns one page's snapshot of a remote collection plus the
//! page's filter state. It is constructed on page entry and dropped when the
//! page is left, so no filter or snapshot leaks across pages.
//!
//! ```text
//!   load ──→ snapshot ──→ apply_filters ──→ table ──→ Screen::draw
//!    ↑                     (pure, no I/O)
//!    └── create / update / remove (reload after every success)
//! ```

use registrar_api::{ApiRequest, ApiResult, Method, fetch_list, fetch_one, send_json};
use tracing::{debug, info, instrument};

use crate::command::Command;
use crate::context::Context;
use crate::dialog::{DialogAction, DialogSpec};
use crate::form::FormData;
use crate::resource::{Editable, Resource};
use crate::view::{TableView, View};

/// After a successful mutation, re-fetch the whole collection instead of
/// patching the snapshot locally.
pub const RELOAD_ON_MUTATE: bool = true;

/// Items of `items` passing the text filter and then the facet filter.
///
/// An empty `text` and a `None` facet impose no constraint. The text match is
/// case-insensitive and is not trimmed.
pub fn apply_filters<'a, R: Resource>(
    items: &'a [R::Item],
    text: &str,
    facet: Option<R::Facet>,
) -> Vec<&'a R::Item> {
    let needle = text.to_lowercase();
    items
        .iter()
        .filter(|item| needle.is_empty() || R::matches(item, &needle))
        .filter(|item| facet.is_none_or(|wanted| R::facet(item) == Some(wanted)))
        .collect()
}

/// Snapshot and filter state of one collection page.
#[derive(Debug)]
pub struct Controller<R: Resource> {
    items: Vec<R::Item>,
    text_filter: String,
    facet_filter: Option<R::Facet>,
}

impl<R: Resource> Default for Controller<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            text_filter: String::new(),
            facet_filter: None,
        }
    }
}

impl<R: Resource> Controller<R> {
    /// An empty controller; nothing is fetched until [`load`](Self::load).
    pub fn new() -> Self {
        Self::default()
    }

    /// The last loaded snapshot.
    pub fn items(&self) -> &[R::Item] {
        &self.items
    }

    pub fn text_filter(&self) -> &str {
        &self.text_filter
    }

    pub fn facet_filter(&self) -> Option<R::Facet> {
        self.facet_filter
    }

    pub fn find(&self, id: i64) -> Option<&R::Item> {
        self.items.iter().find(|item| R::id(item) == id)
    }

    /// The snapshot under the current filters.
    pub fn visible(&self) -> Vec<&R::Item> {
        apply_filters::<R>(&self.items, &self.text_filter, self.facet_filter)
    }

    /// Render instructions for the filtered view.
    pub fn table(&self) -> TableView {
        TableView {
            columns: R::columns(),
            rows: self.visible().into_iter().map(R::row).collect(),
            empty_message: R::EMPTY,
        }
    }

    pub fn render(&self, ctx: &Context) {
        ctx.screen.draw(&View::Table {
            page: R::PAGE,
            table: self.table(),
        });
    }

    /// GET the full collection.
    pub async fn fetch(ctx: &Context) -> ApiResult<Vec<R::Item>> {
        fetch_list(ctx.transport(), R::PATH).await
    }

    /// Replace the snapshot with a fresh copy of the collection.
    ///
    /// On failure the snapshot is kept, an error placeholder is drawn and the
    /// error is notified.
    #[instrument(skip_all, fields(path = R::PATH))]
    pub async fn load(&mut self, ctx: &Context) -> ApiResult<()> {
        ctx.screen.draw(&View::Loading(R::PAGE));

        match Self::fetch(ctx).await {
            Ok(items) => {
                debug!(count = items.len(), "loaded");
                self.items = items;
                ctx.screen.set_badge(R::PAGE, self.items.len());
                self.render(ctx);
                Ok(())
            }
            Err(err) => {
                ctx.screen.draw(&View::Failed {
                    page: R::PAGE,
                    message: err.to_string(),
                });
                Err(ctx.fail(err))
            }
        }
    }

    /// Store the text filter and re-render from the snapshot.
    pub fn search(&mut self, ctx: &Context, text: impl Into<String>) {
        self.text_filter = text.into();
        self.render(ctx);
    }

    /// Store the facet filter and re-render from the snapshot.
    pub fn filter_facet(&mut self, ctx: &Context, facet: Option<R::Facet>) {
        self.facet_filter = facet;
        self.render(ctx);
    }

    /// Validate `form` and POST it.
    ///
    /// Invalid input is notified and returned without touching the
    /// transport. A rejected request leaves the dialog open.
    #[instrument(skip_all, fields(path = R::PATH))]
    pub async fn create(&mut self, ctx: &Context, form: &FormData) -> ApiResult<()> {
        let draft = R::draft(form).map_err(|e| ctx.fail(e.into()))?;

        send_json(ctx.transport(), Method::Post, R::PATH, &draft)
            .await
            .map_err(|e| ctx.fail(e))?;

        info!("{} created", R::NOUN);
        self.after_mutation(ctx, R::CREATED).await
    }

    /// Open the delete confirmation for record `id`.
    pub fn confirm_remove(&self, ctx: &Context, id: i64) {
        let (title, text) = R::confirm_text(id, self.find(id));
        ctx.dialog.open(
            DialogSpec::message(title, text)
                .with_action(DialogAction::cancel())
                .with_action(DialogAction::danger("Delete", move |_| {
                    Some(Command::Remove(id))
                })),
        );
    }

    /// DELETE record `id`.
    #[instrument(skip(self, ctx), fields(path = R::PATH))]
    pub async fn remove(&mut self, ctx: &Context, id: i64) -> ApiResult<()> {
        ctx.transport()
            .call(ApiRequest::delete(format!("{}/{id}", R::PATH)))
            .await
            .map_err(|e| ctx.fail(e))?;

        info!("{} {id} deleted", R::NOUN);
        self.after_mutation(ctx, R::DELETED).await
    }

    /// Close the dialog, confirm success and resynchronise.
    pub(crate) async fn after_mutation(&mut self, ctx: &Context, message: &str) -> ApiResult<()> {
        ctx.dialog.close();
        ctx.success(message);
        if RELOAD_ON_MUTATE {
            self.load(ctx).await?;
        }
        Ok(())
    }
}

impl<R: Editable> Controller<R> {
    /// Open an empty create form.
    pub fn open_create(&self, ctx: &Context) {
        ctx.dialog.open(
            DialogSpec::form(R::CREATE_TITLE, R::form(None))
                .with_action(DialogAction::cancel())
                .with_action(DialogAction::primary(R::CREATE_LABEL, |form| {
                    Some(Command::Create(form.clone()))
                })),
        );
    }

    /// Fetch record `id` and open a pre-filled edit form.
    pub async fn open_edit(&self, ctx: &Context, id: i64) -> ApiResult<()> {
        let item: R::Item = fetch_one(ctx.transport(), &format!("{}/{id}", R::PATH))
            .await
            .map_err(|e| ctx.fail(e))?;

        ctx.dialog.open(
            DialogSpec::form(R::EDIT_TITLE, R::form(Some(&item)))
                .with_action(DialogAction::cancel())
                .with_action(DialogAction::primary("Save Changes", move |form| {
                    Some(Command::Update(id, form.clone()))
                })),
        );
        Ok(())
    }

    /// Validate `form` and PUT it over record `id`.
    #[instrument(skip(self, ctx, form), fields(path = R::PATH))]
    pub async fn update(&mut self, ctx: &Context, id: i64, form: &FormData) -> ApiResult<()> {
        let draft = R::draft(form).map_err(|e| ctx.fail(e.into()))?;

        send_json(
            ctx.transport(),
            Method::Put,
            &format!("{}/{id}", R::PATH),
            &draft,
        )
        .await
        .map_err(|e| ctx.fail(e))?;

        info!("{} {id} updated", R::NOUN);
        self.after_mutation(ctx, R::UPDATED).await
    }
}
