//! Rendering seam.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use crate::router::Page;
use crate::view::View;

/// Where frames go. Hosts implement this for a terminal, a test log, etc.
pub trait Screen: Send + Sync {
    /// Empty the content area.
    fn clear(&self);
    /// Highlight `page` in the navigation.
    fn set_active(&self, page: Page);
    /// Show a record count next to `page` in the navigation.
    fn set_badge(&self, page: Page, count: usize);
    /// Replace the content area with `view`.
    fn draw(&self, view: &View);
}

#[derive(Debug, Default)]
struct Recorded {
    frames: Vec<View>,
    active: Option<Page>,
    badges: BTreeMap<Page, usize>,
    clears: usize,
}

/// Screen that records what it was asked to draw.
#[derive(Debug, Default)]
pub struct HeadlessScreen {
    state: Mutex<Recorded>,
}

impl HeadlessScreen {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> std::sync::MutexGuard<'_, Recorded> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn frames(&self) -> Vec<View> {
        self.state().frames.clone()
    }

    pub fn last_frame(&self) -> Option<View> {
        self.state().frames.last().cloned()
    }

    pub fn active(&self) -> Option<Page> {
        self.state().active
    }

    pub fn badge(&self, page: Page) -> Option<usize> {
        self.state().badges.get(&page).copied()
    }

    pub fn clear_count(&self) -> usize {
        self.state().clears
    }
}

impl Screen for HeadlessScreen {
    fn clear(&self) {
        self.state().clears += 1;
    }

    fn set_active(&self, page: Page) {
        self.state().active = Some(page);
    }

    fn set_badge(&self, page: Page, count: usize) {
        self.state().badges.insert(page, count);
    }

    fn draw(&self, view: &View) {
        self.state().frames.push(view.clone());
    }
}
