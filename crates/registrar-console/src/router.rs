//! Page set and page switching.

use std::fmt;
use std::str::FromStr;

use registrar_api::ParseEnumError;
use tracing::info;

use crate::screen::Screen;

/// A top-level page of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Page {
    #[default]
    Dashboard,
    Students,
    Courses,
    Enrollments,
}

impl Page {
    /// Navigation order.
    pub const ALL: [Page; 4] = [
        Page::Dashboard,
        Page::Students,
        Page::Courses,
        Page::Enrollments,
    ];

    /// Stable key used by the navigation and the shell ("students").
    pub fn key(&self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::Students => "students",
            Page::Courses => "courses",
            Page::Enrollments => "enrollments",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Students => "Students",
            Page::Courses => "Courses",
            Page::Enrollments => "Enrollments",
        }
    }

    /// Pages that carry a record-count badge in the navigation.
    pub fn has_badge(&self) -> bool {
        !matches!(self, Page::Dashboard)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Page {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|page| page.key() == wanted)
            .ok_or_else(|| ParseEnumError {
                kind: "page",
                value: s.to_string(),
            })
    }
}

/// Tracks the active page. There is no history.
#[derive(Debug, Default)]
pub struct Router {
    active: Page,
}

impl Router {
    /// A router sitting on the dashboard.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Page {
        self.active
    }

    /// Clear the content area, highlight `page` and make it active.
    ///
    /// The caller runs the page's entry point afterwards.
    pub fn switch_to(&mut self, page: Page, screen: &dyn Screen) {
        info!(from = %self.active, to = %page, "switching page");
        screen.clear();
        screen.set_active(page);
        self.active = page;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::HeadlessScreen;

    #[test]
    fn test_page_keys_round_trip() {
        for page in Page::ALL {
            assert_eq!(page.key().parse::<Page>().unwrap(), page);
        }
        assert_eq!("Students".parse::<Page>().unwrap(), Page::Students);
        assert!("reports".parse::<Page>().is_err());
    }

    #[test]
    fn test_router_starts_on_dashboard() {
        assert_eq!(Router::new().active(), Page::Dashboard);
    }

    #[test]
    fn test_switch_clears_and_highlights() {
        let screen = HeadlessScreen::new();
        let mut router = Router::new();
        router.switch_to(Page::Courses, &screen);

        assert_eq!(router.active(), Page::Courses);
        assert_eq!(screen.active(), Some(Page::Courses));
        assert_eq!(screen.clear_count(), 1);
    }
}
