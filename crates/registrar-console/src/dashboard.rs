//! Dashboard summary.

use registrar_api::{ApiResult, Course, Enrollment, Student, Transport, fetch_list};
use tracing::{info, instrument, warn};

use crate::context::Context;
use crate::notify::Level;
use crate::router::Page;
use crate::view::{Cell, DashboardView, Panel, Stats, TableRow, TableView, Tone, View};

/// Recent records shown per resource.
pub const RECENT_LIMIT: usize = 5;

pub const CONNECTIVITY_ERROR: &str =
    "Could not connect to the registrar API. Is the server running?";

/// Count and most recent records of one collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Tally<T> {
    pub total: usize,
    /// Newest first: the last [`RECENT_LIMIT`] records in list order, reversed.
    pub recent: Vec<T>,
}

impl<T: Clone> Tally<T> {
    pub fn of(items: &[T]) -> Self {
        Self {
            total: items.len(),
            recent: items.iter().rev().take(RECENT_LIMIT).cloned().collect(),
        }
    }
}

/// Everything the dashboard shows.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub students: Tally<Student>,
    pub courses: Tally<Course>,
    pub enrollments: Tally<Enrollment>,
}

impl Summary {
    pub fn stats(&self) -> Stats {
        Stats {
            students: self.students.total,
            courses: self.courses.total,
            enrollments: self.enrollments.total,
        }
    }

    pub fn view(&self) -> DashboardView {
        DashboardView {
            stats: Some(self.stats()),
            panels: vec![
                Panel {
                    title: "Recent Students",
                    table: recent_students(&self.students.recent),
                },
                Panel {
                    title: "Recent Enrollments",
                    table: recent_enrollments(&self.enrollments.recent),
                },
            ],
        }
    }
}

fn recent_students(students: &[Student]) -> TableView {
    TableView {
        columns: vec!["Student", "Email", "Phone", "Enrolled On"],
        rows: students
            .iter()
            .map(|s| TableRow {
                id: s.id,
                cells: vec![
                    Cell::Person {
                        initials: s.initials(),
                        name: s.full_name(),
                        sub: String::new(),
                    },
                    Cell::Mono(Some(s.email.clone())),
                    Cell::muted(s.phone.as_ref()),
                    Cell::mono(s.enrollment_date),
                ],
                actions: Vec::new(),
            })
            .collect(),
        empty_message: "No students yet",
    }
}

fn recent_enrollments(enrollments: &[Enrollment]) -> TableView {
    TableView {
        columns: vec!["Student", "Course", "Status", "Grade"],
        rows: enrollments
            .iter()
            .map(|e| TableRow {
                id: e.id,
                cells: vec![
                    Cell::text(e.student_label()),
                    Cell::Muted(Some(e.course_label())),
                    Cell::Badge {
                        text: e.status.to_string(),
                        tone: Tone::from(e.status),
                    },
                    Cell::mono(e.grade.as_deref()),
                ],
                actions: Vec::new(),
            })
            .collect(),
        empty_message: "No enrollments yet",
    }
}

/// Fetch all three collections concurrently.
///
/// Waits for every request to settle; if any failed, the first failure in
/// students, courses, enrollments order is returned.
pub async fn summarize(transport: &dyn Transport) -> ApiResult<Summary> {
    let (students, courses, enrollments) = futures::join!(
        fetch_list::<Student>(transport, "/students"),
        fetch_list::<Course>(transport, "/courses"),
        fetch_list::<Enrollment>(transport, "/enrollments"),
    );

    Ok(Summary {
        students: Tally::of(&students?),
        courses: Tally::of(&courses?),
        enrollments: Tally::of(&enrollments?),
    })
}

/// Dashboard entry point.
///
/// On success draws the stat cards and recent panels and refreshes every
/// navigation badge. On failure notifies a single connectivity error and
/// draws the dashboard without numbers.
#[instrument(skip_all)]
pub async fn show(ctx: &Context) -> ApiResult<Summary> {
    ctx.screen.draw(&View::Loading(Page::Dashboard));

    match summarize(ctx.transport()).await {
        Ok(summary) => {
            let stats = summary.stats();
            ctx.screen.set_badge(Page::Students, stats.students);
            ctx.screen.set_badge(Page::Courses, stats.courses);
            ctx.screen.set_badge(Page::Enrollments, stats.enrollments);
            ctx.screen.draw(&View::Dashboard(summary.view()));
            info!(?stats, "dashboard loaded");
            Ok(summary)
        }
        Err(err) => {
            warn!(error = %err, "dashboard summary failed");
            ctx.notifier.notify(CONNECTIVITY_ERROR, Level::Error);
            ctx.screen.draw(&View::Dashboard(DashboardView::default()));
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_keeps_last_five_newest_first() {
        let items: Vec<u32> = (1..=8).collect();
        let tally = Tally::of(&items);
        assert_eq!(tally.total, 8);
        assert_eq!(tally.recent, vec![8, 7, 6, 5, 4]);
    }

    #[test]
    fn test_tally_of_short_list() {
        let tally = Tally::of(&[1, 2]);
        assert_eq!(tally.recent, vec![2, 1]);
        let empty: Tally<u8> = Tally::of(&[]);
        assert_eq!(empty.total, 0);
        assert!(empty.recent.is_empty());
    }

    #[test]
    fn test_empty_summary_view_has_placeholders() {
        let summary = Summary {
            students: Tally::of(&[]),
            courses: Tally::of(&[]),
            enrollments: Tally::of(&[]),
        };
        let view = summary.view();
        assert_eq!(
            view.stats,
            Some(Stats {
                students: 0,
                courses: 0,
                enrollments: 0
            })
        );
        assert_eq!(view.panels[0].table.empty_message, "No students yet");
        assert!(view.panels[1].table.is_empty());
    }
}
